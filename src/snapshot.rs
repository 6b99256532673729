use std::fmt;

use serde::Deserialize;
use serde::de::{self, Deserializer, MapAccess, Visitor};

/// One message from the metrics backend. Replaced wholesale on every update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub cpu: CpuCores,
    pub disk: Option<UsageSection>,
    pub ram: Option<UsageSection>,
    pub swap: Option<UsageSection>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct UsageSection {
    pub used: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoreUsage {
    pub label: String,
    pub usage: f64,
}

/// Per-core usage in the order the producer wrote the keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuCores(Vec<CoreUsage>);

impl CpuCores {
    pub fn iter(&self) -> impl Iterator<Item = &CoreUsage> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for CpuCores {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut cores = CpuCores::default();
        for (label, usage) in iter {
            cores.upsert(label, usage);
        }
        cores
    }
}

impl CpuCores {
    // A repeated key keeps its first position and takes the latest value.
    fn upsert(&mut self, label: String, usage: f64) {
        match self.0.iter_mut().find(|c| c.label == label) {
            Some(existing) => existing.usage = usage,
            None => self.0.push(CoreUsage { label, usage }),
        }
    }
}

impl<'de> Deserialize<'de> for CpuCores {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CoresVisitor;

        impl<'de> Visitor<'de> for CoresVisitor {
            type Value = CpuCores;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of core label to usage percent")
            }

            fn visit_map<A>(self, mut map: A) -> Result<CpuCores, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut cores = CpuCores(Vec::with_capacity(map.size_hint().unwrap_or(0)));
                while let Some((label, usage)) = map.next_entry::<String, f64>()? {
                    cores.upsert(label, usage);
                }
                Ok(cores)
            }

            // `"cpu": null` reads as no cores, like a null disk/ram/swap section.
            fn visit_none<E: de::Error>(self) -> Result<CpuCores, E> {
                Ok(CpuCores::default())
            }

            fn visit_some<D>(self, deserializer: D) -> Result<CpuCores, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_map(self)
            }
        }

        deserializer.deserialize_option(CoresVisitor)
    }
}

/// Parse one message body. The payload must be a JSON object.
pub fn parse_snapshot(text: &str) -> Result<Snapshot, serde_json::Error> {
    if !text.trim_start().starts_with('{') {
        return Err(de::Error::custom("snapshot payload is not a JSON object"));
    }
    serde_json::from_str(text)
}
