pub mod action;
pub mod app;
pub mod config;
pub mod event;
pub mod feed;
pub mod format;
pub mod logging;
pub mod plain;
pub mod snapshot;
pub mod ui;
pub mod view;
