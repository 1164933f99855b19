// src/lib.rs
pub mod config;
pub mod errors;
pub mod event;
pub mod event_factory;
pub mod event_source;
pub mod logging;
pub mod store;
pub mod view;
