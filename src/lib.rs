pub mod analysis;
pub mod client;
pub mod config;
pub mod logging;
pub mod mvi;
pub mod notify;
pub mod progress;
pub mod shutdown;
pub mod ui;
