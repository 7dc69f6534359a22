pub mod analysis;
pub mod config;
pub mod data;
pub mod logging;
pub mod report;
pub mod runner;
