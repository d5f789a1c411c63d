pub mod config;
pub mod error;
pub mod logging;
pub mod observability;
pub mod parser;
pub mod pipeline;

// Application layer wrapping the processing pipeline
pub mod app;

// Domain data shapes shared across layers
pub mod domain;
