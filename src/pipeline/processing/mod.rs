// Pipeline processing: validation, scoring, and batch-level checks

pub mod batch_checks;
pub mod benchmark;
pub mod confidence;
pub mod enhance;
pub mod summary;
pub mod validate;
