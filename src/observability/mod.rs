// Observability: metrics and monitoring

pub mod metrics;
