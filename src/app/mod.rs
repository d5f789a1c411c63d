// Application layer: batch orchestration over the processing pipeline

pub mod enhancement_use_case;

pub use enhancement_use_case::{BatchReport, EnhancementUseCase};
