//! Pipeline execution - manager facade and per-pipeline supervision

pub mod manager;
pub mod supervisor;

pub use manager::{PipelineError, PipelineManager};
pub use supervisor::ExecutionSupervisor;
