pub mod context;
pub mod types;

pub use context::{PipelineContext, RunOptions};
pub use types::{PipelineResult, Step, StepError, StepOutput, StepResult};
