//! Processor trait: the abstraction over document generators.

use async_trait::async_trait;

use crate::document::TaskOutput;
use crate::error::ProcessorError;
use crate::input::TaskInput;

/// Turns a typed task input into a typed document.
///
/// The variant of the returned [`TaskOutput`] must match the artifact kind
/// declared by the input's task kind; the executor rejects mismatches.
#[async_trait]
pub trait Processor: Send + Sync {
    fn name(&self) -> &str;

    async fn process(&self, input: TaskInput) -> Result<TaskOutput, ProcessorError>;
}
