//! Mock step implementation for testing.

use crate::steps::base::{StepContext, StepError, StepOutput, StepRunner, StepStream};
use async_trait::async_trait;

#[derive(Clone)]
pub struct MockStep {
    available: bool,
    outputs: Vec<Result<StepOutput, StepError>>,
}

impl MockStep {
    pub fn new(available: bool, outputs: Vec<Result<StepOutput, StepError>>) -> Self {
        Self { available, outputs }
    }

    pub fn success() -> Self {
        Self {
            available: true,
            outputs: vec![
                Ok(StepOutput::Line("mock step output".to_string())),
                Ok(StepOutput::Completed),
            ],
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            outputs: vec![],
        }
    }

    pub fn failing() -> Self {
        Self {
            available: true,
            outputs: vec![
                Ok(StepOutput::Line("starting...".to_string())),
                Err(StepError::NonZeroExit { code: 1 }),
            ],
        }
    }
}

#[async_trait]
impl StepRunner for MockStep {
    async fn check_availability(&self) -> bool {
        self.available
    }

    async fn execute(&self, _ctx: &StepContext) -> Result<StepStream, StepError> {
        if !self.available {
            return Err(StepError::NotAvailable("mock step not available".to_string()));
        }

        let outputs = self.outputs.clone();
        let stream = tokio_stream::iter(outputs);
        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;

    fn ctx() -> StepContext {
        StepContext::new("/tmp/project", "/tmp/work")
    }

    #[tokio::test]
    async fn test_mock_step_success() {
        let step = MockStep::success();
        assert!(step.check_availability().await);

        let stream = step.execute(&ctx()).await.unwrap();
        let outputs: Vec<_> = stream.collect().await;

        assert_eq!(outputs.len(), 2);
        assert!(matches!(outputs[0], Ok(StepOutput::Line(_))));
        assert_eq!(outputs[1], Ok(StepOutput::Completed));
    }

    #[tokio::test]
    async fn test_mock_step_unavailable() {
        let step = MockStep::unavailable();
        assert!(!step.check_availability().await);

        let result = step.execute(&ctx()).await;
        assert!(matches!(result, Err(StepError::NotAvailable(_))));
    }

    #[tokio::test]
    async fn test_mock_step_failing() {
        let step = MockStep::failing();

        let stream = step.execute(&ctx()).await.unwrap();
        let outputs: Vec<_> = stream.collect().await;

        assert_eq!(outputs.len(), 2);
        assert!(matches!(outputs[0], Ok(StepOutput::Line(_))));
        assert_eq!(outputs[1], Err(StepError::NonZeroExit { code: 1 }));
    }
}
