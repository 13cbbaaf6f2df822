use crate::{
    collector::{BlockNumberSource, CollectorError},
    detector::StalenessDetector,
    hex::{HexHeightError, parse_block_height},
    models::{CheckContext, CheckState, EvaluationResult, Severity},
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Failed to get response: {0}")]
    Transport(reqwest::Error),
    #[error("Failed to parse response: {0}")]
    Decode(serde_json::Error),
    #[error("Failed to convert hex to int64: {0}")]
    Parse(#[from] HexHeightError),
}

impl From<CollectorError> for CheckError {
    fn from(error: CollectorError) -> Self {
        match error {
            CollectorError::Transport(error) => Self::Transport(error),
            CollectorError::Decode(error) => Self::Decode(error),
        }
    }
}

/// A health check a monitoring host can invoke by name.
#[async_trait::async_trait]
pub trait Check: Send + Sync {
    fn name(&self) -> &str;

    async fn execute(&self, context: CheckContext) -> EvaluationResult;
}

/// Polls a node for its block number and grades how long it has been stuck.
pub struct BlockHeightCheck<S> {
    source: S,
    detector: Mutex<StalenessDetector>,
}

impl<S: BlockNumberSource> BlockHeightCheck<S> {
    pub fn new(source: S, detector: StalenessDetector) -> Self {
        Self {
            source,
            detector: Mutex::new(detector),
        }
    }

    /// A copy of the detector as it stands between evaluations.
    pub async fn detector(&self) -> StalenessDetector {
        self.detector.lock().await.clone()
    }

    pub async fn run(&self, context: &CheckContext) -> EvaluationResult {
        let mut result = EvaluationResult::unevaluated(context.execute_method.clone());

        // Held across the fetch so overlapping invocations observe heights in order.
        let mut detector = self.detector.lock().await;

        let latest_height = match self.fetch_height().await {
            Ok(height) => height,
            Err(error) => {
                error!(error = %error, "block height check failed");
                result.message = error.to_string();
                result.severity = Severity::Critical;
                result.state = CheckState::Failure;
                return result;
            }
        };

        info!(
            previous_height = detector.previous_height(),
            latest_height, "comparing block heights"
        );

        let evaluation = detector.evaluate(latest_height);
        debug!(stall_count = detector.stall_count(), "{}", evaluation.message);

        result.message = evaluation.message;
        result.severity = evaluation.severity;
        result.state = evaluation.state;
        result
    }

    async fn fetch_height(&self) -> Result<i64, CheckError> {
        let raw = self.source.block_number_hex().await?;
        Ok(parse_block_height(&raw)?)
    }
}

#[async_trait::async_trait]
impl<S: BlockNumberSource> Check for BlockHeightCheck<S> {
    fn name(&self) -> &str {
        crate::PLUGIN_NAME
    }

    async fn execute(&self, context: CheckContext) -> EvaluationResult {
        self.run(&context).await
    }
}
