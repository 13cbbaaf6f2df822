use crate::models::{CheckState, EvaluationResult, Severity};

pub const DEFAULT_CRITICAL_THRESHOLD: u32 = 3;

/// Height tracking carried from one evaluation to the next.
///
/// `previous_height` starts at 0, so "never observed" and "observed height 0" are the
/// same state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectorState {
    pub previous_height: i64,
    pub stall_count: u32,
    pub critical_threshold: u32,
}

impl Default for DetectorState {
    fn default() -> Self {
        Self::with_threshold(DEFAULT_CRITICAL_THRESHOLD)
    }
}

impl DetectorState {
    pub fn with_threshold(critical_threshold: u32) -> Self {
        Self {
            previous_height: 0,
            stall_count: 0,
            critical_threshold,
        }
    }
}

/// Classifies successive block heights as advancing or stuck.
///
/// Evaluations mutate the state and must be applied in order; callers that can be
/// invoked concurrently have to serialize access themselves.
#[derive(Debug, Clone, Default)]
pub struct StalenessDetector {
    state: DetectorState,
}

impl StalenessDetector {
    pub fn new(critical_threshold: u32) -> Self {
        Self::from_state(DetectorState::with_threshold(critical_threshold))
    }

    pub fn from_state(state: DetectorState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn previous_height(&self) -> i64 {
        self.state.previous_height
    }

    pub fn stall_count(&self) -> u32 {
        self.state.stall_count
    }

    pub fn critical_threshold(&self) -> u32 {
        self.state.critical_threshold
    }

    pub fn evaluate(&mut self, observed: i64) -> EvaluationResult {
        let (severity, message) = if observed > self.state.previous_height {
            self.state.stall_count = 0;
            (
                Severity::Info,
                format!("Block height increasing. Current height: {observed}"),
            )
        } else {
            self.state.stall_count = self.state.stall_count.saturating_add(1);
            if self.state.stall_count > self.state.critical_threshold {
                (
                    Severity::Critical,
                    format!(
                        "Block height stuck more than {} times. Current height: {observed}",
                        self.state.critical_threshold
                    ),
                )
            } else {
                (
                    Severity::Warning,
                    format!(
                        "Block height stuck {} times. Current height: {observed}",
                        self.state.stall_count
                    ),
                )
            }
        };

        self.state.previous_height = observed;

        EvaluationResult {
            func_name: String::new(),
            message,
            severity,
            state: CheckState::Success,
        }
    }
}
