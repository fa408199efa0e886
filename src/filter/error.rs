/// Errors that can occur while filtering runs
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// The run has no control values to estimate fences from
    #[error("Run {index} ('{run}') has no control values to estimate a threshold from")]
    EmptyRun {
        /// Position of the run in its collection
        index: usize,
        /// Run name
        run: String,
    },

    /// Filter parameters are out of range
    #[error("Invalid filter configuration: {0}")]
    InvalidConfig(String),
}
