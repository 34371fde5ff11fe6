use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AnalyticsError {
    #[error("Rolling window must cover at least 2 observations, got {0}")]
    InvalidWindow(usize),

    #[error("Invalid parameter '{0}': {1}")]
    InvalidParameter(String, String),
}
