use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimeError {
    #[error("Unknown timezone hypothesis: {0}")]
    InvalidTimezone(String),
}
