use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// One of the five market/contract inputs is non-positive or non-finite.
    #[error("invalid option parameters")]
    InvalidParameters,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
