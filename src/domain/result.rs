//! Result type alias for the deidentifier

use super::errors::DeidError;

/// Result type alias using [`DeidError`] as the error type
///
/// # Examples
///
/// ```
/// use deidentifier::domain::result::Result;
/// use deidentifier::domain::errors::DeidError;
///
/// fn failing_function() -> Result<()> {
///     Err(DeidError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, DeidError>;
