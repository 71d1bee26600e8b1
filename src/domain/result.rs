//! Result type alias

use super::errors::ChompError;

/// Result type alias for extractor operations
///
/// # Examples
///
/// ```
/// use chomp_sendgrid::domain::result::Result;
/// use chomp_sendgrid::domain::errors::ChompError;
///
/// fn failing_function() -> Result<()> {
///     Err(ChompError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChompError>;
