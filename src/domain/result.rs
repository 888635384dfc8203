//! Result type alias for MediClear

use super::errors::MediClearError;

/// Result type alias for MediClear operations
///
/// # Examples
///
/// ```
/// use mediclear::domain::result::Result;
/// use mediclear::domain::errors::MediClearError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MediClearError::Validation("Symptoms are required".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MediClearError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(MediClearError::Validation("test error".to_string()));
        assert!(result.is_err());
    }
}
