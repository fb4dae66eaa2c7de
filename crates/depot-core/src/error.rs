//! Error type for registry construction
//!
//! [`DepotError`] is raised while assembling or deriving a
//! [`crate::SupplyNetwork`]. Algorithm crates convert it into their own error
//! taxonomies at API boundaries.
//!
//! # Example
//!
//! ```
//! use depot_core::{DepotError, DepotResult, SupplyNetwork};
//!
//! fn build() -> DepotResult<SupplyNetwork> {
//!     SupplyNetwork::builder().build()
//! }
//!
//! assert!(matches!(build(), Err(DepotError::Validation(_))));
//! ```

use crate::DcId;
use thiserror::Error;

/// Errors raised by the supply-network registry.
#[derive(Error, Debug)]
pub enum DepotError {
    /// Data validation errors (bad ids, non-positive demand or cost, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A derivation named a DC the registry does not hold
    #[error("unknown distribution center '{0}'")]
    UnknownDistributionCenter(DcId),
}

/// Convenience type alias for Results using DepotError.
pub type DepotResult<T> = Result<T, DepotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DepotError::Validation("store S1 has non-positive demand".into());
        assert!(err.to_string().contains("Validation error"));
        assert!(err.to_string().contains("S1"));

        let err = DepotError::UnknownDistributionCenter(DcId::new("DC9"));
        assert_eq!(err.to_string(), "unknown distribution center 'DC9'");
    }

    #[test]
    fn test_question_mark_operator() {
        fn inner() -> DepotResult<()> {
            Err(DepotError::Validation("test".into()))
        }

        fn outer() -> DepotResult<()> {
            inner()?;
            Ok(())
        }

        assert!(outer().is_err());
    }
}
