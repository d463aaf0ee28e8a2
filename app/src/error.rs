// ==============================================================================
// error.rs - Aggregation Pipeline Error Types
// ==============================================================================
// Description: Typed errors for upstream genomics provider failures
// Author: Matt Barham
// Created: 2026-02-09
// Modified: 2026-02-09
// Version: 1.0.0
// ==============================================================================

use thiserror::Error;

/// Errors raised by the aggregation procedures.
///
/// Procedures that are best-effort enrichment (gene detail, sequence fetch)
/// never surface these; they degrade to an empty/null result with an inline
/// error field instead. All-or-nothing procedures (genome catalog, chromosome
/// catalog, gene search, clinical variant search, variant effect) raise.
#[derive(Error, Debug)]
pub enum AggregatorError {
    /// A procedure input failed validation (empty identifier, zero position).
    /// The message carries the offending field path.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An upstream response arrived but did not have the expected shape.
    #[error("{provider} returned a malformed response: {detail}")]
    Validation {
        provider: &'static str,
        detail: String,
    },

    /// Transport failure or non-success status from an upstream provider.
    #[error("{provider} request failed: {detail}")]
    Upstream {
        provider: &'static str,
        detail: String,
    },

    /// A required endpoint or setting is missing from the deployment.
    #[error("configuration error: {0}")]
    Configuration(&'static str),
}

impl AggregatorError {
    pub(crate) fn validation(provider: &'static str, detail: impl Into<String>) -> Self {
        AggregatorError::Validation {
            provider,
            detail: detail.into(),
        }
    }

    pub(crate) fn upstream(provider: &'static str, detail: impl Into<String>) -> Self {
        AggregatorError::Upstream {
            provider,
            detail: detail.into(),
        }
    }
}

impl From<validator::ValidationErrors> for AggregatorError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AggregatorError::InvalidInput(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_provider() {
        let err = AggregatorError::upstream("UCSC", "status 503");
        assert_eq!(err.to_string(), "UCSC request failed: status 503");

        let err = AggregatorError::validation("ClinVar", "missing field `title`");
        assert_eq!(
            err.to_string(),
            "ClinVar returned a malformed response: missing field `title`"
        );
    }
}
