//! Error types for level loading and server communication
//!
//! Resource exhaustion and search-space exhaustion are deliberately absent:
//! both are normal "no plan" outcomes carried by
//! [`crate::search::SearchStatus`], never errors.

use std::fmt;

/// Main error type for planner operations
#[derive(Debug)]
pub enum PlannerError {
    /// Level description violates the expected grammar
    MalformedLevel {
        /// 1-based line number in the level stream
        line: usize,
        /// Description of the violation
        reason: String,
    },

    /// A required level section header never appeared
    MissingSection {
        /// The expected section header, e.g. `#initial`
        section: &'static str,
    },

    /// A color name outside the server vocabulary
    UnknownColor {
        /// 1-based line number in the level stream
        line: usize,
        /// The unrecognized name
        name: String,
    },

    /// Level grid exceeds the supported dimensions
    LevelTooLarge {
        /// Parsed row count
        rows: usize,
        /// Parsed column count
        cols: usize,
        /// Maximum supported dimension
        max: usize,
    },

    /// Runtime parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Reading from or writing to the server stream failed
    Protocol {
        /// The exchange being performed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLevel { line, reason } => {
                write!(f, "Malformed level at line {line}: {reason}")
            }
            Self::MissingSection { section } => {
                write!(f, "Level stream ended before section '{section}'")
            }
            Self::UnknownColor { line, name } => {
                write!(f, "Unknown color '{name}' at line {line}")
            }
            Self::LevelTooLarge { rows, cols, max } => {
                write!(f, "Level grid {rows}x{cols} exceeds maximum dimension {max}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Protocol { operation, source } => {
                write!(f, "Protocol error during {operation}: {source}")
            }
        }
    }
}

impl std::error::Error for PlannerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Protocol { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        Self::Protocol {
            operation: "stream",
            source: err,
        }
    }
}

/// Convenience type alias for planner results
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Create a malformed-level error
pub fn malformed_level(line: usize, reason: &impl ToString) -> PlannerError {
    PlannerError::MalformedLevel {
        line,
        reason: reason.to_string(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PlannerError {
    PlannerError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a protocol error for a named exchange
pub const fn protocol(operation: &'static str, source: std::io::Error) -> PlannerError {
    PlannerError::Protocol { operation, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_line_number() {
        let err = malformed_level(17, &"goal row wider than initial grid");
        assert_eq!(
            err.to_string(),
            "Malformed level at line 17: goal row wider than initial grid"
        );
    }

    #[test]
    fn test_protocol_error_exposes_source() {
        use std::error::Error;

        let inner = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "closed");
        let err = protocol("plan submission", inner);
        assert!(err.source().is_some());
    }
}
