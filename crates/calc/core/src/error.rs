//! Error infrastructure for calc-core.
//!
//! Every fallible operation in the crate returns [`CalcError`]. Variants are
//! classified by [`ErrorSeverity`] so callers can decide whether to skip a
//! single candidate, reject the input, or abort the request.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the failure affects one candidate; the caller moves on
/// - **Validation**: the input cannot be used and should be corrected
/// - **Fatal**: the request cannot proceed at all
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Errors raised by the decimal context, the solver and record resolution.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    /// The fixed-precision decimal context could not be initialized.
    #[error("decimal arithmetic unavailable: precision {requested} is below the minimum of {minimum}")]
    ArithmeticUnavailable { requested: u64, minimum: u64 },

    /// A stat component is missing, non-finite or out of the representable range.
    #[error("invalid observation for {field}: {reason}")]
    InvalidObservation {
        field: &'static str,
        reason: &'static str,
    },

    /// Elimination hit an exactly-zero pivot.
    #[error("linear system is degenerate for exponent {exponent}")]
    DegenerateSystem { exponent: u32 },

    /// Every exponent candidate failed during inference.
    #[error("no exponent candidate produced usable growth parameters")]
    NoCandidateFound,

    /// Record has neither known parameters nor a usable snapshot pair.
    #[error("record has neither known k/u nor a usable S0/SG pair")]
    MalformedRecord,
}

impl CalcError {
    /// Returns the severity level of this error.
    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ArithmeticUnavailable { .. } => ErrorSeverity::Fatal,
            Self::InvalidObservation { .. } | Self::DegenerateSystem { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::NoCandidateFound | Self::MalformedRecord => ErrorSeverity::Validation,
        }
    }

    /// Returns a static string identifier for this error variant.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ArithmeticUnavailable { .. } => "ARITHMETIC_UNAVAILABLE",
            Self::InvalidObservation { .. } => "INVALID_OBSERVATION",
            Self::DegenerateSystem { .. } => "DEGENERATE_SYSTEM",
            Self::NoCandidateFound => "NO_CANDIDATE_FOUND",
            Self::MalformedRecord => "MALFORMED_RECORD",
        }
    }

    pub(crate) const fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidObservation { field, reason }
    }
}

pub type Result<T> = core::result::Result<T, CalcError>;
