//! Pure growth calculation rules shared by the runtime and offline tools.
//!
//! `calc-core` holds the exact-decimal stat formula, the exhaustive
//! enumeration of modifier tuples ([`engine::Enumerator`]) and the parameter
//! inference solver ([`inference::Inference`]). Every entry point is a pure
//! function of its inputs; lookup tables are owned by the caller.
pub mod config;
pub mod decimal;
pub mod engine;
pub mod error;
pub mod inference;
pub mod params;
pub mod record;
pub mod stats;
pub use config::CalcConfig;
pub use decimal::DecimalContext;
pub use engine::{EnumerationResult, Enumerator, Matches, enumerate};
pub use error::{CalcError, ErrorSeverity, Result};
pub use inference::{
    Candidate, EXPONENT_CANDIDATES, Inference, InferenceOutcome, KFit, LinearSolution,
    SkippedExponent, fit_growth, infer_params, solve_hidden_values,
};
pub use params::GrowthParams;
pub use record::{ParamSource, PetRecord, RawStats, ResolvedParams, Snapshot};
pub use stats::{
    HiddenValues, ModifierIter, ModifierSpace, ModifierTuple, Stat, StatBlock, StatVector,
    Weights, derive_stats, expected_stats,
};
