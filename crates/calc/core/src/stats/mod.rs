//! Stat model shared by the enumeration engine and the inference solver.
//!
//! ```text
//! [ hidden values u ] + [ modifier tuple ]
//!        ↓ × k/100
//! [ scaled components iH, iA, iD, iG ]
//!        ↓ fixed weights
//! [ weighted stats ] → floor → [ displayed stats ]
//! ```

pub mod block;
pub mod formula;
pub mod modifiers;

pub use block::{HiddenValues, Stat, StatBlock, StatVector};
pub use formula::{Weights, derive_stats, expected_stats, growth_factor, weighted_stats};
pub use modifiers::{ModifierIter, ModifierSpace, ModifierTuple};
