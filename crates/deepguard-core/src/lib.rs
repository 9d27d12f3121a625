//! # DeepGuard Core
//!
//! Domain types and invariants for the DeepGuard image analysis service:
//! the result model and verdict derivation, input validation, the bounded
//! analysis history, and the error taxonomy shared across crates.

pub mod analysis;
pub mod error;
pub mod history;
pub mod validation;

pub use analysis::{AnalysisResult, FAKE_LABEL, LabelScore, REAL_LABEL, ScorePair, Verdict};
pub use error::{
    AnalysisError, ClassifierError, HistoryError, ResourceError, ValidationError,
};
pub use history::{AnalysisHistory, MAX_HISTORY};
pub use validation::{ALLOWED_EXTENSIONS, MAX_FILE_SIZE_BYTES, MAX_FILE_SIZE_MB};
