//! # DeepGuard Detect
//!
//! Outbound capabilities and orchestration for the DeepGuard service: the
//! zero-shot classifier boundary with its startup capability check, image
//! download, scoped spool storage, and the analysis pipeline that composes
//! them.

pub mod classifier;
pub mod fetch;
pub mod pipeline;
pub mod spool;

pub use classifier::{
    CANDIDATE_LABELS, ClassifierHandle, RemoteClipClassifier, ZeroShotClassifier,
};
pub use fetch::{FETCH_TIMEOUT, ImageFetcher};
pub use pipeline::AnalysisPipeline;
pub use spool::{SpoolDir, SpooledFile};
