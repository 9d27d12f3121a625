//! HTTP runtime for the DeepGuard service.

pub mod error;
pub mod handlers;
pub mod router;


use std::sync::Arc;

use deepguard_core::AnalysisHistory;
use deepguard_detect::AnalysisPipeline;

/// Shared state behind every handler: the analysis pipeline plus a handle
/// to the same history store it records into.
#[derive(Clone)]
pub struct HttpRuntime {
    pub(crate) pipeline: Arc<AnalysisPipeline>,
    pub(crate) history: AnalysisHistory,
}

impl HttpRuntime {
    pub fn new(pipeline: AnalysisPipeline) -> Self {
        let history = pipeline.history().clone();
        Self {
            pipeline: Arc::new(pipeline),
            history,
        }
    }
}
