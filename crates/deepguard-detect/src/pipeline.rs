//! The analysis orchestration pipeline.
//!
//! Straight-line composition of validate, acquire, classify, derive,
//! record; the transport layer calls nothing else. Both public operations
//! share the classify-derive-record tail.

use image::RgbImage;
use tracing::{info, instrument};

use deepguard_core::{
    AnalysisError, AnalysisHistory, AnalysisResult, ValidationError, validation,
};

use crate::classifier::{CANDIDATE_LABELS, ClassifierHandle};
use crate::fetch::{ImageFetcher, decode_rgb, encode_jpeg};
use crate::spool::SpoolDir;

/// Orchestrates a single analysis from raw input to recorded result.
///
/// History is only touched after a verdict has been derived, so a failed
/// analysis never leaves a trace there. The spooled temporary file is
/// released by its guard on every exit path.
pub struct AnalysisPipeline {
    classifier: ClassifierHandle,
    history: AnalysisHistory,
    spool: SpoolDir,
    fetcher: ImageFetcher,
}

impl AnalysisPipeline {
    pub fn new(classifier: ClassifierHandle, history: AnalysisHistory, spool: SpoolDir) -> Self {
        Self {
            classifier,
            history,
            spool,
            fetcher: ImageFetcher::new(),
        }
    }

    pub fn history(&self) -> &AnalysisHistory {
        &self.history
    }

    /// Analyze an uploaded file.
    ///
    /// The extension check runs before anything touches the filesystem, so
    /// a rejected `.txt` never creates a spool file. The size check runs
    /// against the spooled copy.
    #[instrument(skip(self, bytes))]
    pub async fn analyze_upload(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<AnalysisResult, AnalysisError> {
        if filename.is_empty() {
            return Err(ValidationError::EmptyFilename.into());
        }
        validation::validate_extension(filename)?;

        let extension = validation::file_extension(filename);
        let spooled = self.spool.spool_upload(&extension, bytes)?;
        validation::validate_size(spooled.size()?)?;

        let image = decode_rgb(&spooled.read()?)?;
        self.finish(filename.to_string(), &image).await
        // `spooled` drops here, on success and on every failure above.
    }

    /// Analyze an image referenced by URL.
    #[instrument(skip(self))]
    pub async fn analyze_url(&self, url: &str) -> Result<AnalysisResult, AnalysisError> {
        validation::validate_url(url)?;

        let image = self.fetcher.fetch_image(url).await?;
        let _spooled = self.spool.spool_download(&encode_jpeg(&image)?)?;

        let source_name = validation::source_name_from_url(url);
        self.finish(source_name, &image).await
    }

    /// Shared tail: classify, derive the verdict, record the result.
    async fn finish(
        &self,
        source_name: String,
        image: &RgbImage,
    ) -> Result<AnalysisResult, AnalysisError> {
        let classifier = self.classifier.get()?;
        let scores = classifier.classify(image, CANDIDATE_LABELS).await?;
        info!(
            real = scores.real,
            fake = scores.fake,
            source = %source_name,
            "classifier scores"
        );

        let result = AnalysisResult::from_scores(source_name, scores);
        self.history.record(result.clone())?;
        Ok(result)
    }
}
