//! Zero-shot image classification boundary.
//!
//! The classifier is an external capability consumed through a narrow
//! contract: score one image against two text labels, return a joint
//! probability pair. The model behind the endpoint is not part of this
//! crate's contract.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::RgbImage;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use deepguard_core::{ClassifierError, ScorePair};

/// Candidate labels for the two-way zero-shot framing. A design constant,
/// not configurable per request.
pub const CANDIDATE_LABELS: [&str; 2] = [
    "a real photograph of a person",
    "an AI generated or synthetic image of a person",
];

/// A two-way zero-shot image classifier.
///
/// Implementations perform a joint classification over exactly two labels;
/// the returned pair sums to 1. No retries: a transient failure propagates.
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync + std::fmt::Debug {
    async fn classify(
        &self,
        image: &RgbImage,
        labels: [&str; 2],
    ) -> Result<ScorePair, ClassifierError>;
}

/// Result of the startup capability check: either a ready classifier or a
/// typed unavailable reason, checked explicitly by the pipeline rather than
/// inferred from a nullable global.
#[derive(Clone)]
pub enum ClassifierHandle {
    Ready(Arc<dyn ZeroShotClassifier>),
    Unavailable { reason: String },
}

impl ClassifierHandle {
    /// Run the capability check against a remote scoring endpoint.
    pub async fn connect(base_url: &str) -> Self {
        let classifier = RemoteClipClassifier::new(base_url);
        match classifier.probe().await {
            Ok(()) => {
                info!(endpoint = base_url, "classifier ready");
                Self::Ready(Arc::new(classifier))
            }
            Err(e) => {
                warn!(endpoint = base_url, error = %e, "classifier unavailable");
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn ready(classifier: Arc<dyn ZeroShotClassifier>) -> Self {
        Self::Ready(classifier)
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// The classifier, or the typed unavailability error.
    pub fn get(&self) -> Result<&Arc<dyn ZeroShotClassifier>, ClassifierError> {
        match self {
            Self::Ready(classifier) => Ok(classifier),
            Self::Unavailable { reason } => Err(ClassifierError::Unavailable {
                reason: reason.clone(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    image: String,
    labels: [&'a str; 2],
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    probabilities: [f64; 2],
}

/// Classifier backed by a remote zero-shot scoring endpoint
/// (`POST {base}/classify`, `GET {base}/health`).
#[derive(Debug)]
pub struct RemoteClipClassifier {
    client: Client,
    base_url: String,
}

impl RemoteClipClassifier {
    /// Per-request timeout for classification calls. Scoring a single image
    /// is slow on CPU-only hosts, so this is deliberately generous.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Timeout for the startup health probe.
    const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Probe the scoring endpoint once. Used by the startup capability check.
    pub async fn probe(&self) -> Result<(), ClassifierError> {
        let response = self
            .client
            .get(self.endpoint("health"))
            .timeout(Self::PROBE_TIMEOUT)
            .send()
            .await
            .map_err(|e| ClassifierError::Unavailable {
                reason: e.to_string(),
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ClassifierError::Unavailable {
                reason: format!("health probe returned {}", response.status()),
            })
        }
    }
}

#[async_trait]
impl ZeroShotClassifier for RemoteClipClassifier {
    async fn classify(
        &self,
        image: &RgbImage,
        labels: [&str; 2],
    ) -> Result<ScorePair, ClassifierError> {
        let png = encode_png(image)?;
        let request = ClassifyRequest {
            image: BASE64.encode(&png),
            labels,
        };

        let response = self
            .client
            .post(self.endpoint("classify"))
            .timeout(Self::REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClassifierError::RequestFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::RequestFailed {
                reason: format!("scoring endpoint returned {status}"),
            });
        }

        let parsed: ClassifyResponse =
            response
                .json()
                .await
                .map_err(|e| ClassifierError::MalformedResponse {
                    reason: e.to_string(),
                })?;

        normalize_scores(parsed.probabilities)
    }
}

/// Normalize a raw probability pair into a [`ScorePair`] summing to 1.
pub(crate) fn normalize_scores(raw: [f64; 2]) -> Result<ScorePair, ClassifierError> {
    let [real, fake] = raw;
    if !real.is_finite() || !fake.is_finite() || real < 0.0 || fake < 0.0 {
        return Err(ClassifierError::InvalidScores {
            reason: format!("got [{real}, {fake}]"),
        });
    }
    let sum = real + fake;
    if sum <= 0.0 {
        return Err(ClassifierError::InvalidScores {
            reason: "probabilities sum to zero".to_string(),
        });
    }
    Ok(ScorePair {
        real: real / sum,
        fake: fake / sum,
    })
}

fn encode_png(image: &RgbImage) -> Result<Vec<u8>, ClassifierError> {
    let mut buf = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| ClassifierError::RequestFailed {
            reason: format!("failed to encode image for scoring: {e}"),
        })?;
    Ok(buf.into_inner())
}
