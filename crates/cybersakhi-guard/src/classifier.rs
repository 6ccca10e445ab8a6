//! Classifier trait and request type

use async_trait::async_trait;
use cybersakhi_core::Result;
use serde::{Deserialize, Serialize};

use crate::harassment::ClassificationResult;

/// Text submitted for harassment classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    /// The raw candidate message, untouched
    pub text: String,
}

impl ClassificationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Whether the text has anything left after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Remote capability that labels free text for harassment and threat content.
///
/// Implementations may be slow or fail. A failed call must surface as an error
/// ([`cybersakhi_core::Error::is_transport`]) and never as a benign result.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classify the given request
    async fn classify(&self, request: &ClassificationRequest) -> Result<ClassificationResult>;

    /// Get the classifier name
    fn name(&self) -> &str;
}
