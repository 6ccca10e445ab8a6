//! Harassment analysis flow
//!
//! Wraps a [`TextClassifier`] with the request policy for one analysis surface:
//! blank input never reaches the classifier, at most one call is in flight,
//! every call is bounded by a timeout and the in-flight call can be cancelled.

use cybersakhi_core::{Error, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::classifier::{ClassificationRequest, TextClassifier};
use crate::harassment::{interpret, AnalysisReport};

/// Default deadline for one classification call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Single-flight harassment detector
pub struct HarassmentDetector {
    classifier: Arc<dyn TextClassifier>,
    timeout: Duration,
    in_flight: Mutex<Option<CancellationToken>>,
}

/// Clears the in-flight slot when the analysis finishes, however it finishes.
struct InFlightGuard<'a> {
    slot: &'a Mutex<Option<CancellationToken>>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.slot.lock().take();
    }
}

impl HarassmentDetector {
    pub fn new(classifier: Arc<dyn TextClassifier>) -> Self {
        Self {
            classifier,
            timeout: DEFAULT_TIMEOUT,
            in_flight: Mutex::new(None),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether an analysis is currently outstanding.
    pub fn is_analyzing(&self) -> bool {
        self.in_flight.lock().is_some()
    }

    /// Cancel the in-flight analysis, if any. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        match self.in_flight.lock().as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Analyze a message.
    ///
    /// Errors: [`Error::EmptyInput`] for blank text, [`Error::AnalysisInProgress`]
    /// while another call is outstanding, [`Error::Timeout`] or
    /// [`Error::Transport`] when the classifier fails, [`Error::Cancelled`] when
    /// [`Self::cancel`] was called.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisReport> {
        let request = ClassificationRequest::new(text);
        if request.is_blank() {
            return Err(Error::EmptyInput);
        }

        let token = {
            let mut slot = self.in_flight.lock();
            if slot.is_some() {
                return Err(Error::AnalysisInProgress);
            }
            let token = CancellationToken::new();
            *slot = Some(token.clone());
            token
        };
        let _guard = InFlightGuard {
            slot: &self.in_flight,
        };

        debug!(
            classifier = self.classifier.name(),
            chars = text.chars().count(),
            "Starting harassment analysis"
        );
        let start = Instant::now();

        let outcome = tokio::select! {
            _ = token.cancelled() => Err(Error::Cancelled),
            res = tokio::time::timeout(self.timeout, self.classifier.classify(&request)) => {
                match res {
                    Ok(inner) => inner,
                    Err(_) => Err(Error::Timeout),
                }
            }
        };

        let latency_us = start.elapsed().as_micros() as f64;
        metrics::histogram!("cybersakhi_classification_latency_us").record(latency_us);

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                warn!(kind = e.kind(), "Harassment analysis failed: {}", e);
                metrics::counter!("cybersakhi_classification_errors_total", "kind" => e.kind())
                    .increment(1);
                return Err(e);
            }
        };

        for anomaly in &result.anomalies {
            warn!(
                kind = anomaly.kind(),
                raw_severity = result.raw_severity.as_deref().unwrap_or(""),
                "Classifier response deviates from schema: {}",
                anomaly
            );
            metrics::counter!(
                "cybersakhi_classification_anomalies_total",
                "kind" => anomaly.kind()
            )
            .increment(1);
        }

        let report = interpret(result);
        info!(
            severity = %report.presentation.tier,
            harmful = report.offer_complaint,
            "Harassment analysis complete"
        );
        Ok(report)
    }
}
