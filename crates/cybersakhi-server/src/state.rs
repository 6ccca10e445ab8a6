//! Shared application state

use anyhow::Result;
use cybersakhi_guard::{ChatAssistant, ChatModel, HarassmentDetector, LlmClient, TextClassifier};
use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::config::ServerConfig;

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Classifier backing every harassment detector
    pub classifier: Arc<dyn TextClassifier>,

    /// Sakhi chat assistant
    pub assistant: ChatAssistant,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,

    /// One detector per analysis session, present while a request holds a lease on it
    sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
}

struct SessionEntry {
    detector: Arc<HarassmentDetector>,
    leases: usize,
}

/// A request's hold on its session detector.
///
/// The session entry lives exactly as long as at least one lease on it does,
/// including when the holding request future is dropped mid-analysis.
pub struct SessionLease {
    sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
    session: String,
    detector: Arc<HarassmentDetector>,
}

impl SessionLease {
    pub fn session(&self) -> &str {
        &self.session
    }

    pub fn detector(&self) -> &HarassmentDetector {
        &self.detector
    }
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        let mut sessions = self.sessions.lock();
        let released = match sessions.get_mut(&self.session) {
            Some(entry) => {
                entry.leases = entry.leases.saturating_sub(1);
                entry.leases == 0
            }
            None => false,
        };
        if released {
            sessions.remove(&self.session);
        }
    }
}

impl AppState {
    /// Initialize application state with the hosted LLM as classifier and chat model
    pub fn new(config: ServerConfig, metrics_handle: PrometheusHandle) -> Result<Self> {
        let client = Arc::new(LlmClient::new(config.llm_client_config())?);
        info!("LLM endpoint: {}", client.endpoint());

        Ok(Self::with_backends(
            config,
            client.clone(),
            client,
            metrics_handle,
        ))
    }

    /// Initialize application state with explicit backends
    pub fn with_backends(
        config: ServerConfig,
        classifier: Arc<dyn TextClassifier>,
        chat_model: Arc<dyn ChatModel>,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self {
            config: Arc::new(config),
            classifier,
            assistant: ChatAssistant::new(chat_model),
            metrics_handle,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Lease the session's detector, creating it on first use.
    ///
    /// Every concurrent lease on a session shares one detector, so its
    /// single-flight policy holds across requests.
    pub fn lease_detector(&self, session: &str) -> SessionLease {
        let mut sessions = self.sessions.lock();
        let entry = sessions
            .entry(session.to_string())
            .or_insert_with(|| SessionEntry {
                detector: Arc::new(
                    HarassmentDetector::new(self.classifier.clone())
                        .with_timeout(self.config.classification_timeout()),
                ),
                leases: 0,
            });
        entry.leases += 1;

        SessionLease {
            sessions: self.sessions.clone(),
            session: session.to_string(),
            detector: entry.detector.clone(),
        }
    }

    /// Cancel the session's in-flight analysis. Returns whether one was running.
    pub fn cancel_analysis(&self, session: &str) -> bool {
        let detector = self
            .sessions
            .lock()
            .get(session)
            .map(|entry| entry.detector.clone());
        detector.map_or(false, |d| d.cancel())
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.lock().len()
    }
}
