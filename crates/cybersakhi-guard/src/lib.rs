//! CyberSakhi Guard
//!
//! Safety evaluators behind the CyberSakhi application.
//!
//! - [`password`]: fixed password checklist and strength tier, a pure function
//! - [`harassment`]: response schema, boundary parser and severity presentation
//!   for the remote harassment classifier
//! - [`detector`]: single-flight analysis flow with timeout and cancellation
//! - [`llm`]: HTTP client for the hosted LLM, used as classifier and chat model
//! - [`prompts`] and [`assistant`]: prompt templates and the chat assistant
//! - [`complaint`]: complaint draft validation and priority rules

pub mod assistant;
pub mod classifier;
pub mod complaint;
pub mod detector;
pub mod harassment;
pub mod llm;
pub mod password;
pub mod prompts;

pub use assistant::ChatAssistant;
pub use classifier::{ClassificationRequest, TextClassifier};
pub use complaint::{
    ComplaintCategory, ComplaintDraft, ComplaintStatus, ComplaintSubmission, Priority,
};
pub use detector::HarassmentDetector;
pub use harassment::{
    interpret, response_schema, AnalysisReport, ClassificationResult, Icon, Presentation,
    SchemaAnomaly, Severity, UNRATED_LABEL,
};
pub use llm::{ChatModel, LlmClient, LlmClientConfig};
pub use password::{
    evaluate_password, PasswordEvaluation, PasswordRuleResult, RuleId, StrengthTier,
};
pub use prompts::Language;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{ClassificationRequest, TextClassifier};
    pub use crate::detector::HarassmentDetector;
    pub use crate::harassment::{AnalysisReport, ClassificationResult, Severity};
    pub use crate::password::{evaluate_password, PasswordEvaluation, StrengthTier};
}
