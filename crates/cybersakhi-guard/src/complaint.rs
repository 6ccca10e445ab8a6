//! Cyber-crime complaint drafts
//!
//! Validation and priority rules applied before a complaint is handed to the
//! entity store. Persisting it is the caller's job.

use chrono::NaiveDate;
use cybersakhi_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::harassment::AnalysisReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintCategory {
    Harassment,
    Phishing,
    IdentityTheft,
    Cyberstalking,
    MorphedImages,
    Blackmail,
    Hacking,
    Other,
}

impl ComplaintCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Harassment => "Online Harassment",
            Self::Phishing => "Phishing/Scam",
            Self::IdentityTheft => "Identity Theft",
            Self::Cyberstalking => "Cyberstalking",
            Self::MorphedImages => "Morphed Images/Deepfakes",
            Self::Blackmail => "Blackmail/Extortion",
            Self::Hacking => "Account Hacking",
            Self::Other => "Other",
        }
    }

    /// Priority assigned on submission.
    pub fn priority(&self) -> Priority {
        match self {
            Self::Blackmail | Self::MorphedImages => Priority::High,
            _ => Priority::Medium,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplaintStatus {
    #[default]
    Pending,
    UnderReview,
    Resolved,
    Escalated,
}

/// Complaint as filled in by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintDraft {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub category: Option<ComplaintCategory>,

    #[serde(default)]
    pub description: String,

    /// Platform where the incident occurred
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_date: Option<NaiveDate>,

    /// URLs of already uploaded evidence files
    #[serde(default)]
    pub evidence_urls: Vec<String>,
}

/// Validated complaint ready for the entity store
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplaintSubmission {
    pub title: String,
    pub category: ComplaintCategory,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_date: Option<NaiveDate>,
    pub evidence_urls: Vec<String>,
    pub status: ComplaintStatus,
    pub priority: Priority,
}

impl ComplaintDraft {
    /// Prefill a harassment complaint from an analysis that offered one.
    pub fn from_analysis(report: &AnalysisReport, message: &str) -> Option<Self> {
        if !report.offer_complaint {
            return None;
        }

        let mut description = String::new();
        if !report.result.explanation.is_empty() {
            description.push_str(&report.result.explanation);
            description.push_str("\n\n");
        }
        description.push_str("Reported message:\n");
        description.push_str(message.trim());
        if let Some(tags) = &report.category_tags {
            description.push_str("\n\nCategories detected: ");
            description.push_str(&tags.join(", "));
        }

        Some(Self {
            title: report.presentation.label.clone(),
            category: Some(ComplaintCategory::Harassment),
            description,
            ..Default::default()
        })
    }

    /// Check the required fields: title, category and description.
    pub fn validate(&self) -> Result<ComplaintCategory> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.category.is_none() {
            missing.push("category");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }

        match (missing.is_empty(), self.category) {
            (true, Some(category)) => Ok(category),
            _ => Err(Error::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            ))),
        }
    }

    /// Validate and stamp the draft with its initial status and priority.
    pub fn into_submission(self) -> Result<ComplaintSubmission> {
        let category = self.validate()?;
        Ok(ComplaintSubmission {
            title: self.title.trim().to_string(),
            category,
            description: self.description,
            platform: self.platform.filter(|p| !p.trim().is_empty()),
            incident_date: self.incident_date,
            evidence_urls: self.evidence_urls,
            status: ComplaintStatus::Pending,
            priority: category.priority(),
        })
    }
}
