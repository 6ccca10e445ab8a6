//! Harassment classification contract
//!
//! Defines the response schema the remote classifier must honor, the fallible
//! boundary parser that turns its loosely-typed JSON into [`ClassificationResult`],
//! and the pure mapping from a result to UI-ready presentation metadata.
//!
//! Parsing is lenient where a usable answer can still be recovered: every
//! deviation from the schema is recorded as a [`SchemaAnomaly`] instead of being
//! silently trusted or discarded. Only a response that is not a JSON object at
//! all is rejected outright.

use cybersakhi_core::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// Severity reported by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Self::None,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Critical,
    ];

    /// Parse a wire value. Only the exact lowercase names are accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    fn capitalized(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Presentation attributes for this tier.
    pub fn presentation(&self) -> Presentation {
        let (color, background, border, icon) = match self {
            Self::None => (
                "text-emerald-600",
                "bg-emerald-50",
                "border-emerald-200",
                Icon::CheckCircle,
            ),
            Self::Low => ("text-blue-600", "bg-blue-50", "border-blue-200", Icon::Shield),
            Self::Medium => (
                "text-amber-600",
                "bg-amber-50",
                "border-amber-200",
                Icon::AlertTriangle,
            ),
            Self::High => (
                "text-orange-600",
                "bg-orange-50",
                "border-orange-200",
                Icon::AlertTriangle,
            ),
            Self::Critical => (
                "text-red-600",
                "bg-red-50",
                "border-red-200",
                Icon::FileWarning,
            ),
        };

        let label = match self {
            Self::None => "No threats detected".to_string(),
            other => format!("{} Risk Detected", other.capitalized()),
        };

        Presentation {
            tier: *self,
            label,
            color,
            background,
            border,
            icon,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label for a report whose severity cannot be shown as a known tier
pub const UNRATED_LABEL: &str = "Severity unavailable";

/// Icon shown next to a severity label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    CheckCircle,
    Shield,
    AlertTriangle,
    FileWarning,
}

/// Display metadata attached to a severity tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Presentation {
    pub tier: Severity,
    pub label: String,
    pub color: &'static str,
    pub background: &'static str,
    pub border: &'static str,
    pub icon: Icon,
}

/// A deviation from the response schema found while parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaAnomaly {
    /// A required field was absent or null
    MissingField { field: &'static str },
    /// A field was present with the wrong JSON type
    InvalidField { field: &'static str, found: String },
    /// `severity` was a string outside the known enumeration
    UnknownSeverity { value: String },
    /// `is_harmful` was true but no usable non-`none` severity came with it
    HarmfulWithoutSeverity,
}

impl SchemaAnomaly {
    /// Short label, used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::InvalidField { .. } => "invalid_field",
            Self::UnknownSeverity { .. } => "unknown_severity",
            Self::HarmfulWithoutSeverity => "harmful_without_severity",
        }
    }
}

impl fmt::Display for SchemaAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing field `{}`", field),
            Self::InvalidField { field, found } => {
                write!(f, "field `{}` has unexpected value {}", field, found)
            }
            Self::UnknownSeverity { value } => write!(f, "unknown severity {:?}", value),
            Self::HarmfulWithoutSeverity => {
                f.write_str("message flagged harmful without a risk severity")
            }
        }
    }
}

/// Validated classifier output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub is_harmful: bool,

    /// Known severity, `None` when the field was missing or unrecognized
    pub severity: Option<Severity>,

    /// Raw severity value kept for diagnosis when it could not be recognized
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_severity: Option<String>,

    /// Distinct category labels in the order the classifier reported them
    pub categories_detected: Vec<String>,

    pub explanation: String,

    pub recommended_actions: Vec<String>,

    /// Everything that did not match the schema
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<SchemaAnomaly>,
}

impl ClassificationResult {
    /// Build a well-formed result.
    pub fn new(is_harmful: bool, severity: Severity) -> Self {
        Self {
            is_harmful,
            severity: Some(severity),
            raw_severity: None,
            categories_detected: Vec::new(),
            explanation: String::new(),
            recommended_actions: Vec::new(),
            anomalies: Vec::new(),
        }
        .checked()
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories_detected = dedup(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    pub fn with_actions<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommended_actions = actions.into_iter().map(Into::into).collect();
        self
    }

    /// Parse a raw classifier response.
    ///
    /// Fails only when the response is not a JSON object. Missing or mistyped
    /// fields are defaulted and recorded in [`Self::anomalies`].
    pub fn from_response(value: &Value) -> Result<Self> {
        let obj = value.as_object().ok_or_else(|| {
            Error::schema(format!(
                "expected a JSON object, found {}",
                json_type_name(value)
            ))
        })?;

        let mut anomalies = Vec::new();

        let (severity, raw_severity) = match field(obj, "severity") {
            None => {
                anomalies.push(SchemaAnomaly::MissingField { field: "severity" });
                (None, None)
            }
            Some(Value::String(raw)) => match Severity::parse(raw) {
                Some(severity) => (Some(severity), None),
                None => {
                    anomalies.push(SchemaAnomaly::UnknownSeverity { value: raw.clone() });
                    (None, Some(raw.clone()))
                }
            },
            Some(other) => {
                anomalies.push(SchemaAnomaly::InvalidField {
                    field: "severity",
                    found: other.to_string(),
                });
                (None, Some(other.to_string()))
            }
        };

        let is_harmful = match field(obj, "is_harmful") {
            Some(Value::Bool(flag)) => *flag,
            missing_or_invalid => {
                anomalies.push(match missing_or_invalid {
                    None => SchemaAnomaly::MissingField { field: "is_harmful" },
                    Some(other) => SchemaAnomaly::InvalidField {
                        field: "is_harmful",
                        found: other.to_string(),
                    },
                });
                // Fall back to the severity the classifier did commit to.
                severity.map_or(false, |s| s != Severity::None)
            }
        };

        let categories_detected = dedup(string_list(obj, "categories_detected", &mut anomalies));
        let recommended_actions = string_list(obj, "recommended_actions", &mut anomalies);

        let explanation = match field(obj, "explanation") {
            Some(Value::String(text)) => text.clone(),
            None => {
                anomalies.push(SchemaAnomaly::MissingField {
                    field: "explanation",
                });
                String::new()
            }
            Some(other) => {
                anomalies.push(SchemaAnomaly::InvalidField {
                    field: "explanation",
                    found: other.to_string(),
                });
                String::new()
            }
        };

        Ok(Self {
            is_harmful,
            severity,
            raw_severity,
            categories_detected,
            explanation,
            recommended_actions,
            anomalies,
        }
        .checked())
    }

    /// Severity used for presentation: unknown or missing values fall back to `none`.
    pub fn effective_severity(&self) -> Severity {
        self.severity.unwrap_or(Severity::None)
    }

    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }

    fn checked(mut self) -> Self {
        if self.is_harmful
            && self.effective_severity() == Severity::None
            && !self.anomalies.contains(&SchemaAnomaly::HarmfulWithoutSeverity)
        {
            self.anomalies.push(SchemaAnomaly::HarmfulWithoutSeverity);
        }
        self
    }
}

/// UI-ready interpretation of a classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub result: ClassificationResult,

    pub presentation: Presentation,

    /// Category tags, omitted when the classifier reported none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_tags: Option<Vec<String>>,

    /// Ordered recommended actions, omitted when empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_actions: Option<Vec<String>>,

    /// Whether to offer creating a complaint from this analysis
    pub offer_complaint: bool,
}

/// Map a classification to its presentation. Pure and deterministic.
///
/// A missing or unknown severity keeps the `none` styling. Its label shows the
/// raw value, or [`UNRATED_LABEL`] when there is none to show.
pub fn interpret(result: ClassificationResult) -> AnalysisReport {
    let mut presentation = result.effective_severity().presentation();
    if let Some(label) = fallback_label(&result) {
        presentation.label = label;
    }
    let category_tags =
        (!result.categories_detected.is_empty()).then(|| result.categories_detected.clone());
    let recommended_actions =
        (!result.recommended_actions.is_empty()).then(|| result.recommended_actions.clone());

    AnalysisReport {
        offer_complaint: result.is_harmful,
        presentation,
        category_tags,
        recommended_actions,
        result,
    }
}

fn fallback_label(result: &ClassificationResult) -> Option<String> {
    match (result.severity, result.raw_severity.as_deref()) {
        (Some(Severity::None), _) if result.is_harmful => Some(UNRATED_LABEL.to_string()),
        (Some(_), _) => None,
        (None, Some(raw)) if !raw.trim().is_empty() => Some(format!("{} Risk Detected", raw)),
        (None, _) => Some(UNRATED_LABEL.to_string()),
    }
}

/// JSON schema sent alongside the analysis prompt as `response_json_schema`.
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "is_harmful": { "type": "boolean" },
            "severity": {
                "type": "string",
                "enum": ["none", "low", "medium", "high", "critical"]
            },
            "categories_detected": {
                "type": "array",
                "items": { "type": "string" }
            },
            "explanation": { "type": "string" },
            "recommended_actions": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": [
            "is_harmful",
            "severity",
            "categories_detected",
            "explanation",
            "recommended_actions"
        ]
    })
}

/// Field lookup that treats explicit `null` as absent.
fn field<'a>(obj: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    obj.get(name).filter(|v| !v.is_null())
}

fn string_list(
    obj: &Map<String, Value>,
    name: &'static str,
    anomalies: &mut Vec<SchemaAnomaly>,
) -> Vec<String> {
    match field(obj, name) {
        None => {
            anomalies.push(SchemaAnomaly::MissingField { field: name });
            Vec::new()
        }
        Some(Value::Array(items)) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(s) => out.push(s.clone()),
                    other => anomalies.push(SchemaAnomaly::InvalidField {
                        field: name,
                        found: other.to_string(),
                    }),
                }
            }
            out
        }
        Some(other) => {
            anomalies.push(SchemaAnomaly::InvalidField {
                field: name,
                found: other.to_string(),
            });
            Vec::new()
        }
    }
}

fn dedup(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn critical_response() -> Value {
        json!({
            "is_harmful": true,
            "severity": "critical",
            "categories_detected": ["Direct threats", "Blackmail"],
            "explanation": "The sender threatens to leak photos unless paid.",
            "recommended_actions": ["Do not respond", "Preserve evidence", "File a complaint"]
        })
    }

    #[test]
    fn test_well_formed_critical() {
        let result = ClassificationResult::from_response(&critical_response()).unwrap();
        assert!(!result.has_anomalies());
        assert_eq!(result.severity, Some(Severity::Critical));

        let report = interpret(result);
        assert_eq!(report.presentation.tier, Severity::Critical);
        assert_eq!(report.presentation.label, "Critical Risk Detected");
        assert_eq!(report.presentation.color, "text-red-600");
        assert_eq!(report.presentation.icon, Icon::FileWarning);
        assert!(report.offer_complaint);
        assert_eq!(
            report.category_tags.as_deref(),
            Some(&["Direct threats".to_string(), "Blackmail".to_string()][..])
        );
        assert_eq!(report.recommended_actions.unwrap().len(), 3);
    }

    #[test]
    fn test_critical_but_not_harmful_offers_no_complaint() {
        let mut response = critical_response();
        response["is_harmful"] = json!(false);
        let report = interpret(ClassificationResult::from_response(&response).unwrap());
        assert_eq!(report.presentation.tier, Severity::Critical);
        assert!(!report.offer_complaint);
    }

    #[test]
    fn test_unknown_severity_falls_back_to_none() {
        let response = json!({
            "is_harmful": false,
            "severity": "bogus",
            "categories_detected": [],
            "explanation": "",
            "recommended_actions": []
        });
        let result = ClassificationResult::from_response(&response).unwrap();
        assert_eq!(result.severity, None);
        assert_eq!(result.raw_severity.as_deref(), Some("bogus"));
        assert_eq!(
            result.anomalies,
            vec![SchemaAnomaly::UnknownSeverity {
                value: "bogus".to_string()
            }]
        );

        let report = interpret(result);
        let none = Severity::None.presentation();
        assert_eq!(report.presentation.tier, Severity::None);
        assert_eq!(report.presentation.color, none.color);
        assert_eq!(report.presentation.icon, Icon::CheckCircle);
        assert_eq!(report.presentation.label, "bogus Risk Detected");
        assert!(report.category_tags.is_none());
        assert!(report.recommended_actions.is_none());
    }

    #[test]
    fn test_missing_severity_is_distinct_from_invalid() {
        let response = json!({
            "is_harmful": false,
            "categories_detected": [],
            "explanation": "fine",
            "recommended_actions": []
        });
        let result = ClassificationResult::from_response(&response).unwrap();
        assert_eq!(
            result.anomalies,
            vec![SchemaAnomaly::MissingField { field: "severity" }]
        );
        assert!(result.raw_severity.is_none());
        assert_eq!(result.effective_severity(), Severity::None);
        assert_eq!(interpret(result).presentation.label, UNRATED_LABEL);
    }

    #[test]
    fn test_harmful_without_severity_is_flagged() {
        let response = json!({
            "is_harmful": true,
            "severity": "none",
            "categories_detected": ["Bullying"],
            "explanation": "demeaning",
            "recommended_actions": []
        });
        let result = ClassificationResult::from_response(&response).unwrap();
        assert_eq!(result.anomalies, vec![SchemaAnomaly::HarmfulWithoutSeverity]);

        let report = interpret(result);
        assert_eq!(report.presentation.tier, Severity::None);
        assert_eq!(report.presentation.label, UNRATED_LABEL);
        assert!(report.offer_complaint);
    }

    #[test]
    fn test_harmful_with_unknown_severity_is_not_reassuring() {
        let response = json!({
            "is_harmful": true,
            "severity": "bogus",
            "categories_detected": ["Stalking"],
            "explanation": "Tracks the recipient's location.",
            "recommended_actions": ["Block the sender"]
        });
        let result = ClassificationResult::from_response(&response).unwrap();
        assert!(result
            .anomalies
            .contains(&SchemaAnomaly::HarmfulWithoutSeverity));

        let report = interpret(result);
        assert!(report.offer_complaint);
        assert_eq!(report.presentation.tier, Severity::None);
        assert_eq!(report.presentation.label, "bogus Risk Detected");
        assert_ne!(report.presentation.label, Severity::None.presentation().label);
    }

    #[test]
    fn test_safe_result_keeps_reassuring_label() {
        let report = interpret(ClassificationResult::new(false, Severity::None));
        assert_eq!(report.presentation, Severity::None.presentation());
    }

    #[test]
    fn test_missing_is_harmful_uses_severity() {
        let response = json!({
            "severity": "high",
            "categories_detected": [],
            "explanation": "",
            "recommended_actions": []
        });
        let result = ClassificationResult::from_response(&response).unwrap();
        assert!(result.is_harmful);
        assert_eq!(
            result.anomalies,
            vec![SchemaAnomaly::MissingField {
                field: "is_harmful"
            }]
        );
    }

    #[test]
    fn test_mistyped_fields_are_recorded() {
        let response = json!({
            "is_harmful": "yes",
            "severity": 3,
            "categories_detected": "stalking",
            "explanation": null,
            "recommended_actions": ["Block the sender", 7]
        });
        let result = ClassificationResult::from_response(&response).unwrap();
        assert!(!result.is_harmful);
        assert_eq!(result.raw_severity.as_deref(), Some("3"));
        assert!(result.categories_detected.is_empty());
        assert_eq!(result.recommended_actions, vec!["Block the sender"]);

        let kinds: Vec<_> = result.anomalies.iter().map(|a| a.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                "invalid_field",
                "invalid_field",
                "invalid_field",
                "invalid_field",
                "missing_field"
            ]
        );
    }

    #[test]
    fn test_non_object_is_schema_error() {
        let err = ClassificationResult::from_response(&json!("looks fine to me")).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_severity_parse_is_exact() {
        assert_eq!(Severity::parse("high"), Some(Severity::High));
        assert_eq!(Severity::parse("High"), None);
        assert_eq!(Severity::parse(" high "), None);
        assert_eq!(Severity::parse("severe"), None);
    }

    #[test]
    fn test_non_canonical_severity_is_flagged() {
        let response = json!({
            "is_harmful": true,
            "severity": "High",
            "categories_detected": [],
            "explanation": "",
            "recommended_actions": []
        });
        let result = ClassificationResult::from_response(&response).unwrap();
        assert_eq!(result.severity, None);
        assert_eq!(result.raw_severity.as_deref(), Some("High"));
        assert_eq!(
            result.anomalies,
            vec![
                SchemaAnomaly::UnknownSeverity {
                    value: "High".to_string()
                },
                SchemaAnomaly::HarmfulWithoutSeverity
            ]
        );

        let report = interpret(result);
        assert_eq!(report.presentation.tier, Severity::None);
        assert_eq!(report.presentation.label, "High Risk Detected");
    }

    #[test]
    fn test_labels() {
        assert_eq!(Severity::None.presentation().label, "No threats detected");
        assert_eq!(Severity::Low.presentation().label, "Low Risk Detected");
        assert_eq!(Severity::Medium.presentation().icon, Icon::AlertTriangle);
        assert_eq!(Severity::High.presentation().color, "text-orange-600");
    }

    #[test]
    fn test_categories_are_deduplicated() {
        let result = ClassificationResult::new(true, Severity::Medium)
            .with_categories(["Stalking", "Stalking", "Bullying"]);
        assert_eq!(result.categories_detected, vec!["Stalking", "Bullying"]);
    }

    #[test]
    fn test_schema_lists_every_severity() {
        let schema = response_schema();
        let values = schema["properties"]["severity"]["enum"].as_array().unwrap();
        assert_eq!(values.len(), Severity::ALL.len());
    }
}
