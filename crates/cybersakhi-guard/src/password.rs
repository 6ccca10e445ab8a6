//! Password strength policy
//!
//! Evaluates a candidate password against a fixed, ordered checklist and buckets
//! the number of satisfied rules into a coarse strength tier. Evaluation is a
//! pure function: no state, no I/O, no error states.
//!
//! Character classes are ASCII only. Letters from other scripts count as
//! neither upper, lower, number nor special.

use serde::Serialize;

/// Substrings that mark a password as common, matched against its lowercase form.
const COMMON_FRAGMENTS: [&str; 4] = ["password", "123456", "qwerty", "admin"];

const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

const MIN_LENGTH: usize = 12;

/// Identifier of a single password rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleId {
    Length,
    Uppercase,
    Lowercase,
    Number,
    Special,
    NoCommon,
}

impl RuleId {
    /// All rules in evaluation order.
    pub const ALL: [RuleId; 6] = [
        Self::Length,
        Self::Uppercase,
        Self::Lowercase,
        Self::Number,
        Self::Special,
        Self::NoCommon,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Length => "At least 12 characters",
            Self::Uppercase => "Contains uppercase letter",
            Self::Lowercase => "Contains lowercase letter",
            Self::Number => "Contains number",
            Self::Special => "Contains special character",
            Self::NoCommon => "Not a common password",
        }
    }

    fn check(&self, password: &str) -> bool {
        match self {
            Self::Length => password.chars().count() >= MIN_LENGTH,
            Self::Uppercase => password.chars().any(|c| c.is_ascii_uppercase()),
            Self::Lowercase => password.chars().any(|c| c.is_ascii_lowercase()),
            Self::Number => password.chars().any(|c| c.is_ascii_digit()),
            Self::Special => password.chars().any(|c| SPECIAL_CHARS.contains(c)),
            Self::NoCommon => {
                let lower = password.to_lowercase();
                !COMMON_FRAGMENTS
                    .iter()
                    .any(|fragment| lower.contains(fragment))
            }
        }
    }
}

/// Outcome of a single rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRuleResult {
    pub rule_id: RuleId,
    pub label: &'static str,
    pub passed: bool,
}

/// Coarse strength bucket derived from the number of passed rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StrengthTier {
    NoInput,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl StrengthTier {
    pub fn from_passed_count(passed: usize) -> Self {
        match passed {
            0 => Self::NoInput,
            1..=2 => Self::Weak,
            3..=4 => Self::Medium,
            5 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NoInput => "Enter Password",
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }

    /// Text color token for the tier label.
    pub fn color(&self) -> &'static str {
        match self {
            Self::NoInput => "text-slate-400",
            Self::Weak => "text-red-500",
            Self::Medium => "text-amber-500",
            Self::Strong => "text-emerald-500",
            Self::VeryStrong => "text-emerald-600",
        }
    }
}

/// Full result of evaluating one password
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordEvaluation {
    pub results: Vec<PasswordRuleResult>,
    pub passed_count: usize,
    pub strength_percent: f64,
    pub tier: StrengthTier,
    pub tier_label: &'static str,
    pub meets_all_rules: bool,
}

impl PasswordEvaluation {
    /// Look up the result for one rule.
    pub fn rule(&self, id: RuleId) -> Option<&PasswordRuleResult> {
        self.results.iter().find(|r| r.rule_id == id)
    }

    pub fn passed(&self, id: RuleId) -> bool {
        self.rule(id).map_or(false, |r| r.passed)
    }
}

/// Evaluate a password against the fixed rule set.
///
/// An empty password reports every rule as failed so the tier is
/// [`StrengthTier::NoInput`] rather than a vacuous pass on `noCommon`.
pub fn evaluate_password(password: &str) -> PasswordEvaluation {
    let results: Vec<PasswordRuleResult> = RuleId::ALL
        .iter()
        .map(|rule| PasswordRuleResult {
            rule_id: *rule,
            label: rule.label(),
            passed: !password.is_empty() && rule.check(password),
        })
        .collect();

    let passed_count = results.iter().filter(|r| r.passed).count();
    let total = RuleId::ALL.len();
    let tier = StrengthTier::from_passed_count(passed_count);

    PasswordEvaluation {
        results,
        passed_count,
        strength_percent: passed_count as f64 / total as f64 * 100.0,
        tier,
        tier_label: tier.label(),
        meets_all_rules: passed_count == total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_password_is_no_input() {
        let eval = evaluate_password("");
        assert_eq!(eval.passed_count, 0);
        assert_eq!(eval.tier, StrengthTier::NoInput);
        assert_eq!(eval.strength_percent, 0.0);
        assert!(eval.results.iter().all(|r| !r.passed));
    }

    #[test]
    fn test_results_follow_declaration_order() {
        let eval = evaluate_password("abc");
        let ids: Vec<_> = eval.results.iter().map(|r| r.rule_id).collect();
        assert_eq!(ids, RuleId::ALL.to_vec());
        assert_eq!(eval.results[0].label, "At least 12 characters");
    }

    #[test]
    fn test_common_fragment_is_case_insensitive() {
        let eval = evaluate_password("Password123!");
        assert!(!eval.passed(RuleId::NoCommon));
        assert!(eval.passed(RuleId::Length));
        assert!(eval.passed(RuleId::Uppercase));
        assert!(eval.passed(RuleId::Lowercase));
        assert!(eval.passed(RuleId::Number));
        assert!(eval.passed(RuleId::Special));
        assert_eq!(eval.passed_count, 5);
        assert_eq!(eval.tier, StrengthTier::Strong);
        assert!(!eval.meets_all_rules);
    }

    #[test]
    fn test_very_strong() {
        let eval = evaluate_password("Correct-Horse7!Battery");
        assert_eq!(eval.passed_count, 6);
        assert_eq!(eval.tier, StrengthTier::VeryStrong);
        assert_eq!(eval.strength_percent, 100.0);
        assert!(eval.meets_all_rules);
    }

    #[test]
    fn test_hyphen_is_not_special() {
        let eval = evaluate_password("a-b_c=d+e~f");
        assert!(!eval.passed(RuleId::Special));
    }

    #[test]
    fn test_non_ascii_letters_do_not_count() {
        // Twelve Tamil letters: long enough, but no ASCII classes.
        let eval = evaluate_password("அஆஇஈஉஊஎஏஐஒஓஔ");
        assert!(eval.passed(RuleId::Length));
        assert!(!eval.passed(RuleId::Uppercase));
        assert!(!eval.passed(RuleId::Lowercase));
        assert!(!eval.passed(RuleId::Number));
        assert!(!eval.passed(RuleId::Special));
        assert!(eval.passed(RuleId::NoCommon));
        assert_eq!(eval.tier, StrengthTier::Weak);

        let eval = evaluate_password("ÄÖÜ");
        assert!(!eval.passed(RuleId::Uppercase));
    }

    #[test]
    fn test_tier_table() {
        assert_eq!(StrengthTier::from_passed_count(0), StrengthTier::NoInput);
        assert_eq!(StrengthTier::from_passed_count(1), StrengthTier::Weak);
        assert_eq!(StrengthTier::from_passed_count(2), StrengthTier::Weak);
        assert_eq!(StrengthTier::from_passed_count(3), StrengthTier::Medium);
        assert_eq!(StrengthTier::from_passed_count(4), StrengthTier::Medium);
        assert_eq!(StrengthTier::from_passed_count(5), StrengthTier::Strong);
        assert_eq!(StrengthTier::from_passed_count(6), StrengthTier::VeryStrong);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(evaluate_password("qwerty")).unwrap();
        assert_eq!(json["tier"], "weak");
        assert_eq!(json["results"][5]["ruleId"], "noCommon");
        assert_eq!(json["results"][5]["passed"], false);
        assert_eq!(json["passedCount"], 1);
    }
}
