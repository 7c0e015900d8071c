//! Directional association rules derived from frequent pairs.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

/// Whether a rule's confidence meets the minimum confidence threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleStatus {
    Strong,
    Weak,
}

impl fmt::Display for RuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strong => write!(f, "strong"),
            Self::Weak => write!(f, "weak"),
        }
    }
}

/// A one-item → one-item association rule.
///
/// `support` and `confidence` are percentages rounded to one decimal place;
/// `lift` is a ratio rounded to two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssociationRule {
    pub antecedent: String,
    pub consequent: String,
    pub support: Decimal,
    pub confidence: Decimal,
    pub lift: Decimal,
    pub status: RuleStatus,
}

impl AssociationRule {
    /// Whether the rule met the confidence threshold.
    #[must_use]
    pub fn is_strong(&self) -> bool {
        self.status == RuleStatus::Strong
    }

    /// Human-readable recommendation text.
    #[must_use]
    pub fn description(&self) -> String {
        format!(
            "If {} is bought, then {} is also bought",
            self.antecedent, self.consequent
        )
    }
}

impl fmt::Display for AssociationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.antecedent, self.consequent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn display_and_description() {
        let rule = AssociationRule {
            antecedent: "Bread".into(),
            consequent: "Butter".into(),
            support: dec!(50.0),
            confidence: dec!(100.0),
            lift: dec!(1.33),
            status: RuleStatus::Strong,
        };
        assert_eq!(rule.to_string(), "Bread → Butter");
        assert_eq!(
            rule.description(),
            "If Bread is bought, then Butter is also bought"
        );
        assert!(rule.is_strong());
    }
}
