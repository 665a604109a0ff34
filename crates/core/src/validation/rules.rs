//! Field rule types.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What a field's present values must satisfy.
///
/// Serialized with a `kind` tag, e.g.
/// `{"kind": "range", "min": 0, "max": null}` or
/// `{"kind": "categorical", "values": [0, 1]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleKind {
    /// Inclusive bounds; `None` means unbounded on that side.
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    /// Finite set of acceptable discrete values.
    Categorical { values: Vec<f64> },
}

/// A single column's acceptance contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    #[serde(flatten)]
    pub kind: RuleKind,
    /// When false, any missing value in the column is a violation.
    #[serde(default)]
    pub nullable: bool,
    /// When true, present values must be whole numbers.
    #[serde(default)]
    pub integer: bool,
}

/// Finite and without a fractional part.
pub(crate) fn is_whole(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

impl FieldRule {
    /// Non-nullable inclusive range rule.
    pub fn range(min: f64, max: f64) -> Self {
        Self {
            kind: RuleKind::Range {
                min: Some(min),
                max: Some(max),
            },
            nullable: false,
            integer: false,
        }
    }

    /// Non-nullable range rule with no upper bound.
    pub fn at_least(min: f64) -> Self {
        Self {
            kind: RuleKind::Range {
                min: Some(min),
                max: None,
            },
            nullable: false,
            integer: false,
        }
    }

    /// Non-nullable categorical rule.
    pub fn categorical(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            kind: RuleKind::Categorical {
                values: values.into_iter().collect(),
            },
            nullable: false,
            integer: false,
        }
    }

    /// Mark the rule as accepting missing values.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Require present values to be whole numbers.
    pub fn integer(mut self) -> Self {
        self.integer = true;
        self
    }

    /// Effective inclusive bounds of a range rule, with unbounded sides as
    /// infinities. `None` for categorical rules.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match &self.kind {
            RuleKind::Range { min, max } => Some((
                min.unwrap_or(f64::NEG_INFINITY),
                max.unwrap_or(f64::INFINITY),
            )),
            RuleKind::Categorical { .. } => None,
        }
    }

    /// Whether a present value satisfies the rule.
    pub fn admits(&self, value: f64) -> bool {
        if self.integer && !is_whole(value) {
            return false;
        }
        match &self.kind {
            RuleKind::Range { min, max } => {
                min.map_or(true, |min| value >= min)
                    && max.map_or(true, |max| value <= max)
                    && !value.is_nan()
            }
            RuleKind::Categorical { values } => values.contains(&value),
        }
    }

    /// Reject rule definitions that could never be satisfied or compared.
    pub fn check_definition(&self, field: &str) -> Result<(), CoreError> {
        let invalid = |reason: &str| CoreError::InvalidRule {
            field: field.to_string(),
            reason: reason.to_string(),
        };
        match &self.kind {
            RuleKind::Range { min, max } => {
                if min.is_some_and(f64::is_nan) || max.is_some_and(f64::is_nan) {
                    return Err(invalid("range bounds must be numbers"));
                }
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(invalid(&format!("min {min} is greater than max {max}")));
                    }
                }
            }
            RuleKind::Categorical { values } => {
                if values.is_empty() {
                    return Err(invalid("categorical rule needs at least one value"));
                }
                if values.iter().any(|v| !v.is_finite()) {
                    return Err(invalid("categorical values must be finite"));
                }
                if self.integer && !values.iter().copied().all(is_whole) {
                    return Err(invalid("integer rule lists a fractional category"));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn range_is_inclusive() {
        let rule = FieldRule::range(1.0, 12.0);
        assert!(rule.admits(1.0));
        assert!(rule.admits(12.0));
        assert!(!rule.admits(0.999));
        assert!(!rule.admits(12.001));
    }

    #[test]
    fn open_range_has_no_upper_bound() {
        let rule = FieldRule::at_least(0.0);
        assert!(rule.admits(1e12));
        assert!(!rule.admits(-0.5));
        assert_eq!(rule.bounds(), Some((0.0, f64::INFINITY)));
    }

    #[test]
    fn nan_never_satisfies_a_range() {
        assert!(!FieldRule::at_least(0.0).admits(f64::NAN));
    }

    #[test]
    fn categorical_membership() {
        let rule = FieldRule::categorical([1201.0, 1202.0, 1204.0]);
        assert!(rule.admits(1202.0));
        assert!(!rule.admits(1203.0));
        assert_eq!(rule.bounds(), None);
    }

    #[test]
    fn deserializes_tagged_rules() {
        let range: FieldRule =
            serde_json::from_value(json!({"kind": "range", "min": 0, "nullable": true})).unwrap();
        assert_eq!(range, FieldRule::at_least(0.0).nullable());

        let cat: FieldRule =
            serde_json::from_value(json!({"kind": "categorical", "values": [0, 1]})).unwrap();
        assert_eq!(cat, FieldRule::categorical([0.0, 1.0]));
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(FieldRule::range(12.0, 1.0).check_definition("MONTH_BEGIN").is_err());
        assert!(FieldRule::range(1.0, 1.0).check_definition("MONTH_BEGIN").is_ok());
    }

    #[test]
    fn integer_rule_rejects_fractions() {
        let rule = FieldRule::range(1.0, 12.0).integer();
        assert!(rule.admits(3.0));
        assert!(!rule.admits(3.5));
        assert!(!rule.admits(f64::INFINITY));
        assert!(FieldRule::range(1.0, 12.0).admits(3.5));
    }

    #[test]
    fn integer_flag_defaults_off_and_parses() {
        let rule: FieldRule =
            serde_json::from_value(json!({"kind": "range", "min": 1, "max": 12, "integer": true}))
                .unwrap();
        assert_eq!(rule, FieldRule::range(1.0, 12.0).integer());

        let rule: FieldRule = serde_json::from_value(json!({"kind": "range"})).unwrap();
        assert!(!rule.integer);
    }

    #[test]
    fn integer_categories_must_be_whole() {
        let rule = FieldRule::categorical([0.0, 0.5]).integer();
        assert!(rule.check_definition("SEX").is_err());
    }

    #[test]
    fn rejects_empty_category_set() {
        let rule = FieldRule::categorical(Vec::new());
        assert!(rule.check_definition("SEX").is_err());
    }
}
