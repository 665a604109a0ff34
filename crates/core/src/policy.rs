//! Motor-insurance policy feature set and its built-in data-quality rules.

use crate::error::CoreError;
use crate::validation::{FieldRule, RuleRegistry};

pub const CUSTOMER_SENIORITY: &str = "CUSTOMER_SENIORITY";
pub const SEX: &str = "SEX";
pub const INSR_TYPE: &str = "INSR_TYPE";
pub const INSURED_VALUE: &str = "INSURED_VALUE";
pub const PREMIUM: &str = "PREMIUM";
pub const PROD_YEAR: &str = "PROD_YEAR";
pub const SEATS_NUM: &str = "SEATS_NUM";
pub const CARRYING_CAPACITY: &str = "CARRYING_CAPACITY";
pub const CCM_TON: &str = "CCM_TON";
pub const MONTH_BEGIN: &str = "MONTH_BEGIN";
pub const MONTH_END: &str = "MONTH_END";
pub const YEAR_BEGIN: &str = "YEAR_BEGIN";
pub const YEAR_END: &str = "YEAR_END";

/// Model-ready columns, in the order the model was trained on.
pub const FEATURES: [&str; 13] = [
    CUSTOMER_SENIORITY,
    SEX,
    INSR_TYPE,
    INSURED_VALUE,
    PREMIUM,
    PROD_YEAR,
    SEATS_NUM,
    CARRYING_CAPACITY,
    CCM_TON,
    MONTH_BEGIN,
    MONTH_END,
    YEAR_BEGIN,
    YEAR_END,
];

/// First year covered by the training data.
pub const FIRST_POLICY_YEAR: f64 = 2014.0;

/// Oldest accepted vehicle production year.
pub const FIRST_PROD_YEAR: f64 = 1950.0;

/// Built-in rules for [`FEATURES`].
///
/// `current_year` caps YEAR_BEGIN and YEAR_END. It is captured once, when the
/// registry is built, and does not advance afterwards.
pub fn default_registry(current_year: i32) -> Result<RuleRegistry, CoreError> {
    let year = f64::from(current_year);
    RuleRegistry::from_rules([
        (CUSTOMER_SENIORITY, FieldRule::at_least(0.0).integer()),
        (SEX, FieldRule::categorical([0.0, 1.0]).integer()),
        (INSR_TYPE, FieldRule::categorical([1201.0, 1202.0, 1204.0]).integer()),
        (INSURED_VALUE, FieldRule::at_least(0.0)),
        (PREMIUM, FieldRule::at_least(0.0).nullable()),
        (PROD_YEAR, FieldRule::at_least(FIRST_PROD_YEAR)),
        (SEATS_NUM, FieldRule::at_least(0.0).nullable()),
        (CARRYING_CAPACITY, FieldRule::at_least(0.0).nullable()),
        (CCM_TON, FieldRule::at_least(0.0)),
        (MONTH_BEGIN, FieldRule::range(1.0, 12.0).integer()),
        (MONTH_END, FieldRule::range(1.0, 12.0).integer()),
        (YEAR_BEGIN, FieldRule::range(FIRST_POLICY_YEAR, year).integer()),
        (YEAR_END, FieldRule::range(FIRST_POLICY_YEAR, year).integer()),
    ])
}
