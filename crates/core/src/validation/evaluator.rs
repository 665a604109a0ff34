//! Rule evaluator: pure logic, stops at the first violating field.

use super::registry::RuleRegistry;
use super::rules::{is_whole, FieldRule, RuleKind};
use crate::batch::TabularBatch;
use crate::error::ValidationError;
use crate::types::Scalar;

/// Check every registered field of `batch`, in registry order.
pub fn evaluate_batch(registry: &RuleRegistry, batch: &TabularBatch) -> Result<(), ValidationError> {
    for (field, rule) in registry.iter() {
        let column = batch
            .column(field)
            .ok_or_else(|| ValidationError::MissingField {
                field: field.to_string(),
            })?;
        check_column(field, rule, column)?;
    }
    Ok(())
}

/// Check one column against its rule.
///
/// The nullability check covers the whole column before any value check, so
/// a column with both a forbidden null and a bad value reports the null.
pub fn check_column(field: &str, rule: &FieldRule, column: &[Scalar]) -> Result<(), ValidationError> {
    if !rule.nullable {
        if let Some(row) = column.iter().position(Option::is_none) {
            return Err(ValidationError::NullNotAllowed {
                field: field.to_string(),
                row,
            });
        }
    }

    let first_bad = column
        .iter()
        .enumerate()
        .find_map(|(row, cell)| cell.filter(|v| !rule.admits(*v)).map(|v| (row, v)));

    match (first_bad, &rule.kind) {
        (None, _) => Ok(()),
        (Some((row, value)), _) if rule.integer && !is_whole(value) => {
            Err(ValidationError::NotInteger {
                field: field.to_string(),
                row,
                value,
            })
        }
        (Some((row, value)), RuleKind::Range { .. }) => {
            let (min, max) = rule.bounds().unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
            Err(ValidationError::OutOfRange {
                field: field.to_string(),
                row,
                value,
                min,
                max,
            })
        }
        (Some((row, value)), RuleKind::Categorical { .. }) => Err(ValidationError::UnknownCategory {
            field: field.to_string(),
            row,
            value,
        }),
    }
}
