//! Tabular batch: rows of named scalar cells, stored column-wise.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::ValidationError;
use crate::types::{Record, Scalar};

/// One or more rows of feature values presented together.
///
/// The schema is the ordered union of field names seen across all rows. A
/// field that some row does not carry is a missing value (`None`) in that row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularBatch {
    columns: IndexMap<String, Vec<Scalar>>,
    len: usize,
}

impl TabularBatch {
    /// Create an empty batch with no columns and no rows.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a batch from caller-supplied JSON records.
    ///
    /// `null` becomes a missing value; any other non-numeric value is
    /// rejected with [`ValidationError::NonNumeric`].
    pub fn from_records(records: &[Record]) -> Result<Self, ValidationError> {
        let mut batch = Self::new();
        for (row, record) in records.iter().enumerate() {
            let mut cells = Vec::with_capacity(record.len());
            for (field, value) in record {
                let scalar = match value {
                    Value::Null => None,
                    Value::Number(n) => n.as_f64(),
                    _ => {
                        return Err(ValidationError::NonNumeric {
                            field: field.clone(),
                            row,
                        })
                    }
                };
                cells.push((field.clone(), scalar));
            }
            batch.push_row(cells);
        }
        Ok(batch)
    }

    /// Append a row. Columns first seen here are back-filled with missing
    /// values for earlier rows; columns this row lacks get a missing value.
    pub fn push_row<K, I>(&mut self, row: I)
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Scalar)>,
    {
        let idx = self.len;
        for (field, value) in row {
            let column = self
                .columns
                .entry(field.into())
                .or_insert_with(|| vec![None; idx]);
            if column.len() == idx {
                column.push(value);
            } else {
                column[idx] = value;
            }
        }
        self.len += 1;
        for column in self.columns.values_mut() {
            if column.len() < self.len {
                column.push(None);
            }
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Field names in schema order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.columns.contains_key(field)
    }

    /// All values of one field, one per row, or `None` if the field is not
    /// part of the schema.
    pub fn column(&self, field: &str) -> Option<&[Scalar]> {
        self.columns.get(field).map(Vec::as_slice)
    }

    /// Value of `field` in row `row`. Missing cells and unknown fields both
    /// yield `None`.
    pub fn get(&self, row: usize, field: &str) -> Scalar {
        self.columns.get(field).and_then(|c| c.get(row).copied().flatten())
    }

    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut Scalar> {
        self.columns.values_mut().flat_map(|c| c.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn from_records_keeps_field_order_and_row_count() {
        let records = vec![
            record(json!({"SEX": 0, "PREMIUM": 50.5})),
            record(json!({"SEX": 1, "PREMIUM": null})),
        ];
        let batch = TabularBatch::from_records(&records).unwrap();

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.field_names().collect::<Vec<_>>(), ["SEX", "PREMIUM"]);
        assert_eq!(batch.column("SEX").unwrap(), &[Some(0.0), Some(1.0)]);
        assert_eq!(batch.column("PREMIUM").unwrap(), &[Some(50.5), None]);
    }

    #[test]
    fn field_absent_from_one_row_is_missing_there() {
        let records = vec![
            record(json!({"SEX": 0})),
            record(json!({"SEX": 1, "PREMIUM": 10})),
        ];
        let batch = TabularBatch::from_records(&records).unwrap();

        assert_eq!(batch.column("PREMIUM").unwrap(), &[None, Some(10.0)]);
        assert_eq!(batch.get(0, "PREMIUM"), None);
        assert_eq!(batch.get(1, "PREMIUM"), Some(10.0));
    }

    #[test]
    fn unknown_field_has_no_column() {
        let batch = TabularBatch::from_records(&[record(json!({"SEX": 0}))]).unwrap();
        assert!(batch.column("PREMIUM").is_none());
        assert!(!batch.has_field("PREMIUM"));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let records = vec![record(json!({"SEX": 0})), record(json!({"SEX": "Male"}))];
        let err = TabularBatch::from_records(&records).unwrap_err();
        assert_matches!(err, ValidationError::NonNumeric { ref field, row: 1 } if field == "SEX");
    }

    #[test]
    fn duplicate_field_in_row_keeps_last_value() {
        let mut batch = TabularBatch::new();
        batch.push_row([("SEX", Some(0.0)), ("SEX", Some(1.0))]);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.column("SEX").unwrap(), &[Some(1.0)]);
    }
}
