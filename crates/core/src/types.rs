/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A single cell of tabular data. `None` is the missing marker.
pub type Scalar = Option<f64>;

/// One input record as it arrives from a caller: field name to JSON value.
pub type Record = serde_json::Map<String, serde_json::Value>;
