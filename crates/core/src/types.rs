/// Row identifiers are assigned by the record store (BIGSERIAL).
pub type ResponseId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
