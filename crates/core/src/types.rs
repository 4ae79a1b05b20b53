/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All row timestamps are UTC (`timestamptz` columns).
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar dates (campaign ranges, scheduled posts) carry no time-of-day
/// and no zone; they are `date` columns.
pub type Date = chrono::NaiveDate;
