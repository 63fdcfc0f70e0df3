use time::OffsetDateTime;

/// Produces task identifiers unique within the process lifetime at minimum.
pub trait IdGenerator {
    fn new_id(&self) -> String;
}

/// Nanosecond-timestamp ids.
pub struct NanoIdGenerator;

impl IdGenerator for NanoIdGenerator {
    fn new_id(&self) -> String {
        format!("task-{}", OffsetDateTime::now_utc().unix_timestamp_nanos())
    }
}
