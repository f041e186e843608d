/// Current UTC timestamp in milliseconds.
///
/// All persisted timestamps in the platform are i64 UTC millis.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
