use chrono::Utc;

pub fn now_epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}
