use std::sync::atomic::{AtomicU64, Ordering};
use chrono::{Local, TimeZone, Utc};

static SWING_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// 生成唯一挥杆ID：时间加进程内序号
pub fn generate_swing_id() -> String {
    let sequence = SWING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("swing_{}_{:04}", Utc::now().format("%Y%m%d_%H%M%S%3f"), sequence)
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// 将毫秒时间戳格式化为本地 HH:MM:SS.mmm
pub fn format_timestamp(timestamp_ms: i64) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(time) => time.format("%H:%M:%S%.3f").to_string(),
        None => format!("Invalid timestamp: {}", timestamp_ms),
    }
}

pub fn format_speed(speed: f64) -> String {
    format!("{:.1} mph", speed)
}

pub fn format_time(seconds: f64) -> String {
    format!("{:.2}s", seconds)
}

pub fn format_angle(angle: f64) -> String {
    format!("{:.1}°", angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swing_ids_are_distinct() {
        let first = generate_swing_id();
        let second = generate_swing_id();
        assert!(first.starts_with("swing_"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(format_speed(112.345), "112.3 mph");
        assert_eq!(format_time(0.048), "0.05s");
        assert_eq!(format_angle(-3.21), "-3.2°");
    }

    #[test]
    fn test_timestamp_formatting() {
        let formatted = format_timestamp(1_700_000_000_123);
        assert!(formatted.ends_with(".123"));
        assert_eq!(formatted.len(), "HH:MM:SS.mmm".len());
    }
}
