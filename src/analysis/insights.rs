//! 根据挥杆结果生成仪表盘中的文字和评级

use crate::types::SwingRecord;
use crate::utils::{format_angle, format_speed, format_time};

/// 职业水平参考值，按雷达图顺序
pub const PRO_TARGET: [f64; 5] = [90.0, 90.0, 85.0, 80.0, 85.0];
pub const RADAR_LABELS: [&str; 5] = ["Timing", "Balance", "Consistency", "Power", "Tempo"];

/// 加权评分中获得满分的杆头速度
const REFERENCE_CLUB_SPEED_MPH: f64 = 110.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            ScoreBand::Excellent
        } else if score >= 60.0 {
            ScoreBand::Good
        } else if score >= 40.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Poor => "poor",
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            ScoreBand::Excellent => [34, 197, 94],
            ScoreBand::Good => [52, 211, 153],
            ScoreBand::Fair => [251, 191, 36],
            ScoreBand::Poor => [239, 68, 68],
        }
    }
}

pub fn performance_level(score: f64) -> &'static str {
    if score >= 90.0 {
        "Excellent"
    } else if score >= 80.0 {
        "Very Good"
    } else if score >= 70.0 {
        "Good"
    } else if score >= 60.0 {
        "Fair"
    } else {
        "Needs Improvement"
    }
}

/// 加权得分（0-100）：60% 各项平均，20% 杆头速度，20% 挥杆平面一致性
pub fn weighted_swing_score(record: &SwingRecord) -> f64 {
    let component_mean = record.metrics.components().iter().sum::<f64>() / 5.0;
    let speed_score = (record.club_head_speed / REFERENCE_CLUB_SPEED_MPH * 100.0).min(100.0);
    let plane_score = record.swing_plane.consistency * 100.0;

    let score = component_mean * 0.6 + speed_score * 0.2 + plane_score * 0.2;
    score.min(100.0).round()
}

/// 根据阈值比较生成的一段总结
pub fn swing_commentary(record: &SwingRecord) -> String {
    let metrics = &record.metrics;
    let mut analysis = String::new();

    if metrics.overall_score >= 80.0 {
        analysis.push_str("Excellent swing! ");
    } else if metrics.overall_score >= 60.0 {
        analysis.push_str("Good swing with room for improvement. ");
    } else {
        analysis.push_str("Several areas to work on. ");
    }

    if record.club_head_speed < 90.0 {
        analysis.push_str("Focus on increasing club head speed through better rotation. ");
    } else if record.club_head_speed > 120.0 {
        analysis.push_str("Great club head speed! ");
    }

    if record.swing_tempo < 1.0 {
        analysis.push_str("Your swing is quite fast - try slowing down for better control. ");
    } else if record.swing_tempo > 2.0 {
        analysis.push_str("Your swing tempo is quite slow - try to be more aggressive. ");
    } else {
        analysis.push_str("Good swing tempo. ");
    }

    if metrics.balance < 60.0 {
        analysis.push_str("Work on maintaining better balance throughout your swing. ");
    }

    if metrics.timing < 60.0 {
        analysis.push_str("Focus on the timing of your swing sequence. ");
    }

    analysis.trim_end().to_string()
}

pub fn plane_insight(record: &SwingRecord) -> String {
    let plane = &record.swing_plane;
    let mut text = format!(
        "Your swing plane is at {} with {:.0}% consistency.",
        format_angle(plane.angle),
        plane.consistency * 100.0
    );
    if plane.angle < 55.0 {
        text.push_str(" Try to steepen your swing plane.");
    } else if plane.angle > 65.0 {
        text.push_str(" Try to flatten your swing plane.");
    }
    text
}

pub fn tempo_insight(record: &SwingRecord) -> String {
    let verdict = match record.tempo_ratio() {
        Some(ratio) if ratio > 3.0 => " Good tempo ratio!",
        _ => " Work on slowing down your backswing relative to downswing.",
    };
    format!(
        "Backswing: {}, Downswing: {}.{}",
        format_time(record.backswing_time),
        format_time(record.downswing_time),
        verdict
    )
}

pub fn power_insight(record: &SwingRecord) -> String {
    let verdict = if record.club_head_speed < 90.0 {
        " Focus on hip rotation and weight transfer for more power."
    } else if record.club_head_speed > 110.0 {
        " Excellent power! Focus on consistency."
    } else {
        " Good power generation."
    };
    format!("Club head speed: {}.{}", format_speed(record.club_head_speed), verdict)
}

pub fn impact_insight(record: &SwingRecord) -> String {
    let verdict = if record.impact_angle.abs() < 2.0 {
        " Excellent impact position!"
    } else if record.impact_angle > 2.0 {
        " Try to strike down on the ball more."
    } else {
        " Avoid hitting up on the ball too much."
    };
    format!("Impact angle: {}.{}", format_angle(record.impact_angle), verdict)
}

pub fn recommendations(record: &SwingRecord) -> Vec<&'static str> {
    let metrics = &record.metrics;
    let mut items = Vec::new();

    if metrics.balance < 70.0 {
        items.push("Work on balance drills - practice swinging with your feet together");
    }
    if metrics.timing < 70.0 {
        items.push("Practice tempo drills - use a metronome for consistent timing");
    }
    if record.club_head_speed < 90.0 {
        items.push("Focus on hip rotation and weight transfer exercises");
    }
    if record.swing_plane.consistency < 0.8 {
        items.push("Practice with alignment sticks to improve swing plane consistency");
    }
    if metrics.power < 70.0 {
        items.push("Work on core strengthening and flexibility exercises");
    }
    if metrics.consistency < 70.0 {
        items.push("Focus on repeating the same swing sequence - practice slow swings");
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{SwingMetrics, SwingPlane};

    fn record(metrics: SwingMetrics, club_head_speed: f64, swing_tempo: f64) -> SwingRecord {
        SwingRecord {
            id: "swing_test".to_string(),
            created_at: 0,
            ball_speed: 0.0,
            club_head_speed,
            swing_tempo,
            backswing_time: swing_tempo * 0.6,
            downswing_time: swing_tempo * 0.4,
            impact_angle: 0.5,
            swing_path: Vec::new(),
            pose_keypoints: Vec::new(),
            swing_plane: SwingPlane { angle: 60.0, consistency: 0.9, deviation: 3.0 },
            metrics,
        }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(100.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80.0), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79.9), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(60.0), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(40.0), ScoreBand::Fair);
        assert_eq!(ScoreBand::from_score(39.9), ScoreBand::Poor);
        assert_eq!(ScoreBand::from_score(0.0).label(), "poor");
    }

    #[test]
    fn test_performance_levels() {
        assert_eq!(performance_level(95.0), "Excellent");
        assert_eq!(performance_level(85.0), "Very Good");
        assert_eq!(performance_level(72.0), "Good");
        assert_eq!(performance_level(60.0), "Fair");
        assert_eq!(performance_level(10.0), "Needs Improvement");
    }

    #[test]
    fn test_commentary_for_strong_fast_swing() {
        let metrics = SwingMetrics::from_components(90.0, 90.0, 90.0, 90.0, 90.0);
        let text = swing_commentary(&record(metrics, 125.0, 0.048));

        assert!(text.starts_with("Excellent swing!"));
        assert!(text.contains("Great club head speed!"));
        assert!(text.contains("quite fast"));
        assert!(!text.contains("balance"));
    }

    #[test]
    fn test_commentary_for_weak_swing() {
        let metrics = SwingMetrics::from_components(50.0, 50.0, 50.0, 50.0, 50.0);
        let text = swing_commentary(&record(metrics, 85.0, 1.5));

        assert!(text.starts_with("Several areas to work on."));
        assert!(text.contains("increasing club head speed"));
        assert!(text.contains("Good swing tempo."));
        assert!(text.contains("better balance"));
        assert!(text.contains("timing of your swing sequence"));
    }

    #[test]
    fn test_weighted_score() {
        let metrics = SwingMetrics::from_components(80.0, 80.0, 80.0, 80.0, 80.0);
        // 80*0.6 + 100*0.2 + 90*0.2 = 86
        assert_eq!(weighted_swing_score(&record(metrics, 130.0, 1.0)), 86.0);
    }

    #[test]
    fn test_recommendations_follow_thresholds() {
        let strong = SwingMetrics::from_components(90.0, 90.0, 90.0, 90.0, 90.0);
        assert!(recommendations(&record(strong, 100.0, 1.2)).is_empty());

        let weak = SwingMetrics::from_components(60.0, 60.0, 60.0, 60.0, 60.0);
        assert_eq!(recommendations(&record(weak, 85.0, 1.2)).len(), 5);
    }

    #[test]
    fn test_tempo_ratio_insight() {
        let metrics = SwingMetrics::from_components(80.0, 80.0, 80.0, 80.0, 80.0);
        let mut swing = record(metrics, 100.0, 1.0);
        // 固定 60/40 比例不会超过 3:1
        assert!(tempo_insight(&swing).contains("Work on slowing down"));

        swing.backswing_time = 0.9;
        swing.downswing_time = 0.25;
        assert!(tempo_insight(&swing).contains("Good tempo ratio!"));

        swing.downswing_time = 0.0;
        assert!(tempo_insight(&swing).contains("Work on slowing down"));
    }

    #[test]
    fn test_plane_power_impact_insights() {
        let metrics = SwingMetrics::from_components(80.0, 80.0, 80.0, 80.0, 80.0);
        let mut swing = record(metrics, 115.0, 1.0);
        assert!(power_insight(&swing).contains("Excellent power!"));
        assert!(impact_insight(&swing).contains("Excellent impact position!"));
        assert!(!plane_insight(&swing).contains("Try to"));

        swing.impact_angle = 3.0;
        swing.swing_plane.angle = 52.0;
        assert!(impact_insight(&swing).contains("strike down"));
        assert!(plane_insight(&swing).contains("steepen"));

        swing.impact_angle = -3.0;
        swing.swing_plane.angle = 68.0;
        assert!(impact_insight(&swing).contains("hitting up"));
        assert!(plane_insight(&swing).contains("flatten"));
    }
}
