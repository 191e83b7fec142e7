use std::f64::consts::PI;
use std::ops::Range;

use super::metrics::MetricsSynthesizer;
use crate::types::landmark::LEFT_WRIST;
use crate::types::{PoseKeypoint, SwingMetrics, SwingPathPoint, SwingPhase, SwingPlane, SwingRecord};
use crate::utils::{generate_swing_id, now_millis};

pub const DEMO_BALL_SPEED: Range<f64> = 120.0..160.0;
/// 在 0.7 倍球速基础上增加的值
pub const DEMO_CLUB_SPEED_SPREAD: Range<f64> = 0.0..10.0;
pub const DEMO_BACKSWING_S: Range<f64> = 0.8..1.1;
pub const DEMO_DOWNSWING_S: Range<f64> = 0.2..0.3;
pub const DEMO_IMPACT_ANGLE: Range<f64> = -4.0..4.0;
pub const DEMO_PLANE_ANGLE: Range<f64> = 55.0..70.0;
pub const DEMO_PLANE_CONSISTENCY: Range<f64> = 0.7..1.0;
pub const DEMO_PLANE_DEVIATION: Range<f64> = 1.0..6.0;

pub const DEMO_TIMING: Range<f64> = 70.0..100.0;
pub const DEMO_BALANCE: Range<f64> = 65.0..100.0;
pub const DEMO_CONSISTENCY: Range<f64> = 60.0..100.0;
pub const DEMO_POWER: Range<f64> = 65.0..100.0;
pub const DEMO_TEMPO: Range<f64> = 70.0..100.0;

const DEMO_KEYPOINTS: usize = 100;
/// 约 60 fps
const DEMO_FRAME_MS: f64 = 16.67;

impl MetricsSynthesizer {
    /// 为 "Try Demo" 生成一次完整的示例挥杆
    pub fn demo_swing(&mut self) -> SwingRecord {
        let ball_speed = self.sample(DEMO_BALL_SPEED);
        let club_head_speed = ball_speed * 0.7 + self.sample(DEMO_CLUB_SPEED_SPREAD);
        let backswing_time = self.sample(DEMO_BACKSWING_S);
        let downswing_time = self.sample(DEMO_DOWNSWING_S);
        let impact_angle = self.sample(DEMO_IMPACT_ANGLE);

        let swing_plane = SwingPlane {
            angle: self.sample(DEMO_PLANE_ANGLE),
            consistency: self.sample(DEMO_PLANE_CONSISTENCY),
            deviation: self.sample(DEMO_PLANE_DEVIATION),
        };

        let metrics = SwingMetrics::from_components(
            self.sample(DEMO_TIMING),
            self.sample(DEMO_BALANCE),
            self.sample(DEMO_CONSISTENCY),
            self.sample(DEMO_POWER),
            self.sample(DEMO_TEMPO),
        );

        let pose_keypoints = demo_wrist_keypoints();
        let swing_path = pose_keypoints
            .iter()
            .enumerate()
            .map(|(i, kp)| SwingPathPoint {
                x: kp.x,
                y: kp.y,
                timestamp: kp.timestamp,
                phase: demo_phase(i),
            })
            .collect();

        SwingRecord {
            id: generate_swing_id(),
            created_at: now_millis(),
            ball_speed,
            club_head_speed,
            swing_tempo: backswing_time + downswing_time,
            backswing_time,
            downswing_time,
            impact_angle,
            swing_path,
            pose_keypoints,
            swing_plane,
            metrics,
        }
    }
}

fn demo_phase(i: usize) -> SwingPhase {
    let progress = i as f64 / (DEMO_KEYPOINTS - 1) as f64;
    let index = (progress * SwingPhase::ALL.len() as f64) as usize;
    SwingPhase::ALL[index.min(SwingPhase::ALL.len() - 1)]
}

/// 左手腕绕身体一圈的轨迹
fn demo_wrist_keypoints() -> Vec<PoseKeypoint> {
    (0..DEMO_KEYPOINTS)
        .map(|i| {
            let progress = i as f64 / (DEMO_KEYPOINTS - 1) as f64;
            PoseKeypoint {
                name: format!("landmark_{}", LEFT_WRIST),
                x: 0.5 + (progress * PI * 2.0).sin() * 0.3,
                y: 0.6 + (progress * PI * 2.0).cos() * 0.2,
                z: 0.0,
                visibility: 0.9,
                timestamp: i as f64 * DEMO_FRAME_MS,
            }
        })
        .collect()
}
