use std::ops::Range;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::MetricsConfig;
use crate::types::{BallSample, PoseKeypoint, SwingMetrics, SwingPlane};

// 各项分数范围（0-100）
pub const TIMING: Range<f64> = 60.0..100.0;
pub const BALANCE: Range<f64> = 70.0..100.0;
pub const CONSISTENCY: Range<f64> = 50.0..90.0;
pub const POWER: Range<f64> = 50.0..100.0;
pub const TEMPO: Range<f64> = 70.0..100.0;

// 物理量估计范围
pub const CLUB_HEAD_SPEED_MPH: Range<f64> = 80.0..130.0;
pub const IMPACT_ANGLE_DEG: Range<f64> = -5.0..5.0;
pub const PLANE_ANGLE_DEG: Range<f64> = 50.0..70.0;
pub const PLANE_CONSISTENCY: Range<f64> = 0.7..1.0;
pub const PLANE_DEVIATION_DEG: Range<f64> = 2.0..7.0;

/// 像素/秒 转 mph，未标定
const BALL_SPEED_SCALE: f64 = 0.01;
const MAX_BALL_SPEED_MPH: f64 = 200.0;

/// 挥杆结束后的占位指标
///
/// 所有数值都不是测量得到的，而是从固定范围内独立随机采样。
/// 设置随机种子后结果可复现
pub struct MetricsSynthesizer {
    rng: StdRng,
}

impl MetricsSynthesizer {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    pub fn from_config(config: &MetricsConfig) -> Self {
        Self::new(config.seed)
    }

    pub(crate) fn sample(&mut self, range: Range<f64>) -> f64 {
        self.rng.random_range(range)
    }

    /// 计算各项分数，未采集到数据时全部为零
    pub fn component_scores(&mut self, keypoints: &[PoseKeypoint]) -> SwingMetrics {
        if keypoints.is_empty() {
            return SwingMetrics::default();
        }

        let timing = self.sample(TIMING);
        let balance = self.sample(BALANCE);
        let consistency = self.sample(CONSISTENCY);
        let power = self.sample(POWER);
        let tempo = self.sample(TEMPO);

        SwingMetrics::from_components(timing, balance, consistency, power, tempo)
    }

    pub fn club_head_speed(&mut self) -> f64 {
        self.sample(CLUB_HEAD_SPEED_MPH)
    }

    pub fn impact_angle(&mut self) -> f64 {
        self.sample(IMPACT_ANGLE_DEG)
    }

    pub fn swing_plane(&mut self) -> SwingPlane {
        SwingPlane {
            angle: self.sample(PLANE_ANGLE_DEG),
            consistency: self.sample(PLANE_CONSISTENCY),
            deviation: self.sample(PLANE_DEVIATION_DEG),
        }
    }
}

/// 根据球的位置（首个到末个样本）估算球速，单位 mph
pub fn estimate_ball_speed(samples: &[BallSample]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    let (first, last) = match (sorted.first(), sorted.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 0.0,
    };

    let distance = ((last.x - first.x).powi(2) + (last.y - first.y).powi(2)).sqrt();
    let elapsed_s = (last.timestamp - first.timestamp) / 1000.0;
    if elapsed_s <= 0.0 {
        return 0.0;
    }

    (distance / elapsed_s * BALL_SPEED_SCALE).min(MAX_BALL_SPEED_MPH)
}
