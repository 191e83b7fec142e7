use super::PoseKeypoint;

/// 挥杆的粗略阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwingPhase {
    Address,
    Takeaway,
    Backswing,
    Transition,
    Downswing,
    Impact,
    FollowThrough,
    Finish,
}

impl SwingPhase {
    pub const ALL: [SwingPhase; 8] = [
        SwingPhase::Address,
        SwingPhase::Takeaway,
        SwingPhase::Backswing,
        SwingPhase::Transition,
        SwingPhase::Downswing,
        SwingPhase::Impact,
        SwingPhase::FollowThrough,
        SwingPhase::Finish,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SwingPhase::Address => "address",
            SwingPhase::Takeaway => "takeaway",
            SwingPhase::Backswing => "backswing",
            SwingPhase::Transition => "transition",
            SwingPhase::Downswing => "downswing",
            SwingPhase::Impact => "impact",
            SwingPhase::FollowThrough => "follow-through",
            SwingPhase::Finish => "finish",
        }
    }
}

impl Default for SwingPhase {
    fn default() -> Self {
        SwingPhase::Address
    }
}

impl std::fmt::Display for SwingPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 五项分数（0-100）及其平均值
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwingMetrics {
    pub overall_score: f64,
    pub timing: f64,
    pub balance: f64,
    pub consistency: f64,
    pub power: f64,
    pub tempo: f64,
}

impl SwingMetrics {
    /// 由各项分数构建，总分始终为平均值
    pub fn from_components(timing: f64, balance: f64, consistency: f64, power: f64, tempo: f64) -> Self {
        Self {
            overall_score: (timing + balance + consistency + power + tempo) / 5.0,
            timing,
            balance,
            consistency,
            power,
            tempo,
        }
    }

    /// 按雷达图顺序：节奏、平衡、一致性、力量、速度
    pub fn components(&self) -> [f64; 5] {
        [self.timing, self.balance, self.consistency, self.power, self.tempo]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwingPlane {
    /// 度
    pub angle: f64,
    /// 0-1
    pub consistency: f64,
    /// 度
    pub deviation: f64,
}

/// 每个采集帧取一次双腕中点
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwingPathPoint {
    pub x: f64,
    pub y: f64,
    pub timestamp: f64,
    pub phase: SwingPhase,
}

/// 跟踪到的球位置，用于估算球速
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallSample {
    pub x: f64,
    pub y: f64,
    pub timestamp: f64,
}

/// 一次完整挥杆：采集的帧加上合成指标
#[derive(Debug, Clone, PartialEq)]
pub struct SwingRecord {
    pub id: String,
    /// Unix 毫秒
    pub created_at: i64,
    /// mph
    pub ball_speed: f64,
    /// mph
    pub club_head_speed: f64,
    /// 秒
    pub swing_tempo: f64,
    /// 秒
    pub backswing_time: f64,
    /// 秒
    pub downswing_time: f64,
    /// 度
    pub impact_angle: f64,
    pub swing_path: Vec<SwingPathPoint>,
    pub pose_keypoints: Vec<PoseKeypoint>,
    pub swing_plane: SwingPlane,
    pub metrics: SwingMetrics,
}

impl SwingRecord {
    /// 上杆与下杆时间比，下杆时长为零时返回 None
    pub fn tempo_ratio(&self) -> Option<f64> {
        if self.downswing_time > 0.0 {
            Some(self.backswing_time / self.downswing_time)
        } else {
            None
        }
    }

    pub fn wrist_keypoints(&self) -> impl Iterator<Item = &PoseKeypoint> {
        self.pose_keypoints.iter().filter(|kp| kp.is_wrist())
    }
}
