use log::{debug, info, warn};

use super::classifier::classify_phase;
use super::metrics::{estimate_ball_speed, MetricsSynthesizer};
use crate::config::CollectorConfig;
use crate::types::landmark::{LEFT_WRIST, RIGHT_WRIST};
use crate::types::{LandmarkFrame, PoseKeypoint, SwingPathPoint, SwingPhase, SwingRecord};
use crate::utils::{generate_swing_id, now_millis};

/// 上杆占挥杆总时长的比例
/// 固定比例，并非测量值，见 DESIGN.md
pub const BACKSWING_SHARE: f64 = 0.6;

/// 单次采集的上限
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectorLimits {
    pub max_duration_ms: f64,
    pub max_frames: usize,
}

impl Default for CollectorLimits {
    fn default() -> Self {
        Self::from(&CollectorConfig::default())
    }
}

impl From<&CollectorConfig> for CollectorLimits {
    fn from(config: &CollectorConfig) -> Self {
        Self {
            max_duration_ms: config.max_swing_duration_ms,
            max_frames: config.max_swing_frames,
        }
    }
}

/// 处理一帧后产生的事件
#[derive(Debug, Clone, PartialEq)]
pub enum CollectorEvent {
    /// 空闲时检测到起杆，从本帧开始采集
    Started { id: String, timestamp_ms: f64 },
    /// 进入送杆阶段，挥杆结束并输出记录
    Finalized(SwingRecord),
    /// 超出上限，丢弃缓冲区，不产生记录
    Aborted { id: String, frames: usize, elapsed_ms: f64 },
}

/// 处理一帧的结果
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub phase: SwingPhase,
    pub event: Option<CollectorEvent>,
}

/// 起杆时创建的记录外壳
#[derive(Debug, Clone)]
struct SwingShell {
    id: String,
    created_at: i64,
    start_ms: f64,
    last_ms: f64,
    frames: usize,
}

#[derive(Debug, Clone)]
enum CollectorState {
    Idle,
    Collecting(SwingShell),
}

/// 累积从起杆到送杆之间的关键点
pub struct SwingCollector {
    state: CollectorState,
    keypoints: Vec<PoseKeypoint>,
    swing_path: Vec<SwingPathPoint>,
    last_phase: SwingPhase,
    limits: CollectorLimits,
    synthesizer: MetricsSynthesizer,
}

impl SwingCollector {
    pub fn new(limits: CollectorLimits, synthesizer: MetricsSynthesizer) -> Self {
        Self {
            state: CollectorState::Idle,
            keypoints: Vec::new(),
            swing_path: Vec::new(),
            last_phase: SwingPhase::Address,
            limits,
            synthesizer,
        }
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self.state, CollectorState::Collecting(_))
    }

    /// 最近一帧的挥杆阶段
    pub fn last_phase(&self) -> SwingPhase {
        self.last_phase
    }

    pub fn buffered_frames(&self) -> usize {
        match &self.state {
            CollectorState::Collecting(shell) => shell.frames,
            CollectorState::Idle => 0,
        }
    }

    pub fn buffered_keypoints(&self) -> &[PoseKeypoint] {
        &self.keypoints
    }

    /// 丢弃进行中的挥杆
    pub fn reset(&mut self) {
        self.state = CollectorState::Idle;
        self.keypoints.clear();
        self.swing_path.clear();
        self.last_phase = SwingPhase::Address;
    }

    /// 识别一帧的阶段并推进采集状态机
    pub fn process(&mut self, frame: &LandmarkFrame) -> FrameOutcome {
        let phase = classify_phase(&frame.landmarks);
        if let CollectorState::Collecting(shell) = &self.state {
            if frame.timestamp_ms < shell.last_ms {
                debug!(
                    "Ignoring frame at {:.0}ms, swing {} is already at {:.0}ms",
                    frame.timestamp_ms, shell.id, shell.last_ms
                );
                return FrameOutcome { phase, event: None };
            }
        }

        let previous = std::mem::replace(&mut self.last_phase, phase);
        let mut event = None;

        if phase == SwingPhase::Takeaway && !self.is_collecting() {
            let id = generate_swing_id();
            debug!("Takeaway at {:.0}ms, collecting swing {}", frame.timestamp_ms, id);
            self.keypoints.clear();
            self.swing_path.clear();
            self.state = CollectorState::Collecting(SwingShell {
                id: id.clone(),
                created_at: now_millis(),
                start_ms: frame.timestamp_ms,
                last_ms: frame.timestamp_ms,
                frames: 0,
            });
            event = Some(CollectorEvent::Started {
                id,
                timestamp_ms: frame.timestamp_ms,
            });
        }

        let shell = match &mut self.state {
            CollectorState::Collecting(shell) => shell,
            CollectorState::Idle => return FrameOutcome { phase, event },
        };

        let elapsed_ms = frame.timestamp_ms - shell.start_ms;
        if elapsed_ms > self.limits.max_duration_ms || shell.frames >= self.limits.max_frames {
            warn!(
                "Swing {} exceeded collection limits ({} frames, {:.0}ms), discarding",
                shell.id, shell.frames, elapsed_ms
            );
            let aborted = CollectorEvent::Aborted {
                id: shell.id.clone(),
                frames: shell.frames,
                elapsed_ms,
            };
            self.state = CollectorState::Idle;
            self.keypoints.clear();
            self.swing_path.clear();
            return FrameOutcome {
                phase,
                event: Some(aborted),
            };
        }

        shell.frames += 1;
        shell.last_ms = frame.timestamp_ms;
        self.keypoints.extend(frame.to_keypoints());
        if let Some(point) = wrist_midpoint(frame, phase) {
            self.swing_path.push(point);
        }

        if phase == SwingPhase::FollowThrough && previous != SwingPhase::FollowThrough {
            if let CollectorState::Collecting(shell) = std::mem::replace(&mut self.state, CollectorState::Idle) {
                let record = self.finalize(shell, frame.timestamp_ms);
                info!(
                    "Swing {} finalized: {} frames, {:.3}s, overall {:.0}",
                    record.id,
                    record.pose_keypoints.len() / frame.landmarks.len().max(1),
                    record.swing_tempo,
                    record.metrics.overall_score
                );
                event = Some(CollectorEvent::Finalized(record));
            }
        }

        FrameOutcome { phase, event }
    }

    fn finalize(&mut self, shell: SwingShell, end_ms: f64) -> SwingRecord {
        let duration_ms = (end_ms - shell.start_ms).max(0.0);
        let backswing_ms = duration_ms * BACKSWING_SHARE;
        let downswing_ms = duration_ms * (1.0 - BACKSWING_SHARE);

        let pose_keypoints = std::mem::take(&mut self.keypoints);
        let swing_path = std::mem::take(&mut self.swing_path);
        let metrics = self.synthesizer.component_scores(&pose_keypoints);

        SwingRecord {
            id: shell.id,
            created_at: shell.created_at,
            // 暂无球体跟踪
            ball_speed: estimate_ball_speed(&[]),
            club_head_speed: self.synthesizer.club_head_speed(),
            swing_tempo: duration_ms / 1000.0,
            backswing_time: backswing_ms / 1000.0,
            downswing_time: downswing_ms / 1000.0,
            impact_angle: self.synthesizer.impact_angle(),
            swing_path,
            pose_keypoints,
            swing_plane: self.synthesizer.swing_plane(),
            metrics,
        }
    }
}

fn wrist_midpoint(frame: &LandmarkFrame, phase: SwingPhase) -> Option<SwingPathPoint> {
    let left = frame.get(LEFT_WRIST)?;
    let right = frame.get(RIGHT_WRIST)?;
    if left.is_missing() || right.is_missing() {
        return None;
    }

    Some(SwingPathPoint {
        x: (left.x + right.x) / 2.0,
        y: (left.y + right.y) / 2.0,
        timestamp: frame.timestamp_ms,
        phase,
    })
}
