use crate::types::landmark::{LEFT_SHOULDER, LEFT_WRIST, RIGHT_SHOULDER, RIGHT_WRIST};
use crate::types::{Landmark, SwingPhase, LANDMARK_COUNT};

/// 手腕相对肩线的偏移阈值，超过即视为举杆或下杆
const RAISED_OFFSET: f64 = 0.1;
const FOLLOW_THROUGH_OFFSET: f64 = 0.3;
/// 区分上杆与起杆的手腕间距/肩宽比
const SPREAD_RATIO: f64 = 1.5;

/// 根据一帧关键点判断挥杆阶段
///
/// 偏移为两侧 `wrist.y - shoulder.y` 的平均值（归一化坐标）。
/// 无状态：相同关键点总是得到相同阶段
pub fn classify_phase(landmarks: &[Landmark]) -> SwingPhase {
    if landmarks.len() < LANDMARK_COUNT {
        return SwingPhase::Address;
    }

    let left_shoulder = landmarks[LEFT_SHOULDER];
    let right_shoulder = landmarks[RIGHT_SHOULDER];
    let left_wrist = landmarks[LEFT_WRIST];
    let right_wrist = landmarks[RIGHT_WRIST];

    if [left_shoulder, right_shoulder, left_wrist, right_wrist]
        .iter()
        .any(Landmark::is_missing)
    {
        return SwingPhase::Address;
    }

    let left_offset = left_wrist.y - left_shoulder.y;
    let right_offset = right_wrist.y - right_shoulder.y;
    let avg_offset = (left_offset + right_offset) / 2.0;

    let wrist_spread = (left_wrist.x - right_wrist.x).abs();
    let shoulder_spread = (left_shoulder.x - right_shoulder.x).abs();

    if avg_offset > RAISED_OFFSET {
        if wrist_spread > shoulder_spread * SPREAD_RATIO {
            SwingPhase::Backswing
        } else {
            SwingPhase::Takeaway
        }
    } else if avg_offset < -FOLLOW_THROUGH_OFFSET {
        SwingPhase::FollowThrough
    } else if avg_offset < -RAISED_OFFSET {
        SwingPhase::Downswing
    } else {
        SwingPhase::Address
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// 33个关键点，肩部位于 y=0.3、x=0.4/0.6，双腕按给定偏移和间距放置
    pub(crate) fn pose_with_wrists(offset: f64, wrist_spread: f64) -> Vec<Landmark> {
        let mut landmarks = vec![Landmark::new(0.5, 0.5, 0.0, 0.9); LANDMARK_COUNT];
        landmarks[LEFT_SHOULDER] = Landmark::new(0.4, 0.3, 0.0, 0.9);
        landmarks[RIGHT_SHOULDER] = Landmark::new(0.6, 0.3, 0.0, 0.9);
        landmarks[LEFT_WRIST] = Landmark::new(0.5 - wrist_spread / 2.0, 0.3 + offset, 0.0, 0.9);
        landmarks[RIGHT_WRIST] = Landmark::new(0.5 + wrist_spread / 2.0, 0.3 + offset, 0.0, 0.9);
        landmarks
    }

    /// 分类结果为 `phase` 的关键点
    pub(crate) fn pose_for_phase(phase: SwingPhase) -> Vec<Landmark> {
        match phase {
            SwingPhase::Takeaway => pose_with_wrists(0.2, 0.1),
            SwingPhase::Backswing => pose_with_wrists(0.2, 0.5),
            SwingPhase::Downswing => pose_with_wrists(-0.2, 0.1),
            SwingPhase::FollowThrough => pose_with_wrists(-0.4, 0.1),
            _ => pose_with_wrists(0.0, 0.1),
        }
    }

    #[test]
    fn test_short_frames_are_address() {
        for len in [0, 1, 16, 32] {
            let landmarks = pose_with_wrists(0.2, 0.5)[..len].to_vec();
            assert_eq!(classify_phase(&landmarks), SwingPhase::Address, "len {}", len);
        }
    }

    #[test]
    fn test_missing_wrist_is_address() {
        let mut landmarks = pose_with_wrists(0.2, 0.5);
        landmarks[LEFT_WRIST].y = f64::NAN;
        assert_eq!(classify_phase(&landmarks), SwingPhase::Address);
    }

    #[test]
    fn test_spread_separates_backswing_from_takeaway() {
        // 肩宽 0.2，临界值为 0.3
        assert_eq!(classify_phase(&pose_with_wrists(0.2, 0.35)), SwingPhase::Backswing);
        assert_eq!(classify_phase(&pose_with_wrists(0.2, 0.28)), SwingPhase::Takeaway);
        assert_eq!(classify_phase(&pose_with_wrists(0.2, 0.1)), SwingPhase::Takeaway);
    }

    #[test]
    fn test_lowered_wrists() {
        assert_eq!(classify_phase(&pose_with_wrists(-0.2, 0.1)), SwingPhase::Downswing);
        assert_eq!(classify_phase(&pose_with_wrists(-0.4, 0.1)), SwingPhase::FollowThrough);
        assert_eq!(classify_phase(&pose_with_wrists(-0.05, 0.9)), SwingPhase::Address);
        assert_eq!(classify_phase(&pose_with_wrists(0.05, 0.9)), SwingPhase::Address);
    }

    #[test]
    fn test_uses_average_of_both_sides() {
        let mut landmarks = pose_with_wrists(0.0, 0.1);
        landmarks[LEFT_WRIST].y = 0.3 + 0.5;
        landmarks[RIGHT_WRIST].y = 0.3 - 0.2;
        // 平均偏移 0.15 > 0.1
        assert_eq!(classify_phase(&landmarks), SwingPhase::Takeaway);
    }

    #[test]
    fn test_deterministic() {
        let landmarks = pose_with_wrists(-0.25, 0.4);
        let first = classify_phase(&landmarks);
        for _ in 0..10 {
            assert_eq!(classify_phase(&landmarks), first);
        }
    }

    #[test]
    fn test_fixture_phases_round_trip() {
        for phase in [
            SwingPhase::Address,
            SwingPhase::Takeaway,
            SwingPhase::Backswing,
            SwingPhase::Downswing,
            SwingPhase::FollowThrough,
        ] {
            assert_eq!(classify_phase(&pose_for_phase(phase)), phase);
        }
    }
}
