/// 完整人体关键点数量
pub const LANDMARK_COUNT: usize = 33;

pub const LEFT_SHOULDER: usize = 11;
pub const RIGHT_SHOULDER: usize = 12;
pub const LEFT_ELBOW: usize = 13;
pub const RIGHT_ELBOW: usize = 14;
pub const LEFT_WRIST: usize = 15;
pub const RIGHT_WRIST: usize = 16;
pub const LEFT_HIP: usize = 23;
pub const RIGHT_HIP: usize = 24;
pub const LEFT_KNEE: usize = 25;
pub const RIGHT_KNEE: usize = 26;
pub const LEFT_ANKLE: usize = 27;
pub const RIGHT_ANKLE: usize = 28;

/// 归一化图像坐标中的单个人体关节
#[derive(serde::Deserialize, serde::Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default = "default_visibility")]
    pub visibility: f64,
}

fn default_visibility() -> f64 {
    1.0
}

impl Landmark {
    pub fn new(x: f64, y: f64, z: f64, visibility: f64) -> Self {
        Self { x, y, z, visibility }
    }

    /// 坐标无法用于几何计算的关键点
    pub fn is_missing(&self) -> bool {
        !self.x.is_finite() || !self.y.is_finite()
    }
}

impl Default for Landmark {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            visibility: 1.0,
        }
    }
}

/// 姿态提供者返回的一帧关键点
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, PartialEq)]
pub struct LandmarkFrame {
    pub timestamp_ms: f64,
    pub landmarks: Vec<Landmark>,
}

impl LandmarkFrame {
    pub fn new(timestamp_ms: f64, landmarks: Vec<Landmark>) -> Self {
        Self { timestamp_ms, landmarks }
    }

    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }

    pub fn mean_visibility(&self) -> f64 {
        if self.landmarks.is_empty() {
            return 0.0;
        }
        self.landmarks.iter().map(|l| l.visibility).sum::<f64>() / self.landmarks.len() as f64
    }

    /// 为每个关键点加上名称和本帧时间戳
    pub fn to_keypoints(&self) -> Vec<PoseKeypoint> {
        self.landmarks
            .iter()
            .enumerate()
            .map(|(index, landmark)| PoseKeypoint {
                name: format!("landmark_{}", index),
                x: landmark.x,
                y: landmark.y,
                z: if landmark.z.is_finite() { landmark.z } else { 0.0 },
                visibility: if landmark.visibility > 0.0 { landmark.visibility } else { 1.0 },
                timestamp: self.timestamp_ms,
            })
            .collect()
    }
}

/// 挥杆记录中保存的关键点
#[derive(Clone, Debug, PartialEq)]
pub struct PoseKeypoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub visibility: f64,
    pub timestamp: f64,
}

impl PoseKeypoint {
    /// 从名称中解析出的关键点索引
    pub fn landmark_index(&self) -> Option<usize> {
        self.name
            .strip_prefix("landmark_")
            .unwrap_or(&self.name)
            .parse()
            .ok()
    }

    pub fn is_wrist(&self) -> bool {
        matches!(self.landmark_index(), Some(LEFT_WRIST) | Some(RIGHT_WRIST))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypoints_carry_name_and_timestamp() {
        let frame = LandmarkFrame::new(48.0, vec![Landmark::new(0.1, 0.2, f64::NAN, 0.0); 3]);
        let keypoints = frame.to_keypoints();

        assert_eq!(keypoints.len(), 3);
        assert_eq!(keypoints[2].name, "landmark_2");
        assert_eq!(keypoints[0].timestamp, 48.0);
        assert_eq!(keypoints[0].z, 0.0);
        assert_eq!(keypoints[0].visibility, 1.0);
    }

    #[test]
    fn test_wrist_detection_by_name() {
        let frame = LandmarkFrame::new(0.0, vec![Landmark::default(); LANDMARK_COUNT]);
        let wrists: Vec<usize> = frame
            .to_keypoints()
            .iter()
            .filter(|kp| kp.is_wrist())
            .filter_map(|kp| kp.landmark_index())
            .collect();

        assert_eq!(wrists, vec![LEFT_WRIST, RIGHT_WRIST]);
    }

    #[test]
    fn test_landmark_json_defaults() {
        let landmark: Landmark = serde_json::from_str(r#"{"x":0.5,"y":0.25}"#).unwrap();
        assert_eq!(landmark.z, 0.0);
        assert_eq!(landmark.visibility, 1.0);
    }
}
