//! 在摄像头画面上绘制骨架

use egui::{pos2, Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};

use crate::config::OverlayConfig;
use crate::types::landmark::{
    LEFT_ANKLE, LEFT_ELBOW, LEFT_HIP, LEFT_KNEE, LEFT_SHOULDER, LEFT_WRIST, RIGHT_ANKLE, RIGHT_ELBOW,
    RIGHT_HIP, RIGHT_KNEE, RIGHT_SHOULDER, RIGHT_WRIST,
};
use crate::types::Landmark;

/// 33点人体拓扑的连线
pub const POSE_CONNECTIONS: [(usize, usize); 35] = [
    (0, 1), (1, 2), (2, 3), (3, 7), (0, 4), (4, 5), (5, 6), (6, 8), (9, 10),
    (11, 12), (11, 13), (13, 15), (15, 17), (15, 19), (15, 21), (17, 19),
    (12, 14), (14, 16), (16, 18), (16, 20), (16, 22), (18, 20),
    (11, 23), (12, 24), (23, 24), (23, 25), (24, 26), (25, 27), (26, 28),
    (27, 29), (28, 30), (29, 31), (30, 32), (27, 31), (28, 32),
];

/// 挥杆关键关节，绘制得更大
pub const KEY_JOINTS: [usize; 12] = [
    LEFT_SHOULDER, RIGHT_SHOULDER,
    LEFT_ELBOW, RIGHT_ELBOW,
    LEFT_WRIST, RIGHT_WRIST,
    LEFT_HIP, RIGHT_HIP,
    LEFT_KNEE, RIGHT_KNEE,
    LEFT_ANKLE, RIGHT_ANKLE,
];

/// 可见度低于此值的关键点不绘制
const MIN_DRAW_VISIBILITY: f64 = 0.5;

const CONNECTOR_WIDTH: f32 = 2.0;
const LANDMARK_RADIUS: f32 = 3.0;
const KEY_JOINT_RADIUS: f32 = 5.0;
const KEY_JOINT_STROKE_WIDTH: f32 = 2.0;

#[derive(Debug, Clone, Copy)]
pub struct OverlayStyle {
    pub connector: Color32,
    pub landmark: Color32,
    pub key_joint: Color32,
    pub key_joint_stroke: Color32,
}

impl From<&OverlayConfig> for OverlayStyle {
    fn from(config: &OverlayConfig) -> Self {
        let rgb = |c: [u8; 3]| Color32::from_rgb(c[0], c[1], c[2]);
        Self {
            connector: rgb(config.connector),
            landmark: rgb(config.landmark),
            key_joint: rgb(config.key_joint),
            key_joint_stroke: rgb(config.key_joint_stroke),
        }
    }
}

/// 归一化关键点映射到 `rect` 内的坐标
pub fn to_screen(rect: Rect, landmark: &Landmark, mirrored: bool) -> Pos2 {
    let x = if mirrored { 1.0 - landmark.x } else { landmark.x };
    pos2(
        rect.left() + x as f32 * rect.width(),
        rect.top() + landmark.y as f32 * rect.height(),
    )
}

fn drawable(landmark: &Landmark) -> bool {
    !landmark.is_missing() && landmark.visibility >= MIN_DRAW_VISIBILITY
}

pub fn draw_pose(painter: &Painter, rect: Rect, landmarks: &[Landmark], mirrored: bool, style: &OverlayStyle) {
    let connector = Stroke::new(CONNECTOR_WIDTH, style.connector);
    for &(from, to) in POSE_CONNECTIONS.iter() {
        let (Some(a), Some(b)) = (landmarks.get(from), landmarks.get(to)) else {
            continue;
        };
        if drawable(a) && drawable(b) {
            painter.line_segment([to_screen(rect, a, mirrored), to_screen(rect, b, mirrored)], connector);
        }
    }

    for landmark in landmarks.iter().filter(|l| drawable(l)) {
        painter.circle_filled(to_screen(rect, landmark, mirrored), LANDMARK_RADIUS, style.landmark);
    }

    let stroke = Stroke::new(KEY_JOINT_STROKE_WIDTH, style.key_joint_stroke);
    for &index in KEY_JOINTS.iter() {
        if let Some(landmark) = landmarks.get(index).filter(|l| drawable(l)) {
            painter.circle(to_screen(rect, landmark, mirrored), KEY_JOINT_RADIUS, style.key_joint, stroke);
        }
    }
}

pub fn draw_recording_indicator(painter: &Painter, rect: Rect) {
    let center = rect.left_top() + egui::vec2(30.0, 30.0);
    painter.circle_filled(center, 10.0, Color32::from_rgba_unmultiplied(239, 68, 68, 204));
    painter.text(
        center + egui::vec2(20.0, 0.0),
        Align2::LEFT_CENTER,
        "REC",
        FontId::proportional(16.0),
        Color32::WHITE,
    );
}

pub fn draw_status(painter: &Painter, rect: Rect, status: &str) {
    let badge = Rect::from_min_size(rect.left_bottom() + egui::vec2(10.0, -40.0), egui::vec2(200.0, 30.0));
    painter.rect_filled(badge, 4.0, Color32::from_rgba_unmultiplied(0, 0, 0, 178));
    painter.text(
        badge.left_center() + egui::vec2(8.0, 0.0),
        Align2::LEFT_CENTER,
        format!("Status: {}", status),
        FontId::proportional(14.0),
        Color32::WHITE,
    );
}
