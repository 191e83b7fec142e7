pub mod landmark;
pub mod swing;
pub mod frame;
pub mod tasks;

pub use landmark::{Landmark, LandmarkFrame, PoseKeypoint, LANDMARK_COUNT};
pub use swing::{SwingPhase, SwingRecord, SwingMetrics, SwingPlane, SwingPathPoint, BallSample};
pub use frame::VideoFrame;
pub use tasks::{PoseTask, PoseResponse};
