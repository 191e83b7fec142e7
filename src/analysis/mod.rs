//! 挥杆分析：逐帧阶段识别、挥杆采集，
//! 以及仪表盘中的占位指标

pub mod classifier;
pub mod collector;
pub mod metrics;
pub mod demo;
pub mod insights;

pub use classifier::classify_phase;
pub use collector::{CollectorEvent, CollectorLimits, SwingCollector};
pub use metrics::MetricsSynthesizer;
