pub mod analysis;
pub mod frame_processing;
pub mod tracking;

pub use analysis::AnalysisHandler;
pub use frame_processing::FrameHandler;
pub use tracking::TrackingHandler;
