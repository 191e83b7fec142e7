use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 未设置 `SWINGHUB_CONFIG` 时使用
pub const DEFAULT_CONFIG_PATH: &str = "config/swinghub.toml";

/// 应用配置
/// 每个部分都有默认值，TOML 文件可以只写一部分

/// 顶层配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub detection: DetectionConfig,
    pub collector: CollectorConfig,
    pub metrics: MetricsConfig,
    pub analysis: AnalysisConfig,
    pub overlay: OverlayConfig,
    pub channels: ChannelConfig,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub resizable: bool,
    pub vsync: bool,
    pub hardware_acceleration: bool,
}

/// 摄像头朝向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacingMode {
    User,
    Environment,
}

impl FacingMode {
    pub fn toggled(self) -> Self {
        match self {
            FacingMode::User => FacingMode::Environment,
            FacingMode::Environment => FacingMode::User,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FacingMode::User => "user",
            FacingMode::Environment => "environment",
        }
    }
}

/// 摄像头源及理想的视频流参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// `synthetic` 或 `.jsonl` 关键点录制文件路径
    pub source: String,
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
    pub facing_mode: FacingMode,
    pub loop_playback: bool,
}

/// 姿态检测阈值
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub min_detection_confidence: f64,
    pub min_tracking_confidence: f64,
}

/// 单次挥杆采集的上限
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub max_swing_duration_ms: f64,
    pub max_swing_frames: usize,
}

/// 占位指标采样
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// 固定随机种子，未设置时使用系统熵
    pub seed: Option<u64>,
}

/// 模拟分析的延时
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub analysis_delay_ms: u64,
    pub demo_delay_ms: u64,
}

/// 骨架叠加层颜色
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub connector: [u8; 3],
    pub landmark: [u8; 3],
    pub key_joint: [u8; 3],
    pub key_joint_stroke: [u8; 3],
    pub trajectory: [u8; 3],
    pub target: [u8; 3],
    pub show_status: bool,
}

/// UI 与姿态线程之间的通道容量
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub pose_task_capacity: usize,
    pub pose_result_capacity: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 900.0,
            title: "SwingHub - Golf Swing Tracker".to_string(),
            resizable: true,
            vsync: true,
            hardware_acceleration: true,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            source: "synthetic".to_string(),
            width: 1280,
            height: 720,
            frame_rate: 30.0,
            facing_mode: FacingMode::Environment,
            loop_playback: true,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_detection_confidence: 0.5,
            min_tracking_confidence: 0.5,
        }
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_swing_duration_ms: 5000.0,
            max_swing_frames: 600,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            analysis_delay_ms: 2000,
            demo_delay_ms: 1500,
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            connector: [0, 255, 0],
            landmark: [255, 0, 0],
            key_joint: [255, 215, 0],
            key_joint_stroke: [255, 107, 0],
            trajectory: [16, 185, 129],
            target: [239, 68, 68],
            show_status: true,
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            pose_task_capacity: 1,
            pose_result_capacity: 4,
        }
    }
}

impl AppConfig {
    /// 从 TOML 文件加载配置
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;

        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(ConfigError::IoError)?;
            }
        }
        std::fs::write(path, content).map_err(ConfigError::IoError)?;

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::ValidationError("Window dimensions must be positive".to_string()));
        }

        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(ConfigError::ValidationError("Camera resolution must be positive".to_string()));
        }

        if !(self.camera.frame_rate > 0.0) {
            return Err(ConfigError::ValidationError("Camera frame rate must be positive".to_string()));
        }

        for (name, value) in [
            ("min_detection_confidence", self.detection.min_detection_confidence),
            ("min_tracking_confidence", self.detection.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ValidationError(format!("{} must be within 0..=1", name)));
            }
        }

        if !(self.collector.max_swing_duration_ms > 0.0) {
            return Err(ConfigError::ValidationError("Maximum swing duration must be positive".to_string()));
        }

        if self.collector.max_swing_frames == 0 {
            return Err(ConfigError::ValidationError("Maximum swing frame count must be positive".to_string()));
        }

        if self.channels.pose_task_capacity == 0 || self.channels.pose_result_capacity == 0 {
            return Err(ConfigError::ValidationError("Channel capacities must be positive".to_string()));
        }

        Ok(())
    }

    /// 摄像头源是否为关键点录制文件
    pub fn replay_path(&self) -> Option<PathBuf> {
        if self.camera.source.eq_ignore_ascii_case("synthetic") {
            None
        } else {
            Some(PathBuf::from(&self.camera.source))
        }
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Serialize error: {0}")]
    SerializeError(toml::ser::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("No configuration file path set")]
    MissingPath,
}

/// 配置管理器，记录当前配置及其文件路径
pub struct ConfigManager {
    config: AppConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            config_path: None,
        }
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            config_path: None,
        }
    }

    /// 使用默认配置，保存时写入 `path`
    pub fn with_path<P: AsRef<std::path::Path>>(path: P) -> Self {
        Self {
            config: AppConfig::default(),
            config_path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// 从文件加载配置
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let config = AppConfig::load_from_file(&path)?;
        Ok(Self {
            config,
            config_path: Some(path.as_ref().to_path_buf()),
        })
    }

    /// 文件存在则加载，否则使用默认配置
    /// 两种情况都保留路径，之后保存会写入该文件
    pub fn load_or_default<P: AsRef<std::path::Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("No config file at {}, using defaults", path.display());
            return Self::with_path(path);
        }

        match Self::load_from_file(path) {
            Ok(manager) => {
                log::info!("Loaded configuration from {}", path.display());
                manager
            }
            Err(e) => {
                log::warn!("Failed to load {}: {}, using defaults", path.display(), e);
                Self::with_path(path)
            }
        }
    }

    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    pub fn get_config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    pub fn config_path(&self) -> Option<&std::path::Path> {
        self.config_path.as_deref()
    }

    /// 写回配置文件
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self.config_path.as_ref().ok_or(ConfigError::MissingPath)?;
        self.config.save_to_file(path)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
