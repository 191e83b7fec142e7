use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use log::{info, warn};

use super::{CameraError, CameraSettings, CameraSource};
use crate::types::{LandmarkFrame, VideoFrame};

/// 按实时速度回放 JSON Lines 关键点录制
///
/// 每行是一个 `LandmarkFrame`，到达录制时间偏移后输出；
/// UI 处理不及时会跳过过期的帧，
/// 与实时视频流丢帧的行为一致
pub struct ReplayCamera {
    path: PathBuf,
    loop_playback: bool,
    frames: Vec<LandmarkFrame>,
    settings: Option<CameraSettings>,
    started_at: Option<Instant>,
    cursor: usize,
    loop_offset_ms: f64,
    frame_index: u64,
    finished: bool,
}

impl ReplayCamera {
    pub fn new<P: AsRef<Path>>(path: P, loop_playback: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            loop_playback,
            frames: Vec::new(),
            settings: None,
            started_at: None,
            cursor: 0,
            loop_offset_ms: 0.0,
            frame_index: 0,
            finished: false,
        }
    }

    fn recording_span_ms(&self) -> f64 {
        match (self.frames.first(), self.frames.last()) {
            (Some(first), Some(last)) => last.timestamp_ms - first.timestamp_ms,
            _ => 0.0,
        }
    }
}

impl CameraSource for ReplayCamera {
    fn name(&self) -> &str {
        "replay"
    }

    fn start(&mut self, settings: &CameraSettings) -> Result<(), CameraError> {
        settings.validate()?;

        let file = File::open(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => CameraError::PermissionDenied,
            _ => CameraError::Unavailable(format!("{}: {}", self.path.display(), e)),
        })?;
        let frames = parse_recording(BufReader::new(file), &self.path)?;

        info!("Replay camera loaded {} frames from {}", frames.len(), self.path.display());

        self.frames = frames;
        self.settings = Some(settings.clone());
        self.started_at = Some(Instant::now());
        self.cursor = 0;
        self.loop_offset_ms = 0.0;
        self.frame_index = 0;
        self.finished = false;
        Ok(())
    }

    fn stop(&mut self) {
        if self.settings.take().is_some() {
            info!("Replay camera stopped after {} frames", self.frame_index);
        }
        self.started_at = None;
    }

    fn is_active(&self) -> bool {
        self.settings.is_some()
    }

    fn settings(&self) -> Option<&CameraSettings> {
        self.settings.as_ref()
    }

    fn poll_frame(&mut self, now: Instant) -> Option<VideoFrame> {
        let settings = self.settings.as_ref()?;
        let started_at = self.started_at?;
        if self.finished {
            return None;
        }
        let first_ms = self.frames.first()?.timestamp_ms;
        let span_ms = self.recording_span_ms();
        let elapsed_ms = now.saturating_duration_since(started_at).as_secs_f64() * 1000.0;

        if self.cursor >= self.frames.len() {
            if !self.loop_playback {
                info!("Replay of {} finished", self.path.display());
                self.finished = true;
                return None;
            }
            self.cursor = 0;
            self.loop_offset_ms += span_ms + settings.frame_interval().as_secs_f64() * 1000.0;
        }

        // 取已到期的最新一帧
        let playhead_ms = elapsed_ms - self.loop_offset_ms;
        let mut due = None;
        while self.cursor < self.frames.len()
            && self.frames[self.cursor].timestamp_ms - first_ms <= playhead_ms
        {
            due = Some(self.cursor);
            self.cursor += 1;
        }
        let recorded = &self.frames[due?];

        let timestamp_ms = self.loop_offset_ms + recorded.timestamp_ms - first_ms;
        let mut frame = VideoFrame::new(self.frame_index, timestamp_ms, settings.width, settings.height);
        frame.mirrored = settings.mirrored();
        let frame = frame.with_landmarks(LandmarkFrame::new(timestamp_ms, recorded.landmarks.clone()));

        self.frame_index += 1;
        Some(frame)
    }
}

/// 解析 JSON Lines 录制文件，跳过空行
pub fn parse_recording<R: BufRead>(reader: R, path: &Path) -> Result<Vec<LandmarkFrame>, CameraError> {
    let malformed = |line: usize, reason: String| CameraError::MalformedRecording {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut frames: Vec<LandmarkFrame> = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line.map_err(|e| malformed(line_no, e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let frame: LandmarkFrame =
            serde_json::from_str(trimmed).map_err(|e| malformed(line_no, e.to_string()))?;

        if !frame.timestamp_ms.is_finite() {
            return Err(malformed(line_no, "timestamp is not finite".to_string()));
        }
        if let Some(previous) = frames.last() {
            if frame.timestamp_ms < previous.timestamp_ms {
                return Err(malformed(line_no, "timestamps go backwards".to_string()));
            }
        }
        if frame.landmarks.len() != crate::types::LANDMARK_COUNT {
            warn!(
                "{} line {}: {} landmarks, expected {}",
                path.display(),
                line_no,
                frame.landmarks.len(),
                crate::types::LANDMARK_COUNT
            );
        }

        frames.push(frame);
    }

    if frames.is_empty() {
        return Err(malformed(0, "recording contains no frames".to_string()));
    }

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::Duration;

    fn recording_line(timestamp_ms: f64, y: f64) -> String {
        let landmarks: Vec<String> = (0..33)
            .map(|_| format!(r#"{{"x":0.5,"y":{},"z":0.0,"visibility":0.9}}"#, y))
            .collect();
        format!(r#"{{"timestamp_ms":{},"landmarks":[{}]}}"#, timestamp_ms, landmarks.join(","))
    }

    fn write_recording(name: &str, lines: &[String]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("swinghub_replay_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, lines.join("\n")).unwrap();
        path
    }

    #[test]
    fn test_parse_recording() {
        let text = format!("{}\n\n{}\n", recording_line(0.0, 0.3), recording_line(33.0, 0.4));
        let frames = parse_recording(Cursor::new(text), Path::new("mem")).unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].timestamp_ms, 33.0);
        assert_eq!(frames[1].landmarks.len(), 33);
        assert_eq!(frames[1].landmarks[0].visibility, 0.9);
    }

    #[test]
    fn test_optional_fields_default() {
        let text = r#"{"timestamp_ms": 5, "landmarks": [{"x": 0.1, "y": 0.2}]}"#;
        let frames = parse_recording(Cursor::new(text), Path::new("mem")).unwrap();
        assert_eq!(frames[0].landmarks[0].z, 0.0);
        assert_eq!(frames[0].landmarks[0].visibility, 1.0);
    }

    #[test]
    fn test_partial_body_frames_are_kept() {
        let text = format!(
            "{}\n{}\n",
            recording_line(0.0, 0.3),
            r#"{"timestamp_ms": 33, "landmarks": [{"x": 0.4, "y": 0.5}, {"x": 0.6, "y": 0.5}]}"#
        );
        let frames = parse_recording(Cursor::new(text), Path::new("mem")).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].landmarks.len(), 2);
    }

    #[test]
    fn test_malformed_recording_reports_line() {
        let text = format!("{}\nnot json\n", recording_line(0.0, 0.3));
        match parse_recording(Cursor::new(text), Path::new("mem")) {
            Err(CameraError::MalformedRecording { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected {:?}", other.map(|f| f.len())),
        }

        let text = format!("{}\n{}\n", recording_line(50.0, 0.3), recording_line(10.0, 0.3));
        assert!(parse_recording(Cursor::new(text), Path::new("mem")).is_err());

        assert!(parse_recording(Cursor::new(""), Path::new("mem")).is_err());
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let mut camera = ReplayCamera::new("/nonexistent/swing.jsonl", false);
        let result = camera.start(&CameraSettings::default());
        assert!(matches!(result, Err(CameraError::Unavailable(_))));
        assert!(!camera.is_active());
    }

    #[test]
    fn test_playback_follows_recorded_timing() {
        let lines = vec![
            recording_line(1000.0, 0.3),
            recording_line(1100.0, 0.4),
            recording_line(1200.0, 0.5),
        ];
        let path = write_recording("timing.jsonl", &lines);

        let mut camera = ReplayCamera::new(&path, false);
        camera.start(&CameraSettings::default()).unwrap();
        assert_eq!(camera.frames.len(), 3);

        let start = camera.started_at.unwrap();
        let first = camera.poll_frame(start).unwrap();
        assert_eq!(first.timestamp_ms, 0.0);
        assert!(camera.poll_frame(start + Duration::from_millis(50)).is_none());

        // 剩余两帧都已到期，只输出最新一帧
        let late = camera.poll_frame(start + Duration::from_millis(250)).unwrap();
        assert_eq!(late.timestamp_ms, 200.0);
        assert_eq!(late.index, 1);

        assert!(camera.poll_frame(start + Duration::from_millis(300)).is_none());
        assert!(camera.poll_frame(start + Duration::from_secs(5)).is_none());
        assert!(camera.is_active());

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_looping_keeps_timestamps_increasing() {
        let lines = vec![recording_line(0.0, 0.3), recording_line(100.0, 0.4)];
        let path = write_recording("loop.jsonl", &lines);

        let mut camera = ReplayCamera::new(&path, true);
        camera.start(&CameraSettings::default()).unwrap();
        let start = camera.started_at.unwrap();

        let mut last = -1.0;
        for ms in [0, 120, 150, 260, 400] {
            if let Some(frame) = camera.poll_frame(start + Duration::from_millis(ms)) {
                assert!(frame.timestamp_ms > last);
                last = frame.timestamp_ms;
            }
        }
        assert!(last > 100.0);

        let _ = std::fs::remove_file(path);
    }
}
