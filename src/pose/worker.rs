use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError, TrySendError};
use log::{debug, info, warn};

use super::{PoseError, PoseProvider};
use crate::config::ChannelConfig;
use crate::types::{PoseResponse, PoseTask, VideoFrame};

/// 已提交的帧超过该时间未应答，不再阻塞新帧
const IN_FLIGHT_TIMEOUT: Duration = Duration::from_secs(2);

pub fn run_pose_worker(
    mut provider: Box<dyn PoseProvider>,
    task_receiver: Receiver<PoseTask>,
    response_sender: Sender<PoseResponse>,
    shutdown_signal: Arc<AtomicBool>,
) {
    info!("Pose worker started with {} provider", provider.name());

    while !shutdown_signal.load(Ordering::Relaxed) {
        match task_receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(PoseTask::Detect { frame, generation }) => {
                let response = match provider.estimate(&frame) {
                    Ok(landmarks) => PoseResponse::detected(generation, frame.index, frame.timestamp_ms, landmarks),
                    Err(e) => PoseResponse::failed(generation, frame.index, frame.timestamp_ms, e),
                };

                match response_sender.try_send(response) {
                    Ok(()) => {}
                    Err(TrySendError::Full(response)) => {
                        warn!("Pose worker: result channel full, dropping frame {}", response.frame_index);
                    }
                    Err(TrySendError::Disconnected(_)) => {
                        info!("Pose worker: result channel disconnected, exiting");
                        break;
                    }
                }
            }
            Ok(PoseTask::Shutdown) => {
                info!("Pose worker: shutdown requested");
                break;
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                info!("Pose worker: task channel disconnected, exiting");
                break;
            }
        }
    }

    info!("Pose worker thread exiting gracefully");
}

/// 启动工作线程并返回 UI 端客户端
pub fn spawn_pose_worker(
    provider: Box<dyn PoseProvider>,
    channels: &ChannelConfig,
    shutdown_signal: Arc<AtomicBool>,
) -> std::io::Result<(PoseClient, JoinHandle<()>)> {
    let (task_sender, task_receiver) = bounded(channels.pose_task_capacity);
    let (response_sender, response_receiver) = bounded(channels.pose_result_capacity);

    let handle = thread::Builder::new()
        .name("pose-worker".to_string())
        .spawn(move || run_pose_worker(provider, task_receiver, response_sender, shutdown_signal))?;

    Ok((PoseClient::new(task_sender, response_receiver), handle))
}

/// 姿态请求/应答的 UI 端
///
/// 同一时间最多一帧在处理中，忙碌时提交的帧会被丢弃
/// 每次重启视频流帧序号都会归零，因此请求带有流编号，
/// 旧视频流的应答直接丢弃
pub struct PoseClient {
    task_sender: Sender<PoseTask>,
    response_receiver: Receiver<PoseResponse>,
    in_flight: Option<(u64, Instant)>,
    generation: u64,
}

impl PoseClient {
    pub fn new(task_sender: Sender<PoseTask>, response_receiver: Receiver<PoseResponse>) -> Self {
        Self {
            task_sender,
            response_receiver,
            in_flight: None,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// 放弃处理中的请求，并忽略其之后到达的应答
    pub fn restart_stream(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.in_flight = None;
    }

    pub fn is_busy(&self, now: Instant) -> bool {
        match self.in_flight {
            Some((_, since)) => now.saturating_duration_since(since) < IN_FLIGHT_TIMEOUT,
            None => false,
        }
    }

    /// 提交一帧，返回是否被接受
    pub fn submit(&mut self, frame: VideoFrame, now: Instant) -> Result<bool, PoseError> {
        if self.is_busy(now) {
            return Ok(false);
        }
        if let Some((index, _)) = self.in_flight {
            warn!("No pose result for frame {} after {:?}, moving on", index, IN_FLIGHT_TIMEOUT);
        }

        let index = frame.index;
        let task = PoseTask::Detect {
            frame,
            generation: self.generation,
        };
        match self.task_sender.try_send(task) {
            Ok(()) => {
                self.in_flight = Some((index, now));
                Ok(true)
            }
            Err(TrySendError::Full(_)) => {
                debug!("Pose task queue full, skipping frame {}", index);
                Ok(false)
            }
            Err(TrySendError::Disconnected(_)) => Err(PoseError::Disconnected),
        }
    }

    /// 获取当前视频流的下一个结果
    pub fn poll(&mut self) -> Result<Option<PoseResponse>, PoseError> {
        loop {
            match self.response_receiver.try_recv() {
                Ok(response) if response.generation != self.generation => {
                    debug!(
                        "Dropping pose result for frame {} from stream {}",
                        response.frame_index, response.generation
                    );
                }
                Ok(response) => {
                    if let Some((index, _)) = self.in_flight {
                        if response.frame_index >= index {
                            self.in_flight = None;
                        }
                    }
                    return Ok(Some(response));
                }
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => return Err(PoseError::Disconnected),
            }
        }
    }

    pub fn shutdown(&self) {
        if let Err(e) = self.task_sender.try_send(PoseTask::Shutdown) {
            debug!("Pose worker shutdown message not queued: {}", e);
        }
    }
}

impl Drop for PoseClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}
