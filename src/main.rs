mod analysis;
mod app;
mod camera;
mod config;
mod logger;
mod plotter;
mod pose;
mod types;
mod utils;

use std::env;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use dotenv::dotenv;
use eframe::egui;
use log::{error, info};

use app::SwingApp;
use config::{ConfigManager, DEFAULT_CONFIG_PATH};
use pose::{spawn_pose_worker, PassthroughProvider};

fn main() {
    dotenv().ok();
    logger::init_logger();
    info!("SwingHub starting");

    let config_path = env::var("SWINGHUB_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = ConfigManager::load_or_default(&config_path);
    let app_config = config.get_config().clone();

    let shutdown_signal = Arc::new(AtomicBool::new(false));
    let provider = Box::new(PassthroughProvider::new(&app_config.detection));
    let (pose_client, pose_handle) =
        match spawn_pose_worker(provider, &app_config.channels, Arc::clone(&shutdown_signal)) {
            Ok(worker) => worker,
            Err(e) => {
                error!("Failed to start pose worker: {}", e);
                std::process::exit(1);
            }
        };

    let window = &app_config.window;
    let options = eframe::NativeOptions {
        vsync: window.vsync,
        hardware_acceleration: if window.hardware_acceleration {
            eframe::HardwareAcceleration::Preferred
        } else {
            eframe::HardwareAcceleration::Off
        },
        renderer: eframe::Renderer::Glow,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window.width, window.height])
            .with_title(window.title.clone())
            .with_resizable(window.resizable),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        &window.title,
        options,
        Box::new(move |_cc| Ok(Box::new(SwingApp::new(config, pose_client)))),
    ) {
        error!("GUI failed: {}", e);
        shutdown_signal.store(true, Ordering::Relaxed);
        std::process::exit(1);
    }

    info!("GUI closed, signaling pose worker to shut down");
    shutdown_signal.store(true, Ordering::Relaxed);

    match pose_handle.join() {
        Ok(()) => info!("Pose worker shut down gracefully"),
        Err(e) => error!("Pose worker panicked: {:?}", e),
    }
}
