use std::f64::consts::{FRAC_PI_2, TAU};

use egui::Color32;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotBounds, PlotPoints, Polygon};

use crate::analysis::insights::{PRO_TARGET, RADAR_LABELS};
use crate::config::OverlayConfig;
use crate::types::{SwingMetrics, SwingRecord};

/// 固定宽度的刻度标签，避免绘图区域跳动
fn format_fixed_width_y_label(value: f64) -> String {
    let abs_value = value.abs();
    if abs_value >= 1000.0 {
        format!("{:-6.1e}", value)
    } else if abs_value >= 100.0 {
        format!("{:-6.0}", value)
    } else if abs_value >= 10.0 {
        format!("{:-6.1}", value)
    } else {
        format!("{:-6.2}", value)
    }
}

/// 挥杆中的手腕位置，按画面百分比缩放
pub fn wrist_trajectory(record: &SwingRecord) -> Vec<[f64; 2]> {
    record
        .wrist_keypoints()
        .map(|kp| [kp.x * 100.0, kp.y * 100.0])
        .collect()
}

/// 五个 0-100 数值的闭合雷达轮廓，第一轴朝上
pub fn radar_points(values: &[f64; 5]) -> Vec<[f64; 2]> {
    let step = TAU / values.len() as f64;
    let mut points: Vec<[f64; 2]> = values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let angle = FRAC_PI_2 - i as f64 * step;
            [value * angle.cos(), value * angle.sin()]
        })
        .collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

#[derive(Debug, Clone)]
pub struct SwingCharts {
    trajectory_color: Color32,
    target_color: Color32,
}

impl SwingCharts {
    pub fn new(config: &OverlayConfig) -> Self {
        let rgb = |c: [u8; 3]| Color32::from_rgb(c[0], c[1], c[2]);
        Self {
            trajectory_color: rgb(config.trajectory),
            target_color: rgb(config.target),
        }
    }

    pub fn trajectory_ui(&self, ui: &mut egui::Ui, record: &SwingRecord) {
        let points = wrist_trajectory(record);
        if points.is_empty() {
            ui.label("No wrist samples in this swing.");
            return;
        }

        let (x_min, x_max, y_min, y_max) = points.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(x0, x1, y0, y1), p| (x0.min(p[0]), x1.max(p[0]), y0.min(p[1]), y1.max(p[1])),
        );
        let x_pad = (x_max - x_min).max(1.0) * 0.05;
        let y_pad = (y_max - y_min).max(1.0) * 0.05;

        Plot::new("wrist_trajectory")
            .height(220.0)
            .x_axis_formatter(|v, _| format!("{:.0}", v.value))
            .y_axis_formatter(|v, _| format_fixed_width_y_label(v.value))
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                    [x_min - x_pad, y_min - y_pad],
                    [x_max + x_pad, y_max + y_pad],
                ));
                plot_ui.line(
                    Line::new("Wrist Trajectory", PlotPoints::from(points))
                        .color(self.trajectory_color)
                        .width(2.0),
                );
            });
    }

    pub fn radar_ui(&self, ui: &mut egui::Ui, metrics: &SwingMetrics) {
        let current = radar_points(&metrics.components());
        let target = radar_points(&PRO_TARGET);
        let grid = Color32::from_gray(200);

        Plot::new("performance_radar")
            .height(260.0)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([-110.0, -110.0], [110.0, 110.0]));

                for ring in [20.0, 40.0, 60.0, 80.0, 100.0] {
                    plot_ui.line(Line::new("", PlotPoints::from(radar_points(&[ring; 5]))).color(grid).width(0.5));
                }
                for spoke in radar_points(&[100.0; 5]).iter().take(5) {
                    plot_ui.line(Line::new("", PlotPoints::from(vec![[0.0, 0.0], *spoke])).color(grid).width(0.5));
                }

                plot_ui.polygon(
                    Polygon::new("Target (Pro Level)", PlotPoints::from(target))
                        .fill_color(self.target_color.gamma_multiply(0.1))
                        .stroke(egui::Stroke::new(1.0, self.target_color.gamma_multiply(0.5))),
                );
                plot_ui.line(
                    Line::new("Target (Pro Level)", PlotPoints::from(radar_points(&PRO_TARGET)))
                        .color(self.target_color.gamma_multiply(0.5))
                        .style(LineStyle::dashed_loose()),
                );
                plot_ui.polygon(
                    Polygon::new("Current Swing", PlotPoints::from(current))
                        .fill_color(self.trajectory_color.gamma_multiply(0.2))
                        .stroke(egui::Stroke::new(2.0, self.trajectory_color)),
                );
            });

        egui::Grid::new("radar_values").striped(true).show(ui, |ui| {
            for ((label, value), target) in RADAR_LABELS.iter().zip(metrics.components()).zip(PRO_TARGET) {
                ui.label(*label);
                ui.label(format!("{:.0}", value));
                ui.weak(format!("target {:.0}", target));
                ui.end_row();
            }
        });
    }
}
