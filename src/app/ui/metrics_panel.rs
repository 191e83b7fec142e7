use eframe::egui;

use crate::analysis::insights::{performance_level, swing_commentary, weighted_swing_score, ScoreBand};
use crate::app::app_core::SwingApp;
use crate::types::SwingRecord;
use crate::utils::{format_angle, format_speed, format_time, format_timestamp};

pub fn render_metrics_panel(app: &mut SwingApp, ctx: &egui::Context) {
    egui::SidePanel::right("metrics_panel")
        .resizable(true)
        .default_width(360.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(8.0);
                ui.heading("📊 Swing Metrics");

                match &app.state.swing {
                    Some(swing) => render_swing_metrics(ui, swing),
                    None => {
                        ui.weak("No swing data available. Record a swing to see analysis.");
                    }
                }
            });
        });
}

fn score_color(score: f64) -> egui::Color32 {
    let [r, g, b] = ScoreBand::from_score(score).rgb();
    egui::Color32::from_rgb(r, g, b)
}

fn metric_card(ui: &mut egui::Ui, value: String, label: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(150.0);
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(value).size(20.0).strong());
            ui.weak(label);
        });
    });
}

fn render_swing_metrics(ui: &mut egui::Ui, swing: &SwingRecord) {
    egui::Grid::new("metric_cards").num_columns(2).spacing([8.0, 8.0]).show(ui, |ui| {
        metric_card(ui, format_speed(swing.ball_speed), "Ball Speed");
        metric_card(ui, format_speed(swing.club_head_speed), "Club Speed");
        ui.end_row();
        metric_card(ui, format_time(swing.swing_tempo), "Total Time");
        metric_card(ui, format_time(swing.backswing_time), "Backswing");
        ui.end_row();
        metric_card(ui, format_time(swing.downswing_time), "Downswing");
        metric_card(ui, format_angle(swing.impact_angle), "Impact Angle");
        ui.end_row();
        metric_card(ui, format_angle(swing.swing_plane.angle), "Swing Plane");
        metric_card(ui, format!("{:.0}%", swing.swing_plane.consistency * 100.0), "Consistency");
        ui.end_row();
    });

    ui.add_space(10.0);
    ui.heading("Swing Scores");
    let metrics = &swing.metrics;
    egui::Grid::new("swing_scores").num_columns(3).striped(true).show(ui, |ui| {
        for (label, score) in [
            ("Overall Score", metrics.overall_score),
            ("Timing", metrics.timing),
            ("Balance", metrics.balance),
            ("Consistency", metrics.consistency),
            ("Power", metrics.power),
            ("Tempo", metrics.tempo),
        ] {
            ui.label(format!("{}:", label));
            ui.colored_label(score_color(score), format!("{:.0}/100", score.round()));
            ui.add(
                egui::ProgressBar::new((score / 100.0).clamp(0.0, 1.0) as f32)
                    .desired_width(100.0)
                    .fill(score_color(score))
                    .text(ScoreBand::from_score(score).label()),
            );
            ui.end_row();
        }
    });

    ui.add_space(10.0);
    let weighted = weighted_swing_score(swing);
    ui.horizontal(|ui| {
        ui.label("Swing Score:");
        ui.colored_label(score_color(weighted), egui::RichText::new(format!("{:.0}", weighted)).strong());
        ui.separator();
        ui.label(performance_level(weighted));
    });

    ui.add_space(10.0);
    ui.heading("Quick Analysis");
    ui.label(swing_commentary(swing));

    ui.add_space(6.0);
    ui.weak(format!("Swing {} · {}", swing.id, format_timestamp(swing.created_at)));
}
