use eframe::egui;

use crate::analysis::insights::{impact_insight, plane_insight, power_insight, recommendations, tempo_insight};
use crate::app::app_core::SwingApp;

pub fn render_swing_analyzer(app: &SwingApp, ui: &mut egui::Ui) {
    ui.heading("📈 Swing Analysis");

    let Some(swing) = &app.state.swing else {
        ui.weak("Record a swing to see detailed analysis charts.");
        return;
    };

    ui.columns(2, |columns| {
        columns[0].label(egui::RichText::new("Swing Path").strong());
        app.charts.trajectory_ui(&mut columns[0], swing);

        columns[1].label(egui::RichText::new("Performance Metrics").strong());
        app.charts.radar_ui(&mut columns[1], &swing.metrics);
    });

    ui.add_space(10.0);
    ui.heading("🔍 Key Insights");
    egui::Grid::new("insight_cards").num_columns(2).spacing([12.0, 8.0]).show(ui, |ui| {
        insight_card(ui, "Swing Plane", plane_insight(swing));
        insight_card(ui, "Tempo", tempo_insight(swing));
        ui.end_row();
        insight_card(ui, "Power", power_insight(swing));
        insight_card(ui, "Impact", impact_insight(swing));
        ui.end_row();
    });

    ui.add_space(10.0);
    ui.heading("🎯 Practice Recommendations");
    let items = recommendations(swing);
    if items.is_empty() {
        ui.label("Great swing! Keep practicing to maintain consistency.");
    } else {
        for item in items {
            ui.label(format!("• {}", item));
        }
    }
}

fn insight_card(ui: &mut egui::Ui, title: &str, text: String) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(280.0);
        ui.label(egui::RichText::new(title).strong());
        ui.label(text);
    });
}
