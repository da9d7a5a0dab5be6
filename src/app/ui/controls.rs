use eframe::egui::{self, Rect, Sense, Ui, pos2, vec2};

use super::super::ViewModel;
use super::super::render_utils::weight_color;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Graph Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search (name or trigger)")
            .on_hover_text("Fuzzy-highlight matching nodes without changing the layout.");
        ui.text_edit_singleline(&mut self.search)
            .on_hover_text("Type to highlight matches, then click a node to select it.");

        ui.separator();

        ui.checkbox(&mut self.live_physics, "Live physics simulation")
            .on_hover_text("Continuously run the force layout while viewing the graph.");

        let Some(session) = self.session.as_mut() else {
            ui.add_space(6.0);
            ui.label("Layout parameters appear once the graph is on screen.");
            return;
        };

        ui.add_space(4.0);
        ui.add(
            egui::Slider::new(&mut session.params.repulsion, 1_000.0..=50_000.0)
                .text("Repulsion")
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text("How strongly nodes push away from each other.");

        ui.add(
            egui::Slider::new(&mut session.params.attraction, 0.001..=0.05)
                .text("Attraction")
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text("How strongly synergy edges pull their endpoints together.");

        ui.add(
            egui::Slider::new(&mut session.params.ideal_length, 40.0..=400.0)
                .text("Ideal edge length")
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text("Distance at which the edge spring rests.");

        ui.add(
            egui::Slider::new(&mut session.params.damping, 0.5..=0.99)
                .text("Damping")
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text("Fraction of the accumulated displacement applied each tick.");

        ui.separator();
        ui.label("Weight colors (1-30)");
        draw_weight_legend(ui);
    }
}

fn draw_weight_legend(ui: &mut Ui) {
    let width = ui.available_width().min(220.0);
    let (rect, _response) = ui.allocate_exact_size(vec2(width, 14.0), Sense::hover());
    let painter = ui.painter_at(rect);

    let steps = 30;
    let step_width = rect.width() / steps as f32;
    for step in 0..steps {
        let cell = Rect::from_min_size(
            pos2(rect.left() + step as f32 * step_width, rect.top()),
            vec2(step_width + 0.5, rect.height()),
        );
        painter.rect_filled(cell, 0.0, weight_color(step + 1));
    }
}
