use eframe::egui::{self, RichText, Ui};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Selection Details");
        ui.add_space(6.0);

        let Some(session) = self.session.as_ref() else {
            ui.label("Click a node in the graph to inspect it.");
            return;
        };
        let Some(selected_name) = session.selected_name() else {
            ui.label("Click a node in the graph to inspect it.");
            return;
        };
        let Some(node) = session.graph.node(selected_name) else {
            ui.label("Selected node no longer exists.");
            return;
        };

        let name = node.name.clone();
        let ability = node.ability.clone();
        let trigger = node.trigger.clone();
        let weight = node.weight;
        let mut triggered: Vec<String> = node.outgoing.iter().cloned().collect();
        triggered.sort();
        let mut triggered_by: Vec<String> = node.incoming.iter().cloned().collect();
        triggered_by.sort();

        ui.label(RichText::new(name.as_str()).strong());
        ui.add_space(6.0);
        ui.label(format!("Weight: {weight}"));
        if trigger.is_empty() {
            ui.label("Trigger: (none)");
        } else {
            ui.label(format!("Trigger: {trigger}"));
        }

        ui.separator();
        ui.label(RichText::new("Ability").strong());
        if ability.is_empty() {
            ui.label("(no ability text)");
        } else {
            ui.label(ability.as_str());
        }

        ui.separator();
        ui.label(RichText::new(format!("Triggers ({})", triggered.len())).strong());
        if triggered.is_empty() {
            ui.label("Sets off nothing else.");
        } else {
            egui::ScrollArea::vertical()
                .id_salt("triggered_scroll")
                .max_height(180.0)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for other in &triggered {
                        if ui.link(other.as_str()).clicked() {
                            self.set_selected(Some(other.clone()));
                        }
                    }
                });
        }

        ui.separator();
        ui.label(RichText::new(format!("Triggered by ({})", triggered_by.len())).strong());
        if triggered_by.is_empty() {
            ui.label("Nothing else sets this off.");
        } else {
            egui::ScrollArea::vertical()
                .id_salt("triggered_by_scroll")
                .max_height(180.0)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for other in &triggered_by {
                        if ui.link(other.as_str()).clicked() {
                            self.set_selected(Some(other.clone()));
                        }
                    }
                });
        }
    }
}
