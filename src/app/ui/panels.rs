use eframe::egui::{self, Align, Context, Layout};

use crate::data::AbilityRow;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(rows: Vec<AbilityRow>) -> Self {
        Self {
            rows,
            session: None,
            live_physics: true,
            search: String::new(),
            search_match_cache: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        data_path: &str,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("synergy-graph");
                    ui.separator();
                    ui.label(format!("data: {data_path}"));
                    match &self.session {
                        Some(session) => {
                            ui.label(format!("nodes: {}", session.graph.nodes.len()));
                            ui.label(format!("edges: {}", session.graph.edges.len()));
                        }
                        None => {
                            ui.label(format!("rows: {}", self.rows.len()));
                        }
                    }

                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload data"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Reset view").clicked()
                        && let Some(session) = &mut self.session
                    {
                        session.reset_view();
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(session) = &self.session {
                            ui.label(format!("zoom {:.2}x", session.camera.scale));
                            if let Some(name) = session.selected_name() {
                                ui.label(format!("selected: {name}"));
                            }
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading ability data...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<String>) {
        if let Some(session) = &mut self.session {
            session.set_selected(selected);
        }
    }
}
