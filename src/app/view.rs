use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::camera::ZoomDirection;
use super::graph::SynergyGraph;
use super::render_utils::{blend_color, dim_color, draw_background};
use super::session::GraphSession;
use super::{SearchMatchCache, ViewModel};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    /// The session is created on the first frame, once the canvas rect is
    /// known; a later dimension change re-initializes the view state.
    fn ensure_session(&mut self, surface: Vec2) {
        match &mut self.session {
            None => {
                let graph = SynergyGraph::from_rows(&self.rows, surface);
                self.session = Some(GraphSession::new(graph, surface));
            }
            Some(session) => {
                if (session.world() - surface).length() > 0.5 {
                    session.resize(surface);
                }
            }
        }
    }

    fn cached_search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        let session = self.session.as_ref()?;
        if session.selected_name().is_some() {
            return None;
        }

        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matcher = SkimMatcherV2::default();
        let matches = session
            .graph
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let name_hit = fuzzy_match_score(&matcher, &node.name, query).is_some();
                let trigger_hit = !node.trigger.is_empty()
                    && fuzzy_match_score(&matcher, &node.trigger, query).is_some();
                if name_hit || trigger_hit {
                    Some(index)
                } else {
                    None
                }
            })
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }

    fn handle_canvas_input(
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
        session: &mut GraphSession,
    ) {
        let (pressed, released, hover_pos, scroll) = ui.input(|input| {
            (
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
                input.pointer.hover_pos(),
                input.raw_scroll_delta.y,
            )
        });

        let surface_pos = |screen: Pos2| screen - rect.min.to_vec2();

        if pressed
            && response.hovered()
            && let Some(pos) = hover_pos
            && rect.contains(pos)
        {
            session.pointer_down(surface_pos(pos));
        }

        match hover_pos {
            Some(pos) if rect.contains(pos) => session.pointer_move(surface_pos(pos)),
            _ => session.pointer_leave(),
        }

        if released {
            session.pointer_up();
        }

        if scroll != 0.0
            && response.hovered()
            && let Some(pos) = hover_pos
        {
            let direction = if scroll > 0.0 {
                ZoomDirection::In
            } else {
                ZoomDirection::Out
            };
            session.wheel(surface_pos(pos), direction);
        }
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        self.ensure_session(rect.size());
        let live_physics = self.live_physics;

        if let Some(session) = self.session.as_mut() {
            Self::handle_canvas_input(ui, rect, &response, session);
            if live_physics {
                session.tick();
            }
        }

        let search_matches = self.cached_search_matches();
        let Some(session) = self.session.as_ref() else {
            return;
        };

        let camera = session.camera;
        let scale = camera.scale;
        draw_background(&painter, rect, camera.offset, scale);

        let to_screen = |world: Pos2| rect.min + camera.world_to_screen(world).to_vec2();

        let hovered_name = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pos| rect.contains(*pos))
            .and_then(|pos| {
                let world = camera.screen_to_world(pos - rect.min.to_vec2());
                session.graph.hit_test(world).map(|node| node.name.clone())
            });

        if hovered_name.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let selected = session.selected_name().map(str::to_string);
        let selected_node = session.selected_node();
        let selection_active = selected.is_some();
        let search_active = search_matches
            .as_ref()
            .is_some_and(|matches| !matches.is_empty());

        let zoom_sqrt = scale.sqrt();
        for edge in &session.graph.edges {
            let (Some(source), Some(target)) = (
                session.graph.node(&edge.source),
                session.graph.node(&edge.target),
            ) else {
                continue;
            };

            let start = to_screen(source.pos);
            let end = to_screen(target.pos);

            let is_outgoing = selected.as_deref() == Some(edge.source.as_str());
            let is_incoming = selected.as_deref() == Some(edge.target.as_str());

            let (line_width, line_color) = if is_outgoing {
                (
                    (2.5 * zoom_sqrt).clamp(1.2, 4.4),
                    Color32::from_rgb(241, 146, 94),
                )
            } else if is_incoming {
                (
                    (2.5 * zoom_sqrt).clamp(1.2, 4.4),
                    Color32::from_rgb(246, 206, 104),
                )
            } else if selection_active {
                (
                    (0.82 * zoom_sqrt).clamp(0.45, 2.0),
                    Color32::from_rgba_unmultiplied(80, 90, 104, 140),
                )
            } else {
                (
                    (1.18 * zoom_sqrt).clamp(0.60, 3.4),
                    Color32::from_rgba_unmultiplied(72, 72, 72, 200),
                )
            };

            painter.line_segment([start, end], Stroke::new(line_width, line_color));
        }

        let selected_color = Color32::from_rgb(245, 206, 93);
        let mut selection_animating = false;

        for (index, node) in session.graph.nodes.iter().enumerate() {
            let position = to_screen(node.pos);
            let radius = node.radius * scale;

            let is_selected = selected.as_deref() == Some(node.name.as_str());
            let is_hovered = hovered_name.as_deref() == Some(node.name.as_str());
            let is_triggered = selected_node.is_some_and(|s| s.outgoing.contains(&node.name));
            let is_triggering = selected_node.is_some_and(|s| s.incoming.contains(&node.name));
            let is_match = search_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index));

            let unselected_color = if is_hovered {
                Color32::from_rgb(255, 164, 101)
            } else if is_triggered {
                blend_color(node.color, Color32::from_rgb(246, 137, 92), 0.60)
            } else if is_triggering {
                blend_color(node.color, Color32::from_rgb(246, 206, 104), 0.60)
            } else if is_match {
                blend_color(node.color, Color32::from_rgb(103, 196, 255), 0.68)
            } else if selection_active {
                dim_color(node.color, 0.52)
            } else if search_active {
                dim_color(node.color, 0.38)
            } else {
                node.color
            };

            let selection_mix = ui.ctx().animate_bool(
                ui.make_persistent_id(("node-selection", node.name.as_str())),
                is_selected,
            );
            if selection_mix > 0.0 && selection_mix < 1.0 {
                selection_animating = true;
            }

            let color = blend_color(unselected_color, selected_color, selection_mix);

            painter.circle_filled(position, radius, color);
            if selection_mix > 0.0 {
                let halo_strength = (selection_mix * (1.0 - selection_mix) * 4.0).clamp(0.0, 1.0);
                let halo_alpha = (30.0 + (halo_strength * 145.0)) as u8;
                painter.circle_stroke(
                    position,
                    radius + 4.0 + ((1.0 - selection_mix) * 6.0),
                    Stroke::new(
                        1.0 + (halo_strength * 1.6),
                        Color32::from_rgba_unmultiplied(245, 206, 93, halo_alpha),
                    ),
                );
            }

            let stroke_width = if is_match { 1.55 } else { 1.0 } + (selection_mix * 1.2);
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(
                    stroke_width,
                    Color32::from_rgba_unmultiplied(15, 15, 15, 190),
                ),
            );

            let highlighted = is_selected || is_triggered || is_triggering;
            let should_draw_label =
                highlighted || is_hovered || (is_match && scale > 0.35) || scale > 1.1;
            if should_draw_label {
                painter.text(
                    position + vec2(radius + 5.0, 0.0),
                    Align2::LEFT_CENTER,
                    node.name.as_str(),
                    FontId::proportional(12.0),
                    Color32::from_gray(238),
                );
            }
        }

        if let Some(name) = &hovered_name
            && let Some(node) = session.graph.node(name)
        {
            let info = format!(
                "{}  |  weight {}  |  triggers {}  |  triggered by {}",
                node.name,
                node.weight,
                node.outgoing.len(),
                node.incoming.len()
            );
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                info,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        if selection_animating || live_physics || session.is_interacting() {
            ui.ctx().request_repaint();
        }
    }
}
