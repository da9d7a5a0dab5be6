use eframe::egui::{Pos2, Vec2};

use super::camera::{Camera, ZoomDirection};
use super::graph::{AbilityNode, SynergyGraph};
use super::physics::{self, LayoutParams};

#[derive(Clone, Debug)]
pub(super) enum PointerMode {
    Idle,
    Dragging { name: String, grab_offset: Vec2 },
    Panning { last_screen: Pos2 },
}

/// Everything the canvas needs for one drawing surface: the store, the
/// camera, the pointer mode and the current selection.
pub(super) struct GraphSession {
    pub(super) graph: SynergyGraph,
    pub(super) camera: Camera,
    pub(super) params: LayoutParams,
    pointer: PointerMode,
    selected: Option<String>,
    world: Vec2,
}

impl GraphSession {
    pub(super) fn new(graph: SynergyGraph, world: Vec2) -> Self {
        Self {
            graph,
            camera: Camera::default(),
            params: LayoutParams::default(),
            pointer: PointerMode::Idle,
            selected: None,
            world,
        }
    }

    pub(super) fn world(&self) -> Vec2 {
        self.world
    }

    /// Adopts new surface dimensions. Camera, pointer mode and selection are
    /// reset; node positions are kept and the next tick clamps them into the
    /// new bounds.
    pub(super) fn resize(&mut self, world: Vec2) {
        self.world = world;
        self.camera = Camera::default();
        self.pointer = PointerMode::Idle;
        self.selected = None;
    }

    pub(super) fn tick(&mut self) {
        let dragged = match &self.pointer {
            PointerMode::Dragging { name, .. } => Some(name.clone()),
            _ => None,
        };
        physics::step(&mut self.graph, &self.params, dragged.as_deref(), self.world);
    }

    pub(super) fn pointer_down(&mut self, screen: Pos2) {
        let world = self.camera.screen_to_world(screen);
        if let Some(node) = self.graph.hit_test(world) {
            let name = node.name.clone();
            let grab_offset = world - node.pos;
            self.selected = Some(name.clone());
            self.pointer = PointerMode::Dragging { name, grab_offset };
        } else {
            self.selected = None;
            self.pointer = PointerMode::Panning {
                last_screen: screen,
            };
        }
    }

    pub(super) fn pointer_move(&mut self, screen: Pos2) {
        match &mut self.pointer {
            PointerMode::Idle => {}
            PointerMode::Dragging { name, grab_offset } => {
                let world = self.camera.screen_to_world(screen) - *grab_offset;
                if let Some(node) = self.graph.node_mut(name) {
                    node.pos = physics::clamp_to_world(world, node.radius, self.world);
                }
            }
            PointerMode::Panning { last_screen } => {
                let delta = screen - *last_screen;
                *last_screen = screen;
                self.camera.pan_by(delta);
            }
        }
    }

    /// Both release and leaving the surface end the gesture. Selection stays.
    pub(super) fn pointer_up(&mut self) {
        self.pointer = PointerMode::Idle;
    }

    pub(super) fn pointer_leave(&mut self) {
        self.pointer = PointerMode::Idle;
    }

    /// Zoom applies in every pointer mode without ending the gesture.
    pub(super) fn wheel(&mut self, anchor: Pos2, direction: ZoomDirection) {
        self.camera.zoom(anchor, direction);
    }

    pub(super) fn reset_view(&mut self) {
        self.camera = Camera::default();
    }

    pub(super) fn set_selected(&mut self, selected: Option<String>) {
        self.selected = selected;
    }

    pub(super) fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub(super) fn selected_node(&self) -> Option<&AbilityNode> {
        self.selected.as_deref().and_then(|name| self.graph.node(name))
    }

    pub(super) fn dragged_name(&self) -> Option<&str> {
        match &self.pointer {
            PointerMode::Dragging { name, .. } => Some(name),
            _ => None,
        }
    }

    pub(super) fn is_panning(&self) -> bool {
        matches!(self.pointer, PointerMode::Panning { .. })
    }

    pub(super) fn is_interacting(&self) -> bool {
        !matches!(self.pointer, PointerMode::Idle)
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use crate::data::AbilityRow;

    use super::*;

    fn row(name: &str) -> AbilityRow {
        AbilityRow {
            name: name.to_string(),
            ability: String::new(),
            trigger: String::new(),
            weight: 1,
        }
    }

    fn session_with(positions: &[(&str, f32, f32)]) -> GraphSession {
        let world = vec2(800.0, 600.0);
        let mut graph = SynergyGraph::new();
        for &(name, x, y) in positions {
            graph.add_node(&row(name), world);
            graph.node_mut(name).unwrap().pos = pos2(x, y);
        }
        GraphSession::new(graph, world)
    }

    #[test]
    fn pressing_a_node_starts_a_drag_and_selects_it() {
        let mut session = session_with(&[("A", 100.0, 100.0)]);

        session.pointer_down(pos2(108.0, 100.0));

        assert_eq!(session.dragged_name(), Some("A"));
        assert_eq!(session.selected_name(), Some("A"));
    }

    #[test]
    fn dragging_keeps_the_grab_offset() {
        let mut session = session_with(&[("A", 100.0, 100.0)]);

        session.pointer_down(pos2(108.0, 100.0));
        session.pointer_move(pos2(408.0, 300.0));

        assert_eq!(session.graph.node("A").unwrap().pos, pos2(400.0, 300.0));
    }

    #[test]
    fn dragging_clamps_to_the_world_bounds() {
        let mut session = session_with(&[("A", 100.0, 100.0)]);
        let radius = session.graph.node("A").unwrap().radius;

        session.pointer_down(pos2(100.0, 100.0));
        session.pointer_move(pos2(-300.0, 5000.0));

        let pos = session.graph.node("A").unwrap().pos;
        assert_eq!(pos, pos2(radius, 600.0 - radius));
    }

    #[test]
    fn pressing_empty_space_clears_selection_and_pans() {
        let mut session = session_with(&[("A", 100.0, 100.0)]);
        session.set_selected(Some("A".to_string()));

        session.pointer_down(pos2(500.0, 500.0));
        assert!(session.is_panning());
        assert_eq!(session.selected_name(), None);

        session.pointer_move(pos2(510.0, 495.0));
        session.pointer_move(pos2(520.0, 490.0));
        assert_eq!(session.camera.offset, vec2(20.0, -10.0));
    }

    #[test]
    fn hit_testing_honors_the_camera() {
        let mut session = session_with(&[("A", 100.0, 100.0)]);
        session.camera.offset = vec2(50.0, -20.0);
        session.camera.scale = 2.0;

        // node center lands at 100 * 2 + offset on screen
        session.pointer_down(pos2(250.0, 180.0));

        assert_eq!(session.dragged_name(), Some("A"));
    }

    #[test]
    fn release_ends_the_gesture_but_keeps_selection() {
        let mut session = session_with(&[("A", 100.0, 100.0)]);

        session.pointer_down(pos2(100.0, 100.0));
        session.pointer_up();

        assert!(!session.is_interacting());
        assert_eq!(session.selected_name(), Some("A"));

        // moves after release must not touch the node
        session.pointer_move(pos2(300.0, 300.0));
        assert_eq!(session.graph.node("A").unwrap().pos, pos2(100.0, 100.0));
    }

    #[test]
    fn leaving_the_surface_cancels_a_pan() {
        let mut session = session_with(&[("A", 100.0, 100.0)]);

        session.pointer_down(pos2(500.0, 500.0));
        session.pointer_leave();

        assert!(!session.is_interacting());
        session.pointer_move(pos2(600.0, 600.0));
        assert_eq!(session.camera.offset, vec2(0.0, 0.0));
    }

    #[test]
    fn overlapping_nodes_resolve_to_the_first_inserted() {
        let mut session = session_with(&[("First", 100.0, 100.0), ("Second", 100.0, 100.0)]);

        session.pointer_down(pos2(100.0, 100.0));

        assert_eq!(session.dragged_name(), Some("First"));
    }

    #[test]
    fn wheel_zooms_without_ending_a_drag() {
        let mut session = session_with(&[("A", 100.0, 100.0)]);

        session.pointer_down(pos2(100.0, 100.0));
        session.wheel(pos2(100.0, 100.0), ZoomDirection::Out);

        assert_eq!(session.dragged_name(), Some("A"));
        assert!((session.camera.scale - 1.0 / 1.1).abs() < 1e-3);
    }

    #[test]
    fn two_wheel_downs_zoom_out_twice() {
        let mut session = session_with(&[("A", 100.0, 100.0)]);

        session.wheel(pos2(400.0, 300.0), ZoomDirection::Out);
        session.wheel(pos2(400.0, 300.0), ZoomDirection::Out);

        assert!((session.camera.scale - 1.0 / 1.21).abs() < 1e-3);
    }

    #[test]
    fn resize_resets_view_state_but_keeps_positions() {
        let mut session = session_with(&[("A", 100.0, 100.0)]);
        session.set_selected(Some("A".to_string()));
        session.pointer_down(pos2(500.0, 500.0));
        session.pointer_move(pos2(530.0, 520.0));
        session.wheel(pos2(400.0, 300.0), ZoomDirection::In);

        session.resize(vec2(400.0, 300.0));

        assert_eq!(session.world(), vec2(400.0, 300.0));
        assert_eq!(session.camera, Camera::default());
        assert_eq!(session.selected_name(), None);
        assert!(!session.is_interacting());
        assert_eq!(session.graph.node("A").unwrap().pos, pos2(100.0, 100.0));
    }

    #[test]
    fn tick_never_moves_the_dragged_node() {
        let mut session = session_with(&[("A", 100.0, 100.0), ("B", 110.0, 100.0)]);

        session.pointer_down(pos2(100.0, 100.0));
        session.tick();

        assert_eq!(session.graph.node("A").unwrap().pos, pos2(100.0, 100.0));
        assert!(session.graph.node("B").unwrap().pos != pos2(110.0, 100.0));
    }

    #[test]
    fn selection_survives_a_full_drag_cycle() {
        let mut session = session_with(&[("A", 100.0, 100.0)]);

        session.pointer_down(pos2(100.0, 100.0));
        session.pointer_move(pos2(200.0, 200.0));
        session.pointer_up();

        assert_eq!(session.selected_name(), Some("A"));
        assert_eq!(session.selected_node().map(|node| node.name.as_str()), Some("A"));
    }
}
