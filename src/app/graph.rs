use std::collections::{HashMap, HashSet};

use eframe::egui::{Color32, Pos2, Vec2, pos2};
use rand::Rng;

use crate::data::AbilityRow;

use super::render_utils::{NODE_RADIUS, weight_color};

#[derive(Clone, Debug)]
pub struct AbilityNode {
    pub name: String,
    pub ability: String,
    pub trigger: String,
    pub weight: i32,
    pub pos: Pos2,
    pub disp: Vec2,
    pub radius: f32,
    pub color: Color32,
    pub outgoing: HashSet<String>,
    pub incoming: HashSet<String>,
}

#[derive(Clone, Debug)]
pub struct SynergyEdge {
    pub source: String,
    pub target: String,
}

#[derive(Clone, Debug, Default)]
pub struct SynergyGraph {
    pub nodes: Vec<AbilityNode>,
    pub edges: Vec<SynergyEdge>,
    index_by_name: HashMap<String, usize>,
}

impl SynergyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the store from parsed rows and derives one directed edge
    /// A -> B for every pair where B's trigger appears in A's ability text.
    pub fn from_rows(rows: &[AbilityRow], world: Vec2) -> Self {
        let mut graph = Self::new();
        for row in rows {
            graph.add_node(row, world);
        }

        let mut derived = Vec::new();
        for source in &graph.nodes {
            for target in &graph.nodes {
                if source.name != target.name
                    && !target.trigger.is_empty()
                    && source.ability.contains(&target.trigger)
                {
                    derived.push((source.name.clone(), target.name.clone()));
                }
            }
        }
        for (source, target) in derived {
            graph.add_edge(&source, &target);
        }

        graph
    }

    /// First write wins: a row whose name is already present is dropped.
    pub fn add_node(&mut self, row: &AbilityRow, world: Vec2) {
        if self.index_by_name.contains_key(&row.name) {
            return;
        }

        let mut rng = rand::thread_rng();
        let pos = pos2(
            rng.gen_range(0.0..world.x.max(1.0)),
            rng.gen_range(0.0..world.y.max(1.0)),
        );

        self.index_by_name.insert(row.name.clone(), self.nodes.len());
        self.nodes.push(AbilityNode {
            name: row.name.clone(),
            ability: row.ability.clone(),
            trigger: row.trigger.clone(),
            weight: row.weight,
            pos,
            disp: Vec2::ZERO,
            radius: NODE_RADIUS,
            color: weight_color(row.weight),
            outgoing: HashSet::new(),
            incoming: HashSet::new(),
        });
    }

    /// Edges whose endpoints are not both present are dropped silently.
    pub fn add_edge(&mut self, source: &str, target: &str) {
        let (Some(&source_index), Some(&target_index)) = (
            self.index_by_name.get(source),
            self.index_by_name.get(target),
        ) else {
            return;
        };

        self.edges.push(SynergyEdge {
            source: source.to_string(),
            target: target.to_string(),
        });
        self.nodes[source_index].outgoing.insert(target.to_string());
        self.nodes[target_index].incoming.insert(source.to_string());
    }

    pub fn node(&self, name: &str) -> Option<&AbilityNode> {
        self.index_by_name.get(name).map(|&index| &self.nodes[index])
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut AbilityNode> {
        let index = self.index_by_name.get(name).copied()?;
        Some(&mut self.nodes[index])
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index_by_name.get(name).copied()
    }

    /// Walks nodes in insertion order and returns the first one whose disc
    /// contains the world-space point.
    pub fn hit_test(&self, world: Pos2) -> Option<&AbilityNode> {
        self.nodes
            .iter()
            .find(|node| node.pos.distance(world) <= node.radius)
    }
}
