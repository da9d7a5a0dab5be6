use eframe::egui::{Pos2, Vec2, pos2};

use super::graph::SynergyGraph;

#[derive(Clone, Copy)]
pub(super) struct LayoutParams {
    pub(super) repulsion: f32,
    pub(super) attraction: f32,
    pub(super) ideal_length: f32,
    pub(super) damping: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            repulsion: 15_000.0,
            attraction: 0.01,
            ideal_length: 180.0,
            damping: 0.9,
        }
    }
}

/// Advances the layout by one tick. The dragged node keeps its position and
/// accumulator untouched while still repelling and attracting everyone else.
pub(super) fn step(
    graph: &mut SynergyGraph,
    params: &LayoutParams,
    dragged: Option<&str>,
    world: Vec2,
) {
    let dragged_index = dragged.and_then(|name| graph.index_of(name));
    let node_count = graph.nodes.len();

    for (index, node) in graph.nodes.iter_mut().enumerate() {
        if Some(index) != dragged_index {
            node.disp = Vec2::ZERO;
        }
    }

    let positions: Vec<Pos2> = graph.nodes.iter().map(|node| node.pos).collect();

    for i in 0..node_count {
        for j in (i + 1)..node_count {
            let delta = positions[i] - positions[j];
            let distance_sq = delta.length_sq();
            if distance_sq == 0.0 {
                continue;
            }

            let distance = distance_sq.sqrt();
            let direction = delta / distance;
            let repulsion = params.repulsion / distance_sq;

            if Some(i) != dragged_index {
                graph.nodes[i].disp += direction * repulsion;
            }
            if Some(j) != dragged_index {
                graph.nodes[j].disp -= direction * repulsion;
            }
        }
    }

    let springs: Vec<(usize, usize)> = graph
        .edges
        .iter()
        .filter_map(|edge| Some((graph.index_of(&edge.source)?, graph.index_of(&edge.target)?)))
        .collect();

    for (source, target) in springs {
        let delta = positions[target] - positions[source];
        let distance_sq = delta.length_sq();
        if distance_sq == 0.0 {
            continue;
        }

        let distance = distance_sq.sqrt();
        let direction = delta / distance;
        let spring = (distance - params.ideal_length) * params.attraction;

        if Some(source) != dragged_index {
            graph.nodes[source].disp += direction * spring;
        }
        if Some(target) != dragged_index {
            graph.nodes[target].disp -= direction * spring;
        }
    }

    for (index, node) in graph.nodes.iter_mut().enumerate() {
        if Some(index) == dragged_index {
            continue;
        }
        node.pos += node.disp * params.damping;
        node.pos = clamp_to_world(node.pos, node.radius, world);
    }
}

// lower bound wins when the world is narrower than one diameter
pub(super) fn clamp_to_world(pos: Pos2, radius: f32, world: Vec2) -> Pos2 {
    pos2(
        pos.x.min(world.x - radius).max(radius),
        pos.y.min(world.y - radius).max(radius),
    )
}
