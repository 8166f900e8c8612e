//! Node placement and proximity edges for the constellation layer.
//!
//! Everything here works in percent of the container, so a layout can be
//! generated once and stretched to whatever size the canvas ends up being.

use std::f64::consts::TAU;

use fastrand::Rng;
use log::debug;

use super::config::{DecorConfig, Placement};
use super::types::{Edge, Glyph, LayoutMode, Node, NodePosition, PALETTE};

pub const SAFE_MIN: f64 = 4.0;
pub const SAFE_MAX: f64 = 96.0;

/// Radius of the ring that receives nodes beyond the curated slots.
pub const OUTER_RING: f64 = 46.0;

/// Hand-picked slots that stay clear of the hero copy on narrow screens.
pub const MOBILE_SAFE_POSITIONS: [(f64, f64); 8] = [
	(8.0, 10.0),
	(90.0, 8.0),
	(50.0, 6.0),
	(6.0, 44.0),
	(94.0, 56.0),
	(8.0, 88.0),
	(50.0, 94.0),
	(90.0, 90.0),
];

pub const DESKTOP_SAFE_POSITIONS: [(f64, f64); 12] = [
	(6.0, 14.0),
	(20.0, 8.0),
	(36.0, 12.0),
	(64.0, 10.0),
	(80.0, 6.0),
	(94.0, 18.0),
	(8.0, 50.0),
	(92.0, 46.0),
	(6.0, 84.0),
	(24.0, 92.0),
	(76.0, 90.0),
	(94.0, 80.0),
];

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
}

impl LayoutMode {
	pub fn safe_positions(self) -> &'static [(f64, f64)] {
		match self {
			LayoutMode::Mobile => &MOBILE_SAFE_POSITIONS,
			LayoutMode::Desktop => &DESKTOP_SAFE_POSITIONS,
		}
	}
}

pub fn clamp_to_safe((x, y): (f64, f64)) -> (f64, f64) {
	(x.clamp(SAFE_MIN, SAFE_MAX), y.clamp(SAFE_MIN, SAFE_MAX))
}

fn styled_node(id: usize, position: NodePosition, rng: &mut Rng) -> Node {
	Node {
		id,
		position,
		size: 18.0 + rng.f64() * 14.0,
		base_opacity: 0.55 + rng.f64() * 0.35,
		phase: rng.f64() * TAU,
		glyph: Glyph::ALL[id % Glyph::ALL.len()],
		color: PALETTE[id % PALETTE.len()],
	}
}

/// Curated slots first, then an evenly spaced outer ring for the rest.
pub fn constellation(count: usize, mode: LayoutMode, rng: &mut Rng) -> Vec<Node> {
	let curated = mode.safe_positions();
	let overflow = count.saturating_sub(curated.len());
	(0..count)
		.map(|id| {
			let position = match curated.get(id) {
				Some(&slot) => {
					let (x, y) = clamp_to_safe(slot);
					NodePosition::Percent { x, y }
				}
				None => {
					let slot = id - curated.len();
					// Half-step offset keeps ring nodes off the curated axis points.
					let angle = (slot as f64 + 0.5) * TAU / overflow as f64;
					NodePosition::Polar {
						angle,
						radius: OUTER_RING,
					}
				}
			};
			styled_node(id, position, rng)
		})
		.collect()
}

/// Even angular spacing around the centre. `jitter` is a fraction of one step.
pub fn orbit(count: usize, radius: f64, jitter: f64, rng: &mut Rng) -> Vec<Node> {
	let radius = radius.clamp(0.0, 50.0 - SAFE_MIN);
	let step = TAU / count.max(1) as f64;
	(0..count)
		.map(|id| {
			let offset = (rng.f64() * 2.0 - 1.0) * jitter * step;
			let angle = id as f64 * step + offset;
			styled_node(id, NodePosition::Polar { angle, radius }, rng)
		})
		.collect()
}

/// Links pairs closer than `threshold`, keeping each with `keep_probability`.
pub fn connect_nearby(
	nodes: &[Node],
	threshold: f64,
	keep_probability: f64,
	rng: &mut Rng,
) -> Vec<Edge> {
	let points: Vec<(f64, f64)> = nodes.iter().map(Node::percent).collect();
	let mut edges = Vec::new();
	for (i, &(x1, y1)) in points.iter().enumerate() {
		for (j, &(x2, y2)) in points.iter().enumerate().skip(i + 1) {
			let dist = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt();
			if dist < threshold && rng.f64() < keep_probability {
				edges.push(Edge::new(nodes[i].id, nodes[j].id));
			}
		}
	}
	edges
}

pub fn generate(config: &DecorConfig, mode: LayoutMode, rng: &mut Rng) -> Geometry {
	let count = config.node_count(mode);
	let nodes = match config.placement {
		Placement::Constellation => constellation(count, mode, rng),
		Placement::Orbit { radius, jitter } => orbit(count, radius, jitter, rng),
	};
	let edges = connect_nearby(&nodes, config.edge_threshold, config.edge_keep_probability, rng);
	debug!(
		"generated {:?} {:?} layout: {} nodes, {} edges",
		mode,
		config.placement,
		nodes.len(),
		edges.len()
	);
	Geometry { nodes, edges }
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	fn in_safe_range(node: &Node) -> bool {
		let (x, y) = node.percent();
		(SAFE_MIN..=SAFE_MAX).contains(&x) && (SAFE_MIN..=SAFE_MAX).contains(&y)
	}

	#[test]
	fn produces_exactly_the_requested_nodes() {
		let mut rng = Rng::with_seed(7);
		for count in [0, 1, 5, 8, 12, 20, 40] {
			for mode in [LayoutMode::Mobile, LayoutMode::Desktop] {
				let nodes = constellation(count, mode, &mut rng);
				assert_eq!(nodes.len(), count);
				let ids: HashSet<usize> = nodes.iter().map(|n| n.id).collect();
				assert_eq!(ids.len(), count);
				assert!(nodes.iter().all(in_safe_range));
			}
		}
	}

	#[test]
	fn zero_nodes_yield_empty_geometry() {
		let config = DecorConfig {
			mobile_nodes: 0,
			..DecorConfig::default()
		};
		let geometry = generate(&config, LayoutMode::Mobile, &mut Rng::with_seed(1));
		assert!(geometry.nodes.is_empty());
		assert!(geometry.edges.is_empty());
	}

	#[test]
	fn mobile_eight_uses_curated_slots_and_is_deterministic() {
		let config = DecorConfig::default();
		let a = generate(&config, LayoutMode::Mobile, &mut Rng::with_seed(42));
		let b = generate(&config, LayoutMode::Mobile, &mut Rng::with_seed(42));

		assert_eq!(a.nodes.len(), 8);
		for (node, slot) in a.nodes.iter().zip(MOBILE_SAFE_POSITIONS) {
			assert_eq!(node.percent(), slot);
		}
		assert_eq!(a.edges, b.edges);
		assert_eq!(a.nodes, b.nodes);
	}

	#[test]
	fn curated_slots_avoid_the_centre() {
		for &(x, y) in MOBILE_SAFE_POSITIONS.iter().chain(DESKTOP_SAFE_POSITIONS.iter()) {
			let central = (22.0..=78.0).contains(&x) && (22.0..=78.0).contains(&y);
			assert!(!central, "({x}, {y}) overlaps the hero copy");
		}
	}

	#[test]
	fn overflow_nodes_sit_on_outer_ring() {
		let nodes = constellation(10, LayoutMode::Mobile, &mut Rng::with_seed(3));
		for node in &nodes[8..] {
			let (x, y) = node.percent();
			let r = ((x - 50.0).powi(2) + (y - 50.0).powi(2)).sqrt();
			assert!((r - OUTER_RING).abs() < 1e-9);
		}
	}

	#[test]
	fn edges_reference_existing_nodes() {
		let mut rng = Rng::with_seed(11);
		let nodes = orbit(16, 40.0, 0.3, &mut rng);
		let edges = connect_nearby(&nodes, 30.0, 0.7, &mut rng);
		let ids: HashSet<usize> = nodes.iter().map(|n| n.id).collect();
		for edge in &edges {
			let (a, b) = edge.endpoints();
			assert!(a < b);
			assert!(ids.contains(&a) && ids.contains(&b));
		}
	}

	#[test]
	fn keep_probability_bounds_the_edge_set() {
		let mut rng = Rng::with_seed(5);
		let nodes = orbit(6, 10.0, 0.0, &mut rng);
		// Every pair on a small ring is within 25%.
		assert_eq!(connect_nearby(&nodes, 25.0, 1.0, &mut rng).len(), 15);
		assert!(connect_nearby(&nodes, 25.0, 0.0, &mut rng).is_empty());
		assert!(connect_nearby(&nodes, 0.0, 1.0, &mut rng).is_empty());
	}

	#[test]
	fn orbit_placement_puts_every_node_on_the_ring() {
		let config = DecorConfig {
			placement: Placement::Orbit {
				radius: 30.0,
				jitter: 0.2,
			},
			..DecorConfig::default()
		};
		let geometry = generate(&config, LayoutMode::Desktop, &mut Rng::with_seed(4));
		assert_eq!(geometry.nodes.len(), config.desktop_nodes);
		for node in &geometry.nodes {
			assert!(matches!(node.position, NodePosition::Polar { radius, .. } if radius == 30.0));
		}
	}

	#[test]
	fn orbit_radius_is_capped_to_safe_range() {
		let nodes = orbit(9, 80.0, 0.5, &mut Rng::with_seed(9));
		assert!(nodes.iter().all(in_safe_range));
	}
}
