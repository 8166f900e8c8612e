use fastrand::Rng;
use log::info;

use super::animation::{self, NodeVisual};
use super::clock::AnimationClock;
use super::config::DecorConfig;
use super::geometry;
use super::pointer::{PointerTracker, SpringPoint, attraction};
use super::scene::{Camera, SceneParallax, SceneShape, hero_shapes};
use super::types::{Edge, LayoutMode, Node};

/// Longest step fed to the springs, so a backgrounded tab doesn't lurch.
pub const MAX_STEP: f64 = 0.1;

pub struct DecorState {
	pub config: DecorConfig,
	pub mode: LayoutMode,
	pub nodes: Vec<Node>,
	pub edges: Vec<Edge>,
	pub shapes: Vec<SceneShape>,
	pub camera: Camera,
	pub clock: AnimationClock,
	pub pointer: PointerTracker,
	pub parallax: SceneParallax,
	pub width: f64,
	pub height: f64,
	displacement: Vec<SpringPoint>,
	rng: Rng,
}

impl DecorState {
	pub fn new(config: DecorConfig, width: f64, height: f64, seed: u64) -> Self {
		let mode = LayoutMode::for_width(width, config.mobile_breakpoint);
		let mut state = Self {
			config,
			mode,
			nodes: Vec::new(),
			edges: Vec::new(),
			shapes: hero_shapes(),
			camera: Camera::default(),
			clock: AnimationClock::new(),
			pointer: PointerTracker::default(),
			parallax: SceneParallax::default(),
			width,
			height,
			displacement: Vec::new(),
			rng: Rng::with_seed(seed),
		};
		state.regenerate();
		state
	}

	fn regenerate(&mut self) {
		let layout = geometry::generate(&self.config, self.mode, &mut self.rng);
		self.displacement = vec![SpringPoint::default(); layout.nodes.len()];
		self.nodes = layout.nodes;
		self.edges = layout.edges;
	}

	/// Returns true when the breakpoint changed and the layout was rebuilt.
	pub fn resize(&mut self, width: f64, height: f64) -> bool {
		self.width = width;
		self.height = height;
		let mode = LayoutMode::for_width(width, self.config.mobile_breakpoint);
		if mode == self.mode {
			return false;
		}
		info!("decor layout switched to {:?}", mode);
		self.mode = mode;
		self.regenerate();
		true
	}

	pub fn elapsed(&self) -> f64 {
		self.clock.elapsed()
	}

	/// Static layout position of a node, in canvas px.
	pub fn anchor(&self, idx: usize) -> (f64, f64) {
		let (x, y) = self.nodes[idx].percent();
		(x / 100.0 * self.width, y / 100.0 * self.height)
	}

	pub fn node_visual(&self, idx: usize) -> NodeVisual {
		animation::node_visual(&self.nodes[idx], self.elapsed())
	}

	/// Anchor plus drift plus smoothed pointer attraction.
	pub fn node_position(&self, idx: usize) -> (f64, f64) {
		let (ax, ay) = self.anchor(idx);
		let (dx, dy) = self.node_visual(idx).drift;
		let (px, py) = self.displacement[idx].value();
		(ax + dx + px, ay + dy + py)
	}

	pub fn tick(&mut self, timestamp_ms: f64) {
		let dt = self.clock.advance(timestamp_ms).min(MAX_STEP);
		self.parallax.update(self.pointer.normalized(), dt);

		let t = self.elapsed();
		let pointer = self.pointer.position();
		for (idx, node) in self.nodes.iter().enumerate() {
			let (x, y) = node.percent();
			let (dx, dy) = animation::node_visual(node, t).drift;
			let resting = (x / 100.0 * self.width + dx, y / 100.0 * self.height + dy);
			let target =
				attraction(resting, pointer, self.config.influence_radius, self.config.max_pull);
			self.displacement[idx].step(target, self.config.spring_omega, dt);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::decor::pointer::Bounds;

	fn state(width: f64) -> DecorState {
		DecorState::new(DecorConfig::default(), width, 800.0, 42)
	}

	fn run(state: &mut DecorState, from_ms: f64, frames: usize) {
		for i in 0..frames {
			state.tick(from_ms + i as f64 * 16.0);
		}
	}

	#[test]
	fn picks_layout_from_width() {
		assert_eq!(state(400.0).nodes.len(), 8);
		assert_eq!(state(1280.0).nodes.len(), 12);
		assert_eq!(state(400.0).mode, LayoutMode::Mobile);
	}

	#[test]
	fn resize_regenerates_only_on_breakpoint_change() {
		let mut s = state(1280.0);
		let edges = s.edges.clone();
		assert!(!s.resize(1000.0, 700.0));
		assert_eq!(s.edges, edges);
		assert!(s.resize(500.0, 700.0));
		assert_eq!(s.nodes.len(), 8);
		assert_eq!(s.displacement.len(), 8);
	}

	#[test]
	fn nodes_pull_toward_a_nearby_pointer() {
		let mut s = state(1280.0);
		let (ax, ay) = s.anchor(0);
		let bounds = Bounds {
			left: 0.0,
			top: 0.0,
			width: 1280.0,
			height: 800.0,
		};
		s.pointer.update(bounds, ax + 60.0, ay);
		run(&mut s, 0.0, 120);
		let (px, _) = s.displacement[0].value();
		assert!(px > 1.0, "expected pull to the right, got {px}");

		s.pointer.clear();
		run(&mut s, 2_000.0, 240);
		let (px, py) = s.displacement[0].value();
		assert!(px.abs() < 0.01 && py.abs() < 0.01);
	}

	#[test]
	fn far_nodes_ignore_the_pointer() {
		let mut s = state(1280.0);
		let bounds = Bounds {
			left: 0.0,
			top: 0.0,
			width: 1280.0,
			height: 800.0,
		};
		// centre of the hero, well away from every curated slot
		s.pointer.update(bounds, 640.0, 400.0);
		run(&mut s, 0.0, 60);
		for point in &s.displacement {
			assert_eq!(point.value(), (0.0, 0.0));
		}
	}

	#[test]
	fn clock_follows_ticks() {
		let mut s = state(1280.0);
		s.tick(5_000.0);
		s.tick(6_000.0);
		assert!((s.elapsed() - 1.0).abs() < 1e-9);
		s.tick(5_500.0);
		assert!((s.elapsed() - 1.0).abs() < 1e-9);
	}
}
