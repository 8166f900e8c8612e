use super::types::LayoutMode;

/// How nodes are spread over the container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Placement {
	/// Curated slots around the hero copy, overflow on an outer ring.
	#[default]
	Constellation,
	/// Evenly spaced ring; `jitter` is a fraction of one angular step.
	Orbit { radius: f64, jitter: f64 },
}

/// Tunables for the decorative layer. Defaults match the hero section.
#[derive(Clone, Debug, PartialEq)]
pub struct DecorConfig {
	/// Container widths below this use the mobile layout.
	pub mobile_breakpoint: f64,
	pub mobile_nodes: usize,
	pub desktop_nodes: usize,
	pub placement: Placement,
	/// Max edge length, in percent of the container.
	pub edge_threshold: f64,
	pub edge_keep_probability: f64,
	/// Pointer influence radius in px.
	pub influence_radius: f64,
	/// Largest attraction displacement in px.
	pub max_pull: f64,
	/// Angular frequency of the displacement springs.
	pub spring_omega: f64,
	/// Seconds for a pulse to travel along an edge.
	pub pulse_duration: f64,
	pub show_scene: bool,
}

impl Default for DecorConfig {
	fn default() -> Self {
		Self {
			mobile_breakpoint: 768.0,
			mobile_nodes: 8,
			desktop_nodes: 12,
			placement: Placement::Constellation,
			edge_threshold: 32.0,
			edge_keep_probability: 0.6,
			influence_radius: 160.0,
			max_pull: 18.0,
			spring_omega: 8.0,
			pulse_duration: 3.0,
			show_scene: true,
		}
	}
}

impl DecorConfig {
	pub fn node_count(&self, mode: LayoutMode) -> usize {
		match mode {
			LayoutMode::Mobile => self.mobile_nodes,
			LayoutMode::Desktop => self.desktop_nodes,
		}
	}
}
