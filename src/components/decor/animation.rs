//! Time-derived visual parameters.
//!
//! Every function here is pure in `t` (seconds since mount): ticking twice
//! with the same time gives the same answer, so a stalled tab just pauses.

use std::f64::consts::TAU;

use super::types::Node;

pub const DRIFT_AMPLITUDE: f64 = 6.0;
pub const DRIFT_PERIOD: f64 = 7.0;
pub const PULSE_PERIOD: f64 = 3.2;
pub const SCALE_AMPLITUDE: f64 = 0.08;
/// Opacity swing around a node's base opacity, as a fraction of it.
pub const OPACITY_SWING: f64 = 0.25;
/// Spreads pulses so edges don't fire in lockstep.
const EDGE_STAGGER: f64 = 0.37;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeVisual {
	pub opacity: f64,
	pub scale: f64,
	/// Offset from the node anchor in px.
	pub drift: (f64, f64),
	/// 0..=1
	pub glow: f64,
}

pub fn node_visual(node: &Node, t: f64) -> NodeVisual {
	let pulse = (TAU * t / PULSE_PERIOD + node.phase).sin();
	let drift_angle = TAU * t / DRIFT_PERIOD + node.phase;
	NodeVisual {
		opacity: (node.base_opacity * (1.0 - OPACITY_SWING + OPACITY_SWING * pulse))
			.clamp(0.0, 1.0),
		scale: 1.0 + SCALE_AMPLITUDE * pulse,
		drift: (
			DRIFT_AMPLITUDE * drift_angle.cos() * 0.5,
			DRIFT_AMPLITUDE * drift_angle.sin(),
		),
		glow: (pulse + 1.0) / 2.0,
	}
}

/// Position of the travelling pulse along edge `edge_index`, in `[0, 1)`.
pub fn edge_pulse(edge_index: usize, t: f64, duration: f64) -> f64 {
	if duration <= 0.0 || !t.is_finite() {
		return 0.0;
	}
	(t / duration + edge_index as f64 * EDGE_STAGGER).rem_euclid(1.0)
}

pub fn edge_opacity(edge_index: usize, t: f64) -> f64 {
	let wave = (TAU * t / (PULSE_PERIOD * 1.5) + edge_index as f64).sin();
	0.25 + 0.15 * wave
}

/// Exact at both endpoints.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
	a * (1.0 - t) + b * t
}

/// Maps `value` from `input` to `output`, clamping at both ends.
pub fn interpolate(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
	let span = input.1 - input.0;
	if span == 0.0 {
		return if value < input.0 { output.0 } else { output.1 };
	}
	let t = ((value - input.0) / span).clamp(0.0, 1.0);
	lerp(output.0, output.1, t)
}

pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t.clamp(0.0, 1.0)).powi(3)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entrance {
	pub opacity: f64,
	/// Remaining downward offset in px.
	pub offset_y: f64,
}

/// Fade-and-rise played once after mount.
pub fn entrance(t: f64, delay: f64, duration: f64, distance: f64) -> Entrance {
	let progress = if duration <= 0.0 {
		if t >= delay { 1.0 } else { 0.0 }
	} else {
		ease_out_cubic((t - delay) / duration)
	};
	Entrance {
		opacity: progress,
		offset_y: distance * (1.0 - progress),
	}
}

/// Horizontal offset of a looping strip, from 0 to `-distance`.
pub fn marquee_offset(t: f64, distance: f64, duration: f64) -> f64 {
	if duration <= 0.0 {
		return 0.0;
	}
	-distance * (t / duration).rem_euclid(1.0)
}

/// 0 -> amplitude -> 0 over `duration`, eased at both ends.
pub fn bob(t: f64, amplitude: f64, duration: f64) -> f64 {
	if duration <= 0.0 {
		return 0.0;
	}
	let phase = (t / duration).rem_euclid(1.0);
	amplitude * (1.0 - (TAU * phase).cos()) / 2.0
}
