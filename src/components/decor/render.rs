use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::animation::{edge_opacity, edge_pulse, lerp};
use super::scene::{Projected, Vec3};
use super::state::DecorState;
use super::types::{Glyph, INK, Rgb};

/// Light direction used to shade scene faces.
const LIGHT: Vec3 = [0.8164965809277261, 0.4082482904638631, 0.4082482904638631];
const PULSE_RADIUS: f64 = 2.5;

/// The handful of drawing calls the decorative layer needs.
pub trait Surface {
	fn clear(&self, width: f64, height: f64);
	fn set_alpha(&self, alpha: f64);
	fn fill_polygon(&self, points: &[(f64, f64)], color: &str);
	fn stroke_path(&self, points: &[(f64, f64)], closed: bool, width: f64, color: &str);
	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str);
	/// Soft radial glow fading from `color` at `alpha` to transparent.
	fn glow(&self, x: f64, y: f64, radius: f64, color: Rgb, alpha: f64);
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn set_alpha(&self, alpha: f64) {
		self.set_global_alpha(alpha.clamp(0.0, 1.0));
	}

	fn fill_polygon(&self, points: &[(f64, f64)], color: &str) {
		let Some((&(x0, y0), rest)) = points.split_first() else {
			return;
		};
		self.begin_path();
		self.move_to(x0, y0);
		for &(x, y) in rest {
			self.line_to(x, y);
		}
		self.close_path();
		self.set_fill_style_str(color);
		self.fill();
	}

	fn stroke_path(&self, points: &[(f64, f64)], closed: bool, width: f64, color: &str) {
		let Some((&(x0, y0), rest)) = points.split_first() else {
			return;
		};
		self.begin_path();
		self.move_to(x0, y0);
		for &(x, y) in rest {
			self.line_to(x, y);
		}
		if closed {
			self.close_path();
		}
		self.set_stroke_style_str(color);
		self.set_line_width(width);
		self.stroke();
	}

	fn fill_circle(&self, x: f64, y: f64, radius: f64, color: &str) {
		self.begin_path();
		let _ = self.arc(x, y, radius.max(0.0), 0.0, TAU);
		self.set_fill_style_str(color);
		self.fill();
	}

	fn glow(&self, x: f64, y: f64, radius: f64, color: Rgb, alpha: f64) {
		let Ok(gradient) = self.create_radial_gradient(x, y, radius * 0.2, x, y, radius) else {
			return;
		};
		let _ = gradient.add_color_stop(0.0, &color.css_alpha(alpha));
		let _ = gradient.add_color_stop(1.0, &color.css_alpha(0.0));
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, TAU);
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill();
	}
}

pub fn render(state: &DecorState, surface: &impl Surface) {
	surface.clear(state.width, state.height);
	if state.config.show_scene {
		draw_scene(state, surface);
	}
	draw_edges(state, surface);
	draw_nodes(state, surface);
	surface.set_alpha(1.0);
}

fn shade(color: Rgb, normal: Vec3) -> Rgb {
	let len = (normal[0].powi(2) + normal[1].powi(2) + normal[2].powi(2)).sqrt();
	if len < 1e-9 {
		return color;
	}
	let dot = normal[0] * LIGHT[0] + normal[1] * LIGHT[1] + normal[2] * LIGHT[2];
	let lambert = dot.abs() / len;
	color.shade(0.65 + 0.45 * lambert)
}

fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
	let (u, v) = (
		[b[0] - a[0], b[1] - a[1], b[2] - a[2]],
		[c[0] - a[0], c[1] - a[1], c[2] - a[2]],
	);
	[u[1] * v[2] - u[2] * v[1], u[2] * v[0] - u[0] * v[2], u[0] * v[1] - u[1] * v[0]]
}

fn draw_scene(state: &DecorState, surface: &impl Surface) {
	let t = state.elapsed();
	let mut order: Vec<usize> = (0..state.shapes.len()).collect();
	// far to near
	order.sort_by(|&a, &b| {
		state.shapes[a].position[2].total_cmp(&state.shapes[b].position[2])
	});

	for idx in order {
		let shape = &state.shapes[idx];
		let pose = shape.pose(t);

		let wireframe = &shape.wireframe;
		if wireframe.vertices.is_empty() {
			// spheres: a shaded disc with an ink rim
			let centre = state.parallax.apply(shape.place(&pose, [0.0; 3]));
			let Some(p) = state.camera.project(centre, state.width, state.height) else {
				continue;
			};
			let radius = shape.size * p.scale;
			surface.set_alpha(0.9);
			surface.fill_circle(p.x, p.y, radius, &shape.color.css());
			let glint = radius * 0.3;
			surface.glow(p.x - glint, p.y - glint, radius * 0.8, Rgb(255, 255, 255), 0.35);
			surface.stroke_path(&circle_points(p.x, p.y, radius, 32), true, 2.0, &INK.css());
			continue;
		}

		let world: Vec<Vec3> = wireframe
			.vertices
			.iter()
			.map(|&v| state.parallax.apply(shape.place(&pose, v)))
			.collect();
		let screen: Vec<Option<Projected>> = world
			.iter()
			.map(|&p| state.camera.project(p, state.width, state.height))
			.collect();

		let mut faces: Vec<&Vec<usize>> = wireframe.faces.iter().collect();
		let depth = |face: &Vec<usize>| {
			face.iter().map(|&i| world[i][2]).sum::<f64>() / face.len() as f64
		};
		faces.sort_by(|a, b| depth(a).total_cmp(&depth(b)));

		surface.set_alpha(0.85);
		for face in faces {
			let points: Option<Vec<(f64, f64)>> =
				face.iter().map(|&i| screen[i].map(|p| (p.x, p.y))).collect();
			let Some(points) = points else { continue };
			let normal = face_normal(world[face[0]], world[face[1]], world[face[2]]);
			surface.fill_polygon(&points, &shade(shape.color, normal).css());
		}

		surface.set_alpha(1.0);
		for &(a, b) in &wireframe.edges {
			if let (Some(pa), Some(pb)) = (screen[a], screen[b]) {
				surface.stroke_path(&[(pa.x, pa.y), (pb.x, pb.y)], false, 2.0, &INK.css());
			}
		}
	}
}

fn circle_points(x: f64, y: f64, radius: f64, segments: usize) -> Vec<(f64, f64)> {
	(0..segments)
		.map(|i| {
			let a = i as f64 * TAU / segments as f64;
			(x + radius * a.cos(), y + radius * a.sin())
		})
		.collect()
}

fn draw_edges(state: &DecorState, surface: &impl Surface) {
	let t = state.elapsed();
	for (i, edge) in state.edges.iter().enumerate() {
		let (a, b) = edge.endpoints();
		let (p1, p2) = (state.node_position(a), state.node_position(b));

		surface.set_alpha(edge_opacity(i, t));
		surface.stroke_path(&[p1, p2], false, 1.0, &INK.css());

		let pulse = edge_pulse(i, t, state.config.pulse_duration);
		let (x, y) = (lerp(p1.0, p2.0, pulse), lerp(p1.1, p2.1, pulse));
		// fade in and out at the endpoints
		surface.set_alpha((pulse * TAU / 2.0).sin() * 0.9);
		surface.fill_circle(x, y, PULSE_RADIUS, &state.nodes[a].color.css());
	}
}

fn draw_nodes(state: &DecorState, surface: &impl Surface) {
	for (idx, node) in state.nodes.iter().enumerate() {
		let (x, y) = state.node_position(idx);
		let visual = state.node_visual(idx);
		let radius = node.size / 2.0 * visual.scale;

		surface.set_alpha(1.0);
		surface.glow(x, y, radius * 2.4, node.color, 0.35 * visual.glow * visual.opacity);

		surface.set_alpha(visual.opacity);
		let color = node.color.css();
		match node.glyph {
			Glyph::Circle => surface.fill_circle(x, y, radius, &color),
			glyph => surface.fill_polygon(&glyph.outline(x, y, radius), &color),
		}
		let outline = match node.glyph {
			Glyph::Circle => circle_points(x, y, radius, 24),
			glyph => glyph.outline(x, y, radius),
		};
		surface.stroke_path(&outline, true, 2.0, &INK.css());
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use super::*;
	use crate::components::decor::config::DecorConfig;

	#[derive(Debug, Clone, PartialEq)]
	enum Op {
		Clear,
		Alpha(f64),
		Polygon(usize),
		Path(usize),
		Circle,
		Glow,
	}

	#[derive(Default)]
	struct Recorder(RefCell<Vec<Op>>);

	impl Surface for Recorder {
		fn clear(&self, _: f64, _: f64) {
			self.0.borrow_mut().push(Op::Clear);
		}
		fn set_alpha(&self, alpha: f64) {
			self.0.borrow_mut().push(Op::Alpha(alpha));
		}
		fn fill_polygon(&self, points: &[(f64, f64)], _: &str) {
			self.0.borrow_mut().push(Op::Polygon(points.len()));
		}
		fn stroke_path(&self, points: &[(f64, f64)], _: bool, _: f64, _: &str) {
			self.0.borrow_mut().push(Op::Path(points.len()));
		}
		fn fill_circle(&self, _: f64, _: f64, _: f64, _: &str) {
			self.0.borrow_mut().push(Op::Circle);
		}
		fn glow(&self, _: f64, _: f64, _: f64, _: Rgb, _: f64) {
			self.0.borrow_mut().push(Op::Glow);
		}
	}

	fn count(ops: &[Op], f: impl Fn(&Op) -> bool) -> usize {
		ops.iter().filter(|op| f(op)).count()
	}

	#[test]
	fn draws_every_node_and_edge() {
		let config = DecorConfig {
			show_scene: false,
			..DecorConfig::default()
		};
		let mut state = DecorState::new(config, 390.0, 844.0, 7);
		state.tick(0.0);
		state.tick(500.0);

		let recorder = Recorder::default();
		render(&state, &recorder);
		let ops = recorder.0.into_inner();

		assert_eq!(ops.first(), Some(&Op::Clear));
		assert_eq!(ops.last(), Some(&Op::Alpha(1.0)));
		// one glow per node
		assert_eq!(count(&ops, |op| *op == Op::Glow), state.nodes.len());
		// two-point strokes are edge lines
		assert_eq!(count(&ops, |op| *op == Op::Path(2)), state.edges.len());
		for op in &ops {
			if let Op::Alpha(a) = op {
				assert!((0.0..=1.0).contains(a));
			}
		}
	}

	#[test]
	fn scene_adds_shapes_behind_the_nodes() {
		let mut state = DecorState::new(DecorConfig::default(), 1280.0, 800.0, 7);
		state.tick(0.0);
		let recorder = Recorder::default();
		render(&state, &recorder);
		let ops = recorder.0.into_inner();

		// boxes, cones, tori and the octahedron fill their faces
		let faces = count(&ops, |op| matches!(op, Op::Polygon(3) | Op::Polygon(4)));
		assert!(faces >= 6 * 4 + 8 + 5 * 2 + 16 * 2);
		// each sphere gets a glint on top of the node glows
		assert_eq!(count(&ops, |op| *op == Op::Glow), state.nodes.len() + 2);
	}
}
