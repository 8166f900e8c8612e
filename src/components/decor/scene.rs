//! Floating wireframe shapes behind the hero, projected onto the 2D canvas.
//!
//! Motion follows the usual "float" preset: each shape sways and bobs on a
//! slow sine while spinning on its own axes, and the whole group leans
//! toward the pointer.

use std::f64::consts::TAU;

use super::animation::lerp;
use super::types::{CYAN, LIME, PINK, Rgb};

pub type Vec3 = [f64; 3];

/// Per-frame lerp factor the group parallax was tuned with, at 60 fps.
const PARALLAX_FACTOR: f64 = 0.05;
const PARALLAX_YAW: f64 = 0.15;
const PARALLAX_PITCH: f64 = 0.08;
const NEAR_PLANE: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
	Box,
	Sphere,
	Torus,
	Cone,
	Octahedron,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloatParams {
	pub speed: f64,
	pub rotation_intensity: f64,
	pub float_intensity: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Wireframe {
	pub vertices: Vec<Vec3>,
	pub edges: Vec<(usize, usize)>,
	pub faces: Vec<Vec<usize>>,
}

impl ShapeKind {
	pub fn float_params(self) -> FloatParams {
		let (speed, rotation_intensity, float_intensity) = match self {
			ShapeKind::Box => (2.0, 0.5, 1.0),
			ShapeKind::Sphere => (1.5, 0.3, 1.5),
			ShapeKind::Torus => (2.5, 0.8, 1.0),
			ShapeKind::Cone => (1.8, 0.4, 1.2),
			ShapeKind::Octahedron => (1.2, 0.6, 0.8),
		};
		FloatParams {
			speed,
			rotation_intensity,
			float_intensity,
		}
	}

	/// The mesh's own rotation (XYZ Euler, radians) at time `t`.
	pub fn spin(self, t: f64, speed: f64) -> Vec3 {
		match self {
			ShapeKind::Box => [t * 0.3 * speed, t * 0.2 * speed, 0.0],
			ShapeKind::Sphere => [0.0; 3],
			ShapeKind::Torus => [t * 0.5, 0.0, t * 0.3],
			ShapeKind::Cone => [0.0, t * 0.4, (t * 0.5).sin() * 0.3],
			ShapeKind::Octahedron => [t * 0.25, t * 0.35, 0.0],
		}
	}

	/// Unit geometry scaled by `size`. Spheres are drawn as discs and have none.
	pub fn wireframe(self, size: f64) -> Wireframe {
		match self {
			ShapeKind::Box => box_wireframe(size),
			ShapeKind::Sphere => Wireframe::default(),
			ShapeKind::Torus => torus_wireframe(0.5 * size, 0.2 * size, 16),
			ShapeKind::Cone => cone_wireframe(0.5 * size, size),
			ShapeKind::Octahedron => octahedron_wireframe(0.6 * size),
		}
	}
}

fn box_wireframe(size: f64) -> Wireframe {
	let h = size / 2.0;
	let pick = |set: bool| if set { h } else { -h };
	let vertices = (0..8)
		.map(|i| [pick(i & 1 != 0), pick(i & 2 != 0), pick(i & 4 != 0)])
		.collect();
	let mut edges = Vec::with_capacity(12);
	for i in 0..8 {
		for bit in [1, 2, 4] {
			if i & bit == 0 {
				edges.push((i, i | bit));
			}
		}
	}
	let faces = vec![
		vec![0, 2, 6, 4],
		vec![1, 3, 7, 5],
		vec![0, 1, 5, 4],
		vec![2, 3, 7, 6],
		vec![0, 1, 3, 2],
		vec![4, 5, 7, 6],
	];
	Wireframe { vertices, edges, faces }
}

fn octahedron_wireframe(r: f64) -> Wireframe {
	let vertices = vec![
		[r, 0.0, 0.0],
		[-r, 0.0, 0.0],
		[0.0, r, 0.0],
		[0.0, -r, 0.0],
		[0.0, 0.0, r],
		[0.0, 0.0, -r],
	];
	let mut edges = Vec::with_capacity(12);
	for a in 0..6 {
		for b in (a + 1)..6 {
			// opposite poles are 0-1, 2-3, 4-5
			if !(a % 2 == 0 && b == a + 1) {
				edges.push((a, b));
			}
		}
	}
	let mut faces = Vec::with_capacity(8);
	for x in [0, 1] {
		for y in [2, 3] {
			for z in [4, 5] {
				faces.push(vec![x, y, z]);
			}
		}
	}
	Wireframe { vertices, edges, faces }
}

/// Four-sided cone, i.e. a square pyramid standing on its base.
fn cone_wireframe(radius: f64, height: f64) -> Wireframe {
	let mut vertices = vec![[0.0, height / 2.0, 0.0]];
	vertices.extend((0..4).map(|k| {
		let theta = k as f64 * TAU / 4.0;
		[radius * theta.sin(), -height / 2.0, radius * theta.cos()]
	}));
	let mut edges = Vec::with_capacity(8);
	let mut faces = Vec::with_capacity(5);
	for k in 1..=4 {
		let next = k % 4 + 1;
		edges.push((0, k));
		edges.push((k, next));
		faces.push(vec![0, k, next]);
	}
	faces.push(vec![1, 2, 3, 4]);
	Wireframe { vertices, edges, faces }
}

/// Flat annulus in the XY plane: inner ring first, then outer ring.
fn torus_wireframe(major: f64, tube: f64, segments: usize) -> Wireframe {
	let ring = |radius: f64| {
		(0..segments).map(move |i| {
			let a = i as f64 * TAU / segments as f64;
			[radius * a.cos(), radius * a.sin(), 0.0]
		})
	};
	let vertices = ring(major - tube).chain(ring(major + tube)).collect();
	let mut edges = Vec::with_capacity(segments * 2);
	let mut faces = Vec::with_capacity(segments);
	for i in 0..segments {
		let next = (i + 1) % segments;
		edges.push((i, next));
		edges.push((segments + i, segments + next));
		faces.push(vec![i, next, segments + next, segments + i]);
	}
	Wireframe { vertices, edges, faces }
}

/// Applies an XYZ Euler rotation (Z first, then Y, then X).
pub fn rotate(p: Vec3, euler: Vec3) -> Vec3 {
	let [x, y, z] = p;
	let (sz, cz) = euler[2].sin_cos();
	let (x, y) = (x * cz - y * sz, x * sz + y * cz);
	let (sy, cy) = euler[1].sin_cos();
	let (x, z) = (x * cy + z * sy, -x * sy + z * cy);
	let (sx, cx) = euler[0].sin_cos();
	let (y, z) = (y * cx - z * sx, y * sx + z * cx);
	[x, y, z]
}

fn add(a: Vec3, b: Vec3) -> Vec3 {
	[a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
	pub float_rotation: Vec3,
	pub float_offset_y: f64,
	pub spin: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneShape {
	pub kind: ShapeKind,
	pub position: Vec3,
	pub color: Rgb,
	pub size: f64,
	pub speed: f64,
	/// Time offset so shapes of the same kind don't bob together.
	pub offset: f64,
	/// Local-space mesh, built once at `size`.
	pub wireframe: Wireframe,
}

impl SceneShape {
	fn new(kind: ShapeKind, position: Vec3, color: Rgb, size: f64, speed: f64) -> Self {
		Self {
			kind,
			position,
			color,
			size,
			speed,
			offset: 0.0,
			wireframe: kind.wireframe(size),
		}
	}

	pub fn pose(&self, t: f64) -> Pose {
		let params = self.kind.float_params();
		let phase = (t + self.offset) / 4.0 * params.speed;
		let ri = params.rotation_intensity;
		Pose {
			float_rotation: [
				phase.cos() / 8.0 * ri,
				phase.sin() / 8.0 * ri,
				phase.sin() / 20.0 * ri,
			],
			float_offset_y: phase.sin() / 10.0 * params.float_intensity,
			spin: self.kind.spin(t, self.speed),
		}
	}

	/// Moves a local-space vertex into scene space for the given pose.
	pub fn place(&self, pose: &Pose, vertex: Vec3) -> Vec3 {
		let local = add(rotate(vertex, pose.spin), self.position);
		add(rotate(local, pose.float_rotation), [0.0, pose.float_offset_y, 0.0])
	}
}

/// Shapes framing the hero copy: sides, top and bottom, never the centre.
pub fn hero_shapes() -> Vec<SceneShape> {
	let mut shapes = vec![
		// left
		SceneShape::new(ShapeKind::Box, [-5.5, 2.0, -2.0], LIME, 1.2, 0.8),
		SceneShape::new(ShapeKind::Sphere, [-6.0, -1.0, -1.0], LIME, 0.6, 1.0),
		SceneShape::new(ShapeKind::Torus, [-4.5, -2.5, -1.5], CYAN, 1.0, 1.0),
		// right
		SceneShape::new(ShapeKind::Sphere, [5.5, -1.0, -1.0], PINK, 0.9, 1.0),
		SceneShape::new(ShapeKind::Cone, [5.0, 2.5, -1.0], LIME, 1.0, 1.0),
		SceneShape::new(ShapeKind::Box, [6.0, 0.0, -2.0], CYAN, 0.8, 1.2),
		// top
		SceneShape::new(ShapeKind::Box, [2.5, 3.5, -3.0], PINK, 0.6, 0.6),
		SceneShape::new(ShapeKind::Torus, [-2.5, 3.5, -2.0], LIME, 1.0, 1.0),
		// bottom
		SceneShape::new(ShapeKind::Octahedron, [0.0, -3.5, -1.0], PINK, 1.0, 1.0),
		SceneShape::new(ShapeKind::Cone, [-3.0, -3.0, -2.0], CYAN, 1.0, 1.0),
		SceneShape::new(ShapeKind::Box, [3.5, -3.0, -2.0], LIME, 0.7, 0.9),
	];
	for (i, shape) in shapes.iter_mut().enumerate() {
		shape.offset = i as f64 * 1.7;
	}
	shapes
}

/// Group rotation easing toward the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneParallax {
	pub rotation_x: f64,
	pub rotation_y: f64,
}

impl SceneParallax {
	/// `pointer` is in NDC. The per-frame factor is rescaled to `dt`.
	pub fn update(&mut self, pointer: (f64, f64), dt: f64) {
		if dt <= 0.0 {
			return;
		}
		let factor = 1.0 - (1.0 - PARALLAX_FACTOR).powf(dt * 60.0);
		self.rotation_y = lerp(self.rotation_y, pointer.0 * PARALLAX_YAW, factor);
		self.rotation_x = lerp(self.rotation_x, -pointer.1 * PARALLAX_PITCH, factor);
	}

	pub fn apply(&self, p: Vec3) -> Vec3 {
		rotate(p, [self.rotation_x, self.rotation_y, 0.0])
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
	pub x: f64,
	pub y: f64,
	/// Screen px per scene unit at this depth.
	pub scale: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
	pub distance: f64,
	/// Vertical field of view in degrees.
	pub fov: f64,
}

impl Default for Camera {
	fn default() -> Self {
		Self {
			distance: 10.0,
			fov: 45.0,
		}
	}
}

impl Camera {
	pub fn project(&self, p: Vec3, width: f64, height: f64) -> Option<Projected> {
		let depth = self.distance - p[2];
		if depth < NEAR_PLANE || width <= 0.0 || height <= 0.0 {
			return None;
		}
		let focal = 1.0 / (self.fov.to_radians() / 2.0).tan();
		let scale = focal / depth * height / 2.0;
		Some(Projected {
			x: width / 2.0 + p[0] * scale,
			y: height / 2.0 - p[1] * scale,
			scale,
		})
	}
}
