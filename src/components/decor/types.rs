use std::f64::consts::TAU;

/// Brand palette shared by nodes and scene shapes.
pub const LIME: Rgb = Rgb(0xBF, 0xFF, 0x00);
pub const CYAN: Rgb = Rgb(0x00, 0xD4, 0xFF);
pub const PINK: Rgb = Rgb(0xFF, 0x33, 0x99);
pub const INK: Rgb = Rgb(0x0D, 0x0D, 0x0D);

pub const PALETTE: [Rgb; 3] = [LIME, CYAN, PINK];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
	pub fn css(self) -> String {
		format!("rgb({}, {}, {})", self.0, self.1, self.2)
	}

	pub fn css_alpha(self, alpha: f64) -> String {
		format!("rgba({}, {}, {}, {})", self.0, self.1, self.2, alpha.clamp(0.0, 1.0))
	}

	/// Multiplies every channel by `factor`, saturating at white.
	pub fn shade(self, factor: f64) -> Self {
		let f = |c: u8| (c as f64 * factor).round().clamp(0.0, 255.0) as u8;
		Self(f(self.0), f(self.1), f(self.2))
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
	Mobile,
	Desktop,
}

impl LayoutMode {
	pub fn for_width(width: f64, breakpoint: f64) -> Self {
		if width < breakpoint {
			Self::Mobile
		} else {
			Self::Desktop
		}
	}
}

/// Where a node sits, in percent of the container (centre at 50, 50).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodePosition {
	Polar { angle: f64, radius: f64 },
	Percent { x: f64, y: f64 },
}

impl NodePosition {
	pub fn to_percent(self) -> (f64, f64) {
		match self {
			Self::Polar { angle, radius } => {
				(50.0 + radius * angle.cos(), 50.0 + radius * angle.sin())
			}
			Self::Percent { x, y } => (x, y),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
	Circle,
	Square,
	Diamond,
	Triangle,
}

impl Glyph {
	pub const ALL: [Glyph; 4] = [Glyph::Circle, Glyph::Square, Glyph::Diamond, Glyph::Triangle];

	/// Outline of the glyph centred on `(x, y)`. Empty for circles.
	pub fn outline(self, x: f64, y: f64, r: f64) -> Vec<(f64, f64)> {
		match self {
			Glyph::Circle => Vec::new(),
			Glyph::Square => {
				let h = r * 0.85;
				vec![(x - h, y - h), (x + h, y - h), (x + h, y + h), (x - h, y + h)]
			}
			Glyph::Diamond => vec![(x, y - r), (x + r, y), (x, y + r), (x - r, y)],
			Glyph::Triangle => (0..3)
				.map(|i| {
					let a = -TAU / 4.0 + i as f64 * TAU / 3.0;
					(x + r * a.cos(), y + r * a.sin())
				})
				.collect(),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	pub id: usize,
	pub position: NodePosition,
	/// Diameter in px.
	pub size: f64,
	pub base_opacity: f64,
	/// Radians, desynchronises per-node pulsing.
	pub phase: f64,
	pub glyph: Glyph,
	pub color: Rgb,
}

impl Node {
	pub fn percent(&self) -> (f64, f64) {
		self.position.to_percent()
	}
}

/// Unordered pair of node ids, stored with `a < b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
	a: usize,
	b: usize,
}

impl Edge {
	pub fn new(a: usize, b: usize) -> Self {
		Self { a: a.min(b), b: a.max(b) }
	}

	pub fn endpoints(&self) -> (usize, usize) {
		(self.a, self.b)
	}
}
