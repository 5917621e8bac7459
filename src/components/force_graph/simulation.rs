//! Layout simulation built on the `force_graph` physics engine.
//!
//! The engine integrates link springs and many-body charge. On top of it this
//! module keeps the adjustable force settings, a cooling schedule (alpha)
//! that scales each step and eventually stops it, fixed node positions,
//! collision separation and centering on a fixed point.

use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, warn};

/// Engine repulsion per unit of (negated) charge strength.
const CHARGE_SCALE: f64 = 5.0;
/// Engine spring stiffness per unit of link strength.
const LINK_SCALE: f64 = 0.5;
const NODE_MASS: f32 = 10.0;
const COLLIDE_STRENGTH: f64 = 0.7;
/// Spacing of the initial spiral placement.
const INITIAL_RADIUS: f64 = 10.0;

/// The three user-adjustable forces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceSettings {
	/// Attraction along links.
	pub link_strength: f64,
	/// Pairwise charge; negative repels.
	pub charge_strength: f64,
	/// Added to each node's radius to get its collision radius.
	pub collision_offset: f64,
}

impl Default for ForceSettings {
	fn default() -> Self {
		Self {
			link_strength: 0.1,
			charge_strength: -30.0,
			collision_offset: 2.0,
		}
	}
}

impl ForceSettings {
	/// The changes that turn `current` into `self`, one per differing force.
	pub fn changes_from(&self, current: &ForceSettings) -> Vec<ForceChange> {
		let mut changes = Vec::new();
		if self.link_strength != current.link_strength {
			changes.push(ForceChange::Link(self.link_strength));
		}
		if self.charge_strength != current.charge_strength {
			changes.push(ForceChange::Charge(self.charge_strength));
		}
		if self.collision_offset != current.collision_offset {
			changes.push(ForceChange::Collision(self.collision_offset));
		}
		changes
	}

	fn parameters(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: (-self.charge_strength * CHARGE_SCALE) as f32,
			force_spring: (self.link_strength * LINK_SCALE) as f32,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}
}

/// A new value for one force.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ForceChange {
	Link(f64),
	Charge(f64),
	Collision(f64),
}

impl ForceChange {
	pub fn value(self) -> f64 {
		match self {
			ForceChange::Link(v) | ForceChange::Charge(v) | ForceChange::Collision(v) => v,
		}
	}
}

/// Force-directed layout over nodes addressed by their input position.
pub struct Simulation {
	engine: ForceGraph<usize, ()>,
	links: Vec<(usize, usize)>,
	radii: Vec<f64>,
	fixed: Vec<Option<(f64, f64)>>,
	settings: ForceSettings,
	center: (f64, f64),
	alpha: f64,
	alpha_target: f64,
	alpha_min: f64,
	alpha_decay: f64,
	running: bool,
}

impl Simulation {
	/// Starts hot (alpha = 1) with nodes on a spiral around `center`.
	///
	/// `radii` gives one entry per node; `links` index into it. Self-loops
	/// exert no force and are left out.
	pub fn new(
		radii: Vec<f64>,
		links: Vec<(usize, usize)>,
		settings: ForceSettings,
		center: (f64, f64),
	) -> Self {
		let links: Vec<_> = links
			.into_iter()
			.filter(|&(s, t)| s != t && s < radii.len() && t < radii.len())
			.collect();
		let positions: Vec<_> = (0..radii.len())
			.map(|i| initial_position(i, center))
			.collect();
		let fixed = vec![None; radii.len()];
		let engine = build_engine(&settings, &positions, &fixed, &links);
		let alpha_min = 0.001;

		Self {
			engine,
			links,
			radii,
			fixed,
			settings,
			center,
			alpha: 1.0,
			alpha_target: 0.0,
			alpha_min,
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			running: true,
		}
	}

	pub fn links(&self) -> &[(usize, usize)] {
		&self.links
	}

	pub fn settings(&self) -> ForceSettings {
		self.settings
	}

	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	/// Whether the next [`tick`](Self::tick) will step.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Current positions in node order.
	pub fn positions(&self) -> Vec<(f64, f64)> {
		let mut out = vec![(0.0, 0.0); self.radii.len()];
		self.engine.visit_nodes(|node| {
			out[node.data.user_data] = (node.x() as f64, node.y() as f64);
		});
		out
	}

	pub fn position(&self, node: usize) -> Option<(f64, f64)> {
		self.positions().get(node).copied()
	}

	pub fn fixed_position(&self, node: usize) -> Option<(f64, f64)> {
		self.fixed.get(node).copied().flatten()
	}

	/// Pin `node` at `(x, y)` until [`release`](Self::release).
	pub fn fix(&mut self, node: usize, x: f64, y: f64) {
		let Some(entry) = self.fixed.get_mut(node) else {
			return;
		};
		*entry = Some((x, y));
		self.engine.visit_nodes_mut(|n| {
			if n.data.user_data == node {
				n.data.x = x as f32;
				n.data.y = y as f32;
				n.data.is_anchor = true;
			}
		});
	}

	/// Let `node` move freely again.
	///
	/// The engine keeps accumulating force on anchored nodes without ever
	/// applying it, so releasing rebuilds it to start from zero acceleration.
	pub fn release(&mut self, node: usize) {
		let Some(entry) = self.fixed.get_mut(node) else {
			return;
		};
		if entry.take().is_some() {
			self.rebuild_engine();
		}
	}

	pub fn set_alpha_target(&mut self, target: f64) {
		self.alpha_target = target;
	}

	/// Resume stepping without touching alpha.
	pub fn restart(&mut self) {
		self.running = true;
	}

	/// Raise alpha to its maximum and resume stepping.
	pub fn reheat(&mut self) {
		self.alpha = 1.0;
		self.running = true;
	}

	/// Replace one force and reheat so the layout re-settles.
	///
	/// Non-finite values are ignored.
	pub fn apply(&mut self, change: ForceChange) {
		if !change.value().is_finite() {
			warn!("author-network: ignoring non-finite force value {:?}", change);
			return;
		}
		match change {
			ForceChange::Link(v) => {
				self.settings.link_strength = v;
				self.rebuild_engine();
			}
			ForceChange::Charge(v) => {
				self.settings.charge_strength = v;
				self.rebuild_engine();
			}
			// collision is applied here, not by the engine
			ForceChange::Collision(v) => self.settings.collision_offset = v,
		}
		debug!("author-network: forces now {:?}", self.settings);
		self.reheat();
	}

	/// Advance one step. Returns `false` without doing anything once the
	/// layout has cooled below `alpha_min`.
	pub fn tick(&mut self, dt: f64) -> bool {
		if !self.running {
			return false;
		}
		self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
		self.engine.update((dt * self.alpha) as f32);
		self.constrain();
		if self.alpha < self.alpha_min {
			self.running = false;
		}
		true
	}

	/// Collision, centering and fixed positions, written back into the engine.
	fn constrain(&mut self) {
		let mut positions = self.positions();
		separate_overlaps(
			&mut positions,
			&self.radii,
			self.settings.collision_offset,
			&self.fixed,
			COLLIDE_STRENGTH,
		);
		recenter(&mut positions, self.center, &self.fixed);
		for (slot, pinned) in self.fixed.iter().enumerate() {
			if let Some(p) = pinned {
				positions[slot] = *p;
			}
		}
		self.engine.visit_nodes_mut(|n| {
			let (x, y) = positions[n.data.user_data];
			n.data.x = x as f32;
			n.data.y = y as f32;
		});
	}

	/// The engine takes its parameters at construction, so a changed force
	/// means a fresh engine seeded with the current positions.
	fn rebuild_engine(&mut self) {
		let positions = self.positions();
		self.engine = build_engine(&self.settings, &positions, &self.fixed, &self.links);
	}
}

fn build_engine(
	settings: &ForceSettings,
	positions: &[(f64, f64)],
	fixed: &[Option<(f64, f64)>],
	links: &[(usize, usize)],
) -> ForceGraph<usize, ()> {
	let mut engine = ForceGraph::new(settings.parameters());
	let handles: Vec<_> = positions
		.iter()
		.enumerate()
		.map(|(slot, &(x, y))| {
			engine.add_node(NodeData {
				x: x as f32,
				y: y as f32,
				mass: NODE_MASS,
				is_anchor: fixed[slot].is_some(),
				user_data: slot,
			})
		})
		.collect();
	for &(s, t) in links {
		engine.add_edge(handles[s], handles[t], EdgeData::default());
	}
	engine
}

/// Phyllotaxis spiral, so no two nodes start on top of each other.
fn initial_position(i: usize, center: (f64, f64)) -> (f64, f64) {
	let golden_angle = PI * (3.0 - 5f64.sqrt());
	let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
	let angle = i as f64 * golden_angle;
	(
		center.0 + radius * angle.cos(),
		center.1 + radius * angle.sin(),
	)
}

/// Push apart every pair closer than the sum of their collision radii
/// (`radius + offset`). Fixed nodes never move; otherwise the smaller node
/// moves further.
pub fn separate_overlaps(
	positions: &mut [(f64, f64)],
	radii: &[f64],
	offset: f64,
	fixed: &[Option<(f64, f64)>],
	strength: f64,
) {
	let n = positions.len();
	for i in 0..n {
		for j in (i + 1)..n {
			let (ri, rj) = (radii[i] + offset, radii[j] + offset);
			let min_distance = ri + rj;
			if min_distance <= 0.0 {
				continue;
			}
			let (dx, dy) = (
				positions[j].0 - positions[i].0,
				positions[j].1 - positions[i].1,
			);
			let dist_sq = dx * dx + dy * dy;
			if dist_sq >= min_distance * min_distance {
				continue;
			}
			let (ux, uy, dist) = if dist_sq < 1e-12 {
				// coincident: pick a deterministic direction
				let angle = ((i as f64) * 0.618_034 + (j as f64) * 0.414_214) * 2.0 * PI;
				(angle.cos(), angle.sin(), 0.0)
			} else {
				let dist = dist_sq.sqrt();
				(dx / dist, dy / dist, dist)
			};

			let (wi, wj) = match (fixed[i].is_some(), fixed[j].is_some()) {
				(true, true) => continue,
				(true, false) => (0.0, 1.0),
				(false, true) => (1.0, 0.0),
				(false, false) => {
					let (a, b) = (ri * ri, rj * rj);
					(b / (a + b), a / (a + b))
				}
			};

			let push = (min_distance - dist) * strength;
			positions[i].0 -= ux * push * wi;
			positions[i].1 -= uy * push * wi;
			positions[j].0 += ux * push * wj;
			positions[j].1 += uy * push * wj;
		}
	}
}

/// Shift free nodes so the mean of all positions lands on `center`.
pub fn recenter(positions: &mut [(f64, f64)], center: (f64, f64), fixed: &[Option<(f64, f64)>]) {
	if positions.is_empty() {
		return;
	}
	let n = positions.len() as f64;
	let (sx, sy) = positions
		.iter()
		.fold((0.0, 0.0), |(ax, ay), &(x, y)| (ax + x, ay + y));
	let (shift_x, shift_y) = (center.0 - sx / n, center.1 - sy / n);
	for (p, pinned) in positions.iter_mut().zip(fixed) {
		if pinned.is_none() {
			p.0 += shift_x;
			p.1 += shift_y;
		}
	}
}
