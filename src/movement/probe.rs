//! Movement domain: ground, wall, step and head probes over a shape-cast primitive.

use bevy::math::Dir2;
use bevy::prelude::*;

use crate::config::ProbeTuning;
use crate::movement::GameLayer;

/// Shape-cast query supplied by whatever collision engine hosts the character.
///
/// Casts an axis-aligned box of `size` centred on `origin` along `direction` and reports
/// whether anything on `layer` is hit within `max_distance`. A zero `size` is a ray.
pub trait ShapeCaster {
    fn cast(
        &self,
        origin: Vec2,
        size: Vec2,
        direction: Dir2,
        max_distance: f32,
        layer: GameLayer,
    ) -> bool;
}

/// Caster for bodies with no collision world at all: nothing is ever hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCollision;

impl ShapeCaster for NoCollision {
    fn cast(&self, _: Vec2, _: Vec2, _: Dir2, _: f32, _: GameLayer) -> bool {
        false
    }
}

/// Axis-aligned static geometry for headless simulation.
#[derive(Debug, Clone, Default)]
pub struct StaticBoxWorld {
    boxes: Vec<StaticBox>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticBox {
    pub center: Vec2,
    pub half_extents: Vec2,
    pub layer: GameLayer,
}

impl StaticBoxWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_box(mut self, center: Vec2, size: Vec2, layer: GameLayer) -> Self {
        self.add_box(center, size, layer);
        self
    }

    pub fn add_box(&mut self, center: Vec2, size: Vec2, layer: GameLayer) {
        self.boxes.push(StaticBox {
            center,
            half_extents: size * 0.5,
            layer,
        });
    }

    pub fn boxes(&self) -> &[StaticBox] {
        &self.boxes
    }
}

impl ShapeCaster for StaticBoxWorld {
    fn cast(
        &self,
        origin: Vec2,
        size: Vec2,
        direction: Dir2,
        max_distance: f32,
        layer: GameLayer,
    ) -> bool {
        let half = size.abs() * 0.5;
        let end = origin + *direction * max_distance.max(0.0);
        self.boxes
            .iter()
            .filter(|b| b.layer == layer)
            .any(|b| segment_hits_box(origin, end, b.center, b.half_extents + half))
    }
}

/// Slab test of segment `a -> b` against the box (inclusive of its boundary).
fn segment_hits_box(a: Vec2, b: Vec2, center: Vec2, half: Vec2) -> bool {
    let min = center - half;
    let max = center + half;
    let delta = b - a;
    let mut t_min = 0.0_f32;
    let mut t_max = 1.0_f32;

    for axis in 0..2 {
        let (start, d, lo, hi) = (a[axis], delta[axis], min[axis], max[axis]);
        if d.abs() < f32::EPSILON {
            if start < lo || start > hi {
                return false;
            }
        } else {
            let inv = 1.0 / d;
            let (t0, t1) = {
                let t0 = (lo - start) * inv;
                let t1 = (hi - start) * inv;
                if t0 <= t1 { (t0, t1) } else { (t1, t0) }
            };
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return false;
            }
        }
    }
    true
}

/// Collision shape of the character body (axis-aligned box centred on the position).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyShape {
    pub size: Vec2,
}

impl BodyShape {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size * 0.5
    }
}

/// A climbable ledge detected ahead of the character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepHit {
    /// +1 right, -1 left
    pub direction: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProbeResult {
    pub grounded: bool,
    pub touching_wall: bool,
    pub touching_wall_left: bool,
    pub touching_wall_right: bool,
    pub bumped_head: bool,
    pub step_hit: Option<StepHit>,
}

/// Probe the surroundings of a body at `position`.
///
/// Without a body shape every query reports "no hit", which leaves the character in
/// its least capable state (airborne, untouched) rather than failing.
pub fn probe(
    body: Option<&BodyShape>,
    position: Vec2,
    velocity: Vec2,
    step_height: f32,
    step_width: f32,
    caster: &dyn ShapeCaster,
    tuning: &ProbeTuning,
) -> ProbeResult {
    let Some(body) = body else {
        return ProbeResult::default();
    };
    let half = body.half_extents();

    // Feet: thin slice at the bottom of the body, cast straight down
    let feet_height = tuning.feet_height.min(body.size.y);
    let feet_size = Vec2::new(body.size.x * tuning.feet_width_fraction, feet_height);
    let feet_origin = position - Vec2::new(0.0, half.y - feet_height * 0.5);
    let grounded = caster.cast(
        feet_origin,
        feet_size,
        Dir2::NEG_Y,
        tuning.ground_cast_distance,
        GameLayer::Ground,
    );

    // Walls: body shape, shrunk vertically so floors and ceilings don't register
    let wall_size = Vec2::new(body.size.x, (body.size.y - 2.0 * feet_height).max(1.0));
    let touching_wall_left = caster.cast(
        position,
        wall_size,
        Dir2::NEG_X,
        tuning.wall_cast_distance,
        GameLayer::Wall,
    );
    let touching_wall_right = caster.cast(
        position,
        wall_size,
        Dir2::X,
        tuning.wall_cast_distance,
        GameLayer::Wall,
    );

    // Head: narrowed slice at the top, cast up
    let head_size = Vec2::new(body.size.x * tuning.head_width_fraction, feet_height);
    let head_origin = position + Vec2::new(0.0, half.y - feet_height * 0.5);
    let bumped_head = caster.cast(
        head_origin,
        head_size,
        Dir2::Y,
        tuning.head_cast_distance,
        GameLayer::Ground,
    );

    let step_hit = probe_step(
        half,
        position,
        velocity,
        step_height,
        step_width,
        caster,
        tuning,
    );

    ProbeResult {
        grounded,
        touching_wall: touching_wall_left || touching_wall_right,
        touching_wall_left,
        touching_wall_right,
        bumped_head,
        step_hit,
    }
}

/// Two parallel rays in the direction of travel: blocked at the ankle but clear one
/// step higher means a ledge we can climb.
fn probe_step(
    half: Vec2,
    position: Vec2,
    velocity: Vec2,
    step_height: f32,
    step_width: f32,
    caster: &dyn ShapeCaster,
    tuning: &ProbeTuning,
) -> Option<StepHit> {
    if step_height <= 0.0 {
        return None;
    }
    let direction = if velocity.x > f32::EPSILON {
        Dir2::X
    } else if velocity.x < -f32::EPSILON {
        Dir2::NEG_X
    } else {
        return None;
    };

    let reach = half.x + step_width.max(tuning.wall_cast_distance);
    let ankle = position - Vec2::new(0.0, half.y - tuning.ankle_height);
    let raised = ankle + Vec2::new(0.0, step_height);

    let low_hit = caster.cast(ankle, Vec2::ZERO, direction, reach, GameLayer::Ground);
    if !low_hit {
        return None;
    }
    let high_hit = caster.cast(raised, Vec2::ZERO, direction, reach, GameLayer::Ground);
    if high_hit {
        return None;
    }
    Some(StepHit {
        direction: direction.x.signum(),
    })
}
