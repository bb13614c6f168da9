//! Movement domain: avian spatial queries behind the probe's cast contract.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, ShapeCaster};

/// Casts against the avian physics world, ignoring the character's own body.
pub(crate) struct AvianCaster<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    excluded: Entity,
}

impl<'a, 'w, 's> AvianCaster<'a, 'w, 's> {
    pub(crate) fn new(spatial_query: &'a SpatialQuery<'w, 's>, excluded: Entity) -> Self {
        Self {
            spatial_query,
            excluded,
        }
    }
}

impl ShapeCaster for AvianCaster<'_, '_, '_> {
    fn cast(
        &self,
        origin: Vec2,
        size: Vec2,
        direction: Dir2,
        max_distance: f32,
        layer: GameLayer,
    ) -> bool {
        // Filter to only hit the requested layer (not sensors, other characters, etc.)
        let filter = SpatialQueryFilter::from_mask(layer).with_excluded_entities([self.excluded]);

        // Degenerate shapes are rays
        if size.x <= 0.0 || size.y <= 0.0 {
            return self
                .spatial_query
                .cast_ray(origin, direction, max_distance, true, &filter)
                .is_some();
        }

        let shape = Collider::rectangle(size.x, size.y);
        self.spatial_query
            .cast_shape(
                &shape,
                origin,
                0.0,
                direction,
                &ShapeCastConfig::from_max_distance(max_distance),
                &filter,
            )
            .is_some()
    }
}
