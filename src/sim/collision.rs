//! Collision detection between the spark and the playfield
//!
//! Everything here is a pure function of its arguments: no state is read
//! beyond the parameters and nothing is mutated.

use glam::Vec2;

use super::state::{Pipe, Viewport};
use crate::consts::SPARK_SIZE;
use crate::{centered_extents, ranges_overlap};

/// Axis-aligned bounding box in screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let (min, max) = centered_extents(center, size);
        Self { min, max }
    }

    /// Bounding box of a spark centered at `center`
    pub fn spark(center: Vec2) -> Self {
        Self::from_center(center, Vec2::splat(SPARK_SIZE))
    }

    #[inline]
    pub fn overlaps_x(&self, left: f32, right: f32) -> bool {
        ranges_overlap(self.min.x, self.max.x, left, right)
    }

    /// True if the box lies entirely within `[top, bottom]` vertically
    #[inline]
    pub fn within_y(&self, top: f32, bottom: f32) -> bool {
        self.min.y >= top && self.max.y <= bottom
    }
}

/// Does the spark box hit this pipe?
///
/// Only pipes overlapping the spark horizontally can hit; those hit unless the
/// spark fits entirely inside the gap.
pub fn pipe_collides(spark: &Aabb, pipe: &Pipe) -> bool {
    spark.overlaps_x(pipe.left(), pipe.right()) && !spark.within_y(pipe.gap_top, pipe.gap_bottom())
}

/// Check the spark centered at `spark` against the ceiling, the ground, and
/// every pipe
///
/// The viewport only supplies the vertical bounds.
pub fn collides(spark: Vec2, pipes: &[Pipe], viewport: &Viewport) -> bool {
    if spark.y <= viewport.ceiling() || spark.y >= viewport.floor() {
        return true;
    }

    let spark = Aabb::spark(spark);
    pipes.iter().any(|pipe| pipe_collides(&spark, pipe))
}
