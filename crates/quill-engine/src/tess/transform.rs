use crate::coords::Vec2;

/// World-coordinate rectangle mapped onto the full viewport.
///
/// `to_ndc` maps `min` to `(-1, -1)` and `max` to `(1, 1)`; y points up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Default for WorldBounds {
    fn default() -> Self {
        Self::new(Vec2::new(-320.0, -180.0), Vec2::new(320.0, 180.0))
    }
}

impl WorldBounds {
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn centre(&self) -> Vec2 {
        Vec2::new((self.min.x + self.max.x) * 0.5, (self.min.y + self.max.y) * 0.5)
    }

    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new((self.max.x - self.min.x) * 0.5, (self.max.y - self.min.y) * 0.5)
    }

    /// `1 / halfExtent` per axis.
    #[inline]
    pub fn scale(&self) -> Vec2 {
        let h = self.half_extent();
        Vec2::new(1.0 / h.x, 1.0 / h.y)
    }

    #[inline]
    pub fn to_ndc(&self, p: Vec2) -> Vec2 {
        let c = self.centre();
        let s = self.scale();
        Vec2::new((p.x - c.x) * s.x, (p.y - c.y) * s.y)
    }

    /// Maps a window position (physical pixels, origin top-left, y down) into
    /// world coordinates.
    ///
    /// A zero-sized window maps everything to the centre.
    pub fn screen_to_world(&self, screen: Vec2, window: (u32, u32)) -> Vec2 {
        let (w, h) = window;
        if w == 0 || h == 0 {
            return self.centre();
        }
        let u = screen.x / w as f64;
        let v = screen.y / h as f64;
        Vec2::new(
            self.min.x + u * (self.max.x - self.min.x),
            self.max.y - v * (self.max.y - self.min.y),
        )
    }

    /// `false` when either axis has zero or non-finite extent.
    pub fn is_valid(&self) -> bool {
        let h = self.half_extent();
        h.is_finite() && h.x != 0.0 && h.y != 0.0
    }
}
