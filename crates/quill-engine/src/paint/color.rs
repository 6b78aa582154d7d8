/// Straight-alpha RGBA color with `f64` channels in `[0, 1]`.
///
/// This is the color stored in pen records. `a` is opacity (`1.0` = opaque).
/// Conversion to the premultiplied form the GPU blends with happens at the
/// render boundary via [`to_premul_f32`](Self::to_premul_f32).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    #[inline]
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from `0`–`255` channel values; alpha is opacity.
    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::rgba(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0, a as f64 / 255.0)
    }

    #[inline]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// Clamps every channel to `[0, 1]`. Non-finite channels become `0`.
    #[inline]
    pub fn clamped(self) -> Self {
        let c = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        Self::rgba(c(self.r), c(self.g), c(self.b), c(self.a))
    }

    #[inline]
    pub fn channels(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Premultiplied `f32` channels for GPU upload.
    #[inline]
    pub fn to_premul_f32(self) -> [f32; 4] {
        let c = self.clamped();
        [
            (c.r * c.a) as f32,
            (c.g * c.a) as f32,
            (c.b * c.a) as f32,
            c.a as f32,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_channels_normalize() {
        let c = Color::from_rgba_u8(255, 0, 51, 255);
        assert_eq!(c.channels(), [1.0, 0.0, 0.2, 1.0]);
    }

    #[test]
    fn premul_scales_rgb_by_alpha() {
        let c = Color::rgba(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c.to_premul_f32(), [0.5, 0.25, 0.0, 0.5]);
    }

    #[test]
    fn clamped_sanitizes_out_of_range() {
        let c = Color::rgba(2.0, -1.0, f64::NAN, 0.5).clamped();
        assert_eq!(c.channels(), [1.0, 0.0, 0.0, 0.5]);
    }
}
