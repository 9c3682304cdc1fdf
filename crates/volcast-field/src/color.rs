//! Color utilities for volumetric fields.

use glam::DVec3;

/// Linear RGB color with f64 components.
///
/// Components are not restricted to [0, 1]: emitted volume color is
/// accumulated unbounded and only clamped when quantized for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    /// Create a new color.
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create a grayscale color.
    pub const fn gray(value: f64) -> Self {
        Self::rgb(value, value, value)
    }

    /// Create black.
    pub const fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Create white.
    pub const fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Create from an `[r, g, b]` array.
    pub const fn from_array(rgb: [f64; 3]) -> Self {
        Self::rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Linearly interpolate between two colors as `self·(1−t) + other·t`.
    ///
    /// `t` is not clamped: values outside [0, 1] extrapolate. At `t = 0` and
    /// `t = 1` the endpoints are reproduced exactly.
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let s = 1.0 - t;
        Color {
            r: self.r * s + other.r * t,
            g: self.g * s + other.g * t,
            b: self.b * s + other.b * t,
        }
    }

    /// Clamp all components to [0.0, 1.0].
    pub fn clamp(&self) -> Color {
        Color {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
        }
    }

    /// Raise every component to at least `floor`.
    pub fn max_scalar(&self, floor: f64) -> Color {
        Color {
            r: self.r.max(floor),
            g: self.g.max(floor),
            b: self.b.max(floor),
        }
    }

    /// Convert to 8-bit RGB (clamped).
    pub fn to_rgb8(&self) -> [u8; 3] {
        let c = self.clamp();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
        ]
    }

    /// Multiply color by a scalar.
    pub fn scale(&self, factor: f64) -> Color {
        Color {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
        }
    }

    /// Add two colors.
    pub fn add(&self, other: &Color) -> Color {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }

    /// True when no component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite()
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl From<DVec3> for Color {
    fn from(v: DVec3) -> Self {
        Self::rgb(v.x, v.y, v.z)
    }
}

impl From<Color> for DVec3 {
    fn from(c: Color) -> Self {
        DVec3::new(c.r, c.g, c.b)
    }
}

/// Intensity to color lookup between two endpoint colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRamp {
    /// Color at intensity 0.
    pub dark: Color,
    /// Color at intensity 1.
    pub light: Color,
}

impl ColorRamp {
    pub const fn new(dark: Color, light: Color) -> Self {
        Self { dark, light }
    }

    /// Red to yellow flame palette.
    pub const fn fire_yellow() -> Self {
        Self::new(Color::rgb(0.920, 0.0, 0.0), Color::rgb(0.916, 0.930, 0.122))
    }

    /// Light blue to white flame palette.
    pub const fn fire_blue() -> Self {
        Self::new(Color::rgb(0.339, 0.717, 0.925), Color::rgb(1.0, 1.0, 1.0))
    }

    /// Look up the color for `intensity`.
    ///
    /// Intensities outside [0, 1] extrapolate along the ramp instead of
    /// clamping; downstream flooring and tone mapping deal with overshoot.
    pub fn at(&self, intensity: f64) -> Color {
        self.dark.lerp(&self.light, intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_gray() {
        let gray = Color::gray(0.5);
        assert!((gray.r - 0.5).abs() < 1e-10);
        assert!((gray.g - 0.5).abs() < 1e-10);
        assert!((gray.b - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_lerp() {
        let mid = Color::black().lerp(&Color::white(), 0.5);
        assert!((mid.r - 0.5).abs() < 1e-10);
        assert!((mid.g - 0.5).abs() < 1e-10);
        assert!((mid.b - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_ramp_endpoints_exact() {
        for ramp in [ColorRamp::fire_yellow(), ColorRamp::fire_blue()] {
            assert_eq!(ramp.at(0.0), ramp.dark);
            assert_eq!(ramp.at(1.0), ramp.light);
        }
    }

    #[test]
    fn test_ramp_extrapolates() {
        let ramp = ColorRamp::new(Color::black(), Color::gray(0.5));
        let over = ramp.at(2.0);
        assert!((over.r - 1.0).abs() < 1e-12);
        let under = ramp.at(-1.0);
        assert!((under.g + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_max_scalar_floors_negative() {
        let c = Color::rgb(-0.5, 0.25, -1e-9).max_scalar(0.0);
        assert_eq!(c, Color::rgb(0.0, 0.25, 0.0));
    }

    #[test]
    fn test_to_rgb8_clamps() {
        assert_eq!(Color::rgb(2.0, -1.0, 0.5).to_rgb8(), [255, 0, 128]);
    }

    #[test]
    fn test_dvec3_conversion() {
        let c = Color::rgb(0.1, 0.2, 0.3);
        let v: DVec3 = c.into();
        assert_eq!(Color::from(v), c);
    }
}
