//! Point lights

use crate::foundation::math::Vec3;

/// Omnidirectional light with distance attenuation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// Light color
    pub color: Vec3,
    /// Light intensity multiplier
    pub intensity: f32,
    /// Distance at which the light stops contributing
    pub range: f32,
    /// Attenuation exponent
    pub decay: f32,
}

impl PointLight {
    /// Create a point light
    pub const fn new(color: Vec3, intensity: f32, range: f32, decay: f32) -> Self {
        Self {
            color,
            intensity,
            range,
            decay,
        }
    }

    /// Set the color
    #[must_use]
    pub const fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    /// Set the intensity
    #[must_use]
    pub const fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Set range and decay
    #[must_use]
    pub const fn with_attenuation(mut self, range: f32, decay: f32) -> Self {
        self.range = range;
        self.decay = decay;
        self
    }
}

impl Default for PointLight {
    /// White light of unit intensity without attenuation
    fn default() -> Self {
        Self::new(Vec3::new(1.0, 1.0, 1.0), 1.0, 0.0, 0.0)
    }
}
