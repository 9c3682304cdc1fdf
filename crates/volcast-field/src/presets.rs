//! Serializable effect presets.
//!
//! A preset is a plain parameter struct that can be loaded from JSON,
//! validated, and built into a [`ColorField`]. Building is the only place
//! noise tables are allocated; the resulting field is immutable.

use glam::DVec3;
use serde::{Deserialize, Serialize};
use volcast_noise::{DeterministicRng, Turbulence};

use crate::color::{Color, ColorRamp};
use crate::effects::{cloud, cloud_warp, fire, noise3d, positive, turbulence};
use crate::error::{validate_finite, validate_positive, FieldError, FieldResult};
use crate::field::{ColorField, Intensity};
use crate::shape::{ball_shape, paraboloid_fire_shape};

/// Upper bound on octave counts accepted from configuration.
pub const MAX_OCTAVES: u32 = 16;

/// Names accepted by [`FieldPreset::named`].
pub const PRESET_NAMES: [&str; 7] = [
    "fire",
    "smooth-fire",
    "chaotic-fire",
    "blue-fire",
    "smooth-blue-fire",
    "chaotic-blue-fire",
    "cloud",
];

/// Which noise a fire channel reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureKind {
    /// Single-octave gradient noise.
    Noise,
    /// Fractal turbulence over the same gradient noise.
    Turbulence,
}

/// Fire color palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    /// Red to yellow.
    #[default]
    Yellow,
    /// Light blue to white.
    Blue,
    /// Arbitrary endpoints.
    Custom {
        /// Color at intensity 0.
        dark: [f64; 3],
        /// Color at intensity 1.
        light: [f64; 3],
    },
}

impl Palette {
    pub fn ramp(&self) -> ColorRamp {
        match self {
            Palette::Yellow => ColorRamp::fire_yellow(),
            Palette::Blue => ColorRamp::fire_blue(),
            Palette::Custom { dark, light } => {
                ColorRamp::new(Color::from_array(*dark), Color::from_array(*light))
            }
        }
    }
}

/// Parameters for an animated fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FireParams {
    /// Seed for the shared gradient noise.
    #[serde(default)]
    pub seed: u32,

    /// Apex of the flame paraboloid in cube-local coordinates.
    #[serde(default = "default_fire_vertex")]
    pub vertex: [f64; 3],

    /// Paraboloid scale; a negative y opens the flame downward from the apex.
    #[serde(default = "default_fire_scale")]
    pub scale: [f64; 3],

    /// Noise used for the flame texture.
    #[serde(default = "default_fire_texture")]
    pub texture: TextureKind,

    /// Noise used for the domain warp.
    #[serde(default = "default_fire_displacement")]
    pub displacement: TextureKind,

    /// Turbulence octave count.
    #[serde(default = "default_octaves")]
    pub octaves: u32,

    /// Turbulence frequency multiplier per octave.
    #[serde(default = "default_lacunarity")]
    pub lacunarity: f64,

    /// Turbulence amplitude multiplier per octave.
    #[serde(default = "default_gain")]
    pub gain: f64,

    /// Intensity to color mapping.
    #[serde(default)]
    pub palette: Palette,

    /// Brightness multiplier.
    #[serde(default = "default_one")]
    pub intensity: f64,

    /// Upward scroll speed.
    #[serde(default = "default_one")]
    pub speed: f64,
}

fn default_fire_vertex() -> [f64; 3] {
    [0.5, 1.0, 0.5]
}

fn default_fire_scale() -> [f64; 3] {
    [0.5, -1.0, 0.5]
}

fn default_fire_texture() -> TextureKind {
    TextureKind::Turbulence
}

fn default_fire_displacement() -> TextureKind {
    TextureKind::Noise
}

fn default_octaves() -> u32 {
    4
}

fn default_lacunarity() -> f64 {
    2.0
}

fn default_gain() -> f64 {
    0.5
}

fn default_one() -> f64 {
    1.0
}

impl Default for FireParams {
    fn default() -> Self {
        Self {
            seed: 0,
            vertex: default_fire_vertex(),
            scale: default_fire_scale(),
            texture: default_fire_texture(),
            displacement: default_fire_displacement(),
            octaves: default_octaves(),
            lacunarity: default_lacunarity(),
            gain: default_gain(),
            palette: Palette::default(),
            intensity: default_one(),
            speed: default_one(),
        }
    }
}

impl FireParams {
    pub fn validate(&self) -> FieldResult<()> {
        for (axis, v) in ["x", "y", "z"].iter().zip(self.vertex) {
            validate_finite(&format!("vertex.{}", axis), v)?;
        }
        for (axis, s) in ["x", "y", "z"].iter().zip(self.scale) {
            let name = format!("scale.{}", axis);
            validate_finite(&name, s)?;
            if s.abs() < 1e-9 {
                return Err(FieldError::invalid_param(name, "must be non-zero"));
            }
        }
        validate_octaves("octaves", self.octaves)?;
        validate_positive("lacunarity", self.lacunarity)?;
        validate_finite("gain", self.gain)?;
        validate_finite("intensity", self.intensity)?;
        validate_finite("speed", self.speed)?;
        validate_palette(&self.palette)
    }

    /// Validate and build the fire color field.
    pub fn build(&self) -> FieldResult<ColorField> {
        self.validate()?;

        let noise = noise3d(self.seed);
        let turbulence = Intensity::from_noise(
            Turbulence::new(noise.clone(), self.octaves)
                .with_lacunarity(self.lacunarity)
                .with_gain(self.gain),
        );
        let pick = |kind: TextureKind| match kind {
            TextureKind::Noise => noise.clone(),
            TextureKind::Turbulence => turbulence.clone(),
        };

        let shape = paraboloid_fire_shape(
            DVec3::from_array(self.vertex),
            DVec3::from_array(self.scale),
        );

        tracing::debug!(
            seed = self.seed,
            texture = ?self.texture,
            displacement = ?self.displacement,
            octaves = self.octaves,
            "building fire field"
        );

        Ok(fire(
            shape,
            pick(self.texture),
            pick(self.displacement),
            self.palette.ramp(),
            self.intensity,
            self.speed,
        ))
    }
}

/// Parameters for a morphing cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CloudParams {
    /// Seed for the density noise; the warp noise uses a derived seed.
    #[serde(default)]
    pub seed: u32,

    /// Center of the ellipsoid envelope.
    #[serde(default = "default_cloud_center")]
    pub center: [f64; 3],

    /// Radii of the ellipsoid envelope.
    #[serde(default = "default_cloud_radii")]
    pub radii: [f64; 3],

    /// Octaves of the density turbulence.
    #[serde(default = "default_octaves")]
    pub octaves: u32,

    /// Octaves of the 4D warp turbulence.
    #[serde(default = "default_warp_octaves")]
    pub warp_octaves: u32,

    /// Density multiplier.
    #[serde(default = "default_cloud_density")]
    pub density: f64,

    /// Rate at which the warp evolves per unit time.
    #[serde(default = "default_evolution_rate")]
    pub evolution_rate: f64,

    /// Cloud color.
    #[serde(default = "default_cloud_color")]
    pub color: [f64; 3],
}

fn default_cloud_center() -> [f64; 3] {
    [0.5, 0.5, 0.5]
}

fn default_cloud_radii() -> [f64; 3] {
    [0.25, 0.25, 0.25]
}

fn default_warp_octaves() -> u32 {
    3
}

fn default_cloud_density() -> f64 {
    3.0
}

fn default_evolution_rate() -> f64 {
    4.0
}

fn default_cloud_color() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            seed: 0,
            center: default_cloud_center(),
            radii: default_cloud_radii(),
            octaves: default_octaves(),
            warp_octaves: default_warp_octaves(),
            density: default_cloud_density(),
            evolution_rate: default_evolution_rate(),
            color: default_cloud_color(),
        }
    }
}

impl CloudParams {
    pub fn validate(&self) -> FieldResult<()> {
        for (axis, v) in ["x", "y", "z"].iter().zip(self.center) {
            validate_finite(&format!("center.{}", axis), v)?;
        }
        for (axis, r) in ["x", "y", "z"].iter().zip(self.radii) {
            validate_positive(&format!("radii.{}", axis), r)?;
        }
        validate_octaves("octaves", self.octaves)?;
        validate_octaves("warp_octaves", self.warp_octaves)?;
        validate_finite("density", self.density)?;
        if self.density < 0.0 {
            return Err(FieldError::invalid_param("density", "must not be negative"));
        }
        validate_finite("evolution_rate", self.evolution_rate)?;
        for (channel, c) in ["r", "g", "b"].iter().zip(self.color) {
            validate_finite(&format!("color.{}", channel), c)?;
        }
        Ok(())
    }

    /// Validate and build the cloud color field.
    pub fn build(&self) -> FieldResult<ColorField> {
        self.validate()?;

        let density = turbulence(positive(noise3d(self.seed)), self.octaves);
        let warp_seed = DeterministicRng::derive_seed(self.seed, "cloud-warp");
        let warp = cloud_warp(warp_seed, self.warp_octaves);
        let shape = ball_shape(DVec3::from_array(self.center), DVec3::from_array(self.radii));

        tracing::debug!(seed = self.seed, warp_seed, octaves = self.octaves, "building cloud field");

        Ok(cloud(
            shape,
            density,
            warp,
            Color::from_array(self.color),
            self.density,
            self.evolution_rate,
        ))
    }
}

fn validate_octaves(name: &str, octaves: u32) -> FieldResult<()> {
    if octaves > MAX_OCTAVES {
        return Err(FieldError::invalid_param(
            name,
            format!("must be at most {}, got {}", MAX_OCTAVES, octaves),
        ));
    }
    Ok(())
}

fn validate_palette(palette: &Palette) -> FieldResult<()> {
    if let Palette::Custom { dark, light } = palette {
        for (i, c) in dark.iter().chain(light.iter()).enumerate() {
            validate_finite(&format!("palette[{}]", i), *c)?;
        }
    }
    Ok(())
}

/// A configured effect.
///
/// Serialized with a `kind` tag, e.g. `{"kind": "fire", "seed": 7}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldPreset {
    Fire(FireParams),
    Cloud(CloudParams),
}

impl FieldPreset {
    /// Look up a built-in preset by name.
    pub fn named(name: &str) -> FieldResult<Self> {
        let fire_preset = |texture, displacement, palette| {
            FieldPreset::Fire(FireParams {
                texture,
                displacement,
                palette,
                ..FireParams::default()
            })
        };
        match name {
            "fire" => Ok(fire_preset(TextureKind::Turbulence, TextureKind::Noise, Palette::Yellow)),
            "smooth-fire" => Ok(fire_preset(TextureKind::Noise, TextureKind::Noise, Palette::Yellow)),
            "chaotic-fire" => Ok(fire_preset(
                TextureKind::Turbulence,
                TextureKind::Turbulence,
                Palette::Yellow,
            )),
            "blue-fire" => Ok(fire_preset(TextureKind::Turbulence, TextureKind::Noise, Palette::Blue)),
            "smooth-blue-fire" => Ok(fire_preset(TextureKind::Noise, TextureKind::Noise, Palette::Blue)),
            "chaotic-blue-fire" => Ok(fire_preset(
                TextureKind::Turbulence,
                TextureKind::Turbulence,
                Palette::Blue,
            )),
            "cloud" => Ok(FieldPreset::Cloud(CloudParams::default())),
            other => Err(FieldError::UnknownPreset(other.to_string())),
        }
    }

    /// Parse a preset from JSON.
    pub fn from_json(json: &str) -> FieldResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> FieldResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> FieldResult<()> {
        match self {
            FieldPreset::Fire(params) => params.validate(),
            FieldPreset::Cloud(params) => params.validate(),
        }
    }

    /// Validate and build the color field.
    pub fn build(&self) -> FieldResult<ColorField> {
        match self {
            FieldPreset::Fire(params) => params.build(),
            FieldPreset::Cloud(params) => params.build(),
        }
    }

    /// Replace the noise seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        match &mut self {
            FieldPreset::Fire(params) => params.seed = seed,
            FieldPreset::Cloud(params) => params.seed = seed,
        }
        self
    }
}
