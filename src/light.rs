//! The three light slots and how they reach the shader.
//!
//! Each slot holds a [`Light`] whose variant decides which attributes exist.
//! The renderer never sees a `Light` directly: [`Light::to_uniform`] flattens
//! it into a fixed [`LightUniform`] record, and [`LightToggles::mask`] blanks
//! out colour terms the user has switched off. Toggling never touches the
//! stored light.

use glam::Vec3;

/// Number of light slots in a scene.
pub const LIGHT_COUNT: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for Attenuation {
    fn default() -> Self {
        Self {
            constant: 0.05,
            linear: 0.3,
            quadratic: 0.6,
        }
    }
}

/// Ambient, diffuse and specular intensity of a light.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightColor {
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for LightColor {
    fn default() -> Self {
        Self {
            ambient: Vec3::splat(0.15),
            diffuse: Vec3::ONE,
            specular: Vec3::ONE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Directional {
        position: Vec3,
        color: LightColor,
    },
    Point {
        position: Vec3,
        color: LightColor,
        attenuation: Attenuation,
    },
    Spot {
        position: Vec3,
        color: LightColor,
        direction: Vec3,
        /// Cosine of the cone half-angle.
        cutoff: f32,
        exponent: f32,
        attenuation: Attenuation,
    },
}

impl Light {
    /// The default light for slot `0`, `1` or `2`.
    pub fn default_for_slot(slot: LightSlot) -> Self {
        let color = LightColor::default();
        match slot.index() {
            0 => Light::Directional {
                position: Vec3::new(1.0, 1.0, 1.0),
                color,
            },
            1 => Light::Point {
                position: Vec3::new(0.0, 2.0, 1.0),
                color,
                attenuation: Attenuation::default(),
            },
            _ => Light::Spot {
                position: Vec3::new(0.0, 0.0, 2.0),
                color,
                direction: Vec3::new(0.0, 0.0, -1.0),
                cutoff: 0.98,
                exponent: 100.0,
                attenuation: Attenuation::default(),
            },
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Light::Directional { .. } => "directional",
            Light::Point { .. } => "point",
            Light::Spot { .. } => "spot",
        }
    }

    pub fn position(&self) -> Vec3 {
        match self {
            Light::Directional { position, .. }
            | Light::Point { position, .. }
            | Light::Spot { position, .. } => *position,
        }
    }

    pub fn position_mut(&mut self) -> &mut Vec3 {
        match self {
            Light::Directional { position, .. }
            | Light::Point { position, .. }
            | Light::Spot { position, .. } => position,
        }
    }

    pub fn color(&self) -> &LightColor {
        match self {
            Light::Directional { color, .. }
            | Light::Point { color, .. }
            | Light::Spot { color, .. } => color,
        }
    }

    pub fn color_mut(&mut self) -> &mut LightColor {
        match self {
            Light::Directional { color, .. }
            | Light::Point { color, .. }
            | Light::Spot { color, .. } => color,
        }
    }

    /// Spot cutoff, or `None` for lights without a cone.
    pub fn cutoff_mut(&mut self) -> Option<&mut f32> {
        match self {
            Light::Spot { cutoff, .. } => Some(cutoff),
            _ => None,
        }
    }

    pub fn to_uniform(&self) -> LightUniform {
        let mut u = LightUniform::zeroed_with(self.position(), self.color());
        match self {
            Light::Directional { .. } => {}
            Light::Point { attenuation, .. } => u.set_attenuation(attenuation),
            Light::Spot {
                direction,
                cutoff,
                exponent,
                attenuation,
                ..
            } => {
                u.spot_direction = direction.to_array();
                u.spot_cutoff = *cutoff;
                u.spot_exponent = *exponent;
                u.set_attenuation(attenuation);
            }
        }
        u
    }
}

/// Index of the light currently targeted by scroll edits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LightSlot(usize);

impl LightSlot {
    pub fn new(index: usize) -> Self {
        Self(index % LIGHT_COUNT)
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn next(self) -> Self {
        Self((self.0 + 1) % LIGHT_COUNT)
    }
}

/// Which colour terms are forwarded to the shader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightToggles {
    pub ambient: bool,
    pub diffuse: bool,
    pub specular: bool,
}

impl Default for LightToggles {
    fn default() -> Self {
        Self {
            ambient: true,
            diffuse: true,
            specular: true,
        }
    }
}

impl LightToggles {
    pub fn mask(&self, mut u: LightUniform) -> LightUniform {
        if !self.ambient {
            u.ambient = [0.0; 3];
        }
        if !self.diffuse {
            u.diffuse = [0.0; 3];
        }
        if !self.specular {
            u.specular = [0.0; 3];
        }
        u
    }
}

/// Shading computed per vertex (Gouraud) or per fragment (Phong).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ShadingPath {
    PerVertex = 0,
    PerPixel = 1,
}

/// GPU layout of one light. Field order matches `struct Light` in
/// `shaders/phong.wgsl`; every `vec3` is padded to 16 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub spot_cutoff: f32,
    pub ambient: [f32; 3],
    pub spot_exponent: f32,
    pub diffuse: [f32; 3],
    pub constant_attenuation: f32,
    pub specular: [f32; 3],
    pub linear_attenuation: f32,
    pub spot_direction: [f32; 3],
    pub quadratic_attenuation: f32,
}

impl LightUniform {
    fn zeroed_with(position: Vec3, color: &LightColor) -> Self {
        Self {
            position: position.to_array(),
            ambient: color.ambient.to_array(),
            diffuse: color.diffuse.to_array(),
            specular: color.specular.to_array(),
            ..Default::default()
        }
    }

    fn set_attenuation(&mut self, a: &Attenuation) {
        self.constant_attenuation = a.constant;
        self.linear_attenuation = a.linear;
        self.quadratic_attenuation = a.quadratic;
    }
}

/// The three lights of a scene, slot `i` holding the `i`-th default kind.
pub fn default_lights() -> [Light; LIGHT_COUNT] {
    [
        Light::default_for_slot(LightSlot::new(0)),
        Light::default_for_slot(LightSlot::new(1)),
        Light::default_for_slot(LightSlot::new(2)),
    ]
}
