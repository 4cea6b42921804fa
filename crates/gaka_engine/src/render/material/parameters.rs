//! Material parameter bags
//!
//! Parameters are named uniform values. Whatever order they were set in, they
//! are pushed to the shader grouped by category: bool, int, float, vec2, vec3,
//! vec4, mat3, mat4. Within a category insertion order is kept.

use crate::animation::Skeleton;
use crate::foundation::math::{Vec3, Vec4};
use crate::render::api::UniformValue;

/// Ordered mapping from uniform name to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
    entries: Vec<(String, UniformValue)>,
}

impl ParameterBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any previous value of the same name
    pub fn set(&mut self, name: &str, value: impl Into<UniformValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Builder form of [`ParameterBag::set`]
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<UniformValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Replace the value of an existing entry of the same category
    ///
    /// Returns false, leaving the bag untouched, for unknown names or
    /// mismatched categories.
    pub fn replace(&mut self, name: &str, value: UniformValue) -> bool {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some(entry) if entry.1.category() == value.category() => {
                entry.1 = value;
                true
            }
            _ => false,
        }
    }

    /// Value stored under `name`
    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| *value)
    }

    /// Entries in upload order
    pub fn uniforms(&self) -> Vec<(String, UniformValue)> {
        let mut uniforms = self.entries.clone();
        uniforms.sort_by_key(|(_, value)| value.category());
        uniforms
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bag has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parameters attached to a mesh alongside its material
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialParameters {
    /// No parameters; every set is ignored
    Mock,
    /// Phong coefficients
    Phong(ParameterBag),
    /// Phong coefficients plus the bone transforms of a skeleton
    PhongAnimated {
        /// Phong coefficients
        bag: ParameterBag,
        /// Skeleton whose bones drive the skinned vertices
        skeleton: Skeleton,
    },
    /// Metallic-roughness factors
    MetallicRoughness(ParameterBag),
    /// Any named values
    Custom(ParameterBag),
}

impl MaterialParameters {
    /// Parameters that push nothing
    pub const fn mock() -> Self {
        Self::Mock
    }

    /// Phong parameters with a copper look
    pub fn phong() -> Self {
        Self::Phong(Self::copper_bag())
    }

    fn copper_bag() -> ParameterBag {
        Self::phong_bag(
            Vec3::new(0.191_25, 0.0735, 0.0225),
            Vec3::new(0.7038, 0.270_48, 0.0828),
            Vec3::new(0.256_777, 0.137_622, 0.086_014),
            0.1,
        )
    }

    fn phong_bag(ambient: Vec3, diffuse: Vec3, specular: Vec3, shininess: f32) -> ParameterBag {
        ParameterBag::new()
            .with("material.ambient", ambient)
            .with("material.diffuse", diffuse)
            .with("material.specular", specular)
            .with("material.shininess", shininess)
    }

    /// Phong parameters with explicit coefficients
    pub fn phong_with(ambient: Vec3, diffuse: Vec3, specular: Vec3, shininess: f32) -> Self {
        Self::Phong(Self::phong_bag(ambient, diffuse, specular, shininess))
    }

    /// Copper Phong parameters driving a skinned mesh
    pub fn phong_animated(skeleton: Skeleton) -> Self {
        Self::PhongAnimated {
            bag: Self::copper_bag(),
            skeleton,
        }
    }

    /// Metallic-roughness factors
    pub fn metallic_roughness(base_color: Vec4, roughness: f32, metallic: f32) -> Self {
        Self::MetallicRoughness(
            ParameterBag::new()
                .with("material.baseColorFactor", base_color)
                .with("material.roughnessFactor", roughness)
                .with("material.metallicFactor", metallic),
        )
    }

    /// Free-form parameters
    pub fn custom(bag: ParameterBag) -> Self {
        Self::Custom(bag)
    }

    /// Set a named value
    ///
    /// Typed variants only accept their own names with the matching category;
    /// returns whether the value was stored.
    pub fn set_parameter(&mut self, name: &str, value: impl Into<UniformValue>) -> bool {
        let value = value.into();
        let accepted = match self {
            Self::Mock => false,
            Self::Phong(bag) | Self::PhongAnimated { bag, .. } | Self::MetallicRoughness(bag) => {
                bag.replace(name, value)
            }
            Self::Custom(bag) => {
                bag.set(name, value);
                true
            }
        };
        if !accepted {
            log::warn!("Ignoring material parameter '{}' ({:?})", name, value.category());
        }
        accepted
    }

    /// Current value of a named parameter
    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.uniforms()
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Every uniform to push, in upload order
    ///
    /// For skinned parameters this includes `num_bones` and one `bones[i]`
    /// matrix per bone, read from the skeleton's current pose.
    pub fn uniforms(&self) -> Vec<(String, UniformValue)> {
        match self {
            Self::Mock => Vec::new(),
            Self::Phong(bag) | Self::MetallicRoughness(bag) | Self::Custom(bag) => bag.uniforms(),
            Self::PhongAnimated { bag, skeleton } => {
                let mut uniforms = bag.uniforms();
                let bone_count = i32::try_from(skeleton.len()).unwrap_or(i32::MAX);
                uniforms.push(("num_bones".to_string(), UniformValue::Int(bone_count)));
                uniforms.extend(
                    skeleton
                        .bones()
                        .iter()
                        .enumerate()
                        .map(|(i, bone)| (format!("bones[{i}]"), UniformValue::Mat4(bone.transform))),
                );
                uniforms.sort_by_key(|(_, value)| value.category());
                uniforms
            }
        }
    }

    /// Skeleton driven by these parameters, if any
    pub const fn skeleton(&self) -> Option<&Skeleton> {
        match self {
            Self::PhongAnimated { skeleton, .. } => Some(skeleton),
            _ => None,
        }
    }

    /// Mutable skeleton access for animation
    pub fn skeleton_mut(&mut self) -> Option<&mut Skeleton> {
        match self {
            Self::PhongAnimated { skeleton, .. } => Some(skeleton),
            _ => None,
        }
    }
}
