//! Typed shader uniform values

use crate::foundation::math::{Mat3, Mat4, Vec2, Vec3, Vec4};

/// Category of a uniform value
///
/// The declaration order is the order in which parameter bags push their
/// values to a shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UniformCategory {
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `float`
    Float,
    /// `vec2`
    Vec2,
    /// `vec3`
    Vec3,
    /// `vec4`
    Vec4,
    /// `mat3`
    Mat3,
    /// `mat4`
    Mat4,
}

impl UniformCategory {
    /// GLSL spelling of the type
    pub const fn glsl_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Vec2 => "vec2",
            Self::Vec3 => "vec3",
            Self::Vec4 => "vec4",
            Self::Mat3 => "mat3",
            Self::Mat4 => "mat4",
        }
    }
}

/// A value that can be assigned to a named shader uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// Boolean flag
    Bool(bool),
    /// Signed integer
    Int(i32),
    /// Scalar float
    Float(f32),
    /// 2-component vector
    Vec2(Vec2),
    /// 3-component vector
    Vec3(Vec3),
    /// 4-component vector
    Vec4(Vec4),
    /// 3x3 matrix
    Mat3(Mat3),
    /// 4x4 matrix
    Mat4(Mat4),
}

impl UniformValue {
    /// Category of this value
    pub const fn category(&self) -> UniformCategory {
        match self {
            Self::Bool(_) => UniformCategory::Bool,
            Self::Int(_) => UniformCategory::Int,
            Self::Float(_) => UniformCategory::Float,
            Self::Vec2(_) => UniformCategory::Vec2,
            Self::Vec3(_) => UniformCategory::Vec3,
            Self::Vec4(_) => UniformCategory::Vec4,
            Self::Mat3(_) => UniformCategory::Mat3,
            Self::Mat4(_) => UniformCategory::Mat4,
        }
    }

    /// The contained float, if this is a `Float`
    pub const fn as_float(&self) -> Option<f32> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The contained vector, if this is a `Vec3`
    pub const fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Self::Vec3(v) => Some(*v),
            _ => None,
        }
    }
}

macro_rules! impl_from_uniform {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for UniformValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_uniform! {
    bool => Bool,
    i32 => Int,
    f32 => Float,
    Vec2 => Vec2,
    Vec3 => Vec3,
    Vec4 => Vec4,
    Mat3 => Mat3,
    Mat4 => Mat4,
}
