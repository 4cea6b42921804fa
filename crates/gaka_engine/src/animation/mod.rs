//! Skeletal animation

pub mod skeleton;

pub use skeleton::{Bone, Skeleton, SkeletonError};
