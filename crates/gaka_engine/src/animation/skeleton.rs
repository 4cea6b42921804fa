//! # Skeleton
//!
//! A flat array of bones forming a tree rooted at bone 0. Each bone carries
//! its skinning transform and its joint position in model space. Moving a bone
//! rotates it, and everything attached below it, about its parent's joint.

use thiserror::Error;

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};

/// Skeleton errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkeletonError {
    /// A bone index did not refer to an existing bone
    #[error("Bone index {index} out of range for a skeleton of {len} bones")]
    BoneOutOfRange {
        /// Requested index
        index: usize,
        /// Number of bones in the skeleton
        len: usize,
    },
}

/// One bone of a skeleton
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    /// Skinning transform applied to vertices weighted to this bone
    pub transform: Mat4,
    /// Joint position in model space
    pub joint: Vec3,
    /// Parent bone; `None` only for the root
    pub parent: Option<usize>,
    /// Direct children
    pub children: Vec<usize>,
}

/// Bone hierarchy used by skinned meshes
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    bones: Vec<Bone>,
}

impl Skeleton {
    /// Create a skeleton holding only the root bone
    pub fn new(root_transform: Mat4, root_joint: Vec3) -> Self {
        Self {
            bones: vec![Bone {
                transform: root_transform,
                joint: root_joint,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    fn check(&self, index: usize) -> Result<(), SkeletonError> {
        if index < self.bones.len() {
            Ok(())
        } else {
            Err(SkeletonError::BoneOutOfRange {
                index,
                len: self.bones.len(),
            })
        }
    }

    /// Attach a new bone under `parent` and return its index
    pub fn add_bone(
        &mut self,
        transform: Mat4,
        joint: Vec3,
        parent: usize,
    ) -> Result<usize, SkeletonError> {
        self.check(parent)?;
        let index = self.bones.len();
        self.bones.push(Bone {
            transform,
            joint,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.bones[parent].children.push(index);
        Ok(index)
    }

    /// Rotate a bone and its descendants about the parent's joint
    ///
    /// Moving the root is a no-op.
    ///
    /// # Arguments
    /// * `index` - Bone to move
    /// * `angle` - Rotation in degrees
    /// * `axis` - Rotation axis in model space
    pub fn move_bone(&mut self, index: usize, angle: f32, axis: &Vec3) -> Result<(), SkeletonError> {
        self.check(index)?;
        let Some(parent) = self.bones[index].parent else {
            return Ok(());
        };

        let pivot = self.bones[parent].joint;
        let motion = Mat4::translation(&pivot)
            * Mat4::rotation_degrees(angle, axis)
            * Mat4::translation(&-pivot);
        self.apply(index, &motion);
        Ok(())
    }

    fn apply(&mut self, index: usize, motion: &Mat4) {
        let bone = &mut self.bones[index];
        bone.joint = motion.transform_point3(&bone.joint);
        bone.transform = motion * bone.transform;

        let children = bone.children.clone();
        for child in children {
            self.apply(child, motion);
        }
    }

    /// Bone at `index`
    pub fn bone(&self, index: usize) -> Option<&Bone> {
        self.bones.get(index)
    }

    /// All bones, root first
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Number of bones
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Always false: a skeleton has at least its root
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::new(Mat4::identity(), Vec3::zeros())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn arm() -> Skeleton {
        let mut skeleton = Skeleton::default();
        let upper = skeleton
            .add_bone(Mat4::identity(), Vec3::new(0.5, 0.0, 0.0), 0)
            .unwrap();
        skeleton
            .add_bone(Mat4::identity(), Vec3::new(1.0, 0.0, 0.0), upper)
            .unwrap();
        skeleton
    }

    #[test]
    fn test_hierarchy() {
        let skeleton = arm();
        assert_eq!(skeleton.len(), 3);
        assert_eq!(skeleton.bones()[0].children, vec![1]);
        assert_eq!(skeleton.bones()[1].children, vec![2]);
        assert_eq!(skeleton.bones()[2].parent, Some(1));
    }

    #[test]
    fn test_move_propagates_to_descendants() {
        let mut skeleton = arm();
        skeleton.move_bone(1, 90.0, &Vec3::z()).unwrap();

        assert_relative_eq!(skeleton.bones()[0].joint, Vec3::zeros());
        assert_relative_eq!(skeleton.bones()[1].joint, Vec3::new(0.0, 0.5, 0.0), epsilon = 1e-6);
        assert_relative_eq!(skeleton.bones()[2].joint, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_eq!(skeleton.bones()[0].transform, Mat4::identity());

        // The skinning transform moves bind-pose vertices along with the bone
        let tip = skeleton.bones()[2].transform.transform_point3(&Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(tip, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_move_child_pivots_on_parent_joint() {
        let mut skeleton = arm();
        skeleton.move_bone(2, 90.0, &Vec3::z()).unwrap();

        assert_relative_eq!(skeleton.bones()[1].joint, Vec3::new(0.5, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(skeleton.bones()[2].joint, Vec3::new(0.5, 0.5, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_moving_root_is_noop() {
        let mut skeleton = arm();
        let before = skeleton.clone();
        skeleton.move_bone(0, 45.0, &Vec3::y()).unwrap();
        assert_eq!(skeleton, before);
    }

    #[test]
    fn test_out_of_range() {
        let mut skeleton = arm();
        assert_eq!(
            skeleton.move_bone(7, 10.0, &Vec3::z()),
            Err(SkeletonError::BoneOutOfRange { index: 7, len: 3 })
        );
        assert!(skeleton.add_bone(Mat4::identity(), Vec3::zeros(), 3).is_err());
        assert!(skeleton.bone(3).is_none());
    }
}
