use glam::{Mat4, Quat, Vec3};

/// Position + orientation, no scale.
///
/// All poses handed across the platform seams (viewer pose, hit-test
/// results, committed anchors) use this representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    pub position: Vec3,
    pub orientation: Quat,
}

impl RigidTransform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Quat::IDENTITY,
    };

    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Decompose a 4x4 matrix, discarding any scale component.
    pub fn from_matrix(matrix: &Mat4) -> Self {
        let (_, orientation, position) = matrix.to_scale_rotation_translation();
        Self {
            position,
            orientation,
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// Unit vector along this pose's forward (-Z) axis.
    pub fn forward(&self) -> Vec3 {
        self.orientation * Vec3::NEG_Z
    }

    /// A pose `distance` metres ahead of this one, keeping the orientation.
    ///
    /// Used by the auto-placement fallback: the object lands in front of
    /// the viewer, heading the way the viewer is heading.
    pub fn stepped_forward(&self, distance: f32) -> Self {
        Self {
            position: self.position + self.forward() * distance,
            orientation: self.orientation,
        }
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One per-frame hit-test result.
///
/// Produced once per frame, consumed immediately to update the reticle,
/// never persisted. Zero hit results is the expected steady state (camera
/// pointing at the sky or a featureless surface), so "invalid" is a value,
/// not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingSample {
    pose: Option<RigidTransform>,
}

impl TrackingSample {
    pub fn tracked(pose: RigidTransform) -> Self {
        Self { pose: Some(pose) }
    }

    pub fn invalid() -> Self {
        Self { pose: None }
    }

    pub fn is_valid(&self) -> bool {
        self.pose.is_some()
    }

    pub fn pose(&self) -> Option<&RigidTransform> {
        self.pose.as_ref()
    }
}

/// Where the virtual content is fixed in the physical environment.
///
/// Committed by a tap while tracking, or by the auto-placement fallback.
/// Once committed it does not change until the session ends or is
/// explicitly cleared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneAnchor {
    pub transform: RigidTransform,
    /// True when this anchor came from the grace-period fallback rather
    /// than a user-committed hit-test pose.
    pub auto_placed: bool,
}

impl SceneAnchor {
    pub fn committed(transform: RigidTransform) -> Self {
        Self {
            transform,
            auto_placed: false,
        }
    }

    pub fn auto_placed(transform: RigidTransform) -> Self {
        Self {
            transform,
            auto_placed: true,
        }
    }
}
