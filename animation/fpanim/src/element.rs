//! Single bone/attachment transform and the interpolation trait

use serde::{Deserialize, Serialize};

/// Trait for types that can be linearly interpolated
pub trait Lerp: Clone {
    /// Linear interpolation between self and other
    ///
    /// `t` is not clamped; callers decide whether to extrapolate.
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

/// Translation and rotation offset applied to one animated node
///
/// Serialized as a flat `[offset_x, offset_y, offset_z, rotation_x,
/// rotation_y, rotation_z]` array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 6]", into = "[f32; 6]")]
pub struct AnimationElement {
    pub offset_x: f32,
    pub offset_y: f32,
    pub offset_z: f32,
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub rotation_z: f32,
}

impl AnimationElement {
    /// Neutral transform
    pub const ZERO: Self = Self {
        offset_x: 0.0,
        offset_y: 0.0,
        offset_z: 0.0,
        rotation_x: 0.0,
        rotation_y: 0.0,
        rotation_z: 0.0,
    };

    /// Create a new element from offset and rotation components
    pub const fn new(
        offset_x: f32,
        offset_y: f32,
        offset_z: f32,
        rotation_x: f32,
        rotation_y: f32,
        rotation_z: f32,
    ) -> Self {
        Self {
            offset_x,
            offset_y,
            offset_z,
            rotation_x,
            rotation_y,
            rotation_z,
        }
    }

    /// Components in serialized order
    pub const fn to_array(self) -> [f32; 6] {
        [
            self.offset_x,
            self.offset_y,
            self.offset_z,
            self.rotation_x,
            self.rotation_y,
            self.rotation_z,
        ]
    }
}

impl From<[f32; 6]> for AnimationElement {
    fn from(v: [f32; 6]) -> Self {
        Self::new(v[0], v[1], v[2], v[3], v[4], v[5])
    }
}

impl From<AnimationElement> for [f32; 6] {
    fn from(e: AnimationElement) -> Self {
        e.to_array()
    }
}

impl Lerp for AnimationElement {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            offset_x: self.offset_x.lerp(&other.offset_x, t),
            offset_y: self.offset_y.lerp(&other.offset_y, t),
            offset_z: self.offset_z.lerp(&other.offset_z, t),
            rotation_x: self.rotation_x.lerp(&other.rotation_x, t),
            rotation_y: self.rotation_y.lerp(&other.rotation_y, t),
            rotation_z: self.rotation_z.lerp(&other.rotation_z, t),
        }
    }
}
