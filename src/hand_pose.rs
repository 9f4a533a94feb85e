//! Hand landmark data structures.
//!
//! A [`HandPose`] is the 21-point hand skeleton produced by a MediaPipe-style
//! hand landmark model for one frame. Coordinates are normalized to the frame:
//! `x` grows to the right, `y` grows downward, both in `[0, 1]`. `z` is relative
//! depth and unbounded.

use crate::{constants::NUM_HAND_LANDMARKS, Error, Result};

/// Landmark indices of the MediaPipe hand topology
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// A single normalized hand landmark
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    /// X coordinate (0.0 to 1.0, normalized to frame width)
    pub x: f32,
    /// Y coordinate (0.0 to 1.0, normalized to frame height)
    pub y: f32,
    /// Depth relative to the wrist
    pub z: f32,
}

impl Landmark {
    /// Create a landmark from its coordinates
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to another landmark in normalized 3D space
    #[must_use]
    pub fn distance(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Pixel dimensions of the frame a pose was estimated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSize {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
}

impl FrameSize {
    /// Create a frame size
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Vertical midline row, rounded down
    #[must_use]
    #[allow(clippy::cast_possible_wrap)] // height / 2 always fits in i32
    pub const fn mid_y(&self) -> i32 {
        (self.height / 2) as i32
    }
}

/// All 21 landmarks of one tracked hand for a single frame
#[derive(Debug, Clone, PartialEq)]
pub struct HandPose {
    landmarks: [Landmark; NUM_HAND_LANDMARKS],
}

impl HandPose {
    /// Wrap an already validated landmark array
    #[must_use]
    pub const fn new(landmarks: [Landmark; NUM_HAND_LANDMARKS]) -> Self {
        Self { landmarks }
    }

    /// Build a pose from raw `[x, y, z]` triples, rejecting malformed input
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the point count is not 21, any
    /// coordinate is not finite, or `x`/`y` fall outside `[0, 1]`.
    pub fn from_points(points: &[[f32; 3]]) -> Result<Self> {
        if points.len() != NUM_HAND_LANDMARKS {
            return Err(Error::InvalidInput(format!(
                "Expected {NUM_HAND_LANDMARKS} hand landmarks, got {}",
                points.len()
            )));
        }

        let mut landmarks = [Landmark::default(); NUM_HAND_LANDMARKS];
        for (i, (slot, &[x, y, z])) in landmarks.iter_mut().zip(points).enumerate() {
            if !(x.is_finite() && y.is_finite() && z.is_finite()) {
                return Err(Error::InvalidInput(format!(
                    "Landmark {i} has non-finite coordinates ({x}, {y}, {z})"
                )));
            }
            if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
                return Err(Error::InvalidInput(format!(
                    "Landmark {i} is outside the normalized frame ({x}, {y})"
                )));
            }
            *slot = Landmark::new(x, y, z);
        }

        Ok(Self::new(landmarks))
    }

    /// Landmark at an anatomical index from [`landmarks`]
    ///
    /// # Panics
    ///
    /// Panics if `index` is 21 or greater.
    #[must_use]
    pub fn landmark(&self, index: usize) -> &Landmark {
        &self.landmarks[index]
    }

    /// All landmarks in index order
    #[must_use]
    pub const fn landmarks(&self) -> &[Landmark; NUM_HAND_LANDMARKS] {
        &self.landmarks
    }
}
