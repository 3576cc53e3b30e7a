//! Normalized grayscale view of a camera frame.
//!
//! Camera frames arrive as a strided luma plane (planar YUV formats keep
//! only the Y channel here). [`LuminanceFrame`] wraps that plane without
//! copying it and layers optical corrections on top: a horizontal mirror for
//! front cameras and a 0/90/180/270-degree sensor rotation. Transform
//! methods return new logical views over the shared plane; addressing is
//! recomputed, the bytes are never rewritten.

use std::sync::Arc;

use crate::error::FrameError;

/// Clockwise rotation applied to a frame after any horizontal mirror.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Parse a rotation reported by the camera collaborator.
    pub fn from_degrees(degrees: u32) -> Result<Self, FrameError> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(FrameError::InvalidRotation { degrees }),
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    fn inverse(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg0,
            Self::Deg90 => Self::Deg270,
            Self::Deg180 => Self::Deg180,
            Self::Deg270 => Self::Deg90,
        }
    }

    fn then(self, other: Self) -> Self {
        let sum = (self.degrees() + other.degrees()) % 360;
        match sum {
            0 => Self::Deg0,
            90 => Self::Deg90,
            180 => Self::Deg180,
            _ => Self::Deg270,
        }
    }

    fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

/// A single-channel 8-bit image view over a strided camera plane.
///
/// The view is immutable; [`flip_horizontal`](Self::flip_horizontal) and
/// [`rotate`](Self::rotate) return new views sharing the same backing plane.
/// The effective transform is a dihedral pair: an optional mirror about the
/// vertical axis of the source, followed by a clockwise rotation. Composing
/// further flips/rotations folds into that pair, so a flip applied after a
/// rotation still mirrors the frame in its *current* orientation.
#[derive(Clone, Debug)]
pub struct LuminanceFrame {
    plane: Arc<[u8]>,
    src_width: usize,
    src_height: usize,
    row_stride: usize,
    pixel_stride: usize,
    flipped: bool,
    rotation: Rotation,
}

impl LuminanceFrame {
    /// Build a frame over a raw luma plane.
    ///
    /// `row_stride` is the byte distance between rows, `pixel_stride` the
    /// byte distance between horizontally adjacent pixels (sub-sampling when
    /// greater than one). The plane must cover every addressable pixel.
    pub fn new(
        plane: Vec<u8>,
        width: usize,
        height: usize,
        row_stride: usize,
        pixel_stride: usize,
    ) -> Result<Self, FrameError> {
        let geometry = FrameError::Geometry {
            width,
            height,
            row_stride,
            pixel_stride,
            plane_len: plane.len(),
        };
        if width == 0 || height == 0 || pixel_stride == 0 {
            return Err(geometry);
        }
        if row_stride < width * pixel_stride {
            return Err(geometry);
        }
        let last = (height - 1) * row_stride + (width - 1) * pixel_stride;
        if last >= plane.len() {
            return Err(geometry);
        }
        Ok(Self {
            plane: plane.into(),
            src_width: width,
            src_height: height,
            row_stride,
            pixel_stride,
            flipped: false,
            rotation: Rotation::Deg0,
        })
    }

    /// Logical width after the applied transforms.
    pub fn width(&self) -> usize {
        if self.rotation.swaps_axes() {
            self.src_height
        } else {
            self.src_width
        }
    }

    /// Logical height after the applied transforms.
    pub fn height(&self) -> usize {
        if self.rotation.swaps_axes() {
            self.src_width
        } else {
            self.src_height
        }
    }

    /// Mirror applied to the source plane (front-camera correction).
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// Clockwise rotation applied after the mirror.
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Luma value at logical coordinates `(x, y)`.
    ///
    /// Out-of-range access is a programming error (a stride/dimension
    /// mismatch upstream) and panics rather than returning a placeholder.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        debug_assert!(x < self.width() && y < self.height());
        // Undo the rotation, then the mirror, to land in source coords.
        let (mut sx, sy) = match self.rotation {
            Rotation::Deg0 => (x, y),
            Rotation::Deg90 => (y, self.src_height - 1 - x),
            Rotation::Deg180 => (self.src_width - 1 - x, self.src_height - 1 - y),
            Rotation::Deg270 => (self.src_width - 1 - y, x),
        };
        if self.flipped {
            sx = self.src_width - 1 - sx;
        }
        self.plane[sy * self.row_stride + sx * self.pixel_stride]
    }

    /// Return a view mirrored about the vertical axis of the frame's
    /// current orientation. `false` is the identity.
    #[must_use]
    pub fn flip_horizontal(self, flip: bool) -> Self {
        if !flip {
            return self;
        }
        // H . R(r) . F^f == R(-r) . F^(f+1); the mirror folds into the pair.
        Self {
            flipped: !self.flipped,
            rotation: self.rotation.inverse(),
            ..self
        }
    }

    /// Return a view rotated clockwise by `degrees` (0, 90, 180 or 270).
    ///
    /// For 90 and 270 the logical width and height swap. Any other value
    /// fails with [`FrameError::InvalidRotation`].
    pub fn rotate(self, degrees: u32) -> Result<Self, FrameError> {
        let rotation = Rotation::from_degrees(degrees)?;
        Ok(Self {
            rotation: self.rotation.then(rotation),
            ..self
        })
    }

    /// Materialize the view as a contiguous row-major buffer.
    ///
    /// Decoder implementations that need a packed image (stride == width)
    /// can use this instead of per-pixel access.
    pub fn to_vec(&self) -> Vec<u8> {
        let (w, h) = (self.width(), self.height());
        let mut out = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                out.push(self.get(x, y));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x2 test pattern with distinct pixel values.
    fn frame_3x2() -> LuminanceFrame {
        LuminanceFrame::new(vec![1, 2, 3, 4, 5, 6], 3, 2, 3, 1).expect("valid frame")
    }

    fn pixels(frame: &LuminanceFrame) -> Vec<u8> {
        frame.to_vec()
    }

    #[test]
    fn reads_strided_plane_at_expected_offsets() {
        // width 2, pixel stride 2 (chroma interleaved), row stride 5.
        let plane = vec![10, 0, 11, 0, 99, 20, 0, 21, 0, 99];
        let frame = LuminanceFrame::new(plane, 2, 2, 5, 2).expect("valid frame");
        assert_eq!(frame.get(0, 0), 10);
        assert_eq!(frame.get(1, 0), 11);
        assert_eq!(frame.get(0, 1), 20);
        assert_eq!(frame.get(1, 1), 21);
    }

    #[test]
    fn rejects_undersized_plane() {
        let err = LuminanceFrame::new(vec![0; 5], 3, 2, 3, 1).unwrap_err();
        assert!(matches!(err, FrameError::Geometry { plane_len: 5, .. }));
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(LuminanceFrame::new(vec![0; 4], 0, 2, 2, 1).is_err());
        assert!(LuminanceFrame::new(vec![0; 4], 2, 0, 2, 1).is_err());
    }

    #[test]
    fn rejects_row_stride_smaller_than_row() {
        assert!(LuminanceFrame::new(vec![0; 16], 4, 2, 3, 1).is_err());
    }

    #[test]
    fn rotate_zero_is_identity() {
        let frame = frame_3x2();
        let rotated = frame.clone().rotate(0).expect("rotate 0");
        assert_eq!(pixels(&frame), pixels(&rotated));
        assert_eq!((rotated.width(), rotated.height()), (3, 2));
    }

    #[test]
    fn rotate_90_swaps_axes() {
        let rotated = frame_3x2().rotate(90).expect("rotate 90");
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
        // Clockwise: the left column of the source becomes the top row.
        assert_eq!(pixels(&rotated), vec![4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn rotate_90_then_270_is_identity() {
        let frame = frame_3x2();
        let round = frame
            .clone()
            .rotate(90)
            .and_then(|f| f.rotate(270))
            .expect("rotate");
        assert_eq!(pixels(&frame), pixels(&round));
    }

    #[test]
    fn rotate_180_twice_is_identity() {
        let frame = frame_3x2();
        let round = frame
            .clone()
            .rotate(180)
            .and_then(|f| f.rotate(180))
            .expect("rotate");
        assert_eq!(pixels(&frame), pixels(&round));
    }

    #[test]
    fn flip_twice_is_identity() {
        let frame = frame_3x2();
        let round = frame.clone().flip_horizontal(true).flip_horizontal(true);
        assert_eq!(pixels(&frame), pixels(&round));
    }

    #[test]
    fn flip_mirrors_columns() {
        let flipped = frame_3x2().flip_horizontal(true);
        assert_eq!(pixels(&flipped), vec![3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn flip_false_is_identity() {
        let frame = frame_3x2();
        let same = frame.clone().flip_horizontal(false);
        assert_eq!(pixels(&frame), pixels(&same));
    }

    #[test]
    fn flip_then_rotate_matches_manual_composition() {
        // Front camera path: mirror first, then sensor rotation.
        let view = frame_3x2()
            .flip_horizontal(true)
            .rotate(90)
            .expect("rotate");
        assert_eq!((view.width(), view.height()), (2, 3));
        // Mirrored source is [3,2,1 / 6,5,4]; rotating clockwise puts its
        // left column on top.
        assert_eq!(pixels(&view), vec![6, 3, 5, 2, 4, 1]);
    }

    #[test]
    fn flip_after_rotation_mirrors_current_orientation() {
        let rotated = frame_3x2().rotate(90).expect("rotate");
        let flipped = rotated.clone().flip_horizontal(true);
        let expected: Vec<u8> = (0..rotated.height())
            .flat_map(|y| {
                (0..rotated.width())
                    .rev()
                    .map(move |x| (x, y))
                    .collect::<Vec<_>>()
            })
            .map(|(x, y)| rotated.get(x, y))
            .collect();
        assert_eq!(pixels(&flipped), expected);
    }

    #[test]
    fn invalid_rotation_is_rejected() {
        let err = frame_3x2().rotate(45).unwrap_err();
        assert_eq!(err, FrameError::InvalidRotation { degrees: 45 });
    }
}
