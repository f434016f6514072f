//! Row-major numeric pixel arrays in HxW or HxWxC (channel-packed) layout.

use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

use super::error::ImageError;

/// A dense array of `f32` samples with an explicit shape.
///
/// Images are rank 2 (`[height, width]`, one channel) or rank 3
/// (`[height, width, channels]`, channels interleaved per pixel). Other ranks
/// can be stored but are rejected by the image operations.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelArray {
    shape: Vec<usize>,
    data: Vec<f32>,
}

impl PixelArray {
    /// Wrap `data` with the given shape.
    ///
    /// # Errors
    /// Returns `ShapeMismatch` if `data.len()` is not the product of `shape`.
    pub fn new(shape: Vec<usize>, data: Vec<f32>) -> Result<Self, ImageError> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(ImageError::ShapeMismatch {
                shape,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// A single-channel HxW array.
    pub fn plane(height: usize, width: usize, data: Vec<f32>) -> Result<Self, ImageError> {
        Self::new(vec![height, width], data)
    }

    /// An HxWxC channel-packed array.
    pub fn packed(
        height: usize,
        width: usize,
        channels: usize,
        data: Vec<f32>,
    ) -> Result<Self, ImageError> {
        Self::new(vec![height, width, channels], data)
    }

    /// An HxWxC array built from C separate HxW planes.
    pub(crate) fn from_planes(height: usize, width: usize, planes: &[Vec<f32>]) -> Self {
        let channels = planes.len();
        let mut data = Vec::with_capacity(height * width * channels);
        for i in 0..height * width {
            for plane in planes {
                data.push(plane[i]);
            }
        }
        Self {
            shape: vec![height, width, channels],
            data,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn into_data(self) -> Vec<f32> {
        self.data
    }

    /// Sample at a multi-dimensional index, or `None` when out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<f32> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut offset = 0;
        for (&i, &dim) in index.iter().zip(&self.shape) {
            if i >= dim {
                return None;
            }
            offset = offset * dim + i;
        }
        self.data.get(offset).copied()
    }

    /// `(height, width, channels)` for rank-2 and rank-3 arrays.
    pub fn dims(&self) -> Result<(usize, usize, usize), ImageError> {
        match self.shape[..] {
            [h, w] => Ok((h, w, 1)),
            [h, w, c] => Ok((h, w, c)),
            _ => Err(ImageError::UnsupportedRank(self.ndim())),
        }
    }

    /// Copy out channel `c` as a contiguous HxW plane.
    pub(crate) fn channel_plane(&self, c: usize) -> Vec<f32> {
        let channels = self.shape.get(2).copied().unwrap_or(1);
        self.data
            .iter()
            .skip(c)
            .step_by(channels)
            .copied()
            .collect()
    }

    /// Drop a trailing single-channel axis (HxWx1 becomes HxW).
    pub fn squeeze_channels(mut self) -> Self {
        if matches!(self.shape[..], [_, _, 1]) {
            self.shape.pop();
        }
        self
    }

    /// Convert a decoded image to an array of 0-255 samples.
    ///
    /// Grayscale images become HxW, everything else HxWxC with the image's
    /// own channel count (2, 3 or 4). Deeper bit depths are reduced to 8 bits.
    pub fn from_dynamic_image(img: &DynamicImage) -> Self {
        let (w, h) = (img.width() as usize, img.height() as usize);
        let bytes_to_f32 = |raw: Vec<u8>| raw.into_iter().map(f32::from).collect::<Vec<_>>();
        match img.color().channel_count() {
            1 => Self {
                shape: vec![h, w],
                data: bytes_to_f32(img.to_luma8().into_raw()),
            },
            2 => Self {
                shape: vec![h, w, 2],
                data: bytes_to_f32(img.to_luma_alpha8().into_raw()),
            },
            3 => Self {
                shape: vec![h, w, 3],
                data: bytes_to_f32(img.to_rgb8().into_raw()),
            },
            _ => Self {
                shape: vec![h, w, 4],
                data: bytes_to_f32(img.to_rgba8().into_raw()),
            },
        }
    }

    /// Convert to an 8-bit image: values are clipped to [0, 255] and rounded
    /// half to even.
    ///
    /// HxW and HxWx1 become grayscale; 2, 3 and 4 channels become
    /// gray+alpha, RGB and RGBA.
    pub fn to_dynamic_image(&self) -> Result<DynamicImage, ImageError> {
        let (h, w, c) = self.dims()?;
        let bytes: Vec<u8> = self
            .data
            .iter()
            .map(|v| v.clamp(0.0, 255.0).round_ties_even() as u8)
            .collect();
        let (w, h) = (w as u32, h as u32);
        let shape_err = || ImageError::ShapeMismatch {
            shape: self.shape.clone(),
            expected: self.data.len(),
            actual: self.data.len(),
        };

        let img = match c {
            1 => DynamicImage::ImageLuma8(GrayImage::from_raw(w, h, bytes).ok_or_else(shape_err)?),
            2 => DynamicImage::ImageLumaA8(
                GrayAlphaImage::from_raw(w, h, bytes).ok_or_else(shape_err)?,
            ),
            3 => DynamicImage::ImageRgb8(RgbImage::from_raw(w, h, bytes).ok_or_else(shape_err)?),
            4 => DynamicImage::ImageRgba8(RgbaImage::from_raw(w, h, bytes).ok_or_else(shape_err)?),
            other => return Err(ImageError::UnsupportedChannels(other)),
        };
        Ok(img)
    }
}
