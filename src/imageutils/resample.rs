//! Per-channel image resampling.

use std::fmt;
use std::str::FromStr;

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma};

use super::array::PixelArray;
use super::error::ImageError;

/// Interpolation used when resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResampleMethod {
    /// Nearest neighbor (pixelated)
    Nearest,
    /// Linear interpolation
    Bilinear,
    /// Cubic spline interpolation
    #[default]
    Bicubic,
    /// Lanczos windowed sinc (best for downsampling)
    Lanczos,
}

impl ResampleMethod {
    pub const ALL: [ResampleMethod; 4] = [
        ResampleMethod::Nearest,
        ResampleMethod::Bilinear,
        ResampleMethod::Bicubic,
        ResampleMethod::Lanczos,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResampleMethod::Nearest => "nearest",
            ResampleMethod::Bilinear => "bilinear",
            ResampleMethod::Bicubic => "bicubic",
            ResampleMethod::Lanczos => "lanczos",
        }
    }

    fn filter(self) -> FilterType {
        match self {
            ResampleMethod::Nearest => FilterType::Nearest,
            ResampleMethod::Bilinear => FilterType::Triangle,
            ResampleMethod::Bicubic => FilterType::CatmullRom,
            ResampleMethod::Lanczos => FilterType::Lanczos3,
        }
    }
}

impl FromStr for ResampleMethod {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| ImageError::UnknownMethod(s.to_string()))
    }
}

impl fmt::Display for ResampleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resample an HxW or HxWxC array to `height` x `width`.
///
/// Every channel plane is resized independently and the result keeps the
/// input's layout: HxW in, HxW out; HxWxC in, HxWxC out.
///
/// # Errors
/// - `UnsupportedRank` for arrays that are not rank 2 or 3
/// - `EmptyTarget` if `height` or `width` is zero
/// - `EmptySource` if the input has no pixels
pub fn resample(
    arr: &PixelArray,
    height: u32,
    width: u32,
    method: ResampleMethod,
) -> Result<PixelArray, ImageError> {
    let (src_h, src_w, channels) = arr.dims()?;
    if height == 0 || width == 0 {
        return Err(ImageError::EmptyTarget { height, width });
    }
    if src_h == 0 || src_w == 0 {
        return Err(ImageError::EmptySource {
            height: src_h,
            width: src_w,
        });
    }

    let (h, w) = (height as usize, width as usize);
    if arr.ndim() == 2 {
        let plane = resample_plane(arr.data(), src_h, src_w, height, width, method)?;
        return PixelArray::plane(h, w, plane);
    }

    let planes = (0..channels)
        .map(|c| resample_plane(&arr.channel_plane(c), src_h, src_w, height, width, method))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PixelArray::from_planes(h, w, &planes))
}

/// Headroom kept on each side of a plane's value range, in multiples of
/// that range.
const HEADROOM: f32 = 1.0;

/// Resize a single HxW plane.
///
/// The image library clamps float samples to [0, 1], so the plane is mapped
/// onto that range and back. The window spans one full value range of
/// headroom on each side of the input, which leaves room for the negative
/// lobes of the bicubic and lanczos kernels.
fn resample_plane(
    plane: &[f32],
    src_h: usize,
    src_w: usize,
    height: u32,
    width: u32,
    method: ResampleMethod,
) -> Result<Vec<f32>, ImageError> {
    let lo = plane.iter().copied().fold(f32::INFINITY, f32::min);
    let hi = plane.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let span = hi - lo;
    let out_len = height as usize * width as usize;

    if !(span.is_finite() && span > 0.0) {
        // Constant plane
        return Ok(vec![lo; out_len]);
    }

    let base = lo - span * HEADROOM;
    let window = span * (1.0 + 2.0 * HEADROOM);
    let normalized: Vec<f32> = plane.iter().map(|v| (v - base) / window).collect();
    let buf: ImageBuffer<Luma<f32>, Vec<f32>> =
        ImageBuffer::from_raw(src_w as u32, src_h as u32, normalized).ok_or_else(|| {
            ImageError::ShapeMismatch {
                shape: vec![src_h, src_w],
                expected: src_h * src_w,
                actual: plane.len(),
            }
        })?;

    let resized = imageops::resize(&buf, width, height, method.filter());
    Ok(resized
        .into_raw()
        .into_iter()
        .map(|v| v * window + base)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names_round_trip() {
        for method in ResampleMethod::ALL {
            assert_eq!(method.name().parse::<ResampleMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_unknown_method() {
        let err = "cubic".parse::<ResampleMethod>().unwrap_err();
        assert!(matches!(err, ImageError::UnknownMethod(ref m) if m == "cubic"));
    }

    #[test]
    fn test_default_is_bicubic() {
        assert_eq!(ResampleMethod::default(), ResampleMethod::Bicubic);
    }

    #[test]
    fn test_constant_plane_stays_constant() {
        let out = resample_plane(&[7.0; 6], 2, 3, 5, 4, ResampleMethod::Lanczos).unwrap();
        assert_eq!(out, vec![7.0; 20]);
    }

    #[test]
    fn test_bicubic_step_edge_overshoots_input_range() {
        let out =
            resample_plane(&[50.0, 50.0, 200.0, 200.0], 1, 4, 1, 8, ResampleMethod::Bicubic)
                .unwrap();
        assert_eq!(out.len(), 8);
        // Catmull-Rom ringing on both sides of the edge
        assert!(out[2] < 45.0, "no undershoot: {:?}", out);
        assert!(out[5] > 205.0, "no overshoot: {:?}", out);
        assert!(out[3] > out[2] && out[4] > out[3] && out[5] > out[4]);
    }

    #[test]
    fn test_lanczos_keeps_negative_lobes() {
        let out = resample_plane(&[0.0, 0.0, 1.0, 1.0], 1, 4, 1, 8, ResampleMethod::Lanczos)
            .unwrap();
        assert!(out.iter().any(|&v| v < 0.0), "no undershoot: {:?}", out);
        assert!(out.iter().any(|&v| v > 1.0), "no overshoot: {:?}", out);
    }

    #[test]
    fn test_bilinear_stays_within_input_range() {
        let out = resample_plane(&[50.0, 50.0, 200.0, 200.0], 1, 4, 1, 8, ResampleMethod::Bilinear)
            .unwrap();
        assert!(out.iter().all(|&v| (49.999..=200.001).contains(&v)), "{:?}", out);
    }

    #[test]
    fn test_plane_values_outside_unit_range_survive() {
        let out = resample_plane(&[-100.0, 900.0], 1, 2, 1, 2, ResampleMethod::Nearest).unwrap();
        assert_eq!(out.len(), 2);
        assert!((out[0] + 100.0).abs() < 1e-3);
        assert!((out[1] - 900.0).abs() < 1e-3);
    }
}
