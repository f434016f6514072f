//! Unit tests for the image helpers (resample, EmbeddedImage).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tidbits::imageutils::{
    resample, EmbeddedImage, ImageError, PixelArray, ResampleMethod, NEAREST_STYLE,
};

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

/// Extract the base64 payload from an `<img>` tag and decode it.
fn decode_payload(html: &str) -> image::DynamicImage {
    let start = html.find(";base64,").expect("data URI") + ";base64,".len();
    let end = html[start..].find('"').expect("closing quote") + start;
    let bytes = STANDARD.decode(&html[start..end]).expect("valid base64");
    image::load_from_memory(&bytes).expect("decodable image")
}

// ==================== Resample Tests ====================

#[test]
fn test_resample_1x1_nearest_is_identity() {
    let img = PixelArray::plane(1, 1, vec![1.0]).unwrap();
    let result = resample(&img, 1, 1, ResampleMethod::Nearest).unwrap();
    assert_eq!(result.shape(), &[1, 1]);
    assert_eq!(result.get(&[0, 0]), Some(1.0));
}

#[test]
fn test_resample_2_to_4_nearest() {
    let img = PixelArray::plane(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let result = resample(&img, 4, 4, ResampleMethod::Nearest).unwrap();
    assert_eq!(result.shape(), &[4, 4]);
    assert!(approx_eq(result.get(&[1, 1]).unwrap(), 1.0));
    assert!(approx_eq(result.get(&[2, 2]).unwrap(), 4.0));
    assert!(approx_eq(result.get(&[0, 3]).unwrap(), 2.0));
    assert!(approx_eq(result.get(&[3, 0]).unwrap(), 3.0));
}

#[test]
fn test_resample_bilinear_downsample_averages_each_channel() {
    let img = PixelArray::packed(1, 2, 3, vec![1.0, 2.0, 3.0, 5.0, 6.0, 9.0]).unwrap();
    let result = resample(&img, 1, 1, ResampleMethod::Bilinear).unwrap();
    assert_eq!(result.shape(), &[1, 1, 3]);

    let pixel: Vec<f32> = (0..3).map(|c| result.get(&[0, 0, c]).unwrap()).collect();
    assert!(approx_eq(pixel[0], 3.0), "got {:?}", pixel);
    assert!(approx_eq(pixel[1], 4.0), "got {:?}", pixel);
    assert!(approx_eq(pixel[2], 6.0), "got {:?}", pixel);
}

#[test]
fn test_resample_keeps_channel_layout() {
    let img = PixelArray::packed(4, 6, 4, vec![128.0; 4 * 6 * 4]).unwrap();
    for method in ResampleMethod::ALL {
        let result = resample(&img, 3, 5, method).unwrap();
        assert_eq!(result.shape(), &[3, 5, 4], "method {}", method);
        assert!(result.data().iter().all(|&v| approx_eq(v, 128.0)));
    }
}

#[test]
fn test_resample_channels_are_independent() {
    // Channel 0 is a horizontal ramp, channel 1 constant
    let mut data = Vec::new();
    for _y in 0..2 {
        for x in 0..4 {
            data.push(x as f32 * 10.0);
            data.push(50.0);
        }
    }
    let img = PixelArray::packed(2, 4, 2, data).unwrap();
    let result = resample(&img, 2, 8, ResampleMethod::Bilinear).unwrap();

    for x in 0..8 {
        assert!(approx_eq(result.get(&[0, x, 1]).unwrap(), 50.0));
    }
    // The ramp stays monotonic and within its range
    let ramp: Vec<f32> = (0..8).map(|x| result.get(&[0, x, 0]).unwrap()).collect();
    assert!(ramp.windows(2).all(|w| w[0] <= w[1] + 1e-3), "ramp {:?}", ramp);
    assert!(ramp.iter().all(|&v| (-1e-3..=30.001).contains(&v)));
}

#[test]
fn test_resample_bicubic_step_edge_rings_past_input_range() {
    let img = PixelArray::plane(1, 4, vec![50.0, 50.0, 200.0, 200.0]).unwrap();
    let result = resample(&img, 1, 8, ResampleMethod::Bicubic).unwrap();
    let row: Vec<f32> = (0..8).map(|x| result.get(&[0, x]).unwrap()).collect();

    // Catmull-Rom weight at distance 1.25 is -0.0703: about 39.7 and 210.3
    assert!((row[2] - 39.7).abs() < 1.0, "row {:?}", row);
    assert!((row[5] - 210.3).abs() < 1.0, "row {:?}", row);
    assert!(row.iter().any(|&v| v < 50.0));
    assert!(row.iter().any(|&v| v > 200.0));
}

#[test]
fn test_resample_rejects_other_ranks() {
    let img = PixelArray::new(vec![2, 2, 2, 2], vec![0.0; 16]).unwrap();
    assert!(matches!(
        resample(&img, 1, 1, ResampleMethod::Bicubic),
        Err(ImageError::UnsupportedRank(4))
    ));

    let img = PixelArray::new(vec![4], vec![0.0; 4]).unwrap();
    assert!(matches!(
        resample(&img, 1, 1, ResampleMethod::Bicubic),
        Err(ImageError::UnsupportedRank(1))
    ));
}

#[test]
fn test_resample_rejects_empty_sizes() {
    let img = PixelArray::plane(2, 2, vec![0.0; 4]).unwrap();
    assert!(matches!(
        resample(&img, 0, 2, ResampleMethod::Nearest),
        Err(ImageError::EmptyTarget { height: 0, width: 2 })
    ));

    let empty = PixelArray::plane(0, 3, vec![]).unwrap();
    assert!(matches!(
        resample(&empty, 2, 2, ResampleMethod::Nearest),
        Err(ImageError::EmptySource { .. })
    ));
}

// ==================== EmbeddedImage Tests ====================

#[test]
fn test_embed_png_tag_shape() {
    let img = PixelArray::plane(2, 3, vec![0.0, 64.0, 128.0, 192.0, 255.0, 32.0]).unwrap();
    let embedded = EmbeddedImage::new(&img, 1.0, "png", false).unwrap();
    let html = embedded.html();

    assert!(html.starts_with(r#"<img width="3" height="2" style="" src="data:image/png;base64,"#));
    assert!(html.ends_with(r#"">"#));
    assert_eq!(embedded.to_string(), html);
}

#[test]
fn test_embed_payload_decodes_to_clipped_pixels() {
    let img = PixelArray::plane(1, 3, vec![-5.0, 100.4, 999.0]).unwrap();
    let embedded = EmbeddedImage::new(&img, 1.0, "png", false).unwrap();

    let decoded = decode_payload(embedded.html());
    assert_eq!(decoded.to_luma8().into_raw(), vec![0, 100, 255]);
}

#[test]
fn test_embed_scale_and_nearest_style() {
    let img = PixelArray::packed(4, 8, 3, vec![10.0; 4 * 8 * 3]).unwrap();
    let embedded = EmbeddedImage::new(&img, 0.5, "png", true).unwrap();

    assert_eq!((embedded.width(), embedded.height()), (4, 2));
    assert!(embedded.html().contains(NEAREST_STYLE));
    assert!(embedded.html().contains("image-rendering: pixelated;"));
}

#[test]
fn test_embed_squeezes_single_channel() {
    let img = PixelArray::packed(2, 2, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let embedded = EmbeddedImage::new(&img, 1.0, "png", false).unwrap();
    let decoded = decode_payload(embedded.html());
    assert_eq!(decoded.color(), image::ColorType::L8);
}

#[test]
fn test_embed_rgba_keeps_alpha() {
    let img = PixelArray::packed(1, 1, 4, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let embedded = EmbeddedImage::new(&img, 1.0, "png", false).unwrap();
    let decoded = decode_payload(embedded.html());
    assert_eq!(decoded.to_rgba8().into_raw(), vec![1, 2, 3, 4]);
}

#[test]
fn test_embed_jpeg_uses_jpeg_mime() {
    let img = PixelArray::packed(8, 8, 3, vec![200.0; 8 * 8 * 3]).unwrap();
    let embedded = EmbeddedImage::new(&img, 1.0, "jpeg", false).unwrap();
    assert!(embedded.html().contains("data:image/jpeg;base64,"));
}

#[test]
fn test_embed_unknown_format() {
    let img = PixelArray::plane(1, 1, vec![0.0]).unwrap();
    assert!(matches!(
        EmbeddedImage::new(&img, 1.0, "notaformat", false),
        Err(ImageError::UnknownFormat(_))
    ));
}

#[test]
fn test_embed_rejects_unsupported_channels() {
    let img = PixelArray::packed(1, 1, 6, vec![0.0; 6]).unwrap();
    assert!(matches!(
        EmbeddedImage::new(&img, 1.0, "png", false),
        Err(ImageError::UnsupportedChannels(6))
    ));
}
