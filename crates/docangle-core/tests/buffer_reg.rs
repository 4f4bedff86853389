//! Pixel buffer regression test
//!
//! Checks construction, padded layouts and gray/RGB conversion.

use docangle_core::{PixelBuffer, RgbBuffer, luma};
use docangle_test::RegParams;
use docangle_test::synthetic::TextPage;

#[test]
fn buffer_reg() {
    let mut rp = RegParams::new("buffer");

    // --- Padded buffer behaves like its packed copy ---
    let page = TextPage::new(90, 60).render();
    let stride = page.width() + 7;
    let mut padded = vec![0xAA; (stride * page.height()) as usize];
    for y in 0..page.height() {
        let start = (y * stride) as usize;
        padded[start..start + page.width() as usize].copy_from_slice(page.row(y));
    }
    let padded = PixelBuffer::from_raw_with_stride(page.width(), page.height(), stride, padded)
        .expect("wrap padded rows");
    rp.compare_values(0.0, if padded.is_contiguous() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_buffers(&page, &padded);
    let packed = padded.to_contiguous();
    rp.compare_values(1.0, if packed.is_contiguous() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(
        (page.width() * page.height()) as f64,
        packed.data().len() as f64,
        0.0,
    );
    rp.compare_values(page.mean(), padded.mean(), 1e-9);

    // --- Gray -> RGB -> gray is lossless ---
    let rgb = page.to_rgb();
    rp.compare_buffers(&page, &rgb.to_gray());

    // --- Luma weights ---
    let mut color = RgbBuffer::new_filled(3, 1, [0, 0, 0]).expect("rgb");
    color.set_rgb(0, 0, [255, 0, 0]).expect("set");
    color.set_rgb(1, 0, [0, 255, 0]).expect("set");
    color.set_rgb(2, 0, [0, 0, 255]).expect("set");
    let gray = color.to_gray();
    rp.compare_values(76.0, gray.get_pixel(0, 0).unwrap_or(0) as f64, 0.0);
    rp.compare_values(149.0, gray.get_pixel(1, 0).unwrap_or(0) as f64, 0.0);
    rp.compare_values(29.0, gray.get_pixel(2, 0).unwrap_or(0) as f64, 0.0);
    // Weights sum to one
    rp.compare_values(255.0, luma(255, 255, 255) as f64, 0.0);

    // --- Invalid construction ---
    rp.compare_values(1.0, PixelBuffer::new(0, 5).is_err() as u8 as f64, 0.0);
    rp.compare_values(
        1.0,
        PixelBuffer::from_raw_with_stride(10, 2, 9, vec![0; 18]).is_err() as u8 as f64,
        0.0,
    );
    rp.compare_values(
        1.0,
        PixelBuffer::from_raw(10, 2, vec![0; 19]).is_err() as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "buffer regression test failed");
}
