//! Scaling regression test
//!
//! Covers every scaling method and the downscale step that runs before the
//! skew search.

use docangle_core::PixelBuffer;
use docangle_io::ImageFormat;
use docangle_test::RegParams;
use docangle_test::synthetic::TextPage;
use docangle_transform::{ScaleMethod, downscale, downscale_factor, scale_to_size};

#[test]
fn scale_reg() {
    let mut rp = RegParams::new("scale");

    // --- Every method honours the target size and keeps flat images flat ---
    let flat = PixelBuffer::new_filled(120, 90, 77).expect("flat");
    for method in [
        ScaleMethod::Sampling,
        ScaleMethod::Linear,
        ScaleMethod::AreaMap,
        ScaleMethod::Auto,
    ] {
        for (w, h) in [(60, 45), (37, 11), (240, 180), (1, 1)] {
            let out = scale_to_size(&flat, w, h, method).expect("scale");
            rp.compare_values(w as f64, out.width() as f64, 0.0);
            rp.compare_values(h as f64, out.height() as f64, 0.0);
            rp.compare_values(77.0, out.mean(), 0.0);
        }
    }
    rp.compare_values(
        1.0,
        scale_to_size(&flat, 0, 10, ScaleMethod::Linear).is_err() as u8 as f64,
        0.0,
    );

    // --- Area map averages 2-pixel stripes to mid gray ---
    let mut stripes = PixelBuffer::new_filled(100, 100, 255).expect("stripes");
    for x in (0..100).step_by(2) {
        stripes.fill_rect(x, 0, x + 1, 100, 0);
    }
    let half = scale_to_size(&stripes, 50, 50, ScaleMethod::AreaMap).expect("area map");
    let uniform = half.data().iter().all(|&v| v == 128);
    rp.compare_values(1.0, if uniform { 1.0 } else { 0.0 }, 0.0);

    // --- Downscale factor and output size ---
    rp.compare_values(1.0, downscale_factor(1000, 1000, 1000), 0.0);
    rp.compare_values(0.5, downscale_factor(2000, 1600, 1000), 1e-12);
    rp.compare_values(0.4, downscale_factor(1000, 2500, 1000), 1e-12);

    let page = TextPage::new(2000, 1600)
        .with_margin(40)
        .with_lines(40, 16)
        .with_glyphs(12, 6)
        .render();
    let small = downscale(&page, 1000, &ScaleMethod::Auto).expect("downscale");
    rp.compare_values(1000.0, small.width() as f64, 0.0);
    rp.compare_values(800.0, small.height() as f64, 0.0);
    rp.compare_values(1.0, if small.is_contiguous() { 1.0 } else { 0.0 }, 0.0);
    // Averaging keeps the overall ink coverage
    rp.compare_values(page.mean(), small.mean(), 1.0);
    rp.write_buffer_and_check(&small, ImageFormat::Png)
        .expect("write downscaled page");

    let unchanged = downscale(&page, 0, &ScaleMethod::Auto).expect("no downscale");
    rp.compare_buffers(&page, &unchanged);

    assert!(rp.cleanup(), "scale regression test failed");
}
