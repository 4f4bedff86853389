//! Orthogonal rotation regression test
//!
//! The 90-degree transpose used by the landscape search pass must be exact
//! and self-inverse for any buffer shape, padded or not.

use docangle_core::PixelBuffer;
use docangle_io::ImageFormat;
use docangle_test::RegParams;
use docangle_test::synthetic::TextPage;
use docangle_transform::rotate_90;

#[test]
fn rotateorth_reg() {
    let mut rp = RegParams::new("rotateorth");

    for (w, h) in [(1, 1), (1, 7), (7, 1), (120, 80), (333, 517)] {
        let page = TextPage::new(w, h).with_margin(0).with_skew(0.7).render();
        test_transpose(&mut rp, &page);
    }

    // Padded input gives the same result as packed input
    let data: Vec<u8> = (0..5 * 4).map(|i| i as u8).collect();
    let padded = PixelBuffer::from_raw_with_stride(4, 4, 5, data).expect("padded");
    let t1 = rotate_90(&padded).expect("transpose padded");
    let t2 = rotate_90(&padded.to_contiguous()).expect("transpose packed");
    rp.compare_buffers(&t1, &t2);
    rp.compare_values(1.0, if t1.is_contiguous() { 1.0 } else { 0.0 }, 0.0);

    let page = TextPage::new(160, 100).render();
    let transposed = rotate_90(&page).expect("transpose");
    rp.write_buffer_and_check(&transposed, ImageFormat::Png)
        .expect("write transposed page");

    assert!(rp.cleanup(), "rotateorth regression test failed");
}

fn test_transpose(rp: &mut RegParams, pixs: &PixelBuffer) {
    let (w, h) = (pixs.width(), pixs.height());
    eprintln!("Testing transpose: {}x{}", w, h);

    let t = rotate_90(pixs).expect("rotate_90");
    rp.compare_values(h as f64, t.width() as f64, 0.0);
    rp.compare_values(w as f64, t.height() as f64, 0.0);

    // dst[x * height + y] == src[y * width + x]
    let exact = (0..h).all(|y| (0..w).all(|x| t.get_pixel(y, x) == pixs.get_pixel(x, y)));
    rp.compare_values(1.0, if exact { 1.0 } else { 0.0 }, 0.0);

    let back = rotate_90(&t).expect("rotate_90 twice");
    rp.compare_buffers(pixs, &back);
}
