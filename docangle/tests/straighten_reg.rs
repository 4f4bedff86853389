//! Straightening regression test
//!
//! End-to-end check of the colour pipeline: encode a skewed page, decode
//! it, estimate the skew on its luma and rotate the colour original level.

use docangle::io::{ImageFormat, ImageResizer, JpegOptions, decode_rgb, encode_rgb};
use docangle::skew::{SearchOptions, estimate_angle, estimate_angle_with_resizer};
use docangle::straighten;
use docangle_test::RegParams;
use docangle_test::synthetic::TextPage;

#[test]
fn straighten_reg() {
    let mut rp = RegParams::new("straighten");

    let theta = -1.4;
    let page = TextPage::new(420, 380).with_skew(theta).render().to_rgb();

    // --- PNG round trip is lossless ---
    let png = encode_rgb(&page, ImageFormat::Png, &JpegOptions::default()).expect("encode png");
    let decoded = decode_rgb(&png).expect("decode png");
    rp.compare_values(1.0, if decoded == page { 1.0 } else { 0.0 }, 0.0);

    // --- Straighten ---
    let options = SearchOptions::default();
    let result = straighten(&decoded, &options).expect("straighten");
    eprintln!(
        "skew {:.2} deg, correction {:.2} deg, score {:.3}",
        result.estimate.degrees, result.correction, result.estimate.score
    );
    rp.compare_values(theta, result.estimate.degrees, 0.2);
    rp.compare_values(-result.estimate.degrees, result.correction, 0.0);
    rp.compare_values(page.width() as f64, result.image.width() as f64, 0.0);
    rp.compare_values(page.height() as f64, result.image.height() as f64, 0.0);

    let level = estimate_angle(&result.image.to_gray(), &options).expect("re-estimate");
    rp.compare_values(0.0, level.degrees, 0.2);

    let jpeg = encode_rgb(&result.image, ImageFormat::Jpeg, &JpegOptions::default())
        .expect("encode jpeg");
    rp.write_data_and_check(&jpeg, "jpg").expect("write straightened page");

    // --- JPEG survives well enough to estimate ---
    let lossy = decode_rgb(
        &encode_rgb(&page, ImageFormat::Jpeg, &JpegOptions::default().with_quality(75))
            .expect("encode skewed jpeg"),
    )
    .expect("decode skewed jpeg");
    let est = estimate_angle(&lossy.to_gray(), &options).expect("estimate jpeg page");
    rp.compare_values(theta, est.degrees, 0.2);

    // --- Downscaling through the image crate ---
    let big = TextPage::new(1800, 1500)
        .with_margin(40)
        .with_lines(40, 16)
        .with_glyphs(12, 6)
        .with_skew(theta)
        .render();
    let report = estimate_angle_with_resizer(&big, &options, &ImageResizer::default())
        .expect("estimate with image resizer");
    rp.compare_values(1000.0 / 1800.0, report.scale, 1e-12);
    rp.compare_values(theta, report.estimate.degrees, 0.2);

    // straighten takes the same downscale path
    let result = straighten(&big.to_rgb(), &options).expect("straighten large page");
    rp.compare_values(report.estimate.degrees, result.estimate.degrees, 0.0);
    rp.compare_values(report.estimate.score, result.estimate.score, 0.0);
    rp.compare_values(-theta, result.correction, 0.2);

    assert!(rp.cleanup(), "straighten regression test failed");
}
