//! Deterministic synthetic documents
//!
//! Pages are rendered analytically: each output pixel is mapped back into
//! the unrotated page and tested against the text layout, so a skewed page
//! has crisp edges and no interpolation blur. The rotation convention
//! matches `docangle_transform::rotate`: a positive skew turns the content
//! clockwise and text lines descend to the right.

use docangle_core::PixelBuffer;

/// Layout of a synthetic text page.
///
/// Text lines are bands of `line_height` rows repeating every `line_pitch`
/// rows. Inside a band, glyphs are `glyph_width` columns of ink separated
/// by `glyph_gap` columns of paper; every sixth glyph cell is left blank as
/// a word gap. Consecutive lines are shifted horizontally so that glyph
/// columns do not line up down the page.
#[derive(Debug, Clone)]
pub struct TextPage {
    pub width: u32,
    pub height: u32,
    /// Blank border around the text block
    pub margin: u32,
    pub line_pitch: u32,
    pub line_height: u32,
    pub glyph_width: u32,
    pub glyph_gap: u32,
    /// Clockwise rotation of the content, in degrees
    pub skew_degrees: f64,
    pub ink: u8,
    pub paper: u8,
}

impl TextPage {
    /// A `width` x `height` page with 8-row text lines every 20 rows.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            margin: 20,
            line_pitch: 20,
            line_height: 8,
            glyph_width: 6,
            glyph_gap: 3,
            skew_degrees: 0.0,
            ink: 0,
            paper: 255,
        }
    }

    pub fn with_skew(mut self, degrees: f64) -> Self {
        self.skew_degrees = degrees;
        self
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_lines(mut self, pitch: u32, height: u32) -> Self {
        self.line_pitch = pitch;
        self.line_height = height;
        self
    }

    pub fn with_glyphs(mut self, width: u32, gap: u32) -> Self {
        self.glyph_width = width;
        self.glyph_gap = gap;
        self
    }

    /// Whether the unrotated page has ink at `(u, v)`.
    fn is_ink(&self, u: f64, v: f64) -> bool {
        let margin = f64::from(self.margin);
        if u < margin
            || v < margin
            || u >= f64::from(self.width) - margin
            || v >= f64::from(self.height) - margin
        {
            return false;
        }
        let row = (v - margin).floor() as i64;
        let line = row / i64::from(self.line_pitch);
        if row % i64::from(self.line_pitch) >= i64::from(self.line_height) {
            return false;
        }
        let cell = i64::from(self.glyph_width + self.glyph_gap);
        let col = (u - margin).floor() as i64 + (line * 5) % cell;
        let glyph = col / cell;
        glyph % 6 != 5 && col % cell < i64::from(self.glyph_width)
    }

    /// Render the page.
    pub fn render(&self) -> PixelBuffer {
        let (sin_a, cos_a) = self.skew_degrees.to_radians().sin_cos();
        let cx = (f64::from(self.width) - 1.0) / 2.0;
        let cy = (f64::from(self.height) - 1.0) / 2.0;
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize);
        for y in 0..self.height {
            let y_rel = f64::from(y) - cy;
            for x in 0..self.width {
                let x_rel = f64::from(x) - cx;
                let u = x_rel * cos_a + y_rel * sin_a + cx;
                let v = -x_rel * sin_a + y_rel * cos_a + cy;
                data.push(if self.is_ink(u, v) { self.ink } else { self.paper });
            }
        }
        PixelBuffer::from_raw(self.width, self.height, data)
            .unwrap_or_else(|e| panic!("invalid page size: {e}"))
    }
}

/// A page of uniform intensity.
pub fn blank_page(width: u32, height: u32, value: u8) -> PixelBuffer {
    PixelBuffer::new_filled(width, height, value)
        .unwrap_or_else(|e| panic!("invalid page size: {e}"))
}

/// Punch `count` round binder holes down the left edge of a page.
///
/// Holes are black discs of `radius` pixels centred `width / 25` from the
/// left edge and spread evenly over the height.
pub fn add_binder_holes(page: &mut PixelBuffer, count: u32, radius: u32) {
    let cx = i64::from(page.width() / 25);
    let r = i64::from(radius);
    for i in 0..count {
        let cy = i64::from(page.height()) * i64::from(i + 1) / i64::from(count + 1);
        for y in (cy - r).max(0)..(cy + r + 1).min(i64::from(page.height())) {
            for x in (cx - r).max(0)..(cx + r + 1).min(i64::from(page.width())) {
                if (x - cx).pow(2) + (y - cy).pow(2) <= r * r {
                    page.set_pixel_unchecked(x as u32, y as u32, 0);
                }
            }
        }
    }
}

/// Transpose then flip vertically: an exact counter-clockwise quarter turn.
pub fn quarter_turn(page: &PixelBuffer) -> PixelBuffer {
    let (w, h) = (page.width(), page.height());
    let mut out = blank_page(h, w, 0);
    for y in 0..h {
        for x in 0..w {
            out.set_pixel_unchecked(y, w - 1 - x, page.get_pixel_unchecked(x, y));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_page_layout() {
        let page = TextPage::new(200, 100).render();
        assert_eq!((page.width(), page.height()), (200, 100));
        // Margin is blank
        assert!(page.row(5).iter().all(|&v| v == 255));
        // First band starts at the margin, first glyph covers columns 20..26
        assert_eq!(page.get_pixel(20, 20), Some(0));
        assert_eq!(page.get_pixel(25, 27), Some(0));
        assert_eq!(page.get_pixel(26, 20), Some(255));
        // Gap between lines
        assert!(page.row(30).iter().all(|&v| v == 255));
        // Next line is shifted by 5 columns
        assert_eq!(page.get_pixel(20, 40), Some(0));
        assert_eq!(page.get_pixel(21, 40), Some(255));
        assert_eq!(page.get_pixel(24, 40), Some(0));
    }

    #[test]
    fn test_text_page_deterministic() {
        let a = TextPage::new(120, 90).with_skew(1.3).render();
        let b = TextPage::new(120, 90).with_skew(1.3).render();
        assert_eq!(a, b);
    }

    #[test]
    fn test_binder_holes() {
        let mut page = blank_page(250, 400, 255);
        add_binder_holes(&mut page, 3, 6);
        assert_eq!(page.get_pixel(10, 100), Some(0));
        assert_eq!(page.get_pixel(10, 200), Some(0));
        assert_eq!(page.get_pixel(10, 300), Some(0));
        assert_eq!(page.get_pixel(10, 150), Some(255));
        assert_eq!(page.get_pixel(100, 100), Some(255));
    }

    #[test]
    fn test_quarter_turn() {
        let page = PixelBuffer::from_raw(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let turned = quarter_turn(&page);
        assert_eq!((turned.width(), turned.height()), (3, 2));
        // [2, 4, 6]
        // [1, 3, 5]
        assert_eq!(turned.data(), &[2, 4, 6, 1, 3, 5]);
    }
}
