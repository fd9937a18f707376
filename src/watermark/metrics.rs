//! Text measurement for the PDF Standard 14 builtin fonts.
//!
//! The watermark is drawn centred on the page, which requires knowing the
//! text width before rendering. The builtin fonts have well-defined metrics
//! from Adobe's AFM files; character widths are in 1000 units per em.

use super::WatermarkFont;

/// Measure text width in points for a builtin font at a given size.
pub fn text_width_pt(font: WatermarkFont, text: &str, font_size: f32) -> f32 {
    let total: u32 = text.chars().map(|c| char_width(font, c) as u32).sum();
    (total as f32 / 1000.0) * font_size
}

/// Character width in 1000 units per em.
///
/// Builtin fonts are WinAnsi-encoded; only the ASCII printable range is
/// tabulated, everything else falls back to a representative width.
fn char_width(font: WatermarkFont, c: char) -> u16 {
    if !c.is_ascii() {
        return 500;
    }

    let code = c as usize;
    match font {
        WatermarkFont::Helvetica => HELVETICA_WIDTHS.get(code).copied().unwrap_or(278),
        WatermarkFont::TimesRoman => TIMES_ROMAN_WIDTHS.get(code).copied().unwrap_or(250),
        WatermarkFont::Courier => 600, // Monospace
        // Symbol and ZapfDingbats use their own encodings; an average
        // glyph width keeps the centring close enough.
        WatermarkFont::Symbol | WatermarkFont::ZapfDingbats => 500,
    }
}

// =============================================================================
// Adobe AFM Character Width Tables (ASCII subset, in 1000 units per em)
// =============================================================================

/// Helvetica character widths (indices 0-127, only 32-126 are valid)
#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 128] = [
    // 0-31: Control characters (use 0)
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    // 32-47: space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 48-63: 0 1 2 3 4 5 6 7 8 9 : ; < = > ?
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    // 64-79: @ A B C D E F G H I J K L M N O
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    // 80-95: P Q R S T U V W X Y Z [ \ ] ^ _
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    // 96-111: ` a b c d e f g h i j k l m n o
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    // 112-127: p q r s t u v w x y z { | } ~ DEL
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 0,
];

/// Times-Roman character widths
#[rustfmt::skip]
static TIMES_ROMAN_WIDTHS: [u16; 128] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500, 278, 278, 564, 564, 564, 444,
    921, 722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889, 722, 722,
    556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611, 333, 278, 333, 469, 500,
    333, 444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778, 500, 500,
    500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444, 480, 200, 480, 541, 0,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_scales_with_font_size() {
        let w1 = text_width_pt(WatermarkFont::Helvetica, "DRAFT", 10.0);
        let w2 = text_width_pt(WatermarkFont::Helvetica, "DRAFT", 20.0);
        assert!((w2 - w1 * 2.0).abs() < 0.01);
    }

    #[test]
    fn test_longer_text_is_wider() {
        let short = text_width_pt(WatermarkFont::TimesRoman, "DRAFT", 45.0);
        let long = text_width_pt(WatermarkFont::TimesRoman, "DRAFT COPY", 45.0);
        assert!(long > short);
    }

    #[test]
    fn test_courier_is_monospace() {
        let ii = text_width_pt(WatermarkFont::Courier, "ii", 12.0);
        let ww = text_width_pt(WatermarkFont::Courier, "WW", 12.0);
        assert_eq!(ii, ww);
    }

    #[test]
    fn test_helvetica_differs_from_times() {
        let h = text_width_pt(WatermarkFont::Helvetica, "Hello", 12.0);
        let t = text_width_pt(WatermarkFont::TimesRoman, "Hello", 12.0);
        assert!((h - t).abs() > 0.01);
    }
}
