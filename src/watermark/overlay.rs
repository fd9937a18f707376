//! One-page overlay PDF rendering.
//!
//! Builds the transient watermark page from scratch with lopdf: a single
//! page whose content stream translates to the page centre, rotates, and
//! draws the watermark text centred on the origin. Opacity goes through an
//! ExtGState (`ca`/`CA`), the fill level through the device-gray operator.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use super::{metrics, WatermarkFont, WatermarkOptions};
use crate::error::Result;

/// Render the overlay PDF to `path` with the same dimensions as the target
/// page.
pub(crate) fn render_overlay(
    path: &Path,
    options: &WatermarkOptions,
    page_width: f32,
    page_height: f32,
) -> Result<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut font_dict = dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => options.font.postscript_name(),
    };
    // Symbol and ZapfDingbats carry their own builtin encodings.
    if !matches!(
        options.font,
        WatermarkFont::Symbol | WatermarkFont::ZapfDingbats
    ) {
        font_dict.set("Encoding", "WinAnsiEncoding");
    }
    let font_id = doc.add_object(font_dict);

    let gs_id = doc.add_object(dictionary! {
        "Type" => "ExtGState",
        "ca" => options.alpha,
        "CA" => options.alpha,
    });

    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
        "ExtGState" => dictionary! { "GS1" => gs_id },
    });

    let content = Content {
        operations: draw_operations(options, page_width, page_height),
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
        "Resources" => resources_id,
        "Contents" => content_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path)?;
    Ok(())
}

/// Content-stream operations for the rotated, centred watermark text.
fn draw_operations(
    options: &WatermarkOptions,
    page_width: f32,
    page_height: f32,
) -> Vec<Operation> {
    let radians = (options.rotation as f32).to_radians();
    let (sin, cos) = radians.sin_cos();

    // CLI gray is an ink level (1.0 = black); PDF device gray is the
    // opposite (1.0 = white).
    let fill_gray = 1.0 - options.gray;

    let text_width =
        metrics::text_width_pt(options.font, &options.text, options.font_size as f32);

    vec![
        Operation::new("q", vec![]),
        Operation::new("gs", vec!["GS1".into()]),
        Operation::new("g", vec![fill_gray.into()]),
        // Translate the origin to the page centre, then rotate.
        Operation::new(
            "cm",
            vec![
                1.into(),
                0.into(),
                0.into(),
                1.into(),
                (page_width / 2.0).into(),
                (page_height / 2.0).into(),
            ],
        ),
        Operation::new(
            "cm",
            vec![
                cos.into(),
                sin.into(),
                (-sin).into(),
                cos.into(),
                0.into(),
                0.into(),
            ],
        ),
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec!["F1".into(), (options.font_size as i64).into()],
        ),
        // Baseline centred on the origin, like drawing a centred string.
        Operation::new("Td", vec![(-text_width / 2.0).into(), 0.into()]),
        Operation::new(
            "Tj",
            vec![Object::String(
                encode_latin1(&options.text),
                StringFormat::Literal,
            )],
        ),
        Operation::new("ET", vec![]),
        Operation::new("Q", vec![]),
    ]
}

/// Encode text for a WinAnsi-encoded string operand. WinAnsiEncoding
/// agrees with Latin-1 over ASCII and `U+00A0..=U+00FF`; characters
/// outside that range are replaced with `?`.
fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if (c as u32) <= 0xFF { c as u8 } else { b'?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(text: &str) -> WatermarkOptions {
        WatermarkOptions {
            text: text.to_string(),
            ..WatermarkOptions::default()
        }
    }

    #[test]
    fn test_overlay_is_single_page_with_matching_media_box() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("overlay.pdf");
        render_overlay(&path, &options("DRAFT"), 612.0, 792.0).unwrap();

        let doc = Document::load(&path).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);

        let page_id = *pages.values().next().unwrap();
        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
        let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();
        assert_eq!(media_box.len(), 4);
    }

    #[test]
    fn test_content_draws_text_with_alpha_state() {
        let opts = options("CONFIDENTIAL");
        let ops = draw_operations(&opts, 595.0, 842.0);
        let names: Vec<&str> = ops.iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(
            names,
            vec!["q", "gs", "g", "cm", "cm", "BT", "Tf", "Td", "Tj", "ET", "Q"]
        );
    }

    #[test]
    fn test_text_is_encoded_as_latin1_bytes() {
        assert_eq!(encode_latin1("DRAFT"), b"DRAFT");
        // U+00E9 is a single WinAnsi byte, not the two-byte UTF-8 sequence.
        assert_eq!(encode_latin1("Café"), b"Caf\xe9");
        // Outside Latin-1 there is no WinAnsi glyph to select.
        assert_eq!(encode_latin1("日本"), b"??");

        let opts = options("Café");
        let ops = draw_operations(&opts, 100.0, 100.0);
        let tj = ops.iter().find(|op| op.operator == "Tj").unwrap();
        match &tj.operands[0] {
            Object::String(bytes, _) => assert_eq!(bytes.as_slice(), &b"Caf\xe9"[..]),
            other => panic!("expected string operand, got {other:?}"),
        }
    }

    #[test]
    fn test_gray_level_is_inverted_for_device_gray() {
        let mut opts = options("X");
        opts.gray = 1.0; // full black ink
        let ops = draw_operations(&opts, 100.0, 100.0);
        let g = ops.iter().find(|op| op.operator == "g").unwrap();
        match &g.operands[0] {
            Object::Real(v) => assert!((*v as f32).abs() < f32::EPSILON),
            other => panic!("expected real operand, got {other:?}"),
        }
    }
}
