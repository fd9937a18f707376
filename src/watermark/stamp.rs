//! Overlay compositing.
//!
//! The rendered overlay PDF is imported into the target document as a Form
//! XObject and drawn on top of every page. Existing page content is wrapped
//! in `q`/`Q` so an unbalanced graphics state in the original stream cannot
//! displace the watermark.

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::error::{PdfToolError, Result};

/// Base name for the overlay XObject in page resources. A numeric suffix is
/// appended when a page already uses the name.
const OVERLAY_NAME: &str = "WmOverlay";

/// Composite the overlay document's single page on top of every page of
/// `doc`.
pub(crate) fn stamp_all_pages(doc: &mut Document, mut overlay: Document) -> Result<()> {
    // Move the overlay's objects into the target's id space.
    overlay.renumber_objects_with(doc.max_id + 1);

    let overlay_page_id = *overlay
        .get_pages()
        .values()
        .next()
        .ok_or_else(|| PdfToolError::PdfProcessing("overlay has no pages".into()))?;
    let overlay_page = overlay.get_object(overlay_page_id)?.as_dict()?.clone();
    let content = overlay.get_page_content(overlay_page_id)?;

    let bbox = overlay_page
        .get(b"MediaBox")
        .ok()
        .cloned()
        .unwrap_or_else(letter_media_box);
    let resources = overlay_page.get(b"Resources").ok().cloned();

    doc.max_id = doc.max_id.max(overlay.max_id);
    doc.objects.extend(std::mem::take(&mut overlay.objects));

    let mut form_dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Form",
        "FormType" => 1,
        "BBox" => bbox,
    };
    if let Some(resources) = resources {
        form_dict.set("Resources", resources);
    }
    let form_id = doc.add_object(Stream::new(form_dict, content));

    // Shared prefix stream that opens the q/Q bracket around the original
    // page content.
    let save_state_id = doc.add_object(Stream::new(Dictionary::new(), b"q\n".to_vec()));

    let page_ids: Vec<ObjectId> = doc.get_pages().values().cloned().collect();
    for page_id in page_ids {
        stamp_page(doc, page_id, form_id, save_state_id)?;
    }

    // The overlay's own page tree and catalog are now unreachable.
    let _ = doc.prune_objects();
    Ok(())
}

/// Add the overlay XObject to one page's resources and append the draw call
/// to its content.
fn stamp_page(
    doc: &mut Document,
    page_id: ObjectId,
    form_id: ObjectId,
    save_state_id: ObjectId,
) -> Result<()> {
    let mut resources = effective_page_attribute(doc, page_id, b"Resources")
        .and_then(|obj| resolve_dict(doc, &obj))
        .unwrap_or_default();

    let mut xobjects = resources
        .get(b"XObject")
        .ok()
        .cloned()
        .and_then(|obj| resolve_dict(doc, &obj))
        .unwrap_or_default();

    let name = unique_overlay_name(&xobjects);
    xobjects.set(name.as_bytes(), Object::Reference(form_id));
    resources.set("XObject", Object::Dictionary(xobjects));

    // Close the bracket opened by the shared prefix, then draw the overlay
    // above the original content.
    let draw = format!("Q\nq\n/{name} Do\nQ\n");
    let draw_id = doc.add_object(Stream::new(Dictionary::new(), draw.into_bytes()));

    let contents = rebuild_contents(doc, page_id, save_state_id, draw_id)?;

    let page = doc.get_object_mut(page_id)?.as_dict_mut()?;
    page.set("Resources", Object::Dictionary(resources));
    page.set("Contents", contents);
    Ok(())
}

/// Build the new Contents array: save-state prefix, the original stream
/// references, then the overlay draw call.
fn rebuild_contents(
    doc: &mut Document,
    page_id: ObjectId,
    save_state_id: ObjectId,
    draw_id: ObjectId,
) -> Result<Object> {
    let existing = doc
        .get_object(page_id)?
        .as_dict()?
        .get(b"Contents")
        .ok()
        .cloned();

    let mut refs = vec![Object::Reference(save_state_id)];
    match existing {
        Some(Object::Reference(id)) => refs.push(Object::Reference(id)),
        Some(Object::Array(array)) => refs.extend(array),
        // Direct stream objects must become indirect to share the array.
        Some(Object::Stream(stream)) => {
            let id = doc.add_object(Object::Stream(stream));
            refs.push(Object::Reference(id));
        }
        _ => {}
    }
    refs.push(Object::Reference(draw_id));
    Ok(Object::Array(refs))
}

/// Look up a page attribute, walking the Pages tree `Parent` chain for
/// inheritable entries like MediaBox and Resources.
pub(crate) fn effective_page_attribute(
    doc: &Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<Object> {
    let mut current = doc.get_object(page_id).ok()?.as_dict().ok()?;
    loop {
        if let Ok(value) = current.get(key) {
            return Some(value.clone());
        }
        match current.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => {
                current = doc.get_object(*parent_id).ok()?.as_dict().ok()?;
            }
            _ => return None,
        }
    }
}

/// Width and height of the first page's media box.
pub(crate) fn first_page_dimensions(doc: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    let no_media_box =
        || PdfToolError::PdfProcessing("first page has no valid media box".into());
    let media_box = effective_page_attribute(doc, page_id, b"MediaBox").ok_or_else(no_media_box)?;
    let media_box = match media_box {
        Object::Array(values) => values,
        _ => return Err(no_media_box()),
    };
    let coords: Vec<f32> = media_box.iter().filter_map(object_to_f32).collect();
    if coords.len() != 4 {
        return Err(no_media_box());
    }
    Ok((coords[2] - coords[0], coords[3] - coords[1]))
}

fn object_to_f32(object: &Object) -> Option<f32> {
    match object {
        Object::Integer(value) => Some(*value as f32),
        Object::Real(value) => Some(*value as f32),
        _ => None,
    }
}

fn resolve_dict(doc: &Document, object: &Object) -> Option<Dictionary> {
    match object {
        Object::Dictionary(dict) => Some(dict.clone()),
        Object::Reference(id) => doc.get_object(*id).ok()?.as_dict().ok().cloned(),
        _ => None,
    }
}

fn unique_overlay_name(xobjects: &Dictionary) -> String {
    if !xobjects.has(OVERLAY_NAME.as_bytes()) {
        return OVERLAY_NAME.to_string();
    }
    let mut n = 1;
    loop {
        let candidate = format!("{OVERLAY_NAME}{n}");
        if !xobjects.has(candidate.as_bytes()) {
            return candidate;
        }
        n += 1;
    }
}

fn letter_media_box() -> Object {
    Object::Array(vec![0.into(), 0.into(), 612.into(), 792.into()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_name_avoids_collisions() {
        let mut xobjects = Dictionary::new();
        assert_eq!(unique_overlay_name(&xobjects), "WmOverlay");

        xobjects.set("WmOverlay", Object::Null);
        assert_eq!(unique_overlay_name(&xobjects), "WmOverlay1");

        xobjects.set("WmOverlay1", Object::Null);
        assert_eq!(unique_overlay_name(&xobjects), "WmOverlay2");
    }

    #[test]
    fn test_object_to_f32_accepts_integers_and_reals() {
        assert_eq!(object_to_f32(&Object::Integer(612)), Some(612.0));
        assert_eq!(object_to_f32(&Object::Real(792.5)), Some(792.5));
        assert_eq!(object_to_f32(&Object::Null), None);
    }
}
