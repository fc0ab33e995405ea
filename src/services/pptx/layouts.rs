//! Slide layout discovery: presentation → masters → layouts.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::domain::{AppError, LayoutDescriptor, PlaceholderInfo};

use super::package::{OpcPackage, rels_path, resolve_target};
use super::relationships::Relationships;
use super::xml::attr_value;

/// A layout together with the package part it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPart {
    pub descriptor: LayoutDescriptor,
    pub part: String,
}

/// Read every layout in master order, then `sldLayoutIdLst` order within each master.
pub fn read_layouts(
    package: &OpcPackage,
    presentation_part: &str,
    presentation_rels: &Relationships,
) -> Result<Vec<LayoutPart>, AppError> {
    let presentation = package.get_str(presentation_part)?;
    let master_ids = collect_rel_ids(presentation, b"sldMasterId")?;
    if master_ids.is_empty() {
        return Err(AppError::template_error("Template has no slide masters"));
    }

    let mut layouts = Vec::new();
    for master_rid in master_ids {
        let Some(master_rel) = presentation_rels.get(&master_rid) else {
            tracing::warn!(rid = %master_rid, "Slide master relationship not found");
            continue;
        };
        let master_part = resolve_target(presentation_part, &master_rel.target);
        let master_xml = package.get_str(&master_part)?;
        let master_rels = read_relationships(package, &master_part)?;

        for layout_rid in collect_rel_ids(master_xml, b"sldLayoutId")? {
            let Some(layout_rel) = master_rels.get(&layout_rid) else {
                tracing::warn!(rid = %layout_rid, master = %master_part, "Slide layout relationship not found");
                continue;
            };
            let layout_part = resolve_target(&master_part, &layout_rel.target);
            let (name, placeholders) = parse_layout(package.get_str(&layout_part)?)?;
            layouts.push(LayoutPart {
                descriptor: LayoutDescriptor { index: layouts.len(), name, placeholders },
                part: layout_part,
            });
        }
    }

    if layouts.is_empty() {
        return Err(AppError::template_error("Template has no slide layouts"));
    }
    Ok(layouts)
}

/// Relationships of `part`, or an empty set when it has none.
pub fn read_relationships(package: &OpcPackage, part: &str) -> Result<Relationships, AppError> {
    let path = rels_path(part);
    if !package.contains(&path) {
        return Ok(Relationships::default());
    }
    Relationships::parse(package.get_str(&path)?)
}

/// `r:id` values of every `element` in document order.
fn collect_rel_ids(xml: &str, element: &[u8]) -> Result<Vec<String>, AppError> {
    let mut reader = Reader::from_str(xml);
    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(e)) | Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == element {
                    if let Some(rid) = relationship_id(&e) {
                        ids.push(rid);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(AppError::template_error(format!("Invalid XML: {e}"))),
            _ => {}
        }
    }

    Ok(ids)
}

pub fn relationship_id(element: &BytesStart<'_>) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| {
            attr.key.local_name().as_ref() == b"id"
                && attr.key.prefix().is_some_and(|p| p.as_ref() == b"r")
        })
        .and_then(|attr| std::str::from_utf8(&attr.value).ok().map(str::to_string))
}

#[derive(Default)]
struct ShapeAccumulator {
    tag: Vec<u8>,
    nesting: usize,
    name: Option<String>,
    placeholder: Option<(Option<String>, Option<u32>)>,
}

/// Parse a layout part: the `<p:cSld name>` and its placeholder shapes.
pub fn parse_layout(xml: &str) -> Result<(String, Vec<PlaceholderInfo>), AppError> {
    let mut reader = Reader::from_str(xml);
    let mut name = String::new();
    let mut placeholders = Vec::new();
    let mut current: Option<ShapeAccumulator> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let local = e.local_name().as_ref().to_vec();
                match current.as_mut() {
                    Some(shape) => {
                        if local == shape.tag {
                            shape.nesting += 1;
                        }
                        inspect_shape_child(shape, &e)?;
                    }
                    None => match local.as_slice() {
                        b"cSld" => name = attr_value(&e, b"name")?.unwrap_or_default(),
                        b"sp" | b"pic" | b"graphicFrame" => {
                            current = Some(ShapeAccumulator { tag: local, ..Default::default() });
                        }
                        _ => {}
                    },
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(shape) = current.as_mut() {
                    inspect_shape_child(shape, &e)?;
                } else if e.local_name().as_ref() == b"cSld" {
                    name = attr_value(&e, b"name")?.unwrap_or_default();
                }
            }
            Ok(Event::End(e)) => {
                let finished = match current.as_mut() {
                    Some(shape) if e.local_name().as_ref() == shape.tag.as_slice() => {
                        if shape.nesting == 0 {
                            true
                        } else {
                            shape.nesting -= 1;
                            false
                        }
                    }
                    _ => false,
                };
                if finished {
                    if let Some(shape) = current.take() {
                        if let Some((type_tag, idx)) = shape.placeholder {
                            let shape_name = shape
                                .name
                                .unwrap_or_else(|| format!("Placeholder {}", placeholders.len() + 1));
                            placeholders.push(PlaceholderInfo::new(type_tag.as_deref(), idx, shape_name));
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(AppError::template_error(format!("Invalid layout XML: {e}"))),
            _ => {}
        }
    }

    Ok((name, placeholders))
}

fn inspect_shape_child(shape: &mut ShapeAccumulator, element: &BytesStart<'_>) -> Result<(), AppError> {
    match element.local_name().as_ref() {
        b"cNvPr" if shape.name.is_none() => shape.name = attr_value(element, b"name")?,
        b"ph" if shape.placeholder.is_none() => {
            let type_tag = attr_value(element, b"type")?;
            let idx = attr_value(element, b"idx")?.and_then(|v| v.parse().ok());
            shape.placeholder = Some((type_tag, idx));
        }
        _ => {}
    }
    Ok(())
}
