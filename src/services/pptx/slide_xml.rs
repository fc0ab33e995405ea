//! PresentationML for appended slides and their notes pages.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::domain::{AppError, PlaceholderFill, PlaceholderKind, SlideDraft};

use super::xml::escape_xml;

const NAMESPACES: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

const GROUP_SHAPE_PROPS: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

/// Slide part for `draft`. Shapes inherit position and formatting from the layout.
pub fn slide_xml(draft: &SlideDraft) -> String {
    let mut xml = String::with_capacity(1024 + draft.shapes.len() * 512);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!("<p:sld {NAMESPACES}>"));
    xml.push_str("<p:cSld><p:spTree>");
    xml.push_str(GROUP_SHAPE_PROPS);

    for (i, fill) in draft.shapes.iter().enumerate() {
        write_placeholder_shape(&mut xml, i as u32 + 2, fill);
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    xml
}

fn write_placeholder_shape(xml: &mut String, id: u32, fill: &PlaceholderFill) {
    let placeholder = &fill.placeholder;
    xml.push_str("<p:sp><p:nvSpPr>");
    xml.push_str(&format!(
        r#"<p:cNvPr id="{id}" name="{}"/>"#,
        escape_xml(&placeholder.name)
    ));
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph"#);
    if let Some(type_tag) = &placeholder.type_tag {
        xml.push_str(&format!(r#" type="{}""#, escape_xml(type_tag)));
    }
    if let Some(idx) = placeholder.idx {
        xml.push_str(&format!(r#" idx="{idx}""#));
    }
    xml.push_str("/></p:nvPr></p:nvSpPr><p:spPr/>");

    let has_text_body = !matches!(
        placeholder.kind,
        PlaceholderKind::Picture | PlaceholderKind::Table | PlaceholderKind::Chart
    );
    if has_text_body {
        xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
        if fill.paragraphs.is_empty() {
            xml.push_str("<a:p/>");
        }
        for paragraph in &fill.paragraphs {
            write_paragraph(xml, paragraph);
        }
        xml.push_str("</p:txBody>");
    }
    xml.push_str("</p:sp>");
}

fn write_paragraph(xml: &mut String, text: &str) {
    xml.push_str(r#"<a:p><a:r><a:rPr lang="en-US" dirty="0"/><a:t>"#);
    xml.push_str(&escape_xml(text));
    xml.push_str("</a:t></a:r></a:p>");
}

/// Notes page holding `text` in its body placeholder.
pub fn notes_xml(text: &str) -> String {
    let mut xml = String::with_capacity(1024 + text.len());
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(&format!("<p:notes {NAMESPACES}>"));
    xml.push_str("<p:cSld><p:spTree>");
    xml.push_str(GROUP_SHAPE_PROPS);

    xml.push_str(r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Slide Image Placeholder 1"/>"#);
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr>"#);
    xml.push_str(r#"<p:nvPr><p:ph type="sldImg"/></p:nvPr></p:nvSpPr><p:spPr/></p:sp>"#);

    xml.push_str(r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Notes Placeholder 2"/>"#);
    xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
    xml.push_str(r#"<p:nvPr><p:ph type="body" idx="1"/></p:nvPr></p:nvSpPr><p:spPr/>"#);
    xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
    for line in text.lines() {
        if line.trim().is_empty() {
            xml.push_str("<a:p/>");
        } else {
            write_paragraph(&mut xml, line);
        }
    }
    xml.push_str("</p:txBody></p:sp>");

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:notes>");
    xml
}

/// Paragraph texts of a slide or notes part, in document order.
pub fn paragraph_texts(xml: &str) -> Result<Vec<String>, AppError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"p" => current = Some(String::new()),
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Text(t)) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| AppError::template_error(format!("Invalid slide text: {e}")))?;
                if let Some(paragraph) = current.as_mut() {
                    paragraph.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if let Some(paragraph) = current.take() {
                        if !paragraph.is_empty() {
                            paragraphs.push(paragraph);
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(AppError::template_error(format!("Invalid slide XML: {e}"))),
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlaceholderInfo;

    fn draft() -> SlideDraft {
        SlideDraft {
            layout_index: 1,
            shapes: vec![
                PlaceholderFill {
                    placeholder: PlaceholderInfo::new(Some("title"), None, "Title 1"),
                    paragraphs: vec!["R&D <2025>".to_string()],
                },
                PlaceholderFill {
                    placeholder: PlaceholderInfo::new(None, Some(1), "Content Placeholder 2"),
                    paragraphs: vec!["First".to_string(), "Second".to_string()],
                },
                PlaceholderFill {
                    placeholder: PlaceholderInfo::new(Some("pic"), Some(2), "Picture 3"),
                    paragraphs: Vec::new(),
                },
            ],
            notes: None,
        }
    }

    #[test]
    fn slide_xml_copies_placeholder_references() {
        let xml = slide_xml(&draft());
        assert!(xml.contains(r#"<p:ph type="title"/>"#));
        assert!(xml.contains(r#"<p:ph idx="1"/>"#));
        assert!(xml.contains(r#"<p:ph type="pic" idx="2"/>"#));
        assert!(xml.contains(r#"<p:cNvPr id="4" name="Picture 3"/>"#));
        assert_eq!(xml.matches("<p:txBody>").count(), 2);
    }

    #[test]
    fn written_text_reads_back_unescaped() {
        let xml = slide_xml(&draft());
        assert_eq!(paragraph_texts(&xml).unwrap(), vec!["R&D <2025>", "First", "Second"]);
    }

    #[test]
    fn notes_keep_one_paragraph_per_line() {
        let xml = notes_xml("Open with the numbers.\n\nThen pause.");
        assert!(xml.contains(r#"<p:ph type="body" idx="1"/>"#));
        assert_eq!(paragraph_texts(&xml).unwrap(), vec!["Open with the numbers.", "Then pause."]);
    }
}
