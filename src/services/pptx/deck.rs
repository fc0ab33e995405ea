//! `.pptx`/`.potx` deck backed by an in-memory OOXML package.

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::domain::{AppError, LayoutDescriptor, SlideDraft};
use crate::ports::PresentationDocument;

use super::content_types::{CT_NOTES_SLIDE, CT_PRESENTATION, CT_SLIDE, CT_TEMPLATE, ContentTypes};
use super::layouts::{read_layouts, read_relationships, relationship_id};
use super::package::{CONTENT_TYPES_PART, OpcPackage, rels_path, relative_target, resolve_target};
use super::relationships::{
    REL_NOTES_MASTER, REL_NOTES_SLIDE, REL_OFFICE_DOCUMENT, REL_SLIDE, REL_SLIDE_LAYOUT,
    Relationships,
};
use super::slide_xml::{notes_xml, paragraph_texts, slide_xml};

const DEFAULT_PRESENTATION_PART: &str = "ppt/presentation.xml";
/// Slide ids below 256 are reserved.
const MIN_SLIDE_ID: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
struct SlideEntry {
    id: u32,
    rid: String,
    part: String,
}

/// A presentation opened from a template or a previously saved deck.
#[derive(Debug, Clone)]
pub struct PptxDeck {
    package: OpcPackage,
    content_types: ContentTypes,
    presentation_part: String,
    presentation_rels: Relationships,
    layouts: Vec<LayoutDescriptor>,
    layout_parts: Vec<String>,
    notes_master: Option<String>,
    slides: Vec<SlideEntry>,
}

impl PptxDeck {
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let bytes = fs::read(path).map_err(|e| {
            AppError::template_error(format!("Cannot read template {}: {e}", path.display()))
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AppError> {
        let package = OpcPackage::from_bytes(bytes)?;
        let content_types = ContentTypes::parse(package.get_str(CONTENT_TYPES_PART)?)?;

        let root_rels = read_relationships(&package, "")?;
        let presentation_part = root_rels
            .first_of_type(REL_OFFICE_DOCUMENT)
            .map(|rel| resolve_target("", &rel.target))
            .unwrap_or_else(|| DEFAULT_PRESENTATION_PART.to_string());
        let presentation_rels = read_relationships(&package, &presentation_part)?;

        let (layouts, layout_parts): (Vec<LayoutDescriptor>, Vec<String>) =
            read_layouts(&package, &presentation_part, &presentation_rels)?
                .into_iter()
                .map(|layout| (layout.descriptor, layout.part))
                .unzip();

        let notes_master = presentation_rels
            .first_of_type(REL_NOTES_MASTER)
            .map(|rel| resolve_target(&presentation_part, &rel.target));

        let slides = read_slide_ids(package.get_str(&presentation_part)?)?
            .into_iter()
            .filter_map(|(id, rid)| {
                let part = resolve_target(&presentation_part, &presentation_rels.get(&rid)?.target);
                Some(SlideEntry { id, rid, part })
            })
            .collect();

        Ok(Self {
            package,
            content_types,
            presentation_part,
            presentation_rels,
            layouts,
            layout_parts,
            notes_master,
            slides,
        })
    }

    /// Write the deck to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, AppError> {
        let mut package = self.package.clone();

        let presentation = rewrite_slide_id_list(
            package.get_str(&self.presentation_part)?,
            &self.slides,
        )?;
        package.insert(self.presentation_part.clone(), presentation);
        package.insert(rels_path(&self.presentation_part), self.presentation_rels.to_xml());

        let mut content_types = self.content_types.clone();
        if content_types.override_for(&self.presentation_part) == Some(CT_TEMPLATE) {
            content_types.set_override(&self.presentation_part, CT_PRESENTATION);
        }
        package.insert(CONTENT_TYPES_PART, content_types.to_xml());

        package.to_bytes()
    }

    /// Paragraph texts of every slide, in slide order.
    pub fn slide_texts(&self) -> Result<Vec<Vec<String>>, AppError> {
        self.slides
            .iter()
            .map(|slide| paragraph_texts(self.package.get_str(&slide.part)?))
            .collect()
    }

    /// Notes text of the slide at `index`, if it has a notes page.
    pub fn slide_notes(&self, index: usize) -> Result<Option<String>, AppError> {
        let Some(slide) = self.slides.get(index) else {
            return Ok(None);
        };
        let rels = read_relationships(&self.package, &slide.part)?;
        let Some(notes_rel) = rels.first_of_type(REL_NOTES_SLIDE) else {
            return Ok(None);
        };
        let notes_part = resolve_target(&slide.part, &notes_rel.target);
        let paragraphs = paragraph_texts(self.package.get_str(&notes_part)?)?;
        Ok(Some(paragraphs.join("\n")))
    }

    /// Layout name used by the slide at `index`.
    pub fn slide_layout_name(&self, index: usize) -> Result<Option<&str>, AppError> {
        let Some(slide) = self.slides.get(index) else {
            return Ok(None);
        };
        let rels = read_relationships(&self.package, &slide.part)?;
        let name = rels.first_of_type(REL_SLIDE_LAYOUT).and_then(|rel| {
            let layout_part = resolve_target(&slide.part, &rel.target);
            let position = self.layout_parts.iter().position(|part| *part == layout_part)?;
            Some(self.layouts[position].name.as_str())
        });
        Ok(name)
    }

    fn remove_slide_parts(&mut self, slide: &SlideEntry) -> Result<(), AppError> {
        let slide_rels = read_relationships(&self.package, &slide.part)?;
        for rel in slide_rels.iter().filter(|rel| rel.rel_type == REL_NOTES_SLIDE) {
            let notes_part = resolve_target(&slide.part, &rel.target);
            self.package.remove(&notes_part);
            self.package.remove(&rels_path(&notes_part));
            self.content_types.remove_override(&notes_part);
        }
        self.package.remove(&slide.part);
        self.package.remove(&rels_path(&slide.part));
        self.content_types.remove_override(&slide.part);
        self.presentation_rels.remove(&slide.rid);
        Ok(())
    }

    fn next_free_part(&self, prefix: &str) -> String {
        (1..)
            .map(|n| format!("{prefix}{n}.xml"))
            .find(|part| !self.package.contains(part))
            .unwrap_or_else(|| format!("{prefix}1.xml"))
    }
}

impl PresentationDocument for PptxDeck {
    fn layouts(&self) -> &[LayoutDescriptor] {
        &self.layouts
    }

    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn clear_slides(&mut self) -> Result<usize, AppError> {
        let slides = std::mem::take(&mut self.slides);
        for slide in &slides {
            self.remove_slide_parts(slide)?;
        }

        if !slides.is_empty() {
            let presentation = drop_section_slide_ids(
                self.package.get_str(&self.presentation_part)?,
                slides.iter().map(|slide| slide.id),
            );
            self.package.insert(self.presentation_part.clone(), presentation);
            tracing::debug!(count = slides.len(), "Removed slides present in the template");
        }
        Ok(slides.len())
    }

    fn append_slide(&mut self, draft: &SlideDraft) -> Result<(), AppError> {
        let layout_part = self.layout_parts.get(draft.layout_index).cloned().ok_or_else(|| {
            AppError::template_error(format!("Layout index {} out of range", draft.layout_index))
        })?;

        let slide_part = self.next_free_part("ppt/slides/slide");
        let mut slide_rels = Relationships::default();
        slide_rels.add(REL_SLIDE_LAYOUT, &relative_target(&slide_part, &layout_part));

        if let Some(notes) = &draft.notes {
            let notes_part = self.next_free_part("ppt/notesSlides/notesSlide");
            let mut notes_rels = Relationships::default();
            if let Some(master) = &self.notes_master {
                notes_rels.add(REL_NOTES_MASTER, &relative_target(&notes_part, master));
            }
            notes_rels.add(REL_SLIDE, &relative_target(&notes_part, &slide_part));
            slide_rels.add(REL_NOTES_SLIDE, &relative_target(&slide_part, &notes_part));

            self.package.insert(rels_path(&notes_part), notes_rels.to_xml());
            self.package.insert(notes_part.clone(), notes_xml(notes));
            self.content_types.set_override(&notes_part, CT_NOTES_SLIDE);
        }

        self.package.insert(rels_path(&slide_part), slide_rels.to_xml());
        self.package.insert(slide_part.clone(), slide_xml(draft));
        self.content_types.set_override(&slide_part, CT_SLIDE);

        let rid = self
            .presentation_rels
            .add(REL_SLIDE, &relative_target(&self.presentation_part, &slide_part));
        let id = self
            .slides
            .iter()
            .map(|slide| slide.id + 1)
            .max()
            .unwrap_or(MIN_SLIDE_ID)
            .max(MIN_SLIDE_ID);
        self.slides.push(SlideEntry { id, rid, part: slide_part });
        Ok(())
    }
}

/// `(id, r:id)` of every `p:sldId` in `presentation.xml`.
fn read_slide_ids(xml: &str) -> Result<Vec<(u32, String)>, AppError> {
    let mut reader = Reader::from_str(xml);
    let mut in_list = false;
    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"p:sldIdLst" => in_list = true,
            Ok(Event::End(e)) if e.name().as_ref() == b"p:sldIdLst" => in_list = false,
            Ok(Event::Empty(e)) | Ok(Event::Start(e))
                if in_list && e.local_name().as_ref() == b"sldId" =>
            {
                if let (Some(id), Some(rid)) = (slide_id(&e), relationship_id(&e)) {
                    ids.push((id, rid));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(AppError::template_error(format!("Invalid presentation XML: {e}"))),
            _ => {}
        }
    }

    Ok(ids)
}

fn slide_id(element: &BytesStart<'_>) -> Option<u32> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.prefix().is_none() && attr.key.local_name().as_ref() == b"id")
        .and_then(|attr| std::str::from_utf8(&attr.value).ok()?.parse().ok())
}

/// Replace the `p:sldIdLst` of `presentation.xml` with `slides`.
fn rewrite_slide_id_list(xml: &str, slides: &[SlideEntry]) -> Result<String, AppError> {
    let mut xml = strip_element(xml, "p:sldIdLst");
    if slides.is_empty() {
        return Ok(xml);
    }

    let mut list = String::from("<p:sldIdLst>");
    for slide in slides {
        list.push_str(&format!(r#"<p:sldId id="{}" r:id="{}"/>"#, slide.id, slide.rid));
    }
    list.push_str("</p:sldIdLst>");

    let anchor = ["<p:sldSz", "<p:notesSz"]
        .iter()
        .find_map(|tag| xml.find(tag))
        .ok_or_else(|| AppError::template_error("presentation.xml has no notesSz element"))?;
    xml.insert_str(anchor, &list);
    Ok(xml)
}

/// Remove the first `<tag>…</tag>` or `<tag/>` element from `xml`.
fn strip_element(xml: &str, tag: &str) -> String {
    let open = format!("<{tag}");
    let Some(start) = xml.find(&open) else {
        return xml.to_string();
    };
    let rest = &xml[start..];
    let Some(head_end) = rest.find('>') else {
        return xml.to_string();
    };

    let end = if rest[..head_end].ends_with('/') {
        start + head_end + 1
    } else {
        let close = format!("</{tag}>");
        match rest.find(&close) {
            Some(position) => start + position + close.len(),
            None => return xml.to_string(),
        }
    };

    format!("{}{}", &xml[..start], &xml[end..])
}

/// Drop references to removed slides from the PowerPoint 2010 section list.
fn drop_section_slide_ids(xml: &str, ids: impl Iterator<Item = u32>) -> String {
    ids.fold(xml.to_string(), |xml, id| xml.replace(&format!(r#"<p14:sldId id="{id}"/>"#), ""))
}
