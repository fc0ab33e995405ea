//! `[Content_Types].xml` model.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::domain::AppError;

use super::xml::{attr_value, escape_xml};

pub const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
pub const CT_NOTES_SLIDE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.notesSlide+xml";
pub const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
pub const CT_TEMPLATE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.template.main+xml";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypes {
    defaults: Vec<(String, String)>,
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    pub fn parse(xml: &str) -> Result<Self, AppError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);
        let mut types = Self::default();

        loop {
            match reader.read_event() {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"Default" => {
                        if let (Some(ext), Some(ct)) =
                            (attr_value(&e, b"Extension")?, attr_value(&e, b"ContentType")?)
                        {
                            types.defaults.push((ext, ct));
                        }
                    }
                    b"Override" => {
                        if let (Some(part), Some(ct)) =
                            (attr_value(&e, b"PartName")?, attr_value(&e, b"ContentType")?)
                        {
                            types.overrides.push((part, ct));
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(AppError::template_error(format!("Invalid content types: {e}"))),
                _ => {}
            }
        }

        Ok(types)
    }

    /// Content type override for a part name (without leading slash).
    pub fn override_for(&self, part: &str) -> Option<&str> {
        let key = part_name(part);
        self.overrides.iter().find(|(name, _)| *name == key).map(|(_, ct)| ct.as_str())
    }

    pub fn set_override(&mut self, part: &str, content_type: &str) {
        let key = part_name(part);
        match self.overrides.iter_mut().find(|(name, _)| *name == key) {
            Some(entry) => entry.1 = content_type.to_string(),
            None => self.overrides.push((key, content_type.to_string())),
        }
    }

    pub fn remove_override(&mut self, part: &str) {
        let key = part_name(part);
        self.overrides.retain(|(name, _)| *name != key);
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(512 + self.overrides.len() * 160);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
        for (ext, ct) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(ct)
            ));
        }
        for (part, ct) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(part),
                escape_xml(ct)
            ));
        }
        xml.push_str("</Types>");
        xml
    }
}

fn part_name(part: &str) -> String {
    format!("/{}", part.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_can_be_set_replaced_and_removed() {
        let xml = r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.template.main+xml"/>
</Types>"#;
        let mut types = ContentTypes::parse(xml).unwrap();
        assert_eq!(types.override_for("ppt/presentation.xml"), Some(CT_TEMPLATE));

        types.set_override("ppt/presentation.xml", CT_PRESENTATION);
        types.set_override("ppt/slides/slide1.xml", CT_SLIDE);
        assert_eq!(types.override_for("/ppt/presentation.xml"), Some(CT_PRESENTATION));

        types.remove_override("ppt/slides/slide1.xml");
        let back = ContentTypes::parse(&types.to_xml()).unwrap();
        assert_eq!(back, types);
        assert_eq!(back.override_for("ppt/slides/slide1.xml"), None);
    }
}
