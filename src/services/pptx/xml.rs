//! Small quick-xml helpers shared by the package readers and writers.

use quick_xml::events::BytesStart;

use crate::domain::AppError;

/// Value of the attribute whose local name is `name`, ignoring any prefix.
///
/// Entity and character references (`&amp;`, `&#233;`, `&#x2013;`) are decoded.
pub fn attr_value(element: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, AppError> {
    let Some(attr) =
        element.attributes().flatten().find(|attr| attr.key.local_name().as_ref() == name)
    else {
        return Ok(None);
    };
    let value = attr.unescape_value().map_err(|e| {
        AppError::template_error(format!(
            "Invalid value for attribute '{}': {e}",
            String::from_utf8_lossy(name)
        ))
    })?;
    Ok(Some(value.into_owned()))
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {}
            c => escaped.push(c),
        }
    }
    escaped
}
