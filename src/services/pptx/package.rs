//! Zip container holding the parts of an OOXML package.

use std::collections::BTreeMap;
use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::domain::AppError;

pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// In-memory package: part name (zip member name, no leading slash) → bytes.
#[derive(Debug, Clone, Default)]
pub struct OpcPackage {
    parts: BTreeMap<String, Vec<u8>>,
}

impl OpcPackage {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AppError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut parts = BTreeMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().to_string();
            let mut buf = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut buf)?;
            parts.insert(name, buf);
        }

        Ok(Self { parts })
    }

    /// Serialize the package; `[Content_Types].xml` is written first.
    pub fn to_bytes(&self) -> Result<Vec<u8>, AppError> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        let ordered = self
            .parts
            .get_key_value(CONTENT_TYPES_PART)
            .into_iter()
            .chain(self.parts.iter().filter(|(name, _)| name.as_str() != CONTENT_TYPES_PART));

        for (name, bytes) in ordered {
            writer.start_file(name.as_str(), options)?;
            writer.write_all(bytes)?;
        }

        Ok(writer.finish()?.into_inner())
    }

    pub fn contains(&self, part: &str) -> bool {
        self.parts.contains_key(part)
    }

    pub fn get(&self, part: &str) -> Option<&[u8]> {
        self.parts.get(part).map(Vec::as_slice)
    }

    /// Part content as UTF-8 text; a missing part is a template error.
    pub fn get_str(&self, part: &str) -> Result<&str, AppError> {
        let bytes = self
            .get(part)
            .ok_or_else(|| AppError::template_error(format!("Missing package part: {part}")))?;
        std::str::from_utf8(bytes)
            .map_err(|e| AppError::template_error(format!("Part {part} is not UTF-8: {e}")))
    }

    pub fn insert(&mut self, part: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.parts.insert(part.into(), bytes.into());
    }

    pub fn remove(&mut self, part: &str) -> Option<Vec<u8>> {
        self.parts.remove(part)
    }
}

/// Relationships part for `part`, e.g. `ppt/slides/_rels/slide1.xml.rels`.
pub fn rels_path(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None if part.is_empty() => "_rels/.rels".to_string(),
        None => format!("_rels/{part}.rels"),
    }
}

/// Resolve a relationship target relative to the part that owns the relationship.
pub fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return normalize(absolute);
    }
    let base = source_part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");
    if base.is_empty() { normalize(target) } else { normalize(&format!("{base}/{target}")) }
}

/// Path of `target_part` relative to the directory of `source_part`.
pub fn relative_target(source_part: &str, target_part: &str) -> String {
    let from: Vec<&str> = source_part.split('/').collect();
    let from_dir = &from[..from.len().saturating_sub(1)];
    let to: Vec<&str> = target_part.split('/').collect();

    let common = from_dir.iter().zip(&to).take_while(|(a, b)| a == b).count();
    let mut segments: Vec<&str> = vec![".."; from_dir.len() - common];
    segments.extend(&to[common..]);
    segments.join("/")
}

fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
