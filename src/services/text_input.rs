use std::fs;
use std::path::Path;

use encoding_rs::{UTF_8, WINDOWS_1252};

use crate::domain::AppError;

/// Read an input text file, trying UTF-8 (BOM stripped) and then Windows-1252.
pub fn read_input_text(path: &Path) -> Result<String, AppError> {
    let bytes = fs::read(path)?;
    decode_text(&bytes).ok_or_else(|| AppError::Decode { path: path.display().to_string() })
}

/// Decode with the first encoding that maps every byte.
pub fn decode_text(bytes: &[u8]) -> Option<String> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return Some(text.into_owned());
    }

    // encoding_rs passes the five undefined cp1252 bytes through as C1 controls.
    let (text, had_errors) = WINDOWS_1252.decode_with_bom_removal(bytes);
    if had_errors || text.chars().any(|c| ('\u{80}'..='\u{9f}').contains(&c)) {
        return None;
    }
    tracing::debug!(encoding = WINDOWS_1252.name(), "Decoded input with fallback encoding");
    Some(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn utf8_bom_is_stripped() {
        let bytes = b"\xEF\xBB\xBFQuarterly results";
        assert_eq!(decode_text(bytes).as_deref(), Some("Quarterly results"));
    }

    #[test]
    fn latin1_bytes_fall_back_to_windows_1252() {
        // "Café – 5€" in cp1252
        let bytes = b"Caf\xE9 \x96 5\x80";
        assert_eq!(decode_text(bytes).as_deref(), Some("Café – 5€"));
    }

    #[test]
    fn undecodable_input_is_a_decode_error() {
        // 0x81 is unmapped in Windows-1252 and invalid as UTF-8
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("input.txt");
        fs::write(&path, b"bad \x81 byte").unwrap();

        let err = read_input_text(&path).unwrap_err();
        assert!(matches!(err, AppError::Decode { .. }));
    }
}
