//! Naming conventions for exported slide images.

use std::path::Path;

/// Slide number taken from the first run of digits in the file stem; 0 when there is none.
pub fn slide_number(path: &Path) -> u32 {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    let digits: String = stem
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// MIME subtype for a data URL, by extension. `None` for non-images.
pub fn image_subtype(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("png"),
        "jpg" | "jpeg" => Some("jpeg"),
        _ => None,
    }
}

/// Stable sort by slide number. Returns the numbers that appeared more than once.
pub fn sort_by_slide_number<P: AsRef<Path>>(paths: &mut [P]) -> Vec<u32> {
    paths.sort_by_key(|path| slide_number(path.as_ref()));
    let mut collisions: Vec<u32> = paths
        .windows(2)
        .map(|pair| (slide_number(pair[0].as_ref()), slide_number(pair[1].as_ref())))
        .filter(|(a, b)| a == b)
        .map(|(a, _)| a)
        .collect();
    collisions.dedup();
    collisions
}
