use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::domain::slide_image::{image_subtype, sort_by_slide_number};
use crate::domain::{AppError, RenderConfig};
use crate::ports::SlideRenderer;

const IMAGE_PREFIX: &str = "Slide";

/// Exports slides through headless LibreOffice (deck → PDF) and `pdftoppm` (PDF → PNG).
#[derive(Debug, Clone)]
pub struct SofficeRenderer {
    config: RenderConfig,
}

impl SofficeRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    fn run(&self, program: &str, args: &[&str]) -> Result<(), AppError> {
        let command_line = format!("{program} {}", args.join(" "));
        tracing::debug!(command = %command_line, "Running renderer command");

        let output = Command::new(program).args(args).output().map_err(|e| AppError::Render {
            command: command_line.clone(),
            details: e.to_string(),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::Render {
                command: command_line,
                details: if stderr.is_empty() {
                    format!("exited with {}", output.status)
                } else {
                    stderr
                },
            });
        }
        Ok(())
    }
}

impl SlideRenderer for SofficeRenderer {
    fn render(&self, deck: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
        fs::create_dir_all(out_dir)?;
        let deck_arg = deck.to_string_lossy();
        let out_arg = out_dir.to_string_lossy();

        self.run(
            &self.config.soffice,
            &["--headless", "--convert-to", "pdf", "--outdir", &out_arg, &deck_arg],
        )?;

        let stem = deck.file_stem().and_then(|s| s.to_str()).unwrap_or("presentation");
        let pdf = out_dir.join(format!("{stem}.pdf"));
        if !pdf.exists() {
            return Err(AppError::Render {
                command: self.config.soffice.clone(),
                details: format!("expected {} was not produced", pdf.display()),
            });
        }

        let pdf_arg = pdf.to_string_lossy();
        let prefix = out_dir.join(IMAGE_PREFIX);
        let prefix_arg = prefix.to_string_lossy();
        let dpi = self.config.dpi.to_string();
        self.run(&self.config.pdftoppm, &["-png", "-r", &dpi, &pdf_arg, &prefix_arg])?;

        if let Err(e) = fs::remove_file(&pdf) {
            tracing::debug!(path = %pdf.display(), error = %e, "Could not remove intermediate PDF");
        }

        let images = collect_slide_images(out_dir)?;
        if images.is_empty() {
            return Err(AppError::Render {
                command: self.config.pdftoppm.clone(),
                details: format!("no slide images written to {}", out_dir.display()),
            });
        }
        Ok(images)
    }
}

/// `Slide-N.png` files in `dir`, sorted by slide number.
fn collect_slide_images(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut images = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_slide = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with(IMAGE_PREFIX));
        if is_slide && image_subtype(&path).is_some() {
            images.push(path);
        }
    }
    sort_by_slide_number(&mut images);
    Ok(images)
}
