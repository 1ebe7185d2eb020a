use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Map, Value};

use crate::{Error, LocalSystemStore};

const IMAGE_EXTENSIONS: [&str; 5] = ["webp", "jpg", "jpeg", "png", "gif"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebuildReport {
    pub scanned: usize,
    pub written: usize,
    pub skipped: Vec<String>,
}

fn image_extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    IMAGE_EXTENSIONS.contains(&ext.as_str()).then_some(ext)
}

fn mime_type_for_extension(ext: &str) -> &'static str {
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        _ => "image/webp",
    }
}

/// `a.b.png` -> `a.b`, `.png` -> ``
fn assignment_key(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(i) if i + 1 < file_name.len() => &file_name[..i],
        _ => file_name,
    }
}

pub fn data_url(mime_type: &str, data: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(data))
}

impl LocalSystemStore {
    /// Replaces the assignments document with one entry per image in the
    /// upload directory, each embedding the image as a data URL.
    pub fn rebuild_assignments(&self) -> Result<RebuildReport, Error> {
        let names = self.list_images()?;
        log::info!(
            "found {} files in {}",
            names.len(),
            self.upload_dir().display()
        );

        let mut assignments = Map::new();
        let mut skipped = Vec::new();
        for name in &names {
            let Some(ext) = image_extension(name) else {
                log::warn!("skipping non-image file: {}", name);
                skipped.push(name.clone());
                continue;
            };
            let data = match self.read_image(name) {
                Ok(Some(data)) => data,
                Ok(None) => {
                    log::warn!("{} disappeared while rebuilding", name);
                    skipped.push(name.clone());
                    continue;
                }
                Err(e) => {
                    log::error!("error processing {}: {}", name, e);
                    skipped.push(name.clone());
                    continue;
                }
            };
            assignments.insert(
                assignment_key(name).to_string(),
                json!({
                    "src": data_url(mime_type_for_extension(&ext), &data),
                    "filename": name,
                }),
            );
            if assignments.len() % 50 == 0 {
                log::info!("processed {} images...", assignments.len());
            }
        }

        let written = assignments.len();
        let data = serde_json::to_vec_pretty(&Value::Object(assignments)).map_err(Error::Json)?;
        self.replace_assignments_file(&data)?;
        log::info!(
            "wrote {} image assignments to {} ({} bytes)",
            written,
            self.assignments_file().display(),
            data.len()
        );

        Ok(RebuildReport {
            scanned: names.len(),
            written,
            skipped,
        })
    }
}
