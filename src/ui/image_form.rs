//! Image selection form: a file upload input and a camera capture input.
//!
//! Only one input holds an image at a time. Selecting a file in one input
//! clears the other, and the preview always reflects the latest selection.

use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::types::errors::ImageError;
use crate::types::prediction::ImageUpload;

/// Which input an image came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Upload,
    Camera,
}

impl ImageSource {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "upload" => Some(ImageSource::Upload),
            "camera" => Some(ImageSource::Camera),
            _ => None,
        }
    }
}

/// Guesses an image MIME type from the file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

/// Encodes bytes as a `data:` URI.
pub fn data_uri(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
}

/// Reads an image file into an upload payload.
pub fn read_image(path: &Path) -> Result<ImageUpload, ImageError> {
    let bytes = fs::read(path).map_err(|e| ImageError::ReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageUpload {
        file_name,
        mime_type: mime_for_path(path).to_string(),
        bytes,
    })
}

#[derive(Debug, Default)]
pub struct ImageForm {
    upload: Option<ImageUpload>,
    camera: Option<ImageUpload>,
    preview: Option<String>,
}

impl ImageForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file held by `source` and clears the other input.
    ///
    /// `None` empties `source` and hides the preview. Returns the new preview
    /// data URI, if any.
    pub fn select(
        &mut self,
        source: ImageSource,
        path: Option<&Path>,
    ) -> Result<Option<&str>, ImageError> {
        let image = path.map(read_image).transpose()?;
        self.preview = image.as_ref().map(|img| data_uri(&img.mime_type, &img.bytes));

        let (target, other) = match source {
            ImageSource::Upload => (&mut self.upload, &mut self.camera),
            ImageSource::Camera => (&mut self.camera, &mut self.upload),
        };
        *target = image;
        *other = None;

        tracing::debug!(?source, has_image = target.is_some(), "Image selection changed");
        Ok(self.preview.as_deref())
    }

    /// The image to submit: the uploaded file first, else the camera capture.
    pub fn selected(&self) -> Option<&ImageUpload> {
        self.upload.as_ref().or(self.camera.as_ref())
    }

    /// Data URI currently shown in the preview.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }
}
