use axum::extract::Multipart;
use base64::{Engine, engine::general_purpose::STANDARD};
use mime::Mime;

/// Result type used by the upload helpers.
pub type UploadResult<T> = Result<T, UploadError>;

/// Error returned when validating an uploaded gallery image.
#[derive(Debug)]
pub struct UploadError {
    message: String,
}

impl UploadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for UploadError {}

pub const IMAGE_FIELD: &str = "image";
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// An image file read fully into memory.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub original_name: String,
    pub content_type: Mime,
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    /// Embeddable `data:` reference for the image.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type.essence_str(),
            STANDARD.encode(&self.bytes)
        )
    }
}

/// Text fields and the image collected from the gallery upload form.
#[derive(Debug, Default)]
pub struct GalleryUpload {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: Option<UploadedImage>,
}

/// Reads the gallery upload form, enforcing the allowed image types and size.
pub async fn read_gallery_upload(
    mut multipart: Multipart,
    max_bytes: usize,
) -> UploadResult<GalleryUpload> {
    let mut upload = GalleryUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| UploadError::new(format!("could not read upload form: {err}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGE_FIELD {
            let original_name = field.file_name().unwrap_or_default().to_string();
            if original_name.is_empty() {
                continue;
            }
            let content_type = image_type_for(&original_name)?;
            let bytes = field
                .bytes()
                .await
                .map_err(|err| UploadError::new(format!("could not read image: {err}")))?;

            if bytes.is_empty() {
                return Err(UploadError::new("The selected image is empty."));
            }
            if bytes.len() > max_bytes {
                return Err(UploadError::new(format!(
                    "Images must be at most {} KB.",
                    max_bytes / 1024
                )));
            }

            upload.image = Some(UploadedImage {
                original_name,
                content_type,
                bytes: bytes.to_vec(),
            });
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|err| UploadError::new(format!("could not read field `{name}`: {err}")))?;

        match name.as_str() {
            "title" => upload.title = value.trim().to_string(),
            "description" => upload.description = value.trim().to_string(),
            "category" => upload.category = value.trim().to_string(),
            _ => {}
        }
    }

    Ok(upload)
}

fn image_type_for(file_name: &str) -> UploadResult<Mime> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if !ALLOWED_IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        return Err(UploadError::new(format!(
            "Unsupported image type. Allowed: {}.",
            ALLOWED_IMAGE_EXTENSIONS.join(", ")
        )));
    }

    match extension.as_str() {
        "jpg" | "jpeg" => Ok(mime::IMAGE_JPEG),
        "png" => Ok(mime::IMAGE_PNG),
        "gif" => Ok(mime::IMAGE_GIF),
        other => format!("image/{other}")
            .parse::<Mime>()
            .map_err(|err| UploadError::new(format!("invalid image type: {err}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_types_follow_extension() {
        assert_eq!(image_type_for("Sports Day.JPG").unwrap(), mime::IMAGE_JPEG);
        assert_eq!(image_type_for("lab.png").unwrap(), mime::IMAGE_PNG);
        assert_eq!(image_type_for("fest.webp").unwrap().essence_str(), "image/webp");
    }

    #[test]
    fn non_images_are_rejected() {
        let err = image_type_for("report.pdf").unwrap_err();
        assert!(err.message().contains("Unsupported image type"));
        assert!(image_type_for("no-extension").is_err());
    }

    #[test]
    fn data_url_embeds_base64_payload() {
        let image = UploadedImage {
            original_name: "dot.png".into(),
            content_type: mime::IMAGE_PNG,
            bytes: b"abc".to_vec(),
        };
        assert_eq!(image.to_data_url(), "data:image/png;base64,YWJj");
    }
}
