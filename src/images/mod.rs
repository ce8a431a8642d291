//! Offer image ingestion.
//!
//! Every upload arrives as a `data:<mime>;base64,<payload>` string and
//! is normalized to a bounded-size JPEG on disk. The transcode doubles
//! as content validation: bytes that don't decode as an image are
//! rejected before anything is written.

use std::io::Cursor;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::errors::AppError;

/// Maximum width of a stored image in pixels. Larger uploads are
/// downscaled with the aspect ratio preserved; smaller ones are never
/// upscaled.
pub const MAX_WIDTH: u32 = 800;

/// JPEG quality of stored images.
pub const JPEG_QUALITY: u8 = 80;

/// Path prefix under which stored images are served.
pub const URL_PREFIX: &str = "/uploads";

/// Decode, transcode, and persist an uploaded image.
///
/// Returns the reference path (`/uploads/<id>.jpg`). No file is written
/// unless the whole pipeline succeeds.
pub async fn ingest(
    uploads_dir: &Path,
    record_id: &str,
    data_url: &str,
) -> Result<String, AppError> {
    let payload = parse_data_url(data_url)?;

    let bytes = B64
        .decode(payload)
        .map_err(|e| AppError::Validation(format!("Invalid base64 image payload: {}", e)))?;

    let jpeg = transcode(&bytes)?;

    let file_name = format!("{}.jpg", record_id);
    tokio::fs::write(uploads_dir.join(&file_name), jpeg).await?;

    Ok(format!("{}/{}", URL_PREFIX, file_name))
}

/// Best-effort removal of a stored image.
///
/// Failure is logged and swallowed; the caller's record is already gone
/// and an orphan file is the accepted outcome.
pub async fn remove(uploads_dir: &Path, image_ref: &str) {
    let Some(file_name) = image_ref.rsplit('/').next().filter(|f| !f.is_empty()) else {
        tracing::warn!("Cannot derive file name from image ref {:?}", image_ref);
        return;
    };

    if let Err(err) = tokio::fs::remove_file(uploads_dir.join(file_name)).await {
        tracing::warn!("Failed to delete image {}: {}", file_name, err);
    }
}

/// Extract the base64 payload from a `data:<mime>;base64,<payload>`
/// string, accepting only image mime types.
fn parse_data_url(data_url: &str) -> Result<&str, AppError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| AppError::Validation("Image must be a base64 data URL".to_string()))?;

    let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| AppError::Validation("Image must be a base64 data URL".to_string()))?;

    if !mime.starts_with("image/") {
        return Err(AppError::Validation(format!(
            "Unsupported upload type {:?}",
            mime
        )));
    }

    Ok(payload)
}

/// Re-encode raw upload bytes as a width-capped, quality-80 JPEG.
fn transcode(bytes: &[u8]) -> Result<Vec<u8>, AppError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| AppError::Validation(format!("Unreadable image: {}", e)))?;

    let img = if img.width() > MAX_WIDTH {
        let height = ((u64::from(img.height()) * u64::from(MAX_WIDTH)) / u64::from(img.width()))
            .max(1) as u32;
        img.resize_exact(MAX_WIDTH, height, FilterType::Lanczos3)
    } else {
        img
    };

    // JPEG has no alpha channel
    let rgb = img.to_rgb8();

    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(Cursor::new(&mut out), JPEG_QUALITY);
    encoder
        .encode_image(&rgb)
        .map_err(|e| AppError::Validation(format!("Failed to encode image: {}", e)))?;

    Ok(out)
}
