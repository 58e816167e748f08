//! Image type detection for the chart attachment.

use casewatch_common::{CaseWatchError, Result};
use image::ImageFormat;

/// MIME subtype (`image/<subtype>`) detected from the leading bytes.
pub fn image_subtype(bytes: &[u8]) -> Result<&'static str> {
    let format = image::guess_format(bytes)
        .map_err(|e| CaseWatchError::mail_with_source("Attachment is not a recognised image", e))?;

    match format {
        ImageFormat::Png => Ok("png"),
        ImageFormat::Jpeg => Ok("jpeg"),
        ImageFormat::Gif => Ok("gif"),
        ImageFormat::Bmp => Ok("bmp"),
        ImageFormat::Tiff => Ok("tiff"),
        ImageFormat::WebP => Ok("webp"),
        other => Err(CaseWatchError::mail(format!(
            "Unsupported attachment image format {other:?}"
        ))),
    }
}
