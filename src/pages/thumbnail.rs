use image::imageops::FilterType;
use std::path::Path;

/// Size of generated thumbnails (longest edge)
const THUMBNAIL_SIZE: u32 = 250;

/// Decoded thumbnail pixels (RGBA8), ready for the UI to wrap in a texture
/// handle. The model keeps pixel data only so it stays independent of any
/// widget toolkit.
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Decode an image file and downscale it to thumbnail size.
/// Returns None if the file cannot be decoded as an image.
pub fn make_thumbnail(path: &Path) -> Option<Thumbnail> {
    let img = image::open(path).ok()?;

    // Resize so the longest edge fits THUMBNAIL_SIZE, keeping aspect ratio
    let thumbnail = img.resize(THUMBNAIL_SIZE, THUMBNAIL_SIZE, FilterType::Lanczos3);

    let rgba = thumbnail.to_rgba8();
    Some(Thumbnail {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}
