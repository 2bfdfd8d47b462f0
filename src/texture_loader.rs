use std::fs;
use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use tracing::{debug, warn};

use crate::constants::IMAGE_EXTENSIONS;
use crate::error::ImageError;
use crate::preload::ImageSource;

// --- Helper: List and Sort Image Names ---
pub fn load_sorted_image_names(dir_path: &Path) -> Result<Vec<String>, ImageError> {
    let read_error = |source| ImageError::Read { path: dir_path.to_path_buf(), source };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir_path).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if !path.is_file() {
            continue;
        }
        let supported = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()));
        if let (true, Some(name)) = (supported, path.file_name().and_then(|s| s.to_str())) {
            names.push(name.to_string());
        }
    }
    names.sort();

    if names.is_empty() {
        Err(ImageError::EmptyDirectory { path: dir_path.to_path_buf() })
    } else {
        Ok(names)
    }
}

/// Encoded file contents plus the EXIF orientation found in them.
#[derive(Debug, Clone)]
pub struct RawImage {
    pub bytes: Vec<u8>,
    pub extension: String,
    pub orientation: u16,
}

/// Reads images from disk. Safe to call from worker threads; decoding into
/// a texture happens later on the render thread.
pub struct FileSource;

impl ImageSource for FileSource {
    type Image = RawImage;

    fn fetch(&self, url: &Path) -> Result<RawImage, ImageError> {
        let bytes = fs::read(url).map_err(|source| ImageError::Read { path: url.to_path_buf(), source })?;
        let extension = url.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
        let orientation = read_orientation(url, &extension, &bytes);
        Ok(RawImage { bytes, extension, orientation })
    }
}

// EXIF is only read reliably from JPEG; everything else is upright
fn read_orientation(path: &Path, extension: &str, bytes: &[u8]) -> u16 {
    if extension != "jpg" && extension != "jpeg" {
        return 1;
    }
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => match exif.get_field(Tag::Orientation, In::PRIMARY).map(|f| &f.value) {
            Some(Value::Short(values)) if !values.is_empty() => values[0],
            _ => 1,
        },
        Err(e) => {
            warn!(path = %path.display(), "could not read EXIF data: {e}");
            1
        }
    }
}

// --- Decode, Apply EXIF Rotation, Create Texture ---
pub fn upload_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    raw: &RawImage,
    path: &Path,
) -> Result<Texture2D, ImageError> {
    let mut image = Image::load_image_from_mem(&format!(".{}", raw.extension), &raw.bytes)
        .map_err(|e| ImageError::Decode { path: path.to_path_buf(), reason: e.to_string() })?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise; flips are ignored
    match raw.orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if raw.orientation != 1 {
        debug!(path = %path.display(), orientation = raw.orientation, "applied EXIF rotation");
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| ImageError::Upload { path: path.to_path_buf(), reason: e.to_string() })?;
    Ok(texture)
}
