//! Menu image loading and validation

use menumaster_types::{Error, MenuImage, Result};
use std::path::Path;

/// Supported image extensions
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "heic", "heif"];

/// Check if a path is a supported image file
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Validate an image file exists and has a supported extension
pub fn validate_image(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    if !path.is_file() {
        return Err(Error::InvalidImageFormat(format!(
            "{} is not a file",
            path.display()
        )));
    }

    if !is_supported_image(path) {
        return Err(Error::InvalidImageFormat(format!(
            "Unsupported image format: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Read a menu photo into memory. The file itself is never modified or copied.
pub fn load_menu_image(path: &Path) -> Result<MenuImage> {
    validate_image(path)?;

    let data = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string());
    let image = MenuImage::from_bytes(data, name)?;

    tracing::debug!(
        path = %path.display(),
        mime_type = image.mime_type(),
        bytes = image.len(),
        "loaded menu image"
    );
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("menu.jpg")));
        assert!(is_supported_image(Path::new("menu.JPEG")));
        assert!(is_supported_image(Path::new("menu.webp")));
        assert!(is_supported_image(Path::new("IMG_0042.HEIC")));
        assert!(!is_supported_image(Path::new("menu.bmp")));
        assert!(!is_supported_image(Path::new("menu.gif")));
        assert!(!is_supported_image(Path::new("menu.pdf")));
        assert!(!is_supported_image(Path::new("menu")));
    }

    #[test]
    fn test_missing_file() {
        let err = load_menu_image(Path::new("/definitely/not/here.jpg")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("photos.png");
        std::fs::create_dir(&sub).unwrap();
        assert!(matches!(
            validate_image(&sub),
            Err(Error::InvalidImageFormat(_))
        ));
    }

    #[test]
    fn test_loads_png_by_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lunch.png");
        let mut data = PNG_HEADER.to_vec();
        data.extend_from_slice(&[0; 16]);
        std::fs::write(&path, &data).unwrap();

        let image = load_menu_image(&path).unwrap();
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.name(), Some("lunch.png"));
        assert_eq!(image.data(), &data[..]);
    }

    #[test]
    fn test_loads_phone_heic_photo() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("IMG_0042.HEIC");
        let data = b"\x00\x00\x00\x18ftypheic\x00\x00\x00\x00mif1heic\x00\x00\x00\x08meta".to_vec();
        std::fs::write(&path, &data).unwrap();

        let image = load_menu_image(&path).unwrap();
        assert_eq!(image.mime_type(), "image/heic");
    }

    #[test]
    fn test_bmp_is_rejected_before_any_call() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("menu.bmp");
        std::fs::write(&path, b"BM\x3a\x00\x00\x00\x00\x00\x00\x00\x36\x00").unwrap();
        assert!(matches!(
            load_menu_image(&path),
            Err(Error::InvalidImageFormat(_))
        ));
    }

    #[test]
    fn test_mislabelled_text_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("menu.jpg");
        std::fs::write(&path, b"just some text").unwrap();
        assert!(load_menu_image(&path).is_err());
    }
}
