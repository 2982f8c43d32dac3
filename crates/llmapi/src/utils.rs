use anyhow::{Context, Result};
use base64::Engine as _;
use std::fs;
use std::path::Path;

pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Extensions that may be sent inline as images, lowercase.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

pub fn is_supported_image<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

pub fn detect_mime_type<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if !is_supported_image(path) {
        return FALLBACK_MIME_TYPE.to_string();
    }
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MIME_TYPE)
        .to_string()
}

/// Reads `path` once and returns `data:<mime>;base64,<payload>`.
pub fn encode_image_as_data_url<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read image file: {}", path.display()))?;
    Ok(to_data_url(&detect_mime_type(path), &bytes))
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", encode_byte_to_base64(bytes))
}

pub fn encode_byte_to_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

pub fn current_timestamp_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn data_url_carries_mime_and_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "vase.png", b"hello");
        let encoded = encode_image_as_data_url(&path).unwrap();
        assert_eq!(encoded, "data:image/png;base64,aGVsbG8=");
    }

    #[test]
    fn webp_and_jpeg_mime_types() {
        let dir = tempfile::tempdir().unwrap();
        let webp = write_file(dir.path(), "a.webp", b"x");
        let jpeg = write_file(dir.path(), "b.JPEG", b"x");
        let jpg = write_file(dir.path(), "c.jpg", b"x");
        assert!(encode_image_as_data_url(&webp).unwrap().starts_with("data:image/webp;base64,"));
        assert!(encode_image_as_data_url(&jpeg).unwrap().starts_with("data:image/jpeg;base64,"));
        assert!(encode_image_as_data_url(&jpg).unwrap().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn unknown_extension_falls_back_to_octet_stream() {
        let dir = tempfile::tempdir().unwrap();
        let gif = write_file(dir.path(), "anim.gif", b"x");
        let bare = write_file(dir.path(), "noext", b"x");
        assert!(
            encode_image_as_data_url(&gif)
                .unwrap()
                .starts_with("data:application/octet-stream;base64,")
        );
        assert!(
            encode_image_as_data_url(&bare)
                .unwrap()
                .starts_with("data:application/octet-stream;base64,")
        );
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = encode_image_as_data_url(dir.path().join("gone.png")).unwrap_err();
        assert!(err.to_string().contains("gone.png"));
    }

    #[test]
    fn supported_extensions_ignore_case() {
        assert!(is_supported_image("a.png"));
        assert!(is_supported_image("c.JPEG"));
        assert!(is_supported_image("d.WebP"));
        assert!(!is_supported_image("b.txt"));
        assert!(!is_supported_image("png"));
    }
}
