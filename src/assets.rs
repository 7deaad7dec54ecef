//! Inline assets: fonts and images embedded as base64 data URIs.
//!
//! Every asset here is optional. A missing file is logged and the matching
//! rule or `<img>` is left out; nothing in this module fails the run.

use crate::config::{FontFace, RenderConfig};
use base64::Engine as Base64Engine;
use log::{debug, warn};
use std::path::Path;

/// Base64-encode a file, or `None` if it cannot be read
pub fn encode_file(path: &Path) -> Option<String> {
    match std::fs::read(path) {
        Ok(bytes) => {
            debug!("Embedding {} ({} bytes)", path.display(), bytes.len());
            Some(base64::engine::general_purpose::STANDARD.encode(bytes))
        }
        Err(e) => {
            warn!("Asset not embedded, cannot read {}: {}", path.display(), e);
            None
        }
    }
}

/// `data:` URI for a PNG image
pub fn image_data_uri(path: &Path) -> Option<String> {
    encode_file(path).map(|b64| format!("data:image/png;base64,{}", b64))
}

/// MIME type and CSS `format()` hint for a font file
fn font_format(file: &str) -> Option<(&'static str, &'static str)> {
    let ext = Path::new(file).extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "otf" => Some(("font/otf", "opentype")),
        "ttf" => Some(("font/ttf", "truetype")),
        "woff" => Some(("font/woff", "woff")),
        "woff2" => Some(("font/woff2", "woff2")),
        _ => None,
    }
}

/// Render a single `@font-face` rule for already-encoded font data
pub fn font_face_rule(font: &FontFace, b64: &str) -> Option<String> {
    let Some((mime, format)) = font_format(&font.file) else {
        warn!("Unsupported font type for {}, skipping", font.file);
        return None;
    };
    Some(format!(
        "
@font-face {{
    font-family: '{family}';
    font-weight: {weight};
    src: url(data:{mime};base64,{b64}) format('{format}');
    font-display: swap;
}}",
        family = font.family,
        weight = font.weight,
    ))
}

/// CSS with one `@font-face` rule per configured font that could be read
pub fn embedded_font_css(config: &RenderConfig) -> String {
    let mut css = String::new();
    for font in &config.fonts {
        let path = config.font_path(font);
        if let Some(rule) = encode_file(&path).and_then(|b64| font_face_rule(font, &b64)) {
            css.push_str(&rule);
        }
    }
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_none() {
        assert!(encode_file(Path::new("does/not/exist.png")).is_none());
        assert!(image_data_uri(Path::new("does/not/exist.png")).is_none());
    }

    #[test]
    fn encodes_with_standard_alphabet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.bin");
        std::fs::write(&path, [0xfbu8, 0xff, 0x00]).unwrap();
        assert_eq!(encode_file(&path).as_deref(), Some("+/8A"));
        assert_eq!(
            image_data_uri(&path).as_deref(),
            Some("data:image/png;base64,+/8A")
        );
    }

    #[test]
    fn font_rule_uses_extension_format() {
        let otf = FontFace::new("Pretendard", "700", "Pretendard-Bold.otf");
        let rule = font_face_rule(&otf, "AAAA").unwrap();
        assert!(rule.contains("font-family: 'Pretendard';"));
        assert!(rule.contains("font-weight: 700;"));
        assert!(rule.contains("url(data:font/otf;base64,AAAA) format('opentype')"));

        let ttf = FontFace::new("Black Han Sans", "normal", "BlackHanSans-Regular.TTF");
        assert!(font_face_rule(&ttf, "AAAA").unwrap().contains("format('truetype')"));

        let svg = FontFace::new("Old", "normal", "old.svg");
        assert!(font_face_rule(&svg, "AAAA").is_none());
    }

    #[test]
    fn missing_font_omits_only_its_rule() {
        let dir = tempfile::tempdir().unwrap();
        let fonts = dir.path().join("fonts");
        std::fs::create_dir_all(&fonts).unwrap();
        for file in ["Pretendard-Regular.otf", "Pretendard-Bold.otf", "BlackHanSans-Regular.ttf"] {
            std::fs::write(fonts.join(file), b"font").unwrap();
        }

        let cfg = RenderConfig::new().with_base_dir(dir.path());
        let css = embedded_font_css(&cfg);

        assert_eq!(css.matches("@font-face").count(), 3);
        assert!(css.contains("font-weight: normal;"));
        assert!(css.contains("font-weight: 700;"));
        assert!(!css.contains("font-weight: 500;"));
        assert!(css.contains("font-family: 'Black Han Sans';"));
    }
}
