//! Render configuration.
//!
//! Every section carries `#[serde(default)]` so a TOML file only needs to
//! name the keys it overrides. The defaults are the values the card news set
//! was authored against.

use crate::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Complete configuration for one run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub page: PageSetup,
    pub text: TextConfig,
    pub paths: PathConfig,
    pub output: OutputConfig,
    pub display: DisplayConfig,
    pub fonts: Vec<FontFace>,
    /// Directory relative paths are resolved against (not read from TOML)
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Page size in CSS pixels and page margins
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageSetup {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1080,
            margin: Margin::default(),
        }
    }
}

impl PageSetup {
    /// CSS pixels per inch, as used by Chrome's print pipeline
    pub const PX_PER_INCH: f64 = 96.0;

    pub fn width_in(&self) -> f64 {
        px_to_in(self.width)
    }

    pub fn height_in(&self) -> f64 {
        px_to_in(self.height)
    }
}

/// Page margins in CSS pixels
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

pub(crate) fn px_to_in(px: u32) -> f64 {
    f64::from(px) / PageSetup::PX_PER_INCH
}

/// Labels placed on the cover and closing pages
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub main_title: String,
    pub sub_title: String,
    /// Inserted as markup, so `<br>` line breaks are kept
    pub thank_you_message: String,
    pub html_title: String,
    /// Text inside the cover's speech bubble
    pub greeting: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            main_title: "시그소개".to_string(),
            sub_title: "멘사 시그를 알려주는 Q&A".to_string(),
            thank_you_message: "읽어주셔서<br>감사합니다!".to_string(),
            html_title: "시그니처 모임 Q&A".to_string(),
            greeting: "안-녕!".to_string(),
        }
    }
}

/// Input and output locations, relative to the base directory
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub output_dir: PathBuf,
    pub template_dir: PathBuf,
    pub style_file: PathBuf,
    pub font_dir: PathBuf,
    pub image_dir: PathBuf,
    pub cover_character: Option<PathBuf>,
    /// Off by default; the stock thank-you page carries no artwork
    pub closing_character: Option<PathBuf>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            template_dir: PathBuf::from("templates"),
            style_file: PathBuf::from("style.css"),
            font_dir: PathBuf::from("fonts"),
            image_dir: PathBuf::from("output/images"),
            cover_character: Some(PathBuf::from("image/character/1.png")),
            closing_character: None,
        }
    }
}

/// Output file names inside `output_dir`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub html_file: String,
    pub pdf_file: String,
    pub summary_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            html_file: "output.html".to_string(),
            pdf_file: "output.pdf".to_string(),
            summary_file: "output.txt".to_string(),
        }
    }
}

/// Layout and export switches
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Communities shown per category page; the rest are dropped
    pub max_communities_per_page: usize,
    /// strftime-style format for the closing page date
    pub date_format: String,
    pub export_png: bool,
    /// Extra wait after navigation so embedded fonts finish applying
    pub settle_delay_ms: u64,
    /// Selector matching one rendered page
    pub page_selector: String,
    /// Clear and recreate the output directory before writing
    pub clean_output: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_communities_per_page: 3,
            date_format: "%Y-%m-%d".to_string(),
            export_png: true,
            settle_delay_ms: 2000,
            page_selector: ".page".to_string(),
            clean_output: false,
        }
    }
}

/// A font file embedded as an `@font-face` rule
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FontFace {
    pub family: String,
    /// CSS `font-weight` value such as `normal`, `500`, `700`
    #[serde(default = "FontFace::default_weight")]
    pub weight: String,
    /// File name inside `font_dir`
    pub file: String,
}

impl FontFace {
    pub fn new(family: &str, weight: &str, file: &str) -> Self {
        Self {
            family: family.to_string(),
            weight: weight.to_string(),
            file: file.to_string(),
        }
    }

    fn default_weight() -> String {
        "normal".to_string()
    }

    /// Fonts the card news stylesheet refers to
    pub fn defaults() -> Vec<FontFace> {
        vec![
            FontFace::new("Pretendard", "normal", "Pretendard-Regular.otf"),
            FontFace::new("Pretendard", "500", "Pretendard-Medium.otf"),
            FontFace::new("Pretendard", "700", "Pretendard-Bold.otf"),
            FontFace::new("Black Han Sans", "normal", "BlackHanSans-Regular.ttf"),
        ]
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page: PageSetup::default(),
            text: TextConfig::default(),
            paths: PathConfig::default(),
            output: OutputConfig::default(),
            display: DisplayConfig::default(),
            fonts: FontFace::defaults(),
            base_dir: None,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document on top of the defaults
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: RenderConfig =
            toml::from_str(source).map_err(|e| Error::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file on top of the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&source)
    }

    /// Resolve paths against `dir` instead of the working directory
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.page.width == 0 || self.page.height == 0 {
            return Err(Error::ConfigError(format!(
                "page size must be non-zero, got {}x{}",
                self.page.width, self.page.height
            )));
        }
        if StrftimeItems::new(&self.display.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(Error::ConfigError(format!(
                "invalid date format '{}'",
                self.display.date_format
            )));
        }
        if self.display.page_selector.trim().is_empty() {
            return Err(Error::ConfigError("page selector is empty".into()));
        }
        Ok(())
    }

    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        match &self.base_dir {
            Some(base) => base.join(path),
            None => path.as_ref().to_path_buf(),
        }
    }

    pub fn stylesheet_path(&self) -> PathBuf {
        self.resolve(self.paths.template_dir.join(&self.paths.style_file))
    }

    pub fn font_path(&self, font: &FontFace) -> PathBuf {
        self.resolve(self.paths.font_dir.join(&font.file))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.resolve(&self.paths.output_dir)
    }

    pub fn image_dir(&self) -> PathBuf {
        self.resolve(&self.paths.image_dir)
    }

    pub fn html_path(&self) -> PathBuf {
        self.output_dir().join(&self.output.html_file)
    }

    pub fn pdf_path(&self) -> PathBuf {
        self.output_dir().join(&self.output.pdf_file)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir().join(&self.output.summary_file)
    }

    /// Numbered PNG path for the 1-based page `index`
    pub fn png_path(&self, index: usize) -> PathBuf {
        self.image_dir().join(format!("page_{:02}.png", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_card_layout() {
        let cfg = RenderConfig::new();
        assert_eq!(cfg.page.width, 1080);
        assert_eq!(cfg.page.height, 1080);
        assert_eq!(cfg.page.margin, Margin::default());
        assert_eq!(cfg.display.max_communities_per_page, 3);
        assert_eq!(cfg.display.date_format, "%Y-%m-%d");
        assert_eq!(cfg.fonts.len(), 4);
        assert_eq!(cfg.stylesheet_path(), PathBuf::from("templates/style.css"));
        assert_eq!(cfg.pdf_path(), PathBuf::from("output/output.pdf"));
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg = RenderConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.text.main_title, "시그소개");
        assert_eq!(cfg.fonts, FontFace::defaults());
        assert!(cfg.display.export_png);
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let cfg = RenderConfig::from_toml_str(
            r#"
            [display]
            max_communities_per_page = 2

            [page]
            width = 1920
            "#,
        )
        .unwrap();
        assert_eq!(cfg.display.max_communities_per_page, 2);
        assert_eq!(cfg.display.date_format, "%Y-%m-%d");
        assert_eq!(cfg.page.width, 1920);
        assert_eq!(cfg.page.height, 1080);
    }

    #[test]
    fn toml_fonts_replace_default_set() {
        let cfg = RenderConfig::from_toml_str(
            r#"
            [[fonts]]
            family = "Noto Sans KR"
            file = "NotoSansKR.ttf"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.fonts, vec![FontFace::new("Noto Sans KR", "normal", "NotoSansKR.ttf")]);
    }

    #[test]
    fn invalid_date_format_is_rejected() {
        let err = RenderConfig::from_toml_str("[display]\ndate_format = \"%Q\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn base_dir_prefixes_paths() {
        let cfg = RenderConfig::new().with_base_dir("/tmp/run");
        assert_eq!(cfg.png_path(3), PathBuf::from("/tmp/run/output/images/page_03.png"));
        assert_eq!(cfg.summary_path(), PathBuf::from("/tmp/run/output/output.txt"));
    }

    #[test]
    fn pixel_sizes_convert_to_inches() {
        let page = PageSetup::default();
        assert!((page.width_in() - 11.25).abs() < f64::EPSILON);
    }
}
