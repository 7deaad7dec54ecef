//! Render driver: wraps the assembled body into a document, writes it out and
//! hands it to a [`Renderer`] for PDF and PNG export.

use crate::assemble::{assemble_body, page_count, text_summary};
use crate::assets::embedded_font_css;
use crate::config::RenderConfig;
use crate::content::Category;
use crate::{Error, Renderer, Result};
use chrono::NaiveDate;
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Files produced by one run
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub html_path: PathBuf,
    pub pdf_path: PathBuf,
    pub summary_path: PathBuf,
    /// Numbered page screenshots, empty when PNG export is off
    pub png_paths: Vec<PathBuf>,
    /// Pages in the assembled document
    pub page_count: usize,
}

/// Complete HTML document around an assembled body
pub fn build_document(title: &str, font_css: &str, stylesheet: &str, body: &str) -> String {
    format!(
        r#"
    <html>
    <head>
        <meta charset="UTF-8">
        <title>{title}</title>
        <style>
        {font_css}
        {stylesheet}
        </style>
    </head>
    <body>
        {body}
    </body>
    </html>
    "#
    )
}

/// `file://` URL for a file on disk
pub fn file_url(path: &Path) -> Result<Url> {
    let absolute = fs::canonicalize(path).map_err(|e| Error::io(path, e))?;
    Url::from_file_path(&absolute)
        .map_err(|()| Error::LoadError(format!("Cannot build file URL for {}", absolute.display())))
}

/// Read the stylesheet; its absence aborts the run
pub fn read_stylesheet(config: &RenderConfig) -> Result<String> {
    let path = config.stylesheet_path();
    fs::read_to_string(&path).map_err(|source| {
        error!("Cannot read stylesheet {}: {}", path.display(), source);
        Error::MissingStylesheet { path, source }
    })
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("Removed previous output {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}

fn is_page_png(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.strip_prefix("page_")
        .and_then(|rest| rest.strip_suffix(".png"))
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
}

/// Create output directories and remove artifacts of a previous run
fn prepare_output(config: &RenderConfig) -> Result<()> {
    let output_dir = config.output_dir();
    if config.display.clean_output && output_dir.exists() {
        info!("Clearing output directory {}", output_dir.display());
        fs::remove_dir_all(&output_dir).map_err(|e| Error::io(&output_dir, e))?;
    }
    fs::create_dir_all(&output_dir).map_err(|e| Error::io(&output_dir, e))?;

    let image_dir = config.image_dir();
    if config.display.export_png {
        fs::create_dir_all(&image_dir).map_err(|e| Error::io(&image_dir, e))?;
    }
    if image_dir.is_dir() {
        let entries = fs::read_dir(&image_dir).map_err(|e| Error::io(&image_dir, e))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if is_page_png(&path) {
                remove_if_exists(&path)?;
            }
        }
    }

    remove_if_exists(&config.html_path())?;
    remove_if_exists(&config.pdf_path())?;
    remove_if_exists(&config.summary_path())
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, contents).map_err(|e| Error::io(path, e))
}

/// Run the full pipeline for today's date with backend `R`
pub fn run<R: Renderer>(categories: &[Category], config: &RenderConfig) -> Result<RenderOutcome> {
    run_with(categories, config, chrono::Local::now().date_naive(), R::launch)
}

/// Run the full pipeline, launching the renderer through `launch`
///
/// The stylesheet is read before anything is written or launched, so a
/// missing stylesheet leaves no output behind.
pub fn run_with<R, F>(
    categories: &[Category],
    config: &RenderConfig,
    date: NaiveDate,
    launch: F,
) -> Result<RenderOutcome>
where
    R: Renderer,
    F: FnOnce(&RenderConfig) -> Result<R>,
{
    info!("=== Card news generation started ===");
    let stylesheet = read_stylesheet(config)?;

    let body = assemble_body(categories, config, date);
    let expected_pages = page_count(&body, &config.display.page_selector)?;
    let font_css = embedded_font_css(config);
    let document = build_document(&config.text.html_title, &font_css, &stylesheet, &body);

    prepare_output(config)?;

    let html_path = config.html_path();
    write_file(&html_path, &document)?;
    info!("Wrote '{}' ({} pages)", html_path.display(), expected_pages);

    let summary_path = config.summary_path();
    write_file(&summary_path, text_summary(categories, config, date))?;
    info!("Wrote '{}'", summary_path.display());

    let url = file_url(&html_path)?;

    let mut renderer = launch(config)?;
    let exported = export(&mut renderer, config, url.as_str(), expected_pages);
    if let Err(e) = renderer.close() {
        warn!("Renderer did not shut down cleanly: {}", e);
    }
    let png_paths = exported?;

    info!("=== Card news generation finished ===");
    Ok(RenderOutcome {
        html_path,
        pdf_path: config.pdf_path(),
        summary_path,
        png_paths,
        page_count: expected_pages,
    })
}

fn export<R: Renderer>(
    renderer: &mut R,
    config: &RenderConfig,
    url: &str,
    expected_pages: usize,
) -> Result<Vec<PathBuf>> {
    debug!("Loading {}", url);
    renderer.load_url(url)?;

    let pdf_path = config.pdf_path();
    let pdf = renderer.export_pdf(&config.page)?;
    write_file(&pdf_path, pdf)?;
    info!("Wrote '{}'", pdf_path.display());

    if !config.display.export_png {
        return Ok(Vec::new());
    }

    let selector = &config.display.page_selector;
    let found = renderer.count_elements(selector)?;
    if found != expected_pages {
        warn!("Renderer found {} pages, document has {}", found, expected_pages);
    }
    info!("Exporting {} pages as PNG...", found);

    let mut png_paths = Vec::with_capacity(found);
    for index in 0..found {
        let path = config.png_path(index + 1);
        match renderer.screenshot_element(selector, index) {
            Ok(png) => {
                write_file(&path, png)?;
                info!("Wrote '{}'", path.display());
                png_paths.push(path);
            }
            Err(e) => warn!("Skipping page {}: {}", index + 1, e),
        }
    }
    Ok(png_paths)
}
