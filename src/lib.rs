//! Card news generator
//!
//! Assembles a fixed set of Q&A "card news" slides (a cover, one page per
//! category, a thank-you page) into a single HTML document with fonts and
//! images embedded as base64, then drives a headless browser to export the
//! document as a PDF and one PNG per page.
//!
//! # Features
//!
//! - **CDP Backend** (default): renders through headless Chrome via the
//!   Chrome DevTools Protocol
//! - **Soft assets**: missing fonts and character images are logged and
//!   skipped; only a missing stylesheet stops the run
//!
//! # Example
//!
//! ```no_run
//! use cardnews::RenderConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RenderConfig::new().with_base_dir("site");
//! let outcome = cardnews::generate(&config)?;
//! println!("PDF: {}", outcome.pdf_path.display());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod assemble;
pub mod assets;
pub mod config;
pub mod content;
pub mod driver;

#[cfg(feature = "cdp")]
pub mod cdp;

pub use config::{FontFace, Margin, PageSetup, RenderConfig};
pub use content::{Category, Community, CATEGORIES};
pub use driver::RenderOutcome;

/// Core trait for browser backends that rasterize the assembled document
///
/// Calls arrive in a fixed order: `load_url` once, `export_pdf` once, then
/// optionally `count_elements` followed by `screenshot_element` for each
/// page. `close` is always called last, also after a failed export.
pub trait Renderer {
    /// Start the backend (for CDP: launch the browser and open a tab)
    fn launch(config: &RenderConfig) -> Result<Self>
    where
        Self: Sized;

    /// Load a URL and wait for the page to settle
    fn load_url(&mut self, url: &str) -> Result<()>;

    /// Export the whole document as PDF bytes at the given page size
    fn export_pdf(&self, page: &PageSetup) -> Result<Vec<u8>>;

    /// Number of elements in the loaded page matching `selector`
    fn count_elements(&self, selector: &str) -> Result<usize>;

    /// PNG screenshot of the `index`-th (0-based) element matching `selector`
    fn screenshot_element(&self, selector: &str, index: usize) -> Result<Vec<u8>>;

    /// Shut the backend down and release its process
    fn close(self) -> Result<()>;
}

/// Generate the default card set with the default backend
///
/// This uses the CDP backend and stamps the closing page with today's date.
#[cfg(feature = "cdp")]
pub fn generate(config: &RenderConfig) -> Result<RenderOutcome> {
    driver::run::<cdp::CdpRenderer>(CATEGORIES, config)
}
