//! Chrome DevTools Protocol renderer implementation

use crate::config::{px_to_in, PageSetup, RenderConfig};
use crate::{Error, Renderer, Result};
use headless_chrome::browser::tab::{NoElementFound, Tab};
use headless_chrome::protocol::cdp::Page;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use log::{debug, warn};
use std::sync::Arc;
use std::time::Duration;

/// CDP-based renderer (uses the `headless_chrome` crate)
///
/// Launches a headless Chrome instance sized to one card page and drives a
/// single tab through load, PDF export and per-element screenshots.
pub struct CdpRenderer {
    browser: Browser,
    tab: Arc<Tab>,
    settle_delay: Duration,
}

impl Renderer for CdpRenderer {
    fn launch(config: &RenderConfig) -> Result<Self>
    where
        Self: Sized,
    {
        // Window matches one page so element screenshots are not clipped
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some((config.page.width, config.page.height)))
            .build()
            .map_err(|e| Error::InitializationError(format!("Failed to build launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| Error::InitializationError(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::InitializationError(format!("Failed to create tab: {}", e)))?;

        Ok(Self {
            browser,
            tab,
            settle_delay: Duration::from_millis(config.display.settle_delay_ms),
        })
    }

    fn load_url(&mut self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| Error::LoadError(format!("Navigation failed: {}", e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| Error::LoadError(format!("Wait for navigation failed: {}", e)))?;

        // Embedded @font-face data is applied after the load event
        debug!("Waiting {:?} for fonts to settle", self.settle_delay);
        std::thread::sleep(self.settle_delay);

        Ok(())
    }

    fn export_pdf(&self, page: &PageSetup) -> Result<Vec<u8>> {
        let options = PrintToPdfOptions {
            print_background: Some(true),
            paper_width: Some(page.width_in()),
            paper_height: Some(page.height_in()),
            margin_top: Some(px_to_in(page.margin.top)),
            margin_right: Some(px_to_in(page.margin.right)),
            margin_bottom: Some(px_to_in(page.margin.bottom)),
            margin_left: Some(px_to_in(page.margin.left)),
            ..Default::default()
        };

        self.tab
            .print_to_pdf(Some(options))
            .map_err(|e| Error::RenderError(format!("PDF export failed: {}", e)))
    }

    fn count_elements(&self, selector: &str) -> Result<usize> {
        // find_elements reports "no match" as an error
        match self.tab.find_elements(selector) {
            Ok(elements) => Ok(elements.len()),
            Err(e) if e.downcast_ref::<NoElementFound>().is_some() => {
                warn!("No elements matched '{}'", selector);
                Ok(0)
            }
            Err(e) => Err(Error::RenderError(format!("Failed to query '{}': {}", selector, e))),
        }
    }

    fn screenshot_element(&self, selector: &str, index: usize) -> Result<Vec<u8>> {
        let elements = self
            .tab
            .find_elements(selector)
            .map_err(|e| Error::RenderError(format!("Failed to query '{}': {}", selector, e)))?;

        let element = elements
            .get(index)
            .ok_or_else(|| Error::RenderError(format!("No element #{} for '{}'", index, selector)))?;

        Ok(element.capture_screenshot(Page::CaptureScreenshotFormatOption::Png)?)
    }

    fn close(self) -> Result<()> {
        // Dropping the browser terminates the child process
        drop(self.tab);
        drop(self.browser);
        Ok(())
    }
}
