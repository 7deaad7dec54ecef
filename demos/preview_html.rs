//! Writes the assembled card news as a standalone HTML file, without a browser
//!
//! cargo run --example preview_html -- [OUTPUT]

use cardnews::assemble::{assemble_today, page_count};
use cardnews::assets::embedded_font_css;
use cardnews::driver::{build_document, read_stylesheet};
use cardnews::{RenderConfig, CATEGORIES};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output = std::env::args().nth(1).unwrap_or_else(|| "preview.html".to_string());
    let config = RenderConfig::new();

    let stylesheet = read_stylesheet(&config)?;
    let body = assemble_today(CATEGORIES, &config);
    let pages = page_count(&body, &config.display.page_selector)?;
    let document = build_document(&config.text.html_title, &embedded_font_css(&config), &stylesheet, &body);

    std::fs::write(&output, document)?;
    println!("Wrote {} ({} pages)", output, pages);
    Ok(())
}
