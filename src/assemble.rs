//! Content assembly: turns the category table into the HTML body of the card news.
//!
//! The body is a flat run of page blocks in a fixed order:
//!
//! 1. one cover page (`.page.cover`)
//! 2. one Q&A page per category (`.page.news-page`), holding at most
//!    `max_communities_per_page` question/answer pairs
//! 3. one closing page (`.page.thank-you`) stamped with the run date
//!
//! Text fields are inserted as authored markup and are not escaped.

use crate::assets;
use crate::config::RenderConfig;
use crate::content::{Category, Community};
use crate::{Error, Result};
use chrono::NaiveDate;
use regex::Regex;
use scraper::{Html, Selector};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::OnceLock;

static LINE_BREAK: OnceLock<Regex> = OnceLock::new();

/// Collapse `<br>`, `<br/>`, `<br />` (any case) to a single space
fn strip_line_breaks(markup: &str) -> String {
    let re = LINE_BREAK.get_or_init(|| Regex::new(r"(?i)\s*<br\s*/?>\s*").expect("valid regex"));
    re.replace_all(markup, " ").into_owned()
}

/// Format `date` with a strftime-style pattern.
///
/// Falls back to ISO `%Y-%m-%d` when the pattern cannot be rendered, since
/// chrono reports bad patterns only at display time.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_err() {
        out.clear();
        let _ = write!(out, "{}", date.format("%Y-%m-%d"));
    }
    out
}

/// Assemble the body stamped with today's local date
pub fn assemble_today(categories: &[Category], config: &RenderConfig) -> String {
    assemble_body(categories, config, chrono::Local::now().date_naive())
}

/// Assemble the full HTML body for `categories`
pub fn assemble_body(categories: &[Category], config: &RenderConfig, date: NaiveDate) -> String {
    let mut html = cover_page(config);
    for category in categories {
        html.push_str(&category_page(category, config.display.max_communities_per_page));
    }
    html.push_str(&closing_page(config, date));
    html
}

fn character_img(config: &RenderConfig, path: Option<&Path>, class: &str) -> String {
    path.and_then(|p| assets::image_data_uri(&config.resolve(p)))
        .map(|uri| format!(r#"<img src="{}" class="{}" alt="캐릭터" />"#, uri, class))
        .unwrap_or_default()
}

fn cover_page(config: &RenderConfig) -> String {
    let text = &config.text;
    let character = character_img(
        config,
        config.paths.cover_character.as_deref(),
        "character main-character",
    );
    format!(
        r#"
    <div class="page cover">
        <div class="card-container">
            <div class="cover-content">
                <div class="text-section">
                    <p class="title-sub">{sub}</p>
                    <h1 class="title-main">{main}</h1>
                </div>
                <div class="character-section">
                    {character}
                </div>
                <div class="decorative-elements">
                    <div class="speech-bubble">
                        💬
                        <span class="bubble-text">{greeting}</span>
                    </div>
                    <div class="lightbulb">💡</div>
                    <div class="star star1">⭐</div>
                    <div class="star star2">✨</div>
                    <div class="star star3">⭐</div>
                </div>
            </div>
        </div>
    </div>
    "#,
        sub = text.sub_title,
        main = text.main_title,
        greeting = text.greeting,
    )
}

fn qa_item(community: &Community) -> String {
    format!(
        r#"
            <div class="qa-item">
                <div class="question-box">
                    <span class="q-label">Q.</span>
                    <div class="question-text">{}</div>
                </div>
                <div class="answer-box">
                    <span class="a-label">A.</span>
                    <div class="answer-text">{}</div>
                </div>
            </div>
            "#,
        community.name, community.description
    )
}

fn category_page(category: &Category, max: usize) -> String {
    let qa_html: String = category.visible(max).iter().map(qa_item).collect();
    format!(
        r#"
        <div class="page news-page">
            <div class="card-container">
                <h2 class="category-title">{}</h2>
                {}
            </div>
        </div>
        "#,
        category.name, qa_html
    )
}

fn closing_page(config: &RenderConfig, date: NaiveDate) -> String {
    let character = character_img(
        config,
        config.paths.closing_character.as_deref(),
        "character closing-character",
    );
    format!(
        r#"
    <div class="page thank-you">
         <div class="card-container">
            <p class="message">{}</p>
            {}
            <p class="date">{}</p>
        </div>
    </div>
    "#,
        config.text.thank_you_message,
        character,
        format_date(date, &config.display.date_format)
    )
}

/// Number of elements in `html` matching `selector`
pub fn page_count(html: &str, selector: &str) -> Result<usize> {
    let selector = Selector::parse(selector)
        .map_err(|e| Error::ConfigError(format!("invalid page selector '{}': {:?}", selector, e)))?;
    let document = Html::parse_document(html);
    Ok(document.select(&selector).count())
}

/// Plain-text rendition of the card news, written next to the PDF
pub fn text_summary(categories: &[Category], config: &RenderConfig, date: NaiveDate) -> String {
    let text = &config.text;
    let mut out = String::new();
    let _ = writeln!(out, "===== {} =====\n", text.html_title);
    let _ = writeln!(out, "[표지]\n{}\n{}\n", text.main_title, text.sub_title);
    for category in categories {
        let _ = writeln!(out, "[{}]", category.name);
        for community in category.visible(config.display.max_communities_per_page) {
            let _ = writeln!(out, "Q. {}\nA. {}", community.name, community.description);
        }
        out.push('\n');
    }
    let message = strip_line_breaks(&text.thank_you_message);
    let _ = writeln!(
        out,
        "[마무리]\n{}\n{}",
        message,
        format_date(date, &config.display.date_format)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::CATEGORIES;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    fn no_characters() -> RenderConfig {
        let mut cfg = RenderConfig::new();
        cfg.paths.cover_character = None;
        cfg
    }

    static LONG: &[Category] = &[Category {
        name: "긴 목록",
        communities: &[
            Community { name: "하나", description: "1" },
            Community { name: "둘", description: "2" },
            Community { name: "셋", description: "3" },
            Community { name: "넷", description: "4" },
            Community { name: "다섯", description: "5" },
        ],
    }];

    #[test]
    fn truncates_to_configured_maximum() {
        let cfg = no_characters();
        let html = assemble_body(LONG, &cfg, date());
        assert_eq!(page_count(&html, ".qa-item").unwrap(), 3);
        assert!(html.contains("셋"));
        assert!(!html.contains("넷"));
        assert!(!html.contains("다섯"));
    }

    #[test]
    fn truncation_follows_config() {
        let mut cfg = no_characters();
        cfg.display.max_communities_per_page = 1;
        let html = assemble_body(LONG, &cfg, date());
        assert_eq!(page_count(&html, ".qa-item").unwrap(), 1);

        cfg.display.max_communities_per_page = 0;
        let html = assemble_body(LONG, &cfg, date());
        assert_eq!(page_count(&html, ".qa-item").unwrap(), 0);
        assert_eq!(page_count(&html, ".news-page").unwrap(), 1);
    }

    #[test]
    fn always_one_cover_and_one_closing_page() {
        let cfg = no_characters();
        for categories in [&[][..], LONG, CATEGORIES] {
            let html = assemble_body(categories, &cfg, date());
            assert_eq!(page_count(&html, ".page.cover").unwrap(), 1);
            assert_eq!(page_count(&html, ".page.thank-you").unwrap(), 1);
            assert_eq!(
                page_count(&html, ".page.news-page").unwrap(),
                categories.len()
            );
        }
    }

    #[test]
    fn default_card_set_has_seven_pages() {
        let html = assemble_body(CATEGORIES, &no_characters(), date());
        assert_eq!(page_count(&html, ".page").unwrap(), 7);
        assert_eq!(page_count(&html, ".qa-item").unwrap(), 15);
    }

    #[test]
    fn closing_date_uses_configured_format() {
        let mut cfg = no_characters();
        let html = assemble_body(CATEGORIES, &cfg, date());
        assert!(html.contains(r#"<p class="date">2024-03-09</p>"#));

        cfg.display.date_format = "%Y년 %m월 %d일".to_string();
        let html = assemble_body(CATEGORIES, &cfg, date());
        assert!(html.contains(r#"<p class="date">2024년 03월 09일</p>"#));
    }

    #[test]
    fn date_format_law_holds_for_today() {
        let cfg = no_characters();
        let today = chrono::Local::now().date_naive();
        let html = assemble_today(CATEGORIES, &cfg);
        let expected = today.format(&cfg.display.date_format).to_string();
        assert!(html.contains(&format!(r#"<p class="date">{}</p>"#, expected)));
    }

    #[test]
    fn bad_date_pattern_falls_back_to_iso() {
        assert_eq!(format_date(date(), "%Q"), "2024-03-09");
    }

    #[test]
    fn missing_character_image_is_omitted() {
        let cfg = RenderConfig::new().with_base_dir("/nonexistent-cardnews-dir");
        let html = assemble_body(CATEGORIES, &cfg, date());
        assert!(!html.contains("<img"));
        assert!(html.contains("시그소개"));
    }

    #[test]
    fn cover_character_is_embedded_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let img = dir.path().join("image/character");
        std::fs::create_dir_all(&img).unwrap();
        std::fs::write(img.join("1.png"), [0xfbu8, 0xff, 0x00]).unwrap();

        let cfg = RenderConfig::new().with_base_dir(dir.path());
        let html = assemble_body(CATEGORIES, &cfg, date());
        assert!(html.contains(r#"src="data:image/png;base64,+/8A" class="character main-character""#));
        assert!(!html.contains("closing-character"));
    }

    #[test]
    fn closing_character_is_opt_in() {
        let dir = tempfile::tempdir().unwrap();
        let img = dir.path().join("image/character");
        std::fs::create_dir_all(&img).unwrap();
        std::fs::write(img.join("2.png"), [0xfbu8, 0xff, 0x00]).unwrap();

        let mut cfg = RenderConfig::new().with_base_dir(dir.path());
        let html = assemble_body(CATEGORIES, &cfg, date());
        assert_eq!(page_count(&html, ".thank-you img").unwrap(), 0);

        cfg.paths.closing_character = Some("image/character/2.png".into());
        let html = assemble_body(CATEGORIES, &cfg, date());
        let document = Html::parse_document(&html);
        let selector = Selector::parse(".thank-you img").unwrap();
        let images: Vec<_> = document.select(&selector).collect();
        assert_eq!(images.len(), 1);
        let src = images[0].value().attr("src").unwrap();
        assert!(src.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn summary_drops_every_line_break_spelling() {
        let mut cfg = no_characters();
        for markup in ["읽어주셔서<br/>감사합니다!", "읽어주셔서 <br /> 감사합니다!", "읽어주셔서<BR>감사합니다!"] {
            cfg.text.thank_you_message = markup.to_string();
            let summary = text_summary(&[], &cfg, date());
            assert!(summary.contains("[마무리]\n읽어주셔서 감사합니다!\n"), "{markup}");
            assert!(!summary.to_lowercase().contains("<br"));
        }
    }

    #[test]
    fn invalid_selector_is_a_config_error() {
        assert!(matches!(page_count("<div></div>", "[["), Err(Error::ConfigError(_))));
    }

    #[test]
    fn summary_lists_visible_pairs() {
        let mut cfg = no_characters();
        cfg.display.max_communities_per_page = 2;
        let summary = text_summary(LONG, &cfg, date());
        assert!(summary.contains("[긴 목록]\nQ. 하나\nA. 1\nQ. 둘\nA. 2\n"));
        assert!(!summary.contains("셋"));
        assert!(summary.contains("읽어주셔서 감사합니다!\n2024-03-09"));
    }
}
