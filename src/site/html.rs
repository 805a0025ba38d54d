//! Extraction of athlete fields from site pages.
//!
//! All functions take the raw document so the non-`Send` `scraper::Html`
//! tree never lives across an `.await`.

use scraper::{ElementRef, Html, Selector};

use super::urls::{SiteUrls, is_athlete_link};

/// Placeholder for a page that loaded but had no heading.
pub const NAME_NOT_FOUND: &str = "Name not found";
/// Placeholder for a page the site refused to serve.
pub const NOT_AVAILABLE: &str = "Not Available";

const PROFILE_HEADING: &str = "h1.use-letter-spacing-hint.my-4";
const ANY_HEADING: &str = "h1";
const ATTRIBUTE_BLOCK: &str = "div.attr";
const ATTRIBUTE_TITLE: &str = "h5.title";
const ATTRIBUTE_VALUE: &str = "div.value";
const LINK: &str = "a";
const LINK_WITH_HREF: &str = "a[href]";
const CONTENT_REGIONS: [&str; 4] = ["main", "#main", "#content", ".site-content"];
const CHROME_ELEMENTS: [&str; 3] = ["nav", "header", "footer"];

/// Trimmed text of the profile's display-name heading.
pub fn profile_heading(document: &str) -> Option<String> {
    let html = Html::parse_document(document);
    [PROFILE_HEADING, ANY_HEADING]
        .into_iter()
        .filter_map(selector)
        .find_map(|heading| html.select(&heading).next())
        .map(element_text)
        .filter(|text| !text.is_empty())
}

/// Value of the attribute block whose title mentions "country".
pub fn profile_country(document: &str) -> Option<String> {
    let html = Html::parse_document(document);
    let (block, title, value, link) = (
        selector(ATTRIBUTE_BLOCK)?,
        selector(ATTRIBUTE_TITLE)?,
        selector(ATTRIBUTE_VALUE)?,
        selector(LINK)?,
    );

    let attribute = html.select(&block).find(|candidate| {
        candidate
            .select(&title)
            .next()
            .is_some_and(|heading| element_text(heading).to_lowercase().contains("country"))
    })?;
    let paired = attribute.select(&value).next()?;

    let linked = paired
        .select(&link)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>();
    if !linked.is_empty() {
        return Some(linked.join(", "));
    }

    Some(element_text(paired)).filter(|text| !text.is_empty())
}

/// Athlete profile links on a search results page, in document order.
pub fn search_result_links(document: &str, site: &SiteUrls) -> Vec<String> {
    let html = Html::parse_document(document);
    let Some(anchor) = selector(LINK_WITH_HREF) else {
        return Vec::new();
    };

    let region = CONTENT_REGIONS
        .into_iter()
        .filter_map(selector)
        .find_map(|region| html.select(&region).next());

    let anchors: Vec<ElementRef<'_>> = match region {
        Some(region) => region.select(&anchor).collect(),
        None => html
            .select(&anchor)
            .filter(|element| !inside_page_chrome(*element))
            .collect(),
    };

    anchors
        .into_iter()
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| site.absolutize(href))
        .filter(is_athlete_link)
        .map(String::from)
        .collect()
}

fn inside_page_chrome(element: ElementRef<'_>) -> bool {
    element.ancestors().filter_map(ElementRef::wrap).any(|ancestor| {
        let name = ancestor.value().name();
        CHROME_ELEMENTS.contains(&name)
    })
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn selector(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(err) => {
            tracing::error!(css, error = ?err, "invalid selector");
            None
        }
    }
}
