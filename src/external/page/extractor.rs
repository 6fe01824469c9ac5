//! Structural lookups of the update marker and display name.

use scraper::{Html, Selector};

use crate::error::{AppError, AppResult};
use crate::models::Extraction;

/// Compiled selectors for the two independent lookups
#[derive(Debug, Clone)]
pub struct UpdateExtractor {
    marker: Selector,
    name: Selector,
}

impl UpdateExtractor {
    pub fn new(marker_selector: &str, name_selector: &str) -> AppResult<Self> {
        Ok(Self {
            marker: parse_selector("monitor.marker_selector", marker_selector)?,
            name: parse_selector("monitor.name_selector", name_selector)?,
        })
    }

    /// Extracts marker and display name from a raw document.
    ///
    /// Never fails: malformed markup or a missing element yields an absent
    /// field, and the two lookups do not affect each other.
    pub fn extract(&self, document: &str) -> Extraction {
        let html = Html::parse_document(document);
        Extraction {
            update_marker: first_text(&html, &self.marker),
            display_name: first_text(&html, &self.name),
        }
    }
}

fn parse_selector(key: &str, selector: &str) -> AppResult<Selector> {
    Selector::parse(selector).map_err(|e| {
        AppError::configuration(
            key,
            anyhow::anyhow!("Invalid CSS selector '{}': {:?}", selector, e),
        )
    })
}

/// Concatenated text of the first match, trimmed at both ends; empty text
/// counts as absent
fn first_text(html: &Html, selector: &Selector) -> Option<String> {
    let element = html.select(selector).next()?;
    let text = element.text().collect::<String>();
    let text = text.trim();

    (!text.is_empty()).then(|| text.to_string())
}
