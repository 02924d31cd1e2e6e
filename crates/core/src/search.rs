//! Case-insensitive substring search with highlighted results.

use serde::Serialize;

use crate::catalog::{ArticleRecord, Catalog};
use crate::escape::escape_html;

/// A search match, with matches in title and excerpt wrapped in `<mark>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub id: String,
    pub title_html: String,
    pub excerpt_html: String,
}

impl Catalog {
    /// Records whose title, excerpt or any category contains `query`.
    ///
    /// A blank query returns nothing rather than everything, which hides the
    /// result panel.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        let needle = fold(query.trim());
        if needle.is_empty() {
            return Vec::new();
        }

        let hits: Vec<_> = self
            .iter()
            .filter(|record| record_matches(record, &needle))
            .map(|record| SearchHit {
                id: record.id.clone(),
                title_html: highlight_folded(&record.title, &needle),
                excerpt_html: highlight_folded(&record.excerpt, &needle),
            })
            .collect();

        log::info!("search {:?} matched {} articles", query.trim(), hits.len());
        hits
    }
}

/// Escapes `text` for HTML and wraps every case-insensitive occurrence of `query`
/// in `<mark>`. Overlapping occurrences are merged into a single marked span.
pub fn highlight(text: &str, query: &str) -> String {
    highlight_folded(text, &fold(query.trim()))
}

/// Markup for the search result panel.
pub fn results_markup(hits: &[SearchHit], query: &str) -> String {
    if hits.is_empty() {
        return format!(
            "<div class=\"no-results\">No results found for \"{}\"</div>",
            escape_html(query.trim())
        );
    }

    hits.iter()
        .map(|hit| {
            format!(
                "<div class=\"search-result-item\" data-id=\"{}\">\
                 <div class=\"search-result-title\">{}</div>\
                 <div class=\"search-result-excerpt\">{}</div></div>",
                escape_html(&hit.id),
                hit.title_html,
                hit.excerpt_html
            )
        })
        .collect()
}

fn record_matches(record: &ArticleRecord, needle: &[char]) -> bool {
    contains_folded(&record.title, needle)
        || contains_folded(&record.excerpt, needle)
        || record
            .categories
            .iter()
            .any(|category| contains_folded(category, needle))
}

fn fold_char(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

fn fold(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

fn contains_folded(haystack: &str, needle: &[char]) -> bool {
    let folded = fold(haystack);
    folded.windows(needle.len()).any(|window| window == needle)
}

fn highlight_folded(text: &str, needle: &[char]) -> String {
    if needle.is_empty() {
        return escape_html(text);
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let folded: Vec<char> = chars.iter().map(|&(_, ch)| fold_char(ch)).collect();

    let mut spans: Vec<(usize, usize)> = Vec::new();
    for start in 0..folded.len() {
        if !folded[start..].starts_with(needle) {
            continue;
        }
        let end = start + needle.len();
        match spans.last_mut() {
            Some(last) if start < last.1 => last.1 = end,
            _ => spans.push((start, end)),
        }
    }

    let byte_at = |index: usize| chars.get(index).map_or(text.len(), |&(byte, _)| byte);

    let mut out = String::with_capacity(text.len() + spans.len() * 13);
    let mut cursor = 0;
    for (start, end) in spans {
        out.push_str(&escape_html(&text[byte_at(cursor)..byte_at(start)]));
        out.push_str("<mark>");
        out.push_str(&escape_html(&text[byte_at(start)..byte_at(end)]));
        out.push_str("</mark>");
        cursor = end;
    }
    out.push_str(&escape_html(&text[byte_at(cursor)..]));
    out
}
