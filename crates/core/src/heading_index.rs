//! Heading indexer: stamps `h2`/`h3` elements with sequential anchor ids and builds
//! the "Article Contents" navigation list that sits above the article body.

use lol_html::{ElementContentHandlers, RewriteStrSettings, Selector, element, rewrite_str, text};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ViewerError;
use crate::escape::unescape_html;

/// Heading levels that take part in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexedLevel {
    H2,
    H3,
}

impl IndexedLevel {
    fn selector(self) -> &'static str {
        match self {
            IndexedLevel::H2 => "h2",
            IndexedLevel::H3 => "h3",
        }
    }
}

/// One entry of the heading index. Lives only as long as the rendered article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    pub id: String,
    pub text: String,
    pub level: IndexedLevel,
}

/// Result of [`build_index`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleIndex {
    /// Navigation list markup, empty when the article has no `h2`/`h3`.
    pub index_html: String,
    /// The input fragment with `id` attributes on every indexed heading.
    pub html: String,
    pub headings: Vec<HeadingEntry>,
}

impl ArticleIndex {
    /// Index followed by the article body, ready for injection.
    pub fn into_markup(self) -> String {
        let mut markup = self.index_html;
        markup.push_str(&self.html);
        markup
    }
}

type SharedHeadings = Rc<RefCell<Vec<HeadingEntry>>>;

/// Assigns `heading-0`, `heading-1`, ... to every `h2`/`h3` in document order and
/// builds the matching navigation list.
///
/// Existing `id` attributes on those headings are replaced so anchors stay unique.
pub fn build_index(html: &str) -> Result<ArticleIndex, ViewerError> {
    let headings: SharedHeadings = Rc::new(RefCell::new(Vec::new()));

    let mut handlers = Vec::with_capacity(4);
    for level in [IndexedLevel::H2, IndexedLevel::H3] {
        handlers.push(heading_id_handler(level, Rc::clone(&headings)));
        handlers.push(heading_text_handler(level, Rc::clone(&headings)));
    }

    let settings = RewriteStrSettings {
        element_content_handlers: handlers,
        ..RewriteStrSettings::default()
    };

    let html = rewrite_str(html, settings).map_err(|err| ViewerError::Parse(err.to_string()))?;

    let mut headings = std::mem::take(&mut *headings.borrow_mut());
    for heading in &mut headings {
        heading.text = heading.text.trim().to_string();
    }

    // Text chunks arrive as written in the source, so the index reuses them verbatim.
    let index_html = index_markup(&headings);
    for heading in &mut headings {
        heading.text = unescape_html(&heading.text);
    }

    log::debug!("indexed {} headings", headings.len());

    Ok(ArticleIndex {
        index_html,
        html,
        headings,
    })
}

fn heading_id_handler(
    level: IndexedLevel,
    headings: SharedHeadings,
) -> (Cow<'static, Selector>, ElementContentHandlers<'static>) {
    element!(level.selector(), move |el| {
        let mut headings = headings.borrow_mut();
        let id = format!("heading-{}", headings.len());
        el.set_attribute("id", &id)?;
        headings.push(HeadingEntry {
            id,
            text: String::new(),
            level,
        });
        Ok(())
    })
}

fn heading_text_handler(
    level: IndexedLevel,
    headings: SharedHeadings,
) -> (Cow<'static, Selector>, ElementContentHandlers<'static>) {
    text!(level.selector(), move |chunk| {
        if let Some(current) = headings.borrow_mut().last_mut() {
            current.text.push_str(chunk.as_str());
        }
        Ok(())
    })
}

fn index_markup(headings: &[HeadingEntry]) -> String {
    if headings.is_empty() {
        return String::new();
    }

    let mut markup = String::from(
        "<div class=\"article-index\"><div class=\"article-index-title\">Article Contents</div>\
         <ul class=\"article-index-list\">",
    );
    for heading in headings {
        let indent = match heading.level {
            IndexedLevel::H2 => "",
            IndexedLevel::H3 => " article-index-indent",
        };
        markup.push_str(&format!(
            "<li class=\"article-index-item{indent}\"><a href=\"#{}\" class=\"article-index-link\">{}</a></li>",
            heading.id,
            heading.text
        ));
    }
    markup.push_str("</ul></div>");
    markup
}
