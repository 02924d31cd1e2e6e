//! Core of the blog viewer: markdown rendering, heading index, catalog
//! filtering and search, and the article loading pipeline. Nothing in this
//! crate touches the DOM.

mod adapter;
pub mod catalog;
pub mod config;
pub mod error;
pub mod escape;
pub mod event;
pub mod filter;
pub mod heading_index;
mod html_renderer;
pub mod loader;
pub mod markdown;
pub mod modal;
pub mod navigation;
pub mod search;

pub use adapter::PipeAdapter;
pub use catalog::{ArticleRecord, Catalog};
pub use config::ViewerConfig;
pub use error::{CatalogError, ConfigError, FetchError, UnknownDateWindow, ViewerError};
pub use filter::{DateWindow, FilterSelection};
pub use heading_index::{ArticleIndex, HeadingEntry, IndexedLevel, build_index};
pub use html_renderer::HtmlRenderer;
pub use loader::{ArticleLoader, ContentSource, OpenOutcome};
pub use modal::{ModalController, ModalHandle, ModalView};
pub use navigation::{NavigationTracker, SectionBounds};
pub use search::SearchHit;

/// Crate version, reported by the bindings.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Renders article markdown and indexes its `h2`/`h3` headings.
pub fn render_article(markdown: &str) -> Result<ArticleIndex, ViewerError> {
    let html = markdown::render(markdown);
    build_index(&html)
}
