//! Single-instance article overlay.
//!
//! The controller owns the "at most one modal" rule and hands markup to a
//! [`ModalView`], which is the only part that touches the document.

use crate::error::ViewerError;
use crate::escape::escape_html;

/// Placeholder shown while the article body is being fetched.
pub const LOADING_HTML: &str = "<div class=\"loading\">Loading article content...</div>";

/// Identifies one modal instance. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModalHandle(u64);

impl ModalHandle {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Document side of the modal.
pub trait ModalView {
    /// Attach a new overlay containing `shell_html`.
    fn mount(&mut self, handle: ModalHandle, shell_html: &str);
    /// Replace the article body of a mounted overlay.
    fn set_content(&mut self, handle: ModalHandle, html: &str);
    /// Remove the overlay subtree entirely.
    fn unmount(&mut self, handle: ModalHandle);
}

pub struct ModalController<V> {
    view: V,
    active: Option<ModalHandle>,
    next_handle: u64,
}

impl<V: ModalView> ModalController<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            active: None,
            next_handle: 1,
        }
    }

    /// Opens a modal titled `title`, closing any modal that is already open.
    pub fn show(&mut self, title: &str) -> ModalHandle {
        if let Some(previous) = self.active.take() {
            log::debug!("closing modal {} before opening another", previous.raw());
            self.view.unmount(previous);
        }

        let handle = ModalHandle(self.next_handle);
        self.next_handle += 1;
        self.view.mount(handle, &shell_html(title));
        self.active = Some(handle);
        handle
    }

    /// Closes `handle` if it is the open modal. Anything else is a no-op.
    pub fn close(&mut self, handle: ModalHandle) -> bool {
        if self.active != Some(handle) {
            return false;
        }
        self.active = None;
        self.view.unmount(handle);
        true
    }

    pub fn close_active(&mut self) -> bool {
        match self.active {
            Some(handle) => self.close(handle),
            None => false,
        }
    }

    /// Replaces the body of `handle`. Returns false when that modal is no longer open.
    pub fn inject(&mut self, handle: ModalHandle, html: &str) -> bool {
        if self.active != Some(handle) {
            return false;
        }
        self.view.set_content(handle, html);
        true
    }

    pub fn active(&self) -> Option<ModalHandle> {
        self.active
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}

/// Inner markup of the overlay: two close controls around the title and body.
pub fn shell_html(title: &str) -> String {
    format!(
        "<div class=\"article-modal-content\">\
         <span class=\"close-modal\" role=\"button\" aria-label=\"Close article\">&times;</span>\
         <h1>{}</h1>\
         <div class=\"article-full-content\">{LOADING_HTML}</div>\
         <div class=\"close-modal-bottom\" role=\"button\">&times; <span class=\"close-modal-bottom-text\">Close Article</span></div>\
         </div>",
        escape_html(title)
    )
}

/// Inline message shown in place of the article body.
pub fn error_html(err: &ViewerError) -> String {
    format!(
        "<div class=\"error\">Error loading article: {}</div>",
        escape_html(&err.to_string())
    )
}
