//! Document helpers and the DOM-backed modal view.

use blogview_core::{ModalHandle, ModalView};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement};

/// Attribute carrying the [`ModalHandle`] on the overlay root.
pub const MODAL_HANDLE_ATTR: &str = "data-modal-handle";

/// Every element under `root` matching `selector`, in document order.
pub fn query_all(root: &Element, selector: &str) -> Vec<Element> {
    let list = match root.query_selector_all(selector) {
        Ok(list) => list,
        Err(err) => {
            log::warn!("invalid selector {selector:?}: {err:?}");
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn query(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Nearest ancestor-or-self of the event target matching `selector`.
pub fn closest_target(event: &Event, selector: &str) -> Option<Element> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()
}

/// Shows or hides through the inline `display` property, which wins over
/// stylesheet rules. Showing drops the inline value so the stylesheet applies again.
pub fn set_visible(element: &Element, visible: bool) {
    let Some(element) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = element.style();
    let result = if visible {
        style.remove_property("display").map(drop)
    } else {
        style.set_property("display", "none")
    };
    if let Err(err) = result {
        log::warn!("failed to update display: {err:?}");
    }
}

/// Reads the modal handle stored on an overlay root.
pub fn modal_handle_of(root: &Element) -> Option<ModalHandle> {
    root.get_attribute(MODAL_HANDLE_ATTR)?
        .parse()
        .ok()
        .map(ModalHandle::from_raw)
}

/// Mounts overlays as `div.article-modal` children of `<body>`.
pub struct DomModalView {
    document: Document,
    mounted: Option<(ModalHandle, Element)>,
}

impl DomModalView {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            mounted: None,
        }
    }

    fn root_for(&self, handle: ModalHandle) -> Option<&Element> {
        match &self.mounted {
            Some((mounted, root)) if *mounted == handle => Some(root),
            _ => None,
        }
    }
}

impl ModalView for DomModalView {
    fn mount(&mut self, handle: ModalHandle, shell_html: &str) {
        let Some(body) = self.document.body() else {
            log::error!("document has no body; modal {} not shown", handle.raw());
            return;
        };
        let root = match self.document.create_element("div") {
            Ok(root) => root,
            Err(err) => {
                log::error!("failed to create modal element: {err:?}");
                return;
            }
        };

        root.set_class_name("article-modal");
        if let Err(err) = root.set_attribute(MODAL_HANDLE_ATTR, &handle.raw().to_string()) {
            log::warn!("failed to tag modal {}: {err:?}", handle.raw());
        }
        root.set_inner_html(shell_html);

        if let Err(err) = body.append_child(&root) {
            log::error!("failed to attach modal {}: {err:?}", handle.raw());
            return;
        }
        self.mounted = Some((handle, root));
    }

    fn set_content(&mut self, handle: ModalHandle, html: &str) {
        let Some(root) = self.root_for(handle) else {
            return;
        };
        match query(root, ".article-full-content") {
            Some(content) => content.set_inner_html(html),
            None => log::warn!("modal {} has no content container", handle.raw()),
        }
    }

    fn unmount(&mut self, handle: ModalHandle) {
        if let Some(root) = self.root_for(handle) {
            root.remove();
            self.mounted = None;
        }
    }
}
