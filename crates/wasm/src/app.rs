//! Page controller: binds the core components to the document through a
//! handful of delegated listeners.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use blogview_core::escape::escape_html;
use blogview_core::navigation::{anchor_target, scroll_target};
use blogview_core::search::results_markup;
use blogview_core::{
    ArticleLoader, Catalog, DateWindow, FilterSelection, ModalController, NavigationTracker,
    SectionBounds, ViewerConfig,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, KeyboardEvent,
    ScrollBehavior, ScrollToOptions, Window,
};

use crate::debounce::Debouncer;
use crate::dom::{DomModalView, closest_target, modal_handle_of, query, query_all, set_visible};
use crate::fetch::FetchSource;

const NAV_LINKS: &str = "nav ul li a";
const ARTICLE_CARDS: &str = ".article-card[data-id]";
const FILTER_CHECKBOXES: &str = ".filter-option input[type=\"checkbox\"]";
const SEARCH_INPUT: &str = "#search-input";

pub struct App {
    config: Rc<ViewerConfig>,
    window: Window,
    document: Document,
    root: Element,
    loader: ArticleLoader<FetchSource, DomModalView>,
    nav: RefCell<NavigationTracker>,
    nav_links: Vec<Element>,
}

impl App {
    pub fn new(config: ViewerConfig, catalog: Catalog) -> Result<Rc<Self>, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        let root = document
            .document_element()
            .ok_or_else(|| JsValue::from_str("document has no root element"))?;

        let config = Rc::new(config);
        let modal = ModalController::new(DomModalView::new(document.clone()));
        let loader = ArticleLoader::new(
            Rc::new(catalog),
            FetchSource::new(Rc::clone(&config)),
            Rc::new(RefCell::new(modal)),
        );

        let nav_links = query_all(&root, NAV_LINKS);
        let nav = NavigationTracker::new(
            nav_links
                .iter()
                .map(|link| link.get_attribute("href").unwrap_or_default()),
        );

        Ok(Rc::new(Self {
            config,
            window,
            document,
            root,
            loader,
            nav: RefCell::new(nav),
            nav_links,
        }))
    }

    /// Attaches every listener and syncs the navigation menu once.
    ///
    /// Listeners hold the app for the lifetime of the page.
    pub fn install(self: &Rc<Self>) -> Result<(), JsValue> {
        self.listen(&self.document, "click", |app, event| app.on_click(&event))?;
        self.listen(&self.document, "change", |app, event| app.on_change(&event))?;

        if let Some(input) = self.search_input() {
            let app = Rc::clone(self);
            let live = Rc::new(Debouncer::new(
                self.window.clone(),
                self.config.search_debounce_ms,
                move || app.run_live_search(),
            ));

            let on_input = Rc::clone(&live);
            self.listen(&input, "input", move |_, _| on_input.trigger())?;
            self.listen(&input, "keydown", move |app, event| {
                app.on_search_key(&event, &live)
            })?;
        }

        let app = Rc::clone(self);
        let scroll = Debouncer::new(
            self.window.clone(),
            self.config.scroll_debounce_ms,
            move || app.sync_nav_to_scroll(),
        );
        self.listen(&self.window, "scroll", move |_, _| scroll.trigger())?;
        self.listen(&self.window, "popstate", |app, _| app.on_popstate())?;

        self.refresh_filter_chips();
        self.sync_nav_to_scroll();
        log::info!(
            "viewer started: {} articles, {} nav links",
            self.loader.catalog().len(),
            self.nav_links.len()
        );
        Ok(())
    }

    fn listen<T: AsRef<EventTarget>>(
        self: &Rc<Self>,
        target: &T,
        event_type: &str,
        mut handler: impl FnMut(&Rc<Self>, Event) + 'static,
    ) -> Result<(), JsValue> {
        let app = Rc::clone(self);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| handler(&app, event));
        target
            .as_ref()
            .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn on_click(self: &Rc<Self>, event: &Event) {
        if let Some(control) = closest_target(event, ".close-modal, .close-modal-bottom") {
            self.dismiss_modal(&control);
            return;
        }

        if let Some(link) = closest_target(event, ".read-more") {
            if let Some(id) = link
                .closest(ARTICLE_CARDS)
                .ok()
                .flatten()
                .and_then(|card| card.get_attribute("data-id"))
            {
                event.prevent_default();
                self.open_article(id);
            }
            return;
        }

        if let Some(hit) = closest_target(event, ".search-result-item[data-id]") {
            if let Some(id) = hit.get_attribute("data-id") {
                self.hide_search_results();
                self.open_article(id);
            }
            return;
        }

        if closest_target(event, "#search-button").is_some() {
            if let Some(query) = self.search_query() {
                self.run_search(&query);
            }
            return;
        }
        if closest_target(event, ".search-container").is_none() {
            self.hide_search_results();
        }

        if let Some(link) = closest_target(event, NAV_LINKS) {
            self.on_nav_click(event, &link);
            return;
        }

        self.on_filter_click(event);
    }

    fn on_change(&self, event: &Event) {
        if closest_target(event, ".filter-option").is_some() {
            self.refresh_filter_chips();
        }
    }

    fn dismiss_modal(&self, control: &Element) {
        let handle = control
            .closest(".article-modal")
            .ok()
            .flatten()
            .and_then(|root| modal_handle_of(&root));
        match handle {
            Some(handle) => {
                self.loader.modal().borrow_mut().close(handle);
            }
            None => log::debug!("close control outside any tracked modal"),
        }
    }

    fn open_article(self: &Rc<Self>, id: String) {
        let app = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = app.loader.open(&id).await;
            log::debug!("article {id}: {outcome:?}");
        });
    }

    fn search_input(&self) -> Option<HtmlInputElement> {
        query(&self.root, SEARCH_INPUT)?.dyn_into().ok()
    }

    /// The trimmed query, or `None` when blank.
    fn search_query(&self) -> Option<String> {
        let value = self.search_input()?.value();
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn run_live_search(&self) {
        match self.search_query() {
            Some(query) if query.chars().count() >= self.config.min_live_query_chars => {
                self.run_search(&query)
            }
            Some(_) => {}
            None => self.hide_search_results(),
        }
    }

    fn on_search_key(&self, event: &Event, live: &Debouncer) {
        let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
            return;
        };
        match key.as_str() {
            "Enter" => {
                event.prevent_default();
                live.cancel();
                if let Some(query) = self.search_query() {
                    self.run_search(&query);
                }
            }
            "Escape" => {
                live.cancel();
                self.hide_search_results();
            }
            _ => {}
        }
    }

    fn run_search(&self, query: &str) {
        let hits = self.loader.catalog().search(query);
        let Some(panel) = self.search_panel() else {
            log::warn!("no .search-container to show results in");
            return;
        };
        panel.set_inner_html(&results_markup(&hits, query));
        set_visible(&panel, true);
        let _ = panel.class_list().add_1("active");
    }

    fn hide_search_results(&self) {
        if let Some(panel) = query(&self.root, ".search-results") {
            set_visible(&panel, false);
            let _ = panel.class_list().remove_1("active");
        }
    }

    /// The `.search-results` panel, created inside `.search-container` on first use.
    fn search_panel(&self) -> Option<Element> {
        if let Some(panel) = query(&self.root, ".search-results") {
            return Some(panel);
        }
        let container = query(&self.root, ".search-container")?;
        let panel = self.document.create_element("div").ok()?;
        panel.set_class_name("search-results");
        container.append_child(&panel).ok()?;
        Some(panel)
    }

    fn on_filter_click(&self, event: &Event) {
        if let Some(chip) = closest_target(event, ".remove-filter[data-value]") {
            if let Some(value) = chip.get_attribute("data-value") {
                self.filter_checkboxes()
                    .into_iter()
                    .filter(|checkbox| checkbox.value() == value)
                    .for_each(|checkbox| checkbox.set_checked(false));
                self.refresh_filter_chips();
            }
            return;
        }

        if closest_target(event, "#apply-filters").is_some() {
            self.apply_filters();
            return;
        }

        let Some(dropdown) = closest_target(event, ".filter-dropdown") else {
            self.close_dropdowns(None);
            return;
        };

        if closest_target(event, ".filter-dropdown-header").is_some() {
            self.close_dropdowns(Some(&dropdown));
            let _ = dropdown.class_list().toggle("active");
        } else if closest_target(event, ".clear-filters").is_some() {
            for checkbox in query_all(&dropdown, "input[type=\"checkbox\"]") {
                if let Some(checkbox) = checkbox.dyn_ref::<HtmlInputElement>() {
                    checkbox.set_checked(false);
                }
            }
            self.refresh_filter_chips();
        } else if closest_target(event, ".apply-filters").is_some() {
            self.confirm_dropdown(&dropdown);
        }
    }

    /// Per-dropdown Apply: records the choice as chips and closes the dropdown.
    /// Cards are only filtered by the global `#apply-filters` button.
    fn confirm_dropdown(&self, dropdown: &Element) {
        let _ = dropdown.class_list().remove_1("active");
        self.refresh_filter_chips();
    }

    fn close_dropdowns(&self, except: Option<&Element>) {
        for dropdown in query_all(&self.root, ".filter-dropdown") {
            if Some(&dropdown) != except {
                let _ = dropdown.class_list().remove_1("active");
            }
        }
    }

    fn filter_checkboxes(&self) -> Vec<HtmlInputElement> {
        query_all(&self.root, FILTER_CHECKBOXES)
            .into_iter()
            .filter_map(|element| element.dyn_into().ok())
            .collect()
    }

    /// Checkbox values that parse as a [`DateWindow`] are date filters; the rest are categories.
    fn read_selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::default();
        for checkbox in self.filter_checkboxes() {
            if !checkbox.checked() {
                continue;
            }
            let value = checkbox.value();
            match value.parse::<DateWindow>() {
                Ok(window) => {
                    selection.date_windows.insert(window);
                }
                Err(_) => {
                    selection.categories.insert(value);
                }
            }
        }
        selection
    }

    fn refresh_filter_chips(&self) {
        let Some(container) = query(&self.root, ".selected-filters") else {
            return;
        };

        let chips: String = self
            .filter_checkboxes()
            .iter()
            .filter(|checkbox| checkbox.checked())
            .map(|checkbox| {
                let value = checkbox.value();
                let label = checkbox
                    .next_element_sibling()
                    .and_then(|label| label.text_content())
                    .map(|text| text.trim().to_string())
                    .unwrap_or_else(|| value.clone());
                format!(
                    "<div class=\"selected-filter\">{}<span class=\"remove-filter\" data-value=\"{}\">&times;</span></div>",
                    escape_html(&label),
                    escape_html(&value)
                )
            })
            .collect();
        container.set_inner_html(&chips);
    }

    fn apply_filters(&self) {
        let selection = self.read_selection();
        let today = chrono::Local::now().date_naive();
        let catalog = self.loader.catalog();

        let visible: HashSet<&str> = catalog
            .apply(&selection, today)
            .into_iter()
            .map(|record| record.id.as_str())
            .collect();

        let mut shown = 0;
        for card in query_all(&self.root, ARTICLE_CARDS) {
            let matches = selection.is_empty()
                || card
                    .get_attribute("data-id")
                    .is_some_and(|id| visible.contains(id.as_str()));
            set_visible(&card, matches);
            if matches {
                shown += 1;
            }
        }
        self.show_filter_empty_state(shown == 0);
    }

    fn show_filter_empty_state(&self, empty: bool) {
        let existing = query(&self.root, ".articles-container > .no-results");
        match (existing, empty) {
            (Some(message), _) => set_visible(&message, empty),
            (None, true) => {
                let Some(container) = query(&self.root, ".articles-container") else {
                    return;
                };
                if let Ok(message) = self.document.create_element("div") {
                    message.set_class_name("no-results");
                    message.set_text_content(Some("No articles match the selected filters."));
                    let _ = container.append_child(&message);
                }
            }
            (None, false) => {}
        }
    }

    fn on_nav_click(&self, event: &Event, link: &Element) {
        let Some(href) = link.get_attribute("href") else {
            return;
        };
        if anchor_target(&href).is_none() {
            return;
        }
        event.prevent_default();
        self.follow_anchor(link, &href);
    }

    /// Scrolls to the section `href` names, records it in history and marks
    /// `link` active. Nothing changes when the section does not exist.
    fn follow_anchor(&self, link: &Element, href: &str) -> bool {
        let Some(target) = anchor_target(href).and_then(|id| self.document.get_element_by_id(id))
        else {
            log::warn!("navigation target {href} not found");
            return false;
        };
        self.scroll_to(&target);

        if let Ok(history) = self.window.history() {
            if let Err(err) = history.push_state_with_url(&JsValue::NULL, "", Some(href)) {
                log::warn!("pushState failed: {err:?}");
            }
        }

        if let Some(index) = self.nav_links.iter().position(|candidate| candidate == link) {
            if self.nav.borrow_mut().activate(index) {
                self.paint_nav();
            }
        }
        true
    }

    fn on_popstate(&self) {
        let hash = self.window.location().hash().unwrap_or_default();
        let Some(target_id) = anchor_target(&hash) else {
            return;
        };
        if let Some(target) = self.document.get_element_by_id(target_id) {
            self.scroll_to(&target);
        }
        if self.nav.borrow_mut().activate_section(target_id) {
            self.paint_nav();
        }
    }

    fn scroll_to(&self, target: &Element) {
        let top = scroll_target(
            target.get_bounding_client_rect().top(),
            self.window.scroll_y().unwrap_or_default(),
            self.config.header_offset,
        );
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn sync_nav_to_scroll(&self) {
        let sections: Vec<SectionBounds> = query_all(&self.root, "section[id]")
            .iter()
            .filter_map(|section| {
                let element = section.dyn_ref::<HtmlElement>()?;
                Some(SectionBounds {
                    id: section.id(),
                    top: f64::from(element.offset_top()),
                    height: f64::from(element.offset_height()),
                })
            })
            .collect();

        let scroll_y = self.window.scroll_y().unwrap_or_default();
        if self
            .nav
            .borrow_mut()
            .sync_scroll(&sections, scroll_y, self.config.header_offset)
        {
            self.paint_nav();
        }
    }

    fn paint_nav(&self) {
        let active = self.nav.borrow().active();
        for (index, link) in self.nav_links.iter().enumerate() {
            let _ = link
                .class_list()
                .toggle_with_force("active", active == Some(index));
        }
    }
}
