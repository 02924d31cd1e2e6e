//! Active-link bookkeeping for the in-page navigation menu.

/// Layout of one `section[id]`, in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// Returns the fragment id of an in-page anchor (`#about` -> `about`).
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Document offset to scroll to so a target clears the fixed header.
pub fn scroll_target(viewport_top: f64, scroll_y: f64, header_offset: f64) -> f64 {
    (viewport_top + scroll_y - header_offset).max(0.0)
}

/// The section containing `scroll_y + header_offset` whose top is nearest above it.
pub fn current_section(
    sections: &[SectionBounds],
    scroll_y: f64,
    header_offset: f64,
) -> Option<&SectionBounds> {
    let position = scroll_y + header_offset;
    sections
        .iter()
        .filter(|section| position >= section.top && position <= section.top + section.height)
        .max_by(|a, b| a.top.total_cmp(&b.top))
}

/// Tracks which menu link is active. At most one is active at a time.
#[derive(Debug, Clone, Default)]
pub struct NavigationTracker {
    targets: Vec<Option<String>>,
    active: Option<usize>,
}

impl NavigationTracker {
    /// `hrefs` in menu order; links that are not in-page anchors are never activated
    /// by scrolling.
    pub fn new<I, S>(hrefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            targets: hrefs
                .into_iter()
                .map(|href| anchor_target(href.as_ref()).map(str::to_string))
                .collect(),
            active: None,
        }
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Marks link `index` active. Returns whether the active link changed.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.targets.len() || self.active == Some(index) {
            return false;
        }
        self.active = Some(index);
        true
    }

    /// Activates the first link pointing at `section_id`.
    pub fn activate_section(&mut self, section_id: &str) -> bool {
        match self
            .targets
            .iter()
            .position(|target| target.as_deref() == Some(section_id))
        {
            Some(index) => self.activate(index),
            None => false,
        }
    }

    /// Re-evaluates the active link after a scroll. When no section contains the
    /// scroll position the current link stays active.
    pub fn sync_scroll(&mut self, sections: &[SectionBounds], scroll_y: f64, header_offset: f64) -> bool {
        match current_section(sections, scroll_y, header_offset) {
            Some(section) => {
                let id = section.id.clone();
                self.activate_section(&id)
            }
            None => false,
        }
    }
}
