use crate::content::Heading;

/// Part of the viewport a heading has to enter to become active, as
/// fractions of the viewport height measured from the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverBand {
    pub top: f64,
    pub bottom: f64,
}

impl Default for ObserverBand {
    /// Top 20% of the viewport, `rootMargin: 0% 0% -80% 0%`.
    fn default() -> Self {
        ObserverBand { top: 0.0, bottom: 0.2 }
    }
}

impl ObserverBand {
    /// Whether an element spanning `element_top..element_bottom` (viewport
    /// coordinates, pixels) overlaps the band.
    pub fn intersects(&self, element_top: f64, element_bottom: f64, viewport_height: f64) -> bool {
        let band_top = self.top * viewport_height;
        let band_bottom = self.bottom * viewport_height;
        element_bottom > band_top && element_top < band_bottom
    }

    pub fn root_margin(&self) -> String {
        let pct = |v: f64| format!("{}%", (v * 100.0).round() as i64);
        format!("{} 0% {} 0%", pct(-self.top), pct(self.bottom - 1.0))
    }
}

/// One viewport-intersection event for an observed heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection {
    pub id: String,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TocEntry {
    pub id: String,
    pub text: String,
    pub active: bool,
}

/// Active-section tracking for the table of contents.
///
/// Push driven: the page feeds intersection events in, the tracker never
/// polls. The last heading to enter the band wins, with no debouncing.
#[derive(Debug)]
pub struct TocTracker {
    headings: Vec<Heading>,
    observed: Vec<String>,
    active: Option<String>,
    supported: bool,
}

impl TocTracker {
    pub fn new() -> Self {
        TocTracker {
            headings: vec![],
            observed: vec![],
            active: None,
            supported: true,
        }
    }

    /// Tracker for a page without intersection support: a static list.
    pub fn unsupported() -> Self {
        TocTracker {
            supported: false,
            ..Self::new()
        }
    }

    /// Subscribes to the headings that have an element in the page and
    /// returns how many are observed. A previous subscription is replaced.
    pub fn observe<F>(&mut self, headings: &[Heading], is_present: F) -> usize
        where F: Fn(&str) -> bool
    {
        self.disconnect();
        self.headings = headings.to_vec();
        if !self.supported {
            return 0;
        }

        self.observed = headings.iter()
            .filter(|h| is_present(&h.id))
            .map(|h| h.id.clone())
            .collect();
        self.observed.len()
    }

    pub fn on_intersections(&mut self, entries: &[Intersection]) {
        for entry in entries {
            if entry.is_intersecting && self.observed.contains(&entry.id) {
                self.active = Some(entry.id.clone());
            }
        }
    }

    /// Drops every subscription. Later events are ignored.
    pub fn disconnect(&mut self) {
        self.observed.clear();
    }

    pub fn is_observing(&self) -> bool {
        !self.observed.is_empty()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn entries(&self) -> Vec<TocEntry> {
        self.headings.iter()
            .map(|h| TocEntry {
                id: h.id.clone(),
                text: h.text.clone(),
                active: self.active.as_deref() == Some(h.id.as_str()),
            })
            .collect()
    }
}

impl Default for TocTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Scroll depth as a fraction in `[0, 1]`. A page that can't scroll reports 0.
pub fn scroll_progress(scroll_top: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_top / scrollable).clamp(0.0, 1.0)
}
