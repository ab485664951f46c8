//! One-shot scroll reveal bookkeeping.
//!
//! Mirrors an intersection observer: elements are observed by id, and the
//! first intersecting report for an element reveals it and stops observing
//! it. Later reports for that element are ignored. The threshold only
//! configures when the host observer delivers reports; the ratio it hands
//! back may sit slightly under it.

use std::collections::BTreeSet;

/// Default visible fraction that triggers a reveal.
pub const DEFAULT_THRESHOLD: f64 = 0.12;

/// CSS class added to revealed elements.
pub const REVEAL_CLASS: &str = "fade-in";

/// Selectors whose matches are observed on the landing page.
pub const REVEAL_SELECTORS: &str = ".fade-up, .showcase-item, .card, .about-card";

/// One intersection report for an element.
#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<'a> {
    pub id: &'a str,
    pub is_intersecting: bool,
    /// Visible fraction of the element in [0, 1].
    pub ratio: f64,
}

#[derive(Debug, Clone)]
pub struct RevealTracker {
    threshold: f64,
    observed: BTreeSet<String>,
    revealed: Vec<String>,
}

impl RevealTracker {
    /// Threshold is clamped to [0, 1].
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            observed: BTreeSet::new(),
            revealed: Vec::new(),
        }
    }

    /// Visible fraction the host observer should report at.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Starts observing `id`. Already revealed elements are not re-observed.
    pub fn observe(&mut self, id: &str) {
        if !self.revealed.iter().any(|r| r == id) {
            self.observed.insert(id.to_owned());
        }
    }

    /// Drops every pending element. Reports after this reveal nothing.
    pub fn disconnect(&mut self) {
        log::debug!("reveal tracker disconnected with {} pending", self.observed.len());
        self.observed.clear();
    }

    pub fn is_observed(&self, id: &str) -> bool {
        self.observed.contains(id)
    }

    pub fn pending(&self) -> usize {
        self.observed.len()
    }

    /// Revealed ids in reveal order.
    pub fn revealed(&self) -> &[String] {
        &self.revealed
    }

    /// Handles one report; returns true if it revealed the element.
    pub fn report(&mut self, entry: &Intersection<'_>) -> bool {
        if !entry.is_intersecting {
            return false;
        }
        if !self.observed.remove(entry.id) {
            return false;
        }
        log::debug!("revealed '{}' at ratio {:.2}", entry.id, entry.ratio);
        self.revealed.push(entry.id.to_owned());
        true
    }
}

impl Default for RevealTracker {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seen(id: &str, ratio: f64) -> Intersection<'_> {
        Intersection {
            id,
            is_intersecting: true,
            ratio,
        }
    }

    #[test]
    fn first_intersecting_report_reveals() {
        let mut t = RevealTracker::default();
        t.observe("about");
        assert!(t.report(&seen("about", 0.12)));
        assert_eq!(t.revealed(), &["about".to_string()]);
    }

    #[test]
    fn intersecting_report_just_under_threshold_still_reveals() {
        let mut t = RevealTracker::default();
        t.observe("card");
        assert!(t.report(&seen("card", 0.119_999)));
        assert!(!t.is_observed("card"));
    }

    #[test]
    fn disconnect_drops_pending_elements() {
        let mut t = RevealTracker::default();
        t.observe("a");
        t.observe("b");
        assert!(t.report(&seen("a", 0.5)));
        t.disconnect();
        assert_eq!(t.pending(), 0);
        assert!(!t.report(&seen("b", 1.0)));
        assert_eq!(t.revealed(), &["a".to_string()]);
    }

    #[test]
    fn revealed_elements_are_unobserved() {
        let mut t = RevealTracker::default();
        t.observe("card-1");
        assert!(t.report(&seen("card-1", 0.5)));
        assert!(!t.is_observed("card-1"));
        assert!(!t.report(&seen("card-1", 1.0)));
        assert_eq!(t.revealed().len(), 1);
    }

    #[test]
    fn non_intersecting_reports_are_ignored() {
        let mut t = RevealTracker::default();
        t.observe("hero");
        let entry = Intersection {
            id: "hero",
            is_intersecting: false,
            ratio: 0.9,
        };
        assert!(!t.report(&entry));
        assert!(t.is_observed("hero"));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut t = RevealTracker::default();
        assert!(!t.report(&seen("ghost", 1.0)));
        assert!(t.revealed().is_empty());
    }

    #[test]
    fn observe_after_reveal_is_noop() {
        let mut t = RevealTracker::default();
        t.observe("x");
        t.report(&seen("x", 1.0));
        t.observe("x");
        assert_eq!(t.pending(), 0);
    }

    #[test]
    fn threshold_is_clamped() {
        assert_eq!(RevealTracker::new(4.0).threshold(), 1.0);
        assert_eq!(RevealTracker::new(-1.0).threshold(), 0.0);
    }
}
