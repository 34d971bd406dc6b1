//! Request counters for the card service.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared by all request handlers.
#[derive(Debug, Default)]
pub struct CardMetrics {
    /// Cards projected (including empty ones)
    cards_rendered: AtomicUsize,

    /// Cards that came out with no sections
    empty_cards: AtomicUsize,

    /// Builder data requests
    maker_views: AtomicUsize,

    /// Share links built
    share_links: AtomicUsize,

    /// Selected ids the target language could not render
    unmatched_ids: AtomicUsize,
}

impl CardMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one projected card and how many sections it had.
    pub fn record_card(&self, sections: usize) {
        self.cards_rendered.fetch_add(1, Ordering::Relaxed);
        if sections == 0 {
            self.empty_cards.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_maker_view(&self) {
        self.maker_views.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_share_link(&self) {
        self.share_links.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_unmatched(&self, count: usize) {
        self.unmatched_ids.fetch_add(count, Ordering::Relaxed);
    }

    pub fn cards_rendered(&self) -> usize {
        self.cards_rendered.load(Ordering::Relaxed)
    }

    pub fn empty_cards(&self) -> usize {
        self.empty_cards.load(Ordering::Relaxed)
    }

    pub fn maker_views(&self) -> usize {
        self.maker_views.load(Ordering::Relaxed)
    }

    pub fn share_links(&self) -> usize {
        self.share_links.load(Ordering::Relaxed)
    }

    pub fn unmatched_ids(&self) -> usize {
        self.unmatched_ids.load(Ordering::Relaxed)
    }

    /// Snapshot of all counters.
    pub fn report(&self) -> MetricsReport {
        let cards = self.cards_rendered();
        let empty = self.empty_cards();
        let empty_card_rate = if cards > 0 {
            (empty as f64 / cards as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cards_rendered: cards,
            empty_cards: empty,
            empty_card_rate,
            maker_views: self.maker_views(),
            share_links: self.share_links(),
            unmatched_ids: self.unmatched_ids(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cards_rendered: usize,
    pub empty_cards: usize,

    /// Share of empty cards as a percentage (0-100)
    pub empty_card_rate: f64,

    pub maker_views: usize,
    pub share_links: usize,
    pub unmatched_ids: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_card() {
        let metrics = CardMetrics::new();

        metrics.record_card(2);
        assert_eq!(metrics.cards_rendered(), 1);
        assert_eq!(metrics.empty_cards(), 0);

        metrics.record_card(0);
        assert_eq!(metrics.cards_rendered(), 2);
        assert_eq!(metrics.empty_cards(), 1);
    }

    #[test]
    fn test_record_unmatched_adds_count() {
        let metrics = CardMetrics::new();
        metrics.record_unmatched(3);
        metrics.record_unmatched(0);
        metrics.record_unmatched(1);
        assert_eq!(metrics.unmatched_ids(), 4);
    }

    #[test]
    fn test_record_views_and_links() {
        let metrics = CardMetrics::new();
        metrics.record_maker_view();
        metrics.record_share_link();
        metrics.record_share_link();

        assert_eq!(metrics.maker_views(), 1);
        assert_eq!(metrics.share_links(), 2);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = CardMetrics::new().report();

        assert_eq!(report.cards_rendered, 0);
        assert_eq!(report.empty_card_rate, 0.0);
        assert_eq!(report.unmatched_ids, 0);
    }

    #[test]
    fn test_report_empty_card_rate() {
        let metrics = CardMetrics::new();

        // 1 empty out of 4 = 25%
        metrics.record_card(0);
        metrics.record_card(1);
        metrics.record_card(3);
        metrics.record_card(5);

        let report = metrics.report();
        assert_eq!(report.cards_rendered, 4);
        assert_eq!(report.empty_cards, 1);
        assert_eq!(report.empty_card_rate, 25.0);
    }
}
