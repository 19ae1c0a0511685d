//! Keyed fetch bookkeeping.
//!
//! Every request is tagged with the generation that was current when it was
//! issued. A response is only applied if its generation is still current, so
//! a late answer for an old key can never overwrite data for the new one.

use chrono::NaiveDate;

/// Everything an availability lookup depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AvailabilityKey {
    pub username: String,
    pub date: NaiveDate,
    pub service_id: i64,
    pub professional_id: String,
    pub unit_id: Option<String>,
}

impl AvailabilityKey {
    pub fn date_param(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// No key yet, nothing requested.
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<K> {
    generation: u64,
    pub key: K,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchTracker<K, T> {
    generation: u64,
    key: Option<K>,
    state: FetchState<T>,
}

impl<K, T> Default for FetchTracker<K, T> {
    fn default() -> Self {
        Self {
            generation: 0,
            key: None,
            state: FetchState::Idle,
        }
    }
}

impl<K: Clone + PartialEq, T> FetchTracker<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the tracker at `key` and returns a ticket when a fetch should start.
    ///
    /// A `None` key disables fetching. Re-requesting the current key is a no-op
    /// unless the last attempt failed.
    pub fn request(&mut self, key: Option<K>) -> Option<FetchTicket<K>> {
        let unchanged = self.key == key;
        if unchanged && !matches!(self.state, FetchState::Failed(_)) {
            return None;
        }

        self.generation += 1;
        self.key = key.clone();

        match key {
            Some(key) => {
                self.state = FetchState::Loading;
                Some(FetchTicket {
                    generation: self.generation,
                    key,
                })
            }
            None => {
                self.state = FetchState::Idle;
                None
            }
        }
    }

    /// Refetches the current key even though it already resolved.
    pub fn refresh(&mut self) -> Option<FetchTicket<K>> {
        let key = self.key.clone()?;
        self.generation += 1;
        self.state = FetchState::Loading;
        Some(FetchTicket {
            generation: self.generation,
            key,
        })
    }

    /// Applies a response. Returns `false` and leaves the state untouched when
    /// the ticket belongs to a superseded request.
    pub fn resolve(&mut self, ticket: FetchTicket<K>, result: Result<T, String>) -> bool {
        if ticket.generation != self.generation || self.key.as_ref() != Some(&ticket.key) {
            return false;
        }

        self.state = match result {
            Ok(value) => FetchState::Ready(value),
            Err(message) => FetchState::Failed(message),
        };
        true
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn current(&self) -> Option<&T> {
        match &self.state {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(professional: &str) -> AvailabilityKey {
        AvailabilityKey {
            username: "ana".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            service_id: 1,
            professional_id: professional.into(),
            unit_id: None,
        }
    }

    fn slots(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_fetch_without_key() {
        let mut tracker: FetchTracker<AvailabilityKey, Vec<String>> = FetchTracker::new();
        assert!(tracker.request(None).is_none());
        assert_eq!(tracker.state(), &FetchState::Idle);
    }

    #[test]
    fn matching_response_is_applied() {
        let mut tracker = FetchTracker::new();
        let ticket = tracker.request(Some(key("p1"))).unwrap();
        assert!(tracker.is_loading());

        assert!(tracker.resolve(ticket, Ok(slots(&["09:00", "10:00"]))));
        assert_eq!(tracker.current(), Some(&slots(&["09:00", "10:00"])));
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut tracker = FetchTracker::new();
        let old = tracker.request(Some(key("p1"))).unwrap();
        let new = tracker.request(Some(key("p2"))).unwrap();

        assert!(!tracker.resolve(old, Ok(slots(&["08:00"]))));
        assert!(tracker.is_loading());
        assert_eq!(tracker.current(), None);

        assert!(tracker.resolve(new, Ok(slots(&["11:00"]))));
        assert_eq!(tracker.current(), Some(&slots(&["11:00"])));
    }

    #[test]
    fn returning_to_an_earlier_key_still_discards_its_old_response() {
        let mut tracker = FetchTracker::new();
        let first = tracker.request(Some(key("p1"))).unwrap();
        tracker.request(Some(key("p2")));
        let again = tracker.request(Some(key("p1"))).unwrap();

        assert_eq!(first.key, again.key);
        assert!(!tracker.resolve(first, Ok(slots(&["08:00"]))));
        assert!(tracker.resolve(again, Ok(slots(&["09:00"]))));
    }

    #[test]
    fn clearing_the_key_invalidates_in_flight_requests() {
        let mut tracker = FetchTracker::new();
        let ticket = tracker.request(Some(key("p1"))).unwrap();
        assert!(tracker.request(None).is_none());

        assert!(!tracker.resolve(ticket, Ok(slots(&["09:00"]))));
        assert_eq!(tracker.state(), &FetchState::Idle);
    }

    #[test]
    fn same_key_is_not_refetched_unless_it_failed() {
        let mut tracker: FetchTracker<AvailabilityKey, Vec<String>> = FetchTracker::new();
        let ticket = tracker.request(Some(key("p1"))).unwrap();
        assert!(tracker.request(Some(key("p1"))).is_none());

        tracker.resolve(ticket, Err("boom".into()));
        assert_eq!(tracker.error(), Some("boom"));

        let retry = tracker.request(Some(key("p1")));
        assert!(retry.is_some());
        assert!(tracker.is_loading());
    }

    #[test]
    fn refresh_reloads_the_current_key_and_drops_the_old_answer() {
        let mut tracker = FetchTracker::new();
        let first = tracker.request(Some(key("p1"))).unwrap();
        tracker.resolve(first, Ok(slots(&["09:00", "10:00"])));

        let reload = tracker.refresh().unwrap();
        assert_eq!(reload.key, key("p1"));
        assert!(tracker.is_loading());
        assert_eq!(tracker.current(), None);

        assert!(tracker.resolve(reload, Ok(slots(&["10:00"]))));
        assert_eq!(tracker.current(), Some(&slots(&["10:00"])));
    }

    #[test]
    fn refresh_without_a_key_does_nothing() {
        let mut tracker: FetchTracker<AvailabilityKey, Vec<String>> = FetchTracker::new();
        assert!(tracker.refresh().is_none());
        assert_eq!(tracker.state(), &FetchState::Idle);
    }

    #[test]
    fn date_param_is_iso_formatted() {
        assert_eq!(key("p1").date_param(), "2024-01-15");
    }
}
