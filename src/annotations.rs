//! Field-scoped error annotations with a fixed display window.
//!
//! Each field keeps at most one message. Every message expires on its own
//! clock: showing a new one on a field restarts only that field's window.

use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::Instant;

use crate::field::Field;

pub const DEFAULT_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone)]
struct Annotation {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Annotations {
    ttl: Duration,
    entries: BTreeMap<Field, Annotation>,
}

impl Default for Annotations {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl Annotations {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: BTreeMap::new(),
        }
    }

    pub fn show(&mut self, field: Field, message: impl Into<String>, at: Instant) {
        self.entries.insert(
            field,
            Annotation {
                message: message.into(),
                expires_at: at + self.ttl,
            },
        );
    }

    /// Removes the annotation on one field, e.g. when the user edits it.
    pub fn clear(&mut self, field: Field) {
        self.entries.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    /// Drops expired entries and returns the ones still on screen, in field order.
    pub fn active(&mut self, at: Instant) -> Vec<(Field, &str)> {
        self.entries.retain(|_, a| a.expires_at > at);
        self.entries
            .iter()
            .map(|(f, a)| (*f, a.message.as_str()))
            .collect()
    }

    /// When the next entry runs out, if any is left.
    pub fn next_expiry(&self) -> Option<Instant> {
        self.entries.values().map(|a| a.expires_at).min()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_expire_independently() {
        let t0 = Instant::now();
        let mut notes = Annotations::default();
        notes.show(Field::BirthDay, "Invalid birth date", t0);
        notes.show(Field::DeathYear, "Life span must be at least 1 year", t0 + Duration::from_secs(2));

        assert_eq!(notes.active(t0 + Duration::from_secs(3)).len(), 2);

        let left = notes.active(t0 + Duration::from_secs(4));
        assert_eq!(left, vec![(Field::DeathYear, "Life span must be at least 1 year")]);

        assert_eq!(notes.next_expiry(), Some(t0 + Duration::from_secs(6)));
        assert!(notes.active(t0 + Duration::from_secs(6)).is_empty());
        assert!(notes.is_empty());
        assert_eq!(notes.next_expiry(), None);
    }

    #[test]
    fn later_message_replaces_and_restarts_window() {
        let t0 = Instant::now();
        let mut notes = Annotations::new(Duration::from_secs(4));
        notes.show(Field::DeathYear, "Death date must be after birth date", t0);
        notes.show(Field::DeathYear, "Life span must be at least 1 year", t0 + Duration::from_secs(3));

        let at = t0 + Duration::from_secs(5);
        assert_eq!(notes.active(at), vec![(Field::DeathYear, "Life span must be at least 1 year")]);
    }

    #[test]
    fn clear_removes_entries() {
        let t0 = Instant::now();
        let mut notes = Annotations::default();
        notes.show(Field::BirthDay, "Invalid birth date", t0);
        notes.show(Field::DeathDay, "Invalid death date", t0);
        notes.clear(Field::BirthDay);
        assert_eq!(notes.active(t0).len(), 1);
        notes.clear_all();
        assert!(notes.is_empty());
    }
}
