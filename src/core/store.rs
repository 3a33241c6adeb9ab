//! Roster: the keyed in-memory collection of marines.
//!
//! The roster is the single owner of every record and of the id counter.
//! All mutation goes through `&mut Roster`; callers that ever need shared
//! access should wrap the roster itself rather than its parts.

use crate::core::record::{AstartesCategory, SpaceMarine};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Keyed collection ordered by key, plus the running id counter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    marines: BTreeMap<i64, SpaceMarine>,
    next_id: i64,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from loaded entries; the id counter resumes at the highest id.
    pub fn from_entries(marines: BTreeMap<i64, SpaceMarine>) -> Self {
        let next_id = marines.values().map(|m| m.id).max().unwrap_or(0);
        Self { marines, next_id }
    }

    /// Highest id handed out so far (or loaded).
    pub fn last_id(&self) -> i64 {
        self.next_id
    }

    /// Reserve a fresh id. Ids are never reused, even after removal.
    pub fn draw_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.marines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marines.is_empty()
    }

    pub fn get(&self, key: i64) -> Option<&SpaceMarine> {
        self.marines.get(&key)
    }

    pub fn contains_key(&self, key: i64) -> bool {
        self.marines.contains_key(&key)
    }

    pub fn contains_id(&self, id: i64) -> bool {
        self.marines.values().any(|m| m.id == id)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &SpaceMarine)> {
        self.marines.iter().map(|(key, marine)| (*key, marine))
    }

    pub fn insert(&mut self, key: i64, marine: SpaceMarine) -> Option<SpaceMarine> {
        self.marines.insert(key, marine)
    }

    /// Replace every entry whose record carries `id`. The replacement is
    /// stamped with `id` and inherits the creation date of the entry it
    /// replaces. Returns how many entries were replaced.
    pub fn update(&mut self, id: i64, mut marine: SpaceMarine) -> usize {
        marine.id = id;
        let mut replaced = 0;
        for existing in self.marines.values_mut().filter(|m| m.id == id) {
            let creation_date = existing.creation_date;
            *existing = SpaceMarine {
                creation_date,
                ..marine.clone()
            };
            replaced += 1;
        }
        replaced
    }

    pub fn remove_key(&mut self, key: i64) -> Option<SpaceMarine> {
        self.marines.remove(&key)
    }

    pub fn clear(&mut self) {
        self.marines.clear();
    }

    /// Drop every record with health strictly below `health`.
    pub fn remove_lower(&mut self, health: f32) -> usize {
        let before = self.marines.len();
        self.marines.retain(|_, m| m.health >= health);
        before - self.marines.len()
    }

    /// Replace the entry at `key` only when the new health is lower.
    /// Returns whether the replacement happened.
    pub fn replace_if_lower(&mut self, key: i64, marine: SpaceMarine) -> bool {
        match self.marines.get_mut(&key) {
            Some(existing) if marine.health < existing.health => {
                *existing = marine;
                true
            }
            _ => false,
        }
    }

    /// Drop every entry whose key is strictly below `key`.
    pub fn remove_lower_key(&mut self, key: i64) -> usize {
        let kept = self.marines.split_off(&key);
        let removed = self.marines.len();
        self.marines = kept;
        removed
    }

    pub fn count_by_creation_date(&self) -> BTreeMap<NaiveDate, usize> {
        let mut counts = BTreeMap::new();
        for marine in self.marines.values() {
            *counts.entry(marine.creation_date).or_insert(0) += 1;
        }
        counts
    }

    /// Entries whose category ranks strictly above `category`.
    /// Records without a category never match.
    pub fn greater_than_category(
        &self,
        category: AstartesCategory,
    ) -> Vec<(i64, &SpaceMarine)> {
        self.iter()
            .filter(|(_, m)| m.category.is_some_and(|c| c.rank() > category.rank()))
            .collect()
    }

    /// Entries sorted by ascending health; equal health keeps key order.
    pub fn ascending_by_health(&self) -> Vec<(i64, &SpaceMarine)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.1.health.total_cmp(&b.1.health));
        entries
    }

    pub fn newest_creation_date(&self) -> Option<NaiveDate> {
        self.marines.values().map(|m| m.creation_date).max()
    }
}
