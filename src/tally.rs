//! Per-user aggregation of fetched records.

use std::collections::{HashMap, HashSet};

/// Items grouped by user, users in first-seen order, items in insertion order
#[derive(Debug)]
pub struct Grouped<T> {
    index: HashMap<String, usize>,
    groups: Vec<(String, Vec<T>)>,
}

impl<T> Default for Grouped<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }
}

impl<T> Grouped<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, user: &str, item: T) {
        let slot = match self.index.get(user) {
            Some(&slot) => slot,
            None => {
                self.groups.push((user.to_string(), Vec::new()));
                self.index.insert(user.to_string(), self.groups.len() - 1);
                self.groups.len() - 1
            }
        };
        self.groups[slot].1.push(item);
    }

    pub fn get(&self, user: &str) -> Option<&[T]> {
        self.index
            .get(user)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[T])> {
        self.groups
            .iter()
            .map(|(user, items)| (user.as_str(), items.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Credits users for taking part in other people's items, once per item.
///
/// A user commenting five times on someone else's issue earns one credit
/// for that issue; commenting on their own issue earns nothing.
#[derive(Debug, Default)]
pub struct PeerCredits {
    credited: HashMap<u64, HashSet<String>>,
    counts: HashMap<String, usize>,
    order: Vec<String>,
}

impl PeerCredits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `user` for interacting with `item`, owned by `owner`.
    /// Returns whether a new credit was given.
    pub fn credit(&mut self, item: u64, owner: &str, user: &str) -> bool {
        if user == owner {
            return false;
        }
        let seen = self.credited.entry(item).or_default();
        if !seen.insert(user.to_string()) {
            return false;
        }
        match self.counts.get_mut(user) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(user.to_string(), 1);
                self.order.push(user.to_string());
            }
        }
        true
    }

    #[cfg(test)]
    pub fn count(&self, user: &str) -> usize {
        self.counts.get(user).copied().unwrap_or(0)
    }

    /// Users with a nonzero count, in the order they were first credited
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.order
            .iter()
            .map(|user| (user.as_str(), self.counts[user]))
    }
}
