use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence counter that remembers the order keys were first seen.
///
/// Rankings break count ties by that order, so equal counts keep a
/// deterministic position instead of depending on hash iteration.
#[derive(Debug, Clone)]
pub struct FrequencyCounter<K> {
    slots: HashMap<K, usize>,
    entries: Vec<(K, usize)>,
}

impl<K> Default for FrequencyCounter<K> {
    fn default() -> Self {
        FrequencyCounter {
            slots: HashMap::new(),
            entries: Vec::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> FrequencyCounter<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        match self.slots.get(&key) {
            Some(&slot) => self.entries[slot].1 += 1,
            None => {
                self.slots.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn count(&self, key: &K) -> usize {
        self.slots.get(key).map_or(0, |&slot| self.entries[slot].1)
    }

    /// The `n` most frequent keys, highest count first
    pub fn top(&self, n: usize) -> Vec<(K, usize)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }

    /// Most frequent key; the earliest seen wins a tie
    pub fn most_common(&self) -> Option<&K> {
        let mut best: Option<&(K, usize)> = None;
        for entry in &self.entries {
            if best.is_none_or(|b| entry.1 > b.1) {
                best = Some(entry);
            }
        }
        best.map(|(key, _)| key)
    }
}

impl<K: Hash + Eq + Clone> FromIterator<K> for FrequencyCounter<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut counter = FrequencyCounter::new();
        for key in iter {
            counter.add(key);
        }
        counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_rank_by_first_appearance() {
        let counter: FrequencyCounter<&str> = ["b", "a", "c", "a", "c", "d"].into_iter().collect();
        assert_eq!(counter.top(3), vec![("a", 2), ("c", 2), ("b", 1)]);
        assert_eq!(counter.most_common(), Some(&"a"));
        assert_eq!(counter.count(&"d"), 1);
        assert_eq!(counter.count(&"z"), 0);
    }

    #[test]
    fn empty_counter_has_no_winner() {
        let counter: FrequencyCounter<String> = FrequencyCounter::new();
        assert!(counter.top(10).is_empty());
        assert!(counter.most_common().is_none());
    }
}
