//! Pattern-keyed storage shared by the guard and edge registries.

use crate::core::{PatternKey, State, Tier, Transition, TransitionPattern};
use std::collections::HashMap;
use std::sync::Arc;

/// Exact-match table of entries registered under expanded pattern keys.
///
/// A pattern with several states on a side is stored under several keys;
/// the entry itself is shared between them. Entries under one key keep
/// registration order.
pub(crate) struct PatternTable<S: State, T> {
    entries: HashMap<PatternKey<S>, Vec<Arc<T>>>,
    patterns: Vec<TransitionPattern<S>>,
}

impl<S: State, T> PatternTable<S, T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: HashMap::new(),
            patterns: Vec::new(),
        }
    }

    /// Store `item` under every key `pattern` expands to. Returns the number
    /// of keys written.
    pub(crate) fn insert(&mut self, pattern: TransitionPattern<S>, item: T) -> usize {
        let item = Arc::new(item);
        let keys = pattern.expand();
        let written = keys.len();

        for key in keys {
            self.entries
                .entry(key)
                .or_default()
                .push(Arc::clone(&item));
        }

        self.patterns.push(pattern);
        written
    }

    /// Every entry matching `transition`, exact tier first, any-to-any last,
    /// registration order within a tier.
    pub(crate) fn matching(&self, transition: &Transition<S>) -> Vec<(Tier, &T)> {
        PatternKey::lookups(transition)
            .iter()
            .filter_map(|(tier, key)| self.entries.get(key).map(|items| (*tier, items)))
            .flat_map(|(tier, items)| items.iter().map(move |item| (tier, item.as_ref())))
            .collect()
    }

    pub(crate) fn patterns(&self) -> &[TransitionPattern<S>] {
        &self.patterns
    }

    pub(crate) fn len(&self) -> usize {
        self.patterns.len()
    }
}
