use std::collections::HashMap;
use std::hash::Hash;

/// The result of matching a previously rendered element list against new
/// data: which data enter, which elements carry over, which exit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Join {
    /// Indices into the new data with no previous element.
    pub enter: Vec<usize>,
    /// `(previous, next)` index pairs that carry over.
    pub update: Vec<(usize, usize)>,
    /// Indices of previous elements with no new datum.
    pub exit: Vec<usize>,
}

impl Join {
    /// Positional join: element `i` is bound to datum `i`.
    pub fn by_index(previous: usize, next: usize) -> Self {
        let shared = previous.min(next);
        Self {
            enter: (shared..next).collect(),
            update: (0..shared).map(|idx| (idx, idx)).collect(),
            exit: (shared..previous).collect(),
        }
    }

    /// Keyed join. A repeated key only matches once; later duplicates in
    /// `next` enter and unmatched duplicates in `previous` exit.
    pub fn by_key<K: Eq + Hash>(previous: &[K], next: &[K]) -> Self {
        let mut available: HashMap<&K, usize> = HashMap::with_capacity(previous.len());
        for (idx, key) in previous.iter().enumerate() {
            available.entry(key).or_insert(idx);
        }
        let mut join = Self::default();
        for (idx, key) in next.iter().enumerate() {
            match available.remove(key) {
                Some(prev) => join.update.push((prev, idx)),
                None => join.enter.push(idx),
            }
        }
        let mut matched = vec![false; previous.len()];
        for &(prev, _) in &join.update {
            matched[prev] = true;
        }
        join.exit = (0..previous.len()).filter(|&idx| !matched[idx]).collect();
        join
    }

    /// For each new datum, the previous element it inherits, if any.
    pub fn sources(&self, next: usize) -> Vec<Option<usize>> {
        let mut sources = vec![None; next];
        for &(prev, idx) in &self.update {
            if let Some(slot) = sources.get_mut(idx) {
                *slot = Some(prev);
            }
        }
        sources
    }
}
