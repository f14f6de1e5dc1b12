//! Typed troop inventories.
//!
//! A `TroopSet` maps troop-type keys to unit counts. Troop types are
//! opaque strings supplied by the catalog; the set itself enforces the
//! non-negativity invariant by clamping withdrawals at zero and never
//! storing zero-count entries (callers must not assume a key is present
//! just because its count was once positive).

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A multiset of troops keyed by troop type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TroopSet {
    counts: BTreeMap<String, u32>,
}

impl TroopSet {
    /// Creates an empty troop set.
    pub fn new() -> Self {
        TroopSet::default()
    }

    /// Adds `n` units of the given type. Adding zero is a no-op.
    pub fn add(&mut self, kind: &str, n: u32) {
        if n == 0 {
            return;
        }
        *self.counts.entry(kind.to_string()).or_insert(0) += n;
    }

    /// Removes up to `n` units of the given type, clamped at zero.
    ///
    /// Returns the number actually removed. A shortfall is logged and
    /// clamped rather than rejected; callers that need a hard guarantee
    /// must check `covers` first.
    pub fn remove(&mut self, kind: &str, n: u32) -> u32 {
        if n == 0 {
            return 0;
        }
        match self.counts.get_mut(kind) {
            None => {
                log::warn!("removing {} '{}' from a set holding none", n, kind);
                0
            }
            Some(count) => {
                let removed = n.min(*count);
                if removed < n {
                    log::warn!(
                        "removing {} '{}' but only {} present; clamping",
                        n,
                        kind,
                        count
                    );
                }
                *count -= removed;
                if *count == 0 {
                    self.counts.remove(kind);
                }
                removed
            }
        }
    }

    /// Removes every entry of `other` from this set, clamping per type.
    pub fn remove_all(&mut self, other: &TroopSet) {
        for (kind, n) in other.iter() {
            self.remove(kind, n);
        }
    }

    /// Adds every entry of `other` to this set.
    pub fn merge(&mut self, other: &TroopSet) {
        for (kind, n) in other.iter() {
            self.add(kind, n);
        }
    }

    /// Empties the set.
    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Returns the count of the given type (zero if absent).
    pub fn count(&self, kind: &str) -> u32 {
        self.counts.get(kind).copied().unwrap_or(0)
    }

    /// Returns the total number of units across all types.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Returns true if the set holds no units.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns true if this set has at least `other`'s count of every type.
    pub fn covers(&self, other: &TroopSet) -> bool {
        other.iter().all(|(kind, n)| self.count(kind) >= n)
    }

    /// Iterates over `(type, count)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Iterates over the troop types present, in key order.
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(|k| k.as_str())
    }

    /// Flattens the multiset into one entry per unit, in key order.
    ///
    /// This is the sampling domain for battle survival: each unit is an
    /// equally likely draw regardless of its type.
    pub fn flatten(&self) -> Vec<&str> {
        let mut units = Vec::with_capacity(self.total() as usize);
        for (kind, n) in self.iter() {
            for _ in 0..n {
                units.push(kind);
            }
        }
        units
    }

    /// Returns the most-represented troop type, breaking ties uniformly
    /// at random. Empty sets yield `None`.
    pub fn dominant_kind<R: Rng>(&self, rng: &mut R) -> Option<&str> {
        let max = self.counts.values().max().copied()?;
        let leaders: Vec<&str> = self
            .iter()
            .filter(|(_, n)| *n == max)
            .map(|(kind, _)| kind)
            .collect();
        let idx = if leaders.len() == 1 {
            0
        } else {
            rng.gen_range(0..leaders.len())
        };
        Some(leaders[idx])
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for TroopSet {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut set = TroopSet::new();
        for (kind, n) in iter {
            if n > 0 {
                *set.counts.entry(kind.into()).or_insert(0) += n;
            }
        }
        set
    }
}

impl std::fmt::Display for TroopSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for (kind, n) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", n, kind)?;
            first = false;
        }
        Ok(())
    }
}
