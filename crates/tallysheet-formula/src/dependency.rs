//! Dependency tracking between named cells
//!
//! A pair `(s, t)` means `t` depends on `s`: `t`'s formula references `s`,
//! so `t` is a dependent of `s` and `s` is a dependee of `t`.

use ahash::{AHashMap, AHashSet};

/// Bidirectional dependency relation over cell names
///
/// Both directions are stored so that dependents and dependees can be
/// enumerated without a scan. Empty sets are pruned, so a name with no pairs
/// has no entry in either map.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    /// Name → names that depend on it
    dependents: AHashMap<String, AHashSet<String>>,
    /// Name → names it depends on
    dependees: AHashMap<String, AHashSet<String>>,
    /// Number of distinct pairs
    size: usize,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct `(dependee, dependent)` pairs
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of names `s` depends on
    pub fn dependee_count(&self, s: &str) -> usize {
        self.dependees.get(s).map_or(0, |set| set.len())
    }

    pub fn has_dependents(&self, s: &str) -> bool {
        self.dependents.contains_key(s)
    }

    pub fn has_dependees(&self, s: &str) -> bool {
        self.dependees.contains_key(s)
    }

    /// Names that depend on `s` (empty for an unknown name)
    pub fn dependents<'a>(&'a self, s: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.dependents
            .get(s)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Names `s` depends on (empty for an unknown name)
    pub fn dependees<'a>(&'a self, s: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.dependees
            .get(s)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Record that `t` depends on `s`
    ///
    /// Adding a pair that is already present does nothing. `s == t` is a
    /// legal self-loop.
    pub fn add_dependency(&mut self, s: &str, t: &str) {
        let inserted = self
            .dependents
            .entry(s.to_string())
            .or_default()
            .insert(t.to_string());
        self.dependees
            .entry(t.to_string())
            .or_default()
            .insert(s.to_string());

        if inserted {
            self.size += 1;
        }
    }

    /// Remove the pair `(s, t)` if present
    pub fn remove_dependency(&mut self, s: &str, t: &str) {
        let removed_dependent = remove_from(&mut self.dependents, s, t);
        let removed_dependee = remove_from(&mut self.dependees, t, s);

        if removed_dependent || removed_dependee {
            self.size = self.size.saturating_sub(1);
        }
    }

    /// Replace every pair `(s, *)` with `(s, t)` for each `t` in `new_dependents`
    pub fn replace_dependents<I, S>(&mut self, s: &str, new_dependents: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let old: Vec<String> = self.dependents(s).map(str::to_string).collect();
        for t in &old {
            self.remove_dependency(s, t);
        }
        for t in new_dependents {
            self.add_dependency(s, t.as_ref());
        }
    }

    /// Replace every pair `(*, s)` with `(t, s)` for each `t` in `new_dependees`
    pub fn replace_dependees<I, S>(&mut self, s: &str, new_dependees: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let old: Vec<String> = self.dependees(s).map(str::to_string).collect();
        for t in &old {
            self.remove_dependency(t, s);
        }
        for t in new_dependees {
            self.add_dependency(t.as_ref(), s);
        }
    }
}

/// Remove `value` from `map[key]`, dropping the entry once its set is empty
fn remove_from(map: &mut AHashMap<String, AHashSet<String>>, key: &str, value: &str) -> bool {
    let Some(set) = map.get_mut(key) else {
        return false;
    };
    let removed = set.remove(value);
    if set.is_empty() {
        map.remove(key);
    }
    removed
}
