//! Category Index
//!
//! Maps each category path to the names of the records tagged with exactly
//! that path. Tags are flat: a record tagged `community.brush` is not found by
//! a query for `community`.
//!
//! A query is a flattened segment sequence. A record matches when the
//! sequence splits into consecutive runs that are each one of its tags, so
//! `community.brush` is satisfied by the tag `community.brush` or by the two
//! tags `community` and `brush`.

use crate::plugin::category::CategoryPath;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Default)]
pub struct CategoryIndex {
    entries: BTreeMap<CategoryPath, BTreeSet<String>>,
}

impl CategoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag `name` with `path`. Returns false if the tag was already present.
    pub fn insert(&mut self, path: &CategoryPath, name: &str) -> bool {
        self.entries
            .entry(path.clone())
            .or_default()
            .insert(name.to_string())
    }

    pub fn contains(&self, path: &CategoryPath, name: &str) -> bool {
        self.entries
            .get(path)
            .is_some_and(|names| names.contains(name))
    }

    /// Names with the exact tag `path`
    fn exact(&self, path: &CategoryPath) -> BTreeSet<&str> {
        self.entries
            .get(path)
            .map(|names| names.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Names whose tags cover every segment of `query`. An empty query
    /// matches nothing.
    pub fn matching(&self, query: &CategoryPath) -> BTreeSet<&str> {
        let len = query.len();
        if len == 0 {
            return BTreeSet::new();
        }

        // covered[i] holds the names whose tags cover query[..i]
        let mut covered: Vec<BTreeSet<&str>> = vec![BTreeSet::new(); len + 1];
        for end in 1..=len {
            for start in 0..end {
                let run = self.exact(&query.slice(start, end));
                let reached: Vec<&str> = if start == 0 {
                    run.into_iter().collect()
                } else {
                    run.into_iter()
                        .filter(|name| covered[start].contains(name))
                        .collect()
                };
                covered[end].extend(reached);
            }
        }
        covered.pop().unwrap_or_default()
    }

    /// Every category path carrying at least one record
    pub fn categories(&self) -> impl Iterator<Item = &CategoryPath> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
