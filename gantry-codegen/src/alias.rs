//! Run-scoped import-alias allocation.

use std::collections::HashSet;

use indexmap::IndexMap;

/// Allocates unique local aliases for import paths within one run.
///
/// The registry is owned by a single generation run and never shared: two
/// artifacts importing the same path get the same alias without
/// coordinating, and two distinct paths never collide on one alias.
///
/// # Example
///
/// ```
/// use gantry_codegen::AliasRegistry;
///
/// let mut aliases = AliasRegistry::new();
/// assert_eq!(aliases.acquire("example.com/a/pb", ""), "pb");
/// assert_eq!(aliases.acquire("example.com/b/pb", ""), "pb_0");
/// // Re-acquiring returns the stored alias, preferred alias ignored.
/// assert_eq!(aliases.acquire("example.com/a/pb", "other"), "pb");
/// ```
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry {
    /// Import path -> alias, in allocation order.
    by_path: IndexMap<String, String>,
    /// Aliases already handed out.
    taken: HashSet<String>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `import_path` and return its alias for this run.
    ///
    /// An empty `preferred` defaults to the path's final segment. When the
    /// candidate is held by a different path, numbered variants of the
    /// final segment (`name_0`, `name_1`, ...) are probed until a free
    /// alias is found. Always succeeds.
    pub fn acquire(&mut self, import_path: &str, preferred: &str) -> &str {
        debug_assert!(!import_path.is_empty(), "import path must be non-empty");
        if !self.by_path.contains_key(import_path) {
            let name = last_segment(import_path);
            let mut alias = if preferred.is_empty() {
                name.to_string()
            } else {
                preferred.to_string()
            };
            let mut attempt = 0usize;
            while self.taken.contains(&alias) {
                alias = format!("{name}_{attempt}");
                attempt += 1;
            }
            self.taken.insert(alias.clone());
            self.by_path.insert(import_path.to_string(), alias);
        }
        self.by_path[import_path].as_str()
    }

    /// Alias previously assigned to `import_path`, if any.
    pub fn get(&self, import_path: &str) -> Option<&str> {
        self.by_path.get(import_path).map(String::as_str)
    }

    /// (path, alias) pairs in allocation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.by_path.iter().map(|(p, a)| (p.as_str(), a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
