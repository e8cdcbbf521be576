//! Caller-supplied table of include targets that do not end a span.

use std::collections::BTreeSet;

/// `#include` targets that keep an open namespace span open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    includes: BTreeSet<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_includes<I, S>(mut self, includes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.includes.extend(includes.into_iter().map(Into::into));
        self
    }

    /// Matches the include target as written (`<a.h>`, `"a.h"`, `MACRO(x)`)
    /// or with its `<>` / `""` delimiters stripped.
    pub fn is_include_ignored(&self, target: &str) -> bool {
        if self.includes.contains(target) {
            return true;
        }
        let bare = target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .or_else(|| target.strip_prefix('"').and_then(|t| t.strip_suffix('"')));
        bare.is_some_and(|t| self.includes.contains(t))
    }
}
