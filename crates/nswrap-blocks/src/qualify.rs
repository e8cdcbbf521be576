//! Qualification of bare `::name` references with the namespace name.
//!
//! Once declarations move into `namespace NAME`, a global-scope reference
//! such as `::JNI_CreateJavaVM(...)` no longer resolves. For every symbol in
//! the table, `<boundary>::symbol` becomes `<boundary>NAME::symbol`, where the
//! boundary is the start of the line or any character other than an
//! identifier character or `>` (which would mean an already-qualified or
//! template-dependent name).

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{Error, Result};

static BARE_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(^|[^A-Za-z0-9>_])::([A-Za-z_][A-Za-z0-9_]*)")
        .expect("Invalid bare reference regex")
});

/// Returns `true` for a C/C++ identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug, Clone)]
pub struct SymbolQualifier {
    namespace: String,
    symbols: BTreeSet<String>,
    qualified: Regex,
}

impl SymbolQualifier {
    pub fn new<I, S>(namespace: &str, symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !is_identifier(namespace) {
            return Err(Error::InvalidNamespace {
                name: namespace.to_string(),
            });
        }
        let qualified = Regex::new(&format!(
            r"(^|[^A-Za-z0-9>_]){}::",
            regex::escape(namespace)
        ))?;

        Ok(Self {
            namespace: namespace.to_string(),
            symbols: symbols.into_iter().map(Into::into).collect(),
            qualified,
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn symbols(&self) -> &BTreeSet<String> {
        &self.symbols
    }

    /// Insert the namespace name before `::symbol` for every tabled symbol.
    pub fn qualify<'l>(&self, line: &'l str) -> Cow<'l, str> {
        if self.symbols.is_empty() {
            return Cow::Borrowed(line);
        }
        BARE_REFERENCE.replace_all(line, |caps: &Captures| {
            if self.symbols.contains(&caps[2]) {
                format!("{}{}::{}", &caps[1], self.namespace, &caps[2])
            } else {
                caps[0].to_string()
            }
        })
    }

    /// Strip `NAME::` wherever it follows a boundary, undoing [`qualify`].
    ///
    /// [`qualify`]: SymbolQualifier::qualify
    pub fn unqualify<'l>(&self, line: &'l str) -> Cow<'l, str> {
        self.qualified.replace_all(line, "${1}::")
    }
}
