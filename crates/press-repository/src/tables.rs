//! Prefixed table names.

use press_core::{rules, PressError, PressResult};

/// Table names of one content store, resolved once from the configured prefix.
///
/// Every accessor returns a back-quoted identifier ready to splice into SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    prefix: String,
}

impl TableNames {
    pub const POSTS: &'static str = "posts";
    pub const POSTMETA: &'static str = "postmeta";
    pub const TERMS: &'static str = "terms";
    pub const TERM_TAXONOMY: &'static str = "term_taxonomy";
    pub const TERM_RELATIONSHIPS: &'static str = "term_relationships";

    /// Creates the name set for `prefix`.
    ///
    /// Fails with `Configuration` if the prefix is not a valid identifier fragment.
    pub fn new(prefix: impl Into<String>) -> PressResult<Self> {
        let prefix = prefix.into();
        rules::table_prefix(&prefix).map_err(|_| {
            PressError::Configuration(format!("Invalid table prefix '{}'", prefix))
        })?;
        Ok(Self { prefix })
    }

    /// Returns the raw prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the quoted name of an arbitrary table.
    ///
    /// `table` must already be a validated identifier.
    #[must_use]
    pub fn table(&self, table: &str) -> String {
        format!("`{}{}`", self.prefix, table)
    }

    #[must_use]
    pub fn posts(&self) -> String {
        self.table(Self::POSTS)
    }

    #[must_use]
    pub fn postmeta(&self) -> String {
        self.table(Self::POSTMETA)
    }

    #[must_use]
    pub fn terms(&self) -> String {
        self.table(Self::TERMS)
    }

    #[must_use]
    pub fn term_taxonomy(&self) -> String {
        self.table(Self::TERM_TAXONOMY)
    }

    #[must_use]
    pub fn term_relationships(&self) -> String {
        self.table(Self::TERM_RELATIONSHIPS)
    }
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            prefix: "wp_".to_string(),
        }
    }
}
