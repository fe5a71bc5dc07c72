//! Declared table schemas and generic filtered reads.
//!
//! Extensions describe extra tables as [`EntitySchema`]s at construction;
//! the registry is immutable once shared. Reads through [`TableAccessor`]
//! may only reference declared entities and columns.

use crate::TableNames;
use async_trait::async_trait;
use press_core::{Interface, PressError, PressResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A row read through a [`TableAccessor`], keyed by column name.
pub type Record = serde_json::Map<String, Value>;

/// Storage class of a column, deciding how values are decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    /// BIGINT UNSIGNED and friends.
    Unsigned,
    /// Signed integers.
    Integer,
    /// Character data, including dates read as text.
    Text,
}

/// A declared column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub kind: ColumnKind,
}

/// A declared entity backed by one prefixed table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Name callers use to address the entity.
    pub name: String,
    /// Table name without prefix.
    pub table: String,
    /// Column rows are ordered by.
    pub primary_key: String,
    pub columns: Vec<ColumnDef>,
}

impl EntitySchema {
    /// Starts a schema for `table`, addressed as `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, table: impl Into<String>, primary_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: table.into(),
            primary_key: primary_key.into(),
            columns: Vec::new(),
        }
    }

    /// Declares a column.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>, kind: ColumnKind) -> Self {
        self.columns.push(ColumnDef {
            name: name.into(),
            kind,
        });
        self
    }

    /// Looks up a declared column.
    #[must_use]
    pub fn column_def(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    fn check(&self) -> PressResult<()> {
        for ident in [&self.name, &self.table, &self.primary_key] {
            if !is_identifier(ident) {
                return Err(PressError::Configuration(format!(
                    "Schema '{}': '{}' is not a valid identifier",
                    self.name, ident
                )));
            }
        }
        if self.columns.is_empty() {
            return Err(PressError::Configuration(format!("Schema '{}' declares no columns", self.name)));
        }
        for column in &self.columns {
            if !is_identifier(&column.name) {
                return Err(PressError::Configuration(format!(
                    "Schema '{}': '{}' is not a valid column name",
                    self.name, column.name
                )));
            }
        }
        if self.column_def(&self.primary_key).is_none() {
            return Err(PressError::Configuration(format!(
                "Schema '{}': primary key '{}' is not a declared column",
                self.name, self.primary_key
            )));
        }
        Ok(())
    }

    /// Schemas of the five content tables.
    #[must_use]
    pub fn core_schemas() -> Vec<Self> {
        use ColumnKind::{Integer, Text, Unsigned};

        vec![
            Self::new("posts", TableNames::POSTS, "ID")
                .column("ID", Unsigned)
                .column("post_author", Unsigned)
                .column("post_date", Text)
                .column("post_modified", Text)
                .column("post_title", Text)
                .column("post_content", Text)
                .column("post_excerpt", Text)
                .column("post_status", Text)
                .column("post_type", Text)
                .column("post_name", Text)
                .column("post_parent", Unsigned)
                .column("menu_order", Integer)
                .column("guid", Text),
            Self::new("postmeta", TableNames::POSTMETA, "meta_id")
                .column("meta_id", Unsigned)
                .column("post_id", Unsigned)
                .column("meta_key", Text)
                .column("meta_value", Text),
            Self::new("terms", TableNames::TERMS, "term_id")
                .column("term_id", Unsigned)
                .column("name", Text)
                .column("slug", Text)
                .column("term_group", Integer),
            Self::new("term_taxonomy", TableNames::TERM_TAXONOMY, "term_taxonomy_id")
                .column("term_taxonomy_id", Unsigned)
                .column("term_id", Unsigned)
                .column("taxonomy", Text)
                .column("description", Text)
                .column("parent", Unsigned)
                .column("count", Integer),
            Self::new("term_relationships", TableNames::TERM_RELATIONSHIPS, "object_id")
                .column("object_id", Unsigned)
                .column("term_taxonomy_id", Unsigned)
                .column("term_order", Integer),
        ]
    }
}

fn is_identifier(value: &str) -> bool {
    !value.is_empty() && value.len() <= 64 && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Registry of declared entities.
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    schemas: BTreeMap<String, EntitySchema>,
}

impl TableRegistry {
    /// Creates a registry holding only the content tables.
    #[must_use]
    pub fn with_core_schemas() -> Self {
        let schemas = EntitySchema::core_schemas()
            .into_iter()
            .map(|schema| (schema.name.clone(), schema))
            .collect();
        Self { schemas }
    }

    /// Declares an entity. Names must be unique.
    pub fn register(&mut self, schema: EntitySchema) -> PressResult<()> {
        schema.check()?;
        if self.schemas.contains_key(&schema.name) {
            return Err(PressError::Configuration(format!(
                "Entity '{}' is already registered",
                schema.name
            )));
        }
        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Looks up an entity, failing with `Validation` if it was never declared.
    pub fn get(&self, name: &str) -> PressResult<&EntitySchema> {
        self.schemas
            .get(name)
            .ok_or_else(|| PressError::Validation(format!("Unknown entity '{}'", name)))
    }

    /// Returns the declared entity names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// A value compared against a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Unsigned(u64),
    Integer(i64),
    Text(String),
}

impl FilterValue {
    /// Converts to the JSON form records carry.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Unsigned(v) => Value::from(*v),
            Self::Integer(v) => Value::from(*v),
            Self::Text(v) => Value::from(v.as_str()),
        }
    }

    /// Checks the value against a column kind.
    fn fits(&self, kind: ColumnKind) -> bool {
        match (self, kind) {
            (Self::Text(_), ColumnKind::Text) | (Self::Unsigned(_), ColumnKind::Unsigned) => true,
            (Self::Integer(v), ColumnKind::Unsigned) => *v >= 0,
            (Self::Unsigned(v), ColumnKind::Integer) => i64::try_from(*v).is_ok(),
            (Self::Integer(_), ColumnKind::Integer) => true,
            _ => false,
        }
    }
}

/// Equality condition on one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFilter {
    pub column: String,
    pub value: FilterValue,
}

impl ColumnFilter {
    #[must_use]
    pub fn eq(column: impl Into<String>, value: FilterValue) -> Self {
        Self {
            column: column.into(),
            value,
        }
    }
}

/// Checks every filter against the schema.
pub(crate) fn check_filters(schema: &EntitySchema, filters: &[ColumnFilter]) -> PressResult<()> {
    for filter in filters {
        let column = schema.column_def(&filter.column).ok_or_else(|| {
            PressError::Validation(format!(
                "Entity '{}' has no column '{}'",
                schema.name, filter.column
            ))
        })?;
        if !filter.value.fits(column.kind) {
            return Err(PressError::Validation(format!(
                "Value {:?} does not fit column '{}.{}'",
                filter.value, schema.name, column.name
            )));
        }
    }
    Ok(())
}

/// Generic filtered reads over declared entities.
#[async_trait]
pub trait TableAccessor: Interface + Send + Sync {
    /// Returns the registry this accessor validates against.
    fn registry(&self) -> &TableRegistry;

    /// Reads every row of `entity` matching all filters, ordered by primary key.
    async fn select(&self, entity: &str, filters: &[ColumnFilter]) -> PressResult<Vec<Record>>;
}
