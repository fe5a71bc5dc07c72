//! MySQL generic table accessor.

use super::select::Select;
use crate::schema::check_filters;
use crate::{
    ColumnFilter, ColumnKind, DatabasePoolInterface, EntitySchema, FilterValue, Record, TableAccessor,
    TableNames, TableRegistry,
};
use async_trait::async_trait;
use press_core::PressResult;
use serde_json::Value;
use sqlx::mysql::MySqlRow;
use sqlx::Row;
use std::sync::Arc;
use tracing::debug;

/// Reads declared entities through prefixed, back-quoted identifiers.
///
/// Every column is cast to a uniform SQL type per [`ColumnKind`], so dates and
/// narrow integers decode the same way as the core columns.
pub struct MySqlTableAccessor {
    pool: Arc<dyn DatabasePoolInterface>,
    tables: TableNames,
    registry: Arc<TableRegistry>,
}

impl MySqlTableAccessor {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>, tables: TableNames, registry: Arc<TableRegistry>) -> Self {
        Self {
            pool,
            tables,
            registry,
        }
    }
}

fn select_list(schema: &EntitySchema) -> String {
    schema
        .columns
        .iter()
        .map(|column| {
            let cast = match column.kind {
                ColumnKind::Unsigned => "UNSIGNED",
                ColumnKind::Integer => "SIGNED",
                ColumnKind::Text => "CHAR",
            };
            format!("CAST(`{0}` AS {1}) AS `{0}`", column.name, cast)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn decode(row: &MySqlRow, schema: &EntitySchema) -> PressResult<Record> {
    let mut record = Record::new();
    for column in &schema.columns {
        let name = column.name.as_str();
        let value = match column.kind {
            ColumnKind::Unsigned => row.try_get::<Option<u64>, _>(name)?.map_or(Value::Null, Value::from),
            ColumnKind::Integer => row.try_get::<Option<i64>, _>(name)?.map_or(Value::Null, Value::from),
            ColumnKind::Text => row.try_get::<Option<String>, _>(name)?.map_or(Value::Null, Value::from),
        };
        record.insert(column.name.clone(), value);
    }
    Ok(record)
}

#[async_trait]
impl TableAccessor for MySqlTableAccessor {
    fn registry(&self) -> &TableRegistry {
        &self.registry
    }

    async fn select(&self, entity: &str, filters: &[ColumnFilter]) -> PressResult<Vec<Record>> {
        let schema = self.registry.get(entity)?;
        check_filters(schema, filters)?;

        let mut select = Select::new(&select_list(schema), &self.tables.table(&schema.table));
        for filter in filters {
            let column = format!("`{}`", filter.column);
            match &filter.value {
                FilterValue::Unsigned(v) => select.eq(&column, *v),
                FilterValue::Integer(v) => select.eq(&column, *v),
                FilterValue::Text(v) => select.eq(&column, v.clone()),
            };
        }
        select.order_by(&format!("`{}` ASC", schema.primary_key));
        debug!("Selecting {}: {}", entity, select.sql());

        let rows = select.fetch_rows(self.pool.inner()).await?;
        rows.iter().map(|row| decode(row, schema)).collect()
    }
}
