//! Dynamic SELECT construction with bound values.

use press_core::PressResult;
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::{Encode, FromRow, MySql, QueryBuilder, Type};

/// Builds `SELECT ... FROM ... WHERE a = ? AND b IN (?, ?) ORDER BY ... LIMIT ?`.
///
/// Column and table names are trusted input; values are always bound.
pub(crate) struct Select<'args> {
    qb: QueryBuilder<'args, MySql>,
    has_where: bool,
}

impl<'args> Select<'args> {
    pub(crate) fn new(columns: &str, table: &str) -> Self {
        Self {
            qb: QueryBuilder::new(format!("SELECT {} FROM {}", columns, table)),
            has_where: false,
        }
    }

    fn clause(&mut self) {
        self.qb.push(if self.has_where { " AND " } else { " WHERE " });
        self.has_where = true;
    }

    pub(crate) fn eq<T>(&mut self, column: &str, value: T) -> &mut Self
    where
        T: 'args + Encode<'args, MySql> + Type<MySql> + Send,
    {
        self.clause();
        self.qb.push(column).push(" = ").push_bind(value);
        self
    }

    pub(crate) fn eq_opt<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, MySql> + Type<MySql> + Send,
    {
        if let Some(value) = value {
            self.eq(column, value);
        }
        self
    }

    /// Adds `column IN (...)`. Callers short-circuit empty lists before building.
    pub(crate) fn is_in<T, I>(&mut self, column: &str, values: I) -> &mut Self
    where
        T: 'args + Encode<'args, MySql> + Type<MySql> + Send,
        I: IntoIterator<Item = T>,
    {
        self.clause();
        self.qb.push(column).push(" IN (");
        let mut separated = self.qb.separated(", ");
        for value in values {
            separated.push_bind(value);
        }
        separated.push_unseparated(")");
        self
    }

    pub(crate) fn is_in_opt<T, I>(&mut self, column: &str, values: Option<I>) -> &mut Self
    where
        T: 'args + Encode<'args, MySql> + Type<MySql> + Send,
        I: IntoIterator<Item = T>,
    {
        if let Some(values) = values {
            self.is_in(column, values);
        }
        self
    }

    pub(crate) fn order_by(&mut self, columns: &str) -> &mut Self {
        self.qb.push(" ORDER BY ").push(columns);
        self
    }

    pub(crate) fn limit(&mut self, limit: Option<u32>) -> &mut Self {
        if let Some(limit) = limit {
            self.qb.push(" LIMIT ").push_bind(limit);
        }
        self
    }

    pub(crate) fn sql(&self) -> &str {
        self.qb.sql()
    }

    pub(crate) async fn fetch_as<R>(mut self, pool: &MySqlPool) -> PressResult<Vec<R>>
    where
        R: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
    {
        let rows = self.qb.build_query_as::<R>().fetch_all(pool).await?;
        Ok(rows)
    }

    pub(crate) async fn fetch_rows(mut self, pool: &MySqlPool) -> PressResult<Vec<MySqlRow>> {
        let rows = self.qb.build().fetch_all(pool).await?;
        Ok(rows)
    }
}
