//! Executing compiled queries against Postgres.

use crate::client::GenericClient;
use crate::error::SpecResult;
use crate::fields::FieldMap;
use crate::spec::Spec;
use crate::value::Value;
use crate::visitor::compile;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A fully compiled query: assembled SQL text plus its positional arguments.
///
/// # Example
///
/// ```ignore
/// use pgspec::{FieldMap, Query, spec};
///
/// let fields = FieldMap::new().with("name", "full_name");
/// let filter = spec::and([spec::equal("name", "alice"), spec::limit(1)]);
///
/// let user = Query::from_spec("SELECT * FROM users", Some(&filter), &fields)
///     .fetch_one(&client)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    sql: String,
    args: Vec<Value>,
}

impl Query {
    /// Compile a specification tree against a base query.
    ///
    /// An absent tree produces the base query unchanged with no arguments.
    pub fn from_spec(base: &str, spec: Option<&Spec>, fields: &FieldMap) -> Self {
        let (sql, args) = compile(base, spec, fields);
        Self { sql, args }
    }

    /// Wrap already-assembled SQL and arguments.
    pub fn new(sql: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// The assembled query text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The positional arguments, in `$1, $2, ...` order.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    fn params(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.args.iter().map(|v| v as &(dyn ToSql + Sync)).collect()
    }

    fn trace(&self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %self.sql, params = self.args.len(), "executing query");
    }

    /// Execute and return all rows.
    pub async fn fetch_all(&self, conn: &impl GenericClient) -> SpecResult<Vec<Row>> {
        self.trace();
        conn.query(&self.sql, &self.params()).await
    }

    /// Execute and return the first row; `NotFound` when there are none.
    pub async fn fetch_one(&self, conn: &impl GenericClient) -> SpecResult<Row> {
        self.trace();
        conn.query_one(&self.sql, &self.params()).await
    }

    /// Execute and return the first row, if any.
    pub async fn fetch_opt(&self, conn: &impl GenericClient) -> SpecResult<Option<Row>> {
        self.trace();
        conn.query_opt(&self.sql, &self.params()).await
    }

    /// Execute and return the number of affected rows.
    pub async fn execute(&self, conn: &impl GenericClient) -> SpecResult<u64> {
        self.trace();
        conn.execute(&self.sql, &self.params()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec;

    #[test]
    fn from_spec_compiles() {
        let fields = FieldMap::new().with("id", "user_id");
        let query = Query::from_spec(
            "SELECT * FROM users",
            Some(&spec::equal("id", 7i64)),
            &fields,
        );
        assert_eq!(query.sql(), "SELECT * FROM users WHERE user_id = $1");
        assert_eq!(query.args(), &[Value::Int(7)]);
    }

    #[test]
    fn from_spec_without_tree_is_base() {
        let query = Query::from_spec("SELECT 1", None, &FieldMap::new());
        assert_eq!(query.sql(), "SELECT 1");
        assert!(query.args().is_empty());
    }
}
