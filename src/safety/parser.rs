//! SQL parsing and classification logic.
//!
//! Uses sqlparser-rs with the dialect of the target backend.

use sqlparser::ast::{Query, Select, SetExpr, Statement, TableFactor, TableWithJoins};
use sqlparser::dialect::{Dialect, PostgreSqlDialect, SQLiteDialect};
use sqlparser::parser::Parser;
use tracing::debug;

use crate::db::DatabaseBackend;
use crate::error::{ReportError, Result};

use super::SafetyLevel;

/// SQL classifier for one backend dialect.
#[derive(Debug)]
pub struct SqlClassifier {
    backend: DatabaseBackend,
}

impl SqlClassifier {
    /// Creates a classifier using the dialect of `backend`.
    pub fn new(backend: DatabaseBackend) -> Self {
        Self { backend }
    }

    fn dialect(&self) -> Box<dyn Dialect> {
        match self.backend {
            DatabaseBackend::Postgres => Box::new(PostgreSqlDialect {}),
            DatabaseBackend::Sqlite => Box::new(SQLiteDialect {}),
        }
    }

    /// Classifies a SQL string.
    ///
    /// SQL that cannot be parsed, or an empty string, is destructive.
    pub fn classify(&self, sql: &str) -> SafetyLevel {
        let dialect = self.dialect();
        match Parser::parse_sql(dialect.as_ref(), sql) {
            Ok(statements) => statements
                .iter()
                .map(classify_statement)
                .max()
                .unwrap_or(SafetyLevel::Destructive),
            Err(e) => {
                debug!("Could not parse SQL for classification: {e}");
                SafetyLevel::Destructive
            }
        }
    }
}

/// Convenience function to classify SQL without keeping a classifier around.
pub fn classify_sql(sql: &str, backend: DatabaseBackend) -> SafetyLevel {
    SqlClassifier::new(backend).classify(sql)
}

/// Fails unless `sql` is read-only in the dialect of `backend`.
pub fn ensure_read_only(sql: &str, backend: DatabaseBackend) -> Result<()> {
    let level = classify_sql(sql, backend);
    if level.is_read_only() {
        Ok(())
    } else {
        Err(ReportError::query(
            "sql",
            format!("Refusing to run a statement classified as {level}"),
        ))
    }
}

/// Classifies a single parsed statement.
fn classify_statement(statement: &Statement) -> SafetyLevel {
    match statement {
        Statement::Query(query) => classify_query(query),
        Statement::Insert(_) | Statement::Update { .. } | Statement::Merge { .. } => {
            SafetyLevel::Mutating
        }
        _ => SafetyLevel::Destructive,
    }
}

/// Classifies a Query, including data-modifying CTEs.
fn classify_query(query: &Query) -> SafetyLevel {
    let cte_level = query
        .with
        .iter()
        .flat_map(|with| with.cte_tables.iter())
        .map(|cte| classify_query(&cte.query))
        .max()
        .unwrap_or(SafetyLevel::Safe);

    cte_level.max(classify_set_expr(&query.body))
}

fn classify_set_expr(set_expr: &SetExpr) -> SafetyLevel {
    match set_expr {
        SetExpr::Insert(stmt) | SetExpr::Update(stmt) => classify_statement(stmt),
        SetExpr::Query(query) => classify_query(query),
        SetExpr::Select(select) => classify_select(select),
        SetExpr::SetOperation { left, right, .. } => {
            classify_set_expr(left).max(classify_set_expr(right))
        }
        SetExpr::Values(_) | SetExpr::Table(_) => SafetyLevel::Safe,
    }
}

/// Classifies a Select by checking its FROM clause for derived tables.
fn classify_select(select: &Select) -> SafetyLevel {
    select
        .from
        .iter()
        .map(classify_table_with_joins)
        .max()
        .unwrap_or(SafetyLevel::Safe)
}

fn classify_table_with_joins(twj: &TableWithJoins) -> SafetyLevel {
    twj.joins
        .iter()
        .map(|join| classify_table_factor(&join.relation))
        .fold(classify_table_factor(&twj.relation), SafetyLevel::max)
}

fn classify_table_factor(factor: &TableFactor) -> SafetyLevel {
    match factor {
        TableFactor::Derived { subquery, .. } => classify_query(subquery),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => classify_table_with_joins(table_with_joins),
        _ => SafetyLevel::Safe,
    }
}
