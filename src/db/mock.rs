//! Mock database clients for testing.
//!
//! `MockDatabaseClient` returns a canned result and records every statement
//! it receives; `FailingDatabaseClient` rejects every statement.

use super::{ColumnInfo, DatabaseBackend, DatabaseClient, QueryResult, Value};
use crate::error::{ReportError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// A statement as received by the mock client.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutedStatement {
    pub sql: String,
    pub params: Vec<Value>,
}

/// A mock database client that returns a predefined result.
pub struct MockDatabaseClient {
    backend: DatabaseBackend,
    result: QueryResult,
    executed: Arc<Mutex<Vec<ExecutedStatement>>>,
}

impl MockDatabaseClient {
    /// Creates a mock that answers every statement with a single text cell.
    pub fn new(backend: DatabaseBackend) -> Self {
        Self::with_result(
            backend,
            QueryResult::with_data(
                vec![ColumnInfo::new("result", "TEXT")],
                vec![vec![Value::from("mock")]],
            ),
        )
    }

    /// Creates a mock that answers every statement with `result`.
    pub fn with_result(backend: DatabaseBackend, result: QueryResult) -> Self {
        Self {
            backend,
            result,
            executed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns a handle to the log of executed statements.
    ///
    /// The handle stays valid after the client has been moved into a runner.
    pub fn executed(&self) -> Arc<Mutex<Vec<ExecutedStatement>>> {
        Arc::clone(&self.executed)
    }
}

#[async_trait]
impl DatabaseClient for MockDatabaseClient {
    fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    async fn execute(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        self.executed
            .lock()
            .map_err(|_| ReportError::internal("mock statement log poisoned"))?
            .push(ExecutedStatement {
                sql: sql.to_string(),
                params: params.to_vec(),
            });
        Ok(self.result.clone())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A mock database client whose statements always fail.
pub struct FailingDatabaseClient {
    backend: DatabaseBackend,
    message: String,
}

impl FailingDatabaseClient {
    /// Creates a client that fails every statement with `message`.
    pub fn new(backend: DatabaseBackend, message: impl Into<String>) -> Self {
        Self {
            backend,
            message: message.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    fn backend(&self) -> DatabaseBackend {
        self.backend
    }

    async fn execute(&self, _sql: &str, _params: &[Value]) -> Result<QueryResult> {
        Err(ReportError::query("sql", self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
