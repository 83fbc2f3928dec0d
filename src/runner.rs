//! Query runner: executes catalog operations over one database connection.

use crate::catalog::{Operation, ResultShape};
use crate::config::ConnectionConfig;
use crate::db::{self, DatabaseBackend, DatabaseClient, QueryResult, Value};
use crate::error::{ReportError, Result};
use crate::report::{Report, ReportEntry};
use crate::safety;
use tracing::{debug, info, warn};

/// Runs the fitness-club query catalog.
///
/// A runner always holds a live client: construction fails instead of
/// producing a disconnected runner. Dropping the runner releases the
/// connection, so error paths clean up without an explicit `close`.
pub struct QueryRunner {
    client: Box<dyn DatabaseClient>,
}

impl QueryRunner {
    /// Connects to the configured database.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        info!("Connecting to {}", config.display_string());
        let client = db::connect(config).await?;
        info!("Database connection established");
        Ok(Self { client })
    }

    /// Wraps an already connected client.
    pub fn with_client(client: Box<dyn DatabaseClient>) -> Self {
        Self { client }
    }

    pub fn backend(&self) -> DatabaseBackend {
        self.client.backend()
    }

    /// Executes one operation and returns its rows unmodified.
    ///
    /// Errors carry the operation key.
    pub async fn run(&self, op: Operation, params: &[Value]) -> Result<QueryResult> {
        if params.len() != op.param_count() {
            return Err(ReportError::internal(format!(
                "{op} expects {} parameter(s), got {}",
                op.param_count(),
                params.len()
            )));
        }

        let backend = self.backend();
        let sql = op.sql(backend);
        safety::ensure_read_only(sql, backend).map_err(|e| e.for_operation(op.key()))?;

        let result = self
            .client
            .execute(sql, params)
            .await
            .map_err(|e| e.for_operation(op.key()))?;

        debug!(
            "{op}: {} row(s) in {:?}",
            result.row_count(),
            result.execution_time
        );
        Ok(result)
    }

    /// Executes a scalar operation and returns the first cell as text.
    pub async fn run_scalar(&self, op: Operation, params: &[Value]) -> Result<String> {
        let result = self.run(op, params).await?;
        match result.scalar() {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => {
                warn!("{op}: expected a text status, got {other:?}");
                Ok(other.to_display_string())
            }
            None => Err(ReportError::query(op.key(), "statement returned no rows")),
        }
    }

    /// Whether any instructor exists.
    pub async fn check_instructors_exist(&self) -> Result<String> {
        self.run_scalar(Operation::InstructorsExist, &[]).await
    }

    /// Whether the section has any recorded visit.
    pub async fn check_visitors_in_section(&self, section_id: i64) -> Result<String> {
        self.run_scalar(Operation::VisitorsInSection, &[Value::Int(section_id)])
            .await
    }

    /// Visitors who attended a session earlier than some afternoon session.
    pub async fn visitors_attended_earlier_than_afternoon_sessions(&self) -> Result<QueryResult> {
        self.run(Operation::VisitorsBeforeAfternoon, &[]).await
    }

    /// Instructors whose section starts at 15:00.
    pub async fn instructors_with_sessions_at_3pm(&self) -> Result<QueryResult> {
        self.run(Operation::InstructorsAtThreePm, &[]).await
    }

    /// Visitors who attended every section starting before noon.
    pub async fn visitors_attended_all_morning_sessions(&self) -> Result<QueryResult> {
        self.run(Operation::VisitorsAllMornings, &[]).await
    }

    /// Instructors whose section equals every morning section and some evening section.
    pub async fn instructors_with_all_morning_and_any_evening(&self) -> Result<QueryResult> {
        self.run(Operation::InstructorsAllMorningsAnyEvening, &[])
            .await
    }

    /// Distinct instructor and visitor names.
    pub async fn unique_names_instructors_visitors(&self) -> Result<QueryResult> {
        self.run(Operation::UniqueNames, &[]).await
    }

    /// Instructor and visitor names, duplicates kept.
    pub async fn all_names_instructors_visitors(&self) -> Result<QueryResult> {
        self.run(Operation::AllNames, &[]).await
    }

    pub async fn inner_join_visits_sections(&self) -> Result<QueryResult> {
        self.run(Operation::InnerJoin, &[]).await
    }

    pub async fn left_join_visitors_sections(&self) -> Result<QueryResult> {
        self.run(Operation::LeftJoin, &[]).await
    }

    pub async fn right_join_visitors_sections(&self) -> Result<QueryResult> {
        self.run(Operation::RightJoin, &[]).await
    }

    pub async fn full_join_visitors_sections(&self) -> Result<QueryResult> {
        self.run(Operation::FullJoin, &[]).await
    }

    /// Runs every operation in catalog order and collects the results.
    ///
    /// Stops at the first failing operation.
    pub async fn run_all(&self, section_id: i64) -> Result<Report> {
        let mut report = Report::new();

        for op in Operation::ALL {
            let params = match op {
                Operation::VisitorsInSection => vec![Value::Int(section_id)],
                _ => Vec::new(),
            };

            let entry = match op.shape() {
                ResultShape::Scalar => ReportEntry::Status(self.run_scalar(op, &params).await?),
                ResultShape::Rows => ReportEntry::Rows(self.run(op, &params).await?),
            };
            report.insert(op.key(), entry);
        }

        info!("Ran {} catalog operations", report.len());
        Ok(report)
    }

    /// Closes the connection.
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        info!("Database connection closed");
        Ok(())
    }
}
