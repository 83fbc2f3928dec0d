//! The fitness-club query catalog.
//!
//! Every report operation is a fixed, named statement template. Parameters
//! are positional placeholders (`$1` on PostgreSQL, `?` on SQLite) and are
//! always bound by the driver.
//!
//! PostgreSQL statements use the quantified comparisons (`ANY`, `SOME`,
//! `ALL`) as written. SQLite has no quantified comparisons, so its texts
//! use `EXISTS` / `IN` forms with the same truth table for non-NULL keys.

use crate::db::DatabaseBackend;
use std::fmt;

/// Status produced when at least one instructor exists.
pub const INSTRUCTORS_EXIST: &str = "Существуют";
/// Status produced when the instructors table is empty.
pub const INSTRUCTORS_MISSING: &str = "Не существуют";
/// Status produced when the section has at least one visit.
pub const VISITORS_EXIST: &str = "Посетители существуют";
/// Status produced when the section has no visits.
pub const VISITORS_MISSING: &str = "Посетителей нет";

/// What an operation returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// First column of the first row.
    Scalar,
    /// The full row set.
    Rows,
}

/// A named report operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    InstructorsExist,
    VisitorsInSection,
    VisitorsBeforeAfternoon,
    InstructorsAtThreePm,
    VisitorsAllMornings,
    InstructorsAllMorningsAnyEvening,
    UniqueNames,
    AllNames,
    InnerJoin,
    LeftJoin,
    RightJoin,
    FullJoin,
}

impl Operation {
    /// All operations in report order.
    pub const ALL: [Operation; 12] = [
        Operation::InstructorsExist,
        Operation::VisitorsInSection,
        Operation::VisitorsBeforeAfternoon,
        Operation::InstructorsAtThreePm,
        Operation::VisitorsAllMornings,
        Operation::InstructorsAllMorningsAnyEvening,
        Operation::UniqueNames,
        Operation::AllNames,
        Operation::InnerJoin,
        Operation::LeftJoin,
        Operation::RightJoin,
        Operation::FullJoin,
    ];

    /// Key under which the operation's result appears in the report.
    pub fn key(&self) -> &'static str {
        match self {
            Self::InstructorsExist => "exists_instructors",
            Self::VisitorsInSection => "exists_visitors",
            Self::VisitorsBeforeAfternoon => "any_query",
            Self::InstructorsAtThreePm => "some_query",
            Self::VisitorsAllMornings => "all_query",
            Self::InstructorsAllMorningsAnyEvening => "any_all_combination",
            Self::UniqueNames => "union_query",
            Self::AllNames => "union_all_query",
            Self::InnerJoin => "inner_join_query",
            Self::LeftJoin => "left_join_query",
            Self::RightJoin => "right_join_query",
            Self::FullJoin => "full_join_query",
        }
    }

    /// Looks an operation up by its report key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.key() == key)
    }

    pub fn shape(&self) -> ResultShape {
        match self {
            Self::InstructorsExist | Self::VisitorsInSection => ResultShape::Scalar,
            _ => ResultShape::Rows,
        }
    }

    /// Number of positional parameters the statement expects.
    pub fn param_count(&self) -> usize {
        match self {
            Self::VisitorsInSection => 1,
            _ => 0,
        }
    }

    /// Statement text for the given backend.
    pub fn sql(&self, backend: DatabaseBackend) -> &'static str {
        match (self, backend) {
            (Self::InstructorsExist, _) => INSTRUCTORS_EXIST_SQL,
            (Self::VisitorsInSection, DatabaseBackend::Postgres) => VISITORS_IN_SECTION_PG,
            (Self::VisitorsInSection, DatabaseBackend::Sqlite) => VISITORS_IN_SECTION_SQLITE,
            (Self::VisitorsBeforeAfternoon, DatabaseBackend::Postgres) => BEFORE_AFTERNOON_PG,
            (Self::VisitorsBeforeAfternoon, DatabaseBackend::Sqlite) => BEFORE_AFTERNOON_SQLITE,
            (Self::InstructorsAtThreePm, DatabaseBackend::Postgres) => AT_THREE_PM_PG,
            (Self::InstructorsAtThreePm, DatabaseBackend::Sqlite) => AT_THREE_PM_SQLITE,
            (Self::VisitorsAllMornings, _) => ALL_MORNINGS_SQL,
            (Self::InstructorsAllMorningsAnyEvening, DatabaseBackend::Postgres) => {
                MORNINGS_AND_EVENING_PG
            }
            (Self::InstructorsAllMorningsAnyEvening, DatabaseBackend::Sqlite) => {
                MORNINGS_AND_EVENING_SQLITE
            }
            (Self::UniqueNames, _) => UNION_SQL,
            (Self::AllNames, _) => UNION_ALL_SQL,
            (Self::InnerJoin, _) => INNER_JOIN_SQL,
            (Self::LeftJoin, _) => LEFT_JOIN_SQL,
            (Self::RightJoin, _) => RIGHT_JOIN_SQL,
            (Self::FullJoin, _) => FULL_JOIN_SQL,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

const INSTRUCTORS_EXIST_SQL: &str = r#"
SELECT CASE WHEN EXISTS (
    SELECT 1 FROM instructors
) THEN 'Существуют' ELSE 'Не существуют' END AS instructors_exist
"#;

const VISITORS_IN_SECTION_PG: &str = r#"
SELECT CASE WHEN EXISTS (
    SELECT 1 FROM visits WHERE section_id = $1
) THEN 'Посетители существуют' ELSE 'Посетителей нет' END AS visitor_status
"#;

const VISITORS_IN_SECTION_SQLITE: &str = r#"
SELECT CASE WHEN EXISTS (
    SELECT 1 FROM visits WHERE section_id = ?
) THEN 'Посетители существуют' ELSE 'Посетителей нет' END AS visitor_status
"#;

// Visitors with a visit that starts before at least one afternoon session.
const BEFORE_AFTERNOON_PG: &str = r#"
SELECT first_name, last_name
FROM visitors v
WHERE EXISTS (
    SELECT 1 FROM visits vi
    JOIN sections s ON vi.section_id = s.id
    WHERE vi.visitor_id = v.id AND s.start_time < ANY (
        SELECT start_time FROM sections WHERE start_time >= '12:00:00'
    )
)
"#;

const BEFORE_AFTERNOON_SQLITE: &str = r#"
SELECT first_name, last_name
FROM visitors v
WHERE EXISTS (
    SELECT 1 FROM visits vi
    JOIN sections s ON vi.section_id = s.id
    WHERE vi.visitor_id = v.id AND EXISTS (
        SELECT 1 FROM sections pm
        WHERE pm.start_time >= '12:00:00' AND s.start_time < pm.start_time
    )
)
"#;

// The subquery selects the outer instructor's own section id, so the
// comparison holds for every instructor with a section as soon as any
// 15:00 section exists.
const AT_THREE_PM_PG: &str = r#"
SELECT first_name, last_name
FROM instructors i
WHERE i.section_id = SOME (
    SELECT i.section_id FROM sections WHERE start_time = '15:00:00'
)
"#;

const AT_THREE_PM_SQLITE: &str = r#"
SELECT first_name, last_name
FROM instructors i
WHERE i.section_id IN (
    SELECT i.section_id FROM sections WHERE start_time = '15:00:00'
)
"#;

// Relational division: no morning section without a visit by v.
const ALL_MORNINGS_SQL: &str = r#"
SELECT first_name, last_name
FROM visitors v
WHERE NOT EXISTS (
    SELECT 1 FROM sections s
    WHERE s.start_time < '12:00:00'
    AND NOT EXISTS (
        SELECT 1 FROM visits vi WHERE vi.visitor_id = v.id AND vi.section_id = s.id
    )
)
"#;

// Both subqueries project the outer `i.section_id`: the result is every
// instructor with a section, provided some evening section exists.
const MORNINGS_AND_EVENING_PG: &str = r#"
SELECT first_name, last_name
FROM instructors i
WHERE i.section_id = ALL (
    SELECT i.section_id FROM sections WHERE start_time < '12:00:00'
) AND i.section_id = SOME (
    SELECT i.section_id FROM sections WHERE start_time >= '17:00:00'
)
"#;

// `= ALL` is true on an empty subquery and false when any element differs
// or the key is NULL.
const MORNINGS_AND_EVENING_SQLITE: &str = r#"
SELECT first_name, last_name
FROM instructors i
WHERE NOT EXISTS (
    SELECT 1 FROM sections am
    WHERE am.start_time < '12:00:00'
    AND (i.section_id IS NULL OR i.section_id <> i.section_id)
) AND i.section_id IN (
    SELECT i.section_id FROM sections WHERE start_time >= '17:00:00'
)
"#;

const UNION_SQL: &str = r#"
SELECT first_name, last_name FROM instructors
UNION
SELECT first_name, last_name FROM visitors
"#;

const UNION_ALL_SQL: &str = r#"
SELECT first_name, last_name FROM instructors
UNION ALL
SELECT first_name, last_name FROM visitors
"#;

const INNER_JOIN_SQL: &str = r#"
SELECT v.first_name, v.last_name, s.section_name
FROM visitors v
INNER JOIN visits vi ON v.id = vi.visitor_id
INNER JOIN sections s ON vi.section_id = s.id
"#;

const LEFT_JOIN_SQL: &str = r#"
SELECT v.first_name, v.last_name, s.section_name
FROM visitors v
LEFT JOIN visits vi ON v.id = vi.visitor_id
LEFT JOIN sections s ON vi.section_id = s.id
"#;

const RIGHT_JOIN_SQL: &str = r#"
SELECT v.first_name, v.last_name, s.section_name
FROM visitors v
RIGHT JOIN visits vi ON v.id = vi.visitor_id
RIGHT JOIN sections s ON vi.section_id = s.id
"#;

const FULL_JOIN_SQL: &str = r#"
SELECT v.first_name, v.last_name, s.section_name
FROM visitors v
FULL JOIN visits vi ON v.id = vi.visitor_id
FULL JOIN sections s ON vi.section_id = s.id
"#;
