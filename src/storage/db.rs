use chrono::{DateTime, Utc};
use rusqlite::{params, types::Type, Connection, Row};
use serde::Serialize;

use crate::{
    eligibility::{EligibilityAnswers, EligibilityOutcome, EligibilityResult, Readiness},
    error::Result,
    storage::models::{CaseRecord, ScreeningRecord},
};

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS cases (
                id TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS screenings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                case_id TEXT,
                answers TEXT NOT NULL,
                result TEXT NOT NULL,
                readiness TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_screenings_case ON screenings(case_id)",
            [],
        )?;

        Ok(())
    }

    pub fn save_case(&self, case: &CaseRecord) -> Result<()> {
        insert_case(&self.conn, case)
    }

    pub fn get_case(&self, id: &str) -> Result<Option<CaseRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, data, created_at, updated_at FROM cases WHERE id = ?1",
        )?;

        let mut cases = stmt.query_map([id], case_from_row)?;
        Ok(cases.next().transpose()?)
    }

    pub fn list_cases(&self) -> Result<Vec<CaseRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, data, created_at, updated_at FROM cases ORDER BY updated_at DESC",
        )?;

        let cases = stmt
            .query_map([], case_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(cases)
    }

    /// Returns whether a case was removed
    pub fn delete_case(&self, id: &str) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM screenings WHERE case_id = ?1", [id])?;
        let removed = tx.execute("DELETE FROM cases WHERE id = ?1", [id])?;
        tx.commit()?;
        Ok(removed > 0)
    }

    pub fn save_screening(
        &self,
        case_id: Option<&str>,
        answers: &EligibilityAnswers,
        outcome: &EligibilityOutcome,
    ) -> Result<i64> {
        insert_screening(&self.conn, case_id, answers, outcome)
    }

    /// Log a screening and store the updated case in one transaction
    pub fn record_screening(
        &self,
        case: &CaseRecord,
        answers: &EligibilityAnswers,
        outcome: &EligibilityOutcome,
    ) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        insert_case(&tx, case)?;
        let screening_id = insert_screening(&tx, Some(&case.id), answers, outcome)?;
        tx.commit()?;
        Ok(screening_id)
    }

    pub fn get_screening_history(&self, limit: Option<usize>) -> Result<Vec<ScreeningRecord>> {
        let query = if let Some(lim) = limit {
            format!(
                "SELECT id, case_id, answers, result, readiness, timestamp
                 FROM screenings
                 ORDER BY id DESC
                 LIMIT {}",
                lim
            )
        } else {
            "SELECT id, case_id, answers, result, readiness, timestamp
             FROM screenings
             ORDER BY id DESC"
                .to_string()
        };

        let mut stmt = self.conn.prepare(&query)?;

        let screenings = stmt
            .query_map([], screening_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(screenings)
    }

    pub fn get_stats(&self) -> Result<DatabaseStats> {
        let total_cases: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cases", [], |row| row.get(0))?;

        let total_screenings: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM screenings", [], |row| row.get(0))?;

        let count_result = |result: EligibilityResult| -> rusqlite::Result<i64> {
            self.conn.query_row(
                "SELECT COUNT(*) FROM screenings WHERE result = ?1",
                [result.as_str()],
                |row| row.get(0),
            )
        };

        let count_readiness = |readiness: Readiness| -> rusqlite::Result<i64> {
            self.conn.query_row(
                "SELECT COUNT(*) FROM screenings WHERE result = 'eligible' AND readiness = ?1",
                [readiness.as_str()],
                |row| row.get(0),
            )
        };

        Ok(DatabaseStats {
            total_cases: total_cases as usize,
            total_screenings: total_screenings as usize,
            eligible: count_result(EligibilityResult::Eligible)? as usize,
            needs_review: count_result(EligibilityResult::NeedsReview)? as usize,
            not_eligible: count_result(EligibilityResult::NotEligible)? as usize,
            eligible_ready: count_readiness(Readiness::Ready)? as usize,
            eligible_missing_info: count_readiness(Readiness::MissingInfo)? as usize,
            eligible_not_ready: count_readiness(Readiness::NotReady)? as usize,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatabaseStats {
    pub total_cases: usize,
    pub total_screenings: usize,
    pub eligible: usize,
    pub needs_review: usize,
    pub not_eligible: usize,
    pub eligible_ready: usize,
    pub eligible_missing_info: usize,
    pub eligible_not_ready: usize,
}

fn insert_case(conn: &Connection, case: &CaseRecord) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO cases (id, data, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            case.id,
            serde_json::to_string(&case.data)?,
            case.created_at.to_rfc3339(),
            case.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

fn insert_screening(
    conn: &Connection,
    case_id: Option<&str>,
    answers: &EligibilityAnswers,
    outcome: &EligibilityOutcome,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO screenings (case_id, answers, result, readiness, timestamp)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            case_id,
            serde_json::to_string(answers)?,
            outcome.result.as_str(),
            outcome.readiness.as_str(),
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn case_from_row(row: &Row<'_>) -> rusqlite::Result<CaseRecord> {
    let data: String = row.get(1)?;

    Ok(CaseRecord {
        id: row.get(0)?,
        data: serde_json::from_str(&data).map_err(|e| conversion_error(1, e))?,
        created_at: timestamp(row, 2)?,
        updated_at: timestamp(row, 3)?,
    })
}

fn screening_from_row(row: &Row<'_>) -> rusqlite::Result<ScreeningRecord> {
    let answers: String = row.get(2)?;
    let result: String = row.get(3)?;
    let readiness: String = row.get(4)?;

    Ok(ScreeningRecord {
        id: row.get(0)?,
        case_id: row.get(1)?,
        answers: serde_json::from_str(&answers).map_err(|e| conversion_error(2, e))?,
        outcome: EligibilityOutcome::new(
            result
                .parse::<EligibilityResult>()
                .map_err(|e| conversion_error(3, e))?,
            readiness
                .parse::<Readiness>()
                .map_err(|e| conversion_error(4, e))?,
        ),
        timestamp: timestamp(row, 5)?,
    })
}

fn timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    raw.parse::<DateTime<Utc>>()
        .map_err(|e| conversion_error(idx, e))
}

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, err.into())
}
