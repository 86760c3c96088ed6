// src/report/store.rs

//! Read-only access to the school database used while building a report.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{
    score::{ResultRow, ScoreRecord},
    student::StudentProfile,
    term::Term,
};

/// Queries the report pipeline depends on. Every method is a plain read;
/// failures are passed through untouched.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn get_student(&self, student_id: &str) -> Result<Option<StudentProfile>, sqlx::Error>;

    /// The student's approved rows for one term, in store order.
    async fn get_approved_scores(
        &self,
        student_id: &str,
        term: Term,
        session: &str,
    ) -> Result<Vec<ScoreRecord>, sqlx::Error>;

    /// All of the student's rows for one term, approved or not.
    async fn get_term_scores(
        &self,
        student_id: &str,
        term: Term,
        session: &str,
    ) -> Result<Vec<ScoreRecord>, sqlx::Error>;

    /// Every row of the class for one term, approved or not.
    async fn get_class_scores(
        &self,
        class_name: &str,
        term: Term,
        session: &str,
    ) -> Result<Vec<ScoreRecord>, sqlx::Error>;

    async fn get_students_in_class(&self, class_name: &str) -> Result<Vec<StudentProfile>, sqlx::Error>;

    async fn get_remark(
        &self,
        student_id: &str,
        class_name: &str,
        term: Term,
        session: &str,
    ) -> Result<Option<String>, sqlx::Error>;
}

/// Mark columns are cast to text so malformed entries decode and count as zero.
const RESULT_COLUMNS: &str = "student_id, subject, class, term, session, \
     ca1::TEXT AS ca1, ca2::TEXT AS ca2, score::TEXT AS score, \
     grade, remark, COALESCE(approved::BOOLEAN, FALSE) AS approved";

const STUDENT_COLUMNS: &str = "student_id, COALESCE(fullname, '') AS fullname, \
     COALESCE(class, '') AS class, gender, dob::TEXT AS dob, admission_no, photo";

#[derive(Clone)]
pub struct PgReportStore {
    pool: PgPool,
}

impl PgReportStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn results(&self, filter: &str, binds: [&str; 3]) -> Result<Vec<ScoreRecord>, sqlx::Error> {
        let sql = format!("SELECT {RESULT_COLUMNS} FROM results WHERE {filter}");
        let [a, b, c] = binds;
        let rows = sqlx::query_as::<_, ResultRow>(&sql)
            .bind(a)
            .bind(b)
            .bind(c)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ScoreRecord::from).collect())
    }
}

#[async_trait]
impl ReportStore for PgReportStore {
    async fn get_student(&self, student_id: &str) -> Result<Option<StudentProfile>, sqlx::Error> {
        sqlx::query_as::<_, StudentProfile>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE student_id = $1"
        ))
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_approved_scores(
        &self,
        student_id: &str,
        term: Term,
        session: &str,
    ) -> Result<Vec<ScoreRecord>, sqlx::Error> {
        self.results(
            "student_id = $1 AND term = $2 AND session = $3 AND approved::BOOLEAN IS TRUE",
            [student_id, term.label(), session],
        )
        .await
    }

    async fn get_term_scores(
        &self,
        student_id: &str,
        term: Term,
        session: &str,
    ) -> Result<Vec<ScoreRecord>, sqlx::Error> {
        self.results(
            "student_id = $1 AND term = $2 AND session = $3",
            [student_id, term.label(), session],
        )
        .await
    }

    async fn get_class_scores(
        &self,
        class_name: &str,
        term: Term,
        session: &str,
    ) -> Result<Vec<ScoreRecord>, sqlx::Error> {
        self.results(
            "class = $1 AND term = $2 AND session = $3",
            [class_name, term.label(), session],
        )
        .await
    }

    async fn get_students_in_class(&self, class_name: &str) -> Result<Vec<StudentProfile>, sqlx::Error> {
        sqlx::query_as::<_, StudentProfile>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE class = $1 ORDER BY student_id"
        ))
        .bind(class_name)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_remark(
        &self,
        student_id: &str,
        class_name: &str,
        term: Term,
        session: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        let remark: Option<Option<String>> = sqlx::query_scalar(
            "SELECT remark FROM remarks WHERE student_id = $1 AND class = $2 AND term = $3 AND session = $4",
        )
        .bind(student_id)
        .bind(class_name)
        .bind(term.label())
        .bind(session)
        .fetch_optional(&self.pool)
        .await?;
        Ok(remark.flatten().filter(|r| !r.trim().is_empty()))
    }
}
