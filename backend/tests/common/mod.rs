// tests/common/mod.rs

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use report_card::{
    config::Config,
    models::{
        score::{Mark, ScoreRecord},
        student::StudentProfile,
        term::Term,
    },
    report::{assets::ImageSource, layout::SchoolProfile, store::ReportStore},
    routes,
    state::AppState,
};

/// In-memory stand-in for the school database.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub students: Vec<StudentProfile>,
    pub results: Vec<ScoreRecord>,
    /// (student_id, class, term, session, remark)
    pub remarks: Vec<(String, String, Term, String, String)>,
    /// Every query fails when set.
    pub broken: bool,
}

impl MemoryStore {
    fn check(&self) -> Result<(), sqlx::Error> {
        if self.broken {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }

    fn rows(&self, keep: impl Fn(&ScoreRecord) -> bool) -> Vec<ScoreRecord> {
        self.results.iter().filter(|r| keep(r)).cloned().collect()
    }

    pub fn with_student(mut self, id: &str, fullname: &str, class: &str) -> Self {
        self.students.push(StudentProfile {
            student_id: id.to_string(),
            fullname: fullname.to_string(),
            class_name: class.to_string(),
            gender: Some("Female".to_string()),
            dob: Some("2011-04-02".to_string()),
            admission_no: Some(format!("ADM-{}", id)),
            photo_ref: None,
        });
        self
    }

    pub fn with_result(mut self, record: ScoreRecord) -> Self {
        self.results.push(record);
        self
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn get_student(&self, student_id: &str) -> Result<Option<StudentProfile>, sqlx::Error> {
        self.check()?;
        Ok(self.students.iter().find(|s| s.student_id == student_id).cloned())
    }

    async fn get_approved_scores(
        &self,
        student_id: &str,
        term: Term,
        session: &str,
    ) -> Result<Vec<ScoreRecord>, sqlx::Error> {
        self.check()?;
        Ok(self.rows(|r| {
            r.student_id == student_id && r.term == term.label() && r.session == session && r.approved
        }))
    }

    async fn get_term_scores(
        &self,
        student_id: &str,
        term: Term,
        session: &str,
    ) -> Result<Vec<ScoreRecord>, sqlx::Error> {
        self.check()?;
        Ok(self.rows(|r| r.student_id == student_id && r.term == term.label() && r.session == session))
    }

    async fn get_class_scores(
        &self,
        class_name: &str,
        term: Term,
        session: &str,
    ) -> Result<Vec<ScoreRecord>, sqlx::Error> {
        self.check()?;
        Ok(self.rows(|r| r.class_name == class_name && r.term == term.label() && r.session == session))
    }

    async fn get_students_in_class(&self, class_name: &str) -> Result<Vec<StudentProfile>, sqlx::Error> {
        self.check()?;
        Ok(self
            .students
            .iter()
            .filter(|s| s.class_name == class_name)
            .cloned()
            .collect())
    }

    async fn get_remark(
        &self,
        student_id: &str,
        class_name: &str,
        term: Term,
        session: &str,
    ) -> Result<Option<String>, sqlx::Error> {
        self.check()?;
        Ok(self
            .remarks
            .iter()
            .find(|(s, c, t, sess, _)| s == student_id && c == class_name && *t == term && sess == session)
            .map(|(.., remark)| remark.clone()))
    }
}

/// Serves fixed picture bytes.
#[derive(Debug, Clone, Default)]
pub struct MemoryImages {
    pub logo: Option<Vec<u8>>,
    pub photo: Option<Vec<u8>>,
    pub extra_section: Option<Vec<u8>>,
}

#[async_trait]
impl ImageSource for MemoryImages {
    async fn logo(&self) -> Option<Vec<u8>> {
        self.logo.clone()
    }

    async fn student_photo(&self, _profile: &StudentProfile) -> Option<Vec<u8>> {
        self.photo.clone()
    }

    async fn extra_section(&self) -> Option<Vec<u8>> {
        self.extra_section.clone()
    }
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let pixels = RgbImage::from_pixel(width, height, Rgb([30, 60, 200]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(pixels)
        .write_to(&mut out, ImageOutputFormat::Png)
        .expect("encode png");
    out.into_inner()
}

pub const SESSION: &str = "2024/25";
pub const CLASS: &str = "JSS 1";

pub fn mark(value: Option<f64>) -> Mark {
    value.map(Mark::Value).unwrap_or_default()
}

pub fn record(
    student_id: &str,
    subject: &str,
    term: Term,
    marks: (Option<f64>, Option<f64>, Option<f64>),
    approved: bool,
) -> ScoreRecord {
    ScoreRecord {
        student_id: student_id.to_string(),
        subject: subject.to_string(),
        class_name: CLASS.to_string(),
        term: term.label().to_string(),
        session: SESSION.to_string(),
        ca1: mark(marks.0),
        ca2: mark(marks.1),
        exam: mark(marks.2),
        grade: None,
        remark: None,
        approved,
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        rust_log: "error".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        log_dir: "logs".to_string(),
        school_logo_path: None,
        asset_dir: "assets".into(),
        public_asset_dir: "frontend/public".into(),
        photo_root: ".".into(),
        school: SchoolProfile::default(),
    }
}

/// Spawns the app on a random port and returns its base URL.
pub async fn spawn_app(store: MemoryStore, images: MemoryImages) -> String {
    let state = AppState {
        store: Arc::new(store),
        images: Arc::new(images),
        config: test_config(),
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}
