// tests/report_api.rs

mod common;

use common::{CLASS, MemoryImages, MemoryStore, SESSION, png, record, spawn_app};
use report_card::models::term::Term;
use serde_json::Value;

fn sample_store() -> MemoryStore {
    MemoryStore::default()
        .with_student("S1", "Ada Obi", CLASS)
        .with_student("S2", "Bola Ade", CLASS)
        .with_result(record("S1", "Mathematics", Term::First, (Some(10.0), Some(10.0), Some(50.0)), true))
        .with_result(record("S1", "English", Term::First, (Some(8.0), Some(7.0), Some(45.0)), true))
        .with_result(record("S1", "Physics", Term::First, (Some(5.0), Some(5.0), Some(20.0)), false))
        .with_result(record("S2", "Mathematics", Term::First, (Some(5.0), Some(5.0), Some(30.0)), true))
}

fn query(term: &str) -> [(&str, &str); 2] {
    [("term", term), ("session", SESSION)]
}

#[tokio::test]
async fn unknown_route_is_404() {
    let address = spawn_app(MemoryStore::default(), MemoryImages::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Route not found");
}

#[tokio::test]
async fn result_lists_approved_rows_only() {
    let address = spawn_app(sample_store(), MemoryImages::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/students/S1/result", address))
        .query(&query("1st Term"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let rows: Vec<Value> = response.json().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["subject"], "Mathematics");
    assert_eq!(rows[0]["class"], CLASS);
    assert_eq!(rows[0]["exam"], 50.0);
    assert!(rows.iter().all(|r| r["approved"] == true));
}

#[tokio::test]
async fn summary_reports_aggregates() {
    let address = spawn_app(sample_store(), MemoryImages::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/students/S1/result/summary", address))
        .query(&query("1st Term"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["grand_total"], 130.0);
    assert_eq!(body["term_average"], "65.00");
    assert_eq!(body["cumulative_grade"], "B3 (Good)");
    assert_eq!(body["students_in_class"], 2);
    assert_eq!(body["cohort"]["highest"], "65.00");
    assert_eq!(body["cohort"]["lowest"], "40.00");
    assert_eq!(body["student"]["fullname"], "Ada Obi");
    assert_eq!(body["term"], "1st Term");
    let columns: Vec<&str> = body["columns"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(columns.contains(&"Exam"));
    assert!(!columns.contains(&"FirstTerm"));
}

#[tokio::test]
async fn pdf_is_served_inline() {
    let images = MemoryImages {
        logo: Some(png(16, 16)),
        ..MemoryImages::default()
    };
    let address = spawn_app(sample_store(), images).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/students/S1/result/pdf", address))
        .query(&query("1st Term"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.headers()["content-type"], "application/pdf");
    let disposition = response.headers()["content-disposition"].to_str().unwrap().to_string();
    assert!(disposition.starts_with("inline;"));
    assert!(disposition.contains("report_S1_1st_Term_2024_25.pdf"));
    let bytes = response.bytes().await.unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[tokio::test]
async fn pdf_for_unknown_student_still_renders() {
    let address = spawn_app(sample_store(), MemoryImages::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/students/NOBODY/result/pdf", address))
        .query(&query("2nd Term"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.bytes().await.unwrap().starts_with(b"%PDF-"));
}

#[tokio::test]
async fn invalid_term_is_rejected() {
    let address = spawn_app(sample_store(), MemoryImages::default()).await;
    let client = reqwest::Client::new();

    for path in ["result", "result/summary", "result/pdf"] {
        let response = client
            .get(format!("{}/api/students/S1/{}", address, path))
            .query(&query("Fourth Term"))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status().as_u16(), 400, "{}", path);
    }
}

#[tokio::test]
async fn missing_session_is_rejected() {
    let address = spawn_app(sample_store(), MemoryImages::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/students/S1/result", address))
        .query(&[("term", "1st Term")])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .get(format!("{}/api/students/S1/result", address))
        .query(&[("term", "1st Term"), ("session", "")])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn store_failure_is_a_500() {
    let store = MemoryStore {
        broken: true,
        ..sample_store()
    };
    let address = spawn_app(store, MemoryImages::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/students/S1/result/pdf", address))
        .query(&query("1st Term"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Internal Server Error");
}

#[tokio::test]
async fn grade_lookup_returns_both_renderings() {
    let address = spawn_app(MemoryStore::default(), MemoryImages::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/grading", address))
        .query(&[("total", "72")])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "B2");
    assert_eq!(body["label"], "B2 (Very Good)");

    let response = client
        .get(format!("{}/api/grading", address))
        .query(&[("total", "n/a")])
        .send()
        .await
        .expect("Failed to execute request");
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["code"], "");
    assert_eq!(body["label"], "");
}
