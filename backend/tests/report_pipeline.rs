// tests/report_pipeline.rs

mod common;

use std::io;

use common::{CLASS, MemoryImages, MemoryStore, SESSION, png, record};
use report_card::{
    models::term::Term,
    report::{
        ReportError, ReportRequest, generate_report, prepare_report,
        document::DrawOp,
        layout::{SchoolProfile, columns::{ColumnKey, ColumnSet}, table::cell_text},
        pipeline::gather_inputs,
    },
};

fn request(student_id: &str, term: Term) -> ReportRequest<'_> {
    ReportRequest {
        student_id,
        term,
        session: SESSION,
    }
}

#[tokio::test]
async fn single_subject_with_exam() {
    let store = MemoryStore::default()
        .with_student("S1", "Ada Obi", CLASS)
        .with_result(record("S1", "Mathematics", Term::First, (Some(10.0), Some(10.0), Some(50.0)), true));

    let prepared = prepare_report(&store, &MemoryImages::default(), &SchoolProfile::default(), request("S1", Term::First))
        .await
        .unwrap();
    let model = &prepared.model;

    assert_eq!(model.rows[0].total, 70.0);
    assert_eq!(model.grand_total, 70.0);
    assert_eq!(model.term_average, "70.00");
    assert_eq!(model.cumulative_grade, "B2 (Very Good)");
    assert!(model.has_exam);

    let columns = ColumnSet::build(model.has_exam, model.term, 20.0);
    for key in [ColumnKey::Exam, ColumnKey::Total, ColumnKey::Grade] {
        assert!(columns.contains(key));
    }
    assert!(prepared.document.find_text("Exams").is_some());
    assert!(prepared.document.find_text("Grand Total= 70").is_some());
}

#[tokio::test]
async fn continuous_assessment_only() {
    let store = MemoryStore::default()
        .with_student("S1", "Ada Obi", CLASS)
        .with_result(record("S1", "Mathematics", Term::First, (Some(10.0), Some(10.0), None), true));

    let prepared = prepare_report(&store, &MemoryImages::default(), &SchoolProfile::default(), request("S1", Term::First))
        .await
        .unwrap();
    let model = &prepared.model;

    assert!(!model.has_exam);
    let columns = ColumnSet::build(model.has_exam, model.term, 20.0);
    for key in [ColumnKey::Exam, ColumnKey::Total, ColumnKey::Grade] {
        assert!(!columns.contains(key));
    }
    assert!(columns.contains(ColumnKey::CaTotal));
    assert_eq!(cell_text(ColumnKey::CaTotal, &model.rows[0]), "20");
    assert_eq!(model.rows[0].grade, "");
    assert!(prepared.document.find_text("Exams").is_none());
}

#[tokio::test]
async fn cohort_statistics_over_three_students() {
    let mut store = MemoryStore::default()
        .with_student("S1", "Ada Obi", CLASS)
        .with_student("S2", "Bola Ade", CLASS)
        .with_student("S3", "Chidi Eze", CLASS)
        .with_student("S4", "Dayo Ojo", CLASS);
    for (id, total) in [("S1", 40.0), ("S2", 60.0), ("S3", 80.0)] {
        store = store.with_result(record(id, "Mathematics", Term::First, (None, None, Some(total)), true));
    }
    // S4 only has an unapproved row and must not drag the cohort down
    store = store.with_result(record("S4", "Mathematics", Term::First, (None, None, Some(0.0)), false));

    let prepared = prepare_report(&store, &MemoryImages::default(), &SchoolProfile::default(), request("S2", Term::First))
        .await
        .unwrap();
    let cohort = &prepared.model.cohort;

    assert_eq!(cohort.highest, "80.00");
    assert_eq!(cohort.lowest, "40.00");
    assert_eq!(cohort.average, "60.00");
    assert_eq!(cohort.population, 3);
    assert_eq!(prepared.model.students_in_class, 4);

    // class subject figures include the unapproved row
    let stats = prepared.model.rows[0].class_stats.as_ref().unwrap();
    assert_eq!(stats.lowest, "0");
    assert_eq!(stats.highest, "80");
    assert_eq!(stats.average, "45.00");
}

#[tokio::test]
async fn third_term_cumulative_average() {
    let store = MemoryStore::default()
        .with_student("S1", "Ada Obi", CLASS)
        .with_result(record("S1", "Mathematics", Term::First, (Some(10.0), Some(10.0), Some(40.0)), true))
        .with_result(record("S1", "Mathematics", Term::Second, (Some(10.0), Some(10.0), Some(50.0)), false))
        .with_result(record("S1", "Mathematics", Term::Third, (Some(10.0), Some(10.0), Some(60.0)), true));

    let prepared = prepare_report(&store, &MemoryImages::default(), &SchoolProfile::default(), request("S1", Term::Third))
        .await
        .unwrap();
    let row = &prepared.model.rows[0];

    assert_eq!(row.total, 80.0);
    assert_eq!(row.cross_term.first_term, Some(60.0));
    // earlier terms count whether or not they were approved
    assert_eq!(row.cross_term.second_term, Some(70.0));
    assert_eq!(row.cross_term.cumulative_average, Some(70));
    let columns = ColumnSet::build(prepared.model.has_exam, Term::Third, 20.0);
    assert!(columns.contains(ColumnKey::FirstTerm));
    assert!(columns.contains(ColumnKey::SecondTerm));
    assert_eq!(cell_text(ColumnKey::Cumulative, row), "70");
}

#[tokio::test]
async fn unapproved_rows_stay_off_the_report() {
    let store = MemoryStore::default()
        .with_student("S1", "Ada Obi", CLASS)
        .with_result(record("S1", "Mathematics", Term::First, (Some(10.0), Some(10.0), Some(50.0)), true))
        .with_result(record("S1", "Physics", Term::First, (Some(10.0), Some(10.0), Some(30.0)), false));

    let inputs = gather_inputs(&store, request("S1", Term::First)).await.unwrap();
    assert_eq!(inputs.approved.len(), 1);
    assert_eq!(inputs.class_records.len(), 2);
    assert!(inputs.prior_terms.is_empty());
}

#[tokio::test]
async fn unknown_student_still_gets_a_report() {
    let store = MemoryStore::default();
    let mut out = Vec::new();
    let model = generate_report(
        &store,
        &MemoryImages::default(),
        &SchoolProfile::default(),
        request("GHOST", Term::First),
        &mut out,
    )
    .await
    .unwrap();

    assert!(out.starts_with(b"%PDF-"));
    assert!(model.rows.is_empty());
    assert_eq!(model.term_average, "0.00");
    assert_eq!(model.student.student_id, "GHOST");
    assert_eq!(model.cohort.average, "0.00");
}

#[tokio::test]
async fn pictures_are_drawn_when_available_and_skipped_when_broken() {
    let store = MemoryStore::default()
        .with_student("S1", "Ada Obi", CLASS)
        .with_result(record("S1", "Mathematics", Term::First, (Some(10.0), Some(10.0), Some(50.0)), true));
    let images = MemoryImages {
        logo: Some(png(8, 8)),
        photo: Some(b"not an image".to_vec()),
        extra_section: Some(png(20, 4)),
    };

    let prepared = prepare_report(&store, &images, &SchoolProfile::default(), request("S1", Term::First))
        .await
        .unwrap();
    let images_drawn = prepared.document.pages[0]
        .ops
        .iter()
        .filter(|op| matches!(op, DrawOp::Image { .. }))
        .count();
    // watermark, header logo and the band; the undecodable photo is skipped
    assert_eq!(images_drawn, 3);
    assert!(prepared.document.find_text("Passport").is_some());
}

#[tokio::test]
async fn class_teacher_remark_is_printed() {
    let mut store = MemoryStore::default()
        .with_student("S1", "Ada Obi", CLASS)
        .with_result(record("S1", "Mathematics", Term::First, (Some(10.0), Some(10.0), Some(50.0)), true));
    store.remarks.push((
        "S1".into(),
        CLASS.into(),
        Term::First,
        SESSION.into(),
        "A focused learner.".into(),
    ));

    let prepared = prepare_report(&store, &MemoryImages::default(), &SchoolProfile::default(), request("S1", Term::First))
        .await
        .unwrap();
    assert_eq!(prepared.model.class_teacher_remark.as_deref(), Some("A focused learner."));
    assert!(prepared.document.find_text("A focused learner.").is_some());
}

#[tokio::test]
async fn query_failures_propagate() {
    let store = MemoryStore {
        broken: true,
        ..MemoryStore::default()
    };
    let mut out = Vec::new();
    let err = generate_report(
        &store,
        &MemoryImages::default(),
        &SchoolProfile::default(),
        request("S1", Term::First),
        &mut out,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ReportError::Query(_)));
    assert!(out.is_empty());
}

struct ClosedSink;

impl io::Write for ClosedSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn closed_sink_is_a_distinct_failure() {
    let store = MemoryStore::default()
        .with_student("S1", "Ada Obi", CLASS)
        .with_result(record("S1", "Mathematics", Term::First, (Some(10.0), Some(10.0), Some(50.0)), true));
    let err = generate_report(
        &store,
        &MemoryImages::default(),
        &SchoolProfile::default(),
        request("S1", Term::First),
        ClosedSink,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ReportError::Sink(_)));
}
