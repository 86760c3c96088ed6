// src/report/pipeline.rs

//! Fetch, aggregate, lay out and render one student's report.

use std::io::Write;

use crate::models::{student::StudentProfile, term::Term};
use crate::report::{
    aggregate::{ReportInputs, ReportModel, TermTotals, term_totals},
    assets::{ImageSource, decode_asset},
    document::ReportDocument,
    error::ReportError,
    grading::GradeScale,
    layout::{LayoutAssets, SchoolProfile, geometry::PageGeometry, layout_report},
    render::render_pdf,
    store::ReportStore,
};

/// Identifies one report.
#[derive(Debug, Clone, Copy)]
pub struct ReportRequest<'a> {
    pub student_id: &'a str,
    pub term: Term,
    pub session: &'a str,
}

/// Issues every query a report needs, one after another.
///
/// An unknown student still gets a report built from an empty profile.
pub async fn gather_inputs(
    store: &dyn ReportStore,
    request: ReportRequest<'_>,
) -> Result<ReportInputs, ReportError> {
    let ReportRequest { student_id, term, session } = request;

    let approved = store.get_approved_scores(student_id, term, session).await?;
    let student = match store.get_student(student_id).await? {
        Some(student) => student,
        None => {
            tracing::warn!("No profile for student {}, rendering with blank details", student_id);
            StudentProfile::placeholder(student_id)
        }
    };

    let class_records = store
        .get_class_scores(&student.class_name, term, session)
        .await?;

    let classmates = store.get_students_in_class(&student.class_name).await?;
    let mut cohort = Vec::with_capacity(classmates.len());
    for classmate in &classmates {
        cohort.push(
            store
                .get_approved_scores(&classmate.student_id, term, session)
                .await?,
        );
    }

    let mut prior_terms: Vec<TermTotals> = Vec::with_capacity(term.index());
    for earlier in term.earlier() {
        let rows = store.get_term_scores(student_id, *earlier, session).await?;
        prior_terms.push(term_totals(&rows));
    }

    let class_teacher_remark = store
        .get_remark(student_id, &student.class_name, term, session)
        .await?;

    tracing::debug!(
        "Gathered {} approved row(s), {} class row(s), {} classmate(s) for {}",
        approved.len(),
        class_records.len(),
        classmates.len(),
        student_id
    );

    Ok(ReportInputs {
        student,
        term,
        session: session.to_string(),
        approved,
        class_records,
        cohort,
        prior_terms,
        class_teacher_remark,
    })
}

/// Looks up and decodes the pictures. Anything missing is left out.
pub async fn load_assets(images: &dyn ImageSource, student: &StudentProfile) -> LayoutAssets {
    let logo = decode_asset("logo", images.logo().await);
    if logo.is_none() {
        tracing::debug!("No readable school logo, header drawn without it");
    }
    LayoutAssets {
        logo,
        photo: decode_asset("passport photo", images.student_photo(student).await),
        extra_section: decode_asset("extra section", images.extra_section().await),
    }
}

/// Everything needed to draw the report, kept apart from rendering so the
/// PDF step can run off the async executor.
#[derive(Debug, Clone)]
pub struct PreparedReport {
    pub model: ReportModel,
    pub document: ReportDocument,
}

pub async fn prepare_report(
    store: &dyn ReportStore,
    images: &dyn ImageSource,
    school: &SchoolProfile,
    request: ReportRequest<'_>,
) -> Result<PreparedReport, ReportError> {
    let inputs = gather_inputs(store, request).await?;
    let assets = load_assets(images, &inputs.student).await;
    let model = ReportModel::build(inputs, &GradeScale::default());
    let document = layout_report(&model, &assets, school, &PageGeometry::default());
    Ok(PreparedReport { model, document })
}

/// Prepares the report and streams the PDF into `sink`.
pub async fn generate_report<W: Write>(
    store: &dyn ReportStore,
    images: &dyn ImageSource,
    school: &SchoolProfile,
    request: ReportRequest<'_>,
    sink: W,
) -> Result<ReportModel, ReportError> {
    let prepared = prepare_report(store, images, school, request).await?;
    render_pdf(&prepared.document, sink)?;
    Ok(prepared.model)
}
