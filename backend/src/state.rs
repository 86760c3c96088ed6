// src/state.rs

use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    config::Config,
    report::{assets::ImageSource, layout::SchoolProfile, store::ReportStore},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReportStore>,
    pub images: Arc<dyn ImageSource>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<dyn ReportStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ImageSource> {
    fn from_ref(state: &AppState) -> Self {
        state.images.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for SchoolProfile {
    fn from_ref(state: &AppState) -> Self {
        state.config.school.clone()
    }
}
