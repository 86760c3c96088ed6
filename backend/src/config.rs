// src/config.rs

use std::{env, path::PathBuf};

use dotenvy::dotenv;

use crate::report::{assets::FsImageSource, layout::SchoolProfile};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub bind_addr: String,
    pub log_dir: String,
    pub school_logo_path: Option<PathBuf>,
    pub asset_dir: PathBuf,
    pub public_asset_dir: PathBuf,
    pub photo_root: PathBuf,
    pub school: SchoolProfile,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set");

        let school_logo_path = env::var("SCHOOL_LOGO_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let defaults = SchoolProfile::default();
        let school = SchoolProfile {
            name: var_or("SCHOOL_NAME", &defaults.name),
            address: var_or("SCHOOL_ADDRESS", &defaults.address),
            contact: var_or("SCHOOL_CONTACT", &defaults.contact),
            principal_remark: var_or("PRINCIPAL_REMARK", &defaults.principal_remark),
        };

        Self {
            database_url,
            rust_log: var_or("RUST_LOG", "info"),
            bind_addr: var_or("BIND_ADDR", "0.0.0.0:3000"),
            log_dir: var_or("LOG_DIR", "logs"),
            school_logo_path,
            asset_dir: PathBuf::from(var_or("ASSET_DIR", "assets")),
            public_asset_dir: PathBuf::from(var_or("PUBLIC_ASSET_DIR", "frontend/public")),
            photo_root: PathBuf::from(var_or("PHOTO_ROOT", ".")),
            school,
        }
    }

    /// Filesystem image lookup configured from these settings.
    pub fn image_source(&self) -> FsImageSource {
        FsImageSource {
            logo_override: self.school_logo_path.clone(),
            asset_dir: self.asset_dir.clone(),
            public_dir: self.public_asset_dir.clone(),
            photo_root: self.photo_root.clone(),
        }
    }
}
