// src/report/assets.rs

//! Logo, passport photo and section artwork lookup.
//!
//! Lookups never fail: anything missing or unreadable comes back as `None`
//! and the corresponding drawing is skipped.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use async_trait::async_trait;
use image::{Rgb, RgbImage};

use crate::models::student::StudentProfile;

/// A decoded picture, flattened onto white.
pub struct ImageAsset {
    label: String,
    pixels: RgbImage,
}

impl ImageAsset {
    pub fn decode(label: impl Into<String>, bytes: &[u8]) -> Result<Self, image::ImageError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let pixels = RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
            let [r, g, b, a] = rgba.get_pixel(x, y).0;
            let alpha = a as f32 / 255.0;
            let over_white = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
            Rgb([over_white(r), over_white(g), over_white(b)])
        });
        Ok(ImageAsset {
            label: label.into(),
            pixels,
        })
    }

    pub fn from_pixels(label: impl Into<String>, pixels: RgbImage) -> Self {
        ImageAsset {
            label: label.into(),
            pixels,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Raw RGB bytes, row-major.
    pub fn rgb_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// Pixels blended towards white, as if drawn at `opacity` on paper.
    pub fn faded(&self, opacity: f32) -> Vec<u8> {
        let opacity = opacity.clamp(0.0, 1.0);
        self.pixels
            .as_raw()
            .iter()
            .map(|&c| (255.0 - (255.0 - c as f32) * opacity).round() as u8)
            .collect()
    }
}

impl fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAsset")
            .field("label", &self.label)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Decodes looked-up bytes, logging and dropping pictures that do not decode.
pub fn decode_asset(label: &str, bytes: Option<Vec<u8>>) -> Option<Arc<ImageAsset>> {
    let bytes = bytes?;
    match ImageAsset::decode(label, &bytes) {
        Ok(asset) => Some(Arc::new(asset)),
        Err(e) => {
            tracing::warn!("Skipping {} image, decode failed: {}", label, e);
            None
        }
    }
}

/// Source of the pictures a report may include.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn logo(&self) -> Option<Vec<u8>>;

    async fn student_photo(&self, profile: &StudentProfile) -> Option<Vec<u8>>;

    /// Optional band printed under the character tables.
    async fn extra_section(&self) -> Option<Vec<u8>>;
}

pub const LOGO_FILES: [&str; 2] = ["images.jpg", "images.png"];
pub const EXTRA_SECTION_FILE: &str = "report_extra_section.jpg";

/// Looks pictures up on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsImageSource {
    /// Configured logo, tried before the built-in locations.
    pub logo_override: Option<PathBuf>,
    pub asset_dir: PathBuf,
    pub public_dir: PathBuf,
    /// Base for photo references that are not readable as given.
    pub photo_root: PathBuf,
}

impl FsImageSource {
    pub fn logo_candidates(&self) -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = self.logo_override.iter().cloned().collect();
        for dir in [&self.asset_dir, &self.public_dir] {
            candidates.extend(LOGO_FILES.iter().map(|file| dir.join(file)));
        }
        candidates
    }

    pub fn photo_candidates(&self, profile: &StudentProfile) -> Vec<PathBuf> {
        let Some(reference) = profile.photo_ref.as_deref().map(str::trim) else {
            return Vec::new();
        };
        if reference.is_empty() {
            return Vec::new();
        }
        let normalized = reference.replace('\\', "/");
        vec![
            PathBuf::from(&normalized),
            self.photo_root.join(normalized.trim_start_matches('/')),
        ]
    }
}

/// First candidate that can be read wins.
async fn read_first(candidates: &[PathBuf]) -> Option<Vec<u8>> {
    for path in candidates {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                tracing::debug!("Using image {}", path.display());
                return Some(bytes);
            }
            Err(e) => tracing::debug!("Image candidate {} unreadable: {}", path.display(), e),
        }
    }
    None
}

#[async_trait]
impl ImageSource for FsImageSource {
    async fn logo(&self) -> Option<Vec<u8>> {
        let found = read_first(&self.logo_candidates()).await;
        if found.is_none() {
            tracing::warn!("No readable school logo found, report will omit it");
        }
        found
    }

    async fn student_photo(&self, profile: &StudentProfile) -> Option<Vec<u8>> {
        read_first(&self.photo_candidates(profile)).await
    }

    async fn extra_section(&self) -> Option<Vec<u8>> {
        read_first(&[self.asset_dir.join(EXTRA_SECTION_FILE)]).await
    }
}

/// True if `path` names a readable file. Used at startup to report what the
/// report generator will find.
pub fn is_readable(path: &Path) -> bool {
    std::fs::File::open(path).is_ok()
}
