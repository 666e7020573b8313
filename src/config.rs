//! Environment-driven configuration.
//!
//! Everything has a workable default so the storefront runs in development
//! without any environment set up; missing values are logged, not fatal.
//! The admin allow-list replaces the original's single hardcoded owner
//! address.

use std::env;

use tracing::{info, warn};

use crate::services::images::ImageLimits;

/// Runtime configuration for the storefront.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// ISO currency code handed to the payment gateway.
    pub currency: String,
    /// Named preset forwarded to the image host.
    pub upload_preset: String,
    /// Emails allowed into the admin view.
    pub admin_emails: Vec<String>,
    /// Bounds applied to image uploads.
    pub image_limits: ImageLimits,
}

impl StorefrontConfig {
    /// Loads configuration from the environment.
    ///
    /// Variables: `STOREFRONT_CURRENCY`, `STOREFRONT_UPLOAD_PRESET`,
    /// `STOREFRONT_ADMIN_EMAILS` (comma-separated),
    /// `STOREFRONT_MAX_UPLOAD_MB`.
    pub fn load() -> Self {
        let max_upload_mb: usize = load_or("STOREFRONT_MAX_UPLOAD_MB", 10);
        let image_limits = ImageLimits {
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            ..ImageLimits::default()
        };

        Self {
            currency: load_or("STOREFRONT_CURRENCY", "GHS".to_string()),
            upload_preset: load_or("STOREFRONT_UPLOAD_PRESET", "dishes".to_string()),
            admin_emails: load_admin_emails(),
            image_limits,
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: "GHS".to_string(),
            upload_preset: "dishes".to_string(),
            admin_emails: Vec::new(),
            image_limits: ImageLimits::default(),
        }
    }
}

fn load_or<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                warn!(key, raw, "Invalid value, using default {}", default);
                default
            }
        },
        Err(_) => {
            info!(key, "Not set, using default {}", default);
            default
        }
    }
}

fn load_admin_emails() -> Vec<String> {
    match env::var("STOREFRONT_ADMIN_EMAILS") {
        Ok(raw) => raw
            .split(',')
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty())
            .collect(),
        Err(_) => {
            warn!("STOREFRONT_ADMIN_EMAILS not set; admin view is unreachable");
            Vec::new()
        }
    }
}
