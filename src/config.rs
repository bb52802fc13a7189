//! Environment configuration.
//!
//! Read after `dotenvy::dotenv()`, so a local `.env` file works the same as
//! exported variables. Unset variables fall back to defaults.

use std::path::PathBuf;

pub const DEFAULT_APP_NAME: &str = "TorqueShine Supply";
pub const DEFAULT_TAGLINE: &str = "Premium Car Care Products";
pub const DEFAULT_DATA_DIR: &str = ".storefront";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub app_name: String,
    pub tagline: String,
    /// Directory holding the persisted cart and wishlist documents.
    pub data_dir: PathBuf,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            tagline: DEFAULT_TAGLINE.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            app_name: get("STOREFRONT_APP_NAME").unwrap_or(defaults.app_name),
            tagline: get("STOREFRONT_TAGLINE").unwrap_or(defaults.tagline),
            data_dir: get("STOREFRONT_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
        }
    }

    /// Lowercase, dash-separated form of the app name.
    pub fn app_slug(&self) -> String {
        self.app_name
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|part| !part.is_empty())
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join("-")
    }
}
