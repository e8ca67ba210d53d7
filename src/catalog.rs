//! Date-format catalog for temporal label detection
//!
//! The catalog is an ordered list of strftime patterns. Order is the
//! priority contract: when several formats parse every label on an axis,
//! consistency resolution picks the one appearing earliest in the catalog,
//! so callers put ISO-8601 ahead of locale-specific orders.
//!
//! Catalogs are configuration: loaded once at process start (built-in
//! defaults, a TOML file, or the `GRIDSTAT_CATALOG` environment variable
//! pointing at one), validated on load and never mutated afterwards.
//!
//! # Example
//!
//! ```rust
//! use gridstat::catalog::FormatCatalog;
//!
//! let catalog = FormatCatalog::default();
//! assert!(catalog.validate().is_ok());
//! assert!(catalog.patterns.iter().any(|p| p == "%Y-%m-%d"));
//! ```

use chrono::format::{Item, StrftimeItems};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Environment variable naming a catalog file to load instead of the defaults
pub const CATALOG_ENV: &str = "GRIDSTAT_CATALOG";

/// Built-in patterns, ISO-8601 first
///
/// Every pattern carries a complete calendar date; time-of-day parts are
/// optional and default to midnight when absent. Ambiguous day/month orders
/// are resolved by position: day-first outranks month-first here, and a
/// custom catalog can reorder them.
const DEFAULT_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d-%m-%Y",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%d.%m.%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%b %d, %Y",
];

/// Ordered catalog of date-format patterns
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormatCatalog {
    /// Patterns in priority order (earlier wins consistency resolution)
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
}

fn default_patterns() -> Vec<String> {
    DEFAULT_PATTERNS.iter().map(|p| p.to_string()).collect()
}

impl Default for FormatCatalog {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
        }
    }
}

impl FormatCatalog {
    /// Load a catalog from a TOML file (`patterns = ["%Y-%m-%d", ...]`)
    ///
    /// The parsed catalog is validated before it is returned: an empty
    /// pattern list or a pattern chrono cannot compile is a load error.
    pub fn from_file(path: &str) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog: Self =
            toml::from_str(&contents).map_err(|e| CatalogError::Parse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Load the process catalog: `GRIDSTAT_CATALOG` if set, defaults otherwise
    pub fn load() -> Result<Self, CatalogError> {
        match std::env::var(CATALOG_ENV) {
            Ok(path) => Self::from_file(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Save this catalog to a TOML file
    pub fn save_to_file(&self, path: &str) -> Result<(), CatalogError> {
        let contents = toml::to_string_pretty(self).map_err(|e| CatalogError::Parse(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Validate the catalog
    ///
    /// Rejects an empty catalog and any pattern chrono cannot compile.
    /// [`FormatCatalog::from_file`] runs this on every load, so a bad
    /// custom catalog fails loudly at startup instead of silently never
    /// matching anything.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.patterns.is_empty() {
            return Err(CatalogError::Empty);
        }
        for pattern in &self.patterns {
            if pattern.trim().is_empty() || !pattern_compiles(pattern) {
                return Err(CatalogError::InvalidPattern(pattern.clone()));
            }
        }
        Ok(())
    }

    /// Number of patterns in the catalog
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Whether the catalog holds no patterns
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn pattern_compiles(pattern: &str) -> bool {
    StrftimeItems::new(pattern).all(|item| !matches!(item, Item::Error))
}

lazy_static! {
    /// Process-wide built-in catalog, for callers that do not carry their own
    pub static ref DEFAULT_CATALOG: FormatCatalog = FormatCatalog::default();
}

/// Borrow the process-wide built-in catalog
pub fn default_catalog() -> &'static FormatCatalog {
    &DEFAULT_CATALOG
}
