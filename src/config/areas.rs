use std::env;

/// Departments a complaint can be assigned to
///
/// Read-only reference data for the workflow. Loaded from the
/// `COMPLAINT_AREAS` environment variable (comma-separated) so deployments
/// can adjust the catalog without a rebuild; falls back to the built-in
/// municipal list.
#[derive(Debug, Clone)]
pub struct AreaCatalog {
    areas: Vec<String>,
}

const DEFAULT_AREAS: &[&str] = &[
    "Obras Públicas",
    "Alumbrado",
    "Limpieza Urbana",
    "Agua y Saneamiento",
    "Seguridad Ciudadana",
];

impl AreaCatalog {
    pub fn new(areas: Vec<String>) -> Self {
        Self { areas }
    }

    /// Load the catalog from the environment, defaulting to the built-in list
    pub fn from_env() -> Self {
        let areas = match env::var("COMPLAINT_AREAS") {
            Ok(value) => value
                .split(',')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect(),
            Err(_) => Vec::new(),
        };
        if areas.is_empty() {
            Self::default()
        } else {
            Self { areas }
        }
    }

    /// All configured area names
    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    /// Whether the catalog knows the given area
    pub fn contains(&self, area: &str) -> bool {
        self.areas.iter().any(|a| a == area)
    }
}

impl Default for AreaCatalog {
    fn default() -> Self {
        Self {
            areas: DEFAULT_AREAS.iter().map(|a| a.to_string()).collect(),
        }
    }
}
