use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::business::BusinessSubmission;
use crate::text::fold;
use crate::ConfigError;

#[derive(Debug, Deserialize)]
pub struct SeedFile {
    pub businesses: Vec<BusinessSubmission>,
}

/// Load and validate a YAML file of businesses to pre-populate the directory.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_seed(path: &Path) -> Result<SeedFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SeedFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let seed: SeedFile = serde_yaml::from_str(&content).map_err(ConfigError::SeedFileParse)?;

    validate_seed(&seed)?;

    Ok(seed)
}

fn validate_seed(seed: &SeedFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for business in &seed.businesses {
        if business.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "business name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(fold(&business.name)) {
            return Err(ConfigError::Validation(format!(
                "duplicate business name: '{}'",
                business.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::business::Category;
    use crate::schedule::Schedule;

    fn write_seed(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_text_and_structured_schedules() {
        let file = write_seed(
            r#"
businesses:
  - name: Le Damier
    category: restaurant
    address: Kaloum, Conakry
    schedule: "Lun-Sam: 11h-23h"
  - name: Pharmacie Camayenne
    category: pharmacie
    address: Camayenne
    schedule:
      lundi: { open: "08:00", close: "20:00" }
      dimanche: { closed: true }
"#,
        );
        let seed = load_seed(file.path()).unwrap();
        assert_eq!(seed.businesses.len(), 2);
        assert_eq!(seed.businesses[0].category, Category::Restaurant);
        assert!(matches!(seed.businesses[0].schedule, Some(Schedule::Text(_))));
        assert!(matches!(
            seed.businesses[1].schedule,
            Some(Schedule::Structured(_))
        ));
    }

    #[test]
    fn rejects_empty_name() {
        let seed = SeedFile {
            businesses: vec![BusinessSubmission::new("  ", Category::Banque, "Kaloum")],
        };
        let err = validate_seed(&seed).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn rejects_duplicate_name_case_insensitively() {
        let seed = SeedFile {
            businesses: vec![
                BusinessSubmission::new("Le Damier", Category::Restaurant, "Kaloum"),
                BusinessSubmission::new("le damier", Category::Restaurant, "Dixinn"),
            ],
        };
        let err = validate_seed(&seed).unwrap_err();
        assert!(err.to_string().contains("duplicate business name"));
    }

    #[test]
    fn rejects_duplicate_name_differing_only_by_accents() {
        let seed = SeedFile {
            businesses: vec![
                BusinessSubmission::new("Hôtel Kaloum", Category::Hotel, "Kaloum"),
                BusinessSubmission::new("Hotel  Kaloum", Category::Hotel, "Boulbinet"),
            ],
        };
        let err = validate_seed(&seed).unwrap_err();
        assert!(err.to_string().contains("Hotel  Kaloum"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_seed(Path::new("/nonexistent/businesses.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::SeedFileIo { ref path, .. } if path.contains("nonexistent")));
    }

    #[test]
    fn unknown_category_is_a_parse_error() {
        let file = write_seed("businesses:\n  - name: X\n    category: boulangerie\n");
        let err = load_seed(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::SeedFileParse(_)));
    }

    #[test]
    fn load_seed_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("businesses.yaml");
        assert!(
            path.exists(),
            "businesses.yaml missing at {path:?}, required for this test"
        );
        let result = load_seed(&path);
        assert!(result.is_ok(), "failed to load businesses.yaml: {result:?}");
        assert!(!result.unwrap().businesses.is_empty());
    }
}
