//! YAML configuration for user mappings
//!
//! ```yaml
//! mappings:
//!   - keys: "<leader>w"
//!     command: save
//!     modes: [normal, visual]
//!   - keys: jk
//!     command: vi_enter_normal_mode
//!     modes: [i]
//! ```

use std::path::Path;

use serde::Deserialize;

use super::error::KeymapError;
use super::mode::Mode;
use super::store::MappingStore;

/// Root structure of a mappings YAML file
#[derive(Debug, Deserialize)]
pub struct MappingsConfig {
    #[serde(default)]
    pub mappings: Vec<MappingConfig>,
}

/// A single mapping entry from YAML
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MappingConfig {
    pub keys: String,
    pub command: String,
    #[serde(default = "default_modes")]
    pub modes: Vec<Mode>,
}

fn default_modes() -> Vec<Mode> {
    vec![Mode::Normal]
}

/// Load mapping entries from a YAML file
pub fn load_mapping_file(path: &Path) -> Result<Vec<MappingConfig>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_mapping_yaml(&content)
}

/// Parse mapping entries from a YAML string
pub fn parse_mapping_yaml(yaml: &str) -> Result<Vec<MappingConfig>, KeymapError> {
    let config: MappingsConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    Ok(config.mappings)
}

/// Add each entry to the store one mapping at a time
///
/// Entries with invalid key notation are skipped with a warning. Returns the
/// number of mappings added.
pub fn apply_mappings(store: &mut MappingStore, mappings: &[MappingConfig]) -> usize {
    let mut added = 0;
    for mapping in mappings {
        for mode in &mapping.modes {
            match store.add(*mode, &mapping.keys, &mapping.command) {
                Ok(()) => added += 1,
                Err(e) => {
                    tracing::warn!(
                        "Skipping mapping {:?} -> {} in {} mode: {}",
                        mapping.keys,
                        mapping.command,
                        mode,
                        e
                    );
                }
            }
        }
    }
    added
}

/// Load a mappings file into the store, logging the outcome
pub fn load_into(store: &mut MappingStore, path: &Path) -> Result<usize, KeymapError> {
    let mappings = load_mapping_file(path)?;
    let added = apply_mappings(store, &mappings);
    tracing::info!("Loaded {} mappings from {}", added, path.display());
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mappings() {
        let yaml = r#"
mappings:
  - keys: "<leader>w"
    command: save
    modes: [normal, V, o]
  - keys: jk
    command: vi_enter_normal_mode
    modes: [i]
  - keys: gh
    command: hover
"#;
        let mappings = parse_mapping_yaml(yaml).unwrap();
        assert_eq!(mappings.len(), 3);
        assert_eq!(
            mappings[0].modes,
            vec![Mode::Normal, Mode::VisualLine, Mode::OperatorPending]
        );
        assert_eq!(mappings[1].modes, vec![Mode::Insert]);
        assert_eq!(mappings[2].modes, vec![Mode::Normal]);
    }

    #[test]
    fn test_empty_document() {
        assert!(parse_mapping_yaml("mappings: []").unwrap().is_empty());
        assert!(parse_mapping_yaml("{}").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_mode_is_parse_error() {
        let yaml = "mappings:\n  - keys: x\n    command: y\n    modes: [nowhere]\n";
        assert!(matches!(
            parse_mapping_yaml(yaml),
            Err(KeymapError::ParseError(_))
        ));
    }

    #[test]
    fn test_apply_skips_bad_notation() {
        let mappings = parse_mapping_yaml(
            r#"
mappings:
  - keys: "<Nope>"
    command: broken
  - keys: "<C-s>"
    command: save
    modes: [n, i]
"#,
        )
        .unwrap();

        let mut store = MappingStore::new();
        assert_eq!(apply_mappings(&mut store, &mappings), 2);
        assert_eq!(store.len(Mode::Normal), 1);
        assert_eq!(store.len(Mode::Insert), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_mapping_file(Path::new("/nonexistent/vimkeys/mappings.yaml"));
        assert!(matches!(result, Err(KeymapError::IoError(_))));
    }
}
