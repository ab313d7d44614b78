use serde::Deserialize;
use std::path::Path;

use crate::config::forest::ForestParams;
use crate::simulation::engine::SpreadMode;

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_density")]
    pub density: f64,
    #[serde(default = "default_humidity")]
    pub humidity: f64,
    #[serde(default = "default_runs")]
    pub runs: u32,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub spread_mode: SpreadMode,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

fn default_width() -> usize {
    120
}
fn default_height() -> usize {
    80
}
fn default_density() -> f64 {
    0.6
}
fn default_humidity() -> f64 {
    0.3
}
fn default_runs() -> u32 {
    1
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "text".to_string()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            width: default_width(),
            height: default_height(),
            density: default_density(),
            humidity: default_humidity(),
            runs: default_runs(),
            seed: 0,
            spread_mode: SpreadMode::default(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl SimulationConfig {
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
        Self::from_toml_str(&content, path)
    }

    pub fn from_toml_str(content: &str, source_path: &Path) -> Result<Self, String> {
        let config: SimulationConfig =
            toml::from_str(content).map_err(|e| format!("{}: {}", source_path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn forest_params(&self) -> ForestParams {
        ForestParams {
            width: self.width,
            height: self.height,
            density: self.density,
            humidity: self.humidity,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        if self.width == 0 {
            errors.push(format!(
                "width must be > 0, got {}. Example: width = 120",
                self.width
            ));
        }

        if self.height == 0 {
            errors.push(format!(
                "height must be > 0, got {}. Example: height = 80",
                self.height
            ));
        }

        if !(0.0..=1.0).contains(&self.density) {
            errors.push(format!(
                "density must be 0.0-1.0, got {}. Example: density = 0.6",
                self.density
            ));
        }

        if !(0.0..=1.0).contains(&self.humidity) {
            errors.push(format!(
                "humidity must be 0.0-1.0, got {}. Example: humidity = 0.3",
                self.humidity
            ));
        }

        if self.runs == 0 {
            errors.push(format!(
                "runs must be > 0, got {}. Example: runs = 10",
                self.runs
            ));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            errors.push(format!(
                "log_level must be one of {:?}, got '{}'. Example: log_level = \"info\"",
                valid_levels, self.log_level
            ));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.log_format.as_str()) {
            errors.push(format!(
                "log_format must be one of {:?}, got '{}'. Example: log_format = \"text\"",
                valid_formats, self.log_format
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn test_path() -> PathBuf {
        PathBuf::from("test-config.toml")
    }

    #[test]
    fn valid_config_loads_all_fields() {
        let toml = r#"
            width = 40
            height = 30
            density = 0.75
            humidity = 0.1
            runs = 5
            seed = 1234
            spread_mode = "parallel"
            log_level = "debug"
            log_format = "json"
        "#;
        let config = SimulationConfig::from_toml_str(toml, &test_path()).unwrap();
        assert_eq!(config.width, 40);
        assert_eq!(config.height, 30);
        assert_eq!(config.density, 0.75);
        assert_eq!(config.humidity, 0.1);
        assert_eq!(config.runs, 5);
        assert_eq!(config.seed, 1234);
        assert_eq!(config.spread_mode, SpreadMode::Parallel);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, "json");
    }

    #[test]
    fn defaults_applied_for_empty_config() {
        let config = SimulationConfig::from_toml_str("", &test_path()).unwrap();
        assert_eq!(config.width, 120);
        assert_eq!(config.height, 80);
        assert_eq!(config.density, 0.6);
        assert_eq!(config.humidity, 0.3);
        assert_eq!(config.runs, 1);
        assert_eq!(config.seed, 0);
        assert_eq!(config.spread_mode, SpreadMode::Sequential);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, "text");
    }

    #[test]
    fn default_impl_matches_serde_defaults() {
        let parsed = SimulationConfig::from_toml_str("", &test_path()).unwrap();
        let built = SimulationConfig::default();
        assert_eq!(parsed.width, built.width);
        assert_eq!(parsed.density, built.density);
        assert_eq!(parsed.log_format, built.log_format);
        assert!(built.validate().is_ok());
    }

    #[test]
    fn invalid_density_rejected() {
        let err = SimulationConfig::from_toml_str("density = 1.2", &test_path()).unwrap_err();
        assert!(err.contains("density"));
        assert!(err.contains("0.0-1.0"));
    }

    #[test]
    fn invalid_humidity_rejected() {
        let err = SimulationConfig::from_toml_str("humidity = -0.5", &test_path()).unwrap_err();
        assert!(err.contains("humidity"));
    }

    #[test]
    fn zero_dimensions_rejected() {
        let err = SimulationConfig::from_toml_str("width = 0\nheight = 0", &test_path()).unwrap_err();
        assert!(err.contains("width"));
        assert!(err.contains("height"));
    }

    #[test]
    fn unknown_spread_mode_rejected() {
        let err =
            SimulationConfig::from_toml_str(r#"spread_mode = "gpu""#, &test_path()).unwrap_err();
        assert!(err.contains("test-config.toml"));
    }

    #[test]
    fn invalid_log_level_rejected() {
        let err =
            SimulationConfig::from_toml_str(r#"log_level = "verbose""#, &test_path()).unwrap_err();
        assert!(err.contains("log_level"));
    }

    #[test]
    fn invalid_log_format_rejected() {
        let err =
            SimulationConfig::from_toml_str(r#"log_format = "xml""#, &test_path()).unwrap_err();
        assert!(err.contains("log_format"));
    }

    #[test]
    fn multiple_errors_reported_together() {
        let toml = "density = 2.0\nhumidity = 3.0\nruns = 0";
        let err = SimulationConfig::from_toml_str(toml, &test_path()).unwrap_err();
        assert!(err.contains("density"));
        assert!(err.contains("humidity"));
        assert!(err.contains("runs"));
    }

    #[test]
    fn malformed_toml_includes_source_path() {
        let err = SimulationConfig::from_toml_str("width = [invalid", &test_path()).unwrap_err();
        assert!(err.contains("test-config.toml"));
    }

    #[test]
    fn forest_params_copied_from_config() {
        let config = SimulationConfig::from_toml_str("width = 9\ndensity = 0.5", &test_path()).unwrap();
        let params = config.forest_params();
        assert_eq!(params.width, 9);
        assert_eq!(params.height, 80);
        assert_eq!(params.density, 0.5);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn from_file_loads_valid_config() {
        let mut tmp = NamedTempFile::new().unwrap();
        use std::io::Write;
        writeln!(tmp, "humidity = 0.9").unwrap();
        let config = SimulationConfig::from_file(tmp.path()).unwrap();
        assert_eq!(config.humidity, 0.9);
    }

    #[test]
    fn bundled_config_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("forestfire.toml");
        let config = SimulationConfig::from_file(&path).unwrap();
        assert_eq!(config.runs, 10);
        assert_eq!(config.spread_mode, SpreadMode::Sequential);
    }

    #[test]
    fn from_file_missing_file_error() {
        let err = SimulationConfig::from_file(Path::new("/nonexistent/forestfire.toml")).unwrap_err();
        assert!(err.contains("Cannot read"));
    }
}
