use serde::{Deserialize, Serialize};

/// Parameters used to build one forest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub width: usize,
    pub height: usize,
    pub density: f64,
    pub humidity: f64,
}

impl ForestParams {
    /// Validate parameter ranges. All problems are reported together.
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = Vec::new();

        if self.width == 0 {
            errors.push(format!("width must be > 0, got {}", self.width));
        }
        if self.height == 0 {
            errors.push(format!("height must be > 0, got {}", self.height));
        }
        if !(0.0..=1.0).contains(&self.density) {
            errors.push(format!("density must be 0.0-1.0, got {}", self.density));
        }
        if !(0.0..=1.0).contains(&self.humidity) {
            errors.push(format!("humidity must be 0.0-1.0, got {}", self.humidity));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors.join("\n"))
        }
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Number of trees a forest built from these parameters holds.
    pub fn target_tree_count(&self) -> usize {
        let target = (self.cell_count() as f64 * self.density).round() as usize;
        target.min(self.cell_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(width: usize, height: usize, density: f64, humidity: f64) -> ForestParams {
        ForestParams {
            width,
            height,
            density,
            humidity,
        }
    }

    #[test]
    fn valid_params_pass() {
        assert!(params(10, 10, 0.5, 0.5).validate().is_ok());
        assert!(params(1, 1, 0.0, 1.0).validate().is_ok());
        assert!(params(1, 1, 1.0, 0.0).validate().is_ok());
    }

    #[test]
    fn density_out_of_range_rejected() {
        let err = params(10, 10, 1.5, 0.2).validate().unwrap_err();
        assert!(err.contains("density"));
        let err = params(10, 10, -0.1, 0.2).validate().unwrap_err();
        assert!(err.contains("density"));
    }

    #[test]
    fn nan_density_rejected() {
        assert!(params(10, 10, f64::NAN, 0.2).validate().is_err());
    }

    #[test]
    fn all_errors_reported_together() {
        let err = params(0, 0, 2.0, -1.0).validate().unwrap_err();
        assert!(err.contains("width"));
        assert!(err.contains("height"));
        assert!(err.contains("density"));
        assert!(err.contains("humidity"));
    }

    #[test]
    fn target_count_rounds() {
        assert_eq!(params(10, 10, 0.555, 0.0).target_tree_count(), 56);
        assert_eq!(params(3, 1, 0.5, 0.0).target_tree_count(), 2);
        assert_eq!(params(3, 1, 0.1, 0.0).target_tree_count(), 0);
        assert_eq!(params(7, 3, 1.0, 0.0).target_tree_count(), 21);
    }
}
