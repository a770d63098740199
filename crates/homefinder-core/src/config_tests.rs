//! Tests for config module

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::io::Write;

    // ========================================================================
    // Defaults
    // ========================================================================

    #[test]
    fn test_config_default_values() {
        // Arrange & Act
        let config = HomefinderConfig::default();

        // Assert
        assert_eq!(config.index.price_bin, 50_000);
        assert_eq!(config.index.initial_capacity, 16);
        assert!((config.index.load_factor - 0.75).abs() < f64::EPSILON);
        assert!(config.query.price_max.is_none());
        assert_eq!(config.query.max_results, 50);
        assert_eq!(config.columns.price, "Sale Price Clean");
        assert_eq!(config.columns.fullbaths, "Full Baths");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(HomefinderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_effective_price_max() {
        // Arrange
        let mut config = HomefinderConfig::default();

        // Act & Assert
        assert!(config.effective_price_max().is_infinite());
        config.query.price_max = Some(400_000.0);
        assert!((config.effective_price_max() - 400_000.0).abs() < f64::EPSILON);
    }

    // ========================================================================
    // TOML parsing
    // ========================================================================

    #[test]
    fn test_from_toml_partial_override() {
        // Arrange
        let toml_str = r#"
            [index]
            price_bin = 25000

            [columns]
            price = "Sale Price"
        "#;

        // Act
        let config = HomefinderConfig::from_toml(toml_str).expect("parse");

        // Assert
        assert_eq!(config.index.price_bin, 25_000);
        assert_eq!(config.index.initial_capacity, 16);
        assert_eq!(config.columns.price, "Sale Price");
        assert_eq!(config.columns.bedrooms, "Bedrooms");
    }

    #[test]
    fn test_from_toml_invalid_type() {
        // Arrange
        let toml_str = r#"
            [index]
            price_bin = "wide"
        "#;

        // Act
        let result = HomefinderConfig::from_toml(toml_str);

        // Assert
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_to_toml_round_trip() {
        // Arrange
        let mut config = HomefinderConfig::default();
        config.query.price_max = Some(750_000.0);
        config.logging.level = "debug".to_string();

        // Act
        let toml_str = config.to_toml().expect("serialize");
        let parsed = HomefinderConfig::from_toml(&toml_str).expect("parse");

        // Assert
        assert_eq!(parsed.query.price_max, Some(750_000.0));
        assert_eq!(parsed.logging.level, "debug");
        assert_eq!(parsed.index, config.index);
    }

    #[test]
    fn test_load_from_path_reads_file() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[query]\nmax_results = 7").expect("write");

        // Act
        let config = HomefinderConfig::load_from_path(file.path()).expect("load");

        // Assert
        assert_eq!(config.query.max_results, 7);
    }

    #[test]
    fn test_load_from_missing_path_uses_defaults() {
        // Arrange
        let dir = tempfile::tempdir().expect("temp dir");

        // Act
        let config =
            HomefinderConfig::load_from_path(dir.path().join("absent.toml")).expect("load");

        // Assert
        assert_eq!(config.index.price_bin, 50_000);
    }

    // ========================================================================
    // Validation
    // ========================================================================

    fn assert_invalid(config: &HomefinderConfig, expected_key: &str) {
        match config.validate() {
            Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, expected_key),
            other => panic!("expected invalid {expected_key}, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_price_bin_zero() {
        let mut config = HomefinderConfig::default();
        config.index.price_bin = 0;
        assert_invalid(&config, "index.price_bin");
    }

    #[test]
    fn test_validate_initial_capacity_zero() {
        let mut config = HomefinderConfig::default();
        config.index.initial_capacity = 0;
        assert_invalid(&config, "index.initial_capacity");
    }

    #[test]
    fn test_validate_load_factor_bounds() {
        let mut config = HomefinderConfig::default();
        config.index.load_factor = 0.0;
        assert_invalid(&config, "index.load_factor");
        config.index.load_factor = 1.01;
        assert_invalid(&config, "index.load_factor");
        config.index.load_factor = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_price_bounds() {
        let mut config = HomefinderConfig::default();
        config.query.price_min = -1.0;
        assert_invalid(&config, "query.price_min");

        config.query.price_min = 500.0;
        config.query.price_max = Some(100.0);
        assert_invalid(&config, "query.price_max");
    }

    #[test]
    fn test_validate_max_results() {
        let mut config = HomefinderConfig::default();
        config.query.max_results = 0;
        assert_invalid(&config, "query.max_results");
        config.query.max_results = 10_001;
        assert_invalid(&config, "query.max_results");
    }

    #[test]
    fn test_validate_empty_column_name() {
        let mut config = HomefinderConfig::default();
        config.columns.price = "  ".to_string();
        assert_invalid(&config, "columns.price");
    }

    #[test]
    fn test_validate_logging_level() {
        let mut config = HomefinderConfig::default();
        config.logging.level = "verbose".to_string();
        assert_invalid(&config, "logging.level");
    }

    #[test]
    fn test_index_config_feeds_posting_store() {
        // Arrange
        let config = HomefinderConfig::from_toml("[index]\nprice_bin = 100000").expect("parse");

        // Act
        let index = crate::SetPostingIndex::from_config(&config.index).expect("index");

        // Assert
        assert_eq!(index.price_bin(), 100_000);
    }
}
