use orderbook_reconciler::config::GeneratorConfig;
use orderbook_reconciler::{ConfigError, OrderbookConfig};
use std::io::Write;
use std::time::Duration;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OrderbookConfig::default();
        assert_eq!(config.channel_capacity, 65536);
        assert_eq!(config.generator.quantity_range(), 0.1..10.1);
        assert_eq!(config.generator.price_range(), 50.0..1050.0);
        assert_eq!(config.generator.seed, None);
        assert_eq!(config.submission.delay(), Duration::from_millis(100));
        assert_eq!(config.board.highlight(), Duration::from_millis(600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_other_defaults() {
        let config = OrderbookConfig::from_json_str(
            r#"{"submission": {"delay_ms": 5}, "generator": {"seed": 9}}"#,
        )
        .unwrap();
        assert_eq!(config.submission.delay_ms, 5);
        assert_eq!(config.generator.seed, Some(9));
        assert_eq!(config.generator.price_min, 50.0);
        assert_eq!(config.board.highlight_ms, 600);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = OrderbookConfig::from_json_str(
            r#"{"generator": {"quantity_min": 5.0, "quantity_max": 1.0}}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidRange {
                name: "quantity",
                ..
            }
        ));
    }

    #[test]
    fn test_non_positive_bound_rejected() {
        let config = GeneratorConfig {
            price_min: 0.0,
            ..GeneratorConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { name: "price", .. })
        ));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            OrderbookConfig::from_json_str(r#"{"channel_capacity": 0}"#),
            Err(ConfigError::ZeroCapacity)
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            OrderbookConfig::from_json_str("{"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"board": {"highlight_ms": 250}}"#).unwrap();

        let config = OrderbookConfig::from_path(file.path()).unwrap();
        assert_eq!(config.board.highlight(), Duration::from_millis(250));
    }

    #[test]
    fn test_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            OrderbookConfig::from_path(dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}
