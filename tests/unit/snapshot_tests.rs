use orderbook_reconciler::snapshot::parse_snapshot;
use orderbook_reconciler::{
    FileSnapshotSource, Order, OrderBookSnapshot, Side, SnapshotError, SnapshotSource,
    StaticSnapshotSource,
};
use std::io::Write;

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "buy": [[1.5, 100], [2.0, 95]],
        "sell": [[1.0, 105], [3.0, 110]]
    }"#;

    fn sample() -> OrderBookSnapshot {
        OrderBookSnapshot::new(
            vec![Order::new(1.5, 100.0), Order::new(2.0, 95.0)],
            vec![Order::new(1.0, 105.0), Order::new(3.0, 110.0)],
        )
    }

    // --- parsing ---

    #[test]
    fn test_parse_full_snapshot() {
        let snapshot = parse_snapshot(SAMPLE).unwrap();
        assert_eq!(snapshot, sample());
        assert_eq!(snapshot.side(Side::Buy)[0].quantity(), 1.5);
        assert_eq!(snapshot.side(Side::Sell)[1].price(), 110.0);
    }

    #[test]
    fn test_parse_missing_sides_as_empty() {
        assert_eq!(parse_snapshot("{}").unwrap(), OrderBookSnapshot::default());

        let only_sell = parse_snapshot(r#"{"sell": [[1.0, 105]]}"#).unwrap();
        assert!(only_sell.buy.is_empty());
        assert_eq!(only_sell.sell, vec![Order::new(1.0, 105.0)]);

        let null_buy = parse_snapshot(r#"{"buy": null, "sell": [[1.0, 105]]}"#).unwrap();
        assert!(null_buy.buy.is_empty());
        assert_eq!(null_buy.sell, vec![Order::new(1.0, 105.0)]);

        assert_eq!(
            parse_snapshot(r#"{"buy": null, "sell": null}"#).unwrap(),
            OrderBookSnapshot::default()
        );
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let snapshot = parse_snapshot(r#"{"buy": [], "symbol": "BTC/USD"}"#).unwrap();
        assert_eq!(snapshot, OrderBookSnapshot::default());
    }

    #[test]
    fn test_parse_rejects_malformed_orders() {
        assert!(matches!(
            parse_snapshot(r#"{"buy": [[1.5]]}"#),
            Err(SnapshotError::Parse(_))
        ));
        assert!(matches!(
            parse_snapshot("not json"),
            Err(SnapshotError::Parse(_))
        ));
    }

    // --- wire shapes ---

    #[test]
    fn test_snapshot_serializes_as_pairs() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "buy": [[1.5, 100.0], [2.0, 95.0]],
                "sell": [[1.0, 105.0], [3.0, 110.0]]
            })
        );
    }

    #[test]
    fn test_order_request_shape() {
        let request = Order::new(5.5, 100.25).to_request(Side::Sell);
        assert_eq!(
            serde_json::to_value(request).unwrap(),
            serde_json::json!({"side": "sell", "quantity": 5.5, "price": 100.25})
        );
        assert_eq!(request.order(), Order::new(5.5, 100.25));
    }

    // --- sources ---

    #[tokio::test]
    async fn test_file_source_reads_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let source = FileSnapshotSource::new(file.path());
        assert_eq!(source.fetch().await.unwrap(), sample());
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSnapshotSource::new(dir.path().join("data.json"));

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
        assert!(err.to_string().contains("data.json"));
    }

    #[tokio::test]
    async fn test_file_source_malformed_payload() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"buy": "nope"}"#).unwrap();

        let source = FileSnapshotSource::new(file.path());
        assert!(matches!(
            source.fetch().await,
            Err(SnapshotError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_static_source_returns_copy() {
        let source = StaticSnapshotSource::new(sample());
        assert_eq!(source.fetch().await.unwrap(), sample());
        assert_eq!(source.fetch().await.unwrap(), sample());
    }
}
