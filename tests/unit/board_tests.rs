use orderbook_reconciler::board::{Board, Row};
use orderbook_reconciler::{Order, RenderInstruction, Side};
use std::time::{Duration, Instant};

#[cfg(test)]
mod tests {
    use super::*;

    const HIGHLIGHT: Duration = Duration::from_millis(600);

    fn rebuilt(now: Instant) -> Board {
        let mut board = Board::new(HIGHLIGHT);
        board.apply(
            &RenderInstruction::FullRebuild {
                buy: vec![Order::new(1.5, 100.0), Order::new(2.0, 95.0)],
                sell: vec![Order::new(1.0, 105.0), Order::new(3.0, 110.0)],
            },
            now,
        );
        board
    }

    fn insert(side: Side, order: Order) -> RenderInstruction {
        RenderInstruction::IncrementalInsert { side, order }
    }

    #[test]
    fn test_new_board_holds_only_separator() {
        let board = Board::default();
        assert_eq!(board.rows(), &[Row::Separator]);
        assert!(board.column(Side::Buy).is_empty());
        assert!(board.column(Side::Sell).is_empty());
    }

    #[test]
    fn test_full_rebuild_layout() {
        let board = rebuilt(Instant::now());
        assert_eq!(board.rows().len(), 5);
        assert_eq!(board.rows()[2], Row::Separator);
        assert_eq!(
            board.column(Side::Buy),
            vec![Order::new(1.5, 100.0), Order::new(2.0, 95.0)]
        );
        assert_eq!(
            board.column(Side::Sell),
            vec![Order::new(1.0, 105.0), Order::new(3.0, 110.0)]
        );
        assert!(board.rows().iter().all(|row| !row.is_highlighted()));
    }

    #[test]
    fn test_full_rebuild_discards_previous_rows() {
        let now = Instant::now();
        let mut board = rebuilt(now);
        board.apply(&insert(Side::Buy, Order::new(9.0, 900.0)), now);
        board.apply(
            &RenderInstruction::FullRebuild {
                buy: vec![],
                sell: vec![Order::new(1.0, 105.0)],
            },
            now,
        );
        assert_eq!(board.rows().len(), 2);
        assert_eq!(board.rows()[0], Row::Separator);
    }

    #[test]
    fn test_buy_insert_goes_to_top() {
        let now = Instant::now();
        let mut board = rebuilt(now);
        board.apply(&insert(Side::Buy, Order::new(0.5, 102.0)), now);

        assert_eq!(board.column(Side::Buy)[0], Order::new(0.5, 102.0));
        assert!(board.rows()[0].is_highlighted());
        assert_eq!(board.rows().len(), 6);
    }

    #[test]
    fn test_sell_insert_goes_below_separator() {
        let now = Instant::now();
        let mut board = rebuilt(now);
        board.apply(&insert(Side::Sell, Order::new(4.2, 300.0)), now);

        assert_eq!(board.rows()[2], Row::Separator);
        assert_eq!(
            board.column(Side::Sell),
            vec![
                Order::new(4.2, 300.0),
                Order::new(1.0, 105.0),
                Order::new(3.0, 110.0),
            ]
        );
        assert!(board.rows()[3].is_highlighted());
    }

    #[test]
    fn test_buy_insert_with_only_sell_rows_stays_above_separator() {
        let now = Instant::now();
        let mut board = Board::new(HIGHLIGHT);
        board.apply(
            &RenderInstruction::FullRebuild {
                buy: vec![],
                sell: vec![Order::new(1.0, 105.0)],
            },
            now,
        );
        board.apply(&insert(Side::Buy, Order::new(2.0, 99.0)), now);

        assert!(matches!(board.rows()[0], Row::Order { side: Side::Buy, .. }));
        assert_eq!(board.rows()[1], Row::Separator);
    }

    #[test]
    fn test_inserts_on_empty_board() {
        let now = Instant::now();
        let mut board = Board::new(HIGHLIGHT);
        board.apply(&insert(Side::Sell, Order::new(1.0, 105.0)), now);
        board.apply(&insert(Side::Buy, Order::new(2.0, 99.0)), now);

        assert_eq!(board.rows()[1], Row::Separator);
        assert_eq!(board.column(Side::Buy), vec![Order::new(2.0, 99.0)]);
        assert_eq!(board.column(Side::Sell), vec![Order::new(1.0, 105.0)]);
    }

    #[test]
    fn test_none_leaves_board_untouched() {
        let now = Instant::now();
        let mut board = rebuilt(now);
        let before = board.rows().to_vec();
        board.apply(&RenderInstruction::None, now);
        assert_eq!(board.rows(), &before[..]);
    }

    #[test]
    fn test_highlight_expires_after_duration() {
        let now = Instant::now();
        let mut board = rebuilt(now);
        board.apply(&insert(Side::Buy, Order::new(0.5, 102.0)), now);
        board.apply(
            &insert(Side::Sell, Order::new(4.2, 300.0)),
            now + Duration::from_millis(300),
        );

        assert_eq!(board.expire_highlights(now + Duration::from_millis(599)), 0);
        assert_eq!(board.expire_highlights(now + HIGHLIGHT), 1);
        assert_eq!(board.rows().iter().filter(|r| r.is_highlighted()).count(), 1);
        assert_eq!(board.expire_highlights(now + Duration::from_secs(1)), 1);
        assert!(board.rows().iter().all(|row| !row.is_highlighted()));
    }

    #[test]
    fn test_lines_format_quantity_and_price() {
        let now = Instant::now();
        let mut board = Board::new(HIGHLIGHT);
        board.apply(
            &RenderInstruction::FullRebuild {
                buy: vec![Order::new(1.23456789, 100.789)],
                sell: vec![Order::new(5.0, 100.0)],
            },
            now,
        );
        board.apply(&insert(Side::Buy, Order::new(0.1, 50.0)), now);

        assert_eq!(
            board.lines(),
            vec![
                "* 0.1000     50.00",
                "  1.2346    100.79",
                "----------------",
                "  5.0000    100.00",
            ]
        );
    }

    #[test]
    fn test_order_display_rounding() {
        assert_eq!(Order::new(1.23456789, 100.789).to_string(), "1.2346 100.79");
        assert_eq!(Order::new(5.0, 100.0).to_string(), "5.0000 100.00");
    }
}
