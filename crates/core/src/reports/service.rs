//! Daily statement computation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{DailyStats, TransactionSummary};
use crate::ledger::TransactionKind;

/// Builds the statement for `date` from that day's transactions and the
/// closing balance.
///
/// The opening balance is derived by undoing the day's movements:
///
/// `opening = closing - topups - refunds + customer_deposits + withdrawals`
#[must_use]
pub fn daily_stats(
    date: NaiveDate,
    closing_balance: Decimal,
    transactions: &[TransactionSummary],
) -> DailyStats {
    let mut total_topups = Decimal::ZERO;
    let mut total_customer_deposits = Decimal::ZERO;
    let mut total_withdrawals = Decimal::ZERO;
    let mut total_refunds = Decimal::ZERO;

    for tx in transactions {
        match tx.kind {
            TransactionKind::Topup => total_topups += tx.amount,
            TransactionKind::CustomerDeposit => total_customer_deposits += tx.amount,
            TransactionKind::Withdrawal => total_withdrawals += tx.amount,
            TransactionKind::Refund => total_refunds += tx.amount,
        }
    }

    let opening_balance = closing_balance - total_topups - total_refunds
        + total_customer_deposits
        + total_withdrawals;

    DailyStats {
        date,
        opening_balance,
        closing_balance,
        total_topups,
        total_customer_deposits,
        total_withdrawals,
        total_refunds,
        transaction_count: transactions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn tx(kind: TransactionKind, amount: Decimal) -> TransactionSummary {
        TransactionSummary { kind, amount }
    }

    #[test]
    fn test_empty_day_has_flat_statement() {
        let stats = daily_stats(day(), dec!(750), &[]);

        assert_eq!(stats.opening_balance, dec!(750));
        assert_eq!(stats.closing_balance, dec!(750));
        assert_eq!(stats.transaction_count, 0);
        assert_eq!(stats.net_movement(), Decimal::ZERO);
    }

    #[test]
    fn test_mixed_day_buckets_and_opening() {
        // Opening 500: +1000 topup, -400 deposit, -150 withdrawal,
        // +50 refund leaves 1000 at close.
        let txs = [
            tx(TransactionKind::Topup, dec!(1000)),
            tx(TransactionKind::CustomerDeposit, dec!(400)),
            tx(TransactionKind::Withdrawal, dec!(150)),
            tx(TransactionKind::Refund, dec!(50)),
        ];

        let stats = daily_stats(day(), dec!(1000), &txs);

        assert_eq!(stats.total_topups, dec!(1000));
        assert_eq!(stats.total_customer_deposits, dec!(400));
        assert_eq!(stats.total_withdrawals, dec!(150));
        assert_eq!(stats.total_refunds, dec!(50));
        assert_eq!(stats.opening_balance, dec!(500));
        assert_eq!(stats.transaction_count, 4);
        assert_eq!(
            stats.closing_balance - stats.opening_balance,
            stats.net_movement()
        );
    }

    #[rstest]
    #[case(TransactionKind::Topup, dec!(300), dec!(-300))]
    #[case(TransactionKind::Refund, dec!(300), dec!(-300))]
    #[case(TransactionKind::CustomerDeposit, dec!(300), dec!(300))]
    #[case(TransactionKind::Withdrawal, dec!(300), dec!(300))]
    fn test_single_kind_opening_offset(
        #[case] kind: TransactionKind,
        #[case] amount: Decimal,
        #[case] offset: Decimal,
    ) {
        let stats = daily_stats(day(), dec!(1000), &[tx(kind, amount)]);
        assert_eq!(stats.opening_balance, dec!(1000) + offset);
    }

    fn summary_strategy() -> impl Strategy<Value = TransactionSummary> {
        (0u8..4, 1i64..=100_000).prop_map(|(k, cents)| {
            let kind = match k {
                0 => TransactionKind::Topup,
                1 => TransactionKind::CustomerDeposit,
                2 => TransactionKind::Withdrawal,
                _ => TransactionKind::Refund,
            };
            TransactionSummary {
                kind,
                amount: Decimal::new(cents, 2),
            }
        })
    }

    proptest! {
        /// Replaying the day forward from the derived opening balance
        /// always lands exactly on the closing balance.
        #[test]
        fn forward_replay_recovers_closing(
            txs in proptest::collection::vec(summary_strategy(), 0..50),
            closing_cents in 0i64..=10_000_000,
        ) {
            let closing = Decimal::new(closing_cents, 2);
            let stats = daily_stats(day(), closing, &txs);

            let mut replay = stats.opening_balance;
            for tx in &txs {
                replay += tx.kind.signed_delta(tx.amount);
            }

            prop_assert_eq!(replay, closing);
            prop_assert_eq!(
                stats.closing_balance - stats.opening_balance,
                stats.net_movement()
            );
        }
    }
}
