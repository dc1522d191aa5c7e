//! Property tests for the ledger service: random operation sequences
//! against the in-memory register, checked against a plain running total.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::LedgerService;
use crate::testing::{MemoryBalance, MemoryRecorder};

#[derive(Debug, Clone, Copy)]
enum Op {
    TopUp(i64),
    Deduct(i64),
    Refund(i64),
    Withdraw(i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // Amounts in cents, 1..=50_000, so sums stay far from overflow.
    let cents = 1i64..=50_000;
    prop_oneof![
        cents.clone().prop_map(Op::TopUp),
        cents.clone().prop_map(Op::Deduct),
        cents.clone().prop_map(Op::Refund),
        cents.prop_map(Op::Withdraw),
    ]
}

fn to_amount(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

proptest! {
    /// After any sequence of operations the balance equals the running
    /// total of the operations that succeeded, and never dips below zero
    /// at any intermediate step.
    #[test]
    fn balance_matches_model_and_stays_non_negative(ops in proptest::collection::vec(op_strategy(), 1..60)) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        rt.block_on(async {
            let balance = Arc::new(MemoryBalance::empty());
            let recorder = Arc::new(MemoryRecorder::default());
            let ledger = LedgerService::new(Arc::clone(&balance), Arc::clone(&recorder));

            let mut model = Decimal::ZERO;
            let mut successes = 0usize;

            for op in &ops {
                let result = match *op {
                    Op::TopUp(c) => ledger.top_up(to_amount(c)).await,
                    Op::Deduct(c) => ledger.deduct(to_amount(c), "prop", None).await,
                    Op::Refund(c) => ledger.refund(to_amount(c)).await,
                    Op::Withdraw(c) => ledger.withdraw(to_amount(c), "prop").await,
                };
                if let Ok(receipt) = result {
                    let delta = match *op {
                        Op::TopUp(c) | Op::Refund(c) => to_amount(c),
                        Op::Deduct(c) | Op::Withdraw(c) => -to_amount(c),
                    };
                    model += delta;
                    successes += 1;
                    prop_assert_eq!(receipt.new_balance, model);
                }
                prop_assert!(ledger.balance().await >= Decimal::ZERO);
                prop_assert!(model >= Decimal::ZERO);
            }

            prop_assert_eq!(ledger.balance().await, model);
            prop_assert_eq!(recorder.transactions().len(), successes);
            Ok(())
        })?;
    }

    /// Debits only succeed when covered, and every recorded transaction
    /// carries the signed delta its kind implies.
    #[test]
    fn recorded_kinds_reconstruct_the_balance(ops in proptest::collection::vec(op_strategy(), 1..40)) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap();
        rt.block_on(async {
            let balance = Arc::new(MemoryBalance::empty());
            let recorder = Arc::new(MemoryRecorder::default());
            let ledger = LedgerService::new(Arc::clone(&balance), Arc::clone(&recorder));

            for op in &ops {
                let _ = match *op {
                    Op::TopUp(c) => ledger.top_up(to_amount(c)).await,
                    Op::Deduct(c) => ledger.deduct(to_amount(c), "prop", None).await,
                    Op::Refund(c) => ledger.refund(to_amount(c)).await,
                    Op::Withdraw(c) => ledger.withdraw(to_amount(c), "prop").await,
                };
            }

            // Replaying the recorded transactions through signed_delta
            // reproduces the live balance exactly.
            let replayed: Decimal = recorder
                .transactions()
                .iter()
                .map(|tx| tx.kind.signed_delta(tx.amount))
                .sum();
            prop_assert_eq!(replayed, ledger.balance().await);

            // And every stored magnitude is positive.
            for tx in recorder.transactions() {
                prop_assert!(tx.amount > Decimal::ZERO);
            }
            Ok(())
        })?;
    }
}
