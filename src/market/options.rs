//! Single-period call/put contracts on the golden apple.
//!
//! The premium is paid in kind (one apple), the strike is the spot at
//! issue, and every contract lives exactly one advance: issued on turn N,
//! exercisable until the advance into turn N+2 removes it.

use bevy::prelude::*;

use crate::shared::*;

/// Intrinsic value of a contract at the given spot, in money. Negative
/// means out of the money.
pub fn settlement_value(option: &FinancialOption, spot: u32) -> i64 {
    let diff = match option.kind {
        OptionKind::Call => spot as i64 - option.strike as i64,
        OptionKind::Put => option.strike as i64 - spot as i64,
    };
    diff * option.contract_size as i64
}

// ─────────────────────────────────────────────────────────────────────────────
// Buy
// ─────────────────────────────────────────────────────────────────────────────

/// Writes a new contract: one golden apple premium, strike at spot,
/// expiring after the next advance.
pub fn handle_buy_option(
    mut events: EventReader<BuyOptionEvent>,
    mut inventory: ResMut<Inventory>,
    mut book: ResMut<OptionBook>,
    market: Res<MarketState>,
    calendar: Res<Calendar>,
    mut purchased: EventWriter<OptionPurchasedEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        if !inventory.try_remove(GOLDEN_APPLE_FRUIT, 1) {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::InsufficientItems {
                    item_id: GOLDEN_APPLE_FRUIT.to_string(),
                    needed: 1,
                    have: inventory.count(GOLDEN_APPLE_FRUIT),
                },
                message: "Need 1 Golden Apple to pay the premium.".to_string(),
            });
            continue;
        }

        let id = book.next_id;
        book.next_id += 1;
        book.options.push(FinancialOption {
            id,
            kind: ev.kind,
            strike: market.price,
            premium: 1,
            contract_size: 1,
            expiry_turn: calendar.turn + 1,
        });

        info!(
            "[Options] {:?} #{} written at strike {}, expires turn {}",
            ev.kind,
            id,
            market.price,
            calendar.turn + 1
        );
        purchased.send(OptionPurchasedEvent { kind: ev.kind });
        toasts.send(ToastEvent {
            message: format!("{:?} option purchased. Paid 1 apple.", ev.kind),
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Exercise
// ─────────────────────────────────────────────────────────────────────────────

/// Settles a contract at the current spot. Out-of-the-money contracts are
/// rejected untouched; a stale id is a no-op.
pub fn handle_exercise_option(
    mut events: EventReader<ExerciseOptionEvent>,
    mut book: ResMut<OptionBook>,
    market: Res<MarketState>,
    calendar: Res<Calendar>,
    mut money: EventWriter<MoneyChangeEvent>,
    mut toasts: EventWriter<ToastEvent>,
    mut rejected: EventWriter<ActionRejectedEvent>,
) {
    for ev in events.read() {
        let Some(index) = book.options.iter().position(|o| o.id == ev.option_id) else {
            // Already exercised or expired — stale reference, ignore.
            continue;
        };

        let profit = settlement_value(&book.options[index], market.price);
        if profit <= 0 {
            rejected.send(ActionRejectedEvent {
                kind: RejectionKind::OutOfTheMoney,
                message: "Option is worthless (out of the money).".to_string(),
            });
            continue;
        }

        let option = book.options.remove(index);
        let turn = calendar.turn;
        book.history.push(OptionHistoryRecord {
            turn,
            kind: option.kind,
            strike: option.strike,
            market_price: market.price,
            profit: profit as u32,
        });

        money.send(MoneyChangeEvent {
            amount: profit,
            reason: format!("{:?} option exercised", option.kind),
        });
        toasts.send(ToastEvent {
            message: format!("Exercised! Earned ${}", profit),
        });
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Month end — expiry round
// ─────────────────────────────────────────────────────────────────────────────

/// Runs after the new candle: silently drops contracts past expiry,
/// prunes the receipt window, and reports how many survivors are now in
/// the money against the fresh close.
pub fn on_month_end(
    mut month_end: EventReader<MonthEndEvent>,
    mut book: ResMut<OptionBook>,
    market: Res<MarketState>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for ev in month_end.read() {
        let before = book.options.len();
        book.options.retain(|o| o.expiry_turn >= ev.turn);
        let expired = before - book.options.len();
        if expired > 0 {
            info!("[Options] {} contract(s) expired unexercised", expired);
            toasts.send(ToastEvent {
                message: format!("{} unused option(s) expired.", expired),
            });
        }

        book.history
            .retain(|h| h.turn + OPTION_HISTORY_TURNS >= ev.turn);

        let profitable = book
            .options
            .iter()
            .filter(|o| settlement_value(o, market.price) > 0)
            .count();
        if profitable > 0 {
            toasts.send(ToastEvent {
                message: format!("You have {} profitable option(s)!", profitable),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(strike: u32, expiry_turn: u32) -> FinancialOption {
        FinancialOption {
            id: 0,
            kind: OptionKind::Call,
            strike,
            premium: 1,
            contract_size: 1,
            expiry_turn,
        }
    }

    #[test]
    fn test_call_settlement() {
        let opt = call(10_000, 1);
        assert_eq!(settlement_value(&opt, 12_000), 2_000);
        assert_eq!(settlement_value(&opt, 10_000), 0);
        assert_eq!(settlement_value(&opt, 8_000), -2_000);
    }

    #[test]
    fn test_put_settlement() {
        let opt = FinancialOption {
            kind: OptionKind::Put,
            ..call(10_000, 1)
        };
        assert_eq!(settlement_value(&opt, 8_000), 2_000);
        assert_eq!(settlement_value(&opt, 12_000), -2_000);
    }

    #[test]
    fn test_expiry_retention_rule() {
        // Options survive the advance into their expiry turn and are
        // dropped by the one after it.
        let mut book = OptionBook::default();
        book.options.push(call(10_000, 2));

        book.options.retain(|o| o.expiry_turn >= 2);
        assert_eq!(book.options.len(), 1, "still live on its expiry turn");

        book.options.retain(|o| o.expiry_turn >= 3);
        assert!(book.options.is_empty(), "gone once the expiry turn passes");
    }

    #[test]
    fn test_history_window() {
        let mut book = OptionBook::default();
        for turn in 0..20 {
            book.history.push(OptionHistoryRecord {
                turn,
                kind: OptionKind::Call,
                strike: 1,
                market_price: 1,
                profit: 1,
            });
        }
        let current = 20;
        book.history.retain(|h| h.turn + OPTION_HISTORY_TURNS >= current);
        assert!(book.history.iter().all(|h| h.turn >= 8));
        assert_eq!(book.history.len(), 12);
    }
}
