use bevy::prelude::*;

use crate::shared::*;

/// Running economy totals for the host's stats screens.
#[derive(Resource, Debug, Clone, Default)]
pub struct EconomyStats {
    pub total_earned: u64,
    pub total_spent: u64,
    pub total_transactions: u64,
}

/// Applies MoneyChangeEvents to PlayerState.money.
/// Debits are validated by the sending system; if two debits race inside
/// one frame the balance clamps to 0 with a warning rather than wrapping.
pub fn apply_money_changes(
    mut money_events: EventReader<MoneyChangeEvent>,
    mut player: ResMut<PlayerState>,
    mut stats: ResMut<EconomyStats>,
) {
    for ev in money_events.read() {
        if ev.amount >= 0 {
            let gain = ev.amount as u32;
            player.money = player.money.saturating_add(gain);
            stats.total_earned = stats.total_earned.saturating_add(gain as u64);
            info!(
                "[Economy] +${}: {}. New balance: ${}",
                gain, ev.reason, player.money
            );
        } else {
            let cost = (-ev.amount) as u32;
            if player.money >= cost {
                player.money -= cost;
                stats.total_spent = stats.total_spent.saturating_add(cost as u64);
                info!(
                    "[Economy] -${}: {}. New balance: ${}",
                    cost, ev.reason, player.money
                );
            } else {
                warn!(
                    "[Economy] Tried to spend ${} with only ${} (reason: {}). Clamping to 0.",
                    cost, player.money, ev.reason
                );
                stats.total_spent = stats.total_spent.saturating_add(player.money as u64);
                player.money = 0;
            }
        }
        stats.total_transactions += 1;
    }
}

/// Format a money amount as a display string (e.g. "$1,234").
pub fn format_money(amount: u32) -> String {
    let digits: Vec<char> = amount.to_string().chars().collect();
    let mut result = String::from("$");
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*ch);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0), "$0");
        assert_eq!(format_money(500), "$500");
        assert_eq!(format_money(1234), "$1,234");
        assert_eq!(format_money(100000), "$100,000");
        assert_eq!(format_money(1000000), "$1,000,000");
    }

    #[test]
    fn test_economy_stats_default() {
        let stats = EconomyStats::default();
        assert_eq!(stats.total_earned, 0);
        assert_eq!(stats.total_spent, 0);
        assert_eq!(stats.total_transactions, 0);
    }
}
