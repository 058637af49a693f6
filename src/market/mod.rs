//! Market domain — synthetic golden apple price action and the single-
//! period options written against it.
//!
//! The candle generator is a biased random walk: mildly upward most
//! months, with rare spikes and dips, hard-clamped so the commodity never
//! becomes worthless or absurd.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

mod options;

pub use options::settlement_value;

pub struct MarketPlugin;

impl Plugin for MarketPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), seed_market)
            .add_systems(
                Update,
                on_month_end.in_set(MonthEndSet::Market),
            )
            .add_systems(
                Update,
                (options::handle_buy_option, options::handle_exercise_option)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                options::on_month_end.in_set(MonthEndSet::Options),
            );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Candle generation
// ─────────────────────────────────────────────────────────────────────────────

/// Produce the next monthly candle from the previous close.
///
/// Factor: 90% of months uniform 0.95-1.10, 5% spike 1.20-1.35, 5% dip
/// 0.75-0.90. Close clamps to [MARKET_MIN_PRICE, MARKET_MAX_PRICE];
/// high/low wrap the body inside a band of 15% of the body max, with the
/// low floored at MARKET_LOW_FLOOR.
pub fn next_candle(rng: &mut impl Rng, prev_close: u32) -> MarketCandle {
    let mut factor: f64 = 0.95 + rng.gen::<f64>() * 0.15;

    let roll: f64 = rng.gen();
    if roll < 0.05 {
        factor = 1.20 + rng.gen::<f64>() * 0.15;
    } else if roll > 0.95 {
        factor = 0.75 + rng.gen::<f64>() * 0.15;
    }

    let open = prev_close;
    let close = ((open as f64 * factor).floor() as u32)
        .clamp(MARKET_MIN_PRICE, MARKET_MAX_PRICE);

    let body_max = open.max(close);
    let body_min = open.min(close);
    let volatility = body_max as f64 * 0.15;

    let high = (body_max as f64 + rng.gen::<f64>() * volatility).floor() as u32;
    let low = (body_min as f64 - rng.gen::<f64>() * volatility)
        .floor()
        .max(MARKET_LOW_FLOOR as f64) as u32;

    MarketCandle { open, close, high, low }
}

/// World init: walk the generator forward from the base price so the
/// chart opens with a full year of history and a live spot price.
fn seed_market(mut market: ResMut<MarketState>, mut rng: ResMut<GameRng>) {
    if !market.history.is_empty() {
        return;
    }
    let mut last = MARKET_BASE_PRICE;
    for _ in 0..MARKET_SEED_CANDLES {
        let candle = next_candle(&mut rng.0, last);
        last = candle.close;
        market.history.push(candle);
    }
    market.price = last;
    info!(
        "[Market] Seeded {} candles, opening spot {}",
        MARKET_SEED_CANDLES, market.price
    );
}

/// Month end: one new candle, spot moves to its close.
fn on_month_end(
    mut month_end: EventReader<MonthEndEvent>,
    mut market: ResMut<MarketState>,
    mut rng: ResMut<GameRng>,
) {
    for _ in month_end.read() {
        let candle = next_candle(&mut rng.0, market.price);
        market.price = candle.close;
        market.history.push(candle);
        info!("[Market] New candle, spot {}", market.price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_candle_continuity_and_bounds() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut prev = MARKET_BASE_PRICE;
        for _ in 0..1000 {
            let c = next_candle(&mut rng, prev);
            assert_eq!(c.open, prev, "open must equal previous close");
            assert!(c.close >= MARKET_MIN_PRICE && c.close <= MARKET_MAX_PRICE);
            assert!(c.low <= c.open.min(c.close));
            assert!(c.high >= c.open.max(c.close));
            assert!(c.low >= MARKET_LOW_FLOOR);
            prev = c.close;
        }
    }

    #[test]
    fn test_candle_never_leaves_clamp_from_extremes() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..200 {
            let c = next_candle(&mut rng, MARKET_MAX_PRICE);
            assert!(c.close <= MARKET_MAX_PRICE);
            let c = next_candle(&mut rng, MARKET_MIN_PRICE);
            assert!(c.close >= MARKET_MIN_PRICE);
        }
    }

    #[test]
    fn test_walk_has_mild_upward_bias() {
        // With a 0.95-1.10 base band the expected factor is > 1, so over
        // many independent draws from a fixed price the average close
        // should sit above the open.
        let mut rng = StdRng::seed_from_u64(3);
        let mut total: u64 = 0;
        let n = 4000;
        for _ in 0..n {
            total += next_candle(&mut rng, 10_000).close as u64;
        }
        assert!(total / n > 10_000);
    }
}
