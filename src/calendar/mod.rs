//! Calendar domain — the turn clock.
//!
//! Owns turn/month/season bookkeeping and the monthly weather roll. An
//! `AdvanceMonthEvent` from the host becomes one `MonthEndEvent` that the
//! rest of the month-end chain (market → options → tiles → quests) runs
//! on, all inside the same frame.

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                MonthEndSet::Calendar,
                MonthEndSet::Market,
                MonthEndSet::Options,
                MonthEndSet::Tiles,
                MonthEndSet::Quests,
                MonthEndSet::Funds,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        )
        .add_systems(
            Update,
            advance_month.in_set(MonthEndSet::Calendar),
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Weather tables
// ─────────────────────────────────────────────────────────────────────────────

/// Monthly weather probabilities per season, walked in declaration order.
/// Each table sums to ~1; any rounding slack falls through to Sunny.
const WEATHER_CHANCE: [(Season, &[(Weather, f64)]); 4] = [
    (
        Season::Spring,
        &[
            (Weather::Sunny, 0.50),
            (Weather::Rainy, 0.40),
            (Weather::Storm, 0.05),
            (Weather::Earthquake, 0.02),
        ],
    ),
    (
        Season::Summer,
        &[
            (Weather::Sunny, 0.40),
            (Weather::Rainy, 0.10),
            (Weather::Storm, 0.20),
            (Weather::Drought, 0.25),
            (Weather::Earthquake, 0.02),
        ],
    ),
    (
        Season::Autumn,
        &[
            (Weather::Sunny, 0.50),
            (Weather::Rainy, 0.30),
            (Weather::Storm, 0.10),
            (Weather::Drought, 0.05),
            (Weather::Earthquake, 0.02),
        ],
    ),
    (
        Season::Winter,
        &[
            (Weather::Sunny, 0.20),
            (Weather::Snowy, 0.75),
            (Weather::Earthquake, 0.02),
        ],
    ),
];

/// Draw next month's weather by accumulating the season's table until the
/// roll falls under the running sum. Defaults to Sunny.
pub fn roll_weather(rng: &mut impl Rng, season: Season) -> Weather {
    let roll: f64 = rng.gen();
    let table = WEATHER_CHANCE
        .iter()
        .find(|(s, _)| *s == season)
        .map(|(_, t)| *t)
        .unwrap_or(&[]);

    let mut cumulative = 0.0;
    for &(weather, chance) in table {
        cumulative += chance;
        if roll <= cumulative {
            return weather;
        }
    }
    Weather::Sunny
}

// ─────────────────────────────────────────────────────────────────────────────
// Advance
// ─────────────────────────────────────────────────────────────────────────────

/// Consumes `AdvanceMonthEvent`: steps turn/month, derives the season,
/// rolls new weather, and emits `MonthEndEvent` (plus `SeasonChangeEvent`
/// on a season boundary) for the downstream month-end systems.
pub fn advance_month(
    mut advance_events: EventReader<AdvanceMonthEvent>,
    mut calendar: ResMut<Calendar>,
    mut rng: ResMut<GameRng>,
    mut month_end: EventWriter<MonthEndEvent>,
    mut season_change: EventWriter<SeasonChangeEvent>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for _ in advance_events.read() {
        let next_turn = calendar.turn + 1;
        let next_month = (next_turn % 12) + 1;
        let next_season = Season::for_month(next_month);
        let previous_weather = calendar.weather;
        let next_weather = roll_weather(&mut rng.0, next_season);

        if next_season != calendar.season {
            season_change.send(SeasonChangeEvent {
                new_season: next_season,
                turn: next_turn,
            });
            toasts.send(ToastEvent {
                message: format!("{:?} has arrived.", next_season),
            });
        }

        if next_weather == Weather::Earthquake {
            toasts.send(ToastEvent {
                message: "Earthquake detected! Check for damage.".to_string(),
            });
        }

        calendar.turn = next_turn;
        calendar.month = next_month;
        calendar.season = next_season;
        calendar.weather = next_weather;

        info!(
            "[Calendar] Turn {}: month {}, {:?}, {:?}",
            next_turn, next_month, next_season, next_weather
        );

        month_end.send(MonthEndEvent {
            turn: next_turn,
            month: next_month,
            season: next_season,
            previous_weather,
            weather: next_weather,
        });
    }
}
