//! Economy domain — the money funnel, the shop, and land purchases.

use bevy::prelude::*;

use crate::shared::*;

pub mod money;
pub mod shop;

pub struct EconomyPlugin;

impl Plugin for EconomyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<money::EconomyStats>()
            .add_systems(
                Update,
                (
                    shop::handle_buy_item,
                    shop::handle_sell_item,
                    shop::handle_unlock_area,
                )
                    .run_if(in_state(GameState::Playing)),
            )
            // Funds settle after everything else has voted on them.
            .add_systems(
                Update,
                money::apply_money_changes.in_set(MonthEndSet::Funds),
            );
    }
}
