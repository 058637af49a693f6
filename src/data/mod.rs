//! Data layer — populates the catalogs at startup.
//!
//! Runs in OnEnter(GameState::Loading), fills the CropRegistry,
//! RecipeRegistry and QuestLog from the hard-coded game-design data in
//! the submodules, then transitions into GameState::Playing. No other
//! domain seeds these resources.

mod crops;
mod quests;
mod recipes;

use bevy::prelude::*;

use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Single system that populates every catalog and starts the game.
fn load_all_data(
    mut crop_registry: ResMut<CropRegistry>,
    mut recipe_registry: ResMut<RecipeRegistry>,
    mut quest_log: ResMut<QuestLog>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("DataPlugin: populating catalogs…");

    crops::populate_crops(&mut crop_registry);
    info!("  Crops loaded: {}", crop_registry.crops.len());

    recipes::populate_recipes(&mut recipe_registry);
    info!("  Recipes loaded: {}", recipe_registry.recipes.len());

    quests::populate_quests(&mut quest_log);
    info!("  Quests loaded: {}", quest_log.quests.len());

    next_state.set(GameState::Playing);
}
