mod shared;
mod calendar;
mod farming;
mod automation;
mod market;
mod economy;
mod factory;
mod quests;
mod data;
mod host;

use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use shared::*;

fn main() {
    App::new()
        // Headless runner: the 250 ms loop is the factory's polling
        // interval. No window, no renderer.
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(250))),
        )
        .add_plugins(StatesPlugin)
        .add_plugins(LogPlugin::default())
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<GameRng>()
        .init_resource::<Calendar>()
        .init_resource::<PlayerState>()
        .init_resource::<Inventory>()
        .init_resource::<FarmState>()
        .init_resource::<UnlockedAreas>()
        .init_resource::<FeatureUnlocks>()
        .init_resource::<AreaAutomation>()
        .init_resource::<MarketState>()
        .init_resource::<OptionBook>()
        .init_resource::<FactoryState>()
        .init_resource::<QuestLog>()
        .init_resource::<CropRegistry>()
        .init_resource::<RecipeRegistry>()
        // Player command events
        .add_event::<AdvanceMonthEvent>()
        .add_event::<PlantSeedEvent>()
        .add_event::<WaterTileEvent>()
        .add_event::<HarvestTileEvent>()
        .add_event::<SellCropEvent>()
        .add_event::<ClearTileEvent>()
        .add_event::<BuyTileEvent>()
        .add_event::<BuyItemEvent>()
        .add_event::<SellItemEvent>()
        .add_event::<UnlockAreaEvent>()
        .add_event::<BuyAreaUpgradeEvent>()
        .add_event::<ToggleAreaUpgradeEvent>()
        .add_event::<SetAutoSellEvent>()
        .add_event::<SetSeederSeedEvent>()
        .add_event::<StartFactoryJobEvent>()
        .add_event::<CollectFactoryJobEvent>()
        .add_event::<BuyFactorySlotEvent>()
        .add_event::<BuyFactoryUpgradeEvent>()
        .add_event::<BuyOptionEvent>()
        .add_event::<ExerciseOptionEvent>()
        .add_event::<ClaimQuestRewardEvent>()
        // Engine notification events
        .add_event::<MonthEndEvent>()
        .add_event::<SeasonChangeEvent>()
        .add_event::<MoneyChangeEvent>()
        .add_event::<CropPlantedEvent>()
        .add_event::<TileWateredEvent>()
        .add_event::<CropHarvestedEvent>()
        .add_event::<ItemSoldEvent>()
        .add_event::<FactoryProducedEvent>()
        .add_event::<OptionPurchasedEvent>()
        .add_event::<AreaUnlockedEvent>()
        .add_event::<UpgradeInstalledEvent>()
        .add_event::<QuestCompletedEvent>()
        .add_event::<ActionRejectedEvent>()
        .add_event::<ToastEvent>()
        // Domain plugins
        .add_plugins(calendar::CalendarPlugin)
        .add_plugins(market::MarketPlugin)
        .add_plugins(farming::FarmingPlugin)
        .add_plugins(automation::AutomationPlugin)
        .add_plugins(factory::FactoryPlugin)
        .add_plugins(economy::EconomyPlugin)
        .add_plugins(quests::QuestPlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        // Console collaborator
        .add_plugins(host::HostPlugin)
        .run();
}
