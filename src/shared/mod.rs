//! Shared resources, events, and catalog types for Goldacre.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

// ═══════════════════════════════════════════════════════════════════════
// RNG — single seedable source for all probability-driven behavior
// ═══════════════════════════════════════════════════════════════════════

/// Every random draw in the engine (weather, market candles, earthquake
/// targeting) goes through this resource so a fixed seed replays a run.
#[derive(Resource, Debug)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CALENDAR — the turn clock
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Season for a 1-based calendar month.
    pub fn for_month(month: u32) -> Self {
        match month {
            4..=6 => Season::Summer,
            7..=9 => Season::Autumn,
            10..=12 => Season::Winter,
            _ => Season::Spring,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Rainy,
    Storm,
    Drought,
    Snowy,
    Earthquake,
}

/// Turn-clock state. Advanced only by an explicit `AdvanceMonthEvent`
/// from the host — there is no automatic passage of months.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    /// Completed advances since world start.
    pub turn: u32,
    /// Calendar month, 1-12.
    pub month: u32,
    pub season: Season,
    pub weather: Weather,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            turn: 0,
            month: 1,
            season: Season::Spring,
            weather: Weather::Sunny,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// ITEMS & INVENTORY
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every item type in the game.
/// Using string IDs for data-driven flexibility.
pub type ItemId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Seed,
    Produce,
    Product,
    Special,
}

/// One catalog entry. Seeds, their produce, factory products, and the
/// golden apple all live in the same table, distinguished by category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropDef {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    pub buy_price: u32,
    /// Zero for the golden apple — it always sells at the market spot.
    pub sell_price: u32,
    /// What harvesting a mature plant of this seed yields. None = itself.
    pub harvest_id: Option<ItemId>,
    /// Empty for non-seeds.
    pub seasons: Vec<Season>,
    /// Months from planting to maturity.
    pub duration_months: u32,
    pub cold_resistant: bool,
    pub heat_sensitive: bool,
    /// Some(area) = plantable only in that area.
    pub required_area: Option<usize>,
    pub description: String,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct CropRegistry {
    pub crops: HashMap<ItemId, CropDef>,
}

impl CropRegistry {
    pub fn get(&self, id: &str) -> Option<&CropDef> {
        self.crops.get(id)
    }
}

/// Unbounded item counts keyed by id. The source of truth for everything
/// the player holds that isn't money.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub items: HashMap<ItemId, u32>,
}

impl Inventory {
    pub fn add(&mut self, item_id: &str, quantity: u32) {
        *self.items.entry(item_id.to_string()).or_insert(0) += quantity;
    }

    /// All-or-nothing removal. Returns false (and removes nothing) if the
    /// count is short.
    pub fn try_remove(&mut self, item_id: &str, quantity: u32) -> bool {
        match self.items.get_mut(item_id) {
            Some(count) if *count >= quantity => {
                *count -= quantity;
                if *count == 0 {
                    self.items.remove(item_id);
                }
                true
            }
            _ => false,
        }
    }

    pub fn count(&self, item_id: &str) -> u32 {
        self.items.get(item_id).copied().unwrap_or(0)
    }

    pub fn has(&self, item_id: &str, quantity: u32) -> bool {
        self.count(item_id) >= quantity
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER & ECONOMY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub money: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            money: INITIAL_MONEY,
        }
    }
}

/// Areas the player has bought. Area 0 is owned from the start.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct UnlockedAreas {
    pub ids: Vec<usize>,
}

impl Default for UnlockedAreas {
    fn default() -> Self {
        Self { ids: vec![0] }
    }
}

impl UnlockedAreas {
    pub fn contains(&self, area: usize) -> bool {
        self.ids.contains(&area)
    }
}

pub struct AreaDef {
    pub id: usize,
    pub cost: u32,
    pub name: &'static str,
}

pub const AREAS: [AreaDef; 4] = [
    AreaDef { id: 0, cost: 0, name: "Main Garden" },
    AreaDef { id: 1, cost: 600, name: "East Field" },
    AreaDef { id: 2, cost: 1500, name: "South Valley" },
    AreaDef { id: 3, cost: 100_000, name: "Golden Orchard" },
];

/// Features gated behind quest rewards.
#[derive(Resource, Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FeatureUnlocks {
    pub factory: bool,
    pub farm_os: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// FARMING
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileState {
    Empty,
    Seeded,
    Growing,
    Mature,
    Dead,
    Damaged,
}

/// One grid cell. Created once at world init, reset to Empty on harvest
/// or clearing, never destroyed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: usize,
    pub state: TileState,
    pub crop_id: Option<ItemId>,
    /// Months accumulated while conditions allowed growth.
    pub growth_progress: u32,
    /// 0-100, clamped every tick.
    pub moisture: u32,
    pub is_watered: bool,
    /// Purchasable-but-unowned, independent of area unlock.
    pub is_locked: bool,
    /// Months until a Damaged tile recovers. Meaningful only while Damaged.
    pub recovery_months: u32,
    /// Months a mature golden apple has sat unharvested.
    pub shelf_life: u32,
    /// Advisory text for the host. An Empty tile with a leftover note
    /// also counts as shovel-clearable.
    pub note: Option<String>,
}

impl Tile {
    pub fn new(id: usize, is_locked: bool) -> Self {
        Self {
            id,
            state: TileState::Empty,
            crop_id: None,
            growth_progress: 0,
            moisture: INITIAL_MOISTURE,
            is_watered: false,
            is_locked,
            recovery_months: 0,
            shelf_life: 0,
            note: None,
        }
    }

    pub fn area(&self) -> usize {
        self.id / TILES_PER_AREA
    }

    /// Reset to bare Empty, keeping moisture and lock state.
    pub fn reset(&mut self) {
        self.state = TileState::Empty;
        self.crop_id = None;
        self.growth_progress = 0;
        self.is_watered = false;
        self.shelf_life = 0;
        self.note = None;
    }
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct FarmState {
    pub tiles: Vec<Tile>,
}

impl Default for FarmState {
    fn default() -> Self {
        // Area 0: first four tiles free, the rest bought one by one.
        // Areas 1-3: every tile open, gated by the area purchase itself.
        let tiles = (0..GRID_SIZE)
            .map(|id| Tile::new(id, id < TILES_PER_AREA && id > 3))
            .collect();
        Self { tiles }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// AUTOMATION — per-area upgrades
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaUpgradeKind {
    Irrigation,
    Drone,
    Seeder,
}

impl AreaUpgradeKind {
    pub fn cost(&self) -> u32 {
        match self {
            AreaUpgradeKind::Irrigation => 800,
            AreaUpgradeKind::Drone => 2500,
            AreaUpgradeKind::Seeder => 1500,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AreaUpgradeKind::Irrigation => "irrigation",
            AreaUpgradeKind::Drone => "drone",
            AreaUpgradeKind::Seeder => "seeder",
        }
    }
}

/// Install + enable flags for one area's upgrades. Installed upgrades can
/// be toggled off and on freely without re-purchase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaAutomationConfig {
    pub has_irrigation: bool,
    pub irrigation_enabled: bool,
    pub has_drone: bool,
    pub drone_enabled: bool,
    /// true = drone sells on the spot, false = drone stores the yield.
    pub auto_sell: bool,
    pub has_seeder: bool,
    pub seeder_enabled: bool,
    pub seeder_seed_id: Option<ItemId>,
}

impl AreaAutomationConfig {
    pub fn irrigation_active(&self) -> bool {
        self.has_irrigation && self.irrigation_enabled
    }
    pub fn drone_active(&self) -> bool {
        self.has_drone && self.drone_enabled
    }
    pub fn seeder_active(&self) -> bool {
        self.has_seeder && self.seeder_enabled
    }
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct AreaAutomation {
    /// Indexed by area id.
    pub configs: Vec<AreaAutomationConfig>,
}

impl Default for AreaAutomation {
    fn default() -> Self {
        Self {
            configs: vec![AreaAutomationConfig::default(); AREA_COUNT],
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// MARKET & DERIVATIVES
// ═══════════════════════════════════════════════════════════════════════

/// One month of golden apple price action. Append-only; each candle opens
/// at the previous close.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarketCandle {
    pub open: u32,
    pub close: u32,
    pub high: u32,
    pub low: u32,
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketState {
    /// Current spot price (last candle's close). Never zero after init.
    pub price: u32,
    pub history: Vec<MarketCandle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionKind {
    Call,
    Put,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialOption {
    pub id: u64,
    pub kind: OptionKind,
    /// Spot at issue.
    pub strike: u32,
    /// Golden apples paid up front. Fixed at 1.
    pub premium: u32,
    pub contract_size: u32,
    /// Last turn on which the option may be exercised.
    pub expiry_turn: u32,
}

/// Immutable settlement receipt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionHistoryRecord {
    pub turn: u32,
    pub kind: OptionKind,
    pub strike: u32,
    pub market_price: u32,
    pub profit: u32,
}

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OptionBook {
    pub options: Vec<FinancialOption>,
    /// Rolling 12-turn window of settlement receipts.
    pub history: Vec<OptionHistoryRecord>,
    pub next_id: u64,
}

// ═══════════════════════════════════════════════════════════════════════
// FACTORY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDef {
    pub id: String,
    pub name: String,
    pub input: (ItemId, u32),
    pub output: (ItemId, u32),
    /// Real-time processing duration in seconds (wall clock, not turns).
    pub seconds: f64,
    pub description: String,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct RecipeRegistry {
    pub recipes: HashMap<String, RecipeDef>,
}

impl RecipeRegistry {
    pub fn get(&self, id: &str) -> Option<&RecipeDef> {
        self.recipes.get(id)
    }
}

/// A running (or finished-but-uncollected) production run in one slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingJob {
    pub id: u64,
    pub recipe_id: String,
    pub slot: usize,
    /// App-clock seconds at start/end.
    pub started_at: f64,
    pub ends_at: f64,
    pub complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactoryUpgradeKind {
    /// Per-slot: auto-restart the recipe on collection while input lasts.
    Hopper { slot: usize },
    /// Global: completed jobs collect themselves on the background tick.
    Conveyor,
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct FactoryState {
    /// Purchased processing lines, 1 to FACTORY_SLOT_CAP.
    pub slots: usize,
    /// Hopper installed per slot index.
    pub hoppers: Vec<bool>,
    pub has_conveyor: bool,
    pub jobs: Vec<ProcessingJob>,
    pub next_job_id: u64,
}

impl Default for FactoryState {
    fn default() -> Self {
        Self {
            slots: 1,
            hoppers: vec![false; FACTORY_SLOT_CAP],
            has_conveyor: false,
            jobs: Vec::new(),
            next_job_id: 0,
        }
    }
}

impl FactoryState {
    pub fn job_in_slot(&self, slot: usize) -> Option<&ProcessingJob> {
        self.jobs.iter().find(|j| j.slot == slot)
    }

    pub fn first_free_slot(&self) -> Option<usize> {
        (0..self.slots).find(|&s| self.job_in_slot(s).is_none())
    }

    pub fn next_slot_cost(&self) -> u32 {
        FACTORY_SLOT_BASE_COST * self.slots as u32
    }
}

// ═══════════════════════════════════════════════════════════════════════
// QUESTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    Plant,
    Water,
    Harvest,
    Sell,
    WaitSeason,
    UnlockArea,
    FactoryProduce,
    BuyOption,
    HaveMoney,
    InstallUpgrade,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TaskTarget {
    Item(ItemId),
    Season(Season),
    Area(usize),
    /// Matches AreaUpgradeKind::label() or "hopper"/"conveyor".
    Upgrade(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestTask {
    pub description: String,
    pub kind: TaskKind,
    /// None = any subject matches.
    pub target: Option<TaskTarget>,
    pub count: u32,
    pub current: u32,
    pub complete: bool,
}

impl QuestTask {
    pub fn new(description: &str, kind: TaskKind, target: Option<TaskTarget>, count: u32) -> Self {
        Self {
            description: description.to_string(),
            kind,
            target,
            count,
            current: 0,
            complete: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestStatus {
    Locked,
    Active,
    Completed,
    Claimed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureFlag {
    Factory,
    FarmOs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub tasks: Vec<QuestTask>,
    pub reward_money: u32,
    pub reward_feature: Option<FeatureFlag>,
    pub status: QuestStatus,
}

/// All quests in id order. Invariant: at most one is Active; claiming
/// quest N promotes quest N+1 from Locked.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestLog {
    pub quests: Vec<Quest>,
}

impl QuestLog {
    pub fn active_mut(&mut self) -> Option<&mut Quest> {
        self.quests.iter_mut().find(|q| q.status == QuestStatus::Active)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// REJECTIONS — typed, recoverable, never a panic
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum RejectionKind {
    InsufficientFunds { needed: u32, have: u32 },
    InsufficientItems { item_id: ItemId, needed: u32, have: u32 },
    NoCapacity,
    /// Wrong tile/option/job state for the action (e.g. watering an
    /// empty tile). Advisory, not an error.
    InvalidTarget,
    OutOfTheMoney,
    FeatureLocked,
    /// Catalog lookup miss — a data inconsistency, logged distinctly.
    UnknownId,
}

/// A validated player action that could not proceed. State is unchanged.
#[derive(Event, Debug, Clone)]
pub struct ActionRejectedEvent {
    pub kind: RejectionKind,
    pub message: String,
}

/// Player-facing feedback line for the host to display.
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — player commands
// ═══════════════════════════════════════════════════════════════════════

/// The turn-clock trigger. One event = one fully-resolved month.
#[derive(Event, Debug, Clone)]
pub struct AdvanceMonthEvent;

#[derive(Event, Debug, Clone)]
pub struct PlantSeedEvent {
    pub tile: usize,
    pub seed_id: ItemId,
}

#[derive(Event, Debug, Clone)]
pub struct WaterTileEvent {
    pub tile: usize,
}

#[derive(Event, Debug, Clone)]
pub struct HarvestTileEvent {
    pub tile: usize,
}

/// Sell the mature crop on a tile directly for cash (sell tool).
#[derive(Event, Debug, Clone)]
pub struct SellCropEvent {
    pub tile: usize,
}

#[derive(Event, Debug, Clone)]
pub struct ClearTileEvent {
    pub tile: usize,
}

/// Buy an individual locked tile inside an unlocked area.
#[derive(Event, Debug, Clone)]
pub struct BuyTileEvent {
    pub tile: usize,
}

#[derive(Event, Debug, Clone)]
pub struct BuyItemEvent {
    pub item_id: ItemId,
    /// Price per unit. The host passes the live spot price for the
    /// golden apple; fixed catalog prices otherwise.
    pub unit_cost: u32,
}

#[derive(Event, Debug, Clone)]
pub struct SellItemEvent {
    pub item_id: ItemId,
    pub amount: u32,
}

#[derive(Event, Debug, Clone)]
pub struct UnlockAreaEvent {
    pub area: usize,
}

#[derive(Event, Debug, Clone)]
pub struct BuyAreaUpgradeEvent {
    pub area: usize,
    pub kind: AreaUpgradeKind,
}

#[derive(Event, Debug, Clone)]
pub struct ToggleAreaUpgradeEvent {
    pub area: usize,
    pub kind: AreaUpgradeKind,
}

#[derive(Event, Debug, Clone)]
pub struct SetAutoSellEvent {
    pub area: usize,
    pub auto_sell: bool,
}

#[derive(Event, Debug, Clone)]
pub struct SetSeederSeedEvent {
    pub area: usize,
    pub seed_id: Option<ItemId>,
}

#[derive(Event, Debug, Clone)]
pub struct StartFactoryJobEvent {
    pub recipe_id: String,
    /// None = first free slot.
    pub slot: Option<usize>,
}

#[derive(Event, Debug, Clone)]
pub struct CollectFactoryJobEvent {
    pub job_id: u64,
}

#[derive(Event, Debug, Clone)]
pub struct BuyFactorySlotEvent;

#[derive(Event, Debug, Clone)]
pub struct BuyFactoryUpgradeEvent {
    pub kind: FactoryUpgradeKind,
}

#[derive(Event, Debug, Clone)]
pub struct BuyOptionEvent {
    pub kind: OptionKind,
}

#[derive(Event, Debug, Clone)]
pub struct ExerciseOptionEvent {
    pub option_id: u64,
}

#[derive(Event, Debug, Clone)]
pub struct ClaimQuestRewardEvent {
    pub quest_id: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — engine notifications
// ═══════════════════════════════════════════════════════════════════════

/// Emitted once per advance by the calendar, after the new month, season
/// and weather are rolled. The month-end chain consumes this.
#[derive(Event, Debug, Clone)]
pub struct MonthEndEvent {
    /// The turn just entered.
    pub turn: u32,
    pub month: u32,
    pub season: Season,
    /// Weather of the month that just ended. Drought kills read this.
    pub previous_weather: Weather,
    /// Weather rolled for the new month.
    pub weather: Weather,
}

#[derive(Event, Debug, Clone)]
pub struct SeasonChangeEvent {
    pub new_season: Season,
    pub turn: u32,
}

/// Positive = credit, negative = debit. All funds movement funnels
/// through this so one system owns the balance.
#[derive(Event, Debug, Clone)]
pub struct MoneyChangeEvent {
    pub amount: i64,
    pub reason: String,
}

#[derive(Event, Debug, Clone)]
pub struct CropPlantedEvent {
    pub tile: usize,
    pub seed_id: ItemId,
}

#[derive(Event, Debug, Clone)]
pub struct TileWateredEvent {
    pub tile: usize,
}

#[derive(Event, Debug, Clone)]
pub struct CropHarvestedEvent {
    pub seed_id: ItemId,
    pub yield_id: ItemId,
    pub quantity: u32,
}

/// Any sale of items for cash — from the shop or straight off a tile.
#[derive(Event, Debug, Clone)]
pub struct ItemSoldEvent {
    pub item_id: ItemId,
    pub quantity: u32,
}

#[derive(Event, Debug, Clone)]
pub struct FactoryProducedEvent {
    pub recipe_id: String,
    pub item_id: ItemId,
    pub quantity: u32,
}

#[derive(Event, Debug, Clone)]
pub struct OptionPurchasedEvent {
    pub kind: OptionKind,
}

#[derive(Event, Debug, Clone)]
pub struct AreaUnlockedEvent {
    pub area: usize,
}

/// Fired for area upgrades and factory upgrades alike; `upgrade` matches
/// the labels quest targets use.
#[derive(Event, Debug, Clone)]
pub struct UpgradeInstalledEvent {
    pub upgrade: String,
    pub area: Option<usize>,
}

#[derive(Event, Debug, Clone)]
pub struct QuestCompletedEvent {
    pub quest_id: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEM SETS — month-end resolution order
// ═══════════════════════════════════════════════════════════════════════

/// One `AdvanceMonthEvent` resolves fully inside a single frame because
/// the month-end systems are chained in this order. Candle before option
/// expiry, options before tiles, money applied last.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthEndSet {
    Calendar,
    Market,
    Options,
    Tiles,
    Quests,
    Funds,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const GRID_SIZE: usize = 48;
pub const TILES_PER_AREA: usize = 12;
pub const AREA_COUNT: usize = GRID_SIZE / TILES_PER_AREA;

pub const INITIAL_MONEY: u32 = 200;
pub const INITIAL_MOISTURE: u32 = 60;

/// Price of one locked tile inside an unlocked area.
pub const LAND_COST: u32 = 100;
pub const WATER_COST: u32 = 5;
pub const WATER_AMOUNT: u32 = 50;
pub const MAX_MOISTURE: u32 = 100;
pub const EVAPORATION_RATE: u32 = 30;
/// Moisture consumed by one month of growth.
pub const GROWTH_MOISTURE_COST: u32 = 10;
/// Freshly planted tiles are topped up to at least this.
pub const PLANTING_MOISTURE_FLOOR: u32 = 40;
/// Irrigation tops growing tiles up to at least this (outside droughts).
pub const IRRIGATION_MOISTURE_FLOOR: u32 = 50;

pub const GOLDEN_AREA: usize = 3;
pub const GOLDEN_APPLE_SEED: &str = "golden_apple_seed";
pub const GOLDEN_APPLE_FRUIT: &str = "golden_apple";
/// Mature golden apples keep for this many months before rotting.
pub const GOLDEN_SHELF_LIFE: u32 = 9;
pub const QUAKE_RECOVERY_MONTHS: u32 = 12;

pub const MARKET_BASE_PRICE: u32 = 10_000;
pub const MARKET_MIN_PRICE: u32 = 2_000;
pub const MARKET_MAX_PRICE: u32 = 80_000;
pub const MARKET_LOW_FLOOR: u32 = 100;
pub const MARKET_SEED_CANDLES: usize = 12;
/// Settlement receipts older than this many turns are dropped.
pub const OPTION_HISTORY_TURNS: u32 = 12;

pub const FACTORY_SLOT_CAP: usize = 4;
pub const FACTORY_SLOT_BASE_COST: u32 = 5_000;
pub const HOPPER_COST: u32 = 3_000;
pub const CONVEYOR_COST: u32 = 8_000;
