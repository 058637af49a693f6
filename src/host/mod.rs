//! Console host — the engine's non-UI collaborator.
//!
//! A reader thread feeds stdin lines into a channel; each frame the
//! dispatcher drains the channel, parses commands, and sends the same
//! events any other host (a GUI, a test suite) would. Player-facing
//! feedback — toasts and rejections — prints straight to stdout.

use bevy::app::AppExit;
use bevy::prelude::*;
use serde::Serialize;
use std::io::BufRead;
use std::sync::mpsc::{self, Receiver};
use std::sync::Mutex;

use crate::economy::money::format_money;
use crate::shared::*;

pub struct HostPlugin;

impl Plugin for HostPlugin {
    fn build(&self, app: &mut App) {
        let (tx, rx) = mpsc::channel::<String>();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        });

        app.insert_resource(ConsoleInput {
            lines: Mutex::new(rx),
        })
        .add_systems(
            Update,
            (dispatch_commands, print_feedback).run_if(in_state(GameState::Playing)),
        );
    }
}

/// Lines typed on stdin, delivered by the reader thread.
#[derive(Resource)]
pub struct ConsoleInput {
    lines: Mutex<Receiver<String>>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Command grammar
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Advance,
    Plant { tile: usize, seed_id: String },
    Water { tile: usize },
    Harvest { tile: usize },
    SellCrop { tile: usize },
    Clear { tile: usize },
    BuyTile { tile: usize },
    Buy { item_id: String },
    SellItem { item_id: String, amount: u32 },
    Unlock { area: usize },
    BuyUpgrade { area: usize, kind: AreaUpgradeKind },
    Toggle { area: usize, kind: AreaUpgradeKind },
    AutoSell { area: usize, on: bool },
    SeederSeed { area: usize, seed_id: Option<String> },
    FactoryStart { recipe_id: String, slot: Option<usize> },
    FactoryCollect { job_id: u64 },
    BuySlot,
    BuyHopper { slot: usize },
    BuyConveyor,
    BuyOption { kind: OptionKind },
    Exercise { option_id: u64 },
    Claim { quest_id: u32 },
    Status,
    Dump,
    Help,
    Quit,
}

fn parse_upgrade_kind(word: &str) -> Result<AreaUpgradeKind, String> {
    match word {
        "irrigation" => Ok(AreaUpgradeKind::Irrigation),
        "drone" => Ok(AreaUpgradeKind::Drone),
        "seeder" => Ok(AreaUpgradeKind::Seeder),
        other => Err(format!("unknown upgrade '{}' (irrigation/drone/seeder)", other)),
    }
}

fn arg<'a>(words: &[&'a str], index: usize, what: &str) -> Result<&'a str, String> {
    words
        .get(index)
        .copied()
        .ok_or_else(|| format!("missing {}", what))
}

fn num<T: std::str::FromStr>(word: &str, what: &str) -> Result<T, String> {
    word.parse()
        .map_err(|_| format!("'{}' is not a valid {}", word, what))
}

/// Parse one console line. Empty input is an error like any other so the
/// dispatcher has a single reporting path.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some(&verb) = words.first() else {
        return Err("empty command".to_string());
    };

    match verb {
        "advance" | "next" => Ok(Command::Advance),
        "plant" => Ok(Command::Plant {
            tile: num(arg(&words, 1, "tile")?, "tile")?,
            seed_id: arg(&words, 2, "seed id")?.to_string(),
        }),
        "water" => Ok(Command::Water {
            tile: num(arg(&words, 1, "tile")?, "tile")?,
        }),
        "harvest" => Ok(Command::Harvest {
            tile: num(arg(&words, 1, "tile")?, "tile")?,
        }),
        "sell" => Ok(Command::SellCrop {
            tile: num(arg(&words, 1, "tile")?, "tile")?,
        }),
        "clear" => Ok(Command::Clear {
            tile: num(arg(&words, 1, "tile")?, "tile")?,
        }),
        "buy-tile" => Ok(Command::BuyTile {
            tile: num(arg(&words, 1, "tile")?, "tile")?,
        }),
        "buy" => Ok(Command::Buy {
            item_id: arg(&words, 1, "item id")?.to_string(),
        }),
        "sell-item" => Ok(Command::SellItem {
            item_id: arg(&words, 1, "item id")?.to_string(),
            amount: match words.get(2) {
                Some(n) => num(n, "amount")?,
                None => 1,
            },
        }),
        "unlock" => Ok(Command::Unlock {
            area: num(arg(&words, 1, "area")?, "area")?,
        }),
        "upgrade" => Ok(Command::BuyUpgrade {
            area: num(arg(&words, 1, "area")?, "area")?,
            kind: parse_upgrade_kind(arg(&words, 2, "upgrade kind")?)?,
        }),
        "toggle" => Ok(Command::Toggle {
            area: num(arg(&words, 1, "area")?, "area")?,
            kind: parse_upgrade_kind(arg(&words, 2, "upgrade kind")?)?,
        }),
        "autosell" => Ok(Command::AutoSell {
            area: num(arg(&words, 1, "area")?, "area")?,
            on: match arg(&words, 2, "on/off")? {
                "on" => true,
                "off" => false,
                other => return Err(format!("expected on/off, got '{}'", other)),
            },
        }),
        "seeder" => Ok(Command::SeederSeed {
            area: num(arg(&words, 1, "area")?, "area")?,
            seed_id: match arg(&words, 2, "seed id or 'none'")? {
                "none" => None,
                seed => Some(seed.to_string()),
            },
        }),
        "make" => Ok(Command::FactoryStart {
            recipe_id: arg(&words, 1, "recipe id")?.to_string(),
            slot: match words.get(2) {
                Some(n) => Some(num(n, "slot")?),
                None => None,
            },
        }),
        "collect" => Ok(Command::FactoryCollect {
            job_id: num(arg(&words, 1, "job id")?, "job id")?,
        }),
        "buy-slot" => Ok(Command::BuySlot),
        "buy-hopper" => Ok(Command::BuyHopper {
            slot: num(arg(&words, 1, "slot")?, "slot")?,
        }),
        "buy-conveyor" => Ok(Command::BuyConveyor),
        "call" => Ok(Command::BuyOption {
            kind: OptionKind::Call,
        }),
        "put" => Ok(Command::BuyOption {
            kind: OptionKind::Put,
        }),
        "exercise" => Ok(Command::Exercise {
            option_id: num(arg(&words, 1, "option id")?, "option id")?,
        }),
        "claim" => Ok(Command::Claim {
            quest_id: num(arg(&words, 1, "quest id")?, "quest id")?,
        }),
        "status" => Ok(Command::Status),
        "dump" => Ok(Command::Dump),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{}' (try 'help')", other)),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Drains the console channel and turns each line into engine events.
/// Exclusive system: a command can touch any event stream.
pub fn dispatch_commands(world: &mut World) {
    let lines: Vec<String> = {
        let input = world.resource::<ConsoleInput>();
        let Ok(receiver) = input.lines.lock() else {
            return;
        };
        receiver.try_iter().collect()
    };

    for line in lines {
        let command = match parse_command(line.trim()) {
            Ok(command) => command,
            Err(message) => {
                println!("! {}", message);
                continue;
            }
        };
        apply_command(world, command);
    }
}

fn apply_command(world: &mut World, command: Command) {
    match command {
        Command::Advance => {
            world.send_event(AdvanceMonthEvent);
        }
        Command::Plant { tile, seed_id } => {
            world.send_event(PlantSeedEvent { tile, seed_id });
        }
        Command::Water { tile } => {
            world.send_event(WaterTileEvent { tile });
        }
        Command::Harvest { tile } => {
            world.send_event(HarvestTileEvent { tile });
        }
        Command::SellCrop { tile } => {
            world.send_event(SellCropEvent { tile });
        }
        Command::Clear { tile } => {
            world.send_event(ClearTileEvent { tile });
        }
        Command::BuyTile { tile } => {
            world.send_event(BuyTileEvent { tile });
        }
        Command::Buy { item_id } => {
            // The host quotes the price: live spot for the golden apple,
            // catalog price for everything else.
            let unit_cost = if item_id == GOLDEN_APPLE_FRUIT {
                world.resource::<MarketState>().price
            } else {
                match world.resource::<CropRegistry>().get(&item_id) {
                    Some(crop) => crop.buy_price,
                    None => {
                        println!("! unknown item '{}'", item_id);
                        return;
                    }
                }
            };
            world.send_event(BuyItemEvent { item_id, unit_cost });
        }
        Command::SellItem { item_id, amount } => {
            world.send_event(SellItemEvent { item_id, amount });
        }
        Command::Unlock { area } => {
            world.send_event(UnlockAreaEvent { area });
        }
        Command::BuyUpgrade { area, kind } => {
            world.send_event(BuyAreaUpgradeEvent { area, kind });
        }
        Command::Toggle { area, kind } => {
            world.send_event(ToggleAreaUpgradeEvent { area, kind });
        }
        Command::AutoSell { area, on } => {
            world.send_event(SetAutoSellEvent {
                area,
                auto_sell: on,
            });
        }
        Command::SeederSeed { area, seed_id } => {
            world.send_event(SetSeederSeedEvent { area, seed_id });
        }
        Command::FactoryStart { recipe_id, slot } => {
            world.send_event(StartFactoryJobEvent { recipe_id, slot });
        }
        Command::FactoryCollect { job_id } => {
            world.send_event(CollectFactoryJobEvent { job_id });
        }
        Command::BuySlot => {
            world.send_event(BuyFactorySlotEvent);
        }
        Command::BuyHopper { slot } => {
            world.send_event(BuyFactoryUpgradeEvent {
                kind: FactoryUpgradeKind::Hopper { slot },
            });
        }
        Command::BuyConveyor => {
            world.send_event(BuyFactoryUpgradeEvent {
                kind: FactoryUpgradeKind::Conveyor,
            });
        }
        Command::BuyOption { kind } => {
            world.send_event(BuyOptionEvent { kind });
        }
        Command::Exercise { option_id } => {
            world.send_event(ExerciseOptionEvent { option_id });
        }
        Command::Claim { quest_id } => {
            world.send_event(ClaimQuestRewardEvent { quest_id });
        }
        Command::Status => print_status(world),
        Command::Dump => print_dump(world),
        Command::Help => print_help(),
        Command::Quit => {
            world.send_event(AppExit::Success);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────────────────────────────────────

/// Prints toasts and rejections as they arrive.
pub fn print_feedback(
    mut toasts: EventReader<ToastEvent>,
    mut rejections: EventReader<ActionRejectedEvent>,
) {
    for toast in toasts.read() {
        println!("* {}", toast.message);
    }
    for rejection in rejections.read() {
        println!("! {}", rejection.message);
    }
}

fn print_status(world: &World) {
    let calendar = world.resource::<Calendar>();
    let player = world.resource::<PlayerState>();
    let market = world.resource::<MarketState>();
    let inventory = world.resource::<Inventory>();
    let farm = world.resource::<FarmState>();
    let factory = world.resource::<FactoryState>();
    let quests = world.resource::<QuestLog>();

    println!(
        "── Turn {} · Month {} · {:?} · {:?} ──",
        calendar.turn, calendar.month, calendar.season, calendar.weather
    );
    println!(
        "money {} · golden apple spot {}",
        format_money(player.money),
        format_money(market.price)
    );

    let mut items: Vec<_> = inventory.items.iter().collect();
    items.sort();
    if items.is_empty() {
        println!("inventory: (empty)");
    } else {
        let listing: Vec<String> = items
            .iter()
            .map(|(id, count)| format!("{}×{}", id, count))
            .collect();
        println!("inventory: {}", listing.join(", "));
    }

    for tile in farm.tiles.iter().filter(|t| t.state != TileState::Empty) {
        println!(
            "  tile {:2} [{:?}] {} {}/{}m moisture {}",
            tile.id,
            tile.state,
            tile.crop_id.as_deref().unwrap_or("-"),
            tile.growth_progress,
            tile.crop_id
                .as_deref()
                .and_then(|id| world.resource::<CropRegistry>().get(id))
                .map(|c| c.duration_months)
                .unwrap_or(0),
            tile.moisture,
        );
    }

    for job in &factory.jobs {
        println!(
            "  job {} [{}] slot {} {}",
            job.id,
            job.recipe_id,
            job.slot,
            if job.complete { "done" } else { "running" }
        );
    }

    if let Some(quest) = quests.quests.iter().find(|q| q.status == QuestStatus::Active) {
        println!("quest: {} ({})", quest.title, quest.description);
        for task in &quest.tasks {
            println!(
                "  [{}] {} ({}/{})",
                if task.complete { "x" } else { " " },
                task.description,
                task.current,
                task.count
            );
        }
    }
    if let Some(done) = quests
        .quests
        .iter()
        .find(|q| q.status == QuestStatus::Completed)
    {
        println!("quest ready to claim: {} (claim {})", done.title, done.id);
    }
}

/// Everything a machine host needs to mirror the session. Catalogs are
/// static data and left out.
#[derive(Serialize)]
struct WorldSnapshot {
    calendar: Calendar,
    player: PlayerState,
    inventory: Inventory,
    farm: FarmState,
    unlocked_areas: UnlockedAreas,
    features: FeatureUnlocks,
    automation: AreaAutomation,
    market: MarketState,
    options: OptionBook,
    factory: FactoryState,
    quests: QuestLog,
}

/// Prints the mutable world state as pretty JSON, one document per call.
fn print_dump(world: &World) {
    let snapshot = WorldSnapshot {
        calendar: world.resource::<Calendar>().clone(),
        player: world.resource::<PlayerState>().clone(),
        inventory: world.resource::<Inventory>().clone(),
        farm: world.resource::<FarmState>().clone(),
        unlocked_areas: world.resource::<UnlockedAreas>().clone(),
        features: *world.resource::<FeatureUnlocks>(),
        automation: world.resource::<AreaAutomation>().clone(),
        market: world.resource::<MarketState>().clone(),
        options: world.resource::<OptionBook>().clone(),
        factory: world.resource::<FactoryState>().clone(),
        quests: world.resource::<QuestLog>().clone(),
    };
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("! state serialization failed: {}", err),
    }
}

fn print_help() {
    println!(
        "\
commands:
  advance                          end the month
  plant <tile> <seed>              plant a seed (e.g. plant 0 corn_seed)
  water/harvest/sell/clear <tile>  tile tools
  buy-tile <tile>                  buy a locked tile in an owned area
  buy <item> | sell-item <item> [n]
  unlock <area>                    buy a whole area (0-3)
  upgrade <area> <kind>            kind: irrigation | drone | seeder
  toggle <area> <kind>             enable/disable an installed upgrade
  autosell <area> on|off           drone mode
  seeder <area> <seed|none>        point the auto-seeder at a seed
  make <recipe> [slot]             start a factory job
  collect <job>                    collect a finished job
  buy-slot | buy-hopper <slot> | buy-conveyor
  call | put                       buy an option (premium: 1 golden apple)
  exercise <option>                settle an in-the-money option
  claim <quest>                    claim a completed quest's reward
  status | dump | help | quit"
    );
}
