use crate::shared::*;

/// Populate the crop catalog: eight seed/produce pairs, the golden apple
/// pair, and the factory products.
///
/// Durations are in months and lean realistic: spinach turns over in a
/// single month while winter wheat overwinters across five.
pub fn populate_crops(registry: &mut CropRegistry) {
    let mut add = |crop: CropDef| {
        registry.crops.insert(crop.id.clone(), crop);
    };

    // ── Seeds ───────────────────────────────────────────────────────────

    add(CropDef {
        id: "spinach_seed".into(),
        name: "Spinach Seed".into(),
        category: ItemCategory::Seed,
        buy_price: 20,
        sell_price: 0,
        harvest_id: Some("spinach".into()),
        seasons: vec![Season::Spring, Season::Autumn],
        duration_months: 1,
        cold_resistant: true,
        heat_sensitive: true,
        required_area: None,
        description: "Fast growth. Harvest in 1 month.".into(),
    });

    add(CropDef {
        id: "strawberry_seed".into(),
        name: "Strawberry Seed".into(),
        category: ItemCategory::Seed,
        buy_price: 60,
        sell_price: 0,
        harvest_id: Some("strawberry".into()),
        seasons: vec![Season::Spring],
        duration_months: 3,
        cold_resistant: false,
        heat_sensitive: true,
        required_area: None,
        description: "Sweet berries. Needs 3 months.".into(),
    });

    add(CropDef {
        id: "corn_seed".into(),
        name: "Corn Seed".into(),
        category: ItemCategory::Seed,
        buy_price: 30,
        sell_price: 0,
        harvest_id: Some("corn".into()),
        seasons: vec![Season::Spring, Season::Summer],
        duration_months: 4,
        cold_resistant: false,
        heat_sensitive: false,
        required_area: None,
        description: "Tall stalks. Needs 4 months.".into(),
    });

    add(CropDef {
        id: "tomato_seed".into(),
        name: "Tomato Seed".into(),
        category: ItemCategory::Seed,
        buy_price: 35,
        sell_price: 0,
        harvest_id: Some("tomato".into()),
        seasons: vec![Season::Summer],
        duration_months: 3,
        cold_resistant: false,
        heat_sensitive: false,
        required_area: None,
        description: "Summer lover. Needs 3 months.".into(),
    });

    add(CropDef {
        id: "watermelon_seed".into(),
        name: "Watermelon Seed".into(),
        category: ItemCategory::Seed,
        buy_price: 50,
        sell_price: 0,
        harvest_id: Some("watermelon".into()),
        seasons: vec![Season::Summer],
        duration_months: 4,
        cold_resistant: false,
        heat_sensitive: false,
        required_area: None,
        description: "Giant fruit. Needs 4 months.".into(),
    });

    add(CropDef {
        id: "potato_seed".into(),
        name: "Potato Seed".into(),
        category: ItemCategory::Seed,
        buy_price: 15,
        sell_price: 0,
        harvest_id: Some("potato".into()),
        seasons: vec![Season::Spring, Season::Autumn],
        duration_months: 3,
        cold_resistant: true,
        heat_sensitive: false,
        required_area: None,
        description: "Root vegetable. Needs 3 months.".into(),
    });

    add(CropDef {
        id: "pumpkin_seed".into(),
        name: "Pumpkin Seed".into(),
        category: ItemCategory::Seed,
        buy_price: 55,
        sell_price: 0,
        harvest_id: Some("pumpkin".into()),
        seasons: vec![Season::Autumn],
        duration_months: 4,
        cold_resistant: false,
        heat_sensitive: false,
        required_area: None,
        description: "Autumn harvest. Needs 4 months.".into(),
    });

    add(CropDef {
        id: "wheat_seed".into(),
        name: "Winter Wheat Seed".into(),
        category: ItemCategory::Seed,
        buy_price: 40,
        sell_price: 0,
        harvest_id: Some("wheat".into()),
        seasons: vec![Season::Autumn],
        duration_months: 5,
        cold_resistant: true,
        heat_sensitive: true,
        required_area: None,
        description: "Long growth. Needs 5 months.".into(),
    });

    add(CropDef {
        id: GOLDEN_APPLE_SEED.into(),
        name: "Golden Apple Seed".into(),
        category: ItemCategory::Seed,
        buy_price: 10_000,
        sell_price: 0,
        harvest_id: Some(GOLDEN_APPLE_FRUIT.into()),
        seasons: vec![Season::Spring, Season::Summer, Season::Autumn, Season::Winter],
        duration_months: 3,
        cold_resistant: true,
        heat_sensitive: false,
        required_area: Some(GOLDEN_AREA),
        description: "Plant to grow Golden Apples.".into(),
    });

    // ── Produce ─────────────────────────────────────────────────────────

    let mut produce = |id: &str, name: &str, sell_price: u32, description: &str| {
        add(CropDef {
            id: id.into(),
            name: name.into(),
            category: ItemCategory::Produce,
            buy_price: 0,
            sell_price,
            harvest_id: None,
            seasons: vec![],
            duration_months: 0,
            cold_resistant: true,
            heat_sensitive: false,
            required_area: None,
            description: description.into(),
        });
    };

    produce("spinach", "Spinach", 45, "Fresh spinach leaves.");
    produce("strawberry", "Strawberry", 160, "Sweet, ripe strawberries.");
    produce("corn", "Corn", 110, "A fresh cob of corn.");
    produce("tomato", "Tomato", 100, "Juicy red tomato.");
    produce("watermelon", "Watermelon", 180, "Heavy and sweet watermelon.");
    produce("potato", "Potato", 60, "Starchy potato.");
    produce("pumpkin", "Pumpkin", 160, "Perfect for carving or pie.");
    produce("wheat", "Wheat", 150, "Golden grains.");

    add(CropDef {
        id: GOLDEN_APPLE_FRUIT.into(),
        name: "Golden Apple".into(),
        category: ItemCategory::Special,
        buy_price: 0,
        sell_price: 0, // dynamic — always the market spot
        harvest_id: None,
        seasons: vec![],
        duration_months: 0,
        cold_resistant: true,
        heat_sensitive: false,
        required_area: None,
        description: "Mystical fruit. Currency for options.".into(),
    });

    // ── Factory products ────────────────────────────────────────────────

    let mut product = |id: &str, name: &str, sell_price: u32, description: &str| {
        add(CropDef {
            id: id.into(),
            name: name.into(),
            category: ItemCategory::Product,
            buy_price: 0,
            sell_price,
            harvest_id: None,
            seasons: vec![],
            duration_months: 0,
            cold_resistant: true,
            heat_sensitive: false,
            required_area: None,
            description: description.into(),
        });
    };

    product("popcorn", "Popcorn", 320, "Buttery popped corn.");
    product("ketchup", "Ketchup", 420, "A bottle of rich tomato ketchup.");
    product("strawberry_jam", "Strawberry Jam", 480, "Preserved summer sweetness.");
    product("potato_chips", "Potato Chips", 260, "Crispy salted chips.");
    product("bread", "Bread", 450, "A warm, crusty loaf.");
    product("pumpkin_pie", "Pumpkin Pie", 400, "Spiced autumn dessert.");
}
