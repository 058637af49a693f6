use crate::shared::*;

/// Populate the factory blueprint table.
///
/// Durations are real-time seconds on the wall clock. Each product sells
/// for comfortably more than its input so a busy line is always worth
/// running.
pub fn populate_recipes(registry: &mut RecipeRegistry) {
    let mut add = |recipe: RecipeDef| {
        registry.recipes.insert(recipe.id.clone(), recipe);
    };

    add(RecipeDef {
        id: "popcorn".into(),
        name: "Popcorn".into(),
        input: ("corn".into(), 2),
        output: ("popcorn".into(), 1),
        seconds: 30.0,
        description: "Pop two cobs into a bag of popcorn.".into(),
    });

    add(RecipeDef {
        id: "ketchup".into(),
        name: "Ketchup".into(),
        input: ("tomato".into(), 3),
        output: ("ketchup".into(), 1),
        seconds: 45.0,
        description: "Slow-reduce tomatoes into ketchup.".into(),
    });

    add(RecipeDef {
        id: "strawberry_jam".into(),
        name: "Strawberry Jam".into(),
        input: ("strawberry".into(), 2),
        output: ("strawberry_jam".into(), 1),
        seconds: 60.0,
        description: "Boil strawberries down to jam.".into(),
    });

    add(RecipeDef {
        id: "potato_chips".into(),
        name: "Potato Chips".into(),
        input: ("potato".into(), 3),
        output: ("potato_chips".into(), 1),
        seconds: 40.0,
        description: "Slice and fry potatoes.".into(),
    });

    add(RecipeDef {
        id: "bread".into(),
        name: "Bread".into(),
        input: ("wheat".into(), 2),
        output: ("bread".into(), 1),
        seconds: 90.0,
        description: "Mill, knead and bake.".into(),
    });

    add(RecipeDef {
        id: "pumpkin_pie".into(),
        name: "Pumpkin Pie".into(),
        input: ("pumpkin".into(), 1),
        output: ("pumpkin_pie".into(), 1),
        seconds: 120.0,
        description: "One pumpkin, one perfect pie.".into(),
    });
}
