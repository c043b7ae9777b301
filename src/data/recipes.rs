use crate::shared::*;

/// Populate the RecipeRegistry with every crafting recipe.
///
/// `required_level` gates crafting; `crafting_time` is real-time seconds.
pub fn populate_recipes(registry: &mut RecipeRegistry) {
    let recipes: Vec<Recipe> = vec![
        // ── Wood Processing ──────────────────────────────────────────
        Recipe {
            id: "wooden_plank".into(),
            name: "Wooden Plank".into(),
            description: "Convert wood into planks.".into(),
            ingredients: vec![("wood".into(), 1)],
            result: "wooden_plank".into(),
            result_quantity: 4,
            required_level: 1,
            crafting_time: 2.0,
        },
        Recipe {
            id: "hardwood_plank".into(),
            name: "Hardwood Plank".into(),
            description: "Process hardwood into strong planks.".into(),
            ingredients: vec![("hardwood".into(), 1)],
            result: "hardwood_plank".into(),
            result_quantity: 3,
            required_level: 3,
            crafting_time: 4.0,
        },
        Recipe {
            id: "rope".into(),
            name: "Rope".into(),
            description: "Craft useful rope from plant fibers.".into(),
            ingredients: vec![("fibers".into(), 2)],
            result: "rope".into(),
            result_quantity: 3,
            required_level: 1,
            crafting_time: 3.0,
        },

        // ── Wooden Tools ─────────────────────────────────────────────
        Recipe {
            id: "wooden_axe".into(),
            name: "Wooden Axe".into(),
            description: "Craft a basic axe.".into(),
            ingredients: vec![("wooden_plank".into(), 3), ("wood".into(), 2)],
            result: "wooden_axe".into(),
            result_quantity: 1,
            required_level: 1,
            crafting_time: 5.0,
        },
        Recipe {
            id: "wooden_pickaxe".into(),
            name: "Wooden Pickaxe".into(),
            description: "Craft a basic pickaxe.".into(),
            ingredients: vec![("wooden_plank".into(), 3), ("wood".into(), 2)],
            result: "wooden_pickaxe".into(),
            result_quantity: 1,
            required_level: 1,
            crafting_time: 5.0,
        },
        Recipe {
            id: "wooden_sword".into(),
            name: "Wooden Sword".into(),
            description: "Craft a basic sword.".into(),
            ingredients: vec![("wooden_plank".into(), 2), ("wood".into(), 1)],
            result: "wooden_sword".into(),
            result_quantity: 1,
            required_level: 1,
            crafting_time: 4.0,
        },

        // ── Smelting ─────────────────────────────────────────────────
        Recipe {
            id: "copper_ingot".into(),
            name: "Copper Ingot".into(),
            description: "Smelt copper ore into ingots.".into(),
            ingredients: vec![("copper_ore".into(), 1), ("coal".into(), 1)],
            result: "copper_ingot".into(),
            result_quantity: 1,
            required_level: 2,
            crafting_time: 6.0,
        },
        Recipe {
            id: "iron_ingot".into(),
            name: "Iron Ingot".into(),
            description: "Smelt iron ore into ingots.".into(),
            ingredients: vec![("iron_ore".into(), 1)],
            result: "iron_ingot".into(),
            result_quantity: 1,
            required_level: 3,
            crafting_time: 8.0,
        },
        Recipe {
            id: "bronze_ingot".into(),
            name: "Bronze Ingot".into(),
            description: "Alloy copper and tin to create bronze.".into(),
            ingredients: vec![
                ("copper_ingot".into(), 3),
                ("tin_ore".into(), 1),
                ("coal".into(), 1),
            ],
            result: "bronze_ingot".into(),
            result_quantity: 2,
            required_level: 4,
            crafting_time: 10.0,
        },

        // ── Iron Gear ────────────────────────────────────────────────
        Recipe {
            id: "iron_sword".into(),
            name: "Iron Sword".into(),
            description: "Craft a sharp iron sword.".into(),
            ingredients: vec![("iron_ingot".into(), 2), ("wood".into(), 1)],
            result: "iron_sword".into(),
            result_quantity: 1,
            required_level: 4,
            crafting_time: 10.0,
        },
        Recipe {
            id: "iron_axe".into(),
            name: "Iron Axe".into(),
            description: "Craft a sturdy iron axe.".into(),
            ingredients: vec![("iron_ingot".into(), 3), ("wood".into(), 2)],
            result: "iron_axe".into(),
            result_quantity: 1,
            required_level: 5,
            crafting_time: 12.0,
        },
    ];

    for recipe in recipes {
        registry.recipes.insert(recipe.id.clone(), recipe);
    }
}
