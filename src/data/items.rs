use crate::shared::*;

/// Populate the ItemRegistry with every item the world and recipes reference.
pub fn populate_items(registry: &mut ItemRegistry) {
    let items: Vec<ItemDef> = vec![
        // ── Resources ────────────────────────────────────────────────
        item("wood", "Wood", "Basic wooden material, useful for crafting.",
            ItemCategory::Resource, ItemRarity::Common, 50, 1),
        item("stone", "Stone", "Hard stone material for construction.",
            ItemCategory::Resource, ItemRarity::Common, 50, 2),
        item("fibers", "Plant Fibers", "Tough fibers stripped from bushes.",
            ItemCategory::Resource, ItemRarity::Common, 50, 1),
        item("hardwood", "Hardwood", "Dense wood from old trees.",
            ItemCategory::Resource, ItemRarity::Uncommon, 30, 4),
        item("iron_ore", "Iron Ore", "Raw iron that can be smelted.",
            ItemCategory::Resource, ItemRarity::Uncommon, 30, 5),
        item("copper_ore", "Copper Ore", "Raw copper that can be smelted.",
            ItemCategory::Resource, ItemRarity::Common, 30, 3),
        item("tin_ore", "Tin Ore", "Soft ore used for alloys.",
            ItemCategory::Resource, ItemRarity::Uncommon, 30, 4),
        item("coal", "Coal", "Fuel for smelting.",
            ItemCategory::Resource, ItemRarity::Common, 50, 2),

        // ── Consumables ──────────────────────────────────────────────
        item("berries", "Berries", "Sweet berries that restore hunger.",
            ItemCategory::Consumable, ItemRarity::Common, 20, 3),
        item("water", "Water", "Clean water that restores thirst.",
            ItemCategory::Consumable, ItemRarity::Common, 10, 2),

        // ── Tools ────────────────────────────────────────────────────
        tool("wooden_axe", "Wooden Axe", "A basic axe for chopping trees.",
            ItemCategory::Tool, ItemRarity::Common, 15),
        tool("wooden_pickaxe", "Wooden Pickaxe", "A basic pickaxe for mining stone.",
            ItemCategory::Tool, ItemRarity::Common, 15),
        tool("iron_axe", "Iron Axe", "A sturdy axe made of iron.",
            ItemCategory::Tool, ItemRarity::Uncommon, 50),

        // ── Weapons ──────────────────────────────────────────────────
        tool("wooden_sword", "Wooden Sword", "A basic sword for combat.",
            ItemCategory::Weapon, ItemRarity::Common, 20),
        tool("iron_sword", "Iron Sword", "A sharp iron sword.",
            ItemCategory::Weapon, ItemRarity::Uncommon, 75),

        // ── Craftables ───────────────────────────────────────────────
        item("wooden_plank", "Wooden Plank", "Processed wood plank for building.",
            ItemCategory::Craftable, ItemRarity::Common, 50, 2),
        item("hardwood_plank", "Hardwood Plank", "A strong plank cut from hardwood.",
            ItemCategory::Craftable, ItemRarity::Uncommon, 50, 6),
        item("iron_ingot", "Iron Ingot", "Smelted iron ready for crafting.",
            ItemCategory::Craftable, ItemRarity::Uncommon, 20, 10),
        item("copper_ingot", "Copper Ingot", "Smelted copper ready for crafting.",
            ItemCategory::Craftable, ItemRarity::Common, 20, 8),
        item("bronze_ingot", "Bronze Ingot", "An alloy of copper and tin.",
            ItemCategory::Craftable, ItemRarity::Uncommon, 20, 20),
        item("rope", "Rope", "Useful rope for various crafting recipes.",
            ItemCategory::Craftable, ItemRarity::Common, 25, 5),
    ];

    for def in items {
        registry.items.insert(def.id.clone(), def);
    }
}

fn item(
    id: &str,
    name: &str,
    description: &str,
    category: ItemCategory,
    rarity: ItemRarity,
    max_stack: u32,
    value: u32,
) -> ItemDef {
    ItemDef {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        category,
        rarity,
        stackable: true,
        max_stack,
        value,
    }
}

fn tool(
    id: &str,
    name: &str,
    description: &str,
    category: ItemCategory,
    rarity: ItemRarity,
    value: u32,
) -> ItemDef {
    ItemDef {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        category,
        rarity,
        stackable: false,
        max_stack: 1,
        value,
    }
}
