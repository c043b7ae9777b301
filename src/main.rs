use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use isocraft::config::{GameConfig, CONFIG_FILE};
use isocraft::shared::*;
use isocraft::{crafting, data, player, save, world};

fn main() {
    let config = GameConfig::load_or_default(CONFIG_FILE);
    let inventory = Inventory::with_slots(config.inventory_slots);

    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 30.0,
            ))),
            LogPlugin::default(),
            StatesPlugin,
        ))
        // Config must exist before the domain plugins read it
        .insert_resource(config)
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<GameClock>()
        .init_resource::<PlayerState>()
        .insert_resource(inventory)
        .init_resource::<ItemRegistry>()
        .init_resource::<RecipeRegistry>()
        .init_resource::<DiscoveredRecipes>()
        // Domain plugins
        .add_plugins(world::WorldPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(crafting::CraftingPlugin)
        .add_plugins(save::SavePlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        .run();
}
