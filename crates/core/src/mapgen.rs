//! Procedural dungeon generation split into coherent submodules.

mod corridor;
mod doors;
mod dungeon;
mod generator;
mod room;
mod spawns;

pub use corridor::Corridor;
pub use dungeon::Dungeon;
pub use generator::DungeonGenerator;
pub use room::Room;

use crate::config::DungeonConfig;
use crate::error::GenerationError;
use crate::tile::TileCatalog;

pub fn generate_dungeon(
    config: &DungeonConfig,
    catalog: &TileCatalog,
) -> Result<Dungeon, GenerationError> {
    DungeonGenerator::new(config.clone(), catalog)?.generate()
}

#[cfg(test)]
mod tests {
    use super::{DungeonGenerator, generate_dungeon};
    use crate::config::DungeonConfig;
    use crate::tile::TileCatalog;

    #[test]
    fn generate_dungeon_matches_generator_output() {
        let config = DungeonConfig { level_count: 2, ..DungeonConfig::with_seed(123) };
        let catalog = TileCatalog::default();

        let from_helper = generate_dungeon(&config, &catalog).expect("valid config");
        let from_generator = DungeonGenerator::new(config, &catalog)
            .expect("valid config")
            .generate()
            .expect("default catalog");

        assert_eq!(from_helper.fingerprint(), from_generator.fingerprint());
        assert_eq!(from_helper.len(), 2);
    }
}
