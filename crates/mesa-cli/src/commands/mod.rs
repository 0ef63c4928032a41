pub mod battle;
pub mod character;
pub mod class;
pub mod combat;
pub mod dice;
pub mod enemy;
pub mod log;
pub mod note;
pub mod scenario;
pub mod story;

use std::path::PathBuf;

use colored::Colorize;

use mesa_core::{Character, ClassCatalog, Enemy, HitPoints};
use mesa_mechanics::{GameTable, TableConfig};

/// Global options shared by every command.
pub struct Session {
    pub dir: PathBuf,
    pub seed: Option<u64>,
    pub catalog: Option<PathBuf>,
}

impl Session {
    /// Open the table stored in the session directory.
    pub fn open(&self) -> Result<GameTable, String> {
        let catalog = match &self.catalog {
            Some(path) => ClassCatalog::load(path)
                .map_err(|e| format!("cannot load catalog {}: {e}", path.display()))?,
            None => ClassCatalog::builtin(),
        };
        let mut config = TableConfig::default();
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        GameTable::open_dir(&self.dir, catalog, config).map_err(|e| e.to_string())
    }
}

/// Find a character by name or unique id prefix.
fn find_character(table: &GameTable, query: &str) -> Result<Character, String> {
    table
        .characters()
        .find(query)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("character not found: {query}"))
}

/// Find an enemy by name or unique id prefix.
fn find_enemy(table: &GameTable, query: &str) -> Result<Enemy, String> {
    table
        .enemies()
        .find(query)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| format!("enemy not found: {query}"))
}

/// HP as `current/max`, coloured by how much is left.
fn hp_label(hp: &HitPoints) -> String {
    let text = hp.to_string();
    let fraction = hp.fraction();
    if hp.is_defeated() {
        text.red().bold().to_string()
    } else if fraction <= 0.25 {
        text.red().to_string()
    } else if fraction <= 0.5 {
        text.yellow().to_string()
    } else {
        text.green().to_string()
    }
}
