use clap::Subcommand;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use mesa_core::Attack;
use mesa_core::enemy::parse_max_hp;

use super::{Session, find_enemy, hp_label};

#[derive(Subcommand)]
pub enum EnemyCommand {
    /// Create an enemy
    Create {
        /// Enemy name
        name: String,

        /// Maximum HP (defaults to 50 when missing or not a positive number)
        #[arg(long)]
        hp: Option<String>,

        /// Attack as name:damage:chance, e.g. "Bite:6:12" (repeatable)
        #[arg(short, long = "attack", value_name = "NAME:DAMAGE:CHANCE")]
        attacks: Vec<String>,
    },
    /// List enemies
    List,
    /// Show one enemy and its attacks
    Show {
        /// Name or id prefix
        who: String,
    },
    /// Delete an enemy
    Delete {
        /// Name or id prefix
        who: String,
    },
    /// Select an enemy
    Select {
        /// Name or id prefix
        who: String,
    },
    /// Add an enemy to, or remove it from, the battle
    Toggle {
        /// Name or id prefix
        who: String,
    },
    /// Restore an enemy to full HP
    Reset {
        /// Name or id prefix
        who: String,
    },
}

pub fn run(session: &Session, cmd: EnemyCommand) -> Result<(), String> {
    let table = session.open()?;

    match cmd {
        EnemyCommand::Create { name, hp, attacks } => {
            let attacks = attacks
                .iter()
                .map(|a| a.parse::<Attack>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| e.to_string())?;
            let max_hp = parse_max_hp(hp.as_deref(), table.config().default_enemy_hp);
            let e = table
                .create_enemy(&name, Some(max_hp), attacks)
                .map_err(|e| e.to_string())?;
            println!(
                "  Created {} ({}) with {} HP and {} attacks",
                e.name.bold(),
                e.id.to_string().dimmed(),
                e.hp.max_hp,
                e.attacks.len()
            );
        }
        EnemyCommand::List => {
            let enemies = table.enemies().all();
            if enemies.is_empty() {
                println!("  No enemies yet.");
                return Ok(());
            }
            let selected = table.enemies().selected();
            let mut out = Table::new();
            out.set_content_arrangement(ContentArrangement::Dynamic);
            out.set_header(vec!["", "Id", "Name", "HP", "Attacks", "In battle"]);
            for e in &enemies {
                let marker = if selected == Some(e.id) { "*" } else { "" };
                out.add_row(vec![
                    marker.to_string(),
                    e.id.to_string(),
                    e.name.clone(),
                    hp_label(&e.hp),
                    e.attacks.len().to_string(),
                    if e.in_battle { "yes" } else { "no" }.to_string(),
                ]);
            }
            println!("{out}");
            println!();
            println!("  {} enemies", enemies.len());
        }
        EnemyCommand::Show { who } => {
            let e = find_enemy(&table, &who)?;
            println!("  {} ({})", e.name.bold(), e.id.to_string().dimmed());
            println!("  HP: {}", hp_label(&e.hp));
            println!("  In battle: {}", if e.in_battle { "yes" } else { "no" });
            if e.attacks.is_empty() {
                println!("  {}", "(no attacks)".dimmed());
            }
            for (i, attack) in e.attacks.iter().enumerate() {
                println!("  {}. {attack}", i + 1);
            }
        }
        EnemyCommand::Delete { who } => {
            let e = find_enemy(&table, &who)?;
            table.enemies().delete(e.id).map_err(|e| e.to_string())?;
            println!("  Deleted {}", e.name);
        }
        EnemyCommand::Select { who } => {
            let e = find_enemy(&table, &who)?;
            table
                .enemies()
                .set_selected(Some(e.id))
                .map_err(|e| e.to_string())?;
            println!("  Selected {}", e.name);
        }
        EnemyCommand::Toggle { who } => {
            let e = find_enemy(&table, &who)?;
            let e = table
                .enemies()
                .toggle_in_battle(e.id)
                .map_err(|e| e.to_string())?;
            let state = if e.in_battle { "joins" } else { "leaves" };
            println!("  {} {state} the battle", e.name);
        }
        EnemyCommand::Reset { who } => {
            let e = find_enemy(&table, &who)?;
            let e = table.reset_enemy_hp(e.id).map_err(|e| e.to_string())?;
            println!("  {} restored to {} HP", e.name, hp_label(&e.hp));
        }
    }

    Ok(())
}
