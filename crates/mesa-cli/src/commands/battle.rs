use clap::Subcommand;
use colored::Colorize;

use mesa_mechanics::{BattleState, GameTable};

use super::{Session, hp_label};

#[derive(Subcommand)]
pub enum BattleCommand {
    /// Start a battle with every character
    Start,
    /// Advance to the next turn
    Next,
    /// End the battle
    End,
    /// Show the turn order and who is in the fight
    Status,
}

pub fn run(session: &Session, cmd: BattleCommand) -> Result<(), String> {
    let table = session.open()?;

    match cmd {
        BattleCommand::Start => {
            let state = table.start_battle().map_err(|e| e.to_string())?;
            println!("  {}", "Battle started!".bold());
            print_turn(&table, &state);
        }
        BattleCommand::Next => {
            if !table.battle().is_active() {
                return Err("no battle is active".into());
            }
            let state = table.next_turn().map_err(|e| e.to_string())?;
            print_turn(&table, &state);
        }
        BattleCommand::End => {
            if !table.battle().is_active() {
                return Err("no battle is active".into());
            }
            table.end_battle().map_err(|e| e.to_string())?;
            println!("  Battle ended.");
        }
        BattleCommand::Status => print_status(&table),
    }

    Ok(())
}

fn print_turn(table: &GameTable, state: &BattleState) {
    if let Some(turn) = state.current() {
        println!("  Turn of {}", table.turn_name(&turn).bold());
    }
}

fn print_status(table: &GameTable) {
    let state = table.battle().state();
    if !state.active {
        println!("  No battle is active.");
        return;
    }

    println!("  {}", "Turn order".bold().underline());
    for (i, turn) in state.turn_order.iter().enumerate() {
        let name = table.turn_name(turn);
        if i == state.current_turn_index {
            println!("  {} {}", ">".green().bold(), name.bold());
        } else {
            println!("    {name}");
        }
    }

    let enemies = table.enemies().in_battle();
    println!();
    println!("  {}", "Enemies in battle".bold().underline());
    if enemies.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for e in enemies {
        println!("  {} {}", e.name, hp_label(&e.hp));
    }
}
