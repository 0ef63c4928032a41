use colored::Colorize;

use mesa_core::LogEntry;
use mesa_mechanics::AbilityTarget;

use super::{Session, find_character, find_enemy};

pub fn ability(
    session: &Session,
    character: &str,
    ability: &str,
    enemy: Option<&str>,
    ally: Option<&str>,
) -> Result<(), String> {
    let mut table = session.open()?;
    let user = find_character(&table, character)?;

    let target = match (enemy, ally) {
        (Some(_), Some(_)) => return Err("pass either --enemy or --ally, not both".into()),
        (Some(name), None) => AbilityTarget::Enemy(find_enemy(&table, name)?.id),
        (None, Some(name)) => AbilityTarget::Character(find_character(&table, name)?.id),
        (None, None) => AbilityTarget::None,
    };

    let resolved = table
        .use_ability(user.id, ability, target)
        .map_err(|e| e.to_string())?;
    print_outcome(resolved.check.success, &resolved.entry);
    Ok(())
}

pub fn attack(session: &Session, enemy: &str, number: usize, target: &str) -> Result<(), String> {
    let mut table = session.open()?;
    let attacker = find_enemy(&table, enemy)?;
    let victim = find_character(&table, target)?;
    let index = number
        .checked_sub(1)
        .ok_or_else(|| "attacks are numbered from 1".to_string())?;

    let resolved = table
        .enemy_attack(attacker.id, index, victim.id)
        .map_err(|e| e.to_string())?;
    print_outcome(resolved.check.success, &resolved.entry);
    Ok(())
}

fn print_outcome(success: bool, entry: &LogEntry) {
    if success {
        println!("  {}", entry.text.green());
    } else {
        println!("  {}", entry.text.red());
    }
}
