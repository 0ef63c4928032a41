use colored::Colorize;

use mesa_core::LogKind;

use super::Session;

pub fn run(session: &Session, limit: usize, clear: bool) -> Result<(), String> {
    let table = session.open()?;

    if clear {
        table.log().clear().map_err(|e| e.to_string())?;
        println!("  Log cleared.");
        return Ok(());
    }

    let entries = table.log().all();
    if entries.is_empty() {
        println!("  The log is empty.");
        return Ok(());
    }

    for entry in entries.iter().take(limit) {
        let time = entry.timestamp.format("%H:%M:%S").to_string().dimmed();
        let kind = colorize_kind(entry.kind);
        println!("  {time} {kind} {}", entry.text);
    }
    Ok(())
}

fn colorize_kind(kind: LogKind) -> colored::ColoredString {
    let label = format!("[{kind}]");
    match kind {
        LogKind::Damage | LogKind::EnemyAttack => label.red(),
        LogKind::Heal => label.green(),
        LogKind::Ability => label.cyan(),
        LogKind::Battle | LogKind::Turn => label.yellow(),
        LogKind::Dice => label.magenta(),
        LogKind::Scenario => label.blue(),
    }
}
