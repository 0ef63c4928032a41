use colored::Colorize;

use mesa_mechanics::Die;

use super::Session;

pub fn run(session: &Session, die: &str, times: u32) -> Result<(), String> {
    let die = Die::parse(die).ok_or_else(|| format!("unknown die '{die}'"))?;
    let mut table = session.open()?;

    let result = table
        .roll_dice(die.sides(), times)
        .map_err(|e| e.to_string())?;
    if result.times != times {
        let note = format!(
            "rolling {} dice (1 to {} allowed)",
            result.times,
            table.config().max_dice
        );
        println!("  {}", note.dimmed());
    }
    let rolls: Vec<String> = result.rolls.iter().map(u32::to_string).collect();
    println!(
        "  {}{die}: [{}] = {}",
        result.times,
        rolls.join(", "),
        result.total.to_string().bold()
    );
    Ok(())
}
