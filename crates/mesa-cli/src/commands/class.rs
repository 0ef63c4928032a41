use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use mesa_core::{AbilityDefinition, Attribute};

use super::Session;

pub fn run(session: &Session) -> Result<(), String> {
    let table = session.open()?;

    for class in table.catalog().classes() {
        println!("  {} ({})", class.name.bold(), class.key.dimmed());
        if !class.description.is_empty() {
            println!("  {}", class.description);
        }
        let mods: Vec<String> = Attribute::ALL
            .into_iter()
            .map(|a| (a, class.modifiers.get(a)))
            .filter(|(_, delta)| *delta != 0)
            .map(|(a, delta)| format!("{a} {delta:+}"))
            .collect();
        println!("  Modifiers: {}", mods.join(", "));

        let mut abilities = Table::new();
        abilities.set_content_arrangement(ContentArrangement::Dynamic);
        abilities.set_header(vec!["Key", "Name", "Type", "Attribute", "Difficulty", "Effect"]);
        for ability in &class.abilities {
            abilities.add_row(vec![
                ability.key.clone(),
                ability.name.clone(),
                ability.kind.to_string(),
                ability.attribute.to_string(),
                ability.difficulty.to_string(),
                effect_summary(ability),
            ]);
        }
        println!("{abilities}");
        println!();
    }

    Ok(())
}

fn effect_summary(ability: &AbilityDefinition) -> String {
    let mut parts = Vec::new();
    if let Some(damage) = ability.damage {
        parts.push(format!("{damage} damage"));
    }
    if let Some(heal) = ability.heal {
        let scope = if ability.heal_all { " to all" } else { "" };
        parts.push(format!("heal {heal}{scope}"));
    }
    if let Some(rule) = ability.damage_scale {
        parts.push(format!("+{}/{} {} dmg", rule.mult, rule.per, rule.attribute));
    }
    if let Some(rule) = ability.hit_bonus {
        parts.push(format!("+{}/{} {} hit", rule.mult, rule.per, rule.attribute));
    }
    if let Some(rule) = ability.heal_scale {
        parts.push(format!("+{}/{} {} heal", rule.mult, rule.per, rule.attribute));
    }
    if let Some(crit) = ability.critical {
        parts.push(format!("{:.0}% crit x{}", crit.chance * 100.0, crit.mult));
    }
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(", ")
    }
}
