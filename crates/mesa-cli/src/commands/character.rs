use clap::Subcommand;
use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use mesa_core::{Attribute, BaseAttributes};

use super::{Session, find_character, hp_label};

#[derive(Subcommand)]
pub enum CharacterCommand {
    /// Create a character
    Create {
        /// Character name
        name: String,

        /// Class key (see `mesa classes`)
        #[arg(short, long)]
        class: String,

        /// Attribute points as name=value, e.g. -a strength=10 (repeatable)
        #[arg(short, long = "attr", value_name = "NAME=VALUE")]
        attrs: Vec<String>,
    },
    /// List characters
    List,
    /// Show one character with effective attributes and abilities
    Show {
        /// Name or id prefix
        who: String,
    },
    /// Delete a character
    Delete {
        /// Name or id prefix
        who: String,
    },
    /// Select a character
    Select {
        /// Name or id prefix
        who: String,
    },
    /// Deal environmental damage to a character
    Damage {
        /// Name or id prefix
        who: String,

        /// Damage amount
        amount: i64,

        /// What caused the damage
        #[arg(short, long)]
        reason: Option<String>,
    },
    /// Restore a character to full HP
    Reset {
        /// Name or id prefix
        who: String,
    },
}

pub fn run(session: &Session, cmd: CharacterCommand) -> Result<(), String> {
    let table = session.open()?;

    match cmd {
        CharacterCommand::Create { name, class, attrs } => {
            let attributes = parse_attributes(&attrs)?;
            let c = table
                .create_character(&name, &class, attributes)
                .map_err(|e| e.to_string())?;
            println!(
                "  Created {} the {} ({}) with {} HP",
                c.name.bold(),
                c.class_key,
                c.id.to_string().dimmed(),
                c.hp.max_hp
            );
        }
        CharacterCommand::List => {
            let characters = table.characters().all();
            if characters.is_empty() {
                println!("  No characters yet.");
                return Ok(());
            }
            let selected = table.characters().selected();
            let mut out = Table::new();
            out.set_content_arrangement(ContentArrangement::Dynamic);
            out.set_header(vec!["", "Id", "Name", "Class", "HP"]);
            for c in &characters {
                let marker = if selected == Some(c.id) { "*" } else { "" };
                out.add_row(vec![
                    marker.to_string(),
                    c.id.to_string(),
                    c.name.clone(),
                    c.class_key.clone(),
                    hp_label(&c.hp),
                ]);
            }
            println!("{out}");
            println!();
            println!("  {} characters", characters.len());
        }
        CharacterCommand::Show { who } => {
            let c = find_character(&table, &who)?;
            let effective = table.catalog().apply_modifiers(&c.attributes, &c.class_key);
            println!("  {} ({})", c.name.bold(), c.id.to_string().dimmed());
            println!("  Class: {}", c.class_key);
            println!("  HP: {}", hp_label(&c.hp));
            println!(
                "  Created: {}",
                c.created_at.format("%Y-%m-%d %H:%M")
            );

            let mut attrs = Table::new();
            attrs.set_content_arrangement(ContentArrangement::Dynamic);
            attrs.set_header(vec!["Attribute", "Base", "Effective", "Modifier"]);
            for a in Attribute::ALL {
                let value = effective.get(a);
                attrs.add_row(vec![
                    a.to_string(),
                    c.attributes.get(a).to_string(),
                    value.to_string(),
                    format!("{:+}", mesa_mechanics::resolution::attribute_modifier(value)),
                ]);
            }
            println!("{attrs}");

            let abilities = table.catalog().abilities(&c.class_key);
            if !abilities.is_empty() {
                println!("  Abilities:");
                for ability in abilities {
                    println!(
                        "    {} {} ({}, {} vs {})",
                        ability.key.dimmed(),
                        ability.name,
                        ability.kind,
                        ability.attribute,
                        ability.difficulty
                    );
                }
            }
        }
        CharacterCommand::Delete { who } => {
            let c = find_character(&table, &who)?;
            table
                .characters()
                .delete(c.id)
                .map_err(|e| e.to_string())?;
            println!("  Deleted {}", c.name);
        }
        CharacterCommand::Select { who } => {
            let c = find_character(&table, &who)?;
            table
                .characters()
                .set_selected(Some(c.id))
                .map_err(|e| e.to_string())?;
            println!("  Selected {}", c.name);
        }
        CharacterCommand::Damage {
            who,
            amount,
            reason,
        } => {
            let c = find_character(&table, &who)?;
            let c = table
                .apply_environmental_damage(c.id, amount, reason.as_deref())
                .map_err(|e| e.to_string())?;
            println!("  {} is at {} HP", c.name, hp_label(&c.hp));
        }
        CharacterCommand::Reset { who } => {
            let c = find_character(&table, &who)?;
            let c = table.reset_character_hp(c.id).map_err(|e| e.to_string())?;
            println!("  {} restored to {} HP", c.name, hp_label(&c.hp));
        }
    }

    Ok(())
}

/// Parse `name=value` pairs into a distribution; unnamed attributes are 0.
fn parse_attributes(pairs: &[String]) -> Result<BaseAttributes, String> {
    let mut attrs = BaseAttributes::zeroed();
    for pair in pairs {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=VALUE, got '{pair}'"))?;
        let attribute =
            Attribute::parse(name).ok_or_else(|| format!("unknown attribute '{name}'"))?;
        let value: u32 = value
            .trim()
            .parse()
            .map_err(|_| format!("invalid value for {attribute}: '{value}'"))?;
        attrs.set(attribute, value);
    }
    Ok(attrs)
}
