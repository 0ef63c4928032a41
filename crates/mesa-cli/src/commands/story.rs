use std::path::Path;

use colored::Colorize;

use mesa_core::story::load_story;

pub fn run(path: &Path, show_gm_notes: bool) -> Result<(), String> {
    let story =
        load_story(path).ok_or_else(|| format!("no readable story at {}", path.display()))?;

    let version = if story.version.is_empty() {
        String::new()
    } else {
        format!(" v{}", story.version)
    };
    println!("  {}{}", story.title.bold(), version.dimmed());
    if !story.summary.is_empty() {
        println!("  {}", story.summary);
    }

    for part in &story.parts {
        println!();
        println!("  {} {}", part.id.dimmed(), part.title.bold().underline());
        if !part.description.is_empty() {
            println!("  {}", part.description);
        }
        if show_gm_notes && !part.gm_notes.is_empty() {
            println!("  {} {}", "GM:".yellow().bold(), part.gm_notes);
        }
    }
    Ok(())
}
