use std::path::PathBuf;

use clap::Subcommand;
use comfy_table::{ContentArrangement, Table};

use mesa_core::scenario::{MANIFEST_PATH, load_manifest};

use super::Session;

#[derive(Subcommand)]
pub enum ScenarioCommand {
    /// Show the current scenario image
    Show,
    /// Set the scenario image
    Set {
        /// Image path
        path: String,
    },
    /// List images from the asset manifest
    Images {
        /// Path to the manifest
        #[arg(short, long, default_value = MANIFEST_PATH)]
        manifest: PathBuf,
    },
}

pub fn run(session: &Session, cmd: ScenarioCommand) -> Result<(), String> {
    match cmd {
        ScenarioCommand::Show => {
            let table = session.open()?;
            println!("  {}", table.scenario().current());
        }
        ScenarioCommand::Set { path } => {
            let table = session.open()?;
            table.set_scenario(&path).map_err(|e| e.to_string())?;
            println!("  Scenario set to {}", path.trim());
        }
        ScenarioCommand::Images { manifest } => {
            let images = load_manifest(&manifest);
            if images.is_empty() {
                println!("  No images found.");
                return Ok(());
            }
            let mut out = Table::new();
            out.set_content_arrangement(ContentArrangement::Dynamic);
            out.set_header(vec!["Name", "Path"]);
            for image in &images {
                out.add_row(vec![&image.name, &image.path]);
            }
            println!("{out}");
        }
    }

    Ok(())
}
