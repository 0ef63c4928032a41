//! CLI frontend for the Mesa game master table.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mesa",
    about = "Mesa: a game master's table for tabletop RPG sessions",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding the session state
    #[arg(short, long, global = true, default_value = ".mesa")]
    dir: PathBuf,

    /// RNG seed for reproducible rolls
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// JSON file with an alternative class catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available classes and their abilities
    Classes,

    /// Manage player characters
    #[command(subcommand)]
    Character(commands::character::CharacterCommand),

    /// Manage enemies
    #[command(subcommand)]
    Enemy(commands::enemy::EnemyCommand),

    /// Use a character's ability
    Ability {
        /// Character name or id prefix
        character: String,

        /// Ability key (see `mesa classes`)
        ability: String,

        /// Enemy to attack
        #[arg(short, long)]
        enemy: Option<String>,

        /// Character to heal (defaults to the user)
        #[arg(short, long)]
        ally: Option<String>,
    },

    /// Have an enemy attack a character
    Attack {
        /// Enemy name or id prefix
        enemy: String,

        /// Attack number as listed by `mesa enemy show` (starting at 1)
        attack: usize,

        /// Target character name or id prefix
        target: String,
    },

    /// Start, advance, end, or inspect the battle
    #[command(subcommand)]
    Battle(commands::battle::BattleCommand),

    /// Roll dice as the GM
    Roll {
        /// Die to roll, e.g. d20, d6, 12
        die: String,

        /// Number of dice
        #[arg(default_value = "1")]
        times: u32,
    },

    /// Show or clear the event log
    Log {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,

        /// Clear the log instead of showing it
        #[arg(long)]
        clear: bool,
    },

    /// Manage GM notes
    #[command(subcommand)]
    Note(commands::note::NoteCommand),

    /// Show or change the scenario image
    #[command(subcommand)]
    Scenario(commands::scenario::ScenarioCommand),

    /// Show the story document
    Story {
        /// Path to the story JSON
        #[arg(short, long, default_value = mesa_core::story::STORY_PATH)]
        path: PathBuf,

        /// Include GM notes
        #[arg(long)]
        gm: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let session = commands::Session {
        dir: cli.dir,
        seed: cli.seed,
        catalog: cli.catalog,
    };

    let result = match cli.command {
        Commands::Classes => commands::class::run(&session),
        Commands::Character(cmd) => commands::character::run(&session, cmd),
        Commands::Enemy(cmd) => commands::enemy::run(&session, cmd),
        Commands::Ability {
            character,
            ability,
            enemy,
            ally,
        } => commands::combat::ability(
            &session,
            &character,
            &ability,
            enemy.as_deref(),
            ally.as_deref(),
        ),
        Commands::Attack {
            enemy,
            attack,
            target,
        } => commands::combat::attack(&session, &enemy, attack, &target),
        Commands::Battle(cmd) => commands::battle::run(&session, cmd),
        Commands::Roll { die, times } => commands::dice::run(&session, &die, times),
        Commands::Log { limit, clear } => commands::log::run(&session, limit, clear),
        Commands::Note(cmd) => commands::note::run(&session, cmd),
        Commands::Scenario(cmd) => commands::scenario::run(&session, cmd),
        Commands::Story { path, gm } => commands::story::run(&path, gm),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
