mod app;
mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use cardbox_lib::models::TagColor;

#[derive(Parser)]
#[command(name = "cardbox-cli", about = "Flashcard decks, tags and practice sessions", version)]
struct Cli {
    /// Use a specific data directory (default: the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage decks
    #[command(subcommand)]
    Deck(DeckCommand),

    /// Manage cards
    #[command(subcommand)]
    Card(CardCommand),

    /// Manage tags
    #[command(subcommand)]
    Tag(TagCommand),

    /// Run a shuffled practice session over a deck
    Practice {
        /// Deck name (case-insensitive prefix match)
        deck: String,
    },
}

#[derive(Subcommand)]
enum DeckCommand {
    /// List decks with card counts
    List {
        /// Filter by name/description substring
        #[arg(long)]
        search: Option<String>,
        /// Only decks carrying this tag (repeatable; all must match)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Create a new deck
    New {
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Attach a tag by name (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Change a deck's name, description or tags
    Edit {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Replace the tag set (repeatable; omit to keep it)
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
    },

    /// Delete a deck and every card it owns
    Rm {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CardCommand {
    /// List the cards in a deck
    List {
        /// Deck name (case-insensitive prefix match)
        deck: String,
    },

    /// Add a card to a deck
    New {
        /// Deck name (case-insensitive prefix match)
        deck: String,
        /// Question side
        front: String,
        /// Answer side
        back: String,
    },

    /// Delete a card by id
    Rm { id: Uuid },
}

#[derive(Subcommand)]
enum TagCommand {
    /// List tags with the number of decks carrying each
    List,

    /// Create a tag
    New {
        name: String,
        /// Badge color: indigo, mint, coral, amber, sky or violet
        #[arg(long, default_value = "indigo")]
        color: TagColor,
    },

    /// Delete a tag and detach it from every deck
    Rm { name: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let app = app::App::new(cli.data_dir)?;

    match cli.command {
        Command::Deck(subcmd) => match subcmd {
            DeckCommand::List { search, tags } => {
                commands::decks::run_list(&app, search.as_deref(), &tags).await?;
            }
            DeckCommand::New {
                name,
                description,
                tags,
            } => {
                commands::decks::run_new(&app, name, description, &tags).await?;
            }
            DeckCommand::Edit {
                deck,
                name,
                description,
                tags,
            } => {
                commands::decks::run_edit(&app, &deck, name, description, tags.as_deref()).await?;
            }
            DeckCommand::Rm { deck, yes } => {
                commands::decks::run_rm(&app, &deck, yes).await?;
            }
        },
        Command::Card(subcmd) => match subcmd {
            CardCommand::List { deck } => commands::cards::run_list(&app, &deck).await?,
            CardCommand::New { deck, front, back } => {
                commands::cards::run_new(&app, &deck, front, back).await?;
            }
            CardCommand::Rm { id } => commands::cards::run_rm(&app, id).await?,
        },
        Command::Tag(subcmd) => match subcmd {
            TagCommand::List => commands::tags::run_list(&app).await?,
            TagCommand::New { name, color } => commands::tags::run_new(&app, &name, color).await?,
            TagCommand::Rm { name } => commands::tags::run_rm(&app, &name).await?,
        },
        Command::Practice { deck } => commands::practice::run(&app, &deck).await?,
    }

    Ok(())
}
