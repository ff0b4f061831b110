use clap::{Args, Parser, Subcommand};

/// Manage trainers and their teams against a remote Pokédex API.
#[derive(Debug, Parser)]
#[command(name = "trainerdex", version)]
pub struct Cli {
    /// Override the configured API base URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, create, edit and delete trainers.
    #[command(subcommand)]
    Trainers(TrainerCommand),
    /// Work with one trainer's team.
    #[command(subcommand)]
    Team(TeamCommand),
    /// Browse the species catalog.
    Species(SpeciesArgs),
    /// Show the stat range of a species before adding it to a team.
    Preview {
        /// Species id.
        species_id: u32,
        /// Level to preview at.
        #[arg(long, default_value_t = 5)]
        level: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum TrainerCommand {
    /// List every trainer.
    List,
    /// Show one trainer.
    Show { id: u32 },
    /// Create a trainer.
    Add(TrainerFields),
    /// Replace a trainer's details.
    Update {
        id: u32,
        #[command(flatten)]
        fields: TrainerFields,
    },
    /// Delete a trainer and their team.
    Delete { id: u32 },
}

#[derive(Debug, Args)]
pub struct TrainerFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub age: Option<u32>,
    /// Male, Female or Other.
    #[arg(long)]
    pub gender: Option<String>,
    #[arg(long)]
    pub occupation: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum TeamCommand {
    /// List a trainer's team.
    List { trainer_id: u32 },
    /// Add a member to a trainer's team.
    Add {
        trainer_id: u32,
        /// Species id to add.
        #[arg(long = "species")]
        species_id: u32,
        #[arg(long, default_value_t = 5)]
        level: i64,
        #[arg(long)]
        nickname: Option<String>,
    },
    /// Change a member's nickname or level.
    Update {
        trainer_id: u32,
        member_id: u32,
        #[arg(long)]
        level: i64,
        #[arg(long)]
        nickname: Option<String>,
    },
    /// Remove a member from the team.
    Remove { trainer_id: u32, member_id: u32 },
    /// Show a member with server-computed stats.
    Stats { trainer_id: u32, member_id: u32 },
}

#[derive(Debug, Args)]
pub struct SpeciesArgs {
    /// Only species with this type in either slot.
    #[arg(long = "type")]
    pub type_filter: Option<String>,
    /// Substring of the name or pokédex number.
    #[arg(long)]
    pub search: Option<String>,
    /// pokedex_number, name, hp, attack, defense, speed or special.
    #[arg(long, default_value = "pokedex_number")]
    pub sort: String,
    /// Print the list of known types instead of species.
    #[arg(long)]
    pub types: bool,
}
