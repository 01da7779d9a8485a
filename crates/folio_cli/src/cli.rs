//! Command-line schema for the `folio` admin tool.

use clap::{Args, Parser, Subcommand, ValueEnum};
use folio_core::storage::DEFAULT_QUOTA_BYTES;
use std::path::PathBuf;

/// Edit and inspect portfolio site content.
#[derive(Debug, Parser)]
#[command(name = "folio", version, about)]
pub struct Cli {
    /// Directory holding the content database and logs.
    #[arg(long, env = "FOLIO_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error). Defaults by build mode.
    #[arg(long, env = "FOLIO_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Storage budget for all persisted values, in bytes.
    #[arg(long, env = "FOLIO_QUOTA_BYTES", default_value_t = DEFAULT_QUOTA_BYTES, global = true)]
    pub quota_bytes: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Overview: collection counts and session state.
    Status,
    /// Print the public portfolio.
    Show {
        /// Print the raw aggregate as JSON instead.
        #[arg(long)]
        json: bool,
    },
    /// Unlock the admin commands.
    Login {
        /// Demo password; read from stdin when omitted.
        #[arg(long)]
        password: Option<String>,
    },
    /// Lock the admin commands again.
    Logout,
    /// Edit profile fields. Omitted fields stay unchanged.
    Profile(ProfileArgs),
    /// Manage projects.
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Replace a whole collection from a JSON array file.
    Replace {
        #[arg(value_enum)]
        collection: Collection,
        /// JSON file holding the new ordered sequence.
        file: PathBuf,
    },
    /// Write the aggregate as JSON to a file or stdout.
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Replace all content with the default dataset.
    Reset {
        /// Skip the interactive confirmation.
        #[arg(long)]
        yes: bool,
    },
    /// List supported service icons.
    Icons,
    /// Ask the text-generation assistant for copy.
    Generate(GenerateArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Collection {
    Slides,
    Services,
    Achievements,
}

/// Image input: pasted URL or local file to embed.
#[derive(Debug, Args)]
#[group(multiple = false)]
pub struct ImageArgs {
    /// External image URL, stored verbatim.
    #[arg(long)]
    pub image_url: Option<String>,
    /// Local image file (max 800KB), embedded as a data reference.
    #[arg(long)]
    pub image_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub bio: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// Avatar URL, stored verbatim.
    #[arg(long, conflicts_with = "avatar_file")]
    pub avatar_url: Option<String>,
    /// Local avatar file (max 800KB).
    #[arg(long)]
    pub avatar_file: Option<PathBuf>,
    #[arg(long)]
    pub github: Option<String>,
    #[arg(long)]
    pub linkedin: Option<String>,
    #[arg(long)]
    pub twitter: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// List projects in display order.
    List,
    /// Create a project; it is shown first.
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: String,
        #[command(flatten)]
        image: ImageArgs,
        #[arg(long)]
        link: Option<String>,
    },
    /// Edit fields of one project. Unknown ids are ignored.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        image: ImageArgs,
        #[arg(long)]
        link: Option<String>,
    },
    /// Remove one project. Unknown ids are ignored.
    Delete { id: String },
}

/// Profile field a generated suggestion can be written into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenerateTarget {
    Bio,
    Title,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// What to write, e.g. "Write a two-sentence bio".
    #[arg(long, default_value = folio_core::assist::DEFAULT_TASK)]
    pub task: String,
    /// Background facts for the model.
    #[arg(long, default_value = "")]
    pub context: String,
    /// Store the suggestion into this profile field.
    #[arg(long, value_enum)]
    pub apply_to: Option<GenerateTarget>,
    /// Gemini API key.
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// Gemini model name.
    #[arg(long, default_value = folio_core::assist::gemini::DEFAULT_MODEL)]
    pub model: String,
}
