//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use archive_models::{FilterCriteria, UploadForm};

#[derive(Debug, Parser)]
#[command(name = "archive")]
#[command(version, about = "Browse, search and upload to the video archive", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Archive API base URL (overrides ARCHIVE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file (overrides ARCHIVE_SESSION_FILE)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List videos, optionally searched and filtered
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print matching records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the schools and tags available for filtering
    Facets {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Upload a video or a ZIP archive of videos
    Upload(UploadArgs),

    /// Sign in with Google
    Login {
        /// Redirect URL the browser landed on after consent
        #[arg(long, conflicts_with = "code")]
        callback_url: Option<String>,

        /// Authorization code, if already extracted
        #[arg(long)]
        code: Option<String>,

        /// Start a new sign-in even if one is stored
        #[arg(long)]
        force: bool,
    },

    /// Forget the stored sign-in
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Check that the archive API is reachable
    Status,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Case-insensitive text matched against title, description and tags
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Only videos from this school (repeatable)
    #[arg(long = "school")]
    pub schools: Vec<String>,

    /// Only videos with this tag (repeatable; any selected tag matches)
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with_query(self.query.clone())
            .with_schools(self.schools.iter().cloned())
            .with_tags(self.tags.iter().cloned())
    }
}

#[derive(Debug, Clone, Args)]
pub struct UploadArgs {
    /// Video file or .zip archive
    pub file: PathBuf,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: String,

    #[arg(long, default_value = "")]
    pub school: String,

    /// Comma-separated tags, e.g. "nature, documentary"
    #[arg(long, default_value = "")]
    pub tags: String,
}

impl UploadArgs {
    pub fn to_form(&self) -> UploadForm {
        UploadForm::new(self.title.clone(), self.description.clone())
            .with_school(self.school.clone())
            .with_tags(self.tags.clone())
    }
}
