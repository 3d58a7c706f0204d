use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cardz",
    bin_name = "cardz",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Folder-organized flashcards for the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $CARDZ_DATA, then the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// `--sort` values; `config` is whatever `card_order` says.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Config,
    Position,
    Newest,
    Alphabetical,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the contents of a folder
    #[command(display_order = 1)]
    Ls {
        /// Folder id or path (defaults to the current folder)
        folder: Option<String>,

        /// Card order
        #[arg(long, value_enum, default_value_t = SortArg::Config)]
        sort: SortArg,
    },

    /// Show the whole folder hierarchy
    #[command(display_order = 2)]
    Tree,

    /// Create a folder
    #[command(display_order = 10)]
    Mkdir {
        name: String,

        /// Parent folder (defaults to the current folder)
        #[arg(long = "in", value_name = "FOLDER")]
        parent: Option<String>,
    },

    /// Rename a folder
    #[command(display_order = 11)]
    Rename { folder: String, name: String },

    /// Delete a folder with everything in it
    #[command(display_order = 12)]
    Rmdir {
        folder: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Move a folder under another folder
    #[command(name = "mv-folder", display_order = 13)]
    MvFolder { folder: String, destination: String },

    /// Add a card
    #[command(display_order = 20)]
    Add {
        front: String,
        back: String,

        /// Target folder (defaults to the current folder)
        #[arg(long = "in", value_name = "FOLDER")]
        folder: Option<String>,
    },

    /// Replace both sides of a card
    #[command(display_order = 21)]
    Edit {
        /// Card id or position in the current folder
        card: String,
        front: String,
        back: String,
    },

    /// Move a card to another folder
    #[command(display_order = 22)]
    Mv { card: String, folder: String },

    /// Delete a card or a folder
    #[command(display_order = 23)]
    Rm {
        /// Card id, card position, folder id or folder path
        target: String,
    },

    /// Show one card
    #[command(display_order = 24)]
    Show { card: String },

    /// Search every card
    #[command(display_order = 25)]
    Search { term: String },

    /// Enter a folder
    #[command(display_order = 30)]
    Cd { folder: String },

    /// Go to the parent folder
    #[command(display_order = 31)]
    Up,

    /// Print the current folder
    #[command(display_order = 32)]
    Pwd,

    /// Study the cards of a folder
    #[command(display_order = 40)]
    Study {
        /// Folder id or path (defaults to the current folder)
        folder: Option<String>,

        /// Shuffle the deck
        #[arg(long)]
        shuffle: bool,
    },

    /// Export everything to a JSON file
    #[command(display_order = 50)]
    Export {
        /// File or directory (defaults to the working directory)
        path: Option<PathBuf>,
    },

    /// Import a JSON file
    #[command(display_order = 51)]
    Import {
        path: PathBuf,

        /// Add the imported data next to the existing data
        #[arg(long, conflicts_with = "replace")]
        merge: bool,

        /// Discard the existing data
        #[arg(long)]
        replace: bool,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Verify the stored data
    #[command(display_order = 60)]
    Check,

    /// Show or set configuration
    #[command(display_order = 61)]
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_folder_flags() {
        let cli = Cli::parse_from(["cardz", "mkdir", "Verbs", "--in", "Spanish"]);
        match cli.command {
            Some(Commands::Mkdir { name, parent }) => {
                assert_eq!(name, "Verbs");
                assert_eq!(parent.as_deref(), Some("Spanish"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn merge_and_replace_conflict() {
        let res = Cli::try_parse_from(["cardz", "import", "x.json", "--merge", "--replace"]);
        assert!(res.is_err());
    }

    #[test]
    fn global_options_after_subcommand() {
        let cli = Cli::parse_from(["cardz", "ls", "--sort", "newest", "-v", "--data", "/tmp/x"]);
        assert!(cli.verbose);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/x")));
        assert!(matches!(
            cli.command,
            Some(Commands::Ls {
                sort: SortArg::Newest,
                ..
            })
        ));
    }
}
