use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "blocktree")]
#[command(version)]
#[command(about = "Edit block outline documents from the command line")]
#[command(
    long_about = "blocktree - An outline editor for nested block documents.\n\n\
    A document is an ordered list of blocks. Collapsible blocks hold child blocks,\n\
    tabbed blocks hold one list of blocks per tab. Every command loads the document,\n\
    applies one change, and rewrites only the top-level records that changed.\n\n\
    Examples:\n  \
    blocktree show                          # Print the outline\n  \
    blocktree insert header --text Intro    # Append a header\n  \
    blocktree insert text --parent <ID>     # Add a child to a container\n  \
    blocktree move-root 0 2                 # Drag the first block below the second\n  \
    blocktree tab add <ID> Notes            # Add a tab to a tabbed block"
)]
pub struct Cli {
    /// Store directory (overrides `[store] path` from the config file)
    #[arg(long = "store", value_name = "DIR", global = true)]
    pub store: Option<PathBuf>,

    /// Document to open (overrides `[session] document`)
    #[arg(short = 'd', long = "document", value_name = "NAME", global = true)]
    pub document: Option<String>,

    /// Output format
    ///
    ///   plain - Human-readable text (default)
    ///   json  - JSON for scripting/parsing
    #[arg(short = 'o', long = "output", default_value = "plain", global = true)]
    pub output: OutputFormat,

    /// Roll back the in-memory change when a write fails
    #[arg(long = "rollback", global = true)]
    pub rollback: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the whole outline, or one block with its path
    Show {
        /// Block to show; omit for the whole document
        id: Option<String>,
    },

    /// List the available block types
    Types,

    /// List the documents in the store
    Documents,

    /// Insert a new block with default content
    ///
    /// Without --parent the block goes to the top level. With --parent and
    /// no --tab, a tabbed container receives it in its expanded tab.
    Insert {
        /// Block type (see `blocktree types`)
        block_type: String,

        #[command(flatten)]
        target: Target,

        /// Index to insert at (default: end)
        #[arg(long = "at", value_name = "INDEX")]
        at: Option<usize>,

        /// Initial text for text-like blocks
        #[arg(long = "text")]
        text: Option<String>,
    },

    /// Change the content or decorations of a block
    Update {
        id: String,

        /// Replace the block's main text
        #[arg(long = "text", conflicts_with = "json")]
        text: Option<String>,

        /// Replace the whole content with this JSON object
        #[arg(long = "json", value_name = "CONTENT")]
        json: Option<String>,

        #[arg(long = "color")]
        color: Option<String>,

        #[arg(long = "status")]
        status: Option<String>,

        #[arg(long = "note")]
        note: Option<String>,

        /// Set or clear the flipped flag (cards)
        #[arg(long = "flipped", value_name = "BOOL")]
        flipped: Option<bool>,
    },

    /// Delete a block and everything inside it
    Delete { id: String },

    /// Put the children of a collection in the given order
    Reorder {
        #[command(flatten)]
        target: Target,

        /// Every current child id, in the new order
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Drag a top-level block from one index to a drop gap
    ///
    /// DROP counts gaps in the list before the block is lifted out, so
    /// `move-root 0 2` on [A, B, C] gives [B, A, C].
    MoveRoot { from: usize, drop: usize },

    /// Move a block (with its subtree) to another collection
    Move {
        id: String,

        #[command(flatten)]
        target: Target,

        /// Index in the destination (default: end)
        #[arg(long = "at", value_name = "INDEX")]
        at: Option<usize>,
    },

    /// Manage the tabs of a tabbed block
    #[command(subcommand)]
    Tab(TabCommand),
}

#[derive(Debug, Subcommand)]
pub enum TabCommand {
    /// Append a tab
    Add { container: String, title: String },

    /// Expand one tab and collapse the others
    Activate { container: String, tab: String },

    /// Change a tab's title and/or color
    Rename {
        container: String,
        tab: String,
        title: Option<String>,

        #[arg(long = "color", conflicts_with = "clear_color")]
        color: Option<String>,

        #[arg(long = "clear-color")]
        clear_color: bool,
    },

    /// Remove a tab and its blocks
    Remove { container: String, tab: String },

    /// Put the tabs in the given order
    Reorder {
        container: String,
        #[arg(required = true)]
        tabs: Vec<String>,
    },
}

/// Destination collection of a structural command.
#[derive(Debug, Clone, clap::Args)]
pub struct Target {
    /// Container block (default: top level)
    #[arg(long = "parent", value_name = "ID")]
    pub parent: Option<String>,

    /// Tab of the container
    #[arg(long = "tab", value_name = "TAB", requires = "parent")]
    pub tab: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_insert_into_tab() {
        let cli = Cli::try_parse_from([
            "blocktree", "insert", "text", "--parent", "p", "--tab", "t", "--at", "0", "-o", "json",
        ])
        .unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Command::Insert { block_type, target, at, .. } => {
                assert_eq!(block_type, "text");
                assert_eq!(target.parent.as_deref(), Some("p"));
                assert_eq!(target.tab.as_deref(), Some("t"));
                assert_eq!(at, Some(0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_tab_requires_parent() {
        assert!(Cli::try_parse_from(["blocktree", "insert", "text", "--tab", "t"]).is_err());
    }

    #[test]
    fn test_parse_tab_subcommand() {
        let cli = Cli::try_parse_from(["blocktree", "tab", "reorder", "c", "t2", "t1"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Tab(TabCommand::Reorder { ref tabs, .. }) if tabs == &["t2", "t1"]
        ));
    }
}
