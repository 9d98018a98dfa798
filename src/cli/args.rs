//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// In-memory library catalog manager: books, members, and lending rules
#[derive(Parser, Debug)]
#[command(name = "libcat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Catalog seed file loaded before the command runs
    #[arg(short, long, global = true, env = "LIBCAT_CATALOG", value_hint = ValueHint::FilePath)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book to the catalog
    AddBook(BookArgs),

    /// Remove a book that is not on loan
    RemoveBook {
        /// Book id
        id: u64,
    },

    /// Register a member
    AddMember(MemberArgs),

    /// Remove a member without outstanding loans
    RemoveMember {
        /// Member id
        id: u64,
    },

    /// Lend a book to a member
    Lend(LoanArgs),

    /// Return a book from a member
    Return(LoanArgs),

    /// Find a book by id, ISBN, author or title (in that priority)
    FindBook(FindBookArgs),

    /// Show a member and the books they hold
    FindMember {
        /// Member id
        id: u64,
    },

    /// List the catalog
    ListBooks {
        /// Only books that can be lent right now
        #[arg(short, long)]
        available: bool,
    },

    /// List the roster
    ListMembers,

    /// List books held by a member
    Loans {
        /// Member id
        member: u64,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct BookArgs {
    /// Book id (unique within the catalog)
    #[arg(long)]
    pub id: u64,
    /// Title
    #[arg(long)]
    pub title: String,
    /// Author
    #[arg(long)]
    pub author: String,
    /// ISBN
    #[arg(long)]
    pub isbn: String,
}

#[derive(Args, Debug, Clone)]
pub struct MemberArgs {
    /// Member id (unique within the roster)
    #[arg(long)]
    pub id: u64,
    /// Name
    #[arg(long)]
    pub name: String,
    /// Phone number or other contact reference
    #[arg(long, default_value = "")]
    pub contact: String,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct LoanArgs {
    /// Member id
    #[arg(short, long)]
    pub member: u64,
    /// Book id
    #[arg(short, long)]
    pub book: u64,
}

#[derive(Args, Debug, Clone, Default)]
pub struct FindBookArgs {
    /// Exact book id
    #[arg(long)]
    pub id: Option<u64>,
    /// Exact ISBN
    #[arg(long)]
    pub isbn: Option<String>,
    /// Author substring (case and accent insensitive)
    #[arg(long)]
    pub author: Option<String>,
    /// Title substring (case and accent insensitive)
    #[arg(long)]
    pub title: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config instead of ./.libcat.toml
        #[arg(short, long)]
        global: bool,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}
