//! Command-line front end over the expense tracker.

pub mod args;
pub mod commands;
pub mod io;
pub mod output;
pub mod table;

use std::env;

use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    core::ExpenseTracker,
    errors::LedgerError,
    storage::JsonStorage,
};

use args::Args;
use output::OutputPreferences;

/// User-facing CLI error wrapper.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("{0}")]
    Usage(String),
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Ledger and preferences shared by every command of one invocation.
pub struct Session {
    pub tracker: ExpenseTracker,
    pub config: Config,
    pub config_manager: ConfigManager,
}

impl Session {
    /// Opens the configured ledger under the application data directory.
    pub fn open() -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;
        let storage = JsonStorage::new(config_manager.ledger_dir(), &config.storage_key)?;
        let tracker = ExpenseTracker::open(Box::new(storage))?;
        Ok(Self {
            tracker,
            config,
            config_manager,
        })
    }
}

type Handler = fn(&mut Session, &Args) -> Result<(), CliError>;

struct CommandSpec {
    name: &'static str,
    usage: &'static str,
    handler: Handler,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "add",
        usage: "add --name <text> --amount <n> --category <tag> [--date YYYY-MM-DD] [--note <text>]",
        handler: commands::add,
    },
    CommandSpec {
        name: "edit",
        usage: "edit <id> [--name] [--amount] [--category] [--date] [--note]",
        handler: commands::edit,
    },
    CommandSpec {
        name: "delete",
        usage: "delete <id> [--yes]",
        handler: commands::delete,
    },
    CommandSpec {
        name: "upvote",
        usage: "upvote <id>",
        handler: commands::upvote,
    },
    CommandSpec {
        name: "downvote",
        usage: "downvote <id>",
        handler: commands::downvote,
    },
    CommandSpec {
        name: "clear",
        usage: "clear [--yes]",
        handler: commands::clear,
    },
    CommandSpec {
        name: "list",
        usage: "list [--category <tag>] [--sort date-desc|date-asc|amount-desc|amount-asc]",
        handler: commands::list,
    },
    CommandSpec {
        name: "stats",
        usage: "stats",
        handler: commands::stats,
    },
    CommandSpec {
        name: "categories",
        usage: "categories",
        handler: commands::categories,
    },
    CommandSpec {
        name: "monthly",
        usage: "monthly",
        handler: commands::monthly,
    },
    CommandSpec {
        name: "trend",
        usage: "trend",
        handler: commands::trend,
    },
    CommandSpec {
        name: "top",
        usage: "top",
        handler: commands::top,
    },
    CommandSpec {
        name: "votes",
        usage: "votes",
        handler: commands::votes,
    },
    CommandSpec {
        name: "config",
        usage: "config [show|set <key> <value>]",
        handler: commands::config,
    },
    CommandSpec {
        name: "dashboard",
        usage: "dashboard [--json]",
        handler: commands::dashboard,
    },
];

/// Runs one command line (without the program name).
pub fn run<I>(argv: I) -> Result<(), CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut argv = argv.into_iter();
    let Some(command) = argv.next() else {
        print_usage();
        return Err(CliError::Usage("no command given".into()));
    };
    let args = Args::parse(argv)?;
    output::set_preferences(OutputPreferences {
        plain_mode: args.switch("plain") || env::var_os("NO_COLOR").is_some(),
    });

    match command.as_str() {
        "help" | "--help" | "-h" => {
            print_usage();
            return Ok(());
        }
        "version" | "--version" => {
            println!("{}", crate::utils::build_info::current().summary());
            return Ok(());
        }
        _ => {}
    }

    let spec = COMMANDS
        .iter()
        .find(|spec| spec.name == command)
        .ok_or_else(|| unknown_command(&command))?;
    if args.switch("help") {
        println!("usage: expense_ledger_cli {}", spec.usage);
        return Ok(());
    }

    let mut session = Session::open()?;
    tracing::debug!(command = spec.name, "running command");
    (spec.handler)(&mut session, &args)
}

fn unknown_command(input: &str) -> CliError {
    let suggestion = COMMANDS
        .iter()
        .map(|spec| (levenshtein(spec.name, input), spec.name))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= 3)
        .map(|(_, name)| format!(" Did you mean `{}`?", name))
        .unwrap_or_default();
    CliError::Usage(format!("unknown command `{}`.{}", input, suggestion))
}

pub fn print_usage() {
    println!("usage: expense_ledger_cli <command> [options]\n\ncommands:");
    for spec in COMMANDS {
        println!("  {}", spec.usage);
    }
    println!("  version");
    println!("  help");
    println!("\nglobal options: --plain (no colours)");
}
