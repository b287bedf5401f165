use anyhow::Result;
use clap::{Parser, Subcommand};
use unannotated::commands::{check_command, explain_command, list_types_command, show_rules_command};
use unannotated::init_logging;

/// Finds public test-class methods the test framework would silently skip.
///
/// This CLI is a thin wrapper around `unannotated-core`. All substantive logic
/// lives in the library so it can be tested thoroughly and reused from other
/// frontends.
#[derive(Parser, Debug)]
#[command(
    name = "unannotated",
    version,
    about = "Report public test methods missing lifecycle annotations",
    long_about = None
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check test classes in a metadata snapshot for unannotated public methods.
    ///
    /// Every failure (violations and internal faults) is printed; the command
    /// exits non-zero if any was reported.
    Check {
        /// Snapshot file (.json, .yaml or .yml).
        #[arg(long)]
        snapshot: String,

        /// Class to check; repeatable. Defaults to the snapshot's test classes.
        #[arg(long = "class")]
        classes: Vec<String>,

        /// Optional rule config file overriding the built-in defaults.
        #[arg(long)]
        config: Option<String>,

        /// Emit a JSON report instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Show the verdict for every public method of one class.
    Explain {
        /// Snapshot file (.json, .yaml or .yml).
        #[arg(long)]
        snapshot: String,

        /// Fully-qualified class name.
        #[arg(long)]
        class: String,

        /// Optional rule config file overriding the built-in defaults.
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List all types in a snapshot.
    ListTypes {
        /// Snapshot file (.json, .yaml or .yml).
        #[arg(long)]
        snapshot: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the effective rule configuration.
    ShowRules {
        /// Optional rule config file overriding the built-in defaults.
        #[arg(long)]
        config: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Check { snapshot, classes, config, json } => {
            check_command(&snapshot, &classes, config.as_deref(), json)?
        }
        Command::Explain { snapshot, class, config, json } => {
            explain_command(&snapshot, &class, config.as_deref(), json)?
        }
        Command::ListTypes { snapshot, json } => list_types_command(&snapshot, json)?,
        Command::ShowRules { config, json } => show_rules_command(config.as_deref(), json)?,
    }

    Ok(())
}
