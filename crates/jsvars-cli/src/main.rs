//! jsvars CLI: scaffolding and rendering for server-side JavaScript variables.
//!
//! Provides two commands:
//! - `generate` writes the accessor runtime to a standalone `.js` file
//! - `render` prints the script block for a JSON file of variables

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use jsvars_core::config::DEFAULT_CONFIG_FILE;

#[derive(Parser)]
#[command(
    name = "jsvars",
    about = "Pass server-side variables to client-side JavaScript",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to jsvars.config.json (defaults apply when the file is absent)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the accessor runtime as a standalone JavaScript file
    Generate {
        /// Name of the global function through which the variables are read
        #[arg(long, short)]
        function: Option<String>,

        /// Name of the global object where the variables are stored
        #[arg(long, short)]
        storage: Option<String>,

        /// Directory to write the file to (prompted when omitted)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// File name without extension (prompted when omitted)
        #[arg(long)]
        name: Option<String>,

        /// Template to render instead of the built-in runtime
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Print the script block for a JSON object of variables
    Render {
        /// Path to a JSON file holding an object of variables
        #[arg(long)]
        vars: PathBuf,

        /// Leave out the accessor runtime
        #[arg(long)]
        no_runtime: bool,

        /// Print bare statements without a <script> element
        #[arg(long)]
        no_tags: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            function,
            storage,
            dir,
            name,
            template,
        } => {
            commands::generate::run(
                &cli.config,
                function,
                storage,
                dir,
                name,
                template.as_deref(),
            )?;
        }
        Commands::Render {
            vars,
            no_runtime,
            no_tags,
        } => {
            commands::render::run(&cli.config, &vars, !no_runtime, !no_tags)?;
        }
    }

    Ok(())
}
