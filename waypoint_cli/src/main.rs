use clap::{Parser, Subcommand};

use mimalloc::MiMalloc;

use crate::{generate::GenerateSubcommands, optimize::OptimizeArgs};

mod generate;
mod optimize;
mod parsers;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize the stops of a request file and print the routes
    Optimize {
        #[command(flatten)]
        args: OptimizeArgs,
    },
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Optimize { args } => optimize::run(args)?,
        Commands::Generate { commands } => generate::run(commands)?,
    }

    Ok(())
}
