use brinley::dataset::{default_comparisons, ScoreTable};
use clap::Parser;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: cmd::Commands,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Modified Brinley plots");

    let table = ScoreTable::embedded();
    let pairs = default_comparisons();

    let ok = match cli.command {
        cmd::Commands::Render(args) => cmd::render::run(args, &table, &pairs),
        cmd::Commands::Summary(args) => cmd::summary::run(args, &table, &pairs),
    };

    match ok {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            error!("❌ FATAL: {}", e);
            process::exit(1);
        }
    }
}
