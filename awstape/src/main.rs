mod cli;
mod commands;
mod error;
mod util;

use structopt::StructOpt;
use tracing::Level;

use cli::{CliOpts, Commands};

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(opts: CliOpts) -> anyhow::Result<()> {
    let verbose = opts.verbose;

    match opts.cmd {
        Commands::List(args) => commands::list(args)?,
        Commands::Extract(args) => commands::extract(args, verbose)?,
        Commands::Create(args) => commands::create(args, verbose)?,
        Commands::Convert(args) => commands::convert(args)?,
    };

    Ok(())
}

fn main() {
    let opts = CliOpts::from_iter(wild::args_os());
    init_logging(opts.verbose);

    if let Err(e) = run(opts) {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}
