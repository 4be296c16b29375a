//! Aorusled CLI — RGB zone control for Aorus IT8297 motherboards.

use clap::Parser;

mod cli;

#[derive(Parser)]
#[command(
    name = "aorusled",
    version,
    about = "RGB zone control for Aorus motherboards with the IT8297 lighting controller"
)]
struct Args {
    /// Output as JSON (for devices, probe, config)
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: cli::Command,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let args = Args::parse();

    if let Err(e) = cli::run(args.command, args.json) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
