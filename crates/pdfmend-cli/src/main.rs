mod check_cmd;
mod cli;
mod fonts_cmd;
mod normalize_cmd;
mod page_range;
mod shared;
mod stamp_cmd;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check {
            ref file,
            ref password,
        } => check_cmd::run(file, password.as_deref()),
        Commands::Normalize {
            ref input,
            ref output,
            ref password,
        } => normalize_cmd::run(input, output, password.as_deref()),
        Commands::Fonts {
            ref file,
            ref format,
            ref password,
        } => fonts_cmd::run(file, format, password.as_deref()),
        Commands::Stamp {
            ref input,
            ref output,
            ref text,
            font,
            size,
            anchor,
            offset_x,
            offset_y,
            ref pages,
            no_isolate,
            ref password,
        } => {
            let args = stamp_cmd::StampArgs {
                text,
                font,
                size,
                anchor,
                offset_x,
                offset_y,
                isolate: !no_isolate,
            };
            stamp_cmd::run(input, output, &args, pages.as_deref(), password.as_deref())
        }
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
