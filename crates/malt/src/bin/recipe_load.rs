//! `recipe-load` - recipe links (arguments) to JSON (stdout).
//!
//! Usage:
//!   recipe-load [--pretty] [--no-dictionary] [--verbose] <ENCODED>...
//!
//! Every link is decoded independently; failures are reported on stderr and
//! make the exit status non-zero without stopping the remaining links.

use std::process::ExitCode;

use clap::Parser;
use malt::cli::{init_logging, load_json};
use malt::CrushOptions;

#[derive(Parser)]
#[command(name = "recipe-load", version, about = "Decode URL-safe recipe links into JSON")]
struct Args {
    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,
    /// Links were crushed with `--no-dictionary`.
    #[arg(long)]
    no_dictionary: bool,
    /// Log pipeline sizes at debug level.
    #[arg(short, long)]
    verbose: bool,
    /// Encoded recipe strings.
    #[arg(required = true, value_name = "ENCODED")]
    links: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let options = CrushOptions {
        dictionary: !args.no_dictionary,
        ..CrushOptions::default()
    };
    let mut status = ExitCode::SUCCESS;
    for link in &args.links {
        match load_json(link, &options, args.pretty) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("{link}: {e}");
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}
