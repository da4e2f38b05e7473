//! `recipe-crush` - JSON recipe (stdin) to URL-safe recipe links (stdout).
//!
//! Usage:
//!   recipe-crush [--level N] [--no-dictionary] [--stats] [--verbose] < recipe.json
//!
//! Input is one recipe object or an array of them; one link is printed per
//! recipe, in order.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use clap::Parser;
use malt::cli::{crush_json, init_logging, stats_json};
use malt::CrushOptions;

#[derive(Parser)]
#[command(name = "recipe-crush", version, about = "Encode beer recipes into URL-safe links")]
struct Args {
    /// DEFLATE effort, 0-9.
    #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u32).range(0..=9))]
    level: u32,
    /// Compress without the brewing dictionary.
    #[arg(long)]
    no_dictionary: bool,
    /// Print a size breakdown per recipe to stderr.
    #[arg(long)]
    stats: bool,
    /// Log pipeline sizes at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut input = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut input) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    let options = CrushOptions {
        level: args.level,
        dictionary: !args.no_dictionary,
    };
    let links = match crush_json(&input, &options) {
        Ok(links) => links,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if args.stats {
        match stats_json(&input) {
            Ok(reports) => {
                for report in reports {
                    eprint!("{report}");
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    let mut stdout = io::stdout().lock();
    for link in links {
        if let Err(e) = writeln!(stdout, "{link}") {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
