use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use bibsort::{BblRewriter, SortConfig, check_file, rewrite_bbl_file, sort_file};
use clap::{Parser, Subcommand};
use log::LevelFilter;

/// Sort, validate and tidy bibliography files.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// more output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sort a .bib file by year and name, in place
    Sort {
        /// path to the bibliography file
        #[arg(long)]
        bib: PathBuf,

        /// print the sorted file instead of writing it
        #[arg(long)]
        dry_run: bool,

        /// skip author-name validation
        #[arg(long)]
        no_author_check: bool,

        /// skip the mandatory/optional field check
        #[arg(long)]
        no_schema_check: bool,
    },
    /// Check mandatory and optional fields of a .bib file
    Check {
        /// path to the bibliography file
        #[arg(long)]
        bib: PathBuf,
    },
    /// Translate a .bbl file to Polish, in place
    Bbl {
        /// path to the .bbl file
        input: PathBuf,

        /// text placed between authors instead of "and"
        #[arg(long, default_value = bibsort::bbl::DEFAULT_CONJUNCTION)]
        conjunction: String,
    },
}

impl Args {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn init_logging(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .init();
}

fn run(command: Command) -> bibsort::Result<()> {
    match command {
        Command::Sort {
            bib,
            dry_run,
            no_author_check,
            no_schema_check,
        } => {
            let config = SortConfig {
                validate_authors: !no_author_check,
                check_schema: !no_schema_check,
                dry_run,
            };
            let report = sort_file(&bib, &config)?;
            if dry_run {
                print!("{}", report.output);
            }
        }
        Command::Check { bib } => {
            let warnings = check_file(&bib)?;
            log::info!("{}: {} warning(s)", bib.display(), warnings.len());
        }
        Command::Bbl { input, conjunction } => {
            let rewriter = BblRewriter::new().with_conjunction(&conjunction);
            rewrite_bbl_file(&input, &rewriter)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log_level());

    match run(args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
