use clap::{Parser, Subcommand};
use std::path::PathBuf;
use anyhow::{Result, Context};

mod config;
mod commands;
mod error;

use commands::input::SequenceArgs;
use commands::Output;
use config::Config;
use error::{format_error_with_suggestions, CliError};

#[derive(Parser)]
#[command(name = "seqlab")]
#[command(about = "SeqLab - pairwise comparison and pattern analysis for nucleotide sequences")]
#[command(version)]
#[command(long_about = "
SeqLab compares short nucleotide sequences and scans them for patterns.
Sequences are given on the command line, read from a FASTA file with -i, or both.

Examples:
  seqlab align ATGCTAGC ATGCGAGC --gap -3
  seqlab similarity -i samples.fa --json
  seqlab palindromes ATGCGAATTCGCAT --reverse-complement
  seqlab stats -i genome.fa.gz -t 8
  seqlab db import -i samples.fa --db samples.seqdb
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit reports as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Global alignment score of two sequences
    Align {
        #[command(flatten)]
        sequences: SequenceArgs,

        /// Score for a matching pair
        #[arg(long, allow_negative_numbers = true)]
        match_score: Option<i32>,

        /// Score for a mismatching pair
        #[arg(long, allow_negative_numbers = true)]
        mismatch: Option<i32>,

        /// Linear gap penalty
        #[arg(long, allow_negative_numbers = true)]
        gap: Option<i32>,
    },

    /// Longest common subsequence of two sequences
    Lcs {
        #[command(flatten)]
        sequences: SequenceArgs,
    },

    /// Mismatch-proportion distance between two sequences
    Distance {
        #[command(flatten)]
        sequences: SequenceArgs,
    },

    /// Per-position majority consensus
    Consensus {
        #[command(flatten)]
        sequences: SequenceArgs,
    },

    /// Count substrings of a fixed length seen more than once
    Repeats {
        #[command(flatten)]
        sequences: SequenceArgs,

        /// Window length (defaults to patterns.repeat_length)
        #[arg(long)]
        length: Option<usize>,
    },

    /// List palindromic regions with start, end and bases
    Palindromes {
        #[command(flatten)]
        sequences: SequenceArgs,

        /// Shortest region reported (defaults to patterns.min_palindrome_length)
        #[arg(long)]
        min_length: Option<usize>,

        /// Match regions equal to their reverse complement instead of their mirror
        #[arg(long)]
        reverse_complement: bool,
    },

    /// Greedy suffix-prefix assembly of ordered fragments
    Assemble {
        #[command(flatten)]
        sequences: SequenceArgs,
    },

    /// All-pairs identity matrix
    Similarity {
        #[command(flatten)]
        sequences: SequenceArgs,
    },

    /// Per-record length and GC content plus a file summary
    Stats {
        /// Input FASTA/FASTQ file (may be gzipped)
        #[arg(short, long, required = true)]
        input: PathBuf,
    },

    /// Print records whose sequence contains a keyword
    Search {
        /// Input FASTA/FASTQ file (may be gzipped)
        #[arg(short, long, required = true)]
        input: PathBuf,

        /// Sequence fragment to look for (case-insensitive)
        keyword: String,

        /// Output line width (defaults to fasta.line_width; 0 disables wrapping)
        #[arg(long)]
        line_width: Option<usize>,
    },

    /// Manage a .seqdb sequence store
    Db {
        #[command(subcommand)]
        action: DbCommands,
    },

    /// Print an example seqlab.toml, or write it to a file
    Config {
        /// Write the example configuration here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum DbCommands {
    /// Validate and insert FASTA records, creating the store if needed
    Import {
        /// Input FASTA/FASTQ file (may be gzipped)
        #[arg(short, long, required = true)]
        input: PathBuf,

        /// Store file (.seqdb)
        #[arg(long, required = true)]
        db: PathBuf,

        /// zstd compression level (defaults to store.compression_level)
        #[arg(long)]
        compression: Option<i32>,
    },

    /// List records whose header contains a keyword (case-insensitive)
    Search {
        /// Store file (.seqdb)
        #[arg(long, required = true)]
        db: PathBuf,

        keyword: String,
    },

    /// List every record in the store
    List {
        /// Store file (.seqdb)
        #[arg(long, required = true)]
        db: PathBuf,
    },
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    if quiet {
        std::env::set_var("RUST_LOG", "error");
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        std::env::set_var("RUST_LOG", level);
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    // Setup logging
    setup_logging(cli.verbose, cli.quiet)?;

    // Load configuration
    let config = Config::load(cli.config.as_deref())?;

    let threads = cli.threads.unwrap_or(config.general.threads);
    if threads == 0 {
        return Err(CliError::validation("thread count must be at least 1").into());
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("Failed to set thread count")?;
    log::debug!("Using {} threads", threads);

    let output = Output::new(cli.json, cli.quiet);

    // Execute the requested command
    match cli.command {
        Commands::Align { sequences, match_score, mismatch, gap } => {
            let scheme = config.scoring.scheme(match_score, mismatch, gap);
            commands::compare::execute_align(&output, &sequences, scheme)?;
        }

        Commands::Lcs { sequences } => {
            commands::compare::execute_lcs(&output, &sequences)?;
        }

        Commands::Distance { sequences } => {
            commands::compare::execute_distance(&output, &sequences)?;
        }

        Commands::Consensus { sequences } => {
            commands::consensus::execute(&output, &sequences)?;
        }

        Commands::Repeats { sequences, length } => {
            let length = length.unwrap_or(config.patterns.repeat_length);
            commands::patterns::execute_repeats(&output, &sequences, length)?;
        }

        Commands::Palindromes { sequences, min_length, reverse_complement } => {
            let min_length = min_length.unwrap_or(config.patterns.min_palindrome_length);
            commands::patterns::execute_palindromes(&output, &sequences, min_length, reverse_complement)?;
        }

        Commands::Assemble { sequences } => {
            commands::assemble::execute(&output, &sequences)?;
        }

        Commands::Similarity { sequences } => {
            commands::similarity::execute(&output, &sequences)?;
        }

        Commands::Stats { input } => {
            commands::stats::execute(&output, &input)?;
        }

        Commands::Search { input, keyword, line_width } => {
            let line_width = line_width.unwrap_or(config.fasta.line_width);
            commands::search::execute(&output, &input, &keyword, line_width)?;
        }

        Commands::Db { action } => match action {
            DbCommands::Import { input, db, compression } => {
                let level = compression.unwrap_or(config.store.compression_level);
                commands::db::execute_import(&output, &input, &db, level)?;
            }
            DbCommands::Search { db, keyword } => {
                commands::db::execute_search(&output, &db, &keyword)?;
            }
            DbCommands::List { db } => {
                commands::db::execute_list(&output, &db)?;
            }
        },

        Commands::Config { output } => match output {
            Some(path) => {
                Config::default().save_to_file(&path)?;
                log::info!("Configuration written to: {}", path.display());
            }
            None => print!("{}", Config::example_toml()?),
        },
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => eprintln!("Error: {}", format_error_with_suggestions(cli_err)),
            None => eprintln!("Error: {:#}", err),
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_align_with_overrides() {
        let cli = Cli::try_parse_from([
            "seqlab", "align", "ATGC", "ATGA", "--gap", "-3", "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Align { sequences, gap, match_score, .. } => {
                assert_eq!(sequences.sequences, vec!["ATGC", "ATGA"]);
                assert_eq!(gap, Some(-3));
                assert_eq!(match_score, None);
            }
            _ => panic!("expected align"),
        }
    }

    #[test]
    fn test_parse_db_import() {
        let cli = Cli::try_parse_from([
            "seqlab", "-vv", "db", "import", "-i", "in.fa", "--db", "out.seqdb",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Commands::Db { action: DbCommands::Import { .. } }
        ));
    }

    #[test]
    fn test_stats_requires_input() {
        assert!(Cli::try_parse_from(["seqlab", "stats"]).is_err());
    }
}
