//! Command line argument parsing for the lexstat CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::scanner::{DEFAULT_MAX_TOKEN_LEN, OverflowPolicy, ScanConfig};
use crate::analysis::source::Encoding;

/// lexstat - token scanning and readability statistics for Russian text
#[derive(Parser, Debug, Clone)]
#[command(name = "lexstat")]
#[command(about = "Token scanning and readability statistics for Russian text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct LexstatArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl LexstatArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compute statistics and readability indices for text files
    Analyze(AnalyzeArgs),

    /// Print every token of a file
    Tokens(TokensArgs),

    /// Print the sentences of a file
    Sentences(SentencesArgs),

    /// Print the built-in Russian rules
    Rules(RulesArgs),
}

/// Options shared by every command that scans a file.
#[derive(clap::Args, Debug, Clone)]
pub struct ScanArgs {
    /// Text encoding of the input (utf-8 or windows-1251)
    #[arg(short, long, default_value = "windows-1251")]
    pub encoding: Encoding,

    /// Read window size, and therefore the longest recognizable token
    #[arg(long, default_value_t = DEFAULT_MAX_TOKEN_LEN)]
    pub max_token_len: usize,

    /// Fail instead of truncating tokens longer than the read window
    #[arg(long)]
    pub strict: bool,

    /// JSON rule file replacing the built-in Russian rules
    #[arg(long, value_name = "RULES_FILE")]
    pub rules: Option<PathBuf>,
}

impl ScanArgs {
    pub fn scan_config(&self) -> ScanConfig {
        let overflow = if self.strict {
            OverflowPolicy::Error
        } else {
            OverflowPolicy::Truncate
        };
        ScanConfig::default()
            .with_max_token_len(self.max_token_len)
            .with_overflow(overflow)
    }
}

/// Arguments for analyzing files
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Text files to analyze
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub scan: ScanArgs,

    /// Include average word and sentence lengths
    #[arg(short, long)]
    pub averages: bool,

    /// Include the hardest sentence for each index
    #[arg(long)]
    pub hardest: bool,

    /// Analyze files in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Number of threads for parallel analysis
    #[arg(short, long, requires = "parallel")]
    pub threads: Option<usize>,
}

/// Arguments for listing tokens
#[derive(Parser, Debug, Clone)]
pub struct TokensArgs {
    /// Text file to scan
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub scan: ScanArgs,

    /// Keep whitespace tokens
    #[arg(long)]
    pub all: bool,

    /// Only show tokens with this tag
    #[arg(long)]
    pub tag: Option<String>,
}

/// Arguments for listing sentences
#[derive(Parser, Debug, Clone)]
pub struct SentencesArgs {
    /// Text file to scan
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    #[command(flatten)]
    pub scan: ScanArgs,

    /// Only show the longest sentence
    #[arg(long)]
    pub longest: bool,
}

/// Arguments for printing the built-in rules
#[derive(Parser, Debug, Clone)]
pub struct RulesArgs {
    /// Include the Latin word rule before the generic word rule
    #[arg(long)]
    pub latin: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables
    Human,
    /// JSON output
    Json,
}
