//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::registry::AlgorithmKind;
use crate::token::NormalizeOptions;

#[allow(missing_docs)]
#[derive(Parser)]
#[command(name = "libphonetic")]
#[command(about = "Phonetic encoders and string distances, with regression and fuzz harnesses")]
#[command(version)]
pub struct Cli {
    /// Harness configuration file (JSON)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Wall-clock budget per algorithm call, in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Number of worker threads
    #[arg(short = 'j', long, global = true)]
    pub parallelism: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[allow(missing_docs)]
#[derive(Subcommand)]
pub enum Commands {
    /// List registered algorithms
    List {
        /// Only list algorithms of this kind
        #[arg(short, long)]
        kind: Option<AlgorithmKind>,
    },

    /// Encode a word with a phonetic encoder
    Encode {
        /// Encoder id
        algorithm: String,

        /// Word to encode
        word: String,

        #[command(flatten)]
        normalize: NormalizeArgs,
    },

    /// Compare two words with a comparator
    Compare {
        /// Comparator id
        algorithm: String,

        /// First word
        a: String,

        /// Second word
        b: String,

        #[command(flatten)]
        normalize: NormalizeArgs,
    },

    /// Check every regression record
    Regress {
        /// Regression store
        #[arg(short, long)]
        store: Option<PathBuf>,
    },

    /// Re-record the expected outputs of the regression store
    Bless {
        /// Regression store
        #[arg(short, long)]
        store: Option<PathBuf>,

        /// Also add sample records for algorithms without any
        #[arg(long)]
        cover: bool,
    },

    /// Run generated inputs through every algorithm
    Fuzz {
        /// Generator seed
        #[arg(long)]
        seed: Option<u64>,

        /// Number of cases
        #[arg(short = 'n', long)]
        cases: Option<usize>,

        /// Print and check a single case
        #[arg(long)]
        replay: Option<u64>,
    },
}

/// Normalization flags shared by `encode` and `compare`
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct NormalizeArgs {
    /// Lowercase the input
    #[arg(long)]
    pub case_fold: bool,

    /// Remove diacritics
    #[arg(long)]
    pub strip_diacritics: bool,

    /// Transliterate to ASCII
    #[arg(long)]
    pub ascii_only: bool,
}

impl From<NormalizeArgs> for NormalizeOptions {
    fn from(args: NormalizeArgs) -> Self {
        NormalizeOptions {
            case_fold: args.case_fold,
            strip_diacritics: args.strip_diacritics,
            ascii_only: args.ascii_only,
        }
    }
}
