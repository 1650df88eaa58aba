use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ytnotes",
    about = "Turn YouTube captions into bullet-point notes",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Show config path and pipeline details
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Summarize videos from the command line
    Notes {
        /// YouTube video URL (reads one per line from stdin if omitted)
        url: Option<String>,

        /// Target summary length in words
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(100..=500))]
        words: Option<u32>,

        /// LLM model for summarization
        #[arg(long)]
        model: Option<String>,

        /// Also print the raw transcript
        #[arg(short, long)]
        transcript: bool,

        /// Write notes to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the web form
    Serve {
        /// Address to listen on
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        /// Require users to sign up and log in
        #[arg(long)]
        login: bool,

        /// Default summary length in words
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(100..=500))]
        words: Option<u32>,

        /// LLM model for summarization
        #[arg(long)]
        model: Option<String>,
    },
}
