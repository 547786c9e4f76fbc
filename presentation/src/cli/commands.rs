//! CLI command definitions

use clap::{Parser, ValueEnum};
use mog_domain::Mode;
use std::path::PathBuf;

/// Exchange mode selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Conversational reply with recent history
    Chat,
    /// Multimodal generation (text plus optional image)
    Image,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Chat => Mode::Chat,
            ModeArg::Image => Mode::ImageGeneration,
        }
    }
}

/// CLI arguments for mog-agent
#[derive(Parser, Debug)]
#[command(name = "mog-agent")]
#[command(author, version, about = "The Mog Agent - superior commentary on your portfolio")]
#[command(long_about = r#"
The Mog Agent answers in one of two modes:

  chat   Conversational reply, with the most recent turns as context
  image  Multimodal generation from a prompt and an optional image

Configuration files are loaded from (in priority order):
1. --config <path>              Explicit config file
2. ./mog-agent.toml             Project-level config
3. ~/.config/mog-agent/config.toml   Global config

The API key is read from the variable named by provider.api_key_env
(default API_KEY), then VITE_API_KEY.

Example:
  mog-agent "wen moon?"
  mog-agent "Rate this chart" --attach chart.png
  mog-agent --chat
"#)]
pub struct Cli {
    /// Message to send (not required in chat mode)
    pub prompt: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Initial exchange mode (overrides config)
    #[arg(short, long, value_enum, value_name = "MODE")]
    pub mode: Option<ModeArg>,

    /// Image file or `data:` reference to attach (only the first is used)
    #[arg(short, long, value_name = "PATH", num_args = 1..)]
    pub attach: Vec<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
