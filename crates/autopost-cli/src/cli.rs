//! CLI command definitions and argument parsing.

use autopost_domain::{Language, Length, PostPurpose};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AutoPost - Draft LinkedIn posts in the style of your own corpus.
#[derive(Debug, Parser)]
#[command(name = "autopost")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "AUTOPOST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Model API key (overrides the configured environment variable)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Human-readable text (default)
    Text,
    /// JSON format
    Json,
    /// Quiet format (bare values only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Enrich a raw corpus with metadata and canonical tags
    Process(ProcessArgs),

    /// Draft a post
    Generate(GenerateArgs),

    /// List the canonical tags in the processed corpus
    Tags(TagsArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Raw corpus (JSON array of objects with a "text" field)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Where to write the processed corpus
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip Tanglish spelling normalization of post text
    #[arg(long)]
    pub no_normalize: bool,
}

/// Arguments for the generate command.
#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Topic (a canonical corpus tag gives the best examples)
    #[arg(short, long)]
    pub topic: String,

    /// Your profession
    #[arg(short, long)]
    pub profession: String,

    /// Post length
    #[arg(short, long, value_enum, default_value = "medium")]
    pub length: LengthArg,

    /// Post language
    #[arg(long, value_enum, default_value = "english")]
    pub language: LanguageArg,

    /// What the post is for
    #[arg(long, value_enum, default_value = "general")]
    pub purpose: PurposeArg,

    /// Why you are posting (required for job-search and career-change)
    #[arg(short, long)]
    pub reason: Option<String>,

    /// Comma-separated keywords to include
    #[arg(short, long)]
    pub keywords: Option<String>,

    /// Processed corpus to draw examples from
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    /// Seed for fallback template selection
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Arguments for the tags command.
#[derive(Debug, Parser)]
pub struct TagsArgs {
    /// Processed corpus to read
    #[arg(long)]
    pub corpus: Option<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the default configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Length argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LengthArg {
    /// 1 to 5 lines
    Short,
    /// 6 to 10 lines
    Medium,
    /// 11 to 15 lines
    Long,
}

/// Language argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LanguageArg {
    /// Plain English
    English,
    /// Tamil and English mixed, Latin script
    Tanglish,
}

/// Purpose argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PurposeArg {
    /// Thoughts and general updates
    General,
    /// Celebrating a milestone
    Achievement,
    /// Looking for a role
    JobSearch,
    /// Switching fields
    CareerChange,
    /// Announcing openings
    Hiring,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<LengthArg> for Length {
    fn from(length: LengthArg) -> Self {
        match length {
            LengthArg::Short => Length::Short,
            LengthArg::Medium => Length::Medium,
            LengthArg::Long => Length::Long,
        }
    }
}

impl From<LanguageArg> for Language {
    fn from(language: LanguageArg) -> Self {
        match language {
            LanguageArg::English => Language::English,
            LanguageArg::Tanglish => Language::Tanglish,
        }
    }
}

impl From<PurposeArg> for PostPurpose {
    fn from(purpose: PurposeArg) -> Self {
        match purpose {
            PurposeArg::General => PostPurpose::General,
            PurposeArg::Achievement => PostPurpose::Achievement,
            PurposeArg::JobSearch => PostPurpose::JobSearch,
            PurposeArg::CareerChange => PostPurpose::CareerChange,
            PurposeArg::Hiring => PostPurpose::Hiring,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_command() {
        let cli = Cli::parse_from(["autopost", "process", "-i", "raw.json", "--no-normalize"]);
        match cli.command {
            Command::Process(args) => {
                assert_eq!(args.input, Some(PathBuf::from("raw.json")));
                assert!(args.output.is_none());
                assert!(args.no_normalize);
            }
            _ => panic!("Expected Process command"),
        }
    }

    #[test]
    fn test_generate_command_defaults() {
        let cli = Cli::parse_from(["autopost", "generate", "-t", "Job Search", "-p", "Nurse"]);
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.topic, "Job Search");
                assert!(matches!(args.length, LengthArg::Medium));
                assert!(matches!(args.language, LanguageArg::English));
                assert!(matches!(args.purpose, PurposeArg::General));
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_command_full() {
        let cli = Cli::parse_from([
            "autopost",
            "--format",
            "json",
            "generate",
            "--topic",
            "Networking",
            "--profession",
            "Designer",
            "--length",
            "short",
            "--language",
            "tanglish",
            "--purpose",
            "career-change",
            "--reason",
            "Moving into UX",
            "--seed",
            "4",
        ]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Generate(args) => {
                assert!(matches!(args.purpose, PurposeArg::CareerChange));
                assert_eq!(args.reason.as_deref(), Some("Moving into UX"));
                assert_eq!(args.seed, Some(4));
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_requires_topic() {
        let result = Cli::try_parse_from(["autopost", "generate", "-p", "Nurse"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_arg_conversions() {
        assert_eq!(Length::from(LengthArg::Long), Length::Long);
        assert_eq!(Language::from(LanguageArg::Tanglish), Language::Tanglish);
        assert_eq!(PostPurpose::from(PurposeArg::JobSearch), PostPurpose::JobSearch);
    }
}
