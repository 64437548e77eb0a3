//! CLI interface for the CV enhancer

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cv::model::FieldRef;
use crate::enhance::prompts::{EnhanceField, GenerateKind};

#[derive(Parser)]
#[command(name = "cv-enhancer")]
#[command(about = "AI-powered CV text enhancement with word-level diff preview")]
#[command(
    long_about = "Rewrite CV field text with a hosted LLM (or an offline rule-based fallback) and preview exactly which words were added or removed"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Enhance CV field text and preview the changes
    Enhance {
        /// Literal text to enhance
        #[arg(short, long, conflicts_with_all = ["input", "cv"])]
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, conflicts_with = "cv")]
        input: Option<PathBuf>,

        /// Read the text from a field of a CV document (JSON)
        #[arg(long)]
        cv: Option<PathBuf>,

        /// Field the text belongs to: summary, education, experience
        #[arg(short, long, default_value = "summary")]
        field: String,

        /// Entry index for education/experience fields
        #[arg(long, default_value_t = 0)]
        index: usize,

        /// Target program or role the CV is aimed at
        #[arg(short, long)]
        program: Option<String>,

        /// Requirements of the target program
        #[arg(short, long)]
        requirements: Option<String>,

        /// Short background blurb about the candidate
        #[arg(short, long)]
        background: Option<String>,

        /// Use the offline fallback enhancer, never the API
        #[arg(long)]
        offline: bool,

        /// Override the configured model
        #[arg(short, long)]
        model: Option<String>,

        /// Skip the word diff preview
        #[arg(long)]
        no_diff: bool,

        /// Write the enhanced text back into the CV document
        #[arg(long, requires = "cv")]
        apply: bool,

        /// Output format: console, plain, json, markdown, html
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Generate fresh CV content from scratch
    Generate {
        /// What to generate: summary, experience, skills
        #[arg(short, long)]
        kind: String,

        /// Target program or role to generate for
        #[arg(short, long)]
        program: Option<String>,

        /// Requirements of the target program
        #[arg(short, long)]
        requirements: Option<String>,

        /// Short background blurb about the candidate
        #[arg(short, long)]
        background: Option<String>,

        /// Override the configured model
        #[arg(short, long)]
        model: Option<String>,

        /// Save generated content to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Diff two texts word by word
    Diff {
        /// Original text, or a path to it
        original: String,

        /// Enhanced text, or a path to it
        enhanced: String,

        /// Treat the positional arguments as literal text, not file paths
        #[arg(short, long)]
        literal: bool,

        /// Lookahead window for resynchronization
        #[arg(long)]
        lookahead: Option<usize>,

        /// Compare words case-sensitively
        #[arg(long)]
        case_sensitive: bool,

        /// Hide the added/removed legend
        #[arg(long)]
        no_legend: bool,

        /// Output format: console, plain, json, markdown, html
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "plain" | "text" => Ok(crate::config::OutputFormat::Plain),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, plain, json, markdown, html",
            format
        )),
    }
}

/// Parse the field name selecting a prompt template. Unknown names fall
/// back to the generic template.
pub fn parse_enhance_field(field: &str) -> EnhanceField {
    match field.to_lowercase().as_str() {
        "summary" => EnhanceField::Summary,
        "education" => EnhanceField::Education,
        "experience" => EnhanceField::Experience,
        _ => EnhanceField::Other,
    }
}

/// Parse a field name into an addressable CV document location.
pub fn parse_field_ref(field: &str, index: usize) -> Result<FieldRef, String> {
    match field.to_lowercase().as_str() {
        "summary" => Ok(FieldRef::Summary),
        "education" => Ok(FieldRef::EducationDescription(index)),
        "experience" => Ok(FieldRef::ExperienceDescription(index)),
        _ => Err(format!(
            "Unknown CV field: {}. Addressable fields: summary, education, experience",
            field
        )),
    }
}

/// Parse the content kind for generation
pub fn parse_generate_kind(kind: &str) -> Result<GenerateKind, String> {
    match kind.to_lowercase().as_str() {
        "summary" => Ok(GenerateKind::Summary),
        "experience" => Ok(GenerateKind::Experience),
        "skills" => Ok(GenerateKind::Skills),
        _ => Err(format!(
            "Invalid content kind: {}. Supported: summary, experience, skills",
            kind
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format_accepts_aliases() {
        assert_eq!(parse_output_format("Console").unwrap(), OutputFormat::Console);
        assert_eq!(parse_output_format("md").unwrap(), OutputFormat::Markdown);
        assert_eq!(parse_output_format("text").unwrap(), OutputFormat::Plain);
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_parse_enhance_field_falls_back_to_other() {
        assert_eq!(parse_enhance_field("Summary"), EnhanceField::Summary);
        assert_eq!(parse_enhance_field("certifications"), EnhanceField::Other);
    }

    #[test]
    fn test_parse_field_ref_carries_index() {
        assert_eq!(
            parse_field_ref("experience", 2).unwrap(),
            FieldRef::ExperienceDescription(2)
        );
        assert!(parse_field_ref("certifications", 0).is_err());
    }

    #[test]
    fn test_parse_generate_kind() {
        assert_eq!(parse_generate_kind("skills").unwrap(), GenerateKind::Skills);
        assert!(parse_generate_kind("hobbies").is_err());
    }

    #[test]
    fn test_cli_parses_enhance_invocation() {
        let cli = Cli::try_parse_from([
            "cv-enhancer",
            "enhance",
            "--text",
            "worked on things",
            "--field",
            "experience",
            "--program",
            "MSc Robotics",
            "--offline",
        ])
        .unwrap();

        match cli.command {
            Commands::Enhance {
                text,
                field,
                program,
                offline,
                ..
            } => {
                assert_eq!(text.as_deref(), Some("worked on things"));
                assert_eq!(field, "experience");
                assert_eq!(program.as_deref(), Some("MSc Robotics"));
                assert!(offline);
            }
            _ => panic!("expected enhance command"),
        }
    }

    #[test]
    fn test_cli_rejects_text_and_cv_together() {
        let result = Cli::try_parse_from([
            "cv-enhancer",
            "enhance",
            "--text",
            "abc",
            "--cv",
            "cv.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_apply_requires_cv() {
        let result = Cli::try_parse_from(["cv-enhancer", "enhance", "--text", "abc", "--apply"]);
        assert!(result.is_err());
    }
}
