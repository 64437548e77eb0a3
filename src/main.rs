//! CV enhancer: AI-powered CV text enhancement with word-level diff preview

mod cli;
mod config;
mod cv;
mod diff;
mod enhance;
mod error;
mod output;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::{Config, OutputFormat};
use cv::model::{Cv, FieldRef};
use diff::{DiffOptions, DiffStats, WordDiff};
use enhance::enhancer::{Enhancer, EnhancementRequest};
use enhance::prompts::EnhancementContext;
use error::{CvEnhancerError, Result};
use indicatif::ProgressBar;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    // Execute command
    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Enhance {
            text,
            input,
            cv,
            field,
            index,
            program,
            requirements,
            background,
            offline,
            model,
            no_diff,
            apply,
            output,
            save,
        } => {
            info!("Starting CV text enhancement");

            let output_format =
                cli::parse_output_format(&output).map_err(CvEnhancerError::InvalidInput)?;

            let enhance_field = cli::parse_enhance_field(&field);

            // Resolve the content source
            let (content, cv_document) = resolve_content(text, input, &cv, &field, index)?;

            println!("✨ Enhancing {} text ({} characters)", field, content.len());
            if let Some(program) = &program {
                println!("🎯 Target: {}", program);
            }

            let mut config = config;
            if let Some(model) = model {
                config.api.model = model;
            }

            let enhancer = if offline {
                println!("📴 Offline mode: using the rule-based enhancer");
                Enhancer::offline(&config)?
            } else {
                Enhancer::new(&config)?
            };

            if let Some(model) = enhancer.model() {
                println!("🤖 Model: {}", model);
            }

            let request = EnhancementRequest {
                field: enhance_field,
                content,
                context: EnhancementContext {
                    target_program: program,
                    program_requirements: requirements,
                    user_background: background,
                },
            };

            let spinner = enhancer.has_client().then(|| api_spinner("Enhancing text..."));
            let enhancement = enhancer.enhance(&request).await;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }

            // Word diff between the original and enhanced text
            let spans = (!no_diff).then(|| {
                WordDiff::new(DiffOptions::from(&config.diff))
                    .diff(&enhancement.original, &enhancement.enhanced)
            });

            let use_colors = config.output.color && save.is_none();
            let renderers =
                output::RendererSet::with_options(use_colors, config.output.legend, true, true);

            let rendered = match output_format {
                OutputFormat::Console => renderers
                    .console()
                    .render_enhancement(&enhancement, spans.as_deref())?,
                OutputFormat::Json => {
                    let mut value = serde_json::to_value(&enhancement)?;
                    if let (Some(spans), Some(map)) = (&spans, value.as_object_mut()) {
                        map.insert("spans".to_string(), serde_json::to_value(spans)?);
                        map.insert(
                            "stats".to_string(),
                            serde_json::to_value(DiffStats::from_spans(spans))?,
                        );
                    }
                    format!("{}\n", serde_json::to_string_pretty(&value)?)
                }
                _ => match &spans {
                    Some(spans) => renderers.render(spans, &output_format)?,
                    None => format!("{}\n", enhancement.enhanced),
                },
            };

            match &save {
                Some(path) => {
                    output::save_output_to_file(&rendered, path)?;
                    println!("💾 Output saved to: {}", path.display());
                }
                None => print!("{}", rendered),
            }

            // Write the enhanced text back into the CV document
            if apply {
                if let Some((mut cv_doc, field_ref, cv_path)) = cv_document {
                    field_ref.set(&mut cv_doc, enhancement.enhanced.clone())?;
                    cv_doc.touch();
                    cv::store::save_cv(&cv_path, &cv_doc)?;
                    println!("✅ Applied enhanced {} to {}", field, cv_path.display());
                }
            }
        }

        Commands::Generate {
            kind,
            program,
            requirements,
            background,
            model,
            save,
        } => {
            let generate_kind =
                cli::parse_generate_kind(&kind).map_err(CvEnhancerError::InvalidInput)?;

            let mut config = config;
            if let Some(model) = model {
                config.api.model = model;
            }

            println!("📝 Generating {} content...", kind);
            if let Some(program) = &program {
                println!("🎯 Target: {}", program);
            }

            let enhancer = Enhancer::new(&config)?;
            let context = EnhancementContext {
                target_program: program,
                program_requirements: requirements,
                user_background: background,
            };

            let spinner = api_spinner("Generating content...");
            let generated = enhancer.generate(generate_kind, &context).await;
            spinner.finish_and_clear();
            let generated = generated?;

            match &save {
                Some(path) => {
                    output::save_output_to_file(&generated, path)?;
                    println!("💾 Generated content saved to: {}", path.display());
                }
                None => println!("\n{}\n", generated),
            }

            println!(
                "💡 Generated content follows best practices for the target field. Edit it to accurately reflect your own experiences and achievements."
            );
        }

        Commands::Diff {
            original,
            enhanced,
            literal,
            lookahead,
            case_sensitive,
            no_legend,
            output,
            save,
        } => {
            let output_format =
                cli::parse_output_format(&output).map_err(CvEnhancerError::InvalidInput)?;

            let original_text = read_input_text(&original, literal)?;
            let enhanced_text = read_input_text(&enhanced, literal)?;

            let mut options = DiffOptions::from(&config.diff);
            if let Some(lookahead) = lookahead {
                options.lookahead = lookahead;
            }
            if case_sensitive {
                options.ignore_case = false;
            }

            let differ = WordDiff::new(options);
            let spans = differ.diff(&original_text, &enhanced_text);
            let stats = DiffStats::from_spans(&spans);

            let use_colors = config.output.color && save.is_none();
            let show_legend = config.output.legend && !no_legend;
            let renderers = output::RendererSet::with_options(use_colors, show_legend, true, true);
            let rendered = renderers.render(&spans, &output_format)?;

            match &save {
                Some(path) => {
                    output::save_output_to_file(&rendered, path)?;
                    println!("💾 Diff saved to: {}", path.display());
                }
                None => {
                    print!("{}", rendered);
                    if output_format == OutputFormat::Console {
                        println!(
                            "\n📊 {} added, {} removed, {} unchanged ({:.0}% similar)",
                            stats.inserted,
                            stats.removed,
                            stats.unchanged,
                            stats.similarity() * 100.0
                        );
                    }
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Config file: {}\n", config_path.display());
                let rendered = toml::to_string_pretty(&config).map_err(|e| {
                    CvEnhancerError::Configuration(format!("Failed to serialize config: {}", e))
                })?;
                print!("{}", rendered);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", config_path.display());
            }
        },
    }

    Ok(())
}

type LoadedCv = Option<(Cv, FieldRef, PathBuf)>;

/// Resolve the text to enhance from `--text`, `--input` or `--cv`.
/// The loaded CV document is returned alongside so `--apply` can write back.
fn resolve_content(
    text: Option<String>,
    input: Option<PathBuf>,
    cv: &Option<PathBuf>,
    field: &str,
    index: usize,
) -> Result<(String, LoadedCv)> {
    if let Some(text) = text {
        return Ok((text, None));
    }

    if let Some(path) = input {
        println!("📄 Reading text from: {}", path.display());
        let content = std::fs::read_to_string(&path)?;
        return Ok((content.trim_end().to_string(), None));
    }

    if let Some(cv_path) = cv {
        println!("📋 Loading CV document: {}", cv_path.display());
        let cv_doc = cv::store::load_cv(cv_path)?;
        let field_ref = cli::parse_field_ref(field, index).map_err(CvEnhancerError::InvalidInput)?;
        let content = field_ref.get(&cv_doc)?.to_string();
        return Ok((content, Some((cv_doc, field_ref, cv_path.clone()))));
    }

    Err(CvEnhancerError::InvalidInput(
        "No text to enhance. Provide --text, --input or --cv".to_string(),
    ))
}

/// Read a diff operand either literally or from a file.
fn read_input_text(value: &str, literal: bool) -> Result<String> {
    if literal {
        return Ok(value.to_string());
    }

    let path = Path::new(value);
    if path.exists() {
        Ok(std::fs::read_to_string(path)?)
    } else {
        Err(CvEnhancerError::InvalidInput(format!(
            "No such file: {}. Use --literal to diff the arguments as text",
            value
        )))
    }
}

fn api_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
