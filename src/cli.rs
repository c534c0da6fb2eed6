//! Minimal CLI: type documents → (json | outline)
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use crate::api::ApiDefinition;
use crate::input::{TypeUniverse, load_documents, resolve_file_path_patterns};
use crate::outline::render_outline;
use crate::settings::{TranslationConfig, TranslationSettings};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// translate reflected class metadata into a serialization-oriented API model
#[derive(Parser, Debug)]
#[command(name = "typebridge")]
pub struct CommandLineInterface {
    /// log translation decisions (debug level)
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// translate and print the API model as JSON
    Json(JsonOut),
    /// translate and print a readable outline of the API model
    Outline(OutlineOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// JSON translation settings file (blackBoxClasses, ignoreAnnotation)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// extra black box class pattern (regex on the qualified name); repeatable
    #[arg(long = "black-box", value_name = "REGEX")]
    black_box: Vec<String>,

    /// One or more type documents. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct JsonOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct OutlineOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// disable terminal colors
    #[arg(long)]
    no_color: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn translation_settings(&self) -> Result<TranslationSettings> {
        let mut config = match self.settings.as_ref() {
            None => TranslationConfig::default(),
            Some(path) => {
                let source = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read settings file {}", path.display()))?;
                crate::path_de::from_str_with_path::<TranslationConfig>(&source)
                    .with_context(|| format!("failed to parse settings file {}", path.display()))?
            }
        };
        config.black_box_classes.extend(self.black_box.iter().cloned());
        Ok(TranslationSettings::from_config(&config)?)
    }

    fn translate(&self) -> Result<ApiDefinition> {
        // settings first: bad configuration fails before any input is read
        let settings = self.translation_settings()?;
        let source_paths = resolve_file_path_patterns(&self.input)
            .context("failed to resolve input file paths")?;
        let universe = TypeUniverse::merge(load_documents(&source_paths)?);
        tracing::info!(
            documents = universe.documents.len(),
            classes = universe.classes.len(),
            roots = universe.root_count(),
            "loaded type universe"
        );
        universe.translate(&settings)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }
    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Json(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let api = target.input_settings.translate()?;
                let json_src = serde_json::to_string_pretty(&api)?;
                write_output(target.out.as_deref(), &json_src)
            }
            Command::Outline(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(())
                }
                let api = target.input_settings.translate()?;
                let colorize = !target.no_color && target.out.is_none();
                let outline = render_outline(&api, colorize);
                write_output(target.out.as_deref(), outline.trim_end())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn write_output(out: Option<&Path>, contents: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, contents).with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            println!("{contents}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        CommandLineInterface::command().debug_assert();
    }

    #[test]
    fn parses_repeated_black_box_flags() {
        let cli = CommandLineInterface::try_parse_from([
            "typebridge", "outline", "-i", "a.json", "b/*.json", "--black-box", "x\\..*", "--black-box", "y\\.Z", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Command::Outline(target) = &cli.cmd else {
            panic!("expected outline command");
        };
        assert_eq!(target.input_settings.input, ["a.json", "b/*.json"]);
        assert_eq!(target.input_settings.black_box, ["x\\..*", "y\\.Z"]);
    }

    #[test]
    fn bad_black_box_flag_fails_before_reading_input() {
        let cli = CommandLineInterface::try_parse_from(["typebridge", "json", "-i", "missing.json", "--black-box", "("])
            .unwrap();
        let Command::Json(target) = &cli.cmd else {
            panic!("expected json command");
        };
        let err = format!("{:#}", target.input_settings.translate().unwrap_err());
        assert!(err.contains("invalid black box class pattern"), "{err}");
    }
}
