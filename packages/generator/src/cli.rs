//! Command-line interface for the contract generator.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{AnchorPolicy, GeneratorConfig, DEFAULT_OUTPUT_PATH};
use crate::data::load_record;
use crate::error::{GeneratorError, Result};
use crate::generator::ContractGenerator;
use crate::numbers::{to_currency_string, to_words};
use crate::types::ValidationReport;

/// Contrato Generator - Fill the service contract template and render it as PDF.
#[derive(Parser)]
#[command(name = "contrato-generator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a contract PDF from a JSON or YAML record.
    Generate {
        /// Contract data file (.json, .yaml or .yml)
        #[arg(short, long)]
        data: PathBuf,

        /// Template file (default: bundled template)
        #[arg(short, long)]
        template: Option<PathBuf>,

        /// Output PDF path
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,

        /// Fail when a section anchor is missing from the template
        #[arg(long)]
        strict_anchors: bool,
    },

    /// Validate a record and print the report as JSON.
    Validate {
        /// Contract data file (.json, .yaml or .yml)
        #[arg(short, long)]
        data: PathBuf,
    },

    /// Print the substituted contract text without rendering.
    Preview {
        /// Contract data file (.json, .yaml or .yml)
        #[arg(short, long)]
        data: PathBuf,

        /// Template file (default: bundled template)
        #[arg(short, long)]
        template: Option<PathBuf>,
    },

    /// Print amounts in figures and in words.
    Words {
        /// Amounts in whole pesos
        #[arg(required = true, allow_negative_numbers = true)]
        amounts: Vec<i64>,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            data,
            template,
            output,
            strict_anchors,
        } => generate_command(&data, template.as_deref(), &output, strict_anchors),
        Commands::Validate { data } => validate_command(&data),
        Commands::Preview { data, template } => preview_command(&data, template.as_deref()),
        Commands::Words { amounts } => words_command(&amounts),
    }
}

fn build_generator(template: Option<&Path>, policy: AnchorPolicy) -> Result<ContractGenerator> {
    let generator = match template {
        Some(path) => ContractGenerator::new(path)?,
        None => ContractGenerator::builtin(),
    };
    Ok(generator.with_config(GeneratorConfig::default().with_anchor_policy(policy)))
}

/// Execute the generate command.
fn generate_command(
    data: &Path,
    template: Option<&Path>,
    output: &Path,
    strict_anchors: bool,
) -> Result<()> {
    let policy = if strict_anchors {
        AnchorPolicy::FailLoud
    } else {
        AnchorPolicy::FailSoft
    };

    let record = load_record(data).map_err(GeneratorError::into_generation_failure)?;
    let generator =
        build_generator(template, policy).map_err(GeneratorError::into_generation_failure)?;

    println!(
        "{} contract for {}",
        style("Generating").bold(),
        style(&record.contratista_nombre).cyan()
    );
    println!();

    // Create progress spinner
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Filling template and rendering PDF...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let generated = match generator.generate_with_report(&record, output) {
        Ok(generated) => generated,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    let substitution = &generated.substitution;

    pb.finish_and_clear();

    println!("  Contractor: {}", style(&record.contratista_nombre).green());
    println!("  Total: {}", to_currency_string(record.valor_total)?);
    println!("  Payments: {}", record.pagos.len());
    if !substitution.is_clean() {
        println!(
            "  Warnings: {}",
            style(substitution.warnings.len()).yellow().bold()
        );
        for warning in &substitution.warnings {
            println!("    {}", style(warning).yellow());
        }
    }

    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        generated.path.display()
    );

    Ok(())
}

/// Execute the validate command.
fn validate_command(data: &Path) -> Result<()> {
    let report = match load_record(data) {
        Ok(record) => ValidationReport::from_result(record.validate()),
        Err(e) => ValidationReport::invalid(vec![e.to_string()]),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.valid {
        Ok(())
    } else {
        Err(GeneratorError::Validation {
            errors: report.errors,
        })
    }
}

/// Execute the preview command.
fn preview_command(data: &Path, template: Option<&Path>) -> Result<()> {
    let record = load_record(data)?;
    let generator = build_generator(template, AnchorPolicy::FailSoft)?;
    let substitution = generator.substitute(&record)?;

    println!("{}", substitution.text);

    for warning in &substitution.warnings {
        eprintln!("{} {}", style("warning:").yellow().bold(), warning);
    }

    Ok(())
}

/// Execute the words command.
fn words_command(amounts: &[i64]) -> Result<()> {
    for &amount in amounts {
        println!(
            "{}  {}",
            style(to_currency_string(amount)?).cyan(),
            to_words(amount)?
        );
    }
    Ok(())
}
