//! Kontrak Command Line Interface
//!
//! Browse contract templates, assemble drafts and export paginated layouts.
//!
//! # Usage
//!
//! ```bash
//! # List templates, optionally by category
//! kontrak_cli list --category business
//!
//! # Show clauses and placeholders of a template
//! kontrak_cli show service-agreement
//!
//! # Assemble with values
//! kontrak_cli assemble service-agreement --set PARTY1_NAME="PT Maju Jaya" --include confidentiality
//!
//! # Check which placeholders are still missing
//! kontrak_cli check lease-agreement --sample
//!
//! # Export the page layout
//! kontrak_cli export employment-contract --sample --dir exports
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kontrak::templates::{PlaceholderResolver, Template};
use kontrak::{
    generate_contract, Clipboard, DraftSession, GenerationRequest, HttpContractGenerator,
    KontrakConfig, LayoutFileExporter, StdoutClipboard, TemplateCatalog,
};

#[derive(Parser)]
#[command(name = "kontrak_cli")]
#[command(version = "0.1.0")]
#[command(about = "Draft contracts from clause templates")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: json, text, or pretty (default)
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,

    /// Config file (defaults to config/kontrak.yaml)
    #[arg(long, global = true, env = "KONTRAK_CONFIG")]
    config: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// List available templates
    List {
        /// Only templates in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Search templates by name, description or category
    Find {
        query: String,
    },

    /// Show a template's clauses and placeholders
    Show {
        template: String,
    },

    /// Assemble the document text
    Assemble {
        #[command(flatten)]
        draft: DraftArgs,

        /// Print through the clipboard collaborator (raw text, no decoration)
        #[arg(long)]
        copy: bool,
    },

    /// Report placeholders still missing a value
    Check {
        #[command(flatten)]
        draft: DraftArgs,
    },

    /// Show the page layout of the assembled document
    Paginate {
        #[command(flatten)]
        draft: DraftArgs,
    },

    /// Export the page layout to the export directory
    Export {
        #[command(flatten)]
        draft: DraftArgs,

        /// Overrides export_dir from the config
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Ask the generation service for a complete contract
    Generate {
        /// Contract type, e.g. service, lease, employment
        #[arg(long = "type")]
        contract_type: String,

        #[arg(long)]
        details: String,

        #[arg(long)]
        party1: String,

        #[arg(long)]
        party2: String,

        #[arg(long)]
        additional_clauses: Option<String>,

        #[arg(long)]
        requirements: Option<String>,
    },
}

/// Draft options shared by the document commands
#[derive(Args)]
struct DraftArgs {
    /// Template id
    template: String,

    /// Include an optional clause (repeatable)
    #[arg(long = "include", value_name = "CLAUSE")]
    include: Vec<String>,

    /// Exclude an optional clause (repeatable)
    #[arg(long = "exclude", value_name = "CLAUSE")]
    exclude: Vec<String>,

    /// Placeholder value (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    set: Vec<(String, String)>,

    /// Document title (defaults to the template name)
    #[arg(long)]
    title: Option<String>,

    /// Start from the template's sample values
    #[arg(long)]
    sample: bool,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing placeholder name in '{}'", raw));
    }
    Ok((name.to_string(), value.to_string()))
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.format == OutputFormat::Json {
                println!("{}", serde_json::json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => KontrakConfig::load_from(path)?,
        None => KontrakConfig::load()?,
    };
    let catalog = Arc::new(config.catalog()?);

    match &cli.command {
        Commands::List { category } => cmd_list(&catalog, category.as_deref(), cli.format),
        Commands::Find { query } => cmd_find(&catalog, query, cli.format),
        Commands::Show { template } => cmd_show(&catalog, template, cli.format),
        Commands::Assemble { draft, copy } => {
            let session = open_draft(catalog, &config, draft)?;
            cmd_assemble(&session, *copy, cli.format)
        }
        Commands::Check { draft } => {
            let session = open_draft(catalog, &config, draft)?;
            cmd_check(&session, cli.format)
        }
        Commands::Paginate { draft } => {
            let session = open_draft(catalog, &config, draft)?;
            cmd_paginate(&session, cli.format)
        }
        Commands::Export { draft, dir } => {
            let session = open_draft(catalog, &config, draft)?;
            let dir = dir.clone().unwrap_or_else(|| config.export_dir.clone());
            cmd_export(&session, dir, cli.format)
        }
        Commands::Generate {
            contract_type,
            details,
            party1,
            party2,
            additional_clauses,
            requirements,
        } => {
            let request = GenerationRequest {
                contract_type: contract_type.clone(),
                details: details.clone(),
                party1: party1.clone(),
                party2: party2.clone(),
                additional_clauses: additional_clauses.clone(),
                specific_requirements: requirements.clone(),
            };
            cmd_generate(&config, &request, cli.format)
        }
    }
}

/// Build a session for the requested template with the CLI's edits applied
fn open_draft(
    catalog: Arc<TemplateCatalog>,
    config: &KontrakConfig,
    args: &DraftArgs,
) -> Result<DraftSession> {
    let mut session = DraftSession::new(catalog).with_layout(config.layout.clone());
    session.select_template(&args.template)?;

    let template = session.template()?;
    for clause_id in args.include.iter().chain(&args.exclude) {
        if template.clause(clause_id).is_none() {
            bail!(
                "Template '{}' has no clause '{}'",
                args.template,
                clause_id
            );
        }
    }

    if args.sample {
        session.fill_samples()?;
    }
    for clause_id in &args.include {
        session.set_clause(clause_id, true)?;
    }
    for clause_id in &args.exclude {
        session.set_clause(clause_id, false)?;
    }
    for (name, value) in &args.set {
        session.set_value(name.as_str(), value.as_str())?;
    }
    if let Some(title) = &args.title {
        session.set_title(Some(title.clone()))?;
    }
    Ok(session)
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("JSON serialization failed")?
    );
    Ok(())
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

fn cmd_list(catalog: &TemplateCatalog, category: Option<&str>, format: OutputFormat) -> Result<()> {
    let templates: Vec<&Template> = match category {
        Some(category) => catalog.by_category(category),
        None => catalog.list().iter().collect(),
    };
    print_templates(&templates, format)
}

fn cmd_find(catalog: &TemplateCatalog, query: &str, format: OutputFormat) -> Result<()> {
    let templates = catalog.find(query);
    if templates.is_empty() && format != OutputFormat::Json {
        println!("No templates match '{}'", query);
        return Ok(());
    }
    print_templates(&templates, format)
}

fn print_templates(templates: &[&Template], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output: Vec<_> = templates
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "id": t.id,
                        "name": t.name,
                        "category": t.category,
                        "description": t.description,
                        "clause_count": t.clauses.len(),
                    })
                })
                .collect();
            print_json(&output)
        }
        OutputFormat::Text => {
            for t in templates {
                println!("{}\t{}\t{}", t.id, t.category, t.name);
            }
            Ok(())
        }
        OutputFormat::Pretty => {
            for t in templates {
                println!(
                    "{} {} {}",
                    t.id.cyan().bold(),
                    format!("[{}]", t.category).dimmed(),
                    t.name
                );
                if !t.description.is_empty() {
                    println!("    {}", t.description);
                }
            }
            Ok(())
        }
    }
}

fn cmd_show(catalog: &TemplateCatalog, template_id: &str, format: OutputFormat) -> Result<()> {
    let template = catalog
        .get(template_id)
        .ok_or_else(|| anyhow!("Unknown template: {}", template_id))?;
    let groups = PlaceholderResolver::group_by_category(template.placeholder_names().as_slice());

    if format == OutputFormat::Json {
        return print_json(&serde_json::json!({
            "template": template,
            "groups": groups,
        }));
    }

    println!("{} ({})", template.name.bold(), template.id);
    if !template.description.is_empty() {
        println!("{}", template.description);
    }
    println!();
    println!("{}", "Clauses".underline());
    for clause in &template.clauses {
        let marker = if clause.required {
            "required".yellow()
        } else {
            "optional".normal()
        };
        println!("  {:<24} {} [{}]", clause.id, clause.title, marker);
    }
    for group in &groups {
        println!();
        println!("{}", group.label.underline());
        for name in &group.placeholders {
            let example = template
                .placeholder(name)
                .and_then(|p| p.example.as_deref())
                .map(|e| format!(" (e.g., {})", e))
                .unwrap_or_default();
            println!(
                "  {:<24} {}{}",
                name,
                PlaceholderResolver::label(template, name),
                example.dimmed()
            );
        }
    }
    Ok(())
}

fn cmd_assemble(session: &DraftSession, copy: bool, format: OutputFormat) -> Result<()> {
    if copy {
        session.copy_to(&StdoutClipboard)?;
        return Ok(());
    }

    let document = session.assemble()?;
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "draft": session.draft(),
            "document": document,
        })),
        OutputFormat::Text | OutputFormat::Pretty => {
            StdoutClipboard.copy(&document)?;
            Ok(())
        }
    }
}

fn cmd_check(session: &DraftSession, format: OutputFormat) -> Result<()> {
    let report = session.validate()?;
    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            for missing in &report.missing {
                println!("{}", missing.name);
            }
            Ok(())
        }
        OutputFormat::Pretty => {
            if report.is_complete() {
                println!(
                    "{} All {} placeholder(s) filled",
                    "OK".green().bold(),
                    report.filled.len()
                );
            } else {
                println!(
                    "{} {} placeholder(s) missing",
                    "INCOMPLETE".yellow().bold(),
                    report.missing.len()
                );
                print!("{}", report.format_prompt());
            }
            Ok(())
        }
    }
}

fn cmd_paginate(session: &DraftSession, format: OutputFormat) -> Result<()> {
    let pagination = session.paginate(session.layout())?;
    match format {
        OutputFormat::Json => print_json(&pagination),
        OutputFormat::Text | OutputFormat::Pretty => {
            for (page, text) in pagination.page_texts().iter().enumerate() {
                if format == OutputFormat::Pretty {
                    println!(
                        "{}",
                        format!("--- page {} of {} ---", page + 1, pagination.page_count).cyan()
                    );
                }
                println!("{}", text);
            }
            Ok(())
        }
    }
}

fn cmd_export(session: &DraftSession, dir: PathBuf, format: OutputFormat) -> Result<()> {
    let exporter = LayoutFileExporter::new(dir);
    let outcome = session.export(&exporter, chrono::Utc::now())?;
    match format {
        OutputFormat::Json => print_json(&outcome),
        OutputFormat::Text => {
            println!("{}", outcome.location.display());
            Ok(())
        }
        OutputFormat::Pretty => {
            println!(
                "{} {} ({} page(s)) -> {}",
                "OK".green().bold(),
                outcome.filename,
                outcome.page_count,
                outcome.location.display()
            );
            Ok(())
        }
    }
}

fn cmd_generate(
    config: &KontrakConfig,
    request: &GenerationRequest,
    format: OutputFormat,
) -> Result<()> {
    let endpoint = config
        .generation_endpoint
        .clone()
        .ok_or_else(|| anyhow!("No generation_endpoint configured"))?;
    let generator = HttpContractGenerator::new(endpoint);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let content = runtime.block_on(generate_contract(&generator, request))?;

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({ "content": content })),
        OutputFormat::Text | OutputFormat::Pretty => {
            println!("{}", content);
            Ok(())
        }
    }
}
