mod cli;

use std::io::Read;

use clap::Parser;
use cli::{CaseCommands, Cli, Commands, OutputFormat};
use colored::*;
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use victim_comp_intake::{
    case::IntakeService,
    config::{Config, DEFAULT_LOG_FILTER},
    eligibility::{explain, EligibilityAnswers},
    error,
    merge::{deep_merge, reconcile},
    storage::Database,
    utils,
};

fn main() {
    let cli = Cli::parse();

    let config = Config::load(&cli.config);
    let filter = config
        .as_ref()
        .map(|cfg| cfg.logging.filter.clone())
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&filter);

    let config = match config {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Init { write_config } => {
            info!("Initializing...");
            initialize(&config, write_config.as_deref())
        }

        Commands::Evaluate { answers, case, format, verbose } => {
            info!("Evaluating eligibility answers from {}", answers);
            evaluate_answers(&config, &answers, case.as_deref(), format, verbose)
        }

        Commands::Merge { base, patch, stored } => merge_documents(&base, &patch, stored.as_deref()),

        Commands::Case { command } => run_case_command(&config, command),

        Commands::Stats { format } => {
            info!("Generating statistics...");
            show_stats(&config, format)
        }
    };

    if let Err(e) = result {
        error!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}

fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_service(config: &Config) -> error::Result<IntakeService> {
    let db = Database::new(&config.database.path)?;
    let defaults = config.case_defaults()?;
    Ok(IntakeService::new(db, defaults))
}

/// Read a JSON document from a file, or stdin for "-"
fn read_json(path: &str) -> error::Result<Value> {
    let raw = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };

    Ok(serde_json::from_str(&raw)?)
}

fn initialize(config: &Config, write_config: Option<&str>) -> error::Result<()> {
    println!("{}", "Initializing victim compensation intake...".green());
    let _db = Database::new(&config.database.path)?;
    println!("{}", "✓ Database initialized".green());
    let defaults = config.case_defaults()?;
    println!("{}", "✓ Configuration loaded".green());

    println!("\n{}", "Configuration:".cyan());
    println!("  Database:       {}", config.database.path);
    println!(
        "  Case defaults:  {}",
        config.intake.defaults_path.as_deref().unwrap_or("built-in")
    );
    println!("  Default fields: {}", defaults.as_object().map_or(0, |fields| fields.len()));
    println!("  History limit:  {}", config.intake.history_limit);

    if let Some(path) = write_config {
        std::fs::write(path, config.to_toml()?)?;
        println!("{}", format!("✓ Configuration written to {}", path).green());
    }

    println!("\n{}", "Ready to use! Try running:".cyan());
    println!("  {} to screen an applicant", "comp-intake evaluate answers.json".yellow());
    println!("  {} to open a case", "comp-intake case new <id>".yellow());
    println!("  {} to view statistics", "comp-intake stats".yellow());
    Ok(())
}

fn evaluate_answers(
    config: &Config,
    path: &str,
    case_id: Option<&str>,
    format: OutputFormat,
    verbose: bool,
) -> error::Result<()> {
    let raw = read_json(path)?;
    let answers = EligibilityAnswers::from_value(&raw);

    let service = open_service(config)?;
    let outcome = service.screen(case_id, &answers)?;
    let report = explain(&answers);

    if format == OutputFormat::Json {
        if verbose {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        return Ok(());
    }

    println!("{}", "=== Eligibility Screening ===".cyan().bold());
    println!("Answered:   {}/7", answers.answered_count());
    println!("Result:     {}", utils::format_result(outcome.result));
    println!("Readiness:  {}", utils::format_readiness(outcome.readiness));
    if let Some(id) = case_id {
        println!("Case:       {}", id);
    }

    if verbose && !report.findings.is_empty() {
        println!("\n{}", "Rules fired:".yellow());
        utils::print_table_border(90);
        utils::print_table_row(&["Rule", "Reason"], &[28, 60]);
        utils::print_table_border(90);
        for finding in &report.findings {
            utils::print_table_row(&[finding.rule, finding.reason], &[28, 60]);
        }
        utils::print_table_border(90);
    }

    Ok(())
}

fn merge_documents(base: &str, patch: &str, stored: Option<&str>) -> error::Result<()> {
    let base = read_json(base)?;
    let patch = read_json(patch)?;

    let merged = match stored {
        Some(path) => reconcile(&base, &read_json(path)?, &patch),
        None => deep_merge(&base, &patch),
    };

    println!("{}", serde_json::to_string_pretty(&merged)?);
    Ok(())
}

fn run_case_command(config: &Config, command: CaseCommands) -> error::Result<()> {
    let service = open_service(config)?;

    match command {
        CaseCommands::New { id } => {
            let case = service.create_case(&id)?;
            println!("{}", format!("✓ Created case {}", case.id).green());
        }

        CaseCommands::Show { id } => {
            let case = service.get_case(&id)?;
            println!("{}", serde_json::to_string_pretty(&case)?);
        }

        CaseCommands::Patch { id, patch } => {
            let patch = read_json(&patch)?;
            let case = service.patch_case(&id, &patch)?;
            println!("{}", serde_json::to_string_pretty(&case.data)?);
        }

        CaseCommands::List { format } => {
            let cases = service.list_cases()?;

            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&cases)?);
                return Ok(());
            }

            if cases.is_empty() {
                println!("No cases found");
                return Ok(());
            }

            utils::print_table_border(80);
            utils::print_table_row(&["Case", "Status", "Updated"], &[24, 16, 24]);
            utils::print_table_border(80);
            for case in &cases {
                utils::print_table_row(
                    &[
                        &utils::format_case_id(&case.id),
                        case.status(),
                        &utils::format_timestamp(&case.updated_at),
                    ],
                    &[24, 16, 24],
                );
            }
            utils::print_table_border(80);
        }

        CaseCommands::Delete { id, yes } => {
            service.get_case(&id)?;

            if !yes && !utils::confirm_action(&format!("Delete case {} and its screenings?", id)) {
                println!("Cancelled");
                return Ok(());
            }

            service.delete_case(&id)?;
            println!("{}", format!("✓ Deleted case {}", id).green());
        }
    }

    Ok(())
}

fn show_stats(config: &Config, format: OutputFormat) -> error::Result<()> {
    let service = open_service(config)?;
    let stats = service.stats()?;

    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "=== Intake Statistics ===".cyan().bold());
    println!("\nCases:        {}", stats.total_cases);
    println!("Screenings:   {}", stats.total_screenings);
    println!("  Eligible:     {}", stats.eligible.to_string().green());
    println!("    ready:        {}", stats.eligible_ready);
    println!("    missing_info: {}", stats.eligible_missing_info);
    println!("    not_ready:    {}", stats.eligible_not_ready);
    println!("  Needs review: {}", stats.needs_review.to_string().yellow());
    println!("  Not eligible: {}", stats.not_eligible.to_string().red());

    let history = service.screening_history(Some(config.intake.history_limit))?;
    if !history.is_empty() {
        println!("\n{}", "Recent Screenings:".yellow());
        utils::print_table_border(90);
        utils::print_table_row(&["Timestamp", "Case", "Result", "Readiness"], &[24, 24, 14, 14]);
        utils::print_table_border(90);

        for screening in history {
            utils::print_table_row(
                &[
                    &utils::format_timestamp(&screening.timestamp),
                    &screening
                        .case_id
                        .as_deref()
                        .map(utils::format_case_id)
                        .unwrap_or_else(|| "-".to_string()),
                    screening.outcome.result.as_str(),
                    screening.outcome.readiness.as_str(),
                ],
                &[24, 24, 14, 14],
            );
        }
        utils::print_table_border(90);
    }

    Ok(())
}
