use clap::{Parser, Subcommand};
use rc_core::units::degc;
use rc_cycles::{CalculationError, Calculator, condensing_temperatures};
use rc_fluids::CoolPropProvider;
use rc_project::{ProjectError, ProjectFile, resolve_case};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod report;

use report::{Report, SweepRow};

#[derive(Parser)]
#[command(name = "rc-cli")]
#[command(about = "refcalc CLI - refrigeration and heat-pump cycle calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate project file syntax and structure
    Validate {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
    },
    /// List cases in a project
    Cases {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
    },
    /// Calculate one case
    Run {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
        /// Case ID to calculate
        case_id: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Calculate one case over a range of condensing temperatures
    Sweep {
        /// Path to the project file (YAML or JSON)
        project_path: PathBuf,
        /// Case ID to calculate
        case_id: String,
        /// First condensing temperature [°C]
        #[arg(long)]
        from: f64,
        /// Last condensing temperature [°C]
        #[arg(long)]
        to: f64,
        /// Number of points, both ends included
        #[arg(long, default_value_t = 11)]
        points: usize,
        /// Print the series as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error("Calculation failed: {0}")]
    Calculation(#[from] CalculationError),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { project_path } => cmd_validate(&project_path),
        Commands::Cases { project_path } => cmd_cases(&project_path),
        Commands::Run {
            project_path,
            case_id,
            json,
        } => cmd_run(&project_path, &case_id, json),
        Commands::Sweep {
            project_path,
            case_id,
            from,
            to,
            points,
            json,
        } => cmd_sweep(&project_path, &case_id, from, to, points, json),
    }
}

fn load_project(path: &Path) -> CliResult<ProjectFile> {
    Ok(rc_project::load(path)?)
}

fn cmd_validate(project_path: &Path) -> CliResult<()> {
    println!("Validating project: {}", project_path.display());
    let project = load_project(project_path)?;
    println!("✓ Project is valid ({} cases)", project.cases.len());
    Ok(())
}

fn cmd_cases(project_path: &Path) -> CliResult<()> {
    let project = load_project(project_path)?;
    if project.cases.is_empty() {
        println!("No cases found in project");
        return Ok(());
    }
    println!("Cases in {}:", project.name);
    for case in &project.cases {
        let mode = case.cycle_mode().map_err(ProjectError::from)?;
        match &case.description {
            Some(description) => {
                println!("  {} - {} [{}] {}", case.id, mode, case.fluid, description)
            }
            None => println!("  {} - {} [{}]", case.id, mode, case.fluid),
        }
    }
    Ok(())
}

fn cmd_run(project_path: &Path, case_id: &str, json: bool) -> CliResult<()> {
    let project = load_project(project_path)?;
    let (mode, config) = resolve_case(&project, case_id)?;
    info!(case = case_id, %mode, fluid = %config.fluid, "calculating");

    let calculator = Calculator::new(CoolPropProvider::new());
    let result = calculator.calculate(mode, &config)?;
    let report = Report::new(case_id, &result);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print_table();
    }
    Ok(())
}

fn cmd_sweep(
    project_path: &Path,
    case_id: &str,
    from: f64,
    to: f64,
    points: usize,
    json: bool,
) -> CliResult<()> {
    let project = load_project(project_path)?;
    let (mode, config) = resolve_case(&project, case_id)?;

    let temperatures = condensing_temperatures(degc(from), degc(to), points);
    info!(case = case_id, %mode, points = temperatures.len(), "sweeping");
    let calculator = Calculator::new(CoolPropProvider::new());
    let rows: Vec<SweepRow> = calculator
        .sweep_condensing(mode, &config, &temperatures)
        .iter()
        .map(SweepRow::from)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Sweep of case {case_id} ({mode})");
    println!(
        "  {:>8} {:>8} {:>12} {:>12} {:>10}",
        "t_c [°C]", "COP", "Q_0 [kW]", "P_ind [kW]", "t_dis [°C]"
    );
    for row in &rows {
        match (&row.error, row.cop, row.cooling_capacity_kw, row.indicated_power_kw) {
            (None, Some(cop), Some(q), Some(p)) => println!(
                "  {:>8.1} {:>8.3} {:>12.2} {:>12.2} {:>10.1}",
                row.condensing_temperature_c,
                cop,
                q,
                p,
                row.max_discharge_temperature_c.unwrap_or(f64::NAN)
            ),
            (error, ..) => println!(
                "  {:>8.1} failed: {}",
                row.condensing_temperature_c,
                error.as_deref().unwrap_or("unknown error")
            ),
        }
    }
    Ok(())
}
