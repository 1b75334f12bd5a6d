//! # Greenhouse Estimate CLI
//!
//! Runs a full project estimate against a catalog export and prints a
//! human summary followed by the estimate as JSON.
//!
//! ```text
//! gh_cli <project.json> <catalog.json> [settings.toml]
//! ```
//!
//! Logs go to stderr; set `RUST_LOG` to change the level (default `info`).

use std::fs;
use std::path::Path;
use std::process;
use std::sync::Arc;

use gh_core::calculations::PanelLengthOutcome;
use gh_core::catalog::{InMemoryCatalog, SharedCatalog};
use gh_core::config::EngineSettings;
use gh_core::errors::{CalcError, CalcResult};
use gh_core::estimate::{self, ProjectEstimate};
use gh_core::project::Project;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "usage: gh_cli <project.json> <catalog.json> [settings.toml]";

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_project(path: &Path) -> CalcResult<Project> {
    let text = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    Project::from_json_str(&text)
}

fn print_summary(estimate: &ProjectEstimate) {
    println!("═══════════════════════════════════════");
    println!("  ESTIMATE: {}", estimate.project_name);
    println!("═══════════════════════════════════════");
    println!();

    println!("Roof area: {:.2} sq ft", estimate.roof_area.total_sq_ft);
    for bay in &estimate.roof_area.bays {
        println!(
            "  {}  x{:<3} {:>8.2} sq ft  ({})",
            bay.bay, bay.count, bay.area_sq_ft, bay.source
        );
    }
    println!();

    println!("Roof panels (area-based): {:.2}", estimate.area_panels.total_panels);
    println!(
        "Roof panels (by section, {}): {:.2}",
        estimate.section_panels.material, estimate.section_panels.total_quantity
    );
    for section in &estimate.section_panels.sections {
        let quantity = match (&section.panel_length, section.quantity) {
            (PanelLengthOutcome::Found(_), Some(q)) => format!("{:.2}", q),
            _ => "-".to_string(),
        };
        println!("  {:<24} {:>12}  {}", section.label, section.panel_length, quantity);
    }
    println!();

    println!("Base components:");
    for component in &estimate.base_components.components {
        println!(
            "  {:<18} {:<14} {:>10.2} {}",
            component.location, component.description, component.quantity, component.unit
        );
    }
    let totals = &estimate.base_components.totals;
    println!(
        "  Totals: stringer {:.2} Linear Ft, angles {}, anchor bolts {}",
        totals.base_stringer_linear_ft, totals.base_angle_each, totals.anchor_bolt_each
    );
    println!();

    if !estimate.insect_screens.is_empty() {
        println!("Insect screens:");
        for vent in &estimate.insect_screens {
            match &vent.quote.pricing {
                Some(p) => println!(
                    "  {:<24} {:>8.2} sq ft  price {}  cut {:.1} ft  slitting ${:.2}",
                    vent.vent_type,
                    p.fabric_area_sq_ft,
                    p.curtain_price
                        .map_or("n/a".to_string(), |price| format!("${:.2}", price)),
                    p.total_linear_ft_to_cut,
                    p.slitting_cost
                ),
                None => println!("  {:<24} not priced", vent.vent_type),
            }
        }
        println!();
    }

    if !estimate.glazing_summary.sections.is_empty() {
        println!("Glazing requirements:");
        for section in &estimate.glazing_summary.sections {
            println!(
                "  {:<20} {:<6} {:>10.2} sq ft",
                section.label, section.material, section.area_sq_ft
            );
        }
        println!();
    }

    if !estimate.diagnostics.is_empty() {
        println!("Diagnostics:");
        for d in &estimate.diagnostics {
            println!("  [{:?}] {}: {}", d.kind, d.scope, d.message);
        }
        println!();
    }
}

async fn run(args: &[String]) -> CalcResult<ProjectEstimate> {
    let project = load_project(Path::new(&args[0]))?;
    let catalog: SharedCatalog = Arc::new(InMemoryCatalog::load(Path::new(&args[1]))?);
    let settings = match args.get(2) {
        Some(path) => EngineSettings::load(Path::new(path))?,
        None => EngineSettings::default(),
    };

    tracing::info!(project = %project.meta.name, items = project.item_count(), "running estimate");
    estimate::run(&project, &catalog, &settings).await
}

#[tokio::main]
async fn main() {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!("{}", USAGE);
        process::exit(2);
    }

    let estimate = match run(&args).await {
        Ok(estimate) => estimate,
        Err(e) => {
            tracing::error!(code = e.error_code(), "{}", e);
            process::exit(1);
        }
    };

    print_summary(&estimate);

    match serde_json::to_string_pretty(&estimate) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing estimate: {}", e);
            process::exit(1);
        }
    }
}
