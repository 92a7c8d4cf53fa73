use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde_json::json;
use studio_contract::{ContractConfig, MockStub, Response, StudioContract};
use studio_identity::StaticCreator;
use studio_ledger::{AuditReport, Catalog, InventoryAuditor};
use studio_store::{InMemoryStateStore, StateSnapshot};
use studio_types::{Material, Wand};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let contract = StudioContract::new(config);
    match cli.command {
        Command::Invoke(args) => cmd_invoke(&contract, &cli.state, cli.format, args),
        Command::Materials => cmd_materials(&cli.state, cli.format),
        Command::Wands => cmd_wands(&cli.state, cli.format),
        Command::Audit => cmd_audit(&cli.state, cli.format),
        Command::Operations => {
            for name in contract.registry().names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ContractConfig> {
    match path {
        Some(path) => Ok(ContractConfig::load(path)?),
        None => Ok(ContractConfig::default()),
    }
}

fn load_state(path: &Path) -> anyhow::Result<InMemoryStateStore> {
    let snapshot = StateSnapshot::load(path)
        .with_context(|| format!("reading state file {}", path.display()))?;
    Ok(snapshot.restore()?)
}

// ---------------------------------------------------------------------------
// invoke
// ---------------------------------------------------------------------------

fn cmd_invoke(
    contract: &StudioContract,
    state: &Path,
    format: OutputFormat,
    args: InvokeArgs,
) -> anyhow::Result<()> {
    let store = load_state(state)?;
    let stub = MockStub::new(store, StaticCreator::for_org(&args.msp));
    let response = stub.invoke(contract, &args.function, args.args.as_slice());

    if response.is_ok() {
        StateSnapshot::capture(stub.state())
            .save(state)
            .with_context(|| format!("writing state file {}", state.display()))?;
        tracing::debug!(path = %state.display(), "state saved");
    }
    print_response(&response, format);
    if !response.is_ok() {
        anyhow::bail!("{} failed", args.function);
    }
    Ok(())
}

fn print_response(response: &Response, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let payload = serde_json::from_slice::<serde_json::Value>(&response.payload)
                .unwrap_or_else(|_| json!(response.payload_str()));
            println!(
                "{}",
                json!({
                    "status": response.status,
                    "message": response.message,
                    "payload": payload,
                })
            );
        }
        OutputFormat::Text if response.is_ok() => {
            if response.payload.is_empty() {
                println!("{} OK", "✓".green().bold());
            } else {
                println!("{} {}", "✓".green().bold(), response.payload_str());
            }
        }
        OutputFormat::Text => {
            println!("{} {}", "✗".red().bold(), response.message.red());
        }
    }
}

// ---------------------------------------------------------------------------
// listings
// ---------------------------------------------------------------------------

fn cmd_materials(state: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let store = load_state(state)?;
    let materials = Catalog::new(&store).list_materials()?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&materials)?),
        OutputFormat::Text => print_materials(&materials),
    }
    Ok(())
}

fn print_materials(materials: &[Material]) {
    if materials.is_empty() {
        println!("No materials.");
        return;
    }
    for m in materials {
        let quantity = if m.quantity < 0 {
            m.quantity.to_string().red()
        } else {
            m.quantity.to_string().bold()
        };
        println!("{:<24} {:<24} {quantity}", m.name, m.origin.cyan());
    }
}

fn cmd_wands(state: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let store = load_state(state)?;
    let wands = Catalog::new(&store).list_wands()?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&wands)?),
        OutputFormat::Text => print_wands(&wands),
    }
    Ok(())
}

fn print_wands(wands: &[Wand]) {
    if wands.is_empty() {
        println!("No wands.");
        return;
    }
    for wand in wands {
        println!(
            "{}  {} available, {} produced",
            wand.name.yellow().bold(),
            wand.quantity,
            wand.production_history.len()
        );
        for (index, production) in wand.production_history.iter().enumerate() {
            let status = if production.available {
                "available".green()
            } else {
                "sold".dimmed()
            };
            let materials: Vec<String> = production
                .materials
                .iter()
                .map(|m| format!("{} {}/{}", m.quantity, m.name, m.origin))
                .collect();
            println!("  #{index} {status:<9} {}", materials.join(", "));
        }
    }
}

// ---------------------------------------------------------------------------
// audit
// ---------------------------------------------------------------------------

fn cmd_audit(state: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let store = load_state(state)?;
    let report = InventoryAuditor::new(Catalog::new(&store)).audit()?;
    match format {
        OutputFormat::Json => println!("{}", audit_json(&report)),
        OutputFormat::Text => print_audit(&report),
    }
    if !report.is_clean() {
        anyhow::bail!("{} violation(s) found", report.violations.len());
    }
    Ok(())
}

fn audit_json(report: &AuditReport) -> serde_json::Value {
    json!({
        "materials_checked": report.materials_checked,
        "wands_checked": report.wands_checked,
        "violations": report
            .violations
            .iter()
            .map(|v| json!({
                "subject": v.subject,
                "kind": format!("{:?}", v.kind),
                "description": v.description,
            }))
            .collect::<Vec<_>>(),
    })
}

fn print_audit(report: &AuditReport) {
    println!(
        "Checked {} materials, {} wands",
        report.materials_checked, report.wands_checked
    );
    if report.is_clean() {
        println!("{} No issues.", "✓".green().bold());
        return;
    }
    for v in &report.violations {
        println!(
            "  {} {} ({:?}): {}",
            "✗".red(),
            v.subject.bold(),
            v.kind,
            v.description
        );
    }
}
