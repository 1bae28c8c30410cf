//! Batch operations behind the subcommands
//!
//! Each name is processed in turn; a failure is logged and the batch moves
//! on. The caller gets one aggregated error at the end.

use anyhow::{Result, bail};
use cfdns_core::model::Record;
use cfdns_core::{DnsEngine, UpdateOutcome};
use std::io::Write;
use tracing::{error, info};

/// Reconcile every record, printing each resulting record
pub async fn update_records(
    engine: &DnsEngine,
    records: &[Record],
    out: &mut impl Write,
) -> Result<()> {
    let mut failed = Vec::new();

    for record in records {
        match engine.update_record(record).await {
            Ok(outcome) => {
                match &outcome {
                    UpdateOutcome::Unchanged { record } => {
                        info!("[{} {}] already holds {}", record.record_type, record.name, record.content)
                    }
                    UpdateOutcome::Updated {
                        previous_content,
                        record,
                    } => info!(
                        "[{} {}] updated {} -> {}",
                        record.record_type, record.name, previous_content, record.content
                    ),
                    UpdateOutcome::Created { record } => {
                        info!("[{} {}] created with {}", record.record_type, record.name, record.content)
                    }
                }
                writeln!(out, "{}", outcome.record())?;
            }
            Err(e) => {
                error!("Failed to update '{}': {}", record.name, e);
                failed.push(record.name.as_str());
            }
        }
    }

    finish("update", records.len(), &failed)
}

/// Delete every record, printing each deleted record
pub async fn delete_records(
    engine: &DnsEngine,
    records: &[Record],
    out: &mut impl Write,
) -> Result<()> {
    let mut failed = Vec::new();

    for record in records {
        match engine.delete_record(record).await {
            Ok(deleted) => {
                info!("'{}' deleted", deleted.name);
                writeln!(out, "{}", deleted)?;
            }
            Err(e) => {
                error!("Failed to delete '{}': {}", record.name, e);
                failed.push(record.name.as_str());
            }
        }
    }

    finish("delete", records.len(), &failed)
}

/// Print every record of a zone, one per line
pub async fn list_records(engine: &DnsEngine, zone_name: &str, out: &mut impl Write) -> Result<()> {
    info!("Listing records found in zone '{}'", zone_name);
    for record in engine.list_records(zone_name).await? {
        writeln!(out, "{}", record)?;
    }
    Ok(())
}

fn finish(action: &str, total: usize, failed: &[&str]) -> Result<()> {
    if failed.is_empty() {
        return Ok(());
    }
    bail!(
        "{} of {} record(s) failed to {}: {}",
        failed.len(),
        total,
        action,
        failed.join(", ")
    )
}
