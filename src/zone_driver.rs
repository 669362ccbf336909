use log::{error, info};

use crate::config::Config;
use crate::dmarc_cleanup::{CleanupReport, delete_dmarc_records};
use crate::dns::provider::DNSProvider;
use crate::dns::record::Zone;
use crate::error::Error;
use crate::reconciler::{Reconciler, RecordOutcome, ZoneReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneAction<'z> {
    Process(&'z Zone),
    Skip(&'z Zone),
}

/// Truncates to the configured limit first, then marks skip-listed zones. A
/// skipped zone inside the limited prefix still counts against the limit.
pub fn plan_zones<'z>(zones: &'z [Zone], config: &Config) -> Vec<ZoneAction<'z>> {
    let end = config
        .zone_limit()
        .map_or(zones.len(), |n| n.min(zones.len()));
    zones[..end]
        .iter()
        .map(|zone| {
            if config.is_skipped(&zone.name) {
                ZoneAction::Skip(zone)
            } else {
                ZoneAction::Process(zone)
            }
        })
        .collect()
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub zones_fetched: usize,
    pub zones_processed: usize,
    pub zones_skipped: usize,
    pub zones_failed: usize,
    pub records_created: usize,
    pub records_existing: usize,
    pub records_deleted: usize,
    pub records_failed: usize,
}

impl RunSummary {
    fn add_zone_report(&mut self, report: &ZoneReport) {
        self.zones_processed += 1;
        self.records_created += report.count(|o| *o == RecordOutcome::Created);
        self.records_existing += report.count(|o| *o == RecordOutcome::AlreadyExists);
        self.records_failed += report.count(|o| matches!(o, RecordOutcome::Failed(_)));
    }

    fn add_cleanup_report(&mut self, report: &CleanupReport) {
        self.zones_processed += 1;
        self.records_deleted += report.deleted;
        self.records_failed += report.failed;
    }
}

/// Logs the skip notice for skipped zones and hands back the ones to process.
fn zones_to_process<'z>(
    zones: &'z [Zone],
    config: &Config,
    summary: &mut RunSummary,
) -> Vec<&'z Zone> {
    summary.zones_fetched = zones.len();
    let mut to_process = Vec::new();
    for action in plan_zones(zones, config) {
        match action {
            ZoneAction::Skip(zone) => {
                info!("Skipping domain: {} (zone {})", zone.name, zone.id);
                summary.zones_skipped += 1;
            }
            ZoneAction::Process(zone) => to_process.push(zone),
        }
    }
    to_process
}

/// Reconciliation mode: ensure DMARC, SPF and DKIM on every candidate zone.
/// Only the zone listing is fatal; a zone whose records cannot be listed is
/// logged and skipped.
pub async fn run_reconcile<P: DNSProvider + ?Sized>(
    provider: &P,
    config: &Config,
) -> Result<RunSummary, Error> {
    let zones = provider.list_zones().await?;
    let reconciler = Reconciler::new(provider, config);
    let mut summary = RunSummary::default();

    for zone in zones_to_process(&zones, config, &mut summary) {
        info!("Processing domain: {} (zone {})", zone.name, zone.id);
        match reconciler.reconcile_zone(zone).await {
            Ok(report) => summary.add_zone_report(&report),
            Err(e) => {
                error!(
                    "Failed to manage mail records for domain {} (zone {}): {e}",
                    zone.name, zone.id
                );
                summary.zones_failed += 1;
            }
        }
    }

    info!(
        "Reconciliation finished on {}: {} zones processed, {} skipped, {} failed; {} records created, {} already present, {} failed",
        provider.name(),
        summary.zones_processed,
        summary.zones_skipped,
        summary.zones_failed,
        summary.records_created,
        summary.records_existing,
        summary.records_failed
    );
    Ok(summary)
}

/// Companion mode: delete DMARC records from every non-skipped zone. The
/// limit never applies here.
pub async fn run_delete_dmarc<P: DNSProvider + ?Sized>(
    provider: &P,
    config: &Config,
) -> Result<RunSummary, Error> {
    let config = config.clone().with_limit(None);
    let zones = provider.list_zones().await?;
    let mut summary = RunSummary::default();

    for zone in zones_to_process(&zones, &config, &mut summary) {
        info!("Processing domain: {} (zone {})", zone.name, zone.id);
        match delete_dmarc_records(provider, zone).await {
            Ok(report) => summary.add_cleanup_report(&report),
            Err(e) => {
                error!(
                    "Failed to delete DMARC records for domain {} (zone {}): {e}",
                    zone.name, zone.id
                );
                summary.zones_failed += 1;
            }
        }
    }

    info!(
        "DMARC cleanup finished on {}: {} zones processed, {} skipped, {} failed; {} records deleted, {} failed",
        provider.name(),
        summary.zones_processed,
        summary.zones_skipped,
        summary.zones_failed,
        summary.records_deleted,
        summary.records_failed
    );
    Ok(summary)
}
