use log::{error, info};

use crate::dns::provider::DNSProvider;
use crate::dns::record::{Zone, is_zone_dmarc_record};
use crate::error::Error;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    pub deleted: usize,
    pub failed: usize,
}

/// Removes every DMARC record from a zone, one request per record.
pub async fn delete_dmarc_records<P: DNSProvider + ?Sized>(
    provider: &P,
    zone: &Zone,
) -> Result<CleanupReport, Error> {
    let records = provider.list_txt_records(zone).await?;
    let mut report = CleanupReport::default();

    for record in records.iter().filter(|r| is_zone_dmarc_record(r, &zone.name)) {
        info!("Deleting DNS record {} for domain {}", record.id, zone.name);
        match provider.delete_record(zone, record).await {
            Ok(()) => {
                info!(
                    "Deleted DMARC record for domain {} (zone {})",
                    zone.name, zone.id
                );
                report.deleted += 1;
            }
            Err(e) => {
                error!(
                    "Failed to delete DNS record {} for domain {} (zone {}): {e}",
                    record.id, zone.name, zone.id
                );
                report.failed += 1;
            }
        }
    }

    Ok(report)
}
