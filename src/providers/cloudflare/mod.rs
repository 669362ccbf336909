//! Cloudflare v4 API provider implementation

pub mod client;
pub mod error;
pub mod types;


pub use client::{CloudflareConfig, CloudflareProvider};

// --- DNSProvider trait implementation for CloudflareProvider ---
use crate::dns::provider::DNSProvider;
use crate::dns::record::{DNSRecord, DNSRecordType, NewRecord, Zone};
use crate::error::Error;
use async_trait::async_trait;
use error::map_error;
use log::warn;
use types::{to_create_request, to_dns_record, to_zone};

#[async_trait]
impl DNSProvider for CloudflareProvider {
    fn name(&self) -> &'static str {
        "cloudflare"
    }

    async fn list_zones(&self) -> Result<Vec<Zone>, Error> {
        self.list_all_zones()
            .await
            .map(|v| v.into_iter().map(to_zone).collect())
            .map_err(map_error)
    }

    async fn list_txt_records(&self, zone: &Zone) -> Result<Vec<DNSRecord>, Error> {
        let records = self
            .list_dns_records(&zone.id, DNSRecordType::TXT.as_str())
            .await
            .map_err(map_error)?;
        Ok(records
            .into_iter()
            .filter_map(|r| {
                let id = r.id.clone();
                let converted = to_dns_record(r);
                if converted.is_none() {
                    warn!("Ignoring non-TXT record {id} returned for zone {}", zone.id);
                }
                converted
            })
            .collect())
    }

    async fn add_record(&self, zone: &Zone, record: NewRecord) -> Result<(), Error> {
        let req = to_create_request(&record);
        self.create_dns_record(&zone.id, &req)
            .await
            .map_err(map_error)
    }

    async fn delete_record(&self, zone: &Zone, record: &DNSRecord) -> Result<(), Error> {
        self.delete_dns_record(&zone.id, &record.id)
            .await
            .map_err(map_error)
    }
}
