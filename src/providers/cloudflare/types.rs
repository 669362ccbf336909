use serde::{Deserialize, Serialize};

use crate::dns::record::{DNSRecord, DNSRecordType, NewRecord, Zone};

/// Envelope wrapping every v4 API response.
#[derive(Deserialize, Debug)]
pub struct CloudflareResponse<T> {
    #[serde(default)]
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<CloudflareApiError>,
    pub result_info: Option<ResultInfo>,
}

impl<T> CloudflareResponse<T> {
    /// `code: message` pairs from the `errors` array, `None` when it is empty.
    pub fn error_summary(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect();
        Some(parts.join("; "))
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct CloudflareApiError {
    pub code: i64,
    pub message: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ResultInfo {
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CloudflareZone {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CloudflareDnsRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Serialize, Debug)]
pub struct CreateRecordRequest {
    #[serde(rename = "type")]
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
}

pub fn to_zone(cz: CloudflareZone) -> Zone {
    Zone {
        id: cz.id,
        name: cz.name,
    }
}

/// Only TXT records are modelled; anything else yields `None`.
pub fn to_dns_record(cr: CloudflareDnsRecord) -> Option<DNSRecord> {
    let record_type = match cr.record_type.as_str() {
        "TXT" => DNSRecordType::TXT,
        _ => return None,
    };
    Some(DNSRecord {
        id: cr.id,
        record_type,
        name: cr.name,
        content: cr.content,
    })
}

pub fn to_create_request(rec: &NewRecord) -> CreateRecordRequest {
    CreateRecordRequest {
        record_type: rec.record_type.as_str().to_string(),
        name: rec.name.clone(),
        content: rec.content.clone(),
        ttl: rec.ttl,
    }
}
