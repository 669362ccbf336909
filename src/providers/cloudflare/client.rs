use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::providers::cloudflare::error::{CloudflareProviderError, pretty_body};
use crate::providers::cloudflare::types::*;

/// Zones API maximum page size.
pub const ZONES_PER_PAGE: u32 = 50;

pub struct CloudflareConfig {
    pub api_url: String,
    pub api_token: String,
}

impl From<&Config> for CloudflareConfig {
    fn from(config: &Config) -> Self {
        Self {
            api_url: config.api_url.clone(),
            api_token: config.api_token.clone(),
        }
    }
}

pub struct CloudflareProvider {
    config: CloudflareConfig,
    client: Client,
}

impl CloudflareProvider {
    pub fn new(config: CloudflareConfig) -> Result<Self, CloudflareProviderError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { config, client })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.api_url, path);
        debug!("{method} {url}");
        self.client
            .request(method, url)
            .bearer_auth(&self.config.api_token)
            .header(CONTENT_TYPE, "application/json")
    }

    async fn handle_request<T>(
        &self,
        builder: RequestBuilder,
    ) -> Result<CloudflareResponse<T>, CloudflareProviderError>
    where
        T: DeserializeOwned,
    {
        let response = builder.send().await?;
        let status = response.status();
        debug!("Response status: {status}");
        let text = response.text().await?;

        if !status.is_success() {
            return Err(CloudflareProviderError::from_status(
                status,
                pretty_body(&text),
            ));
        }

        let envelope: CloudflareResponse<T> = serde_json::from_str(&text)
            .map_err(|e| CloudflareProviderError::Decode(format!("{e}: {text}")))?;

        if !envelope.success {
            return Err(CloudflareProviderError::Api {
                status,
                body: envelope
                    .error_summary()
                    .unwrap_or_else(|| pretty_body(&text)),
            });
        }

        Ok(envelope)
    }

    /// Fetch one page of zones along with the page metadata.
    pub async fn list_zones_page(
        &self,
        page: u32,
    ) -> Result<(Vec<CloudflareZone>, Option<ResultInfo>), CloudflareProviderError> {
        let builder = self
            .request(Method::GET, "/zones")
            .query(&[("page", page), ("per_page", ZONES_PER_PAGE)]);
        let envelope = self.handle_request::<Vec<CloudflareZone>>(builder).await?;
        Ok((envelope.result.unwrap_or_default(), envelope.result_info))
    }

    /// Walk every page until the reported page count is exhausted. A page
    /// without `result_info` ends the walk.
    pub async fn list_all_zones(&self) -> Result<Vec<CloudflareZone>, CloudflareProviderError> {
        let mut zones = Vec::new();
        let mut page = 1;

        loop {
            info!("Fetching zones, page: {page}");
            let (batch, result_info) = self.list_zones_page(page).await?;
            zones.extend(batch);

            let total_pages = result_info.map_or(page, |info| info.total_pages);
            page += 1;
            if page > total_pages {
                break;
            }
        }

        info!("Total zones fetched: {}", zones.len());
        Ok(zones)
    }

    pub async fn list_dns_records(
        &self,
        zone_id: &str,
        record_type: &str,
    ) -> Result<Vec<CloudflareDnsRecord>, CloudflareProviderError> {
        info!("Listing DNS records for zone: {zone_id}");
        let builder = self
            .request(Method::GET, &format!("/zones/{zone_id}/dns_records"))
            .query(&[("type", record_type)]);
        let envelope = self
            .handle_request::<Vec<CloudflareDnsRecord>>(builder)
            .await?;
        Ok(envelope.result.unwrap_or_default())
    }

    pub async fn create_dns_record(
        &self,
        zone_id: &str,
        req: &CreateRecordRequest,
    ) -> Result<(), CloudflareProviderError> {
        let builder = self
            .request(Method::POST, &format!("/zones/{zone_id}/dns_records"))
            .json(req);
        let envelope = self.handle_request::<serde_json::Value>(builder).await?;
        if let Some(id) = envelope
            .result
            .as_ref()
            .and_then(|r| r.get("id"))
            .and_then(|id| id.as_str())
        {
            debug!("Created record {id} in zone {zone_id}");
        }
        Ok(())
    }

    pub async fn delete_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
    ) -> Result<(), CloudflareProviderError> {
        let builder = self.request(
            Method::DELETE,
            &format!("/zones/{zone_id}/dns_records/{record_id}"),
        );
        self.handle_request::<serde_json::Value>(builder).await?;
        Ok(())
    }
}
