use crate::dns::record::{DNSRecord, NewRecord, Zone};
use crate::error::Error;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait DNSProvider: Send + Sync {
    fn name(&self) -> &'static str;
    /// Every zone in the account, in provider order.
    async fn list_zones(&self) -> Result<Vec<Zone>, Error>;
    async fn list_txt_records(&self, zone: &Zone) -> Result<Vec<DNSRecord>, Error>;
    async fn add_record(&self, zone: &Zone, record: NewRecord) -> Result<(), Error>;
    async fn delete_record(&self, zone: &Zone, record: &DNSRecord) -> Result<(), Error>;
}
