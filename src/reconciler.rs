use log::{error, info};

use crate::config::Config;
use crate::dns::provider::DNSProvider;
use crate::dns::record::{DKIM_PLACEHOLDER, DNSRecord, NewRecord, RecordKind, Zone};
use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    AlreadyExists,
    Created,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneReport {
    pub outcomes: Vec<(RecordKind, RecordOutcome)>,
}

impl ZoneReport {
    pub fn count(&self, pred: impl Fn(&RecordOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Ensures the DMARC, SPF and DKIM TXT records exist on a zone.
pub struct Reconciler<'a, P: DNSProvider + ?Sized> {
    provider: &'a P,
    config: &'a Config,
}

impl<'a, P: DNSProvider + ?Sized> Reconciler<'a, P> {
    pub fn new(provider: &'a P, config: &'a Config) -> Self {
        Self { provider, config }
    }

    pub fn desired_record(&self, kind: RecordKind) -> NewRecord {
        let content = match kind {
            RecordKind::Dmarc => self.config.dmarc_content.as_str(),
            RecordKind::Spf => self.config.spf_content.as_str(),
            RecordKind::Dkim => DKIM_PLACEHOLDER,
        };
        NewRecord::txt(kind.record_name(), content)
    }

    /// Fetches the zone's TXT records once and checks every kind against that
    /// snapshot. Only a listing failure is returned as an error; create
    /// failures are recorded per kind.
    pub async fn reconcile_zone(&self, zone: &Zone) -> Result<ZoneReport, Error> {
        let records = self.provider.list_txt_records(zone).await?;

        let mut outcomes = Vec::with_capacity(RecordKind::ALL.len());
        for kind in RecordKind::ALL {
            let outcome = self.ensure_record(zone, &records, kind).await;
            outcomes.push((kind, outcome));
        }

        Ok(ZoneReport { outcomes })
    }

    async fn ensure_record(
        &self,
        zone: &Zone,
        records: &[DNSRecord],
        kind: RecordKind,
    ) -> RecordOutcome {
        let label = kind.label();
        if records.iter().any(|r| kind.matches(r)) {
            info!(
                "{label} record already exists: {} (zone {})",
                zone.name, zone.id
            );
            return RecordOutcome::AlreadyExists;
        }

        match self.provider.add_record(zone, self.desired_record(kind)).await {
            Ok(()) => {
                info!(
                    "{label} record created for domain {} (zone {})",
                    zone.name, zone.id
                );
                RecordOutcome::Created
            }
            Err(e) => {
                error!(
                    "Failed to create {label} record for domain {} (zone {}): {e}",
                    zone.name, zone.id
                );
                RecordOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::provider::mock::{Call, FakeProvider};
    use crate::dns::record::{DKIM_NAME, DMARC_NAME, SPF_NAME};
    use assert_matches::assert_matches;

    fn zone() -> Zone {
        Zone {
            id: "1".to_string(),
            name: "a.com".to_string(),
        }
    }

    fn created_names(provider: &FakeProvider) -> Vec<String> {
        provider
            .writes()
            .into_iter()
            .filter_map(|call| match call {
                Call::Add(_, rec) => Some(rec.name),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_empty_zone_gets_all_three_in_order() {
        let provider = FakeProvider::with_zones(&[("1", "a.com")]);
        let config = Config::default();

        let report = Reconciler::new(&provider, &config)
            .reconcile_zone(&zone())
            .await
            .unwrap();

        assert_eq!(report.count(|o| *o == RecordOutcome::Created), 3);
        assert_eq!(created_names(&provider), vec![DMARC_NAME, SPF_NAME, DKIM_NAME]);
        assert_eq!(
            provider.calls(),
            vec![
                Call::ListTxt("1".into()),
                Call::Add("1".into(), NewRecord::txt("_dmarc", &config.dmarc_content)),
                Call::Add("1".into(), NewRecord::txt("@", &config.spf_content)),
                Call::Add("1".into(), NewRecord::txt("*._domainkey", "v=DKIM1; p=")),
            ]
        );
    }

    #[tokio::test]
    async fn test_existing_dmarc_suppresses_dmarc_create_only() {
        let mut provider = FakeProvider::with_zones(&[("1", "a.com")]);
        provider.set_records("1", &[("r1", "_dmarc", "v=DMARC1; p=none")]);
        let config = Config::default();

        let report = Reconciler::new(&provider, &config)
            .reconcile_zone(&zone())
            .await
            .unwrap();

        assert_eq!(report.outcomes[0], (RecordKind::Dmarc, RecordOutcome::AlreadyExists));
        assert_eq!(created_names(&provider), vec![SPF_NAME, DKIM_NAME]);
    }

    #[tokio::test]
    async fn test_spf_suppressed_only_by_spf_content() {
        let mut provider = FakeProvider::with_zones(&[("1", "a.com")]);
        provider.set_records("1", &[("r1", "@", "v=spf1 include:mail.example ~all")]);
        let config = Config::default();
        Reconciler::new(&provider, &config)
            .reconcile_zone(&zone())
            .await
            .unwrap();
        assert!(!created_names(&provider).contains(&SPF_NAME.to_string()));

        let mut provider = FakeProvider::with_zones(&[("1", "a.com")]);
        provider.set_records("1", &[("r1", "@", "google-site-verification=xyz")]);
        Reconciler::new(&provider, &config)
            .reconcile_zone(&zone())
            .await
            .unwrap();
        assert!(created_names(&provider).contains(&SPF_NAME.to_string()));
    }

    #[tokio::test]
    async fn test_dkim_presence_ignores_content() {
        let mut provider = FakeProvider::with_zones(&[("1", "a.com")]);
        provider.set_records(
            "1",
            &[
                ("r1", "*._domainkey", "not even a key"),
                ("r2", "_dmarc", "v=DMARC1; p=none"),
                ("r3", "@", "v=spf1 -all"),
            ],
        );
        let config = Config::default();

        let report = Reconciler::new(&provider, &config)
            .reconcile_zone(&zone())
            .await
            .unwrap();

        assert_eq!(report.count(|o| *o == RecordOutcome::AlreadyExists), 3);
        assert!(provider.writes().is_empty());
    }

    #[tokio::test]
    async fn test_create_failure_does_not_block_next_kind() {
        let mut provider = FakeProvider::with_zones(&[("1", "a.com")]);
        provider.fail_add_names.insert(SPF_NAME.to_string());
        let config = Config::default();

        let report = Reconciler::new(&provider, &config)
            .reconcile_zone(&zone())
            .await
            .unwrap();

        assert_eq!(report.outcomes[0].1, RecordOutcome::Created);
        assert_matches!(report.outcomes[1], (RecordKind::Spf, RecordOutcome::Failed(_)));
        assert_eq!(report.outcomes[2].1, RecordOutcome::Created);
        assert_eq!(created_names(&provider), vec![DMARC_NAME, SPF_NAME, DKIM_NAME]);
    }

    #[tokio::test]
    async fn test_listing_failure_returns_error_without_writes() {
        let mut provider = FakeProvider::with_zones(&[("1", "a.com")]);
        provider.fail_list_for.insert("1".to_string());
        let config = Config::default();

        let result = Reconciler::new(&provider, &config)
            .reconcile_zone(&zone())
            .await;

        assert_matches!(result, Err(Error::ProviderError(_)));
        assert!(provider.writes().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_is_fetched_once() {
        let provider = FakeProvider::with_zones(&[("1", "a.com")]);
        let config = Config::default();

        Reconciler::new(&provider, &config)
            .reconcile_zone(&zone())
            .await
            .unwrap();

        let listings = provider
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::ListTxt(_)))
            .count();
        assert_eq!(listings, 1);
    }
}
