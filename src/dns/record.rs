/// TTL value the provider treats as "automatic".
pub const AUTO_TTL: u32 = 1;

pub const DMARC_NAME: &str = "_dmarc";
pub const SPF_NAME: &str = "@";
pub const SPF_PREFIX: &str = "v=spf1";
pub const DKIM_NAME: &str = "*._domainkey";
/// Empty public key: a revoked, inert selector until a real key is published.
pub const DKIM_PLACEHOLDER: &str = "v=DKIM1; p=";

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DNSRecordType {
    TXT,
}

impl DNSRecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DNSRecordType::TXT => "TXT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DNSRecord {
    pub id: String,
    pub record_type: DNSRecordType,
    pub name: String,
    pub content: String,
}

/// A record to be created; the provider assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub record_type: DNSRecordType,
    pub name: String,
    pub content: String,
    pub ttl: u32,
}

impl NewRecord {
    pub fn txt(name: &str, content: &str) -> Self {
        Self {
            record_type: DNSRecordType::TXT,
            name: name.to_string(),
            content: content.to_string(),
            ttl: AUTO_TTL,
        }
    }
}

/// The mail-authentication records kept in place on every zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Dmarc,
    Spf,
    Dkim,
}

impl RecordKind {
    /// Reconciliation order within a zone.
    pub const ALL: [RecordKind; 3] = [RecordKind::Dmarc, RecordKind::Spf, RecordKind::Dkim];

    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Dmarc => "DMARC",
            RecordKind::Spf => "SPF",
            RecordKind::Dkim => "DKIM",
        }
    }

    pub fn record_name(&self) -> &'static str {
        match self {
            RecordKind::Dmarc => DMARC_NAME,
            RecordKind::Spf => SPF_NAME,
            RecordKind::Dkim => DKIM_NAME,
        }
    }

    pub fn matches(&self, record: &DNSRecord) -> bool {
        match self {
            RecordKind::Dmarc => is_dmarc_record(record),
            RecordKind::Spf => is_spf_record(record),
            RecordKind::Dkim => is_dkim_record(record),
        }
    }
}

pub fn is_dmarc_record(record: &DNSRecord) -> bool {
    record.name == DMARC_NAME
}

pub fn is_spf_record(record: &DNSRecord) -> bool {
    record.name == SPF_NAME && record.content.starts_with(SPF_PREFIX)
}

pub fn is_dkim_record(record: &DNSRecord) -> bool {
    record.name == DKIM_NAME
}

/// Matches both the relative `_dmarc` label and `_dmarc.<zone>`, since the
/// provider may report either form.
pub fn is_zone_dmarc_record(record: &DNSRecord, zone_name: &str) -> bool {
    is_dmarc_record(record)
        || record
            .name
            .strip_prefix("_dmarc.")
            .is_some_and(|rest| rest == zone_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txt(name: &str, content: &str) -> DNSRecord {
        DNSRecord {
            id: format!("id-{name}"),
            record_type: DNSRecordType::TXT,
            name: name.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_dmarc_exact_name_only() {
        assert!(is_dmarc_record(&txt("_dmarc", "v=DMARC1; p=none")));
        assert!(is_dmarc_record(&txt("_dmarc", "")));
        assert!(!is_dmarc_record(&txt("_dmarc.example.com", "v=DMARC1; p=none")));
        assert!(!is_dmarc_record(&txt("sub._dmarc", "v=DMARC1; p=none")));
    }

    #[test]
    fn test_spf_requires_apex_and_prefix() {
        assert!(is_spf_record(&txt("@", "v=spf1 -all")));
        assert!(!is_spf_record(&txt("@", "google-site-verification=abc")));
        assert!(!is_spf_record(&txt("www", "v=spf1 -all")));
        assert!(!is_spf_record(&txt("@", " v=spf1 -all")));
    }

    #[test]
    fn test_dkim_ignores_content() {
        assert!(is_dkim_record(&txt("*._domainkey", "v=DKIM1; p=MIGf")));
        assert!(is_dkim_record(&txt("*._domainkey", "anything")));
        assert!(!is_dkim_record(&txt("s1._domainkey", "v=DKIM1; p=MIGf")));
    }

    #[test]
    fn test_zone_dmarc_matches_both_forms() {
        assert!(is_zone_dmarc_record(&txt("_dmarc", ""), "a.com"));
        assert!(is_zone_dmarc_record(&txt("_dmarc.a.com", ""), "a.com"));
        assert!(!is_zone_dmarc_record(&txt("_dmarc.b.com", ""), "a.com"));
        assert!(!is_zone_dmarc_record(&txt("_spf_unrelated", ""), "a.com"));
    }

    #[test]
    fn test_record_kind_order_and_names() {
        let names: Vec<_> = RecordKind::ALL.iter().map(|k| k.record_name()).collect();
        assert_eq!(names, vec!["_dmarc", "@", "*._domainkey"]);
        assert!(RecordKind::Spf.matches(&txt("@", "v=spf1 ~all")));
        assert!(!RecordKind::Dkim.matches(&txt("@", "v=spf1 ~all")));
    }

    #[test]
    fn test_new_txt_uses_auto_ttl() {
        let rec = NewRecord::txt(DKIM_NAME, DKIM_PLACEHOLDER);
        assert_eq!(rec.record_type, DNSRecordType::TXT);
        assert_eq!(rec.ttl, 1);
        assert_eq!(rec.content, "v=DKIM1; p=");
    }
}
