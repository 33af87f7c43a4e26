//! DNS record types and the DoH JSON wire format.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// DNS record kinds tracked by the analyzer.
///
/// `Spf` has its own wire code (99) but in practice is derived from TXT
/// answers. `Dmarc` has no wire code at all; it is a TXT record found at
/// `_dmarc.<domain>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordType {
    A,
    Aaaa,
    Cname,
    Mx,
    Ns,
    Txt,
    Soa,
    Spf,
    Dmarc,
    /// Any other wire type, kept by numeric code
    Other(u16),
}

impl RecordType {
    /// Maps a numeric wire code to a record type.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => RecordType::A,
            2 => RecordType::Ns,
            5 => RecordType::Cname,
            6 => RecordType::Soa,
            15 => RecordType::Mx,
            16 => RecordType::Txt,
            28 => RecordType::Aaaa,
            99 => RecordType::Spf,
            other => RecordType::Other(other),
        }
    }

    /// Numeric wire code, `None` for derived kinds.
    pub fn code(&self) -> Option<u16> {
        match self {
            RecordType::A => Some(1),
            RecordType::Ns => Some(2),
            RecordType::Cname => Some(5),
            RecordType::Soa => Some(6),
            RecordType::Mx => Some(15),
            RecordType::Txt => Some(16),
            RecordType::Aaaa => Some(28),
            RecordType::Spf => Some(99),
            RecordType::Dmarc => None,
            RecordType::Other(code) => Some(*code),
        }
    }

    /// Parses a mnemonic (`"CNAME"`), an RFC 3597 name (`"TYPE65"`) or a
    /// decimal code (`"5"`). Case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        let parsed = match upper.as_str() {
            "A" => RecordType::A,
            "AAAA" => RecordType::Aaaa,
            "CNAME" => RecordType::Cname,
            "MX" => RecordType::Mx,
            "NS" => RecordType::Ns,
            "TXT" => RecordType::Txt,
            "SOA" => RecordType::Soa,
            "SPF" => RecordType::Spf,
            "DMARC" => RecordType::Dmarc,
            other => {
                let digits = other.strip_prefix("TYPE").unwrap_or(other);
                RecordType::from_code(digits.parse::<u16>().ok()?)
            }
        };
        Some(parsed)
    }

    /// Value for the DoH `type` query parameter.
    ///
    /// DMARC is queried as TXT.
    pub fn query_value(&self) -> String {
        match self {
            RecordType::Dmarc => "TXT".to_string(),
            RecordType::Other(code) => code.to_string(),
            known => known.to_string(),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::A => f.write_str("A"),
            RecordType::Aaaa => f.write_str("AAAA"),
            RecordType::Cname => f.write_str("CNAME"),
            RecordType::Mx => f.write_str("MX"),
            RecordType::Ns => f.write_str("NS"),
            RecordType::Txt => f.write_str("TXT"),
            RecordType::Soa => f.write_str("SOA"),
            RecordType::Spf => f.write_str("SPF"),
            RecordType::Dmarc => f.write_str("DMARC"),
            RecordType::Other(code) => write!(f, "TYPE{code}"),
        }
    }
}

// Serialized by mnemonic so record maps become `{"A": [...], "CNAME": [...]}`.
impl Serialize for RecordType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One normalized DNS answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRecord {
    pub record_type: RecordType,
    pub name: String,
    pub data: String,
    pub ttl: u32,
}

impl ResolvedRecord {
    /// Copy of this record relabeled as a derived kind (SPF, DMARC).
    pub fn relabeled(&self, record_type: RecordType) -> Self {
        ResolvedRecord {
            record_type,
            ..self.clone()
        }
    }
}

const RCODE_NOERROR: u32 = 0;
const RCODE_NXDOMAIN: u32 = 3;

/// JSON DoH response body (`application/dns-json`).
#[derive(Debug, Deserialize)]
pub(crate) struct DohResponse {
    #[serde(rename = "Status", default)]
    pub status: u32,
    #[serde(rename = "Answer", default)]
    pub answer: Vec<DohAnswer>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DohAnswer {
    pub name: String,
    #[serde(rename = "type", deserialize_with = "deserialize_code_or_name")]
    pub record_type: RecordType,
    #[serde(rename = "TTL", default)]
    pub ttl: u32,
    #[serde(default)]
    pub data: String,
}

impl From<DohAnswer> for ResolvedRecord {
    fn from(answer: DohAnswer) -> Self {
        ResolvedRecord {
            record_type: answer.record_type,
            name: answer.name,
            data: answer.data,
            ttl: answer.ttl,
        }
    }
}

impl DohResponse {
    /// NOERROR and NXDOMAIN are definitive answers; SERVFAIL, REFUSED and
    /// the rest mean the provider could not answer.
    pub(crate) fn is_definitive(&self) -> bool {
        matches!(self.status, RCODE_NOERROR | RCODE_NXDOMAIN)
    }

    pub(crate) fn into_records(self) -> Vec<ResolvedRecord> {
        self.answer.into_iter().map(ResolvedRecord::from).collect()
    }
}

/// Deserializes a record type given either as a number (`5`) or a string
/// (`"CNAME"`, `"5"`). Providers disagree on which they send.
fn deserialize_code_or_name<'de, D>(deserializer: D) -> Result<RecordType, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct CodeOrNameVisitor;

    impl<'de> Visitor<'de> for CodeOrNameVisitor {
        type Value = RecordType;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a numeric record type or a record type name")
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u16::try_from(value)
                .map(RecordType::from_code)
                .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u16::try_from(value)
                .map(RecordType::from_code)
                .map_err(|_| E::invalid_value(de::Unexpected::Signed(value), &self))
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            RecordType::from_name(value)
                .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
        }
    }

    deserializer.deserialize_any(CodeOrNameVisitor)
}
