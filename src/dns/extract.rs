//! DNS record extraction utilities.
//!
//! SPF and DMARC policies are published as TXT records; these helpers pick
//! them out and relabel them so they show up under their own record kind.

use super::records::{RecordType, ResolvedRecord};

/// Extracts SPF records (containing `v=spf1`) from TXT answers.
pub fn extract_spf_records(txt_records: &[ResolvedRecord]) -> Vec<ResolvedRecord> {
    extract_tagged(txt_records, "v=spf1", RecordType::Spf)
}

/// Extracts DMARC records (containing `v=DMARC1`) from TXT answers.
///
/// DMARC lives at `_dmarc.<domain>`, so pass the TXT answers for that name.
pub fn extract_dmarc_records(txt_records: &[ResolvedRecord]) -> Vec<ResolvedRecord> {
    extract_tagged(txt_records, "v=DMARC1", RecordType::Dmarc)
}

fn extract_tagged(
    txt_records: &[ResolvedRecord],
    tag: &str,
    relabel_as: RecordType,
) -> Vec<ResolvedRecord> {
    txt_records
        .iter()
        .filter(|record| record.data.contains(tag))
        .map(|record| record.relabeled(relabel_as))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn txt(data: &str) -> ResolvedRecord {
        ResolvedRecord {
            record_type: RecordType::Txt,
            name: "example.com.".to_string(),
            data: data.to_string(),
            ttl: 300,
        }
    }

    #[test]
    fn test_extract_spf_records() {
        let records = vec![
            txt("\"google-site-verification=abc\""),
            txt("\"v=spf1 include:_spf.google.com ~all\""),
        ];
        let spf = extract_spf_records(&records);
        assert_eq!(spf.len(), 1);
        assert_eq!(spf[0].record_type, RecordType::Spf);
        assert!(spf[0].data.contains("include:_spf.google.com"));
    }

    #[test]
    fn test_extract_dmarc_records() {
        let records = vec![txt("\"v=DMARC1; p=reject\""), txt("\"v=spf1 -all\"")];
        let dmarc = extract_dmarc_records(&records);
        assert_eq!(dmarc.len(), 1);
        assert_eq!(dmarc[0].record_type, RecordType::Dmarc);
    }

    #[test]
    fn test_extract_from_empty() {
        assert!(extract_spf_records(&[]).is_empty());
        assert!(extract_dmarc_records(&[txt("nothing here")]).is_empty());
    }
}
