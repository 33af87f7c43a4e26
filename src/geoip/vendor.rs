//! Vendor classification from ASN ownership.

use super::types::{AsnInfo, VendorCategory, VendorClassification};

/// Ordered vendor table: (name fragments, vendor, category).
const VENDOR_RULES: &[(&[&str], &str, VendorCategory)] = &[
    (&["amazon", "aws"], "Amazon Web Services", VendorCategory::Cloud),
    (&["microsoft", "azure"], "Microsoft Azure", VendorCategory::Cloud),
    (&["google", "gcp"], "Google Cloud Platform", VendorCategory::Cloud),
    (&["cloudflare"], "Cloudflare", VendorCategory::Cdn),
    (&["digitalocean"], "DigitalOcean", VendorCategory::Cloud),
    (&["fastly"], "Fastly", VendorCategory::Cdn),
];

/// Maps an organization to a known cloud/CDN vendor.
///
/// Unrecognized organizations pass through by name under `Other`; a missing
/// organization gives `Unknown`/`Unknown`.
pub fn classify_vendor(info: &AsnInfo) -> VendorClassification {
    let Some(organization) = info.organization() else {
        return VendorClassification::default();
    };

    let lowered = organization.to_ascii_lowercase();
    VENDOR_RULES
        .iter()
        .find(|(fragments, _, _)| fragments.iter().any(|f| lowered.contains(f)))
        .map(|(_, vendor, category)| VendorClassification {
            vendor: vendor.to_string(),
            category: *category,
        })
        .unwrap_or_else(|| VendorClassification {
            vendor: organization.to_string(),
            category: VendorCategory::Other,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info_with_isp(isp: &str) -> AsnInfo {
        AsnInfo {
            isp: isp.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_classify_known_vendors() {
        let cases = [
            ("Amazon.com, Inc.", "Amazon Web Services", VendorCategory::Cloud),
            ("Microsoft Corporation", "Microsoft Azure", VendorCategory::Cloud),
            ("Google LLC", "Google Cloud Platform", VendorCategory::Cloud),
            ("Cloudflare, Inc.", "Cloudflare", VendorCategory::Cdn),
            ("DigitalOcean, LLC", "DigitalOcean", VendorCategory::Cloud),
            ("Fastly, Inc.", "Fastly", VendorCategory::Cdn),
        ];
        for (isp, vendor, category) in cases {
            let result = classify_vendor(&info_with_isp(isp));
            assert_eq!(result.vendor, vendor, "isp {isp}");
            assert_eq!(result.category, category, "isp {isp}");
        }
    }

    #[test]
    fn test_classify_from_asn_when_isp_unknown() {
        let info = AsnInfo {
            asn: "AS16509 Amazon.com, Inc.".to_string(),
            ..Default::default()
        };
        let result = classify_vendor(&info);
        assert_eq!(result.vendor, "Amazon Web Services");
        assert_eq!(result.category, VendorCategory::Cloud);
    }

    #[test]
    fn test_classify_unrecognized_passes_name_through() {
        let result = classify_vendor(&info_with_isp("Hetzner Online GmbH"));
        assert_eq!(result.vendor, "Hetzner Online GmbH");
        assert_eq!(result.category, VendorCategory::Other);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(
            classify_vendor(&AsnInfo::default()),
            VendorClassification::default()
        );
    }
}
