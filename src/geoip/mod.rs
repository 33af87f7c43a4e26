//! IP ownership lookup and hosting vendor classification.
//!
//! This module provides:
//! - ASN lookups against public IP intelligence APIs with ordered fallback
//! - Normalization of each provider's response shape into `AsnInfo`
//! - Vendor classification from the owning organization

mod lookup;
mod providers;
mod types;
mod vendor;

pub use lookup::AsnLookup;
pub use providers::{AsnProvider, AsnProviderKind};
pub use types::{AsnInfo, VendorCategory, VendorClassification};
pub use vendor::classify_vendor;
