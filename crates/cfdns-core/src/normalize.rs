//! Record identity normalization
//!
//! Callers may pass a bare label (`host1`) or an already qualified name
//! (`host1.example.com`); both map to the same fully-qualified name.

/// Qualify `short_name` under `zone_name`
///
/// Names that already end with the zone name are returned unchanged, so
/// qualified names are never suffixed twice.
///
/// ```
/// use cfdns_core::normalize_record_name;
///
/// assert_eq!(normalize_record_name("example.com", "host1"), "host1.example.com");
/// assert_eq!(
///     normalize_record_name("example.com", "host1.example.com"),
///     "host1.example.com"
/// );
/// ```
pub fn normalize_record_name(zone_name: &str, short_name: &str) -> String {
    if short_name.ends_with(zone_name) {
        short_name.to_string()
    } else {
        format!("{}.{}", short_name, zone_name)
    }
}
