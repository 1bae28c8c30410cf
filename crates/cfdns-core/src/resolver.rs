//! Name resolution against the remote directory
//!
//! The directory has no query-by-name, so zones and records are located by
//! listing everything and scanning for the first exact, case-sensitive name
//! match. Listing order decides ties.
//!
//! Only the first page of each listing is scanned; accounts or zones large
//! enough to paginate are a known limitation (clients warn when a listing
//! was truncated).

use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{DnsRecord, Zone};
use crate::traits::DnsClient;

/// First zone named exactly `name`
pub fn find_zone_by_name<'a>(zones: &'a [Zone], name: &str) -> Option<&'a Zone> {
    zones.iter().find(|zone| zone.name == name)
}

/// First record named exactly `name`
pub fn find_record_by_name<'a>(records: &'a [DnsRecord], name: &str) -> Option<&'a DnsRecord> {
    records.iter().find(|record| record.name == name)
}

/// Resolve a zone name to the provider's zone
///
/// # Errors
///
/// [`Error::ZoneNotFound`] when no listed zone has that name; listing
/// failures are propagated unchanged.
pub async fn resolve_zone(client: &dyn DnsClient, zone_name: &str) -> Result<Zone> {
    debug!("Listing zones to locate '{}'", zone_name);
    let zones = client.list_zones().await?;
    debug!("{} zone(s) listed", zones.len());

    find_zone_by_name(&zones, zone_name)
        .cloned()
        .ok_or_else(|| Error::zone_not_found(zone_name))
}

/// Resolve the zone, then look for the record inside it
///
/// Returns the zone together with the record if one matched. A missing zone
/// is an error; a missing record is not.
///
/// Listings may omit the record's zone fields; they are filled in from the
/// resolved zone so the record can always be addressed.
pub async fn locate_record(
    client: &dyn DnsClient,
    zone_name: &str,
    record_name: &str,
) -> Result<(Zone, Option<DnsRecord>)> {
    let zone = resolve_zone(client, zone_name).await?;

    debug!(
        "Listing records of zone '{}' (id {}) to locate '{}'",
        zone.name, zone.id, record_name
    );
    let records = client.list_records(&zone.id).await?;
    debug!("{} record(s) listed", records.len());

    let record = find_record_by_name(&records, record_name)
        .cloned()
        .map(|record| attach_zone(record, &zone));
    Ok((zone, record))
}

fn attach_zone(mut record: DnsRecord, zone: &Zone) -> DnsRecord {
    if record.zone_id.trim().is_empty() {
        record.zone_id = zone.id.clone();
    }
    if record.zone_name.trim().is_empty() {
        record.zone_name = zone.name.clone();
    }
    record
}

/// Resolve a record name within a named zone
///
/// # Errors
///
/// [`Error::ZoneNotFound`] if the zone is missing, [`Error::RecordNotFound`]
/// if the zone has no record with that name.
pub async fn resolve_record(
    client: &dyn DnsClient,
    zone_name: &str,
    record_name: &str,
) -> Result<DnsRecord> {
    match locate_record(client, zone_name, record_name).await? {
        (_, Some(record)) => Ok(record),
        (_, None) => Err(Error::record_not_found(zone_name, record_name)),
    }
}
