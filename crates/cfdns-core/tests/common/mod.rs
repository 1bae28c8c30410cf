//! Test doubles and common utilities for engine contract tests
//!
//! `RecordingDnsClient` behaves like a tiny in-memory directory: creates and
//! updates change what later listings return. Every call is recorded for
//! assertions, and any operation can be made to fail.

#![allow(dead_code)]

use cfdns_core::error::{Error, Result};
use cfdns_core::model::{DnsRecord, DnsRecordRequest, Zone};
use cfdns_core::traits::DnsClient;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// One recorded call on the directory
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListZones,
    ListRecords(String),
    Create(DnsRecordRequest),
    Update(DnsRecordRequest),
    Delete { zone_id: String, record_id: String },
    ExternalIp,
}

/// Operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    ListZones,
    ListRecords,
    Create,
    Update,
    Delete,
    ExternalIp,
}

/// A DnsClient double that records its inputs
///
/// Clones share all state, so a test can keep one handle while the engine
/// owns another.
#[derive(Clone, Default)]
pub struct RecordingDnsClient {
    zones: Arc<Mutex<Vec<Zone>>>,
    records: Arc<Mutex<HashMap<String, Vec<DnsRecord>>>>,
    external_ip: Arc<Mutex<String>>,
    create_response: Arc<Mutex<Option<DnsRecord>>>,
    update_response: Arc<Mutex<Option<DnsRecord>>>,
    failures: Arc<Mutex<HashSet<Op>>>,
    calls: Arc<Mutex<Vec<Call>>>,
    next_id: Arc<AtomicUsize>,
}

impl RecordingDnsClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_zone(self, zone: Zone) -> Self {
        self.zones.lock().unwrap().push(zone);
        self
    }

    pub fn with_record(self, record: DnsRecord) -> Self {
        self.records
            .lock()
            .unwrap()
            .entry(record.zone_id.clone())
            .or_default()
            .push(record);
        self
    }

    /// Store a record under `zone_id` regardless of its own zone fields
    pub fn with_record_in(self, zone_id: &str, record: DnsRecord) -> Self {
        self.records
            .lock()
            .unwrap()
            .entry(zone_id.to_string())
            .or_default()
            .push(record);
        self
    }

    pub fn with_external_ip(self, ip: &str) -> Self {
        *self.external_ip.lock().unwrap() = ip.to_string();
        self
    }

    /// Return this record from the next creates instead of echoing the request
    pub fn respond_to_create(self, record: DnsRecord) -> Self {
        *self.create_response.lock().unwrap() = Some(record);
        self
    }

    /// Return this record from the next updates instead of echoing the request
    pub fn respond_to_update(self, record: DnsRecord) -> Self {
        *self.update_response.lock().unwrap() = Some(record);
        self
    }

    pub fn failing(self, op: Op) -> Self {
        self.failures.lock().unwrap().insert(op);
        self
    }

    pub fn set_external_ip(&self, ip: &str) {
        *self.external_ip.lock().unwrap() = ip.to_string();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn creates(&self) -> Vec<DnsRecordRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Create(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn updates(&self) -> Vec<DnsRecordRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Update(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn deletes(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Delete { zone_id, record_id } => Some((zone_id, record_id)),
                _ => None,
            })
            .collect()
    }

    pub fn mutation_count(&self) -> usize {
        self.creates().len() + self.updates().len() + self.deletes().len()
    }

    pub fn external_ip_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::ExternalIp))
            .count()
    }

    /// Records currently stored for a zone
    pub fn stored_records(&self, zone_id: &str) -> Vec<DnsRecord> {
        self.records
            .lock()
            .unwrap()
            .get(zone_id)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, op: Op) -> Result<()> {
        if self.failures.lock().unwrap().contains(&op) {
            return Err(Error::status(500, format!("injected {:?} failure", op)));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl DnsClient for RecordingDnsClient {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        self.record(Call::ListZones);
        self.check(Op::ListZones)?;
        Ok(self.zones.lock().unwrap().clone())
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        self.record(Call::ListRecords(zone_id.to_string()));
        self.check(Op::ListRecords)?;
        Ok(self.stored_records(zone_id))
    }

    async fn create_record(&self, request: &DnsRecordRequest) -> Result<DnsRecord> {
        self.record(Call::Create(request.clone()));
        self.check(Op::Create)?;

        let created = match self.create_response.lock().unwrap().clone() {
            Some(record) => record,
            None => DnsRecord {
                id: format!("created-{}", self.next_id.fetch_add(1, Ordering::SeqCst)),
                zone_id: request.zone_id.clone(),
                name: request.name.clone(),
                record_type: request.record_type.clone(),
                content: request.content.clone(),
                proxied: request.proxied,
                ttl: request.ttl,
                ..DnsRecord::default()
            },
        };

        self.records
            .lock()
            .unwrap()
            .entry(request.zone_id.clone())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn update_record(&self, request: &DnsRecordRequest) -> Result<DnsRecord> {
        self.record(Call::Update(request.clone()));
        self.check(Op::Update)?;

        let mut records = self.records.lock().unwrap();
        let stored = records
            .get_mut(&request.zone_id)
            .and_then(|zone| {
                zone.iter_mut()
                    .find(|record| Some(&record.id) == request.id.as_ref())
            })
            .ok_or_else(|| Error::status(404, "record does not exist"))?;

        stored.content = request.content.clone();
        stored.ttl = request.ttl;
        stored.record_type = request.record_type.clone();
        stored.proxied = request.proxied;

        match self.update_response.lock().unwrap().clone() {
            Some(record) => Ok(record),
            None => Ok(stored.clone()),
        }
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<String> {
        self.record(Call::Delete {
            zone_id: zone_id.to_string(),
            record_id: record_id.to_string(),
        });
        self.check(Op::Delete)?;

        if let Some(zone) = self.records.lock().unwrap().get_mut(zone_id) {
            zone.retain(|record| record.id != record_id);
        }
        Ok(record_id.to_string())
    }

    async fn external_ip(&self) -> Result<String> {
        self.record(Call::ExternalIp);
        self.check(Op::ExternalIp)?;
        Ok(self.external_ip.lock().unwrap().clone())
    }
}

/// An A record with the given identity and content
pub fn a_record(id: &str, zone: &Zone, name: &str, content: &str) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        zone_id: zone.id.clone(),
        zone_name: zone.name.clone(),
        name: name.to_string(),
        record_type: "A".to_string(),
        content: content.to_string(),
        ttl: 3600,
        ..DnsRecord::default()
    }
}
