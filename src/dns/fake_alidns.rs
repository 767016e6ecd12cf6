// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{AliDnsApi, DnsRecord, Domain, DomainPage, RecordType, ZoneFinder};
use crate::common::{DomainId, Error, RecordId};
use async_trait::async_trait;
use hyper::StatusCode;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// In-memory AliDNS. Mirrors the provider in rejecting exact duplicates.
pub(crate) struct FakeAliDns {
    pub(crate) domains: Vec<Domain>,
    pub(crate) page_size: u64,
    pub(crate) pages_requested: Mutex<Vec<u64>>,
    /// (domain name, record)
    pub(crate) records: Mutex<Vec<(String, DnsRecord)>>,
    pub(crate) deleted: Mutex<Vec<RecordId>>,
    pub(crate) failing_deletes: Mutex<HashSet<RecordId>>,
    next_record_id: Mutex<u64>,
}

impl FakeAliDns {
    pub(crate) fn new(domains: &[(&str, &str)], page_size: u64) -> Self {
        Self {
            domains: domains
                .iter()
                .map(|(id, name)| Domain {
                    domain_id: DomainId(id.to_string()),
                    domain_name: name.to_string(),
                })
                .collect(),
            page_size,
            pages_requested: Mutex::new(Vec::new()),
            records: Mutex::new(Vec::new()),
            deleted: Mutex::new(Vec::new()),
            failing_deletes: Mutex::new(HashSet::new()),
            next_record_id: Mutex::new(1000),
        }
    }

    pub(crate) fn insert_txt(&self, domain_name: &str, rr: &str, value: &str) -> RecordId {
        let mut next = self.next_record_id.lock().unwrap();
        *next += 1;
        let record_id = RecordId(next.to_string());
        self.records.lock().unwrap().push((
            domain_name.to_string(),
            DnsRecord {
                record_id: record_id.clone(),
                rr: rr.to_string(),
                record_type: RecordType::Txt,
                value: value.to_string(),
                ttl: Some(600),
            },
        ));
        record_id
    }

    pub(crate) fn txt_values(&self, domain_name: &str, rr: &str) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(d, r)| d == domain_name && r.rr == rr && r.record_type == RecordType::Txt)
            .map(|(_, r)| r.value.clone())
            .collect()
    }
}

#[async_trait]
impl AliDnsApi for FakeAliDns {
    async fn describe_domains(&self, page_number: u64) -> Result<DomainPage, Error> {
        self.pages_requested.lock().unwrap().push(page_number);
        let start = ((page_number - 1) * self.page_size) as usize;
        let domains = self
            .domains
            .iter()
            .skip(start)
            .take(self.page_size as usize)
            .cloned()
            .collect();
        Ok(DomainPage {
            domains,
            page_number,
            page_size: self.page_size,
            total_count: self.domains.len() as u64,
        })
    }

    async fn describe_domain_records(
        &self,
        domain_name: &str,
        page_size: u64,
    ) -> Result<Vec<DnsRecord>, Error> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|(d, _)| d == domain_name)
            .take(page_size as usize)
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn add_domain_record(
        &self,
        domain_name: &str,
        rr: &str,
        record_type: RecordType,
        value: &str,
        ttl: Option<u32>,
    ) -> Result<Option<RecordId>, Error> {
        if !self.domains.iter().any(|d| d.domain_name == domain_name) {
            return Err(Error::Provider(
                StatusCode::BAD_REQUEST,
                format!("AddDomainRecord: InvalidDomainName.NoExist: {domain_name}"),
            ));
        }
        if self.txt_values(domain_name, rr).iter().any(|v| v == value) {
            return Ok(None);
        }
        let record_id = self.insert_txt(domain_name, rr, value);
        if let Some((_, record)) = self.records.lock().unwrap().last_mut() {
            record.record_type = record_type;
            record.ttl = ttl;
        }
        Ok(Some(record_id))
    }

    async fn delete_domain_record(&self, record_id: &RecordId) -> Result<(), Error> {
        if self.failing_deletes.lock().unwrap().contains(record_id) {
            return Err(Error::Provider(
                StatusCode::SERVICE_UNAVAILABLE,
                format!("DeleteDomainRecord: {record_id}"),
            ));
        }
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|(_, r)| &r.record_id != record_id);
        if records.len() == before {
            return Err(Error::Provider(
                StatusCode::BAD_REQUEST,
                format!("DeleteDomainRecord: DomainRecordNotBelongToUser: {record_id}"),
            ));
        }
        self.deleted.lock().unwrap().push(record_id.clone());
        Ok(())
    }
}

/// `ZoneFinder` answering from a fixed table of fqdn to zone.
#[derive(Default)]
pub(crate) struct FakeZoneFinder {
    pub(crate) zones: HashMap<String, String>,
}

impl FakeZoneFinder {
    pub(crate) fn new(zones: &[(&str, &str)]) -> Self {
        Self {
            zones: zones
                .iter()
                .map(|(fqdn, zone)| (fqdn.to_string(), zone.to_string()))
                .collect(),
        }
    }
}

#[async_trait]
impl ZoneFinder for FakeZoneFinder {
    async fn find_zone_by_fqdn(&self, fqdn: &str) -> Result<String, Error> {
        self.zones
            .get(fqdn)
            .cloned()
            .ok_or_else(|| Error::Resolve(format!("no SOA record found for {fqdn}")))
    }
}
