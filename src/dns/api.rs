// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::common::{DomainId, Error, RecordId};
use async_trait::async_trait;
use serde::Deserialize;

/// The AliDNS operations a challenge needs.
#[async_trait]
pub trait AliDnsApi: Send + Sync {
    /// List one page (1-based) of the domains (zones) managed by the account.
    async fn describe_domains(&self, page_number: u64) -> Result<DomainPage, Error>;

    /// List the records of a domain in a single call of up to `page_size` records.
    async fn describe_domain_records(
        &self,
        domain_name: &str,
        page_size: u64,
    ) -> Result<Vec<DnsRecord>, Error>;

    /// Create a record. Returns `None` if an identical record (same name, type
    /// and value) already exists.
    async fn add_domain_record(
        &self,
        domain_name: &str,
        rr: &str,
        record_type: RecordType,
        value: &str,
        ttl: Option<u32>,
    ) -> Result<Option<RecordId>, Error>;

    /// Delete the record with the specified id.
    async fn delete_domain_record(&self, record_id: &RecordId) -> Result<(), Error>;
}

/// A domain (zone) hosted by AliDNS.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Domain {
    /// Internal id.
    pub domain_id: DomainId,
    /// Unqualified name, e.g. `example.com`.
    pub domain_name: String,
}

/// One page of `DescribeDomains`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DomainPage {
    /// Domains on this page.
    pub domains: Vec<Domain>,
    /// 1-based number of this page.
    pub page_number: u64,
    /// Page size used by the provider.
    pub page_size: u64,
    /// Number of domains across all pages.
    pub total_count: u64,
}

/// A record as listed by `DescribeDomainRecords`.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct DnsRecord {
    /// Internal id.
    #[serde(rename = "RecordId")]
    pub record_id: RecordId,
    /// Short name relative to the domain, `@` for the apex.
    #[serde(rename = "RR")]
    pub rr: String,
    /// Record type.
    #[serde(rename = "Type")]
    pub record_type: RecordType,
    /// Record value, verbatim.
    #[serde(rename = "Value")]
    pub value: String,
    /// TTL in seconds.
    #[serde(default, rename = "TTL")]
    pub ttl: Option<u32>,
}

/// Record types as reported by AliDNS. Only `Txt` is ever written.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
#[allow(missing_docs)]
pub enum RecordType {
    A,
    Aaaa,
    Caa,
    Cname,
    Mx,
    Ns,
    Srv,
    Txt,
    #[serde(other)]
    Other,
}

impl RecordType {
    /// Value of the `Type` request parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
            RecordType::Caa => "CAA",
            RecordType::Cname => "CNAME",
            RecordType::Mx => "MX",
            RecordType::Ns => "NS",
            RecordType::Srv => "SRV",
            RecordType::Txt => "TXT",
            RecordType::Other => "OTHER",
        }
    }
}
