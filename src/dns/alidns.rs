// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::signature::signed_query;
use super::{AliDnsApi, DnsRecord, Domain, DomainPage, RecordType};
use crate::common::{AccessKeyId, AliDnsSettings, Error, RecordId, SolverSettings};
use crate::credentials::ClientFactory;
use async_trait::async_trait;
use chrono::Utc;
use hyper::StatusCode;
use rand::Rng;
use reqwest::Client;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// This struct implements `AliDnsApi` for one access key.
pub struct AliDnsClient {
    access_key_id: AccessKeyId,
    access_key_secret: String,
    client: Client,
    debug: bool,
    endpoint: String,
    region_id: String,
}

impl AliDnsClient {
    const API_VERSION: &'static str = "2015-01-09";
    const DUPLICATE_RECORD: &'static str = "DomainRecordDuplicate";

    /// Create an `AliDnsApi` client.
    pub fn new(
        settings: &AliDnsSettings,
        debug: bool,
        region_id: &str,
        access_key_id: &AccessKeyId,
        access_key_secret: &str,
    ) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent("alidns-solver")
            .build()
            .map_err(Self::map_error)?;
        Ok(Self {
            access_key_id: access_key_id.clone(),
            access_key_secret: access_key_secret.to_string(),
            client,
            debug,
            endpoint: settings.endpoint.clone(),
            region_id: region_id.to_string(),
        })
    }

    /// Like `rpc` but a rejection by AliDNS is an `Error`.
    async fn call<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        self.rpc(action, params)
            .await?
            .map_err(|(status, rejection)| rejection.into_error(status, action))
    }

    fn map_error(e: reqwest::Error) -> Error {
        Error::Provider(StatusCode::SERVICE_UNAVAILABLE, format!("{e}"))
    }

    fn request_url(&self, action: &str, params: &[(&str, String)]) -> Result<String, Error> {
        let mut query: BTreeMap<String, String> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        let nonce: u128 = rand::thread_rng().gen();
        for (k, v) in [
            ("AccessKeyId", self.access_key_id.to_string()),
            ("Action", action.to_string()),
            ("Format", "JSON".to_string()),
            ("SignatureMethod", "HMAC-SHA1".to_string()),
            ("SignatureNonce", format!("{nonce:032x}")),
            ("SignatureVersion", "1.0".to_string()),
            ("Timestamp", Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()),
            ("Version", Self::API_VERSION.to_string()),
        ] {
            query.insert(k.to_string(), v);
        }
        if !self.region_id.is_empty() {
            query.insert("RegionId".to_string(), self.region_id.clone());
        }
        let query = signed_query(&query, &self.access_key_secret)?;
        Ok(format!("{}?{query}", self.endpoint))
    }

    /// Send a signed GET. A well-formed rejection by AliDNS is returned as
    /// `Ok(Err(..))` so callers can inspect its code.
    async fn rpc<T: DeserializeOwned>(
        &self,
        action: &str,
        params: &[(&str, String)],
    ) -> Result<Result<T, (StatusCode, AliDnsRejection)>, Error> {
        if self.debug {
            println!(">> {action} {params:?}");
        }
        let url = self.request_url(action, params)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Provider(StatusCode::SERVICE_UNAVAILABLE, format!("{action}: {e}")))?;
        let status = response.status();
        let text = response.text().await.map_err(Self::map_error)?;
        if self.debug {
            println!("<< {status} {text}");
        }
        if status.is_success() {
            serde_json::from_str(&text).map(Ok).map_err(|e| {
                Error::Provider(
                    StatusCode::FAILED_DEPENDENCY,
                    format!("{action}: cannot parse response: {e}"),
                )
            })
        } else {
            match serde_json::from_str::<AliDnsRejection>(&text) {
                Ok(rejection) => Ok(Err((status, rejection))),
                Err(_) => Err(Error::Provider(status, format!("{action}: {text}"))),
            }
        }
    }
}

#[async_trait]
impl AliDnsApi for AliDnsClient {
    async fn describe_domains(&self, page_number: u64) -> Result<DomainPage, Error> {
        let DescribeDomainsResponse {
            domains,
            page_number,
            page_size,
            total_count,
        } = self
            .call(
                "DescribeDomains",
                &[("PageNumber", page_number.to_string())],
            )
            .await?;
        Ok(DomainPage {
            domains: domains.domain,
            page_number,
            page_size,
            total_count,
        })
    }

    async fn describe_domain_records(
        &self,
        domain_name: &str,
        page_size: u64,
    ) -> Result<Vec<DnsRecord>, Error> {
        let response: DescribeDomainRecordsResponse = self
            .call(
                "DescribeDomainRecords",
                &[
                    ("DomainName", domain_name.to_string()),
                    ("PageSize", page_size.to_string()),
                ],
            )
            .await?;
        Ok(response.domain_records.record)
    }

    async fn add_domain_record(
        &self,
        domain_name: &str,
        rr: &str,
        record_type: RecordType,
        value: &str,
        ttl: Option<u32>,
    ) -> Result<Option<RecordId>, Error> {
        let mut params = vec![
            ("DomainName", domain_name.to_string()),
            ("RR", rr.to_string()),
            ("Type", record_type.as_str().to_string()),
            ("Value", value.to_string()),
        ];
        if let Some(ttl) = ttl {
            params.push(("TTL", ttl.to_string()));
        }
        let action = "AddDomainRecord";
        match self.rpc::<AddDomainRecordResponse>(action, &params).await? {
            Ok(AddDomainRecordResponse { record_id }) => Ok(Some(record_id)),
            Err((_, rejection)) if rejection.code == Self::DUPLICATE_RECORD => Ok(None),
            Err((status, rejection)) => Err(rejection.into_error(status, action)),
        }
    }

    async fn delete_domain_record(&self, record_id: &RecordId) -> Result<(), Error> {
        let _: IgnoredAny = self
            .call("DeleteDomainRecord", &[("RecordId", record_id.to_string())])
            .await?;
        Ok(())
    }
}

/// Creates an `AliDnsClient` per access key.
pub struct AliDnsClientFactory {
    debug: bool,
    settings: AliDnsSettings,
}

impl AliDnsClientFactory {
    /// Create a factory using the `[alidns]` section of the solver settings.
    pub fn new(solver_settings: &SolverSettings) -> Self {
        Self {
            debug: solver_settings.debug(),
            settings: solver_settings.alidns().clone(),
        }
    }
}

impl ClientFactory for AliDnsClientFactory {
    fn new_client(
        &self,
        region_id: &str,
        access_key_id: &AccessKeyId,
        access_key_secret: &str,
    ) -> Result<Arc<dyn AliDnsApi>, Error> {
        let client = AliDnsClient::new(
            &self.settings,
            self.debug,
            region_id,
            access_key_id,
            access_key_secret,
        )?;
        Ok(Arc::new(client))
    }
}

/// Error body returned by AliDNS with a non-success status.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AliDnsRejection {
    code: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    request_id: String,
}

impl AliDnsRejection {
    fn into_error(self, status: StatusCode, action: &str) -> Error {
        let Self {
            code,
            message,
            request_id,
        } = self;
        Error::Provider(
            status,
            format!("{action}: {code}: {message} (RequestId {request_id})"),
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeDomainsResponse {
    #[serde(default)]
    domains: DomainList,
    page_number: u64,
    page_size: u64,
    total_count: u64,
}

#[derive(Debug, Default, Deserialize)]
struct DomainList {
    #[serde(default, rename = "Domain")]
    domain: Vec<Domain>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeDomainRecordsResponse {
    #[serde(default)]
    domain_records: RecordList,
}

#[derive(Debug, Default, Deserialize)]
struct RecordList {
    #[serde(default, rename = "Record")]
    record: Vec<DnsRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AddDomainRecordResponse {
    record_id: RecordId,
}
