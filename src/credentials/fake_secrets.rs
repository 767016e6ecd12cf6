// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{ClientFactory, SecretStore};
use crate::common::{AccessKeyId, Error, RecordId};
use crate::dns::{AliDnsApi, DnsRecord, DomainPage, RecordType};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use tokio::sync::Barrier;

/// In-memory secrets by (namespace, name).
#[derive(Default)]
pub(crate) struct FakeSecretStore {
    pub(crate) secrets: Mutex<HashMap<(String, String), BTreeMap<String, Vec<u8>>>>,
    pub(crate) lookups: Mutex<Vec<(String, String)>>,
}

impl FakeSecretStore {
    pub(crate) fn with_secret(namespace: &str, name: &str, key: &str, value: &str) -> Self {
        let store = Self::default();
        store.insert(namespace, name, key, value);
        store
    }

    pub(crate) fn insert(&self, namespace: &str, name: &str, key: &str, value: &str) {
        self.secrets
            .lock()
            .unwrap()
            .entry((namespace.to_string(), name.to_string()))
            .or_default()
            .insert(key.to_string(), value.as_bytes().to_vec());
    }
}

#[async_trait]
impl SecretStore for FakeSecretStore {
    async fn get(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<BTreeMap<String, Vec<u8>>>, Error> {
        self.lookups
            .lock()
            .unwrap()
            .push((namespace.to_string(), name.to_string()));
        Ok(self
            .secrets
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), name.to_string()))
            .cloned())
    }
}

/// Holds every lookup at a barrier until `parties` callers are waiting, then
/// answers from `inner`.
pub(crate) struct BarrierSecretStore {
    pub(crate) barrier: Barrier,
    pub(crate) inner: FakeSecretStore,
}

impl BarrierSecretStore {
    pub(crate) fn new(parties: usize, inner: FakeSecretStore) -> Self {
        Self {
            barrier: Barrier::new(parties),
            inner,
        }
    }
}

#[async_trait]
impl SecretStore for BarrierSecretStore {
    async fn get(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<BTreeMap<String, Vec<u8>>>, Error> {
        self.barrier.wait().await;
        self.inner.get(namespace, name).await
    }
}

/// Hands out one shared provider and records the credentials it was asked for.
pub(crate) struct RecordingFactory {
    pub(crate) api: Arc<dyn AliDnsApi>,
    /// (region, access key id, secret)
    pub(crate) created: Mutex<Vec<(String, String, String)>>,
    /// Wrap `api` in a fresh `Arc` per client so handles can be told apart.
    pub(crate) distinct: bool,
}

impl RecordingFactory {
    pub(crate) fn new(api: Arc<dyn AliDnsApi>) -> Self {
        Self {
            api,
            created: Mutex::new(Vec::new()),
            distinct: false,
        }
    }

    pub(crate) fn created(&self) -> Vec<(String, String, String)> {
        self.created.lock().unwrap().clone()
    }
}

impl ClientFactory for RecordingFactory {
    fn new_client(
        &self,
        region_id: &str,
        access_key_id: &AccessKeyId,
        access_key_secret: &str,
    ) -> Result<Arc<dyn AliDnsApi>, Error> {
        self.created.lock().unwrap().push((
            region_id.to_string(),
            access_key_id.to_string(),
            access_key_secret.to_string(),
        ));
        if self.distinct {
            Ok(Arc::new(Forward(Arc::clone(&self.api))))
        } else {
            Ok(Arc::clone(&self.api))
        }
    }
}

/// Forwards to another provider; gives each client its own allocation.
struct Forward(Arc<dyn AliDnsApi>);

#[async_trait]
impl AliDnsApi for Forward {
    async fn describe_domains(&self, page_number: u64) -> Result<DomainPage, Error> {
        self.0.describe_domains(page_number).await
    }

    async fn describe_domain_records(
        &self,
        domain_name: &str,
        page_size: u64,
    ) -> Result<Vec<DnsRecord>, Error> {
        self.0.describe_domain_records(domain_name, page_size).await
    }

    async fn add_domain_record(
        &self,
        domain_name: &str,
        rr: &str,
        record_type: RecordType,
        value: &str,
        ttl: Option<u32>,
    ) -> Result<Option<RecordId>, Error> {
        self.0
            .add_domain_record(domain_name, rr, record_type, value, ttl)
            .await
    }

    async fn delete_domain_record(&self, record_id: &RecordId) -> Result<(), Error> {
        self.0.delete_domain_record(record_id).await
    }
}
