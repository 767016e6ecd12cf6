// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::SecretStore;
use crate::challenge::{ChallengeRequest, ProviderConfig};
use crate::common::{AccessKeyId, Error};
use crate::dns::AliDnsApi;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Builds a provider client from resolved credentials.
pub trait ClientFactory: Send + Sync {
    /// Create a client for one access key.
    fn new_client(
        &self,
        region_id: &str,
        access_key_id: &AccessKeyId,
        access_key_secret: &str,
    ) -> Result<Arc<dyn AliDnsApi>, Error>;
}

/// Provider clients by access key id.
///
/// Entries are added once and never replaced or expired, so a rotated secret
/// only takes effect after `clear` (which `initialize` does).
pub struct CredentialCache {
    clients: Mutex<HashMap<AccessKeyId, Arc<dyn AliDnsApi>>>,
    factory: Arc<dyn ClientFactory>,
}

impl CredentialCache {
    /// Create an empty cache.
    pub fn new(factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
            factory,
        }
    }

    /// Forget every client.
    pub fn clear(&self) -> Result<(), Error> {
        self.lock()?.clear();
        Ok(())
    }

    /// Return the client for `config.access_key_id`, creating it on first use.
    ///
    /// A cached client is returned as is: the secret in `config` is not
    /// resolved or compared. The lock is not held while the secret is looked
    /// up; if two callers race to create a client, the first one stored wins.
    pub async fn get_client(
        &self,
        request: &ChallengeRequest,
        config: &ProviderConfig,
        secrets: Option<&dyn SecretStore>,
    ) -> Result<Arc<dyn AliDnsApi>, Error> {
        let cached = self.lock()?.get(&config.access_key_id).cloned();
        if let Some(client) = cached {
            return Ok(client);
        }
        let access_key_secret =
            resolve_access_key_secret(&request.resource_namespace, config, secrets).await?;
        let client =
            self.factory
                .new_client(&config.region_id, &config.access_key_id, &access_key_secret)?;
        let mut clients = self.lock()?;
        Ok(Arc::clone(
            clients
                .entry(config.access_key_id.clone())
                .or_insert(client),
        ))
    }

    /// Returns `true` if no client is cached.
    pub fn is_empty(&self) -> Result<bool, Error> {
        Ok(self.lock()?.is_empty())
    }

    /// Number of cached clients.
    pub fn len(&self) -> Result<usize, Error> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<AccessKeyId, Arc<dyn AliDnsApi>>>, Error> {
        self.clients
            .lock()
            .map_err(|_| Error::String("credential cache lock poisoned".to_string()))
    }
}

/// The inline secret if set, otherwise the referenced key of a secret in `namespace`.
pub async fn resolve_access_key_secret(
    namespace: &str,
    config: &ProviderConfig,
    secrets: Option<&dyn SecretStore>,
) -> Result<String, Error> {
    if !config.access_key_secret.is_empty() {
        return Ok(config.access_key_secret.clone());
    }
    let selector = &config.access_key_secret_ref;
    let missing = || {
        Error::CredentialResolution(format!(
            "no accessKeySecret for {:?} in secret '{namespace}/{}'",
            selector.key, selector.name
        ))
    };
    if !selector.is_complete() {
        return Err(missing());
    }
    let secrets = secrets.ok_or_else(|| {
        Error::CredentialResolution("secret store is not initialized".to_string())
    })?;
    let data = secrets
        .get(namespace, &selector.name)
        .await?
        .ok_or_else(|| {
            Error::CredentialResolution(format!(
                "secret '{namespace}/{}' not found",
                selector.name
            ))
        })?;
    let bytes = data.get(&selector.key).ok_or_else(missing)?;
    String::from_utf8(bytes.clone()).map_err(|_| {
        Error::CredentialResolution(format!(
            "accessKeySecret {:?} in secret '{namespace}/{}' is not UTF-8",
            selector.key, selector.name
        ))
    })
}
