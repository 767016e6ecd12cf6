// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::common::Error;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Namespaced secret lookup.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Returns the data of secret `name` in `namespace`, or `None` if there is
    /// no such secret.
    async fn get(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<BTreeMap<String, Vec<u8>>>, Error>;
}

#[cfg(feature = "k8s")]
pub use self::kube_store::KubeSecretStore;

#[cfg(feature = "k8s")]
mod kube_store {
    use super::SecretStore;
    use crate::common::Error;
    use async_trait::async_trait;
    use k8s_openapi::api::core::v1::Secret;
    use kube::{Api, Client, Config};
    use std::collections::BTreeMap;

    /// `SecretStore` backed by Kubernetes `Secret` resources.
    pub struct KubeSecretStore {
        client: Client,
    }

    impl KubeSecretStore {
        /// Create a store from a cluster client configuration. Must be called
        /// from within a Tokio runtime.
        pub fn new(config: Config) -> Result<Self, Error> {
            let client = Client::try_from(config)
                .map_err(|e| Error::String(format!("kubernetes client: {e}")))?;
            Ok(Self { client })
        }
    }

    #[async_trait]
    impl SecretStore for KubeSecretStore {
        async fn get(
            &self,
            namespace: &str,
            name: &str,
        ) -> Result<Option<BTreeMap<String, Vec<u8>>>, Error> {
            let api: Api<Secret> = Api::namespaced(self.client.clone(), namespace);
            let secret = api.get_opt(name).await.map_err(|e| {
                Error::CredentialResolution(format!("get secret '{namespace}/{name}': {e}"))
            })?;
            Ok(secret.map(|secret| {
                secret
                    .data
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(key, value)| (key, value.0))
                    .collect()
            }))
        }
    }
}
