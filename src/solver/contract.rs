// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use crate::challenge::ChallengeRequest;
use crate::common::Error;
use crate::credentials::SecretStore;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

/// How a solver reaches the cluster it serves.
pub enum ClusterAccess {
    /// Build a `KubeSecretStore` from a client configuration.
    #[cfg(feature = "k8s")]
    Kube(kube::Config),
    /// Use an already constructed secret store.
    SecretStore(Arc<dyn SecretStore>),
}

/// DNS-01 challenge solver, driven by the host controller.
#[async_trait]
pub trait Solver: Send + Sync {
    /// Solver name, as referenced by issuers. For example, "alidns".
    fn name(&self) -> &'static str;

    /// Publish the challenge's TXT record. Returns the operation's log.
    async fn present(&self, request: &ChallengeRequest) -> Result<String, Error>;

    /// Remove the challenge's TXT record, leaving other values under the
    /// same name in place. Returns the operation's log.
    async fn clean_up(&self, request: &ChallengeRequest) -> Result<String, Error>;

    /// Called once at startup, before any challenge.
    async fn initialize(
        &mut self,
        cluster: ClusterAccess,
        stop: watch::Receiver<bool>,
    ) -> Result<(), Error>;
}
