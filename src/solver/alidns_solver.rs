// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::{ClusterAccess, Solver};
use crate::challenge::{ChallengeRequest, ProviderConfig};
use crate::common::{Error, SolverSettings};
#[cfg(feature = "k8s")]
use crate::credentials::KubeSecretStore;
use crate::credentials::{ClientFactory, CredentialCache, SecretStore};
#[cfg(feature = "resolver")]
use crate::dns::{AliDnsClientFactory, HickoryZoneFinder};
use crate::dns::{extract_record_name, get_hosted_zone, AliDnsApi, Domain, RecordType, ZoneFinder};
use crate::log::StringLogger;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;

/// Solves DNS-01 challenges with TXT records in AliDNS.
pub struct AliDnsSolver {
    credentials: CredentialCache,
    debug: bool,
    group_name: String,
    secrets: Option<Arc<dyn SecretStore>>,
    stop: Option<watch::Receiver<bool>>,
    zones: Arc<dyn ZoneFinder>,
}

/// Where a challenge's record lives.
struct Target {
    api: Arc<dyn AliDnsApi>,
    config: ProviderConfig,
    domain: Domain,
    rr: String,
}

impl AliDnsSolver {
    /// Name under which issuers reference this solver.
    pub const NAME: &'static str = "alidns";
    /// Records listed per cleanup. Only the first page is examined.
    const RECORD_PAGE_SIZE: u64 = 500;

    /// Create a solver that talks to AliDNS and finds zones with the system resolver.
    #[cfg(feature = "resolver")]
    pub fn new(settings: &SolverSettings) -> Result<Self, Error> {
        let zones = HickoryZoneFinder::from_system_conf()?;
        Ok(Self::with_parts(
            settings,
            Arc::new(AliDnsClientFactory::new(settings)),
            Arc::new(zones),
        ))
    }

    /// Create a solver from its collaborators.
    pub fn with_parts(
        settings: &SolverSettings,
        factory: Arc<dyn ClientFactory>,
        zones: Arc<dyn ZoneFinder>,
    ) -> Self {
        Self {
            credentials: CredentialCache::new(factory),
            debug: settings.debug(),
            group_name: settings.alidns().group_name.clone(),
            secrets: None,
            stop: None,
            zones,
        }
    }

    /// API group under which the host serves this solver.
    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Number of provider clients created since `initialize`.
    pub fn cached_clients(&self) -> Result<usize, Error> {
        self.credentials.len()
    }

    fn is_stopping(&self) -> bool {
        self.stop
            .as_ref()
            .map(|stop| *stop.borrow())
            .unwrap_or(false)
    }

    /// Steps shared by `present` and `clean_up`: configuration, client, zone and record name.
    async fn target(
        &self,
        request: &ChallengeRequest,
        logger: &StringLogger,
    ) -> Result<Target, Error> {
        if self.is_stopping() {
            logger.warn(format!("{}: termination requested", request.uid));
        }
        let config = logger.call(
            "decode config".to_string(),
            ProviderConfig::load(request.config.as_ref()),
        )?;
        logger.trace(format!("decoded configuration {config:?}"));
        logger.trace(format!(
            "fqdn:[{}] zone:[{}]",
            request.resolved_fqdn, request.resolved_zone
        ));

        let api = logger.call(
            format!("client for access key {}", config.access_key_id),
            self.credentials
                .get_client(request, &config, self.secrets.as_deref())
                .await,
        )?;
        let domain = logger.call(
            format!("hosted zone for {}", request.resolved_zone),
            get_hosted_zone(api.as_ref(), self.zones.as_ref(), &request.resolved_zone).await,
        )?;
        let rr = extract_record_name(&request.resolved_fqdn, &domain.domain_name).to_string();
        logger.trace(format!(
            "record {rr} in {} (id {})",
            domain.domain_name, domain.domain_id
        ));
        Ok(Target {
            api,
            config,
            domain,
            rr,
        })
    }
}

#[async_trait]
impl Solver for AliDnsSolver {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn present(&self, request: &ChallengeRequest) -> Result<String, Error> {
        let logger = StringLogger::new(self.debug);
        let Target {
            api,
            config,
            domain,
            rr,
        } = self.target(request, &logger).await?;

        let created = logger.call(
            format!("add TXT {rr} to {}", domain.domain_name),
            api.add_domain_record(
                &domain.domain_name,
                &rr,
                RecordType::Txt,
                &request.key,
                config.ttl,
            )
            .await,
        )?;
        match created {
            Some(record_id) => logger.trace(format!("created record {record_id}")),
            None => logger.trace(format!("TXT {rr} already holds the value")),
        }
        Ok(logger.to_string())
    }

    async fn clean_up(&self, request: &ChallengeRequest) -> Result<String, Error> {
        let logger = StringLogger::new(self.debug);
        let Target {
            api, domain, rr, ..
        } = self.target(request, &logger).await?;

        let records = logger.call(
            format!("list records of {}", domain.domain_name),
            api.describe_domain_records(&domain.domain_name, Self::RECORD_PAGE_SIZE)
                .await,
        )?;
        // Other challenges may share the name; only the exact value is ours.
        let matching: Vec<_> = records
            .into_iter()
            .filter(|record| record.rr == rr)
            .filter(|record| record.record_type == RecordType::Txt && record.value == request.key)
            .collect();
        logger.trace(format!("{} TXT {rr} records to delete", matching.len()));
        for record in matching.iter() {
            logger.indent(format!("{} {:?}", record.record_id, record.value), "  ");
        }

        for record in matching {
            logger.call(
                format!("delete record {}", record.record_id),
                api.delete_domain_record(&record.record_id).await,
            )?;
        }
        Ok(logger.to_string())
    }

    async fn initialize(
        &mut self,
        cluster: ClusterAccess,
        stop: watch::Receiver<bool>,
    ) -> Result<(), Error> {
        let secrets: Arc<dyn SecretStore> = match cluster {
            #[cfg(feature = "k8s")]
            ClusterAccess::Kube(config) => Arc::new(KubeSecretStore::new(config)?),
            ClusterAccess::SecretStore(secrets) => secrets,
        };
        self.credentials.clear()?;
        self.secrets = Some(secrets);
        self.stop = Some(stop);
        Ok(())
    }
}
