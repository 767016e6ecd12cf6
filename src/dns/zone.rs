// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::record_name::un_fqdn;
use super::{AliDnsApi, Domain, DomainPage};
use crate::common::Error;
use async_trait::async_trait;

/// Finds the authoritative zone of a name.
#[async_trait]
pub trait ZoneFinder: Send + Sync {
    /// Returns the nearest enclosing zone that has an SOA record, fully
    /// qualified (e.g. `example.com.`).
    async fn find_zone_by_fqdn(&self, fqdn: &str) -> Result<String, Error>;
}

/// Cursor over the pages of `DescribeDomains`.
///
/// Starts at page 1 and stops once the requested page number times
/// `page_size` reaches the total reported by the provider, i.e. after `ceil(total / page_size)` pages
/// (at least one, since the total is only known from a response).
#[derive(Clone, Debug)]
pub struct DomainPages {
    next_page: Option<u64>,
}

impl Default for DomainPages {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainPages {
    /// A cursor positioned on page 1.
    pub fn new() -> Self {
        Self { next_page: Some(1) }
    }

    /// Page to request next, or `None` when the walk is complete.
    pub fn next_page(&self) -> Option<u64> {
        self.next_page
    }

    /// Record the response to the page returned by `next_page`.
    pub fn advance(&mut self, page: &DomainPage) {
        self.next_page = match self.next_page {
            // Keyed on the page requested, not the one echoed back. A zero
            // page size would never reach the total.
            Some(requested)
                if page.page_size > 0
                    && requested.saturating_mul(page.page_size) < page.total_count =>
            {
                Some(requested + 1)
            }
            _ => None,
        };
    }

    /// Walk the remaining pages and return every domain on them.
    pub async fn collect(mut self, api: &dyn AliDnsApi) -> Result<Vec<Domain>, Error> {
        let mut domains = Vec::new();
        while let Some(page_number) = self.next_page() {
            let page = api.describe_domains(page_number).await?;
            self.advance(&page);
            domains.extend(page.domains);
        }
        Ok(domains)
    }
}

/// Find the AliDNS domain that is authoritative for `zone`.
pub async fn get_hosted_zone(
    api: &dyn AliDnsApi,
    zones: &dyn ZoneFinder,
    zone: &str,
) -> Result<Domain, Error> {
    let domains = DomainPages::new().collect(api).await?;
    let auth_zone = zones.find_zone_by_fqdn(zone).await?;
    let domain_name = un_fqdn(&auth_zone);
    domains
        .into_iter()
        .find(|d| d.domain_name == domain_name)
        .ok_or_else(|| Error::ZoneNotFound {
            auth_zone: auth_zone.clone(),
            zone: zone.to_string(),
        })
}

#[cfg(feature = "resolver")]
pub use self::hickory::HickoryZoneFinder;

#[cfg(feature = "resolver")]
mod hickory {
    use super::ZoneFinder;
    use crate::common::Error;
    use async_trait::async_trait;
    use hickory_resolver::error::{ResolveError, ResolveErrorKind};
    use hickory_resolver::proto::rr::{Name, RecordType};
    use hickory_resolver::TokioAsyncResolver;
    use std::str::FromStr;

    /// `ZoneFinder` that walks up the labels of a name with SOA queries
    /// against the system's recursive resolvers.
    pub struct HickoryZoneFinder {
        resolver: TokioAsyncResolver,
    }

    impl HickoryZoneFinder {
        /// Create a finder using `/etc/resolv.conf` (or the platform equivalent).
        pub fn from_system_conf() -> Result<Self, Error> {
            let resolver = TokioAsyncResolver::tokio_from_system_conf().map_err(Self::map_error)?;
            Ok(Self { resolver })
        }

        fn map_error(e: ResolveError) -> Error {
            Error::Resolve(format!("{e}"))
        }
    }

    #[async_trait]
    impl ZoneFinder for HickoryZoneFinder {
        async fn find_zone_by_fqdn(&self, fqdn: &str) -> Result<String, Error> {
            let mut name = Name::from_str(fqdn)
                .map_err(|e| Error::Resolve(format!("{fqdn}: {e}")))?;
            name.set_fqdn(true);
            loop {
                match self.resolver.soa_lookup(name.clone()).await {
                    Ok(lookup) => {
                        // A CNAME may precede the SOA in the answer.
                        if let Some(record) = lookup
                            .as_lookup()
                            .records()
                            .iter()
                            .find(|r| r.record_type() == RecordType::SOA)
                        {
                            break Ok(record.name().to_utf8());
                        }
                    }
                    Err(e) if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) => {}
                    Err(e) => break Err(Self::map_error(e)),
                }
                if name.num_labels() > 1 {
                    name = name.base_name();
                } else {
                    break Err(Error::Resolve(format!("no SOA record found for {fqdn}")));
                }
            }
        }
    }
}
