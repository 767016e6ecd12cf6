// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use crate::common::{AccessKeyId, Error};
use serde::Deserialize;
use std::fmt::{Debug, Formatter};

/// Per-issuer configuration of the solver.
///
/// ```json
/// {
///   "regionId": "cn-hangzhou",
///   "accessKeyId": "LTAI...",
///   "accessKeySecretRef": {"name": "alidns-secret", "key": "access-key-secret"},
///   "ttl": 600
/// }
/// ```
#[derive(Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderConfig {
    /// Region of the AliDNS client, e.g. `cn-hangzhou`.
    pub region_id: String,
    /// Public half of the access key; credentials are cached under it.
    pub access_key_id: AccessKeyId,
    /// Inline secret. Takes precedence over `access_key_secret_ref` when not empty.
    pub access_key_secret: String,
    /// Secret holding the access key secret.
    pub access_key_secret_ref: SecretKeySelector,
    /// TTL of created records. `None` leaves it to the provider's default.
    pub ttl: Option<u32>,
}

/// Selects a key of a secret in the challenge's namespace.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct SecretKeySelector {
    /// Name of the secret.
    pub name: String,
    /// Key within the secret's data.
    pub key: String,
}

impl SecretKeySelector {
    /// Both name and key are set.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.key.is_empty()
    }
}

impl ProviderConfig {
    /// Decode the configuration blob of a challenge. No blob (or `null`)
    /// yields the default configuration.
    pub fn load(config: Option<&serde_json::Value>) -> Result<Self, Error> {
        match config {
            None | Some(serde_json::Value::Null) => Ok(Self::default()),
            Some(value) => Self::deserialize(value).map_err(Error::ConfigDecode),
        }
    }
}

impl Debug for ProviderConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("region_id", &self.region_id)
            .field("access_key_id", &self.access_key_id)
            .field(
                "access_key_secret",
                &if self.access_key_secret.is_empty() {
                    ""
                } else {
                    "<redacted>"
                },
            )
            .field("access_key_secret_ref", &self.access_key_secret_ref)
            .field("ttl", &self.ttl)
            .finish()
    }
}
