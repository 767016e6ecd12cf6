// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use serde::{Deserialize, Serialize};

/// A DNS-01 challenge as sent by the host controller.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeRequest {
    /// Unique id of the challenge.
    #[serde(default)]
    pub uid: String,
    /// `Present` or `CleanUp`.
    #[serde(default)]
    pub action: String,
    /// Always `dns-01`.
    #[serde(default, rename = "type")]
    pub challenge_type: String,
    /// Name being validated, e.g. `example.com`.
    #[serde(default)]
    pub dns_name: String,
    /// Value the TXT record must hold.
    pub key: String,
    /// Namespace in which referenced secrets are looked up.
    #[serde(default)]
    pub resource_namespace: String,
    /// Name of the TXT record, e.g. `_acme-challenge.example.com.`.
    #[serde(rename = "resolvedFQDN")]
    pub resolved_fqdn: String,
    /// Zone in which the record should be created, e.g. `example.com.`.
    pub resolved_zone: String,
    /// Not used by this solver.
    #[serde(default)]
    pub allow_ambient_credentials: bool,
    /// Solver configuration blob, decoded by `ProviderConfig::load`.
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}
