// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

use super::Error;
use serde::Deserialize;
#[allow(deprecated)]
use std::env::home_dir;
use std::fs::read_to_string;

/// Startup settings for the solver, read from TOML.
///
/// ```toml
/// [alidns]
/// group_name = "acme.example.com"
/// endpoint = "https://alidns.aliyuncs.com/"
/// timeout_secs = 10
/// ```
#[derive(Debug)]
pub struct SolverSettings {
    alidns: AliDnsSettings,
    debug_enabled: bool,
}

/// The `[alidns]` section of `SolverSettings`.
#[derive(Clone, Debug, Deserialize)]
pub struct AliDnsSettings {
    /// API group under which the host serves this solver.
    pub group_name: String,
    /// Base URL of the AliDNS RPC API.
    #[serde(default = "AliDnsSettings::default_endpoint")]
    pub endpoint: String,
    /// Per-request timeout of provider calls.
    #[serde(default = "AliDnsSettings::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl AliDnsSettings {
    const ENDPOINT: &'static str = "https://alidns.aliyuncs.com/";
    const TIMEOUT_SECS: u64 = 10;

    fn default_endpoint() -> String {
        Self::ENDPOINT.to_string()
    }

    fn default_timeout_secs() -> u64 {
        Self::TIMEOUT_SECS
    }
}

impl SolverSettings {
    /// Creates a settings builder.
    pub fn builder() -> SolverSettingsBuilder {
        SolverSettingsBuilder {
            debug_enabled: false,
            error: None,
            toml: None,
        }
    }

    /// Returns the `[alidns]` section.
    pub fn alidns(&self) -> &AliDnsSettings {
        &self.alidns
    }

    /// Returns `true` if debug is enabled.
    pub fn debug(&self) -> bool {
        self.debug_enabled
    }
}

/// Builds `SolverSettings`; see `SolverSettings::builder`.
pub struct SolverSettingsBuilder {
    debug_enabled: bool,
    error: Option<Error>,
    toml: Option<String>,
}

impl SolverSettingsBuilder {
    /// Validates the settings. `group_name` must not be empty.
    pub fn build(self) -> Result<SolverSettings, Error> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let toml = self
            .toml
            .ok_or_else(|| Error::String("settings not set".to_string()))?;

        #[derive(Deserialize)]
        struct SettingsToml {
            alidns: Option<AliDnsSettings>,
        }
        let SettingsToml { alidns } = toml::from_str(&toml)
            .map_err(|e: toml::de::Error| Error::String(format!("toml: {e}")))?;
        let alidns = alidns.ok_or_else(|| {
            Error::String("[alidns] section must be specified".to_string())
        })?;
        if alidns.group_name.trim().is_empty() {
            return Err(Error::String(
                "alidns.group_name must be specified".to_string(),
            ));
        }
        if alidns.timeout_secs == 0 {
            return Err(Error::String(
                "alidns.timeout_secs must be positive".to_string(),
            ));
        }
        reqwest::Url::parse(&alidns.endpoint).map_err(|e| {
            Error::String(format!("alidns.endpoint {}: {e}", alidns.endpoint))
        })?;

        Ok(SolverSettings {
            alidns,
            debug_enabled: self.debug_enabled,
        })
    }

    /// Echo log lines and provider traffic to stdout.
    pub fn debug(self, debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            ..self
        }
    }

    /// Reads `file_name` from the home directory, falling back to the working directory.
    pub fn toml_file(self, file_name: &str) -> Self {
        #[allow(deprecated)]
        let home_path = home_dir().and_then(|pathbuf| {
            pathbuf
                .to_str()
                .map(|path| format!("{path}/{file_name}"))
        });
        let local_path = format!("./{file_name}");
        if let Some(toml) = home_path.and_then(|path| read_to_string(path).ok()) {
            Self {
                error: None,
                toml: Some(toml),
                ..self
            }
        } else {
            match read_to_string(&local_path) {
                Ok(toml) => Self {
                    error: None,
                    toml: Some(toml),
                    ..self
                },
                Err(_) => Self {
                    error: Some(Error::String(format!("{local_path}: cannot read"))),
                    toml: None,
                    ..self
                },
            }
        }
    }

    /// Use `toml` as the settings text.
    pub fn toml_str(self, toml: &str) -> Self {
        self.toml_string(toml.to_string())
    }

    /// Use `toml` as the settings text.
    pub fn toml_string(self, toml: String) -> Self {
        Self {
            error: None,
            toml: Some(toml),
            ..self
        }
    }
}
