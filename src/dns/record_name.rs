// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Strip a single trailing dot, if any.
pub fn un_fqdn(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Short record name (RR) of `fqdn` relative to `zone_name`.
///
/// `_acme-challenge.example.com.` in `example.com` is `_acme-challenge`. When
/// `.zone_name` does not occur in `fqdn`, the whole name is returned without
/// its trailing dot.
pub fn extract_record_name<'a>(fqdn: &'a str, zone_name: &str) -> &'a str {
    if !zone_name.is_empty() {
        // Last occurrence, so `a.example.com.example.com.` in `example.com` is `a.example.com`.
        if let Some(idx) = fqdn.rfind(&format!(".{zone_name}")) {
            return &fqdn[..idx];
        }
    }
    un_fqdn(fqdn)
}
