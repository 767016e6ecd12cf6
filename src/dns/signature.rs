// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Signature version 1.0 of the Alibaba Cloud RPC API.

use crate::common::Error;
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use sha1::Sha1;
use std::collections::BTreeMap;

type HmacSha1 = Hmac<Sha1>;

/// RFC 3986 encoding: everything except `A-Z a-z 0-9 - _ . ~` is escaped.
pub(crate) fn percent_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Parameters sorted by name and joined as `name=value` with `&`.
pub(crate) fn canonicalized_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub(crate) fn string_to_sign(method: &str, canonicalized_query: &str) -> String {
    format!(
        "{method}&{}&{}",
        percent_encode("/"),
        percent_encode(canonicalized_query)
    )
}

/// Base64 HMAC-SHA1 of `string_to_sign`, keyed with the secret followed by `&`.
pub(crate) fn sign(access_key_secret: &str, string_to_sign: &str) -> Result<String, Error> {
    let mut mac = HmacSha1::new_from_slice(format!("{access_key_secret}&").as_bytes())
        .map_err(|e| Error::String(format!("hmac: {e}")))?;
    mac.update(string_to_sign.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Returns the full query string of a signed GET request, `Signature` last.
pub(crate) fn signed_query(
    params: &BTreeMap<String, String>,
    access_key_secret: &str,
) -> Result<String, Error> {
    let query = canonicalized_query(params);
    let signature = sign(access_key_secret, &string_to_sign("GET", &query))?;
    Ok(format!("{query}&Signature={}", percent_encode(&signature)))
}
