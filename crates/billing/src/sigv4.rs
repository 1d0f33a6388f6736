//! AWS Signature Version 4 request signing.
//!
//! Only what the Cost Explorer client needs: a single request with a fixed
//! header set and a fully buffered body.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// A request about to be signed.
#[derive(Debug, Clone)]
pub struct SigningRequest<'a> {
    /// HTTP method, upper case.
    pub method: &'a str,
    /// URI path, already normalized (e.g. `/`).
    pub path: &'a str,
    /// Canonical query string (sorted, encoded), possibly empty.
    pub query: &'a str,
    /// Headers to sign. `host` and `x-amz-date` must be present.
    pub headers: &'a [(&'a str, &'a str)],
    /// Request body.
    pub payload: &'a [u8],
}

/// Credential scope parameters.
#[derive(Debug, Clone, Copy)]
pub struct SigningParams<'a> {
    /// Access key ID.
    pub access_key_id: &'a str,
    /// Secret access key.
    pub secret_access_key: &'a str,
    /// Region, e.g. `us-east-1`.
    pub region: &'a str,
    /// Service name, e.g. `ce`.
    pub service: &'a str,
}

/// Formats a timestamp as `YYYYMMDD'T'HHMMSS'Z'`.
#[must_use]
pub fn amz_date(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Builds the canonical request string.
#[must_use]
pub fn canonical_request(request: &SigningRequest<'_>) -> (String, String) {
    let mut headers: Vec<(String, String)> = request
        .headers
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.trim().to_string()))
        .collect();
    headers.sort();

    let canonical_headers: String = headers
        .iter()
        .map(|(k, v)| format!("{k}:{v}\n"))
        .collect();
    let signed_headers = headers
        .iter()
        .map(|(k, _)| k.as_str())
        .collect::<Vec<_>>()
        .join(";");

    let canonical = format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        request.method,
        request.path,
        request.query,
        canonical_headers,
        signed_headers,
        hex::encode(Sha256::digest(request.payload)),
    );
    (canonical, signed_headers)
}

/// Derives the signing key for `date` (`YYYYMMDD`).
///
/// # Errors
///
/// Returns an error message if the HMAC cannot be keyed.
pub fn signing_key(
    secret_access_key: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, String> {
    let k_date = hmac(format!("AWS4{secret_access_key}").as_bytes(), date.as_bytes())?;
    let k_region = hmac(&k_date, region.as_bytes())?;
    let k_service = hmac(&k_region, service.as_bytes())?;
    hmac(&k_service, b"aws4_request")
}

/// Computes the `Authorization` header value for `request`.
///
/// `amz_date` must be the same value sent in the `x-amz-date` header.
///
/// # Errors
///
/// Returns an error message if `amz_date` is malformed or signing fails.
pub fn authorization(
    request: &SigningRequest<'_>,
    params: &SigningParams<'_>,
    amz_date: &str,
) -> Result<String, String> {
    let date = amz_date
        .get(..8)
        .ok_or_else(|| format!("invalid x-amz-date '{amz_date}'"))?;
    let scope = format!(
        "{date}/{}/{}/aws4_request",
        params.region, params.service
    );

    let (canonical, signed_headers) = canonical_request(request);
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        hex::encode(Sha256::digest(canonical.as_bytes()))
    );

    let key = signing_key(
        params.secret_access_key,
        date,
        params.region,
        params.service,
    )?;
    let signature = hex::encode(hmac(&key, string_to_sign.as_bytes())?);

    Ok(format!(
        "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
        params.access_key_id
    ))
}

fn hmac(key: &[u8], data: &[u8]) -> Result<Vec<u8>, String> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|e| e.to_string())?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
