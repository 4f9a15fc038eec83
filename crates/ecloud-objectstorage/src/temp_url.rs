//! HMAC-signed temporary URLs for token-free object access.
//!
//! The signature covers `METHOD\nEXPIRES\nPATH` with the shared key
//! registered via `X-Account-Meta-Temp-URL-Key`. Generation is pure: no
//! network I/O, no shared state beyond the endpoint and tenant snapshots.

use crate::client::ObjectStorageClient;
use crate::Result;
use ecloud_core::Error;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

impl ObjectStorageClient {
    /// Generate a signed, time-limited URL granting access to one object.
    ///
    /// `method` is upper-cased into the signature; `expires` is a Unix
    /// timestamp and must be strictly positive. Each missing argument is a
    /// distinct validation failure, checked before any HMAC work.
    pub fn generate_temp_url(
        &self,
        method: &str,
        container: &str,
        object_name: &str,
        key: &str,
        expires: i64,
    ) -> Result<String> {
        let method = method.trim().to_uppercase();
        if method.is_empty() {
            return Err(Error::TempUrlMissingMethod);
        }
        if container.is_empty() {
            return Err(Error::TempUrlMissingContainer);
        }
        if object_name.is_empty() {
            return Err(Error::TempUrlMissingObject);
        }
        if key.is_empty() {
            return Err(Error::TempUrlMissingKey);
        }
        if expires <= 0 {
            return Err(Error::TempUrlInvalidExpiry);
        }

        let mut signed = url::Url::parse(&self.object_path(&[container, object_name]))?;
        let payload = format!("{method}\n{expires}\n{}", signed.path());

        // HMAC accepts keys of any length.
        let mut mac = HmacSha1::new_from_slice(key.as_bytes()).expect("any key length is valid");
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        signed
            .query_pairs_mut()
            .append_pair("temp_url_sig", &signature)
            .append_pair("temp_url_expires", &expires.to_string());
        Ok(signed.to_string())
    }
}
