//! Store configuration for client apps.
//!
//! The remote table is reached through a Supabase project URL and its public
//! (anon) key. Both come from the process environment; a missing pair is a
//! valid state that leaves the store unconfigured rather than failing startup.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::util::{is_http_url, normalize_text_option};

/// Environment variable holding the Supabase project URL
pub const URL_ENV: &str = "SUPABASE_URL";
/// Environment variable holding the public API key
pub const KEY_ENV: &str = "SUPABASE_KEY";
/// Accepted alternative name for [`KEY_ENV`]
pub const KEY_ENV_ALIAS: &str = "SUPABASE_ANON_KEY";
/// Optional override for the notes table name
pub const TABLE_ENV: &str = "JOTTER_NOTES_TABLE";

/// Table queried when no override is given
pub const DEFAULT_TABLE: &str = "notes";

const REST_PATH: &str = "/rest/v1";

/// Connection parameters for the hosted notes table.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// PostgREST base, always ending in `/rest/v1`
    pub rest_url: String,
    pub api_key: String,
    pub table: String,
}

impl StoreConfig {
    pub fn new(url: impl AsRef<str>, api_key: impl Into<String>) -> StoreResult<Self> {
        let rest_url = normalize_rest_url(url.as_ref())?;
        let api_key = api_key.into().trim().to_string();
        if api_key.is_empty() {
            return Err(StoreError::InvalidConfiguration(
                "Supabase key must not be empty",
            ));
        }

        Ok(Self {
            rest_url,
            api_key,
            table: DEFAULT_TABLE.to_string(),
        })
    }

    /// Use a table other than `notes`
    pub fn with_table(mut self, table: impl AsRef<str>) -> StoreResult<Self> {
        self.table = validate_table_name(table.as_ref())?;
        Ok(self)
    }

    /// Endpoint for the notes table
    #[must_use]
    pub fn table_url(&self) -> String {
        format!("{}/{}", self.rest_url, self.table)
    }

    /// Read configuration from the process environment.
    ///
    /// Returns `Ok(None)` when neither URL nor key is set.
    pub fn from_env() -> StoreResult<Option<Self>> {
        let key = std::env::var(KEY_ENV)
            .ok()
            .or_else(|| std::env::var(KEY_ENV_ALIAS).ok());
        resolve_optional_store_config(
            std::env::var(URL_ENV).ok(),
            key,
            std::env::var(TABLE_ENV).ok(),
        )
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("StoreConfig")
            .field("rest_url", &self.rest_url)
            .field("api_key", &"[REDACTED]")
            .field("table", &self.table)
            .finish()
    }
}

/// Build a config from optional raw values.
///
/// Both absent means "not configured" (`Ok(None)`); only one present is an
/// error so a half-finished `.env` is reported instead of silently ignored.
pub fn resolve_optional_store_config(
    url: Option<String>,
    api_key: Option<String>,
    table: Option<String>,
) -> StoreResult<Option<StoreConfig>> {
    let url = normalize_text_option(url);
    let api_key = normalize_text_option(api_key);

    let config = match (url, api_key) {
        (None, None) => return Ok(None),
        (Some(url), Some(api_key)) => StoreConfig::new(url, api_key)?,
        _ => return Err(StoreError::NotConfigured),
    };

    match normalize_text_option(table) {
        Some(table) => config.with_table(table).map(Some),
        None => Ok(Some(config)),
    }
}

/// Normalize a project URL to its PostgREST base.
pub fn normalize_rest_url(url: &str) -> StoreResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(StoreError::InvalidConfiguration(
            "Supabase URL must not be empty",
        ));
    }
    if !is_http_url(trimmed) {
        return Err(StoreError::InvalidConfiguration(
            "Supabase URL must include http:// or https://",
        ));
    }
    if trimmed.ends_with(REST_PATH) {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{trimmed}{REST_PATH}"))
    }
}

fn validate_table_name(table: &str) -> StoreResult<String> {
    let table = table.trim();
    if table.is_empty() {
        return Err(StoreError::InvalidConfiguration(
            "Table name must not be empty",
        ));
    }
    if !table
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
    {
        return Err(StoreError::InvalidConfiguration(
            "Table name may only contain letters, digits and underscores",
        ));
    }
    Ok(table.to_string())
}
