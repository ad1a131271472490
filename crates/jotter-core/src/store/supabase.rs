//! PostgREST-backed note store for a Supabase project.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use super::{NewNote, NoteChanges, NoteStore};
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::models::{Note, NoteId};
use crate::util::compact_text;

const CONNECT_TIMEOUT_SECS: u64 = 5;
const ORDER_NEWEST_FIRST: &str = "updated_at.desc";

/// Note store backed by a hosted Supabase table.
///
/// Built once at startup. Without configuration every call fails with
/// [`StoreError::NotConfigured`] so the UI can still render.
#[derive(Clone)]
pub struct SupabaseNoteStore {
    config: Option<StoreConfig>,
    client: Client,
}

impl SupabaseNoteStore {
    pub fn new(config: Option<StoreConfig>) -> StoreResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()?;

        match &config {
            Some(config) => tracing::info!(
                "Note store configured: {} (table {})",
                config.rest_url,
                config.table
            ),
            None => tracing::warn!(
                "Missing Supabase config. Set SUPABASE_URL and SUPABASE_KEY; note operations will fail until then."
            ),
        }

        Ok(Self { config, client })
    }

    /// A store that fails every call with [`StoreError::NotConfigured`]
    pub fn unconfigured() -> StoreResult<Self> {
        Self::new(None)
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    fn config(&self) -> StoreResult<&StoreConfig> {
        self.config.as_ref().ok_or(StoreError::NotConfigured)
    }

    fn authorized(&self, request: RequestBuilder) -> StoreResult<RequestBuilder> {
        let config = self.config()?;
        Ok(request
            .header("apikey", &config.api_key)
            .bearer_auth(&config.api_key)
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    fn table_url(&self) -> StoreResult<String> {
        Ok(self.config()?.table_url())
    }

    async fn send_for_rows(&self, request: RequestBuilder) -> StoreResult<Vec<Note>> {
        let response = self.authorized(request)?.send().await?;
        let body = read_success_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn send_for_single(&self, request: RequestBuilder) -> StoreResult<Option<Note>> {
        let request = request.header("Prefer", "return=representation");
        Ok(self.send_for_rows(request).await?.into_iter().next())
    }
}

impl NoteStore for SupabaseNoteStore {
    async fn list(&self, filter: Option<&str>) -> StoreResult<Vec<Note>> {
        let mut query = vec![("select", "*".to_string()), ("order", ORDER_NEWEST_FIRST.to_string())];
        if let Some(filter) = filter.and_then(search_filter) {
            query.push(("or", filter));
        }

        tracing::debug!("Listing notes (filtered: {})", query.len() > 2);
        let request = self.client.get(self.table_url()?).query(&query);
        self.send_for_rows(request).await
    }

    async fn insert(&self, note: NewNote) -> StoreResult<Note> {
        let request = self.client.post(self.table_url()?).json(&[note]);
        self.send_for_single(request)
            .await?
            .ok_or(StoreError::EmptyResponse)
    }

    async fn update(&self, id: &NoteId, changes: NoteChanges) -> StoreResult<Note> {
        let request = self
            .client
            .patch(self.table_url()?)
            .query(&[("id", eq_filter(id))])
            .json(&changes);
        self.send_for_single(request)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn delete(&self, id: &NoteId) -> StoreResult<()> {
        let request = self
            .client
            .delete(self.table_url()?)
            .query(&[("id", eq_filter(id))]);
        let response = self.authorized(request)?.send().await?;
        read_success_body(response).await?;
        Ok(())
    }
}

/// PostgREST `or` filter matching `text` in title or content, ignoring case.
///
/// Returns `None` for blank input. LIKE wildcards typed by the user are
/// escaped, and the pattern is double-quoted so commas, dots and parentheses
/// don't break the filter grammar.
pub fn search_filter(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let pattern = quote_value(&format!("*{}*", escape_like(text)));
    Some(format!("(title.ilike.{pattern},content.ilike.{pattern})"))
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn quote_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        if matches!(ch, '\\' | '"') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

fn eq_filter(id: &NoteId) -> String {
    format!("eq.{id}")
}

async fn read_success_body(response: Response) -> StoreResult<String> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(StoreError::Api {
            status: status.as_u16(),
            message: parse_api_error(status, &body),
        })
    }
}

#[derive(Debug, Deserialize)]
struct PostgrestErrorResponse {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<PostgrestErrorResponse>(body) {
        if let Some(message) = payload.message {
            let mut rendered = message.trim().to_string();
            for extra in [payload.details, payload.hint].into_iter().flatten() {
                let extra = extra.trim();
                if !extra.is_empty() {
                    rendered.push_str(" - ");
                    rendered.push_str(extra);
                }
            }
            return rendered;
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_filter_ors_title_and_content() {
        assert_eq!(
            search_filter("egg").as_deref(),
            Some(r#"(title.ilike."*egg*",content.ilike."*egg*")"#)
        );
    }

    #[test]
    fn search_filter_skips_blank_input() {
        assert_eq!(search_filter("   "), None);
    }

    #[test]
    fn search_filter_trims_input() {
        assert_eq!(
            search_filter("  milk ").as_deref(),
            Some(r#"(title.ilike."*milk*",content.ilike."*milk*")"#)
        );
    }

    #[test]
    fn search_filter_quotes_reserved_characters() {
        let filter = search_filter("a,b (c)").unwrap();
        assert!(filter.contains(r#""*a,b (c)*""#));
    }

    #[test]
    fn search_filter_escapes_like_wildcards_and_quotes() {
        let filter = search_filter(r#"50%_"x""#).unwrap();
        assert!(filter.contains(r#""*50\\%\\_\"x\"*""#));
    }

    #[test]
    fn parse_api_error_prefers_postgrest_message() {
        let body = r#"{"code":"42P01","message":"relation \"public.notes\" does not exist","details":null,"hint":"Create the table"}"#;
        assert_eq!(
            parse_api_error(StatusCode::NOT_FOUND, body),
            "relation \"public.notes\" does not exist - Create the table"
        );
    }

    #[test]
    fn parse_api_error_falls_back_to_status() {
        assert_eq!(parse_api_error(StatusCode::BAD_GATEWAY, "  "), "HTTP 502");
        assert_eq!(
            parse_api_error(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
    }

    #[test]
    fn eq_filter_formats_id() {
        assert_eq!(eq_filter(&NoteId::from("abc")), "eq.abc");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn unconfigured_store_fails_every_call() {
        let store = SupabaseNoteStore::unconfigured().unwrap();
        assert!(!store.is_configured());
        assert!(matches!(store.list(None).await, Err(StoreError::NotConfigured)));
        assert!(matches!(
            store.delete(&NoteId::from("1")).await,
            Err(StoreError::NotConfigured)
        ));
    }
}
