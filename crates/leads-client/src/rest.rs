//! REST implementation of [`LeadsProvider`].
//!
//! `RestLeadsClient` wraps a `reqwest::Client` and translates every trait
//! method into the corresponding HTTP call against the CRM backend. Each
//! call re-validates the stored session and rebuilds the auth headers, so a
//! token that expired mid-screen is caught here rather than as a backend
//! 401. Requests are sent exactly once; there is no retry layer.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Client, RequestBuilder, Response};

use lw_domain::config::{ApiConfig, Config};
use lw_domain::error::{Error, Result};
use lw_domain::trace::TraceEvent;
use lw_session::{build_auth_context, SessionValidator, TokenStore};

use crate::hierarchy::{attach_non_assigned_if_permitted, to_tree};
use crate::options::{tag_page, to_filter_options};
use crate::provider::LeadsProvider;
use crate::query::compose_leads_request;
use crate::types::{
    AgentNode, CampaignLeadsRequest, CampaignLeadsResponse, CampaignsResponse, DataEnvelope,
    FilterOption, FilterOptions, LeadsResponse, OptionRow, PaginationParams, ScopeOverrides,
    StaffRow, TagPage, TagsResponse, User,
};

/// Hard deadline for the campaign list; the backend aggregates counts and
/// can stall far past any sensible interactive wait.
const CAMPAIGN_LIST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cap on response-body text carried into errors and logs.
const BODY_SNIPPET_MAX: usize = 512;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Client
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A REST-based client for the CRM leads module.
///
/// Created once and reused for the lifetime of the app session. The
/// underlying `reqwest::Client` maintains a connection pool.
#[derive(Clone)]
pub struct RestLeadsClient {
    http: Client,
    api: ApiConfig,
    store: Arc<dyn TokenStore>,
    validator: SessionValidator,
}

impl RestLeadsClient {
    /// Build a new client from the shared [`Config`] and a token store.
    pub fn new(cfg: &Config, store: Arc<dyn TokenStore>) -> Result<Self> {
        let mut builder = Client::builder();
        // timeout_ms == 0 leaves the client without a blanket deadline.
        if cfg.api.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(cfg.api.timeout_ms));
        }
        let http = builder.build().map_err(|e| Error::Http(e.to_string()))?;

        let mut api = cfg.api.clone();
        api.base_url = api.base_url.trim_end_matches('/').to_owned();

        Ok(Self {
            http,
            api,
            validator: SessionValidator::new(store.clone()),
            store,
        })
    }

    // ── request helpers ──────────────────────────────────────────────

    /// Build the full URL for a path like `/api/Lead/get`.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api.base_url, path)
    }

    /// Validate the stored session and assemble the auth headers. Runs
    /// before every network call; an invalid session never leaves the
    /// device.
    fn authed(&self) -> Result<HeaderMap> {
        let state = self.validator.check();
        if let Some(notice) = state.user_message() {
            return Err(Error::Auth(notice.to_owned()));
        }
        Ok(build_auth_context(self.store.as_ref(), &self.api)?.headers)
    }

    /// Send one request, emit the trace event, and map non-2xx statuses
    /// onto domain errors.
    async fn execute(&self, endpoint: &str, rb: RequestBuilder) -> Result<Response> {
        let start = Instant::now();
        let result = rb.send().await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                TraceEvent::ApiCall {
                    endpoint: endpoint.to_owned(),
                    status: e.status().map(|s| s.as_u16()).unwrap_or(0),
                    duration_ms,
                }
                .emit();
                return Err(from_reqwest(e));
            }
        };

        let status = resp.status();
        TraceEvent::ApiCall {
            endpoint: endpoint.to_owned(),
            status: status.as_u16(),
            duration_ms,
        }
        .emit();

        if status.is_success() {
            return Ok(resp);
        }

        // Every non-2xx surfaces as Api, 401 included: only the local
        // validator decides session death and clears storage.
        let url = resp.url().to_string();
        let body = snippet(&resp.text().await.unwrap_or_default());
        tracing::error!(
            endpoint,
            status = status.as_u16(),
            url = %url,
            body = %body,
            "lead api request failed"
        );
        Err(Error::Api {
            status: status.as_u16(),
            url,
            body,
        })
    }

    // ── best-effort fetches ──────────────────────────────────────────

    async fn try_options(&self, path: &str, endpoint: &str) -> Result<Vec<FilterOption>> {
        let headers = self.authed()?;
        let url = self.url(path);
        let resp = self.execute(endpoint, self.http.get(&url).headers(headers)).await?;
        let envelope: DataEnvelope<OptionRow> = read_json(resp, endpoint).await?;
        Ok(to_filter_options(envelope.data))
    }

    async fn try_tags(&self, pagination: PaginationParams, search: Option<&str>) -> Result<TagPage> {
        let headers = self.authed()?;
        let url = self.url("/api/tags/get");

        let mut query: Vec<(&str, String)> = vec![
            ("page", pagination.wire_page().to_string()),
            ("limit", pagination.limit.to_string()),
        ];
        if let Some(term) = search {
            let term = term.trim();
            if !term.is_empty() {
                query.push(("search", term.to_owned()));
            }
        }

        let resp = self
            .execute(
                "GET /api/tags/get",
                self.http.get(&url).headers(headers).query(&query),
            )
            .await?;
        let parsed: TagsResponse = read_json(resp, "GET /api/tags/get").await?;
        Ok(tag_page(parsed, pagination))
    }

    async fn try_staff_rows(&self) -> Result<Vec<StaffRow>> {
        let headers = self.authed()?;
        let url = self.url("/api/staff/get");
        let resp = self
            .execute(
                "GET /api/staff/get",
                self.http
                    .get(&url)
                    .headers(headers)
                    .query(&[("preserveHierarchy", "true")]),
            )
            .await?;
        let envelope: DataEnvelope<StaffRow> = read_json(resp, "GET /api/staff/get").await?;
        Ok(envelope.data)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Trait implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[async_trait]
impl LeadsProvider for RestLeadsClient {
    async fn leads(
        &self,
        user: &User,
        filters: &FilterOptions,
        search_text: &str,
        pagination: PaginationParams,
        overrides: &ScopeOverrides,
    ) -> Result<LeadsResponse> {
        let headers = self.authed()?;
        let body = compose_leads_request(user, filters, search_text, pagination, overrides)?;

        let url = self.url("/api/Lead/get");
        let resp = self
            .execute(
                "POST /api/Lead/get",
                self.http.post(&url).headers(headers).json(&body),
            )
            .await?;
        read_json(resp, "POST /api/Lead/get").await
    }

    async fn statuses(&self) -> Vec<FilterOption> {
        match self.try_options("/api/Status/get", "GET /api/Status/get").await {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!(error = %e, "status options unavailable, picker left empty");
                Vec::new()
            }
        }
    }

    async fn sources(&self) -> Vec<FilterOption> {
        match self.try_options("/api/Source/get", "GET /api/Source/get").await {
            Ok(options) => options,
            Err(e) => {
                tracing::warn!(error = %e, "source options unavailable, picker left empty");
                Vec::new()
            }
        }
    }

    async fn tags(&self, pagination: PaginationParams, search: Option<&str>) -> TagPage {
        match self.try_tags(pagination, search).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(error = %e, "tag options unavailable, picker left empty");
                TagPage::empty()
            }
        }
    }

    async fn agent_tree(&self, user: &User) -> Vec<AgentNode> {
        match self.try_staff_rows().await {
            Ok(rows) => attach_non_assigned_if_permitted(to_tree(&rows), user),
            Err(e) => {
                tracing::warn!(error = %e, "staff hierarchy unavailable, picker left empty");
                Vec::new()
            }
        }
    }

    async fn campaign_leads(
        &self,
        campaign_name: &str,
        pagination: PaginationParams,
    ) -> Result<CampaignLeadsResponse> {
        let headers = self.authed()?;
        let body = CampaignLeadsRequest {
            campaign_name: campaign_name.to_owned(),
            page: pagination.wire_page(),
            limit: pagination.limit,
        };

        let url = self.url("/api/Lead/campaign");
        let resp = self
            .execute(
                "POST /api/Lead/campaign",
                self.http.post(&url).headers(headers).json(&body),
            )
            .await?;
        read_json(resp, "POST /api/Lead/campaign").await
    }

    async fn campaigns(&self, pagination: PaginationParams) -> Result<CampaignsResponse> {
        let headers = self.authed()?;
        let url = self.url("/api/campaigns/with-counts");
        let query = [
            ("page", pagination.wire_page().to_string()),
            ("limit", pagination.limit.to_string()),
            ("sortBy", "leadCount".to_string()),
            ("sortOrder", "desc".to_string()),
        ];

        let fetch = async {
            let resp = self
                .execute(
                    "GET /api/campaigns/with-counts",
                    self.http.get(&url).headers(headers).query(&query),
                )
                .await?;
            read_json(resp, "GET /api/campaigns/with-counts").await
        };

        match tokio::time::timeout(CAMPAIGN_LIST_TIMEOUT, fetch).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(format!(
                "campaign list did not answer within {}s",
                CAMPAIGN_LIST_TIMEOUT.as_secs()
            ))),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Error conversion helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Convert a `reqwest::Error` into a domain `Error`.
///
/// Timeout errors become `Error::Timeout`; everything else becomes
/// `Error::Http`.
pub fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

/// Decode a 2xx body, keeping a truncated copy in the error when the
/// backend sends something unexpected.
async fn read_json<T: serde::de::DeserializeOwned>(resp: Response, endpoint: &str) -> Result<T> {
    let body = resp.text().await.map_err(from_reqwest)?;
    serde_json::from_str(&body).map_err(|e| {
        Error::Backend(format!(
            "failed to parse {endpoint} response: {e}: {}",
            snippet(&body)
        ))
    })
}

fn snippet(body: &str) -> String {
    if body.len() <= BODY_SNIPPET_MAX {
        return body.to_owned();
    }
    let mut end = BODY_SNIPPET_MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use lw_session::MemoryTokenStore;

    fn token_expiring_at(exp: i64) -> String {
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#));
        format!("hdr.{payload}.sig")
    }

    /// Accept one connection, swallow the request, answer with a canned
    /// HTTP/1.1 response, and close.
    async fn serve_once(response: &'static str) -> std::net::SocketAddr {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        addr
    }

    fn client_against(addr: std::net::SocketAddr, store: Arc<MemoryTokenStore>) -> RestLeadsClient {
        let mut cfg = Config::default();
        cfg.api.base_url = format!("http://{addr}");
        RestLeadsClient::new(&cfg, store).unwrap()
    }

    fn client_with(store: Arc<MemoryTokenStore>) -> RestLeadsClient {
        // Config points at a local port; the tests below all fail before
        // any request is sent.
        RestLeadsClient::new(&Config::default(), store).unwrap()
    }

    fn agent(id: &str) -> User {
        User {
            id: id.into(),
            role: "agent".into(),
            permissions: Default::default(),
        }
    }

    #[tokio::test]
    async fn leads_requires_a_session() {
        let client = client_with(Arc::new(MemoryTokenStore::new()));
        let err = client
            .leads(
                &agent("u1"),
                &FilterOptions::default(),
                "",
                PaginationParams::new(0, 20),
                &ScopeOverrides::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }

    #[tokio::test]
    async fn expired_session_is_discarded_at_the_gate() {
        let store = Arc::new(MemoryTokenStore::with_token(token_expiring_at(1)));
        let client = client_with(store.clone());

        let err = client
            .campaign_leads("spring", PaginationParams::new(0, 20))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
        assert_eq!(store.get().unwrap(), None);
    }

    #[tokio::test]
    async fn blank_user_fails_before_any_request() {
        let exp = i64::MAX;
        let store = Arc::new(MemoryTokenStore::with_token(token_expiring_at(exp)));
        let client = client_with(store);

        let err = client
            .leads(
                &agent(""),
                &FilterOptions::default(),
                "",
                PaginationParams::new(0, 20),
                &ScopeOverrides::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidUser(_)));
    }

    #[tokio::test]
    async fn pickers_degrade_to_empty_without_a_session() {
        let client = client_with(Arc::new(MemoryTokenStore::new()));

        assert!(client.statuses().await.is_empty());
        assert!(client.sources().await.is_empty());
        assert!(client.agent_tree(&agent("u1")).await.is_empty());

        let page = client.tags(PaginationParams::new(0, 20), None).await;
        assert_eq!(page, TagPage::empty());
    }

    #[tokio::test]
    async fn backend_401_is_an_api_error_and_keeps_the_token() {
        let addr = serve_once(
            "HTTP/1.1 401 Unauthorized\r\n\
             content-type: text/plain\r\n\
             content-length: 15\r\n\
             connection: close\r\n\r\n\
             token rejected.",
        )
        .await;
        let store = Arc::new(MemoryTokenStore::with_token(token_expiring_at(i64::MAX)));
        let client = client_against(addr, store.clone());

        let err = client
            .leads(
                &agent("u1"),
                &FilterOptions::default(),
                "",
                PaginationParams::new(0, 20),
                &ScopeOverrides::default(),
            )
            .await
            .unwrap_err();

        match err {
            Error::Api { status, body, .. } => {
                assert_eq!(status, 401);
                assert!(body.contains("token rejected"));
            }
            other => panic!("expected Api, got {other:?}"),
        }
        // A backend rejection never clears local storage; only the
        // validator's expired/malformed paths do.
        assert!(store.get().unwrap().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn campaign_list_times_out_against_a_silent_backend() {
        // Bound but never accepted: the connection lands in the backlog and
        // no response ever arrives.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let store = Arc::new(MemoryTokenStore::with_token(token_expiring_at(i64::MAX)));
        let client = client_against(addr, store);

        let err = client
            .campaigns(PaginationParams::new(0, 20))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Timeout(_)), "got {err:?}");
        drop(listener);
    }

    #[tokio::test(start_paused = true)]
    async fn campaign_leads_carries_no_deadline_of_its_own() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let store = Arc::new(MemoryTokenStore::with_token(token_expiring_at(i64::MAX)));
        let client = client_against(addr, store);

        // Four times the campaign-list deadline passes and the request is
        // still pending: only the campaign list is raced against the clock.
        let pending = client.campaign_leads("spring", PaginationParams::new(0, 20));
        let outcome = tokio::time::timeout(CAMPAIGN_LIST_TIMEOUT * 4, pending).await;
        assert!(outcome.is_err());
        drop(listener);
    }

    #[test]
    fn snippet_caps_long_bodies() {
        let long = "x".repeat(BODY_SNIPPET_MAX * 2);
        let cut = snippet(&long);
        assert!(cut.len() <= BODY_SNIPPET_MAX + 3);
        assert!(cut.ends_with("..."));
        assert_eq!(snippet("short"), "short");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let mut cfg = Config::default();
        cfg.api.base_url = "https://crm.example.com/".into();
        let client = RestLeadsClient::new(&cfg, Arc::new(MemoryTokenStore::new())).unwrap();
        assert_eq!(client.url("/api/Lead/get"), "https://crm.example.com/api/Lead/get");
    }
}
