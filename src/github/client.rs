use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::{NewRelease, ReleaseUpdate, RemoteRelease};
use crate::error::{ReleaseSyncError, Result};
use crate::git::Upstream;
use crate::github::ReleaseApi;

/// Public GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: usize = 100;
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Release as returned by `GET /repos/{owner}/{repo}/releases`
#[derive(Debug, Deserialize)]
struct ReleaseDto {
    id: u64,
    tag_name: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    body: Option<String>,
}

impl From<ReleaseDto> for RemoteRelease {
    fn from(dto: ReleaseDto) -> Self {
        RemoteRelease::new(
            dto.id,
            dto.tag_name,
            dto.name.unwrap_or_default(),
            dto.body.as_deref().unwrap_or_default(),
        )
    }
}

#[derive(Debug, Deserialize)]
struct ErrorDto {
    message: String,
}

/// Blocking GitHub releases client authenticated with a personal access token
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(GitHubClient {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn releases_url(&self, upstream: &Upstream) -> String {
        format!(
            "{}/repos/{}/{}/releases",
            self.api_url, upstream.owner, upstream.repo
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
    }
}

/// Turn a non-success response into an API error carrying GitHub's message
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let fallback = status.canonical_reason().unwrap_or("request failed").to_string();
    let message = response
        .json::<ErrorDto>()
        .map(|e| e.message)
        .unwrap_or(fallback);
    Err(ReleaseSyncError::api(status.as_u16(), message))
}

impl ReleaseApi for GitHubClient {
    fn list_releases(&self, upstream: &Upstream) -> Result<Vec<RemoteRelease>> {
        let url = self.releases_url(upstream);
        let mut releases = Vec::new();
        let mut page = 1usize;

        loop {
            let response = self
                .request(Method::GET, &url)
                .query(&[("per_page", PER_PAGE), ("page", page)])
                .send()?;
            let batch: Vec<ReleaseDto> = check_status(response)?.json()?;
            let fetched = batch.len();
            debug!(page, fetched, "listed releases");

            releases.extend(batch.into_iter().map(RemoteRelease::from));
            if fetched < PER_PAGE {
                break;
            }
            page += 1;
        }

        info!(upstream = %upstream, count = releases.len(), "fetched remote releases");
        Ok(releases)
    }

    fn create_release(&self, upstream: &Upstream, release: &NewRelease) -> Result<()> {
        let response = self
            .request(Method::POST, &self.releases_url(upstream))
            .json(release)
            .send()?;
        check_status(response)?;
        info!(upstream = %upstream, tag = %release.tag, "created release");
        Ok(())
    }

    fn update_release(&self, upstream: &Upstream, update: &ReleaseUpdate) -> Result<()> {
        let url = format!("{}/{}", self.releases_url(upstream), update.id);
        let response = self.request(Method::PATCH, &url).json(update).send()?;
        check_status(response)?;
        info!(upstream = %upstream, id = update.id, "updated release");
        Ok(())
    }
}
