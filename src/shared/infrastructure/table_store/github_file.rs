// TableStore backed by a CSV file committed to a GitHub repository
// (repository contents API).
//
// The blob SHA returned by a load is the revision handle. A save commits with
// that SHA; GitHub rejects the commit when the file moved on in the meantime.

use crate::shared::core::table::Table;
use crate::shared::infrastructure::table_store::csv_codec::{parse_csv, write_csv};
use crate::shared::infrastructure::table_store::{TableStore, TableStoreError, VersionedTable};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::{Deserialize, Serialize};

const GITHUB_API: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct GitHubFileTableStore {
    client: Client,
    base_url: String,
    owner: String,
    repo: String,
    path: String,
    branch: String,
    token: String,
}

#[derive(Deserialize)]
struct ContentsResponse {
    sha: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: String,
}

#[derive(Serialize)]
struct CommitBody<'a> {
    message: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    branch: &'a str,
}

impl GitHubFileTableStore {
    pub fn new(
        client: Client,
        repository: &str,
        branch: impl Into<String>,
        path: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, TableStoreError> {
        let (owner, repo) = repository
            .split_once('/')
            .filter(|(o, r)| !o.is_empty() && !r.is_empty())
            .ok_or_else(|| {
                TableStoreError::Backend(format!("repository must be owner/repo, got {repository}"))
            })?;
        Ok(Self {
            client,
            base_url: GITHUB_API.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            path: path.into(),
            branch: branch.into(),
            token: token.into(),
        })
    }

    fn contents_url(&self) -> Result<Url, TableStoreError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| TableStoreError::Backend(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| TableStoreError::Backend("invalid github base url".into()))?
            .pop_if_empty()
            .extend(["repos", self.owner.as_str(), self.repo.as_str(), "contents"])
            .extend(self.path.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(reqwest::header::USER_AGENT, "shift-signup")
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
    }
}

fn decode_contents(contents: &ContentsResponse) -> Result<String, TableStoreError> {
    if contents.encoding != "base64" {
        return Err(TableStoreError::Malformed(format!(
            "unsupported content encoding {:?}",
            contents.encoding
        )));
    }
    // GitHub wraps the base64 payload at 60 columns.
    let compact: String = contents
        .content
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| TableStoreError::Malformed(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TableStoreError::Malformed(e.to_string()))
}

fn map_status(status: StatusCode, body: String, path: &str) -> TableStoreError {
    match status {
        StatusCode::NOT_FOUND => TableStoreError::NotFound(path.to_string()),
        StatusCode::CONFLICT => TableStoreError::RevisionConflict(body),
        // A stale or missing sha on update is reported as an unprocessable entity.
        StatusCode::UNPROCESSABLE_ENTITY if body.contains("sha") => {
            TableStoreError::RevisionConflict(body)
        }
        _ => TableStoreError::Backend(format!("github api returned {status}: {body}")),
    }
}

#[async_trait::async_trait]
impl TableStore for GitHubFileTableStore {
    async fn load(&self) -> Result<VersionedTable, TableStoreError> {
        let mut url = self.contents_url()?;
        url.query_pairs_mut().append_pair("ref", &self.branch);
        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(|e| TableStoreError::Backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, body, &self.path));
        }
        let contents: ContentsResponse = response
            .json()
            .await
            .map_err(|e| TableStoreError::Malformed(e.to_string()))?;
        let table = parse_csv(&decode_contents(&contents)?)?;
        Ok(VersionedTable {
            table,
            revision: Some(contents.sha),
        })
    }

    async fn save(
        &self,
        table: &Table,
        expected_revision: Option<&str>,
    ) -> Result<(), TableStoreError> {
        let body = CommitBody {
            message: format!("Update {} ({} rows)", self.path, table.len()),
            content: STANDARD.encode(write_csv(table)?),
            sha: expected_revision,
            branch: &self.branch,
        };
        let response = self
            .authorized(self.client.put(self.contents_url()?))
            .json(&body)
            .send()
            .await
            .map_err(|e| TableStoreError::Backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status(status, body, &self.path));
        }
        tracing::debug!(path = %self.path, branch = %self.branch, "csv committed");
        Ok(())
    }
}
