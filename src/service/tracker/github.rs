//! GitHub REST implementation of the issue tracker.

use std::{sync::Arc, time::Duration};

use anyhow::{Context as _, anyhow};
use async_trait::async_trait;
use reqwest::{
    Method, StatusCode, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use crate::base::{
    config::Config,
    context::EventContext,
    types::{ApiReply, Issue, IssueLabel, Res},
};

use super::{GenericIssueTracker, IssueTracker};

// Extra methods on `IssueTracker` applied by the github implementation.

impl IssueTracker {
    /// Creates a GitHub-backed tracker from the configured endpoint and token.
    pub fn github(config: &Config) -> Res<Self> {
        let client = GithubIssueTracker::new(config)?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

#[derive(Serialize)]
struct AddLabelsRequest<'a> {
    labels: &'a [String],
}

/// GitHub issues client.
#[derive(Clone)]
pub struct GithubIssueTracker {
    client: reqwest::Client,
    base_url: Url,
    token: String,
}

impl GithubIssueTracker {
    /// Create a new GitHub client.
    #[instrument(name = "GithubIssueTracker::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static("2022-11-28"));
        headers.insert(USER_AGENT, HeaderValue::from_static(concat!("issue-labeler/", env!("CARGO_PKG_VERSION"))));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(&config.api_url).with_context(|| format!("Invalid API URL `{}`", config.api_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("API URL `{}` cannot be used as a base.", config.api_url));
        }

        Ok(Self {
            client,
            base_url,
            token: config.repo_token.clone(),
        })
    }

    /// Build `{base}/repos/{owner}/{repo}/issues/...`, encoding each segment.
    fn issues_url(&self, context: &EventContext, rest: &[&str]) -> Url {
        let mut url = self.base_url.clone();

        // The constructor rejects URLs that cannot be a base.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["repos", context.owner.as_str(), context.repo.as_str(), "issues"]).extend(rest);
        }

        url
    }

    fn issue_url(&self, context: &EventContext, rest: &[&str]) -> Url {
        let number = context.issue_number.to_string();
        let mut segments = vec![number.as_str()];
        segments.extend_from_slice(rest);

        self.issues_url(context, &segments)
    }

    /// Send a request and hand back the response only if it returned 200.
    async fn send(&self, request: reqwest::RequestBuilder) -> Res<Result<reqwest::Response, u16>> {
        let response = request.header(AUTHORIZATION, format!("Bearer {}", self.token)).send().await.context("Failed to send request")?;

        if response.status() == StatusCode::OK {
            Ok(Ok(response))
        } else {
            Ok(Err(response.status().as_u16()))
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, query: &[(&str, &str)]) -> Res<ApiReply<T>> {
        match self.send(self.client.request(Method::GET, url).query(query)).await? {
            Ok(response) => Ok(ApiReply::Success(response.json().await.context("Failed to parse response")?)),
            Err(status) => Ok(ApiReply::Failed { status }),
        }
    }
}

#[async_trait]
impl GenericIssueTracker for GithubIssueTracker {
    #[instrument(skip(self), fields(issue = %context))]
    async fn get_issue(&self, context: &EventContext) -> Res<ApiReply<Issue>> {
        let reply = self.get_json(self.issue_url(context, &[]), &[]).await?;

        if let ApiReply::Failed { status } = &reply {
            debug!("Failed to get issue {} ({}).", context.issue_number, status);
        }

        Ok(reply)
    }

    #[instrument(skip(self), fields(issue = %context))]
    async fn list_issues_by_creator(&self, context: &EventContext, creator: &str) -> Res<ApiReply<Vec<Issue>>> {
        let query = [("creator", creator), ("state", "open"), ("per_page", "100")];
        let reply = self.get_json(self.issues_url(context, &[]), &query).await?;

        if let ApiReply::Failed { status } = &reply {
            debug!("Failed to list issues for repo ({}).", status);
        }

        Ok(reply)
    }

    #[instrument(skip(self), fields(issue = %context))]
    async fn list_labels_on_issue(&self, context: &EventContext) -> Res<ApiReply<Vec<String>>> {
        let reply: ApiReply<Vec<IssueLabel>> = self.get_json(self.issue_url(context, &["labels"]), &[]).await?;

        Ok(match reply {
            ApiReply::Success(labels) => ApiReply::Success(labels.into_iter().map(|label| label.name).collect()),
            ApiReply::Failed { status } => {
                debug!("Failed to list labels on issue ({}).", status);
                ApiReply::Failed { status }
            }
        })
    }

    #[instrument(skip(self), fields(issue = %context))]
    async fn add_labels(&self, context: &EventContext, labels: &[String]) -> Res<ApiReply<()>> {
        let request = self.client.request(Method::POST, self.issue_url(context, &["labels"])).json(&AddLabelsRequest { labels });

        Ok(match self.send(request).await? {
            Ok(_) => ApiReply::Success(()),
            Err(status) => ApiReply::Failed { status },
        })
    }

    #[instrument(skip(self), fields(issue = %context))]
    async fn remove_label(&self, context: &EventContext, name: &str) -> Res<ApiReply<()>> {
        let request = self.client.request(Method::DELETE, self.issue_url(context, &["labels", name]));

        Ok(match self.send(request).await? {
            Ok(_) => ApiReply::Success(()),
            Err(status) => ApiReply::Failed { status },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::config::ConfigInner;

    fn github(api_url: &str) -> GithubIssueTracker {
        let config = Config::from(ConfigInner {
            repo_token: "t0k3n".to_string(),
            api_url: api_url.to_string(),
            ..Default::default()
        });

        GithubIssueTracker::new(&config).unwrap()
    }

    #[test]
    fn urls_are_rooted_under_the_base_path() {
        let context = EventContext::new("octo", "hello", 7);

        let tracker = github("https://ghe.example.com/api/v3/");
        assert_eq!(tracker.issue_url(&context, &["labels"]).as_str(), "https://ghe.example.com/api/v3/repos/octo/hello/issues/7/labels");

        let tracker = github("https://api.github.com");
        assert_eq!(tracker.issues_url(&context, &[]).as_str(), "https://api.github.com/repos/octo/hello/issues");
    }

    #[test]
    fn label_names_are_percent_encoded() {
        let context = EventContext::new("octo", "hello", 7);
        let tracker = github("https://api.github.com");

        let url = tracker.issue_url(&context, &["labels", "good first issue"]);

        assert_eq!(url.as_str(), "https://api.github.com/repos/octo/hello/issues/7/labels/good%20first%20issue");
    }

    #[test]
    fn invalid_api_url_is_rejected() {
        let config = Config::from(ConfigInner {
            repo_token: "t0k3n".to_string(),
            api_url: "not a url".to_string(),
            ..Default::default()
        });

        assert!(GithubIssueTracker::new(&config).is_err());
    }
}
