//! GitHub activity feed, fetched through the `gh` CLI.
//!
//! Events come from the REST events API, reviews from the pull request
//! reviews API. Authentication is whatever `gh` is logged in as, optionally
//! pointed at a specific `GH_CONFIG_DIR`.

use std::path::{Path, PathBuf};
use std::process::Command;

use jiff::Timestamp;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::model::{Event, EventPayload, PullRequest, Push, Review};

use super::{ActivityFeed, FeedError, Result};

/// Events per page. The API maximum.
const PER_PAGE: usize = 100;

/// The events API refuses to page past 300 events.
const MAX_PAGES: u32 = 3;

/// The authenticated user's activity, read through `gh api`.
pub struct GhFeed {
    username: String,
    gh_config: Option<PathBuf>,
    page: u32,
    exhausted: bool,
}

impl GhFeed {
    pub fn new(username: impl Into<String>, gh_config: Option<PathBuf>) -> Self {
        Self {
            username: username.into(),
            gh_config,
            page: 0,
            exhausted: false,
        }
    }

    /// Decode the page just fetched, marking the feed exhausted if it was the last.
    fn take_page(&mut self, raw: Vec<GhEvent>) -> Result<Option<Vec<Event>>> {
        if is_last_page(raw.len(), self.page) {
            self.exhausted = true;
        }
        if raw.is_empty() {
            return Ok(None);
        }

        raw.into_iter()
            .map(decode_event)
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}

/// A short page means there is nothing older; past the cap the API refuses.
fn is_last_page(len: usize, page: u32) -> bool {
    len < PER_PAGE || page >= MAX_PAGES
}

impl ActivityFeed for GhFeed {
    fn next_page(&mut self) -> Result<Option<Vec<Event>>> {
        if self.exhausted {
            return Ok(None);
        }
        self.page += 1;

        let endpoint = format!(
            "users/{}/events?per_page={PER_PAGE}&page={}",
            self.username, self.page
        );
        let json = gh(&["api", &endpoint], self.gh_config.as_deref())?;
        let raw: Vec<GhEvent> = serde_json::from_str(&json)?;
        debug!(page = self.page, events = raw.len(), "fetched activity page");

        self.take_page(raw)
    }

    fn reviews(&mut self, repo: &str, number: u64) -> Result<Vec<Review>> {
        let endpoint = format!("repos/{repo}/pulls/{number}/reviews?per_page=100");
        let json = gh(&["api", "--paginate", &endpoint], self.gh_config.as_deref())?;
        let reviews = parse_reviews(&json)?;
        debug!(repo, number, reviews = reviews.len(), "fetched reviews");
        Ok(reviews)
    }
}

/// Login of the user `gh` is authenticated as.
pub fn authenticated_login(gh_config: Option<&Path>) -> Result<String> {
    let out = gh(&["api", "user", "--jq", ".login"], gh_config)?;
    Ok(out.trim().to_string())
}

/// Run `gh` with the given args and return stdout.
fn gh(args: &[&str], gh_config: Option<&Path>) -> Result<String> {
    let mut command = Command::new("gh");
    command.args(args);
    if let Some(dir) = gh_config {
        command.env("GH_CONFIG_DIR", dir);
    }

    let output = command.output()?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(FeedError::Command {
            args: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

// ── Wire shapes ──

/// JSON shape of one entry in `users/{user}/events`.
#[derive(Deserialize)]
struct GhEvent {
    #[serde(rename = "type")]
    kind: String,
    created_at: Timestamp,
    repo: GhRepo,
    #[serde(default)]
    payload: serde_json::Value,
}

#[derive(Deserialize)]
struct GhRepo {
    name: String,
}

#[derive(Deserialize)]
struct GhPushPayload {
    #[serde(rename = "ref")]
    git_ref: String,
    head: String,
    size: u64,
    #[serde(default)]
    commits: Vec<GhCommit>,
}

#[derive(Deserialize)]
struct GhCommit {
    message: String,
}

#[derive(Deserialize)]
struct GhPullRequestPayload {
    action: String,
    pull_request: GhPullRequest,
}

/// Review and review-comment events carry the pull request they were left on.
#[derive(Deserialize)]
struct GhReviewPayload {
    pull_request: GhPullRequest,
}

#[derive(Deserialize)]
struct GhPullRequest {
    number: u64,
    title: String,
    html_url: String,
    merge_commit_sha: Option<String>,
}

impl From<GhPullRequest> for PullRequest {
    fn from(pr: GhPullRequest) -> Self {
        Self {
            number: pr.number,
            title: pr.title,
            url: pr.html_url,
            merge_commit_sha: pr.merge_commit_sha,
        }
    }
}

/// JSON shape of one entry in `repos/{repo}/pulls/{n}/reviews`.
#[derive(Deserialize)]
struct GhReview {
    // `null` for deleted accounts.
    user: Option<GhUser>,
    state: String,
    submitted_at: Option<Timestamp>,
}

#[derive(Deserialize)]
struct GhUser {
    login: String,
}

fn decode_event(raw: GhEvent) -> Result<Event> {
    let payload = match raw.kind.as_str() {
        "PushEvent" => {
            let push: GhPushPayload = decode_payload(&raw.kind, raw.payload)?;
            EventPayload::Push(Push {
                head: push.head,
                branch: push
                    .git_ref
                    .rsplit('/')
                    .next()
                    .unwrap_or_default()
                    .to_string(),
                commit_count: push.size,
                message: push
                    .commits
                    .first()
                    .and_then(|c| c.message.lines().next())
                    .unwrap_or_default()
                    .to_string(),
            })
        }
        "PullRequestEvent" => {
            let pr: GhPullRequestPayload = decode_payload(&raw.kind, raw.payload)?;
            match pr.action.as_str() {
                "opened" => EventPayload::PullRequestOpened(pr.pull_request.into()),
                "closed" => EventPayload::PullRequestClosed(pr.pull_request.into()),
                other => EventPayload::Other(format!("PullRequestEvent/{other}")),
            }
        }
        "PullRequestReviewEvent" | "PullRequestReviewCommentEvent" => {
            let review: GhReviewPayload = decode_payload(&raw.kind, raw.payload)?;
            EventPayload::ReviewSubmitted(review.pull_request.into())
        }
        _ => EventPayload::Other(raw.kind),
    };

    Ok(Event {
        created_at: raw.created_at,
        repo: raw.repo.name,
        payload,
    })
}

fn decode_payload<T: DeserializeOwned>(kind: &str, payload: serde_json::Value) -> Result<T> {
    serde_json::from_value(payload).map_err(|source| FeedError::Payload {
        kind: kind.to_string(),
        source,
    })
}

/// Parse `gh api --paginate` output: one JSON array per fetched page.
fn parse_reviews(json: &str) -> Result<Vec<Review>> {
    let mut reviews = Vec::new();
    for page in serde_json::Deserializer::from_str(json).into_iter::<Vec<GhReview>>() {
        reviews.extend(page?.into_iter().map(|r| Review {
            login: r.user.map(|u| u.login).unwrap_or_default(),
            state: r.state,
            submitted_at: r.submitted_at,
        }));
    }
    Ok(reviews)
}
