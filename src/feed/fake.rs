//! In-memory feed and event builders for tests.

use std::collections::{HashMap, VecDeque};

use jiff::Timestamp;

use crate::model::{Event, EventPayload, PullRequest, Push, Review};

use super::{ActivityFeed, Result};

/// Serves pre-built pages and review lists, counting what was asked for.
#[derive(Default)]
pub struct FakeFeed {
    pages: VecDeque<Vec<Event>>,
    reviews: HashMap<(String, u64), Vec<Review>>,
    pub pages_fetched: usize,
    pub review_calls: usize,
}

impl FakeFeed {
    pub fn with_pages(pages: Vec<Vec<Event>>) -> Self {
        Self {
            pages: pages.into(),
            ..Self::default()
        }
    }

    pub fn add_reviews(&mut self, repo: &str, number: u64, reviews: Vec<Review>) {
        self.reviews.insert((repo.to_string(), number), reviews);
    }
}

impl ActivityFeed for FakeFeed {
    fn next_page(&mut self) -> Result<Option<Vec<Event>>> {
        let page = self.pages.pop_front();
        if page.is_some() {
            self.pages_fetched += 1;
        }
        Ok(page)
    }

    fn reviews(&mut self, repo: &str, number: u64) -> Result<Vec<Review>> {
        self.review_calls += 1;
        Ok(self
            .reviews
            .get(&(repo.to_string(), number))
            .cloned()
            .unwrap_or_default())
    }
}

pub fn at(s: &str) -> Timestamp {
    s.parse().unwrap()
}

pub fn push(created_at: &str, repo: &str, branch: &str, head: &str, message: &str) -> Event {
    push_commits(created_at, repo, branch, head, 1, message)
}

pub fn push_commits(
    created_at: &str,
    repo: &str,
    branch: &str,
    head: &str,
    commit_count: u64,
    message: &str,
) -> Event {
    Event {
        created_at: at(created_at),
        repo: repo.to_string(),
        payload: EventPayload::Push(Push {
            head: head.to_string(),
            branch: branch.to_string(),
            commit_count,
            message: message.to_string(),
        }),
    }
}

pub fn pull_request(number: u64, title: &str, merge_commit_sha: Option<&str>) -> PullRequest {
    PullRequest {
        number,
        title: title.to_string(),
        url: format!("https://example.test/pull/{number}"),
        merge_commit_sha: merge_commit_sha.map(String::from),
    }
}

pub fn opened(created_at: &str, repo: &str, number: u64, title: &str) -> Event {
    Event {
        created_at: at(created_at),
        repo: repo.to_string(),
        payload: EventPayload::PullRequestOpened(pull_request(number, title, None)),
    }
}

pub fn closed(created_at: &str, repo: &str, number: u64, title: &str, merge_sha: &str) -> Event {
    Event {
        created_at: at(created_at),
        repo: repo.to_string(),
        payload: EventPayload::PullRequestClosed(pull_request(number, title, Some(merge_sha))),
    }
}

pub fn reviewed(created_at: &str, repo: &str, number: u64, title: &str) -> Event {
    Event {
        created_at: at(created_at),
        repo: repo.to_string(),
        payload: EventPayload::ReviewSubmitted(pull_request(number, title, None)),
    }
}

pub fn other(created_at: &str, repo: &str) -> Event {
    Event {
        created_at: at(created_at),
        repo: repo.to_string(),
        payload: EventPayload::Other("WatchEvent".to_string()),
    }
}

pub fn review(login: &str, state: &str, submitted_at: &str) -> Review {
    Review {
        login: login.to_string(),
        state: state.to_string(),
        submitted_at: Some(at(submitted_at)),
    }
}
