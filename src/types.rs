//! # Common Types
//!
//! Typed models of the payloads returned by the CrispHub analytics backend.
//!
//! The backend owns these schemas, so every model is lenient: unknown fields
//! are ignored and anything but the identifying name falls back to a default
//! when it is missing.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An ordered mapping from a name to a count.
///
/// Used for language distributions, topic counts and commit frequencies.
/// Entries keep the order in which the backend wrote them, which is the
/// order charts display them in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountMap(Vec<(String, u64)>);

impl CountMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a count. A replaced entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, count: u64) {
        let name = name.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = count,
            None => self.0.push((name, count)),
        }
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, count)| count).sum()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for CountMap {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut map = CountMap::new();
        for (name, count) in iter {
            map.insert(name, count);
        }
        map
    }
}

impl Serialize for CountMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CountMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountMapVisitor;

        impl<'de> Visitor<'de> for CountMapVisitor {
            type Value = CountMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of names to non-negative counts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<CountMap, A::Error> {
                let mut map = CountMap(Vec::with_capacity(access.size_hint().unwrap_or(0)));
                while let Some((name, count)) = access.next_entry::<String, u64>()? {
                    map.insert(name, count);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(CountMapVisitor)
    }
}

/// One repository as listed by `GET /user/{username}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub open_issues: u64,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub has_wiki: bool,
    #[serde(default)]
    pub has_pages: bool,
    #[serde(default)]
    pub watchers: u64,
}

/// Body of `GET /user/{username}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositoryListResponse {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub repositories: Vec<RepositorySummary>,
}

/// A single (date, repository count) sample of the creation timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: String,
    pub repos: u64,
}

/// A repository name with its star count, as ranked by the stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarredRepository {
    pub name: String,
    #[serde(default)]
    pub stars: u64,
}

/// Body of `GET /stats/{username}`.
///
/// `language_distribution` stays `None` when the backend omits it, which the
/// chart adapters treat the same as an empty distribution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub repo_count: u64,
    #[serde(default)]
    pub total_stars: u64,
    #[serde(default)]
    pub total_forks: u64,
    #[serde(default)]
    pub avg_stars: f64,
    #[serde(default)]
    pub avg_forks: f64,
    #[serde(default)]
    pub language_distribution: Option<CountMap>,
    #[serde(default)]
    pub timeline: Vec<TimelinePoint>,
    #[serde(default)]
    pub top_topics: CountMap,
    #[serde(default)]
    pub repos_by_stars: Vec<StarredRepository>,
}

/// A contributor entry of a repository detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub contributions: u64,
}

/// A recent commit entry of a repository detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub sha: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub author_avatar: Option<String>,
}

impl CommitSummary {
    /// First line of the commit message.
    pub fn headline(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }
}

/// Body of `GET /repo/{username}/{repo}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryDetail {
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub open_issues: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub languages: CountMap,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub contributors: Vec<Contributor>,
    #[serde(default)]
    pub recent_commits: Vec<CommitSummary>,
    #[serde(default)]
    pub commit_frequency: CountMap,
    /// Weekly commit activity exactly as GitHub reports it.
    #[serde(default)]
    pub weekly_commits: serde_json::Value,
}
