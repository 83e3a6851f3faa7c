//! Projection from provider-native repository records to the public summary
//! shape that gets published. Pure and total: there is no error path here, and
//! output order always equals input order.

use serde::{Deserialize, Serialize};

use crate::github::RawRepository;

/// The public projection of a repository. The field names are the external
/// contract of the published object; downstream consumers read these keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub description: String,
    pub stars: u64,
    pub forks: u64,
    pub language: String,
    pub pushed_at: String,
    pub url: String,
}

/// Projects every raw record into its summary, preserving order and length.
/// An empty input yields an empty `Vec`, which serializes to `[]`.
pub fn project(repositories: &[RawRepository]) -> Vec<RepositorySummary> {
    repositories.iter().map(summarise).collect()
}

/// Optional text fields default to the empty string rather than being
/// omitted; everything else is copied verbatim.
fn summarise(repository: &RawRepository) -> RepositorySummary {
    RepositorySummary {
        name: repository.name.clone(),
        description: repository.description.clone().unwrap_or_default(),
        stars: repository.stargazers_count,
        forks: repository.forks_count,
        language: repository.language.clone().unwrap_or_default(),
        pushed_at: repository.pushed_at.clone().unwrap_or_default(),
        url: repository.html_url.clone(),
    }
}
