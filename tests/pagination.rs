use async_trait::async_trait;
use repo_cache::github::{
    list_all_repositories, MockRepositorySource, ProviderError, RawRepository, RepositoryPage,
    RepositorySource,
};
use reqwest::StatusCode;

fn raw(index: usize) -> RawRepository {
    RawRepository {
        name: format!("repo-{index:03}"),
        description: Some(format!("repository number {index}")),
        stargazers_count: index as u64,
        forks_count: 0,
        language: Some("Rust".to_string()),
        pushed_at: Some("2024-05-01T12:00:00Z".to_string()),
        html_url: format!("https://github.com/acme/repo-{index:03}"),
    }
}

fn page_of(range: std::ops::Range<usize>, next_page: Option<u32>) -> RepositoryPage {
    RepositoryPage {
        repositories: range.map(raw).collect(),
        next_page,
    }
}

/// Stub source: a full first page of 100 with a next pointer, then a final
/// page of 37 with none.
struct TwoPageSource;

#[async_trait]
impl RepositorySource for TwoPageSource {
    async fn fetch_page(
        &self,
        organization: &str,
        page: u32,
    ) -> Result<RepositoryPage, ProviderError> {
        assert_eq!(organization, "acme");
        match page {
            1 => Ok(page_of(0..100, Some(2))),
            2 => Ok(page_of(100..137, None)),
            other => panic!("driver requested unexpected page {other}"),
        }
    }
}

#[tokio::test]
async fn two_pages_accumulate_in_page_order() {
    let repositories = list_all_repositories(&TwoPageSource, "acme")
        .await
        .expect("both pages succeed");

    assert_eq!(repositories.len(), 137);
    for (index, repository) in repositories.iter().enumerate() {
        assert_eq!(repository.name, format!("repo-{index:03}"));
    }
}

#[tokio::test]
async fn failure_on_second_page_fails_the_whole_listing() {
    let mut source = MockRepositorySource::new();
    source
        .expect_fetch_page()
        .withf(|organization, page| organization == "acme" && *page == 1)
        .returning(|_, _| Ok(page_of(0..100, Some(2))));
    source
        .expect_fetch_page()
        .withf(|organization, page| organization == "acme" && *page == 2)
        .returning(|_, page| {
            Err(ProviderError::Api {
                status: StatusCode::FORBIDDEN,
                page,
                message: "API rate limit exceeded".to_string(),
            })
        });

    let err = list_all_repositories(&source, "acme")
        .await
        .expect_err("page 2 failure must abort the listing");

    match err {
        ProviderError::Api { status, page, .. } => {
            assert_eq!(status, StatusCode::FORBIDDEN);
            assert_eq!(page, 2);
        }
        other => panic!("unexpected error variant: {other}"),
    }
}

#[tokio::test]
async fn single_page_without_next_pointer_terminates_immediately() {
    let mut source = MockRepositorySource::new();
    source
        .expect_fetch_page()
        .withf(|_, page| *page == 1)
        .times(1)
        .returning(|_, _| Ok(page_of(0..3, None)));

    let repositories = list_all_repositories(&source, "acme")
        .await
        .expect("one page, no follow-up request");
    assert_eq!(repositories.len(), 3);
}
