#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::client::{FetchFuture, RepoSource};
    use crate::config::RequestContext;
    use crate::error::AnalyzerError;
    use crate::types::{ContributorRecord, LanguageShareMap, RepoId, RepositorySnapshot, WeeklyCommitSeries};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    fn not_found() -> AnalyzerError {
        AnalyzerError::Api {
            status: 404,
            message: "Not Found".to_string(),
        }
    }

    fn snapshot(name: &str, languages_url: Option<&str>) -> RepositorySnapshot {
        RepositorySnapshot {
            name: name.to_string(),
            owner_login: "octo".to_string(),
            description: Some("A test repository".to_string()),
            stars: 42,
            forks: 7,
            open_issues: 3,
            watchers: 42,
            created_at: "2021-02-03T04:05:06Z".to_string(),
            updated_at: "2024-06-07T08:09:10Z".to_string(),
            language: Some("Rust".to_string()),
            license_name: Some("MIT License".to_string()),
            languages_url: languages_url.map(str::to_string),
        }
    }

    /// In-memory source; `None` fields answer with a 404.
    #[derive(Default)]
    struct FakeSource {
        repos: HashMap<String, RepositorySnapshot>,
        commits: Option<WeeklyCommitSeries>,
        contributors: Option<Vec<ContributorRecord>>,
        languages: Option<LanguageShareMap>,
        readme: Option<String>,
        delay: Option<Duration>,
        calls: Mutex<Vec<String>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        tokens_seen: Mutex<Vec<Option<String>>>,
    }

    impl FakeSource {
        fn with_repo(mut self, snapshot: RepositorySnapshot) -> Self {
            self.repos.insert(snapshot.name.clone(), snapshot);
            self
        }

        fn record(&self, ctx: &RequestContext, call: String) {
            self.calls.lock().unwrap().push(call);
            self.tokens_seen.lock().unwrap().push(ctx.token.clone());
        }

        fn answer<T: Clone>(value: &Option<T>) -> crate::error::Result<T> {
            value.clone().ok_or_else(not_found)
        }
    }

    impl RepoSource for FakeSource {
        fn repository<'a>(&'a self, ctx: &'a RequestContext, id: &'a RepoId) -> FetchFuture<'a, RepositorySnapshot> {
            Box::pin(async move {
                self.record(ctx, format!("repository {id}"));
                let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.max_in_flight.fetch_max(now, Ordering::SeqCst);
                if let Some(delay) = self.delay {
                    tokio::time::sleep(delay).await;
                }
                self.in_flight.fetch_sub(1, Ordering::SeqCst);
                self.repos.get(&id.repo).cloned().ok_or_else(not_found)
            })
        }

        fn commit_activity<'a>(&'a self, ctx: &'a RequestContext, id: &'a RepoId) -> FetchFuture<'a, WeeklyCommitSeries> {
            Box::pin(async move {
                self.record(ctx, format!("commits {id}"));
                Self::answer(&self.commits)
            })
        }

        fn contributors<'a>(&'a self, ctx: &'a RequestContext, id: &'a RepoId) -> FetchFuture<'a, Vec<ContributorRecord>> {
            Box::pin(async move {
                self.record(ctx, format!("contributors {id}"));
                Self::answer(&self.contributors)
            })
        }

        fn readme<'a>(&'a self, ctx: &'a RequestContext, id: &'a RepoId) -> FetchFuture<'a, String> {
            Box::pin(async move {
                self.record(ctx, format!("readme {id}"));
                Self::answer(&self.readme)
            })
        }

        fn languages<'a>(&'a self, ctx: &'a RequestContext, languages_url: &'a str) -> FetchFuture<'a, LanguageShareMap> {
            Box::pin(async move {
                self.record(ctx, format!("languages {languages_url}"));
                Self::answer(&self.languages)
            })
        }
    }

    fn full_source() -> FakeSource {
        FakeSource {
            commits: Some((1..=52).collect()),
            contributors: Some(vec![
                ContributorRecord::new("Alice", 50),
                ContributorRecord::new("bob", 10),
            ]),
            languages: Some(vec![("Python".to_string(), 300), ("JavaScript".to_string(), 100)]),
            readme: Some("# demo".to_string()),
            ..FakeSource::default()
        }
        .with_repo(snapshot("demo", Some("https://api.example/languages")))
    }

    #[tokio::test]
    async fn test_fetch_repo_collects_everything() {
        let source = full_source();
        let ctx = RequestContext::new(Some("secret".to_string()));
        let data = fetch_repo(&source, &ctx, &RepoId::new("octo", "demo")).await.unwrap();

        assert_eq!(data.snapshot.name, "demo");
        assert_eq!(data.commits.len(), 52);
        assert_eq!(data.contributors.len(), 2);
        assert_eq!(data.languages.len(), 2);
        assert_eq!(data.readme.as_deref(), Some("# demo"));

        let tokens = source.tokens_seen.lock().unwrap();
        assert_eq!(tokens.len(), 5);
        assert!(tokens.iter().all(|t| t.as_deref() == Some("secret")));
    }

    #[tokio::test]
    async fn test_primary_failure_is_fatal() {
        let source = full_source();
        let result = fetch_repo(&source, &RequestContext::default(), &RepoId::new("octo", "missing")).await;

        assert!(matches!(result, Err(AnalyzerError::Api { status: 404, .. })));
        // nothing else is attempted after the metadata call fails
        assert_eq!(source.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_auxiliary_failures_degrade() {
        let source = FakeSource::default().with_repo(snapshot("demo", Some("https://api.example/languages")));
        let data = fetch_repo(&source, &RequestContext::default(), &RepoId::new("octo", "demo"))
            .await
            .unwrap();

        assert!(data.commits.is_empty());
        assert!(data.contributors.is_empty());
        assert!(data.languages.is_empty());
        assert!(data.readme.is_none());
    }

    #[tokio::test]
    async fn test_languages_skipped_without_url() {
        let source = FakeSource {
            languages: Some(vec![("Rust".to_string(), 1)]),
            ..FakeSource::default()
        }
        .with_repo(snapshot("demo", None));
        let data = fetch_repo(&source, &RequestContext::default(), &RepoId::new("octo", "demo"))
            .await
            .unwrap();

        assert!(data.languages.is_empty());
        assert!(!source
            .calls
            .lock()
            .unwrap()
            .iter()
            .any(|call| call.starts_with("languages")));
    }

    #[tokio::test]
    async fn test_fetch_pair_runs_concurrently() {
        let source = FakeSource {
            delay: Some(Duration::from_millis(50)),
            ..full_source()
        }
        .with_repo(snapshot("other", None));

        let (first, second) = fetch_pair(
            &source,
            &RequestContext::default(),
            &RepoId::new("octo", "demo"),
            &RepoId::new("octo", "other"),
        )
        .await;

        assert_eq!(first.unwrap().snapshot.name, "demo");
        assert_eq!(second.unwrap().snapshot.name, "other");
        assert_eq!(source.max_in_flight.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_pair_keeps_independent_outcomes() {
        let source = full_source();
        let (first, second) = fetch_pair(
            &source,
            &RequestContext::default(),
            &RepoId::new("octo", "demo"),
            &RepoId::new("octo", "missing"),
        )
        .await;

        assert!(first.is_ok());
        assert!(second.is_err());
    }

    #[test]
    fn test_shape_applies_view_options() {
        let source = full_source();
        let data = tokio_test::block_on(fetch_repo(
            &source,
            &RequestContext::default(),
            &RepoId::new("octo", "demo"),
        ))
        .unwrap();

        let options = ViewOptions {
            timeframe: Timeframe::LastMonth,
            username_filter: "b".to_string(),
        };
        let view = shape(&data, &options);

        assert_eq!(view.commits, &[49, 50, 51, 52]);
        assert_eq!(view.contributors, vec![&ContributorRecord::new("bob", 10)]);
        assert_eq!(view.languages[0].percent, 75.0);
        assert_eq!(view.languages[1].percent, 25.0);
        // shaping never touches the fetched data
        assert_eq!(data.commits.len(), 52);
        assert_eq!(data.contributors.len(), 2);
    }

    #[test]
    fn test_default_view_shows_everything() {
        let options = ViewOptions::default();
        assert_eq!(options.timeframe, Timeframe::AllTime);
        assert_eq!(options.filter(), None);
    }
}
