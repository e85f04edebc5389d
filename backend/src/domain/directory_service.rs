//! Employee directory use cases over the cached upstream list.
//!
//! Reads go through the [`SnapshotCache`], which populates itself from the
//! [`RetryingDirectoryClient`] on a miss. Writes go straight to the client
//! and invalidate the cache once the upstream confirms them.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::aggregation::{self, TOP_EARNER_LIMIT};
use super::ports::EmployeeDirectory;
use super::{
    CreateEmployeeRequest, Employee, EmployeeId, Error, RequestContext, RetryingDirectoryClient,
    Snapshot, SnapshotCache,
};

/// Orchestrates cache, retrying client and aggregation.
pub struct EmployeeDirectoryService {
    client: RetryingDirectoryClient,
    cache: SnapshotCache,
}

impl EmployeeDirectoryService {
    /// Compose the service from its collaborators.
    pub fn new(client: RetryingDirectoryClient, cache: SnapshotCache) -> Self {
        Self { client, cache }
    }

    async fn snapshot(&self, ctx: &RequestContext) -> Result<Arc<Snapshot>, Error> {
        self.cache
            .get_or_populate(|| self.client.list_all(ctx))
            .await
    }

    async fn find(&self, ctx: &RequestContext, id: EmployeeId) -> Result<Employee, Error> {
        let snapshot = self.snapshot(ctx).await?;
        aggregation::find_by_id(snapshot.entries(), id)
            .cloned()
            .ok_or_else(|| {
                Error::not_found(format!("employee {id} not found"))
                    .with_trace_id(ctx.trace_id().to_string())
            })
    }

    fn invalidate(&self, ctx: &RequestContext) -> Result<(), Error> {
        self.cache
            .invalidate()
            .map_err(|error| error.with_trace_id(ctx.trace_id().to_string()))
    }
}

#[async_trait]
impl EmployeeDirectory for EmployeeDirectoryService {
    async fn list_all(&self, ctx: &RequestContext) -> Result<Vec<Employee>, Error> {
        Ok(self.snapshot(ctx).await?.entries().to_vec())
    }

    async fn search(&self, ctx: &RequestContext, query: &str) -> Result<Vec<Employee>, Error> {
        let snapshot = self.snapshot(ctx).await?;
        Ok(aggregation::search(snapshot.entries(), Some(query))
            .into_iter()
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: EmployeeId) -> Result<Employee, Error> {
        self.find(ctx, id).await
    }

    async fn highest_salary(&self, ctx: &RequestContext) -> Result<u32, Error> {
        let snapshot = self.snapshot(ctx).await?;
        Ok(aggregation::highest_salary(snapshot.entries()))
    }

    async fn top_ten_names(&self, ctx: &RequestContext) -> Result<Vec<String>, Error> {
        let snapshot = self.snapshot(ctx).await?;
        Ok(aggregation::top_n(snapshot.entries(), TOP_EARNER_LIMIT))
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        request: CreateEmployeeRequest,
    ) -> Result<Employee, Error> {
        let created = self.client.create(ctx, &request).await?;
        self.invalidate(ctx)?;
        info!(
            trace_id = %ctx.trace_id(),
            employee_id = %created.id(),
            "employee created"
        );
        Ok(created)
    }

    /// Resolve `id` to a name, then delete by that name upstream.
    ///
    /// The upstream offers no compare-and-swap, so another caller may rename
    /// or delete the entry between the lookup and the delete. A `false`
    /// result is ambiguous under that race and is reported as
    /// `deletion_conflict` without retrying or invalidating the cache.
    async fn delete_by_id(&self, ctx: &RequestContext, id: EmployeeId) -> Result<String, Error> {
        let employee = self.find(ctx, id).await?;
        let Some(name) = employee.name().map(str::to_owned) else {
            return Err(Error::deletion_conflict(format!(
                "employee {id} has no name to delete by"
            ))
            .with_trace_id(ctx.trace_id().to_string()));
        };

        if !self.client.delete_by_name(ctx, &name).await? {
            warn!(
                trace_id = %ctx.trace_id(),
                employee_id = %id,
                "upstream reported delete failure"
            );
            return Err(Error::deletion_conflict(format!(
                "employee directory did not delete employee {id}"
            ))
            .with_trace_id(ctx.trace_id().to_string()));
        }

        self.invalidate(ctx)?;
        info!(
            trace_id = %ctx.trace_id(),
            employee_id = %id,
            "employee deleted"
        );
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    //! Orchestration coverage against a scripted upstream.
    use std::time::Duration;

    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::DirectorySourceError;
    use crate::domain::{CreateEmployeeDraft, ErrorCode, RetryPolicy};
    use crate::test_support::{
        ImmediateSleeper, MutableClock, ScriptedSource, employee, epoch,
    };

    #[fixture]
    fn ctx() -> RequestContext {
        RequestContext::detached()
    }

    fn service(source: &Arc<ScriptedSource>) -> EmployeeDirectoryService {
        let client = RetryingDirectoryClient::with_sleeper(
            source.clone(),
            Arc::new(ImmediateSleeper),
            RetryPolicy::default(),
        );
        let cache = SnapshotCache::new(
            Duration::from_secs(30),
            Arc::new(MutableClock::new(epoch())),
        );
        EmployeeDirectoryService::new(client, cache)
    }

    fn staff() -> Vec<Employee> {
        vec![
            employee(Some("John Doe"), Some(50_000)),
            employee(Some("Jane Roe"), Some(80_000)),
            employee(None, Some(99_000)),
        ]
    }

    fn create_request() -> CreateEmployeeRequest {
        CreateEmployeeRequest::try_from_draft(CreateEmployeeDraft {
            name: Some("Grace Hopper".to_owned()),
            salary: Some(95_000),
            age: Some(40),
            title: Some("Engineer".to_owned()),
        })
        .expect("valid draft")
    }

    #[rstest]
    #[tokio::test]
    async fn repeated_reads_share_one_upstream_call(ctx: RequestContext) {
        let source = Arc::new(ScriptedSource::default().with_lists(vec![Ok(staff())]));
        let service = service(&source);

        for _ in 0..4 {
            service.list_all(&ctx).await.expect("list succeeds");
        }
        service.highest_salary(&ctx).await.expect("max succeeds");
        service.top_ten_names(&ctx).await.expect("top succeeds");

        assert_eq!(source.list_calls(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn search_ignores_case(ctx: RequestContext) {
        let source = Arc::new(ScriptedSource::default().with_lists(vec![Ok(staff())]));
        let service = service(&source);

        let upper = service.search(&ctx, "JOHN").await.expect("search");
        let lower = service.search(&ctx, "john").await.expect("search");

        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
        assert_eq!(service.search(&ctx, "").await.expect("search").len(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn aggregates_over_the_snapshot(ctx: RequestContext) {
        let source = Arc::new(ScriptedSource::default().with_lists(vec![Ok(staff())]));
        let service = service(&source);

        assert_eq!(service.highest_salary(&ctx).await.expect("max"), 99_000);
        assert_eq!(
            service.top_ten_names(&ctx).await.expect("top"),
            vec!["Jane Roe".to_owned(), "John Doe".to_owned()]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn get_by_id_reports_missing_entries(ctx: RequestContext) {
        let entries = staff();
        let known = entries[1].clone();
        let source = Arc::new(ScriptedSource::default().with_lists(vec![Ok(entries)]));
        let service = service(&source);

        let found = service.get_by_id(&ctx, known.id()).await.expect("found");
        assert_eq!(found, known);

        let error = service
            .get_by_id(&ctx, EmployeeId::random())
            .await
            .expect_err("unknown id");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert!(!error.is_retryable());
    }

    #[rstest]
    #[tokio::test]
    async fn create_invalidates_the_snapshot(ctx: RequestContext) {
        let created = employee(Some("Grace Hopper"), Some(95_000));
        let source = Arc::new(
            ScriptedSource::default()
                .with_lists(vec![Ok(staff()), Ok(staff())])
                .with_creates(vec![Ok(created.clone())]),
        );
        let service = service(&source);

        service.list_all(&ctx).await.expect("first list");
        let result = service
            .create(&ctx, create_request())
            .await
            .expect("create succeeds");
        service.list_all(&ctx).await.expect("second list");

        assert_eq!(result, created);
        assert_eq!(source.list_calls(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_create_keeps_the_snapshot(ctx: RequestContext) {
        let source = Arc::new(
            ScriptedSource::default()
                .with_lists(vec![Ok(staff())])
                .with_creates(vec![Err(DirectorySourceError::rejected(400_u16, "bad"))]),
        );
        let service = service(&source);

        service.list_all(&ctx).await.expect("first list");
        let error = service
            .create(&ctx, create_request())
            .await
            .expect_err("create rejected");
        service.list_all(&ctx).await.expect("cached list");

        assert_eq!(error.code(), ErrorCode::UpstreamError);
        assert_eq!(source.list_calls(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_resolves_name_and_invalidates(ctx: RequestContext) {
        let entries = staff();
        let target = entries[0].id();
        let source = Arc::new(
            ScriptedSource::default()
                .with_lists(vec![Ok(entries), Ok(Vec::new())])
                .with_deletes(vec![Ok(true)]),
        );
        let service = service(&source);

        let name = service
            .delete_by_id(&ctx, target)
            .await
            .expect("delete succeeds");
        service.list_all(&ctx).await.expect("list after delete");

        assert_eq!(name, "John Doe");
        assert_eq!(
            *source.deleted_names.lock().expect("names mutex"),
            vec!["John Doe".to_owned()]
        );
        assert_eq!(source.list_calls(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn refused_delete_is_a_conflict_and_keeps_the_snapshot(ctx: RequestContext) {
        let entries = staff();
        let target = entries[1].id();
        let source = Arc::new(
            ScriptedSource::default()
                .with_lists(vec![Ok(entries)])
                .with_deletes(vec![Ok(false)]),
        );
        let service = service(&source);

        let error = service
            .delete_by_id(&ctx, target)
            .await
            .expect_err("delete refused");
        service.list_all(&ctx).await.expect("cached list");

        assert_eq!(error.code(), ErrorCode::DeletionConflict);
        assert_eq!(source.delete_calls(), 1);
        assert_eq!(source.list_calls(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_unknown_id_never_reaches_upstream(ctx: RequestContext) {
        let source = Arc::new(ScriptedSource::default().with_lists(vec![Ok(staff())]));
        let service = service(&source);

        let error = service
            .delete_by_id(&ctx, EmployeeId::random())
            .await
            .expect_err("unknown id");

        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(source.delete_calls(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_of_nameless_entry_is_a_conflict(ctx: RequestContext) {
        let entries = staff();
        let target = entries[2].id();
        let source = Arc::new(ScriptedSource::default().with_lists(vec![Ok(entries)]));
        let service = service(&source);

        let error = service
            .delete_by_id(&ctx, target)
            .await
            .expect_err("nameless entry");

        assert_eq!(error.code(), ErrorCode::DeletionConflict);
        assert_eq!(source.delete_calls(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn exhausted_list_surfaces_service_unavailable(ctx: RequestContext) {
        let source = Arc::new(ScriptedSource::default().with_lists(vec![
            Err(DirectorySourceError::rate_limited("429")),
            Err(DirectorySourceError::rate_limited("429")),
            Err(DirectorySourceError::rate_limited("429")),
            Ok(staff()),
        ]));
        let service = service(&source);

        let error = service.list_all(&ctx).await.expect_err("exhausted");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        assert_eq!(source.list_calls(), 3);

        let recovered = service.list_all(&ctx).await.expect("next call recovers");
        assert_eq!(recovered.len(), 3);
        assert_eq!(source.list_calls(), 4);
    }
}
