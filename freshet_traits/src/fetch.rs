use std::future::Future;

use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;

/// Type erased failure returned by a [`ResourceFetcher`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Produces a fresh value of a resource. A fetcher is called repeatedly, possibly from several
/// tasks at once, so it must be shareable across threads.
///
/// The [`CancellationToken`] is the caller's execution context. Fetchers that can take a long
/// time should race their work against [`CancellationToken::cancelled`]; nothing else will
/// interrupt a fetch in progress.
///
/// Any closure of the shape `Fn(CancellationToken) -> impl Future<Output = Result<T, E>>` is a
/// fetcher:
///
/// ```rust
/// # use freshet_traits::fetch::ResourceFetcher;
/// # use tokio_util::sync::CancellationToken;
/// fn assert_fetcher<T>(_: &impl ResourceFetcher<T>) {}
///
/// let fetcher = |_ctx: CancellationToken| async { Ok::<_, std::io::Error>(42u32) };
/// assert_fetcher::<u32>(&fetcher);
/// ```
pub trait ResourceFetcher<T>: Send + Sync {
    /// Fetch a new value of the resource.
    fn fetch(&self, ctx: CancellationToken) -> BoxFuture<'_, Result<T, BoxError>>;
}

impl<T, F, Fut, E> ResourceFetcher<T> for F
where
    F: Fn(CancellationToken) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: 'static,
    E: Into<BoxError> + 'static,
{
    fn fetch(&self, ctx: CancellationToken) -> BoxFuture<'_, Result<T, BoxError>> {
        let pending = (self)(ctx);
        Box::pin(async move { pending.await.map_err(Into::into) })
    }
}
