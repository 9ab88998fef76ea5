pub mod dynamo;
pub mod notifier;
pub mod store;

/// Runs an SDK future from the synchronous adapter traits.
///
/// Requires the multi-thread Tokio runtime the Lambda binaries start.
pub(crate) fn block_on<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
