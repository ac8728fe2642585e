//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler of `Args`.
///
/// Queries, document stores and other services are all expressed as
/// [`Handler`]s of the operations they support, so that any of them can be
/// substituted with another implementation of the same operation.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
