//! Operations [`Handler`]s are executed with.
//!
//! [`Handler`]: crate::Handler

use std::marker::PhantomData;

/// Reading operation, never modifying the data it's executed on.
#[derive(Clone, Copy, Debug)]
pub struct Select<T>(pub T);

/// Criterion `B` of selecting a `W` value.
///
/// `W` distinguishes operations sharing the same criterion but resulting in
/// different values.
#[derive(Clone, Copy, Debug)]
pub struct By<W, B> {
    /// Type of the selected value.
    _what: PhantomData<W>,

    /// Criterion of the selection.
    by: B,
}

impl<W, B> By<W, B> {
    /// Wraps the provided criterion.
    #[must_use]
    pub const fn new(by: B) -> Self {
        Self {
            _what: PhantomData,
            by,
        }
    }

    /// Unwraps the criterion of this [`By`].
    #[must_use]
    pub fn into_inner(self) -> B {
        self.by
    }
}
