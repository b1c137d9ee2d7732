//! Loader Contract
//!
//! A group calls its [`Getter`] on a cache miss to fetch the value from the
//! source of truth.

/// Source-of-truth loader for one group.
///
/// Implementations own their timeout and retry policy; the group calls
/// `get` once per miss and passes any error straight back to its caller.
pub trait Getter: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Vec<u8>>;
}

impl<F> Getter for F
where
    F: Fn(&str) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    fn get(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        self(key)
    }
}

// == Getter Fn ==
/// Named adapter turning a function into a [`Getter`].
///
/// Closures already implement [`Getter`]; this wrapper is for callers that
/// want a concrete type to store or name.
pub struct GetterFn<F>(pub F);

impl<F> Getter for GetterFn<F>
where
    F: Fn(&str) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    fn get(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        (self.0)(key)
    }
}
