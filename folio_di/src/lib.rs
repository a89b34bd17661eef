//! Minimal compile-time dependency injection.
//!
//! A [`Provider`] holds the leaf values (configs, connections). Every other
//! type implements [`Build`], usually via `#[derive(Build)]`, which assembles
//! it from its fields. Built values are memoized in the provider's
//! [`TypeMap`], so shared `#[state]` is only created once per provider.

extern crate self as folio_di;

use std::sync::Arc;

pub use folio_di_derive::Build;
pub use typemap::TypeMap;

mod macros;
mod typemap;

pub trait Provider: Sized {
    /// Memoized values that have already been built by this provider.
    fn cache(&mut self) -> &mut TypeMap;
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provide: Provider {
    fn provide<T: Build<Self>>(&mut self) -> T {
        T::build(self)
    }
}

impl<P: Provider> Provide for P {}

impl<P: Provider, T: Build<P>> Build<P> for Arc<T> {
    fn build(provider: &mut P) -> Self {
        if let Some(cached) = provider.cache().get::<Self>() {
            return Arc::clone(cached);
        }
        let built = Arc::new(T::build(provider));
        provider.cache().insert(Arc::clone(&built));
        built
    }
}
