pub use folio_utils_derive::trace_instrument;

pub trait Apply {
    /// Applies the function `f` with a mutable reference to `self`.
    fn with<X>(mut self, f: impl FnOnce(&mut Self) -> X) -> Self
    where
        Self: Sized,
    {
        f(&mut self);
        self
    }

    /// Passes `self` to `f` and returns the result.
    fn apply<U>(self, f: impl FnOnce(Self) -> U) -> U
    where
        Self: Sized,
    {
        f(self)
    }

    /// Applies the function `f` only if `value` is `Some(...)` and provides the
    /// contained value to `f`.
    ///
    /// #### Example
    /// ```rust
    /// # use folio_utils::Apply;
    /// fn add_option(a: i32, b: Option<i32>) -> i32 {
    ///     a.apply_map(b, |slf, arg| slf + arg)
    /// }
    /// assert_eq!(add_option(1, None), 1);
    /// assert_eq!(add_option(1, Some(2)), 3);
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        if let Some(value) = value {
            f(self, value)
        } else {
            self
        }
    }
}

impl<T> Apply for T {}

/// Version string reported by the binary, e.g. `0.0.0`.
pub const fn folio_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables)]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum Shape {
        Circle(u32),
        Square,
    }

    #[test]
    fn with_mutates_in_place() {
        let result = vec![3, 1, 2].with(|v| v.sort());
        assert_eq!(result, [1, 2, 3]);
    }

    #[test]
    fn apply_chains() {
        let add = |x: i32| x + 1;
        assert_eq!(1.apply(add).apply(add).apply(|x| x.to_string()), "3");
    }

    #[test]
    fn assert_matches_with_guard() {
        assert_matches!(Shape::Circle(4), Shape::Circle(r) if *r == 4);
        assert_matches!(Shape::Square, Shape::Square);
    }

    #[test]
    #[should_panic(expected = "did not match pattern")]
    fn assert_matches_fails() {
        assert_matches!(Shape::Square, Shape::Circle(_));
    }
}
