use std::fmt::{Debug, Display};

/// Assertions on results, for tests.
///
/// Error expectations match on the error's message: `should_fail_with_error`
/// passes if the message contains the given text.
pub trait ResultExt: Sized {
    type Success;
    type Error;

    fn should_succeed(self) -> Self::Success;

    fn should_fail(self) -> Self::Error;

    fn should_succeed_and<F>(self, predicate: F) -> Self::Success
    where
        Self::Success: Debug,
        F: FnOnce(&Self::Success) -> bool,
    {
        let value = self.should_succeed();
        if !predicate(&value) {
            panic!("succeeded, but {value:?} doesn't satisfy the predicate");
        }
        value
    }

    fn should_succeed_and_equal<U>(self, expect: U) -> Self::Success
    where
        Self::Success: Debug + PartialEq<U>,
        U: Debug,
    {
        let value = self.should_succeed();
        assert_eq!(value, expect, "succeeded with an unexpected value");
        value
    }

    fn should_fail_and<F>(self, predicate: F) -> Self::Error
    where
        Self::Error: Display,
        F: FnOnce(&Self::Error) -> bool,
    {
        let err = self.should_fail();
        if !predicate(&err) {
            panic!("failed, but `{err}` doesn't satisfy the predicate");
        }
        err
    }

    fn should_fail_with_error<M>(self, message: M) -> Self::Error
    where
        Self::Error: Display,
        M: Display,
    {
        let err = self.should_fail();
        let (actual, expect) = (err.to_string(), message.to_string());
        if !actual.contains(&expect) {
            panic!("failed with `{actual}`, expecting an error containing `{expect}`");
        }
        err
    }
}

impl<T, E> ResultExt for Result<T, E>
where
    T: Debug,
    E: Display,
{
    type Error = E;
    type Success = T;

    fn should_succeed(self) -> T {
        self.unwrap_or_else(|err| panic!("expecting success, failed with `{err}`"))
    }

    fn should_fail(self) -> E {
        match self {
            Ok(value) => panic!("expecting failure, succeeded with {value:?}"),
            Err(err) => err,
        }
    }
}

// ----------------------------------- tests -----------------------------------
