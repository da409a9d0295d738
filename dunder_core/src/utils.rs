/// Match `$e` against `$pat` and evaluate to `Some($out)` on success.
///
/// ```
/// # use dunder_core::patma;
/// let n = Some(3);
/// assert_eq!(patma!(n * 2, Some(n) in n), Some(6));
/// ```
#[macro_export]
macro_rules! patma {
    ($out:expr, $pat:pat in $e:expr) => {
        match $e {
            $pat => Some($out),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    };
}
