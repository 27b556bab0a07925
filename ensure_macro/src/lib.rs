/// A guard-clause macro: `ensure!(cond, err)` expands to
/// `if !cond { return Err(err); }`
///
/// Modeled on `anyhow::ensure!`, but returning the caller's own error type
/// so validation chains stay explicit about which variant fires.
///
/// ```
/// # use ensure_macro::ensure;
/// #[derive(Debug, PartialEq)]
/// enum FeeError {
///     InvalidPriority,
/// }
///
/// fn check_priority(priority: u32) -> Result<(), FeeError> {
///     ensure!(priority <= 4, FeeError::InvalidPriority);
///     Ok(())
/// }
///
/// assert_eq!(check_priority(9), Err(FeeError::InvalidPriority));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}
