//! Declarative sugar for short value-to-value chains.

/// Apply a sequence of unary value actions to a context, then flush.
///
/// Each row is either `inject(expr) => action`, which overrides the previous
/// result with `expr`, or `previous => action`, which threads the previous
/// result through. Rows expand to consecutive
/// [`apply_unary_value`](crate::Context::apply_unary_value) calls followed by
/// one [`flush`](crate::Context::flush), so the macro evaluates to the
/// `(Option<Value>, Option<E>)` snapshot.
///
/// The context must be a binding, not a temporary.
///
/// ```
/// use fuseline::{chain, expect_value, Context, Value};
///
/// let mut ctx: Context<String> = Context::new();
/// let (result, error) = chain!(ctx, {
///     inject(1_i32) => |v| Ok(Some(Value::new(expect_value::<i32>(v) + 1))),
///     previous      => |v| Ok(Some(Value::new(expect_value::<i32>(v) * 6))),
/// });
///
/// assert!(error.is_none());
/// assert_eq!(expect_value::<i32>(result), 12);
/// ```
#[macro_export]
macro_rules! chain {
    (
        $ctx:ident, {
            $( $kind:tt $(( $value:expr ))? => $action:expr ),+ $(,)?
        }
    ) => {{
        $(
            $crate::chain!(@apply $ctx, $kind $(($value))?, $action);
        )+
        $ctx.flush()
    }};

    (@apply $ctx:ident, inject($value:expr), $action:expr) => {
        $ctx.apply_unary_value($action, $crate::ActionArg::inject($value))
    };

    (@apply $ctx:ident, previous, $action:expr) => {
        $ctx.apply_unary_value($action, $crate::ActionArg::use_previous())
    };
}
