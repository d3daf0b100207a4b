//! Argument combinators
//!
//! Stateless helpers over `InvocationContext` for the common shapes of
//! handler argument handling: slicing a context for a sub-stage, decoding
//! a run of same-shaped argument groups, converting a missing-argument
//! abort into an absent value, and scoping completion suggestions to the
//! position currently being typed.

use crate::context::InvocationContext;
use crate::errors::ExecResult;

/// Derive a context for a sub-stage of the current invocation
///
/// The label becomes `ctx.label + " " + label_suffix`; the args are
/// `ctx.args` sliced from `position_index` to the end. A `position_index`
/// past the end yields an empty argument slice, never a failure.
pub fn sub_context<'a>(
    ctx: &InvocationContext<'a>,
    position_index: usize,
    label_suffix: &str,
) -> InvocationContext<'a> {
    let start = position_index.min(ctx.args.len());
    InvocationContext::new(
        ctx.issuer,
        format!("{} {}", ctx.label, label_suffix),
        &ctx.args[start..],
    )
}

/// Run `block`, treating a missing argument as an absent value
///
/// A missing-argument abort maps to `Ok(None)`; a normal value maps to
/// `Ok(Some(value))`.
///
/// # Errors
///
/// Any abort other than the missing-argument flavor propagates unchanged.
pub fn optional<T>(block: impl FnOnce() -> ExecResult<T>) -> ExecResult<Option<T>> {
    match block() {
        Ok(value) => Ok(Some(value)),
        Err(abort) if abort.is_missing_argument() => Ok(None),
        Err(abort) => Err(abort),
    }
}

/// Decode a run of same-shaped argument groups
///
/// Produces `(end - start) / stride` elements by invoking `block` at
/// `start, start + stride, start + 2 * stride, ...`, e.g. repeated
/// `<x> <y>` pairs with a stride of 2.
///
/// # Errors
///
/// The first abort returned by `block` propagates unchanged.
///
/// # Panics
///
/// Panics if `end <= start` or `stride < 1`; both are contract violations
/// in the caller, not issuer-visible conditions.
pub fn fixed_array<T>(
    start: usize,
    end: usize,
    stride: usize,
    mut block: impl FnMut(usize) -> ExecResult<T>,
) -> ExecResult<Vec<T>> {
    assert!(
        end > start,
        "fixed_array: end ({}) must be greater than start ({})",
        end,
        start
    );
    assert!(stride >= 1, "fixed_array: stride must be at least 1");

    let count = (end - start) / stride;
    let mut values = Vec::with_capacity(count);
    for slot in 0..count {
        values.push(block(start + slot * stride)?);
    }
    Ok(values)
}

/// Scope completion suggestions to the position currently being typed
///
/// Delegates to `block` with the argument at `index` only when the
/// argument count equals `index + 1`; otherwise returns no candidates.
pub fn completion_at(
    args: &[String],
    index: usize,
    block: impl FnOnce(&str) -> Vec<String>,
) -> Vec<String> {
    if args.len() == index + 1 {
        block(&args[index])
    } else {
        Vec::new()
    }
}
