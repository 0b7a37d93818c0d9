//! Tuple joins over `Result`.
//!
//! Keyword translation often runs several independent lowering steps (a
//! condition, a truthy branch, a falsy branch) and joins the outcomes:
//! success of all, or the *first* error in argument order. Inputs are
//! already-computed `Result`s; `all*` only selects, it never evaluates.

pub fn all2<A, B, E>(a: Result<A, E>, b: Result<B, E>) -> Result<(A, B), E> {
    Ok((a?, b?))
}

pub fn all3<A, B, C, E>(
    a: Result<A, E>,
    b: Result<B, E>,
    c: Result<C, E>,
) -> Result<(A, B, C), E> {
    Ok((a?, b?, c?))
}

pub fn all4<A, B, C, D, E>(
    a: Result<A, E>,
    b: Result<B, E>,
    c: Result<C, E>,
    d: Result<D, E>,
) -> Result<(A, B, C, D), E> {
    Ok((a?, b?, c?, d?))
}
