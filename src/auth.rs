//! Deferred authentication credentials.
//!
//! Credentials in a load test are per-virtual-user: the username and
//! password are expressions evaluated against an execution context (the
//! virtual user's session) at request time, not fixed strings. The realm
//! builders here compose two such expressions into one that produces the
//! realm, short-circuiting on the first evaluation failure and passing
//! that failure through unchanged. A missing credential is a scenario
//! configuration error the caller has to surface.

use crate::errors::EvalError;

/// A deferred, context-dependent computation. The context type is owned by
/// the expression-evaluation collaborator and opaque to this crate.
pub type Expression<C, T> = Box<dyn Fn(&C) -> Result<T, EvalError> + Send + Sync>;

/// Resolved authentication credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Realm {
    Basic { username: String, password: String },
    Digest { username: String, password: String },
}

/// Defers construction of a Basic realm until a context is supplied.
pub fn basic_auth_realm<C: 'static>(
    username: Expression<C, String>,
    password: Expression<C, String>,
) -> Expression<C, Realm> {
    Box::new(move |ctx| {
        let username = username(ctx)?;
        let password = password(ctx)?;
        Ok(Realm::Basic { username, password })
    })
}

/// Defers construction of a Digest realm until a context is supplied.
pub fn digest_auth_realm<C: 'static>(
    username: Expression<C, String>,
    password: Expression<C, String>,
) -> Expression<C, Realm> {
    Box::new(move |ctx| {
        let username = username(ctx)?;
        let password = password(ctx)?;
        Ok(Realm::Digest { username, password })
    })
}
