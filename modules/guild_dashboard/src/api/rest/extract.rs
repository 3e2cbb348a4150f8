//! Session identity extractors
//!
//! The session layer of the host application stores the logged-in
//! [`SessionUser`] in the request extensions. The dashboard only reads it.

use crate::contract::SessionUser;
use axum::{extract::FromRequestParts, http::request::Parts, response::Redirect};
use std::convert::Infallible;

/// Where unauthenticated users are sent
pub const LOGIN_PATH: &str = "/auth/login";

/// Logged-in user; redirects to the login page otherwise
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionUser>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}

/// Logged-in user, if any
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<SessionUser>);

impl<S> FromRequestParts<S> for MaybeUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<SessionUser>().cloned()))
    }
}
