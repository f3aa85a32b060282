// src/presentation/http/extractors.rs
//
// The session collaborator in front of this service verifies the caller
// and injects the actor identity as headers. These extractors only parse;
// they never consult the store.
use crate::{
    application::{dto::AuthenticatedActor, error::ApplicationError},
    domain::actor::{ActorId, Role},
};
use axum::{extract::FromRequestParts, http::request::Parts};
use std::str::FromStr;

use super::error::HttpError;

pub const ACTOR_ID_HEADER: &str = "x-actor-id";
pub const ACTOR_ROLE_HEADER: &str = "x-actor-role";

#[derive(Debug, Clone, Copy)]
pub struct Authenticated(pub AuthenticatedActor);

fn unauthenticated(msg: &str) -> HttpError {
    HttpError::from_error(ApplicationError::unauthenticated(msg))
}

fn actor_from_parts(parts: &Parts) -> Result<AuthenticatedActor, HttpError> {
    let id_raw = parts
        .headers
        .get(ACTOR_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| unauthenticated("missing actor identity"))?;
    let id = id_raw
        .parse::<i64>()
        .ok()
        .and_then(|id| ActorId::new(id).ok())
        .ok_or_else(|| unauthenticated("malformed actor identity"))?;

    let role_raw = parts
        .headers
        .get(ACTOR_ROLE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| unauthenticated("missing actor role"))?;
    let role =
        Role::from_str(role_raw).map_err(|_| unauthenticated("malformed actor role"))?;

    Ok(AuthenticatedActor { id, role })
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        actor_from_parts(parts).map(Self)
    }
}
