// src/domain/policy.rs
//
// Access decisions for the article workflow. Pure functions so the
// mutation services and the list query share one source of truth.
use crate::domain::actor::{ActorId, Role};

/// Contributors may only touch their own articles; maintainers and owners
/// may touch any.
pub fn can_edit(role: Role, actor_id: ActorId, creator_id: ActorId) -> bool {
    match role {
        Role::Maintainer | Role::Owner => true,
        Role::Contributor => actor_id == creator_id,
    }
}

/// Approval and publication are reserved for maintainers and owners.
pub fn can_approve_or_publish(role: Role) -> bool {
    matches!(role, Role::Maintainer | Role::Owner)
}

/// How a listing must be filtered for the given actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    All,
    CreatedBy(ActorId),
}

pub fn list_scope(role: Role, actor_id: ActorId) -> ListScope {
    match role {
        Role::Maintainer | Role::Owner => ListScope::All,
        Role::Contributor => ListScope::CreatedBy(actor_id),
    }
}
