//! Role and ownership guards. Guarded operations call one of these before touching
//! the store.

use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::client::{Actor, Role},
};

/// Requires an authenticated actor holding `role`.
///
/// No actor yields `Authentication`; an actor with another role yields
/// `Authorization`.
pub fn require_role(actor: Option<&Actor>, role: Role) -> BookingResult<&Actor> {
    let actor = actor
        .ok_or_else(|| BookingError::Authentication("Authentication required".to_string()))?;

    if actor.role != role {
        return Err(BookingError::Authorization(
            "Insufficient permissions".to_string(),
        ));
    }

    Ok(actor)
}

pub fn require_admin(actor: Option<&Actor>) -> BookingResult<&Actor> {
    require_role(actor, Role::Admin)
}

/// Admins may see everything; anyone else only records owned by their own id.
/// A missing actor is treated as a stranger.
pub fn ensure_owner_or_admin(actor: Option<&Actor>, owner_id: Uuid) -> BookingResult<()> {
    match actor {
        Some(actor) if actor.is_admin() || actor.id == owner_id => Ok(()),
        _ => Err(BookingError::Authorization(
            "Insufficient permissions".to_string(),
        )),
    }
}
