//! Ownership and visibility rules shared by every aggregate.
//!
//! A missing or soft-deleted aggregate is reported as not found by the
//! caller before these checks run; an existing aggregate the requester may
//! not touch is always forbidden.

use crate::{Error, Result};

pub fn ensure_owner(owner_id: &str, user_id: &str, action: &str, resource: &str) -> Result<()> {
    if owner_id != user_id {
        tracing::warn!(user_id, resource, action, "ownership check failed");

        return Err(Error::Forbidden(format!(
            "unauthorized to {action} this {resource}"
        )));
    }

    Ok(())
}

pub fn ensure_readable(
    owner_id: &str,
    is_public: bool,
    viewer: Option<&str>,
    resource: &str,
) -> Result<()> {
    if is_public || viewer == Some(owner_id) {
        return Ok(());
    }

    Err(Error::Forbidden(format!(
        "unauthorized to access this {resource}"
    )))
}
