use crate::error::StoreError;
use crate::profile::{AccountType, AvatarStyle, Profile};
use crate::repo::ProfileRepository;
use crate::session::Session;

/// What `resolve` did. Invalid input and the created-but-not-signed-in state
/// are explicit values here even though the default UI treats them silently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    SignedIn(Session),
    /// A profile row was written; the caller must resolve again to sign in.
    Created,
    /// Empty username, nothing happened.
    EmptyUsername,
}

/// Login-or-register. An existing username binds a session without touching
/// the store; `account_type` only matters on the registration branch —
/// returning users are never re-validated against their stored type.
pub async fn resolve(
    profiles: &impl ProfileRepository,
    requested_username: &str,
    account_type: AccountType,
) -> Result<ResolveOutcome, StoreError> {
    if requested_username.is_empty() {
        return Ok(ResolveOutcome::EmptyUsername);
    }
    if profiles.find_by_username(requested_username).await?.is_some() {
        return Ok(ResolveOutcome::SignedIn(Session::new(requested_username)));
    }
    profiles
        .append(Profile::new(requested_username, account_type))
        .await?;
    Ok(ResolveOutcome::Created)
}

/// Overwrite the session user's avatar URL and shape in place. A username
/// that vanished out-of-band matches zero rows and succeeds silently.
pub async fn update_appearance(
    profiles: &impl ProfileRepository,
    session: &Session,
    pfp: &str,
    style: AvatarStyle,
) -> Result<(), StoreError> {
    profiles
        .update_appearance(&session.username, pfp, style)
        .await
}
