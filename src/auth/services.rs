use axum::extract::FromRef;
use tracing::{info, warn};

use crate::{
    auth::{
        dto::{LoginRequest, RegisterRequest},
        password::{hash_password, verify_password},
        session::SessionKeys,
    },
    error::AppError,
    state::AppState,
    store::StoreError,
    users::{
        repo::UserRepo,
        repo_types::{NewUser, User},
    },
};

/// Creates a user from a registration form. Does not log the user in.
pub async fn register(state: &AppState, payload: &RegisterRequest) -> Result<User, AppError> {
    if payload.confirm_password.as_deref() != Some(payload.password.as_str()) {
        warn!(email = %payload.email, "password confirmation mismatch");
        return Err(AppError::validation("Passwords do not match!", "/register"));
    }

    if state.store.find_user_by_email(&payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Conflict("Email already registered!".into()));
    }

    let hash = hash_password(&payload.password)?;

    let new_user = NewUser {
        email: &payload.email,
        password_hash: &hash,
        first_name: payload.first_name.as_deref(),
        last_name: payload.last_name.as_deref(),
    };
    let user = match state.store.create_user(new_user).await {
        Ok(u) => u,
        // lost a race with a concurrent registration of the same email
        Err(StoreError::UniqueViolation(_)) => {
            return Err(AppError::Conflict("Email already registered!".into()))
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Checks credentials and returns the user with a freshly signed session token.
pub async fn login(state: &AppState, payload: &LoginRequest) -> Result<(User, String), AppError> {
    let invalid = || AppError::Auth("Invalid email or password! Please try again.".into());

    let Some(user) = state.store.find_user_by_email(&payload.email).await? else {
        warn!(email = %payload.email, "login unknown email");
        return Err(invalid());
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, user_id = user.id, "login invalid password");
        return Err(invalid());
    }

    let token = SessionKeys::from_ref(state).sign(user.id)?;

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok((user, token))
}
