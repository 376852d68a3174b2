use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::AppError;

/// JSON request body whose rejections (bad syntax, missing fields, wrong
/// content type) come back as a validation error in the usual envelope.
pub struct JsonBody<T>(pub T);

/// The form a client should go back to when its body is unreadable.
fn form_for(path: &str) -> &'static str {
    match path {
        "/register" => "/register",
        "/login" => "/login",
        "/edit_profile" => "/edit_profile",
        _ => "/dashboard",
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let redirect_to = form_for(req.uri().path());
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                warn!(status = %rejection.status(), "rejected request body");
                Err(AppError::validation(rejection.body_text(), redirect_to))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_paths_fall_back_to_dashboard() {
        assert_eq!(form_for("/login"), "/login");
        assert_eq!(form_for("/edit_profile"), "/edit_profile");
        assert_eq!(form_for("/pulses/3/updates"), "/dashboard");
    }
}
