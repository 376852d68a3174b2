use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct FollowResponse {
    pub notice: String,
    pub following: bool,
}
