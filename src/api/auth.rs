use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::models::user::{LoginResponse, User};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let endpoint = "/auth/login";
        let request = self.http.post(self.api_url(endpoint)).json(&Credentials { email, password });
        self.fetch(request, endpoint).await
    }

    pub async fn logout(&self, token: Option<&str>) -> Result<(), ApiError> {
        let endpoint = "/auth/logout";
        let mut request = self.http.post(self.api_url(endpoint));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        self.execute(request, endpoint).await
    }

    pub async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        let endpoint = "/auth/me";
        self.fetch(self.http.get(self.api_url(endpoint)).bearer_auth(token), endpoint).await
    }
}
