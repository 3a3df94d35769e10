//! Admin authentication.
//!
//! Login posts the credentials and stores the returned token in the
//! client's [`Session`](crate::session::Session); every later request
//! carries it as a bearer header. A 401 on login means the credentials
//! were wrong, which is reported distinctly from the backend being down.

use crate::client::ApiClient;
use crate::errors::ApiError;
use crate::models::{Credentials, LoginResponse, User};

const LOGIN_PATH: &str = "api/Auth/admin/login";
const USERS_PATH: &str = "api/Auth/users";

impl ApiClient {
    /// Authenticate as an admin and store the token in the session.
    pub async fn login(&self, credentials: &Credentials) -> Result<(), ApiError> {
        let response: LoginResponse = self
            .post_json_bare(LOGIN_PATH, credentials)
            .await
            .map_err(|err| {
                if err.is_unauthorized() {
                    ApiError::unauthorized("Invalid credentials")
                } else {
                    err
                }
            })?;
        let token = response
            .token
            .ok_or_else(|| ApiError::decode(LOGIN_PATH, "login reply carried no token"))?;
        self.session().set_token(token);
        Ok(())
    }

    /// Drop the stored token. Purely local; the backend holds no session.
    pub fn logout(&self) {
        self.session().clear();
    }

    /// The registered users (bare array, no envelope).
    pub async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_bare(USERS_PATH).await
    }
}
