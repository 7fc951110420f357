use std::sync::Arc;

use validator::Validate;

use crate::config::Config;
use crate::dto::auth_dto::{LoginPayload, MeResponse, RegisterPayload, TokenResponse, UserResponse};
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::repositories::{RecruiterRepository, SeekerRepository, UserRepository};
use crate::utils::crypto::{hash_password_blocking, verify_password_blocking};
use crate::utils::token::{decode_access_token, issue_access_token, Claims};
use crate::utils::validation::normalize_email;

const BAD_CREDENTIALS: &str = "Incorrect email or password";

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    recruiters: Arc<dyn RecruiterRepository>,
    seekers: Arc<dyn SeekerRepository>,
    jwt_secret: String,
    token_ttl_minutes: i64,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        recruiters: Arc<dyn RecruiterRepository>,
        seekers: Arc<dyn SeekerRepository>,
        config: &Config,
    ) -> Self {
        Self {
            users,
            recruiters,
            seekers,
            jwt_secret: config.jwt_secret.clone(),
            token_ttl_minutes: config.access_token_expire_minutes,
        }
    }

    pub async fn register(&self, mut payload: RegisterPayload) -> Result<UserResponse> {
        payload.email = normalize_email(&payload.email);
        payload.validate()?;
        let email = payload.email.clone();

        if self.users.find_user_by_email(&email).await?.is_some() {
            tracing::warn!(email = %email, "registration rejected, email already in use");
            return Err(Error::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password_blocking(payload.password).await?;
        let user = self
            .users
            .create_user(&email, &password_hash, payload.role)
            .await?;
        tracing::info!(user_id = user.id, role = user.role.as_str(), "user registered");
        Ok(user.into())
    }

    pub async fn login(&self, payload: LoginPayload) -> Result<TokenResponse> {
        payload.validate()?;
        let email = normalize_email(&payload.email);

        let Some(user) = self.users.find_user_by_email(&email).await? else {
            tracing::warn!("login failed for unknown email");
            return Err(Error::Authentication(BAD_CREDENTIALS.to_string()));
        };
        if !verify_password_blocking(payload.password, user.password_hash.clone()).await? {
            tracing::warn!(user_id = user.id, "login failed, wrong password");
            return Err(Error::Authentication(BAD_CREDENTIALS.to_string()));
        }

        let access_token = issue_access_token(&user, &self.jwt_secret, self.token_ttl_minutes)?;
        tracing::info!(user_id = user.id, "access token issued");
        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.token_ttl_minutes * 60,
        })
    }

    /// Signature and expiry only; the user row is not consulted.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        decode_access_token(token, &self.jwt_secret).map_err(|err| {
            tracing::debug!(error = %err, "token rejected");
            Error::Unauthorized("Could not validate credentials".to_string())
        })
    }

    /// Loads the account behind verified claims; a deleted account is
    /// unauthorized even while its token is still unexpired.
    pub async fn current_user(&self, claims: &Claims) -> Result<User> {
        self.users
            .get_user(claims.user_id()?)
            .await?
            .ok_or_else(|| Error::Unauthorized("User no longer exists".to_string()))
    }

    pub async fn me(&self, user: &User) -> Result<MeResponse> {
        let recruiter_profile = self.recruiters.find_recruiter_by_user(user.id).await?;
        let seeker_profile = self.seekers.find_seeker_by_user(user.id).await?;
        Ok(MeResponse {
            id: user.id,
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
            recruiter_profile,
            seeker_profile,
        })
    }

    pub async fn delete_self(&self, user: &User) -> Result<()> {
        if self.recruiters.find_recruiter_by_user(user.id).await?.is_some()
            || self.seekers.find_seeker_by_user(user.id).await?.is_some()
        {
            tracing::warn!(user_id = user.id, "account still owns a profile");
            return Err(Error::Conflict(
                "Delete your profile before deleting the account".to_string(),
            ));
        }
        if !self.users.delete_user(user.id).await? {
            return Err(Error::Unauthorized("User no longer exists".to_string()));
        }
        tracing::info!(user_id = user.id, "user deleted");
        Ok(())
    }
}
