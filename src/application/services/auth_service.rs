//! Identity service: registration, login, Google login, profile management,
//! and security-question password recovery.
//!
//! Issues and verifies the HS256 bearer tokens consumed by the auth
//! middleware. Passwords and security answers are bcrypt-hashed; answers are
//! lowercased before hashing so recovery is case-insensitive.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::domain::entities::{NewUser, User, UserPatch};
use crate::domain::repositories::UserRepository;
use crate::domain::verifier::IdTokenVerifier;
use crate::error::AppError;

/// Bearer token lifetime: one day, matching the session length the frontend
/// expects.
const TOKEN_VALIDITY_HOURS: i64 = 24;

const MIN_PASSWORD_LENGTH: usize = 8;

/// JWT claims carried by issued bearer tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id, stringified.
    pub sub: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Input for [`AuthService::register`].
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub security_question: String,
    pub security_answer: String,
}

/// Input for [`AuthService::update_profile`]. `None` fields are unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Service for account management and bearer token issuance/verification.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    /// Google login is refused when no verifier is configured.
    verifier: Option<Arc<dyn IdTokenVerifier>>,
    jwt_secret: String,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        verifier: Option<Arc<dyn IdTokenVerifier>>,
        jwt_secret: String,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            verifier,
            jwt_secret,
            bcrypt_cost,
        }
    }

    /// Registers a password-based account with a recovery question.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a password under 8 characters and
    /// [`AppError::Conflict`] when the email or username is taken.
    pub async fn register(&self, input: Registration) -> Result<User, AppError> {
        validate_password(&input.password)?;

        if let Some(existing) = self
            .users
            .find_by_email_or_username(&input.email, &input.username)
            .await?
        {
            let field = if existing.email == input.email {
                "Email"
            } else {
                "Username"
            };
            return Err(AppError::conflict(
                format!("{field} already exists"),
                json!({ "field": field.to_lowercase() }),
            ));
        }

        let password_hash = self.hash(&input.password)?;
        let answer_hash = self.hash(&input.security_answer.to_lowercase())?;

        self.users
            .create(NewUser {
                username: input.username,
                email: input.email,
                password_hash: Some(password_hash),
                google_id: None,
                security_question: Some(input.security_question),
                security_answer_hash: Some(answer_hash),
            })
            .await
    }

    /// Authenticates an email/password pair and issues a bearer token.
    ///
    /// Missing account, Google-only account, and wrong password all surface
    /// as the same [`AppError::Unauthorized`] with a generic message.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, User), AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let hash = user.password_hash.as_deref().ok_or_else(invalid_credentials)?;

        let matches = bcrypt::verify(password, hash)
            .map_err(|_| AppError::internal("Password verification failed", json!({})))?;
        if !matches {
            return Err(invalid_credentials());
        }

        let token = self.sign_token(user.id)?;
        Ok((token, user))
    }

    /// Logs a user in with a Google ID token.
    ///
    /// First login for an unknown email creates an account with a generated
    /// username; a known email gets its Google subject attached so both
    /// login paths keep working.
    pub async fn google_login(&self, id_token: &str) -> Result<(String, User), AppError> {
        let verifier = self.verifier.as_ref().ok_or_else(|| {
            AppError::internal("Google login is not configured", json!({}))
        })?;

        let profile = verifier.verify(id_token).await?;

        let user = match self
            .users
            .find_by_google_id_or_email(&profile.subject, &profile.email)
            .await?
        {
            None => {
                self.users
                    .create(NewUser {
                        username: generate_username(&profile.name),
                        email: profile.email,
                        password_hash: None,
                        google_id: Some(profile.subject),
                        security_question: None,
                        security_answer_hash: None,
                    })
                    .await?
            }
            Some(user) if user.google_id.is_none() => {
                self.users
                    .update(
                        user.id,
                        UserPatch {
                            google_id: Some(profile.subject),
                            ..Default::default()
                        },
                    )
                    .await?
            }
            Some(user) => user,
        };

        let token = self.sign_token(user.id)?;
        Ok((token, user))
    }

    /// Fetches a user's own profile.
    pub async fn profile(&self, user_id: i64) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({})))
    }

    /// Updates username, email, and/or password.
    pub async fn update_profile(
        &self,
        user_id: i64,
        update: ProfileUpdate,
    ) -> Result<User, AppError> {
        // Existence check first so an unknown id is 404, not a silent no-op
        self.profile(user_id).await?;

        let password_hash = match update.password {
            Some(password) => {
                validate_password(&password)?;
                Some(self.hash(&password)?)
            }
            None => None,
        };

        self.users
            .update(
                user_id,
                UserPatch {
                    username: update.username,
                    email: update.email,
                    password_hash,
                    google_id: None,
                },
            )
            .await
    }

    /// Returns whether a username is free to register.
    pub async fn is_username_available(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.users.find_by_username(username).await?.is_none())
    }

    /// Returns the stored security question for a password reset.
    ///
    /// Google-linked accounts are refused; they have no recovery question.
    pub async fn forgot_password(&self, email: &str) -> Result<String, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({})))?;

        if user.is_google_linked() {
            return Err(AppError::bad_request(
                "Google accounts do not have security questions. Please login with Google.",
                json!({}),
            ));
        }

        user.security_question.ok_or_else(|| {
            AppError::bad_request("No security question on file for this account", json!({}))
        })
    }

    /// Resets a password after checking the security answer.
    pub async fn reset_password(
        &self,
        email: &str,
        security_answer: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({})))?;

        let answer_hash = user.security_answer_hash.as_deref().ok_or_else(|| {
            AppError::bad_request("No security question on file for this account", json!({}))
        })?;

        let matches = bcrypt::verify(security_answer.to_lowercase(), answer_hash)
            .map_err(|_| AppError::internal("Answer verification failed", json!({})))?;
        if !matches {
            return Err(AppError::bad_request("Incorrect security answer", json!({})));
        }

        validate_password(new_password)?;

        let password_hash = self.hash(new_password)?;
        self.users
            .update(
                user.id,
                UserPatch {
                    password_hash: Some(password_hash),
                    ..Default::default()
                },
            )
            .await?;

        Ok(())
    }

    /// Issues a bearer token for the given user id.
    pub fn sign_token(&self, user_id: i64) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (Utc::now() + Duration::hours(TOKEN_VALIDITY_HOURS)).timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|_| AppError::internal("Token signing failed", json!({})))
    }

    /// Verifies a bearer token and extracts the user id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for expired, malformed, or
    /// wrongly-signed tokens.
    pub fn verify_token(&self, token: &str) -> Result<i64, AppError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or expired token" }),
            )
        })?;

        data.claims.sub.parse().map_err(|_| {
            AppError::unauthorized("Unauthorized", json!({ "reason": "Malformed token subject" }))
        })
    }

    fn hash(&self, value: &str) -> Result<String, AppError> {
        bcrypt::hash(value, self.bcrypt_cost)
            .map_err(|_| AppError::internal("Hashing failed", json!({})))
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials", json!({}))
}

fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::bad_request(
            "Password must be at least 8 characters long",
            json!({ "min_length": MIN_PASSWORD_LENGTH }),
        ));
    }
    Ok(())
}

/// Derives a username from a Google display name: whitespace stripped,
/// lowercased, truncated to 10 characters, plus a 4-character random suffix
/// so first-login collisions stay improbable without a retry loop.
fn generate_username(name: &str) -> String {
    let base: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .take(10)
        .collect();
    let base = if base.is_empty() { "user".to_string() } else { base };

    let suffix: String = rand::rng()
        .sample_iter(Alphanumeric)
        .take(4)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();

    format!("{base}{suffix}")
}
