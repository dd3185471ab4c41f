//! Admin account operations: login, credential rotation, profile, seeding.
//!
//! These functions work with any [`FullRepository`] and never log passwords or
//! tokens.

use chrono::Utc;
use log::{info, warn};
use thiserror::Error;

use crate::auth::{AuthError, PasswordHasher, TokenIssuer};
use crate::db::repository::{FullRepository, RepositoryError};
use crate::models::validation::{require, require_email};
use crate::models::{normalize_email, Admin, AdminProfile, DocumentId, ValidationError};

/// Failures of admin account operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Email or password must be provided")]
    NothingToUpdate,

    #[error("Current password is required to change the password")]
    CurrentPasswordRequired,

    #[error("Current password is incorrect")]
    CurrentPasswordIncorrect,

    #[error("Email is already in use")]
    EmailTaken,

    #[error("Admin not found")]
    NotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub admin: Admin,
}

/// Requested changes to an admin's credentials. Blank strings count as absent.
#[derive(Debug, Clone, Default)]
pub struct CredentialsUpdate {
    pub email: Option<String>,
    pub password: Option<String>,
    pub current_password: Option<String>,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Create the configured admin account unless one with that email exists.
///
/// Returns `true` when an account was created.
pub async fn ensure_default_admin<R: FullRepository + ?Sized>(
    repo: &R,
    hasher: &PasswordHasher,
    email: &str,
    password: &str,
) -> Result<bool, AdminError> {
    let email = normalize_email(email);
    // Any non-blank address, including `admin@localhost`.
    require("email", &email)?;
    if repo.find_admin_by_email(&email).await?.is_some() {
        info!("Default admin {} already present", email);
        return Ok(false);
    }

    let hash = hasher.hash(password).await?;
    match repo.insert_admin(Admin::new(email.as_str(), hash)).await {
        Ok(admin) => {
            info!("Created default admin {} ({})", admin.email, admin.id);
            Ok(true)
        }
        // Another instance seeded it first.
        Err(RepositoryError::Conflict { .. }) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Check credentials and issue a session token.
///
/// Unknown email and wrong password fail identically.
pub async fn login<R: FullRepository + ?Sized>(
    repo: &R,
    hasher: &PasswordHasher,
    tokens: &TokenIssuer,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<LoginOutcome, AdminError> {
    let (Some(email), Some(password)) = (present(email), present(password)) else {
        return Err(AdminError::MissingCredentials);
    };

    let email = normalize_email(email);
    let Some(admin) = repo.find_admin_by_email(&email).await? else {
        warn!("Login attempt for unknown admin {}", email);
        return Err(AdminError::InvalidCredentials);
    };

    if !hasher.verify(password, &admin.password_hash).await? {
        warn!("Login attempt with wrong password for admin {}", admin.id);
        return Err(AdminError::InvalidCredentials);
    }

    let token = tokens.issue(&admin)?;
    info!("Admin {} logged in", admin.id);
    Ok(LoginOutcome { token, admin })
}

/// Change the email and/or password of the admin `admin_id`.
pub async fn update_credentials<R: FullRepository + ?Sized>(
    repo: &R,
    hasher: &PasswordHasher,
    admin_id: &DocumentId,
    update: CredentialsUpdate,
) -> Result<AdminProfile, AdminError> {
    let new_email = present(update.email.as_deref()).map(normalize_email);
    let new_password = present(update.password.as_deref());
    if new_email.is_none() && new_password.is_none() {
        return Err(AdminError::NothingToUpdate);
    }

    let mut admin = match repo.get_admin(admin_id).await {
        Ok(admin) => admin,
        Err(e) if e.is_not_found() => return Err(AdminError::NotFound),
        Err(e) => return Err(e.into()),
    };

    if let Some(password) = new_password {
        let current = present(update.current_password.as_deref())
            .ok_or(AdminError::CurrentPasswordRequired)?;
        if !hasher.verify(current, &admin.password_hash).await? {
            warn!("Credential update with wrong current password for admin {}", admin.id);
            return Err(AdminError::CurrentPasswordIncorrect);
        }
        admin.password_hash = hasher.hash(password).await?;
    }

    if let Some(email) = new_email {
        require_email("email", &email)?;
        if let Some(other) = repo.find_admin_by_email(&email).await? {
            if other.id != admin.id {
                return Err(AdminError::EmailTaken);
            }
        }
        admin.email = email;
    }

    admin.updated_at = Utc::now();
    let admin = match repo.update_admin(admin).await {
        Ok(admin) => admin,
        Err(RepositoryError::Conflict { .. }) => return Err(AdminError::EmailTaken),
        Err(e) if e.is_not_found() => return Err(AdminError::NotFound),
        Err(e) => return Err(e.into()),
    };
    info!("Admin {} updated credentials", admin.id);
    Ok(admin.profile())
}

/// Public profile of the admin `admin_id`.
pub async fn get_profile<R: FullRepository + ?Sized>(
    repo: &R,
    admin_id: &DocumentId,
) -> Result<AdminProfile, AdminError> {
    match repo.get_admin(admin_id).await {
        Ok(admin) => Ok(admin.profile()),
        Err(e) if e.is_not_found() => Err(AdminError::NotFound),
        Err(e) => Err(e.into()),
    }
}
