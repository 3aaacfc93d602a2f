/*
 * Responsibility
 * - Register/login request DTOs with format-level validate()
 * - Token response DTO
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.first_name.trim().is_empty() {
            return Err("first_name is required");
        }
        if self.last_name.trim().is_empty() {
            return Err("last_name is required");
        }
        validate_email(&self.email)?;
        if self.password.len() < 8 {
            return Err("password must be at least 8 chars");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err("password is required");
        }
        Ok(())
    }
}

fn validate_email(email: &str) -> Result<(), &'static str> {
    // Format check only; the store owns uniqueness.
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err("email is required");
    }
    if !trimmed.contains('@') || trimmed.len() > 256 {
        return Err("email is not valid");
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}
