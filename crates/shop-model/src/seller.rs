//! Seller registration payloads and their field-level validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Field-level problem with a registration form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("email address is not valid: {0}")]
    InvalidEmail(String),
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("select at least one product category")]
    NoCategory,
}

/// Business details submitted by a prospective seller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerRegistration {
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub business_address: String,
    #[serde(default)]
    pub tax_id: Option<String>,
    pub password: String,
    pub confirm_password: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl SellerRegistration {
    /// Collects every field-level problem; an empty form reports them all.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let required = [
            ("business name", &self.business_name),
            ("owner name", &self.owner_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("business address", &self.business_address),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(ValidationError::Required { field });
            }
        }
        let email = self.email.trim();
        if !email.is_empty() && !looks_like_email(email) {
            errors.push(ValidationError::InvalidEmail(email.to_string()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        if self.password != self.confirm_password {
            errors.push(ValidationError::PasswordMismatch);
        }
        if self.categories.iter().all(|c| c.trim().is_empty()) {
            errors.push(ValidationError::NoCategory);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Admin review state of a registered seller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SellerStatus {
    Pending,
    Approved,
    Rejected,
}

impl SellerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SellerStatus::Pending => "pending",
            SellerStatus::Approved => "approved",
            SellerStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SellerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
