//! Seller registration service.
//!
//! [`RegistrationService`] is the seam to whatever backend accepts seller
//! sign-ups. [`InMemoryRegistry`] keeps everything in process and backs the
//! `register` command and tests.

use serde::Serialize;
use shop_model::{SellerRegistration, SellerStatus};
use thiserror::Error;
use tracing::{info, warn};

/// Outcome of a registration attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<u64>,
}

impl RegistrationResponse {
    fn accepted(seller_id: u64) -> Self {
        Self {
            success: true,
            message: "registration received; an administrator will review it".to_string(),
            seller_id: Some(seller_id),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            seller_id: None,
        }
    }
}

/// Accepts seller registration payloads.
pub trait RegistrationService {
    fn register(&mut self, payload: &SellerRegistration) -> RegistrationResponse;
}

/// Errors from admin review operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no seller with id {0}")]
    UnknownSeller(u64),
    #[error("seller {id} was already {status}")]
    AlreadyDecided { id: u64, status: SellerStatus },
}

/// A registered seller as kept by the registry. Passwords are not retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SellerRecord {
    pub id: u64,
    pub business_name: String,
    pub owner_name: String,
    pub email: String,
    pub categories: Vec<String>,
    pub status: SellerStatus,
}

/// Registry holding sellers in memory.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    sellers: Vec<SellerRecord>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sellers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sellers.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&SellerRecord> {
        self.sellers.iter().find(|s| s.id == id)
    }

    pub fn status(&self, id: u64) -> Option<SellerStatus> {
        self.get(id).map(|s| s.status)
    }

    /// Sellers awaiting review, in registration order.
    pub fn pending(&self) -> Vec<&SellerRecord> {
        self.sellers
            .iter()
            .filter(|s| s.status == SellerStatus::Pending)
            .collect()
    }

    pub fn approve(&mut self, id: u64) -> Result<(), RegistryError> {
        self.decide(id, SellerStatus::Approved)
    }

    pub fn reject(&mut self, id: u64) -> Result<(), RegistryError> {
        self.decide(id, SellerStatus::Rejected)
    }

    fn decide(&mut self, id: u64, status: SellerStatus) -> Result<(), RegistryError> {
        let seller = self
            .sellers
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(RegistryError::UnknownSeller(id))?;
        if seller.status != SellerStatus::Pending {
            return Err(RegistryError::AlreadyDecided {
                id,
                status: seller.status,
            });
        }
        seller.status = status;
        info!(id, status = %status, "seller reviewed");
        Ok(())
    }

    fn email_taken(&self, email: &str) -> bool {
        self.sellers
            .iter()
            .any(|s| s.email.eq_ignore_ascii_case(email))
    }
}

impl RegistrationService for InMemoryRegistry {
    fn register(&mut self, payload: &SellerRegistration) -> RegistrationResponse {
        if let Err(errors) = payload.validate() {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            warn!(problems = errors.len(), "registration rejected");
            return RegistrationResponse::rejected(message);
        }
        let email = payload.email.trim();
        if self.email_taken(email) {
            warn!("registration rejected: email already registered");
            return RegistrationResponse::rejected(format!(
                "a seller with email {email} is already registered"
            ));
        }
        let id = self.sellers.len() as u64 + 1;
        self.sellers.push(SellerRecord {
            id,
            business_name: payload.business_name.trim().to_string(),
            owner_name: payload.owner_name.trim().to_string(),
            email: email.to_string(),
            categories: payload
                .categories
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(str::to_string)
                .collect(),
            status: SellerStatus::Pending,
        });
        info!(id, "seller registered");
        RegistrationResponse::accepted(id)
    }
}
