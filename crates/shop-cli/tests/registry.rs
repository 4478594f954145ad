//! Seller registration through the in-memory registry.

use shop_cli::registry::{InMemoryRegistry, RegistrationService, RegistryError};
use shop_model::{SellerRegistration, SellerStatus};

fn payload(email: &str) -> SellerRegistration {
    SellerRegistration {
        business_name: "Corner Books".to_string(),
        owner_name: "Sam Lee".to_string(),
        email: email.to_string(),
        phone: "555-0100".to_string(),
        business_address: "1 Main St".to_string(),
        tax_id: None,
        password: "hunter2hunter2".to_string(),
        confirm_password: "hunter2hunter2".to_string(),
        categories: vec!["Books".to_string()],
    }
}

#[test]
fn accepted_sellers_start_pending() {
    let mut registry = InMemoryRegistry::new();
    let response = registry.register(&payload("books@example.com"));
    assert!(response.success);
    let id = response.seller_id.unwrap();
    assert_eq!(registry.status(id), Some(SellerStatus::Pending));
    assert_eq!(registry.pending().len(), 1);
    assert!(registry.get(id).is_some_and(|s| s.categories == ["Books"]));
}

#[test]
fn validation_failures_are_reported_together() {
    let mut registry = InMemoryRegistry::new();
    let mut form = payload("not-an-email");
    form.confirm_password = "different".to_string();
    form.categories.clear();

    let response = registry.register(&form);
    assert!(!response.success);
    assert_eq!(response.seller_id, None);
    assert_eq!(
        response.message,
        "email address is not valid: not-an-email; passwords do not match; \
         select at least one product category"
    );
    assert!(registry.is_empty());
}

#[test]
fn duplicate_email_is_rejected() {
    let mut registry = InMemoryRegistry::new();
    assert!(registry.register(&payload("books@example.com")).success);
    let second = registry.register(&payload("Books@Example.com"));
    assert!(!second.success);
    assert!(second.message.contains("already registered"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn review_decisions_are_final() {
    let mut registry = InMemoryRegistry::new();
    let first = registry.register(&payload("a@example.com")).seller_id.unwrap();
    let second = registry.register(&payload("b@example.com")).seller_id.unwrap();

    registry.approve(first).unwrap();
    registry.reject(second).unwrap();
    assert_eq!(registry.status(first), Some(SellerStatus::Approved));
    assert_eq!(registry.status(second), Some(SellerStatus::Rejected));
    assert!(registry.pending().is_empty());

    assert_eq!(
        registry.reject(first),
        Err(RegistryError::AlreadyDecided {
            id: first,
            status: SellerStatus::Approved,
        })
    );
    assert_eq!(registry.approve(99), Err(RegistryError::UnknownSeller(99)));
}

#[test]
fn response_serializes_for_clients() {
    let mut registry = InMemoryRegistry::new();
    let response = registry.register(&payload("books@example.com"));
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["seller_id"], 1);

    let rejected = registry.register(&payload("books@example.com"));
    let json = serde_json::to_value(&rejected).unwrap();
    assert!(json.get("seller_id").is_none());
}
