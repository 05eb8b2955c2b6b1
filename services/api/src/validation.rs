//! Input validation producing field-level error lists
//!
//! Validators collect every violated field rather than stopping at the
//! first, so a single 400 response reports the full set of problems.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::FieldError;
use crate::models::{NewSweet, RegisterRequest, SweetPatch, SweetSearch};

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    })
}

/// Validate a registration payload
pub fn validate_registration(req: &RegisterRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if req.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }

    let email = req.email.trim();
    if email.is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if email.len() > 254 || !email_regex().is_match(email) {
        errors.push(FieldError::new("email", "Invalid email format"));
    }

    if req.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if req.password.len() < 6 {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters long",
        ));
    }

    errors
}

/// Validate a sweet creation payload
pub fn validate_new_sweet(sweet: &NewSweet) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if sweet.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Sweet name is required"));
    }
    if sweet.category.trim().is_empty() {
        errors.push(FieldError::new("category", "Category is required"));
    }
    if !sweet.price.is_finite() || sweet.price < 0.0 {
        errors.push(FieldError::new("price", "Price must be a positive number"));
    }
    if sweet.quantity < 0 {
        errors.push(FieldError::new(
            "quantity",
            "Quantity must be a non-negative integer",
        ));
    }

    errors
}

/// Validate the supplied fields of a partial update
///
/// Absent fields are not validated; they stay untouched on the record.
pub fn validate_sweet_patch(patch: &SweetPatch) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            errors.push(FieldError::new("name", "Sweet name is required"));
        }
    }
    if let Some(category) = &patch.category {
        if category.trim().is_empty() {
            errors.push(FieldError::new("category", "Category is required"));
        }
    }
    if let Some(price) = patch.price {
        if !price.is_finite() || price < 0.0 {
            errors.push(FieldError::new("price", "Price must be a positive number"));
        }
    }
    if let Some(quantity) = patch.quantity {
        if quantity < 0 {
            errors.push(FieldError::new(
                "quantity",
                "Quantity must be a non-negative integer",
            ));
        }
    }

    errors
}

/// Validate supplied search filters
///
/// Price bounds must be non-negative numbers when present; absent filters
/// are not validated.
pub fn validate_search(query: &SweetSearch) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(min_price) = query.min_price {
        if !min_price.is_finite() || min_price < 0.0 {
            errors.push(FieldError::new(
                "minPrice",
                "Minimum price must be a positive number",
            ));
        }
    }
    if let Some(max_price) = query.max_price {
        if !max_price.is_finite() || max_price < 0.0 {
            errors.push(FieldError::new(
                "maxPrice",
                "Maximum price must be a positive number",
            ));
        }
    }

    errors
}

/// Validate a restock amount
pub fn validate_restock(quantity: i32) -> Vec<FieldError> {
    if quantity < 1 {
        vec![FieldError::new(
            "quantity",
            "Restock quantity must be at least 1",
        )]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: None,
        }
    }

    #[test]
    fn test_valid_registration_passes() {
        let req = register_request("Test User", "test@example.com", "password123");
        assert!(validate_registration(&req).is_empty());
    }

    #[test]
    fn test_registration_reports_every_violation() {
        let req = register_request("", "invalid-email", "123");
        let errors = validate_registration(&req);

        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "email", "password"]);
    }

    #[test]
    fn test_whitespace_only_name_is_rejected() {
        let req = register_request("   ", "test@example.com", "password123");
        let errors = validate_registration(&req);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    fn new_sweet(name: &str, category: &str, price: f64, quantity: i32) -> NewSweet {
        NewSweet {
            name: name.to_string(),
            category: category.to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_valid_sweet_passes() {
        assert!(validate_new_sweet(&new_sweet("Chocolate", "Chocolate", 2.0, 10)).is_empty());
        // Zero price and zero quantity are both legal
        assert!(validate_new_sweet(&new_sweet("Sample", "Candy", 0.0, 0)).is_empty());
    }

    #[test]
    fn test_invalid_sweet_reports_every_field() {
        let errors = validate_new_sweet(&new_sweet("", "", -1.0, -5));
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "category", "price", "quantity"]);
    }

    #[test]
    fn test_non_finite_price_is_rejected() {
        let errors = validate_new_sweet(&new_sweet("Fudge", "Candy", f64::NAN, 1));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "price");
    }

    #[test]
    fn test_patch_validates_only_supplied_fields() {
        // Empty patch is valid; nothing to check
        assert!(validate_sweet_patch(&SweetPatch::default()).is_empty());

        let patch = SweetPatch {
            price: Some(-0.5),
            ..Default::default()
        };
        let errors = validate_sweet_patch(&patch);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "price");

        let patch = SweetPatch {
            name: Some("  ".to_string()),
            quantity: Some(3),
            ..Default::default()
        };
        let errors = validate_sweet_patch(&patch);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn test_search_rejects_negative_price_bounds() {
        let query = SweetSearch {
            min_price: Some(-1.0),
            max_price: Some(-2.5),
            ..Default::default()
        };
        let errors = validate_search(&query);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["minPrice", "maxPrice"]);
    }

    #[test]
    fn test_search_accepts_absent_and_zero_bounds() {
        assert!(validate_search(&SweetSearch::default()).is_empty());

        let query = SweetSearch {
            min_price: Some(0.0),
            max_price: Some(10.0),
            ..Default::default()
        };
        assert!(validate_search(&query).is_empty());
    }

    #[test]
    fn test_restock_requires_positive_amount() {
        assert!(validate_restock(1).is_empty());
        assert!(validate_restock(50).is_empty());
        assert_eq!(validate_restock(0).len(), 1);
        assert_eq!(validate_restock(-3).len(), 1);
    }
}
