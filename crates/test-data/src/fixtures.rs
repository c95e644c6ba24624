//! Static fixtures shared by the suites: target URLs, credentials, form
//! payloads, timeout profile, named viewports, endpoints, and the selectors
//! the demo pages use.

use std::time::Duration;

use pageprobe_core_types::Viewport;
use serde::{Deserialize, Serialize};

/// Third-party demo sites the suites exercise.
pub mod urls {
    pub const TODO_APP: &str = "https://demo.playwright.dev/todomvc/";
    pub const FORMS_DEMO: &str = "https://demoqa.com";
    pub const ECOMMERCE: &str = "https://demo.opencart.com/";
    pub const DOCS: &str = "https://playwright.dev/";
    pub const API: &str = "https://jsonplaceholder.typicode.com";
}

/// JSON API endpoint paths.
pub mod endpoints {
    pub const USERS: &str = "/users";
    pub const POSTS: &str = "/posts";
    pub const COMMENTS: &str = "/comments";
    pub const ALBUMS: &str = "/albums";
    pub const PHOTOS: &str = "/photos";
}

/// Selectors common across the demo pages.
pub mod selectors {
    pub const SUBMIT: &str = "[type=\"submit\"]";
    pub const CANCEL: &str = "[data-testid=\"cancel\"]";
    pub const SAVE: &str = "[data-testid=\"save\"]";
    pub const DELETE: &str = "[data-testid=\"delete\"]";
    pub const TEXT_INPUT: &str = "input[type=\"text\"]";
    pub const EMAIL_INPUT: &str = "input[type=\"email\"]";
    pub const PASSWORD_INPUT: &str = "input[type=\"password\"]";
    pub const CHECKBOX: &str = "input[type=\"checkbox\"]";
    pub const RADIO: &str = "input[type=\"radio\"]";
    pub const SELECT: &str = "select";
    pub const TEXTAREA: &str = "textarea";
    pub const NAV_MENU: &str = ".navbar";
    pub const BREADCRUMB: &str = ".breadcrumb";
    pub const PAGINATION: &str = ".pagination";
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestUser {
    pub username: String,
    pub password: String,
    pub email: String,
    pub role: String,
}

/// The three standing demo accounts.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Users {
    pub admin: TestUser,
    pub user: TestUser,
    pub guest: TestUser,
}

pub fn users() -> Users {
    Users {
        admin: TestUser {
            username: "admin".into(),
            password: "admin123".into(),
            email: "admin@example.com".into(),
            role: "admin".into(),
        },
        user: TestUser {
            username: "testuser".into(),
            password: "Test123!".into(),
            email: "user@example.com".into(),
            role: "user".into(),
        },
        guest: TestUser {
            username: "guest".into(),
            password: "guest123".into(),
            email: "guest@example.com".into(),
            role: "guest".into(),
        },
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub category: String,
    pub price: u32,
}

pub fn products() -> Vec<Product> {
    vec![
        Product {
            name: "iPhone".into(),
            category: "Electronics".into(),
            price: 999,
        },
        Product {
            name: "Laptop".into(),
            category: "Electronics".into(),
            price: 1299,
        },
        Product {
            name: "Book".into(),
            category: "Education".into(),
            price: 29,
        },
    ]
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

pub fn contact_form() -> ContactForm {
    ContactForm {
        name: "John Doe".into(),
        email: "john.doe@example.com".into(),
        phone: "+1234567890".into(),
        message: "This is a test message for contact form".into(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

pub fn registration_form() -> RegistrationForm {
    RegistrationForm {
        first_name: "Jane".into(),
        last_name: "Smith".into(),
        email: "jane.smith@example.com".into(),
        password: "SecurePass123!".into(),
        confirm_password: "SecurePass123!".into(),
    }
}

pub fn todos() -> Vec<String> {
    [
        "Buy groceries",
        "Walk the dog",
        "Read a book",
        "Complete project",
        "Call dentist",
    ]
    .map(String::from)
    .to_vec()
}

/// Standard wait budgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeouts {
    pub short: Duration,
    pub medium: Duration,
    pub long: Duration,
    pub api: Duration,
}

pub fn timeouts() -> Timeouts {
    Timeouts {
        short: Duration::from_secs(5),
        medium: Duration::from_secs(10),
        long: Duration::from_secs(30),
        api: Duration::from_secs(15),
    }
}

/// Named viewports for responsive passes, in the order suites sweep them.
pub fn viewports() -> Vec<(&'static str, Viewport)> {
    vec![
        ("mobile", Viewport::new(375, 667)),
        ("tablet", Viewport::new(768, 1024)),
        ("desktop", Viewport::new(1920, 1080)),
        ("small-desktop", Viewport::new(1366, 768)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_catalog_is_stable() {
        assert_eq!(users().admin.username, "admin");
        assert_eq!(products().len(), 3);
        assert_eq!(todos().len(), 5);
        assert_eq!(viewports().len(), 4);
        assert_eq!(timeouts().medium, Duration::from_secs(10));
    }

    #[test]
    fn registration_passwords_match() {
        let form = registration_form();
        assert_eq!(form.password, form.confirm_password);
    }
}
