// src/models/mod.rs

pub mod chapter;
pub mod question;
pub mod quiz;
pub mod score;
pub mod subject;
pub mod user;

/// A rejected form submission.
/// Carries the message shown to the user in the flash alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormError(pub &'static str);

/// Trims a form field and returns `None` when nothing is left.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
