//! One-shot user-facing messages.
//!
//! A [`Flash`] is attached to the response that follows a create, delete or
//! rejected submission and is shown on the next rendered page only.

/// Severity of a flash message; also the CSS class it renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// `Patient '{name}' added successfully.`
    pub fn patient_added(name: &str) -> Self {
        Self::success(format!("Patient '{name}' added successfully."))
    }

    /// `Patient '{name}' removed.`
    pub fn patient_removed(name: &str) -> Self {
        Self::success(format!("Patient '{name}' removed."))
    }

    pub fn patient_not_found() -> Self {
        Self::error("Patient not found.")
    }
}
