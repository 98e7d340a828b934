//! Status Banner
//!
//! One dismissible banner per page. Components never write to it directly;
//! they hand an [`Alert`] to whoever owns the [`AlertState`].

use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Visual style of the banner
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Success,
    #[default]
    Info,
    Warning,
    Danger,
}

impl AlertLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    /// CSS class applied to the banner, e.g. `alert-danger`
    pub fn css_class(self) -> String {
        format!("alert-{}", self.as_str())
    }
}

/// How an error should reach the user
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertMode {
    /// Render into the shared banner
    #[default]
    Banner,
    /// Raise a blocking browser alert
    Blocking,
}

/// A message for the banner
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub message: String,
    pub level: AlertLevel,
}

impl Alert {
    pub fn new(message: impl Into<String>, level: AlertLevel) -> Self {
        Self {
            message: message.into(),
            level,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, AlertLevel::Success)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(message, AlertLevel::Danger)
    }

    /// Danger-styled alert carrying the classified message for `err`
    pub fn from_error(err: &ClientError) -> Self {
        tracing::warn!(error = %err, "request failed");
        Self::danger(err.user_message())
    }
}

/// Banner state: at most one alert, visible or dismissed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AlertState {
    current: Option<Alert>,
    visible: bool,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current alert and show the banner
    pub fn show(&mut self, alert: Alert) {
        self.current = Some(alert);
        self.visible = true;
    }

    /// Hide the banner, keeping the last alert
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    pub const fn current(&self) -> Option<&Alert> {
        self.current.as_ref()
    }

    /// The alert to render, if the banner is showing
    pub fn visible_alert(&self) -> Option<&Alert> {
        self.current.as_ref().filter(|_| self.visible)
    }
}
