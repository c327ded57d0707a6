//! UI/backend events and error modeling for the desktop GUI.

use client_core::{controller::NOTIFICATION_DURATION, ControllerEvent, Notification, NotificationStatus};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    Controller(ControllerEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    NotFound,
    Validation,
    Transport,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    CommandQueue,
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::NotFound => "Not found",
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("404") || message_lower.contains("not found") {
            UiErrorCategory::NotFound
        } else if message_lower.contains("invalid")
            || message_lower.contains("unusable")
            || message_lower.contains("malformed")
            || message_lower.contains("422")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("unreachable")
            || message_lower.contains("disconnect")
            || message_lower.contains("queue")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn to_notification(&self) -> Notification {
        let title = match self.context {
            UiErrorContext::BackendStartup => "Falha ao iniciar o aplicativo",
            UiErrorContext::CommandQueue => "Falha ao enviar comando",
        };
        Notification {
            title: title.to_string(),
            description: Some(format!("{}: {}", err_label(self.category), self.message)),
            status: NotificationStatus::Error,
            duration: NOTIFICATION_DURATION,
            is_closable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_startup_url_failure_as_validation() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "backend worker startup failure: unusable api url 'x': relative URL without a base",
        );
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert_eq!(err.context(), UiErrorContext::BackendStartup);
    }

    #[test]
    fn classifies_disconnected_worker_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::CommandQueue,
            "Backend command processor disconnected",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);

        let notification = err.to_notification();
        assert_eq!(notification.status, NotificationStatus::Error);
        assert_eq!(notification.title, "Falha ao enviar comando");
        assert_eq!(
            notification.description.as_deref(),
            Some("Transport: Backend command processor disconnected")
        );
    }
}
