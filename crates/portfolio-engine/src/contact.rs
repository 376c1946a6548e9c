//! Contact form stub. Simulates sending; nothing leaves the process.

use std::fmt;
use std::time::Duration;

/// Simulated time between submitting and the success message
pub const SEND_LATENCY: Duration = Duration::from_millis(1500);
/// How long the success message stays up
pub const STATUS_LINGER: Duration = Duration::from_millis(5000);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please fill in the {0} field")]
    MissingField(FormField),
    #[error("A message is already being sent")]
    AlreadySending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Message => "message",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Sending,
    Sent,
}

impl FormStatus {
    /// Text shown under the submit button, if any
    pub fn message(self) -> Option<&'static str> {
        match self {
            FormStatus::Idle => None,
            FormStatus::Sending => Some("Sending..."),
            FormStatus::Sent => Some("Message Sent! I will get back to you soon."),
        }
    }
}

/// Identifies one accepted submission. Timers holding an older ticket
/// cannot touch the status of a newer send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendTicket(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    status: FormStatus,
    sends: u64,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn is_sending(&self) -> bool {
        self.status == FormStatus::Sending
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Name => self.name = value,
            FormField::Email => self.email = value,
            FormField::Message => self.message = value,
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    /// Validate and start the simulated send
    pub fn submit(&mut self) -> Result<SendTicket, ContactError> {
        if self.is_sending() {
            return Err(ContactError::AlreadySending);
        }
        for field in [FormField::Name, FormField::Email, FormField::Message] {
            if self.get(field).trim().is_empty() {
                return Err(ContactError::MissingField(field));
            }
        }

        log::info!(
            "Contact form submitted: name={:?} email={:?} message_len={}",
            self.name,
            self.email,
            self.message.len()
        );
        self.status = FormStatus::Sending;
        self.sends += 1;
        Ok(SendTicket(self.sends))
    }

    fn is_current(&self, ticket: SendTicket) -> bool {
        ticket.0 == self.sends
    }

    /// Simulated send finished: show the success message and clear the fields
    pub fn complete_send(&mut self, ticket: SendTicket) {
        if self.status != FormStatus::Sending || !self.is_current(ticket) {
            return;
        }
        self.name.clear();
        self.email.clear();
        self.message.clear();
        self.status = FormStatus::Sent;
    }

    pub fn clear_status(&mut self, ticket: SendTicket) {
        if self.status == FormStatus::Sent && self.is_current(ticket) {
            self.status = FormStatus::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.set(FormField::Name, "Ada");
        form.set(FormField::Email, "ada@example.com");
        form.set(FormField::Message, "Let's build something");
        form
    }

    #[test]
    fn test_submit_walks_through_statuses() {
        let mut form = filled();

        let ticket = form.submit().unwrap();
        assert_eq!(form.status().message(), Some("Sending..."));

        form.complete_send(ticket);
        assert_eq!(form.status(), FormStatus::Sent);
        assert_eq!(form.get(FormField::Name), "");

        form.clear_status(ticket);
        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(form.status().message(), None);
    }

    #[test]
    fn test_blank_fields_are_rejected() {
        let mut form = filled();
        form.set(FormField::Email, "   ");

        assert_eq!(form.submit(), Err(ContactError::MissingField(FormField::Email)));
        assert_eq!(form.status(), FormStatus::Idle);
    }

    #[test]
    fn test_double_submit_is_rejected() {
        let mut form = filled();
        form.submit().unwrap();

        assert_eq!(form.submit(), Err(ContactError::AlreadySending));
    }

    #[test]
    fn test_earlier_send_cannot_clear_later_status() {
        let mut form = filled();
        let first = form.submit().unwrap();
        form.complete_send(first);

        form.set(FormField::Name, "Grace");
        form.set(FormField::Email, "grace@example.com");
        form.set(FormField::Message, "Another idea");
        let second = form.submit().unwrap();
        form.complete_send(first);
        assert_eq!(form.status(), FormStatus::Sending);

        form.complete_send(second);
        form.clear_status(first);
        assert_eq!(form.status(), FormStatus::Sent);

        form.clear_status(second);
        assert_eq!(form.status(), FormStatus::Idle);
    }
}
