//! Contact form and quick-contact links

use crate::booking::Confirmation;
use crate::error::FormError;
use crate::submission::{fields, SubmissionKind, SubmissionSink};

const PHONE: &str = "+919876543210";
const WHATSAPP: &str = "919876543210";
const EMAIL: &str = "info@netsandbirds.com";

/// One-tap contact buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickContact {
    Call,
    WhatsApp,
    Email,
}

impl QuickContact {
    pub const ALL: [QuickContact; 3] = [QuickContact::Call, QuickContact::WhatsApp, QuickContact::Email];

    pub fn label(&self) -> &'static str {
        match self {
            QuickContact::Call => "Call Now",
            QuickContact::WhatsApp => "WhatsApp",
            QuickContact::Email => "Email",
        }
    }

    /// Link the platform opens for this button
    pub fn url(&self) -> String {
        match self {
            QuickContact::Call => format!("tel:{PHONE}"),
            QuickContact::WhatsApp => format!(
                "https://wa.me/{WHATSAPP}?text=Hi, I would like to know more about your services."
            ),
            QuickContact::Email => format!("mailto:{EMAIL}?subject=Service Inquiry"),
        }
    }
}

/// Contact screen state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("phone", &self.phone),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Validate, hand the message to `sink` and clear the form
    pub fn submit<S: SubmissionSink>(&mut self, sink: &S) -> Result<Confirmation, FormError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            tracing::warn!(?missing, "contact message rejected");
            return Err(FormError::MissingFields(missing));
        }

        sink.submit(
            SubmissionKind::Contact,
            fields([
                ("name", self.name.as_str()),
                ("email", self.email.as_str()),
                ("phone", self.phone.as_str()),
                ("subject", self.subject.as_str()),
                ("message", self.message.as_str()),
            ]),
        );
        *self = Self::default();

        Ok(Confirmation {
            title: "Message Sent!",
            message: "Thank you for contacting us. We'll get back to you within 24 hours.".into(),
        })
    }
}
