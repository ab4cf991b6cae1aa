//! Booking form and price estimate

use crate::catalog::{Pricing, ServiceId};
use crate::error::FormError;
use crate::submission::{fields, SubmissionKind, SubmissionSink};
use serde::Serialize;
use std::fmt;

pub const GRILL_SIZES: [&str; 3] = ["2mm", "2.5mm", "3mm"];
pub const SPIKE_TYPES: [&str; 2] = ["PVC (₹120)", "Stainless Steel (₹150)"];

/// Price shown under the form
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum Estimate {
    /// Not enough input to price
    None,
    /// Rupees
    Amount(f64),
    /// Priced after a site visit
    CustomQuote,
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Estimate::None => f.write_str("-"),
            Estimate::Amount(amount) => write!(f, "₹{amount}"),
            Estimate::CustomQuote => f.write_str("Custom Quote"),
        }
    }
}

/// Local acknowledgement after a successful submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub title: &'static str,
    pub message: String,
}

/// Booking screen state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    pub service: Option<ServiceId>,
    /// Square feet, as typed
    pub area: String,
    /// Grill size or spike type, depending on the service
    pub size: String,
    pub address: String,
    pub pincode: String,
    pub phone: String,
    pub email: String,
    pub preferred_date: String,
    pub notes: String,
}

impl BookingForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Form opened from a service card, with that service pre-selected
    pub fn preselected(service: Option<ServiceId>) -> Self {
        Self {
            service,
            ..Self::default()
        }
    }

    /// Select a service; a size that does not apply to it is cleared
    pub fn select_service(&mut self, service: ServiceId) {
        self.service = Some(service);
        if !size_options(service).contains(&self.size.as_str()) {
            self.size.clear();
        }
    }

    /// Options for the size field of the selected service
    pub fn size_options(&self) -> &'static [&'static str] {
        self.service.map(size_options).unwrap_or(&[])
    }

    pub fn estimate(&self) -> Estimate {
        let Some(service) = self.service else {
            return Estimate::None;
        };
        if self.area.trim().is_empty() {
            return Estimate::None;
        }

        match service.service().pricing {
            Pricing::Spikes {
                pvc,
                stainless_steel,
            } => {
                if self.size == SPIKE_TYPES[0] {
                    Estimate::Amount(pvc)
                } else {
                    Estimate::Amount(stainless_steel)
                }
            }
            Pricing::Custom => Estimate::CustomQuote,
            Pricing::PerSqFt { rate } => match parse_area(&self.area) {
                Some(area) => Estimate::Amount(rate * area),
                None => Estimate::None,
            },
        }
    }

    /// Required fields that are still blank, in form order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.service.is_none() {
            missing.push("service");
        }
        for (name, value) in [
            ("area", &self.area),
            ("address", &self.address),
            ("phone", &self.phone),
        ] {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        missing
    }

    /// Validate and hand the booking to `sink`
    pub fn submit<S: SubmissionSink>(&self, sink: &S) -> Result<Confirmation, FormError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            tracing::warn!(?missing, "booking rejected");
            return Err(FormError::MissingFields(missing));
        }

        let service = self.service.map(|s| s.as_str()).unwrap_or_default();
        let estimate = self.estimate().to_string();
        sink.submit(
            SubmissionKind::Booking,
            fields([
                ("service", service),
                ("area", self.area.as_str()),
                ("size", self.size.as_str()),
                ("address", self.address.as_str()),
                ("pincode", self.pincode.as_str()),
                ("phone", self.phone.as_str()),
                ("email", self.email.as_str()),
                ("preferred_date", self.preferred_date.as_str()),
                ("notes", self.notes.as_str()),
                ("estimate", estimate.as_str()),
            ]),
        );

        Ok(Confirmation {
            title: "Booking Submitted!",
            message: format!(
                "Thank you for your request. We'll contact you soon at {} to confirm your booking.",
                self.phone
            ),
        })
    }
}

fn size_options(service: ServiceId) -> &'static [&'static str] {
    match service {
        ServiceId::InvisibleGrills => &GRILL_SIZES,
        ServiceId::BirdSpikes => &SPIKE_TYPES,
        _ => &[],
    }
}

fn parse_area(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|area| area.is_finite() && *area >= 0.0)
}
