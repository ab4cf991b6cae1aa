//! Where submitted forms go
//!
//! Submissions are fire-and-forget: the form validates, hands its fields to a
//! [`SubmissionSink`] and confirms locally. There is no server round trip.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Which form produced a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionKind {
    Booking,
    Contact,
}

impl fmt::Display for SubmissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionKind::Booking => f.write_str("booking"),
            SubmissionKind::Contact => f.write_str("contact"),
        }
    }
}

/// Field name to value, ordered for stable logs
pub type Fields = BTreeMap<String, String>;

/// Receives validated form payloads
pub trait SubmissionSink {
    fn submit(&self, kind: SubmissionKind, fields: Fields);
}

impl<S: SubmissionSink + ?Sized> SubmissionSink for &S {
    fn submit(&self, kind: SubmissionKind, fields: Fields) {
        (**self).submit(kind, fields)
    }
}

/// Logs every submission at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl SubmissionSink for TracingSink {
    fn submit(&self, kind: SubmissionKind, fields: Fields) {
        tracing::info!(%kind, ?fields, "form submitted");
    }
}

/// A recorded submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub kind: SubmissionKind,
    pub fields: Fields,
}

/// Keeps submissions in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<Submission>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    pub fn last(&self) -> Option<Submission> {
        self.records.lock().last().cloned()
    }

    /// Take every recorded submission
    pub fn drain(&self) -> Vec<Submission> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl SubmissionSink for MemorySink {
    fn submit(&self, kind: SubmissionKind, fields: Fields) {
        tracing::debug!(%kind, fields = fields.len(), "submission recorded");
        self.records.lock().push(Submission { kind, fields });
    }
}

/// Build a [`Fields`] map from `(name, value)` pairs
pub(crate) fn fields<'a, I>(pairs: I) -> Fields
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}
