//! Where validated forms go. The site has no backend, so the shipped port
//! only waits; embedders can plug in a real one.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use log::info;

use crate::config::TimingSection;
use crate::validate::FormKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub form: FormKind,
    pub fields: BTreeMap<String, String>,
}

impl Submission {
    pub fn new(form: FormKind) -> Self {
        Submission {
            form,
            fields: BTreeMap::new(),
        }
    }

    pub fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.insert(name.to_string(), value.into());
        self
    }
}

#[async_trait]
pub trait SubmissionPort: Send + Sync {
    async fn submit(&self, submission: Submission) -> Result<(), String>;
}

/// Accepts everything after a per-form delay.
pub struct SimulatedSubmission {
    contact_delay: Duration,
    order_delay: Duration,
}

impl SimulatedSubmission {
    pub fn new(timing: &TimingSection) -> Self {
        SimulatedSubmission {
            contact_delay: Duration::from_millis(timing.contact_submit_ms),
            order_delay: Duration::from_millis(timing.order_submit_ms),
        }
    }
}

#[async_trait]
impl SubmissionPort for SimulatedSubmission {
    async fn submit(&self, submission: Submission) -> Result<(), String> {
        let delay = match submission.form {
            FormKind::Contact => self.contact_delay,
            FormKind::Order => self.order_delay,
        };
        tokio::time::sleep(delay).await;
        info!(
            "Simulated {} submission accepted ({} fields)",
            submission.form.as_str(),
            submission.fields.len()
        );
        Ok(())
    }
}
