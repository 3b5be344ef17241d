use std::sync::Arc;

use log::{info, warn};

use crate::controllers::status::{StatusKind, StatusLine};
use crate::controllers::submission::{Submission, SubmissionPort};
use crate::controllers::Context;
use crate::dom::{Document, NodeId};
use crate::events::{Action, EventKind};
use crate::validate::{validate_contact, ContactInput, FormKind};

pub const FORM_ID: &str = "contactForm";
pub const STATUS_ID: &str = "formMessage";

#[derive(Clone)]
pub struct ContactForm {
    ctx: Context,
    status: StatusLine,
    port: Arc<dyn SubmissionPort>,
}

fn submit_button(doc: &Document, form: NodeId) -> Option<NodeId> {
    doc.select(form, |e| e.tag() == "button" && e.attr("type") != Some("button"))
        .into_iter()
        .next()
}

fn set_busy(doc: &mut Document, form: NodeId, busy: bool) {
    doc.set_style(form, "opacity", if busy { "0.5" } else { "1" });
    doc.set_style(form, "pointer-events", if busy { "none" } else { "auto" });
    if let Some(button) = submit_button(doc, form) {
        doc.set_disabled(button, busy);
    }
}

fn is_busy(doc: &Document, form: NodeId) -> bool {
    doc.style(form, "pointer-events") == Some("none")
}

impl ContactForm {
    pub fn new(ctx: Context, port: Arc<dyn SubmissionPort>) -> Self {
        ContactForm {
            ctx,
            status: StatusLine::new(STATUS_ID),
            port,
        }
    }

    pub fn bind(&self, doc: &mut Document) {
        if let Some(form) = doc.get_element_by_id(FORM_ID) {
            doc.listen(form, EventKind::Submit, Action::SubmitContact);
        }
    }

    pub fn read(doc: &Document) -> ContactInput {
        ContactInput {
            name: doc.field("name"),
            email: doc.field("email"),
            subject: doc.field("subject"),
            message: doc.field("message"),
        }
    }

    /// Validate and, if clean, hand the message to the submission port in
    /// the background. Always suppresses the native submit; a submit while
    /// one is in flight is ignored.
    pub fn submit(&self, doc: &mut Document) -> bool {
        let Some(form) = doc.get_element_by_id(FORM_ID) else {
            return false;
        };
        if is_busy(doc, form) {
            return true;
        }
        let input = Self::read(doc);
        if let Err(e) = validate_contact(&input) {
            let text = e.message(FormKind::Contact, &self.ctx.config.messages);
            self.status.show(&self.ctx, doc, text, StatusKind::Error);
            return true;
        }
        set_busy(doc, form, true);

        let submission = Submission::new(FormKind::Contact)
            .field("name", input.name)
            .field("email", input.email)
            .field("subject", input.subject)
            .field("message", input.message);
        let this = self.clone();
        self.ctx.spawn(async move {
            let result = this.port.submit(submission).await;
            this.finish(result);
        });
        true
    }

    fn finish(&self, result: Result<(), String>) {
        let mut doc = self.ctx.doc();
        let Some(form) = doc.get_element_by_id(FORM_ID) else {
            return;
        };
        let m = &self.ctx.config.messages;
        match result {
            Ok(()) => {
                info!("Contact message sent");
                self.status.show(&self.ctx, &mut doc, &m.contact_success, StatusKind::Success);
                doc.reset_form(form);
                self.status.clear_after(&self.ctx, self.ctx.config.timing.success_clear_ms);
            }
            Err(e) => {
                warn!("Contact submission failed: {}", e);
                self.status.show(&self.ctx, &mut doc, &m.submit_failed, StatusKind::Error);
            }
        }
        set_busy(&mut doc, form, false);
    }
}
