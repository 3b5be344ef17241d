//! Quote/order form: package selection, live budget, the four-step progress
//! indicator and submission.

use std::sync::{Arc, Mutex, PoisonError};

use log::{info, warn};

use crate::controllers::status::{StatusKind, StatusLine};
use crate::controllers::submission::{Submission, SubmissionPort};
use crate::controllers::Context;
use crate::dom::{Document, NodeId};
use crate::events::{Action, EventKind};
use crate::models::order::{OrderSelection, OrderSnapshot, ProgressSteps};
use crate::validate::{validate_order, FormKind, OrderInput};

pub const FORM_ID: &str = "orderForm";
pub const STATUS_ID: &str = "orderFormMessage";
pub const PACKAGE_INPUT_ID: &str = "selectedPackage";
pub const BUDGET_ID: &str = "budget";
const TEXT_FIELDS: [&str; 5] = [
    "selectedPackage",
    "orderName",
    "orderEmail",
    "projectTitle",
    "projectDesc",
];
const TERMS_ID: &str = "agreeTerms";

#[derive(Clone)]
pub struct OrderForm {
    ctx: Context,
    selection: Arc<Mutex<OrderSelection>>,
    status: StatusLine,
    port: Arc<dyn SubmissionPort>,
}

fn package_buttons(doc: &Document) -> Vec<NodeId> {
    doc.by_class(doc.root(), "btn-select-package")
}

fn addon_inputs(doc: &Document) -> Vec<NodeId> {
    doc.select(doc.root(), |e| {
        e.tag() == "input" && e.attr("name").is_some_and(|n| n.starts_with("extra"))
    })
}

fn submit_button(doc: &Document, form: NodeId) -> Option<NodeId> {
    doc.select(form, |e| e.tag() == "button" && e.attr("type") == Some("submit"))
        .into_iter()
        .next()
}

impl OrderForm {
    pub fn new(ctx: Context, port: Arc<dyn SubmissionPort>) -> Self {
        OrderForm {
            ctx,
            selection: Arc::new(Mutex::new(OrderSelection::default())),
            status: StatusLine::new(STATUS_ID),
            port,
        }
    }

    pub fn selection(&self) -> OrderSelection {
        self.selection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn bind(&self, doc: &mut Document) {
        let Some(form) = doc.get_element_by_id(FORM_ID) else {
            return;
        };
        doc.listen(form, EventKind::Submit, Action::SubmitOrder);
        for button in package_buttons(doc) {
            doc.listen(button, EventKind::Click, Action::SelectPackage);
        }
        for input in addon_inputs(doc) {
            doc.listen(input, EventKind::Change, Action::RecalculateBudget);
        }
        for id in TEXT_FIELDS {
            if let Some(node) = doc.get_element_by_id(id) {
                doc.listen(node, EventKind::Input, Action::TrackOrderProgress);
            }
        }
        if let Some(terms) = doc.get_element_by_id(TERMS_ID) {
            doc.listen(terms, EventKind::Change, Action::TrackOrderProgress);
        }
        let groups = doc.select(form, |e| e.has_class("form-group"));
        for (i, group) in groups.into_iter().enumerate() {
            doc.set_style(group, "animation-delay", &format!("{}ms", i * 50));
        }
        self.recalculate(doc);
        self.track_progress(doc);
    }

    /// Make `button`'s package the selection.
    pub fn select_package(&self, doc: &mut Document, button: NodeId) {
        let Some(id) = doc.data(button, "package").map(str::to_string) else {
            return;
        };
        let Some(package) = self.ctx.config.order.package(&id) else {
            warn!("Unknown package {}", id);
            return;
        };
        let name = package.name.clone();
        self.selection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .package = Some(id);
        if let Some(input) = doc.get_element_by_id(PACKAGE_INPUT_ID) {
            doc.set_value(input, &name);
        }
        for other in package_buttons(doc) {
            doc.remove_class(other, "active");
        }
        doc.add_class(button, "active");
        self.recalculate(doc);
        self.track_progress(doc);
    }

    /// Rebuild the add-on set from the checkboxes and redisplay the total.
    pub fn recalculate(&self, doc: &mut Document) -> u64 {
        let mut selection = self.selection.lock().unwrap_or_else(PoisonError::into_inner);
        selection.addons = addon_inputs(doc)
            .into_iter()
            .filter(|&n| doc.checked(n))
            .map(|n| doc.value(n).to_string())
            .collect();
        let prices = &self.ctx.config.order;
        let total = selection.total(prices);
        if let Some(budget) = doc.get_element_by_id(BUDGET_ID) {
            doc.set_value(budget, &prices.format(total));
        }
        total
    }

    pub fn snapshot(doc: &Document) -> OrderSnapshot {
        OrderSnapshot {
            package: doc.field(PACKAGE_INPUT_ID),
            name: doc.field("orderName"),
            email: doc.field("orderEmail"),
            title: doc.field("projectTitle"),
            description: doc.field("projectDesc"),
            agreed: doc
                .get_element_by_id(TERMS_ID)
                .is_some_and(|n| doc.checked(n)),
        }
    }

    pub fn track_progress(&self, doc: &mut Document) -> ProgressSteps {
        let steps = ProgressSteps::derive(&Self::snapshot(doc));
        let nodes = doc.by_class(doc.root(), "progress-step");
        for (node, done) in nodes.into_iter().zip(steps.0) {
            if done {
                doc.add_class(node, "active");
            } else {
                doc.remove_class(node, "active");
            }
        }
        steps
    }

    fn read(&self, doc: &Document) -> OrderInput {
        OrderInput {
            name: doc.field("orderName"),
            email: doc.field("orderEmail"),
            phone: doc.field("orderPhone"),
            title: doc.field("projectTitle"),
            description: doc.field("projectDesc"),
            agreed: doc
                .get_element_by_id(TERMS_ID)
                .is_some_and(|n| doc.checked(n)),
            package_selected: self.selection().package.is_some(),
        }
    }

    /// Validate and submit in the background. Always suppresses the native
    /// submit. While the submit button is disabled nothing else happens.
    pub fn submit(&self, doc: &mut Document) -> bool {
        let Some(form) = doc.get_element_by_id(FORM_ID) else {
            return false;
        };
        let button = submit_button(doc, form);
        if button.is_some_and(|b| doc.disabled(b)) {
            return true;
        }
        let input = self.read(doc);
        if let Err(e) = validate_order(&input) {
            let text = e.message(FormKind::Order, &self.ctx.config.messages);
            self.status.show(&self.ctx, doc, text, StatusKind::Error);
            return true;
        }

        let original_label = button.map(|b| doc.inner_html(b)).unwrap_or_default();
        if let Some(b) = button {
            doc.set_disabled(b, true);
            let sending = format!(
                r#"<span class="btn-text">{}</span>"#,
                crate::render::html_escape(&self.ctx.config.messages.order_sending)
            );
            let _ = doc.set_inner_html(b, &sending);
        }

        let selection = self.selection();
        let mut submission = Submission::new(FormKind::Order)
            .field("package", selection.package.clone().unwrap_or_default())
            .field("name", input.name)
            .field("email", input.email)
            .field("phone", input.phone)
            .field("title", input.title)
            .field("description", input.description)
            .field("budget", self.ctx.config.order.format(selection.total(&self.ctx.config.order)));
        for addon in &selection.addons {
            submission = submission.field(&format!("extra.{}", addon), "on");
        }

        let this = self.clone();
        self.ctx.spawn(async move {
            let result = this.port.submit(submission).await;
            this.finish(result, &original_label);
        });
        true
    }

    fn finish(&self, result: Result<(), String>, original_label: &str) {
        let mut doc = self.ctx.doc();
        let Some(form) = doc.get_element_by_id(FORM_ID) else {
            return;
        };
        let m = &self.ctx.config.messages;
        match result {
            Ok(()) => {
                info!("Order submitted");
                self.status.show(&self.ctx, &mut doc, &m.order_success, StatusKind::Success);
                doc.reset_form(form);
                if let Some(input) = doc.get_element_by_id(PACKAGE_INPUT_ID) {
                    doc.set_value(input, "");
                }
                self.selection
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clear();
                for button in package_buttons(&doc) {
                    doc.remove_class(button, "active");
                }
                self.recalculate(&mut doc);
                self.track_progress(&mut doc);
            }
            Err(e) => {
                warn!("Order submission failed: {}", e);
                self.status.show(&self.ctx, &mut doc, &m.submit_failed, StatusKind::Error);
            }
        }
        if let Some(button) = submit_button(&doc, form) {
            doc.set_disabled(button, false);
            let _ = doc.set_inner_html(button, original_label);
        }
    }
}
