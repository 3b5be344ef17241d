use crate::controllers::Context;
use crate::dom::Document;
use crate::events::{Action, EventKind};

pub const BUTTON_ID: &str = "cvDownloadBtn";

pub fn bind(doc: &mut Document) {
    if let Some(button) = doc.get_element_by_id(BUTTON_ID) {
        doc.listen(button, EventKind::Click, Action::DownloadCv);
    }
}

/// Returns whether the download is suppressed (one is already running).
pub fn activate(ctx: &Context, doc: &mut Document) -> bool {
    let Some(button) = doc.get_element_by_id(BUTTON_ID) else {
        return false;
    };
    if doc.has_class(button, "downloading") {
        return true;
    }
    doc.add_class(button, "downloading");
    ctx.after(ctx.config.timing.cv_reset_ms, |doc| {
        if let Some(button) = doc.get_element_by_id(BUTTON_ID) {
            doc.remove_class(button, "downloading");
        }
    });
    false
}
