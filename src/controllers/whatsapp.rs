use log::warn;
use url::form_urlencoded;
use url::Url;

use crate::controllers::Context;
use crate::dom::Document;
use crate::events::{Action, EventKind};

pub const FAB_ID: &str = "whatsappFab";

/// `https://wa.me/<digits>?text=<message>`. Spaces in the message are
/// sent as `%20`; some clients show a form-encoded `+` literally.
pub fn deep_link(phone: &str, message: &str) -> Result<Url, String> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(format!("phone number {:?} has no digits", phone));
    }
    let mut url = Url::parse(&format!("https://wa.me/{}", digits)).map_err(|e| e.to_string())?;
    let text: String = form_urlencoded::byte_serialize(message.as_bytes()).collect();
    url.set_query(Some(&format!("text={}", text.replace('+', "%20"))));
    Ok(url)
}

pub fn bind(ctx: &Context, doc: &mut Document) {
    let Some(fab) = doc.get_element_by_id(FAB_ID) else {
        return;
    };
    if let Ok(url) = deep_link(&ctx.config.contact.phone, &ctx.config.contact.whatsapp_message) {
        doc.set_attr(fab, "href", url.as_str());
    }
    doc.listen(fab, EventKind::Click, Action::OpenWhatsapp);
    doc.listen(fab, EventKind::KeyDown, Action::ActivateOnKey);
}

/// Play the calling animation, then open the chat in a new context.
pub fn activate(ctx: &Context, doc: &mut Document) -> bool {
    let Some(fab) = doc.get_element_by_id(FAB_ID) else {
        return false;
    };
    let url = match deep_link(&ctx.config.contact.phone, &ctx.config.contact.whatsapp_message) {
        Ok(url) => url,
        Err(e) => {
            warn!("WhatsApp link unavailable: {}", e);
            return true;
        }
    };
    doc.add_class(fab, "calling");
    let host = ctx.host.clone();
    ctx.after(ctx.config.timing.whatsapp_open_ms, move |_| {
        host.open(url.as_str(), "_blank");
    });
    ctx.after(ctx.config.timing.whatsapp_reset_ms, |doc| {
        if let Some(fab) = doc.get_element_by_id(FAB_ID) {
            doc.remove_class(fab, "calling");
        }
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deep_link_strips_non_digits_and_encodes() {
        let url = deep_link("+90 535 855 71 33", "Merhaba, nasılsın?").unwrap();
        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/905358557133");
        let text: Vec<_> = url.query_pairs().collect();
        assert_eq!(text[0].1, "Merhaba, nasılsın?");
        assert_eq!(url.query(), Some("text=Merhaba%2C%20nas%C4%B1ls%C4%B1n%3F"));

        let url = deep_link("1", "1 + 1").unwrap();
        assert_eq!(url.query(), Some("text=1%20%2B%201"));
        assert!(deep_link("call me", "x").is_err());
    }
}
