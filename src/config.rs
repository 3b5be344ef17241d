//! Site configuration.
//!
//! Every constant the page scripts hard-code (paths, element ids, phone
//! number, prices, timings, status texts) lives here. `vitrin.toml` may
//! override any of it; a missing file or section means the defaults below.

use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use crate::models::order::PriceList;

pub const CONFIG_FILE: &str = "vitrin.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site: SiteSection,
    pub components: ComponentsSection,
    pub data: DataSection,
    pub contact: ContactSection,
    pub order: PriceList,
    pub timing: TimingSection,
    pub animation: AnimationSection,
    pub messages: Messages,
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self, String> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        toml::from_str(&raw).map_err(|e| format!("invalid {}: {}", path.display(), e))
    }

    /// Load `path` if given (or `vitrin.toml` in `dir` if present), falling
    /// back to defaults with a warning on errors.
    pub fn load_or_default(path: Option<&Path>, dir: &Path) -> Self {
        let candidate = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = dir.join(CONFIG_FILE);
                if !p.exists() {
                    return SiteConfig::default();
                }
                p
            }
        };
        match Self::load(&candidate) {
            Ok(cfg) => {
                info!("Loaded site config from {}", candidate.display());
                cfg
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                SiteConfig::default()
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    pub default_language: String,
    pub default_page: String,
    pub nav_list_id: String,
    pub nav_active_class: String,
    pub menu_trigger_id: String,
    pub theme_toggle_id: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        SiteSection {
            default_language: "tr".to_string(),
            default_page: "index.html".to_string(),
            nav_list_id: "navLinks".to_string(),
            nav_active_class: "active".to_string(),
            menu_trigger_id: "hamburger".to_string(),
            theme_toggle_id: "themeToggle".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComponentsSection {
    pub header_mount: String,
    pub header: String,
    pub footer_mount: String,
    pub footer: String,
}

impl Default for ComponentsSection {
    fn default() -> Self {
        ComponentsSection {
            header_mount: "header".to_string(),
            header: "components/header.html".to_string(),
            footer_mount: "footer".to_string(),
            footer: "components/footer.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// Directory holding `<lang>.json` dictionaries.
    pub dictionary_dir: String,
    pub projects: String,
    pub blog: String,
    pub project_placeholder: String,
    pub blog_placeholder: String,
    pub featured_count: usize,
}

impl DataSection {
    pub fn dictionary(&self, lang: &str) -> String {
        format!("{}/{}.json", self.dictionary_dir.trim_end_matches('/'), lang)
    }
}

impl Default for DataSection {
    fn default() -> Self {
        DataSection {
            dictionary_dir: "data".to_string(),
            projects: "data/projects.json".to_string(),
            blog: "data/blog.json".to_string(),
            project_placeholder: "assets/images/placeholder.jpg".to_string(),
            blog_placeholder: "assets/images/blog-default.jpg".to_string(),
            featured_count: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ContactSection {
    pub phone: String,
    pub whatsapp_message: String,
}

impl Default for ContactSection {
    fn default() -> Self {
        ContactSection {
            phone: "+905358557133".to_string(),
            whatsapp_message: "Merhaba, web siteniz üzerinden iletişime geçiyorum.".to_string(),
        }
    }
}

/// Delays in milliseconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimingSection {
    pub contact_submit_ms: u64,
    pub order_submit_ms: u64,
    pub error_hide_ms: u64,
    pub success_clear_ms: u64,
    pub menu_stagger_ms: u64,
    pub nav_reveal_base_ms: u64,
    pub whatsapp_open_ms: u64,
    pub whatsapp_reset_ms: u64,
    pub cv_reset_ms: u64,
}

impl Default for TimingSection {
    fn default() -> Self {
        TimingSection {
            contact_submit_ms: 1500,
            order_submit_ms: 1200,
            error_hide_ms: 5000,
            success_clear_ms: 5000,
            menu_stagger_ms: 40,
            nav_reveal_base_ms: 120,
            whatsapp_open_ms: 650,
            whatsapp_reset_ms: 1900,
            cv_reset_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnimationSection {
    pub headline: String,
    pub particles: usize,
    pub type_ms: u64,
    pub delete_ms: u64,
    pub hold_ms: u64,
    pub restart_ms: u64,
    pub counter_duration_ms: u64,
    pub counter_tick_ms: u64,
    pub scroll_top_threshold: f64,
    pub parallax_factor: f64,
}

impl Default for AnimationSection {
    fn default() -> Self {
        AnimationSection {
            headline: "Web Geliştirici & GrafikTasarımcısı".to_string(),
            particles: 50,
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 3000,
            restart_ms: 1000,
            counter_duration_ms: 2000,
            counter_tick_ms: 16,
            scroll_top_threshold: 300.0,
            parallax_factor: 0.5,
        }
    }
}

/// Visitor-facing texts. Defaults are the Turkish originals.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub contact_required: String,
    pub contact_name_short: String,
    pub contact_message_short: String,
    pub contact_email: String,
    pub contact_success: String,
    pub order_required: String,
    pub order_name_short: String,
    pub order_title_short: String,
    pub order_description_short: String,
    pub order_email: String,
    pub order_terms: String,
    pub order_no_package: String,
    pub order_success: String,
    pub order_sending: String,
    pub submit_failed: String,
    pub projects_loading: String,
    pub projects_error: String,
    pub projects_empty: String,
    pub blog_loading: String,
    pub blog_error: String,
    pub blog_empty: String,
    pub retry: String,
    pub category_label: String,
    pub details: String,
    pub live_demo: String,
    pub view_code: String,
    pub read_more: String,
    pub image_missing: String,
    pub theme_to_light: String,
    pub theme_to_dark: String,
}

impl Messages {
    /// Alt text for a project image that failed to load.
    pub fn image_missing_for(&self, title: &str) -> String {
        self.image_missing.replace("{title}", title)
    }
}

impl Default for Messages {
    fn default() -> Self {
        let s = |v: &str| v.to_string();
        Messages {
            contact_required: s("Tüm alanları doldurun!"),
            contact_name_short: s("Adınız en az 3 karakter olmalıdır!"),
            contact_message_short: s("Mesaj en az 10 karakter olmalıdır!"),
            contact_email: s("Geçerli bir email girin!"),
            contact_success: s(
                "✓ Mesajınız başarıyla gönderildi! Sizinle kısa zamanda iletişime geçeceğim.",
            ),
            order_required: s("Lütfen zorunlu alanları doldurun"),
            order_name_short: s("Adınız en az 3 karakter olmalıdır"),
            order_title_short: s("Proje adı en az 3 karakter olmalıdır"),
            order_description_short: s("Proje açıklaması en az 20 karakter olmalıdır"),
            order_email: s("Geçerli bir email adresi giriniz"),
            order_terms: s("Şartları kabul etmelisiniz"),
            order_no_package: s("Lütfen bir paket seçiniz"),
            order_success: s(
                "✓ Siparişiniz başarıyla kaydedildi! En kısa sürede sizinle iletişime geçeceğiz.",
            ),
            order_sending: s("Gönderiliyor..."),
            submit_failed: s("Gönderim başarısız oldu, lütfen tekrar deneyin."),
            projects_loading: s("Projeler yükleniyor..."),
            projects_error: s("Projeler yüklenirken bir hata oluştu."),
            projects_empty: s("Henüz proje eklenmemiş."),
            blog_loading: s("Blog yazıları yükleniyor..."),
            blog_error: s("Blog yazıları yüklenirken hata oluştu."),
            blog_empty: s("Blog yazıları yakında eklenecek..."),
            retry: s("Tekrar Dene"),
            category_label: s("Kategorisi:"),
            details: s("Detayları Gör"),
            live_demo: s("Canlı Demo"),
            view_code: s("Kodu İncele"),
            read_more: s("Devamını Oku"),
            image_missing: s("{title} projesinin görseli mevcut değil"),
            theme_to_light: s("Açık temaya geç"),
            theme_to_dark: s("Koyu temaya geç"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg: SiteConfig = toml::from_str(
            r#"
            [contact]
            phone = "+90 555 000 00 00"

            [order]
            currency_symbol = "TL "

            [[order.packages]]
            id = "basic"
            name = "Basic"
            price = 1000
            "#,
        )
        .unwrap();
        assert_eq!(cfg.contact.phone, "+90 555 000 00 00");
        assert_eq!(
            cfg.contact.whatsapp_message,
            ContactSection::default().whatsapp_message
        );
        assert_eq!(cfg.order.packages.len(), 1);
        // Add-ons were not overridden.
        assert_eq!(cfg.order.addon_price("seo"), Some(1500));
        assert_eq!(cfg.order.format(1000), "TL 1.000");
        assert_eq!(cfg.site.default_language, "tr");
        assert_eq!(cfg.timing.order_submit_ms, 1200);
    }

    #[test]
    fn dictionary_path_joins_language() {
        let data = DataSection::default();
        assert_eq!(data.dictionary("en"), "data/en.json");
    }

    #[test]
    fn missing_file_is_an_error_but_default_loader_recovers() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SiteConfig::load(&dir.path().join("nope.toml")).is_err());
        let cfg = SiteConfig::load_or_default(None, dir.path());
        assert_eq!(cfg.components.header, "components/header.html");
    }
}
