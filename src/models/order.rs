use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Package {
    pub id: String,
    pub name: String,
    pub price: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AddOn {
    pub id: String,
    pub price: u64,
}

/// Package and add-on prices of the order page.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PriceList {
    pub currency_symbol: String,
    pub packages: Vec<Package>,
    pub addons: Vec<AddOn>,
}

impl Default for PriceList {
    fn default() -> Self {
        let package = |id: &str, name: &str, price: u64| Package {
            id: id.to_string(),
            name: name.to_string(),
            price,
        };
        let addon = |id: &str, price: u64| AddOn {
            id: id.to_string(),
            price,
        };
        PriceList {
            currency_symbol: "₺".to_string(),
            packages: vec![
                package("starter", "Başlangıç Paketi", 2999),
                package("professional", "Profesyonel Paketi", 7999),
                package("enterprise", "Kurumsal Paketi", 15999),
            ],
            addons: vec![
                // Design
                addon("ui", 3500),
                addon("logo", 2500),
                addon("illustration", 2000),
                // Development
                addon("api", 2500),
                addon("database", 2000),
                addon("payment", 3000),
                // SEO & marketing
                addon("seo", 1500),
                addon("analytics", 1000),
                addon("social", 1500),
                // Support
                addon("maintenance", 3000),
                addon("hosting", 2500),
                addon("training", 1500),
            ],
        }
    }
}

impl PriceList {
    pub fn package(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    pub fn addon_price(&self, id: &str) -> Option<u64> {
        self.addons.iter().find(|a| a.id == id).map(|a| a.price)
    }

    /// Amount formatted with Turkish digit grouping, e.g. `₺12.499`.
    pub fn format(&self, amount: u64) -> String {
        format!("{}{}", self.currency_symbol, group_thousands(amount, '.'))
    }
}

fn group_thousands(amount: u64, separator: char) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// What the visitor has picked on the order page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderSelection {
    pub package: Option<String>,
    pub addons: BTreeSet<String>,
}

impl OrderSelection {
    /// Base package price plus every checked add-on; zero without a package.
    /// Add-ons missing from the price list count as zero.
    pub fn total(&self, prices: &PriceList) -> u64 {
        let Some(base) = self
            .package
            .as_deref()
            .and_then(|id| prices.package(id))
            .map(|p| p.price)
        else {
            return 0;
        };
        base + self
            .addons
            .iter()
            .filter_map(|id| prices.addon_price(id))
            .sum::<u64>()
    }

    pub fn clear(&mut self) {
        self.package = None;
        self.addons.clear();
    }
}

/// Field values the progress indicator is derived from.
#[derive(Debug, Clone, Default)]
pub struct OrderSnapshot {
    pub package: String,
    pub name: String,
    pub email: String,
    pub title: String,
    pub description: String,
    pub agreed: bool,
}

/// Completion flags of the four order steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressSteps(pub [bool; 4]);

impl ProgressSteps {
    pub fn derive(s: &OrderSnapshot) -> Self {
        let contact = !s.package.is_empty() && !s.name.is_empty() && !s.email.is_empty();
        let project = contact && !s.title.is_empty() && !s.description.is_empty();
        let services = project;
        let done = services && s.agreed;
        ProgressSteps([contact, project, services, done])
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|&s| s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_matches_turkish_locale() {
        let prices = PriceList::default();
        assert_eq!(prices.format(0), "₺0");
        assert_eq!(prices.format(999), "₺999");
        assert_eq!(prices.format(2999), "₺2.999");
        assert_eq!(prices.format(1234567), "₺1.234.567");
    }

    #[test]
    fn total_is_base_plus_checked_addons() {
        let prices = PriceList::default();
        let mut sel = OrderSelection::default();
        sel.addons.insert("seo".to_string());
        assert_eq!(sel.total(&prices), 0);

        sel.package = Some("professional".to_string());
        assert_eq!(sel.total(&prices), 7999 + 1500);

        sel.addons.insert("logo".to_string());
        sel.addons.insert("unknown".to_string());
        assert_eq!(sel.total(&prices), 7999 + 1500 + 2500);

        sel.clear();
        assert_eq!(sel.total(&prices), 0);
    }

    #[test]
    fn progress_steps_chain() {
        let mut s = OrderSnapshot {
            package: "Başlangıç Paketi".into(),
            name: "Ali".into(),
            email: "ali@example.com".into(),
            ..Default::default()
        };
        assert_eq!(ProgressSteps::derive(&s), ProgressSteps([true, false, false, false]));

        s.title = "Site".into();
        s.description = "A description".into();
        assert_eq!(ProgressSteps::derive(&s), ProgressSteps([true, true, true, false]));

        s.agreed = true;
        assert_eq!(ProgressSteps::derive(&s), ProgressSteps([true, true, true, true]));

        s.package.clear();
        assert!(!ProgressSteps::derive(&s).any());
    }
}
