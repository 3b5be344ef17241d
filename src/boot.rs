use log::{error, info, warn};
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;

/// Outcome of a boot check.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BootReport {
    pub warnings: u32,
    pub errors: u32,
}

/// Check a site directory before previewing `page` from it. Missing
/// fragments, dictionaries and catalogs are warnings (the page degrades);
/// a missing site directory or page is an error.
pub fn run(site_dir: &Path, page: &str, config: &SiteConfig) -> Result<BootReport, String> {
    info!("Vitrin boot check starting for {}...", site_dir.display());

    let mut report = BootReport::default();

    // ── 1. Site directory and page ─────────────────────
    if !site_dir.is_dir() {
        error!("  MISSING site directory: {}", site_dir.display());
        report.errors += 1;
    } else if !site_dir.join(page).is_file() {
        error!("  MISSING page: {}", page);
        report.errors += 1;
    }

    // ── 2. Fragments ───────────────────────────────────
    for file in [&config.components.header, &config.components.footer] {
        if !site_dir.join(file).is_file() {
            warn!("  Missing fragment: {} (mount point stays empty)", file);
            report.warnings += 1;
        }
    }

    // ── 3. Dictionaries ────────────────────────────────
    let dictionary = config.data.dictionary(&config.site.default_language);
    if !site_dir.join(&dictionary).is_file() {
        warn!("  Missing dictionary: {} (data-i18n text is left as authored)", dictionary);
        report.warnings += 1;
    }
    let dict_dir = site_dir.join(&config.data.dictionary_dir);
    if dict_dir.is_dir() {
        let languages: Vec<String> = fs::read_dir(&dict_dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
                    .filter_map(|p| p.file_stem().map(|s| s.to_string_lossy().to_string()))
                    .filter(|s| s.len() == 2)
                    .collect()
            })
            .unwrap_or_default();
        if !languages.is_empty() {
            info!("  Dictionaries available: {}", languages.join(", "));
        }
    }

    // ── 4. Catalogs ────────────────────────────────────
    for file in [&config.data.projects, &config.data.blog] {
        let path = site_dir.join(file);
        match fs::read_to_string(&path) {
            Ok(raw) => {
                if let Err(e) = serde_json::from_str::<serde_json::Value>(&raw) {
                    warn!("  Catalog {} is not valid JSON: {}", file, e);
                    report.warnings += 1;
                }
            }
            Err(_) => {
                warn!("  Missing catalog: {} (its list will show the error state)", file);
                report.warnings += 1;
            }
        }
    }

    // ── 5. Placeholder images ──────────────────────────
    for file in [&config.data.project_placeholder, &config.data.blog_placeholder] {
        if !site_dir.join(file).is_file() {
            warn!("  Missing placeholder image: {}", file);
            report.warnings += 1;
        }
    }

    // ── Summary ─────────────────────────────────────────
    if report.errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            report.errors, report.warnings
        );
        return Err(format!("{} boot error(s)", report.errors));
    }

    if report.warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some sections may not render.",
            report.warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_page_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        assert!(run(dir.path(), "index.html", &SiteConfig::default()).is_err());
        assert!(run(&dir.path().join("nope"), "index.html", &SiteConfig::default()).is_err());
    }

    #[test]
    fn test_complete_site_has_no_warnings() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for (file, body) in [
            ("index.html", "<html><body></body></html>"),
            ("components/header.html", "<nav></nav>"),
            ("components/footer.html", "<p></p>"),
            ("data/tr.json", "{}"),
            ("data/projects.json", "[]"),
            ("data/blog.json", "[]"),
            ("assets/images/placeholder.jpg", ""),
            ("assets/images/blog-default.jpg", ""),
        ] {
            let path = root.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        }
        let report = run(root, "index.html", &SiteConfig::default()).unwrap();
        assert_eq!(report, BootReport::default());

        fs::write(root.join("data/blog.json"), "[oops").unwrap();
        fs::remove_file(root.join("components/footer.html")).unwrap();
        let report = run(root, "index.html", &SiteConfig::default()).unwrap();
        assert_eq!(report.warnings, 2);
    }
}
