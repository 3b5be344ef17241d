use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use log::{error, info};
use url::Url;

use vitrin::config::SiteConfig;
use vitrin::fetch::{Fetch, FsFetcher, HttpFetcher};
use vitrin::host::HeadlessHost;
use vitrin::prefs::FileStore;
use vitrin::{boot, dom, Document, Site};

const USAGE: &str = "usage: vitrin [--config FILE] [--remote URL] <site-dir> [page]";
const PREFS_FILE: &str = ".vitrin-prefs.json";

struct Args {
    config: Option<PathBuf>,
    /// Fetch fragments and data from a deployed copy instead of `site_dir`.
    remote: Option<String>,
    site_dir: PathBuf,
    page: String,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut config = None;
    let mut remote = None;
    let mut positional = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().ok_or("--config needs a file")?;
                config = Some(PathBuf::from(path));
            }
            "--remote" | "-r" => {
                remote = Some(args.next().ok_or("--remote needs a URL")?);
            }
            "--help" | "-h" => return Err(USAGE.to_string()),
            _ => positional.push(arg),
        }
    }
    let mut positional = positional.into_iter();
    let site_dir = positional.next().ok_or("missing <site-dir>")?;
    let page = positional.next().unwrap_or_else(|| "index.html".to_string());
    Ok(Args {
        config,
        remote,
        site_dir: PathBuf::from(site_dir),
        page,
    })
}

fn page_url(path: &Path) -> Result<Url, String> {
    let absolute = path
        .canonicalize()
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    Url::from_file_path(&absolute).map_err(|_| format!("{} is not a valid file URL", absolute.display()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}\n{}", e, USAGE);
            process::exit(2);
        }
    };

    let config = SiteConfig::load_or_default(args.config.as_deref(), &args.site_dir);
    if boot::run(&args.site_dir, &args.page, &config).is_err() {
        process::exit(1);
    }

    let page_path = args.site_dir.join(&args.page);
    let doc = match std::fs::read_to_string(&page_path)
        .map_err(|e| e.to_string())
        .and_then(|src| Document::parse(&src))
    {
        Ok(doc) => doc,
        Err(e) => {
            error!("Cannot load {}: {}", page_path.display(), e);
            process::exit(1);
        }
    };
    let location = match page_url(&page_path) {
        Ok(url) => url,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let fetcher: Arc<dyn Fetch> = match &args.remote {
        Some(base) => match HttpFetcher::new(base) {
            Ok(f) => Arc::new(f),
            Err(e) => {
                error!("{}", e);
                process::exit(2);
            }
        },
        None => Arc::new(FsFetcher::new(&args.site_dir)),
    };

    let site = Site::new(
        dom::share(doc),
        config,
        Arc::new(FileStore::new(args.site_dir.join(PREFS_FILE))),
        fetcher,
        Arc::new(HeadlessHost::new(location)),
    );
    site.boot().await;
    site.shutdown();
    info!("Rendered {}", page_path.display());

    let html = dom::lock(&site.document()).to_html();
    println!("{}", html);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args_defaults_page() {
        let a = args(&["site"]).unwrap();
        assert_eq!(a.site_dir, PathBuf::from("site"));
        assert_eq!(a.page, "index.html");
        assert!(a.config.is_none());
        assert!(a.remote.is_none());
    }

    #[test]
    fn test_parse_args_options() {
        let a = args(&["-c", "v.toml", "--remote", "https://site.example", "site", "blog.html"]).unwrap();
        assert_eq!(a.config, Some(PathBuf::from("v.toml")));
        assert_eq!(a.remote.as_deref(), Some("https://site.example"));
        assert_eq!(a.page, "blog.html");
        assert!(args(&[]).is_err());
        assert!(args(&["--config"]).is_err());
        assert!(args(&["-h"]).is_err());
    }
}
