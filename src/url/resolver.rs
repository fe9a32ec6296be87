use crate::config::SourceConfig;
use crate::url::normalize::{clean_path, is_under};
use crate::{UrlError, UrlResult};
use url::Url;

/// Turns the links found on catechism pages into absolute page URLs
///
/// The source site mixes absolute links with links relative to the archive
/// directory, so both forms are accepted.
#[derive(Debug, Clone)]
pub struct UrlResolver {
    base: Url,
    archive_root: String,
}

impl UrlResolver {
    /// Creates a resolver for pages below `archive_root` on `base_url`
    ///
    /// # Errors
    ///
    /// Returns `UrlError::InvalidBase` if `base_url` does not parse or has no host.
    pub fn new(base_url: &str, archive_root: &str) -> UrlResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| UrlError::InvalidBase(format!("{}: {}", base_url, e)))?;

        if base.host_str().is_none() {
            return Err(UrlError::InvalidBase(format!("{}: missing host", base_url)));
        }

        Ok(Self {
            base,
            archive_root: clean_path(archive_root),
        })
    }

    /// Builds a resolver from the `[source]` configuration section
    pub fn from_config(config: &SourceConfig) -> UrlResult<Self> {
        Self::new(&config.base_url, &config.archive_root)
    }

    /// The scheme and host every relative link is resolved against
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// The cleaned archive root, e.g. `/archive/ENG0015`
    pub fn archive_root(&self) -> &str {
        &self.archive_root
    }

    /// Resolves the configured first page of the chain
    pub fn first_page(&self, config: &SourceConfig) -> UrlResult<Url> {
        self.resolve(&config.first_page)
    }

    /// Resolves a page link to an absolute URL
    ///
    /// # Resolution Rules
    ///
    /// 1. A reference starting with `http://` or `https://` (any case) is returned as-is
    /// 2. A rooted path already below the archive root is kept
    /// 3. Anything else is joined onto the archive root
    ///
    /// Dot segments are collapsed in every case; query and fragment are preserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use catechism::url::UrlResolver;
    ///
    /// let resolver = UrlResolver::new("https://www.vatican.va", "/archive/ENG0015").unwrap();
    /// let url = resolver.resolve("__P3.HTM").unwrap();
    /// assert_eq!(url.as_str(), "https://www.vatican.va/archive/ENG0015/__P3.HTM");
    /// ```
    pub fn resolve(&self, reference: &str) -> UrlResult<Url> {
        let reference = reference.trim();

        if has_http_scheme(reference) {
            return Url::parse(reference).map_err(|e| UrlError::Parse(format!("{}: {}", reference, e)));
        }

        let split = reference.find(['?', '#']).unwrap_or(reference.len());
        let (path, suffix) = reference.split_at(split);

        let joined = if path.starts_with('/') && is_under(&clean_path(path), &self.archive_root) {
            clean_path(path)
        } else {
            clean_path(&format!("{}/{}", self.archive_root, path))
        };

        self.base
            .join(&format!("{}{}", joined, suffix))
            .map_err(|e| UrlError::Join {
                base: self.base.to_string(),
                reference: reference.to_string(),
                message: e.to_string(),
            })
    }
}

fn has_http_scheme(reference: &str) -> bool {
    let lower = reference.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
