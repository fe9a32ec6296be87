use sha2::{Digest, Sha256};
use url::Url;

/// Characters that are not allowed in filenames on common filesystems
const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Key used for the site root, whose path reduces to nothing
const ROOT_KEY: &str = "index";

/// Longest filename most filesystems accept, in bytes
pub const MAX_KEY_LEN: usize = 255;

/// Hex digits of the digest appended to shortened keys
const DIGEST_LEN: usize = 16;

/// Derives the cache filename for a page URL
///
/// # Derivation Steps
///
/// 1. Take the URL path (and query, if any); scheme and host are dropped
/// 2. Replace path separators (`/` and `\`) with `_`
/// 3. Trim trailing separators
/// 4. Remove characters illegal in filenames and control characters
/// 5. Map an empty or dots-only result to `index`
/// 6. Shorten keys over [`MAX_KEY_LEN`] bytes to a prefix plus a digest of the full key
///
/// The result never contains a separator, so it always names a single file
/// directly inside the cache directory.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use catechism::cache::cache_key;
///
/// let url = Url::parse("https://www.vatican.va/archive/ENG0015/__P2.HTM").unwrap();
/// assert_eq!(cache_key(&url), "_archive_ENG0015___P2.HTM");
/// ```
pub fn cache_key(url: &Url) -> String {
    let mut raw = url.path().to_string();
    if let Some(query) = url.query() {
        raw.push('?');
        raw.push_str(query);
    }

    let replaced = raw.replace(['/', '\\'], "_");
    let key: String = replaced
        .trim_end_matches('_')
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c) && !c.is_control())
        .collect();

    if key.is_empty() || key.chars().all(|c| c == '.') {
        return ROOT_KEY.to_string();
    }

    if key.len() > MAX_KEY_LEN {
        return shorten(&key);
    }

    key
}

/// Truncates `key` on a char boundary and appends `-` plus a SHA-256 prefix
fn shorten(key: &str) -> String {
    let digest = hex::encode(Sha256::digest(key.as_bytes()));

    let mut cut = MAX_KEY_LEN - DIGEST_LEN - 1;
    while !key.is_char_boundary(cut) {
        cut -= 1;
    }

    format!("{}-{}", &key[..cut], &digest[..DIGEST_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Component, Path};

    fn key_of(url: &str) -> String {
        cache_key(&Url::parse(url).unwrap())
    }

    fn assert_safe(key: &str) {
        assert!(!key.is_empty());
        assert!(!key.contains('/'), "separator in {key}");
        assert!(!key.contains('\\'), "separator in {key}");
        assert!(
            !key.chars().any(|c| ILLEGAL_CHARS.contains(&c) || c.is_control()),
            "illegal character in {key}"
        );
        assert_ne!(key, ".");
        assert_ne!(key, "..");

        let components: Vec<_> = Path::new(key).components().collect();
        assert_eq!(components.len(), 1, "{key} is not a single component");
        assert!(matches!(components[0], Component::Normal(_)));
    }

    #[test]
    fn test_catechism_page_key() {
        assert_eq!(
            key_of("https://www.vatican.va/archive/ENG0015/__P2.HTM"),
            "_archive_ENG0015___P2.HTM"
        );
    }

    #[test]
    fn test_host_and_scheme_are_ignored() {
        assert_eq!(
            key_of("http://127.0.0.1:9999/archive/ENG0015/__P2.HTM"),
            key_of("https://www.vatican.va/archive/ENG0015/__P2.HTM")
        );
    }

    #[test]
    fn test_trailing_separator_trimmed() {
        assert_eq!(key_of("https://www.vatican.va/archive/ENG0015/"), "_archive_ENG0015");
    }

    #[test]
    fn test_root_maps_to_index() {
        assert_eq!(key_of("https://www.vatican.va/"), "index");
        assert_eq!(key_of("https://www.vatican.va"), "index");
    }

    #[test]
    fn test_query_is_part_of_key() {
        let plain = key_of("https://www.vatican.va/archive/page.htm");
        let with_query = key_of("https://www.vatican.va/archive/page.htm?part=2");
        assert_ne!(plain, with_query);
        assert_eq!(with_query, "_archive_page.htmpart=2");
    }

    #[test]
    fn test_keys_are_single_safe_filenames() {
        let urls = [
            "https://www.vatican.va/archive/ENG0015/__P2.HTM",
            "https://www.vatican.va/a/b/c/d/",
            "https://www.vatican.va/..",
            "https://www.vatican.va/../../etc/passwd",
            "https://www.vatican.va/%2e%2e/%2e%2e/secret",
            "https://www.vatican.va/a%5Cb/c",
            "https://www.vatican.va/dir/a\\b",
            "https://www.vatican.va/x:y|z*?q=<a>&\"b\"",
            "https://www.vatican.va/.",
            "https://www.vatican.va/page?x=..",
            "https://www.vatican.va/tab%09name",
        ];

        for url in urls {
            let key = key_of(url);
            assert_safe(&key);
        }
    }

    #[test]
    fn test_key_at_limit_is_kept() {
        // "/archive/ENG0015/" + 230 + ".HTM" gives a 251-byte key
        let url = format!("https://www.vatican.va/archive/ENG0015/{}.HTM", "a".repeat(230));
        let key = key_of(&url);

        assert_eq!(key.len(), 251);
        assert!(key.ends_with(".HTM"));
        assert_safe(&key);
    }

    #[test]
    fn test_long_key_is_shortened() {
        let long = format!("https://www.vatican.va/archive/ENG0015/{}.HTM", "a".repeat(380));
        let other = format!("https://www.vatican.va/archive/ENG0015/{}.HTM", "a".repeat(381));

        let key = key_of(&long);
        assert!(key.len() <= MAX_KEY_LEN);
        assert!(key.starts_with("_archive_ENG0015_aaaa"));
        assert_safe(&key);

        assert_eq!(key, key_of(&long));
        assert_ne!(key, key_of(&other));
    }

    #[test]
    fn test_shorten_cuts_on_char_boundary() {
        let key = shorten(&"é".repeat(200));
        assert!(key.len() <= MAX_KEY_LEN);
        assert!(key.starts_with("éé"));
        assert_eq!(key.rsplit('-').next().map(str::len), Some(DIGEST_LEN));
    }

    #[test]
    fn test_key_stays_inside_cache_directory() {
        let dir = Path::new("/tmp/catechism-cache");
        for url in [
            "https://www.vatican.va/../../etc/passwd",
            "https://www.vatican.va/dir/a\\..\\..\\b",
        ] {
            let path = dir.join(key_of(url));
            assert_eq!(path.parent(), Some(dir));
        }
    }
}
