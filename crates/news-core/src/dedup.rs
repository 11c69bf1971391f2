//! Duplicate-detection primitives for externally ingested content
//!
//! Two articles from the same wire source often differ only by tracking
//! query parameters or a URL fragment. Normalizing the URL and hashing it
//! together with a title slug yields a deterministic external id that makes
//! re-ingestion of the same article a conflict instead of a duplicate row.

use sha2::{Digest, Sha256};
use url::Url;

/// Query parameters stripped during URL normalization, in addition to the
/// whole `utm_*` family
const TRACKING_PARAMS: &[&str] = &["fbclid", "gclid", "ref", "ref_src", "s", "cmpid", "ocid"];

fn is_tracking_param(name: &str) -> bool {
    name.starts_with("utm_") || TRACKING_PARAMS.contains(&name)
}

/// Normalize an article URL for duplicate grouping.
///
/// Strips the fragment and known tracking query parameters; everything else
/// (scheme, host, path, remaining query) is preserved. Returns `None` when
/// the input is not a parseable absolute URL.
pub fn normalize_url(raw: &str) -> Option<String> {
    let mut url = Url::parse(raw.trim()).ok()?;
    url.set_fragment(None);

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(name, _)| !is_tracking_param(name))
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .finish();
        url.set_query(Some(&query));
    }

    Some(url.to_string())
}

/// Lowercase alphanumeric slug of a title, words joined by `-`
pub fn title_slug(title: &str) -> String {
    title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Deterministic external id for an ingested article.
///
/// SHA-256 over the normalized URL and the title slug, hex-encoded. Stable
/// across re-ingestion of the same article regardless of tracking decoration.
pub fn derive_external_id(source_url: &str, title: &str) -> String {
    let canonical_url =
        normalize_url(source_url).unwrap_or_else(|| source_url.trim().to_lowercase());

    let mut hasher = Sha256::new();
    hasher.update(canonical_url.as_bytes());
    hasher.update(b"\n");
    hasher.update(title_slug(title).as_bytes());
    format!("{:x}", hasher.finalize())
}
