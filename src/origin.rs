use url::{Origin, Url};

use crate::error::RobotsError;

/// Resolves a raw request target into an absolute HTTP(S) URL.
///
/// Absolute URLs pass through as-is, relative references are resolved against
/// `base` when one is given. Rejection happens before any robots.txt work:
/// unparsable targets are [`RobotsError::InvalidUrl`], non-HTTP(S) schemes are
/// [`RobotsError::InvalidProtocol`].
pub fn resolve_target(raw: &str, base: Option<&Url>) -> Result<Url, RobotsError> {
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => match base {
            Some(base) => base
                .join(raw)
                .map_err(|e| RobotsError::InvalidUrl(format!("{raw}: {e}")))?,
            None => {
                return Err(RobotsError::InvalidUrl(format!(
                    "{raw}: relative URL without a base"
                )))
            }
        },
        Err(e) => return Err(RobotsError::InvalidUrl(format!("{raw}: {e}"))),
    };

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RobotsError::InvalidProtocol(other.to_string())),
    }
}

/// Canonical cache key for a URL: lowercased scheme and host, exact port.
///
/// Default ports fold away, so `https://example.com:443/a` and
/// `https://example.com/b` share one key. Only call this with URLs accepted by
/// [`resolve_target`]; HTTP(S) URLs always have a tuple origin.
pub fn origin_of(url: &Url) -> String {
    match url.origin() {
        origin @ Origin::Tuple(..) => origin.ascii_serialization(),
        Origin::Opaque(_) => unreachable!("HTTP(S) URLs have a tuple origin"),
    }
}
