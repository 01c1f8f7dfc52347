//! Canonical URL building for planet groups and feeds.
//!
//! Everything in this module is a pure function over its inputs. Query-string
//! composition deliberately applies no escaping; callers that need it go
//! through [`encode`] and [`decode`].

use crate::ArcStr;

/// Builds the home URL for a weblog.
pub fn weblog_url(site: &str, weblog: &str) -> String {
    format!("{}/{}/", site, weblog)
}

/// Builds the root URL for a planet.
///
/// Returns `None` when the planet name is missing.
pub fn planet_url(site: &str, planet: Option<&str>) -> Option<String> {
    let planet = planet?;
    Some(format!("{}/{}/", site, planet))
}

/// Builds the URL for a group page on a given planet.
///
/// A page number of zero means the unpaged view and adds no query string.
///
/// Returns `None` when the planet or group name is missing.
pub fn group_url(site: &str, planet: Option<&str>, group: Option<&str>, page: usize) -> Option<String> {
    let group = group?;

    let mut url = planet_url(site, planet)?;
    url.push_str("group/");
    url.push_str(group);
    url.push('/');

    if page > 0 {
        url.push_str("?page=");
        url.push_str(&page.to_string());
    }

    Some(url)
}

/// Builds the URL for a feed on a given planet group.
///
/// Returns `None` when the planet or group name is missing.
pub fn group_feed_url(
    site: &str,
    planet: Option<&str>,
    group: Option<&str>,
    format: &str,
) -> Option<String> {
    let mut url = group_url(site, planet, group, 0)?;
    url.push_str("feed/");
    url.push_str(format);

    Some(url)
}

/// Builds the URL for the OPML file of a given planet group.
///
/// Returns `None` when the planet or group name is missing.
pub fn group_opml_url(site: &str, planet: Option<&str>, group: Option<&str>) -> Option<String> {
    let mut url = group_url(site, planet, group, 0)?;
    url.push_str("opml");

    Some(url)
}

/// Composes key=value pairs into a query string.
///
/// Pairs are emitted in the order given, the first prefixed with `?` and the
/// rest with `&`. Values are not escaped at this layer.
pub fn query_string(params: &[(ArcStr, ArcStr)]) -> String {
    let mut query = String::new();

    for (key, value) in params {
        if query.is_empty() {
            query.push('?');
        } else {
            query.push('&');
        }

        query.push_str(key);
        query.push('=');
        query.push_str(value);
    }

    query
}

/// URL encodes a string using UTF-8 percent encoding.
pub fn encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// URL decodes a UTF-8 percent-encoded string.
///
/// Returns `None` when the input decodes to invalid UTF-8.
pub fn decode(s: &str) -> Option<String> {
    urlencoding::decode(s).ok().map(|cow| cow.into_owned())
}

/// Simple pager over a base URL, producing home/next/previous links by
/// appending a `page` query parameter.
#[derive(Debug, Clone)]
pub struct Pager {
    /// The unpaged base URL
    base: ArcStr,
    /// The current page, zero-based
    page: usize,
    /// Whether there are more items after the current page
    more: bool,
}

impl Pager {
    /// Creates a new pager for the given base URL.
    pub fn new(base: ArcStr, page: usize, more: bool) -> Self {
        Self { base, page, more }
    }

    /// Returns the link to the unpaged view.
    pub fn home_link(&self) -> ArcStr {
        self.base.clone()
    }

    /// Returns the link to the next page, when more items exist.
    pub fn next_link(&self) -> Option<String> {
        if !self.more {
            return None;
        }

        let next = self.page + 1;
        Some(format!(
            "{}{}",
            self.base,
            query_string(&[(ArcStr::from("page"), ArcStr::from(next.to_string()))])
        ))
    }

    /// Returns the link to the previous page, when not on the first page.
    pub fn prev_link(&self) -> Option<String> {
        if self.page == 0 {
            return None;
        }

        let prev = self.page - 1;
        Some(format!(
            "{}{}",
            self.base,
            query_string(&[(ArcStr::from("page"), ArcStr::from(prev.to_string()))])
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITE: &str = "http://example.com";

    #[test]
    fn test_weblog_url() {
        assert_eq!(weblog_url(SITE, "myblog"), "http://example.com/myblog/");
    }

    #[test]
    fn test_planet_url() {
        assert_eq!(
            planet_url(SITE, Some("tech")),
            Some("http://example.com/tech/".to_string())
        );
        assert_eq!(planet_url(SITE, None), None);
    }

    #[test]
    fn test_group_url_with_page() {
        assert_eq!(
            group_url(SITE, Some("tech"), Some("rust"), 0),
            Some("http://example.com/tech/group/rust/".to_string())
        );
        assert_eq!(
            group_url(SITE, Some("tech"), Some("rust"), 2),
            Some("http://example.com/tech/group/rust/?page=2".to_string())
        );
        assert_eq!(group_url(SITE, None, Some("rust"), 0), None);
        assert_eq!(group_url(SITE, Some("tech"), None, 0), None);
    }

    #[test]
    fn test_group_url_is_prefix_of_feed_and_opml_urls() {
        let group = group_url(SITE, Some("tech"), Some("rust"), 0).unwrap();
        let feed = group_feed_url(SITE, Some("tech"), Some("rust"), "rss").unwrap();
        let opml = group_opml_url(SITE, Some("tech"), Some("rust")).unwrap();

        assert!(feed.starts_with(&group));
        assert!(opml.starts_with(&group));
        assert!(feed.ends_with("feed/rss"));
        assert!(opml.ends_with("opml"));
    }

    #[test]
    fn test_query_string_empty() {
        assert_eq!(query_string(&[]), "");
    }

    #[test]
    fn test_query_string_single_pair() {
        let params = [(ArcStr::from("page"), ArcStr::from("2"))];
        assert_eq!(query_string(&params), "?page=2");
    }

    #[test]
    fn test_query_string_preserves_insertion_order() {
        let params = [
            (ArcStr::from("b"), ArcStr::from("2")),
            (ArcStr::from("a"), ArcStr::from("1")),
        ];
        assert_eq!(query_string(&params), "?b=2&a=1");
    }

    #[test]
    fn test_encode_decode_round_trip() {
        for input in ["plain", "with space", "a&b=c", "100%", "caf\u{e9} \u{2615}"] {
            let encoded = encode(input);
            assert_eq!(decode(&encoded).as_deref(), Some(input));
        }
    }

    #[test]
    fn test_pager_links() {
        let base = ArcStr::from("http://example.com/tech/group/rust/");
        let pager = Pager::new(base.clone(), 1, true);

        assert_eq!(pager.home_link(), base);
        assert_eq!(
            pager.next_link().unwrap(),
            "http://example.com/tech/group/rust/?page=2"
        );
        assert_eq!(
            pager.prev_link().unwrap(),
            "http://example.com/tech/group/rust/?page=0"
        );
    }

    #[test]
    fn test_pager_boundaries() {
        let base = ArcStr::from("http://example.com/tech/group/rust/");
        let pager = Pager::new(base, 0, false);

        assert_eq!(pager.next_link(), None);
        assert_eq!(pager.prev_link(), None);
    }
}
