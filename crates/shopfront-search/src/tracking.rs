#![forbid(unsafe_code)]

//! Search result links carrying analytics parameters.

use url::form_urlencoded;

/// Build `{base}?{params..}&q={term}&{tracking}`.
///
/// `params` and `term` are form-encoded; `tracking` is the opaque string the
/// API returned and is appended as-is. A blank `tracking` is omitted.
///
/// ```
/// use shopfront_search::tracking::url_with_tracking_params;
///
/// let url = url_with_tracking_params("/products/tee", &[], "red tee", Some("_pos=1&_sid=ab"));
/// assert_eq!(url, "/products/tee?q=red+tee&_pos=1&_sid=ab");
/// ```
#[must_use]
pub fn url_with_tracking_params(
    base_url: &str,
    params: &[(&str, &str)],
    term: &str,
    tracking: Option<&str>,
) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        query.append_pair(key, value);
    }
    query.append_pair("q", term);
    let mut search = query.finish();
    if let Some(tracking) = tracking.map(str::trim).filter(|t| !t.is_empty()) {
        search.push('&');
        search.push_str(tracking);
    }
    format!("{base_url}?{search}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_precede_term() {
        assert_eq!(
            url_with_tracking_params("/search", &[("type", "product")], "hat", None),
            "/search?type=product&q=hat"
        );
    }

    #[test]
    fn term_is_encoded_and_tracking_verbatim() {
        assert_eq!(
            url_with_tracking_params("/pages/faq", &[], "a&b", Some("_sid=x%20y")),
            "/pages/faq?q=a%26b&_sid=x%20y"
        );
    }

    #[test]
    fn blank_tracking_is_dropped() {
        assert_eq!(
            url_with_tracking_params("/blogs/news/post", &[], "post", Some("  ")),
            "/blogs/news/post?q=post"
        );
    }
}
