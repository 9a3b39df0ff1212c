//! CSRF token lookup.
//!
//! The backend expects the token from its anti-forgery middleware on every
//! state-changing request. It can be found in three places, checked in this
//! order:
//!
//! 1. hidden form field `input[name=csrfmiddlewaretoken]` on an HTML page
//! 2. `meta[name=csrf-token]` on the same page
//! 3. the `csrftoken` cookie

use scraper::{Html, Selector};

/// Header carrying the token on POST requests
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Cookie set by the backend alongside any rendered page
pub const CSRF_COOKIE: &str = "csrftoken";

const FORM_FIELD_SELECTOR: &str = "input[name=csrfmiddlewaretoken]";
const META_TAG_SELECTOR: &str = "meta[name=csrf-token]";

/// Where a token was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsrfSource {
    FormField,
    MetaTag,
    Cookie,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken {
    pub value: String,
    pub source: CsrfSource,
}

/// Resolves a token from a bootstrap page and the cookie jar's header value
#[derive(Debug, Default)]
pub struct CsrfLookup;

impl CsrfLookup {
    /// Try each source in priority order.
    ///
    /// `html` is the bootstrap page body if it could be fetched; `cookies`
    /// is a `Cookie` request header value (`a=b; c=d`).
    pub fn resolve(&self, html: Option<&str>, cookies: Option<&str>) -> Option<CsrfToken> {
        html.and_then(Self::from_html)
            .or_else(|| cookies.and_then(Self::from_cookie_header))
    }

    /// Form field first, then meta tag
    pub fn from_html(html: &str) -> Option<CsrfToken> {
        let document = Html::parse_document(html);

        let lookups = [
            (FORM_FIELD_SELECTOR, "value", CsrfSource::FormField),
            (META_TAG_SELECTOR, "content", CsrfSource::MetaTag),
        ];
        lookups.into_iter().find_map(|(selector, attr, source)| {
            let selector = Selector::parse(selector).ok()?;
            document
                .select(&selector)
                .filter_map(|el| el.value().attr(attr))
                .map(str::trim)
                .find(|v| !v.is_empty())
                .map(|value| CsrfToken {
                    value: value.to_string(),
                    source,
                })
        })
    }

    pub fn from_cookie_header(header: &str) -> Option<CsrfToken> {
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, value)| *name == CSRF_COOKIE && !value.is_empty())
            .map(|(_, value)| CsrfToken {
                value: value.to_string(),
                source: CsrfSource::Cookie,
            })
    }
}
