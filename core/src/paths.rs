//! Path templates of the movies service and the helpers that fill them in.

use std::fmt::Display;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

pub const ALL_MOVIES: &str = "/movieservice/v1/allMovies";
pub const MOVIE: &str = "/movieservice/v1/movie";
pub const MOVIE_BY_ID: &str = "/movieservice/v1/movie/{id}";
pub const MOVIE_BY_NAME: &str = "/movieservice/v1/movieName";
pub const MOVIE_BY_YEAR: &str = "/movieservice/v1/movieYear";

/// Substitute each `{...}` placeholder in `template` with the next value of
/// `params`, in order. Placeholders left without a value are kept verbatim.
pub fn expand_path(template: &str, params: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut params = params.iter();
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        match params.next() {
            Some(value) => out.push_str(&value.to_string()),
            None => out.push_str(&rest[start..=start + len]),
        }
        rest = &rest[start + len + 1..];
    }
    out.push_str(rest);
    out
}

/// Query bytes left as-is: the RFC 3986 unreserved set. Everything else,
/// space included, is written as `%XX`.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

/// Encode `params` as `key=value` pairs joined by `&`, keeping their order.
/// A space becomes `%20`, never `+`.
pub fn encode_query<K, V>(params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key.as_ref(), QUERY_COMPONENT),
                utf8_percent_encode(value.as_ref(), QUERY_COMPONENT)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Replace the query of `url` with the encoded `params`. An empty `params`
/// leaves `url` untouched.
pub fn with_query<K, V>(mut url: Url, params: &[(K, V)]) -> Url
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if !params.is_empty() {
        url.set_query(Some(&encode_query(params)));
    }
    url
}
