use std::collections::BTreeSet;

use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{Rng, distr::Alphanumeric};

use crate::types::Scope;

/// Drops every character that is not an ASCII letter, digit, or space, so
/// that free text cannot break the search query syntax.
pub fn sanitize_input(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect()
}

/// Field-scoped search query, e.g. `track%3AHome+artist%3AResonance`.
pub fn field_query(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(field, value)| format!("{}%3A{}", field, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("+")
}

/// Comma-separated seed list for the recommendations endpoint.
pub fn join_seeds<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter()
        .map(|id| id.as_ref())
        .filter(|id| !id.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// `Authorization` header value for HTTP Basic auth with the client id and
/// secret, as the token endpoint expects for the authorization-code grant.
///
/// ```
/// assert_eq!(basic_auth_header("id", "secret"), "Basic aWQ6c2VjcmV0");
/// ```
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{client_id}:{client_secret}"));
    format!("Basic {encoded}")
}

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Space-separated scope list for the `scope` query parameter.
pub fn join_scopes(scopes: &[Scope]) -> String {
    scopes
        .iter()
        .map(Scope::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a space-separated scope string, ignoring scopes this client never
/// requests.
pub fn parse_scopes(scope: &str) -> BTreeSet<Scope> {
    scope
        .split_whitespace()
        .filter_map(|s| s.parse().ok())
        .collect()
}

/// `1234567` -> `1,234,567`
pub fn format_followers(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Everything after the first line, joined with `\n`.
pub fn strip_first_line(text: &str) -> String {
    text.split('\n').skip(1).collect::<Vec<_>>().join("\n")
}

/// Capitalizes each whitespace-separated word and collapses runs of
/// whitespace, e.g. `"al  GREEN"` -> `"Al Green"`. Used for playlist names.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
