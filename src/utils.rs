use std::collections::{HashMap, HashSet};

use rand::{Rng, distr::Alphanumeric};
use url::Url;

/// Random value for the OAuth `state` parameter.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Lowercases `input` and turns every run of non-alphanumeric characters into
/// a single `-`, trimming dashes at both ends.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Storage key of the credential for a scope-set.
///
/// Scopes are sorted and deduplicated first, so the key does not depend on the
/// order they were requested in.
pub fn cache_key(scopes: &[String]) -> String {
    let mut sorted: Vec<&str> = scopes.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    sorted.dedup();
    format!(".cache_{}", slugify(&sorted.join("-")))
}

/// Picks the authorization code out of the redirect query parameters.
///
/// A `state` that differs from `expected_state` is always rejected. A missing
/// one only when `require_state` is set.
pub fn code_from_params(
    params: &HashMap<String, String>,
    expected_state: &str,
    require_state: bool,
) -> Result<String, String> {
    if let Some(error) = params.get("error") {
        return Err(format!("authorization denied: {}", error));
    }

    match params.get("state") {
        Some(state) if state != expected_state => {
            return Err("state mismatch in authorization response".to_string());
        }
        None if require_state => {
            return Err("authorization response carries no state".to_string());
        }
        _ => {}
    }

    match params.get("code") {
        Some(code) if !code.is_empty() => Ok(code.clone()),
        _ => Err("authorization response carries no code".to_string()),
    }
}

/// Interprets what the user pasted after authorizing.
///
/// Accepts either the full redirected URL or just the code.
pub fn parse_code_input(input: &str, expected_state: &str) -> Result<String, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("no authorization code entered".to_string());
    }

    match Url::parse(input) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
            code_from_params(&params, expected_state, false)
        }
        _ => Ok(input.to_string()),
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Removes repeated ids, keeping the first occurrence of each.
pub fn remove_duplicate_ids(ids: &mut Vec<String>) {
    let mut seen_ids = HashSet::new();
    ids.retain(|id| seen_ids.insert(id.clone()));
}
