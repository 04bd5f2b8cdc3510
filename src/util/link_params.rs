//! Parameters carried by links the identity service emails out.
//!
//! Recovery and confirmation links arrive with either a query string
//! (`?token=...`) or a fragment (`#access_token=...&type=recovery`).

#[cfg(test)]
#[path = "link_params_test.rs"]
mod link_params_test;

/// First non-empty value of `key` in a query string or fragment, with `+`
/// read as a space. Percent escapes are left as they are.
pub fn link_param(raw: &str, key: &str) -> Option<String> {
    raw.trim_start_matches(['#', '?'])
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, v)| *k == key && !v.is_empty())
        .map(|(_, v)| v.replace('+', " "))
}
