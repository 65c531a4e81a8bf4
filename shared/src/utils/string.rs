//! String helpers. A string that is empty or only whitespace counts as blank
//! and most helpers return an empty result for it.

use rand::{thread_rng, Rng};

const RANDOM_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}

pub fn contains(input: &str, needle: &str) -> bool {
    !is_blank(input) && !is_blank(needle) && input.contains(needle)
}

pub fn contains_ignore_case(input: &str, needle: &str) -> bool {
    !is_blank(input)
        && !is_blank(needle)
        && input.to_lowercase().contains(&needle.to_lowercase())
}

/// Uppercase the first character; leading whitespace is left alone
pub fn capitalize_first(input: &str) -> String {
    if is_blank(input) {
        return String::new();
    }
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lowercase_first(input: &str) -> String {
    if is_blank(input) {
        return String::new();
    }
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replace every occurrence of `search`; a blank `search` leaves the input as is
pub fn replace_all(input: &str, search: &str, replacement: &str) -> String {
    if is_blank(input) {
        return String::new();
    }
    if is_blank(search) {
        return input.to_string();
    }
    input.replace(search, replacement)
}

pub fn reverse(input: &str) -> String {
    if is_blank(input) {
        return String::new();
    }
    input.chars().rev().collect()
}

/// Count non-overlapping occurrences of `needle`
pub fn count_occurrences(input: &str, needle: &str) -> usize {
    if is_blank(input) || is_blank(needle) {
        return 0;
    }
    input.matches(needle).count()
}

/// Cut to `max_chars` characters, optionally appending `...`
pub fn truncate(input: &str, max_chars: usize, ellipsis: bool) -> String {
    if is_blank(input) || input.chars().count() <= max_chars {
        return input.to_string();
    }
    let mut truncated: String = input.chars().take(max_chars).collect();
    if ellipsis {
        truncated.push_str("...");
    }
    truncated
}

/// Lowercase everything, then capitalize each space-separated word
pub fn to_title_case(input: &str) -> String {
    if is_blank(input) {
        return String::new();
    }
    input
        .to_lowercase()
        .split(' ')
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Random alphanumeric string of `length` characters
pub fn random_string(length: usize) -> String {
    let mut rng = thread_rng();
    (0..length)
        .map(|_| RANDOM_CHARSET[rng.gen_range(0..RANDOM_CHARSET.len())] as char)
        .collect()
}

pub fn remove_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}
