//! Canonical naming of discovered component types.
//!
//! Pure functions only: the results become schema type keys, so identical
//! inputs must always yield identical outputs.

/// Capitalize the first character, leave the rest untouched.
pub fn upper_camel(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Lowercase the first character, leave the rest untouched.
pub fn lower_initial(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// The capitalized singular noun of a plural group name:
/// `Listeners` -> `Listener`, `InputValidators` -> `InputValidator`.
pub fn singular_suffix(group_name: &str) -> String {
    let trimmed = group_name.strip_suffix('s').unwrap_or(group_name);
    upper_camel(trimmed)
}

/// Keep only the final dot-separated segment of a qualified name.
pub fn simple_name(raw_name: &str) -> &str {
    raw_name.rsplit('.').next().unwrap_or(raw_name)
}

/// Replace a matched trailing substring with the group's singular noun:
/// `EsbJmsTransactionalStorage` + `ErrorStorages`/`TransactionalStorage`
/// -> `EsbJmsErrorStorage`.
pub fn replace_last_part(group_name: &str, name: &str, last_part: &str) -> String {
    match name.strip_suffix(last_part) {
        Some(stem) => format!("{stem}{}", singular_suffix(group_name)),
        None => name.to_string(),
    }
}

/// Map a raw implementation name into the canonical semantic name for a
/// group.
///
/// `alias` is the legacy trailing segment that stands in for the group's
/// suffix (e.g. `TransactionalStorage` for the storage groups); when absent
/// the group suffix is appended if the name does not already carry it.
pub fn canonicalize(raw_name: &str, group_name: &str, alias: Option<&str>) -> String {
    let base = upper_camel(simple_name(raw_name));
    let name = match alias {
        Some(last_part) => replace_last_part(group_name, &base, last_part),
        None => {
            let suffix = singular_suffix(group_name);
            if base.ends_with(&suffix) {
                base
            } else {
                format!("{base}{suffix}")
            }
        }
    };
    // Legacy rename: the generic sender-wrapping pipe gets a descriptive name.
    if name == "GenericMessageSendingPipe" {
        "SenderPipe".to_string()
    } else {
        name
    }
}
