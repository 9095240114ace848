//! Naming engine: pure string transforms from raw JSON keys to identifiers.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `phoneNumbers` | [`to_snake_case`] | `phone_numbers` |
//! | `first_name` | [`to_camel_case`] | `firstName` |
//! | `generated_from_json` | [`to_pascal_case`] | `GeneratedFromJson` |
//! | `phone_numbers` | [`capitalize_first`] | `Phone_numbers` |
//!
//! Which transform applies to which role (class, field, file) is decided by
//! the [`TargetProfile`].
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{GenError, Result};
use crate::profile::{FileNaming, TargetProfile};

static HUMP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\p{Ll}|\p{Nd})(\p{Lu})").expect("static regex"));
static ACRONYM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\p{Lu}+)(\p{Lu}\p{Ll})").expect("static regex"));
static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameCase {
    /// Keep the key, only replacing characters illegal in identifiers.
    Preserve,
    /// Force the first character to upper case; leave the rest alone.
    CapitalizeFirst,
    Snake,
    Camel,
    Pascal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRole {
    Class,
    Field,
    /// File name including the profile's extension.
    File,
}

/// Split on separators and case humps: `HTTPServer_url` -> `HTTP`, `Server`, `url`.
pub fn split_words(s: &str) -> Vec<String> {
    let s = ACRONYM.replace_all(s, "$1 $2");
    let s = HUMP.replace_all(&s, "$1 $2");
    SEPARATOR
        .split(&s)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn to_snake_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

pub fn to_camel_case(s: &str) -> String {
    let mut out = String::new();
    for (i, word) in split_words(s).iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(&title(word));
        }
    }
    out
}

pub fn to_pascal_case(s: &str) -> String {
    split_words(s).iter().map(|w| title(w)).collect()
}

/// Upper-case the first character only.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

fn title(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
    }
}

/// Replace characters that cannot appear in an identifier and keep a digit
/// from leading.
fn identifier(s: &str) -> String {
    let mut out: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// A key is usable when it has at least one letter or digit.
pub fn validate_key(key: &str) -> Result<()> {
    if key.chars().any(char::is_alphanumeric) {
        Ok(())
    } else {
        Err(GenError::InvalidName {
            key: key.to_string(),
            path: String::new(),
        })
    }
}

pub fn apply_case(raw: &str, case: NameCase) -> Result<String> {
    validate_key(raw)?;
    let cased = match case {
        NameCase::Preserve => raw.to_string(),
        NameCase::CapitalizeFirst => capitalize_first(&identifier(raw)),
        NameCase::Snake => to_snake_case(raw),
        NameCase::Camel => to_camel_case(raw),
        NameCase::Pascal => to_pascal_case(raw),
    };
    Ok(identifier(&cased))
}

/// Derive the name `raw` takes in `role` under `profile`'s conventions.
pub fn to_role(raw: &str, role: NameRole, profile: &TargetProfile) -> Result<String> {
    match role {
        NameRole::Class => {
            let name = apply_case(raw, profile.class_case)?;
            // `_2fa` is no Ruby constant; every class must open on a capital
            if name.starts_with(char::is_uppercase) {
                Ok(name)
            } else {
                Ok(format!("Class{name}"))
            }
        }
        NameRole::Field => {
            let mut name = apply_case(raw, profile.field_case)?;
            if profile.keywords.contains(&name.as_str()) {
                name.push('_');
            }
            Ok(name)
        }
        NameRole::File => Ok(format!("{}{}", module_name(raw, profile)?, profile.extension)),
    }
}

/// File stem for the class derived from `raw`; also the name other files
/// import it by.
pub fn module_name(raw: &str, profile: &TargetProfile) -> Result<String> {
    let class_name = to_role(raw, NameRole::Class, profile)?;
    Ok(match profile.file_naming {
        FileNaming::ClassName => class_name,
        FileNaming::Snake => to_snake_case(&class_name),
    })
}
