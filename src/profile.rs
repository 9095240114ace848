//! Target profile table.
//!
//! One immutable [`TargetProfile`] per output language. A profile is pure
//! data plus template functions; the emitter runs the same algorithm for
//! every language and only ever reads the profile it was handed. Adding a
//! language means adding a module here and a row in [`TargetLanguage`].
pub mod java;
pub mod python;
pub mod ruby;
pub mod rust;
pub mod typescript;

use std::fmt;
use std::str::FromStr;

use crate::classify::ScalarKind;
use crate::error::{GenError, Result};
use crate::lower::{ClassView, FieldTy, FieldView};
use crate::naming::NameCase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetLanguage {
    Java,
    Ruby,
    Python,
    TypeScript,
    Rust,
}

impl TargetLanguage {
    pub const ALL: &'static [TargetLanguage] = &[
        TargetLanguage::Java,
        TargetLanguage::Ruby,
        TargetLanguage::Python,
        TargetLanguage::TypeScript,
        TargetLanguage::Rust,
    ];

    pub fn id(self) -> &'static str {
        match self {
            TargetLanguage::Java => "java",
            TargetLanguage::Ruby => "ruby",
            TargetLanguage::Python => "python",
            TargetLanguage::TypeScript => "typescript",
            TargetLanguage::Rust => "rust",
        }
    }

    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            TargetLanguage::Java => &[],
            TargetLanguage::Ruby => &["rb"],
            TargetLanguage::Python => &["py"],
            TargetLanguage::TypeScript => &["ts"],
            TargetLanguage::Rust => &["rs"],
        }
    }

    pub fn profile(self) -> &'static TargetProfile {
        match self {
            TargetLanguage::Java => &java::PROFILE,
            TargetLanguage::Ruby => &ruby::PROFILE,
            TargetLanguage::Python => &python::PROFILE,
            TargetLanguage::TypeScript => &typescript::PROFILE,
            TargetLanguage::Rust => &rust::PROFILE,
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TargetLanguage {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        TargetLanguage::ALL
            .iter()
            .copied()
            .find(|lang| lang.id() == needle || lang.aliases().contains(&needle.as_str()))
            .ok_or_else(|| GenError::UnsupportedTargetLanguage {
                name: s.to_string(),
                supported: TargetLanguage::ALL
                    .iter()
                    .map(|l| l.id())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// How a class's file stem is derived from its class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileNaming {
    /// One public class per file, file named exactly like the class.
    ClassName,
    Snake,
}

#[derive(Debug, Clone, Copy)]
pub struct ScalarNames {
    pub boolean: &'static str,
    pub integer: &'static str,
    pub float: &'static str,
    pub string: &'static str,
}

impl ScalarNames {
    pub fn get(&self, kind: ScalarKind) -> &'static str {
        match kind {
            ScalarKind::Boolean => self.boolean,
            ScalarKind::Integer => self.integer,
            ScalarKind::Float => self.float,
            ScalarKind::String => self.string,
        }
    }
}

/// Source fragments, in the order the emitter writes them.
pub struct Templates {
    /// Imports, annotations and the class opening line.
    pub header: fn(&ClassView) -> String,
    pub field: fn(&FieldView) -> String,
    /// Closes the field block where the language separates it from methods.
    pub fields_end: fn(&ClassView) -> String,
    pub constructor: fn(&ClassView) -> String,
    pub accessors: fn(&FieldView) -> String,
    /// decode-from-map / encode-to-map plus the JSON text pair on top.
    pub serialization: fn(&ClassView) -> String,
    pub footer: fn(&ClassView) -> String,
}

pub struct TargetProfile {
    pub language: TargetLanguage,
    /// Including the leading dot.
    pub extension: &'static str,
    pub class_case: NameCase,
    pub field_case: NameCase,
    /// Applied to the default top-level name before the class rule.
    pub root_case: NameCase,
    pub file_naming: FileNaming,
    /// Field names that must be suffixed with `_`.
    pub keywords: &'static [&'static str],
    pub scalars: ScalarNames,
    /// Scalar spelling inside generic containers (boxed types on the JVM).
    pub element_scalars: ScalarNames,
    pub array_type: fn(&str) -> String,
    pub map_type: fn(&str, &str) -> String,
    /// `false` when fields are public or accessors come for free.
    pub generates_accessors: bool,
    /// Line placed above a field whose local name differs from its key.
    pub rename_annotation: Option<fn(&str) -> String>,
    pub templates: Templates,
}

impl TargetProfile {
    /// Spell a resolved type in this language.
    pub fn type_name(&self, ty: &FieldTy) -> String {
        self.spell(ty, false)
    }

    fn spell(&self, ty: &FieldTy, in_container: bool) -> String {
        match ty {
            FieldTy::Scalar(kind) if in_container => self.element_scalars.get(*kind).to_string(),
            FieldTy::Scalar(kind) => self.scalars.get(*kind).to_string(),
            FieldTy::Class { name } => name.clone(),
            FieldTy::Array(item) => (self.array_type)(&self.spell(item, true)),
            FieldTy::Map(key, value) => (self.map_type)(&self.spell(key, true), &self.spell(value, true)),
        }
    }
}

impl fmt::Debug for TargetProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetProfile")
            .field("language", &self.language)
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}

// ------------------------------- Shared bits ------------------------------ //

/// Template for languages with nothing to say at a given slot.
pub(crate) fn nothing(_: &ClassView) -> String {
    String::new()
}

/// Accessor slot of profiles with `generates_accessors: false`.
pub(crate) fn no_accessors(_: &FieldView) -> String {
    String::new()
}

/// String literal delimited by `quote`, escaping what every target needs.
pub(crate) fn quote(s: &str, quote: char) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}
