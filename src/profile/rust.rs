//! Rust: serde-derived structs with `from_map`/`to_map` helpers.
use super::{FileNaming, ScalarNames, TargetLanguage, TargetProfile, Templates, quote};
use crate::lower::{ClassView, FieldView};
use crate::naming::NameCase;

const NAMES: ScalarNames = ScalarNames {
    boolean: "bool",
    integer: "i64",
    float: "f64",
    string: "String",
};

pub static PROFILE: TargetProfile = TargetProfile {
    language: TargetLanguage::Rust,
    extension: ".rs",
    class_case: NameCase::Pascal,
    field_case: NameCase::Snake,
    root_case: NameCase::Pascal,
    file_naming: FileNaming::Snake,
    keywords: KEYWORDS,
    scalars: NAMES,
    element_scalars: NAMES,
    array_type,
    map_type,
    // fields are `pub`
    generates_accessors: false,
    rename_annotation: Some(rename_annotation),
    templates: Templates {
        header,
        field,
        fields_end,
        constructor: super::nothing,
        accessors: super::no_accessors,
        serialization,
        footer,
    },
};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "static", "struct", "super", "trait", "true", "try", "type", "typeof",
    "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

fn array_type(item: &str) -> String {
    format!("Vec<{item}>")
}

fn map_type(key: &str, value: &str) -> String {
    format!("std::collections::HashMap<{key}, {value}>")
}

fn rename_annotation(raw: &str) -> String {
    format!("    #[serde(rename = {})]\n", quote(raw, '"'))
}

fn header(class: &ClassView) -> String {
    let mut code = String::from("use serde::{Deserialize, Serialize};\n");
    for dep in &class.dependencies {
        code.push_str(&format!("use super::{}::{};\n", dep.module, dep.class_name));
    }
    code.push_str("\n#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]\n");
    code.push_str("#[serde(default)]\n");
    code.push_str(&format!("pub struct {} {{\n", class.class_name));
    code
}

fn field(field: &FieldView) -> String {
    format!("    pub {}: Option<{}>,\n", field.ident, field.type_name)
}

fn fields_end(_: &ClassView) -> String {
    "}\n".to_string()
}

fn serialization(class: &ClassView) -> String {
    let mut code = format!("\nimpl {} {{\n", class.class_name);
    code.push_str("    pub fn from_map(map: serde_json::Map<String, serde_json::Value>) -> serde_json::Result<Self> {\n");
    code.push_str("        serde_json::from_value(serde_json::Value::Object(map))\n    }\n");
    code.push_str("\n    pub fn to_map(&self) -> serde_json::Result<serde_json::Map<String, serde_json::Value>> {\n");
    code.push_str("        serde_json::to_value(self).and_then(serde_json::from_value)\n    }\n");
    code.push_str("\n    pub fn from_json(json: &str) -> serde_json::Result<Self> {\n");
    code.push_str("        serde_json::from_str(json)\n    }\n");
    code.push_str("\n    pub fn to_json(&self) -> serde_json::Result<String> {\n");
    code.push_str("        serde_json::to_string(self)\n    }\n");
    code
}

fn footer(_: &ClassView) -> String {
    "}\n".to_string()
}
