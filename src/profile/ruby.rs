//! Ruby: plain classes with YARD-typed `attr_accessor`s, keyword
//! constructor and `from_hash`/`to_hash`.
use super::{FileNaming, ScalarNames, TargetLanguage, TargetProfile, Templates, quote};
use crate::lower::{ClassView, FieldTy, FieldView};
use crate::naming::NameCase;

const NAMES: ScalarNames = ScalarNames {
    boolean: "Boolean",
    integer: "Integer",
    float: "Float",
    string: "String",
};

pub static PROFILE: TargetProfile = TargetProfile {
    language: TargetLanguage::Ruby,
    extension: ".rb",
    class_case: NameCase::CapitalizeFirst,
    field_case: NameCase::Snake,
    root_case: NameCase::Snake,
    file_naming: FileNaming::Snake,
    keywords: KEYWORDS,
    scalars: NAMES,
    element_scalars: NAMES,
    array_type,
    map_type,
    // attr_accessor already is the accessor pair
    generates_accessors: false,
    rename_annotation: None,
    templates: Templates {
        header,
        field,
        fields_end: super::nothing,
        constructor,
        accessors: super::no_accessors,
        serialization,
        footer,
    },
};

const KEYWORDS: &[&str] = &[
    "BEGIN", "END", "alias", "and", "begin", "break", "case", "class", "def", "defined?", "do",
    "else", "elsif", "end", "ensure", "false", "for", "if", "in", "module", "next", "nil", "not",
    "or", "redo", "rescue", "retry", "return", "self", "super", "then", "true", "undef", "unless",
    "until", "when", "while", "yield",
];

fn array_type(item: &str) -> String {
    format!("Array<{item}>")
}

fn map_type(key: &str, value: &str) -> String {
    format!("Hash{{{key} => {value}}}")
}

fn header(class: &ClassView) -> String {
    let mut code = String::from("require 'json'\n");
    for dep in &class.dependencies {
        code.push_str(&format!("require_relative {}\n", quote(&dep.module, '\'')));
    }
    code.push_str(&format!("\nclass {}\n\n", class.class_name));
    code
}

fn field(field: &FieldView) -> String {
    format!("\t# @return [{}]\n\tattr_accessor :{}\n", field.type_name, field.ident)
}

fn constructor(class: &ClassView) -> String {
    if class.fields.is_empty() {
        return String::new();
    }
    let params = class
        .fields
        .iter()
        .map(|f| format!("{}: nil", f.ident))
        .collect::<Vec<_>>()
        .join(", ");
    let mut code = format!("\n\tdef initialize({params})\n");
    for f in &class.fields {
        code.push_str(&format!("\t\t@{0} = {0}\n", f.ident));
    }
    code.push_str("\tend\n");
    code
}

fn serialization(class: &ClassView) -> String {
    let mut code = String::new();

    code.push_str("\n\tdef self.from_hash(hash)\n\t\to = new\n");
    for f in &class.fields {
        let src = format!("hash[{}]", quote(&f.raw_name, '\''));
        code.push_str(&format!("\t\to.{} = {}\n", f.ident, decode_field(&f.ty, &src)));
    }
    code.push_str("\t\to\n\tend\n");

    code.push_str("\n\tdef self.from_json(json)\n\t\tfrom_hash(JSON.parse(json))\n\tend\n");

    code.push_str("\n\tdef to_hash\n\t\th = {}\n");
    for f in &class.fields {
        let value = encode_field(&f.ty, &format!("@{}", f.ident));
        code.push_str(&format!("\t\th[{}] = {value}\n", quote(&f.raw_name, '\'')));
    }
    code.push_str("\t\th\n\tend\n");

    code.push_str("\n\tdef to_json(*_args)\n\t\tJSON.generate(to_hash)\n\tend\n");
    code
}

fn footer(_: &ClassView) -> String {
    "end\n".to_string()
}

// ------------------------------- Conversions ------------------------------ //

fn decode_field(ty: &FieldTy, src: &str) -> String {
    match ty {
        FieldTy::Class { name } => format!("{src} && {name}.from_hash({src})"),
        FieldTy::Array(item) if item.carries_class() => {
            format!("{src}&.map {{ |e0| {} }}", decode(item, "e0", 1))
        }
        _ => src.to_string(),
    }
}

fn decode(ty: &FieldTy, src: &str, depth: usize) -> String {
    match ty {
        FieldTy::Class { name } => format!("{name}.from_hash({src})"),
        FieldTy::Array(item) if item.carries_class() => {
            let e = format!("e{depth}");
            format!("{src}.map {{ |{e}| {} }}", decode(item, &e, depth + 1))
        }
        _ => src.to_string(),
    }
}

fn encode_field(ty: &FieldTy, expr: &str) -> String {
    match ty {
        FieldTy::Class { .. } => format!("{expr}&.to_hash"),
        FieldTy::Array(item) if item.carries_class() => {
            format!("{expr}&.map {{ |e0| {} }}", encode(item, "e0", 1))
        }
        _ => expr.to_string(),
    }
}

fn encode(ty: &FieldTy, expr: &str, depth: usize) -> String {
    match ty {
        FieldTy::Class { .. } => format!("{expr}.to_hash"),
        FieldTy::Array(item) if item.carries_class() => {
            let e = format!("e{depth}");
            format!("{expr}.map {{ |{e}| {} }}", encode(item, &e, depth + 1))
        }
        _ => expr.to_string(),
    }
}
