//! Python: `@dataclass` classes with `from_dict`/`to_dict`.
use super::{FileNaming, ScalarNames, TargetLanguage, TargetProfile, Templates, quote};
use crate::lower::{ClassView, FieldTy, FieldView};
use crate::naming::NameCase;

const NAMES: ScalarNames = ScalarNames {
    boolean: "bool",
    integer: "int",
    float: "float",
    string: "str",
};

pub static PROFILE: TargetProfile = TargetProfile {
    language: TargetLanguage::Python,
    extension: ".py",
    class_case: NameCase::Pascal,
    field_case: NameCase::Snake,
    root_case: NameCase::Pascal,
    file_naming: FileNaming::Snake,
    keywords: KEYWORDS,
    scalars: NAMES,
    element_scalars: NAMES,
    array_type,
    map_type,
    generates_accessors: false,
    rename_annotation: None,
    templates: Templates {
        header,
        field,
        fields_end: super::nothing,
        // the dataclass decorator writes __init__
        constructor: super::nothing,
        accessors: super::no_accessors,
        serialization,
        footer: super::nothing,
    },
};

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
    "with", "yield",
];

const INDENT: &str = "    ";

fn array_type(item: &str) -> String {
    format!("List[{item}]")
}

fn map_type(key: &str, value: &str) -> String {
    format!("Dict[{key}, {value}]")
}

fn header(class: &ClassView) -> String {
    let mut code = String::new();
    code.push_str("from __future__ import annotations\n\n");
    code.push_str("import json\n");
    code.push_str("from dataclasses import dataclass\n");
    code.push_str("from typing import Any, Dict, List, Optional\n");
    if !class.dependencies.is_empty() {
        code.push('\n');
        for dep in &class.dependencies {
            code.push_str(&format!("from .{} import {}\n", dep.module, dep.class_name));
        }
    }
    code.push_str(&format!("\n\n@dataclass\nclass {}:\n", class.class_name));
    code
}

fn field(field: &FieldView) -> String {
    format!("{INDENT}{}: Optional[{}] = None\n", field.ident, field.type_name)
}

fn serialization(class: &ClassView) -> String {
    let name = &class.class_name;
    let i2 = INDENT.repeat(2);
    let i3 = INDENT.repeat(3);
    let mut code = String::new();

    code.push_str(&format!("\n{INDENT}@classmethod\n"));
    code.push_str(&format!("{INDENT}def from_dict(cls, data: Dict[str, Any]) -> {name}:\n"));
    if class.fields.is_empty() {
        code.push_str(&format!("{i2}return cls()\n"));
    } else {
        code.push_str(&format!("{i2}return cls(\n"));
        for f in &class.fields {
            let src = format!("data.get({})", quote(&f.raw_name, '"'));
            code.push_str(&format!("{i3}{}={},\n", f.ident, decode_field(&f.ty, &src)));
        }
        code.push_str(&format!("{i2})\n"));
    }

    code.push_str(&format!("\n{INDENT}@classmethod\n"));
    code.push_str(&format!("{INDENT}def from_json(cls, text: str) -> {name}:\n"));
    code.push_str(&format!("{i2}return cls.from_dict(json.loads(text))\n"));

    code.push_str(&format!("\n{INDENT}def to_dict(self) -> Dict[str, Any]:\n"));
    if class.fields.is_empty() {
        code.push_str(&format!("{i2}return {{}}\n"));
    } else {
        code.push_str(&format!("{i2}return {{\n"));
        for f in &class.fields {
            let value = encode_field(&f.ty, &format!("self.{}", f.ident));
            code.push_str(&format!("{i3}{}: {value},\n", quote(&f.raw_name, '"')));
        }
        code.push_str(&format!("{i2}}}\n"));
    }

    code.push_str(&format!("\n{INDENT}def to_json(self) -> str:\n"));
    code.push_str(&format!("{i2}return json.dumps(self.to_dict())\n"));
    code
}

// ------------------------------- Conversions ------------------------------ //

fn decode_field(ty: &FieldTy, src: &str) -> String {
    if ty.carries_class() && !matches!(ty, FieldTy::Map(..)) {
        format!("None if {src} is None else {}", decode(ty, src, 0))
    } else {
        src.to_string()
    }
}

fn decode(ty: &FieldTy, src: &str, depth: usize) -> String {
    match ty {
        FieldTy::Class { name } => format!("{name}.from_dict({src})"),
        FieldTy::Array(item) if item.carries_class() => {
            let e = format!("e{depth}");
            format!("[{} for {e} in {src}]", decode(item, &e, depth + 1))
        }
        _ => src.to_string(),
    }
}

fn encode_field(ty: &FieldTy, expr: &str) -> String {
    if ty.carries_class() && !matches!(ty, FieldTy::Map(..)) {
        format!("None if {expr} is None else {}", encode(ty, expr, 0))
    } else {
        expr.to_string()
    }
}

fn encode(ty: &FieldTy, expr: &str, depth: usize) -> String {
    match ty {
        FieldTy::Class { .. } => format!("{expr}.to_dict()"),
        FieldTy::Array(item) if item.carries_class() => {
            let e = format!("e{depth}");
            format!("[{} for {e} in {expr}]", encode(item, &e, depth + 1))
        }
        _ => expr.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_comprehensions_for_nested_classes() {
        let ty = FieldTy::Array(Box::new(FieldTy::Class { name: "PhoneNumbers".into() }));
        assert_eq!(
            decode_field(&ty, "data.get(\"phoneNumbers\")"),
            "None if data.get(\"phoneNumbers\") is None else \
             [PhoneNumbers.from_dict(e0) for e0 in data.get(\"phoneNumbers\")]"
        );
        assert_eq!(
            encode_field(&ty, "self.phone_numbers"),
            "None if self.phone_numbers is None else [e0.to_dict() for e0 in self.phone_numbers]"
        );
    }

    #[test]
    fn scalars_pass_through() {
        let ty = FieldTy::Array(Box::new(FieldTy::Scalar(crate::classify::ScalarKind::String)));
        assert_eq!(decode_field(&ty, "data.get(\"tags\")"), "data.get(\"tags\")");
    }
}
