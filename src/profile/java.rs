//! Java: POJOs with Jackson annotations, getter/setter pairs and
//! `fromMap`/`toMap` over `Map<String, Object>`.
use super::{FileNaming, ScalarNames, TargetLanguage, TargetProfile, Templates, quote};
use crate::classify::ScalarKind;
use crate::lower::{ClassView, FieldTy, FieldView};
use crate::naming::NameCase;

pub static PROFILE: TargetProfile = TargetProfile {
    language: TargetLanguage::Java,
    extension: ".java",
    class_case: NameCase::CapitalizeFirst,
    field_case: NameCase::Camel,
    root_case: NameCase::Camel,
    file_naming: FileNaming::ClassName,
    keywords: KEYWORDS,
    scalars: ScalarNames {
        boolean: "boolean",
        integer: "int",
        float: "float",
        string: "String",
    },
    element_scalars: ScalarNames {
        boolean: "Boolean",
        integer: "Integer",
        float: "Float",
        string: "String",
    },
    array_type,
    map_type,
    generates_accessors: true,
    rename_annotation: Some(rename_annotation),
    templates: Templates {
        header,
        field,
        fields_end: super::nothing,
        constructor,
        accessors,
        serialization,
        footer,
    },
};

const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

fn array_type(item: &str) -> String {
    format!("List<{item}>")
}

fn map_type(key: &str, value: &str) -> String {
    format!("Map<{key}, {value}>")
}

fn rename_annotation(raw: &str) -> String {
    format!("\t@JsonProperty({})\n", quote(raw, '"'))
}

fn header(class: &ClassView) -> String {
    let mut code = String::new();
    if class.has_renames() {
        code.push_str("import com.fasterxml.jackson.annotation.JsonProperty;\n");
    }
    code.push_str("import com.fasterxml.jackson.core.JsonProcessingException;\n");
    code.push_str("import com.fasterxml.jackson.databind.ObjectMapper;\n");
    code.push_str("import java.util.LinkedHashMap;\n");
    if class.has_arrays() {
        code.push_str("import java.util.List;\n");
    }
    code.push_str("import java.util.Map;\n");
    if class.has_arrays() {
        code.push_str("import java.util.stream.Collectors;\n");
    }
    code.push_str(&format!("\npublic class {} {{\n\n", class.class_name));
    code
}

fn field(field: &FieldView) -> String {
    format!("\tprivate {} {};\n", field.type_name, field.ident)
}

fn constructor(class: &ClassView) -> String {
    let name = &class.class_name;
    let mut code = format!("\n\tpublic {name}() {{\n\t}}\n");
    if class.fields.is_empty() {
        return code;
    }
    let params = class
        .fields
        .iter()
        .map(|f| format!("{} {}", f.type_name, f.ident))
        .collect::<Vec<_>>()
        .join(", ");
    code.push_str(&format!("\n\tpublic {name}({params}) {{\n"));
    for f in &class.fields {
        code.push_str(&format!("\t\tthis.{0} = {0};\n", f.ident));
    }
    code.push_str("\t}\n");
    code
}

fn accessors(field: &FieldView) -> String {
    let FieldView { ident, accessor, type_name, .. } = field;
    let mut code = String::new();
    code.push_str("\t\n");
    code.push_str(&format!("\tpublic {type_name} get{accessor}() {{\n"));
    code.push_str(&format!("\t\treturn {ident};\n"));
    code.push_str("\t}\n");
    code.push_str("\t\n");
    code.push_str(&format!("\tpublic void set{accessor}({type_name} {ident}) {{\n"));
    code.push_str(&format!("\t\tthis.{ident} = {ident};\n"));
    code.push_str("\t}\n");
    code
}

fn serialization(class: &ClassView) -> String {
    let name = &class.class_name;
    let mut code = String::new();

    code.push_str("\n\t@SuppressWarnings(\"unchecked\")\n");
    code.push_str(&format!("\tpublic static {name} fromMap(Map<String, Object> map) {{\n"));
    code.push_str(&format!("\t\t{name} o = new {name}();\n"));
    for f in &class.fields {
        let src = format!("map.get({})", quote(&f.raw_name, '"'));
        code.push_str(&format!("\t\to.{} = {};\n", f.ident, decode_field(&f.ty, &src)));
    }
    code.push_str("\t\treturn o;\n\t}\n");

    code.push_str("\n\tpublic Map<String, Object> toMap() {\n");
    code.push_str("\t\tMap<String, Object> map = new LinkedHashMap<>();\n");
    for f in &class.fields {
        let value = encode_field(&f.ty, &format!("this.{}", f.ident));
        code.push_str(&format!("\t\tmap.put({}, {value});\n", quote(&f.raw_name, '"')));
    }
    code.push_str("\t\treturn map;\n\t}\n");

    code.push_str("\n\t@SuppressWarnings(\"unchecked\")\n");
    code.push_str(&format!("\tpublic static {name} fromJson(String json) throws JsonProcessingException {{\n"));
    code.push_str("\t\treturn fromMap(new ObjectMapper().readValue(json, Map.class));\n\t}\n");

    code.push_str("\n\tpublic String toJson() throws JsonProcessingException {\n");
    code.push_str("\t\treturn new ObjectMapper().writeValueAsString(toMap());\n\t}\n");
    code
}

fn footer(_: &ClassView) -> String {
    "}\n".to_string()
}

// ------------------------------- Conversions ------------------------------ //

fn decode_field(ty: &FieldTy, src: &str) -> String {
    match ty {
        FieldTy::Class { .. } | FieldTy::Array(_) => {
            format!("{src} == null ? null : {}", decode(ty, src, 0))
        }
        _ => decode(ty, src, 0),
    }
}

/// Convert an `Object` out of a decoded map into `ty`.
fn decode(ty: &FieldTy, src: &str, depth: usize) -> String {
    match ty {
        FieldTy::Scalar(ScalarKind::String) => format!("(String) {src}"),
        FieldTy::Scalar(ScalarKind::Boolean) => format!("(Boolean) {src}"),
        FieldTy::Scalar(ScalarKind::Integer) => format!("((Number) {src}).intValue()"),
        FieldTy::Scalar(ScalarKind::Float) => format!("((Number) {src}).floatValue()"),
        FieldTy::Class { name } => format!("{name}.fromMap((Map<String, Object>) {src})"),
        FieldTy::Array(item) => {
            let e = format!("e{depth}");
            format!(
                "((List<Object>) {src}).stream().map({e} -> {}).collect(Collectors.toList())",
                decode(item, &e, depth + 1)
            )
        }
        FieldTy::Map(..) => format!("({}) {src}", PROFILE.type_name(ty)),
    }
}

fn encode_field(ty: &FieldTy, expr: &str) -> String {
    if ty.carries_class() && !matches!(ty, FieldTy::Map(..)) {
        format!("{expr} == null ? null : {}", encode(ty, expr, 0))
    } else {
        expr.to_string()
    }
}

fn encode(ty: &FieldTy, expr: &str, depth: usize) -> String {
    match ty {
        FieldTy::Class { .. } => format!("{expr}.toMap()"),
        FieldTy::Array(item) if item.carries_class() => {
            let e = format!("e{depth}");
            format!(
                "{expr}.stream().map({e} -> {}).collect(Collectors.toList())",
                encode(item, &e, depth + 1)
            )
        }
        _ => expr.to_string(),
    }
}
