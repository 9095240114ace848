//! TypeScript: exported classes with optional fields and
//! `fromObject`/`toObject` over plain records.
use super::{FileNaming, ScalarNames, TargetLanguage, TargetProfile, Templates, quote};
use crate::lower::{ClassView, FieldTy, FieldView};
use crate::naming::NameCase;

const NAMES: ScalarNames = ScalarNames {
    boolean: "boolean",
    integer: "number",
    float: "number",
    string: "string",
};

pub static PROFILE: TargetProfile = TargetProfile {
    language: TargetLanguage::TypeScript,
    extension: ".ts",
    class_case: NameCase::Pascal,
    field_case: NameCase::Camel,
    root_case: NameCase::Pascal,
    file_naming: FileNaming::ClassName,
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
        constructor,
        accessors: super::no_accessors,
        serialization,
        footer,
    },
};

const KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with",
];

const RECORD: &str = "Record<string, unknown>";

fn array_type(item: &str) -> String {
    format!("{item}[]")
}

fn map_type(key: &str, value: &str) -> String {
    format!("Record<{key}, {value}>")
}

fn header(class: &ClassView) -> String {
    let mut code = String::new();
    for dep in &class.dependencies {
        code.push_str(&format!(
            "import {{ {} }} from {};\n",
            dep.class_name,
            quote(&format!("./{}", dep.module), '\'')
        ));
    }
    if !class.dependencies.is_empty() {
        code.push('\n');
    }
    code.push_str(&format!("export class {} {{\n", class.class_name));
    code
}

fn field(field: &FieldView) -> String {
    format!("  {}?: {};\n", field.ident, field.type_name)
}

fn constructor(class: &ClassView) -> String {
    format!(
        "\n  constructor(init?: Partial<{}>) {{\n    Object.assign(this, init);\n  }}\n",
        class.class_name
    )
}

fn serialization(class: &ClassView) -> String {
    let name = &class.class_name;
    let mut code = String::new();

    code.push_str(&format!("\n  static fromObject(data: {RECORD}): {name} {{\n"));
    code.push_str(&format!("    const o = new {name}();\n"));
    for f in &class.fields {
        let src = format!("data[{}]", quote(&f.raw_name, '"'));
        code.push_str(&format!("    o.{} = {};\n", f.ident, decode_field(&f.ty, &f.type_name, &src)));
    }
    code.push_str("    return o;\n  }\n");

    code.push_str(&format!("\n  static fromJson(json: string): {name} {{\n"));
    code.push_str(&format!("    return {name}.fromObject(JSON.parse(json) as {RECORD});\n  }}\n"));

    code.push_str(&format!("\n  toObject(): {RECORD} {{\n"));
    if class.fields.is_empty() {
        code.push_str("    return {};\n");
    } else {
        code.push_str("    return {\n");
        for f in &class.fields {
            let value = encode_field(&f.ty, &format!("this.{}", f.ident));
            code.push_str(&format!("      {}: {value},\n", quote(&f.raw_name, '"')));
        }
        code.push_str("    };\n");
    }
    code.push_str("  }\n");

    code.push_str("\n  toJson(): string {\n    return JSON.stringify(this.toObject());\n  }\n");
    code
}

fn footer(_: &ClassView) -> String {
    "}\n".to_string()
}

// ------------------------------- Conversions ------------------------------ //

fn decode_field(ty: &FieldTy, type_name: &str, src: &str) -> String {
    match ty {
        FieldTy::Class { name } => {
            format!("{src} == null ? undefined : {name}.fromObject({src} as {RECORD})")
        }
        FieldTy::Array(item) if item.carries_class() => {
            format!("({src} as unknown[] | undefined)?.map((e0) => {})", decode(item, "e0", 1))
        }
        _ => format!("{src} as {type_name} | undefined"),
    }
}

fn decode(ty: &FieldTy, src: &str, depth: usize) -> String {
    match ty {
        FieldTy::Class { name } => format!("{name}.fromObject({src} as {RECORD})"),
        FieldTy::Array(item) if item.carries_class() => {
            let e = format!("e{depth}");
            format!("({src} as unknown[]).map(({e}) => {})", decode(item, &e, depth + 1))
        }
        other => format!("{src} as {}", PROFILE.type_name(other)),
    }
}

fn encode_field(ty: &FieldTy, expr: &str) -> String {
    match ty {
        FieldTy::Class { .. } => format!("{expr}?.toObject()"),
        FieldTy::Array(item) if item.carries_class() => {
            format!("{expr}?.map((e0) => {})", encode(item, "e0", 1))
        }
        _ => expr.to_string(),
    }
}

fn encode(ty: &FieldTy, expr: &str, depth: usize) -> String {
    match ty {
        FieldTy::Class { .. } => format!("{expr}.toObject()"),
        FieldTy::Array(item) if item.carries_class() => {
            let e = format!("e{depth}");
            format!("{expr}.map(({e}) => {})", encode(item, &e, depth + 1))
        }
        _ => expr.to_string(),
    }
}
