//! Code emitter: one source file per class, in schema order.
//!
//! The emitter is the same algorithm for every language. Everything that
//! differs between languages lives in the [`TargetProfile`] it is handed.
use serde::Serialize;

use crate::collision::NameTable;
use crate::error::Result;
use crate::ir::Schema;
use crate::lower::{self, ClassView};
use crate::profile::TargetProfile;

/// One generated source file. The system's only output artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmittedFile {
    /// Class name as declared in the source text; suffixed together with
    /// `file_name` by the collision resolver.
    pub logical_name: String,
    /// File name with extension.
    pub file_name: String,
    pub source_text: String,
    /// Key path of the object the class was inferred from.
    pub origin: String,
}

// ————————————————————————————————————————————————————————————————————————————
// TEXT BUFFER
// ————————————————————————————————————————————————————————————————————————————

pub struct Codegen<'p> {
    profile: &'p TargetProfile,
    out: String,
}

impl<'p> Codegen<'p> {
    pub fn new(profile: &'p TargetProfile) -> Self {
        Self { profile, out: String::new() }
    }

    /// Append one class to the buffer.
    pub fn emit(&mut self, class: &ClassView) {
        let t = &self.profile.templates;
        self.out.push_str(&(t.header)(class));
        for field in &class.fields {
            if field.renamed {
                if let Some(annotate) = self.profile.rename_annotation {
                    self.out.push_str(&annotate(&field.raw_name));
                }
            }
            self.out.push_str(&(t.field)(field));
        }
        self.out.push_str(&(t.fields_end)(class));
        self.out.push_str(&(t.constructor)(class));
        if self.profile.generates_accessors {
            for field in &class.fields {
                self.out.push_str(&(t.accessors)(field));
            }
        }
        self.out.push_str(&(t.serialization)(class));
        self.out.push_str(&(t.footer)(class));
    }

    pub fn into_string(self) -> String {
        self.out
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ENTRY POINT
// ————————————————————————————————————————————————————————————————————————————

/// Render every class of `schema`, root first, one file each, under the
/// names `names` settled for them.
pub fn emit(schema: &Schema, names: &NameTable, profile: &TargetProfile) -> Result<Vec<EmittedFile>> {
    let mut files = Vec::with_capacity(schema.len());
    for class in schema.classes() {
        let view = lower::lower_class(names, class, profile)?;
        let mut cg = Codegen::new(profile);
        cg.emit(&view);
        tracing::debug!(
            class = %view.class_name,
            file = %view.file_name,
            fields = view.fields.len(),
            "emitted class"
        );
        files.push(EmittedFile {
            logical_name: view.class_name,
            file_name: view.file_name,
            source_text: cg.into_string(),
            origin: view.path,
        });
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::infer;
    use crate::profile::TargetLanguage;
    use serde_json::json;

    fn emit_for(value: serde_json::Value, lang: TargetLanguage) -> Vec<EmittedFile> {
        let schema = infer(&value, "root").unwrap();
        let names = crate::collision::resolve(&schema, lang.profile(), true).unwrap();
        emit(&schema, &names, lang.profile()).unwrap()
    }

    #[test]
    fn one_file_per_class_in_schema_order() {
        let files = emit_for(
            json!({"a": {"b": {"c": 1}}, "d": [{"e": true}]}),
            TargetLanguage::Python,
        );
        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, ["root.py", "a.py", "b.py", "d.py"]);
        let origins: Vec<_> = files.iter().map(|f| f.origin.as_str()).collect();
        assert_eq!(origins, ["$", "$.a", "$.a.b", "$.d[0]"]);
    }

    #[test]
    fn accessors_follow_the_profile_flag() {
        let value = json!({"name": "Ann"});
        let java = &emit_for(value.clone(), TargetLanguage::Java)[0].source_text;
        assert!(java.contains("public String getName()"));
        assert!(java.contains("public void setName(String name)"));

        let ruby = &emit_for(value, TargetLanguage::Ruby)[0].source_text;
        assert!(!ruby.contains("def name\n"));
        assert!(ruby.contains("attr_accessor :name"));
    }

    #[test]
    fn rename_annotation_precedes_its_field() {
        let value = json!({"first name": "Ann", "age": 3});
        let java = &emit_for(value.clone(), TargetLanguage::Java)[0].source_text;
        assert!(java.contains("\t@JsonProperty(\"first name\")\n\tprivate String firstName;\n"));
        assert!(!java.contains("@JsonProperty(\"age\")"));

        let rust = &emit_for(value.clone(), TargetLanguage::Rust)[0].source_text;
        assert!(rust.contains("    #[serde(rename = \"first name\")]\n    pub first_name: Option<String>,\n"));

        // no annotation syntax: the raw key survives in the map conversions
        let python = &emit_for(value, TargetLanguage::Python)[0].source_text;
        assert!(python.contains("first_name=data.get(\"first name\")"));
        assert!(python.contains("\"first name\": self.first_name"));
    }

    #[test]
    fn keywords_are_escaped_and_annotated() {
        let java = &emit_for(json!({"class": "x"}), TargetLanguage::Java)[0].source_text;
        assert!(java.contains("@JsonProperty(\"class\")\n\tprivate String class_;"));
    }

    #[test]
    fn keys_casing_alike_keep_both_wire_names() {
        let java = &emit_for(json!({"firstName": "a", "first_name": "b"}), TargetLanguage::Java)[0].source_text;
        assert!(java.contains("\tprivate String firstName;\n\t@JsonProperty(\"first_name\")\n\tprivate String firstName_2;\n"));
        assert!(java.contains("o.firstName = (String) map.get(\"firstName\");"));
        assert!(java.contains("o.firstName_2 = (String) map.get(\"first_name\");"));

        let ruby = &emit_for(json!({"firstName": "a", "first_name": "b"}), TargetLanguage::Ruby)[0].source_text;
        assert!(ruby.contains("o.first_name = hash['firstName']"));
        assert!(ruby.contains("o.first_name_2 = hash['first_name']"));
        assert!(ruby.contains("h['first_name'] = @first_name_2"));
    }

    #[test]
    fn fields_keep_source_order() {
        let ts = &emit_for(json!({"z": 1, "a": 2.5, "m": false}), TargetLanguage::TypeScript)[0].source_text;
        let z = ts.find("  z?: number;").unwrap();
        let a = ts.find("  a?: number;").unwrap();
        let m = ts.find("  m?: boolean;").unwrap();
        assert!(z < a && a < m);
    }

    #[test]
    fn empty_nested_class_still_renders() {
        for lang in TargetLanguage::ALL {
            let files = emit_for(json!({"meta": {}}), *lang);
            assert_eq!(files.len(), 2, "{lang}");
            assert!(!files[1].source_text.is_empty());
        }
    }

    #[test]
    fn emission_is_deterministic() {
        let value = json!({"a": {"x": [1, 2]}, "b": [{"y": "s"}], "c": null});
        for lang in TargetLanguage::ALL {
            assert_eq!(emit_for(value.clone(), *lang), emit_for(value.clone(), *lang));
        }
    }
}
