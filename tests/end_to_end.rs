use json_classgen::{GenError, GenerationContext, TargetLanguage, generate};

const PERSON: &str = r#"{"name": "Ann", "address": {"city": "X"}, "tags": ["a", "b"]}"#;

fn file_names(files: &[json_classgen::EmittedFile]) -> Vec<&str> {
    files.iter().map(|f| f.file_name.as_str()).collect()
}

fn assert_in_order(text: &str, needles: &[&str]) {
    let mut from = 0;
    for needle in needles {
        let at = text[from..]
            .find(needle)
            .unwrap_or_else(|| panic!("{needle:?} missing (or out of order) in:\n{text}"));
        from += at + needle.len();
    }
}

#[test]
fn ruby_person_with_address() {
    let files = generate(PERSON, &GenerationContext::new(TargetLanguage::Ruby)).unwrap();
    assert_eq!(file_names(&files), ["generated_from_json.rb", "address.rb"]);

    let root = &files[0].source_text;
    assert!(root.starts_with("require 'json'\nrequire_relative 'address'\n"));
    assert_in_order(
        root,
        &[
            "# @return [String]\n\tattr_accessor :name\n",
            "# @return [Address]\n\tattr_accessor :address\n",
            "# @return [Array<String>]\n\tattr_accessor :tags\n",
        ],
    );
    assert!(root.contains("o.address = hash['address'] && Address.from_hash(hash['address'])"));

    let address = &files[1].source_text;
    assert!(address.contains("class Address\n"));
    assert!(address.contains("# @return [String]\n\tattr_accessor :city\n"));
    assert!(address.ends_with("end\n"));
}

#[test]
fn java_person_with_address() {
    let files = generate(PERSON, &GenerationContext::new(TargetLanguage::Java)).unwrap();
    assert_eq!(file_names(&files), ["GeneratedFromJson.java", "Address.java"]);

    let root = &files[0].source_text;
    assert_in_order(
        root,
        &["String name;", "Address address;", "List<String> tags;"],
    );
    assert_in_order(
        root,
        &[
            "public String getName()",
            "public void setName(String name)",
            "public Address getAddress()",
            "public void setAddress(Address address)",
            "public List<String> getTags()",
            "public void setTags(List<String> tags)",
        ],
    );
    assert!(root.contains("import java.util.List;\n"));
    assert!(!root.contains("JsonProperty"));
    assert!(files[1].source_text.contains("public class Address {"));
}

#[test]
fn python_imports_and_dataclass() {
    let ctx = GenerationContext::new(TargetLanguage::Python).with_root_name("person");
    let files = generate(PERSON, &ctx).unwrap();
    assert_eq!(file_names(&files), ["person.py", "address.py"]);

    let root = &files[0].source_text;
    assert!(root.contains("from .address import Address\n"));
    assert_in_order(
        root,
        &[
            "@dataclass\nclass Person:\n",
            "    name: Optional[str] = None\n",
            "    address: Optional[Address] = None\n",
            "    tags: Optional[List[str]] = None\n",
        ],
    );
}

#[test]
fn typescript_and_rust_reference_siblings() {
    let ts = generate(PERSON, &GenerationContext::new(TargetLanguage::TypeScript).with_root_name("person")).unwrap();
    assert_eq!(file_names(&ts), ["Person.ts", "Address.ts"]);
    assert!(ts[0].source_text.starts_with("import { Address } from './Address';\n"));
    assert!(ts[0].source_text.contains("  tags?: string[];\n"));

    let rs = generate(PERSON, &GenerationContext::new(TargetLanguage::Rust).with_root_name("person")).unwrap();
    assert_eq!(file_names(&rs), ["person.rs", "address.rs"]);
    assert!(rs[0].source_text.contains("use super::address::Address;\n"));
    assert!(rs[0].source_text.contains("    pub tags: Option<Vec<String>>,\n"));
}

#[test]
fn same_key_different_shapes_lenient() {
    let src = r#"{
        "data": {"a": 1, "b": 2, "c": 3},
        "items": [{"data": {"a": 1, "b": 2, "c": 3, "d": 4, "e": 5}}]
    }"#;
    let files = generate(src, &GenerationContext::new(TargetLanguage::Ruby)).unwrap();
    assert_eq!(
        file_names(&files),
        ["generated_from_json.rb", "data.rb", "items.rb", "data_1.rb"]
    );
    // first seen keeps the plain name
    assert_eq!(files[1].origin, "$.data");
    assert_eq!(files[3].origin, "$.items[0].data");
    assert!(files[3].source_text.contains("attr_accessor :e"));
    assert!(!files[1].source_text.contains("attr_accessor :e"));

    assert_eq!(files[3].logical_name, "Data_1");
    assert!(files[3].source_text.contains("\nclass Data_1\n"));
    let items = &files[2].source_text;
    assert!(items.contains("require_relative 'data_1'\n"));
    assert!(items.contains("Data_1.from_hash(hash['data'])"));
    assert!(!items.contains("require_relative 'data'\n"));
}

#[test]
fn same_key_different_shapes_strict() {
    let src = r#"{"data": {"a": 1}, "items": [{"data": {"a": 1, "b": 2}}]}"#;
    let err = generate(src, &GenerationContext::new(TargetLanguage::Java).strict()).unwrap_err();
    assert_eq!(
        err,
        GenError::DuplicateClassName {
            file_name: "Data.java".into(),
            first: "$.data".into(),
            second: "$.items[0].data".into(),
        }
    );
}

#[test]
fn empty_array_names_its_key() {
    let err = generate(r#"{"nested": {"tags": []}}"#, &GenerationContext::new(TargetLanguage::Python)).unwrap_err();
    assert_eq!(err, GenError::EmptyArray { path: "$.nested.tags".into() });
    assert!(err.to_string().contains("$.nested.tags"));
}

#[test]
fn heterogeneous_array_uses_first_element() {
    let files = generate(r#"{"mixed": [1, "x"]}"#, &GenerationContext::new(TargetLanguage::Java)).unwrap();
    assert!(files[0].source_text.contains("private List<Integer> mixed;"));
}

#[test]
fn root_errors() {
    let ctx = GenerationContext::new(TargetLanguage::Ruby);
    assert_eq!(generate("{}", &ctx).unwrap_err(), GenError::EmptySchema);
    assert!(matches!(generate("42", &ctx).unwrap_err(), GenError::UnsupportedRoot { .. }));
    assert!(matches!(generate("[]", &ctx).unwrap_err(), GenError::UnsupportedRoot { .. }));
}

#[test]
fn top_level_array_uses_first_object() {
    let src = r#"[{"id": 1, "name": "a"}, {"other": true}]"#;
    let files = generate(src, &GenerationContext::new(TargetLanguage::TypeScript)).unwrap();
    assert_eq!(files.len(), 1);
    let text = &files[0].source_text;
    assert!(text.contains("  id?: number;\n") && text.contains("  name?: string;\n"));
    assert!(!text.contains("other"));
}

#[test]
fn generation_is_idempotent() {
    let src = r#"{"a": {"b": [{"c": 1.5}]}, "d": null, "e": [[true]]}"#;
    for lang in TargetLanguage::ALL {
        let ctx = GenerationContext::new(*lang);
        assert_eq!(generate(src, &ctx).unwrap(), generate(src, &ctx).unwrap(), "{lang}");
    }
}

/// Decode and encode blocks of one generated class: every raw key must be
/// read by the first and written by the second.
fn conversion_blocks<'t>(text: &'t str, markers: [&str; 3]) -> (&'t str, &'t str) {
    let at = |m: &str| text.find(m).unwrap_or_else(|| panic!("{m:?} missing in:\n{text}"));
    let (decode, encode, end) = (at(markers[0]), at(markers[1]), at(markers[2]));
    (&text[decode..encode], &text[encode..end])
}

#[test]
fn every_profile_round_trips_raw_keys_through_the_right_class() {
    let src = r#"{
        "name": "Ann",
        "first name": "x",
        "data": {"a": 1, "b": 2, "c": 3},
        "items": [{"data": {"a": 1, "b": 2, "c": 3, "d": 4, "e": 5}}]
    }"#;
    let keys: [&[&str]; 4] = [&["name", "first name", "data", "items"], &["a", "b", "c"], &["data"], &["a", "b", "c", "d", "e"]];

    // (language, declaration, quote, decode / encode / end markers, reference call)
    let cases = [
        (TargetLanguage::Java, "public class {} {", '"', ["fromMap(Map", "toMap() {", "fromJson("], "{}.fromMap("),
        (TargetLanguage::Ruby, "class {}\n", '\'', ["def self.from_hash", "def to_hash", "def to_json"], "{}.from_hash("),
        (TargetLanguage::Python, "class {}:\n", '"', ["def from_dict", "def to_dict", "def to_json"], "{}.from_dict("),
        (TargetLanguage::TypeScript, "export class {} {", '"', ["static fromObject(", "toObject(): ", "toJson(): "], "{}.fromObject("),
    ];
    for (lang, declaration, q, markers, call) in cases {
        let files = generate(src, &GenerationContext::new(lang).with_root_name("root")).unwrap();
        assert_eq!(files.len(), 4, "{lang}");

        for (file, keys) in files.iter().zip(keys) {
            let text = &file.source_text;
            assert!(text.contains(&declaration.replace("{}", &file.logical_name)), "{lang}: {text}");
            let (decode, encode) = conversion_blocks(text, markers);
            for key in keys {
                let quoted = format!("{q}{key}{q}");
                assert!(decode.contains(&quoted), "{lang} {}: {key} not decoded", file.file_name);
                assert!(encode.contains(&quoted), "{lang} {}: {key} not encoded", file.file_name);
            }
        }

        // `items[0].data` decodes through the five-field class
        let (decode, _) = conversion_blocks(&files[2].source_text, markers);
        assert!(decode.contains(&call.replace("{}", &files[3].logical_name)), "{lang}: {decode}");
        assert!(!decode.contains(&call.replace("{}", &files[1].logical_name)), "{lang}: {decode}");
    }

    let rs = generate(src, &GenerationContext::new(TargetLanguage::Rust).with_root_name("root")).unwrap();
    assert_eq!(file_names(&rs), ["root.rs", "data.rs", "items.rs", "data_1.rs"]);
    for (file, keys) in rs.iter().zip(keys) {
        let text = &file.source_text;
        assert!(text.contains(&format!("pub struct {} {{", file.logical_name)), "{text}");
        for key in keys {
            let field = format!("    pub {key}: ");
            let renamed = format!("#[serde(rename = \"{key}\")]");
            assert!(text.contains(&field) || text.contains(&renamed), "{}: {key}", file.file_name);
        }
    }
    assert!(rs[2].source_text.contains("use super::data_1::Data_1;\n"));
    assert!(rs[2].source_text.contains("    pub data: Option<Data_1>,\n"));
}
