//! Infer a class schema from a JSON document and emit source code for it in
//! one of several target languages.
//!
//! ```text
//! decode -> infer (Schema arena) -> resolve class names -> lower + emit (per profile)
//! ```
//!
//! Every call is independent: the class arena and the collision table live
//! on the stack of one [`generate`] call and nothing is cached between calls.
pub mod classify;
pub mod cli;
pub mod codegen;
pub mod collision;
pub mod error;
pub mod inference;
pub mod ir;
pub mod lower;
pub mod naming;
pub mod profile;
pub mod source;

use std::path::PathBuf;

use serde_json::Value;

pub use codegen::EmittedFile;
pub use error::{GenError, Result};
pub use ir::Schema;
pub use profile::{TargetLanguage, TargetProfile};
pub use source::SourceFormat;

/// Everything one generation call is configured by.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationContext {
    pub target: TargetLanguage,
    pub source: SourceFormat,
    /// Suffix colliding file names instead of failing.
    pub lenient: bool,
    /// Raw name of the top-level class. Defaults to `generated_from_<source>`.
    pub root_name: Option<String>,
    /// Where the caller intends to write the files. Never read by the core.
    pub output_hint: Option<PathBuf>,
}

impl GenerationContext {
    pub fn new(target: TargetLanguage) -> Self {
        Self {
            target,
            source: SourceFormat::Json,
            lenient: true,
            root_name: None,
            output_hint: None,
        }
    }

    pub fn strict(mut self) -> Self {
        self.lenient = false;
        self
    }

    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = Some(name.into());
        self
    }

    /// Raw top-level name, before the class naming rule is applied.
    pub fn top_level_name(&self) -> Result<String> {
        match &self.root_name {
            Some(name) => Ok(name.clone()),
            None => naming::apply_case(
                &format!("generated_from_{}", self.source.id()),
                self.target.profile().root_case,
            ),
        }
    }
}

/// Decode `source_text` and generate every class file for it.
pub fn generate(source_text: &str, ctx: &GenerationContext) -> Result<Vec<EmittedFile>> {
    let value = ctx.source.decode(source_text)?;
    generate_from_value(&value, ctx)
}

/// Generate from an already decoded document.
pub fn generate_from_value(value: &Value, ctx: &GenerationContext) -> Result<Vec<EmittedFile>> {
    let profile = ctx.target.profile();
    let top_level_name = ctx.top_level_name()?;
    let schema = inference::infer(value, &top_level_name)?;
    let names = collision::resolve(&schema, profile, ctx.lenient)?;
    let files = codegen::emit(&schema, &names, profile)?;
    tracing::info!(
        target_language = %ctx.target,
        root = %top_level_name,
        files = files.len(),
        "generated"
    );
    Ok(files)
}
