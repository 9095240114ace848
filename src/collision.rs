//! Duplicate class-name resolution.
//!
//! Two nested objects under the same key become two classes with the same
//! name. Names are settled per class before any text is rendered, so a
//! suffixed class is declared, imported, referenced and stored under one
//! name. In lenient mode the later class becomes `Name_N` in `stem_N.ext`; in
//! strict mode the whole call fails.
use indexmap::IndexMap;

use crate::error::{GenError, Result};
use crate::ir::{ClassId, Schema};
use crate::naming::{self, NameRole};
use crate::profile::TargetProfile;

/// The names one class is rendered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    pub class_name: String,
    /// File stem other files import it by.
    pub module: String,
    pub file_name: String,
}

/// Unique [`ClassNames`] for every class of one schema, indexed by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTable {
    names: Vec<ClassNames>,
}

impl NameTable {
    /// `id` must come from the schema the table was resolved for.
    pub fn get(&self, id: ClassId) -> &ClassNames {
        &self.names[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassNames> {
        self.names.iter()
    }
}

/// Give every class of `schema` a file name no earlier class holds.
///
/// First-seen keeps the plain name. Later classes get the smallest free
/// `_N` suffix (N ≥ 1) on class name, module and file alike, checked
/// against every file name assigned so far.
pub fn resolve(schema: &Schema, profile: &TargetProfile, lenient: bool) -> Result<NameTable> {
    // assigned file name -> origin of the class holding it
    let mut taken = IndexMap::<String, String>::with_capacity(schema.len());
    let mut names = Vec::with_capacity(schema.len());

    for class in schema.classes() {
        let class_name =
            naming::to_role(&class.raw_name, NameRole::Class, profile).map_err(|e| e.at(&class.path))?;
        let module = naming::module_name(&class.raw_name, profile).map_err(|e| e.at(&class.path))?;
        let mut resolved = ClassNames {
            file_name: format!("{module}{}", profile.extension),
            class_name,
            module,
        };

        if let Some(first) = taken.get(&resolved.file_name) {
            if !lenient {
                return Err(GenError::DuplicateClassName {
                    file_name: resolved.file_name,
                    first: first.clone(),
                    second: class.path.clone(),
                });
            }
            let n = (1..)
                .find(|n| !taken.contains_key(&format!("{}_{n}{}", resolved.module, profile.extension)))
                .unwrap_or_default();
            let renamed = ClassNames {
                class_name: format!("{}_{n}", resolved.class_name),
                module: format!("{}_{n}", resolved.module),
                file_name: format!("{}_{n}{}", resolved.module, profile.extension),
            };
            tracing::warn!(
                from = %resolved.file_name,
                to = %renamed.file_name,
                origin = %class.path,
                first = %first,
                "duplicate class file name, renamed"
            );
            resolved = renamed;
        }
        taken.insert(resolved.file_name.clone(), class.path.clone());
        names.push(resolved);
    }
    Ok(NameTable { names })
}
