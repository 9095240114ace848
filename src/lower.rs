//! Lower a class descriptor to a render-ready view for one profile.
//!
//! This is where class ids turn into names: every `ClassReference` is
//! looked up in the resolved [`NameTable`], so a class is referenced under
//! exactly the name its own file declares.
//! Templates only ever see the resulting views.
use std::collections::HashSet;

use indexmap::IndexMap;

use crate::classify::ScalarKind;
use crate::collision::NameTable;
use crate::error::Result;
use crate::ir::{ClassDescriptor, ClassId, TypeRef};
use crate::naming::{self, NameRole};
use crate::profile::TargetProfile;

/// A [`TypeRef`] with class references resolved to class names.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldTy {
    Scalar(ScalarKind),
    Class { name: String },
    Array(Box<FieldTy>),
    Map(Box<FieldTy>, Box<FieldTy>),
}

impl FieldTy {
    /// Does converting a value of this type touch a generated class?
    pub fn carries_class(&self) -> bool {
        match self {
            FieldTy::Scalar(_) => false,
            FieldTy::Class { .. } => true,
            FieldTy::Array(item) => item.carries_class(),
            FieldTy::Map(key, value) => key.carries_class() || value.carries_class(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldView {
    /// Wire name: the original key.
    pub raw_name: String,
    /// Local identifier in the target language.
    pub ident: String,
    /// `ident` with its first letter raised, for `getX`/`setX`.
    pub accessor: String,
    pub type_name: String,
    pub ty: FieldTy,
    /// The local identifier differs from the wire name.
    pub renamed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dependency {
    pub class_name: String,
    /// File stem to import it from.
    pub module: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassView {
    pub class_name: String,
    pub file_name: String,
    /// Key path of the source object.
    pub path: String,
    pub fields: Vec<FieldView>,
    /// Directly referenced classes, in first-reference order, each once.
    pub dependencies: Vec<Dependency>,
}

impl ClassView {
    pub fn has_arrays(&self) -> bool {
        self.fields.iter().any(|f| matches!(f.ty, FieldTy::Array(_)))
    }

    pub fn has_renames(&self) -> bool {
        self.fields.iter().any(|f| f.renamed)
    }
}

pub fn lower_class(names: &NameTable, class: &ClassDescriptor, profile: &TargetProfile) -> Result<ClassView> {
    let mut deps = IndexMap::<ClassId, Dependency>::new();
    let mut fields = Vec::with_capacity(class.attributes.len());
    let mut idents = HashSet::with_capacity(class.attributes.len());

    for attr in &class.attributes {
        let at = || format!("{} -> {}", class.path, attr.name);
        let cased = naming::to_role(&attr.name, NameRole::Field, profile).map_err(|e| e.at(&at()))?;
        // `firstName` and `first_name` case alike; the later key gets `_2`, `_3`, ...
        let ident = if idents.contains(&cased) {
            (2..)
                .map(|n| format!("{cased}_{n}"))
                .find(|candidate| !idents.contains(candidate))
                .unwrap_or_default()
        } else {
            cased
        };
        idents.insert(ident.clone());
        let ty = lower_type(names, &attr.ty, &mut deps);
        fields.push(FieldView {
            raw_name: attr.name.clone(),
            accessor: naming::capitalize_first(&ident),
            type_name: profile.type_name(&ty),
            renamed: ident != attr.name,
            ident,
            ty,
        });
    }

    let own = names.get(class.id);
    Ok(ClassView {
        class_name: own.class_name.clone(),
        file_name: own.file_name.clone(),
        path: class.path.clone(),
        fields,
        dependencies: deps.into_values().collect(),
    })
}

fn lower_type(names: &NameTable, ty: &TypeRef, deps: &mut IndexMap<ClassId, Dependency>) -> FieldTy {
    match ty {
        TypeRef::Scalar(kind) => FieldTy::Scalar(*kind),
        TypeRef::ClassReference(id) => {
            let target = names.get(*id);
            deps.entry(*id).or_insert_with(|| Dependency {
                class_name: target.class_name.clone(),
                module: target.module.clone(),
            });
            FieldTy::Class { name: target.class_name.clone() }
        }
        TypeRef::Array(item) => FieldTy::Array(Box::new(lower_type(names, item, deps))),
        TypeRef::Map { key, value } => FieldTy::Map(
            Box::new(lower_type(names, key, deps)),
            Box::new(lower_type(names, value, deps)),
        ),
    }
}
