//! Compiled per-type rule sets.

use indexmap::IndexMap;

use crate::annotation::FieldRules;
use crate::error::AnnotationError;

/// A field as declared on a model, before compilation.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    ident: &'static str,
    rules: Vec<(&'static str, Option<String>)>,
}

impl FieldDecl {
    /// Declares field `ident` with raw `(rule, parameter)` pairs.
    pub fn new(ident: &'static str, rules: Vec<(&'static str, Option<String>)>) -> Self {
        Self { ident, rules }
    }
}

/// The compiled rules of a model, keyed by wire name in declaration order.
///
/// Built once per type by [`Model::compiled`](crate::Model::compiled).
///
/// # Example
///
/// ```rust
/// use strictbind::schema::{FieldDecl, ModelSchema};
///
/// let schema = ModelSchema::compile(
///     "User",
///     vec![
///         FieldDecl::new("name", vec![("required", None)]),
///         FieldDecl::new("kind", vec![("name", Some("type".into()))]),
///     ],
/// )
/// .unwrap();
///
/// let names: Vec<_> = schema.fields().map(|f| f.name.as_str()).collect();
/// assert_eq!(names, vec!["name", "type"]);
/// ```
#[derive(Debug, Clone)]
pub struct ModelSchema {
    type_name: &'static str,
    fields: IndexMap<String, FieldRules>,
}

impl ModelSchema {
    /// Compiles the declared fields of `type_name`.
    ///
    /// # Errors
    ///
    /// Returns the first [`AnnotationError`] found, including two fields
    /// sharing a wire name.
    pub fn compile(type_name: &'static str, decls: Vec<FieldDecl>) -> Result<Self, AnnotationError> {
        let mut fields = IndexMap::with_capacity(decls.len());

        for decl in decls {
            let rules = FieldRules::compile(type_name, decl.ident, &decl.rules)?;
            if fields.contains_key(&rules.name) {
                return Err(AnnotationError::DuplicateField {
                    model: type_name,
                    field: rules.name,
                });
            }
            fields.insert(rules.name.clone(), rules);
        }

        tracing::trace!(model = type_name, fields = fields.len(), "compiled field rules");
        Ok(Self { type_name, fields })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns the field rules in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldRules> {
        self.fields.values()
    }

    /// Looks up a field by wire name.
    pub fn field(&self, name: &str) -> Option<&FieldRules> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
