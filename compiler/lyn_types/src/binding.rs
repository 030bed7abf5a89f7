//! Visibility levels and per-declaration binding information.

use crate::Type;

/// Declared visibility of a symbol.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default)]
pub enum Visibility {
    Public,
    /// Visible within the compilation; the default when unspecified.
    #[default]
    Internal,
    Protected,
    Private,
    /// Visibility does not apply to this kind of symbol (e.g. parameters).
    NotApplicable,
}

impl Visibility {
    /// Parse a visibility keyword as it appears in source.
    pub fn from_keyword(text: &str) -> Option<Visibility> {
        match text {
            "public" => Some(Visibility::Public),
            "internal" => Some(Visibility::Internal),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

/// What a scope knows about one declaration of a name.
///
/// The resolved type is absent until type binding runs; only declarations
/// that denote a type by themselves (classes, imported symbols) carry one
/// from the moment the binding is created.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BindingInfo {
    pub ty: Option<Type>,
    pub visibility: Visibility,
    /// Source offset the declaration counts from for ordering checks.
    pub declared_at: u32,
}

impl BindingInfo {
    pub fn new(ty: Option<Type>, visibility: Visibility, declared_at: u32) -> Self {
        BindingInfo {
            ty,
            visibility,
            declared_at,
        }
    }

    /// Binding for a symbol imported from a module: already typed and
    /// positioned before every local offset so ordering checks pass.
    pub fn imported(ty: Type) -> Self {
        BindingInfo {
            ty: Some(ty),
            visibility: Visibility::Public,
            declared_at: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_visibility_from_keyword() {
        assert_eq!(Visibility::from_keyword("public"), Some(Visibility::Public));
        assert_eq!(
            Visibility::from_keyword("private"),
            Some(Visibility::Private)
        );
        assert_eq!(Visibility::from_keyword("friend"), None);
    }

    #[test]
    fn test_default_visibility_is_internal() {
        assert_eq!(Visibility::default(), Visibility::Internal);
    }

    #[test]
    fn test_imported_binding_sorts_before_everything() {
        let binding = BindingInfo::imported(Type::integer());
        assert_eq!(binding.declared_at, 0);
        assert_eq!(binding.visibility, Visibility::Public);
        assert!(binding.ty.is_some());
    }
}
