//! Nominal type values and their conversion relations.
//!
//! A type's identity is the triple (name, namespace, defining module);
//! equality is structural on that identity. Three relations are derived
//! from it, each defined per type kind:
//! - `is_assignable_to`: plain assignment
//! - `is_implicitly_castable_to`: value contexts that convert without syntax
//! - `is_castable_to`: an explicit cast expression is present

use std::fmt;
use std::sync::Arc;

/// Namespace that the built-in primitive types live in.
pub const BUILTIN_NAMESPACE: &str = "lang";

/// Nominal identity of a type: name, owning namespace, defining module.
///
/// The module component is absent for types declared in the compilation
/// itself; it names the external module for imported types.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeIdentity {
    pub name: Arc<str>,
    pub namespace: Arc<str>,
    pub module: Option<Arc<str>>,
}

impl TypeIdentity {
    /// Identity for a type declared in the current compilation.
    pub fn local(name: impl Into<Arc<str>>, namespace: impl Into<Arc<str>>) -> Self {
        TypeIdentity {
            name: name.into(),
            namespace: namespace.into(),
            module: None,
        }
    }

    /// Identity for a type exported by an external module.
    pub fn imported(
        name: impl Into<Arc<str>>,
        namespace: impl Into<Arc<str>>,
        module: impl Into<Arc<str>>,
    ) -> Self {
        TypeIdentity {
            name: name.into(),
            namespace: namespace.into(),
            module: Some(module.into()),
        }
    }

    fn builtin(name: &str) -> Self {
        TypeIdentity::local(name, BUILTIN_NAMESPACE)
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}.{}", self.namespace, self.name)
        }
    }
}

/// A type value.
///
/// Method types additionally carry an ordered parameter-type list and a
/// return type; their relations do not generalize beyond structural
/// equality of the whole signature.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Type {
    /// A built-in primitive.
    Simple(TypeIdentity),
    /// A user-declared or imported class.
    Class(TypeIdentity),
    /// A method signature.
    Method {
        identity: TypeIdentity,
        parameters: Vec<Type>,
        return_type: Box<Type>,
    },
}

impl Type {
    /// The built-in integer type.
    pub fn integer() -> Type {
        Type::Simple(TypeIdentity::builtin("int"))
    }

    /// The built-in real (floating point) type.
    pub fn real() -> Type {
        Type::Simple(TypeIdentity::builtin("real"))
    }

    /// The built-in boolean type.
    pub fn boolean() -> Type {
        Type::Simple(TypeIdentity::builtin("bool"))
    }

    /// The built-in character type.
    pub fn character() -> Type {
        Type::Simple(TypeIdentity::builtin("char"))
    }

    /// The built-in string type.
    pub fn string() -> Type {
        Type::Simple(TypeIdentity::builtin("string"))
    }

    /// Look up a built-in primitive by source name.
    pub fn builtin(name: &str) -> Option<Type> {
        match name {
            "int" => Some(Type::integer()),
            "real" => Some(Type::real()),
            "bool" => Some(Type::boolean()),
            "char" => Some(Type::character()),
            "string" => Some(Type::string()),
            _ => None,
        }
    }

    /// A class type declared in the current compilation.
    pub fn class(name: impl Into<Arc<str>>, namespace: impl Into<Arc<str>>) -> Type {
        Type::Class(TypeIdentity::local(name, namespace))
    }

    /// A method type.
    pub fn method(identity: TypeIdentity, parameters: Vec<Type>, return_type: Type) -> Type {
        Type::Method {
            identity,
            parameters,
            return_type: Box::new(return_type),
        }
    }

    /// The nominal identity of this type.
    pub fn identity(&self) -> &TypeIdentity {
        match self {
            Type::Simple(id) | Type::Class(id) | Type::Method { identity: id, .. } => id,
        }
    }

    fn is_builtin_named(&self, name: &str) -> bool {
        matches!(self, Type::Simple(id)
            if &*id.name == name && &*id.namespace == BUILTIN_NAMESPACE)
    }

    fn is_integer(&self) -> bool {
        self.is_builtin_named("int")
    }

    fn is_real(&self) -> bool {
        self.is_builtin_named("real")
    }

    fn is_character(&self) -> bool {
        self.is_builtin_named("char")
    }

    /// Whether a value of this type can be assigned to a slot of `target`.
    pub fn is_assignable_to(&self, target: &Type) -> bool {
        match self {
            Type::Simple(_) | Type::Class(_) | Type::Method { .. } => self == target,
        }
    }

    /// Whether this type converts to `target` without any cast syntax.
    pub fn is_implicitly_castable_to(&self, target: &Type) -> bool {
        match self {
            // Widening from integer to real needs no syntax.
            Type::Simple(_) => self == target || (self.is_integer() && target.is_real()),
            Type::Class(_) | Type::Method { .. } => self == target,
        }
    }

    /// Whether an explicit cast expression can convert this type to `target`.
    pub fn is_castable_to(&self, target: &Type) -> bool {
        if self.is_implicitly_castable_to(target) {
            return true;
        }
        match self {
            Type::Simple(_) => {
                (self.is_real() && target.is_integer())
                    || (self.is_integer() && target.is_character())
                    || (self.is_character() && target.is_integer())
            }
            Type::Class(_) | Type::Method { .. } => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Simple(id) | Type::Class(id) => write!(f, "{id}"),
            Type::Method {
                parameters,
                return_type,
                ..
            } => {
                write!(f, "(")?;
                for (i, param) in parameters.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") -> {return_type}")
            }
        }
    }
}
