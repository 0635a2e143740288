#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt;

use serde::{Deserialize, Serialize};

use super::tokens::FilePosition;

/// Index of a type declaration inside an [`Ast`] arena.
///
/// Nodes reference their nesting parent through one of these instead of
/// holding a pointer, so the tree has a single owner and parent lookup
/// stays O(1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeId(pub(crate) usize);

/// A half-open byte range into the original source buffer.
///
/// For brace-delimited scopes, `begin` is the offset of the `{` and `end`
/// is one past the `}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Offset of the opening delimiter.
    pub begin: usize,
    /// Offset one past the closing delimiter.
    pub end:   usize,
}

impl Span {
    /// Length of the range in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.begin)
    }

    /// Whether the range is empty.
    pub fn is_empty(&self) -> bool {
        self.end <= self.begin
    }
}

/// Visibility of a type or member. Absence of an explicit keyword means
/// package-default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessModifier {
    /// `public`
    Public,
    /// `private`
    Private,
    /// `protected`
    Protected,
    /// No keyword present.
    #[default]
    PackagePrivate,
}

/// The closed set of recognized member-modifier keywords.
///
/// Comparisons over these are set comparisons; declaration order carries
/// no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modifier {
    /// `static`
    Static,
    /// `final`
    Final,
    /// `abstract`
    Abstract,
    /// `strictfp`
    Strictfp,
    /// `default`
    Default,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Modifier::Static => "static",
            Modifier::Final => "final",
            Modifier::Abstract => "abstract",
            Modifier::Strictfp => "strictfp",
            Modifier::Default => "default",
        };
        write!(f, "{text}")
    }
}

/// Which flavor of type declaration a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    /// A `class` declaration.
    Class,
    /// An `interface` declaration.
    Interface,
}

/// A parsed type reference: base name plus array depth.
///
/// The single `dims` integer is the array-depth invariant checked during
/// comparison; `dims == 0` means a scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Base type name, qualified if written that way in source.
    pub name:    String,
    /// Number of array dimensions.
    pub dims:    usize,
    /// Whether the final dimension was declared with `...`.
    pub varargs: bool,
}

impl TypeRef {
    /// A scalar (non-array) reference to `name`.
    pub fn scalar(name: impl Into<String>) -> Self {
        Self {
            name:    name.into(),
            dims:    0,
            varargs: false,
        }
    }

    /// An array reference to `name` with `dims` dimensions.
    pub fn array(name: impl Into<String>, dims: usize) -> Self {
        Self {
            name: name.into(),
            dims,
            varargs: false,
        }
    }

    /// Whether this reference names `void` with no array dimensions.
    pub fn is_void(&self) -> bool {
        self.dims == 0 && self.name == "void"
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for _ in 0..self.dims {
            write!(f, "[]")?;
        }
        if self.varargs {
            write!(f, "...")?;
        }
        Ok(())
    }
}

/// A single formal parameter. Its position in the parameter list is
/// significant; its identifier is not part of signature comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Declared type.
    pub ty:        TypeRef,
    /// Parameter name.
    pub name:      String,
    /// Modifiers on the parameter (only `final` is legal).
    pub modifiers: Vec<Modifier>,
}

/// A member function or constructor of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberFunction {
    /// Function identifier. For constructors this is the type name.
    pub name:           String,
    /// Whether the declaration was recognized as a constructor.
    pub is_constructor: bool,
    /// Visibility.
    pub access:         AccessModifier,
    /// Modifier keywords as written; compared with set semantics.
    pub modifiers:      Vec<Modifier>,
    /// Ordered generic-parameter names declared on the function.
    pub generics:       Vec<String>,
    /// Ordered formal parameters.
    pub params:         Vec<Parameter>,
    /// Return type. `None` for constructors, which have no return node.
    pub return_type:    Option<TypeRef>,
    /// Ordered thrown-exception type names.
    pub throws:         Vec<String>,
    /// Collected (uninterpreted) annotation names.
    pub annotations:    Vec<String>,
    /// Body span, absent for abstract and interface declarations.
    pub body:           Option<Span>,
    /// Where the declaration starts.
    pub pos:            FilePosition,
}

/// A member variable of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberVariable {
    /// Field identifier.
    pub name:        String,
    /// Declared type.
    pub ty:          TypeRef,
    /// Visibility.
    pub access:      AccessModifier,
    /// Modifier keywords as written.
    pub modifiers:   Vec<Modifier>,
    /// Collected (uninterpreted) annotation names.
    pub annotations: Vec<String>,
    /// Where the declaration starts.
    pub pos:         FilePosition,
}

/// The closed set of member kinds a type body can contain.
///
/// Matched exhaustively at every consumption site so adding a kind is a
/// compile error everywhere it matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Member {
    /// A method or constructor.
    Function(MemberFunction),
    /// A field.
    Variable(MemberVariable),
    /// A nested type, stored in the arena.
    Type(TypeId),
}

/// A class or interface declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Class or interface.
    pub kind:        TypeKind,
    /// Declared name.
    pub name:        String,
    /// Visibility.
    pub access:      AccessModifier,
    /// Modifier keywords as written.
    pub modifiers:   Vec<Modifier>,
    /// Ordered generic-parameter names.
    pub generics:    Vec<String>,
    /// Supertype and implemented-interface names, uninterpreted.
    pub extends:     Vec<String>,
    /// Ordered member list.
    pub members:     Vec<Member>,
    /// Nesting parent, `None` for top-level declarations.
    pub parent:      Option<TypeId>,
    /// Collected (uninterpreted) annotation names.
    pub annotations: Vec<String>,
    /// Byte range of the `{ ... }` body.
    pub body:        Span,
    /// Where the declaration starts.
    pub pos:         FilePosition,
}

impl TypeDecl {
    /// Iterates over the member functions in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = &MemberFunction> {
        self.members.iter().filter_map(|m| match m {
            Member::Function(f) => Some(f),
            Member::Variable(_) | Member::Type(_) => None,
        })
    }

    /// Iterates over the member variables in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = &MemberVariable> {
        self.members.iter().filter_map(|m| match m {
            Member::Variable(v) => Some(v),
            Member::Function(_) | Member::Type(_) => None,
        })
    }

    /// Iterates over the ids of nested type declarations.
    pub fn nested(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.members.iter().filter_map(|m| match m {
            Member::Type(id) => Some(*id),
            Member::Function(_) | Member::Variable(_) => None,
        })
    }
}

/// One parsed program: every type declaration it contains, owned by a
/// single arena, plus the top-level declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ast {
    /// Node store. A [`TypeId`] indexes into this.
    types:     Vec<TypeDecl>,
    /// Top-level declarations in source order.
    top_level: Vec<TypeId>,
    /// Declared package name, if any. Recorded, never interpreted.
    package:   Option<String>,
    /// Import paths in source order. Recorded, never interpreted.
    imports:   Vec<String>,
}

impl Ast {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a slot for a declaration whose members are still being
    /// parsed, so nested children can name their parent.
    pub(crate) fn reserve(&mut self, parent: Option<TypeId>) -> TypeId {
        let id = TypeId(self.types.len());
        self.types.push(TypeDecl {
            kind: TypeKind::Class,
            name: String::new(),
            access: AccessModifier::PackagePrivate,
            modifiers: Vec::new(),
            generics: Vec::new(),
            extends: Vec::new(),
            members: Vec::new(),
            parent,
            annotations: Vec::new(),
            body: Span::default(),
            pos: FilePosition::default(),
        });
        if parent.is_none() {
            self.top_level.push(id);
        }
        id
    }

    /// Fills a previously reserved slot.
    pub(crate) fn fill(&mut self, id: TypeId, decl: TypeDecl) {
        self.types[id.0] = decl;
    }

    /// Returns the declaration behind `id`.
    pub fn type_decl(&self, id: TypeId) -> &TypeDecl {
        &self.types[id.0]
    }

    /// Top-level declarations in source order.
    pub fn top_level(&self) -> &[TypeId] {
        &self.top_level
    }

    /// The declared package name, if one was present.
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// Records the package declaration.
    pub(crate) fn set_package(&mut self, name: String) {
        self.package = Some(name);
    }

    /// Import paths in source order.
    pub fn imports(&self) -> &[String] {
        &self.imports
    }

    /// Records one import declaration.
    pub(crate) fn add_import(&mut self, path: String) {
        self.imports.push(path);
    }

    /// Every declaration id in the arena, outermost first.
    pub fn all_types(&self) -> impl Iterator<Item = TypeId> {
        (0..self.types.len()).map(TypeId)
    }

    /// The dot-joined chain of enclosing type names, outermost class
    /// down to `id` (e.g. `Main.Outer.Inner`).
    pub fn qualified_name(&self, id: TypeId) -> String {
        let mut parts = vec![self.type_decl(id).name.as_str()];
        let mut cursor = self.type_decl(id).parent;
        while let Some(parent) = cursor {
            parts.push(self.type_decl(parent).name.as_str());
            cursor = self.type_decl(parent).parent;
        }
        parts.reverse();
        parts.join(".")
    }
}
