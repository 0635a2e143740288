#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::HashMap;

use super::ParseError;
use super::ast::{TypeId, TypeRef};
use super::tokens::FilePosition;
use crate::constants::{BUILTIN_TYPES, MAX_PARSE_OPERATIONS};

/// Index of a scope inside the [`SymbolTable`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeId(usize);

/// Non-owning reference to the AST node that declared a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef {
    /// A type declaration, by arena index.
    Type(TypeId),
    /// A member of a type declaration, by owner and member position.
    Member {
        /// The declaring type.
        owner: TypeId,
        /// Index into the owner's member list.
        index: usize,
    },
}

/// What a name refers to at a point in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// A variable (field, parameter, or local).
    Variable {
        /// Declared type.
        ty:          TypeRef,
        /// Where the declaration appeared.
        declared_at: FilePosition,
    },
    /// A method or constructor.
    Method {
        /// The declaring AST node.
        node: NodeRef,
    },
    /// A type name. Built-in types carry no declaration node.
    Type {
        /// The declaring AST node, absent for built-ins.
        decl: Option<TypeId>,
    },
}

/// One scope: a name table plus a non-owning parent reference.
#[derive(Debug, Default)]
struct Scope {
    /// Names visible in exactly this scope.
    symbols: HashMap<String, Symbol>,
    /// Enclosing scope, `None` only for the global scope.
    parent:  Option<ScopeId>,
}

/// A stack of scopes backed by an arena, built fresh per parse.
///
/// Every `enter_scope` must be matched by exactly one `exit_scope`;
/// names are unique within a single scope, while shadowing across scopes
/// is permitted. The table also carries the parse-operation budget used
/// to reject pathological inputs.
#[derive(Debug)]
pub struct SymbolTable {
    /// Scope arena; [`ScopeId`] indexes into this.
    scopes:  Vec<Scope>,
    /// The scope currently being parsed into.
    current: ScopeId,
    /// Count of budgeted parse operations so far.
    ops:     usize,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    /// Creates a table holding only the global scope, pre-seeded with
    /// the built-in type names.
    pub fn new() -> Self {
        let mut table = Self {
            scopes:  vec![Scope::default()],
            current: ScopeId(0),
            ops:     0,
        };
        for name in BUILTIN_TYPES {
            table.define(name, Symbol::Type { decl: None });
        }
        table
    }

    /// Pushes a fresh scope under the current one and enters it.
    pub fn enter_scope(&mut self) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            symbols: HashMap::new(),
            parent:  Some(self.current),
        });
        self.current = id;
        id
    }

    /// Leaves the current scope. Leaving the global scope is a no-op.
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current.0].parent {
            self.current = parent;
        }
    }

    /// Whether the table is back at the global scope.
    pub fn at_global_scope(&self) -> bool {
        self.current == ScopeId(0)
    }

    /// Defines `name` in the current scope.
    ///
    /// Returns false when the name already exists in this scope; the
    /// existing binding is left untouched.
    pub fn define(&mut self, name: &str, symbol: Symbol) -> bool {
        let scope = &mut self.scopes[self.current.0];
        if scope.symbols.contains_key(name) {
            return false;
        }
        scope.symbols.insert(name.to_string(), symbol);
        true
    }

    /// Resolves `name` by walking from the current scope outward.
    pub fn resolve(&self, name: &str) -> Option<&Symbol> {
        let mut cursor = Some(self.current);
        while let Some(id) = cursor {
            let scope = &self.scopes[id.0];
            if let Some(symbol) = scope.symbols.get(name) {
                return Some(symbol);
            }
            cursor = scope.parent;
        }
        None
    }

    /// Whether `name` resolves to a type.
    pub fn is_type(&self, name: &str) -> bool {
        matches!(self.resolve(name), Some(Symbol::Type { .. }))
    }

    /// Spends one unit of the parse-operation budget.
    pub fn bump_ops(&mut self) -> Result<(), ParseError> {
        self.ops += 1;
        if self.ops > MAX_PARSE_OPERATIONS {
            return Err(ParseError::TooComplex("parse operation budget exhausted"));
        }
        Ok(())
    }
}
