#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use super::ParseError;
use super::ast::{
    AccessModifier, Ast, Member, MemberFunction, MemberVariable, Modifier, Parameter, Span,
    TypeDecl, TypeId, TypeKind, TypeRef,
};
use super::lexer::Lexer;
use super::symbols::{NodeRef, Symbol, SymbolTable};
use super::tokens::{Token, TokenKind};
use crate::constants::{MAX_ARRAY_DIMENSIONS, MAX_MEMBER_LOOKAHEAD, MAX_RECURSION_DEPTH};

/// Modifiers legal on a top-level type declaration.
const TOP_LEVEL_TYPE_MODIFIERS: &[Modifier] =
    &[Modifier::Final, Modifier::Abstract, Modifier::Strictfp];

/// Modifiers legal on a nested type declaration.
const NESTED_TYPE_MODIFIERS: &[Modifier] = &[
    Modifier::Final,
    Modifier::Abstract,
    Modifier::Static,
    Modifier::Strictfp,
];

/// Modifiers legal on a member function.
const FUNCTION_MODIFIERS: &[Modifier] = &[
    Modifier::Static,
    Modifier::Final,
    Modifier::Abstract,
    Modifier::Strictfp,
    Modifier::Default,
];

/// Modifiers legal on a member variable.
const FIELD_MODIFIERS: &[Modifier] = &[Modifier::Static, Modifier::Final];

/// Modifiers legal on a formal parameter.
const PARAMETER_MODIFIERS: &[Modifier] = &[Modifier::Final];

/// Recursive-descent parser over one compilation unit's token stream.
///
/// Builds the arena-owned AST while a scope stack tracks which names are
/// visible; any missing expected token propagates as a
/// [`ParseError::Syntax`] with the expected-token description and the
/// current position, un-swallowed, to the top-level caller.
pub struct Parser {
    /// EOF-terminated token stream.
    tokens:  Vec<Token>,
    /// Index of the next unconsumed token.
    pos:     usize,
    /// The AST being built.
    ast:     Ast,
    /// Scope bookkeeping for the parse.
    symbols: SymbolTable,
    /// Current declaration-nesting depth, for the recursion guard.
    depth:   usize,
}

impl Parser {
    /// Parses one compilation unit into an AST.
    pub fn parse_program(source: &str) -> Result<Ast, ParseError> {
        Self::parse_program_with_symbols(source).map(|(ast, _)| ast)
    }

    /// Parses one compilation unit, also returning the symbol table the
    /// parse left behind.
    pub fn parse_program_with_symbols(source: &str) -> Result<(Ast, SymbolTable), ParseError> {
        let tokens = Lexer::tokenize(source)?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            ast: Ast::new(),
            symbols: SymbolTable::new(),
            depth: 0,
        };
        parser.parse_compilation_unit()?;
        Ok((parser.ast, parser.symbols))
    }

    /// Package header, imports, then top-level type declarations until
    /// end of input.
    fn parse_compilation_unit(&mut self) -> Result<(), ParseError> {
        if self.check(TokenKind::Package, 0) {
            self.advance();
            let path = self.parse_dotted_path(false)?;
            self.expect(TokenKind::Semi, "';'")?;
            self.ast.set_package(path);
        }

        while self.check(TokenKind::Import, 0) {
            self.advance();
            if self.check(TokenKind::Static, 0) {
                self.advance();
            }
            let path = self.parse_dotted_path(true)?;
            self.expect(TokenKind::Semi, "';'")?;
            self.ast.add_import(path);
        }

        while !self.at_eof() {
            self.parse_type_decl(None, Vec::new())?;
        }

        Ok(())
    }

    /// A `.`-joined identifier chain; `allow_star` admits a trailing
    /// wildcard segment (imports).
    fn parse_dotted_path(&mut self, allow_star: bool) -> Result<String, ParseError> {
        let mut path = self.expect(TokenKind::Ident, "identifier")?.text;
        while self.check(TokenKind::Dot, 0) {
            self.advance();
            if allow_star && self.check(TokenKind::Star, 0) {
                self.advance();
                path.push_str(".*");
                break;
            }
            path.push('.');
            path.push_str(&self.expect(TokenKind::Ident, "identifier")?.text);
        }
        Ok(path)
    }

    /// One class or interface declaration, including its whole body.
    fn parse_type_decl(
        &mut self,
        parent: Option<TypeId>,
        leading_annotations: Vec<String>,
    ) -> Result<TypeId, ParseError> {
        self.enter_recursion()?;
        let result = self.parse_type_decl_inner(parent, leading_annotations);
        self.depth -= 1;
        result
    }

    /// Body of [`Self::parse_type_decl`], separated so the recursion
    /// guard unwinds on every path.
    fn parse_type_decl_inner(
        &mut self,
        parent: Option<TypeId>,
        leading_annotations: Vec<String>,
    ) -> Result<TypeId, ParseError> {
        let start = self.peek(0).pos;

        let mut annotations = leading_annotations;
        annotations.extend(self.parse_annotations()?);

        let access = self.parse_access_modifier();
        let legal = if parent.is_some() {
            NESTED_TYPE_MODIFIERS
        } else {
            TOP_LEVEL_TYPE_MODIFIERS
        };
        let modifiers = self.parse_modifiers(legal)?;

        let kind = match self.peek(0).kind {
            TokenKind::Class => TypeKind::Class,
            TokenKind::Interface => TypeKind::Interface,
            _ => {
                return Err(ParseError::expected(
                    "`class` or `interface`",
                    self.peek(0).pos,
                ));
            }
        };
        self.advance();

        let name = self.expect(TokenKind::Ident, "type name")?.text;
        let generics = self.parse_generic_declaration()?;
        let extends = self.parse_supertypes()?;

        let id = self.ast.reserve(parent);
        self.symbols.define(&name, Symbol::Type { decl: Some(id) });

        let open = self.expect(TokenKind::OpenCurly, "'{'")?;
        self.symbols.enter_scope();

        let mut members = Vec::new();
        while !self.check(TokenKind::CloseCurly, 0) && !self.at_eof() {
            let index = members.len();
            if let Some(member) = self.parse_member(id, &name, index)? {
                members.push(member);
            }
        }

        let close = self.expect(TokenKind::CloseCurly, "'}'")?;
        self.symbols.exit_scope();

        self.ast.fill(
            id,
            TypeDecl {
                kind,
                name,
                access,
                modifiers,
                generics,
                extends,
                members,
                parent,
                annotations,
                body: Span {
                    begin: open.pos.offset,
                    end:   close.pos.offset + 1,
                },
                pos: start,
            },
        );

        Ok(id)
    }

    /// Classifies and parses one member of a type body.
    ///
    /// Returns `None` for constructs that are tolerated in the token
    /// stream but not modeled (initializer blocks, enums, records,
    /// annotation types).
    fn parse_member(
        &mut self,
        owner: TypeId,
        owner_name: &str,
        index: usize,
    ) -> Result<Option<Member>, ParseError> {
        self.symbols.bump_ops()?;

        // Instance and static initializer blocks.
        if self.check(TokenKind::OpenCurly, 0) {
            self.skip_balanced(TokenKind::OpenCurly, TokenKind::CloseCurly)?;
            return Ok(None);
        }
        if self.check(TokenKind::Static, 0) && self.check(TokenKind::OpenCurly, 1) {
            self.advance();
            self.skip_balanced(TokenKind::OpenCurly, TokenKind::CloseCurly)?;
            return Ok(None);
        }

        // Annotation-type declarations are opaque.
        if self.check(TokenKind::At, 0) && self.check(TokenKind::Interface, 1) {
            return self.skip_opaque_declaration();
        }

        let annotations = self.parse_annotations()?;

        // A bounded forward scan decides what this member is: the first
        // identifier directly followed by `(` means a function, an `=`
        // or `;` means a variable, and a declaration keyword means a
        // nested type.
        let mut forward = 0usize;
        loop {
            if forward > MAX_MEMBER_LOOKAHEAD {
                return Err(ParseError::TooComplex("member declaration too complex"));
            }
            match self.peek(forward).kind {
                TokenKind::Ident if self.check(TokenKind::OpenParen, forward + 1) => break,
                TokenKind::Assign | TokenKind::Semi => break,
                TokenKind::Class | TokenKind::Interface => break,
                TokenKind::Enum | TokenKind::Record => break,
                TokenKind::Eof => {
                    return Err(ParseError::expected("a type member", self.peek(forward).pos));
                }
                _ => forward += 1,
            }
        }

        match self.peek(forward).kind {
            TokenKind::Class | TokenKind::Interface => {
                let nested = self.parse_type_decl(Some(owner), annotations)?;
                Ok(Some(Member::Type(nested)))
            }
            TokenKind::Enum | TokenKind::Record => self.skip_opaque_declaration(),
            TokenKind::Ident => self
                .parse_member_function(owner, owner_name, annotations, index)
                .map(|f| Some(Member::Function(f))),
            TokenKind::Assign | TokenKind::Semi => self
                .parse_member_variable(annotations)
                .map(|v| Some(Member::Variable(v))),
            _ => Err(ParseError::expected("a type member", self.peek(0).pos)),
        }
    }

    /// Consumes a declaration that is tolerated but not modeled: skips
    /// to its opening brace, then over the balanced block.
    fn skip_opaque_declaration(&mut self) -> Result<Option<Member>, ParseError> {
        while !self.check(TokenKind::OpenCurly, 0) {
            if self.at_eof() {
                return Err(ParseError::expected("'{'", self.peek(0).pos));
            }
            self.advance();
        }
        self.skip_balanced(TokenKind::OpenCurly, TokenKind::CloseCurly)?;
        if self.check(TokenKind::Semi, 0) {
            self.advance();
        }
        Ok(None)
    }

    /// One member function or constructor declaration.
    fn parse_member_function(
        &mut self,
        owner: TypeId,
        owner_name: &str,
        annotations: Vec<String>,
        index: usize,
    ) -> Result<MemberFunction, ParseError> {
        let start = self.peek(0).pos;
        let access = self.parse_access_modifier();
        let modifiers = self.parse_modifiers(FUNCTION_MODIFIERS)?;
        let generics = self.parse_generic_declaration()?;

        // A "return type" identifier that exactly matches the enclosing
        // type's name, directly followed by the parameter list, is a
        // constructor; constructors have no separate return type node.
        let (name, is_constructor, return_type) = if self.check(TokenKind::Ident, 0)
            && self.peek(0).text == owner_name
            && self.check(TokenKind::OpenParen, 1)
        {
            let token = self.advance();
            (token.text, true, None)
        } else {
            let ty = self.parse_type()?;
            let name = self.expect(TokenKind::Ident, "identifier")?.text;
            (name, false, Some(ty))
        };

        self.symbols.enter_scope();
        let params = self.parse_parameters();
        self.symbols.exit_scope();
        let params = params?;

        let throws = self.parse_throws()?;

        let body = if self.check(TokenKind::Semi, 0) {
            self.advance();
            None
        } else {
            Some(self.parse_body()?)
        };

        self.symbols.define(
            &name,
            Symbol::Method {
                node: NodeRef::Member { owner, index },
            },
        );

        Ok(MemberFunction {
            name,
            is_constructor,
            access,
            modifiers,
            generics,
            params,
            return_type,
            throws,
            annotations,
            body,
            pos: start,
        })
    }

    /// The parenthesized formal-parameter list. Parameters are defined
    /// as variable symbols in the scope the caller opened for them.
    fn parse_parameters(&mut self) -> Result<Vec<Parameter>, ParseError> {
        self.expect(TokenKind::OpenParen, "'('")?;
        let mut params = Vec::new();

        while !self.check(TokenKind::CloseParen, 0) {
            if self.at_eof() {
                return Err(ParseError::expected("')'", self.peek(0).pos));
            }

            let modifiers = self.parse_modifiers(PARAMETER_MODIFIERS)?;
            let ty = self.parse_type()?;
            if ty.is_void() {
                return Err(ParseError::expected(
                    "a parameter type other than void",
                    self.peek(0).pos,
                ));
            }
            let name = self.expect(TokenKind::Ident, "identifier")?;
            self.symbols.define(
                &name.text,
                Symbol::Variable {
                    ty:          ty.clone(),
                    declared_at: name.pos,
                },
            );
            params.push(Parameter {
                ty,
                name: name.text,
                modifiers,
            });

            if self.check(TokenKind::Comma, 0) {
                self.advance();
            } else if !self.check(TokenKind::CloseParen, 0) {
                return Err(ParseError::expected("',' or ')'", self.peek(0).pos));
            }
        }

        self.expect(TokenKind::CloseParen, "')'")?;
        Ok(params)
    }

    /// Optional `throws` clause; collects the ordered exception names.
    fn parse_throws(&mut self) -> Result<Vec<String>, ParseError> {
        let mut throws = Vec::new();
        if self.check(TokenKind::Throws, 0) {
            self.advance();
            loop {
                throws.push(self.parse_dotted_path(false)?);
                if self.check(TokenKind::Comma, 0) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        Ok(throws)
    }

    /// A brace-delimited statement scope, returned as a byte span.
    ///
    /// Body contents are opaque to structural comparison, but every
    /// nested brace still pushes and pops a scope so the enter/exit
    /// pairing invariant holds throughout the parse.
    fn parse_body(&mut self) -> Result<Span, ParseError> {
        let open = self.expect(TokenKind::OpenCurly, "'{'")?;
        self.symbols.enter_scope();
        let mut depth = 1usize;

        let close_offset = loop {
            let token = self.advance();
            match token.kind {
                TokenKind::OpenCurly => {
                    self.symbols.enter_scope();
                    depth += 1;
                }
                TokenKind::CloseCurly => {
                    self.symbols.exit_scope();
                    depth -= 1;
                    if depth == 0 {
                        break token.pos.offset;
                    }
                }
                TokenKind::Eof => {
                    return Err(ParseError::expected("'}'", token.pos));
                }
                _ => {}
            }
            self.symbols.bump_ops()?;
        };

        Ok(Span {
            begin: open.pos.offset,
            end:   close_offset + 1,
        })
    }

    /// One member variable declaration, initializer skipped opaquely.
    fn parse_member_variable(
        &mut self,
        annotations: Vec<String>,
    ) -> Result<MemberVariable, ParseError> {
        let start = self.peek(0).pos;
        let access = self.parse_access_modifier();
        let modifiers = self.parse_modifiers(FIELD_MODIFIERS)?;

        let ty = self.parse_type()?;
        if ty.is_void() {
            return Err(ParseError::expected(
                "a variable type other than void",
                self.peek(0).pos,
            ));
        }

        let name = self.expect(TokenKind::Ident, "identifier")?;

        if self.check(TokenKind::Assign, 0) {
            self.advance();
            self.skip_initializer()?;
        }
        self.expect(TokenKind::Semi, "';'")?;

        self.symbols.define(
            &name.text,
            Symbol::Variable {
                ty:          ty.clone(),
                declared_at: name.pos,
            },
        );

        Ok(MemberVariable {
            name: name.text,
            ty,
            access,
            modifiers,
            annotations,
            pos: start,
        })
    }

    /// Skips an initializer expression up to its terminating `;`,
    /// tracking nesting so array literals and anonymous classes do not
    /// end the declaration early.
    fn skip_initializer(&mut self) -> Result<(), ParseError> {
        let mut depth = 0usize;
        loop {
            match self.peek(0).kind {
                TokenKind::Semi if depth == 0 => return Ok(()),
                TokenKind::OpenCurly | TokenKind::OpenParen | TokenKind::OpenBracket => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::CloseCurly | TokenKind::CloseParen | TokenKind::CloseBracket => {
                    depth = depth.saturating_sub(1);
                    self.advance();
                }
                TokenKind::Eof => {
                    return Err(ParseError::expected("';'", self.peek(0).pos));
                }
                _ => {
                    self.advance();
                }
            }
            self.symbols.bump_ops()?;
        }
    }

    /// A leading `@`-annotation sequence; names collected, arguments
    /// skipped, nothing interpreted.
    fn parse_annotations(&mut self) -> Result<Vec<String>, ParseError> {
        let mut annotations = Vec::new();
        while self.check(TokenKind::At, 0) && !self.check(TokenKind::Interface, 1) {
            self.advance();
            let name = self.parse_dotted_path(false)?;
            if self.check(TokenKind::OpenParen, 0) {
                self.skip_balanced(TokenKind::OpenParen, TokenKind::CloseParen)?;
            }
            annotations.push(name);
        }
        Ok(annotations)
    }

    /// Optional access modifier; absence means package-default.
    fn parse_access_modifier(&mut self) -> AccessModifier {
        let access = match self.peek(0).kind {
            TokenKind::Public => AccessModifier::Public,
            TokenKind::Private => AccessModifier::Private,
            TokenKind::Protected => AccessModifier::Protected,
            _ => return AccessModifier::PackagePrivate,
        };
        self.advance();
        access
    }

    /// A run of modifier keywords in any order. Duplicates are not
    /// rejected; a recognized modifier that is not legal here is.
    fn parse_modifiers(&mut self, legal: &[Modifier]) -> Result<Vec<Modifier>, ParseError> {
        let mut modifiers = Vec::new();
        loop {
            let modifier = match self.peek(0).kind {
                TokenKind::Static => Modifier::Static,
                TokenKind::Final => Modifier::Final,
                TokenKind::Abstract => Modifier::Abstract,
                TokenKind::Strictfp => Modifier::Strictfp,
                TokenKind::Default => Modifier::Default,
                _ => break,
            };
            if !legal.contains(&modifier) {
                return Err(ParseError::expected(
                    format!("a modifier legal in this position, not `{modifier}`"),
                    self.peek(0).pos,
                ));
            }
            self.advance();
            modifiers.push(modifier);
        }
        Ok(modifiers)
    }

    /// Ordered `<A, B, ...>` generic-parameter declaration; bounds are
    /// consumed but only the parameter names are kept.
    fn parse_generic_declaration(&mut self) -> Result<Vec<String>, ParseError> {
        if !self.check(TokenKind::OpenChevron, 0) {
            return Ok(Vec::new());
        }
        self.advance();

        let mut names = Vec::new();
        loop {
            names.push(self.expect(TokenKind::Ident, "type parameter")?.text);
            if self.check(TokenKind::Extends, 0) {
                self.advance();
                self.skip_generic_bound()?;
            }
            if self.check(TokenKind::Comma, 0) {
                self.advance();
                continue;
            }
            self.expect(TokenKind::CloseChevron, "'>'")?;
            break;
        }
        Ok(names)
    }

    /// Skips one type-parameter bound up to the next `,` or the closing
    /// `>` of the declaration, tracking nested chevrons.
    fn skip_generic_bound(&mut self) -> Result<(), ParseError> {
        let mut depth = 0usize;
        loop {
            match self.peek(0).kind {
                TokenKind::OpenChevron => {
                    depth += 1;
                    self.advance();
                }
                TokenKind::CloseChevron if depth > 0 => {
                    depth -= 1;
                    self.advance();
                }
                TokenKind::CloseChevron => return Ok(()),
                TokenKind::Comma if depth == 0 => return Ok(()),
                TokenKind::Eof => {
                    return Err(ParseError::expected("'>'", self.peek(0).pos));
                }
                _ => {
                    self.advance();
                }
            }
            self.symbols.bump_ops()?;
        }
    }

    /// Optional `extends` and `implements` clauses; names collected,
    /// generic arguments skipped.
    fn parse_supertypes(&mut self) -> Result<Vec<String>, ParseError> {
        let mut supertypes = Vec::new();

        if self.check(TokenKind::Extends, 0) {
            self.advance();
            loop {
                supertypes.push(self.parse_supertype_name()?);
                if self.check(TokenKind::Comma, 0) {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        if self.check(TokenKind::Implements, 0) {
            self.advance();
            loop {
                supertypes.push(self.parse_supertype_name()?);
                if self.check(TokenKind::Comma, 0) {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        Ok(supertypes)
    }

    /// One supertype reference: qualified name, generic arguments
    /// consumed and discarded.
    fn parse_supertype_name(&mut self) -> Result<String, ParseError> {
        let name = self.parse_dotted_path(false)?;
        if self.check(TokenKind::OpenChevron, 0) {
            self.skip_generic_arguments()?;
        }
        Ok(name)
    }

    /// One type reference: base name plus array dimensions, with
    /// varargs counting as one trailing dimension.
    fn parse_type(&mut self) -> Result<TypeRef, ParseError> {
        self.symbols.bump_ops()?;
        let token = self.peek(0).clone();

        let name = match token.kind {
            TokenKind::Void => {
                self.advance();
                return Ok(TypeRef::scalar("void"));
            }
            kind if kind.is_simple_type() => {
                self.advance();
                token.text
            }
            TokenKind::Ident => {
                self.advance();
                let mut name = token.text;
                while self.check(TokenKind::Dot, 0) && self.check(TokenKind::Ident, 1) {
                    self.advance();
                    name.push('.');
                    name.push_str(&self.advance().text);
                }
                if self.check(TokenKind::OpenChevron, 0) {
                    self.skip_generic_arguments()?;
                }
                name
            }
            _ => return Err(ParseError::expected("a type", token.pos)),
        };

        let mut dims = 0usize;
        while self.check(TokenKind::OpenBracket, 0) && self.check(TokenKind::CloseBracket, 1) {
            dims += 1;
            if dims > MAX_ARRAY_DIMENSIONS {
                return Err(ParseError::TooComplex("array dimensions"));
            }
            self.advance();
            self.advance();
        }

        let mut varargs = false;
        if self.check(TokenKind::Dot, 0)
            && self.check(TokenKind::Dot, 1)
            && self.check(TokenKind::Dot, 2)
        {
            self.advance();
            self.advance();
            self.advance();
            dims += 1;
            varargs = true;
        }

        Ok(TypeRef {
            name,
            dims,
            varargs,
        })
    }

    /// Skips a balanced `<...>` generic-argument list.
    fn skip_generic_arguments(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::OpenChevron, "'<'")?;
        let mut depth = 1usize;
        while depth > 0 {
            match self.peek(0).kind {
                TokenKind::OpenChevron => depth += 1,
                TokenKind::CloseChevron => depth -= 1,
                TokenKind::Eof => {
                    return Err(ParseError::expected("'>'", self.peek(0).pos));
                }
                _ => {}
            }
            self.advance();
            self.symbols.bump_ops()?;
        }
        Ok(())
    }

    /// Skips a balanced delimiter pair starting at the current token.
    fn skip_balanced(&mut self, open: TokenKind, close: TokenKind) -> Result<(), ParseError> {
        let open_description = if open == TokenKind::OpenCurly {
            "'{'"
        } else {
            "'('"
        };
        self.expect(open, open_description)?;
        let mut depth = 1usize;
        while depth > 0 {
            let kind = self.peek(0).kind;
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth -= 1;
            } else if kind == TokenKind::Eof {
                return Err(ParseError::expected(
                    if close == TokenKind::CloseCurly {
                        "'}'"
                    } else {
                        "')'"
                    },
                    self.peek(0).pos,
                ));
            }
            self.advance();
            self.symbols.bump_ops()?;
        }
        Ok(())
    }

    /// Bumps the recursion guard, failing when declarations nest past
    /// the budget.
    fn enter_recursion(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_RECURSION_DEPTH {
            self.depth -= 1;
            return Err(ParseError::TooComplex("declaration nesting depth"));
        }
        Ok(())
    }

    /// Looks at the token `offset` positions ahead, saturating at EOF.
    fn peek(&self, offset: usize) -> &Token {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    /// Whether the stream is exhausted.
    fn at_eof(&self) -> bool {
        self.peek(0).is_eof()
    }

    /// Consumes and returns the current token. At EOF this keeps
    /// returning the EOF token without moving.
    fn advance(&mut self) -> Token {
        let token = self.peek(0).clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Whether the token `offset` ahead has the given kind.
    fn check(&self, kind: TokenKind, offset: usize) -> bool {
        self.peek(offset).kind == kind
    }

    /// Consumes a token of `kind` or fails with the expected-token
    /// description and the current position.
    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token, ParseError> {
        if self.check(kind, 0) {
            Ok(self.advance())
        } else {
            Err(ParseError::expected(what, self.peek(0).pos))
        }
    }
}
