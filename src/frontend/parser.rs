//! Parser for exprc
//!
//! Recursive descent parser with Pratt parsing for expressions.
//! Expressions are evaluated as they are reduced, and declarations and
//! assignments update the symbol table as soon as their `;` is read.

use log::debug;

use crate::frontend::ast::{BinOp, Leaf, Node, NodeKind};
use crate::frontend::lexer::Lexer;
use crate::frontend::semantic::SymbolTable;
use crate::frontend::token::{Token, TokenKind};
use crate::types::{convert, TypeName, Value};
use crate::utils::{Error, Result, Span, Stage};

/// What to do after a statement fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Recovery {
    /// Report the error, skip past the next `;` and keep going
    #[default]
    Continue,
    /// Stop at the first syntax or semantic error
    Halt,
}

/// Parser configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub recovery: Recovery,
}

/// The parser
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Lexical errors collected while tokenizing
    lex_errors: Vec<Error>,
    options: Options,
}

impl Parser {
    /// Create a new parser from a lexer
    pub fn new(mut lexer: Lexer) -> Self {
        let tokens = lexer.tokenize();
        Self {
            tokens,
            pos: 0,
            lex_errors: lexer.take_diagnostics(),
            options: Options::default(),
        }
    }

    /// Create a parser from pre-tokenized input
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |t| t.kind != TokenKind::Eof) {
            let span = tokens.last().map_or(Span::new(1, 1), |t| t.span);
            tokens.push(Token::eof(span));
        }
        Self {
            tokens,
            pos: 0,
            lex_errors: Vec::new(),
            options: Options::default(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    // ==================== Helper Methods ====================

    fn current(&self) -> &Token {
        // `tokens` always ends with Eof and `pos` never moves past it
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn consume(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Error for the current token. At end of input the last real token's
    /// line is reported, since the problem is usually a missing `;` there.
    fn unexpected(&self, expected: &str) -> Error {
        let token = self.current();
        if token.kind == TokenKind::Eof {
            let span = self
                .pos
                .checked_sub(1)
                .and_then(|prev| self.tokens.get(prev))
                .map_or(token.span, |t| t.span);
            return Error::UnexpectedEof {
                expected: expected.to_string(),
                span,
            };
        }
        Error::UnexpectedToken {
            expected: expected.to_string(),
            got: token.kind.to_string(),
            span: token.span,
        }
    }

    /// True if the current token can begin a statement
    fn at_statement_start(&self) -> bool {
        match self.current_kind() {
            TokenKind::Ident(_) => self
                .tokens
                .get(self.pos + 1)
                .is_some_and(|next| next.kind == TokenKind::Eq),
            kind => kind.type_name().is_some(),
        }
    }

    /// Skip to just past the next `;` unless the failed statement already
    /// consumed its terminator. Stops early at a token that starts a new
    /// statement, so a missing `;` does not cost the following statement.
    fn synchronize(&mut self, statement_start: usize) {
        let terminated = self.pos > statement_start
            && self.tokens[self.pos - 1].kind == TokenKind::Semicolon;
        if terminated {
            return;
        }
        while !self.is_at_end() {
            if self.pos != statement_start && self.at_statement_start() {
                break;
            }
            if self.advance().kind == TokenKind::Semicolon {
                break;
            }
        }
        debug!("resynchronized at token {} (line {})", self.pos, self.current().span.line);
    }

    // ==================== Parsing Methods ====================

    /// Parse the whole token stream into `symbols`.
    ///
    /// Returns the program tree (`None` if no statement succeeded) and all
    /// diagnostics ordered by position. Failed statements are left out of
    /// the tree.
    pub fn parse_into(&mut self, symbols: &mut SymbolTable) -> (Option<Node>, Vec<Error>) {
        let mut statements = Vec::new();
        let mut errors = Vec::new();

        while !self.is_at_end() {
            let start = self.pos;
            match self.parse_statement(symbols) {
                Ok(stmt) => statements.push(stmt),
                Err(e) => {
                    debug!("statement starting at line {} failed: {}", self.tokens[start].span.line, e);
                    errors.push(e);
                    if self.options.recovery == Recovery::Halt {
                        break;
                    }
                    self.synchronize(start);
                }
            }
        }

        if statements.is_empty() && errors.is_empty() {
            errors.push(self.unexpected("declaration or assignment"));
        }

        let mut diagnostics = std::mem::take(&mut self.lex_errors);
        if let Some(halted_at) = errors.first().filter(|_| self.options.recovery == Recovery::Halt) {
            // lexing is lazy in spirit: nothing past the fatal error is reported
            let limit = halted_at.span();
            diagnostics.retain(|e| (e.span().line, e.span().column) <= (limit.line, limit.column));
        }
        diagnostics.extend(errors);
        diagnostics.sort_by_key(|e| {
            let span = e.span();
            (span.line, span.column, e.stage() != Stage::Lexical)
        });

        let program = (!statements.is_empty()).then(|| {
            Node::new(
                NodeKind::Program,
                vec![Node::new(NodeKind::StatementList, statements)],
            )
        });
        (program, diagnostics)
    }

    /// Parse a complete program, failing on the first syntax or semantic error
    pub fn parse_program(&mut self, symbols: &mut SymbolTable) -> Result<Node> {
        let mut statements = vec![self.parse_statement(symbols)?];
        while !self.is_at_end() {
            statements.push(self.parse_statement(symbols)?);
        }
        Ok(Node::new(
            NodeKind::Program,
            vec![Node::new(NodeKind::StatementList, statements)],
        ))
    }

    /// statement := decl | assign
    pub fn parse_statement(&mut self, symbols: &mut SymbolTable) -> Result<Node> {
        let inner = if self.current_kind().type_name().is_some() {
            self.parse_decl(symbols)?
        } else if matches!(self.current_kind(), TokenKind::Ident(_)) {
            self.parse_assign(symbols)?
        } else if self.current_kind().is_reserved() {
            return Err(self.unexpected("declaration or assignment (control flow is not supported)"));
        } else {
            return Err(self.unexpected("declaration or assignment"));
        };
        Ok(Node::new(NodeKind::Statement, vec![inner]))
    }

    /// decl := type NAME ';' | type NAME '=' expression ';'
    fn parse_decl(&mut self, symbols: &mut SymbolTable) -> Result<Node> {
        let ty = self.parse_type()?;
        let (name, span) = self.parse_name()?;

        let init = if self.consume(&TokenKind::Eq) {
            Some(self.parse_expr(symbols)?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon, "';'")?;

        if symbols.contains(&name) {
            return Err(Error::DuplicateDeclaration { name, span });
        }
        // convert before declaring so a bad initializer leaves no trace
        let converted = match &init {
            Some((_, value)) => Some(convert(&name, value.clone(), ty, span)?),
            None => None,
        };
        symbols.declare(&name, ty, span)?;
        if let Some(value) = converted {
            symbols.assign(&name, value, span)?;
        }

        let mut children = vec![
            Node::leaf(NodeKind::Type, Leaf::Type(ty)),
            Node::leaf(NodeKind::Name, Leaf::Name(name)),
        ];
        if let Some((expr, value)) = init {
            children.push(Node::expression(vec![expr], value));
        }
        Ok(Node::new(NodeKind::Decl, children))
    }

    /// assign := NAME '=' expression ';'
    fn parse_assign(&mut self, symbols: &mut SymbolTable) -> Result<Node> {
        let (name, span) = self.parse_name()?;
        self.expect(TokenKind::Eq, "'='")?;
        let (expr, value) = self.parse_expr(symbols)?;
        self.expect(TokenKind::Semicolon, "';'")?;

        symbols.assign(&name, value.clone(), span)?;

        Ok(Node::new(
            NodeKind::Assign,
            vec![
                Node::leaf(NodeKind::Name, Leaf::Name(name)),
                Node::expression(vec![expr], value),
            ],
        ))
    }

    fn parse_type(&mut self) -> Result<TypeName> {
        match self.current_kind().type_name() {
            Some(ty) => {
                self.advance();
                Ok(ty)
            }
            None => Err(self.unexpected("type")),
        }
    }

    fn parse_name(&mut self) -> Result<(String, Span)> {
        let token = self.current().clone();
        match token.kind {
            TokenKind::Ident(name) => {
                self.advance();
                Ok((name, token.span))
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Parse and evaluate an expression
    fn parse_expr(&mut self, symbols: &SymbolTable) -> Result<(Node, Value)> {
        self.parse_expr_bp(symbols, 0)
    }

    /// Parse expression with binding power (Pratt parsing)
    fn parse_expr_bp(&mut self, symbols: &SymbolTable, min_bp: u8) -> Result<(Node, Value)> {
        let (mut left, mut left_value) = self.parse_primary(symbols)?;

        loop {
            let op_token = self.current().clone();
            let Some(op) = Self::token_to_binop(&op_token.kind) else {
                break;
            };

            let bp = op.precedence();
            if bp < min_bp {
                break;
            }

            self.advance();

            // Left-associative: the right side only takes tighter operators
            let (right, right_value) = self.parse_expr_bp(symbols, bp + 1)?;
            let value = Value::binary(op, &left_value, &right_value, op_token.span)?;

            left = Node::expression(
                vec![left, Node::leaf(NodeKind::Op, Leaf::Op(op)), right],
                value.clone(),
            );
            left_value = value;
        }

        Ok((left, left_value))
    }

    fn parse_primary(&mut self, symbols: &SymbolTable) -> Result<(Node, Value)> {
        let token = self.current().clone();

        let value = match token.kind {
            TokenKind::IntLit(n) => Value::Integer(n),
            TokenKind::FloatLit(x) => Value::Float(x),
            TokenKind::CharLit(c) => Value::Character(c),
            TokenKind::StringLit(s) => Value::Text(s),
            TokenKind::Ident(name) => {
                let value = symbols.read(&name, token.span)?.clone();
                self.advance();
                let name = Node::leaf(NodeKind::Name, Leaf::Name(name));
                return Ok((Node::expression(vec![name], value.clone()), value));
            }
            _ => return Err(self.unexpected("expression")),
        };

        self.advance();
        Ok((Node::number(value.clone()), value))
    }

    fn token_to_binop(kind: &TokenKind) -> Option<BinOp> {
        match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            _ => None,
        }
    }
}
