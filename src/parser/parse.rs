//! Main parser implementation
//!
//! This module provides the [`Parser`] struct, its error type, and the parse
//! entry point. The grammar is declarations only: a file is a sequence of
//! `struct Name { ... };` definitions, and a field is a base type, optional
//! `*`s, a name, and optional sized array dimensions.
//!
//! # Implementation
//!
//! Recursive descent over the token stream, with `check` / `match_token` /
//! `expect_*` helpers shared by all productions. Duplicate field names
//! inside one struct are rejected here rather than during resolution, since
//! the parser still has the field's source location at hand.

use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token};
use thiserror::Error;

/// Parser error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Parse error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for struct declarations
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
        })
    }

    /// Parse the entire file (top-level struct definitions)
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            if !self.match_token(&Token::Struct(self.current_location())) {
                return Err(ParseError {
                    message: format!("Expected 'struct', found {}", self.peek()),
                    location: self.current_location(),
                });
            }
            let def = self.parse_struct_definition()?;
            program.structs.push(def);
        }

        Ok(program)
    }

    /// Parse struct definition: struct Name { fields };
    ///
    /// The `struct` keyword has already been consumed. An empty field list
    /// is accepted; the layout calculator reports it as an error later, so
    /// the user sees a layout diagnostic rather than a syntax one.
    pub(crate) fn parse_struct_definition(&mut self) -> Result<StructDef, ParseError> {
        let loc = self.previous_location();

        let name = self.expect_identifier()?;

        self.expect_lbrace("after struct name")?;

        let mut fields: Vec<Field> = Vec::new();
        while !self.check(&Token::RBrace(self.current_location())) {
            let field = self.parse_field()?;

            if fields.iter().any(|f| f.name == field.name) {
                return Err(ParseError {
                    message: format!("Duplicate field '{}' in struct '{}'", field.name, name),
                    location: field.location,
                });
            }
            fields.push(field);
        }

        self.expect_rbrace("after struct fields")?;
        self.expect_semicolon("after struct definition")?;

        Ok(StructDef {
            name,
            fields,
            location: loc,
        })
    }

    /// Parse a single field: type [*]* name [[len]]* ;
    pub(crate) fn parse_field(&mut self) -> Result<Field, ParseError> {
        let loc = self.current_location();

        let mut field_type = Type::new(self.parse_base_type()?);

        while self.match_token(&Token::Star(self.current_location())) {
            field_type = field_type.with_pointer();
        }

        // void has no size of its own; only void pointers are layoutable
        if field_type.base == BaseType::Void && !field_type.is_pointer() {
            return Err(ParseError {
                message: "Field of type 'void' must be a pointer".to_string(),
                location: loc,
            });
        }

        let name = self.expect_identifier()?;

        while self.match_token(&Token::LBracket(self.current_location())) {
            let len = self.expect_array_length()?;
            field_type = field_type.with_array(len);
            self.expect_token(
                &Token::RBracket(self.current_location()),
                "Expected ']' after array length",
            )?;
        }

        self.expect_semicolon("after struct field")?;

        Ok(Field {
            name,
            field_type,
            location: loc,
        })
    }

    /// Parse base type keyword or struct reference
    pub(crate) fn parse_base_type(&mut self) -> Result<BaseType, ParseError> {
        if self.match_token(&Token::Char(self.current_location())) {
            Ok(BaseType::Char)
        } else if self.match_token(&Token::Bool(self.current_location())) {
            Ok(BaseType::Bool)
        } else if self.match_token(&Token::Short(self.current_location())) {
            Ok(BaseType::Short)
        } else if self.match_token(&Token::Int(self.current_location())) {
            Ok(BaseType::Int)
        } else if self.match_token(&Token::Long(self.current_location())) {
            Ok(BaseType::Long)
        } else if self.match_token(&Token::Float(self.current_location())) {
            Ok(BaseType::Float)
        } else if self.match_token(&Token::Double(self.current_location())) {
            Ok(BaseType::Double)
        } else if self.match_token(&Token::Void(self.current_location())) {
            Ok(BaseType::Void)
        } else if self.match_token(&Token::Struct(self.current_location())) {
            let name = self.expect_identifier()?;
            Ok(BaseType::Struct(name))
        } else {
            Err(ParseError {
                message: format!("Expected type name, found {}", self.peek()),
                location: self.current_location(),
            })
        }
    }

    // ===== Helper methods =====

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if std::mem::discriminant(&self.peek_token()) == std::mem::discriminant(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(&self.peek_token()) == std::mem::discriminant(token)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek_token(), Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_token(&self) -> Token {
        self.tokens[self.position].clone()
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position - 1]
    }

    pub(crate) fn previous_location(&self) -> SourceLocation {
        self.previous().location()
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    pub(crate) fn expect_token(&mut self, token: &Token, message: &str) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError {
                message: format!("{}, found {}", message, self.peek()),
                location: self.current_location(),
            })
        }
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::LBrace(self.current_location()),
            &format!("Expected '{{' {}", ctx),
        )
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::RBrace(self.current_location()),
            &format!("Expected '}}' {}", ctx),
        )
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            &format!("Expected ';' {}", ctx),
        )
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let Token::Ident(name, _) = self.peek_token() {
            self.advance();
            Ok(name)
        } else {
            Err(ParseError {
                message: format!("Expected identifier, found {}", self.peek()),
                location: self.current_location(),
            })
        }
    }

    pub(crate) fn expect_array_length(&mut self) -> Result<usize, ParseError> {
        if let Token::IntLiteral(n, _) = self.peek_token() {
            self.advance();
            Ok(n as usize)
        } else {
            Err(ParseError {
                message: format!("Expected array length, found {}", self.peek()),
                location: self.current_location(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_struct() {
        let source = "struct Point { int x; int y; };";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        assert_eq!(program.structs.len(), 1);
        let def = &program.structs[0];
        assert_eq!(def.name, "Point");
        assert_eq!(def.fields.len(), 2);
        assert_eq!(def.fields[0].name, "x");
        assert_eq!(def.fields[0].field_type.base, BaseType::Int);
        assert_eq!(def.fields[1].name, "y");
    }

    #[test]
    fn test_parse_pointer_and_array_fields() {
        let source = r#"
            struct Buffer {
                char *data;
                double values[4];
                struct Buffer *next;
            };
        "#;
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        let fields = &program.structs[0].fields;
        assert_eq!(fields[0].field_type.pointer_depth, 1);
        assert_eq!(fields[0].field_type.c_decl("data"), "char *data");
        assert_eq!(fields[1].field_type.array_dims, vec![4]);
        assert_eq!(fields[1].field_type.c_decl("values"), "double values[4]");
        assert_eq!(
            fields[2].field_type.base,
            BaseType::Struct("Buffer".to_string())
        );
        assert!(fields[2].field_type.is_pointer());
    }

    #[test]
    fn test_parse_multiple_structs() {
        let source = "struct A { char c; }; struct B { struct A a; long n; };";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        assert_eq!(program.structs.len(), 2);
        assert_eq!(program.structs[0].name, "A");
        assert_eq!(program.structs[1].name, "B");
    }

    #[test]
    fn test_parse_empty_struct() {
        let source = "struct Empty { };";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        assert_eq!(program.structs[0].fields.len(), 0);
    }

    #[test]
    fn test_multidimensional_array() {
        let source = "struct Grid { int cells[2][3]; };";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        assert_eq!(program.structs[0].fields[0].field_type.array_dims, vec![2, 3]);
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let source = "struct P { int x; char x; };";
        let mut parser = Parser::new(source).unwrap();
        let err = parser.parse_program().unwrap_err();

        assert!(err.message.contains("Duplicate field 'x'"));
        assert_eq!(err.location.line, 1);
    }

    #[test]
    fn test_void_field_requires_pointer() {
        let source = "struct V { void v; };";
        let mut parser = Parser::new(source).unwrap();
        let err = parser.parse_program().unwrap_err();

        assert!(err.message.contains("void"));
    }

    #[test]
    fn test_void_pointer_accepted() {
        let source = "struct V { void *handle; };";
        let mut parser = Parser::new(source).unwrap();
        let program = parser.parse_program().unwrap();

        assert_eq!(program.structs[0].fields[0].name, "handle");
    }

    #[test]
    fn test_missing_semicolon() {
        let source = "struct P { int x }";
        let mut parser = Parser::new(source).unwrap();
        let err = parser.parse_program().unwrap_err();

        assert!(err.message.contains("Expected ';'"));
    }

    #[test]
    fn test_unsized_array_rejected() {
        let source = "struct P { int data[]; };";
        let mut parser = Parser::new(source).unwrap();
        let err = parser.parse_program().unwrap_err();

        assert!(err.message.contains("Expected array length"));
    }

    #[test]
    fn test_top_level_must_be_struct() {
        let source = "int x;";
        let mut parser = Parser::new(source).unwrap();
        let err = parser.parse_program().unwrap_err();

        assert!(err.message.contains("Expected 'struct'"));
    }
}
