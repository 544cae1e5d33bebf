//! Parser for the model description language.

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{IslmError, Result};

/// Parser for model descriptions.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire model description.
    pub fn parse(&mut self) -> Result<ModelAst> {
        let mut ast = ModelAst::new();

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            if self.current.kind != TokenKind::Directive {
                return Err(IslmError::parse(
                    self.current.line,
                    format!("expected a directive, got {:?}", self.current.text),
                ));
            }
            self.parse_directive(&mut ast)?;

            // Each directive ends its line
            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(IslmError::parse(
                        self.current.line,
                        format!("unexpected trailing token {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(IslmError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn expect_number(&mut self) -> Result<f64> {
        let tok = self.expect(TokenKind::Number)?;
        parse_value(&tok.text)
            .ok_or_else(|| IslmError::parse(tok.line, format!("invalid number: {}", tok.text)))
    }

    fn parse_directive(&mut self, ast: &mut ModelAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".param" => {
                let assignment = self.parse_assignment()?;
                ast.params.push(assignment);
            }
            ".shock" => {
                let assignment = self.parse_assignment()?;
                ast.shocks.push(assignment);
            }
            ".bounds" => {
                if ast.bounds.is_some() {
                    return Err(IslmError::parse(line, "bounds declared twice"));
                }
                let min = self.expect_number()?;
                let max = self.expect_number()?;
                let step = self.expect_number()?;
                ast.bounds = Some(BoundsDef {
                    min,
                    max,
                    step,
                    line,
                });
            }
            ".scenario" => {
                let scenario = self.parse_scenario(line)?;
                ast.scenarios.push(scenario);
            }
            _ => {
                return Err(IslmError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    /// `name [=] value`
    fn parse_assignment(&mut self) -> Result<Assignment> {
        let name = self.expect(TokenKind::Identifier)?;
        if self.current.kind == TokenKind::Equals {
            self.advance()?;
        }
        let value = self.expect_number()?;
        Ok(Assignment {
            name: name.text,
            value,
            line: name.line,
        })
    }

    /// `name ( p=v p=v ... )`
    fn parse_scenario(&mut self, line: usize) -> Result<ScenarioDef> {
        let name = self.expect(TokenKind::Identifier)?.text;
        self.expect(TokenKind::OpenParen)?;

        let mut overrides = Vec::new();
        while self.current.kind != TokenKind::CloseParen {
            if matches!(self.current.kind, TokenKind::Newline | TokenKind::Eof) {
                return Err(IslmError::parse(
                    line,
                    format!("unclosed parameter list for scenario '{}'", name),
                ));
            }
            let param = self.expect(TokenKind::Identifier)?;
            self.expect(TokenKind::Equals)?;
            let value = self.expect_number()?;
            overrides.push(Assignment {
                name: param.text,
                value,
                line: param.line,
            });
        }
        self.advance()?;

        if overrides.is_empty() {
            return Err(IslmError::parse(
                line,
                format!("scenario '{}' overrides no parameters", name),
            ));
        }

        Ok(ScenarioDef {
            name,
            overrides,
            line,
        })
    }
}
