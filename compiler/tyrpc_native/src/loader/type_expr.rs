//! Type expressions used by package manifests.
//!
//! Grammar (source language spelling):
//!
//! ```text
//! expr := "..." expr            variadic, last parameter only
//!       | "*" expr
//!       | "[]" expr
//!       | "map[" expr "]" expr
//!       | "interface{}"
//!       | ident ("." ident)?
//! ```

use crate::LoadError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TypeExpr {
    Name(String),
    Qualified { package: String, name: String },
    Pointer(Box<TypeExpr>),
    Slice(Box<TypeExpr>),
    Map(Box<TypeExpr>, Box<TypeExpr>),
    EmptyInterface,
    Variadic(Box<TypeExpr>),
}

impl TypeExpr {
    /// The identifier an embedded field of this type is named after.
    pub(crate) fn base_name(&self) -> Option<&str> {
        match self {
            TypeExpr::Name(name) | TypeExpr::Qualified { name, .. } => Some(name),
            TypeExpr::Pointer(inner) => inner.base_name(),
            _ => None,
        }
    }
}

pub(crate) fn parse_type_expr(src: &str) -> Result<TypeExpr, LoadError> {
    let mut parser = Parser { src, pos: 0 };
    let expr = parser.expr(true)?;
    parser.skip_ws();
    if parser.pos < src.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(expr)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.src[self.pos..]
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn error(&self, message: &str) -> LoadError {
        LoadError::TypeExpr {
            expr: self.src.to_string(),
            offset: self.pos,
            message: message.to_string(),
        }
    }

    fn expr(&mut self, top_level: bool) -> Result<TypeExpr, LoadError> {
        if self.eat("...") {
            if !top_level {
                return Err(self.error("`...` is only allowed on a parameter type"));
            }
            return Ok(TypeExpr::Variadic(Box::new(self.expr(false)?)));
        }
        if self.eat("*") {
            return Ok(TypeExpr::Pointer(Box::new(self.expr(false)?)));
        }
        if self.eat("[") {
            if !self.eat("]") {
                return Err(self.error("fixed-size arrays are not supported"));
            }
            return Ok(TypeExpr::Slice(Box::new(self.expr(false)?)));
        }

        let ident = self.ident()?;
        match ident.as_str() {
            "map" => {
                if !self.eat("[") {
                    return Err(self.error("expected `[` after `map`"));
                }
                let key = self.expr(false)?;
                if !self.eat("]") {
                    return Err(self.error("expected `]` after map key"));
                }
                let value = self.expr(false)?;
                Ok(TypeExpr::Map(Box::new(key), Box::new(value)))
            }
            "interface" => {
                if self.eat("{") && self.eat("}") {
                    Ok(TypeExpr::EmptyInterface)
                } else {
                    Err(self.error("only the empty interface can be written inline"))
                }
            }
            _ => {
                if self.rest().starts_with('.') {
                    self.pos += 1;
                    let name = self.ident()?;
                    Ok(TypeExpr::Qualified {
                        package: ident,
                        name,
                    })
                } else {
                    Ok(TypeExpr::Name(ident))
                }
            }
        }
    }

    fn ident(&mut self) -> Result<String, LoadError> {
        self.skip_ws();
        let rest = self.rest();
        let len = rest
            .char_indices()
            .find(|&(_, c)| !(c.is_alphanumeric() || c == '_'))
            .map_or(rest.len(), |(i, _)| i);

        if len == 0 || rest.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(self.error("expected a type name"));
        }

        let ident = rest[..len].to_string();
        self.pos += len;
        Ok(ident)
    }
}
