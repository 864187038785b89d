//! Recursive-descent parser for mustache-style templates
//!
//! Produces the span-carrying tree in [`super::ast`]. The parser covers the
//! subset of the template language the lint rules reason about: text,
//! comments, mustaches, blocks with `{{else}}` / `{{else if}}` chains,
//! sub-expressions, literals, hash arguments, and elements with attributes,
//! arguments and modifiers.

use super::ast::*;
use super::source::LineIndex;
use crate::{CurlyError, Result};

/// HTML elements that never have a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Parse a template into a syntax tree
pub fn parse(source: &str) -> Result<Template> {
    Parser::new(source).parse_template()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Top,
    Block,
    Element,
}

/// What follows an opening `{{`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Comment,
    Block,
    Close,
    Else,
    Mustache,
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    index: LineIndex,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            index: LineIndex::new(src),
        }
    }

    fn parse_template(mut self) -> Result<Template> {
        let body = self.parse_statements(Context::Top)?;
        Ok(Template {
            body,
            span: 0..self.src.len(),
        })
    }

    // ------------------------------------------------------------------
    // Cursor helpers
    // ------------------------------------------------------------------

    fn error<T>(&self, message: impl Into<String>, offset: usize) -> Result<T> {
        let (line, column) = self.index.line_col(self.src, offset);
        Err(CurlyError::parse_error(message, line, column))
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn starts_with(&self, pattern: &str) -> bool {
        self.rest().starts_with(pattern)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, pattern: &str) -> bool {
        if self.starts_with(pattern) {
            self.pos += pattern.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, pattern: &str) -> Result<()> {
        if self.eat(pattern) {
            Ok(())
        } else if self.at_end() {
            self.error(format!("Expected `{pattern}` but reached end of input"), self.pos)
        } else {
            self.error(format!("Expected `{pattern}`"), self.pos)
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    /// End offset of the path-like token starting at `from`
    fn scan_token_end(&self, from: usize) -> usize {
        let mut end = from;
        for ch in self.src[from..].chars() {
            if !is_path_char(ch) {
                break;
            }
            end += ch.len_utf8();
        }
        end
    }

    fn tag_kind(&self) -> TagKind {
        let mut rest = &self.rest()[2..];
        rest = rest.strip_prefix('~').unwrap_or(rest);
        if rest.starts_with('!') {
            return TagKind::Comment;
        }
        if rest.starts_with('#') {
            return TagKind::Block;
        }
        if rest.starts_with('/') {
            return TagKind::Close;
        }
        let trimmed = rest.trim_start();
        if let Some(after) = trimmed.strip_prefix("else")
            && after
                .chars()
                .next()
                .is_some_and(|ch| ch.is_whitespace() || ch == '~' || ch == '}')
        {
            return TagKind::Else;
        }
        TagKind::Mustache
    }

    fn at_tag_start(&self) -> bool {
        let mut chars = self.rest().chars();
        chars.next() == Some('<')
            && chars
                .next()
                .is_some_and(|ch| ch.is_ascii_alphabetic() || ch == ':' || ch == '@')
    }

    fn at_text_boundary(&self) -> bool {
        self.starts_with("{{") || self.starts_with("</") || self.starts_with("<!--") || self.at_tag_start()
    }

    fn at_mustache_end(&self) -> bool {
        self.starts_with("}}") || self.starts_with("~}}")
    }

    /// `as |` at the cursor, ignoring whitespace
    fn at_block_params(&self) -> bool {
        let rest = self.rest();
        rest.strip_prefix("as")
            .filter(|after| after.starts_with(char::is_whitespace))
            .is_some_and(|after| after.trim_start().starts_with('|'))
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// Parse statements until end of input or a terminator the caller owns
    fn parse_statements(&mut self, context: Context) -> Result<Vec<Statement>> {
        let mut body = Vec::new();

        while !self.at_end() {
            if self.starts_with("{{") {
                match self.tag_kind() {
                    TagKind::Comment => {
                        body.push(Statement::MustacheComment(self.parse_mustache_comment()?))
                    }
                    TagKind::Block => body.push(Statement::Block(self.parse_block()?)),
                    TagKind::Mustache => body.push(Statement::Mustache(self.parse_mustache()?)),
                    TagKind::Close if context == Context::Top => {
                        return self.error("Closing tag without a matching block", self.pos);
                    }
                    TagKind::Else if context == Context::Top => {
                        return self.error("`{{else}}` outside of a block", self.pos);
                    }
                    TagKind::Close | TagKind::Else => return Ok(body),
                }
            } else if self.starts_with("<!--") {
                body.push(Statement::Comment(self.parse_html_comment()?));
            } else if self.starts_with("</") {
                if context == Context::Top {
                    return self.error("Closing tag without a matching element", self.pos);
                }
                return Ok(body);
            } else if self.at_tag_start() {
                body.push(Statement::Element(self.parse_element()?));
            } else {
                body.push(Statement::Text(self.parse_text()));
            }
        }

        Ok(body)
    }

    fn parse_body(&mut self, context: Context) -> Result<Body> {
        let start = self.pos;
        let body = self.parse_statements(context)?;
        Ok(Body {
            body,
            span: start..self.pos,
        })
    }

    fn parse_text(&mut self) -> TextNode {
        let start = self.pos;
        self.bump();
        while !self.at_end() && !self.at_text_boundary() {
            self.bump();
        }
        TextNode {
            chars: self.src[start..self.pos].to_string(),
            span: start..self.pos,
        }
    }

    fn parse_html_comment(&mut self) -> Result<CommentNode> {
        let start = self.pos;
        self.expect("<!--")?;
        let Some(len) = self.rest().find("-->") else {
            return self.error("Unclosed comment", start);
        };
        let value = self.rest()[..len].to_string();
        self.pos += len + 3;
        Ok(CommentNode {
            value,
            span: start..self.pos,
        })
    }

    fn parse_mustache_comment(&mut self) -> Result<CommentNode> {
        let start = self.pos;
        self.expect("{{")?;
        self.eat("~");
        self.expect("!")?;
        let long_form = self.eat("--");
        let terminator = if long_form { "--" } else { "" };

        let value_start = self.pos;
        loop {
            if self.at_end() {
                return self.error("Unclosed comment", start);
            }
            let rest = self.rest();
            if let Some(after) = rest.strip_prefix(terminator) {
                let after = after.strip_prefix('~').unwrap_or(after);
                if after.starts_with("}}") {
                    let value = self.src[value_start..self.pos].to_string();
                    self.pos = self.src.len() - after.len() + 2;
                    return Ok(CommentNode {
                        value,
                        span: start..self.pos,
                    });
                }
            }
            self.bump();
        }
    }

    // ------------------------------------------------------------------
    // Mustaches and blocks
    // ------------------------------------------------------------------

    fn parse_mustache(&mut self) -> Result<MustacheNode> {
        let start = self.pos;
        self.expect("{{")?;
        let trusting = self.eat("{");
        self.eat("~");
        self.skip_whitespace();

        let path = self.parse_expression()?;
        let (params, hash) = self.parse_params_and_hash(false)?;

        self.skip_whitespace();
        self.eat("~");
        if trusting {
            self.expect("}}}")?;
        } else {
            self.expect("}}")?;
        }

        Ok(MustacheNode {
            path,
            params,
            hash,
            trusting,
            span: start..self.pos,
        })
    }

    fn parse_block(&mut self) -> Result<BlockNode> {
        let start = self.pos;
        self.expect("{{")?;
        self.eat("~");
        self.expect("#")?;
        self.skip_whitespace();

        let path = self.parse_expression()?;
        let Some(name) = path.as_path().map(|path| path.original.clone()) else {
            return self.error("Block helper name must be a path", path.span().start);
        };
        let (params, hash) = self.parse_params_and_hash(true)?;
        let block_params = self.parse_block_params()?;
        self.skip_whitespace();
        self.eat("~");
        self.expect("}}")?;
        let open_span = start..self.pos;

        let (program, inverse, close) = self.parse_block_rest(&name, start)?;
        let end = close.span.end;

        Ok(BlockNode {
            path,
            params,
            hash,
            block_params,
            open_span,
            program,
            inverse,
            close: Some(close),
            chained: false,
            span: start..end,
        })
    }

    /// Program, optional inverse and the closing tag of the block opened at `opener`
    fn parse_block_rest(
        &mut self,
        name: &str,
        opener: usize,
    ) -> Result<(Body, Option<Inverse>, CloseTag)> {
        let program = self.parse_body(Context::Block)?;

        if !self.starts_with("{{") {
            return self.error(format!("Unclosed block `{{{{#{name}}}}}`"), opener);
        }

        if self.tag_kind() == TagKind::Close {
            let close = self.parse_close_tag(name)?;
            return Ok((program, None, close));
        }

        let else_start = self.pos;
        self.expect("{{")?;
        self.eat("~");
        self.skip_whitespace();
        self.expect("else")?;
        self.skip_whitespace();

        if self.at_mustache_end() {
            self.eat("~");
            self.expect("}}")?;
            let else_span = else_start..self.pos;
            let body = self.parse_body(Context::Block)?;

            if !self.starts_with("{{") {
                return self.error(format!("Unclosed block `{{{{#{name}}}}}`"), opener);
            }
            if self.tag_kind() != TagKind::Close {
                return self.error("Unexpected `{{else}}` after the final `{{else}}`", self.pos);
            }
            let close = self.parse_close_tag(name)?;
            return Ok((
                program,
                Some(Inverse {
                    else_span,
                    body,
                    chained: false,
                }),
                close,
            ));
        }

        // `{{else helper ...}}` starts a chained segment that shares our closing tag
        let path = self.parse_expression()?;
        let (params, hash) = self.parse_params_and_hash(true)?;
        let block_params = self.parse_block_params()?;
        self.skip_whitespace();
        self.eat("~");
        self.expect("}}")?;
        let open_span = else_start..self.pos;

        let (chained_program, chained_inverse, close) = self.parse_block_rest(name, opener)?;
        let chained_span = else_start..close.span.start;

        let chained = BlockNode {
            path,
            params,
            hash,
            block_params,
            open_span: open_span.clone(),
            program: chained_program,
            inverse: chained_inverse,
            close: None,
            chained: true,
            span: chained_span.clone(),
        };

        Ok((
            program,
            Some(Inverse {
                else_span: open_span,
                body: Body {
                    body: vec![Statement::Block(chained)],
                    span: chained_span,
                },
                chained: true,
            }),
            close,
        ))
    }

    fn parse_close_tag(&mut self, name: &str) -> Result<CloseTag> {
        let start = self.pos;
        self.expect("{{")?;
        self.eat("~");
        self.expect("/")?;
        self.skip_whitespace();

        let path_start = self.pos;
        let path_end = self.scan_token_end(path_start);
        let found = &self.src[path_start..path_end];
        if found != name {
            return self.error(
                format!("`{{{{/{found}}}}}` does not match `{{{{#{name}}}}}`"),
                start,
            );
        }
        self.pos = path_end;

        self.skip_whitespace();
        self.eat("~");
        self.expect("}}")?;

        Ok(CloseTag {
            span: start..self.pos,
            path_span: path_start..path_end,
        })
    }

    /// `as |a b|`; empty when absent
    fn parse_block_params(&mut self) -> Result<Vec<String>> {
        let checkpoint = self.pos;
        self.skip_whitespace();
        if !self.at_block_params() {
            self.pos = checkpoint;
            return Ok(Vec::new());
        }

        self.expect("as")?;
        self.skip_whitespace();
        self.expect("|")?;

        let mut names = Vec::new();
        loop {
            self.skip_whitespace();
            if self.eat("|") {
                return Ok(names);
            }
            let start = self.pos;
            let end = self.scan_token_end(start);
            if end == start {
                return self.error("Invalid block parameter", start);
            }
            names.push(self.src[start..end].to_string());
            self.pos = end;
        }
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    /// Positional and named arguments up to the end of the enclosing call
    fn parse_params_and_hash(
        &mut self,
        allow_block_params: bool,
    ) -> Result<(Vec<Expression>, Vec<HashPair>)> {
        let mut params = Vec::new();
        let mut hash = Vec::new();

        loop {
            self.skip_whitespace();
            if self.at_end() {
                return self.error("Unclosed expression", self.pos);
            }
            if self.at_mustache_end() || self.starts_with(")") || self.starts_with("}}}") {
                break;
            }
            if allow_block_params && self.at_block_params() {
                break;
            }

            let token_end = self.scan_token_end(self.pos);
            if token_end > self.pos && self.src[token_end..].starts_with('=') {
                let start = self.pos;
                let key = self.src[start..token_end].to_string();
                self.pos = token_end + 1;
                let value = self.parse_expression()?;
                hash.push(HashPair {
                    key,
                    span: start..value.span().end,
                    value,
                });
            } else if !hash.is_empty() {
                return self.error("Positional argument after named arguments", self.pos);
            } else {
                params.push(self.parse_expression()?);
            }
        }

        Ok((params, hash))
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        let start = self.pos;
        match self.peek() {
            Some('(') => self.parse_sub_expression(),
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let mut value = String::new();
                loop {
                    match self.bump() {
                        None => return self.error("Unterminated string literal", start),
                        Some('\\') => {
                            if let Some(escaped) = self.bump() {
                                value.push(escaped);
                            }
                        }
                        Some(ch) if ch == quote => break,
                        Some(ch) => value.push(ch),
                    }
                }
                Ok(Expression::Literal(Literal {
                    value: LiteralValue::String(value),
                    span: start..self.pos,
                }))
            }
            _ => {
                let end = self.scan_token_end(start);
                if end == start {
                    return self.error("Expected an expression", start);
                }
                self.pos = end;
                let token = &self.src[start..end];
                let span = start..end;

                let literal = match token {
                    "true" => Some(LiteralValue::Boolean(true)),
                    "false" => Some(LiteralValue::Boolean(false)),
                    "null" => Some(LiteralValue::Null),
                    "undefined" => Some(LiteralValue::Undefined),
                    _ if is_number(token) => Some(LiteralValue::Number(token.to_string())),
                    _ => None,
                };

                Ok(match literal {
                    Some(value) => Expression::Literal(Literal { value, span }),
                    None => Expression::Path(PathExpression {
                        original: token.to_string(),
                        span,
                    }),
                })
            }
        }
    }

    fn parse_sub_expression(&mut self) -> Result<Expression> {
        let start = self.pos;
        self.expect("(")?;
        self.skip_whitespace();
        let path = self.parse_expression()?;
        let (params, hash) = self.parse_params_and_hash(false)?;
        self.skip_whitespace();
        self.expect(")")?;

        Ok(Expression::SubExpression(Box::new(SubExpressionNode {
            path,
            params,
            hash,
            span: start..self.pos,
        })))
    }

    // ------------------------------------------------------------------
    // Elements
    // ------------------------------------------------------------------

    fn parse_element(&mut self) -> Result<ElementNode> {
        let start = self.pos;
        self.expect("<")?;

        let tag_start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == '>' || self.starts_with("/>") {
                break;
            }
            self.bump();
        }
        let tag = self.src[tag_start..self.pos].to_string();
        let tag_span = tag_start..self.pos;

        let mut attributes = Vec::new();
        let mut modifiers = Vec::new();
        let mut comments = Vec::new();
        let mut block_params = Vec::new();

        let self_closing = loop {
            self.skip_whitespace();
            if self.at_end() {
                return self.error(format!("Unclosed opening tag `<{tag}>`"), start);
            }
            if self.eat("/>") {
                break true;
            }
            if self.eat(">") {
                break false;
            }
            if self.starts_with("{{") {
                match self.tag_kind() {
                    TagKind::Comment => comments.push(self.parse_mustache_comment()?),
                    TagKind::Mustache => {
                        let modifier = self.parse_mustache()?;
                        modifiers.push(ElementModifier {
                            path: modifier.path,
                            params: modifier.params,
                            hash: modifier.hash,
                            span: modifier.span,
                        });
                    }
                    _ => return self.error("Blocks are not allowed inside an opening tag", self.pos),
                }
                continue;
            }
            if self.at_block_params() {
                block_params = self.parse_block_params()?;
                continue;
            }
            attributes.push(self.parse_attribute()?);
        };
        let open_span = start..self.pos;

        if self_closing || VOID_ELEMENTS.contains(&tag.as_str()) {
            return Ok(ElementNode {
                tag,
                tag_span,
                attributes,
                modifiers,
                comments,
                block_params,
                children: Vec::new(),
                self_closing,
                span: open_span.clone(),
                open_span,
                close_span: None,
            });
        }

        let children = self.parse_statements(Context::Element)?;
        if !self.starts_with("</") {
            return self.error(format!("Unclosed element `<{tag}>`"), start);
        }

        let close_start = self.pos;
        self.expect("</")?;
        let Some(len) = self.rest().find('>') else {
            return self.error(format!("Unclosed element `<{tag}>`"), start);
        };
        let found = self.rest()[..len].trim();
        if found != tag {
            return self.error(
                format!("Closing tag `</{found}>` does not match `<{tag}>`"),
                close_start,
            );
        }
        self.pos += len + 1;

        Ok(ElementNode {
            tag,
            tag_span,
            attributes,
            modifiers,
            comments,
            block_params,
            children,
            self_closing,
            open_span,
            close_span: Some(close_start..self.pos),
            span: start..self.pos,
        })
    }

    fn parse_attribute(&mut self) -> Result<AttrNode> {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_whitespace()
                || matches!(ch, '=' | '>' | '"' | '\'')
                || self.starts_with("/>")
                || self.starts_with("{{")
            {
                break;
            }
            self.bump();
        }
        if self.pos == start {
            return self.error("Expected an attribute name", start);
        }
        let name = self.src[start..self.pos].to_string();
        let name_span = start..self.pos;

        let after_name = self.pos;
        self.skip_whitespace();
        if !self.eat("=") {
            self.pos = after_name;
            return Ok(AttrNode {
                name,
                name_span,
                value: AttrValue::Valueless,
                span: start..after_name,
            });
        }
        self.skip_whitespace();

        let value = match self.peek() {
            Some('"' | '\'') => self.parse_quoted_value()?,
            Some(_) if self.starts_with("{{") => AttrValue::Mustache(self.parse_mustache()?),
            Some(_) => {
                let value_start = self.pos;
                while let Some(ch) = self.peek() {
                    if ch.is_whitespace() || ch == '>' || self.starts_with("/>") {
                        break;
                    }
                    self.bump();
                }
                AttrValue::Text(TextNode {
                    chars: self.src[value_start..self.pos].to_string(),
                    span: value_start..self.pos,
                })
            }
            None => return self.error(format!("Missing value for `{name}`"), start),
        };

        Ok(AttrNode {
            name,
            name_span,
            value,
            span: start..self.pos,
        })
    }

    fn parse_quoted_value(&mut self) -> Result<AttrValue> {
        let start = self.pos;
        let Some(quote) = self.bump() else {
            return self.error("Expected a quoted value", start);
        };

        let mut parts = Vec::new();
        let mut has_mustache = false;
        let mut text_start = self.pos;

        loop {
            if self.at_end() {
                return self.error("Unterminated attribute value", start);
            }
            if self.peek() == Some(quote) || self.starts_with("{{") {
                if self.pos > text_start {
                    parts.push(ConcatPart::Text(TextNode {
                        chars: self.src[text_start..self.pos].to_string(),
                        span: text_start..self.pos,
                    }));
                }
                if self.eat(&quote.to_string()) {
                    break;
                }
                has_mustache = true;
                parts.push(ConcatPart::Mustache(self.parse_mustache()?));
                text_start = self.pos;
                continue;
            }
            self.bump();
        }

        let span = start..self.pos;
        if has_mustache {
            Ok(AttrValue::Concat(ConcatNode { parts, span }))
        } else {
            Ok(AttrValue::Text(TextNode {
                chars: self.src[start + 1..self.pos - 1].to_string(),
                span,
            }))
        }
    }
}

fn is_path_char(ch: char) -> bool {
    !ch.is_whitespace()
        && !matches!(
            ch,
            '=' | '(' | ')' | '{' | '}' | '|' | '~' | '"' | '\'' | '<' | '>'
        )
}

fn is_number(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    digits.starts_with(|ch: char| ch.is_ascii_digit()) && digits.parse::<f64>().is_ok()
}
