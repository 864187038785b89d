//! Syntax tree for mustache-style templates
//!
//! The tree is read-only for rules. Every node carries the byte span it was
//! parsed from, so rules can quote the original text and build fixes against
//! the original buffer without re-printing anything.
//!
//! Rules do not downcast concrete node types. They receive a [`NodeRef`], match
//! on its variant (or its [`NodeKind`] tag) and read the node through the
//! [`SyntaxNode`] and [`HelperCall`] capability traits.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Byte range in the template source
pub type Span = Range<usize>;

/// Tag identifying the variant of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Template,
    Text,
    Comment,
    MustacheComment,
    Mustache,
    Block,
    SubExpression,
    Element,
    Attribute,
    ElementModifier,
    Path,
    Literal,
}

/// Capabilities shared by every node
pub trait SyntaxNode {
    fn kind(&self) -> NodeKind;
    fn span(&self) -> Span;
}

/// Capabilities of the call-bearing nodes: `{{#helper}}`, `{{helper}}`,
/// `(helper)` and element modifiers
pub trait HelperCall {
    /// Callee expression (normally a path)
    fn path(&self) -> &Expression;

    /// Positional arguments in source order
    fn params(&self) -> &[Expression];

    /// Named arguments in source order
    fn hash(&self) -> &[HashPair];

    /// Name of the callee when it is a plain path
    fn helper_name(&self) -> Option<&str> {
        self.path().as_path().map(|path| path.original.as_str())
    }
}

/// Root of a parsed template
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub body: Vec<Statement>,
    pub span: Span,
}

/// Content-level node
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Text(TextNode),
    /// `<!-- ... -->`
    Comment(CommentNode),
    /// `{{! ... }}` or `{{!-- ... --}}`
    MustacheComment(CommentNode),
    Mustache(MustacheNode),
    Block(BlockNode),
    Element(ElementNode),
}

/// Literal text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub chars: String,
    pub span: Span,
}

/// HTML or mustache comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentNode {
    pub value: String,
    pub span: Span,
}

/// Inline interpolation: `{{helper params hash}}` or `{{{unescaped}}}`
#[derive(Debug, Clone, PartialEq)]
pub struct MustacheNode {
    pub path: Expression,
    pub params: Vec<Expression>,
    pub hash: Vec<HashPair>,
    /// `{{{ }}}` form
    pub trusting: bool,
    pub span: Span,
}

/// Block invocation: `{{#helper ...}} program {{else}} inverse {{/helper}}`
#[derive(Debug, Clone, PartialEq)]
pub struct BlockNode {
    pub path: Expression,
    pub params: Vec<Expression>,
    pub hash: Vec<HashPair>,
    pub block_params: Vec<String>,
    /// Opening tag; for a chained segment this is the `{{else helper ...}}` tag
    pub open_span: Span,
    pub program: Body,
    pub inverse: Option<Inverse>,
    /// `None` for chained segments, which share the outermost closing tag
    pub close: Option<CloseTag>,
    /// Produced by `{{else helper ...}}`
    pub chained: bool,
    pub span: Span,
}

/// A run of statements with the span it covers
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub body: Vec<Statement>,
    pub span: Span,
}

/// The `{{else}}` part of a block
#[derive(Debug, Clone, PartialEq)]
pub struct Inverse {
    /// The `{{else}}` tag, or the `{{else helper ...}}` tag of a chain
    pub else_span: Span,
    pub body: Body,
    /// When set, `body` holds exactly one chained [`BlockNode`]
    pub chained: bool,
}

/// `{{/helper}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseTag {
    pub span: Span,
    pub path_span: Span,
}

/// Element or component invocation: `<Tag attr=... @arg=... {{modifier}}>`
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag: String,
    pub tag_span: Span,
    pub attributes: Vec<AttrNode>,
    pub modifiers: Vec<ElementModifier>,
    pub comments: Vec<CommentNode>,
    pub block_params: Vec<String>,
    pub children: Vec<Statement>,
    pub self_closing: bool,
    pub open_span: Span,
    pub close_span: Option<Span>,
    pub span: Span,
}

/// Attribute or `@`-prefixed argument in an opening tag
#[derive(Debug, Clone, PartialEq)]
pub struct AttrNode {
    pub name: String,
    pub name_span: Span,
    pub value: AttrValue,
    pub span: Span,
}

/// Value of an attribute
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// `disabled`, `...attributes`
    Valueless,
    /// `"text"` or unquoted text; the span includes quotes
    Text(TextNode),
    /// `={{expr}}`
    Mustache(MustacheNode),
    /// `"text {{expr}} text"`
    Concat(ConcatNode),
}

/// Quoted attribute value with interpolations
#[derive(Debug, Clone, PartialEq)]
pub struct ConcatNode {
    pub parts: Vec<ConcatPart>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConcatPart {
    Text(TextNode),
    Mustache(MustacheNode),
}

/// `{{modifier ...}}` inside an opening tag
#[derive(Debug, Clone, PartialEq)]
pub struct ElementModifier {
    pub path: Expression,
    pub params: Vec<Expression>,
    pub hash: Vec<HashPair>,
    pub span: Span,
}

/// Expression-level node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Path(PathExpression),
    Literal(Literal),
    SubExpression(Box<SubExpressionNode>),
}

/// `this.foo`, `@arg`, `condition`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathExpression {
    pub original: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub value: LiteralValue,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    String(String),
    /// Kept as written
    Number(String),
    Boolean(bool),
    Null,
    Undefined,
}

/// Parenthesized helper call: `(helper params hash)`
#[derive(Debug, Clone, PartialEq)]
pub struct SubExpressionNode {
    pub path: Expression,
    pub params: Vec<Expression>,
    pub hash: Vec<HashPair>,
    pub span: Span,
}

/// `key=value`
#[derive(Debug, Clone, PartialEq)]
pub struct HashPair {
    pub key: String,
    pub value: Expression,
    pub span: Span,
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Path(path) => path.span.clone(),
            Expression::Literal(literal) => literal.span.clone(),
            Expression::SubExpression(sub) => sub.span.clone(),
        }
    }

    pub fn as_path(&self) -> Option<&PathExpression> {
        match self {
            Expression::Path(path) => Some(path),
            _ => None,
        }
    }

    pub fn as_sub_expression(&self) -> Option<&SubExpressionNode> {
        match self {
            Expression::SubExpression(sub) => Some(sub),
            _ => None,
        }
    }

    pub fn is_sub_expression(&self) -> bool {
        matches!(self, Expression::SubExpression(_))
    }
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Text(node) => node.span.clone(),
            Statement::Comment(node) | Statement::MustacheComment(node) => node.span.clone(),
            Statement::Mustache(node) => node.span.clone(),
            Statement::Block(node) => node.span.clone(),
            Statement::Element(node) => node.span.clone(),
        }
    }
}

impl BlockNode {
    /// True when the block continues with `{{else helper ...}}`
    pub fn has_else_chain(&self) -> bool {
        self.inverse.as_ref().is_some_and(|inverse| inverse.chained)
    }
}

impl ElementNode {
    /// `@`-prefixed arguments in source order
    pub fn arguments(&self) -> impl Iterator<Item = &AttrNode> {
        self.attributes.iter().filter(|attr| attr.is_argument())
    }

    pub fn has_argument(&self, name: &str) -> bool {
        self.arguments().any(|attr| attr.argument_name() == Some(name))
    }

    /// Whether a plain (non-`@`) attribute with this name is present
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| attr.name == name)
    }
}

impl AttrNode {
    pub fn is_argument(&self) -> bool {
        self.name.starts_with('@')
    }

    /// Argument name without the `@` sigil
    pub fn argument_name(&self) -> Option<&str> {
        self.name.strip_prefix('@')
    }

    pub fn value_span(&self) -> Option<Span> {
        match &self.value {
            AttrValue::Valueless => None,
            AttrValue::Text(text) => Some(text.span.clone()),
            AttrValue::Mustache(mustache) => Some(mustache.span.clone()),
            AttrValue::Concat(concat) => Some(concat.span.clone()),
        }
    }
}

macro_rules! impl_helper_call {
    ($($node:ty),* $(,)?) => {
        $(
            impl HelperCall for $node {
                fn path(&self) -> &Expression {
                    &self.path
                }

                fn params(&self) -> &[Expression] {
                    &self.params
                }

                fn hash(&self) -> &[HashPair] {
                    &self.hash
                }
            }
        )*
    };
}

impl_helper_call!(MustacheNode, BlockNode, SubExpressionNode, ElementModifier);

macro_rules! impl_syntax_node {
    ($($node:ty => $kind:expr),* $(,)?) => {
        $(
            impl SyntaxNode for $node {
                fn kind(&self) -> NodeKind {
                    $kind
                }

                fn span(&self) -> Span {
                    self.span.clone()
                }
            }
        )*
    };
}

impl_syntax_node!(
    Template => NodeKind::Template,
    TextNode => NodeKind::Text,
    MustacheNode => NodeKind::Mustache,
    BlockNode => NodeKind::Block,
    SubExpressionNode => NodeKind::SubExpression,
    ElementNode => NodeKind::Element,
    AttrNode => NodeKind::Attribute,
    ElementModifier => NodeKind::ElementModifier,
    PathExpression => NodeKind::Path,
    Literal => NodeKind::Literal,
);

/// Borrowed view of any node, handed to rule visitors
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Template(&'a Template),
    Text(&'a TextNode),
    Comment(&'a CommentNode),
    MustacheComment(&'a CommentNode),
    Mustache(&'a MustacheNode),
    Block(&'a BlockNode),
    SubExpression(&'a SubExpressionNode),
    Element(&'a ElementNode),
    Attribute(&'a AttrNode),
    ElementModifier(&'a ElementModifier),
    Path(&'a PathExpression),
    Literal(&'a Literal),
}

impl NodeRef<'_> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Template(_) => NodeKind::Template,
            NodeRef::Text(_) => NodeKind::Text,
            NodeRef::Comment(_) => NodeKind::Comment,
            NodeRef::MustacheComment(_) => NodeKind::MustacheComment,
            NodeRef::Mustache(_) => NodeKind::Mustache,
            NodeRef::Block(_) => NodeKind::Block,
            NodeRef::SubExpression(_) => NodeKind::SubExpression,
            NodeRef::Element(_) => NodeKind::Element,
            NodeRef::Attribute(_) => NodeKind::Attribute,
            NodeRef::ElementModifier(_) => NodeKind::ElementModifier,
            NodeRef::Path(_) => NodeKind::Path,
            NodeRef::Literal(_) => NodeKind::Literal,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            NodeRef::Template(node) => node.span.clone(),
            NodeRef::Text(node) => node.span.clone(),
            NodeRef::Comment(node) | NodeRef::MustacheComment(node) => node.span.clone(),
            NodeRef::Mustache(node) => node.span.clone(),
            NodeRef::Block(node) => node.span.clone(),
            NodeRef::SubExpression(node) => node.span.clone(),
            NodeRef::Element(node) => node.span.clone(),
            NodeRef::Attribute(node) => node.span.clone(),
            NodeRef::ElementModifier(node) => node.span.clone(),
            NodeRef::Path(node) => node.span.clone(),
            NodeRef::Literal(node) => node.span.clone(),
        }
    }
}
