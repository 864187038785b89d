//! Depth-first traversal over a parsed template

use super::ast::*;

/// Visit every node of `template` in document order, parents before children
pub fn walk<'a>(template: &'a Template, visit: &mut impl FnMut(NodeRef<'a>)) {
    visit(NodeRef::Template(template));
    walk_statements(&template.body, visit);
}

fn walk_statements<'a>(statements: &'a [Statement], visit: &mut impl FnMut(NodeRef<'a>)) {
    for statement in statements {
        walk_statement(statement, visit);
    }
}

fn walk_statement<'a>(statement: &'a Statement, visit: &mut impl FnMut(NodeRef<'a>)) {
    match statement {
        Statement::Text(text) => visit(NodeRef::Text(text)),
        Statement::Comment(comment) => visit(NodeRef::Comment(comment)),
        Statement::MustacheComment(comment) => visit(NodeRef::MustacheComment(comment)),
        Statement::Mustache(mustache) => walk_mustache(mustache, visit),
        Statement::Block(block) => {
            visit(NodeRef::Block(block));
            walk_call(block, visit);
            walk_statements(&block.program.body, visit);
            if let Some(inverse) = &block.inverse {
                walk_statements(&inverse.body.body, visit);
            }
        }
        Statement::Element(element) => walk_element(element, visit),
    }
}

fn walk_mustache<'a>(mustache: &'a MustacheNode, visit: &mut impl FnMut(NodeRef<'a>)) {
    visit(NodeRef::Mustache(mustache));
    walk_call(mustache, visit);
}

fn walk_element<'a>(element: &'a ElementNode, visit: &mut impl FnMut(NodeRef<'a>)) {
    visit(NodeRef::Element(element));

    for attribute in &element.attributes {
        visit(NodeRef::Attribute(attribute));
        match &attribute.value {
            AttrValue::Valueless => {}
            AttrValue::Text(text) => visit(NodeRef::Text(text)),
            AttrValue::Mustache(mustache) => walk_mustache(mustache, visit),
            AttrValue::Concat(concat) => {
                for part in &concat.parts {
                    match part {
                        ConcatPart::Text(text) => visit(NodeRef::Text(text)),
                        ConcatPart::Mustache(mustache) => walk_mustache(mustache, visit),
                    }
                }
            }
        }
    }

    for modifier in &element.modifiers {
        visit(NodeRef::ElementModifier(modifier));
        walk_call(modifier, visit);
    }

    for comment in &element.comments {
        visit(NodeRef::MustacheComment(comment));
    }

    walk_statements(&element.children, visit);
}

/// Callee, positional arguments, then named argument values
fn walk_call<'a, C: HelperCall>(call: &'a C, visit: &mut impl FnMut(NodeRef<'a>)) {
    walk_expression(call.path(), visit);
    for param in call.params() {
        walk_expression(param, visit);
    }
    for pair in call.hash() {
        walk_expression(&pair.value, visit);
    }
}

fn walk_expression<'a>(expression: &'a Expression, visit: &mut impl FnMut(NodeRef<'a>)) {
    match expression {
        Expression::Path(path) => visit(NodeRef::Path(path)),
        Expression::Literal(literal) => visit(NodeRef::Literal(literal)),
        Expression::SubExpression(sub) => {
            visit(NodeRef::SubExpression(sub));
            walk_call(sub.as_ref(), visit);
        }
    }
}
