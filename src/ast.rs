use std::fmt;
use std::mem;

use crate::token::Operator;

/// Leaf operand of an expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Integer(i64),
    Variable(String),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Integer(value) => write!(f, "{}", value),
            Term::Variable(name) => f.write_str(name),
        }
    }
}

/// Syntax tree node. Each variant fixes its own arity, so an `Assignment`
/// always has one child and an `Expression` always has two.
/// Parentheses only shape the tree and never show up as nodes.
///
/// Operator chains fold to the left without any depth limit, so dropping
/// and printing walk the tree with an explicit stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ASTNode {
    Program {
        statements: Vec<ASTNode>,
    },
    Assignment {
        target: String,
        expr: Box<ASTNode>,
    },
    Expression {
        op: Operator,
        left: Box<ASTNode>,
        right: Box<ASTNode>,
    },
    Term(Term),
}

impl ASTNode {
    pub fn integer(value: i64) -> Self {
        ASTNode::Term(Term::Integer(value))
    }

    pub fn variable(name: &str) -> Self {
        ASTNode::Term(Term::Variable(name.to_string()))
    }

    pub fn binary(op: Operator, left: ASTNode, right: ASTNode) -> Self {
        ASTNode::Expression {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn assign(target: &str, expr: ASTNode) -> Self {
        ASTNode::Assignment {
            target: target.to_string(),
            expr: Box::new(expr),
        }
    }

    /// Moves every child onto `pending`, leaving leaf placeholders behind.
    fn detach_children(&mut self, pending: &mut Vec<ASTNode>) {
        match self {
            ASTNode::Program { statements } => pending.append(statements),
            ASTNode::Assignment { expr, .. } => pending.push(take_boxed(expr)),
            ASTNode::Expression { left, right, .. } => {
                pending.push(take_boxed(left));
                pending.push(take_boxed(right));
            }
            ASTNode::Term(_) => {}
        }
    }
}

fn take_boxed(node: &mut Box<ASTNode>) -> ASTNode {
    mem::replace(&mut **node, ASTNode::integer(0))
}

impl Drop for ASTNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

const INDENT: &str = "\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t\t";

fn write_indent(f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
    let mut remaining = level;
    while remaining > 0 {
        let n = remaining.min(INDENT.len());
        f.write_str(&INDENT[..n])?;
        remaining -= n;
    }
    Ok(())
}

/// Renders one node per line as `Type: value`, children indented by one
/// tab per level.
impl fmt::Display for ASTNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: Vec<(&ASTNode, usize)> = vec![(self, 0)];
        while let Some((node, level)) = stack.pop() {
            write_indent(f, level)?;
            match node {
                ASTNode::Program { statements } => {
                    writeln!(f, "Program")?;
                    stack.extend(statements.iter().rev().map(|s| (s, level + 1)));
                }
                ASTNode::Assignment { target, expr } => {
                    writeln!(f, "Assignment: {}", target)?;
                    stack.push((&**expr, level + 1));
                }
                ASTNode::Expression { op, left, right } => {
                    writeln!(f, "Expression: {}", op)?;
                    stack.push((&**right, level + 1));
                    stack.push((&**left, level + 1));
                }
                ASTNode::Term(term) => writeln!(f, "Term: {}", term)?,
            }
        }
        Ok(())
    }
}
