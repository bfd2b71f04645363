use std::{fmt::Display, mem};

use super::visitor::Visitor;

/// Expression Types
///
/// Defines the kinds of nodes an expression tree is built from.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum ExprType {
    Literal,
    Unary,
    Binary,
}

impl Display for ExprType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprType::Literal => write!(f, "literal"),
            ExprType::Unary => write!(f, "unary"),
            ExprType::Binary => write!(f, "binary"),
        }
    }
}

/// Literal Expression
/// Represents an integer literal in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralExpr {
    pub value: i64,
}

/// Unary Expression
/// Represents a prefix operator applied to one operand.
#[derive(Debug, PartialEq, Eq)]
pub struct UnaryExpr {
    pub operator: String,
    pub operand: Box<Expr>,
}

/// Binary Expression
/// Represents an infix operator applied to two operands.
#[derive(Debug, PartialEq, Eq)]
pub struct BinaryExpr {
    pub operator: String,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

/// An expression tree.
///
/// Every node exclusively owns its children, so a tree is finite and acyclic
/// by construction. Trees are built once by a parse engine and only read
/// afterwards.
///
/// Equality and dropping walk the tree with an explicit worklist, so trees
/// of any depth can be compared and freed.
#[derive(Debug)]
pub enum Expr {
    Literal(LiteralExpr),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
}

impl Expr {
    pub fn literal(value: i64) -> Self {
        Expr::Literal(LiteralExpr { value })
    }

    pub fn unary(operator: impl Into<String>, operand: Expr) -> Self {
        Expr::Unary(UnaryExpr {
            operator: operator.into(),
            operand: Box::new(operand),
        })
    }

    pub fn binary(operator: impl Into<String>, left: Expr, right: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Returns the expression type of the expression.
    pub fn get_expr_type(&self) -> ExprType {
        match self {
            Expr::Literal(_) => ExprType::Literal,
            Expr::Unary(_) => ExprType::Unary,
            Expr::Binary(_) => ExprType::Binary,
        }
    }

    /// Moves the children of this node onto `pending`, leaving leaves behind.
    fn take_children(&mut self, pending: &mut Vec<Expr>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Unary(node) => pending.push(mem::replace(&mut *node.operand, Expr::literal(0))),
            Expr::Binary(node) => {
                pending.push(mem::replace(&mut *node.left, Expr::literal(0)));
                pending.push(mem::replace(&mut *node.right, Expr::literal(0)));
            }
        }
    }

    /// Routes the node to the matching visitor operation.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::Literal(node) => visitor.visit_literal(node),
            Expr::Unary(node) => visitor.visit_unary(node),
            Expr::Binary(node) => visitor.visit_binary(node),
        }
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        let mut pending: Vec<(&Expr, &Expr)> = vec![(self, other)];

        while let Some(pair) = pending.pop() {
            match pair {
                (Expr::Literal(left), Expr::Literal(right)) => {
                    if left != right {
                        return false;
                    }
                }
                (Expr::Unary(left), Expr::Unary(right)) => {
                    if left.operator != right.operator {
                        return false;
                    }
                    pending.push((&*left.operand, &*right.operand));
                }
                (Expr::Binary(left), Expr::Binary(right)) => {
                    if left.operator != right.operator {
                        return false;
                    }
                    pending.push((&*left.left, &*right.left));
                    pending.push((&*left.right, &*right.right));
                }
                _ => return false,
            }
        }

        true
    }
}

impl Eq for Expr {}

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);

        // each popped node has its children detached before it is freed
        while let Some(mut expr) = pending.pop() {
            expr.take_children(&mut pending);
        }
    }
}
