use crate::ast::{
    ast::{BinaryExpr, Expr, ExprType, LiteralExpr, UnaryExpr},
    visitor::Visitor,
};

/// Prints a tree as an S expression: `(** 2 (- 3))`.
pub struct SExprPrinter;

impl Visitor for SExprPrinter {
    type Output = String;

    fn visit_binary(&mut self, node: &BinaryExpr) -> String {
        format!(
            "({} {} {})",
            node.operator,
            node.left.accept(self),
            node.right.accept(self)
        )
    }

    fn visit_unary(&mut self, node: &UnaryExpr) -> String {
        format!("({} {})", node.operator, node.operand.accept(self))
    }

    fn visit_literal(&mut self, node: &LiteralExpr) -> String {
        node.value.to_string()
    }

    fn visit_other(&mut self, expr_type: ExprType) -> String {
        format!("<{}>", expr_type)
    }
}

/// Prints a tree as fully parenthesised infix text: `(2 ** (-3))`.
///
/// Every composite node is wrapped in parentheses, so tokenizing and parsing
/// the output gives back an equal tree whatever the operator precedences are.
pub struct CanonicalPrinter;

impl Visitor for CanonicalPrinter {
    type Output = String;

    fn visit_binary(&mut self, node: &BinaryExpr) -> String {
        format!(
            "({} {} {})",
            node.left.accept(self),
            node.operator,
            node.right.accept(self)
        )
    }

    fn visit_unary(&mut self, node: &UnaryExpr) -> String {
        format!("({}{})", node.operator, node.operand.accept(self))
    }

    fn visit_literal(&mut self, node: &LiteralExpr) -> String {
        node.value.to_string()
    }

    fn visit_other(&mut self, expr_type: ExprType) -> String {
        format!("<{}>", expr_type)
    }
}

pub fn to_sexpr(expr: &Expr) -> String {
    expr.accept(&mut SExprPrinter)
}

pub fn to_canonical(expr: &Expr) -> String {
    expr.accept(&mut CanonicalPrinter)
}
