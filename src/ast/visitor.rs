//! Visitor contract for consuming expression trees.
//!
//! `Expr::accept` dispatches each node to the matching `visit_*` method.
//! Every method has a default that forwards to `visit_other`, so a visitor
//! only needs to override the node shapes it understands. Visitors get shared
//! references only and cannot modify the tree.

use super::ast::{BinaryExpr, ExprType, LiteralExpr, UnaryExpr};

pub trait Visitor {
    /// The value produced for each visited node.
    type Output;

    fn visit_binary(&mut self, _node: &BinaryExpr) -> Self::Output {
        self.visit_other(ExprType::Binary)
    }

    fn visit_unary(&mut self, _node: &UnaryExpr) -> Self::Output {
        self.visit_other(ExprType::Unary)
    }

    fn visit_literal(&mut self, _node: &LiteralExpr) -> Self::Output {
        self.visit_other(ExprType::Literal)
    }

    /// Called for any node shape the visitor does not handle.
    fn visit_other(&mut self, expr_type: ExprType) -> Self::Output;
}
