use crate::{
    ast::{
        ast::{BinaryExpr, Expr, ExprType, LiteralExpr, UnaryExpr},
        visitor::Visitor,
    },
    errors::errors::{Error, ErrorImpl},
    parser::lookups::{Arity, OperatorTable, Semantics, OPERATOR_TABLE},
};

/// Evaluates a tree with the semantic functions of an operator table.
pub struct EvalVisitor<'a> {
    table: &'a OperatorTable,
}

impl<'a> EvalVisitor<'a> {
    pub fn new(table: &'a OperatorTable) -> Self {
        EvalVisitor { table }
    }

    fn semantics(&self, operator: &str, arity: Arity) -> Result<Semantics, Error> {
        self.table
            .lookup(operator, arity)
            .map(|entry| entry.semantics)
            .ok_or_else(|| unknown_operator(operator))
    }
}

fn unknown_operator(operator: &str) -> Error {
    Error::unpositioned(ErrorImpl::UnknownOperator {
        operator: String::from(operator),
    })
}

impl Visitor for EvalVisitor<'_> {
    type Output = Result<i64, Error>;

    fn visit_binary(&mut self, node: &BinaryExpr) -> Self::Output {
        let left = node.left.accept(self)?;
        let right = node.right.accept(self)?;

        match self.semantics(&node.operator, Arity::Binary)? {
            Semantics::Binary(function) => Ok(function(left, right)?),
            Semantics::Prefix(_) => Err(unknown_operator(&node.operator)),
        }
    }

    fn visit_unary(&mut self, node: &UnaryExpr) -> Self::Output {
        let operand = node.operand.accept(self)?;

        match self.semantics(&node.operator, Arity::Prefix)? {
            Semantics::Prefix(function) => Ok(function(operand)?),
            Semantics::Binary(_) => Err(unknown_operator(&node.operator)),
        }
    }

    fn visit_literal(&mut self, node: &LiteralExpr) -> Self::Output {
        Ok(node.value)
    }

    fn visit_other(&mut self, expr_type: ExprType) -> Self::Output {
        Err(Error::unpositioned(ErrorImpl::UnsupportedNode {
            node: expr_type.to_string(),
        }))
    }
}

/// Evaluates `expr` with the process-wide operator table.
pub fn evaluate(expr: &Expr) -> Result<i64, Error> {
    expr.accept(&mut EvalVisitor::new(&OPERATOR_TABLE))
}
