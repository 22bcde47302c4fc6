//! Statement tree consumed by the dependency analysis
//!
//! The tree is produced upstream (no parser lives in this crate). Each
//! [`Primitive`] ends up as the label of exactly one flow graph edge; the
//! structured variants only shape the graph.

use crate::dataflow::DependSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A statement that labels a single flow graph edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primitive {
    /// `variable := f(expression)`, where `expression` holds the variables read
    Assignment { variable: String, expression: DependSet },
    /// Does nothing
    Null,
    /// Stand-in for an erroneous part of the input program
    Error,
}

impl Primitive {
    pub fn assignment(variable: impl Into<String>, expression: DependSet) -> Self {
        Primitive::Assignment {
            variable: variable.into(),
            expression,
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::Assignment { variable, expression } => write!(f, "{variable} := {expression};"),
            Primitive::Null => f.write_str("null;"),
            Primitive::Error => f.write_str("error;"),
        }
    }
}

/// Structured statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    Primitive(Primitive),
    /// Sequential composition
    Compound(Vec<Statement>),
    /// Non-deterministic choice between alternatives
    Select(Vec<Statement>),
    /// Body executed zero or more times
    Repeat(Box<Statement>),
}

impl Statement {
    pub fn assign<I, S>(variable: impl Into<String>, used: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let expression = used.into_iter().map(Into::into).collect::<DependSet>();
        Statement::Primitive(Primitive::assignment(variable, expression))
    }

    pub fn null() -> Self {
        Statement::Primitive(Primitive::Null)
    }

    pub fn error() -> Self {
        Statement::Primitive(Primitive::Error)
    }

    pub fn compound(statements: Vec<Statement>) -> Self {
        Statement::Compound(statements)
    }

    pub fn select(alternatives: Vec<Statement>) -> Self {
        Statement::Select(alternatives)
    }

    pub fn repeat(body: Statement) -> Self {
        Statement::Repeat(Box::new(body))
    }
}

impl From<Primitive> for Statement {
    fn from(primitive: Primitive) -> Self {
        Statement::Primitive(primitive)
    }
}
