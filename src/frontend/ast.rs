//! Abstract Syntax Tree definitions for exprc
//!
//! The tree is uniform: every node has a kind, owned children and an
//! optional leaf. Expression nodes always carry their evaluated value.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::types::{TypeName, Value};

/// Grammar production a node was reduced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Program,
    StatementList,
    Statement,
    Decl,
    Assign,
    Expression,
    Type,
    Name,
    Op,
    Number,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::StatementList => "statement_list",
            Self::Statement => "statement",
            Self::Decl => "decl",
            Self::Assign => "assign",
            Self::Expression => "expression",
            Self::Type => "type",
            Self::Name => "name",
            Self::Op => "op",
            Self::Number => "number",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "program" => Ok(Self::Program),
            "statement_list" => Ok(Self::StatementList),
            "statement" => Ok(Self::Statement),
            "decl" => Ok(Self::Decl),
            "assign" => Ok(Self::Assign),
            "expression" => Ok(Self::Expression),
            "type" => Ok(Self::Type),
            "name" => Ok(Self::Name),
            "op" => Ok(Self::Op),
            "number" => Ok(Self::Number),
            _ => Err(format!("unknown node kind '{}'", s)),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl BinOp {
    /// Binding power; all operators are left-associative
    pub fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Payload attached to a node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Leaf {
    /// Literal or evaluated value (`number` and `expression` nodes)
    Value(Value),
    /// Declared type (`type` nodes)
    Type(TypeName),
    /// Variable name (`name` nodes)
    Name(String),
    /// Operator (`op` nodes)
    Op(BinOp),
}

impl fmt::Display for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{}", v),
            Self::Type(t) => write!(f, "{}", t),
            Self::Name(n) => f.write_str(n),
            Self::Op(op) => write!(f, "{}", op),
        }
    }
}

/// A node of the syntax tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<Node>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf: Option<Leaf>,
}

impl Node {
    /// Interior node without a leaf
    pub fn new(kind: NodeKind, children: Vec<Node>) -> Self {
        Self { kind, children, leaf: None }
    }

    /// Leaf node without children
    pub fn leaf(kind: NodeKind, leaf: Leaf) -> Self {
        Self { kind, children: Vec::new(), leaf: Some(leaf) }
    }

    /// `number` node wrapping a literal
    pub fn number(value: Value) -> Self {
        Self::leaf(NodeKind::Number, Leaf::Value(value))
    }

    /// `expression` node carrying its evaluated value
    pub fn expression(children: Vec<Node>, value: Value) -> Self {
        Self { kind: NodeKind::Expression, children, leaf: Some(Leaf::Value(value)) }
    }

    /// The evaluated value of an expression or number node
    pub fn value(&self) -> Option<&Value> {
        match &self.leaf {
            Some(Leaf::Value(v)) => Some(v),
            _ => None,
        }
    }

    /// Statement nodes of a `program` tree, in source order
    pub fn statements(&self) -> impl Iterator<Item = &Node> {
        self.children
            .iter()
            .filter(|n| n.kind == NodeKind::StatementList)
            .flat_map(|list| list.children.iter())
    }

    /// Number of nodes in this subtree
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Node::size).sum::<usize>()
    }
}
