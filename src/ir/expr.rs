//! Tensor index expressions.
//!
//! An index expression is a tree of element-wise arithmetic applied to
//! reads of tensors indexed by index variables, e.g. `A(i,j) * B(j) + c`.
//! It preserves the structure the lowering machinery walks when building
//! merge lattices.

use crate::utils::intern::{self, Symbol};
use serde::{Serialize, Deserialize};
use std::fmt;
use std::ops;

/// How one dimension of a tensor is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LevelFormat {
    /// Every position of the dimension is represented
    Dense,
    /// Only stored coordinates are represented
    Sparse,
}

/// A tensor variable with one storage format per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TensorVar {
    /// Interned tensor name
    name: Symbol,
    /// Storage format of each dimension, outermost first
    formats: Vec<LevelFormat>,
}

impl TensorVar {
    /// Create a tensor variable with the given per-dimension formats.
    pub fn new(name: &str, formats: Vec<LevelFormat>) -> Self {
        Self { name: intern::intern(name), formats }
    }

    /// Shorthand for a tensor whose dimensions are all sparse.
    pub fn sparse(name: &str, order: usize) -> Self {
        Self::new(name, vec![LevelFormat::Sparse; order])
    }

    /// Shorthand for a tensor whose dimensions are all dense.
    pub fn dense(name: &str, order: usize) -> Self {
        Self::new(name, vec![LevelFormat::Dense; order])
    }

    /// The interned name of the tensor.
    pub fn name(&self) -> Symbol {
        self.name
    }

    /// The number of dimensions.
    pub fn order(&self) -> usize {
        self.formats.len()
    }

    /// The storage format of one dimension.
    pub fn format(&self, level: usize) -> LevelFormat {
        self.formats[level]
    }

    /// Build a read of this tensor indexed by the given variables.
    pub fn read<I>(&self, index_vars: I) -> IndexExpr
    where
        I: IntoIterator<Item = IndexVar>,
    {
        IndexExpr::Read(Read::new(self.clone(), index_vars.into_iter().collect()))
    }
}

impl fmt::Display for TensorVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A named symbolic variable ranging over a tensor dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IndexVar {
    name: Symbol,
}

impl IndexVar {
    /// Create an index variable with the given name.
    pub fn new(name: &str) -> Self {
        Self { name: intern::intern(name) }
    }

    /// The interned name of the variable.
    pub fn name(&self) -> Symbol {
        self.name
    }
}

impl fmt::Display for IndexVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A read of a tensor indexed by an ordered list of index variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Read {
    /// The tensor being read
    tensor: TensorVar,
    /// The index variables, one per tensor dimension
    index_vars: Vec<IndexVar>,
}

impl Read {
    /// Create a read of `tensor` indexed by `index_vars`.
    pub fn new(tensor: TensorVar, index_vars: Vec<IndexVar>) -> Self {
        Self { tensor, index_vars }
    }

    /// The tensor being read.
    pub fn tensor(&self) -> &TensorVar {
        &self.tensor
    }

    /// The index variables of the read, in access order.
    pub fn index_vars(&self) -> &[IndexVar] {
        &self.index_vars
    }
}

impl fmt::Display for Read {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.tensor)?;
        for (i, var) in self.index_vars.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", var)?;
        }
        write!(f, ")")
    }
}

/// A scalar tensor index expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexExpr {
    /// Read of a tensor
    Read(Read),
    /// Negation
    Neg(Box<IndexExpr>),
    /// Square root
    Sqrt(Box<IndexExpr>),
    /// Addition (union semantics)
    Add(Box<IndexExpr>, Box<IndexExpr>),
    /// Subtraction (union semantics)
    Sub(Box<IndexExpr>, Box<IndexExpr>),
    /// Multiplication (intersection semantics)
    Mul(Box<IndexExpr>, Box<IndexExpr>),
    /// Division (intersection semantics)
    Div(Box<IndexExpr>, Box<IndexExpr>),
    /// Integer literal
    IntImm(i64),
    /// Single-precision literal
    FloatImm(f32),
    /// Double-precision literal
    DoubleImm(f64),
}

impl IndexExpr {
    /// Square root of this expression.
    pub fn sqrt(self) -> IndexExpr {
        IndexExpr::Sqrt(Box::new(self))
    }

    /// All tensor reads in the expression, left to right.
    pub fn reads(&self) -> Vec<&Read> {
        let mut reads = Vec::new();
        self.collect_reads(&mut reads);
        reads
    }

    fn collect_reads<'a>(&'a self, reads: &mut Vec<&'a Read>) {
        match self {
            IndexExpr::Read(read) => reads.push(read),
            IndexExpr::Neg(a) | IndexExpr::Sqrt(a) => a.collect_reads(reads),
            IndexExpr::Add(a, b)
            | IndexExpr::Sub(a, b)
            | IndexExpr::Mul(a, b)
            | IndexExpr::Div(a, b) => {
                a.collect_reads(reads);
                b.collect_reads(reads);
            }
            IndexExpr::IntImm(_) | IndexExpr::FloatImm(_) | IndexExpr::DoubleImm(_) => {}
        }
    }

    /// The index variables of the expression, in first-use order, without
    /// duplicates.
    pub fn index_vars(&self) -> Vec<IndexVar> {
        let mut vars = Vec::new();
        for read in self.reads() {
            for var in read.index_vars() {
                if !vars.contains(var) {
                    vars.push(*var);
                }
            }
        }
        vars
    }

    /// Whether any read in the expression is indexed by `var`.
    pub fn involves(&self, var: IndexVar) -> bool {
        self.reads().iter().any(|read| read.index_vars().contains(&var))
    }
}

/// Writes `expr`, parenthesized when it binds looser than a product.
fn fmt_factor(expr: &IndexExpr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match expr {
        IndexExpr::Add(..) | IndexExpr::Sub(..) => write!(f, "({})", expr),
        _ => write!(f, "{}", expr),
    }
}

impl fmt::Display for IndexExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexExpr::Read(read) => write!(f, "{}", read),
            IndexExpr::Neg(a) => {
                write!(f, "-")?;
                fmt_factor(a, f)
            }
            IndexExpr::Sqrt(a) => write!(f, "sqrt({})", a),
            IndexExpr::Add(a, b) => write!(f, "{} + {}", a, b),
            IndexExpr::Sub(a, b) => write!(f, "{} - {}", a, b),
            IndexExpr::Mul(a, b) => {
                fmt_factor(a, f)?;
                write!(f, " * ")?;
                fmt_factor(b, f)
            }
            IndexExpr::Div(a, b) => {
                fmt_factor(a, f)?;
                write!(f, " / ")?;
                fmt_factor(b, f)
            }
            IndexExpr::IntImm(v) => write!(f, "{}", v),
            IndexExpr::FloatImm(v) => write!(f, "{}", v),
            IndexExpr::DoubleImm(v) => write!(f, "{}", v),
        }
    }
}

impl ops::Add for IndexExpr {
    type Output = IndexExpr;

    fn add(self, rhs: IndexExpr) -> IndexExpr {
        IndexExpr::Add(Box::new(self), Box::new(rhs))
    }
}

impl ops::Sub for IndexExpr {
    type Output = IndexExpr;

    fn sub(self, rhs: IndexExpr) -> IndexExpr {
        IndexExpr::Sub(Box::new(self), Box::new(rhs))
    }
}

impl ops::Mul for IndexExpr {
    type Output = IndexExpr;

    fn mul(self, rhs: IndexExpr) -> IndexExpr {
        IndexExpr::Mul(Box::new(self), Box::new(rhs))
    }
}

impl ops::Div for IndexExpr {
    type Output = IndexExpr;

    fn div(self, rhs: IndexExpr) -> IndexExpr {
        IndexExpr::Div(Box::new(self), Box::new(rhs))
    }
}

impl ops::Neg for IndexExpr {
    type Output = IndexExpr;

    fn neg(self) -> IndexExpr {
        IndexExpr::Neg(Box::new(self))
    }
}

/// Tag for a binary expression node constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    /// Build the expression node this tag denotes.
    pub fn apply(self, a: IndexExpr, b: IndexExpr) -> IndexExpr {
        match self {
            BinaryOp::Add => IndexExpr::Add(Box::new(a), Box::new(b)),
            BinaryOp::Sub => IndexExpr::Sub(Box::new(a), Box::new(b)),
            BinaryOp::Mul => IndexExpr::Mul(Box::new(a), Box::new(b)),
            BinaryOp::Div => IndexExpr::Div(Box::new(a), Box::new(b)),
        }
    }

    /// Whether the operator has intersection semantics: the result exists
    /// only where both operands exist. Additive operators have union
    /// semantics instead, with the absent operand reading as zero.
    pub fn is_conjunctive(self) -> bool {
        matches!(self, BinaryOp::Mul | BinaryOp::Div)
    }
}

/// Tag for a unary expression node constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Neg,
    Sqrt,
}

impl UnaryOp {
    /// Build the expression node this tag denotes.
    pub fn apply(self, a: IndexExpr) -> IndexExpr {
        match self {
            UnaryOp::Neg => IndexExpr::Neg(Box::new(a)),
            UnaryOp::Sqrt => IndexExpr::Sqrt(Box::new(a)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> (IndexVar, IndexVar) {
        (IndexVar::new("i"), IndexVar::new("j"))
    }

    #[test]
    fn test_read_display() {
        let (i, j) = vars();
        let a = TensorVar::sparse("A", 2);
        let expr = a.read([i, j]);
        assert_eq!(expr.to_string(), "A(i,j)");
    }

    #[test]
    fn test_operator_overloads() {
        let (i, j) = vars();
        let a = TensorVar::sparse("A", 2);
        let b = TensorVar::dense("B", 1);
        let expr = a.read([i, j]) * b.read([j]) + (-a.read([i, j]));
        assert_eq!(expr.to_string(), "A(i,j) * B(j) + -A(i,j)");
    }

    #[test]
    fn test_display_parenthesizes_sums() {
        let i = IndexVar::new("i");
        let a = TensorVar::sparse("A", 1);
        let b = TensorVar::sparse("B", 1);
        let expr = (a.read([i]) + b.read([i])) * a.read([i]);
        assert_eq!(expr.to_string(), "(A(i) + B(i)) * A(i)");
    }

    #[test]
    fn test_index_vars_unique_and_ordered() {
        let (i, j) = vars();
        let a = TensorVar::sparse("A", 2);
        let b = TensorVar::dense("B", 1);
        let expr = a.read([i, j]) * b.read([j]);
        assert_eq!(expr.index_vars(), vec![i, j]);
        assert!(expr.involves(i));
        assert!(!expr.involves(IndexVar::new("k")));
    }

    #[test]
    fn test_op_tags_build_matching_nodes() {
        let i = IndexVar::new("i");
        let a = TensorVar::sparse("A", 1);
        let b = TensorVar::sparse("B", 1);
        let built = BinaryOp::Mul.apply(a.read([i]), b.read([i]));
        assert_eq!(built, a.read([i]) * b.read([i]));
        assert!(BinaryOp::Mul.is_conjunctive());
        assert!(!BinaryOp::Sub.is_conjunctive());
        let neg = UnaryOp::Neg.apply(a.read([i]));
        assert_eq!(neg, -a.read([i]));
    }

    #[test]
    fn test_tensor_formats() {
        let d = TensorVar::new("D", vec![LevelFormat::Dense, LevelFormat::Sparse]);
        assert_eq!(d.order(), 2);
        assert_eq!(d.format(0), LevelFormat::Dense);
        assert_eq!(d.format(1), LevelFormat::Sparse);
    }
}
