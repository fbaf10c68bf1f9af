//! Merge lattices for co-iteration over sparse and dense dimensions.
//!
//! Lowering a tensor index expression to loops requires merging several
//! iterators over one index variable. As sparse iterators are exhausted
//! the merge falls into simpler cases; the merge lattice enumerates those
//! cases symbolically. Each lattice point records which iterators still
//! participate, which of them drive the merged loop, and how the scalar
//! expression specialises when the others have run out.
//!
//! The lattice for an expression is built by recursive descent:
//! multiplicative operators intersect the iteration domains of their
//! operands (conjunction), additive operators union them (disjunction),
//! and sub-expressions that do not involve the target index variable
//! scale every point of the other operand's lattice.

use crate::ir::{BinaryOp, IndexExpr, IndexVar, UnaryOp};
use crate::lower::iterators::{IteratorHandle, Iterators};
use crate::lower::schedule::IterationSchedule;
use crate::utils::errors::{LowerError, LowerResult};
use std::fmt;
use std::ops::Index;
use std::slice;

/// Canonicalise an iterator list for range computation.
///
/// Dense iterators do not restrict the merged range, so only the sparse
/// iterators are kept, in input order. If every input is dense the first
/// one is retained: a case with only dense participants still needs an
/// iterator to drive its loop.
///
/// Panics if `iterators` is empty.
pub fn simplify(iterators: &[IteratorHandle]) -> Vec<IteratorHandle> {
    assert!(!iterators.is_empty(), "cannot simplify an empty iterator list");
    let mut simplified: Vec<IteratorHandle> = iterators
        .iter()
        .copied()
        .filter(|iter| !iter.is_dense())
        .collect();
    if simplified.is_empty() {
        simplified.push(iterators[0]);
    }
    simplified
}

/// A single co-iteration case.
#[derive(Debug, Clone)]
pub struct MergeLatticePoint {
    /// Iterators participating in this case, in construction order
    iterators: Vec<IteratorHandle>,
    /// Simplified iterators that bound the case's range
    range_iterators: Vec<IteratorHandle>,
    /// Iterators merged in generated code: one dense iterator, or one or
    /// more sparse iterators
    merge_iterators: Vec<IteratorHandle>,
    /// The specialised scalar expression for this case
    expr: IndexExpr,
}

impl MergeLatticePoint {
    /// Create a point with no merge iterators. The range iterators are
    /// recomputed from `iterators`.
    pub fn new(iterators: Vec<IteratorHandle>, expr: IndexExpr) -> Self {
        let range_iterators = simplify(&iterators);
        Self { iterators, range_iterators, merge_iterators: Vec::new(), expr }
    }

    /// Create a point with explicit merge iterators. The range iterators
    /// are recomputed from `iterators`; the merge iterators are stored
    /// verbatim.
    pub fn with_merge_iterators(
        iterators: Vec<IteratorHandle>,
        merge_iterators: Vec<IteratorHandle>,
        expr: IndexExpr,
    ) -> Self {
        let range_iterators = simplify(&iterators);
        Self { iterators, range_iterators, merge_iterators, expr }
    }

    /// The iterators participating in this case.
    pub fn iterators(&self) -> &[IteratorHandle] {
        &self.iterators
    }

    /// The simplified iterators that bound this case's range.
    pub fn range_iterators(&self) -> &[IteratorHandle] {
        &self.range_iterators
    }

    /// The iterators merged in generated code.
    pub fn merge_iterators(&self) -> &[IteratorHandle] {
        &self.merge_iterators
    }

    /// The specialised scalar expression for this case.
    pub fn expr(&self) -> &IndexExpr {
        &self.expr
    }

    /// Combine two points under an operator with intersection semantics.
    pub fn conjunction(a: &Self, b: &Self, op: BinaryOp) -> Self {
        merge(a, b, op, true)
    }

    /// Combine two points under an operator with union semantics.
    pub fn disjunction(a: &Self, b: &Self, op: BinaryOp) -> Self {
        merge(a, b, op, false)
    }
}

/// Two points are equal iff their iterator lists are element-wise equal.
/// The iterator list fully identifies a case; expressions and merge
/// iterators are not compared.
impl PartialEq for MergeLatticePoint {
    fn eq(&self, other: &Self) -> bool {
        self.iterators == other.iterators
    }
}

impl Eq for MergeLatticePoint {}

impl fmt::Display for MergeLatticePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, iter) in self.iterators.iter().enumerate() {
            if i > 0 {
                write!(f, " \u{2227} ")?;
            }
            write!(f, "{}", iter)?;
        }
        write!(f, "]")
    }
}

/// A merge iterator list must be a single dense iterator or a non-empty
/// list of sparse iterators.
fn assert_merge_invariant(iters: &[IteratorHandle]) {
    assert!(
        !iters.is_empty() && (iters.len() == 1 || iters.iter().all(|it| !it.is_dense())),
        "merge iterators must be one dense iterator or all-sparse iterators"
    );
}

/// Combine two lattice points under `op`.
///
/// The result's iterators are the concatenation of the operands' and its
/// expression is `op` applied to theirs. The merge iterators follow from
/// the operands': two sparse lists union; two dense lists collapse to the
/// left one (either works downstream, the left is kept consistently);
/// with one dense and one sparse side, intersection is ranged by the
/// sparse side and union by the dense side.
fn merge(a: &MergeLatticePoint, b: &MergeLatticePoint, op: BinaryOp, conjunctive: bool) -> MergeLatticePoint {
    let mut iterators = a.iterators().to_vec();
    iterators.extend_from_slice(b.iterators());

    let expr = op.apply(a.expr().clone(), b.expr().clone());

    let a_merge = a.merge_iterators();
    let b_merge = b.merge_iterators();
    assert_merge_invariant(a_merge);
    assert_merge_invariant(b_merge);

    let merge_iterators = if !a_merge[0].is_dense() && !b_merge[0].is_dense() {
        let mut union = a_merge.to_vec();
        union.extend_from_slice(b_merge);
        union
    } else if a_merge[0].is_dense() && b_merge[0].is_dense() {
        a_merge.to_vec()
    } else if conjunctive {
        // Intersection with a full range is ranged by the sparse side.
        if a_merge[0].is_dense() { b_merge.to_vec() } else { a_merge.to_vec() }
    } else {
        // Union with a full range is the full range.
        if a_merge[0].is_dense() { a_merge.to_vec() } else { b_merge.to_vec() }
    };
    assert_merge_invariant(&merge_iterators);

    MergeLatticePoint::with_merge_iterators(iterators, merge_iterators, expr)
}

/// Multiset inclusion over sorted iterator lists.
fn includes(sup: &[IteratorHandle], sub: &[IteratorHandle]) -> bool {
    let mut i = 0;
    'outer: for iter in sub {
        while i < sup.len() {
            if sup[i] == *iter {
                i += 1;
                continue 'outer;
            }
            if sup[i] > *iter {
                return false;
            }
            i += 1;
        }
        return false;
    }
    true
}

/// An ordered collection of co-iteration cases for one index variable.
///
/// The first point is the top of the lattice: its iterators and
/// expression describe the full co-iteration. An empty lattice is the
/// transient "undefined" marker meaning a sub-expression does not involve
/// the target index variable; every lattice that escapes the builder is
/// defined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeLattice {
    points: Vec<MergeLatticePoint>,
}

impl MergeLattice {
    /// The undefined lattice.
    pub fn undefined() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a lattice from points.
    pub fn new(points: Vec<MergeLatticePoint>) -> Self {
        Self { points }
    }

    /// The number of points.
    pub fn size(&self) -> usize {
        self.points.len()
    }

    /// Whether the lattice is defined (has at least one point).
    pub fn defined(&self) -> bool {
        !self.points.is_empty()
    }

    /// The points of the lattice, top first.
    pub fn points(&self) -> &[MergeLatticePoint] {
        &self.points
    }

    /// Iterate over the points, top first.
    pub fn iter(&self) -> slice::Iter<'_, MergeLatticePoint> {
        self.points.iter()
    }

    /// The iterators merged by the lattice: those of the first point.
    pub fn iterators(&self) -> &[IteratorHandle] {
        assert!(self.defined(), "no lattice points in the merge lattice");
        self.points[0].iterators()
    }

    /// The expression merged by the lattice: that of the first point.
    pub fn expr(&self) -> &IndexExpr {
        assert!(self.defined(), "no lattice points in the merge lattice");
        self.points[0].expr()
    }

    /// The sub-lattice dominated by `point`: every point whose iterator
    /// set is a subset of `point`'s, in lattice order.
    pub fn sub_lattice(&self, point: &MergeLatticePoint) -> MergeLattice {
        let mut sup = point.iterators().to_vec();
        sup.sort();
        let mut dominated = Vec::new();
        for candidate in self {
            let mut sub = candidate.iterators().to_vec();
            sub.sort();
            if includes(&sup, &sub) {
                dominated.push(candidate.clone());
            }
        }
        MergeLattice::new(dominated)
    }

    /// Combine two lattices under an operator with intersection
    /// semantics: all pairwise point conjunctions, `a` outer.
    pub fn conjunction(a: &Self, b: &Self, op: BinaryOp) -> Self {
        let mut points = Vec::with_capacity(a.size() * b.size());
        for apoint in a {
            for bpoint in b {
                points.push(MergeLatticePoint::conjunction(apoint, bpoint, op));
            }
        }
        MergeLattice::new(points)
    }

    /// Combine two lattices under an operator with union semantics: all
    /// pairwise point disjunctions followed by the points of `a` and of
    /// `b`, pruned of any point missing a dense iterator of the top.
    ///
    /// Exhausting a dense iterator ends the co-iteration entirely, so a
    /// point whose iterator list omits one claims an unreachable case.
    pub fn disjunction(a: &Self, b: &Self, op: BinaryOp) -> Self {
        let mut all_points = Vec::with_capacity(a.size() * b.size() + a.size() + b.size());
        for apoint in a {
            for bpoint in b {
                all_points.push(MergeLatticePoint::disjunction(apoint, bpoint, op));
            }
        }
        all_points.extend(a.iter().cloned());
        all_points.extend(b.iter().cloned());
        assert!(!all_points.is_empty(), "a lattice must have at least one point");

        let dense_iterators: Vec<IteratorHandle> = all_points[0]
            .iterators()
            .iter()
            .copied()
            .filter(|iter| iter.is_dense())
            .collect();
        let points: Vec<MergeLatticePoint> = all_points
            .into_iter()
            .filter(|point| {
                dense_iterators
                    .iter()
                    .all(|dense| point.iterators().contains(dense))
            })
            .collect();

        let lattice = MergeLattice::new(points);
        assert!(lattice.defined(), "dense-iterator pruning must leave at least one point");
        lattice
    }
}

impl Index<usize> for MergeLattice {
    type Output = MergeLatticePoint;

    fn index(&self, i: usize) -> &MergeLatticePoint {
        &self.points[i]
    }
}

impl<'a> IntoIterator for &'a MergeLattice {
    type Item = &'a MergeLatticePoint;
    type IntoIter = slice::Iter<'a, MergeLatticePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl fmt::Display for MergeLattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, "  \u{2228}  ")?;
            }
            write!(f, "{}", point)?;
        }
        Ok(())
    }
}

/// Apply a unary operator to every point's expression. Iterators and
/// merge iterators are unchanged; an undefined lattice stays undefined.
fn unary(lattice: &MergeLattice, op: UnaryOp) -> MergeLattice {
    let points = lattice
        .iter()
        .map(|point| {
            MergeLatticePoint::with_merge_iterators(
                point.iterators().to_vec(),
                point.merge_iterators().to_vec(),
                op.apply(point.expr().clone()),
            )
        })
        .collect();
    MergeLattice::new(points)
}

/// Combine every point's expression with a scalar sub-expression that
/// does not involve the target index variable. Iterators and merge
/// iterators are unchanged.
fn scale(lattice: &MergeLattice, scalar: &IndexExpr, op: BinaryOp, scalar_on_left: bool) -> MergeLattice {
    let points = lattice
        .iter()
        .map(|point| {
            let expr = if scalar_on_left {
                op.apply(scalar.clone(), point.expr().clone())
            } else {
                op.apply(point.expr().clone(), scalar.clone())
            };
            MergeLatticePoint::with_merge_iterators(
                point.iterators().to_vec(),
                point.merge_iterators().to_vec(),
                expr,
            )
        })
        .collect();
    MergeLattice::new(points)
}

/// Recursive-descent builder producing the lattice of an expression over
/// one index variable.
struct LatticeBuilder<'a> {
    index_var: IndexVar,
    schedule: &'a IterationSchedule,
    iterators: &'a Iterators,
}

impl LatticeBuilder<'_> {
    fn build(&self, expr: &IndexExpr) -> LowerResult<MergeLattice> {
        match expr {
            IndexExpr::Read(read) => {
                // Throw away reads the index variable does not contribute to.
                if !read.index_vars().contains(&self.index_var) {
                    return Ok(MergeLattice::undefined());
                }
                let path = self.schedule.tensor_path(read).ok_or_else(|| {
                    LowerError::missing_path(format!("no tensor path for {}", read))
                })?;
                let position = path
                    .variables()
                    .iter()
                    .position(|var| *var == self.index_var)
                    .unwrap_or_else(|| {
                        panic!("index variable {} is not on the tensor path of {}", self.index_var, read)
                    });
                let step = path.step(position);
                let iterator = self.iterators.get(&step).ok_or_else(|| {
                    LowerError::missing_iterator(format!("no iterator for step {}", step))
                })?;
                let point = MergeLatticePoint::with_merge_iterators(
                    vec![iterator],
                    vec![iterator],
                    expr.clone(),
                );
                Ok(MergeLattice::new(vec![point]))
            }
            IndexExpr::Neg(a) => Ok(unary(&self.build(a)?, UnaryOp::Neg)),
            IndexExpr::Sqrt(a) => Ok(unary(&self.build(a)?, UnaryOp::Sqrt)),
            IndexExpr::Add(a, b) => self.binary(a, b, BinaryOp::Add),
            IndexExpr::Sub(a, b) => self.binary(a, b, BinaryOp::Sub),
            IndexExpr::Mul(a, b) => self.binary(a, b, BinaryOp::Mul),
            IndexExpr::Div(a, b) => self.binary(a, b, BinaryOp::Div),
            IndexExpr::IntImm(_) | IndexExpr::FloatImm(_) | IndexExpr::DoubleImm(_) => {
                Err(LowerError::unsupported(format!(
                    "literal {} is not supported in merged expressions",
                    expr
                )))
            }
        }
    }

    fn binary(&self, a: &IndexExpr, b: &IndexExpr, op: BinaryOp) -> LowerResult<MergeLattice> {
        let la = self.build(a)?;
        let lb = self.build(b)?;
        match (la.defined(), lb.defined()) {
            (true, true) if op.is_conjunctive() => Ok(MergeLattice::conjunction(&la, &lb, op)),
            (true, true) => Ok(MergeLattice::disjunction(&la, &lb, op)),
            // Scalar operands
            (true, false) => Ok(scale(&la, b, op, false)),
            (false, true) => Ok(scale(&lb, a, op, true)),
            (false, false) => Ok(MergeLattice::undefined()),
        }
    }
}

/// Build the merge lattice of an index expression over `index_var`.
///
/// The schedule and iterator registry are read-only oracles; the result
/// is freshly allocated and owned by the caller.
///
/// Panics if the expression does not involve `index_var` at all; that is
/// a caller bug, not an input condition.
pub fn build_merge_lattice(
    expr: &IndexExpr,
    index_var: IndexVar,
    schedule: &IterationSchedule,
    iterators: &Iterators,
) -> LowerResult<MergeLattice> {
    let builder = LatticeBuilder { index_var, schedule, iterators };
    let lattice = builder.build(expr)?;
    assert!(
        lattice.defined(),
        "every merge lattice must have at least one point; {} does not involve {}",
        expr,
        index_var
    );
    Ok(lattice)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{IndexExpr, LevelFormat};
    use crate::lower::schedule::Step;
    use crate::utils::intern::intern;

    fn sparse(name: &str) -> IteratorHandle {
        IteratorHandle::new(Step::new(intern(name), 0), LevelFormat::Sparse)
    }

    fn dense(name: &str) -> IteratorHandle {
        IteratorHandle::new(Step::new(intern(name), 0), LevelFormat::Dense)
    }

    fn expr() -> IndexExpr {
        crate::ir::TensorVar::sparse("T", 1).read([crate::ir::IndexVar::new("i")])
    }

    #[test]
    fn test_simplify_keeps_sparse_in_order() {
        let (s1, d, s2) = (sparse("A"), dense("B"), sparse("C"));
        assert_eq!(simplify(&[s1, d, s2]), vec![s1, s2]);
    }

    #[test]
    fn test_simplify_all_dense_keeps_first() {
        let (d1, d2) = (dense("A"), dense("B"));
        assert_eq!(simplify(&[d1, d2]), vec![d1]);
    }

    #[test]
    fn test_simplify_idempotent() {
        let input = vec![sparse("A"), dense("B"), dense("C"), sparse("D")];
        let once = simplify(&input);
        assert_eq!(simplify(&once), once);
    }

    #[test]
    #[should_panic(expected = "empty iterator list")]
    fn test_simplify_empty_panics() {
        simplify(&[]);
    }

    #[test]
    fn test_point_equality_ignores_expr() {
        let s = sparse("A");
        let p1 = MergeLatticePoint::new(vec![s], expr());
        let p2 = MergeLatticePoint::new(vec![s], expr().sqrt());
        assert_eq!(p1, p2);
        let p3 = MergeLatticePoint::new(vec![s, sparse("B")], expr());
        assert_ne!(p1, p3);
    }

    #[test]
    fn test_point_recomputes_range_iterators() {
        let (s, d) = (sparse("A"), dense("B"));
        let point = MergeLatticePoint::new(vec![d, s], expr());
        assert_eq!(point.range_iterators(), &[s]);
        assert!(point.merge_iterators().is_empty());
    }

    #[test]
    fn test_merge_sparse_sparse_unions() {
        let (sa, sb) = (sparse("A"), sparse("B"));
        let a = MergeLatticePoint::with_merge_iterators(vec![sa], vec![sa], expr());
        let b = MergeLatticePoint::with_merge_iterators(vec![sb], vec![sb], expr());
        let conj = MergeLatticePoint::conjunction(&a, &b, BinaryOp::Mul);
        assert_eq!(conj.iterators(), &[sa, sb]);
        assert_eq!(conj.merge_iterators(), &[sa, sb]);
        let disj = MergeLatticePoint::disjunction(&a, &b, BinaryOp::Add);
        assert_eq!(disj.merge_iterators(), &[sa, sb]);
    }

    #[test]
    fn test_merge_dense_dense_keeps_left() {
        let (da, db) = (dense("A"), dense("B"));
        let a = MergeLatticePoint::with_merge_iterators(vec![da], vec![da], expr());
        let b = MergeLatticePoint::with_merge_iterators(vec![db], vec![db], expr());
        let conj = MergeLatticePoint::conjunction(&a, &b, BinaryOp::Mul);
        assert_eq!(conj.merge_iterators(), &[da]);
        let disj = MergeLatticePoint::disjunction(&b, &a, BinaryOp::Add);
        assert_eq!(disj.merge_iterators(), &[db]);
    }

    #[test]
    fn test_merge_mixed_conjunction_takes_sparse() {
        let (s, d) = (sparse("A"), dense("B"));
        let a = MergeLatticePoint::with_merge_iterators(vec![s], vec![s], expr());
        let b = MergeLatticePoint::with_merge_iterators(vec![d], vec![d], expr());
        assert_eq!(MergeLatticePoint::conjunction(&a, &b, BinaryOp::Mul).merge_iterators(), &[s]);
        assert_eq!(MergeLatticePoint::conjunction(&b, &a, BinaryOp::Mul).merge_iterators(), &[s]);
    }

    #[test]
    fn test_merge_mixed_disjunction_takes_dense() {
        let (s, d) = (sparse("A"), dense("B"));
        let a = MergeLatticePoint::with_merge_iterators(vec![s], vec![s], expr());
        let b = MergeLatticePoint::with_merge_iterators(vec![d], vec![d], expr());
        assert_eq!(MergeLatticePoint::disjunction(&a, &b, BinaryOp::Add).merge_iterators(), &[d]);
        assert_eq!(MergeLatticePoint::disjunction(&b, &a, BinaryOp::Add).merge_iterators(), &[d]);
    }

    #[test]
    fn test_merge_concatenates_and_applies_op() {
        let (sa, sb) = (sparse("A"), sparse("B"));
        let a = MergeLatticePoint::with_merge_iterators(vec![sa], vec![sa], expr());
        let b = MergeLatticePoint::with_merge_iterators(vec![sb], vec![sb], expr());
        let point = MergeLatticePoint::conjunction(&a, &b, BinaryOp::Mul);
        assert_eq!(*point.expr(), BinaryOp::Mul.apply(expr(), expr()));
    }

    #[test]
    fn test_lattice_conjunction_is_cross_product() {
        let (sa, sb, sc) = (sparse("A"), sparse("B"), sparse("C"));
        let mk = |iter: IteratorHandle| MergeLatticePoint::with_merge_iterators(vec![iter], vec![iter], expr());
        let ab = MergeLattice::new(vec![mk(sa), mk(sb)]);
        let c = MergeLattice::new(vec![mk(sc)]);
        let forward = MergeLattice::conjunction(&ab, &c, BinaryOp::Mul);
        let backward = MergeLattice::conjunction(&c, &ab, BinaryOp::Mul);
        assert_eq!(forward.size(), 2);
        assert_eq!(backward.size(), 2);
        assert_eq!(forward[0].iterators(), &[sa, sc]);
        assert_eq!(forward[1].iterators(), &[sb, sc]);
    }

    #[test]
    fn test_lattice_disjunction_appends_operand_points() {
        let (sa, sb) = (sparse("A"), sparse("B"));
        let mk = |iter: IteratorHandle| MergeLatticePoint::with_merge_iterators(vec![iter], vec![iter], expr());
        let a = MergeLattice::new(vec![mk(sa)]);
        let b = MergeLattice::new(vec![mk(sb)]);
        let lattice = MergeLattice::disjunction(&a, &b, BinaryOp::Add);
        assert_eq!(lattice.size(), 3);
        assert_eq!(lattice[0].iterators(), &[sa, sb]);
        assert_eq!(lattice[1].iterators(), &[sa]);
        assert_eq!(lattice[2].iterators(), &[sb]);
    }

    #[test]
    fn test_lattice_disjunction_prunes_points_missing_dense() {
        let (s, d) = (sparse("A"), dense("B"));
        let mk = |iter: IteratorHandle| MergeLatticePoint::with_merge_iterators(vec![iter], vec![iter], expr());
        let a = MergeLattice::new(vec![mk(s)]);
        let b = MergeLattice::new(vec![mk(d)]);
        let lattice = MergeLattice::disjunction(&a, &b, BinaryOp::Add);
        // The [A]-only point is unreachable once B's dense iterator ends.
        assert_eq!(lattice.size(), 2);
        assert_eq!(lattice[0].iterators(), &[s, d]);
        assert_eq!(lattice[1].iterators(), &[d]);
        for point in &lattice {
            assert!(point.iterators().contains(&d));
        }
    }

    #[test]
    fn test_sub_lattice_preserves_order_and_contains_point() {
        let (sa, sb) = (sparse("A"), sparse("B"));
        let mk = |iters: Vec<IteratorHandle>| {
            let merge = simplify(&iters);
            MergeLatticePoint::with_merge_iterators(iters, merge, expr())
        };
        let lattice = MergeLattice::new(vec![mk(vec![sa, sb]), mk(vec![sa]), mk(vec![sb])]);
        let top = lattice[0].clone();
        let sub = lattice.sub_lattice(&top);
        assert_eq!(sub, lattice);
        let only_a = lattice.sub_lattice(&lattice[1].clone());
        assert_eq!(only_a.size(), 1);
        assert_eq!(only_a[0].iterators(), &[sa]);
    }

    #[test]
    fn test_sub_lattice_subset_ignores_iterator_order() {
        let (sa, sb) = (sparse("A"), sparse("B"));
        let mk = |iters: Vec<IteratorHandle>| {
            let merge = simplify(&iters);
            MergeLatticePoint::with_merge_iterators(iters, merge, expr())
        };
        let lattice = MergeLattice::new(vec![mk(vec![sb, sa]), mk(vec![sa])]);
        let sub = lattice.sub_lattice(&lattice[0].clone());
        assert_eq!(sub.size(), 2);
    }

    #[test]
    fn test_display_glyphs() {
        let (sa, sb) = (sparse("A"), sparse("B"));
        let mk = |iters: Vec<IteratorHandle>| {
            let merge = simplify(&iters);
            MergeLatticePoint::with_merge_iterators(iters, merge, expr())
        };
        let lattice = MergeLattice::new(vec![mk(vec![sa, sb]), mk(vec![sa])]);
        assert_eq!(lattice.to_string(), "[A0 \u{2227} B0]  \u{2228}  [A0]");
    }

    #[test]
    fn test_undefined_lattice() {
        let lattice = MergeLattice::undefined();
        assert!(!lattice.defined());
        assert_eq!(lattice.size(), 0);
    }
}
