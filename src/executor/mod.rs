//! # Operation executors
//!
//! An executor performs the per-lane primitive computation behind every
//! vector operation. The crate ships a portable [`ScalarExecutor`]; an
//! accelerated executor (hand-written intrinsics, a JIT, ...) can be installed
//! per element type before that type's first use, without touching the
//! vector API.
//!
//! # Architecture
//!
//! Operations are split by arity, mirroring the primitive layer of a SIMD
//! backend:
//!
//! - **binary**: `add sub mul div min max and or xor` and the saturating forms
//! - **unary**: `neg abs not sqrt`
//! - **ternary**: fused `mul_add`
//! - **shift**: element-bit shifts by a uniform amount
//! - **compare**: lane predicates producing booleans
//! - **reduce**: left-to-right fold from an identity
//!
//! Executors work on lane slices of equal length; the vector layer validates
//! species and lengths before calling in.

use core::fmt::Debug;

use log::info;

use crate::element::Element;
use crate::error::{Result, VectorError};

pub mod scalar;

pub use scalar::ScalarExecutor;

/// Two-operand lane-wise operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// Floating division. Integral executors yield zero for zero divisors.
    Div,
    Min,
    Max,
    AddSaturate,
    SubSaturate,
    And,
    Or,
    Xor,
}

/// Single-operand lane-wise operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Abs,
    Not,
    Sqrt,
}

/// Three-operand lane-wise operations.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TernaryOp {
    /// `a * b + c`, fused for floats, wrapping for integers.
    MulAdd,
}

/// Element-bit shifts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShiftOp {
    Left,
    /// Zero-filling right shift.
    RightLogical,
    /// Sign-propagating right shift.
    RightArithmetic,
}

/// Lane predicates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// Left-to-right folds over all lanes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReduceOp {
    Add,
    /// `0 - x0 - x1 - ...`
    Sub,
    Mul,
    Min,
    Max,
    And,
    Or,
    Xor,
}

impl ReduceOp {
    /// The identity element the fold starts from.
    #[inline]
    pub fn identity<E: Element>(self) -> E {
        match self {
            ReduceOp::Add | ReduceOp::Sub | ReduceOp::Or | ReduceOp::Xor => E::ZERO,
            ReduceOp::Mul => E::ONE,
            ReduceOp::And => E::all_ones(),
            ReduceOp::Min => E::MIN_IDENTITY,
            ReduceOp::Max => E::MAX_IDENTITY,
        }
    }

    /// The binary operation folded by this reduction.
    #[inline]
    pub fn combiner(self) -> BinaryOp {
        match self {
            ReduceOp::Add => BinaryOp::Add,
            ReduceOp::Sub => BinaryOp::Sub,
            ReduceOp::Mul => BinaryOp::Mul,
            ReduceOp::Min => BinaryOp::Min,
            ReduceOp::Max => BinaryOp::Max,
            ReduceOp::And => BinaryOp::And,
            ReduceOp::Or => BinaryOp::Or,
            ReduceOp::Xor => BinaryOp::Xor,
        }
    }
}

/// The capability set a vector operation needs from its executor.
///
/// All slices passed to one call have the same length. Implementations must
/// be pure: the same inputs always produce the same outputs.
pub trait LaneExecutor<E: Element>: Send + Sync + Debug {
    /// Short name for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// `out[i] = op(a[i], b[i])`.
    fn binary(&self, op: BinaryOp, a: &[E], b: &[E], out: &mut [E]);

    /// `out[i] = op(a[i])`.
    fn unary(&self, op: UnaryOp, a: &[E], out: &mut [E]);

    /// `out[i] = op(a[i], b[i], c[i])`.
    fn ternary(&self, op: TernaryOp, a: &[E], b: &[E], c: &[E], out: &mut [E]);

    /// `out[i] = op(a[i], amount)`; `amount` is below the element bit width.
    fn shift(&self, op: ShiftOp, a: &[E], amount: u32, out: &mut [E]);

    /// `out[i] = op(a[i], b[i])`.
    fn compare(&self, op: CompareOp, a: &[E], b: &[E], out: &mut [bool]);

    /// Folds `lanes` left to right starting from `op.identity()`.
    fn reduce(&self, op: ReduceOp, lanes: &[E]) -> E;
}

/// Installs an accelerated executor for element type `E`.
///
/// Must run before the first vector operation on `E`; afterwards the slot is
/// frozen and this fails with a construction error.
pub fn install_executor<E: Element>(executor: Box<dyn LaneExecutor<E>>) -> Result<()> {
    let name = executor.name();
    E::executor_slot().set(executor).map_err(|_| {
        VectorError::construction(format!(
            "executor for {} already resolved; install before first use",
            E::KIND
        ))
    })?;
    info!("Installed {} executor for {} lanes", name, E::KIND);
    Ok(())
}

/// The executor serving element type `E`, defaulting to the scalar one.
#[inline]
pub fn executor<E: Element>() -> &'static dyn LaneExecutor<E> {
    &**E::executor_slot().get_or_init(|| Box::new(ScalarExecutor) as Box<dyn LaneExecutor<E>>)
}
