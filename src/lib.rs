//! # lanewise
//!
//! Fixed-width lane-parallel vectors over typed numeric elements.
//!
//! ## Model
//!
//! **The species IS the vector type.**
//!
//! - `Species<i32>` at `Shape::S128`: 4 lanes of `i32`
//! - `Species<u8>` at `Shape::S256`: 32 lanes of `u8`
//! - `Species<f64>` at `Shape::Max`: as many `f64` lanes as the widest
//!   native register holds
//!
//! A species is a process-wide singleton and the factory of every
//! [`Vector`], [`Mask`] and [`Shuffle`] of its kind. Values are immutable;
//! each operation validates its operands and returns a new value. Mixing
//! species is a [`VectorError::SpeciesMismatch`], never an implicit coercion.
//!
//! ```
//! use lanewise::{Shape, Species};
//!
//! let s = Species::<i32>::of(Shape::S128)?;
//! let v = s.from_values(&[1, 2, 3, 4])?;
//! let w = v.mul(&s.broadcast(10))?.add(&v)?;
//! assert_eq!(w.to_array(), vec![11, 22, 33, 44]);
//! assert_eq!(w.add_all(), 110);
//! # Ok::<(), lanewise::VectorError>(())
//! ```
//!
//! Lane computation runs on the [`LaneExecutor`] registered per element
//! type; [`ScalarExecutor`] serves every type unless another one is installed
//! with [`install_executor`].

pub mod buffer;
pub mod config;
pub mod element;
pub mod error;
pub mod executor;
pub mod mask;
pub mod shape;
pub mod shuffle;
pub mod species;
pub mod vector;

pub use buffer::{ByteBuffer, ByteOrder};
pub use config::Config;
pub use element::{Element, ElementKind, FloatElement, IntElement, KindFlags};
pub use error::{Result, VectorError};
pub use executor::{install_executor, LaneExecutor, ScalarExecutor};
pub use mask::Mask;
pub use shape::Shape;
pub use shuffle::Shuffle;
pub use species::Species;
pub use vector::Vector;
