//! **antpath-core** — grid and geometry types shared by the antpath searches.
//!
//! This crate provides the obstacle [`Grid`] a route is searched on, the
//! integer [`Point`] used to address its cells, and the four unit
//! [`Direction`]s a route is made of.

pub mod geom;
pub mod grid;

pub use geom::{Direction, Point};
pub use grid::{Grid, GridDataError, GridParseError};
