//! PyO3 bindings exposing the builder for smoke testing.
//!
//! PyO3 compiles this crate into a CPython extension and wires Rust types
//! into a Python module via the `#[pymodule]` entrypoint; see
//! https://pyo3.rs/latest/ for patterns and lifecycle details.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyModule;

use crate::{Angle, Builder, BuilderOptions, UnitVec};

fn to_py_err(err: crate::BuilderError) -> PyErr {
  PyValueError::new_err(err.to_string())
}

#[pyclass(name = "Builder")]
struct PyBuilder {
  inner: Option<Builder>,
}

#[pymethods]
impl PyBuilder {
  #[new]
  #[pyo3(signature = (
    undirected_edges=false,
    xor_edges=false,
    vertex_merge_radius_rad=0.0,
    edge_splice_fraction=0.0,
    snap_to_cell_centers=false,
    robustness_radius_rad=0.0,
  ))]
  fn new(
    undirected_edges: bool,
    xor_edges: bool,
    vertex_merge_radius_rad: f64,
    edge_splice_fraction: f64,
    snap_to_cell_centers: bool,
    robustness_radius_rad: f64,
  ) -> PyResult<Self> {
    let options = BuilderOptions::builder()
      .undirected_edges(undirected_edges)
      .xor_edges(xor_edges)
      .vertex_merge_radius(Angle::from_radians(vertex_merge_radius_rad))
      .edge_splice_fraction(edge_splice_fraction)
      .snap_to_cell_centers(snap_to_cell_centers)
      .robustness_radius(Angle::from_radians(robustness_radius_rad))
      .build()
      .map_err(to_py_err)?;
    Ok(Self {
      inner: Some(Builder::new(options)),
    })
  }

  fn add_edge(&mut self, src: (f64, f64, f64), dst: (f64, f64, f64)) -> PyResult<()> {
    let builder = self.inner.as_mut().expect("builder already consumed by assemble");
    builder.add_edge(unit_vec(src)?, unit_vec(dst)?);
    Ok(())
  }

  fn add_loop(&mut self, vertices: Vec<(f64, f64, f64)>) -> PyResult<()> {
    let builder = self.inner.as_mut().expect("builder already consumed by assemble");
    let points = vertices.into_iter().map(unit_vec).collect::<PyResult<Vec<_>>>()?;
    builder.add_loop(&points);
    Ok(())
  }

  /// Consume the builder and return `(loops, unused_edges)`, where each
  /// loop and edge endpoint is an `(x, y, z)` tuple.
  #[allow(clippy::type_complexity)]
  fn assemble_loops(&mut self) -> PyResult<(Vec<Vec<(f64, f64, f64)>>, Vec<((f64, f64, f64), (f64, f64, f64))>)> {
    let builder = self
      .inner
      .take()
      .ok_or_else(|| PyValueError::new_err("builder already consumed by assemble_loops"))?;
    let result = builder.assemble_loops();
    let loops = result
      .loops
      .into_iter()
      .map(|l| l.into_iter().map(tuple).collect())
      .collect();
    let unused = result
      .unused_edges
      .into_iter()
      .map(|e| (tuple(e.src), tuple(e.dst)))
      .collect();
    Ok((loops, unused))
  }
}

fn unit_vec(xyz: (f64, f64, f64)) -> PyResult<UnitVec> {
  UnitVec::from_xyz(xyz.0, xyz.1, xyz.2).map_err(to_py_err)
}

fn tuple(v: UnitVec) -> (f64, f64, f64) {
  (v.x, v.y, v.z)
}

#[pymodule]
fn _geosplice(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
  m.add_class::<PyBuilder>()?;
  Ok(())
}
