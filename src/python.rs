use crate::algorithm::eppstein::{CostPolicy, Eppstein, KShortestPaths, KspQuery};
use crate::graph::directed::DirectedGraph;
use ordered_float::OrderedFloat;
use pyo3::prelude::*;

#[pyclass]
pub struct PyGraph {
    graph: DirectedGraph<OrderedFloat<f64>>,
}

#[pymethods]
impl PyGraph {
    #[new]
    fn new(vertices: usize) -> Self {
        PyGraph {
            graph: DirectedGraph::with_capacity(vertices),
        }
    }

    fn add_edge(&mut self, from: usize, to: usize, weight: f64) -> PyResult<()> {
        if weight.is_nan() {
            return Err(pyo3::exceptions::PyValueError::new_err("weight is NaN"));
        }
        self.graph
            .add_edge(from, to, OrderedFloat(weight))
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }
}

#[pyclass]
pub struct PyEppstein {
    inner: Eppstein,
}

#[pymethods]
impl PyEppstein {
    #[new]
    #[pyo3(signature = (distinct = false, record_paths = false))]
    fn new(distinct: bool, record_paths: bool) -> Self {
        let policy = if distinct {
            CostPolicy::DistinctCosts
        } else {
            CostPolicy::AllowRepeats
        };
        PyEppstein {
            inner: Eppstein::new()
                .with_policy(policy)
                .with_path_recording(record_paths),
        }
    }

    /// Returns None when the destination is unreachable, otherwise a list of
    /// (cost, vertices) pairs; vertices is None unless paths are recorded.
    fn k_shortest_paths(
        &self,
        graph: &PyGraph,
        source: usize,
        destination: usize,
        k: usize,
    ) -> PyResult<Option<Vec<(f64, Option<Vec<usize>>)>>> {
        let result = self
            .inner
            .k_shortest_paths(&graph.graph, &KspQuery::new(source, destination, k))
            .map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))?;
        Ok(match result {
            KShortestPaths::Unreachable => None,
            KShortestPaths::Found(paths) => Some(
                paths
                    .into_iter()
                    .map(|path| (path.cost.0, path.vertices))
                    .collect(),
            ),
        })
    }
}

#[pymodule]
fn eppstein_ksp_py(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyGraph>()?;
    m.add_class::<PyEppstein>()?;
    Ok(())
}
