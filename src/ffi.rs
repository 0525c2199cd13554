use crate::algorithm::eppstein::{CostPolicy, Eppstein, KShortestPaths, KspQuery};
use crate::graph::directed::DirectedGraph;
use ordered_float::OrderedFloat;

#[repr(C)]
pub struct FfiGraph {
    graph: DirectedGraph<OrderedFloat<f64>>,
}

#[no_mangle]
pub extern "C" fn ksp_graph_new(vertices: usize) -> *mut FfiGraph {
    Box::into_raw(Box::new(FfiGraph {
        graph: DirectedGraph::with_capacity(vertices),
    }))
}

/// Returns false when an endpoint is out of range or the weight is negative or NaN
#[no_mangle]
pub extern "C" fn ksp_graph_add_edge(
    g: *mut FfiGraph,
    from: usize,
    to: usize,
    weight: f64,
) -> bool {
    if g.is_null() || weight.is_nan() {
        return false;
    }
    unsafe { &mut *g }
        .graph
        .add_edge(from, to, OrderedFloat(weight))
        .is_ok()
}

#[no_mangle]
pub extern "C" fn ksp_graph_free(g: *mut FfiGraph) {
    if !g.is_null() {
        unsafe {
            drop(Box::from_raw(g));
        }
    }
}

#[repr(C)]
pub struct FfiCosts {
    costs: *mut f64,
    len: usize,
    reachable: bool,
}

#[no_mangle]
pub extern "C" fn ksp_result_free(res: *mut FfiCosts) {
    if !res.is_null() {
        unsafe {
            if !(*res).costs.is_null() {
                drop(Vec::from_raw_parts((*res).costs, (*res).len, (*res).len));
            }
            drop(Box::from_raw(res));
        }
    }
}

/// Up to `k` path costs in non-decreasing order, or null on invalid input
#[no_mangle]
pub extern "C" fn ksp_k_shortest(
    g: *const FfiGraph,
    source: usize,
    destination: usize,
    k: usize,
    distinct: bool,
) -> *mut FfiCosts {
    if g.is_null() {
        return std::ptr::null_mut();
    }
    let graph = unsafe { &(*g).graph };
    let policy = if distinct {
        CostPolicy::DistinctCosts
    } else {
        CostPolicy::AllowRepeats
    };
    let query = KspQuery::new(source, destination, k);
    match Eppstein::new().with_policy(policy).k_shortest_paths(graph, &query) {
        Ok(result) => {
            let reachable = !matches!(result, KShortestPaths::Unreachable);
            let costs: Vec<f64> = result.costs().into_iter().map(|c| c.0).collect();
            // Exact length so `from_raw_parts` can rebuild it with len == capacity.
            let mut costs = costs.into_boxed_slice();
            let len = costs.len();
            let costs_ptr = if len == 0 {
                std::ptr::null_mut()
            } else {
                costs.as_mut_ptr()
            };
            std::mem::forget(costs);
            Box::into_raw(Box::new(FfiCosts {
                costs: costs_ptr,
                len,
                reachable,
            }))
        }
        Err(err) => {
            log::debug!("ksp_k_shortest rejected query: {}", err);
            std::ptr::null_mut()
        }
    }
}
