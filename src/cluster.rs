//! Node affinity and remote execution.
//!
//! The factorization issues exactly one remote call per pivot round, addressed
//! to the node owning the pivot row. The cluster is an injected dependency so
//! the numerical code stays free of global state; [`LocalCluster`] provides the
//! single-process simulation used for in-memory training and tests.

use std::sync::Arc;

use crate::data::Layout;

/// Identifier of a cluster node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// A remote call failed. There is no retry and no timeout: a non-responsive
/// node aborts the computation that issued the call.
#[derive(Debug, thiserror::Error)]
pub enum ClusterError {
    /// The addressed node did not acknowledge the call.
    #[error("node {0} is unreachable")]
    Unreachable(usize),
}

/// Locating rows and running work on their home node.
pub trait Cluster {
    /// Returns the node owning the partition that contains `row`.
    fn locate(&self, row: usize) -> NodeId;

    /// Runs `task` on `node` and blocks until it returns.
    fn call_on<R>(&self, node: NodeId, task: impl FnOnce() -> R) -> Result<R, ClusterError>
    where
        Self: Sized;
}

/// Single-process cluster: every partition is local and remote calls execute
/// inline on the calling thread.
pub struct LocalCluster {
    layout: Arc<Layout>,
}

impl LocalCluster {
    /// Creates a cluster over the given partition layout.
    pub fn new(layout: Arc<Layout>) -> Self {
        LocalCluster { layout }
    }
}

impl Cluster for LocalCluster {
    fn locate(&self, row: usize) -> NodeId {
        self.layout.node_of(row)
    }

    fn call_on<R>(&self, _node: NodeId, task: impl FnOnce() -> R) -> Result<R, ClusterError> {
        Ok(task())
    }
}
