//! Graph networks built by the flow and resistance heuristics, and the
//! solvers that reduce them to a single number
//!
//! The heuristics only depend on the `FlowSolver` and `CircuitSolver`
//! traits; `EdmondsKarp` and `LaplacianSolver` are the default backends.

mod circuit;
mod flow;

pub use circuit::LaplacianSolver;
pub use flow::EdmondsKarp;

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::board::Move;

/// Named node of a board network
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeId {
    Cell(Move),
    /// Virtual node standing for a player's first edge
    Source,
    /// Virtual node standing for a player's second edge
    Sink,
}

/// Degenerate network outcomes
#[derive(Debug, Error, PartialEq)]
pub enum NetworkError {
    #[error("flow between {0:?} and {1:?} is unbounded")]
    Unbounded(NodeId, NodeId),

    #[error("node {0:?} is not part of the network")]
    UnknownNode(NodeId),

    #[error("circuit equations are singular")]
    Singular,
}

// ============================================================================
// NODE TABLE
// ============================================================================

/// Dense indices for named nodes
#[derive(Clone, Debug, Default)]
struct NodeTable {
    ids: Vec<NodeId>,
    index: FxHashMap<NodeId, usize>,
}

impl NodeTable {
    fn intern(&mut self, id: NodeId) -> usize {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.ids.len();
        self.ids.push(id);
        self.index.insert(id, idx);
        idx
    }

    fn get(&self, id: NodeId) -> Result<usize, NetworkError> {
        self.index.get(&id).copied().ok_or(NetworkError::UnknownNode(id))
    }

    fn len(&self) -> usize {
        self.ids.len()
    }
}

// ============================================================================
// FLOW NETWORK
// ============================================================================

/// Directed arc with a capacity (`f64::INFINITY` allowed)
#[derive(Clone, Copy, Debug)]
pub struct FlowArc {
    pub from: usize,
    pub to: usize,
    pub capacity: f64,
}

/// Directed capacity graph
#[derive(Clone, Debug, Default)]
pub struct FlowNetwork {
    nodes: NodeTable,
    arcs: Vec<FlowArc>,
}

impl FlowNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_arc(&mut self, from: NodeId, to: NodeId, capacity: f64) {
        let from = self.nodes.intern(from);
        let to = self.nodes.intern(to);
        self.arcs.push(FlowArc { from, to, capacity });
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn arcs(&self) -> &[FlowArc] {
        &self.arcs
    }

    pub fn index_of(&self, id: NodeId) -> Result<usize, NetworkError> {
        self.nodes.get(id)
    }
}

/// Maximum-flow backend
pub trait FlowSolver {
    /// Value of a maximum `source` -> `sink` flow; `NetworkError::Unbounded`
    /// when a path of infinite arcs joins them
    fn max_flow(&self, network: &FlowNetwork, source: NodeId, sink: NodeId) -> Result<f64, NetworkError>;
}

// ============================================================================
// RESISTIVE NETWORK
// ============================================================================

/// Undirected resistor; zero resistance is a short
#[derive(Clone, Copy, Debug)]
pub struct Resistor {
    pub a: usize,
    pub b: usize,
    pub ohms: f64,
}

/// Undirected resistor graph
#[derive(Clone, Debug, Default)]
pub struct ResistiveNetwork {
    nodes: NodeTable,
    resistors: Vec<Resistor>,
}

impl ResistiveNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_resistor(&mut self, a: NodeId, b: NodeId, ohms: f64) {
        let a = self.nodes.intern(a);
        let b = self.nodes.intern(b);
        self.resistors.push(Resistor { a, b, ohms });
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn resistors(&self) -> &[Resistor] {
        &self.resistors
    }

    pub fn index_of(&self, id: NodeId) -> Result<usize, NetworkError> {
        self.nodes.get(id)
    }
}

/// Linear circuit backend for a single unit voltage source
pub trait CircuitSolver {
    /// Current through a 1 V source placed between `positive` and `negative`.
    ///
    /// `f64::INFINITY` for a short circuit, 0 when no conducting path exists.
    fn source_current(
        &self,
        network: &ResistiveNetwork,
        positive: NodeId,
        negative: NodeId,
    ) -> Result<f64, NetworkError>;
}
