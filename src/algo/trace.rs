//! Diagnostics sink for the strip generation pipeline.
//!
//! The strip builder reports structured events through a caller-supplied
//! callback instead of writing to a global log. The default sink discards
//! everything, so tracing costs nothing unless a caller opts in.
//!
//! # Example
//!
//! ```
//! use tristrip::algo::trace::Trace;
//!
//! let trace = Trace::new(|event| {
//!     eprintln!("{:?}", event);
//! });
//! ```

/// A structured event reported during strip generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// The dual graph for one material has been built and connected.
    GraphBuilt {
        /// Material id the graph belongs to.
        material: u16,
        /// Number of triangles collected.
        nodes: usize,
        /// Nodes with no shared edges.
        lone: usize,
        /// Strip boundary nodes after connection.
        ends: usize,
    },
    /// The greedy strip builder finished for one material.
    StripsBuilt {
        /// Material id.
        material: u16,
        /// Number of independent strips built.
        strips: usize,
    },
    /// A tunnel search succeeded and two strips were fused.
    TunnelApplied {
        /// Material id.
        material: u16,
        /// Number of edges whose classification was toggled.
        path_edges: usize,
    },
    /// The tunnel optimizer finished for one material.
    TunnelDone {
        /// Material id.
        material: u16,
        /// Number of independent strips remaining.
        strips: usize,
    },
    /// One material's index stream has been emitted.
    MeshEmitted {
        /// Material id.
        material: u16,
        /// Number of strip and isolated-triangle runs in the stream.
        runs: usize,
        /// Length of the emitted index stream.
        indices: usize,
    },
}

/// A diagnostics callback that receives [`TraceEvent`]s during strip
/// generation.
pub struct Trace {
    callback: Box<dyn Fn(&TraceEvent) + Send + Sync>,
}

impl Trace {
    /// Create a new trace sink with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&TraceEvent) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Report an event.
    #[inline]
    pub fn emit(&self, event: TraceEvent) {
        (self.callback)(&event);
    }

    /// Create a no-op sink that discards all events.
    pub fn none() -> Self {
        Self::new(|_| {})
    }
}

impl Default for Trace {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Trace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Trace").finish_non_exhaustive()
    }
}
