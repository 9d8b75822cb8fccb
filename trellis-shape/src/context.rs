use trellis_types::{Caller, WeightMap};

/// Ambient, call-scoped data for one save operation.
///
/// Created at the top of a save call, passed by reference through every
/// level of the compiler, and discarded when the call returns. Never shared
/// across concurrent save calls.
///
/// The weight map must be frozen here *before* any shaping begins: the
/// compiler reads it while filling the weight scalars of each versioned
/// entity, and a half-built map would be observable otherwise.
#[derive(Debug, Clone)]
pub struct ShapeContext {
    pub caller: Caller,
    weights: WeightMap,
}

impl ShapeContext {
    /// Context for a save call that touches no versioned types.
    #[must_use]
    pub fn new(caller: Caller) -> Self {
        Self {
            caller,
            weights: WeightMap::new(),
        }
    }

    /// Freezes the batch-computed weight map into the context.
    #[must_use]
    pub fn with_weights(caller: Caller, weights: WeightMap) -> Self {
        Self { caller, weights }
    }

    /// Read-only view of the frozen weight map.
    #[must_use]
    pub fn weights(&self) -> &WeightMap {
        &self.weights
    }
}
