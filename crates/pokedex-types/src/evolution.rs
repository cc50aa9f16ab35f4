//! Species and evolution-chain records, and the pre-order flatten.
//!
//! An evolution chain is a tree rooted at the base form:
//!
//! ```text
//! eevee
//!  ├── vaporeon
//!  ├── jolteon
//!  └── flareon
//! ```
//!
//! [`EvolutionNode::flatten`] turns it into display order
//! (`[eevee, vaporeon, jolteon, flareon]`): each node's name, followed by the
//! flattened children in order. The walk uses an explicit stack, so the depth
//! of the tree never translates into call-stack depth. The upstream data is
//! not under our control, so [`EvolutionNode::try_flatten`] additionally
//! rejects trees deeper than a configured bound.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::pokemon::{ApiResource, NamedResource};

/// Default bound on evolution-tree depth. Real chains have at most 3 stages.
pub const MAX_CHAIN_DEPTH: usize = 64;

/// An evolution tree exceeded the allowed depth.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("evolution chain deeper than {max_depth} stages")]
pub struct ChainTooDeep {
    /// The bound that was exceeded.
    pub max_depth: usize,
}

/// The species record returned by `GET /pokemon-species/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Species {
    /// Species name.
    #[serde(default)]
    pub name: String,
    /// Link to the evolution chain. Absent on malformed records.
    #[serde(default)]
    pub evolution_chain: Option<ApiResource>,
}

/// The record returned by `GET /evolution-chain/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EvolutionChain {
    /// Chain identifier.
    #[serde(default)]
    pub id: u32,
    /// Root of the tree (the base form).
    pub chain: EvolutionNode,
}

/// One stage of an evolution tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EvolutionNode {
    /// The species at this stage.
    pub species: NamedResource,
    /// Direct evolutions, in API order. Empty for a final stage.
    #[serde(default)]
    pub evolves_to: Vec<EvolutionNode>,
}

impl EvolutionNode {
    /// Build a node from a species name and its direct evolutions.
    pub fn new(name: impl Into<String>, evolves_to: Vec<Self>) -> Self {
        Self {
            species: NamedResource::new(name, String::new()),
            evolves_to,
        }
    }

    /// Build a final-stage node with no evolutions.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Species name at this stage.
    pub fn name(&self) -> &str {
        &self.species.name
    }

    /// Pre-order species names of the whole tree.
    pub fn flatten(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            names.push(node.species.name.clone());
            // Reversed so the first child is popped next.
            stack.extend(node.evolves_to.iter().rev());
        }
        names
    }

    /// Pre-order species names, rejecting trees with more than `max_depth`
    /// stages along any path.
    pub fn try_flatten(&self, max_depth: usize) -> Result<Vec<String>, ChainTooDeep> {
        let mut names = Vec::new();
        let mut stack = vec![(self, 1_usize)];
        while let Some((node, depth)) = stack.pop() {
            if depth > max_depth {
                return Err(ChainTooDeep { max_depth });
            }
            names.push(node.species.name.clone());
            let next = depth.saturating_add(1);
            stack.extend(node.evolves_to.iter().rev().map(|child| (child, next)));
        }
        Ok(names)
    }
}
