//! Strongly connected components of the reactor subgraph
//!
//! Units that require each other (directly or through other reactor units)
//! must share a subpackage, so placement treats each component as a single
//! node. Only reactor units and edges between them are considered; external
//! units never take part in placement inference.
//!
//! ## Algorithm
//!
//! Tarjan's algorithm with an explicit call stack instead of recursion, so
//! deep dependency chains cannot overflow the thread stack:
//!
//! 1. Each node gets a discovery `index` and a `low` link
//! 2. Nodes are pushed on the component stack when discovered
//! 3. When a node finishes with `low == index` it roots a component, which is
//!    popped off the component stack
//!
//! Components are returned with their members sorted by arena index, ordered
//! by their smallest member.

use crate::catalog::UnitCatalog;
use super::DependencyGraph;

/// Reactor units grouped into strongly connected components
#[derive(Debug, Clone, Default)]
pub struct ReactorComponents {
    components: Vec<Vec<usize>>,
    component_of: Vec<Option<usize>>,
}

impl ReactorComponents {
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Members of component `component`, in arena order
    pub fn members(&self, component: usize) -> &[usize] {
        &self.components[component]
    }

    /// Component containing unit `idx`, or `None` for external units
    pub fn component_of(&self, idx: usize) -> Option<usize> {
        self.component_of.get(idx).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[usize])> {
        self.components
            .iter()
            .enumerate()
            .map(|(component, members)| (component, members.as_slice()))
    }
}

/// Per-node Tarjan state
#[derive(Debug, Clone, Copy)]
struct NodeState {
    index: usize,
    low: usize,
    on_stack: bool,
}

/// Call stack frame: node plus its remaining reactor successors
struct Frame {
    node: usize,
    successors: Vec<usize>,
    next: usize,
}

/// Compute the strongly connected components of the reactor subgraph
///
/// # Example
///
/// ```text
/// Reactor edges:
///   a -> b, b -> a, b -> c
///
/// Components:
///   {a, b}, {c}
/// ```
pub fn reactor_components(catalog: &UnitCatalog, graph: &DependencyGraph) -> ReactorComponents {
    let reactor_successors = |node: usize| -> Vec<usize> {
        graph
            .requires(node)
            .filter(|&dep| catalog.unit(dep).is_reactor())
            .collect()
    };

    let mut state: Vec<Option<NodeState>> = vec![None; catalog.len()];
    let mut component_stack: Vec<usize> = Vec::new();
    let mut found: Vec<Vec<usize>> = Vec::new();
    let mut counter = 0;

    for (root, unit) in catalog.iter() {
        if !unit.is_reactor() || state[root].is_some() {
            continue;
        }

        state[root] = Some(NodeState {
            index: counter,
            low: counter,
            on_stack: true,
        });
        counter += 1;
        component_stack.push(root);
        let mut frames = vec![Frame {
            node: root,
            successors: reactor_successors(root),
            next: 0,
        }];

        while let Some(frame) = frames.last_mut() {
            let node = frame.node;

            if let Some(&succ) = frame.successors.get(frame.next) {
                frame.next += 1;
                match state[succ] {
                    None => {
                        state[succ] = Some(NodeState {
                            index: counter,
                            low: counter,
                            on_stack: true,
                        });
                        counter += 1;
                        component_stack.push(succ);
                        frames.push(Frame {
                            node: succ,
                            successors: reactor_successors(succ),
                            next: 0,
                        });
                    }
                    Some(succ_state) if succ_state.on_stack => {
                        if let Some(node_state) = state[node].as_mut() {
                            node_state.low = node_state.low.min(succ_state.index);
                        }
                    }
                    Some(_) => {}
                }
                continue;
            }

            frames.pop();
            let Some(node_state) = state[node] else {
                continue;
            };

            if let Some(parent) = frames.last() {
                if let Some(parent_state) = state[parent.node].as_mut() {
                    parent_state.low = parent_state.low.min(node_state.low);
                }
            }

            if node_state.low == node_state.index {
                let mut members = Vec::new();
                while let Some(member) = component_stack.pop() {
                    if let Some(member_state) = state[member].as_mut() {
                        member_state.on_stack = false;
                    }
                    members.push(member);
                    if member == node {
                        break;
                    }
                }
                members.sort_unstable();
                found.push(members);
            }
        }
    }

    found.sort_by_key(|members| members[0]);

    let mut component_of = vec![None; catalog.len()];
    for (component, members) in found.iter().enumerate() {
        for &member in members {
            component_of[member] = Some(component);
        }
    }

    tracing::debug!(components = found.len(), "reactor components computed");
    ReactorComponents {
        components: found,
        component_of,
    }
}
