//! This module contains the DFA implementation.
//! The DFA is generated from the NFA using the subset construction algorithm
//! and is the only machine the matching and tracing operations run on.

use std::collections::{BTreeSet, VecDeque};

use itertools::Itertools;
use log::trace;

use crate::alphabet::Alphabet;
use crate::ids::{DfaStateID, NfaStateID};
use crate::nfa::Nfa;

/// The DFA implementation.
///
/// The transition table is total: every state has exactly one target per
/// alphabet symbol. The subset with no NFA states is materialized as a
/// regular dead state, so a lookup never has a missing-edge case. The DFA is
/// immutable after construction and safe to query concurrently.
#[derive(Debug, Clone)]
pub struct Dfa {
    // The states of the DFA. The start state is always state 0.
    states: Vec<DfaState>,
    // The accepting states of the DFA.
    final_states: BTreeSet<DfaStateID>,
    // The alphabet whose sorted symbol order indexes the transition columns.
    alphabet: Alphabet,
}

impl Dfa {
    /// Create a DFA from an NFA with the subset construction algorithm.
    ///
    /// Subsets are discovered breadth-first starting from the epsilon-closure
    /// of the NFA start state. For every subset and symbol the target is the
    /// epsilon-closure of the one-step successor set; the closure is taken
    /// after following the symbol edges, since those need not land in a
    /// closed set. Each distinct subset maps to exactly one DFA state,
    /// numbered in discovery order.
    pub(crate) fn from_nfa(nfa: &Nfa, alphabet: &Alphabet) -> Self {
        let mut dfa = Dfa {
            states: Vec::new(),
            final_states: BTreeSet::new(),
            alphabet: alphabet.clone(),
        };

        let start_set = nfa.epsilon_closure(nfa.start_state());
        let start_state = dfa.add_state_if_new(start_set, nfa.end_state());
        let mut work_queue = VecDeque::from([start_state]);

        while let Some(state_id) = work_queue.pop_front() {
            let nfa_states: BTreeSet<NfaStateID> =
                dfa.states[state_id].nfa_states.iter().copied().collect();
            for index in 0..dfa.alphabet.symbols().len() {
                let symbol = dfa.alphabet.symbols()[index];
                let target_set = nfa.epsilon_closure_set(nfa.move_set(&nfa_states, symbol));
                let known_states = dfa.states.len();
                let target_state = dfa.add_state_if_new(target_set, nfa.end_state());
                if dfa.states.len() > known_states {
                    work_queue.push_back(target_state);
                }
                dfa.states[state_id].transitions.push(target_state);
            }
        }

        trace!("DFA has {} states", dfa.states.len());
        dfa
    }

    /// Add a state for the given subset of NFA states unless the subset is
    /// already known. Subsets compare by value on their canonical sorted
    /// form, which is what guarantees termination of the construction.
    fn add_state_if_new(
        &mut self,
        nfa_states: BTreeSet<NfaStateID>,
        nfa_end_state: NfaStateID,
    ) -> DfaStateID {
        let is_final = nfa_states.contains(&nfa_end_state);
        let nfa_states: Vec<NfaStateID> = nfa_states.into_iter().collect();
        if let Some(state_id) = self
            .states
            .iter()
            .position(|state| state.nfa_states == nfa_states)
        {
            return DfaStateID::new(state_id);
        }

        let state_id = DfaStateID::new(self.states.len());
        trace!("Add DFA state {}: {:?}", state_id, nfa_states);
        if is_final {
            self.final_states.insert(state_id);
        }
        self.states.push(DfaState::new(state_id, nfa_states));
        state_id
    }

    /// Get the start state of the DFA.
    pub fn start_state(&self) -> DfaStateID {
        DfaStateID::new(0)
    }

    /// Get the states of the DFA.
    pub(crate) fn states(&self) -> &[DfaState] {
        &self.states
    }

    /// Get the accepting states of the DFA.
    pub fn final_states(&self) -> &BTreeSet<DfaStateID> {
        &self.final_states
    }

    /// Returns true if the given state is an accepting state.
    pub fn is_final(&self, state_id: DfaStateID) -> bool {
        self.final_states.contains(&state_id)
    }

    /// Get the alphabet the transition table is indexed with.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Get the target state for a transition on the symbol with the given
    /// column index. The table is total, so this never fails for a valid
    /// state and column.
    pub(crate) fn target(&self, state_id: DfaStateID, symbol_index: usize) -> DfaStateID {
        self.states[state_id].transitions[symbol_index]
    }

    /// A read-only projection of the transition table for external printing,
    /// one row per state in state-id order.
    pub fn transition_table(&self) -> Vec<TransitionTableRow> {
        self.states
            .iter()
            .map(|state| TransitionTableRow {
                state: state.id,
                is_final: self.is_final(state.id),
                transitions: self
                    .alphabet
                    .symbols()
                    .iter()
                    .zip(state.transitions.iter())
                    .map(|(symbol, target)| (*symbol, *target))
                    .collect(),
            })
            .collect()
    }
}

impl std::fmt::Display for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "DFA over {}", self.alphabet)?;
        for row in self.transition_table() {
            writeln!(
                f,
                "{}{}\t=> {}",
                if row.is_final { "*" } else { " " },
                row.state,
                row.transitions
                    .iter()
                    .map(|(symbol, target)| format!("{}:{}", symbol, target))
                    .join("\t")
            )?;
        }
        Ok(())
    }
}

/// A state of the DFA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DfaState {
    id: DfaStateID,
    // The canonical key of this state: the sorted ids of the NFA states that
    // constitute it. Empty for the dead state.
    nfa_states: Vec<NfaStateID>,
    // One target per alphabet symbol, indexed by the symbol's position in
    // the sorted alphabet.
    transitions: Vec<DfaStateID>,
}

impl DfaState {
    fn new(id: DfaStateID, nfa_states: Vec<NfaStateID>) -> Self {
        DfaState {
            id,
            nfa_states,
            transitions: Vec::new(),
        }
    }

    pub(crate) fn id(&self) -> DfaStateID {
        self.id
    }

    pub(crate) fn transitions(&self) -> &[DfaStateID] {
        &self.transitions
    }
}

/// One row of the transition-table projection: a state, its acceptance flag
/// and its per-symbol targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTableRow {
    /// The state this row describes.
    pub state: DfaStateID,
    /// True if the state is an accepting state.
    pub is_final: bool,
    /// The target state per alphabet symbol, in sorted symbol order.
    pub transitions: Vec<(char, DfaStateID)>,
}
