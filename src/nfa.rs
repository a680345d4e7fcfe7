//! This module contains the NFA (Non-deterministic Finite Automaton) implementation.
//! The NFA is built from the postfix form of a regex with Thompson's
//! construction and is later converted to a DFA for matching strings.

use std::collections::BTreeSet;

use log::trace;

use crate::alphabet::Alphabet;
use crate::errors::SyntaxError;
use crate::ids::NfaStateID;
use crate::Result;

/// An NFA over a fixed alphabet.
///
/// States live in an arena and reference each other by id, so the epsilon
/// back-edges introduced by Kleene closure are plain indices and the whole
/// graph stays cycle-safe. State ids are minted monotonically within one
/// construction and are never reused across compilations.
#[derive(Debug, Clone)]
pub(crate) struct Nfa {
    states: Vec<NfaState>,
    start_state: NfaStateID,
    // The end state is the sole accepting state of the NFA.
    end_state: NfaStateID,
}

/// A sub-automaton under construction, identified by its entry and exit
/// states in the shared arena. Composition grafts epsilon edges between
/// fragments, it never copies their states.
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: NfaStateID,
    end: NfaStateID,
}

impl Nfa {
    /// Build an NFA from the postfix form of a regex by evaluating the token
    /// stream left to right over a stack of fragments.
    ///
    /// Returns a `SyntaxError` if an operator finds too few operands on the
    /// stack or if anything other than exactly one fragment remains at the
    /// end. Both imply a malformed expression.
    pub(crate) fn from_postfix(postfix: &str, alphabet: &Alphabet) -> Result<Self> {
        let mut nfa = Nfa {
            states: Vec::new(),
            start_state: NfaStateID::default(),
            end_state: NfaStateID::default(),
        };
        let mut stack: Vec<Fragment> = Vec::new();

        for token in postfix.chars() {
            let fragment = match token {
                '+' => {
                    let rhs = Self::pop_operand(&mut stack, token)?;
                    let lhs = Self::pop_operand(&mut stack, token)?;
                    nfa.union(lhs, rhs)
                }
                '.' => {
                    let rhs = Self::pop_operand(&mut stack, token)?;
                    let lhs = Self::pop_operand(&mut stack, token)?;
                    nfa.concatenate(lhs, rhs)
                }
                '*' => {
                    let inner = Self::pop_operand(&mut stack, token)?;
                    nfa.closure(inner)
                }
                symbol => {
                    debug_assert!(alphabet.contains(symbol));
                    nfa.literal(symbol)
                }
            };
            stack.push(fragment);
        }

        let Some(fragment) = stack.pop() else {
            return Err(SyntaxError::MalformedExpression("empty expression".to_string()).into());
        };
        if !stack.is_empty() {
            return Err(SyntaxError::MalformedExpression(
                "expression leaves unconsumed operands".to_string(),
            )
            .into());
        }

        nfa.start_state = fragment.start;
        nfa.end_state = fragment.end;
        trace!("NFA for postfix '{}' has {} states", postfix, nfa.states.len());
        Ok(nfa)
    }

    fn pop_operand(stack: &mut Vec<Fragment>, operator: char) -> Result<Fragment> {
        stack.pop().ok_or_else(|| {
            SyntaxError::MalformedExpression(format!(
                "operator '{}' is missing an operand",
                operator
            ))
            .into()
        })
    }

    /// A literal symbol: two new states joined by one symbol transition.
    fn literal(&mut self, symbol: char) -> Fragment {
        let start = self.new_state();
        let end = self.new_state();
        self.add_transition(start, symbol, end);
        Fragment { start, end }
    }

    /// Concatenation `A.B`: one epsilon edge from A's end to B's start.
    /// No new states.
    fn concatenate(&mut self, lhs: Fragment, rhs: Fragment) -> Fragment {
        self.add_epsilon_transition(lhs.end, rhs.start);
        Fragment {
            start: lhs.start,
            end: rhs.end,
        }
    }

    /// Union `A+B`: two new states, epsilon edges fanning out to both
    /// operands and back in from both ends.
    fn union(&mut self, lhs: Fragment, rhs: Fragment) -> Fragment {
        let start = self.new_state();
        let end = self.new_state();
        self.add_epsilon_transition(start, lhs.start);
        self.add_epsilon_transition(start, rhs.start);
        self.add_epsilon_transition(lhs.end, end);
        self.add_epsilon_transition(rhs.end, end);
        Fragment { start, end }
    }

    /// Kleene closure `A*`: two new states, a back-edge enabling repetition
    /// and a bypass edge enabling zero repetitions.
    fn closure(&mut self, inner: Fragment) -> Fragment {
        let start = self.new_state();
        let end = self.new_state();
        self.add_epsilon_transition(start, inner.start);
        self.add_epsilon_transition(inner.end, end);
        self.add_epsilon_transition(inner.end, inner.start);
        self.add_epsilon_transition(start, end);
        Fragment { start, end }
    }

    pub(crate) fn start_state(&self) -> NfaStateID {
        self.start_state
    }

    pub(crate) fn end_state(&self) -> NfaStateID {
        self.end_state
    }

    pub(crate) fn states(&self) -> &[NfaState] {
        &self.states
    }

    fn new_state(&mut self) -> NfaStateID {
        let state = NfaStateID::new(self.states.len());
        self.states.push(NfaState::new(state));
        state
    }

    fn add_transition(&mut self, from: NfaStateID, symbol: char, to: NfaStateID) {
        self.states[from].transitions.push(NfaTransition {
            symbol,
            target_state: to,
        });
    }

    fn add_epsilon_transition(&mut self, from: NfaStateID, to: NfaStateID) {
        self.states[from]
            .epsilon_transitions
            .push(EpsilonTransition { target_state: to });
    }

    /// The epsilon-closure of a single state: all states reachable through
    /// epsilon edges alone, including the state itself.
    pub(crate) fn epsilon_closure(&self, state: NfaStateID) -> BTreeSet<NfaStateID> {
        let mut closure = BTreeSet::new();
        let mut stack = vec![state];
        while let Some(state) = stack.pop() {
            if closure.insert(state) {
                for epsilon_transition in self.states[state].epsilon_transitions() {
                    if !closure.contains(&epsilon_transition.target_state()) {
                        stack.push(epsilon_transition.target_state());
                    }
                }
            }
        }
        closure
    }

    /// The epsilon-closure of a set of states, the union of the closures of
    /// its members. Idempotent.
    pub(crate) fn epsilon_closure_set<I>(&self, states: I) -> BTreeSet<NfaStateID>
    where
        I: IntoIterator<Item = NfaStateID>,
    {
        states.into_iter().fold(BTreeSet::new(), |mut closure, state| {
            closure.append(&mut self.epsilon_closure(state));
            closure
        })
    }

    /// The one-step image of a set of states under the given symbol, not
    /// epsilon-closed.
    pub(crate) fn move_set(&self, states: &BTreeSet<NfaStateID>, symbol: char) -> BTreeSet<NfaStateID> {
        states
            .iter()
            .flat_map(|state| {
                self.states[*state]
                    .transitions()
                    .iter()
                    .filter(|transition| transition.symbol() == symbol)
                    .map(|transition| transition.target_state())
            })
            .collect()
    }
}

/// A state of the NFA.
#[derive(Debug, Clone)]
pub(crate) struct NfaState {
    id: NfaStateID,
    epsilon_transitions: Vec<EpsilonTransition>,
    transitions: Vec<NfaTransition>,
}

impl NfaState {
    fn new(id: NfaStateID) -> Self {
        Self {
            id,
            epsilon_transitions: Vec::new(),
            transitions: Vec::new(),
        }
    }

    pub(crate) fn id(&self) -> NfaStateID {
        self.id
    }

    pub(crate) fn transitions(&self) -> &[NfaTransition] {
        &self.transitions
    }

    pub(crate) fn epsilon_transitions(&self) -> &[EpsilonTransition] {
        &self.epsilon_transitions
    }
}

/// A transition labeled with an alphabet symbol.
#[derive(Debug, Clone)]
pub(crate) struct NfaTransition {
    symbol: char,
    target_state: NfaStateID,
}

impl NfaTransition {
    pub(crate) fn symbol(&self) -> char {
        self.symbol
    }

    pub(crate) fn target_state(&self) -> NfaStateID {
        self.target_state
    }
}

/// A transition traversable without consuming an input symbol.
#[derive(Debug, Clone, Default)]
pub(crate) struct EpsilonTransition {
    target_state: NfaStateID,
}

impl EpsilonTransition {
    pub(crate) fn target_state(&self) -> NfaStateID {
        self.target_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DfaGenErrorKind;
    use crate::postfix::infix_to_postfix;

    fn alphabet() -> Alphabet {
        Alphabet::parse("0ab").unwrap()
    }

    fn build(regex: &str) -> Nfa {
        Nfa::from_postfix(&infix_to_postfix(regex), &alphabet()).unwrap()
    }

    #[test]
    fn test_literal() {
        let nfa = build("a");
        assert_eq!(nfa.states().len(), 2);
        assert_eq!(nfa.start_state(), NfaStateID::new(0));
        assert_eq!(nfa.end_state(), NfaStateID::new(1));
    }

    #[test]
    fn test_concatenation_adds_no_states() {
        let nfa = build("a.b");
        // Two literal fragments, joined by a single epsilon edge.
        assert_eq!(nfa.states().len(), 4);
        assert_eq!(nfa.start_state(), NfaStateID::new(0));
        assert_eq!(nfa.end_state(), NfaStateID::new(3));
        assert_eq!(nfa.states()[NfaStateID::new(1)].epsilon_transitions().len(), 1);
    }

    #[test]
    fn test_union() {
        let nfa = build("a+b");
        assert_eq!(nfa.states().len(), 6);
        assert_eq!(nfa.start_state(), NfaStateID::new(4));
        assert_eq!(nfa.end_state(), NfaStateID::new(5));
        // The new start state fans out to both operands.
        assert_eq!(nfa.states()[nfa.start_state()].epsilon_transitions().len(), 2);
    }

    #[test]
    fn test_closure() {
        let nfa = build("a*");
        assert_eq!(nfa.states().len(), 4);
        assert_eq!(nfa.start_state(), NfaStateID::new(2));
        assert_eq!(nfa.end_state(), NfaStateID::new(3));
        // The literal's end state carries the edge to the new end state and
        // the repetition back-edge.
        assert_eq!(nfa.states()[NfaStateID::new(1)].epsilon_transitions().len(), 2);
    }

    // A macro that simplifies the rendering of a dot file for test purposes
    macro_rules! nfa_render_to {
        ($nfa:expr, $label:expr) => {
            let mut f = std::fs::File::create(concat!($label, ".dot")).unwrap();
            crate::dot::nfa_render_to($nfa, $label, &mut f);
        };
    }

    #[test]
    fn test_complex_nfa() {
        let nfa = build("(a+b)*.a.b*.a");
        nfa_render_to!(&nfa, "complex_nfa");
        // 2 literals in the union (4) + 2 union states + 2 closure states,
        // then 2 per literal a, b, a and 2 for the inner closure of b*.
        assert_eq!(nfa.states().len(), 16);
    }

    #[test]
    fn test_malformed_missing_operand() {
        for postfix in ["+", "a+", "*", "a.b", "+ab"] {
            let result = Nfa::from_postfix(postfix, &alphabet());
            assert!(
                matches!(
                    *result.unwrap_err().source,
                    DfaGenErrorKind::Syntax(SyntaxError::MalformedExpression(_))
                ),
                "postfix {:?}",
                postfix
            );
        }
    }

    #[test]
    fn test_malformed_leftover_operands() {
        let result = Nfa::from_postfix("ab", &alphabet());
        assert!(matches!(
            *result.unwrap_err().source,
            DfaGenErrorKind::Syntax(SyntaxError::MalformedExpression(_))
        ));
    }

    #[test]
    fn test_malformed_empty_expression() {
        let result = Nfa::from_postfix("", &alphabet());
        assert!(matches!(
            *result.unwrap_err().source,
            DfaGenErrorKind::Syntax(SyntaxError::MalformedExpression(_))
        ));
    }

    #[test]
    fn test_epsilon_closure_includes_origin() {
        let nfa = build("a");
        let closure = nfa.epsilon_closure(nfa.start_state());
        assert_eq!(closure, BTreeSet::from([nfa.start_state()]));
    }

    #[test]
    fn test_epsilon_closure_follows_back_edges() {
        let nfa = build("a*");
        // From the closure's start state everything except the literal's end
        // state is reachable without consuming input.
        let closure = nfa.epsilon_closure(nfa.start_state());
        assert_eq!(
            closure,
            BTreeSet::from([NfaStateID::new(0), NfaStateID::new(2), NfaStateID::new(3)])
        );
    }

    #[test]
    fn test_epsilon_closure_set_is_idempotent() {
        let nfa = build("(a+b)*.a.b*.a");
        let closure = nfa.epsilon_closure(nfa.start_state());
        let closed_again = nfa.epsilon_closure_set(closure.iter().copied());
        assert_eq!(closure, closed_again);
    }

    #[test]
    fn test_move_set() {
        let nfa = build("a+b");
        let start = nfa.epsilon_closure(nfa.start_state());
        let on_a = nfa.move_set(&start, 'a');
        assert_eq!(on_a, BTreeSet::from([NfaStateID::new(1)]));
        let on_b = nfa.move_set(&start, 'b');
        assert_eq!(on_b, BTreeSet::from([NfaStateID::new(3)]));
    }
}
