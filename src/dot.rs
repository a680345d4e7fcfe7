//! The `dot` module contains the conversion of NFAs and DFAs to the graphviz
//! dot format, used for diagnostics and in tests.

use std::io::Write;

use dot_writer::{Attributes, DotWriter, RankDirection};

use crate::dfa::Dfa;
use crate::nfa::Nfa;

/// Render an NFA to graphviz dot format.
pub(crate) fn nfa_render_to<W: Write>(nfa: &Nfa, label: &str, output: &mut W) {
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph
        .set_label(label)
        .set_rank_direction(RankDirection::LeftRight);
    for state in nfa.states() {
        let source_id = {
            let mut source_node = digraph.node_auto();
            source_node.set_label(&state.id().to_string());
            if state.id() == nfa.start_state() {
                source_node
                    .set_shape(dot_writer::Shape::Circle)
                    .set_color(dot_writer::Color::Blue)
                    .set_pen_width(3.0);
            }
            if state.id() == nfa.end_state() {
                source_node
                    .set_shape(dot_writer::Shape::Circle)
                    .set_color(dot_writer::Color::Red)
                    .set_pen_width(3.0);
            }
            source_node.id()
        };
        for transition in state.transitions() {
            digraph
                .edge(
                    source_id.clone(),
                    &format!("node_{}", transition.target_state()),
                )
                .attributes()
                .set_label(&transition.symbol().to_string());
        }
        for epsilon_transition in state.epsilon_transitions() {
            digraph
                .edge(
                    source_id.clone(),
                    &format!("node_{}", epsilon_transition.target_state()),
                )
                .attributes()
                .set_label("ε");
        }
    }
}

/// Render a DFA to graphviz dot format.
pub fn dfa_render_to<W: Write>(dfa: &Dfa, label: &str, output: &mut W) {
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph
        .set_label(label)
        .set_rank_direction(RankDirection::LeftRight);
    for row in dfa.transition_table() {
        let source_id = {
            let mut source_node = digraph.node_auto();
            source_node.set_label(&row.state.to_string());
            if row.state == dfa.start_state() {
                source_node
                    .set_shape(dot_writer::Shape::Circle)
                    .set_color(dot_writer::Color::Blue)
                    .set_pen_width(3.0);
            }
            if row.is_final {
                source_node
                    .set_color(dot_writer::Color::Red)
                    .set_pen_width(3.0);
            }
            source_node.id()
        };
        for (symbol, target) in &row.transitions {
            digraph
                .edge(source_id.clone(), &format!("node_{}", target))
                .attributes()
                .set_label(&symbol.to_string());
        }
    }
}

/// Render a DFA to a dot file, for test purposes.
#[macro_export]
macro_rules! dfa_render_to {
    ($dfa:expr, $label:expr) => {
        let mut f = std::fs::File::create(format!("{}.dot", $label)).unwrap();
        $crate::dfa_render_to($dfa, $label, &mut f);
    };
}
