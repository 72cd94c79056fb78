//! Graphviz export of a [`PackedDfa`] (behind the `dot_writer` feature), for inspecting a build's
//! output by eye. Used for debugging, not on the matching hot path.

use std::fmt;
use std::io::Write;

use dot_writer::{Attributes, Color, DotWriter, RankDirection, Shape};

use crate::packed_dfa::PackedDfa;

/// Renders `dfa` to `output` in Graphviz dot format, labeling each state with its index and, if
/// accepting, its tag. Start states (one per language `dfa` was built for) are drawn as a blue
/// double-width circle; accepting states are drawn in red.
pub fn render<W: Write, Tag: fmt::Display>(dfa: &PackedDfa<Tag>, label: &str, output: &mut W) {
    let mut writer = DotWriter::from(output);
    writer.set_pretty_print(true);
    let mut digraph = writer.digraph();
    digraph.set_label(label).set_rank_direction(RankDirection::LeftRight);

    let starts = dfa.starts();
    for state in 0..dfa.state_count() as u32 {
        let mut node = digraph.node_auto();
        node.set_label(&state.to_string());
        if starts.contains(&state) {
            node.set_shape(Shape::Circle).set_color(Color::Blue).set_pen_width(3.0);
        }
        if let Some(tag) = dfa.accept(state) {
            node.set_color(Color::Red)
                .set_pen_width(3.0)
                .set_label(&format!("{state}\n{tag}"));
        }
    }
    for state in 0..dfa.state_count() as u32 {
        for transition in dfa.transitions_of(state) {
            digraph
                .edge(format!("node_{state}"), format!("node_{}", transition.target()))
                .attributes()
                .set_label(&char_range_label(transition.first_char(), transition.last_char()));
        }
    }
}

fn char_range_label(first: u16, last: u16) -> String {
    if first == last {
        format!("{first:#06x}")
    } else {
        format!("{first:#06x}-{last:#06x}")
    }
}
