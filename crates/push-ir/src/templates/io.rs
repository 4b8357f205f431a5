//! Output instructions. Input instructions are synthesised per binding by
//! the registry.

use super::{Dep, Family, FixedSpec, Template, NON_EXEC};
use push_core::{Executable, StackKind, State};

pub(crate) fn family() -> Family {
    Family {
        name: "io",
        templates: vec![Template::new("print_{}", &NON_EXEC, &[Dep::Target], print)],
        fixed: vec![FixedSpec::new(
            "print_newline",
            &[],
            Executable::Fixed(print_newline),
        )],
    }
}

/// Append the rendering of the top item. If the output cap would be
/// exceeded the item stays put.
fn print(state: &mut State, kind: StackKind) {
    let Some(text) = state.top(kind).map(ToString::to_string) else {
        return;
    };
    if state.print(&text) {
        state.pop(kind);
    }
}

fn print_newline(state: &mut State) {
    state.print("\n");
}
