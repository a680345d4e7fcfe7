//! This module contains the infix-to-postfix rewriter.
//! The rewriter turns a bracketed infix regex into the postfix form consumed
//! by the Thompson construction, a single left-to-right stack evaluation.

use crate::alphabet::BRACKETS;

/// Rewrite a validated infix regex into postfix (reverse Polish) form.
///
/// Open brackets of any kind are pushed onto an operator stack. A closing
/// bracket pops and emits operators until the matching open bracket is popped
/// and discarded. The binary operators `+` and `.` are pushed uniformly, the
/// grammar defines no precedence between them. The postfix operator `*` and
/// alphabet symbols are emitted immediately. Remaining operators are emitted
/// at the end of the input.
///
/// Total for any input that passed the alphabet's syntactic checks.
pub(crate) fn infix_to_postfix(regex: &str) -> String {
    let mut postfix = String::with_capacity(regex.len());
    let mut operators: Vec<char> = Vec::new();

    for c in regex.chars() {
        if let Some(kind) = BRACKETS.iter().position(|b| *b == c) {
            if kind % 2 == 0 {
                operators.push(c);
            } else {
                let open = BRACKETS[kind - 1];
                while let Some(op) = operators.pop() {
                    if op == open {
                        break;
                    }
                    postfix.push(op);
                }
            }
        } else if c == '+' || c == '.' {
            operators.push(c);
        } else {
            // Alphabet symbols and the postfix `*`, which binds to the
            // immediately preceding postfix expression.
            postfix.push(c);
        }
    }

    while let Some(op) = operators.pop() {
        postfix.push(op);
    }

    postfix
}
