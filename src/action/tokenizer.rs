//! Argument tokenizer.
//!
//! Splits the inner text of a call's parentheses into top-level segments.
//! A comma separates only at paren depth zero and outside a quoted string.
//! Balance is not validated here; the invocation parser rejects calls that
//! do not close.

/// Split a raw argument list into trimmed top-level segments.
///
/// Empty segments (`a,,b`) are kept as empty strings so the deserializer can
/// decide to drop them. Empty or all-whitespace input yields no segments.
pub fn split_arguments(input: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in input.chars() {
        if let Some(active) = quote {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == active {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => {
                quote = Some(c);
                current.push(c);
            }
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                // stray closers never push depth below zero
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                segments.push(current.trim().to_string());
                current.clear();
            }
            c => current.push(c),
        }
    }

    let last = current.trim();
    if !last.is_empty() || !segments.is_empty() {
        segments.push(last.to_string());
    }
    segments
}
