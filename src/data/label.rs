// ---------------------------------------------------------------------------
// Axis label helpers
// ---------------------------------------------------------------------------

/// Prefix placed in front of multidrug-resistant species names.
pub const WARNING_MARKER: &str = "⚠️";

/// Column width used by the wrapped preset.
pub const DEFAULT_WRAP_WIDTH: usize = 18;

/// Build the axis label for a species.
pub fn display_label(species: &str, resistant: bool, wrap_width: Option<usize>) -> String {
    let label = if resistant {
        format!("{WARNING_MARKER} {species}")
    } else {
        species.to_string()
    };
    match wrap_width {
        Some(width) => wrap_label(&label, width),
        None => label,
    }
}

/// Greedy word wrap at `width` columns, lines joined with `\n`.
///
/// Breaks only at whitespace; a word longer than `width` sits alone on its
/// line unsplit. Existing line breaks count as whitespace, so wrapping an
/// already wrapped label at the same width returns it unchanged. Width is
/// measured in `char`s.
pub fn wrap_label(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut line_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len == 0 {
            out.push_str(word);
            line_len = word_len;
        } else if line_len + 1 + word_len <= width {
            out.push(' ');
            out.push_str(word);
            line_len += 1 + word_len;
        } else {
            out.push('\n');
            out.push_str(word);
            line_len = word_len;
        }
    }
    out
}
