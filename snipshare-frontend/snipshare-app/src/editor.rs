//! Tab handling for the code editor textarea. Offsets are byte offsets into
//! the code, as produced by [`utf16_to_byte`] from the textarea selection.

const INDENT: &str = "    ";

/// A code buffer plus its selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edit {
    pub code: String,
    pub start: usize,
    pub end: usize,
}

fn start_of_line(code: &str, at: usize) -> usize {
    code[..at].rfind('\n').map(|i| i + 1).unwrap_or(0)
}

/// Adds one level of indentation at the caret, or to every selected line.
pub fn indent(code: &str, start: usize, end: usize) -> Edit {
    let end = end.max(start);
    if start == end {
        let code = format!("{}{INDENT}{}", &code[..start], &code[start..]);
        return Edit {
            code,
            start: start + INDENT.len(),
            end: end + INDENT.len(),
        };
    }
    let line_start = start_of_line(code, start);
    let old_inner = &code[line_start..end];
    let inner = old_inner
        .split('\n')
        .map(|line| format!("{INDENT}{line}"))
        .collect::<Vec<_>>()
        .join("\n");
    Edit {
        code: format!("{}{}{}", &code[..line_start], inner, &code[end..]),
        start: start + INDENT.len(),
        end: end + inner.len() - old_inner.len(),
    }
}

fn strip_indent(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix('\t') {
        return rest;
    }
    let spaces = line.bytes().take(INDENT.len()).take_while(|b| *b == b' ').count();
    &line[spaces..]
}

/// Removes one level of indentation before the caret, or from every selected
/// line.
pub fn unindent(code: &str, start: usize, end: usize) -> Edit {
    let end = end.max(start);
    let before = &code[..start];
    if start == end && (before.ends_with(' ') || before.ends_with('\t')) {
        let trimmed = if before.ends_with('\t') {
            &before[..before.len() - 1]
        } else {
            let spaces = before
                .bytes()
                .rev()
                .take(INDENT.len())
                .take_while(|b| *b == b' ')
                .count();
            &before[..before.len() - spaces]
        };
        let removed = before.len() - trimmed.len();
        return Edit {
            code: format!("{}{}", trimmed, &code[start..]),
            start: start - removed,
            end: end - removed,
        };
    }
    let line_start = start_of_line(code, start);
    let old_inner = &code[line_start..end];
    let inner = old_inner
        .split('\n')
        .map(strip_indent)
        .collect::<Vec<_>>()
        .join("\n");
    let first_line = old_inner.split('\n').next().unwrap_or_default();
    let removed_first = first_line.len() - strip_indent(first_line).len();
    Edit {
        code: format!("{}{}{}", &code[..line_start], inner, &code[end..]),
        start: start.saturating_sub(removed_first).max(line_start),
        end: end + inner.len() - old_inner.len(),
    }
}

/// Windows line endings pasted into the editor become plain newlines.
pub fn normalize_newlines(code: &str) -> String {
    code.replace("\r\n", "\n")
}

/// Converts a textarea (UTF-16) offset into a byte offset of `code`.
pub fn utf16_to_byte(code: &str, offset: u32) -> usize {
    let mut units = 0u32;
    for (index, ch) in code.char_indices() {
        if units >= offset {
            return index;
        }
        units += ch.len_utf16() as u32;
    }
    code.len()
}

pub fn byte_to_utf16(code: &str, offset: usize) -> u32 {
    code[..offset.min(code.len())]
        .chars()
        .map(|c| c.len_utf16() as u32)
        .sum()
}
