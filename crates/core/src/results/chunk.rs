use crate::domain::result::ChatMessage;

// With no explicit width the text is spread over roughly this many messages.
const DEFAULT_CHUNK_COUNT: usize = 9;

/// `round(chars / 9)`, never below 1. Nine is odd, so the division never lands on a
/// half and there is no tie to break.
pub fn default_width(text: &str) -> usize {
    let len = text.chars().count();
    ((len + DEFAULT_CHUNK_COUNT / 2) / DEFAULT_CHUNK_COUNT).max(1)
}

fn is_break_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

struct Run {
    start: usize,
    end: usize,
    chars: usize,
    space: bool,
}

/// Alternating runs of whitespace and non-whitespace.
fn split_runs(text: &str) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for (idx, c) in text.char_indices() {
        let space = is_break_space(c);
        let end = idx + c.len_utf8();
        match runs.last_mut() {
            Some(run) if run.space == space => {
                run.end = end;
                run.chars += 1;
            }
            _ => runs.push(Run {
                start: idx,
                end,
                chars: 1,
                space,
            }),
        }
    }
    runs
}

/// Greedy word wrap into chunks of at most `width` chars.
///
/// Breaks only between a word and a whitespace run. Hyphenated words stay whole, and a
/// word longer than `width` gets a chunk of its own rather than being cut. Whitespace at
/// the edges of a chunk is dropped; whitespace inside a chunk (newlines included) is kept
/// as-is.
pub fn chunk_text(text: &str, width: Option<usize>) -> Vec<String> {
    let width = width.unwrap_or_else(|| default_width(text)).max(1);
    let runs = split_runs(text);

    let mut chunks = Vec::new();
    let mut i = 0;
    while i < runs.len() {
        if runs[i].space {
            i += 1;
            continue;
        }

        let line_start = i;
        let mut line_len = 0;
        while i < runs.len() && line_len + runs[i].chars <= width {
            line_len += runs[i].chars;
            i += 1;
        }
        if i == line_start {
            // Over-long word.
            i += 1;
        }

        let mut last = i - 1;
        if runs[last].space {
            last -= 1;
        }
        chunks.push(text[runs[line_start].start..runs[last].end].to_string());
    }
    chunks
}

pub fn chunk_messages(text: &str, width: Option<usize>) -> Vec<ChatMessage> {
    chunk_text(text, width)
        .into_iter()
        .map(ChatMessage::new)
        .collect()
}
