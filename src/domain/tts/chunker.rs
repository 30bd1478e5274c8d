/// Default character budget per fragment
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 250;

/// Split text into sentence-aligned fragments of at most `max_chars` characters.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace. Sentences are
/// accumulated greedily and joined by a single space. A sentence longer than
/// `max_chars` is emitted alone instead of being broken up.
pub fn split(text: &str, max_chars: usize) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in sentences(text) {
        let sentence_len = sentence.chars().count();

        if current_len > 0 && current_len + 1 + sentence_len > max_chars {
            fragments.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(sentence);
        current_len += sentence_len;
    }

    if !current.is_empty() {
        fragments.push(current);
    }

    fragments
}

/// Iterate over trimmed, non-empty sentences of `text`.
fn sentences(text: &str) -> impl Iterator<Item = &str> {
    let mut boundaries = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if ch.is_whitespace() && matches!(prev, Some('.' | '!' | '?')) {
            boundaries.push(&text[start..idx]);
            // consume the whole whitespace run
            let mut end = idx + ch.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if !next.is_whitespace() {
                    break;
                }
                end = next_idx + next.len_utf8();
                chars.next();
            }
            start = end;
            prev = None;
            continue;
        }
        prev = Some(ch);
    }
    boundaries.push(&text[start..]);

    boundaries
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
