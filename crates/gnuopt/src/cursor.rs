use std::collections::VecDeque;

/// Left-to-right token stream that can hand back synthetic tokens.
///
/// `--name=value` is split by the parser into `--name` plus an injected
/// `value`, which the next call to [`TokenCursor::next`] returns before
/// resuming the caller's tokens. The caller's token list is never modified.
pub(crate) struct TokenCursor<'t, S> {
    tokens: std::slice::Iter<'t, S>,
    injected: VecDeque<String>,
}

impl<'t, S: AsRef<str>> TokenCursor<'t, S> {
    pub(crate) fn new(tokens: &'t [S]) -> Self {
        Self {
            tokens: tokens.iter(),
            injected: VecDeque::new(),
        }
    }

    /// Queue `token` to be returned next.
    pub(crate) fn inject(&mut self, token: impl Into<String>) {
        self.injected.push_front(token.into());
    }
}

impl<S: AsRef<str>> Iterator for TokenCursor<'_, S> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.injected
            .pop_front()
            .or_else(|| self.tokens.next().map(|t| t.as_ref().to_string()))
    }
}
