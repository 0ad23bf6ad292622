use std::slice::Iter;

use super::errors::Error;

/// Errors of one parse request, kept ordered by source position.
///
/// Records with the same start offset keep their insertion order, so a
/// lexical error and the syntax error it provoked stay in the order they
/// were discovered.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn push(&mut self, error: Error) {
        let start = error.get_span().start;
        let at = self
            .errors
            .partition_point(|existing| existing.get_span().start <= start);
        self.errors.insert(at, error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = Error>) {
        for error in errors {
            self.push(error);
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Error> {
        self.errors.iter()
    }

    /// Whether any recorded error overlaps the byte range `[start, end)`.
    pub fn overlaps(&self, start: usize, end: usize) -> bool {
        self.errors.iter().any(|error| {
            let span = error.get_span();
            span.start < end && start < span.end.max(span.start + 1)
        })
    }

    pub fn as_slice(&self) -> &[Error] {
        &self.errors
    }

    pub fn into_vec(self) -> Vec<Error> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
