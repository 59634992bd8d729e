use chumsky::span::SimpleSpan;

/// A value paired with the byte range of the source it was parsed from.
///
/// Comparisons look through the span: two `Spanned` values are equal when
/// their payloads are equal, regardless of where they were parsed.
#[derive(Debug, Clone, Eq)]
pub struct Spanned<T> {
    pub span: SimpleSpan<usize>,
    pub val: T,
}

impl<T> Spanned<T> {
    /// Wrap a value that has no source location, e.g. a synthesized fallback
    /// node.
    pub fn synthetic(val: T) -> Self {
        Spanned {
            span: dummy_span(),
            val,
        }
    }
}

pub fn dummy_span() -> SimpleSpan {
    SimpleSpan::new(0, 0)
}

impl<T: PartialEq> PartialEq for Spanned<T> {
    fn eq(&self, other: &Self) -> bool {
        self.val == other.val
    }
}

impl<T: PartialOrd> PartialOrd for Spanned<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.val.partial_cmp(&other.val)
    }
}

impl<T: Ord> Ord for Spanned<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.val.cmp(&other.val)
    }
}
