use crate::fragment::fragments;

/// Concatenate the content of every fragment, in arrival order, with no
/// separator. Yields an empty string when no line carried content.
pub fn aggregate<I>(lines: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fragments(lines).collect()
}

/// Aggregate a fully buffered backend body.
pub fn aggregate_body(body: &[u8]) -> String {
    aggregate(String::from_utf8_lossy(body).lines())
}
