//! JSONL handling for chat backend responses.
//!
//! The backend answers with one JSON object per line:
//! ```text
//! {"model":"llama3.2","message":{"role":"assistant","content":"Hel"},"done":false}
//! {"model":"llama3.2","message":{"role":"assistant","content":"lo"},"done":false}
//! {"model":"llama3.2","message":{"role":"assistant","content":""},"done":true}
//! ```
//! The last line of a chunked body can arrive cut mid-object. Such lines are
//! skipped; they never abort the surrounding stream.

use crate::io_struct::{ChatResponseLine, MessageFragment};
use bytes::Bytes;
use futures::{Stream, StreamExt, stream};

#[derive(Debug, Clone, PartialEq)]
pub enum ParsedLine {
    Fragment(MessageFragment),
    /// Blank or not a valid fragment object.
    Skipped,
}

pub fn parse_line(line: &str) -> ParsedLine {
    if line.trim().is_empty() {
        return ParsedLine::Skipped;
    }
    match serde_json::from_str::<ChatResponseLine>(line) {
        Ok(parsed) => ParsedLine::Fragment(parsed.message.unwrap_or_default()),
        Err(e) => {
            log::debug!("Skipping malformed fragment ({}): {}", e, line);
            ParsedLine::Skipped
        }
    }
}

/// Lazily yields the `content` of every parseable fragment, in line order.
/// Single pass: it consumes the line source.
pub struct Fragments<I> {
    lines: I,
}

pub fn fragments<I>(lines: I) -> Fragments<I::IntoIter>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Fragments {
        lines: lines.into_iter(),
    }
}

impl<I> Iterator for Fragments<I>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = String;

    fn next(&mut self) -> Option<String> {
        for line in self.lines.by_ref() {
            if let ParsedLine::Fragment(MessageFragment {
                content: Some(content),
                ..
            }) = parse_line(line.as_ref())
            {
                return Some(content);
            }
        }
        None
    }
}

struct LineBuffer<S> {
    inner: S,
    buf: Vec<u8>,
    /// Bytes before `start` belong to lines already yielded.
    start: usize,
    /// Bytes before `scanned` are known to hold no newline past `start`.
    scanned: usize,
    eof: bool,
}

impl<S> LineBuffer<S> {
    fn new(inner: S) -> Self {
        LineBuffer {
            inner,
            buf: Vec::new(),
            start: 0,
            scanned: 0,
            eof: false,
        }
    }

    fn next_line(&mut self) -> Option<String> {
        let Some(offset) = self.buf[self.scanned..].iter().position(|b| *b == b'\n') else {
            self.scanned = self.buf.len();
            return None;
        };
        let end = self.scanned + offset;
        let mut line = &self.buf[self.start..end];
        if line.last() == Some(&b'\r') {
            line = &line[..line.len() - 1];
        }
        let line = String::from_utf8_lossy(line).into_owned();
        self.start = end + 1;
        self.scanned = self.start;
        Some(line)
    }

    /// Append a chunk, first discarding the bytes of yielded lines.
    fn push(&mut self, chunk: &[u8]) {
        if self.start > 0 {
            self.buf.drain(..self.start);
            self.scanned -= self.start;
            self.start = 0;
        }
        self.buf.extend_from_slice(chunk);
    }

    fn clear(&mut self) {
        self.buf.clear();
        self.start = 0;
        self.scanned = 0;
    }

    fn take_rest(&mut self) -> Option<String> {
        if self.start >= self.buf.len() {
            self.clear();
            return None;
        }
        let rest = String::from_utf8_lossy(&self.buf[self.start..]).into_owned();
        self.clear();
        Some(rest)
    }
}

/// Splits a chunked byte stream into text lines, without the line terminator.
///
/// Lines may span chunk boundaries; a trailing line without a newline is
/// yielded once the byte stream ends. A read error is yielded once and ends
/// the stream. `bytes` is dropped as soon as the stream ends, or with the
/// returned stream if that is dropped first.
pub fn line_stream<S, E>(bytes: S) -> impl Stream<Item = Result<String, E>>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
{
    stream::unfold(LineBuffer::new(bytes), |mut state| async move {
        loop {
            if let Some(line) = state.next_line() {
                return Some((Ok(line), state));
            }
            if state.eof {
                return state.take_rest().map(|line| (Ok(line), state));
            }
            match state.inner.next().await {
                Some(Ok(chunk)) => state.push(&chunk),
                Some(Err(e)) => {
                    state.eof = true;
                    state.clear();
                    return Some((Err(e), state));
                }
                None => state.eof = true,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::convert::Infallible;

    fn chunks(parts: &[&'static str]) -> impl Stream<Item = Result<Bytes, Infallible>> + Unpin {
        stream::iter(
            parts
                .iter()
                .map(|p| Ok(Bytes::from_static(p.as_bytes())))
                .collect::<Vec<_>>(),
        )
    }

    fn collect_lines(parts: &[&'static str]) -> Vec<String> {
        block_on(line_stream(chunks(parts)).map(|l| l.unwrap()).collect())
    }

    #[test]
    fn parse_line_extracts_fragment() {
        assert_eq!(
            parse_line(r#"{"message":{"role":"assistant","content":"Hel"}}"#),
            ParsedLine::Fragment(MessageFragment {
                role: Some("assistant".to_string()),
                content: Some("Hel".to_string()),
            })
        );
    }

    #[test]
    fn parse_line_skips_blank_and_malformed() {
        assert_eq!(parse_line(""), ParsedLine::Skipped);
        assert_eq!(parse_line("   \t"), ParsedLine::Skipped);
        assert_eq!(parse_line(r#"{"message":{"content":"tru"#), ParsedLine::Skipped);
        assert_eq!(parse_line("not json"), ParsedLine::Skipped);
    }

    #[test]
    fn fragment_without_message_contributes_nothing() {
        assert_eq!(
            parse_line(r#"{"done":true}"#),
            ParsedLine::Fragment(MessageFragment::default())
        );
        let lines = [r#"{"done":true}"#, r#"{"message":{"role":"assistant"}}"#];
        assert_eq!(fragments(lines).count(), 0);
    }

    #[test]
    fn fragments_keep_order_and_skip_bad_lines() {
        let lines = [
            r#"{"message":{"content":"a"}}"#,
            "",
            "{broken",
            r#"{"message":{"content":"b"}}"#,
        ];
        assert_eq!(fragments(lines).collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn line_stream_joins_lines_across_chunks() {
        assert_eq!(
            collect_lines(&["{\"a\":", "1}\n{\"b\"", ":2}\r\n", "\n{\"c\":3}"]),
            vec!["{\"a\":1}", "{\"b\":2}", "", "{\"c\":3}"]
        );
    }

    #[test]
    fn line_stream_handles_split_utf8() {
        let bytes = "caf\u{e9}\n".as_bytes();
        let (head, tail) = bytes.split_at(4);
        let parts = stream::iter(vec![
            Ok::<_, Infallible>(Bytes::copy_from_slice(head)),
            Ok(Bytes::copy_from_slice(tail)),
        ]);
        let lines: Vec<String> = block_on(line_stream(parts).map(|l| l.unwrap()).collect());
        assert_eq!(lines, vec!["caf\u{e9}"]);
    }

    #[test]
    fn line_buffer_resumes_scan_where_it_stopped() {
        let mut buf = LineBuffer::new(());
        for _ in 0..1000 {
            buf.push(b"x");
            assert_eq!(buf.next_line(), None);
            assert_eq!(buf.scanned, buf.buf.len());
        }
        buf.push(b"\r\nab\ncd");
        assert_eq!(buf.next_line().unwrap(), "x".repeat(1000));
        assert_eq!(buf.next_line().as_deref(), Some("ab"));
        assert_eq!(buf.next_line(), None);

        buf.push(b"e\n");
        assert_eq!(buf.start, 0);
        assert_eq!(buf.next_line().as_deref(), Some("cde"));
        assert_eq!(buf.take_rest(), None);
    }

    #[test]
    fn line_stream_long_line_over_many_chunks() {
        let mut parts = vec!["{\"message\":{\"content\":\""; 1];
        parts.extend(std::iter::repeat_n("z", 500));
        parts.push("\"}}\ntail");
        let lines = collect_lines(&parts);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 23 + 500 + 3);
        assert!(matches!(parse_line(&lines[0]), ParsedLine::Fragment(_)));
        assert_eq!(lines[1], "tail");
    }

    #[test]
    fn line_stream_stops_after_error() {
        let parts = stream::iter(vec![
            Ok(Bytes::from_static(b"one\ntw")),
            Err("reset"),
            Ok(Bytes::from_static(b"o\n")),
        ]);
        let items: Vec<Result<String, &str>> = block_on(line_stream(parts).collect());
        assert_eq!(items, vec![Ok("one".to_string()), Err("reset")]);
    }
}
