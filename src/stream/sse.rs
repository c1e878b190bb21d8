//! Server-Sent-Events line framing.
//!
//! Bytes are buffered and split on `\n` *before* UTF-8 decoding. A newline
//! byte never occurs inside a multi-byte UTF-8 sequence, so a read that ends
//! in the middle of a character simply leaves the partial sequence in the
//! buffer until the next read completes it.

/// Prefix of SSE data lines.
pub(crate) const DATA_PREFIX: &str = "data: ";

/// Payload that terminates the stream.
pub(crate) const DONE_SENTINEL: &str = "[DONE]";

/// Accumulates raw bytes and yields complete lines.
///
/// Consumed lines are tracked by offset and compacted away once per
/// [`extend`](Self::extend), so a large read costs linear time.
#[derive(Debug, Default)]
pub(crate) struct LineBuffer {
    buf: Vec<u8>,
    // Start of the first unconsumed line
    start: usize,
    // Bytes before this offset are known not to contain `\n`
    scanned: usize,
}

impl LineBuffer {
    pub(crate) fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4096),
            start: 0,
            scanned: 0,
        }
    }

    pub(crate) fn extend(&mut self, chunk: &[u8]) {
        if self.start > 0 {
            self.buf.drain(..self.start);
            self.scanned -= self.start;
            self.start = 0;
        }
        self.buf.extend_from_slice(chunk);
    }

    /// Remove and return the next `\n`-terminated line, without the
    /// terminator (and without a trailing `\r`). `None` while no complete
    /// line is buffered.
    pub(crate) fn next_line(&mut self) -> Option<Vec<u8>> {
        let from = self.scanned.max(self.start);
        let Some(pos) = self.buf[from..].iter().position(|&b| b == b'\n') else {
            self.scanned = self.buf.len();
            return None;
        };
        let end = from + pos;
        let mut line = &self.buf[self.start..end];
        if line.last() == Some(&b'\r') {
            line = &line[..line.len() - 1];
        }
        let line = line.to_vec();
        self.start = end + 1;
        self.scanned = self.start;
        Some(line)
    }

    /// Bytes of the unterminated trailing line.
    pub(crate) fn pending_len(&self) -> usize {
        self.buf.len() - self.start
    }

    pub(crate) fn clear(&mut self) {
        self.buf.clear();
        self.start = 0;
        self.scanned = 0;
    }
}

/// One classified SSE line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SseLine<'a> {
    /// Trimmed payload of a `data: ` line
    Data(&'a str),
    /// The `[DONE]` terminator
    Done,
    /// Event-type lines, comments, blank lines
    Skip,
}

impl<'a> SseLine<'a> {
    pub(crate) fn classify(line: &'a str) -> Self {
        match line.strip_prefix(DATA_PREFIX) {
            Some(rest) => {
                let payload = rest.trim();
                if payload == DONE_SENTINEL {
                    SseLine::Done
                } else {
                    SseLine::Data(payload)
                }
            }
            None => SseLine::Skip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_only_complete_lines() {
        let mut buf = LineBuffer::new();
        buf.extend(b"data: a\nda");
        assert_eq!(buf.next_line().as_deref(), Some(&b"data: a"[..]));
        assert_eq!(buf.next_line(), None);
        assert_eq!(buf.pending_len(), 2);

        buf.extend(b"ta: b\r\n");
        assert_eq!(buf.next_line().as_deref(), Some(&b"data: b"[..]));
        assert_eq!(buf.pending_len(), 0);
    }

    #[test]
    fn keeps_split_utf8_until_line_completes() {
        let bytes = "data: é\n".as_bytes();
        let split = bytes.len() - 2; // inside the two-byte 'é'
        let mut buf = LineBuffer::new();
        buf.extend(&bytes[..split]);
        assert_eq!(buf.next_line(), None);
        buf.extend(&bytes[split..]);
        let line = buf.next_line().unwrap();
        assert_eq!(std::str::from_utf8(&line).unwrap(), "data: é");
    }

    #[test]
    fn partial_line_survives_compaction() {
        let mut buf = LineBuffer::new();
        buf.extend(b"data: 1\ndata: 2\ndata: ");
        assert_eq!(buf.next_line().as_deref(), Some(&b"data: 1"[..]));
        assert_eq!(buf.next_line().as_deref(), Some(&b"data: 2"[..]));
        assert_eq!(buf.next_line(), None);
        assert_eq!(buf.pending_len(), 6);

        buf.extend(b"3");
        assert_eq!(buf.next_line(), None);
        buf.extend(b"\n");
        assert_eq!(buf.next_line().as_deref(), Some(&b"data: 3"[..]));
        assert_eq!(buf.pending_len(), 0);
    }

    #[test]
    fn many_lines_from_one_read() {
        let body: Vec<u8> = (0..10_000)
            .flat_map(|i| format!("data: {i}\n").into_bytes())
            .collect();
        let mut buf = LineBuffer::new();
        buf.extend(&body);

        let mut count = 0;
        while let Some(line) = buf.next_line() {
            assert_eq!(line, format!("data: {count}").into_bytes());
            count += 1;
        }
        assert_eq!(count, 10_000);
        assert_eq!(buf.pending_len(), 0);
    }

    #[test]
    fn clear_discards_everything() {
        let mut buf = LineBuffer::new();
        buf.extend(b"data: a\ndata: b");
        buf.next_line();
        buf.clear();
        assert_eq!(buf.pending_len(), 0);
        buf.extend(b"x\n");
        assert_eq!(buf.next_line().as_deref(), Some(&b"x"[..]));
    }

    #[test]
    fn classifies_lines() {
        assert_eq!(SseLine::classify("data: {\"a\":1} "), SseLine::Data("{\"a\":1}"));
        assert_eq!(SseLine::classify("data: [DONE]"), SseLine::Done);
        assert_eq!(SseLine::classify("data:  [DONE]  "), SseLine::Done);
        assert_eq!(SseLine::classify("event: message"), SseLine::Skip);
        assert_eq!(SseLine::classify(": keep-alive"), SseLine::Skip);
        assert_eq!(SseLine::classify(""), SseLine::Skip);
        assert_eq!(SseLine::classify("data:{}"), SseLine::Skip);
    }
}
