//! Inbound framing.
//!
//! The input is a stream of top-level XML elements with no length prefix.
//! Only a small, known vocabulary matters, so instead of a streaming XML
//! parser this is a byte-level matcher:
//!
//! 1. read a chunk up to the next `>` (or a fixed block when no `>` comes);
//! 2. outside a frame, a chunk starting with an allow-listed `<tag` opens a
//!    frame and anything else is discarded;
//! 3. an opening chunk ending in `/>` is a complete self-closing element;
//! 4. otherwise chunks accumulate until the buffer ends with `</tag>`.
//!
//! The complete buffer is then handed to the codec for real parsing.

use bytes::BytesMut;
use indidrive_app::ports::{FrameSource, RawFrame};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// Largest frame kept in memory; a longer one is discarded.
pub const MAX_FRAME_LEN: usize = 1024 * 1024;

/// Chunk size used when no `>` shows up.
const BLOCK_LEN: u64 = 32_000;

struct Pattern {
    tag: &'static str,
    /// `<tag`
    start: Vec<u8>,
    /// `</tag>`
    end: Vec<u8>,
}

impl Pattern {
    fn new(tag: &'static str) -> Self {
        Self {
            tag,
            start: format!("<{tag}").into_bytes(),
            end: format!("</{tag}>").into_bytes(),
        }
    }

    /// `<tag` followed by whitespace, `/` or `>`.
    fn opens(&self, chunk: &[u8]) -> bool {
        chunk.starts_with(&self.start)
            && chunk
                .get(self.start.len())
                .is_some_and(|b| b.is_ascii_whitespace() || matches!(b, b'/' | b'>'))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    /// Accumulating a frame opened by the pattern at this index.
    InFrame(usize),
}

/// Sans-IO frame assembler: feed it chunks, get complete frames back.
pub struct FrameAssembler {
    patterns: Vec<Pattern>,
    buffer: BytesMut,
    state: State,
    max_len: usize,
}

impl FrameAssembler {
    #[must_use]
    pub fn new(tags: &[&'static str]) -> Self {
        Self::with_max_len(tags, MAX_FRAME_LEN)
    }

    #[must_use]
    pub fn with_max_len(tags: &[&'static str], max_len: usize) -> Self {
        Self {
            patterns: tags.iter().copied().map(Pattern::new).collect(),
            buffer: BytesMut::new(),
            state: State::Scanning,
            max_len,
        }
    }

    /// Whether a frame has been opened but not yet closed.
    #[must_use]
    pub fn in_frame(&self) -> bool {
        matches!(self.state, State::InFrame(_))
    }

    /// Feed one chunk. Returns the frame it completes, if any.
    pub fn push(&mut self, chunk: &[u8]) -> Option<RawFrame> {
        let index = match self.state {
            State::Scanning => {
                let chunk = chunk.trim_ascii_start();
                let Some(index) = self.patterns.iter().position(|p| p.opens(chunk)) else {
                    if !chunk.is_empty() {
                        tracing::trace!(len = chunk.len(), "discarding bytes outside a frame");
                    }
                    return None;
                };
                self.buffer.clear();
                self.buffer.extend_from_slice(chunk);
                self.state = State::InFrame(index);
                if self.buffer.trim_ascii_end().ends_with(b"/>") {
                    return Some(self.emit(index));
                }
                index
            }
            State::InFrame(index) => {
                self.buffer.extend_from_slice(chunk);
                index
            }
        };

        let pattern = &self.patterns[index];
        if self.buffer.trim_ascii_end().ends_with(&pattern.end) {
            return Some(self.emit(index));
        }
        if self.buffer.len() > self.max_len {
            tracing::warn!(
                tag = pattern.tag,
                len = self.buffer.len(),
                "discarding oversized frame"
            );
            self.buffer.clear();
            self.state = State::Scanning;
        }
        None
    }

    fn emit(&mut self, index: usize) -> RawFrame {
        self.state = State::Scanning;
        let end = self.buffer.trim_ascii_end().len();
        self.buffer.truncate(end);
        RawFrame {
            tag: self.patterns[index].tag,
            bytes: self.buffer.split().freeze(),
        }
    }
}

/// [`FrameSource`] over any buffered async reader (stdin in production).
pub struct FrameReader<R> {
    reader: R,
    chunk: Vec<u8>,
    assembler: FrameAssembler,
}

impl<R: AsyncBufRead + Unpin + Send> FrameReader<R> {
    #[must_use]
    pub fn new(reader: R, tags: &[&'static str]) -> Self {
        Self {
            reader,
            chunk: Vec::new(),
            assembler: FrameAssembler::new(tags),
        }
    }
}

impl<R: AsyncBufRead + Unpin + Send> FrameSource for FrameReader<R> {
    async fn next_frame(&mut self) -> std::io::Result<Option<RawFrame>> {
        loop {
            self.chunk.clear();
            let read = (&mut self.reader)
                .take(BLOCK_LEN)
                .read_until(b'>', &mut self.chunk)
                .await?;
            if read == 0 {
                if self.assembler.in_frame() {
                    tracing::debug!("input ended inside a frame");
                }
                return Ok(None);
            }
            if let Some(frame) = self.assembler.push(&self.chunk) {
                tracing::trace!(tag = frame.tag, len = frame.bytes.len(), "frame received");
                return Ok(Some(frame));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::BufReader;

    use super::*;

    const TAGS: &[&str] = &["getProperties", "newSwitchVector"];

    const SWITCH: &str = "<newSwitchVector device=\"Roll off door\" name=\"DOME_SHUTTER\">\
        <oneSwitch name=\"SHUTTER_OPEN\">On</oneSwitch></newSwitchVector>";

    fn feed(assembler: &mut FrameAssembler, chunks: &[&str]) -> Vec<RawFrame> {
        chunks
            .iter()
            .filter_map(|chunk| assembler.push(chunk.as_bytes()))
            .collect()
    }

    #[test]
    fn should_emit_self_closing_element_at_once() {
        let mut assembler = FrameAssembler::new(TAGS);
        let frames = feed(&mut assembler, &["\n  <getProperties version=\"1.7\" />"]);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].tag, "getProperties");
        assert_eq!(frames[0].bytes.as_ref(), b"<getProperties version=\"1.7\" />");
        assert!(!assembler.in_frame());
    }

    #[test]
    fn should_accumulate_until_closing_tag() {
        let mut assembler = FrameAssembler::new(TAGS);
        let frames = feed(
            &mut assembler,
            &[
                "<newSwitchVector device=\"Roll off door\" name=\"DOME_SHUTTER\">",
                "<oneSwitch name=\"SHUTTER_OPEN\">",
                "On</oneSwitch>",
                "</newSwitchVector>",
            ],
        );
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].tag, "newSwitchVector");
        assert_eq!(frames[0].bytes.as_ref(), SWITCH.as_bytes());
    }

    #[test]
    fn should_not_close_on_self_closing_child() {
        let mut assembler = FrameAssembler::new(TAGS);
        let frames = feed(
            &mut assembler,
            &["<newSwitchVector device=\"d\" name=\"n\">", "<oneSwitch name=\"x\"/>"],
        );
        assert!(frames.is_empty());
        assert!(assembler.in_frame());
        assert_eq!(feed(&mut assembler, &["</newSwitchVector>"]).len(), 1);
    }

    #[test]
    fn should_discard_unknown_elements() {
        let mut assembler = FrameAssembler::new(TAGS);
        let frames = feed(
            &mut assembler,
            &[
                "<newTextVector device=\"d\">",
                "</newTextVector>",
                "garbage>",
                "<getProperties version=\"1.7\"/>",
            ],
        );
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].tag, "getProperties");
    }

    #[test]
    fn should_require_tag_boundary() {
        let mut assembler = FrameAssembler::new(TAGS);
        assert!(assembler.push(b"<getPropertiesExtra/>").is_none());
        assert!(!assembler.in_frame());
        assert!(assembler.push(b"<getProperties>").is_none());
        assert!(assembler.in_frame());
    }

    #[test]
    fn should_drop_oversized_frame_and_recover() {
        let mut assembler = FrameAssembler::with_max_len(TAGS, 64);
        assert!(assembler.push(b"<newSwitchVector device=\"d\" name=\"n\">").is_none());
        let filler = "<oneSwitch name=\"a\">On</oneSwitch>".repeat(4);
        assert!(assembler.push(filler.as_bytes()).is_none());
        assert!(!assembler.in_frame());
        assert!(assembler.push(b"<getProperties version=\"1.7\"/>").is_some());
    }

    #[tokio::test]
    async fn should_reassemble_frames_split_across_reads() {
        let input = format!("<getProperties version=\"1.7\"/>\n{SWITCH}\n");
        let bytes = input.as_bytes();
        // every split point of the input
        for split in 1..bytes.len() {
            let mock = tokio_test::io::Builder::new()
                .read(&bytes[..split])
                .read(&bytes[split..])
                .build();
            let mut reader = FrameReader::new(BufReader::new(mock), TAGS);
            let first = reader.next_frame().await.unwrap().unwrap();
            let second = reader.next_frame().await.unwrap().unwrap();
            assert_eq!(first.bytes.as_ref(), b"<getProperties version=\"1.7\"/>");
            assert_eq!(second.bytes.as_ref(), SWITCH.as_bytes(), "split at {split}");
            assert!(reader.next_frame().await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn should_skip_noise_between_frames() {
        let mock = tokio_test::io::Builder::new()
            .read(b"hello there\n<message>text</message>\n")
            .read(b"<getProperties version=\"1.7\" device=\"Roll off door\"/>\n")
            .build();
        let mut reader = FrameReader::new(BufReader::new(mock), TAGS);
        let frame = reader.next_frame().await.unwrap().unwrap();
        assert_eq!(frame.tag, "getProperties");
        assert!(reader.next_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_end_quietly_inside_unfinished_frame() {
        let mock = tokio_test::io::Builder::new()
            .read(b"<newSwitchVector device=\"d\" name=\"n\"><oneSwitch")
            .build();
        let mut reader = FrameReader::new(BufReader::new(mock), TAGS);
        assert!(reader.next_frame().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_surface_read_errors() {
        let mock = tokio_test::io::Builder::new()
            .read_error(std::io::Error::other("pipe closed"))
            .build();
        let mut reader = FrameReader::new(BufReader::new(mock), TAGS);
        assert!(reader.next_frame().await.is_err());
    }
}
