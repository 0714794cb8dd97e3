//! Word-by-word replay of a reply that has already fully arrived
//!
//! This is presentation only. The network request has completed before the
//! first frame; each frame is a prefix of the original reply ending at a
//! whitespace-delimited token, so token order and the final text are exactly
//! those received.

use std::time::Duration;

use tracing::debug;

/// One step of the replay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealFrame<'a> {
    /// Reply text shown so far
    pub prefix: &'a str,
    /// Text added by this frame (leading whitespace plus the token)
    pub delta: &'a str,
    /// The token itself
    pub token: &'a str,
}

/// Iterator over reveal frames of a reply
pub struct RevealFrames<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> RevealFrames<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for RevealFrames<'a> {
    type Item = RevealFrame<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let token_start = self.pos + rest.find(|c: char| !c.is_whitespace())?;
        let token_end = self.text[token_start..]
            .find(char::is_whitespace)
            .map_or(self.text.len(), |i| token_start + i);

        let frame = RevealFrame {
            prefix: &self.text[..token_end],
            delta: &self.text[self.pos..token_end],
            token: &self.text[token_start..token_end],
        };
        self.pos = token_end;
        Some(frame)
    }
}

/// Receives reveal frames as they are produced
pub trait RevealSink: Send {
    /// Called once per token, in order
    fn frame(&mut self, frame: RevealFrame<'_>);

    /// Called after the last frame
    fn finish(&mut self) {}
}

/// Replay `reply` into `sink`, pausing `delay` after each frame
///
/// Not cancellable; the caller is blocked for roughly `tokens × delay`.
pub async fn replay(reply: &str, delay: Duration, sink: &mut dyn RevealSink) -> usize {
    let mut frames = 0;
    for frame in RevealFrames::new(reply) {
        sink.frame(frame);
        frames += 1;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
    sink.finish();
    debug!(frames, "replay: done");
    frames
}

/// Sink that keeps every prefix it was shown
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub prefixes: Vec<String>,
    pub finished: bool,
}

impl RevealSink for RecordingSink {
    fn frame(&mut self, frame: RevealFrame<'_>) {
        self.prefixes.push(frame.prefix.to_string());
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_frames_grow_word_by_word() {
        let prefixes: Vec<&str> = RevealFrames::new("Hello there, friend").map(|f| f.prefix).collect();
        assert_eq!(prefixes, vec!["Hello", "Hello there,", "Hello there, friend"]);
    }

    #[test]
    fn test_frames_keep_original_whitespace() {
        let frames: Vec<RevealFrame> = RevealFrames::new("  a\n\nb\tc ").collect();

        let tokens: Vec<&str> = frames.iter().map(|f| f.token).collect();
        assert_eq!(tokens, vec!["a", "b", "c"]);
        assert_eq!(frames[1].delta, "\n\nb");
        assert_eq!(frames.last().unwrap().prefix, "  a\n\nb\tc");
    }

    #[test]
    fn test_empty_and_blank_replies_have_no_frames() {
        assert_eq!(RevealFrames::new("").count(), 0);
        assert_eq!(RevealFrames::new(" \n\t ").count(), 0);
    }

    #[test]
    fn test_multibyte_tokens() {
        let prefixes: Vec<&str> = RevealFrames::new("héllo wörld 🦀").map(|f| f.prefix).collect();
        assert_eq!(prefixes, vec!["héllo", "héllo wörld", "héllo wörld 🦀"]);
    }

    #[tokio::test]
    async fn test_replay_reports_every_frame() {
        let mut sink = RecordingSink::default();

        let frames = replay("one two three", Duration::ZERO, &mut sink).await;

        assert_eq!(frames, 3);
        assert_eq!(sink.prefixes, vec!["one", "one two", "one two three"]);
        assert!(sink.finished);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_waits_between_frames() {
        let mut sink = RecordingSink::default();
        let start = tokio::time::Instant::now();

        replay("a b c d", Duration::from_millis(50), &mut sink).await;

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(200), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(250), "elapsed {elapsed:?}");
        assert_eq!(sink.prefixes.len(), 4);
    }

    proptest! {
        #[test]
        fn prop_tokens_match_split_whitespace(text in "\\PC{0,80}") {
            let tokens: Vec<&str> = RevealFrames::new(&text).map(|f| f.token).collect();
            let expected: Vec<&str> = text.split_whitespace().collect();
            prop_assert_eq!(tokens, expected);
        }

        #[test]
        fn prop_deltas_rebuild_trimmed_reply(text in "[a-z \\n\\t]{0,80}") {
            let rebuilt: String = RevealFrames::new(&text).map(|f| f.delta).collect();
            prop_assert_eq!(rebuilt.as_str(), text.trim_end());
        }
    }
}
