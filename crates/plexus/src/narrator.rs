//! Spoken lines, shown as typed-out captions on a terminal.

/// How a line should be delivered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    /// Speaking rate, 1.0 is normal.
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for Voice {
    fn default() -> Self {
        Self {
            rate: 0.9,
            pitch: 1.0,
            volume: 0.7,
        }
    }
}

/// Somewhere to send spoken lines.
pub trait Narrator {
    /// Start speaking `text`, replacing anything in progress.
    fn speak(&mut self, text: &str, voice: Voice);

    /// Stop the current line.
    fn cancel(&mut self);

    fn is_enabled(&self) -> bool;

    /// Turning narration off also stops the current line.
    fn set_enabled(&mut self, enabled: bool);

    fn toggle(&mut self) {
        let enabled = !self.is_enabled();
        self.set_enabled(enabled);
    }
}

/// Characters typed per second at rate 1.0.
const CHARS_PER_SEC: f32 = 16.0;
/// How long a finished caption stays up.
const LINGER_MS: u64 = 3000;

#[derive(Debug, Clone)]
struct Caption {
    text: String,
    voice: Voice,
    started_ms: u64,
}

impl Caption {
    fn typed_chars(&self, now_ms: u64) -> usize {
        let elapsed = now_ms.saturating_sub(self.started_ms) as f32 / 1000.0;
        (elapsed * CHARS_PER_SEC * self.voice.rate.max(0.1)) as usize
    }

    fn finished_at_ms(&self) -> u64 {
        let chars = self.text.chars().count() as f32;
        let secs = chars / (CHARS_PER_SEC * self.voice.rate.max(0.1));
        self.started_ms + (secs * 1000.0).ceil() as u64
    }
}

/// Narrator that types each line out as an on-screen caption.
#[derive(Debug, Clone)]
pub struct CaptionNarrator {
    enabled: bool,
    now_ms: u64,
    caption: Option<Caption>,
}

impl CaptionNarrator {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            now_ms: 0,
            caption: None,
        }
    }

    /// Advance the narrator's clock, dropping a caption that has lingered.
    pub fn tick(&mut self, now_ms: u64) {
        self.now_ms = now_ms;
        if let Some(caption) = &self.caption
            && now_ms > caption.finished_at_ms() + LINGER_MS
        {
            self.caption = None;
        }
    }

    /// The part of the current line typed so far.
    pub fn visible_text(&self) -> Option<&str> {
        let caption = self.caption.as_ref()?;
        let typed = caption.typed_chars(self.now_ms);
        let end = caption
            .text
            .char_indices()
            .nth(typed)
            .map_or(caption.text.len(), |(i, _)| i);
        Some(&caption.text[..end])
    }

    /// Whether a line is still being typed out.
    pub fn is_speaking(&self) -> bool {
        self.caption
            .as_ref()
            .is_some_and(|c| self.now_ms < c.finished_at_ms())
    }
}

impl Narrator for CaptionNarrator {
    fn speak(&mut self, text: &str, voice: Voice) {
        if !self.enabled {
            return;
        }
        tracing::debug!(text, rate = voice.rate, "speaking");
        self.caption = Some(Caption {
            text: text.to_string(),
            voice,
            started_ms: self.now_ms,
        });
    }

    fn cancel(&mut self) {
        self.caption = None;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.cancel();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Narrator that remembers everything it was asked to do.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptNarrator {
        pub spoken: Vec<(String, Voice)>,
        pub cancels: usize,
        pub muted: bool,
    }

    impl Narrator for ScriptNarrator {
        fn speak(&mut self, text: &str, voice: Voice) {
            if !self.muted {
                self.spoken.push((text.to_string(), voice));
            }
        }

        fn cancel(&mut self) {
            self.cancels += 1;
        }

        fn is_enabled(&self) -> bool {
            !self.muted
        }

        fn set_enabled(&mut self, enabled: bool) {
            self.muted = !enabled;
        }
    }

    #[test]
    fn test_caption_types_out() {
        let mut narrator = CaptionNarrator::new(true);
        narrator.tick(1000);
        narrator.speak(
            "hello world",
            Voice {
                rate: 1.0,
                ..Voice::default()
            },
        );

        assert_eq!(narrator.visible_text(), Some(""));
        narrator.tick(1250);
        assert_eq!(narrator.visible_text(), Some("hell"));
        assert!(narrator.is_speaking());
        narrator.tick(2000);
        assert_eq!(narrator.visible_text(), Some("hello world"));
        assert!(!narrator.is_speaking());
    }

    #[test]
    fn test_caption_lingers_then_clears() {
        let mut narrator = CaptionNarrator::new(true);
        narrator.speak("hi", Voice::default());
        narrator.tick(2000);
        assert_eq!(narrator.visible_text(), Some("hi"));
        narrator.tick(10_000);
        assert_eq!(narrator.visible_text(), None);
    }

    #[test]
    fn test_multibyte_text_is_cut_on_char_boundaries() {
        let mut narrator = CaptionNarrator::new(true);
        narrator.speak(
            "ünïcødé",
            Voice {
                rate: 1.0,
                ..Voice::default()
            },
        );
        narrator.tick(190);
        assert_eq!(narrator.visible_text(), Some("ünï"));
    }

    #[test]
    fn test_muted_narrator_stays_silent() {
        let mut narrator = CaptionNarrator::new(true);
        narrator.speak("first", Voice::default());
        narrator.toggle();
        assert!(!narrator.is_enabled());
        assert_eq!(narrator.visible_text(), None);

        narrator.speak("second", Voice::default());
        assert_eq!(narrator.visible_text(), None);

        narrator.toggle();
        narrator.speak("third", Voice::default());
        assert!(narrator.visible_text().is_some());
    }

    #[test]
    fn test_new_line_replaces_old() {
        let mut narrator = CaptionNarrator::new(true);
        narrator.speak("first", Voice::default());
        narrator.tick(5000);
        narrator.speak("second", Voice::default());
        narrator.tick(6000);
        assert_eq!(narrator.visible_text(), Some("second"));
    }
}
