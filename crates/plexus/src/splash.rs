//! Splash screen shown before the main network view.

use plexus_core::ColorTheme;
use plexus_field::Rgb;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
};

use crate::narrator::{Narrator, Voice};

pub const INTRO_LINE: &str =
    "Initializing the network. Welcome to the future of distributed intelligence.";
pub const WELCOME_LINE: &str = "Welcome to the swarm.";

const SPLASH_VOICE: Voice = Voice {
    rate: 0.95,
    pitch: 1.1,
    volume: 0.7,
};

/// Fade-out before the main screen takes over.
const FADE_MS: u64 = 800;
/// Fade-out of the "click to begin" hint once the intro has played.
const HINT_FADE_MS: u64 = 500;
const COUNT_DURATION_MS: u64 = 2500;
const COUNT_STAGGER_MS: u64 = 200;

/// A number that eases from zero up to its target.
#[derive(Debug, Clone, PartialEq)]
pub struct CountUp {
    pub label: &'static str,
    pub target: u64,
    pub start_ms: u64,
    pub duration_ms: u64,
}

impl CountUp {
    /// Displayed value at `now_ms`: zero before the start, exactly the target
    /// once the duration has passed, cubic ease-out in between.
    pub fn value_at(&self, now_ms: u64) -> u64 {
        if now_ms < self.start_ms {
            return 0;
        }
        let elapsed = now_ms - self.start_ms;
        if elapsed >= self.duration_ms {
            return self.target;
        }
        let progress = elapsed as f64 / self.duration_ms as f64;
        (self.target as f64 * ease_out_cubic(progress)).floor() as u64
    }
}

fn ease_out_cubic(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(3)
}

/// Format with comma thousands separators.
pub fn format_grouped(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Where the splash screen is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashPhase {
    /// Showing, waiting for the user to continue.
    Waiting,
    /// Fading out since the given time.
    Leaving { since_ms: u64 },
    /// Fully faded; the main screen should take over.
    Done,
}

/// Splash screen state.
#[derive(Debug, Clone)]
pub struct SplashScreen {
    phase: SplashPhase,
    /// When the intro line was spoken, if it has been.
    intro_at_ms: Option<u64>,
    counters: [CountUp; 3],
}

impl SplashScreen {
    /// Splash first shown at `now_ms`; counters begin `counters_delay_ms` later.
    pub fn new(now_ms: u64, counters_delay_ms: u64) -> Self {
        let start = now_ms + counters_delay_ms;
        let counter = |i: u64, label, target| CountUp {
            label,
            target,
            start_ms: start + i * COUNT_STAGGER_MS,
            duration_ms: COUNT_DURATION_MS,
        };
        Self {
            phase: SplashPhase::Waiting,
            intro_at_ms: None,
            counters: [
                counter(0, "agents", 10_000),
                counter(1, "synthesis paths", 49_995_000),
                counter(2, "patents", 39),
            ],
        }
    }

    pub fn phase(&self) -> SplashPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == SplashPhase::Done
    }

    pub fn counters(&self) -> &[CountUp] {
        &self.counters
    }

    /// A click anywhere plays the intro, once.
    pub fn on_click(&mut self, narrator: &mut dyn Narrator, now_ms: u64) {
        if self.phase == SplashPhase::Waiting && self.intro_at_ms.is_none() {
            self.intro_at_ms = Some(now_ms);
            narrator.speak(INTRO_LINE, SPLASH_VOICE);
        }
    }

    /// Continue to the main screen.
    pub fn on_enter(&mut self, narrator: &mut dyn Narrator, now_ms: u64) {
        if self.phase != SplashPhase::Waiting {
            return;
        }
        narrator.cancel();
        narrator.speak(WELCOME_LINE, SPLASH_VOICE);
        self.phase = SplashPhase::Leaving { since_ms: now_ms };
        tracing::info!("leaving splash screen");
    }

    pub fn tick(&mut self, now_ms: u64) {
        if let SplashPhase::Leaving { since_ms } = self.phase
            && now_ms.saturating_sub(since_ms) >= FADE_MS
        {
            self.phase = SplashPhase::Done;
        }
    }

    /// Overall opacity of the splash text.
    pub fn opacity(&self, now_ms: u64) -> f32 {
        match self.phase {
            SplashPhase::Waiting => 1.0,
            SplashPhase::Leaving { since_ms } => {
                let t = now_ms.saturating_sub(since_ms) as f32 / FADE_MS as f32;
                (1.0 - t).clamp(0.0, 1.0)
            }
            SplashPhase::Done => 0.0,
        }
    }

    fn hint_opacity(&self, now_ms: u64) -> f32 {
        let hint = self.intro_at_ms.map_or(1.0, |at| {
            let t = now_ms.saturating_sub(at) as f32 / HINT_FADE_MS as f32;
            (1.0 - t).clamp(0.0, 1.0)
        });
        hint * self.opacity(now_ms)
    }

    /// Draw the splash text over whatever is already in the frame.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        now_ms: u64,
        theme: ColorTheme,
        backdrop: Rgb,
    ) {
        let (r, g, b) = theme.rgb();
        let accent = Rgb(r, g, b);
        let faded = |alpha: f32| Style::new().fg(accent.alpha(alpha).over(backdrop).into());
        let opacity = self.opacity(now_ms);

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Title
            Constraint::Length(1), // Subtitle
            Constraint::Length(2), // Spacing
            Constraint::Length(3), // Counters
            Constraint::Length(2), // Spacing
            Constraint::Length(1), // Hint
            Constraint::Fill(1),   // Bottom padding
        ])
        .split(area);

        let title = Paragraph::new("P L E X U S")
            .style(faded(opacity).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        frame.render_widget(title, chunks[1]);

        let subtitle = Paragraph::new("a network that grows with every node")
            .style(faded(opacity * 0.6))
            .alignment(Alignment::Center);
        frame.render_widget(subtitle, chunks[2]);

        let counters: Vec<Line> = self
            .counters
            .iter()
            .map(|c| {
                Line::from(format!(
                    "{:>12}  {:<15}",
                    format_grouped(c.value_at(now_ms)),
                    c.label
                ))
            })
            .collect();
        let counters = Paragraph::new(counters)
            .style(faded(opacity))
            .alignment(Alignment::Center);
        frame.render_widget(counters, chunks[4]);

        let hint_opacity = self.hint_opacity(now_ms);
        if hint_opacity > 0.0 {
            let hint = Paragraph::new("click anywhere to begin  ·  enter to continue")
                .style(faded(hint_opacity * 0.7))
                .alignment(Alignment::Center);
            frame.render_widget(hint, chunks[6]);
        }
    }
}
