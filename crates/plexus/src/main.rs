mod logging;
mod narrator;
mod splash;

use std::io;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
};
use plexus_config::Config;
use plexus_core::{AnimationSpeed, Attraction, ColorTheme, Profile};
use plexus_field::{
    Animator, CanvasSurface, FrameClock, FrameScheduler, Point, Rgb,
    effects::{Bursts, CursorTrail},
};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph},
};

use crate::narrator::{CaptionNarrator, Narrator};
use crate::splash::SplashScreen;

#[derive(Parser)]
#[command(name = "plexus", version, about = "An animated particle network for the terminal")]
struct Cli {
    /// Read settings from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Go straight to the main screen
    #[arg(long)]
    skip_splash: bool,

    /// Seed for a reproducible particle layout
    #[arg(long)]
    seed: Option<u64>,

    /// Frame rate: slow, medium or fast
    #[arg(long, value_parser = parse_speed)]
    speed: Option<AnimationSpeed>,

    /// Don't show narrated captions
    #[arg(long)]
    no_narration: bool,

    /// Enable verbose debug logging
    #[arg(long)]
    verbose: bool,
}

fn parse_speed(s: &str) -> Result<AnimationSpeed, String> {
    match s.to_ascii_lowercase().as_str() {
        "slow" => Ok(AnimationSpeed::Slow),
        "medium" => Ok(AnimationSpeed::Medium),
        "fast" => Ok(AnimationSpeed::Fast),
        _ => Err(format!("unknown speed `{s}`, expected slow, medium or fast")),
    }
}

impl Cli {
    /// Load the config file, if there is anywhere to keep one.
    fn load_settings(&self) -> color_eyre::Result<Option<SettingsFile>> {
        let path = match &self.config {
            Some(path) => path.clone(),
            None => match plexus_config::default_path() {
                Ok(path) => path,
                Err(err) => {
                    tracing::warn!(%err, "using default settings");
                    return Ok(None);
                }
            },
        };
        let config = Config::load_from(&path).wrap_err("failed to load configuration")?;
        Ok(Some(SettingsFile { path, config }))
    }

    /// Apply command-line overrides on top of the file settings.
    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if self.skip_splash {
            config.splash.enabled = false;
        }
        if self.no_narration {
            config.splash.narration = false;
        }
        config
    }
}

/// The config file, as loaded, that theme and speed changes are saved to.
///
/// Kept apart from the running config so command-line overrides are never
/// written back.
#[derive(Debug)]
struct SettingsFile {
    path: PathBuf,
    config: Config,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let settings = cli.load_settings()?;
    let config = cli.apply_overrides(
        settings
            .as_ref()
            .map(|file| file.config.clone())
            .unwrap_or_default(),
    );
    let app = App::new(config, cli.seed).with_settings(settings);

    let terminal = ratatui::init();
    let result = run(terminal, app);
    ratatui::restore();
    result
}

fn run(terminal: DefaultTerminal, app: App) -> color_eyre::Result<()> {
    execute!(io::stdout(), EnableMouseCapture)?;
    let result = app.run(terminal);
    execute!(io::stdout(), DisableMouseCapture)?;
    result
}

/// Which screen is showing.
#[derive(Debug)]
enum Screen {
    Splash(SplashScreen),
    Main,
}

impl Screen {
    fn profile(&self) -> Profile {
        match self {
            Screen::Splash(_) => Profile::Splash,
            Screen::Main => Profile::Background,
        }
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    rng: StdRng,
    clock: FrameClock,
    /// Terminal area the particle field covers.
    area: Rect,
    screen: Screen,
    /// `None` while the terminal has no drawable area.
    animator: Option<Animator<CanvasSurface>>,
    bursts: Bursts,
    trail: CursorTrail,
    narrator: CaptionNarrator,
    paused: bool,
    theme: ColorTheme,
    /// Where theme and speed changes are saved, if anywhere.
    settings: Option<SettingsFile>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let screen = if config.splash.enabled {
            Screen::Splash(SplashScreen::new(0, config.splash.counters_delay_ms))
        } else {
            Screen::Main
        };
        Self {
            running: false,
            rng,
            clock: FrameClock::new(config.speed.frame_interval()),
            area: Rect::default(),
            screen,
            animator: None,
            bursts: Bursts::new(),
            trail: CursorTrail::new(),
            narrator: CaptionNarrator::new(config.splash.narration),
            paused: false,
            theme: config.theme,
            config,
            settings: None,
        }
    }

    fn with_settings(mut self, settings: Option<SettingsFile>) -> Self {
        self.settings = settings;
        self
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let started = Instant::now();
        let now_ms = || started.elapsed().as_millis() as u64;

        let size = terminal.size()?;
        self.mount(Rect::new(0, 0, size.width, size.height));
        self.running = true;
        while self.running {
            if self.clock.take_due(Instant::now()) {
                let now = now_ms();
                self.on_frame(now);
                terminal.draw(|frame| self.render(frame, now))?;
            }
            self.handle_crossterm_events(now_ms())?;
        }
        Ok(())
    }

    fn backdrop(&self) -> Rgb {
        let [r, g, b] = self.config.backdrop;
        Rgb(r, g, b)
    }

    /// Start a fresh particle field for the current screen over `area`.
    fn mount(&mut self, area: Rect) {
        self.area = area;
        let profile = self.screen.profile();
        let mut params = profile.params();
        if profile == Profile::Background {
            let attraction = self.config.background.attraction.then(Attraction::default);
            params = params.with_attraction(attraction);
        }

        let surface = CanvasSurface::for_area(
            area,
            self.config.cell_width_px,
            self.config.cell_height_px,
            self.backdrop(),
        );
        self.animator = Animator::launch(surface, params, &mut self.rng, &mut self.clock);
        match &self.animator {
            Some(animator) => tracing::info!(
                profile = profile.name(),
                particles = animator.field().particles().len(),
                "particle field started"
            ),
            // Keep ticking so captions and the splash fade still progress.
            None => self.clock.request_frame(),
        }
    }

    /// Advance everything by one frame.
    fn on_frame(&mut self, now_ms: u64) {
        self.narrator.tick(now_ms);

        if let Screen::Splash(splash) = &mut self.screen {
            splash.tick(now_ms);
            if splash.is_done() {
                self.screen = Screen::Main;
                tracing::info!("entered main screen");
                self.mount(self.area);
            }
        }

        let Some(animator) = self.animator.as_mut().filter(|_| !self.paused) else {
            self.clock.request_frame();
            return;
        };
        animator.animate(&mut self.clock);

        self.bursts.tick();
        self.trail.prune(now_ms);
        let surface = animator.surface_mut();
        self.bursts.draw(surface);
        self.trail.draw(surface, now_ms);
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame, now_ms: u64) {
        let area = frame.area();
        let backdrop = self.backdrop();

        // Until the resize event arrives the field may be larger than the frame.
        let field_area = self.area.intersection(area);
        match &self.animator {
            Some(animator) if !field_area.is_empty() => {
                frame.render_widget(animator.surface(), field_area)
            }
            _ => frame.render_widget(Block::new().bg(backdrop), area),
        }

        if let Screen::Splash(splash) = &self.screen {
            splash.render(frame, area, now_ms, self.theme, backdrop);
        }

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Particle field
            Constraint::Length(1), // Caption
            Constraint::Length(1), // Help text
        ])
        .split(area);

        if let Some(text) = self.narrator.visible_text() {
            let caption = Paragraph::new(text)
                .style(Style::new().fg(self.theme.color()).italic())
                .alignment(Alignment::Center);
            frame.render_widget(caption, chunks[1]);
        }

        let color = self.theme.color();
        let mut help = vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "p".bold().fg(color),
            " pause  ".dark_gray(),
            "m".bold().fg(color),
            " mute  ".dark_gray(),
            "s".bold().fg(color),
            " speed  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color".dark_gray(),
        ];
        if self.paused {
            help.push("  paused".bold().fg(color));
        }
        frame.render_widget(Line::from(help).centered(), chunks[2]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the next frame is due.
    fn handle_crossterm_events(&mut self, now_ms: u64) -> color_eyre::Result<()> {
        if event::poll(self.clock.timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.on_key_event(key, now_ms)
                }
                Event::Mouse(mouse) => self.on_mouse_event(mouse, now_ms),
                Event::Resize(width, height) => self.on_resize(Rect::new(0, 0, width, height)),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent, now_ms: u64) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Enter) => {
                if let Screen::Splash(splash) = &mut self.screen {
                    splash.on_enter(&mut self.narrator, now_ms);
                }
            }
            (_, KeyCode::Char('m')) => self.toggle_narration(),
            (_, KeyCode::Char('p')) => self.toggle_pause(),
            (_, KeyCode::Char('s')) => self.cycle_speed(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent, now_ms: u64) {
        let Some(animator) = self.animator.as_mut() else {
            return;
        };
        let moved = matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_));
        let Some(point) = animator.surface().cell_to_point(mouse.column, mouse.row) else {
            if moved {
                animator.pointer_left();
            }
            return;
        };

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                animator.pointer_moved(point);
                if matches!(self.screen, Screen::Main)
                    && self.config.background.trail
                    && !self.paused
                {
                    self.trail.record(&mut self.rng, point, now_ms);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Screen::Splash(splash) = &mut self.screen {
                    splash.on_click(&mut self.narrator, now_ms);
                }
                self.burst_at(point);
            }
            _ => {}
        }
    }

    fn burst_at(&mut self, point: Point) {
        if self.config.background.bursts && !self.paused {
            self.bursts.spawn(&mut self.rng, point);
        }
    }

    fn on_resize(&mut self, area: Rect) {
        match self.animator.as_mut() {
            Some(animator) if !area.is_empty() => {
                self.area = area;
                animator.surface_mut().set_area(area);
                animator.resize();
            }
            // Keep the old field until there is room to draw it again.
            Some(_) => {}
            None => self.mount(area),
        }
    }

    fn toggle_narration(&mut self) {
        self.narrator.toggle();
        tracing::info!(enabled = self.narrator.is_enabled(), "narration toggled");
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    fn cycle_speed(&mut self) {
        self.config.speed = self.config.speed.next();
        self.clock.set_interval(self.config.speed.frame_interval());
        tracing::debug!(fps = self.config.speed.fps(), "speed changed");
        self.save_settings();
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.theme = self.theme.next();
        self.save_settings();
    }

    /// Write the current theme and speed back to the config file.
    fn save_settings(&mut self) {
        let Some(settings) = self.settings.as_mut() else {
            return;
        };
        settings.config.speed = self.config.speed;
        settings.config.theme = self.theme;
        if let Err(err) = settings.config.save_to(&settings.path) {
            tracing::warn!(%err, "could not save settings");
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
