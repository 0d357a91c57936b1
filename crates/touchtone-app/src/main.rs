//! Touchtone — terminal keypad soundboard
//!
//! Renders a 3x4 phone keypad, letterboxed into the terminal, and plays
//! one short clip per key. Clicks and keyboard presses both work; `c`
//! opens the calibration panel, whose values persist across runs.

mod app;
mod config;
mod data;
mod error;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;

use touchtone::audio::{Haptics, PlayOutcome, RodioVoice, VoiceController};
use touchtone::config::input::HAPTIC_PULSE_MS;
use touchtone::geometry::{
    FitStrategy, Frame as KeypadFrame, HitMap, OverlaySync, Rect as GeoRect, Size, SyncTrigger,
};
use touchtone::keypad::{Key, PressSource, PressTracker, SoundMap};
use touchtone::sched::SystemClock;

use crate::app::state::AppSnapshot;
use crate::config::ui::{CELL_ASPECT, DESIGN_H, DESIGN_W, TICK_MS};
use crate::data::{CalField, Calibration};

#[derive(Parser)]
#[command(name = "touchtone", about = "Terminal keypad soundboard", version)]
struct Cli {
    /// Directory containing the key clips (<token>.wav)
    #[arg(default_value = "audio")]
    audio_dir: PathBuf,

    /// Clip file extension
    #[arg(long, default_value = "wav")]
    ext: String,

    /// Start with the calibration panel open
    #[arg(long)]
    calibrate: bool,
}

/// Haptic feedback over the terminal bell
struct BellHaptics;

impl Haptics for BellHaptics {
    fn pulse(&mut self, _duration: Duration) {
        // The terminal has no vibration motor; a bell is the closest pulse
        print!("\u{7}");
    }
}

struct App {
    controller: VoiceController<RodioVoice>,
    tracker: PressTracker<SystemClock>,
    sync: OverlaySync<SystemClock>,
    hit_map: Option<HitMap>,
    /// Terminal-cell origin of the keypad area, for mouse hit-testing
    keypad_origin: (u16, u16),
    keypad_area: Rect,
    calibration: Calibration,
    calibrating: bool,
    selected: usize,
    pressed: Option<Key>,
    haptics: BellHaptics,
    mapped_keys: usize,
    running: bool,
}

impl App {
    fn new(
        controller: VoiceController<RodioVoice>,
        calibration: Calibration,
        calibrating: bool,
        mapped_keys: usize,
    ) -> Self {
        let mut sync = OverlaySync::new(FitStrategy::Letterbox, calibration.ratios(), SystemClock);
        sync.notify(SyncTrigger::ImageLoaded);
        Self {
            controller,
            tracker: PressTracker::new(SystemClock),
            sync,
            hit_map: None,
            keypad_origin: (0, 0),
            keypad_area: Rect::default(),
            calibration,
            calibrating,
            selected: 0,
            pressed: None,
            haptics: BellHaptics,
            mapped_keys,
            running: true,
        }
    }

    /// Snapshot read by the renderer
    fn snapshot(&self) -> AppSnapshot {
        AppSnapshot::from_status(self.controller.status(), self.mapped_keys)
    }

    /// Re-derive geometry and the hit map for the current keypad area
    fn sync_geometry(&mut self) {
        let area = self.keypad_area;
        self.keypad_origin = (area.x, area.y);
        let frame = KeypadFrame {
            container: GeoRect::new(0.0, 0.0, f64::from(area.width), f64::from(area.height)),
            face_box: GeoRect::new(0.0, 0.0, f64::from(area.width), f64::from(area.height)),
            natural: Size::new(DESIGN_W, DESIGN_H * CELL_ASPECT),
        };
        if let Some(geo) = self.sync.tick(&frame).copied() {
            self.hit_map = Some(HitMap::new(&geo, &self.calibration.tuning()));
        }
    }

    fn play(&mut self, key: Key) {
        if self.controller.request_play(key) != PlayOutcome::NoSound {
            self.pressed = Some(key);
        }
    }

    fn on_mouse(&mut self, me: MouseEvent) {
        match me.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if !self.tracker.press_start(PressSource::Mouse) {
                    return;
                }
                let x = f64::from(me.column.saturating_sub(self.keypad_origin.0));
                let y = f64::from(me.row.saturating_sub(self.keypad_origin.1));
                if let Some(key) = self.hit_map.as_ref().and_then(|m| m.key_at(x, y)) {
                    self.haptics.pulse(Duration::from_millis(HAPTIC_PULSE_MS));
                    self.play(key);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.tracker.press_end(PressSource::Mouse);
                self.pressed = None;
            }
            _ => {}
        }
    }

    fn on_key(&mut self, code: KeyCode) {
        // Panel navigation takes the arrows while calibrating
        if self.calibrating {
            match code {
                KeyCode::Up => {
                    self.selected = self.selected.checked_sub(1).unwrap_or(CalField::ALL.len() - 1);
                    return;
                }
                KeyCode::Down => {
                    self.selected = (self.selected + 1) % CalField::ALL.len();
                    return;
                }
                KeyCode::Left | KeyCode::Right => {
                    let dir = if code == KeyCode::Left { -1.0 } else { 1.0 };
                    CalField::ALL[self.selected].nudge(&mut self.calibration, dir);
                    self.sync.set_ratios(self.calibration.ratios());
                    // Rewritten on every adjustment; failure to persist
                    // must not interrupt live calibration
                    let _ = self.calibration.save();
                    return;
                }
                _ => {}
            }
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if self.calibrating {
                    self.calibrating = false;
                } else {
                    self.running = false;
                }
            }
            KeyCode::Char('c') => self.calibrating = !self.calibrating,
            KeyCode::Char('s') => {
                self.controller.stop();
                self.pressed = None;
            }
            KeyCode::Char(ch) => {
                if let Some(key) = Key::from_char(ch) {
                    self.play(key);
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let sounds = SoundMap::with_extension(&cli.audio_dir, &cli.ext);
    if sounds.is_empty() {
        eprintln!(
            "Warning: no clips found under {:?} (expected <token>.{})",
            cli.audio_dir, cli.ext
        );
    }
    let mapped_keys = sounds.len();

    let voice = match RodioVoice::new() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Audio error: {}", e);
            std::process::exit(1);
        }
    };
    let controller = VoiceController::new(voice, sounds);

    let calibration = match Calibration::load() {
        Ok(cal) => cal,
        Err(e) => {
            eprintln!("Warning: {} (using default calibration)", e);
            Calibration::default()
        }
    };

    let mut app = App::new(controller, calibration, cli.calibrate, mapped_keys);

    // Enter TUI
    terminal::enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(TICK_MS);
    let mut last_tick = Instant::now();

    while app.running {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key.code),
                Event::Mouse(me) => app.on_mouse(me),
                Event::Resize(_, _) => app.sync.notify(SyncTrigger::Resized),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
            if app.controller.poll_ended() {
                app.pressed = None;
            }
        }
    }

    // Leave TUI
    terminal::disable_raw_mode()?;
    io::stdout().execute(DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;

    Ok(())
}
