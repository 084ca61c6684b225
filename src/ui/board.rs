//! Interactive full-screen contest board
//!
//! Raw-mode crossterm app: manager cards with puzzle pieces, a live
//! leaderboard, a timed notification line, and periodic autosave. Input is
//! read on a blocking task and fed through a channel; the event loop is a
//! `select!` over key events, a redraw tick, and the autosave interval, so
//! exactly one event at a time touches the registry.

use crate::config::Config;
use crate::models::{MetricKey, Standing};
use crate::state::Registry;
use crate::storage::BoardStore;
use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// How long a toggle notification stays on screen
const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Redraw cadence (notification expiry, saved-at clock)
const TICK: Duration = Duration::from_millis(250);

struct Notification {
    message: String,
    error: bool,
    shown_at: Instant,
}

/// What a key press asks the loop to do
enum Action {
    None,
    Redraw,
    Quit,
}

pub struct BoardApp {
    registry: Registry,
    store: BoardStore,
    selected: usize,
    cursor: usize,
    notification: Option<Notification>,
}

impl BoardApp {
    /// Build the app: fresh roster with saved flags merged in
    pub fn new(config: &Config) -> Result<Self> {
        let store = config.store()?;
        let mut registry = Registry::new();
        if let Some(saved) = store.load() {
            registry.merge_saved(&saved);
        }

        Ok(Self {
            registry,
            store,
            selected: 0,
            cursor: 0,
            notification: None,
        })
    }

    /// Run the board until the user quits. Owns the autosave interval; it
    /// stops with the loop, and a final save runs on the way out.
    pub async fn run(mut self, autosave: Duration) -> Result<()> {
        let _guard = TerminalGuard::enter()?;
        let mut stdout = io::stdout();

        let stop = Arc::new(AtomicBool::new(false));
        let mut keys = spawn_input_reader(stop.clone());

        let mut redraw = tokio::time::interval(TICK);
        let mut autosave_tick = tokio::time::interval(autosave);
        autosave_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        autosave_tick.tick().await; // first tick fires immediately, skip it

        self.render(&mut stdout)?;

        loop {
            tokio::select! {
                key = keys.recv() => {
                    let Some(key) = key else { break };
                    match self.handle_key(key) {
                        Action::Quit => break,
                        Action::Redraw => self.render(&mut stdout)?,
                        Action::None => {}
                    }
                }
                _ = autosave_tick.tick() => {
                    if self.registry.dirty() {
                        self.save();
                        self.render(&mut stdout)?;
                    }
                }
                _ = redraw.tick() => {
                    if self.expire_notification() {
                        self.render(&mut stdout)?;
                    }
                }
            }
        }

        stop.store(true, Ordering::Relaxed);
        if self.registry.dirty() {
            self.save();
        }
        Ok(())
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }

        // Alt+1..4 unlocks the next locked piece for that manager
        if key.modifiers.contains(KeyModifiers::ALT) {
            if let KeyCode::Char(c @ '1'..='4') = key.code {
                let idx = c as usize - '1' as usize;
                self.unlock_next(idx);
                return Action::Redraw;
            }
            return Action::None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char(c @ '1'..='4') => {
                self.selected = c as usize - '1' as usize;
                Action::Redraw
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                Action::Redraw
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(self.registry.managers().len() - 1);
                Action::Redraw
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                Action::Redraw
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(MetricKey::ALL.len() - 1);
                Action::Redraw
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.toggle(self.selected, MetricKey::ALL[self.cursor]);
                Action::Redraw
            }
            KeyCode::Char('s') => {
                self.toggle(self.selected, MetricKey::Sqo);
                Action::Redraw
            }
            KeyCode::Char('p') => {
                self.toggle(self.selected, MetricKey::Progression);
                Action::Redraw
            }
            KeyCode::Char('m') => {
                self.toggle(self.selected, MetricKey::Meetings);
                Action::Redraw
            }
            KeyCode::Char('l') => {
                self.toggle(self.selected, MetricKey::Mql);
                Action::Redraw
            }
            _ => Action::None,
        }
    }

    fn toggle(&mut self, manager_idx: usize, metric: MetricKey) {
        let Some(manager) = self.registry.managers().get(manager_idx) else {
            return;
        };
        let id = manager.id.clone();
        let name = manager.name.clone();

        match self.registry.toggle(&id, metric) {
            Ok(unlocked) => {
                let verdict = if unlocked { "UNLOCKED!" } else { "locked" };
                self.notify(
                    format!("{} - {} {}", name, metric.name().to_uppercase(), verdict),
                    false,
                );
                self.save();
            }
            Err(e) => self.notify(e.to_string(), true),
        }
    }

    fn unlock_next(&mut self, manager_idx: usize) {
        let Some(manager) = self.registry.managers().get(manager_idx) else {
            return;
        };
        let id = manager.id.clone();

        match self.registry.next_locked(&id) {
            Ok(Some(metric)) => self.toggle(manager_idx, metric),
            Ok(None) => {
                let name = self.registry.managers()[manager_idx].name.clone();
                self.notify(format!("{} already has all 4 pieces", name), false);
            }
            Err(e) => self.notify(e.to_string(), true),
        }
    }

    /// Persistence is best-effort: a failed save becomes a red notification,
    /// never an abort (the autosave interval will retry while dirty).
    fn save(&mut self) {
        match self.store.save(&self.registry) {
            Ok(()) => self.registry.mark_clean(),
            Err(e) => self.notify(format!("save failed: {e:#}"), true),
        }
    }

    fn notify(&mut self, message: String, error: bool) {
        self.notification = Some(Notification {
            message,
            error,
            shown_at: Instant::now(),
        });
    }

    fn expire_notification(&mut self) -> bool {
        let expired = self
            .notification
            .as_ref()
            .is_some_and(|n| n.shown_at.elapsed() >= NOTIFICATION_TTL);
        if expired {
            self.notification = None;
        }
        expired
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    fn render(&self, out: &mut impl Write) -> Result<()> {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

        queue!(
            out,
            SetAttribute(Attribute::Bold),
            SetForegroundColor(Color::Cyan),
            Print(" 🧩 SPIFF PUZZLE CHALLENGE"),
            ResetColor,
            SetAttribute(Attribute::Reset),
        )?;
        if let Some(saved) = self.store.last_saved() {
            queue!(
                out,
                SetForegroundColor(Color::DarkGrey),
                Print(format!("   saved {}", saved.format("%H:%M:%S"))),
                ResetColor,
            )?;
        }

        let mut row: u16 = 2;
        for idx in 0..self.registry.managers().len() {
            self.render_card(out, row, idx)?;
            row += 1;
        }

        row += 1;
        queue!(
            out,
            MoveTo(0, row),
            SetAttribute(Attribute::Bold),
            Print(" 🏆 LEADERBOARD"),
            SetAttribute(Attribute::Reset),
        )?;
        row += 1;
        for (position, standing) in self.registry.ranking().iter().enumerate() {
            self.render_standing(out, row, position, standing)?;
            row += 1;
        }

        row += 1;
        if let Some(n) = &self.notification {
            let color = if n.error { Color::Red } else { Color::Green };
            queue!(
                out,
                MoveTo(0, row),
                SetForegroundColor(color),
                Print(format!(" {}", n.message)),
                ResetColor,
            )?;
        }
        row += 2;

        queue!(
            out,
            MoveTo(0, row),
            SetForegroundColor(Color::DarkGrey),
            Print(" 1-4/↑↓ manager   ←→ piece   space toggle   s/p/m/l direct   alt+1-4 next   q quit"),
            ResetColor,
        )?;

        out.flush()?;
        Ok(())
    }

    fn render_card(&self, out: &mut impl Write, row: u16, idx: usize) -> Result<()> {
        let manager = &self.registry.managers()[idx];
        let selected = idx == self.selected;

        queue!(out, MoveTo(0, row))?;
        if selected {
            queue!(
                out,
                SetForegroundColor(Color::Yellow),
                Print(" › "),
                ResetColor,
                SetAttribute(Attribute::Bold),
            )?;
        } else {
            queue!(out, Print("   "))?;
        }
        queue!(out, Print(format!("{:<8}", manager.name)), SetAttribute(Attribute::Reset))?;

        for (piece_idx, key) in MetricKey::ALL.iter().enumerate() {
            let unlocked = manager.metrics.get(*key);
            let under_cursor = selected && piece_idx == self.cursor;

            let color = match (unlocked, under_cursor) {
                (_, true) => Color::Yellow,
                (true, false) => Color::Green,
                (false, false) => Color::DarkGrey,
            };
            let glyph = if unlocked { '■' } else { '·' };
            let bracket = if under_cursor { ('[', ']') } else { (' ', ' ') };

            queue!(
                out,
                SetForegroundColor(color),
                Print(format!("{}{} {}{}", bracket.0, key.label(), glyph, bracket.1)),
                ResetColor,
            )?;
        }

        let completed = manager.metrics.completed();
        queue!(out, Print(format!("  {}/4 Pieces  ", completed)))?;

        let filled = completed as usize * 2;
        queue!(
            out,
            SetForegroundColor(Color::Green),
            Print("█".repeat(filled)),
            SetForegroundColor(Color::DarkGrey),
            Print("░".repeat(8 - filled)),
            ResetColor,
        )?;

        if manager.is_winner() {
            queue!(
                out,
                SetForegroundColor(Color::Magenta),
                SetAttribute(Attribute::Bold),
                Print("  🎉 WINNER"),
                SetAttribute(Attribute::Reset),
                ResetColor,
            )?;
        }
        Ok(())
    }

    fn render_standing(
        &self,
        out: &mut impl Write,
        row: u16,
        position: usize,
        standing: &Standing,
    ) -> Result<()> {
        queue!(
            out,
            MoveTo(0, row),
            Print(format!(" {} {:<8}", Standing::medal(position), standing.name)),
        )?;
        let line = format!("{}/4 ({}%)", standing.completed, standing.percentage);
        if standing.winner {
            queue!(
                out,
                SetForegroundColor(Color::Magenta),
                Print(line),
                ResetColor
            )?;
        } else {
            queue!(out, Print(line))?;
        }
        Ok(())
    }
}

/// Reads terminal events on a blocking task. Polling keeps the task able to
/// notice the stop flag once the loop has exited.
fn spawn_input_reader(stop: Arc<AtomicBool>) -> mpsc::Receiver<crossterm::event::KeyEvent> {
    let (tx, rx) = mpsc::channel(16);

    tokio::task::spawn_blocking(move || {
        while !stop.load(Ordering::Relaxed) {
            match event::poll(Duration::from_millis(200)) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => {
                        if tx.blocking_send(key).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => break,
                },
                Ok(false) => {}
                Err(_) => break,
            }
        }
    });

    rx
}

/// Restores the terminal even when the loop errors out
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
