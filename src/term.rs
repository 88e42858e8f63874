use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{self, Attribute, Color as CColor},
    terminal,
};
use std::io::{self, Write};
use std::time::Duration;

use crate::consts::WORLD_HEIGHT;
use crate::frame::{Attr, Canvas, Cell, Frame, Tag, Viewport};
use crate::input::{Input, Key};

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rgb(u8, u8, u8);

impl Rgb {
    const fn lerp(a: Rgb, b: Rgb, t_256: u16) -> Rgb {
        let t = t_256 as i32;
        Rgb(
            (a.0 as i32 + (b.0 as i32 - a.0 as i32) * t / 256) as u8,
            (a.1 as i32 + (b.1 as i32 - a.1 as i32) * t / 256) as u8,
            (a.2 as i32 + (b.2 as i32 - a.2 as i32) * t / 256) as u8,
        )
    }

    const fn to_crossterm(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const DIRT: Rgb = Rgb(210, 185, 110);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_HI: Rgb = Rgb(255, 225, 100);
const SHADOW: Rgb = Rgb(30, 30, 30);

fn sky(row: u16) -> Rgb {
    if row >= WORLD_HEIGHT {
        return DIRT;
    }
    Rgb::lerp(SKY_TOP, SKY_BOT, row * 256 / WORLD_HEIGHT)
}

/// Foreground and background for a painted cell over `background`
fn colors(cell: &Cell, background: Rgb) -> (Rgb, Rgb) {
    let (fg, bg) = match cell.tag {
        Tag::Bird => (BIRD_HI, BIRD_Y),
        Tag::Pipe => (PIPE_L, PIPE_M),
        Tag::Text => (SHADOW, background),
    };
    if cell.attr.contains(Attr::STANDOUT) {
        (bg, fg)
    } else {
        (fg, bg)
    }
}

// ── Pen: only emit escape codes when something changes ─────────────────────

#[derive(Default)]
struct Pen {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    attr: Attr,
}

impl Pen {
    fn apply(&mut self, out: &mut impl Write, fg: Rgb, bg: Rgb, attr: Attr) -> io::Result<()> {
        if attr != self.attr {
            // Resetting attributes also resets colors
            queue!(out, style::SetAttribute(Attribute::Reset))?;
            if attr.contains(Attr::BOLD) {
                queue!(out, style::SetAttribute(Attribute::Bold))?;
            }
            if attr.contains(Attr::BLINK) {
                queue!(out, style::SetAttribute(Attribute::SlowBlink))?;
            }
            self.attr = attr;
            self.fg = None;
            self.bg = None;
        }
        if self.fg != Some(fg) {
            queue!(out, style::SetForegroundColor(fg.to_crossterm()))?;
            self.fg = Some(fg);
        }
        if self.bg != Some(bg) {
            queue!(out, style::SetBackgroundColor(bg.to_crossterm()))?;
            self.bg = Some(bg);
        }
        Ok(())
    }
}

// ── Canvas ──────────────────────────────────────────────────────────────────

/// Paints the world frame onto a crossterm terminal
pub struct TermCanvas<W: Write> {
    out: W,
    frame: Frame,
    view: Viewport,
    follow_terminal: bool,
}

impl<W: Write> TermCanvas<W> {
    /// Canvas sized to the current terminal, following later resizes
    pub fn new(out: W) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut canvas = Self::with_size(out, cols, rows);
        canvas.follow_terminal = true;
        Ok(canvas)
    }

    /// Canvas with a fixed size
    pub fn with_size(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            frame: Frame::world(),
            view: Viewport::for_terminal(cols, rows),
            follow_terminal: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn refresh_size(&mut self) {
        if !self.follow_terminal {
            return;
        }
        match terminal::size() {
            Ok((cols, rows)) => {
                if (cols, rows) != (self.view.cols, self.view.rows) {
                    log::debug!("Terminal resized to {cols}x{rows}");
                    self.view = Viewport::for_terminal(cols, rows);
                }
            }
            Err(e) => log::warn!("Could not read terminal size: {e}"),
        }
    }
}

impl<W: Write> Canvas for TermCanvas<W> {
    fn viewport(&self) -> Viewport {
        self.view
    }

    fn clear(&mut self) {
        self.refresh_size();
        self.frame.clear();
    }

    fn draw_run(&mut self, row: i32, col: i32, text: &str, tag: Tag, attr: Attr) {
        self.frame.draw_run(row, col, text, tag, attr);
    }

    fn draw_vline(&mut self, row: i32, col: i32, ch: char, len: i32, tag: Tag, attr: Attr) {
        self.frame.draw_vline(row, col, ch, len, tag, attr);
    }

    fn present(&mut self) -> io::Result<()> {
        let out = &mut self.out;
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.view.rows;
        let mut pen = Pen::default();

        for row in 0..rows {
            let background = sky(row);
            for col in 0..self.view.cols {
                let world_col = self.view.left + i32::from(col);
                match self.frame.get(i32::from(row), world_col) {
                    Some(cell) => {
                        let (fg, bg) = colors(&cell, background);
                        pen.apply(out, fg, bg, cell.attr)?;
                        queue!(out, style::Print(cell.ch))?;
                    }
                    None => {
                        pen.apply(out, background, background, Attr::empty())?;
                        queue!(out, style::Print(' '))?;
                    }
                }
            }
            if row + 1 < rows {
                queue!(
                    out,
                    style::SetAttribute(Attribute::Reset),
                    style::Print("\r\n")
                )?;
                pen = Pen::default();
            }
        }
        queue!(out, style::SetAttribute(Attribute::Reset), style::ResetColor)?;
        out.flush()
    }
}

// ── Keyboard ────────────────────────────────────────────────────────────────

/// Reads keys from the crossterm event queue
#[derive(Debug, Default)]
pub struct TermInput;

impl Input for TermInput {
    fn poll_key(&mut self) -> Key {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                        return key_from_event(key);
                    }
                    Ok(_) => continue,
                    Err(e) => {
                        log::warn!("Dropped unreadable input event: {e}");
                        return Key::None;
                    }
                },
                Ok(false) => return Key::None,
                Err(e) => {
                    log::warn!("Input poll failed: {e}");
                    return Key::None;
                }
            }
        }
    }

    fn wait_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    return Ok(key_from_event(key));
                }
            }
        }
    }
}

/// Map a crossterm key event to a game key
pub fn key_from_event(key: KeyEvent) -> Key {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Quit,
        KeyCode::Up | KeyCode::Char(' ') => Key::Ascend,
        KeyCode::Char('d') | KeyCode::Char('D') => Key::ToggleDebug,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Key::Quit,
        KeyCode::Char(c) => Key::Char(c),
        _ => Key::Other,
    }
}

// ── Terminal setup ──────────────────────────────────────────────────────────

/// Raw mode and the alternate screen for as long as it lives
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = execute!(
            io::stdout(),
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        ) {
            log::error!("Could not leave the alternate screen: {e}");
        }
        if let Err(e) = terminal::disable_raw_mode() {
            log::error!("Could not leave raw mode: {e}");
        }
    }
}
