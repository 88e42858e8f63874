//! Render collaborator
//!
//! The game draws into a `Canvas` in world coordinates (one unit per
//! terminal cell, row 0 at the top). `Frame` is the in-memory grid every
//! canvas paints into; the terminal canvas wraps one and flushes it.

use std::io;

use crate::consts::{BIRD_COLUMN, WORLD_HEIGHT, WORLD_WIDTH};

bitflags::bitflags! {
    /// Text attributes for a cell
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Attr: u8 {
        const BOLD     = 1 << 0;
        const BLINK    = 1 << 1;
        /// Swap foreground and background
        const STANDOUT = 1 << 2;
    }
}

/// What a painted cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Bird,
    Pipe,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub tag: Tag,
    pub attr: Attr,
}

/// The part of the world that is actually visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// World column shown at the left edge
    pub left: i32,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// Whole world visible
    pub const fn world() -> Self {
        Self {
            left: 0,
            cols: WORLD_WIDTH,
            rows: WORLD_HEIGHT,
        }
    }

    /// Window for a terminal of `cols` x `rows`. When the world does not fit,
    /// the bird sits a quarter of the way in from the left edge.
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        let left = if cols >= WORLD_WIDTH {
            0
        } else {
            let max_left = i32::from(WORLD_WIDTH - cols);
            (BIRD_COLUMN - i32::from(cols) / 4).clamp(0, max_left)
        };
        Self { left, cols, rows }
    }

    /// Left column that centers something `width` wide
    pub fn centered_col(&self, width: usize) -> i32 {
        let spare = i32::from(self.cols) - width as i32;
        self.left + (spare / 2).max(0)
    }

    /// Top row that centers something `height` tall
    pub fn centered_row(&self, height: usize) -> i32 {
        let visible = i32::from(self.rows.min(WORLD_HEIGHT));
        ((visible - height as i32) / 2).max(0)
    }
}

/// Drawing surface the game renders each tick into
pub trait Canvas {
    fn viewport(&self) -> Viewport;

    /// Wipe everything drawn since the last present
    fn clear(&mut self);

    /// Horizontal run of `text` starting at (`row`, `col`)
    fn draw_run(&mut self, row: i32, col: i32, text: &str, tag: Tag, attr: Attr);

    /// `len` copies of `ch` going down from (`row`, `col`)
    fn draw_vline(&mut self, row: i32, col: i32, ch: char, len: i32, tag: Tag, attr: Attr);

    /// Show what has been drawn
    fn present(&mut self) -> io::Result<()>;
}

/// Grid of tagged cells; anything drawn outside it is clipped
#[derive(Debug, Clone)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<Option<Cell>>,
    presented: usize,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
            presented: 0,
        }
    }

    /// A frame covering the whole world
    pub fn world() -> Self {
        Self::new(usize::from(WORLD_WIDTH), usize::from(WORLD_HEIGHT))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// How many times `present` has been called
    pub fn presented(&self) -> usize {
        self.presented
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    pub fn set(&mut self, row: i32, col: i32, cell: Cell) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = Some(cell);
        }
    }

    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).and_then(|i| self.cells[i])
    }

    /// Characters of one row, blanks for empty cells
    pub fn row_text(&self, row: i32) -> String {
        (0..self.width as i32)
            .map(|col| self.get(row, col).map_or(' ', |c| c.ch))
            .collect()
    }

    /// Every painted cell with its position
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|c| ((i / self.width) as i32, (i % self.width) as i32, c))
        })
    }

    /// Whether any row contains `needle`
    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.height as i32).any(|row| self.row_text(row).contains(needle))
    }
}

impl Canvas for Frame {
    fn viewport(&self) -> Viewport {
        Viewport {
            left: 0,
            cols: u16::try_from(self.width).unwrap_or(u16::MAX),
            rows: u16::try_from(self.height).unwrap_or(u16::MAX),
        }
    }

    fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn draw_run(&mut self, row: i32, col: i32, text: &str, tag: Tag, attr: Attr) {
        for (i, ch) in text.chars().enumerate() {
            self.set(row, col + i as i32, Cell { ch, tag, attr });
        }
    }

    fn draw_vline(&mut self, row: i32, col: i32, ch: char, len: i32, tag: Tag, attr: Attr) {
        for dy in 0..len.max(0) {
            self.set(row + dy, col, Cell { ch, tag, attr });
        }
    }

    fn present(&mut self) -> io::Result<()> {
        self.presented += 1;
        Ok(())
    }
}
