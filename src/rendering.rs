use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, ResetColor, SetForegroundColor},
};
use log::debug;

use crate::constants::{PLAY_HEIGHT, PLAY_WIDTH};
use crate::types::Rect;

// --- ScreenBuffer for headless rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_char(&mut self, c: char) {
        if self.cursor_y < self.height && self.cursor_x < self.width {
            self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            self.write_char(c);
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer[y as usize].iter().collect()
    }

    pub fn contents(&self) -> String {
        (0..self.height).map(|y| self.row(y)).collect::<Vec<_>>().join("\n")
    }

    pub fn print_to_log(&self) {
        debug!("--- Screen Buffer ---");
        for row in &self.buffer {
            debug!("{}", row.iter().collect::<String>());
        }
        debug!("---------------------");
    }
}

impl Write for ScreenBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s = String::from_utf8_lossy(buf);
        self.write_str(&s);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// --- OutputTarget: real terminal or in-memory screen ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            }
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }

    pub fn screen_buffer(&self) -> Option<&ScreenBuffer> {
        match self {
            OutputTarget::ScreenBuffer(sb) => Some(sb),
            OutputTarget::Stdout(_) => None,
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => sb.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(sb) => sb.flush(),
        }
    }
}

// --- GameGrid: one frame of coloured cells ---
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

impl Cell {
    pub const BLANK: Cell = Cell { ch: ' ', color: Color::Reset };
}

pub struct GameGrid {
    pub grid: Vec<Vec<Cell>>,
    pub width: u16,
    pub height: u16,
}

impl GameGrid {
    pub fn new(width: u16, height: u16) -> Self {
        GameGrid {
            grid: vec![vec![Cell::BLANK; width as usize]; height as usize],
            width,
            height,
        }
    }

    pub fn col_for(&self, x: i32) -> i32 {
        (x * self.width as i32).div_euclid(PLAY_WIDTH)
    }

    pub fn row_for(&self, y: i32) -> i32 {
        (y * self.height as i32).div_euclid(PLAY_HEIGHT)
    }

    pub fn set_cell(&mut self, col: i32, row: i32, ch: char, color: Color) {
        if col >= 0 && row >= 0 && col < self.width as i32 && row < self.height as i32 {
            self.grid[row as usize][col as usize] = Cell { ch, color };
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, ch: char, color: Color) {
        let left = self.col_for(rect.x);
        let right = self.col_for(rect.right() - 1).max(left);
        let top = self.row_for(rect.y);
        let bottom = self.row_for(rect.bottom() - 1).max(top);
        for row in top..=bottom {
            for col in left..=right {
                self.set_cell(col, row, ch, color);
            }
        }
    }

    pub fn plot(&mut self, x: i32, y: i32, ch: char, color: Color) {
        let (col, row) = (self.col_for(x), self.row_for(y));
        self.set_cell(col, row, ch, color);
    }

    pub fn put_text(&mut self, col: i32, row: i32, text: &str, color: Color) {
        for (i, ch) in text.chars().enumerate() {
            self.set_cell(col + i as i32, row, ch, color);
        }
    }

    pub fn put_text_centered(&mut self, row: i32, text: &str, color: Color) {
        let col = (self.width as i32 - text.chars().count() as i32) / 2;
        self.put_text(col.max(0), row, text, color);
    }

    pub fn put_text_right(&mut self, row: i32, margin: i32, text: &str, color: Color) {
        let col = self.width as i32 - text.chars().count() as i32 - margin;
        self.put_text(col.max(0), row, text, color);
    }

    pub fn clear(&mut self) {
        for row in &mut self.grid {
            row.fill(Cell::BLANK);
        }
    }

    pub fn row_text(&self, row: u16) -> String {
        self.grid[row as usize].iter().map(|cell| cell.ch).collect()
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            let mut current = Color::Reset;
            stdout.execute_other_command(SetForegroundColor(current))?;
            let mut run = String::with_capacity(self.width as usize);
            for cell in &self.grid[y as usize] {
                if cell.color != current && cell.ch != ' ' {
                    write!(stdout, "{}", run)?;
                    run.clear();
                    current = cell.color;
                    stdout.execute_other_command(SetForegroundColor(current))?;
                }
                run.push(cell.ch);
            }
            write!(stdout, "{}", run)?;
        }
        stdout.execute_other_command(ResetColor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_units_scale_onto_cells() {
        let grid = GameGrid::new(80, 24);
        assert_eq!(grid.col_for(0), 0);
        assert_eq!(grid.col_for(799), 79);
        assert_eq!(grid.row_for(599), 23);
        assert_eq!(grid.row_for(-50), -2);
    }

    #[test]
    fn fill_rect_covers_scaled_block_and_clips() {
        let mut grid = GameGrid::new(80, 24);
        grid.fill_rect(Rect::new(400, 500, 50, 50), 'A', Color::Cyan);
        assert_eq!(&grid.row_text(20)[40..45], "AAAAA");
        assert_eq!(grid.grid[21][44].ch, 'A');
        assert_eq!(grid.grid[20][45].ch, ' ');

        // Partially above the screen: only the visible rows are drawn.
        grid.fill_rect(Rect::new(0, -30, 50, 50), '@', Color::DarkGrey);
        assert_eq!(grid.grid[0][0].ch, '@');
    }

    #[test]
    fn small_rect_still_gets_a_cell() {
        let mut grid = GameGrid::new(8, 6);
        grid.fill_rect(Rect::new(10, 10, 30, 30), '*', Color::Yellow);
        assert_eq!(grid.grid[0][0].ch, '*');
    }

    #[test]
    fn render_into_screen_buffer() {
        let mut grid = GameGrid::new(20, 3);
        grid.put_text(1, 0, "Score: 3", Color::White);
        grid.put_text_right(0, 1, "Hi: 9", Color::White);
        grid.put_text_centered(2, "Go", Color::Red);

        let mut target = OutputTarget::ScreenBuffer(ScreenBuffer::new(20, 3));
        grid.render(&mut target).unwrap();
        let sb = target.screen_buffer().unwrap();
        assert_eq!(sb.row(0), " Score: 3     Hi: 9 ");
        assert_eq!(sb.row(2), "         Go         ");
    }
}
