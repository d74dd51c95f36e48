use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use std::io::{self, Stdout};
use std::time::Duration;

use crate::device::{Display, InputDevice};
use crate::error::SnekError;
use crate::geometry::{Direction, Pos};
use crate::room::Field;
use crate::state::GameState;

const WALL_SYMBOL: &str = "█";
const EGG_SYMBOL: &str = "O";
const HEAD_SYMBOL: &str = "@";
const DEAD_HEAD_SYMBOL: &str = "X";
const BODY_SYMBOL: &str = "o";

const HEADER_HEIGHT: u16 = 3;
const FLASH_FRAMES: u8 = 3;

/// Full-screen ratatui view of the room.
pub struct TerminalDisplay {
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
    flash: u8,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        TerminalDisplay {
            terminal: None,
            flash: 0,
        }
    }

    /// Terminal cells needed for `game`: the room, its border and the header.
    pub fn required_size(game: &GameState) -> (u16, u16) {
        (
            game.width().saturating_add(2),
            game.height().saturating_add(2 + HEADER_HEIGHT),
        )
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TerminalDisplay {
    fn setup(&mut self) -> Result<(), SnekError> {
        match enter_terminal() {
            Ok(terminal) => {
                self.terminal = Some(terminal);
                info!("Terminal display ready");
                Ok(())
            }
            Err(e) => {
                // No teardown follows a failed setup, so undo what got applied
                if let Err(restore) = disable_raw_mode()
                    .and_then(|()| execute!(io::stdout(), LeaveAlternateScreen))
                {
                    warn!("Could not restore terminal after failed setup: {}", restore);
                }
                Err(e.into())
            }
        }
    }

    fn teardown(&mut self) -> Result<(), SnekError> {
        let raw = disable_raw_mode();
        match self.terminal.take() {
            Some(mut terminal) => {
                execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
                terminal.show_cursor()?;
            }
            None => execute!(io::stdout(), LeaveAlternateScreen)?,
        }
        raw?;
        Ok(())
    }

    fn render(&mut self, game: &GameState) -> Result<(), SnekError> {
        let terminal = self
            .terminal
            .as_mut()
            .ok_or_else(|| SnekError::invalid("terminal display rendered before setup"))?;

        let available = terminal.size()?;
        let (needed_width, needed_height) = TerminalDisplay::required_size(game);
        if available.width < needed_width || available.height < needed_height {
            return Err(SnekError::Size {
                needed_width,
                needed_height,
                available_width: available.width,
                available_height: available.height,
            });
        }

        let flashing = self.flash > 0;
        terminal.draw(|frame| draw_frame(frame, game, flashing))?;
        self.flash = self.flash.saturating_sub(1);
        Ok(())
    }

    fn on_eat_egg(&mut self) {
        self.flash = FLASH_FRAMES;
    }
}

fn enter_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn draw_frame(frame: &mut Frame, game: &GameState, flashing: bool) {
    let layout = Layout::default()
        .direction(layout::Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Title + score
            Constraint::Min(0),                // Room
        ])
        .split(frame.area());

    let status = if game.is_over() { "GAME OVER" } else { "Playing" };
    frame.render_widget(
        Paragraph::new(format!("SNEK    Score: {}    {}", game.score(), status))
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL)),
        layout[0],
    );

    let room_area = Rect {
        x: layout[1].x,
        y: layout[1].y,
        width: game.width().saturating_add(2).min(layout[1].width),
        height: game.height().saturating_add(2).min(layout[1].height),
    };
    let border = if flashing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default().borders(Borders::ALL).border_style(border);
    let inner_area = block.inner(room_area);

    frame.render_widget(block, room_area);
    frame.render_widget(game, inner_area);

    if game.is_over() {
        frame.render_widget(
            Paragraph::new(format!("GAME OVER\nFinal Score: {}", game.score()))
                .alignment(Alignment::Center)
                .bold(),
            inner_area,
        );
    }
}

fn cell_in(area: Rect, pos: Pos) -> Option<(u16, u16)> {
    let x = u16::try_from(pos.x).ok()?;
    let y = u16::try_from(pos.y).ok()?;
    (x < area.width && y < area.height).then(|| (area.x + x, area.y + y))
}

impl Widget for &GameState {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let room = self.room();
        for pos in room.cells() {
            if let (Ok(Field::Wall), Some(cell)) = (room.get_field_value(pos), cell_in(area, pos)) {
                buf[cell].set_symbol(WALL_SYMBOL).set_fg(Color::DarkGray);
            }
        }

        let egg = self.egg();
        if let Some(cell) = cell_in(area, egg).filter(|_| room.is_inside(egg)) {
            buf[cell].set_symbol(EGG_SYMBOL).set_fg(Color::LightRed);
        }

        // Tail first so the head is drawn on top of stacked segments
        let segments: Vec<Pos> = self.snake().segments().collect();
        for pos in segments.iter().skip(1).rev() {
            if let Some(cell) = cell_in(area, *pos) {
                buf[cell].set_symbol(BODY_SYMBOL).set_fg(Color::Green);
            }
        }

        let head = self.snake().head();
        if let Some(cell) = cell_in(area, head).filter(|_| room.is_inside(head)) {
            let symbol = if self.is_over() { DEAD_HEAD_SYMBOL } else { HEAD_SYMBOL };
            buf[cell].set_symbol(symbol).set_fg(Color::Yellow);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Turn(Direction),
    Quit,
    Ignore,
}

/// Maps a key press to what the keyboard device does with it.
pub fn key_command(key: KeyEvent) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyCommand::Quit;
    }

    match key.code {
        // Movement - arrow keys or WASD
        KeyCode::Up | KeyCode::Char('w' | 'W') => KeyCommand::Turn(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => KeyCommand::Turn(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => KeyCommand::Turn(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => KeyCommand::Turn(Direction::Right),

        // Controls
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => KeyCommand::Quit,
        _ => KeyCommand::Ignore,
    }
}

/// Arrow keys or WASD steer; `q`, Esc or Ctrl-C end the run with
/// [`SnekError::Quit`].
#[derive(Debug, Default)]
pub struct KeyboardInput;

impl KeyboardInput {
    pub fn new() -> Self {
        KeyboardInput
    }
}

impl InputDevice for KeyboardInput {
    fn setup(&mut self) -> Result<(), SnekError> {
        enable_raw_mode()?;
        Ok(())
    }

    fn teardown(&mut self) -> Result<(), SnekError> {
        disable_raw_mode()?;
        Ok(())
    }

    fn get_actions(&mut self, _game: &GameState) -> Result<Vec<Direction>, SnekError> {
        let mut actions = Vec::new();

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key_command(key) {
                KeyCommand::Turn(direction) => actions.push(direction),
                KeyCommand::Quit => {
                    info!("Quit requested from keyboard");
                    return Err(SnekError::Quit);
                }
                KeyCommand::Ignore => {}
            }
        }

        Ok(actions)
    }
}
