use std::{
    fs::File,
    io,
    path::PathBuf,
    sync::Mutex,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use tictally::{cli::GameArgs, Command, Game, Mark, Snapshot};
use tracing::{debug, info};
use tui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame, Terminal,
};

const TICK: Duration = Duration::from_millis(50);

/// Tic-tac-toe in the terminal.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    game: GameArgs,

    /// Write logs here. Nothing is logged otherwise.
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(tictally::cli::env_filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    let mut game = Game::new(cli.game.config());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut game);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run<B: Backend>(terminal: &mut Terminal<B>, game: &mut Game) -> Result<()> {
    loop {
        let ui = Ui {
            snapshot: Snapshot::of(game),
        };
        terminal.draw(|f| ui.draw(f))?;

        if event::poll(TICK)? {
            let command = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char(c @ '1'..='9') => {
                        Some(Command::Select(c as usize - '1' as usize))
                    }
                    KeyCode::Char('r') => Some(Command::Reset),
                    KeyCode::Char('s') => Some(Command::ResetScores),
                    KeyCode::Char('m') => Some(Command::SetMode(game.mode().toggle())),
                    _ => None,
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => square_at(terminal.size()?, column, row).map(Command::Select),
                _ => None,
            };
            if let Some(command) = command {
                if let Err(err) = game.handle(command) {
                    debug!(%err, ?command, "ignored");
                }
            }
        }

        if let Some(reply) = game.poll(Instant::now()) {
            debug!(index = reply.index, "computer moved");
        }
    }

    info!(scores = %game.scores(), "quitting");
    Ok(())
}

struct Ui {
    snapshot: Snapshot,
}

impl Ui {
    fn draw<B: Backend>(&self, f: &mut Frame<B>) {
        let (board, info) = panes(f.size());
        let block = Block::default().title("Board").borders(Borders::ALL);
        self.draw_board(f, block.inner(board));
        f.render_widget(block, board);

        let block = Block::default().title("Game Info").borders(Borders::ALL);
        let lines = Paragraph::new(self.info_lines()).block(block);
        f.render_widget(lines, info);
    }

    fn info_lines(&self) -> Vec<Spans<'static>> {
        let snapshot = &self.snapshot;
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let score = |mark: Mark, label: &str, count: u32| {
            let style = if snapshot.active_side == Some(mark) {
                bold.fg(Color::Yellow)
            } else {
                Style::default()
            };
            Spans::from(Span::styled(format!("{label}: {count}"), style))
        };

        vec![
            Spans::from(Span::styled(snapshot.mode.to_string(), bold)),
            Spans::from(""),
            Spans::from(Span::styled(snapshot.status.clone(), bold)),
            Spans::from(""),
            score(Mark::X, "X", snapshot.scores.x_wins),
            score(Mark::O, "O", snapshot.scores.o_wins),
            Spans::from(format!("Draw: {}", snapshot.scores.draws)),
            Spans::from(""),
            Spans::from("1-9  play a square (or click it)"),
            Spans::from("r    new game"),
            Spans::from("s    reset scores"),
            Spans::from("m    switch mode"),
            Spans::from("q    quit"),
        ]
    }

    fn draw_board<B: Backend>(&self, f: &mut Frame<B>, area: Rect) {
        let borders = [
            Borders::RIGHT | Borders::BOTTOM,
            Borders::ALL ^ Borders::TOP,
            Borders::LEFT | Borders::BOTTOM,
            Borders::ALL ^ Borders::LEFT,
            Borders::ALL,
            Borders::ALL ^ Borders::RIGHT,
            Borders::RIGHT | Borders::TOP,
            Borders::ALL ^ Borders::BOTTOM,
            Borders::LEFT | Borders::TOP,
        ];

        for (index, chunk) in square_areas(area).into_iter().enumerate() {
            let block = Block::default().borders(borders[index]);
            let square = RenderSquare {
                index,
                mark: self.snapshot.squares[index],
                highlighted: self.snapshot.is_highlighted(index),
            };
            f.render_widget(square, block.inner(chunk));
            f.render_widget(block, chunk);
        }
    }
}

/// Splits the screen into the board pane and the info pane.
fn panes(size: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(2)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
        .split(size);
    (chunks[0], chunks[1])
}

/// Where each square is drawn inside the board pane, in board order.
fn square_areas(area: Rect) -> [Rect; 9] {
    let thirds = [
        Constraint::Percentage(5),
        Constraint::Percentage(30),
        Constraint::Percentage(30),
        Constraint::Percentage(30),
        Constraint::Percentage(5),
    ];
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints(thirds.as_ref())
        .split(area);

    let mut squares = [Rect::default(); 9];
    for row in 0..3 {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .margin(0)
            .horizontal_margin(3)
            .constraints(thirds.as_ref())
            .split(rows[row + 1]);
        for col in 0..3 {
            squares[row * 3 + col] = columns[col + 1];
        }
    }
    squares
}

/// The square under a click at `column`/`row` on a terminal of `size`.
fn square_at(size: Rect, column: u16, row: u16) -> Option<usize> {
    let (board, _) = panes(size);
    let area = Block::default().borders(Borders::ALL).inner(board);
    square_areas(area).iter().position(|square| {
        column >= square.left()
            && column < square.right()
            && row >= square.top()
            && row < square.bottom()
    })
}

struct RenderSquare {
    index: usize,
    mark: Option<Mark>,
    highlighted: bool,
}

impl Widget for RenderSquare {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = if self.highlighted {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        match self.mark {
            Some(Mark::X) => render_x(area, buf, style),
            Some(Mark::O) => render_o(area, buf, style),
            None => {
                let label = (self.index + 1).to_string();
                let dim = Style::default().fg(Color::DarkGray);
                buf.set_string(
                    area.x + area.width / 2,
                    area.y + area.height / 2,
                    label,
                    dim,
                );
            }
        }
    }
}

fn render_x(area: Rect, buf: &mut Buffer, style: Style) {
    const LEFT: &str = "\\@\\";
    const RIGHT: &str = "/@/";

    if area.width < LEFT.len() as u16 {
        return;
    }
    // Horizontal room each stroke travels from top to bottom.
    let span = u32::from(area.width - LEFT.len() as u16);
    let rise = u32::from(area.height.saturating_sub(1)).max(1);
    for y in 0..area.height {
        let x = (span * u32::from(y) / rise) as u16;
        buf.set_string(area.x + x, area.y + y, LEFT, style);
        buf.set_string(area.x + span as u16 - x, area.y + y, RIGHT, style);
    }
}

fn render_o(area: Rect, buf: &mut Buffer, style: Style) {
    let rx = f32::from(area.width.saturating_sub(1)) / 2.0;
    let ry = f32::from(area.height.saturating_sub(1)) / 2.0;
    let center_x = f32::from(area.x) + rx;
    let center_y = f32::from(area.y) + ry;

    let steps = 4 * (area.width + area.height).max(8);
    for step in 0..steps {
        let angle = std::f32::consts::TAU * f32::from(step) / f32::from(steps);
        let (sin, cos) = angle.sin_cos();
        let x = (center_x + rx * cos).round() as u16;
        let y = (center_y + ry * sin).round() as u16;
        if x >= area.left() && x < area.right() && y >= area.top() && y < area.bottom() {
            buf.get_mut(x, y).set_char('@').set_style(style);
        }
    }
}
