use super::direction::Direction;
use super::grid::Grid;
use super::Phase;
use crate::consts;
use crate::util::{center_rect, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Position, Rect, Size},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A snapshot of a [`Session`][super::Session] taken between ticks,
/// holding everything needed to draw it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FrameState {
    pub(crate) grid: Grid,
    /// The player's body, head first
    pub(crate) player: Vec<Position>,
    pub(crate) player_color: Color,
    pub(crate) direction: Direction,
    pub(crate) npcs: Vec<NpcFrame>,
    pub(crate) food: Option<Position>,
    pub(crate) score: u32,
    pub(crate) phase: Phase,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct NpcFrame {
    /// The NPC's body, head first
    pub(crate) body: Vec<Position>,
    pub(crate) alive: bool,
    pub(crate) color: Color,
}

impl FrameState {
    fn head_symbol(&self) -> char {
        match self.direction {
            Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
            Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
            Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
            Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        }
    }
}

impl Widget for &FrameState {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, board_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(format!(" Score: {}", self.score), consts::SCORE_BAR_STYLE)
            .render(score_area, buf);

        let mut block_size = self.grid.size();
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(board_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut level = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for npc in self.npcs.iter().filter(|npc| npc.alive) {
            let style = Style::new().fg(npc.color);
            for (i, &pos) in npc.body.iter().enumerate() {
                let symbol = if i == 0 {
                    consts::NPC_HEAD_SYMBOL
                } else {
                    consts::SNAKE_BODY_SYMBOL
                };
                level.draw_cell(pos, symbol, style);
            }
        }
        if let Some(food) = self.food {
            level.draw_cell(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        let player_style = consts::SNAKE_STYLE.fg(self.player_color);
        for &pos in self.player.iter().skip(1) {
            level.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, player_style);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if let Some(&head) = self.player.first() {
            if self.phase == Phase::Over {
                level.draw_cell(head, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
            } else {
                level.draw_cell(head, self.head_symbol(), player_style);
            }
        }

        match self.phase {
            Phase::NotStarted => {
                Line::from_iter([
                    Span::raw(" Start: arrow keys or ("),
                    Span::styled("Enter", consts::KEY_STYLE),
                    Span::raw(") — Pause ("),
                    Span::styled("p", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg_area, buf);
            }
            Phase::Running => (),
            Phase::Paused => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: PausedPopup::WIDTH,
                        height: PausedPopup::HEIGHT,
                    },
                );
                PausedPopup.render(pause_area, buf);
            }
            Phase::Over => {
                Line::from_iter([
                    Span::raw(format!(" GAME OVER — Final score: {} — Restart (", self.score)),
                    Span::styled("Enter", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg_area, buf);
            }
        }
    }
}

/// Draws grid cells into the part of a buffer occupied by the playing field
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        if pos.x >= self.area.width || pos.y >= self.area.height {
            return;
        }
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

/// Pop-up shown over the board while the game is paused
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PausedPopup;

impl PausedPopup {
    const HEIGHT: u16 = 4;
    const WIDTH: u16 = 16;
}

impl Widget for PausedPopup {
    /*
     * ┌─── PAUSED ───┐
     * │ Resume (p)   │
     * │ Quit (q)     │
     * └──────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        let lines = [
            Line::from_iter([
                Span::raw("Resume ("),
                Span::styled("p", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
            Line::from_iter([
                Span::raw("Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ]),
        ];
        for (line, row) in lines.into_iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}
