use crate::app::{
    split_screen, App, AppScreen, GameLayout, GameSession, MIN_GAME_HEIGHT, MIN_GAME_WIDTH,
};
use courtside_core::{theme::parse_hex_color, DebugReadout, GameSnapshot, Side, Viewport};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, List, ListItem, Paragraph, Widget, Wrap},
};

/// Theme colour, or `fallback` when the palette entry is not `#RRGGBB`
pub fn palette_color(hex: &str, fallback: Color) -> Color {
    parse_hex_color(hex)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(fallback)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title_area, content) = split_screen(area);

        let title = Paragraph::new("Courtside")
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("You vs Computer")
                    .title_alignment(Alignment::Center),
            );
        title.render(title_area, buf);

        match self.screen {
            AppScreen::Start => render_menu(
                &self.get_start_menu_items(),
                self.menu_state.start_selected,
                "Main Menu",
                content,
                buf,
            ),
            AppScreen::Themes => render_menu(
                &self.get_theme_menu_items(),
                self.menu_state.theme_selected,
                "Pick a Theme",
                content,
                buf,
            ),
            AppScreen::Game => self.render_game_screen(content, buf),
        }
    }
}

fn render_menu(items: &[&str], selected: usize, title: &str, area: Rect, buf: &mut Buffer) {
    let items: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == selected {
                Style::default().fg(Color::Yellow).bg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(*item).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .title(title)
                .title_alignment(Alignment::Center),
        )
        .highlight_symbol("► ");

    list.render(area, buf);
}

impl App {
    fn render_game_screen(&self, area: Rect, buf: &mut Buffer) {
        if self.ui_paused {
            let message = format!(
                "Terminal too small!\n\nMinimum required: {}×{}\nCurrent size: {}×{}\n\nPlease resize your terminal to continue playing.",
                MIN_GAME_WIDTH, MIN_GAME_HEIGHT, self.terminal_size.0, self.terminal_size.1
            );

            let resize_widget = Paragraph::new(message)
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center)
                .block(
                    Block::bordered()
                        .border_type(BorderType::Rounded)
                        .title("⚠ Resize Required ⚠")
                        .title_alignment(Alignment::Center),
                );
            resize_widget.render(area, buf);
            return;
        }

        let (Some(session), Some(layout)) = (self.session.as_ref(), self.current_layout()) else {
            let content = Paragraph::new("No game running\n\nPress 'ESC' to return to menu")
                .style(Style::default().fg(Color::White))
                .alignment(Alignment::Center)
                .block(
                    Block::bordered()
                        .border_type(BorderType::Rounded)
                        .title("Game")
                        .title_alignment(Alignment::Center),
                );
            content.render(area, buf);
            return;
        };

        let snapshot = session
            .renderer()
            .latest()
            .copied()
            .unwrap_or_else(|| session.snapshot());

        self.render_hud(layout.hud, buf, session, &snapshot);
        self.render_field(&layout, buf, &snapshot);
        if let Some(winner) = snapshot.winner() {
            self.render_match_over(layout.field, buf, winner);
        }
        if self.show_debug {
            self.render_debug(layout.footer, buf, &snapshot);
        } else {
            self.render_controls(layout.footer, buf);
        }
    }

    fn render_hud(
        &self,
        area: Rect,
        buf: &mut Buffer,
        session: &GameSession,
        snapshot: &GameSnapshot,
    ) {
        let score = format!(
            "You {}  :  {} Computer    {}    Tick: {}",
            snapshot.score.player,
            snapshot.score.opponent,
            session.game().status_string(),
            snapshot.tick
        );

        let audio = session.audio();
        let music = if audio.muted() {
            "muted".to_string()
        } else if audio.music_playing() {
            format!("♪ {}", audio.music_track())
        } else {
            "♪ paused".to_string()
        };
        let recent = self
            .event_log
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" · ");
        let cues = format!(
            "{}    cue: {}    {}",
            music,
            audio.last_cue().unwrap_or("-"),
            recent
        );

        let hud = Paragraph::new(vec![Line::from(score), Line::from(cues)])
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Game Info")
                    .title_alignment(Alignment::Center),
            );
        hud.render(area, buf);
    }

    /// Draw paddles, ball and net through the shared viewport mapping.
    fn render_field(&self, layout: &GameLayout, buf: &mut Buffer, snapshot: &GameSnapshot) {
        let palette = &self.theme.palette;
        let background = palette_color(&palette.background, Color::Black);
        let base = Style::default()
            .bg(background)
            .fg(palette_color(&palette.foreground, Color::White));
        let ball_style = base.fg(palette_color(&palette.ball, Color::White));
        let net_style = base.fg(palette_color(&palette.net, Color::DarkGray));
        let player_style = base.fg(palette_color(&palette.player_paddle, Color::Blue));
        let opponent_style = base.fg(palette_color(&palette.opponent_paddle, Color::Green));

        let field = layout.field;
        let viewport = Viewport::new(field.width as usize, field.height as usize, &self.config);

        let mut net = vec![false; viewport.rows()];
        for row in viewport.net_rows() {
            if let Some(slot) = net.get_mut(row) {
                *slot = true;
            }
        }
        let net_col = viewport.net_col();
        let ball = viewport.ball_cell(snapshot.ball.pos);
        let [player, opponent] = [Side::Player, Side::Opponent]
            .map(|side| viewport.paddle_rect(snapshot.paddle(side).top_y, side));

        let mut lines = Vec::with_capacity(viewport.rows());
        for row in 0..viewport.rows() {
            let spans: Vec<Span> = (0..viewport.cols())
                .map(|col| {
                    let (symbol, style) = if ball == Some((col, row)) {
                        ("●", ball_style)
                    } else if player.is_some_and(|rect| rect.contains(col, row)) {
                        ("█", player_style)
                    } else if opponent.is_some_and(|rect| rect.contains(col, row)) {
                        ("█", opponent_style)
                    } else if col == net_col && net[row] {
                        ("┃", net_style)
                    } else {
                        (" ", base)
                    };
                    Span::styled(symbol, style)
                })
                .collect();
            lines.push(Line::from(spans));
        }

        Block::bordered()
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", self.theme.name))
            .title_alignment(Alignment::Center)
            .style(base)
            .render(layout.field_block, buf);
        Paragraph::new(lines).style(base).render(field, buf);
    }

    /// End-of-match card drawn over the field
    fn render_match_over(&self, field: Rect, buf: &mut Buffer, winner: Side) {
        let width = field.width.min(44);
        let height = field.height.min(8);
        let popup = Rect {
            x: field.x + (field.width - width) / 2,
            y: field.y + (field.height - height) / 2,
            width,
            height,
        };

        let text = vec![
            Line::from(Span::styled(
                self.theme.headline(winner),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(self.theme.message(winner)),
            Line::from(""),
            Line::from(format!("[ {} ]  click or SPACE", self.theme.messages.play_again)),
        ];

        Clear.render(popup, buf);
        Paragraph::new(text)
            .style(Style::default().fg(palette_color(
                &self.theme.palette.foreground,
                Color::White,
            )))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().border_type(BorderType::Double))
            .render(popup, buf);
    }

    fn render_debug(&self, area: Rect, buf: &mut Buffer, snapshot: &GameSnapshot) {
        let lines: Vec<Line> = DebugReadout::new(snapshot, self.pointer)
            .lines()
            .into_iter()
            .map(Line::from)
            .collect();

        Paragraph::new(lines)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Debug")
                    .title_alignment(Alignment::Center),
            )
            .render(area, buf);
    }

    fn render_controls(&self, area: Rect, buf: &mut Buffer) {
        let controls_text =
            "Mouse: paddle  Click/SPACE: play again  W/S ↑/↓: nudge  D: debug  M: mute  ESC: menu  Q: quit";
        Paragraph::new(controls_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .title("Controls")
                    .title_alignment(Alignment::Center),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_color() {
        assert_eq!(palette_color("#3B3B58", Color::Black), Color::Rgb(0x3B, 0x3B, 0x58));
        assert_eq!(palette_color("teal", Color::Cyan), Color::Cyan);
    }
}
