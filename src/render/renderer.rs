use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{
    Difficulty, FlowSnapshot, GameMode, Outcome, Phase, PlayerId, Position, RoundResult,
    RoundState,
};
use crate::metrics::format_time;

const HEAD_COLORS: [Color; 2] = [Color::LightRed, Color::LightBlue];
const BODY_COLORS: [Color; 2] = [Color::Red, Color::Blue];

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &FlowSnapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Center the game area horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match (snapshot.phase, snapshot.round) {
            (Phase::Menu { selection }, _) => {
                let title = self.render_title();
                frame.render_widget(title, chunks[0]);
                let menu = self.render_mode_menu(*selection);
                frame.render_widget(menu, game_area);
            }
            (Phase::DifficultySelect { selection }, _) => {
                let title = self.render_title();
                frame.render_widget(title, chunks[0]);
                let menu = self.render_difficulty_menu(snapshot.mode, *selection);
                frame.render_widget(menu, game_area);
            }
            (Phase::GameOver(result), _) => {
                let stats = self.render_stats(snapshot);
                frame.render_widget(stats, chunks[0]);
                let game_over = self.render_game_over(snapshot.mode, result);
                frame.render_widget(game_over, game_area);
            }
            (Phase::Playing | Phase::Paused, Some(round)) => {
                let stats = self.render_stats(snapshot);
                frame.render_widget(stats, chunks[0]);
                let paused = matches!(snapshot.phase, Phase::Paused);
                let grid = self.render_grid(round, paused);
                frame.render_widget(grid, game_area);
            }
            (Phase::Playing | Phase::Paused, None) => {}
        }

        // Render footer with records and controls
        let controls = self.render_controls(snapshot);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_title(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![Span::styled(
            "SNAKE GAME",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_mode_menu(&self, selection: GameMode) -> Paragraph<'_> {
        let entries = GameMode::ALL
            .iter()
            .map(|mode| (mode.as_str(), *mode == selection))
            .collect::<Vec<_>>();
        self.render_menu(" Select Mode ", &entries)
    }

    fn render_difficulty_menu(&self, mode: GameMode, selection: Difficulty) -> Paragraph<'_> {
        let entries = Difficulty::ALL
            .iter()
            .map(|difficulty| (difficulty.as_str(), *difficulty == selection))
            .collect::<Vec<_>>();
        let title = match mode {
            GameMode::Solo => " Select Difficulty (Solo) ",
            GameMode::Duo => " Select Difficulty (Duo) ",
        };
        self.render_menu(title, &entries)
    }

    fn render_menu(&self, title: &'static str, entries: &[(&'static str, bool)]) -> Paragraph<'_> {
        let mut lines = vec![Line::from("")];
        for (index, (label, selected)) in entries.iter().enumerate() {
            let text = format!("{}. {}", index + 1, label);
            let line = if *selected {
                Line::from(vec![
                    Span::styled("> ", Style::default().fg(Color::Yellow)),
                    Span::styled(
                        text,
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" <", Style::default().fg(Color::Yellow)),
                ])
            } else {
                Line::from(Span::styled(text, Style::default().fg(Color::White)))
            };
            lines.push(line);
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            "Use UP/DOWN and ENTER",
            Style::default().fg(Color::Gray),
        )));

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::Green))
                .title(title),
        )
    }

    fn render_grid(&self, round: &RoundState, paused: bool) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..round.grid.rows {
            let mut spans = Vec::new();

            for x in 0..round.grid.cols {
                let pos = Position::new(x as i32, y as i32);
                spans.push(self.render_cell(round, pos));
            }

            lines.push(Line::from(spans));
        }

        let title = if paused { " PAUSED " } else { " Snake " };
        let border = if paused { Color::LightYellow } else { Color::White };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_cell(&self, round: &RoundState, pos: Position) -> Span<'static> {
        for (index, snake) in round.snakes.iter().enumerate() {
            if !snake.alive {
                continue;
            }
            if pos == snake.head() {
                // Snake head - distinct color
                return Span::styled(
                    "■ ",
                    Style::default()
                        .fg(HEAD_COLORS[index % 2])
                        .add_modifier(Modifier::BOLD),
                );
            }
            if snake.collides_with_body(pos) {
                return Span::styled("□ ", Style::default().fg(BODY_COLORS[index % 2]));
            }
        }

        if pos == round.food.position {
            let color = if round.food.is_bonus {
                Color::Yellow
            } else {
                Color::Red
            };
            return Span::styled("O ", Style::default().fg(color).add_modifier(Modifier::BOLD));
        }

        if round.is_obstacle(pos) {
            return Span::styled("█ ", Style::default().fg(Color::Gray));
        }

        // Empty cell
        Span::styled(". ", Style::default().fg(Color::DarkGray))
    }

    fn render_stats(&self, snapshot: &FlowSnapshot) -> Paragraph<'_> {
        let mut spans = Vec::new();
        if let Some(round) = snapshot.round {
            for player in round.players() {
                spans.push(Span::styled(
                    format!("Score {}: ", player.label()),
                    Style::default().fg(Color::Yellow),
                ));
                spans.push(Span::styled(
                    round.score(player).to_string(),
                    Style::default()
                        .fg(HEAD_COLORS[player.index()])
                        .add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw("    "));
            }
        }
        spans.push(Span::styled("Time: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::styled(
            format_time(snapshot.elapsed),
            Style::default().fg(Color::White),
        ));
        spans.push(Span::raw("    "));
        spans.push(Span::styled(
            snapshot.difficulty.as_str(),
            Style::default().fg(Color::Gray),
        ));

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_over(&self, mode: GameMode, result: &RoundResult) -> Paragraph<'_> {
        let headline = match result.outcome {
            Outcome::Solo => Span::styled(
                format!("Your score: {}", result.best_score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Outcome::Winner(player) => Span::styled(
                match player {
                    PlayerId::One => "Player 1 Wins!",
                    PlayerId::Two => "Player 2 Wins!",
                },
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Outcome::Tie => Span::styled(
                "It's a tie!",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(headline),
        ];

        if mode == GameMode::Duo {
            let scores = result
                .scores
                .iter()
                .enumerate()
                .map(|(index, score)| format!("P{}: {}", index + 1, score))
                .collect::<Vec<_>>()
                .join("  ");
            text.push(Line::from(vec![
                Span::styled("Scores ", Style::default().fg(Color::Yellow)),
                Span::styled(scores, Style::default().fg(Color::White)),
            ]));
        }

        text.push(Line::from(vec![
            Span::styled("Survived ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format_time(result.survival_time),
                Style::default().fg(Color::White),
            ),
        ]));

        if result.new_best_score {
            text.push(Line::from(Span::styled(
                "New best score!",
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        if result.new_best_time {
            text.push(Line::from(Span::styled(
                "New best time!",
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "R",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to restart, ", Style::default().fg(Color::Gray)),
            Span::styled(
                "M",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" for menu or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn records_spans(&self, snapshot: &FlowSnapshot) -> Vec<Span<'static>> {
        vec![
            Span::styled(
                format!("Highscore: {}", snapshot.best_score),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!("Record: {}", format_time(snapshot.best_time)),
                Style::default().fg(Color::Yellow),
            ),
        ]
    }

    fn render_controls(&self, snapshot: &FlowSnapshot) -> Paragraph<'_> {
        let mut spans = self.records_spans(snapshot);
        spans.insert(1, Span::raw("  "));
        spans.push(Span::raw(" | "));

        match snapshot.phase {
            Phase::Playing | Phase::Paused => {
                spans.push(Span::styled("↑↓←→", Style::default().fg(Color::Cyan)));
                if snapshot.mode == GameMode::Duo {
                    spans.push(Span::raw(" P1, "));
                    spans.push(Span::styled("WASD", Style::default().fg(Color::Cyan)));
                    spans.push(Span::raw(" P2 | "));
                } else {
                    spans.push(Span::raw(" to move | "));
                }
                spans.push(Span::styled("P", Style::default().fg(Color::Cyan)));
                spans.push(Span::raw(" pause | "));
            }
            _ => {}
        }
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" to quit"));

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
