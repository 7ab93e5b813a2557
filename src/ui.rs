pub mod layout;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::{App, Phase},
    effects::HitBurst,
    scheduler::Millis,
    target::TargetInstance,
};

const HELP: &str = "(s)tart  (r)eset  (1/2/3/d) difficulty  (q)uit  ·  click the critters!";

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        let screen = layout::split(area);

        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let status = match self.phase() {
            Phase::Hunting => Span::styled("Hunting...", bold_style.fg(Color::Yellow)),
            Phase::Ready | Phase::GameOver => Span::styled("Ready", dim_style),
        };

        let time_style = if session.is_running() && session.time_remaining() <= 5 {
            bold_style.fg(Color::Red)
        } else {
            bold_style
        };

        Paragraph::new(Line::from(vec![
            Span::raw("Score: "),
            Span::styled(session.score().to_string(), bold_style.fg(Color::Green)),
            Span::raw("   Time: "),
            Span::styled(format!("{}s", session.time_remaining()), time_style),
            Span::raw("   Difficulty: "),
            Span::styled(session.difficulty().to_string(), bold_style.fg(Color::Cyan)),
            Span::raw("   "),
            status,
        ]))
        .alignment(Alignment::Center)
        .render(screen.hud, buf);

        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Forest ")
            .render(screen.field, buf);

        if let Some(target) = session.active_target() {
            render_target(target, screen.play, buf);
        }

        for burst in self.effects.bursts() {
            render_burst(burst, self.now, screen.play, buf);
        }

        match self.phase() {
            Phase::Ready => {
                let hint = Paragraph::new(Span::styled(
                    "Press (s) to start the hunt",
                    italic_style.fg(Color::Yellow),
                ))
                .alignment(Alignment::Center);
                hint.render(centered(screen.play, 40, 1), buf);
            }
            Phase::GameOver => {
                if let Some(round) = session.last_round() {
                    let panel = centered(screen.play, 34, 5);
                    Clear.render(panel, buf);
                    Paragraph::new(vec![
                        Line::from(Span::styled("Hunt over!", bold_style.fg(Color::Yellow))),
                        Line::from(format!(
                            "Final score: {} ({})",
                            round.score, round.difficulty
                        )),
                        Line::from(Span::styled("(s)tart again / (r)eset", italic_style)),
                    ])
                    .alignment(Alignment::Center)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_type(BorderType::Double),
                    )
                    .render(panel, buf);
                }
            }
            Phase::Hunting => {}
        }

        Paragraph::new(Span::styled(HELP, italic_style))
            .alignment(Alignment::Center)
            .render(screen.help, buf);
    }
}

fn render_target(target: &TargetInstance, play: Rect, buf: &mut Buffer) {
    let Some(rect) = layout::target_rect(play, target) else {
        return;
    };

    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::LightRed))
        .render(rect, buf);

    let glyph = target.kind.glyph();
    let center = layout::point_to_cell(play, target.center());
    if let Some((x, y)) = center {
        let x = x.saturating_sub(glyph.width() as u16 / 2);
        if rect.contains((x, y).into()) {
            buf.set_string(x, y, glyph, Style::default());
        }
    }
}

fn render_burst(burst: &HitBurst, now: Millis, play: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Red,
        Color::LightYellow,
    ];

    for (p, spark) in burst.spark_positions(now) {
        if let Some((x, y)) = layout::point_to_cell(play, p) {
            let color = colors[spark.color_index % colors.len()];
            buf.set_string(x, y, spark.symbol.to_string(), Style::default().fg(color));
        }
    }

    if let Some((x, y)) = layout::point_to_cell(play, burst.origin) {
        let label_x = x.saturating_sub(burst.label.width() as u16 / 2).max(play.x);
        buf.set_string(
            label_x,
            y,
            &burst.label,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
