use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::app::App;
use crate::domain::palette::PaletteRow;

const ACCENT: Color = Color::Rgb(0x61, 0x66, 0xDC);
const MUTED: Color = Color::Rgb(0xDA, 0xDA, 0xDA);

pub fn render(frame: &mut ratatui::Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let mode = if app.palette_open() { "Palette" } else { "Idle" };
    let header = Paragraph::new(format!(
        "cmdpal | {mode} | Ctrl+P palette | Up/Down move | Enter run | Alt+1..9 pick | Esc close"
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .block(Block::default().borders(Borders::ALL).title("Session"));
    frame.render_widget(header, chunks[0]);

    let input = if app.palette_open() {
        Paragraph::new(Text::from(app.palette_input().to_string()))
    } else {
        Paragraph::new(Text::from("Press Ctrl+P to type your command"))
            .style(Style::default().fg(Color::DarkGray))
    };
    let input = input.block(Block::default().borders(Borders::ALL).title("Command"));
    frame.render_widget(input, chunks[1]);

    let rows = app.palette_rows();
    let layout = app.palette().layout();
    let skipped = layout.rows_scrolled(app.palette_offset());
    let items: Vec<ListItem<'_>> = rows.iter().skip(skipped).map(row_item).collect();

    let title = format!("Results ({})", rows.len());
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, chunks[2]);

    let status = Paragraph::new(app.status_message.clone())
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[3]);
}

fn row_item(row: &PaletteRow) -> ListItem<'static> {
    let (icon_style, keyword_style, remainder_style) = if row.highlighted {
        (
            Style::default().fg(ACCENT),
            Style::default().fg(Color::White),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Style::default().fg(MUTED),
            Style::default().fg(MUTED),
            Style::default().fg(MUTED).add_modifier(Modifier::BOLD),
        )
    };

    let mut spans = vec![
        Span::styled(format!("{} ", row.kind.icon()), icon_style),
        Span::styled(row.keyword.clone(), keyword_style),
        Span::styled(row.remainder.clone(), remainder_style),
        Span::raw("  "),
    ];
    for key in &row.keys {
        spans.push(Span::styled(
            format!(" {key} "),
            Style::default().fg(Color::Black).bg(Color::White),
        ));
        spans.push(Span::raw(" "));
    }

    let mut item = ListItem::new(Line::from(spans));
    if row.highlighted {
        item = item.style(Style::default().bg(Color::Rgb(0x11, 0x12, 0x16)));
    }
    item
}
