//! Terminal rendering for the keypad, status bar, and calibration panel

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use touchtone::geometry::Rect as GeoRect;

use crate::data::CalField;
use crate::App;

pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    let outer = Block::default()
        .title(format!(" Touchtone v{} ", env!("CARGO_PKG_VERSION")))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let chunks = Layout::vertical([
        Constraint::Min(8),    // keypad
        Constraint::Length(1), // status
        Constraint::Length(1), // help bar
    ])
    .split(inner);

    // Geometry follows the area the keypad actually gets this frame
    app.keypad_area = chunks[0];
    app.sync_geometry();

    draw_keypad(f, app, chunks[0]);
    draw_status(f, app, chunks[1]);
    draw_help(f, app, chunks[2]);

    if app.calibrating {
        draw_calibration(f, app, chunks[0]);
    }
}

/// Convert a container-relative geometry rect to terminal cells
fn to_cells(r: &GeoRect, origin: (u16, u16), bounds: Rect) -> Option<Rect> {
    let snapped = r.rounded();
    if snapped.width < 1.0 || snapped.height < 1.0 {
        return None;
    }
    let x = origin.0.saturating_add(snapped.left.max(0.0) as u16);
    let y = origin.1.saturating_add(snapped.top.max(0.0) as u16);
    let rect = Rect::new(x, y, snapped.width as u16, snapped.height as u16);
    Some(rect.intersection(bounds))
}

fn draw_keypad(f: &mut Frame, app: &App, area: Rect) {
    let map = match &app.hit_map {
        Some(m) => m,
        None => {
            let msg = Paragraph::new("Measuring layout...")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            f.render_widget(msg, area);
            return;
        }
    };

    for (key, rect) in map.rects() {
        let cell = match to_cells(rect, app.keypad_origin, area) {
            Some(c) if c.width >= 3 && c.height >= 2 => c,
            _ => continue, // terminal too small for this key
        };

        let pressed = app.pressed == Some(*key);
        let style = if pressed {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if pressed {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            });
        let label = Paragraph::new(key.label().to_string())
            .style(style.bold())
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(label, cell);
    }
}

fn draw_status(f: &mut Frame, app: &App, area: Rect) {
    let snap = app.snapshot();
    let style = if snap.is_error {
        Style::default().fg(Color::Red)
    } else if snap.playing.is_some() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let line = Line::from(vec![
        Span::styled(format!(" {} ", snap.status_text), style.bold()),
        Span::styled(
            format!("· {}/12 keys mapped", snap.mapped_keys),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_help(f: &mut Frame, app: &App, area: Rect) {
    let help = if app.calibrating {
        " up/down select · left/right adjust · c close panel · q quit"
    } else {
        " click or type 0-9 * # · s stop · c calibrate · q quit"
    };
    let bar = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_calibration(f: &mut Frame, app: &App, area: Rect) {
    let width = 26.min(area.width);
    let height = (CalField::ALL.len() as u16 + 2).min(area.height);
    let panel = Rect::new(
        area.right().saturating_sub(width),
        area.y,
        width,
        height,
    );

    f.render_widget(Clear, panel);
    let block = Block::default()
        .title(" Calibration ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan));

    let lines: Vec<Line> = CalField::ALL
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let marker = if i == app.selected { ">" } else { " " };
            let style = if i == app.selected {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(
                format!("{} {:<8} {:+.3}", marker, field.label(), field.get(&app.calibration)),
                style,
            ))
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), panel);
}
