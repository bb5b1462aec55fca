use super::app::{App, Field};
use crate::tip::TipPercentage;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Form
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    draw_title(f, chunks[0]);
    draw_form(f, app, chunks[1]);
    draw_status_bar(f, app, chunks[2]);
}

fn draw_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " Tip Time ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Enter the cost, pick a tip and press Calculate", Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(title, area);
}

/// Styles for a focused or unfocused row: label, value, border.
fn field_styles(is_selected: bool) -> (Style, Style, Color) {
    if is_selected {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            Color::Yellow,
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::Gray),
            Color::DarkGray,
        )
    }
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Cost
            Constraint::Length(3), // Percentage
            Constraint::Length(3), // Round up
            Constraint::Length(3), // Calculate
            Constraint::Length(3), // Result
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let current_field = app.form.selected_field.position() + 1;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" Tip Calculator (Field {}/4) ", current_field));
    f.render_widget(block, area);

    draw_cost(f, app, chunks[0]);
    draw_percentage(f, app, chunks[1]);
    draw_round_up(f, app, chunks[2]);
    draw_calculate(f, app, chunks[3]);
    draw_result(f, app, chunks[4]);
}

fn field_row<'a>(field: Field, is_selected: bool, value: Vec<Span<'a>>) -> Paragraph<'a> {
    let (label_style, _, border_color) = field_styles(is_selected);
    let indicator = if is_selected { "▶ " } else { "  " };

    let mut spans = vec![
        Span::styled(indicator, label_style),
        Span::styled(format!("{}: ", field.title()), label_style),
    ];
    spans.extend(value);

    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(border_color)),
    )
}

fn draw_cost(f: &mut Frame, app: &App, area: Rect) {
    let is_selected = app.form.selected_field == Field::Cost;
    let (_, input_style, _) = field_styles(is_selected);

    let cursor = if app.form.keyboard_visible() { "█" } else { "" };
    let display_value = if app.form.cost.is_empty() && !is_selected {
        "(amount, e.g. 50.00)".to_string()
    } else {
        format!("{}{}", app.form.cost, cursor)
    };

    let row = field_row(Field::Cost, is_selected, vec![Span::styled(display_value, input_style)]);
    f.render_widget(row, area);
}

fn draw_percentage(f: &mut Frame, app: &App, area: Rect) {
    let is_selected = app.form.selected_field == Field::Percentage;
    let (_, input_style, _) = field_styles(is_selected);

    let mut options = Vec::new();
    for option in TipPercentage::ALL {
        let checked = option == app.form.percentage;
        let marker = if checked { "(•) " } else { "( ) " };
        let style = if checked {
            input_style.fg(Color::Green)
        } else {
            input_style
        };
        options.push(Span::styled(format!("{}{}", marker, service_label(option)), style));
        options.push(Span::raw("   "));
    }

    let row = field_row(Field::Percentage, is_selected, options);
    f.render_widget(row, area);
}

fn service_label(percentage: TipPercentage) -> String {
    let quality = match percentage {
        TipPercentage::Fifteen => "Okay",
        TipPercentage::Eighteen => "Good",
        TipPercentage::Twenty => "Amazing",
    };
    format!("{} ({})", quality, percentage)
}

fn draw_round_up(f: &mut Frame, app: &App, area: Rect) {
    let is_selected = app.form.selected_field == Field::RoundUp;
    let switch = if app.form.round_up {
        Span::styled("[■ ON ]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::styled("[ OFF□]", Style::default().fg(Color::Gray))
    };

    let row = field_row(Field::RoundUp, is_selected, vec![switch]);
    f.render_widget(row, area);
}

fn draw_calculate(f: &mut Frame, app: &App, area: Rect) {
    let is_selected = app.form.selected_field == Field::Calculate;
    let style = if is_selected {
        Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };

    let button = Paragraph::new(Line::from(Span::styled(
        format!("  {}  ", Field::Calculate.title().to_uppercase()),
        style,
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(style));
    f.render_widget(button, area);
}

fn draw_result(f: &mut Frame, app: &App, area: Rect) {
    let line = match app.tip_result {
        Some(ref result) => Line::from(vec![
            Span::styled("✓ ", Style::default().fg(Color::Green)),
            Span::styled(
                result.as_str(),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(Span::styled("Tip Amount", Style::default().fg(Color::DarkGray))),
    };

    let result = Paragraph::new(line).alignment(Alignment::Right);
    f.render_widget(result, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.form.selected_field {
        Field::Cost => " 0-9 .:Type  Enter:Hide Keyboard  ↑/↓:Fields  Esc:Clear  q:Quit ",
        Field::Percentage => " ←/→:Choose  ↑/↓:Fields  Esc:Clear  q:Quit ",
        Field::RoundUp => " Space/Enter:Toggle  ↑/↓:Fields  Esc:Clear  q:Quit ",
        Field::Calculate => " Enter:Calculate  ↑/↓:Fields  Esc:Clear  q:Quit ",
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    // Left: context-sensitive help
    let help = Paragraph::new(Line::from(Span::styled(help_text, Style::default().fg(Color::Cyan))))
        .block(Block::default().borders(Borders::ALL).title(" Keys "));

    // Right: global info
    let info = format!(" Locale: {} ", app.locale);
    let info_widget = Paragraph::new(Line::from(Span::styled(info, Style::default().fg(Color::DarkGray))))
        .block(Block::default().borders(Borders::ALL).title(" Info "));

    f.render_widget(help, chunks[0]);
    f.render_widget(info_widget, chunks[1]);
}
