//! Application State and Logic
//!
//! This module defines the state of the single tip screen and the key handling
//! that drives it. It manages:
//!
//! - The form: cost text, tip percentage, round-up switch and focus
//! - Keyboard dismissal when Enter is pressed in the cost field
//! - Running the calculation when the Calculate button is pressed
//!
//! The `App` struct is the central state container, and `run_app` is the
//! main event loop that polls the terminal and redraws after every key.

use crate::currency::{CurrencyFormat, Locale};
use crate::tip::{TipCalculator, TipPercentage};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use std::time::Duration;

pub type AppResult<T> = Result<T>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Cost,
    Percentage,
    RoundUp,
    Calculate,
}

impl Field {
    pub fn all() -> Vec<Field> {
        vec![Field::Cost, Field::Percentage, Field::RoundUp, Field::Calculate]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Field::Cost => "Cost of Service",
            Field::Percentage => "How was the service?",
            Field::RoundUp => "Round up tip?",
            Field::Calculate => "Calculate",
        }
    }

    pub fn position(&self) -> usize {
        Field::all().iter().position(|f| f == self).unwrap_or(0)
    }
}

/// Display text for a formatted tip.
pub fn tip_amount_text(formatted: &str) -> String {
    format!("Tip Amount: {}", formatted)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TipForm {
    pub cost: String,
    pub percentage: TipPercentage,
    pub round_up: bool,
    pub selected_field: Field,
}

impl TipForm {
    pub fn new(percentage: TipPercentage, round_up: bool) -> Self {
        Self {
            percentage,
            round_up,
            ..Default::default()
        }
    }

    /// The on-screen keyboard is up while the cost field has focus.
    pub fn keyboard_visible(&self) -> bool {
        self.selected_field == Field::Cost
    }
}

pub struct App {
    pub calculator: TipCalculator<CurrencyFormat>,
    pub locale: Locale,
    pub form: TipForm,
    /// What Esc restores.
    pub initial_form: TipForm,
    pub tip_result: Option<String>,
    pub running: bool,
}

impl App {
    pub fn new(calculator: TipCalculator<CurrencyFormat>, locale: Locale, form: TipForm) -> Self {
        Self {
            calculator,
            locale,
            initial_form: form.clone(),
            form,
            tip_result: None,
            running: true,
        }
    }

    /// The Calculate button.
    pub fn calculate(&mut self) {
        let formatted =
            self.calculator
                .calculate(&self.form.cost, self.form.percentage, self.form.round_up);
        tracing::info!(
            cost = %self.form.cost,
            percentage = %self.form.percentage,
            round_up = self.form.round_up,
            tip = %formatted,
            "Calculated tip"
        );
        self.tip_result = Some(tip_amount_text(&formatted));
    }

    pub fn select_next(&mut self) {
        let fields = Field::all();
        let idx = self.form.selected_field.position();
        self.form.selected_field = fields[(idx + 1) % fields.len()];
    }

    pub fn select_prev(&mut self) {
        let fields = Field::all();
        let idx = self.form.selected_field.position();
        self.form.selected_field = fields[(idx + fields.len() - 1) % fields.len()];
    }

    /// Leaves the cost field, the terminal's stand-in for hiding the keyboard.
    pub fn dismiss_keyboard(&mut self) {
        if self.form.keyboard_visible() {
            tracing::debug!("Keyboard dismissed");
            self.select_next();
        }
    }

    pub fn handle_char(&mut self, c: char) {
        // Numeric decimal keyboard: digits and a decimal point only
        if self.form.selected_field == Field::Cost && (c.is_ascii_digit() || c == '.') {
            self.form.cost.push(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if self.form.selected_field == Field::Cost {
            self.form.cost.pop();
        }
    }

    pub fn toggle_round_up(&mut self) {
        self.form.round_up = !self.form.round_up;
    }

    pub fn clear_form(&mut self) {
        self.form = self.initial_form.clone();
        self.tip_result = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }

        let field = self.form.selected_field;
        match key.code {
            KeyCode::Char('q') => {
                self.running = false;
            }
            KeyCode::Esc => {
                self.clear_form();
            }
            KeyCode::Tab | KeyCode::Down => {
                self.select_next();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.select_prev();
            }
            KeyCode::Left if field == Field::Percentage => {
                self.form.percentage = self.form.percentage.prev();
            }
            KeyCode::Right if field == Field::Percentage => {
                self.form.percentage = self.form.percentage.next();
            }
            KeyCode::Char(' ') if field != Field::Cost => match field {
                Field::Percentage => self.form.percentage = self.form.percentage.next(),
                Field::RoundUp => self.toggle_round_up(),
                Field::Calculate => self.calculate(),
                Field::Cost => {}
            },
            KeyCode::Enter => match field {
                Field::Cost => self.dismiss_keyboard(),
                Field::Percentage => self.select_next(),
                Field::RoundUp => self.toggle_round_up(),
                Field::Calculate => self.calculate(),
            },
            KeyCode::Char(c) => {
                self.handle_char(c);
            }
            KeyCode::Backspace => {
                self.handle_backspace();
            }
            _ => {}
        }
    }
}

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> AppResult<()> {
    loop {
        terminal.draw(|f| super::views::draw(f, &app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if !app.running {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_app() -> App {
        let locale = Locale::EnUs;
        App::new(
            TipCalculator::new(CurrencyFormat::for_locale(locale)),
            locale,
            TipForm::default(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn starts_on_cost_field_with_defaults() {
        let app = new_app();
        assert_eq!(app.form.selected_field, Field::Cost);
        assert_eq!(app.form.percentage, TipPercentage::Fifteen);
        assert!(!app.form.round_up);
        assert!(app.form.keyboard_visible());
        assert!(app.tip_result.is_none());
        assert!(app.running);
    }

    #[test]
    fn cost_field_accepts_only_decimal_keys() {
        let mut app = new_app();
        type_text(&mut app, "5a0-.0,0 ");
        assert_eq!(app.form.cost, "50.00");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.form.cost, "50.0");
    }

    #[test]
    fn enter_in_cost_field_dismisses_keyboard() {
        let mut app = new_app();
        type_text(&mut app, "20");
        press(&mut app, KeyCode::Enter);
        assert!(!app.form.keyboard_visible());
        assert_eq!(app.form.selected_field, Field::Percentage);
        assert!(app.tip_result.is_none());
    }

    #[test]
    fn typing_outside_cost_field_is_ignored() {
        let mut app = new_app();
        press(&mut app, KeyCode::Down);
        type_text(&mut app, "12");
        press(&mut app, KeyCode::Backspace);
        assert!(app.form.cost.is_empty());
    }

    #[test]
    fn focus_wraps_both_ways() {
        let mut app = new_app();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.form.selected_field, Field::Calculate);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.form.selected_field, Field::Cost);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.form.selected_field, Field::Calculate);
    }

    #[test]
    fn percentage_selector_cycles() {
        let mut app = new_app();
        app.form.selected_field = Field::Percentage;
        press(&mut app, KeyCode::Right);
        assert_eq!(app.form.percentage, TipPercentage::Eighteen);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.form.percentage, TipPercentage::Twenty);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.form.percentage, TipPercentage::Twenty);
    }

    #[test]
    fn arrows_leave_percentage_alone_elsewhere() {
        let mut app = new_app();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.form.percentage, TipPercentage::Fifteen);
    }

    #[test]
    fn round_up_switch_toggles() {
        let mut app = new_app();
        app.form.selected_field = Field::RoundUp;
        press(&mut app, KeyCode::Enter);
        assert!(app.form.round_up);
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.form.round_up);
    }

    #[test]
    fn calculate_button_shows_tip() {
        let mut app = new_app();
        type_text(&mut app, "51.00");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.tip_result.as_deref(), Some("Tip Amount: $10.00"));
    }

    #[test]
    fn calculate_without_cost_shows_zero() {
        let mut app = new_app();
        app.form.selected_field = Field::Calculate;
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.tip_result.as_deref(), Some("Tip Amount: $0.00"));
    }

    #[test]
    fn result_stays_until_next_press() {
        let mut app = new_app();
        type_text(&mut app, "20");
        app.form.selected_field = Field::Calculate;
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.tip_result.as_deref(), Some("Tip Amount: $3.00"));

        app.form.percentage = TipPercentage::Twenty;
        assert_eq!(app.tip_result.as_deref(), Some("Tip Amount: $3.00"));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.tip_result.as_deref(), Some("Tip Amount: $4.00"));
    }

    #[test]
    fn esc_restores_initial_form() {
        let locale = Locale::EnUs;
        let mut app = App::new(
            TipCalculator::new(CurrencyFormat::for_locale(locale)),
            locale,
            TipForm::new(TipPercentage::Eighteen, true),
        );
        type_text(&mut app, "42");
        app.form.round_up = false;
        app.calculate();
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.form, TipForm::new(TipPercentage::Eighteen, true));
        assert!(app.tip_result.is_none());
        assert!(app.running);
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        let mut app = new_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut app = new_app();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        app.handle_key(key);
        assert!(app.running);
    }
}
