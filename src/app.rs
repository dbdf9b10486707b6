mod grade;
mod ledger;
mod mode;
mod subject;

use std::{io, time::Duration};

use chrono::{DateTime, Local};
use grade::{Grade, next_option, prev_option};
use ledger::{Cgpa, Ledger};
use mode::{Column, Mode};
use ratatui::{
    DefaultTerminal, Frame,
    buffer::Buffer,
    crossterm::event::{
        self, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    layout::{Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Styled, Stylize},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};
use subject::Field;
use tracing::{info, warn};

/// Shared by the config and log file locations.
pub const DIR_NAME: &str = "GradeBook";

const ADD_LABEL: &str = "Add Subject (a)";
const COMPUTE_LABEL: &str = "Calculate CGPA (c)";

#[derive(Debug, Clone, Copy, PartialEq)]
struct Computed {
    cgpa: Cgpa,
    at: DateTime<Local>,
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Hit {
    Add,
    Compute,
    Cell(usize, Column),
}

struct Areas {
    title: Rect,
    list: Rect,
    add: Rect,
    compute: Rect,
    result: Rect,
    help: Rect,
}

#[derive(Debug, Default, Clone)]
pub struct GradeBook {
    exit: bool,
    mode: Mode,
    row: usize,
    column: Column,

    ledger: Ledger,
    result: Option<Computed>,
    // entries changed since the last calculation
    stale: bool,
}

impl GradeBook {
    pub fn new(rows: usize) -> Self {
        Self {
            ledger: Ledger::with_rows(rows),
            ..Default::default()
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        while !self.exit {
            terminal.draw(|frame| self.draw(frame))?;
            self.handle_input(terminal)?;
        }

        Ok(())
    }

    fn handle_input(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        if event::poll(Duration::MAX)? {
            match event::read()? {
                event::Event::Key(key) if key.kind == KeyEventKind::Press => self.key_event(key),
                event::Event::Mouse(mouse) => {
                    let area = terminal.get_frame().area();
                    self.mouse_event(mouse, area);
                }
                _ => (),
            }
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }

    fn key_event(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Browsing => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.exit = true,
                KeyCode::Char('a') => self.add(),
                KeyCode::Char('c') => self.compute(),
                KeyCode::Char('d') | KeyCode::Delete => self.remove(self.row),
                KeyCode::Up => self.row = self.row.saturating_sub(1),
                KeyCode::Down => {
                    if self.row + 1 < self.ledger.len() {
                        self.row += 1;
                    }
                }
                KeyCode::Left | KeyCode::BackTab => self.column = self.column.prev(),
                KeyCode::Right | KeyCode::Tab => self.column = self.column.next(),
                KeyCode::Enter | KeyCode::Char(' ') => self.activate(),
                KeyCode::Backspace if self.column == Column::Grade => {
                    self.edit(Field::Grade, String::new())
                }
                KeyCode::Char('-') if self.column == Column::Grade => self.prev_grade(),
                KeyCode::Char(ch) if self.column == Column::Grade => {
                    if let Some(grade) = Grade::from_letter(ch) {
                        self.edit(Field::Grade, grade.to_string());
                    }
                }
                _ => (),
            },
            Mode::Editing => {
                let Some(field) = self.column.field() else {
                    self.mode = Mode::Browsing;
                    return;
                };
                match key.code {
                    KeyCode::Enter | KeyCode::Esc => self.mode = Mode::Browsing,
                    KeyCode::Tab => {
                        self.mode = Mode::Browsing;
                        self.column = self.column.next();
                    }
                    KeyCode::Backspace => {
                        if let Some(subject) = self.ledger.get(self.row) {
                            let mut text = subject.get(field).to_owned();
                            text.pop();
                            self.edit(field, text);
                        }
                    }
                    KeyCode::Char(ch) => self.add_ch(field, ch),
                    _ => (),
                }
            }
        }
    }

    fn mouse_event(&mut self, mouse: MouseEvent, area: Rect) {
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return;
        };

        self.mode = Mode::Browsing;
        match self.hit(area, mouse.column, mouse.row) {
            Some(Hit::Add) => self.add(),
            Some(Hit::Compute) => self.compute(),
            Some(Hit::Cell(row, column)) => {
                self.row = row;
                self.column = column;
                self.activate();
            }
            None => (),
        }
    }

    /// Enter or click on the selected cell.
    fn activate(&mut self) {
        if self.row >= self.ledger.len() {
            return;
        }
        match self.column {
            Column::Remove => self.remove(self.row),
            Column::Grade => {
                let text = next_option(&self.ledger[self.row].grade);
                self.edit(Field::Grade, text);
            }
            column if column.is_text() => self.mode = Mode::Editing,
            _ => (),
        }
    }

    fn add_ch(&mut self, field: Field, ch: char) {
        // credits behave like a numeric input
        if field == Field::Credits && !(ch.is_ascii_digit() || ch == '.') {
            return;
        }
        if let Some(subject) = self.ledger.get(self.row) {
            let mut text = subject.get(field).to_owned();
            text.push(ch);
            self.edit(field, text);
        }
    }

    fn add(&mut self) {
        self.row = self.ledger.add();
        self.column = Column::Name;
        self.stale = true;
    }

    fn remove(&mut self, index: usize) {
        match self.ledger.remove(index) {
            Ok(_) => {
                self.row = self.row.min(self.ledger.len().saturating_sub(1));
                self.stale = true;
            }
            Err(err) => warn!(%err, "remove ignored"),
        }
    }

    fn edit(&mut self, field: Field, value: String) {
        match self.ledger.edit(self.row, field, value) {
            Ok(()) => self.stale = true,
            Err(err) => warn!(%err, "edit ignored"),
        }
    }

    fn compute(&mut self) {
        let cgpa = self.ledger.compute();
        info!(
            cgpa = %cgpa,
            points = cgpa.points,
            credits = cgpa.credits,
            subjects = self.ledger.len(),
            "calculated cgpa"
        );
        self.result = Some(Computed {
            cgpa,
            at: Local::now(),
        });
        self.stale = false;
    }

    fn prev_grade(&mut self) {
        if let Some(subject) = self.ledger.get(self.row) {
            let text = prev_option(&subject.grade);
            self.edit(Field::Grade, text);
        }
    }

    /// Rows that fit in the list, paired with the line each is drawn on.
    /// Scrolls just far enough to keep the selected row in view.
    fn visible_rows(&self, list: Rect) -> Vec<(usize, Rect)> {
        let body = list.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });
        // first line holds the column headings
        let height = body.height.saturating_sub(1) as usize;
        let first = (self.row + 1).saturating_sub(height);

        (first..self.ledger.len())
            .take(height)
            .enumerate()
            .map(|(offset, index)| {
                (
                    index,
                    Rect::new(body.x, body.y + 1 + offset as u16, body.width, 1),
                )
            })
            .collect()
    }

    fn hit(&self, area: Rect, column: u16, row: u16) -> Option<Hit> {
        let mouse_rect = Rect::new(column, row, 1, 1);
        let areas = areas(area);

        if mouse_rect.intersects(areas.add) {
            return Some(Hit::Add);
        }
        if mouse_rect.intersects(areas.compute) {
            return Some(Hit::Compute);
        }

        self.visible_rows(areas.list)
            .into_iter()
            .find_map(|(index, line)| {
                columns(line)
                    .into_iter()
                    .zip(Column::ALL)
                    .find(|(rect, _)| mouse_rect.intersects(*rect))
                    .map(|(_, column)| Hit::Cell(index, column))
            })
    }

    fn render_cell(&self, index: usize, column: Column, area: Rect, buf: &mut Buffer) {
        let subject = &self.ledger[index];
        let selected = index == self.row && column == self.column;
        let editing = selected && self.mode == Mode::Editing;

        let (text, placeholder) = match column {
            Column::Name => (subject.name.as_str(), "Subject Name"),
            Column::Grade => (subject.grade.as_str(), "Select Grade"),
            Column::Credits => (subject.credits.as_str(), "Credits"),
            Column::Remove => ("[Remove]", ""),
        };

        let mut span = if editing {
            Span::raw(format!("{text}_")).on_dark_gray()
        } else if text.is_empty() {
            Span::raw(placeholder).dark_gray()
        } else if column == Column::Grade {
            Span::raw(format!("< {text} >"))
        } else {
            Span::raw(text)
        };

        if column == Column::Remove {
            span = span.red();
        }
        if selected && !editing {
            span = span.light_red().reversed();
        }

        Paragraph::new(span).render(area, buf);
    }

    fn help(&self) -> &'static str {
        match self.mode {
            Mode::Browsing => match self.column {
                Column::Grade => {
                    "↑↓←→ move  SPACE/- cycle grade  O/E/A/B/C/D/F pick  a add  d remove  c calculate  q quit"
                }
                _ => "↑↓←→ move  ENTER edit/remove  a add  d remove  c calculate  q quit",
            },
            Mode::Editing => "type to edit  BACKSPACE delete  ENTER/ESC done  TAB next",
        }
    }
}

fn areas(area: Rect) -> Areas {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(3),    // Subjects
            Constraint::Length(3), // Buttons
            Constraint::Length(1), // Result
            Constraint::Length(1), // Help
        ])
        .split(area);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),                                  // ---
            Constraint::Length(ADD_LABEL.len() as u16 + 4),     // Add
            Constraint::Length(2),                               // ---
            Constraint::Length(COMPUTE_LABEL.len() as u16 + 4), // Calculate
            Constraint::Min(0),                                  // ---
        ])
        .split(vert[2]);

    Areas {
        title: vert[0],
        list: vert[1],
        add: buttons[1],
        compute: buttons[3],
        result: vert[3],
        help: vert[4],
    }
}

fn columns(line: Rect) -> [Rect; 4] {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .spacing(1)
        .constraints([
            Constraint::Min(12),    // Name
            Constraint::Length(12), // Grade
            Constraint::Length(9),  // Credits
            Constraint::Length(8),  // Remove
        ])
        .split(line);
    [cols[0], cols[1], cols[2], cols[3]]
}

impl Widget for &GradeBook {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let areas = areas(area);

        Paragraph::new(Span::from("CGPA Calculator").fg(Color::Blue))
            .centered()
            .block(Block::bordered().border_set(border::DOUBLE))
            .render(areas.title, buf);

        Block::bordered()
            .border_set(border::DOUBLE)
            .title("╡ Subjects ╞")
            .render(areas.list, buf);

        let body = areas.list.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });
        if body.height > 0 {
            let header = Rect { height: 1, ..body };
            for (rect, heading) in columns(header)
                .into_iter()
                .zip(["Subject", "Grade", "Credits", ""])
            {
                Paragraph::new(heading.bold()).render(rect, buf);
            }
        }

        for (index, line) in self.visible_rows(areas.list) {
            for (rect, column) in columns(line).into_iter().zip(Column::ALL) {
                self.render_cell(index, column, rect, buf);
            }
        }

        widget(ADD_LABEL, false, areas.add, buf);
        widget(COMPUTE_LABEL, self.stale, areas.compute, buf);

        if let Some(computed) = self.result {
            Paragraph::new(Line::from(vec![
                "Your CGPA is: ".bold(),
                Span::raw(computed.cgpa.to_string()).bold().green(),
                Span::raw(format!("  (calculated {})", computed.at.format("%H:%M:%S"))).dark_gray(),
            ]))
            .centered()
            .render(areas.result, buf);
        }

        Paragraph::new(self.help().dark_gray())
            .centered()
            .render(areas.help, buf);
    }
}

fn widget(text: &str, color: bool, area: Rect, buf: &mut Buffer) {
    if color {
        Paragraph::new(text)
            .set_style(Color::LightRed)
            .centered()
            .block(Block::bordered().border_set(border::THICK))
            .render(area, buf);
    } else {
        Paragraph::new(text)
            .centered()
            .block(Block::bordered().border_set(border::THICK))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, crossterm::event::KeyModifiers};

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    fn press(app: &mut GradeBook, code: KeyCode) {
        app.key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut GradeBook, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn click(app: &mut GradeBook, rect: Rect) {
        app.mouse_event(
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: rect.x + rect.width / 2,
                row: rect.y + rect.height / 2,
                modifiers: KeyModifiers::NONE,
            },
            SCREEN,
        );
    }

    fn screen(app: &GradeBook) -> String {
        let mut terminal = Terminal::new(TestBackend::new(SCREEN.width, SCREEN.height)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(app, frame.area()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|line| line.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Fills the selected row through the keyboard, leaving the cursor on Name.
    fn fill_row(app: &mut GradeBook, name: &str, grade: char, credits: &str) {
        app.column = Column::Name;
        press(app, KeyCode::Enter);
        type_text(app, name);
        press(app, KeyCode::Tab);
        press(app, KeyCode::Char(grade));
        press(app, KeyCode::Right);
        press(app, KeyCode::Enter);
        type_text(app, credits);
        press(app, KeyCode::Enter);
        app.column = Column::Name;
    }

    #[test]
    fn test_starts_with_one_empty_row() {
        let app = GradeBook::new(1);
        assert_eq!(app.ledger.len(), 1);
        assert_eq!(app.ledger[0], subject::Subject::default());
        assert!(app.result.is_none());
    }

    #[test]
    fn test_keyboard_entry_and_compute() {
        let mut app = GradeBook::new(1);
        fill_row(&mut app, "Maths", 'O', "4");
        press(&mut app, KeyCode::Char('a'));
        fill_row(&mut app, "Physics", 'A', "3");

        assert_eq!(app.ledger[0].name, "Maths");
        assert_eq!(app.ledger[0].grade, "O");
        assert_eq!(app.ledger[1].credits, "3");

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.result.unwrap().cgpa.to_string(), "9.14");
        assert!(!app.stale);
    }

    #[test]
    fn test_result_waits_for_compute() {
        let mut app = GradeBook::new(1);
        fill_row(&mut app, "Maths", 'O', "4");
        press(&mut app, KeyCode::Char('c'));
        let before = app.result.unwrap().cgpa;

        app.column = Column::Grade;
        press(&mut app, KeyCode::Char('F'));
        assert_eq!(app.result.unwrap().cgpa, before);
        assert!(app.stale);

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.result.unwrap().cgpa.to_string(), "4.00");
    }

    #[test]
    fn test_credits_accept_numbers_only() {
        let mut app = GradeBook::new(1);
        app.column = Column::Credits;
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "3x.5-");
        assert_eq!(app.ledger[0].credits, "3.5");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.ledger[0].credits, "3.");
    }

    #[test]
    fn test_commands_are_text_while_editing() {
        let mut app = GradeBook::new(1);
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "acdq");
        assert_eq!(app.ledger.len(), 1);
        assert_eq!(app.ledger[0].name, "acdq");
        assert!(!app.exit);
        assert!(app.result.is_none());
    }

    #[test]
    fn test_grade_selector() {
        let mut app = GradeBook::new(1);
        app.column = Column::Grade;
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.ledger[0].grade, "O");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.ledger[0].grade, "E");
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.ledger[0].grade, "E");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.ledger[0].grade, "");
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.ledger[0].grade, "F");
        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.ledger[0].grade, "D");
    }

    #[test]
    fn test_arrows_leave_grade_column_untouched() {
        let mut app = GradeBook::new(1);
        app.column = Column::Grade;
        press(&mut app, KeyCode::Char('B'));

        press(&mut app, KeyCode::Right);
        assert_eq!(app.column, Column::Credits);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.column, Column::Grade);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.column, Column::Name);
        assert_eq!(app.ledger[0].grade, "B");
    }

    #[test]
    fn test_remove_selected_row() {
        let mut app = GradeBook::new(3);
        app.row = 2;
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.ledger.len(), 2);
        assert_eq!(app.row, 1);

        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Delete);
        assert!(app.ledger.is_empty());
        assert_eq!(app.row, 0);

        // nothing left to remove or edit
        press(&mut app, KeyCode::Delete);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, Mode::Browsing);
        assert!(app.ledger.is_empty());
    }

    #[test]
    fn test_empty_ledger_computes_zero() {
        let mut app = GradeBook::new(0);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.result.unwrap().cgpa.to_string(), "0.00");
    }

    #[test]
    fn test_quit() {
        let mut app = GradeBook::new(1);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.exit);
    }

    #[test]
    fn test_click_buttons() {
        let mut app = GradeBook::new(1);
        let areas = areas(SCREEN);

        click(&mut app, areas.add);
        assert_eq!(app.ledger.len(), 2);
        assert_eq!(app.row, 1);

        click(&mut app, areas.compute);
        assert_eq!(app.result.unwrap().cgpa.to_string(), "0.00");
    }

    #[test]
    fn test_click_cells() {
        let mut app = GradeBook::new(2);
        let list = areas(SCREEN).list;
        let rows = app.visible_rows(list);
        assert_eq!(rows.len(), 2);

        let [name, grade, _, remove] = columns(rows[1].1);
        click(&mut app, name);
        assert_eq!((app.row, app.column), (1, Column::Name));
        assert_eq!(app.mode, Mode::Editing);

        click(&mut app, grade);
        assert_eq!(app.mode, Mode::Browsing);
        assert_eq!(app.ledger[1].grade, "O");

        let [_, _, _, remove_first] = columns(rows[0].1);
        click(&mut app, remove_first);
        assert_eq!(app.ledger.len(), 1);
        assert_eq!(app.ledger[0].grade, "O");

        // the second row no longer exists
        assert_eq!(app.hit(SCREEN, remove.x, remove.y), None);
    }

    #[test]
    fn test_scrolls_to_selected_row() {
        let app = GradeBook {
            row: 40,
            ..GradeBook::new(50)
        };
        let rows = app.visible_rows(areas(SCREEN).list);
        assert!(!rows.is_empty());
        assert_eq!(rows.last().unwrap().0, 40);
    }

    #[test]
    fn test_render_result_only_after_compute() {
        let mut app = GradeBook::new(1);
        fill_row(&mut app, "Maths", 'O', "4");
        press(&mut app, KeyCode::Char('a'));
        fill_row(&mut app, "Physics", 'A', "3");

        let before = screen(&app);
        assert!(before.contains("CGPA Calculator"));
        assert!(before.contains("Maths"));
        assert!(before.contains("< A >"));
        assert!(!before.contains("Your CGPA is"));

        press(&mut app, KeyCode::Char('c'));
        let after = screen(&app);
        assert!(after.contains("Your CGPA is: 9.14"));
    }

    #[test]
    fn test_render_placeholders() {
        let text = screen(&GradeBook::new(1));
        assert!(text.contains("Subject Name"));
        assert!(text.contains("Select Grade"));
        assert!(text.contains("[Remove]"));
        assert!(text.contains(ADD_LABEL));
        assert!(text.contains(COMPUTE_LABEL));
    }
}
