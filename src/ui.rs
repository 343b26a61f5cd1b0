use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use split_ledger::{AppConfig, BalanceStatus, Coordinator, Friend, FriendId, LedgerError, Payer, SplitRequest};
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Friends,
    AddFriend,
    Split,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Name,
    Image,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitField {
    Bill,
    UserExpense,
    Payer,
}

impl SplitField {
    pub fn next(&self) -> Self {
        match self {
            SplitField::Bill => SplitField::UserExpense,
            SplitField::UserExpense => SplitField::Payer,
            SplitField::Payer => SplitField::Bill,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            SplitField::Bill => SplitField::Payer,
            SplitField::UserExpense => SplitField::Bill,
            SplitField::Payer => SplitField::UserExpense,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AddFriendForm {
    pub name: String,
    pub image: String,
    pub field: AddField,
}

impl AddFriendForm {
    fn new(default_image: &str) -> Self {
        Self {
            name: String::new(),
            image: default_image.to_string(),
            field: AddField::Name,
        }
    }

    fn active_mut(&mut self) -> &mut String {
        match self.field {
            AddField::Name => &mut self.name,
            AddField::Image => &mut self.image,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SplitForm {
    pub bill: String,
    pub user_expense: String,
    pub payer: Payer,
    pub field: Option<SplitField>,
}

impl SplitForm {
    /// Friend's share, shown read-only once both amounts form a valid split
    pub fn friend_expense(&self) -> Option<i64> {
        SplitRequest::parse(&self.bill, &self.user_expense, self.payer)
            .ok()
            .map(|request| request.friend_expense())
    }

    fn active_mut(&mut self) -> Option<&mut String> {
        match self.field {
            Some(SplitField::Bill) => Some(&mut self.bill),
            Some(SplitField::UserExpense) => Some(&mut self.user_expense),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

pub struct App {
    pub coordinator: Coordinator,
    pub state: ListState,
    pub focus: Focus,
    pub show_add_friend: bool,
    pub add_form: AddFriendForm,
    pub split_form: SplitForm,
    pub status: Option<StatusMessage>,
    pub should_quit: bool,
    currency: String,
    default_image: String,
}

impl App {
    pub fn new(coordinator: Coordinator, config: &AppConfig) -> Self {
        let mut state = ListState::default();
        if !coordinator.friends().is_empty() {
            state.select(Some(0));
        }

        Self {
            coordinator,
            state,
            focus: Focus::Friends,
            show_add_friend: false,
            add_form: AddFriendForm::new(&config.default_image_url),
            split_form: SplitForm::default(),
            status: None,
            should_quit: false,
            currency: config.currency_symbol.clone(),
            default_image: config.default_image_url.clone(),
        }
    }

    pub fn cursor_friend_id(&self) -> Option<FriendId> {
        self.state
            .selected()
            .and_then(|i| self.coordinator.friends().get(i))
            .map(|f| f.id.clone())
    }

    pub fn next(&mut self) {
        let len = self.coordinator.friends().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.coordinator.friends().len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn toggle_add_friend(&mut self) {
        self.show_add_friend = !self.show_add_friend;
        if self.show_add_friend {
            self.coordinator.begin_add_friend();
            self.split_form = SplitForm::default();
            self.focus = Focus::AddFriend;
        } else {
            self.focus = Focus::Friends;
        }
    }

    fn close_add_friend(&mut self) {
        self.show_add_friend = false;
        if self.focus == Focus::AddFriend {
            self.focus = Focus::Friends;
        }
    }

    pub fn select_cursor(&mut self) {
        let Some(id) = self.cursor_friend_id() else {
            return;
        };

        match self.coordinator.handle_select(&id) {
            Ok(handled) => {
                if handled.close_add_friend {
                    self.close_add_friend();
                }
                self.split_form = SplitForm::default();
                self.status = None;
            }
            Err(e) => self.report(e),
        }
    }

    pub fn submit_add_friend(&mut self) {
        let result = self
            .coordinator
            .handle_add_friend(&self.add_form.name, &self.add_form.image);

        match result {
            Ok(handled) => {
                self.status = Some(StatusMessage::Info(format!(
                    "Added {}",
                    handled.value.name
                )));
                if handled.close_add_friend {
                    self.close_add_friend();
                }
                self.add_form = AddFriendForm::new(&self.default_image);
                self.state
                    .select(Some(self.coordinator.friends().len() - 1));
            }
            Err(e) => self.report(e),
        }
    }

    pub fn submit_split(&mut self) {
        let result = SplitRequest::parse(
            &self.split_form.bill,
            &self.split_form.user_expense,
            self.split_form.payer,
        )
        .and_then(|request| {
            self.coordinator.handle_split(
                request.bill_total(),
                request.user_expense(),
                request.payer(),
            )
        });

        match result {
            Ok(handled) => {
                let name = self
                    .coordinator
                    .selected_friend()
                    .map(|f| f.name.clone())
                    .unwrap_or_default();
                self.status = Some(StatusMessage::Info(format!(
                    "Split booked: {} {:+} → {}",
                    name, handled.value.delta, handled.value.new_balance
                )));
                self.split_form = SplitForm {
                    field: self.split_form.field,
                    ..SplitForm::default()
                };
            }
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, error: LedgerError) {
        self.status = Some(StatusMessage::Error(error.to_string()));
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.focus {
            Focus::Friends => self.handle_friends_key(key),
            Focus::AddFriend => self.handle_add_friend_key(key),
            Focus::Split => self.handle_split_key(key),
        }
    }

    fn handle_friends_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.previous(),
            KeyCode::Enter => self.select_cursor(),
            KeyCode::Char('a') => self.toggle_add_friend(),
            KeyCode::Char('s') => {
                if self.coordinator.selected_id().is_some() {
                    self.focus = Focus::Split;
                    self.split_form.field = Some(SplitField::Bill);
                } else {
                    self.report(LedgerError::NoSelection);
                }
            }
            _ => {}
        }
    }

    fn handle_add_friend_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.toggle_add_friend(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.add_form.field = match self.add_form.field {
                    AddField::Name => AddField::Image,
                    AddField::Image => AddField::Name,
                };
            }
            KeyCode::Enter => self.submit_add_friend(),
            KeyCode::Backspace => {
                self.add_form.active_mut().pop();
            }
            KeyCode::Char(c) => self.add_form.active_mut().push(c),
            _ => {}
        }
    }

    fn handle_split_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.focus = Focus::Friends;
                self.split_form.field = None;
            }
            KeyCode::Tab | KeyCode::Down => {
                self.split_form.field = self.split_form.field.map(|f| f.next());
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.split_form.field = self.split_form.field.map(|f| f.previous());
            }
            KeyCode::Enter => self.submit_split(),
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
                if self.split_form.field == Some(SplitField::Payer) =>
            {
                self.split_form.payer = self.split_form.payer.flip();
            }
            KeyCode::Backspace => {
                if let Some(text) = self.split_form.active_mut() {
                    text.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.split_form.active_mut() {
                    text.push(c);
                }
            }
            _ => {}
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
            if app.should_quit {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50), // Friends + add form
            Constraint::Percentage(50), // Split form
        ])
        .split(chunks[1]);

    if app.show_add_friend {
        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(6)])
            .split(content_chunks[0]);

        render_friends(f, sidebar[0], app);
        render_add_friend(f, sidebar[1], app);
    } else {
        render_friends(f, content_chunks[0], app);
    }

    render_split(f, content_chunks[1], app);
    render_status_bar(f, chunks[2], app);
}

/// (owed to you, you owe) across all friends, clamped at u64::MAX
fn balance_totals(friends: &[Friend]) -> (u64, u64) {
    let (mut owed_to_you, mut you_owe) = (0u64, 0u64);
    for friend in friends {
        match friend.status() {
            BalanceStatus::OwesYou(n) => owed_to_you = owed_to_you.saturating_add(n),
            BalanceStatus::YouOwe(n) => you_owe = you_owe.saturating_add(n),
            BalanceStatus::Even => {}
        }
    }
    (owed_to_you, you_owe)
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let (owed_to_you, you_owe) = balance_totals(app.coordinator.friends());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Eat-'N-Split",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("Friends: {}", app.coordinator.friends().len()),
            Style::default().fg(Color::White),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("↑ {}{}", app.currency, owed_to_you),
            Style::default().fg(Color::Green),
        ),
        Span::raw("  "),
        Span::styled(
            format!("↓ {}{}", app.currency, you_owe),
            Style::default().fg(Color::Red),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn render_friends(f: &mut Frame, area: Rect, app: &mut App) {
    let items: Vec<ListItem> = app
        .coordinator
        .friends()
        .iter()
        .map(|friend| {
            let selected = app.coordinator.is_selected(&friend.id);
            let color = match friend.status() {
                BalanceStatus::YouOwe(_) => Color::Red,
                BalanceStatus::OwesYou(_) => Color::Green,
                BalanceStatus::Even => Color::White,
            };

            let mut name_style = Style::default().add_modifier(Modifier::BOLD);
            if selected {
                name_style = name_style.fg(Color::Yellow);
            }

            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(friend.name.clone(), name_style),
                    Span::styled(
                        if selected { "  [Close]" } else { "  [Select]" },
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(Span::styled(
                    friend.balance_message(&app.currency),
                    Style::default().fg(color),
                )),
            ])
        })
        .collect();

    let border = if app.focus == Focus::Friends {
        Color::Cyan
    } else {
        Color::White
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Friends "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut app.state);
}

fn field_line<'a>(label: &'a str, value: &str, active: bool) -> Line<'a> {
    let value_style = if active {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if active { "▏" } else { "" };

    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Cyan)),
        Span::styled(format!("{}{}", value, cursor), value_style),
    ])
}

fn render_add_friend(f: &mut Frame, area: Rect, app: &App) {
    let active = app.focus == Focus::AddFriend;
    let form = &app.add_form;

    let content = vec![
        field_line(
            "  Friend name: ",
            &form.name,
            active && form.field == AddField::Name,
        ),
        field_line(
            "  Image URL:   ",
            &form.image,
            active && form.field == AddField::Image,
        ),
        Line::from(""),
        Line::from(Span::styled(
            "  Enter Add | Tab Field | Esc Close",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if active { Color::Yellow } else { Color::White }))
            .title(" Add Friend "),
    );

    f.render_widget(panel, area);
}

fn render_split(f: &mut Frame, area: Rect, app: &App) {
    let Some(friend) = app.coordinator.selected_friend() else {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Select a friend to split a bill",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Split a Bill "),
        );
        f.render_widget(hint, area);
        return;
    };

    let active = app.focus == Focus::Split;
    let form = &app.split_form;
    let is_field = |field: SplitField| active && form.field == Some(field);

    let friend_expense = form
        .friend_expense()
        .map(|n| n.to_string())
        .unwrap_or_default();
    let friend_label = format!("  {}'s expense: ", friend.name);
    let payer_label = match form.payer {
        Payer::User => "You".to_string(),
        Payer::Friend => friend.name.clone(),
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Split a bill with {}", friend.name),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )),
        Line::from(""),
        field_line("  Bill value: ", &form.bill, is_field(SplitField::Bill)),
        field_line(
            "  Your expense: ",
            &form.user_expense,
            is_field(SplitField::UserExpense),
        ),
        Line::from(vec![
            Span::styled(friend_label, Style::default().fg(Color::Cyan)),
            Span::styled(friend_expense, Style::default().fg(Color::DarkGray)),
        ]),
        field_line(
            "  Who's paying the bill? ",
            &format!("< {} >", payer_label),
            is_field(SplitField::Payer),
        ),
        Line::from(""),
        Line::from(Span::styled(
            if active {
                "  Enter Split bill | Tab Field | Space Payer | Esc Back"
            } else {
                "  Press s to fill in the bill"
            },
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if active { Color::Yellow } else { Color::White }))
            .title(" Split a Bill "),
    );

    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    match &app.status {
        Some(StatusMessage::Info(msg)) => {
            status_spans.push(Span::styled(format!(" {} ", msg), Style::default().fg(Color::Green)));
            status_spans.push(Span::raw("| "));
        }
        Some(StatusMessage::Error(msg)) => {
            status_spans.push(Span::styled(format!(" {} ", msg), Style::default().fg(Color::Red)));
            status_spans.push(Span::raw("| "));
        }
        None => {}
    }

    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Nav | "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Select | "));
    status_spans.push(Span::styled("a", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(if app.show_add_friend { " Close | " } else { " Add Friend | " }));
    status_spans.push(Span::styled("s", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Split | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
