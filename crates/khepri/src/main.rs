mod canvas;
mod logging;
mod terminal;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use khepri_background::{BackgroundSettings, LedBackground, LoopPhase};
use khepri_config::Config;
use khepri_core::BACKGROUND;
use log::{info, warn};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Style, Stylize},
    text::Line,
};

use crate::terminal::TerminalHost;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    // Logger first, so problems while loading the config reach the log file.
    logging::init(Config::default().log_level);
    let config = Config::load();
    logging::set_level(config.log_level);
    info!("starting khepri with {config:?}");

    let terminal = ratatui::init();
    let result = App::new(config).run(terminal);
    ratatui::restore();
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Loaded configuration, updated when the user switches scene or palette.
    config: Config,
    /// Whether scene or palette changed since startup.
    config_dirty: bool,
    background: LedBackground,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let settings = BackgroundSettings {
            scene: config.scene,
            palette: config.palette,
            scroll_speed: config.scroll_speed,
        };
        let background = match config.seed {
            Some(seed) => LedBackground::with_seed(settings, seed),
            None => LedBackground::new(settings),
        };
        Self {
            running: false,
            config,
            config_dirty: false,
            background,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        let mut host = TerminalHost::new(size.width, size.height, self.config.frame_rate);

        self.background.start(&mut host);
        self.running = true;
        while self.running {
            if host.take_due_frame().is_some() {
                self.background.frame(&mut host);
            }
            terminal.draw(|frame| self.render(frame, &host))?;
            self.handle_crossterm_events(&mut host)?;
        }
        self.background.teardown(&mut host);

        if self.config_dirty {
            if let Err(err) = self.config.save() {
                warn!("failed to save config: {err}");
            }
        }
        Ok(())
    }

    /// Renders the background and the help line.
    fn render(&self, frame: &mut Frame, host: &TerminalHost) {
        let area = frame.area();
        frame.render_widget(host.canvas(), area);

        if !self.config.show_help {
            return;
        }

        let [_, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let accent = Color::Cyan;
        let help = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".gray(),
            "s".bold().fg(accent),
            format!(" scene: {}  ", self.config.scene.label()).gray(),
            "c".bold().fg(accent),
            format!(" palette: {}  ", self.config.palette.label()).gray(),
            "h".bold().fg(accent),
            " hide help".gray(),
        ])
        .style(Style::new().bg(Color::Rgb(BACKGROUND.r, BACKGROUND.g, BACKGROUND.b)))
        .centered();
        frame.render_widget(help, help_area);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Blocks at most until the next frame is due.
    fn handle_crossterm_events(&mut self, host: &mut TerminalHost) -> color_eyre::Result<()> {
        if event::poll(host.time_until_frame())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => self.on_resize(host, cols, rows),
                _ => {}
            }
        }
        Ok(())
    }

    /// Forwards a terminal resize to the background.
    ///
    /// A background that could not start on an empty terminal is started here.
    fn on_resize(&mut self, host: &mut TerminalHost, cols: u16, rows: u16) {
        let subscribed = host.set_terminal_size(cols, rows);
        if self.background.phase() == LoopPhase::Uninitialized {
            self.background.start(host);
        } else if subscribed {
            self.background.resize(host);
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('s')) => self.cycle_scene(),
            (_, KeyCode::Char('c')) => self.cycle_palette(),
            (_, KeyCode::Char('h')) => self.toggle_help(),
            _ => {}
        }
    }

    /// Cycle through the available scenes.
    fn cycle_scene(&mut self) {
        self.config.scene = self.config.scene.next();
        self.background.set_scene(self.config.scene);
        self.config_dirty = true;
    }

    /// Cycle through the LED palettes.
    fn cycle_palette(&mut self) {
        self.config.palette = self.config.palette.next();
        self.background.set_palette(self.config.palette);
        self.config_dirty = true;
    }

    /// Show or hide the help line for this session.
    fn toggle_help(&mut self) {
        self.config.show_help = !self.config.show_help;
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
