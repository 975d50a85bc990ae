use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use motes_config::{Config, ThemeState, ThemeStore};
use motes_core::{MotionPreference, Palette};
use motes_field::{FieldCanvas, FieldEffect, FieldParams, Scene, SurfaceDimensions};
use rand::rngs::ThreadRng;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
};

use crate::host::TerminalHost;

/// Poll timeout when no frame is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

type Effect = FieldEffect<ThreadRng>;
type Terminal = TerminalHost<Stdout>;

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    theme: ThemeState<Box<dyn ThemeStore>>,
    motion: MotionPreference,
    /// Draw calls from the most recent frame.
    scene: Scene,
}

impl App {
    pub fn new(config: Config, theme: ThemeState<Box<dyn ThemeStore>>) -> Self {
        Self {
            running: false,
            motion: MotionPreference::from_reduced(config.reduced_motion),
            config,
            theme,
            scene: Scene::default(),
        }
    }

    /// Mount the field, run the main loop, and tear the field down again.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        let mut host = TerminalHost::new(io::stdout(), area, self.config.frame_interval());
        let mut effect = FieldEffect::mount(&mut host, FieldParams::default(), self.motion, rand::rng());

        self.running = true;
        let result = self.run_loop(&mut terminal, &mut host, &mut effect);
        effect.unmount(&mut host);
        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut DefaultTerminal,
        host: &mut Terminal,
        effect: &mut Effect,
    ) -> color_eyre::Result<()> {
        while self.running {
            self.handle_crossterm_events(host, effect)?;

            if let Some(handle) = host.take_due_frame(Instant::now()) {
                effect.on_frame(host, handle, &mut self.scene);
                let dimensions = effect.rect().dimensions;
                terminal.draw(|frame| self.render(frame, dimensions))?;
            }
        }
        Ok(())
    }

    /// Renders the field and the foreground text.
    fn render(&self, frame: &mut Frame, dimensions: SurfaceDimensions) {
        let palette = self.theme.get().palette();
        let area = frame.area();

        frame.render_widget(FieldCanvas::new(&self.scene, palette, dimensions), area);

        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Top padding
            Constraint::Length(1), // Headline
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Tagline
            Constraint::Fill(1),   // Bottom padding
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let headline = Line::from(self.config.headline.as_str())
            .style(Style::new().fg(palette.text).bold())
            .centered();
        frame.render_widget(headline, chunks[1]);

        let tagline = Line::from(self.config.tagline.as_str())
            .style(Style::new().fg(palette.subtext))
            .centered();
        frame.render_widget(tagline, chunks[3]);

        frame.render_widget(self.help_line(palette), chunks[5]);
    }

    fn help_line(&self, palette: Palette) -> Line<'static> {
        let theme = self.theme.get().toggle();
        let motion = if self.motion.is_reduced() {
            " resume motion"
        } else {
            " reduce motion"
        };
        Line::from(vec![
            "q".bold().fg(palette.primary),
            " quit  ".fg(palette.subtext),
            "t".bold().fg(palette.primary),
            format!(" {theme} theme  ").fg(palette.subtext),
            "m".bold().fg(palette.primary),
            motion.fg(palette.subtext),
        ])
        .centered()
    }

    /// Reads crossterm events until the next frame is due.
    fn handle_crossterm_events(
        &mut self,
        host: &mut Terminal,
        effect: &mut Effect,
    ) -> color_eyre::Result<()> {
        let timeout = host.time_until_frame(Instant::now()).unwrap_or(IDLE_POLL);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key, effect),
                Event::Key(_) => {}
                other => {
                    if let Some(input) = host.translate(other) {
                        effect.handle(&*host, input);
                    }
                }
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent, effect: &mut Effect) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.toggle_theme(),
            (_, KeyCode::Char('m')) => self.toggle_motion(effect),
            _ => {}
        }
    }

    /// Switch between light and dark, persisting the choice.
    fn toggle_theme(&mut self) {
        match self.theme.toggle() {
            Ok(mode) => tracing::info!(%mode, "theme changed"),
            Err(e) => tracing::warn!(error = %e, "theme changed but could not be saved"),
        }
    }

    fn toggle_motion(&mut self, effect: &mut Effect) {
        self.motion = self.motion.toggle();
        effect.set_motion(self.motion);
        tracing::debug!(motion = ?self.motion, "motion preference changed");
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
