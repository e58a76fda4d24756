use std::path::PathBuf;

use color_eyre::eyre::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    action::Action,
    components::{
        backdrop::{Backdrop, BackdropState},
        help::Help,
        snowfall::{Snowfall, SnowfallState},
    },
    config::Config,
    page::Page,
    tui,
};

pub struct App {
    config: Config,
    tick_rate: f64,
    frame_rate: f64,
    assets_dir: PathBuf,
    should_quit: bool,
    should_suspend: bool,
    show_help: bool,
    page: Page,
    backdrop_state: BackdropState,
    snowfall_state: SnowfallState,
}

impl App {
    pub fn new(tick_rate: f64, frame_rate: f64, assets_dir: Option<PathBuf>) -> Result<Self> {
        let config = Config::new()?;
        let assets_dir = assets_dir.unwrap_or_else(|| config.config.assets_dir.clone());

        Ok(Self {
            tick_rate,
            frame_rate,
            assets_dir,
            should_quit: false,
            should_suspend: false,
            show_help: false,
            config,
            page: Page::new(),
            backdrop_state: BackdropState::new(),
            snowfall_state: SnowfallState::new(),
        })
    }

    /// A page load: new backdrop, new snow, animation from the top.
    pub fn reload(&mut self) {
        self.page = Page::load(&mut rand::thread_rng());

        match &self.page.backdrop {
            Some(image) => {
                if let Err(e) = self.backdrop_state.load(image, &self.assets_dir) {
                    warn!("{e:#}, falling back to a plain backdrop");
                }
            },
            None => self.backdrop_state.clear(),
        }
        self.snowfall_state.restart();
    }

    /// The animation is frozen while the help overlay is shown.
    fn sync_animation(&mut self) {
        if self.show_help {
            self.snowfall_state.pause();
        } else {
            self.snowfall_state.resume();
        }
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        self.sync_animation();
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = tui::Tui::new()?;
        tui.tick_rate(self.tick_rate);
        tui.frame_rate(self.frame_rate);
        tui.enter()?;

        self.reload();

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    tui::Event::Tick => action_tx.send(Action::Tick)?,
                    tui::Event::Render => action_tx.send(Action::Render)?,
                    tui::Event::Resize(x, y) => action_tx.send(Action::Resize(x, y))?,
                    tui::Event::Error => action_tx.send(Action::Error("Failed to read terminal event".to_string()))?,
                    tui::Event::Key(key) => {
                        if let Some(action) = self.config.keybindings.get(&key) {
                            info!("Got action: {action:?}");
                            action_tx.send(action.clone())?;
                        }
                    },
                    _ => {},
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                if action != Action::Tick && action != Action::Render {
                    debug!("{action:?}");
                }
                match action {
                    Action::Tick => {},
                    Action::Quit => self.should_quit = true,
                    Action::Suspend => self.should_suspend = true,
                    Action::Resume => self.should_suspend = false,
                    Action::ToggleShowHelp => self.toggle_help(),
                    Action::Reload => self.reload(),
                    Action::Error(ref message) => warn!("{message}"),
                    Action::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, w, h))?;
                        self.render(&mut tui)?;
                    },
                    Action::Render => self.render(&mut tui)?,
                }
            }

            if self.should_suspend {
                self.snowfall_state.pause();
                tui.suspend()?;
                action_tx.send(Action::Resume)?;
                tui = tui::Tui::new()?;
                tui.tick_rate(self.tick_rate);
                tui.frame_rate(self.frame_rate);
                tui.enter()?;
                self.sync_animation();
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    fn render(&mut self, tui: &mut tui::Tui) -> Result<()> {
        tui.draw(|f| {
            let area = f.area();

            f.render_stateful_widget(Backdrop::new(), area, &mut self.backdrop_state);
            f.render_stateful_widget(Snowfall::new(&self.page.body), area, &mut self.snowfall_state);

            if self.show_help {
                f.render_widget(Help::new("Keys", &self.config.keybindings), area);
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::constants::{background::IMAGES, snow::SNOW_COUNT};

    #[test]
    fn test_reload_is_a_fresh_page_load() -> Result<()> {
        let mut app = App::new(4.0, 30.0, Some(PathBuf::from("does-not-exist")))?;
        assert!(app.page.body.is_empty());

        app.reload();
        assert_eq!(app.page.body.len(), SNOW_COUNT);
        let backdrop = app.page.backdrop.clone().expect("backdrop is set");
        assert!(IMAGES.contains(&backdrop.as_str()));
        // Missing assets fall back to the plain backdrop
        assert!(!app.backdrop_state.has_image());

        app.reload();
        assert_eq!(app.page.body.len(), SNOW_COUNT);
        Ok(())
    }

    #[test]
    fn test_help_keeps_snow_paused() -> Result<()> {
        let mut app = App::new(4.0, 30.0, Some(PathBuf::from("does-not-exist")))?;
        app.reload();

        app.toggle_help();
        assert!(app.snowfall_state.is_paused());

        // Reloading under the overlay does not start the animation
        app.reload();
        assert!(app.snowfall_state.is_paused());

        // Coming back from a suspend with help still open
        app.snowfall_state.pause();
        app.sync_animation();
        assert!(app.snowfall_state.is_paused());

        app.toggle_help();
        assert!(!app.snowfall_state.is_paused());
        Ok(())
    }
}
