use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use futures::{FutureExt, StreamExt};
use ratatui::{
    DefaultTerminal, Frame,
    crossterm::event::{Event as CrosstermEvent, KeyEvent, KeyEventKind},
};
use ratatui_image::picker::Picker;
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

#[derive(Clone, Debug)]
pub enum TuiEvent {
    Init,
    Error,
    Tick,
    Render,
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Owns the terminal and a background task turning crossterm input into `TuiEvent`s.
pub struct Tui {
    terminal: DefaultTerminal,
    /// Knows which graphics protocol the terminal speaks.
    pub picker: Picker,
    task: JoinHandle<()>,
    cancellation_token: CancellationToken,
    event_rx: UnboundedReceiver<TuiEvent>,
    event_tx: UnboundedSender<TuiEvent>,
    frame_rate: f64,
    tick_rate: f64,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = ratatui::init();
        let picker = Picker::from_query_stdio().unwrap_or(Picker::from_fontsize((8, 16)));
        log::debug!("Picker has been set to: {picker:?}");
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal,
            picker,
            task: tokio::spawn(async {}),
            cancellation_token: CancellationToken::new(),
            event_rx,
            event_tx,
            frame_rate: 30.0,
            tick_rate: 8.0,
        })
    }

    pub fn tick_rate(mut self, tick_rate: f64) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn start(&mut self) {
        let tick_delay = Duration::from_secs_f64(1.0 / self.tick_rate);
        let render_delay = Duration::from_secs_f64(1.0 / self.frame_rate);
        self.cancel();
        self.cancellation_token = CancellationToken::new();
        let cancellation_token = self.cancellation_token.clone();
        let event_tx = self.event_tx.clone();
        self.task = tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_delay);
            let mut render_interval = tokio::time::interval(render_delay);
            let _ = event_tx.send(TuiEvent::Init);
            loop {
                let crossterm_event = reader.next().fuse();
                let event = tokio::select! {
                    _ = cancellation_token.cancelled() => break,
                    maybe_event = crossterm_event => match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                            TuiEvent::Key(key)
                        }
                        Some(Ok(CrosstermEvent::Resize(x, y))) => TuiEvent::Resize(x, y),
                        Some(Ok(_)) => continue,
                        Some(Err(_)) => TuiEvent::Error,
                        None => break,
                    },
                    _ = tick_interval.tick() => TuiEvent::Tick,
                    _ = render_interval.tick() => TuiEvent::Render,
                };
                if event_tx.send(event).is_err() {
                    break;
                }
            }
        });
    }

    // Gives the input task 50ms to notice the cancellation before aborting it.
    pub fn stop(&self) -> Result<()> {
        self.cancel();
        let started = Instant::now();
        while !self.task.is_finished() {
            let waited = started.elapsed();
            if waited > Duration::from_millis(100) {
                log::error!("Input task still running after {waited:?}");
                break;
            }
            if waited > Duration::from_millis(50) {
                self.task.abort();
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        Ok(())
    }

    pub fn enter(&mut self) -> Result<()> {
        self.start();
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stop()?;
        ratatui::restore();
        Ok(())
    }

    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    pub async fn next(&mut self) -> Option<TuiEvent> {
        self.event_rx.recv().await
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}


impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            log::error!("Failed to restore the terminal: {e}");
        }
    }
}
