use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::display::{DisplayContext, DisplaySettings, GrantedSettings};

use super::config::{WindowConfig, window_attributes};

/// Entry point for the window bootstrap.
pub struct Bootstrap;

impl Bootstrap {
    /// Opens one window with `config`, binds a graphics context resolved from
    /// `settings`, and returns the settings actually granted.
    ///
    /// This is a single-shot operation: the event loop runs only long enough
    /// for the platform to deliver the window, then exits. Window and context
    /// are released by scope before this function returns.
    pub fn run(config: WindowConfig, settings: DisplaySettings) -> Result<GrantedSettings> {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = BootstrapState::new(config, settings);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.outcome()
    }
}

#[self_referencing]
struct DisplayEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    context: DisplayContext<'this>,
}

struct BootstrapState {
    config: WindowConfig,
    settings: DisplaySettings,

    entry: Option<DisplayEntry>,
    granted: Option<GrantedSettings>,
    error: Option<anyhow::Error>,
}

impl BootstrapState {
    fn new(config: WindowConfig, settings: DisplaySettings) -> Self {
        Self {
            config,
            settings,
            entry: None,
            granted: None,
            error: None,
        }
    }

    fn create_display(&mut self, event_loop: &ActiveEventLoop) -> Result<GrantedSettings> {
        let attrs = window_attributes(&self.config);
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let settings = self.settings;
        let entry = DisplayEntryTryBuilder {
            window,
            context_builder: |w| pollster::block_on(DisplayContext::new(w, settings)),
        }
        .try_build()?;

        let granted = entry.borrow_context().granted();
        let info = entry.borrow_context().adapter_info();
        log::info!(
            "display ready: \"{}\" {}x{} on {} ({:?}), depth={} stencil={} antialiasing={}",
            self.config.title,
            entry.borrow_context().size().width,
            entry.borrow_context().size().height,
            info.name,
            info.backend,
            granted.depth_bits,
            granted.stencil_bits,
            granted.antialiasing,
        );

        self.entry = Some(entry);
        Ok(granted)
    }

    /// Consumes the finished state into the bootstrap result.
    fn outcome(self) -> Result<GrantedSettings> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.granted
            .context("event loop exited before the window was created")
    }
}

impl ApplicationHandler for BootstrapState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // `resumed` can fire again on some platforms; the bootstrap only ever
        // creates one window.
        if self.entry.is_some() || self.error.is_some() {
            return;
        }

        match self.create_display(event_loop) {
            Ok(granted) => self.granted = Some(granted),
            Err(e) => {
                log::error!("failed to create display: {e:#}");
                self.error = Some(e);
            }
        }

        // Single-shot bootstrap: the window exists and its context is bound;
        // there is nothing further for the loop to drive.
        event_loop.exit();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };
        if entry.borrow_window().id() != window_id {
            return;
        }

        // Only the events the platform can deliver during the short pump.
        match event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                entry.with_context_mut(|ctx| ctx.resize(new_size));
            }
            _ => {}
        }
    }
}
