use std::future::Future;

use tracing::{debug, warn};

use crate::error::FullscreenError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScreenMode {
    #[default]
    Windowed,
    Fullscreen,
}

impl ScreenMode {
    pub fn from_flag(is_fullscreen: bool) -> Self {
        if is_fullscreen {
            ScreenMode::Fullscreen
        } else {
            ScreenMode::Windowed
        }
    }
}

/// Keeps a platform change listener alive. Dropping it unsubscribes.
pub struct ChangeSubscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl ChangeSubscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self { cancel: Some(Box::new(cancel)) }
    }
}

impl Drop for ChangeSubscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

/// The host's fullscreen capability. Requests are asynchronous because
/// the platform may prompt the user or refuse.
pub trait FullscreenPlatform: Clone + 'static {
    async fn enter(&self) -> Result<(), FullscreenError>;
    async fn exit(&self) -> Result<(), FullscreenError>;
    fn subscribe(&self, on_change: Box<dyn FnMut(bool)>) -> ChangeSubscription;
}

/// Mirrors the platform's fullscreen state and issues transitions.
///
/// The platform stays the source of truth: requests never flip `mode`
/// directly, only change notifications fed through [`on_change`] do.
///
/// [`on_change`]: FullscreenManager::on_change
#[derive(Clone, Debug)]
pub struct FullscreenManager<P> {
    platform: P,
    mode: ScreenMode,
}

impl<P: FullscreenPlatform> FullscreenManager<P> {
    pub fn new(platform: P) -> Self {
        Self { platform, mode: ScreenMode::Windowed }
    }

    pub fn is_fullscreen(&self) -> bool {
        self.mode == ScreenMode::Fullscreen
    }

    /// Whether a platform notification carrying `is_fullscreen` would move
    /// the mirrored mode. Repeated notifications of the same state do not.
    pub fn would_change(&self, is_fullscreen: bool) -> bool {
        ScreenMode::from_flag(is_fullscreen) != self.mode
    }

    /// Returns whether the mode actually changed.
    pub fn on_change(&mut self, is_fullscreen: bool) -> bool {
        if !self.would_change(is_fullscreen) {
            return false;
        }
        let next = ScreenMode::from_flag(is_fullscreen);
        debug!("Screen mode {:?} -> {:?}", self.mode, next);
        self.mode = next;
        true
    }

    pub fn subscribe(&self, on_change: impl FnMut(bool) + 'static) -> ChangeSubscription {
        self.platform.subscribe(Box::new(on_change))
    }

    pub fn toggle(&self) -> impl Future<Output = Result<(), FullscreenError>> + 'static {
        let platform = self.platform.clone();
        let mode = self.mode;
        async move {
            match mode {
                ScreenMode::Windowed => platform.enter().await,
                ScreenMode::Fullscreen => platform.exit().await,
            }
        }
    }

    /// Best-effort entry once the view has had `delay` to mount.
    pub fn enter_on_start(
        &self,
        delay: impl Future<Output = ()> + 'static,
    ) -> impl Future<Output = Result<(), FullscreenError>> + 'static {
        let platform = self.platform.clone();
        async move {
            delay.await;
            let result = platform.enter().await;
            if let Err(e) = &result {
                warn!("Automatic fullscreen failed: {}", e);
            }
            result
        }
    }
}
