// Transient toast notifications shown over the drawing area.

use sketch_io::NotificationConfig;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    /// Seconds on the UI clock when the toast was raised.
    pub created_at: f64,
}

/// Queue of toasts. Times are UI-clock seconds passed in by the caller.
#[derive(Debug, Clone)]
pub struct Notifications {
    toasts: Vec<Toast>,
    duration: f64,
    fade: f64,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(&NotificationConfig::default())
    }
}

impl Notifications {
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            toasts: Vec::new(),
            duration: config.duration_secs,
            fade: config.fade_secs,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, now: f64) {
        let message = message.into();
        debug!(?kind, %message, "notification");
        self.toasts.push(Toast {
            message,
            kind,
            created_at: now,
        });
    }

    pub fn info(&mut self, message: impl Into<String>, now: f64) {
        self.push(message, ToastKind::Info, now);
    }

    pub fn success(&mut self, message: impl Into<String>, now: f64) {
        self.push(message, ToastKind::Success, now);
    }

    pub fn error(&mut self, message: impl Into<String>, now: f64) {
        self.push(message, ToastKind::Error, now);
    }

    fn lifetime(&self) -> f64 {
        self.duration + self.fade
    }

    /// 1.0 while fully shown, then a linear fade to 0.0.
    pub fn opacity(&self, toast: &Toast, now: f64) -> f32 {
        let age = now - toast.created_at;
        if age <= self.duration {
            return 1.0;
        }
        if self.fade <= 0.0 {
            return 0.0;
        }
        (1.0 - (age - self.duration) / self.fade).clamp(0.0, 1.0) as f32
    }

    /// Toasts still visible at `now`, oldest first.
    pub fn active(&self, now: f64) -> impl Iterator<Item = &Toast> {
        let lifetime = self.lifetime();
        self.toasts
            .iter()
            .filter(move |t| now - t.created_at < lifetime)
    }

    /// Every queued toast, oldest first, expired or not.
    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Drop expired toasts.
    pub fn prune(&mut self, now: f64) {
        let lifetime = self.lifetime();
        self.toasts.retain(|t| now - t.created_at < lifetime);
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
