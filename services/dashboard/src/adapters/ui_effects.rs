//! services/dashboard/src/adapters/ui_effects.rs
//!
//! Collects notifications and navigations raised while handling one REST
//! request so they can be returned in the response body.

use legalvision_core::ports::{Navigator, Notification, Notifier, Severity};
use serde::Serialize;
use std::sync::Mutex;
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UiEffect {
    Notify {
        title: String,
        description: String,
        /// `default` or `destructive`.
        severity: String,
    },
    Navigate {
        path: String,
    },
}

#[derive(Default)]
pub struct EffectRecorder {
    effects: Mutex<Vec<UiEffect>>,
}

impl EffectRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, effect: UiEffect) {
        self.effects
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(effect);
    }

    /// Takes every effect recorded so far, in order.
    pub fn drain(&self) -> Vec<UiEffect> {
        std::mem::take(
            &mut *self
                .effects
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl Notifier for EffectRecorder {
    fn notify(&self, notification: Notification) {
        let severity = match notification.severity {
            Severity::Default => "default",
            Severity::Destructive => "destructive",
        };
        self.push(UiEffect::Notify {
            title: notification.title,
            description: notification.description,
            severity: severity.to_string(),
        });
    }
}

impl Navigator for EffectRecorder {
    fn navigate_to(&self, path: &str) {
        self.push(UiEffect::Navigate {
            path: path.to_string(),
        });
    }
}
