//! completion.rs
//!
//! Фоновое закрытие прошедших броней: подтверждённые брони с датой раньше
//! сегодняшней переходят в `Completed` и перестают считаться активными.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::AppState;

pub struct CompletionService {
    state: Arc<AppState>,
}

impl CompletionService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Один проход. Возвращает число закрытых броней.
    pub async fn run_once(&self) -> usize {
        let mut store = self.state.store.write().await;
        let completed = store.complete_past_bookings();
        if completed == 0 {
            debug!("🎫 No past bookings to complete");
        } else {
            info!("🎫 Completed {} past bookings", completed);
        }
        completed
    }

    /// Запускает бесконечный цикл с интервалом из конфигурации.
    pub fn spawn(self) -> JoinHandle<()> {
        let interval = Duration::from_secs(self.state.config.booking.completion_interval_seconds.max(1));
        tokio::spawn(async move {
            loop {
                self.run_once().await;
                tokio::time::sleep(interval).await;
            }
        })
    }
}
