//! Translates one [`Action`] into driver primitives and returns a fresh
//! observation.

use crate::action::{Action, MouseButton, Point};
use crate::driver::PageDriver;
use crate::keys;
use crate::observation::{self, Observation};
use crate::session::BrowserSession;
use cua_core::{CancellationToken, CuaError, Result};
use cua_telemetry::dispatch_span;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout_at;
use tracing::Instrument;

/// Executes actions against the shared session, one at a time.
#[derive(Clone)]
pub struct Dispatcher {
    session: Arc<BrowserSession>,
}

impl Dispatcher {
    pub fn new(session: Arc<BrowserSession>) -> Self {
        Self { session }
    }

    /// Run `action` then capture the viewport.
    ///
    /// The session lock is held across the action and its capture. The whole
    /// call is bounded by the configured action timeout. An action that fails
    /// or runs out of time releases any input it left held before the lock is
    /// given up, and returns no observation.
    pub async fn dispatch(&self, action: Action, cancel: &CancellationToken) -> Result<Observation> {
        let kind = action.kind();
        let started = Instant::now();

        let result = self.run(&action, cancel).instrument(dispatch_span(kind)).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(observation) => {
                tracing::info!(kind, elapsed_ms, bytes = observation.len(), "action dispatched")
            }
            Err(e) => tracing::warn!(kind, elapsed_ms, error = %e, "action failed"),
        }
        result
    }

    async fn run(&self, action: &Action, cancel: &CancellationToken) -> Result<Observation> {
        let limit = self.session.config().action_timeout_duration();
        let deadline = tokio::time::Instant::now() + limit;

        let mut page = timeout_at(deadline, self.session.lock())
            .await
            .map_err(|_| CuaError::Timeout(limit))??;

        let performed = match timeout_at(deadline, self.perform(&mut *page, action, cancel)).await {
            Ok(result) => result,
            Err(_) => Err(CuaError::Timeout(limit)),
        };
        if let Err(e) = performed {
            if let Err(release) = page.release_all().await {
                tracing::warn!(error = %release, "failed to release held input");
            }
            return Err(e);
        }

        timeout_at(deadline, observation::capture(&mut *page))
            .await
            .map_err(|_| CuaError::Timeout(limit))?
    }

    async fn perform(
        &self,
        page: &mut dyn PageDriver,
        action: &Action,
        cancel: &CancellationToken,
    ) -> Result<()> {
        match action {
            Action::Click { x, y, button } => page.click(*x, *y, *button).await,
            Action::DoubleClick { x, y } => page.double_click(*x, *y).await,
            Action::Drag { path } => drag(page, path).await,
            Action::Keypress { keys } => keypress(page, keys).await,
            Action::Move { x, y } => page.mouse_move(*x, *y).await,
            Action::Screenshot {} => Ok(()),
            Action::Scroll { x, y, scroll_x, scroll_y } => {
                page.mouse_move(*x, *y).await?;
                page.evaluate(&format!("window.scrollBy({scroll_x}, {scroll_y})")).await?;
                Ok(())
            }
            Action::Type { text } => page.type_text(text).await,
            Action::Wait { duration_ms } => self.wait(*duration_ms, cancel).await,
        }
    }

    async fn wait(&self, duration_ms: Option<u64>, cancel: &CancellationToken) -> Result<()> {
        let config = self.session.config();
        let requested = duration_ms.map(Duration::from_millis).unwrap_or(config.wait_duration());
        let duration = requested.min(config.max_wait_duration());
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(CuaError::Cancelled),
            _ = tokio::time::sleep(duration) => Ok(()),
        }
    }
}

async fn drag(page: &mut dyn PageDriver, path: &[Point]) -> Result<()> {
    let Some((first, rest)) = path.split_first() else {
        return Ok(());
    };
    page.mouse_move(first.x, first.y).await?;
    page.mouse_down(MouseButton::Left).await?;
    for point in rest {
        page.mouse_move(point.x, point.y).await?;
    }
    page.mouse_up(MouseButton::Left).await
}

/// Press every key in order, then release in reverse order.
async fn keypress(page: &mut dyn PageDriver, keys: &[String]) -> Result<()> {
    let mapped = keys::map_keys(keys);
    for key in &mapped {
        page.key_down(key).await?;
    }
    for key in mapped.iter().rev() {
        page.key_up(key).await?;
    }
    Ok(())
}
