//! Async driver for a [`WorkflowPlayer`].
//!
//! The player itself only knows a virtual millisecond clock. The runtime
//! owns the player inside a single tokio task, maps that clock onto
//! `tokio::time::Instant` (scaled by `speed`), and fires timers when their
//! real deadline passes. Hosts talk to it with [`Op`]s and watch the
//! [`Event`] stream.

use crate::player::{ResetOptions, WorkflowPlayer};
use anyhow::{ensure, Result};
use ap_protocol::ipc::{Event, Op};
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

/// Owns a player and drives its clock in real time.
pub struct PlayerRuntime {
    player: WorkflowPlayer,
    events_tx: UnboundedSender<Event>,
    speed: f64,
    started: Instant,
}

impl PlayerRuntime {
    /// Wrap `player`, publishing its events on `events_tx`.
    ///
    /// `speed` scales playback: `2.0` plays twice as fast.
    ///
    /// # Errors
    ///
    /// Returns an error if `speed` is not a positive finite number.
    pub fn new(
        player: WorkflowPlayer,
        events_tx: UnboundedSender<Event>,
        speed: f64,
    ) -> Result<Self> {
        ensure!(
            speed.is_finite() && speed > 0.0,
            "playback speed must be positive, got {speed}"
        );

        Ok(Self {
            player: player.with_events(events_tx.clone()),
            events_tx,
            speed,
            started: Instant::now(),
        })
    }

    /// Process operations until [`Op::Shutdown`] arrives or every sender
    /// of `op_rx` is dropped. Pending timers are cancelled on exit.
    pub async fn run(mut self, mut op_rx: UnboundedReceiver<Op>) -> Result<()> {
        self.started = Instant::now();
        self.send_snapshot();
        info!(workflow = %self.player.workflow().name, speed = self.speed, "runtime started");

        loop {
            let deadline = self
                .player
                .next_deadline()
                .map(|due| self.instant_for(due));

            tokio::select! {
                op = op_rx.recv() => {
                    let Some(op) = op else {
                        debug!("op channel closed");
                        break;
                    };
                    if !self.handle_op(op) {
                        break;
                    }
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.catch_up();
                }
            }
        }

        let cancelled = self.player.pending_timers();
        if cancelled > 0 {
            self.player.reset(ResetOptions::default());
        }
        info!(cancelled, "runtime stopped");
        Ok(())
    }

    /// Returns `false` when the runtime should stop.
    fn handle_op(&mut self, op: Op) -> bool {
        debug!(?op, "handling op");
        match op {
            Op::Run => {
                self.sync_clock();
                self.player.run();
            }
            Op::Reset => {
                self.sync_clock();
                self.player.reset(ResetOptions::default());
            }
            Op::GetSnapshot => self.send_snapshot(),
            Op::Shutdown => return false,
        }
        true
    }

    /// Fire everything that is due by now.
    ///
    /// Woken by the deadline of the next timer, the clock is moved at least
    /// to that deadline so rounding can never leave it just short.
    fn catch_up(&mut self) {
        let target = match self.player.next_deadline() {
            Some(due) => self.virtual_now().max(due),
            None => self.virtual_now(),
        };
        self.player.advance_to(target);
    }

    /// Move the player clock to real elapsed time without skipping past
    /// any timer that has not fired yet.
    fn sync_clock(&mut self) {
        self.player.advance_to(self.virtual_now());
    }

    fn virtual_now(&self) -> u64 {
        let elapsed = self.started.elapsed().as_secs_f64() * 1000.0 * self.speed;
        (elapsed.floor() as u64).max(self.player.now())
    }

    fn instant_for(&self, due: u64) -> Instant {
        self.started + Duration::from_secs_f64(due as f64 / 1000.0 / self.speed)
    }

    fn send_snapshot(&self) {
        let _ = self.events_tx.send(Event::Snapshot {
            snapshot: self.player.snapshot().clone(),
        });
    }
}
