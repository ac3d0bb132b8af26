//! Background booking expiry sweep
//!
//! Lazy read-time expiry already keeps every surfaced booking honest; the
//! sweep exists so bookings nobody reads still settle to failed eventually.
//! It runs the exact same reconciliation as the read paths.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use super::reservation::ReservationService;

/// Periodic sweep over all pending bookings
pub struct ExpirySweep {
    reservations: Arc<ReservationService>,
    interval_secs: u64,
}

impl ExpirySweep {
    pub fn new(reservations: Arc<ReservationService>, interval_secs: u64) -> Self {
        Self {
            reservations,
            interval_secs,
        }
    }

    /// Spawn the sweep loop. Stops when `shutdown` is notified.
    pub fn start(self, shutdown: Arc<Notify>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                "Booking expiry sweep started (interval: {}s)",
                self.interval_secs
            );

            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            // the first tick fires immediately; skip it
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        match self.reservations.reconcile_pending().await {
                            Ok(0) => {}
                            Ok(n) => info!("Expiry sweep marked {} bookings failed", n),
                            Err(e) => warn!("Expiry sweep error: {}", e),
                        }
                    }
                    _ = shutdown.notified() => {
                        info!("Booking expiry sweep shutting down");
                        break;
                    }
                }
            }
        })
    }
}
