//! Background jobs
//!
//! Two independent periodic tasks share the service context: a frequent
//! lifecycle sweep (promotion + hard expiry) and a coarser maintenance pass
//! (duplicate cleanup + channel stats). Both passes are idempotent, so the
//! schedules may overlap with on-demand invocations through the API.

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::services::{
    ChannelStatsService, DuplicationService, LifecycleService, ServiceContext,
};

/// Handles to the spawned periodic tasks
pub struct BackgroundJobs {
    pub sweep: JoinHandle<()>,
    pub maintenance: JoinHandle<()>,
}

impl BackgroundJobs {
    /// Abort both tasks (shutdown)
    pub fn abort(&self) {
        self.sweep.abort();
        self.maintenance.abort();
    }
}

/// Spawn the lifecycle sweep and maintenance loops
pub fn spawn_background_jobs(ctx: ServiceContext) -> BackgroundJobs {
    let sweep_ctx = ctx.clone();
    let sweep = tokio::spawn(async move {
        let mut interval = tokio::time::interval(sweep_ctx.lifecycle().sweep_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let service = LifecycleService::new(&sweep_ctx);
            match service.run_sweep().await {
                Ok(report) => {
                    debug!(
                        promoted = report.promoted,
                        expired_removed = report.expired_removed,
                        "sweep tick"
                    );
                }
                Err(e) => warn!(error = %e, "lifecycle sweep failed"),
            }
        }
    });

    let maintenance_ctx = ctx;
    let maintenance = tokio::spawn(async move {
        let mut interval = tokio::time::interval(maintenance_ctx.lifecycle().maintenance_interval());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick fires immediately; skip it so startup is not
        // dominated by a full-corpus scan
        interval.tick().await;

        loop {
            interval.tick().await;

            let dedup = DuplicationService::new(&maintenance_ctx);
            if let Err(e) = dedup.run_cleanup().await {
                warn!(error = %e, "duplicate cleanup failed");
            }

            let stats = ChannelStatsService::new(&maintenance_ctx);
            if let Err(e) = stats.recompute_all().await {
                warn!(error = %e, "channel stats recompute failed");
            }
        }
    });

    BackgroundJobs { sweep, maintenance }
}
