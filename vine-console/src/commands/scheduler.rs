//! Scheduler command handlers
//!
//! Status display, lifecycle commands and the live watch mode.

use colored::*;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time;
use vine_console::{Notice, STATUS_POLL_INTERVAL, SchedulerController};
use vine_core::dto::scheduler::SchedulerConfig;

use super::drain_notices;
use crate::render;

/// Read and display the scheduler status
pub async fn show_status(
    controller: &SchedulerController,
    notices: &mut UnboundedReceiver<Notice>,
) -> bool {
    let ok = controller.refresh_status().await.is_ok();
    drain_notices(notices);
    render::print_status(&controller.snapshot());
    ok
}

/// Start periodic runs
pub async fn start(
    controller: &SchedulerController,
    notices: &mut UnboundedReceiver<Notice>,
    interval: u32,
) -> bool {
    let ok = controller.start_scheduler(interval).await.is_ok();
    finish(controller, notices, ok)
}

/// Stop periodic runs
pub async fn stop(
    controller: &SchedulerController,
    notices: &mut UnboundedReceiver<Notice>,
) -> bool {
    let ok = controller.stop_scheduler().await.is_ok();
    finish(controller, notices, ok)
}

/// Update the scheduler configuration
pub async fn configure(
    controller: &SchedulerController,
    notices: &mut UnboundedReceiver<Notice>,
    config: SchedulerConfig,
) -> bool {
    let ok = controller.update_config(config).await.is_ok();
    finish(controller, notices, ok)
}

/// Trigger one execution and show the refreshed history
pub async fn run_now(
    controller: &SchedulerController,
    notices: &mut UnboundedReceiver<Notice>,
) -> bool {
    let ok = controller.run_now().await.is_ok();
    drain_notices(notices);

    if ok {
        let snapshot = controller.snapshot();
        render::print_status(&snapshot);
        if let Some(page) = &snapshot.history {
            println!();
            render::print_history(page);
        }
    }
    ok
}

/// Print notices, then the status a successful command left behind
fn finish(
    controller: &SchedulerController,
    notices: &mut UnboundedReceiver<Notice>,
    ok: bool,
) -> bool {
    drain_notices(notices);
    if ok {
        render::print_status(&controller.snapshot());
    }
    ok
}

/// Follow the scheduler status until Ctrl-C
pub async fn watch(mut controller: SchedulerController, mut notices: UnboundedReceiver<Notice>) {
    controller.start().await;
    drain_notices(&mut notices);
    render::print_status(&controller.snapshot());

    println!();
    println!("{}", "Watching scheduler status (Ctrl-C to stop)...".dimmed());

    let mut ticker = time::interval(STATUS_POLL_INTERVAL);
    // The first tick completes immediately; the status was just printed
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            Some(notice) = notices.recv() => render::print_notice(&notice),
            _ = ticker.tick() => render::print_status_line(&controller.snapshot()),
        }
    }

    println!();
    controller.shutdown();
}
