//! History command handlers

use colored::*;
use tokio::sync::mpsc::UnboundedReceiver;
use vine_console::{Notice, SchedulerController};
use vine_core::domain::history::HistoryFilter;

use super::drain_notices;
use crate::render;

/// Select `filter` and display the resulting page
pub async fn show_history(
    controller: &SchedulerController,
    notices: &mut UnboundedReceiver<Notice>,
    filter: HistoryFilter,
) -> bool {
    let ok = controller.set_filter(filter).await.is_ok();
    drain_notices(notices);

    if let Some(page) = controller.snapshot().history {
        render::print_history(&page);
        if page.is_empty() && !page.is_in_range() && page.total_pages > 0 {
            println!(
                "{}",
                format!(
                    "Page {} is past the last page ({}).",
                    filter.page, page.total_pages
                )
                .yellow()
            );
        }
    }
    ok
}

/// Display the most recent executions
pub async fn show_latest(
    controller: &SchedulerController,
    notices: &mut UnboundedReceiver<Notice>,
    limit: u32,
) -> bool {
    let result = controller.latest(limit).await;
    drain_notices(notices);

    match result {
        Ok(page) => {
            render::print_executions(&page.items);
            true
        }
        Err(_) => false,
    }
}
