use shiftselect_backend::{
    clock::SystemClock, config::Config, panel::ShiftPanel, realtime, store::MemoryStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (dev convenience)
    let _ = dotenvy::dotenv();

    // Tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Config::from_env()?;

    let clock = SystemClock::new(cfg.timezone);
    let timezone = clock.timezone();
    let mut panel = ShiftPanel::new(cfg.panel, MemoryStore::new(), clock);
    panel.load_mapping(&cfg.mapping)?;
    panel.set_date_part(cfg.date_part);

    if panel.options().is_auto_select_shift {
        let interval = panel.options().refresh_interval;
        tracing::info!("Tracking active shift every {} ({})", interval, timezone);

        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
        };

        realtime::run(&mut panel, interval, shutdown, |update| {
            tracing::info!(
                from = update.from,
                to = update.to,
                uuid = ?update.uuid,
                "Time range update"
            );
        })
        .await?;

        return Ok(());
    }

    if let Some(date) = cfg.production_date {
        panel.set_production_date(date);
    }
    tracing::info!(
        date_part = %panel.date_part(),
        "Resolving shifts for {} ({})",
        panel.production_date().date(),
        timezone
    );

    for (group, shifts) in panel.shifts()? {
        for shift in shifts {
            tracing::info!(
                group = %group,
                group_name = %shift.shift.shift_group_name,
                label = %shift.shift.label,
                start = %shift.start_date,
                end = %shift.end_date,
                active = shift.is_active,
                "Shift"
            );
        }
    }

    Ok(())
}
