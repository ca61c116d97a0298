use std::sync::Arc;

use anyhow::{bail, Context};
use modq_core::codec;
use modq_engine::{
    write_atomic, Coordinator, PollMonitor, PresetStore, ReqwestTransport, TransportFacade,
};
use modq_logging::{modq_info, modq_warn};

use crate::cli::{BulkArgs, Command, PresetCommand, StatsArgs};
use crate::config::AppConfig;
use crate::navigator::TerminalNavigator;
use crate::output;

pub async fn run(command: Command, config: AppConfig) -> anyhow::Result<()> {
    match command {
        Command::List(args) => list(&config, &args.query).await,
        Command::Watch(args) => watch(&config, &args.query).await,
        Command::Bulk(args) => bulk(&config, &args).await,
        Command::Show { id } => show(&config, id).await,
        Command::Preset(command) => preset(&config, command).await,
        Command::Stats(args) => stats(&config, &args).await,
        Command::Whoami => whoami(&config).await,
    }
}

fn facade(config: &AppConfig) -> anyhow::Result<TransportFacade> {
    let transport = ReqwestTransport::new(&config.engine_settings())
        .with_context(|| format!("invalid API root {}", config.base_url))?;
    Ok(TransportFacade::new(Arc::new(transport)))
}

fn coordinator(
    config: &AppConfig,
    query: &str,
) -> anyhow::Result<(Coordinator, Arc<TerminalNavigator>)> {
    let settings = config.engine_settings();
    let navigator = Arc::new(TerminalNavigator::new(query));
    let coordinator = Coordinator::new(
        facade(config)?,
        navigator.clone(),
        PollMonitor::new(settings.poll_interval),
        settings.search_debounce,
    );
    Ok((coordinator, navigator))
}

async fn list(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let (coordinator, _) = coordinator(config, query)?;
    coordinator.mount(query);
    let view = coordinator.wait_until_idle().await;
    coordinator.unmount();

    if let Some(error) = view.error {
        bail!("loading ads failed: {error}");
    }
    output::print_page(&view);
    println!("query: ?{}", view.query);
    Ok(())
}

async fn watch(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let (coordinator, _) = coordinator(config, query)?;
    coordinator.mount(query);
    let view = coordinator.wait_until_idle().await;
    output::print_page(&view);

    coordinator.start_polling();
    modq_info!(
        "Watching for new ads every {}s, Ctrl-C to stop",
        config.poll_interval_secs
    );
    let mut views = coordinator.subscribe();
    let mut shown = view.new_items_count;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let count = views.borrow_and_update().new_items_count;
                if count != shown {
                    shown = count;
                    println!("{count} new ads since the page was loaded");
                }
            }
        }
    }

    coordinator.unmount();
    Ok(())
}

async fn bulk(config: &AppConfig, args: &BulkArgs) -> anyhow::Result<()> {
    let (coordinator, _) = coordinator(config, &args.query.query)?;
    coordinator.mount(&args.query.query);
    let view = coordinator.wait_until_idle().await;
    if let Some(error) = view.error {
        bail!("loading ads failed: {error}");
    }

    let visible = view.row_ids();
    for id in &args.ids {
        if visible.contains(id) {
            coordinator.toggle(*id);
        } else {
            modq_warn!("Ad {} is not on the current page, skipped", id);
        }
    }
    if coordinator.view().selected.is_empty() {
        bail!("none of the given ids are on the current page");
    }

    coordinator.run_bulk(args.action());
    let view = coordinator.wait_until_idle().await;
    coordinator.unmount();

    match view.last_bulk {
        Some(report) => output::print_report(&report),
        None => bail!("bulk action did not run"),
    }
    Ok(())
}

async fn show(config: &AppConfig, id: u64) -> anyhow::Result<()> {
    let ad = facade(config)?
        .get_by_id(id)
        .await
        .with_context(|| format!("loading ad {id} failed"))?;
    output::print_ad(&ad);
    Ok(())
}

async fn stats(config: &AppConfig, args: &StatsArgs) -> anyhow::Result<()> {
    let report = facade(config)?
        .stats_report(args.filter())
        .await
        .context("loading statistics failed")?;
    output::print_stats(&report);
    if let Some(path) = &args.csv {
        // Leading BOM so spreadsheet tools pick UTF-8.
        let body = format!("\u{feff}{}", output::stats_csv(&report));
        write_atomic(path, body.as_bytes())
            .with_context(|| format!("writing {} failed", path.display()))?;
        modq_info!("Statistics written to {}", path.display());
    }
    Ok(())
}

async fn whoami(config: &AppConfig) -> anyhow::Result<()> {
    let moderator = facade(config)?
        .current_moderator()
        .await
        .context("loading moderator profile failed")?;
    output::print_moderator(&moderator);
    Ok(())
}

async fn preset(config: &AppConfig, command: PresetCommand) -> anyhow::Result<()> {
    let mut store = PresetStore::open(&config.presets_path);
    match command {
        PresetCommand::Save { name, query } => {
            let preset = store.save(name, &codec::decode(&query.query))?;
            println!("saved preset {} ({})", preset.id, preset.name);
        }
        PresetCommand::List => {
            for preset in store.list() {
                println!(
                    "{}  {:<24} ?{}",
                    preset.id,
                    preset.name,
                    codec::to_query_string(&preset.filter)
                );
            }
        }
        PresetCommand::Delete { id } => {
            if !store.delete(&id)? {
                bail!("no preset with id {id}");
            }
            println!("deleted preset {id}");
        }
        PresetCommand::Apply { id } => {
            let Some(preset) = store.find(&id).cloned() else {
                bail!("no preset named or with id {id}");
            };
            let (coordinator, navigator) = coordinator(config, "")?;
            coordinator.mount("");
            coordinator.apply_preset(preset.filter);
            let view = coordinator.wait_until_idle().await;
            coordinator.unmount();

            if let Some(error) = view.error {
                bail!("loading ads failed: {error}");
            }
            output::print_page(&view);
            println!("query: ?{}", navigator.current());
        }
    }
    Ok(())
}
