use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::Utc;

use export_lifecycle::backend::HttpExportsApi;
use export_lifecycle::config::Config;
use export_lifecycle::http_client::HttpClient;
use export_lifecycle::models::ExportMode;
use export_lifecycle::services::{
    ExportsController, Notification, NotificationLog, QueryState, Severity,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "\
Usage: export-lifecycle <command> [options]

Commands:
  list [--search TERM]        list exports, optionally filtered by name
  show ID                     print details and the playable URL of an export
  cameras                     list cameras available for new exports
  create --camera NAME [--start YYYY-MM-DDTHH:MM] [--end YYYY-MM-DDTHH:MM]
         [--name LABEL] [--timelapse]
                              start a new export (defaults to the last hour)
  rename ID NEW_NAME          rename an export
  delete ID --yes             delete an export
";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "export_lifecycle=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    }
    let Some(command) = args.subcommand()? else {
        print!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    };

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!("Using API at {}", config.api_url());

    let http_client = Arc::new(HttpClient::new(config.api_url(), config.http_timeout())?);
    let api = Arc::new(HttpExportsApi::new(http_client));
    let notifications = Arc::new(NotificationLog::new());
    let mut controller = ExportsController::new(
        api,
        notifications.clone(),
        Box::new(QueryState::new()),
        config,
    );
    controller.mount().await;

    let result = match command.as_str() {
        "list" => {
            let search: Option<String> = args.opt_value_from_str("--search")?;
            args_done(args)?;
            controller.set_search(search.unwrap_or_default());
            list(&controller)
        }
        "show" => {
            let id: String = args.free_from_str()?;
            args_done(args)?;
            show(&mut controller, &id)
        }
        "cameras" => {
            args_done(args)?;
            for camera in controller.camera_options() {
                println!("{}", camera);
            }
            Ok(())
        }
        "create" => {
            let camera: String = args.value_from_str("--camera")?;
            let start: Option<String> = args.opt_value_from_str("--start")?;
            let end: Option<String> = args.opt_value_from_str("--end")?;
            let name: Option<String> = args.opt_value_from_str("--name")?;
            let timelapse = args.contains("--timelapse");
            args_done(args)?;

            controller.open_create_dialog(Utc::now());
            let form = controller.create_form_mut();
            form.camera = camera;
            if let Some(start) = start {
                form.start_time = start;
            }
            if let Some(end) = end {
                form.end_time = end;
            }
            form.name = name.unwrap_or_default();
            if timelapse {
                form.mode = ExportMode::Timelapse25x;
            }
            controller.submit_create().await.map_err(Into::into)
        }
        "rename" => {
            let id: String = args.free_from_str()?;
            let new_name: String = args.free_from_str()?;
            args_done(args)?;
            controller.rename(&id, &new_name).await.map_err(Into::into)
        }
        "delete" => {
            let confirmed = args.contains("--yes");
            let id: String = args.free_from_str()?;
            args_done(args)?;
            delete(&mut controller, &id, confirmed).await
        }
        other => bail!("Unknown command: {}\n\n{}", other, USAGE),
    };

    let notes = notifications.drain();
    for note in &notes {
        match note.severity {
            Severity::Error => eprintln!("{}", note.message),
            Severity::Success => println!("{}", note.message),
        }
    }
    match finish(&notes, result)? {
        true => Ok(ExitCode::SUCCESS),
        false => Ok(ExitCode::FAILURE),
    }
}

/// Folds the command result with the notifications already printed.
///
/// A failure that produced an error notification has been shown once; it
/// becomes a plain failing exit instead of being printed again.
fn finish(notes: &[Notification], result: anyhow::Result<()>) -> anyhow::Result<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(_) if notes.iter().any(|n| n.severity == Severity::Error) => Ok(false),
        Err(e) => Err(e),
    }
}

fn args_done(args: pico_args::Arguments) -> anyhow::Result<()> {
    let rest = args.finish();
    if !rest.is_empty() {
        bail!("Unexpected arguments: {:?}", rest);
    }
    Ok(())
}

fn list(controller: &ExportsController) -> anyhow::Result<()> {
    let view = controller.view();
    if view.is_empty() {
        println!("No exports found");
        return Ok(());
    }
    for export in view.visible() {
        let status = if export.in_progress { " (in progress)" } else { "" };
        println!("{}\t{}\t{}{}", export.id, export.camera, export.display_name(), status);
    }
    Ok(())
}

fn show(controller: &mut ExportsController, id: &str) -> anyhow::Result<()> {
    if !controller.set_shared_selection(id) {
        bail!("Export list could not be loaded");
    }
    let Some(export) = controller.selection().selected() else {
        bail!("No export with id {}", id);
    };

    println!("Name:   {}", export.display_name());
    println!("Camera: {}", export.camera);
    println!("Video:  {}", controller.video_url(export));
    if let Some(thumb) = controller.thumbnail_url(export) {
        println!("Thumb:  {}", thumb);
    }
    println!("Link:   ?{}", controller.shared().to_query_string());
    Ok(())
}

async fn delete(controller: &mut ExportsController, id: &str, confirmed: bool) -> anyhow::Result<()> {
    if !controller.request_delete_by_id(id) {
        bail!("No export with id {}", id);
    }
    if !confirmed {
        if let Some(prompt) = controller.delete_workflow().confirmation_prompt() {
            println!("{} Re-run with --yes to confirm.", prompt);
        }
        controller.cancel_delete();
        return Ok(());
    }
    controller.confirm_delete().await?;
    println!("Deleted {}", id);
    Ok(())
}
