//! Command implementations

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::adapters::HeadlessMediaElement;
use crate::app::container::AppContainer;
use crate::app::edit_session::{EditSession, SaveCommand, SessionView};
use crate::cli::args::{OverlayArgs, ReplayArgs, ShowArgs, TrimArgs};
use crate::cli::script::{run_script, ReplayScript};
use crate::domain::model::{AspectPreset, BoxSize, OverlayRect};
use crate::domain::rules::OverlayCalculator;
use crate::engine::{PlaybackStatus, SaveResolution};

/// Open a clip and let its media finish loading
async fn open_loaded(
    container: &dyn AppContainer,
    clip_id: &str,
) -> Result<(EditSession, Arc<HeadlessMediaElement>)> {
    let media = container.media_element();
    let mut session = container
        .open_session_interactor()
        .open(clip_id, media.clone())
        .await
        .with_context(|| format!("Failed to open clip {}", clip_id))?;

    for event in media.finish_load() {
        session
            .on_media(event)
            .with_context(|| format!("Media for clip {} is unavailable", clip_id))?;
    }
    if session.playback_status() != &PlaybackStatus::Ready {
        bail!("Media for clip {} did not load", clip_id);
    }
    Ok((session, media))
}

fn print_view(view: &SessionView) {
    println!("{} ({})", view.name, view.clip_id);
    println!(
        "  range:    {} - {} of {}",
        view.readout.start, view.readout.end, view.readout.duration
    );
    println!("  aspect:   {}", view.aspect_label);
    println!("  download: {}", view.download_name);
    println!(
        "  track:    selection at {:.1}px, {:.1}px wide",
        view.layout.selection_left, view.layout.selection_width
    );
}

/// Execute the show command
pub async fn show(container: &dyn AppContainer, args: ShowArgs) -> Result<()> {
    let (session, _media) = open_loaded(container, &args.clip).await?;
    let view = session.view();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_view(&view);
    }
    Ok(())
}

/// Execute the trim command
pub async fn trim(container: &dyn AppContainer, args: TrimArgs) -> Result<()> {
    info!("Starting trim operation");
    let (mut session, _media) = open_loaded(container, &args.clip).await?;

    session
        .edit_start_field(&args.start)
        .with_context(|| format!("Invalid start time '{}'", args.start))?;
    session
        .edit_end_field(&args.end)
        .with_context(|| format!("Invalid end time '{}'", args.end))?;
    if let Some(aspect) = args.aspect {
        session.set_aspect(aspect)?;
    }

    let range = session.snapshot();
    info!(start = range.start, end = range.end, "Selection ready");

    session.commit(SaveCommand::Open).await?;
    let resolution = match &args.name {
        Some(name) => {
            session.commit(SaveCommand::SaveAsNew).await?;
            session
                .commit(SaveCommand::SetName { name: name.clone() })
                .await?;
            session.commit(SaveCommand::SubmitName).await?
        }
        None => session.commit(SaveCommand::Overwrite).await?,
    };

    match &resolution {
        Some(SaveResolution::Succeeded { name, .. }) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&resolution)?);
            } else {
                let readout = session.readout();
                println!("Saved {} ({} - {})", name, readout.start, readout.end);
            }
            Ok(())
        }
        Some(SaveResolution::Failed { message, .. }) => {
            warn!(%message, "Trim was not saved");
            bail!("{}", message)
        }
        Some(SaveResolution::Discarded) | None => bail!("Trim was not submitted"),
    }
}

/// Execute the replay command
pub async fn replay(container: &dyn AppContainer, args: ReplayArgs) -> Result<()> {
    let script = ReplayScript::load(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;

    let media = container.media_element();
    let mut session = container
        .open_session_interactor()
        .open(&args.clip, media.clone())
        .await
        .with_context(|| format!("Failed to open clip {}", args.clip))?;

    let report = run_script(&mut session, &media, &script).await;
    info!(steps = report.steps.len(), "Replay finished");
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Execute the overlay command
pub fn overlay(args: OverlayArgs) -> Result<()> {
    let frame = BoxSize::new(args.width, args.height);
    let finite = args.width.is_finite() && args.height.is_finite();
    if !finite || args.width < 0.0 || args.height < 0.0 {
        bail!("Frame size must be non-negative, got {}x{}", args.width, args.height);
    }

    let presets: Vec<AspectPreset> = match args.aspect {
        Some(preset) => vec![preset],
        None => AspectPreset::ALL.to_vec(),
    };
    let overlays: Vec<(AspectPreset, OverlayRect)> = presets
        .into_iter()
        .map(|preset| (preset, OverlayCalculator::overlay_for(frame, preset)))
        .collect();

    if args.json {
        let entries: Vec<serde_json::Value> = overlays
            .iter()
            .map(|(preset, rect)| {
                serde_json::json!({
                    "aspect": preset,
                    "native": preset.is_native(),
                    "overlay": rect,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (preset, rect) in &overlays {
            println!(
                "{:<16} left={:.1} top={:.1} width={:.1} height={:.1}",
                preset.label(),
                rect.left,
                rect.top,
                rect.width,
                rect.height
            );
        }
    }
    Ok(())
}
