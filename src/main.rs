use anyhow::Result;
use tapenote::desktop::{CpalPlayer, CpalRecorder, DesktopPermission, FileStore};
use tapenote::ui::TapenoteApp;
use tapenote::{
    MemoController, PermissionGate, PlaybackService, RecorderConfig, RecordingSession,
    RecordingStore,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tapenote=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Tapenote voice memos");

    let permission = PermissionGate::new(Box::new(DesktopPermission));
    let session = RecordingSession::new(Box::new(CpalRecorder::new()?), RecorderConfig::wav());
    let store = RecordingStore::load(Box::new(FileStore::new()?));
    let playback = PlaybackService::new(Box::new(CpalPlayer::new()));

    let controller = MemoController::new(permission, session, store, playback);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 680.0])
            .with_min_inner_size([320.0, 480.0])
            .with_title("Tapenote"),
        ..Default::default()
    };

    eframe::run_native(
        "Tapenote",
        options,
        Box::new(|cc| Ok(Box::new(TapenoteApp::new(cc, controller)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start UI: {e}"))
}
