use crate::session::AnalysisOutcome;
use crate::ui::intent::PhotoSlot;
use eframe::egui::ColorImage;

/// Results of background work, delivered to the UI thread.
#[derive(Clone)]
pub enum AppEvent {
    PhotoEncoded {
        slot: PhotoSlot,
        request: u64,
        result: Result<String, String>,
    },
    PreviewDecoded {
        key: String,
        result: Result<ColorImage, String>,
    },
    AnalysisFinished(AnalysisOutcome),
}
