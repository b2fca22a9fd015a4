use crate::session::Screen;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhotoSlot {
    Frontal,
    Side,
}

impl PhotoSlot {
    pub fn label(self) -> &'static str {
        match self {
            Self::Frontal => "Foto Frontal",
            Self::Side => "Foto de Perfil",
        }
    }

    pub fn instruction(self) -> &'static str {
        match self {
            Self::Frontal => "Olhe diretamente para a câmera, sem sorrir.",
            Self::Side => "Mostre o lado do seu rosto, com o cabelo para trás.",
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Frontal => "frontal",
            Self::Side => "side",
        }
    }
}

/// What a screen asks the app to do. Screens only emit these; the app applies
/// them after the frame is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ShowLogin,
    ShowRegister,
    Login {
        email: String,
        password: String,
    },
    Register {
        name: String,
        email: String,
        password: String,
    },
    Navigate(Screen),
    StartUpload,
    PickPhoto {
        slot: PhotoSlot,
        path: PathBuf,
    },
    BeginAnalysis,
    ViewHistoryItem(String),
    RequestClearHistory,
    RequestLogout,
    ResolveConfirmation(bool),
}

/// Assigns dropped files to photo slots. Two or more files fill frontal then
/// side; a single file goes to side only when frontal is the one already set.
pub fn assign_dropped_files(
    files: Vec<PathBuf>,
    frontal_filled: bool,
    side_filled: bool,
) -> Vec<(PhotoSlot, PathBuf)> {
    if files.len() >= 2 {
        return [PhotoSlot::Frontal, PhotoSlot::Side]
            .into_iter()
            .zip(files)
            .collect();
    }

    let slot = if frontal_filled && !side_filled {
        PhotoSlot::Side
    } else {
        PhotoSlot::Frontal
    };
    files.into_iter().map(|path| (slot, path)).collect()
}
