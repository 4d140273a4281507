//! Drag-and-drop ingestion
//!
//! The whole document is the drop target. Only the first dropped file is
//! considered, and only if its content type says video.

use crate::{
    config::DropCue,
    host::{LocalFiles, Surface},
    media::MediaLoader,
    types::{is_video_mime, DropOutcome, Selection},
    Error,
};
use std::rc::Rc;
use tracing::{debug, info};

pub struct DropZone<L: LocalFiles> {
    loader: Rc<MediaLoader<L>>,
    surface: Rc<dyn Surface>,
    cue: DropCue,
}

impl<L: LocalFiles> DropZone<L> {
    pub fn new(loader: Rc<MediaLoader<L>>, surface: Rc<dyn Surface>, cue: DropCue) -> Self {
        Self {
            loader,
            surface,
            cue,
        }
    }

    /// Drag entered or is over the document
    pub fn drag_over(&self) {
        self.surface.show_drop_cue(&self.cue);
    }

    pub fn drag_leave(&self) {
        self.surface.clear_drop_cue();
    }

    /// Files dropped on the document
    pub async fn drop_files(&self, files: Vec<L::File>) -> DropOutcome {
        self.surface.clear_drop_cue();

        let Some(file) = files.into_iter().next() else {
            debug!("Drop carried no files");
            return DropOutcome::Empty;
        };

        let mime = self.loader.files().content_type(&file);
        if !is_video_mime(&mime) {
            let err = Error::NotVideo { mime: mime.clone() };
            info!(error = %err, "Dropped file is not a video");
            return DropOutcome::Rejected { mime };
        }

        match self.loader.load(Selection::File(file)).await {
            Ok(source) => DropOutcome::Loaded(source),
            Err(_) => DropOutcome::Failed,
        }
    }
}
