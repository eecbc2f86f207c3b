use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use eframe::egui;
use image::RgbaImage;

use tg_ocr::{extract_outcome, OcrOutcome, OcrRequest, TesseractEngine};
use tg_platform::Speech;
use tg_platform_native::Narrator;

/// Completion event posted back from a background job thread.
#[derive(Debug)]
pub enum JobEvent {
    OcrFinished { outcome: OcrOutcome },
    SpeechFinished { error: Option<String> },
}

/// Spawns job threads and collects their completion events.
///
/// The UI drains the channel once per frame; each job requests a repaint on
/// completion so results appear without further input.
pub struct JobRunner {
    tx: Sender<JobEvent>,
    rx: Receiver<JobEvent>,
}

impl JobRunner {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { tx, rx }
    }

    pub fn drain(&self) -> Vec<JobEvent> {
        self.rx.try_iter().collect()
    }

    pub fn spawn_ocr(
        &self,
        engine: Arc<TesseractEngine>,
        image: RgbaImage,
        request: OcrRequest,
        ctx: egui::Context,
    ) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            let outcome = extract_outcome(&*engine, &image, &request);
            let _ = tx.send(JobEvent::OcrFinished { outcome });
            ctx.request_repaint();
        });
    }

    pub fn spawn_speech(&self, text: String, ctx: egui::Context) {
        let tx = self.tx.clone();
        thread::spawn(move || {
            // The synthesizer is created on the job thread; it is not shared
            // with the UI and lives for exactly one utterance.
            let error = match Narrator::new() {
                Ok(mut narrator) => narrator.speak(&text).err().map(|e| e.to_string()),
                Err(err) => Some(err.to_string()),
            };
            let _ = tx.send(JobEvent::SpeechFinished { error });
            ctx.request_repaint();
        });
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
