use std::thread;
use std::time::Duration;

use tg_platform::{ServicesError, Speech};

/// Speech synthesis backed by the `tts` crate.
///
/// `speak` waits for playback to finish, so one utterance maps to one call;
/// the host runs it on a background job thread.
pub struct Narrator {
    tts: tts::Tts,
}

impl Narrator {
    pub fn new() -> Result<Self, ServicesError> {
        tts::Tts::default()
            .map(|tts| Self { tts })
            .map_err(|e| ServicesError::Speech(e.to_string()))
    }
}

impl Speech for Narrator {
    fn speak(&mut self, text: &str) -> Result<(), ServicesError> {
        self.tts
            .speak(text, true)
            .map_err(|e| ServicesError::Speech(e.to_string()))?;

        // Give the backend a moment to start, then poll until playback ends.
        thread::sleep(Duration::from_millis(100));
        while self
            .tts
            .is_speaking()
            .map_err(|e| ServicesError::Speech(e.to_string()))?
        {
            thread::sleep(Duration::from_millis(100));
        }

        Ok(())
    }
}
