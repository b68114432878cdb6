/// Receives the tone produced when the sound timer runs out.
pub trait Beeper {
    fn beep(&mut self);
}

/// Reports tones through the log.
pub struct LogBeeper;

impl Beeper for LogBeeper {
    fn beep(&mut self) {
        info!("beep");
    }
}
