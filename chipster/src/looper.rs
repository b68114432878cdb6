use std::{thread, time};

use super::Result;

pub enum Step {
    Cont,
    Done,
}

/// Calls `f` once per frame until it returns `Step::Done` or an error.
pub fn start_loop<F>(frame_interval: time::Duration, mut f: F) -> Result<()>
where
    F: FnMut() -> Result<Step>,
{
    loop {
        let frame_start = time::Instant::now();

        match f()? {
            Step::Cont => {
                if let Some(delay) = frame_interval.checked_sub(frame_start.elapsed()) {
                    thread::sleep(delay)
                }
            }
            Step::Done => return Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_until_done() {
        let mut frames = 0;
        start_loop(time::Duration::from_millis(0), || {
            frames += 1;
            Ok(if frames == 3 { Step::Done } else { Step::Cont })
        })
        .unwrap();
        assert_eq!(frames, 3);
    }

    #[test]
    fn stops_on_error() {
        let result = start_loop(time::Duration::from_millis(0), || Err("boom".into()));
        assert!(result.is_err());
    }
}
