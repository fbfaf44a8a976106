//! Typewriter key sounds.
//!
//! Short sine blips played on keystrokes when sound mode is on. Audio is
//! strictly optional: if no output device exists the app stays silent and
//! logs once.

use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use std::time::Duration;

const SAMPLE_RATE: u32 = 44100;
const BLIP_MS: u32 = 30;

/// Blip pitches: regular keys, space, and return.
const KEY_FREQ: f32 = 440.0;
const SPACE_FREQ: f32 = 220.0;
const RETURN_FREQ: f32 = 110.0;

/// A short enveloped sine blip.
struct Blip {
    freq: f32,
    num_samples: usize,
    current_sample: usize,
}

impl Blip {
    fn new(freq: f32, duration_ms: u32) -> Self {
        Self {
            freq,
            num_samples: (SAMPLE_RATE * duration_ms / 1000) as usize,
            current_sample: 0,
        }
    }
}

impl Source for Blip {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_millis(
            (self.num_samples as u64 * 1000) / SAMPLE_RATE as u64,
        ))
    }
}

impl Iterator for Blip {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_sample >= self.num_samples {
            return None;
        }
        let t = self.current_sample as f32 / SAMPLE_RATE as f32;
        self.current_sample += 1;

        // Attack/decay envelope to avoid clicks.
        let edge = 200usize;
        let envelope = if self.current_sample < edge {
            self.current_sample as f32 / edge as f32
        } else if self.current_sample + edge > self.num_samples {
            (self.num_samples - self.current_sample) as f32 / edge as f32
        } else {
            1.0
        };

        Some((t * self.freq * 2.0 * std::f32::consts::PI).sin() * 0.2 * envelope)
    }
}

pub struct TypingSound {
    _stream: Option<OutputStream>,
    handle: Option<OutputStreamHandle>,
}

impl TypingSound {
    pub fn new() -> Self {
        let (stream, handle) = match OutputStream::try_default() {
            Ok((s, h)) => (Some(s), Some(h)),
            Err(err) => {
                log::warn!("no audio output, typing sounds disabled: {err}");
                (None, None)
            }
        };
        TypingSound {
            _stream: stream,
            handle,
        }
    }

    fn play(&self, freq: f32) {
        if let Some(handle) = &self.handle {
            if let Ok(sink) = Sink::try_new(handle) {
                sink.set_volume(0.3);
                sink.append(Blip::new(freq, BLIP_MS));
                sink.detach();
            }
        }
    }

    pub fn key(&self) {
        self.play(KEY_FREQ);
    }

    pub fn space(&self) {
        self.play(SPACE_FREQ);
    }

    pub fn newline(&self) {
        self.play(RETURN_FREQ);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blip_envelope_stays_bounded() {
        let samples: Vec<f32> = Blip::new(440.0, 30).collect();
        assert_eq!(samples.len(), (SAMPLE_RATE * 30 / 1000) as usize);
        assert!(samples.iter().all(|s| s.abs() <= 0.2 + f32::EPSILON));
        // Starts and ends near silence.
        assert!(samples[0].abs() < 0.01);
        assert!(samples.last().unwrap().abs() < 0.01);
    }
}
