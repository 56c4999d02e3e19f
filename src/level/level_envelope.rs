/// A running peak that jumps up instantly and falls away slowly
///
/// Values under `floor` snap straight to zero so the meter settles instead of
/// crawling through denormals.
#[derive(Clone, Copy, Debug)]
pub struct LevelEnvelope {
    value: f32,
    decay: f32,
    floor: f32,
}

impl LevelEnvelope {
    pub fn new(decay: f32, floor: f32) -> Self {
        debug_assert!(decay > 0.0 && decay < 1.0);
        debug_assert!((0.0..1.0).contains(&floor));

        Self {
            value: 0.0,
            decay,
            floor,
        }
    }

    pub fn with_value(self, value: f32) -> Self {
        Self { value, ..self }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    pub fn process(&mut self, sample: f32) -> f32 {
        let magnitude = sample.abs();

        if magnitude > self.value {
            self.value = magnitude;
        } else if self.value > self.floor {
            self.value *= self.decay;
        } else {
            self.value = 0.0;
        }

        self.value
    }

    pub fn process_samples(&mut self, samples: &[f32]) -> f32 {
        for sample in samples {
            self.process(*sample);
        }

        self.value
    }
}
