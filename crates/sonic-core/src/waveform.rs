//! Synthetic waveform samples
//!
//! No audio is decoded anywhere in the studio. Stem and master waveforms are
//! a smoothed random walk that only has to look plausible as a bar chart.

use crate::random::RandomSource;
use crate::stem::Stem;
use crate::types::UNITY_VOLUME;

/// Default number of bars per waveform
pub const DEFAULT_WAVEFORM_LEN: usize = 200;

/// Lowest generated amplitude
pub const MIN_SAMPLE: f32 = 0.1;

/// Highest generated amplitude
pub const MAX_SAMPLE: f32 = 1.0;

/// Generate `len` normalized amplitudes in `[0.1, 1.0]`
///
/// Starts at 0.5 and walks with uniform noise of ±0.15 plus a slow sine
/// drift; each step is clamped, then blended 70/30 with the previous value.
/// The blended value is both stored and carried to the next step.
pub fn generate_waveform<R: RandomSource + ?Sized>(rng: &mut R, len: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(len);
    let mut prev = 0.5_f64;

    for i in 0..len {
        let noise = (rng.next_unit() - 0.5) * 0.3;
        let wave = (i as f64 * 0.1).sin() * 0.2;
        let value = (prev + noise + wave * 0.1).clamp(MIN_SAMPLE as f64, MAX_SAMPLE as f64);
        prev = value * 0.7 + prev * 0.3;
        data.push(prev as f32);
    }

    data
}

/// Mix stem waveforms into a master waveform
///
/// Each bar is the volume-weighted sum of the unmuted stems divided by the
/// total stem count, so muting a stem lowers the master rather than
/// re-normalizing it. The output length follows the first stem; shorter
/// stems contribute nothing past their end.
pub fn mix_master_waveform(stems: &[Stem]) -> Vec<f32> {
    let Some(first) = stems.first() else {
        return Vec::new();
    };
    let count = stems.len() as f32;

    (0..first.waveform.len())
        .map(|i| {
            let sum: f32 = stems
                .iter()
                .filter(|stem| !stem.muted)
                .map(|stem| {
                    stem.waveform.get(i).copied().unwrap_or(0.0) * (stem.volume / UNITY_VOLUME)
                })
                .sum();
            sum / count
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedSequence;
    use crate::types::StemKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_requested_length_is_exact() {
        let mut rng = StdRng::seed_from_u64(1);
        let data = generate_waveform(&mut rng, 5);
        assert_eq!(data.len(), 5);
        assert!(data.iter().all(|v| (MIN_SAMPLE..=MAX_SAMPLE).contains(v)));
    }

    #[test]
    fn test_samples_stay_in_bounds() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let data = generate_waveform(&mut rng, DEFAULT_WAVEFORM_LEN);
            assert_eq!(data.len(), DEFAULT_WAVEFORM_LEN);
            for v in data {
                assert!((MIN_SAMPLE..=MAX_SAMPLE).contains(&v), "sample {v} out of range");
            }
        }
    }

    #[test]
    fn test_extreme_noise_is_clamped() {
        let mut low = FixedSequence::constant(0.0);
        let mut high = FixedSequence::constant(0.999);
        assert!(generate_waveform(&mut low, 300).iter().all(|v| *v >= MIN_SAMPLE));
        assert!(generate_waveform(&mut high, 300).iter().all(|v| *v <= MAX_SAMPLE));
    }

    #[test]
    fn test_zero_length() {
        let mut rng = FixedSequence::constant(0.5);
        assert!(generate_waveform(&mut rng, 0).is_empty());
        assert_eq!(rng.draws(), 0);
    }

    fn stem_with(waveform: Vec<f32>, volume: f32, muted: bool) -> Stem {
        let mut stem = Stem::new("s", "S", StemKind::Drums, "#fff");
        stem.waveform = waveform;
        stem.volume = volume;
        stem.muted = muted;
        stem
    }

    #[test]
    fn test_master_mix_weights_and_mutes() {
        let stems = vec![
            stem_with(vec![1.0, 0.5], 100.0, false),
            stem_with(vec![1.0, 1.0], 50.0, false),
            stem_with(vec![1.0, 1.0], 100.0, true),
            stem_with(vec![0.0, 0.0], 100.0, false),
        ];
        let master = mix_master_waveform(&stems);
        assert_eq!(master.len(), 2);
        assert!((master[0] - 1.5 / 4.0).abs() < 1e-6);
        assert!((master[1] - 1.0 / 4.0).abs() < 1e-6);
        assert!(mix_master_waveform(&[]).is_empty());
    }
}
