use crate::signal::{FlagPolicy, TrackSample};

/// Resample an irregular series to a fixed rate between its first and last sample.
///
/// Continuous channels are interpolated linearly between the bracketing samples, the flag
/// follows `policy`. Fewer than 2 input samples produce an empty output.
pub fn resample<S: TrackSample>(samples: &[S], hz: f64, policy: FlagPolicy) -> Vec<S> {
    if samples.len() < 2 || hz.is_nan() || hz <= 0.0 {
        return Vec::new();
    }

    let t0 = samples[0].time();
    let t1 = samples[samples.len() - 1].time();
    let dt = 1.0 / hz;
    let count = (((t1 - t0) * hz).round().max(0.0) as usize + 1).max(2);

    let mut out = Vec::with_capacity(count);
    let mut j = 0;
    for i in 0..count {
        let t = t0 + i as f64 * dt;
        while j + 1 < samples.len() && samples[j + 1].time() < t {
            j += 1;
        }
        let k = (j + 1).min(samples.len() - 1);
        let (a, b) = (&samples[j], &samples[k]);

        let (ta, tb) = (a.time(), b.time());
        let w = if tb > ta { ((t - ta) / (tb - ta)).clamp(0.0, 1.0) as f32 } else { 0.0 };
        // a grid point hitting a sample up to rounding takes that sample
        let w = if w < 1e-5 {
            0.0
        } else if w > 1.0 - 1e-5 {
            1.0
        } else {
            w
        };

        let flag = policy.blend(a.flag(), b.flag(), w);
        out.push(a.lerp(b, w).with_time_and_flag(t, flag));
    }
    out
}

/// In-place exponential moving average seeded with the first sample.
pub fn smooth_ema<S: TrackSample>(samples: &mut [S], alpha: f32, policy: FlagPolicy) {
    let Some(first) = samples.first() else {
        return;
    };
    let alpha = alpha.clamp(0.0, 1.0);

    let mut acc = first.clone();
    let mut previous_flag = first.flag();
    for sample in samples.iter_mut() {
        let raw_flag = sample.flag();
        acc = acc.lerp(sample, alpha);
        let flag = policy.smooth(previous_flag, raw_flag);
        *sample = acc.clone().with_time_and_flag(sample.time(), flag);
        previous_flag = raw_flag;
    }
}
