//! Keyframe Interpolation
//!
//! Piecewise-linear mapping from an input range to an output range. Values
//! outside the input domain hold at the nearest endpoint; nothing is ever
//! extrapolated.

/// Maps `value` through the keypoints `input -> output`.
///
/// `input` must be non-decreasing. Zero-width segments step to the later
/// output. Mismatched lengths use the shorter of the two.
pub fn interpolate(value: f64, input: &[f64], output: &[f64]) -> f64 {
    let n = input.len().min(output.len());
    if n == 0 {
        return 0.0;
    }

    if value.is_nan() || value <= input[0] {
        return output[0];
    }
    if value >= input[n - 1] {
        return output[n - 1];
    }

    for i in 0..n - 1 {
        let (x0, x1) = (input[i], input[i + 1]);
        if value >= x0 && value <= x1 {
            let span = x1 - x0;
            if span <= 0.0 {
                return output[i + 1];
            }
            let t = (value - x0) / span;
            return output[i] + (output[i + 1] - output[i]) * t;
        }
    }

    output[n - 1]
}

/// 0 -> 1 over `[0, duration]`. A non-positive duration is already complete.
pub fn ramp(value: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 1.0;
    }
    interpolate(value, &[0.0, duration], &[0.0, 1.0])
}
