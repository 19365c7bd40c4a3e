/// Picks a "nice" grid step in `[min_step, max_step)`.
///
/// Candidates are multiples of a power of ten, or such a multiple plus half
/// of it, shrinking the power until one lands in range. Falls back to
/// `max_step` when the interval holds no integer or is degenerate.
#[must_use]
pub fn nice_step(min_step: f64, max_step: f64) -> f64 {
    if !min_step.is_finite() || !max_step.is_finite() || max_step < 1.0 || max_step > 1e18 {
        return max_step;
    }
    let min = min_step.max(0.0).ceil() as u64;
    let max = max_step.floor() as u64;
    if min > max {
        return max_step;
    }

    let in_range = |candidate: u64| {
        let candidate = candidate as f64;
        candidate > 0.0 && candidate >= min_step && candidate < max_step
    };

    let mut power = floor_power_of_ten(max);
    while power > 1 && max / power == min / power {
        power /= 10;
    }
    power *= 10;

    while power > 0 {
        let mut candidate = max / power * power;
        if in_range(candidate) {
            return candidate as f64;
        }
        power /= 10;
        candidate += 5 * power;
        if in_range(candidate) {
            return candidate as f64;
        }
    }
    max_step
}

fn floor_power_of_ten(value: u64) -> u64 {
    if value == 0 {
        return 1;
    }
    10u64.pow(value.ilog10())
}
