use std::ops::RangeInclusive;

use rand::Rng;

use crate::foundation::core::Offset;
use crate::foundation::error::{IntensifyError, IntensifyResult};
use crate::shake::geometry::ShakeGeometry;

/// Parameters of the closed random walk that drives the shake.
///
/// A walk for `frames` frames yields `frames + 1` offsets. The first and last are
/// [`Offset::ZERO`], so the animation loops back onto its starting crop. Every step moves each axis
/// by at most `max_step` pixels, every offset stays within `crop_margin` on both axes, and no offset
/// repeats either of the two offsets before it.
///
/// Each position is kept within reach of the origin for the steps that remain, so the closing
/// step can always return to [`Offset::ZERO`] and whole-sequence retries are rare.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OffsetWalk {
    pub frames: u32,
    pub max_step: u32,
    pub crop_margin: u32,
    /// Upper bound on whole-sequence regenerations before giving up.
    pub max_attempts: u64,
}

impl OffsetWalk {
    pub const DEFAULT_MAX_ATTEMPTS: u64 = 10_000_000;

    pub fn new(frames: u32, max_step: u32, crop_margin: u32) -> Self {
        Self {
            frames,
            max_step,
            crop_margin,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn for_geometry(frames: u32, geometry: &ShakeGeometry) -> Self {
        Self::new(frames, geometry.max_step, geometry.crop_margin)
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Run the walk with `rng` as the only source of randomness.
    #[tracing::instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> IntensifyResult<Vec<Offset>> {
        if self.frames < 2 {
            return Err(IntensifyError::validation(format!(
                "offset walk needs at least 2 frames, got {}",
                self.frames
            )));
        }
        if self.max_step > self.crop_margin {
            return Err(IntensifyError::validation(format!(
                "max step {} exceeds crop margin {}",
                self.max_step, self.crop_margin
            )));
        }
        let max_step = i32::try_from(self.max_step)
            .map_err(|_| IntensifyError::validation("max step does not fit in i32"))?;
        let margin = i32::try_from(self.crop_margin)
            .map_err(|_| IntensifyError::validation("crop margin does not fit in i32"))?;

        if self.frames == 2 {
            return Ok(vec![
                Offset::ZERO,
                Offset::new(max_step, max_step),
                Offset::ZERO,
            ]);
        }
        if max_step == 0 {
            return Err(IntensifyError::offsets(
                "shake too small: a zero step cannot avoid repeating offsets; \
                 use a larger image or a higher shake percentage",
            ));
        }

        let len = self.frames as usize + 1;
        let last = len - 1;
        let mut offsets = Vec::with_capacity(len);
        'attempts: for attempt in 1..=self.max_attempts {
            offsets.clear();
            offsets.push(Offset::ZERO);
            for idx in 1..len {
                // Stay close enough to the origin that the remaining steps can still reach it.
                let remaining = i32::try_from(last - idx).unwrap_or(i32::MAX);
                let bound = max_step.saturating_mul(remaining).min(margin);
                // A zero in either of the last two slots would block the closing (0,0).
                let avoid_zero = idx + 2 >= last && idx < last;
                match next_offset(rng, &offsets, max_step, bound, avoid_zero) {
                    Some(next) => offsets.push(next),
                    None => {
                        tracing::trace!(attempt, idx, "offset walk hit a dead end, restarting");
                        continue 'attempts;
                    }
                }
            }
            if offsets.last() == Some(&Offset::ZERO) {
                tracing::debug!(attempt, "offset walk closed");
                return Ok(offsets);
            }
        }

        Err(IntensifyError::offsets(format!(
            "no closed walk for {} frames (step {}, margin {}) after {} attempts",
            self.frames, self.max_step, self.crop_margin, self.max_attempts
        )))
    }
}

/// Generate `frames + 1` crop offsets for a shake with the given step and margin.
pub fn generate_offsets<R: Rng + ?Sized>(
    frames: u32,
    max_step: u32,
    crop_margin: u32,
    rng: &mut R,
) -> IntensifyResult<Vec<Offset>> {
    OffsetWalk::new(frames, max_step, crop_margin).generate(rng)
}

/// Draw the offset after `history`, or `None` when every reachable candidate is excluded.
///
/// Each axis moves by at most `max_step` and lands within `bound` of the origin. Candidates equal
/// to either of the two previous offsets are redrawn.
fn next_offset<R: Rng + ?Sized>(
    rng: &mut R,
    history: &[Offset],
    max_step: i32,
    bound: i32,
    avoid_zero: bool,
) -> Option<Offset> {
    let prev = history[history.len() - 1];
    let window = &history[history.len().saturating_sub(2)..];
    let xs = axis_range(prev.x, max_step, bound);
    let ys = axis_range(prev.y, max_step, bound);
    if xs.is_empty() || ys.is_empty() {
        return None;
    }
    let excluded = |c: &Offset| window.contains(c) || (avoid_zero && *c == Offset::ZERO);

    // At most three candidates are ever excluded; small sets are enumerated so a fully blocked
    // step is detected instead of looping.
    let span = |r: &RangeInclusive<i32>| i64::from(*r.end()) - i64::from(*r.start()) + 1;
    if span(&xs) * span(&ys) <= 4 {
        let open: Vec<Offset> = xs
            .flat_map(|x| ys.clone().map(move |y| Offset::new(x, y)))
            .filter(|c| !excluded(c))
            .collect();
        if open.is_empty() {
            return None;
        }
        return Some(open[rng.random_range(0..open.len())]);
    }

    loop {
        let candidate = Offset::new(
            rng.random_range(xs.clone()),
            rng.random_range(ys.clone()),
        );
        if !excluded(&candidate) {
            return Some(candidate);
        }
    }
}

/// Positions reachable from `from` in one step without leaving `[-bound, bound]`.
fn axis_range(from: i32, max_step: i32, bound: i32) -> RangeInclusive<i32> {
    from.saturating_sub(max_step).max(-bound)..=from.saturating_add(max_step).min(bound)
}

#[cfg(test)]
#[path = "../../tests/unit/shake/offsets.rs"]
mod tests;
