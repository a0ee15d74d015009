//! Weighted scenario selection
use crate::constants::{
    WEIGHT_EASTER_EGG_BOOSTED, WEIGHT_EASTER_EGG_RARE, WEIGHT_EASTER_EGG_SUPPRESSED, WEIGHT_FRESH,
    WEIGHT_SEEN, WEIGHT_UNTAGGED,
};
use crate::category::CategoryId;
use crate::progress::ProgressRecord;
use crate::prompts::{PromptPool, PromptTag};
use rand::Rng;

/// Which tally drives regular prompt weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// Some regular category has not been declined yet.
    Avoiding,
    /// Every regular category was declined; steer towards falling for them.
    Falling,
}

impl SelectionPhase {
    #[must_use]
    pub fn for_progress(progress: &ProgressRecord) -> Self {
        if progress.all_avoided() {
            Self::Falling
        } else {
            Self::Avoiding
        }
    }
}

/// Weight of a single prompt tag under the current progress.
#[must_use]
pub fn prompt_weight(tag: PromptTag, progress: &ProgressRecord) -> f64 {
    match tag {
        PromptTag::Category(id) if id.is_easter_egg() => easter_egg_weight(progress),
        PromptTag::Category(id) => regular_weight(id, progress),
        PromptTag::EasterEgg => easter_egg_weight(progress),
        PromptTag::Untagged => WEIGHT_UNTAGGED,
    }
}

fn regular_weight(id: CategoryId, progress: &ProgressRecord) -> f64 {
    let seen = match SelectionPhase::for_progress(progress) {
        SelectionPhase::Avoiding => progress.avoided.contains(&id),
        SelectionPhase::Falling => progress.fallen_for.contains(&id),
    };
    if seen { WEIGHT_SEEN } else { WEIGHT_FRESH }
}

fn easter_egg_weight(progress: &ProgressRecord) -> f64 {
    if progress.easter_egg_completed && progress.learned.contains(&CategoryId::EASTER_EGG) {
        WEIGHT_EASTER_EGG_RARE
    } else if progress.unavoided().next().is_some() {
        WEIGHT_EASTER_EGG_SUPPRESSED
    } else {
        WEIGHT_EASTER_EGG_BOOSTED
    }
}

/// Weights for every prompt in pool order.
#[must_use]
pub fn prompt_weights(pool: &PromptPool, progress: &ProgressRecord) -> Vec<f64> {
    pool.prompts()
        .iter()
        .map(|prompt| prompt_weight(prompt.tag, progress))
        .collect()
}

/// Draw an index proportionally to `weights`.
///
/// Picks the first entry whose cumulative weight meets or exceeds a uniform
/// draw in `[0, total)`. A pool with no positive weight yields index 0.
pub fn choose_weighted<R: Rng>(weights: &[f64], rng: &mut R) -> usize {
    let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
    if total <= 0.0 || !total.is_finite() {
        return 0;
    }

    let roll = rng.r#gen::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (idx, weight) in weights.iter().enumerate() {
        if *weight <= 0.0 {
            continue;
        }
        cumulative += *weight;
        last_positive = idx;
        if cumulative >= roll {
            return idx;
        }
    }

    last_positive
}

/// Pick the next prompt index for `progress`.
pub fn select<R: Rng>(pool: &PromptPool, progress: &ProgressRecord, rng: &mut R) -> usize {
    let weights = prompt_weights(pool, progress);
    let index = choose_weighted(&weights, rng);
    log::debug!(
        "prompt selection | phase:{:?} total:{:.3} chosen:{index}",
        SelectionPhase::for_progress(progress),
        weights.iter().sum::<f64>()
    );
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn assert_weight(tag: PromptTag, progress: &ProgressRecord, expected: f64) {
        let weight = prompt_weight(tag, progress);
        assert!((weight - expected).abs() < 1e-12, "{tag:?} weighed {weight}");
    }

    #[test]
    fn fresh_progress_prefers_unavoided() {
        let mut progress = ProgressRecord::new();
        progress.avoided.insert(CategoryId::Tax);
        assert_weight(PromptTag::Category(CategoryId::Tax), &progress, 0.005);
        assert_weight(PromptTag::Category(CategoryId::Lottery), &progress, 0.9);
        assert_weight(PromptTag::EasterEgg, &progress, 0.05);
        assert_weight(PromptTag::Untagged, &progress, 0.9);
    }

    #[test]
    fn falling_phase_uses_fallen_tally() {
        let mut progress = ProgressRecord::new();
        progress.avoided.extend(CategoryId::REGULAR);
        progress.fallen_for.insert(CategoryId::Romance);
        assert_eq!(SelectionPhase::for_progress(&progress), SelectionPhase::Falling);
        assert_weight(PromptTag::Category(CategoryId::Romance), &progress, 0.005);
        assert_weight(PromptTag::Category(CategoryId::Tax), &progress, 0.9);
    }

    #[test]
    fn easter_egg_weight_tiers() {
        let mut progress = ProgressRecord::new();
        progress.avoided.extend(CategoryId::REGULAR);
        assert_weight(PromptTag::EasterEgg, &progress, 0.3);
        progress.easter_egg_completed = true;
        assert_weight(PromptTag::EasterEgg, &progress, 0.3);
        progress.learned.insert(CategoryId::RickRoll);
        assert_weight(PromptTag::EasterEgg, &progress, 0.01);
    }

    #[test]
    fn degenerate_weights_pick_first() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        assert_eq!(choose_weighted(&[], &mut rng), 0);
        assert_eq!(choose_weighted(&[0.0, 0.0, 0.0], &mut rng), 0);
    }

    #[test]
    fn zero_weight_entries_are_never_chosen() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for _ in 0..500 {
            let idx = choose_weighted(&[0.0, 1.0, 0.0, 2.0, 0.0], &mut rng);
            assert!(idx == 1 || idx == 3, "picked zero-weight index {idx}");
        }
    }
}
