use std::cmp::Reverse;

use ttr_engine::{CardCounts, Colour, Rand};

/// Spread of the draw turns needed to collect a set of cards.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TurnEstimate {
    pub mean: f64,
    pub stdev: f64,
}

impl TurnEstimate {
    /// A pessimistic turn count: one standard deviation above the mean at no
    /// risk, the bare mean at full risk.
    pub fn turns(&self, risk_appetite: f64) -> u32 {
        (self.mean + (1.0 - risk_appetite) * self.stdev).ceil().max(0.0) as u32
    }
}

/// Monte Carlo estimate of two-card draw turns, sampling the unseen pool
/// without replacement.
#[derive(Debug, Clone)]
pub struct CollectionSimulator {
    trials: u32,
}

impl CollectionSimulator {
    pub fn new(trials: u32) -> Self {
        CollectionSimulator {
            trials: trials.max(1),
        }
    }

    /// `None` if `pool` cannot cover `target` even with every locomotive in it.
    pub fn estimate(
        &self,
        target: &CardCounts,
        pool: &CardCounts,
        rand: &mut Rand,
    ) -> Option<TurnEstimate> {
        let short: u32 = Colour::ORDINARY
            .iter()
            .map(|&c| target.get(c).saturating_sub(pool.get(c)))
            .sum();
        if short > pool.get(Colour::Rainbow) {
            return None;
        }
        if Colour::ORDINARY.iter().all(|&c| target.get(c) == 0) {
            return Some(TurnEstimate {
                mean: 0.0,
                stdev: 0.0,
            });
        }

        let cards: Vec<Colour> = pool
            .iter()
            .flat_map(|(c, n)| std::iter::repeat(c).take(n as usize))
            .collect();
        let samples: Vec<f64> = (0..self.trials)
            .map(|_| trial(target, pool, rand.shuffle(cards.clone())) as f64)
            .collect();

        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        Some(TurnEstimate {
            mean,
            stdev: var.sqrt(),
        })
    }
}

fn trial(target: &CardCounts, pool: &CardCounts, order: Vec<Colour>) -> u32 {
    let mut need = *target;
    need.set(Colour::Rainbow, 0);
    let mut left = *pool;
    let mut turns = 0;

    for pair in order.chunks(2) {
        turns += 1;
        for &card in pair {
            left.remove(card, 1);
            if card.is_locomotive() {
                // Cover whichever colour the rest of the pool is least able to supply.
                let worst = Colour::ORDINARY
                    .iter()
                    .copied()
                    .filter(|&c| need.get(c) > 0)
                    .max_by_key(|&c| (need.get(c) as i64 - left.get(c) as i64, Reverse(c)));
                if let Some(c) = worst {
                    need.remove(c, 1);
                }
            } else {
                need.remove(card, 1);
            }
        }
        if need.is_empty() {
            break;
        }
    }
    turns
}
