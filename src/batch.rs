use crate::client::SeededRandomChooser;
use crate::decision::{Decision, DecisionEngine};
use crate::model::TurnSnapshot;
use rayon::prelude::*;
use std::path::Path;

/// Decide many independent snapshots in parallel. Each snapshot gets its own
/// fallback RNG derived from `seed` and its index, so results are reproducible.
pub fn decide_batch(engine: &DecisionEngine, snapshots: &[TurnSnapshot], seed: u64) -> Vec<Decision> {
    snapshots
        .par_iter()
        .enumerate()
        .map(|(idx, snapshot)| {
            let mut chooser = SeededRandomChooser::new(mix_seed(seed, idx as u64));
            engine.decide(snapshot, &mut chooser)
        })
        .collect()
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BatchSummary {
    pub total: usize,
    pub heuristic: usize,
    pub random: usize,
}

pub fn summarize(decisions: &[Decision]) -> BatchSummary {
    let random = decisions.iter().filter(|d| d.is_random()).count();
    BatchSummary {
        total: decisions.len(),
        heuristic: decisions.len() - random,
        random,
    }
}

/// One JSON decision per line.
pub fn write_jsonl(decisions: &[Decision], path: &Path) -> anyhow::Result<()> {
    let mut out = String::new();
    for decision in decisions {
        out.push_str(&serde_json::to_string(decision)?);
        out.push('\n');
    }
    std::fs::write(path, out)?;
    Ok(())
}

fn mix_seed(base: u64, idx: u64) -> u64 {
    let mut x = base ^ idx.wrapping_mul(0x9E3779B97F4A7C15);
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51afd7ed558ccd);
    x ^= x >> 33;
    x = x.wrapping_mul(0xc4ceb9fe1a85ec53);
    x ^ (x >> 33)
}
