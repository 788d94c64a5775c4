//! # Bone-Weight Calculator
//!
//! Inverse-distance heuristic, not linear-blend skinning: every bone scores
//! `weight / (1 + distance)` against the vertex, the best four are kept and
//! renormalized. Good enough to drive a proxy mesh from generated clips.

use std::thread;

use grimoire_shared::{SkeletonConfig, Vec3, MAX_BONE_INFLUENCES};

use crate::error::{SkeletonError, SkeletonResult};

/// Influences per vertex.
pub const INFLUENCES: usize = MAX_BONE_INFLUENCES;

/// Below this many vertices per worker the work stays on the caller thread.
pub const MIN_VERTICES_PER_WORKER: usize = 256;

/// Per-vertex bone indices and weights, `INFLUENCES` slots each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkinData {
    /// Bone indices into the skeleton's bone list.
    pub indices: Vec<[u16; INFLUENCES]>,
    /// Matching weights; each row sums to 1.
    pub weights: Vec<[f32; INFLUENCES]>,
}

impl SkinData {
    /// Number of skinned vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// True when no vertex is skinned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Non-zero influences on vertex `i`.
    #[must_use]
    pub fn influence_count(&self, i: usize) -> usize {
        self.weights.get(i).map_or(0, |w| w.iter().filter(|x| **x > 0.0).count())
    }
}

/// Computes [`SkinData`] for a vertex set against a skeleton's rest pose.
#[derive(Debug, Clone, Copy)]
pub struct BoneWeightCalculator {
    workers: usize,
}

impl Default for BoneWeightCalculator {
    fn default() -> Self {
        Self::new(1)
    }
}

impl BoneWeightCalculator {
    /// Creates a calculator that splits work over up to `workers` threads.
    #[must_use]
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    /// Configured worker count.
    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Skins `positions` to `skeleton`.
    ///
    /// # Errors
    ///
    /// [`SkeletonError::Empty`] for a boneless skeleton,
    /// [`SkeletonError::TooManyBones`] when indices would not fit `u16`,
    /// [`SkeletonError::WorkerFailed`] if a worker thread dies.
    pub fn compute(&self, skeleton: &SkeletonConfig, positions: &[Vec3]) -> SkeletonResult<SkinData> {
        if skeleton.is_empty() {
            return Err(SkeletonError::Empty);
        }
        let limit = usize::from(u16::MAX) + 1;
        if skeleton.len() > limit {
            return Err(SkeletonError::TooManyBones {
                count: skeleton.len(),
                limit,
            });
        }

        let bones: Vec<(Vec3, f32)> = skeleton
            .world_positions()
            .into_iter()
            .zip(&skeleton.bones)
            .map(|(p, b)| (p, b.weight))
            .collect();

        let workers = self.workers.min(positions.len() / MIN_VERTICES_PER_WORKER).max(1);
        let rows: Vec<([u16; INFLUENCES], [f32; INFLUENCES])> = if workers == 1 {
            positions.iter().map(|&v| vertex_influences(&bones, v)).collect()
        } else {
            let chunk = positions.len().div_ceil(workers);
            thread::scope(|scope| {
                let handles: Vec<_> = positions
                    .chunks(chunk)
                    .map(|part| {
                        let bones = &bones;
                        scope.spawn(move || part.iter().map(|&v| vertex_influences(bones, v)).collect::<Vec<_>>())
                    })
                    .collect();

                let mut rows = Vec::with_capacity(positions.len());
                for handle in handles {
                    rows.extend(handle.join().map_err(|_| SkeletonError::WorkerFailed)?);
                }
                Ok::<_, SkeletonError>(rows)
            })?
        };

        let (indices, weights) = rows.into_iter().unzip();
        tracing::debug!(
            "Skinned {} vertices to {} bones on {} worker(s)",
            positions.len(),
            skeleton.len(),
            workers
        );
        Ok(SkinData { indices, weights })
    }
}

/// Best four influences for one vertex. `bones` holds rest position and
/// base weight per bone.
#[must_use]
pub fn vertex_influences(bones: &[(Vec3, f32)], vertex: Vec3) -> ([u16; INFLUENCES], [f32; INFLUENCES]) {
    let mut scored: Vec<(usize, f32)> = bones
        .iter()
        .enumerate()
        .map(|(i, &(pos, weight))| {
            let score = weight / (1.0 + pos.distance(vertex));
            (i, if score.is_finite() { score.max(0.0) } else { 0.0 })
        })
        .collect();
    // stable: equal scores keep bone order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(INFLUENCES);

    let mut indices = [0u16; INFLUENCES];
    let mut weights = [0.0f32; INFLUENCES];
    let total: f32 = scored.iter().map(|(_, s)| s).sum();

    for (slot, (bone, score)) in scored.iter().enumerate() {
        indices[slot] = *bone as u16;
        weights[slot] = if total > 0.0 { score / total } else { 0.0 };
    }
    if total <= 0.0 {
        weights[0] = 1.0;
    }
    (indices, weights)
}
