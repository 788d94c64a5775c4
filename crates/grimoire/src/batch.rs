//! # Batch Generation
//!
//! Requests share nothing, so a batch is a plain fan-out: prompts go onto a
//! job channel, scoped workers drain it, results come back tagged with
//! their input index and are put back in input order.
//!
//! A worker that dies loses its in-flight prompt. Surviving workers keep
//! draining the queue, and any slot nobody filled comes back as a failed
//! result instead of taking the batch down.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded};

use crate::character::{CharacterAssembler, CharacterOutput, CharacterRequest};
use crate::clock::Instant;
use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::result::GenerationResult;
use crate::scene::{SceneAssembler, SceneOutput, SceneRequest};

/// Runs many prompts in parallel.
#[derive(Debug, Clone)]
pub struct BatchGenerator {
    scenes: SceneAssembler,
    characters: CharacterAssembler,
    workers: usize,
}

impl Default for BatchGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

impl BatchGenerator {
    /// Creates a generator with `config.batch_workers` threads.
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            workers: config.batch_workers.max(1),
            scenes: SceneAssembler::new(config.clone()),
            characters: CharacterAssembler::new(config),
        }
    }

    /// Worker thread count.
    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    /// Generates one scene per prompt, results in prompt order.
    #[must_use]
    pub fn scenes<P>(&self, prompts: &[P], request: &SceneRequest) -> Vec<GenerationResult<SceneOutput>>
    where
        P: AsRef<str> + Sync,
    {
        self.run(prompts, |prompt| self.scenes.generate(prompt, request))
    }

    /// Generates one character per prompt, results in prompt order.
    #[must_use]
    pub fn characters<P>(&self, prompts: &[P], request: &CharacterRequest) -> Vec<GenerationResult<CharacterOutput>>
    where
        P: AsRef<str> + Sync,
    {
        self.run(prompts, |prompt| self.characters.generate(prompt, request))
    }

    /// Runs `job` over every prompt on the worker pool.
    #[must_use]
    pub fn run<P, T, F>(&self, prompts: &[P], job: F) -> Vec<GenerationResult<T>>
    where
        P: AsRef<str> + Sync,
        T: Send,
        F: Fn(&str) -> GenerationResult<T> + Sync,
    {
        if prompts.is_empty() {
            return Vec::new();
        }
        let start = Instant::now();
        let workers = self.workers.min(prompts.len());

        let (job_tx, job_rx) = bounded(prompts.len());
        for (index, prompt) in prompts.iter().enumerate() {
            // capacity covers every prompt and the receiver is alive
            if job_tx.send((index, prompt.as_ref())).is_err() {
                break;
            }
        }
        drop(job_tx);

        let (result_tx, result_rx) = unbounded();
        let job = &job;
        thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|_| {
                    let jobs = job_rx.clone();
                    let results = result_tx.clone();
                    scope.spawn(move || {
                        for (index, prompt) in &jobs {
                            if results.send((index, job(prompt))).is_err() {
                                break;
                            }
                        }
                    })
                })
                .collect();
            for handle in handles {
                if handle.join().is_err() {
                    tracing::warn!("Batch worker panicked; its prompt is reported as failed");
                }
            }
        });
        drop(result_tx);

        let mut slots: Vec<Option<GenerationResult<T>>> = (0..prompts.len()).map(|_| None).collect();
        for (index, result) in result_rx.try_iter() {
            if let Some(slot) = slots.get_mut(index) {
                *slot = Some(result);
            }
        }
        let results: Vec<GenerationResult<T>> = slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| GenerationResult::failed(&GenerationError::WorkerFailed, Vec::new(), Duration::ZERO))
            })
            .collect();

        tracing::info!(
            "Batch of {} finished in {:?} on {} worker(s): {} succeeded",
            results.len(),
            start.elapsed(),
            workers,
            results.iter().filter(|r| r.success).count()
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(workers: usize) -> BatchGenerator {
        BatchGenerator::new(GeneratorConfig {
            batch_workers: workers,
            ..GeneratorConfig::default()
        })
    }

    #[test]
    fn test_order_is_preserved() {
        let prompts = ["a cube", "a red sphere", "a twisted tower", "a torus", "a cone"];
        let request = SceneRequest {
            clock_seconds: Some(0.0),
            ..SceneRequest::default()
        };
        let results = generator(3).scenes(&prompts, &request);
        assert_eq!(results.len(), prompts.len());
        for (prompt, result) in prompts.iter().zip(&results) {
            assert_eq!(result.config.as_ref().map(|o| o.scene.prompt.as_str()), Some(*prompt));
        }
    }

    #[test]
    fn test_matches_sequential() {
        let prompts = vec!["a toad".to_owned(), "a knight with a sword".to_owned()];
        let parallel = generator(2).characters(&prompts, &CharacterRequest::default());
        let assembler = CharacterAssembler::default();
        for (prompt, result) in prompts.iter().zip(parallel) {
            let alone = assembler.generate(prompt, &CharacterRequest::default());
            assert_eq!(result.config.map(|o| o.character), alone.config.map(|o| o.character));
        }
    }

    #[test]
    fn test_panicking_job_reports_failure() {
        let results = generator(1).run(&["ok", "boom", "ok"], |prompt| {
            assert!(prompt != "boom", "job panicked");
            GenerationResult::succeeded(prompt.len(), Vec::new(), Duration::ZERO)
        });
        assert_eq!(results.len(), 3);
        assert!(results[0].success);
        assert!(!results[1].success);
        assert_eq!(results[1].error.as_deref(), Some("batch worker failed"));
        // the only worker died on "boom", so the tail was never picked up
        assert!(!results[2].success);
    }

    #[test]
    fn test_empty_batch() {
        let results = generator(4).scenes::<&str>(&[], &SceneRequest::default());
        assert!(results.is_empty());
    }
}
