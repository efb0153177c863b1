//! Mode orchestration - composes generators and the output sink per strategy

use std::io::Write;

use chrono::Utc;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::error::{Result, WordForgeError};
use crate::generate::estimate::{approx_bytes, enumeration_bytes, estimate, DEFAULT_AVG_LEN};
use crate::generate::{
    assess_capacity, format_size, Alphabet, ByteSource, CapacityWarning, CharsetEnumerator,
    KeywordMutator, Mutations, RandomSampler,
};
use crate::sink::{write_capped, write_unique, LineWriter};
use crate::types::{GenerationMode, GenerationRequest, RunSummary, Stage, StageSummary};

/// Default capacity warning threshold (100 GiB)
pub const DEFAULT_WARN_BYTES: u64 = 100 * 1024 * 1024 * 1024;

/// Engine settings
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Byte size above which a plan carries a capacity warning (0 disables)
    pub capacity_threshold_bytes: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity_threshold_bytes: DEFAULT_WARN_BYTES,
        }
    }
}

/// What a run will do, computed before any output is written.
///
/// Carries the checked request together with the mutation set and the
/// enumeration total, so [`Orchestrator::execute`] writes exactly what was
/// estimated without computing either again.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub mode: GenerationMode,
    pub alphabet_size: usize,
    /// Candidates the enumerator can produce over the whole range
    pub enumeration_total: Option<BigUint>,
    /// Unique in-range keyword variants
    pub mutation_total: Option<u64>,
    /// Lines the run will write
    pub lines: BigUint,
    pub bytes: BigUint,
    pub warning: Option<CapacityWarning>,
    request: GenerationRequest,
    alphabet: Alphabet,
    mutations: Option<Mutations>,
}

impl RunPlan {
    pub fn approx_size(&self) -> String {
        format_size(&self.bytes)
    }

    /// The checked request this plan was built from
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }
}

/// Progress update sent after every written line
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    pub stage: Stage,
    pub stage_written: u64,
    pub total_written: u64,
    /// Lines this stage will write, when known and small enough for a counter
    pub stage_total: Option<u64>,
}

/// Runs a generation request end to end
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    config: EngineConfig,
}

impl Orchestrator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Reject requests that cannot produce meaningful output
    pub fn validate(&self, request: &GenerationRequest) -> Result<()> {
        request.check()?;
        let needs_alphabet = request.mode.enumerates() || request.mode == GenerationMode::Random;
        if needs_alphabet && request.alphabet().is_empty() {
            return Err(WordForgeError::empty_alphabet(request.mode));
        }
        Ok(())
    }

    /// Work out totals and sizes without writing anything
    pub fn plan(&self, request: &GenerationRequest) -> Result<RunPlan> {
        self.validate(request)?;

        let alphabet = request.alphabet();
        let cap = request.cap().map(BigUint::from);
        let capped = |n: BigUint| match &cap {
            Some(c) if n > *c => c.clone(),
            _ => n,
        };

        let mutations = request.mode.mutates().then(|| self.mutator(request).generate());
        let mutation_total = mutations.as_ref().map(|m| m.len() as u64);
        let enumeration_total = request
            .mode
            .enumerates()
            .then(|| estimate(alphabet.len(), request.range));

        let (lines, bytes) = match request.mode {
            GenerationMode::Smart => {
                let lines = capped(BigUint::from(mutation_total.unwrap_or(0)));
                let bytes = approx_bytes(&lines, DEFAULT_AVG_LEN);
                (lines, bytes)
            }
            GenerationMode::Brute => {
                let lines = capped(enumeration_total.clone().unwrap_or_default());
                let bytes = enumeration_bytes(alphabet.len(), request.range, Some(&lines));
                (lines, bytes)
            }
            GenerationMode::Hybrid => {
                let smart = capped(BigUint::from(mutation_total.unwrap_or(0)));
                let remaining = cap.as_ref().map(|c| c - &smart);
                let brute = match &remaining {
                    Some(r) if r.is_zero() => BigUint::zero(),
                    Some(r) => enumeration_total.clone().unwrap_or_default().min(r.clone()),
                    None => enumeration_total.clone().unwrap_or_default(),
                };
                let bytes = approx_bytes(&smart, DEFAULT_AVG_LEN)
                    + enumeration_bytes(alphabet.len(), request.range, Some(&brute));
                (smart + brute, bytes)
            }
            GenerationMode::Random => {
                let lines = BigUint::from(request.random_count);
                let bytes = &lines * BigUint::from(request.random_length + 1);
                (lines, bytes)
            }
        };

        let warning = assess_capacity(&lines, &bytes, self.config.capacity_threshold_bytes);
        if let Some(w) = &warning {
            tracing::warn!(mode = %request.mode, warning = %w, "Capacity threshold exceeded");
        }

        Ok(RunPlan {
            request: request.clone(),
            mode: request.mode,
            alphabet_size: alphabet.len(),
            enumeration_total,
            mutation_total,
            lines,
            bytes,
            warning,
            alphabet,
            mutations,
        })
    }

    /// Plan and run with the operating system RNG as random source
    pub fn run<W, F>(&self, request: &GenerationRequest, out: &mut LineWriter<W>, on_progress: F) -> Result<RunSummary>
    where
        W: Write,
        F: FnMut(&Progress),
    {
        self.run_with_source(request, out, &mut rand::rngs::OsRng, on_progress)
    }

    /// Plan and run with an explicit random source
    pub fn run_with_source<W, B, F>(
        &self,
        request: &GenerationRequest,
        out: &mut LineWriter<W>,
        source: &mut B,
        on_progress: F,
    ) -> Result<RunSummary>
    where
        W: Write,
        B: ByteSource + ?Sized,
        F: FnMut(&Progress),
    {
        let plan = self.plan(request)?;
        self.execute_with_source(plan, out, source, on_progress)
    }

    /// Write a planned run with the operating system RNG as random source
    pub fn execute<W, F>(&self, plan: RunPlan, out: &mut LineWriter<W>, on_progress: F) -> Result<RunSummary>
    where
        W: Write,
        F: FnMut(&Progress),
    {
        self.execute_with_source(plan, out, &mut rand::rngs::OsRng, on_progress)
    }

    /// Write a planned run with an explicit random source
    pub fn execute_with_source<W, B, F>(
        &self,
        plan: RunPlan,
        out: &mut LineWriter<W>,
        source: &mut B,
        mut on_progress: F,
    ) -> Result<RunSummary>
    where
        W: Write,
        B: ByteSource + ?Sized,
        F: FnMut(&Progress),
    {
        let RunPlan {
            request,
            alphabet,
            mutations,
            enumeration_total,
            ..
        } = plan;
        let request = &request;
        let total = enumeration_total.unwrap_or_default();

        let started_at = Utc::now();
        let start_bytes = out.bytes_written();
        let mut stages: Vec<StageSummary> = Vec::new();

        tracing::info!(
            mode = %request.mode,
            range = %request.range,
            limit = request.limit,
            alphabet_size = alphabet.len(),
            "Generation started"
        );

        match request.mode {
            GenerationMode::Smart => {
                let mutations = mutations.unwrap_or_else(|| self.mutator(request).generate());
                let written = self.mutation_stage(mutations, out, request.limit, 0, &mut on_progress)?;
                stages.push(StageSummary { stage: Stage::Mutation, written });
            }
            GenerationMode::Brute => {
                let enumerator = CharsetEnumerator::new(&alphabet, request.range)?;
                let stage_total = small_total(&total, request.limit);
                let written = write_capped(enumerator, out, request.limit, |n| {
                    on_progress(&Progress {
                        stage: Stage::Enumeration,
                        stage_written: n,
                        total_written: n,
                        stage_total,
                    })
                })?;
                log_stage(Stage::Enumeration, written);
                stages.push(StageSummary { stage: Stage::Enumeration, written });
            }
            GenerationMode::Hybrid => {
                let mutations = mutations.unwrap_or_else(|| self.mutator(request).generate());
                let first = self.mutation_stage(mutations, out, request.limit, 0, &mut on_progress)?;
                stages.push(StageSummary { stage: Stage::Mutation, written: first });

                // Budget left for enumeration; 0 means unbounded
                let remaining = match request.limit {
                    0 => Some(0),
                    limit if limit > first => Some(limit - first),
                    _ => None,
                };

                match remaining {
                    Some(budget) => {
                        let enumerator = CharsetEnumerator::new(&alphabet, request.range)?;
                        let written = self.enumeration_stage(enumerator, &total, out, budget, first, &mut on_progress)?;
                        stages.push(StageSummary { stage: Stage::Enumeration, written });
                    }
                    None => {
                        tracing::debug!(limit = request.limit, "Limit reached by mutation stage, enumeration skipped");
                    }
                }
            }
            GenerationMode::Random => {
                let written = self.random_stage(&alphabet, request, out, source, &mut on_progress)?;
                stages.push(StageSummary { stage: Stage::Random, written });
            }
        }

        out.flush()?;

        let total_written: u64 = stages.iter().map(|s| s.written).sum();
        let bytes = out.bytes_written() - start_bytes;
        let summary = RunSummary {
            mode: request.mode,
            stages,
            total_written,
            estimate: request.mode.enumerates().then(|| total.to_string()),
            approx_size: format_size(&BigUint::from(bytes)),
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            mode = %summary.mode,
            written = summary.total_written,
            size = %summary.approx_size,
            duration_ms = summary.elapsed().num_milliseconds(),
            "Generation completed"
        );

        Ok(summary)
    }

    fn mutator(&self, request: &GenerationRequest) -> KeywordMutator {
        KeywordMutator::new(&request.keywords, request.affixes(), request.range)
    }

    fn mutation_stage<W, F>(
        &self,
        mutations: Mutations,
        out: &mut LineWriter<W>,
        cap: u64,
        offset: u64,
        on_progress: &mut F,
    ) -> Result<u64>
    where
        W: Write,
        F: FnMut(&Progress),
    {
        let available = mutations.len() as u64;
        let stage_total = Some(if cap > 0 { available.min(cap) } else { available });

        let written = write_unique(mutations, out, cap, |n| {
            on_progress(&Progress {
                stage: Stage::Mutation,
                stage_written: n,
                total_written: offset + n,
                stage_total,
            })
        })?;

        log_stage(Stage::Mutation, written);
        Ok(written)
    }

    fn enumeration_stage<W, F>(
        &self,
        enumerator: CharsetEnumerator,
        total: &BigUint,
        out: &mut LineWriter<W>,
        cap: u64,
        offset: u64,
        on_progress: &mut F,
    ) -> Result<u64>
    where
        W: Write,
        F: FnMut(&Progress),
    {
        let stage_total = small_total(total, cap);

        // Fresh seen-set: dedup is per stage, not across the run
        let written = write_unique(enumerator, out, cap, |n| {
            on_progress(&Progress {
                stage: Stage::Enumeration,
                stage_written: n,
                total_written: offset + n,
                stage_total,
            })
        })?;

        log_stage(Stage::Enumeration, written);
        Ok(written)
    }

    fn random_stage<W, B, F>(
        &self,
        alphabet: &Alphabet,
        request: &GenerationRequest,
        out: &mut LineWriter<W>,
        source: &mut B,
        on_progress: &mut F,
    ) -> Result<u64>
    where
        W: Write,
        B: ByteSource + ?Sized,
        F: FnMut(&Progress),
    {
        let sampler = RandomSampler::new(alphabet, request.random_length, request.random_count)?;
        let mut written = 0u64;

        for password in sampler.sample(source) {
            out.write_line(&password?)?;
            written += 1;
            on_progress(&Progress {
                stage: Stage::Random,
                stage_written: written,
                total_written: written,
                stage_total: Some(sampler.count()),
            });
        }

        log_stage(Stage::Random, written);
        Ok(written)
    }
}

/// Stage size as `u64` when it fits, honouring the cap
fn small_total(total: &BigUint, cap: u64) -> Option<u64> {
    let total = total.to_u64();
    match (total, cap) {
        (Some(t), c) if c > 0 => Some(t.min(c)),
        (None, c) if c > 0 => Some(c),
        (t, _) => t,
    }
}

fn log_stage(stage: Stage, written: u64) {
    tracing::info!(stage = %stage, written, "Stage completed");
}
