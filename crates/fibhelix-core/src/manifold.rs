//! The evolution engine.
//!
//! A [`Manifold`] owns every loop in an arena indexed by [`LoopId`], plus the
//! frame counter and the engine's random stream. One [`Manifold::tick`] is one
//! frame:
//!
//! 1. every loop active at the start of the frame grows, then is checked for
//!    a curvature split and a stochastic split;
//! 2. accepted children are appended after all existing loops are done, so a
//!    child never grows or splits in the frame it was born;
//! 3. the merge pass runs over the fully grown tip set.
//!
//! Loops are never removed. The population never exceeds `max_loops`; spawns
//! beyond it are dropped.

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::config::ManifoldConfig;
use crate::error::Result;
use crate::events::{ManifoldEvent, TickReport};
use crate::fibonacci::FibonacciTable;
use crate::growth::Grower;
use crate::loops::{Loop, LoopId};
use crate::merge;
use crate::split::Splitter;

/// The evolving population of loops.
pub struct Manifold {
    config: ManifoldConfig,
    table: FibonacciTable,
    grower: Grower,
    splitter: Splitter,
    loops: Vec<Loop>,
    frame: u64,
    rng: ChaCha12Rng,
}

impl Manifold {
    /// Build a manifold holding the single seed loop.
    pub fn new(config: ManifoldConfig) -> Result<Self> {
        let mut manifold = Self::empty(config)?;
        let seed = Loop::spawn(
            manifold.config.initial_phase,
            manifold.config.initial_fib_index,
            &manifold.table,
            &mut manifold.rng,
        );
        manifold.loops.push(seed);
        Ok(manifold)
    }

    /// Build a manifold with no loops.
    pub fn empty(config: ManifoldConfig) -> Result<Self> {
        config.validate()?;
        let table = FibonacciTable::new(config.fib_count);
        let grower = Grower::new(&config, &table);
        let splitter = Splitter::new(&config);
        let rng = ChaCha12Rng::seed_from_u64(config.seed);

        tracing::debug!(
            seed = config.seed,
            max_loops = config.max_loops,
            cycle_length = config.cycle_length,
            "manifold created"
        );

        Ok(Self {
            config,
            table,
            grower,
            splitter,
            loops: Vec::new(),
            frame: 0,
            rng,
        })
    }

    /// Add a loop, unless the population is full.
    ///
    /// The loop's step and Fibonacci index are wrapped into range.
    pub fn insert(&mut self, mut lp: Loop) -> Option<LoopId> {
        if self.loops.len() >= self.config.max_loops {
            tracing::trace!(population = self.loops.len(), "insert dropped at cap");
            return None;
        }
        lp.step %= self.config.cycle_length;
        let fib_index = lp.fib_index;
        lp.set_fib_index(fib_index, &self.table);

        let id = LoopId(self.loops.len());
        self.loops.push(lp);
        Some(id)
    }

    /// Advance the manifold by one frame.
    pub fn tick(&mut self) -> TickReport {
        self.frame += 1;
        let frame = self.frame;
        let population = self.loops.len();
        let max_loops = self.config.max_loops;

        let mut pending: Vec<Loop> = Vec::new();
        let mut events = Vec::new();
        let mut points_grown = 0;

        for index in 0..population {
            if !self.loops[index].active {
                continue;
            }
            let id = LoopId(index);
            let lp = &mut self.loops[index];

            for _ in 0..self.config.points_per_frame {
                if let Some(rollover) = self.grower.grow_point(lp, &self.table, &mut self.rng) {
                    events.push(ManifoldEvent::CycleCompleted {
                        loop_id: id,
                        cycle: rollover.cycle,
                        fib_index: rollover.fib_index,
                        frame,
                    });
                }
                points_grown += 1;
            }

            if let Some(trigger) = self.splitter.curvature_trigger(lp, frame) {
                if population + pending.len() < max_loops {
                    let child = self
                        .splitter
                        .curvature_child(lp, &trigger, frame, &self.table, &mut self.rng);
                    let child_id = LoopId(population + pending.len());
                    tracing::debug!(
                        parent = index,
                        child = child_id.index(),
                        curvature = trigger.curvature,
                        frame,
                        "curvature split"
                    );
                    events.push(ManifoldEvent::CurvatureSplit {
                        parent: id,
                        child: child_id,
                        curvature: trigger.curvature,
                        frame,
                    });
                    pending.push(child);
                } else {
                    tracing::trace!(parent = index, frame, "curvature split dropped at cap");
                    events.push(ManifoldEvent::SplitRejected { parent: id, frame });
                }
            }

            if self.splitter.stochastic_roll(&mut self.rng) {
                if population + pending.len() < max_loops {
                    let child = self.splitter.stochastic_child(lp, &self.table, &mut self.rng);
                    let child_id = LoopId(population + pending.len());
                    tracing::debug!(
                        parent = index,
                        child = child_id.index(),
                        frame,
                        "stochastic split"
                    );
                    events.push(ManifoldEvent::StochasticSplit {
                        parent: id,
                        child: child_id,
                        frame,
                    });
                    pending.push(child);
                } else {
                    tracing::trace!(parent = index, frame, "stochastic split dropped at cap");
                    events.push(ManifoldEvent::SplitRejected { parent: id, frame });
                }
            }
        }

        self.loops.append(&mut pending);

        for merged in merge::merge_tips(&mut self.loops, self.config.merge_distance) {
            tracing::debug!(
                survivor = merged.survivor.index(),
                absorbed = merged.absorbed.index(),
                frame,
                "tips merged"
            );
            events.push(ManifoldEvent::Merged {
                survivor: merged.survivor,
                absorbed: merged.absorbed,
                midpoint: merged.midpoint,
                frame,
            });
        }

        TickReport {
            frame,
            points_grown,
            events,
        }
    }

    /// Run `frames` ticks, returning every report.
    pub fn run(&mut self, frames: u64) -> Vec<TickReport> {
        (0..frames).map(|_| self.tick()).collect()
    }

    /// Frames ticked so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn config(&self) -> &ManifoldConfig {
        &self.config
    }

    #[inline]
    pub fn table(&self) -> &FibonacciTable {
        &self.table
    }

    #[inline]
    pub fn grower(&self) -> &Grower {
        &self.grower
    }

    /// All loops, active or not, in creation order.
    #[inline]
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }

    pub fn get(&self, id: LoopId) -> Option<&Loop> {
        self.loops.get(id.index())
    }

    /// Loops with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (LoopId, &Loop)> {
        self.loops.iter().enumerate().map(|(i, lp)| (LoopId(i), lp))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.loops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.loops.iter().filter(|lp| lp.active).count()
    }

    pub fn total_points(&self) -> usize {
        self.loops.iter().map(|lp| lp.points.len()).sum()
    }

    /// Highest tip among active loops; what a follow camera tracks.
    pub fn max_active_tip_z(&self) -> Option<f64> {
        self.loops
            .iter()
            .filter(|lp| lp.active)
            .filter_map(|lp| lp.tip())
            .map(|tip| tip.z)
            .reduce(f64::max)
    }
}
