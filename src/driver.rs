//! Anytime policy driver
//!
//! The driver repeats engine iterations until a wall-clock deadline passes
//! and then reads the recommendation off the engine. The deadline is only
//! checked between iterations, so at least one iteration always completes
//! and a decision may run past its budget by up to one iteration.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{
    config::SearchConfig,
    game_state::GameState,
    heuristic::{Heuristic, WindowHeuristic},
    search::{AlphaBeta, EdgeUct, PlainMcts, SearchEngine, StateUct, TreeUct},
    stats::SearchStatistics,
    Result, SearchError,
};

/// Runs engines against a time budget
pub struct AnytimeDriver {
    config: SearchConfig,
    rng: StdRng,
    statistics: Option<SearchStatistics>,
}

impl AnytimeDriver {
    /// Creates a driver from a validated configuration
    ///
    /// A configured seed makes every run reproducible; without one the
    /// random source is seeded from entropy.
    pub fn new(config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(AnytimeDriver {
            config: config.clone(),
            rng,
            statistics: None,
        })
    }

    /// The configuration this driver runs with
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Iterates `engine` until the deadline passes, at least once
    pub fn run<S, E>(&mut self, engine: &mut E) -> Result<SearchStatistics>
    where
        S: GameState,
        E: SearchEngine<S> + ?Sized,
    {
        let budget = self.config.time_budget;
        let start = Instant::now();
        let deadline = start + budget;
        let mut stats = SearchStatistics::new(engine.name(), budget);

        loop {
            engine.iterate(&mut self.rng)?;
            stats.iterations += 1;
            if Instant::now() >= deadline {
                break;
            }
        }

        stats.total_time = start.elapsed();
        stats.size = engine.size();
        stats.overran = stats.total_time > budget;

        debug!(
            "{}: {} iterations in {:?} (size {}, overran: {})",
            stats.engine, stats.iterations, stats.total_time, stats.size, stats.overran
        );

        self.statistics = Some(stats.clone());
        Ok(stats)
    }

    /// Runs `engine` to the deadline and returns its recommendation
    ///
    /// # Errors
    ///
    /// [`SearchError::NoLegalActions`] if the root is terminal, plus any
    /// error raised by the engine.
    pub fn decide<S, E>(&mut self, engine: &mut E) -> Result<S::Action>
    where
        S: GameState,
        E: SearchEngine<S> + ?Sized,
    {
        let root = engine.root_state();
        if root.is_terminal() || root.legal_actions().is_empty() {
            return Err(SearchError::NoLegalActions);
        }

        self.run::<S, E>(engine)?;
        engine.recommend(self.config.perspective)
    }

    /// Statistics of the most recent run
    pub fn last_statistics(&self) -> Option<&SearchStatistics> {
        self.statistics.as_ref()
    }
}

/// The available search policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// Plain Monte Carlo tree search
    Mcts,
    /// UCT over an explicit tree
    TreeUct,
    /// UCT over state-keyed records with per-action statistics
    EdgeUct,
    /// UCT over state-keyed records with pooled per-state statistics
    StateUct,
    /// Depth-bounded alpha-beta with the window heuristic
    AlphaBeta,
}

impl PolicyKind {
    /// Every policy, in the order they are usually listed
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::Mcts,
        PolicyKind::TreeUct,
        PolicyKind::EdgeUct,
        PolicyKind::StateUct,
        PolicyKind::AlphaBeta,
    ];

    /// Short policy name
    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Mcts => "mcts",
            PolicyKind::TreeUct => "uct0",
            PolicyKind::EdgeUct => "uct1",
            PolicyKind::StateUct => "uct2",
            PolicyKind::AlphaBeta => "alphabeta",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PolicyKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        PolicyKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SearchError::InvalidConfiguration(format!("unknown policy: {}", s)))
    }
}

/// A decision function: state in, recommended action out
pub type DecisionFn<S> = Box<dyn FnMut(&S) -> Result<<S as GameState>::Action>>;

/// Builds a fresh engine of `kind` rooted at `root`
pub fn build_engine<S, H>(
    kind: PolicyKind,
    root: S,
    config: &SearchConfig,
    heuristic: H,
) -> Box<dyn SearchEngine<S>>
where
    S: GameState + 'static,
    H: Heuristic<S> + 'static,
{
    let c = config.exploration_constant;
    match kind {
        PolicyKind::Mcts => Box::new(PlainMcts::plain(root)),
        PolicyKind::TreeUct => Box::new(TreeUct::uct(root, c)),
        PolicyKind::EdgeUct => Box::new(EdgeUct::new(root, c)),
        PolicyKind::StateUct => Box::new(StateUct::new(root, c)),
        PolicyKind::AlphaBeta => Box::new(AlphaBeta::new(
            root,
            heuristic,
            config.depth,
            config.perspective,
        )),
    }
}

/// Creates a decision function for `kind` using the window heuristic
///
/// Each call builds a fresh engine for the given state, runs it for the
/// configured budget and returns the recommended action for the configured
/// perspective.
pub fn policy<S>(kind: PolicyKind, config: SearchConfig) -> Result<DecisionFn<S>>
where
    S: GameState + 'static,
    WindowHeuristic: Heuristic<S>,
{
    policy_with_heuristic(kind, config, WindowHeuristic::new())
}

/// Creates a decision function for `kind` with a custom cutoff heuristic
pub fn policy_with_heuristic<S, H>(
    kind: PolicyKind,
    config: SearchConfig,
    heuristic: H,
) -> Result<DecisionFn<S>>
where
    S: GameState + 'static,
    H: Heuristic<S> + Clone + 'static,
{
    let mut driver = AnytimeDriver::new(&config)?;
    Ok(Box::new(move |state: &S| {
        let mut engine = build_engine(kind, state.clone(), &config, heuristic.clone());
        driver.decide::<S, _>(engine.as_mut())
    }))
}
