//! Statistics collected for one decision
//!
//! The anytime driver fills a [`SearchStatistics`] after every decision so
//! callers can see how much work fit into the budget.

use std::time::Duration;

/// Statistics collected while producing one decision
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatistics {
    /// Short name of the engine that ran
    pub engine: &'static str,

    /// Number of completed iterations
    pub iterations: u64,

    /// Wall-clock time spent iterating
    pub total_time: Duration,

    /// Nodes or records held by the engine at the end
    pub size: usize,

    /// Budget the driver was given
    pub budget: Duration,

    /// Whether the last iteration finished after the deadline
    pub overran: bool,
}

impl SearchStatistics {
    /// Creates an empty statistics object for `budget`
    pub fn new(engine: &'static str, budget: Duration) -> Self {
        SearchStatistics {
            engine,
            iterations: 0,
            total_time: Duration::ZERO,
            size: 0,
            budget,
            overran: false,
        }
    }

    /// Returns the average time per iteration in microseconds
    pub fn avg_time_per_iteration_us(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.iterations as f64
    }

    /// Returns the number of iterations per second
    pub fn iterations_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / self.total_time.as_secs_f64()
    }

    /// Time spent past the budget, zero if the deadline was met
    pub fn overrun(&self) -> Duration {
        self.total_time.saturating_sub(self.budget)
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "{} decision:\n\
             - Iterations: {}\n\
             - Total time: {:.3} seconds (budget {:.3})\n\
             - Size: {}\n\
             - Avg time per iteration: {:.3} µs\n\
             - Iterations per second: {:.1}\n\
             - Overran budget: {}",
            self.engine,
            self.iterations,
            self.total_time.as_secs_f64(),
            self.budget.as_secs_f64(),
            self.size,
            self.avg_time_per_iteration_us(),
            self.iterations_per_second(),
            self.overran
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_statistics() {
        let stats = SearchStatistics::new("uct0", Duration::from_millis(10));
        assert_eq!(stats.iterations_per_second(), 0.0);
        assert_eq!(stats.avg_time_per_iteration_us(), 0.0);
        assert_eq!(stats.overrun(), Duration::ZERO);
    }

    #[test]
    fn test_rates_and_overrun() {
        let mut stats = SearchStatistics::new("mcts", Duration::from_millis(500));
        stats.iterations = 1000;
        stats.total_time = Duration::from_secs(2);
        stats.overran = true;

        assert_eq!(stats.iterations_per_second(), 500.0);
        assert_eq!(stats.avg_time_per_iteration_us(), 2000.0);
        assert_eq!(stats.overrun(), Duration::from_millis(1500));

        let summary = stats.summary();
        assert!(summary.starts_with("mcts decision"));
        assert!(summary.contains("Iterations: 1000"));
        assert!(summary.contains("Overran budget: true"));
    }
}
