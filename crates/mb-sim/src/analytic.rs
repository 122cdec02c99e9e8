//! Exact red-count distributions
//!
//! Without replacement the red count of a finished game is hypergeometric
//! over `min(max_draws, bag size)` draws (a bag that empties early has been
//! drawn completely). With replacement it is binomial over `max_draws` draws
//! with `p = red / total`.

use mb_lab::ExperimentConfig;

/// Number of draws a finished game always has
pub fn draws_per_game(config: &ExperimentConfig) -> u32 {
    if config.with_replacement {
        config.max_draws
    } else {
        config.max_draws.min(config.total_marbles())
    }
}

/// `P(red_pulled == k)` for `k` in `0..=draws_per_game`
pub fn red_count_distribution(config: &ExperimentConfig) -> Vec<f64> {
    let n = draws_per_game(config) as u64;
    let red = config.total_red as u64;
    let total = config.total_marbles() as u64;

    if config.with_replacement {
        binomial(n, red as f64 / total as f64)
    } else {
        hypergeometric(n, red, total)
    }
}

/// Probability of finishing inside the winning range
pub fn win_probability(config: &ExperimentConfig) -> f64 {
    red_count_distribution(config)
        .iter()
        .enumerate()
        .filter(|(k, _)| config.is_winning_count(*k as u32))
        .map(|(_, p)| p)
        .sum()
}

/// Expected red count of a finished game
pub fn expected_red(config: &ExperimentConfig) -> f64 {
    red_count_distribution(config)
        .iter()
        .enumerate()
        .map(|(k, p)| k as f64 * p)
        .sum()
}

fn ln_choose(n: u64, k: u64) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    let k = k.min(n - k);
    (1..=k)
        .map(|i| ((n - k + i) as f64 / i as f64).ln())
        .sum()
}

fn hypergeometric(n: u64, red: u64, total: u64) -> Vec<f64> {
    let blue = total - red;
    let ln_all = ln_choose(total, n);
    (0..=n)
        .map(|k| {
            if k > red || n - k > blue {
                0.0
            } else {
                (ln_choose(red, k) + ln_choose(blue, n - k) - ln_all).exp()
            }
        })
        .collect()
}

fn binomial(n: u64, p: f64) -> Vec<f64> {
    let mut dist = vec![0.0; n as usize + 1];
    if p <= 0.0 {
        dist[0] = 1.0;
        return dist;
    }
    if p >= 1.0 {
        dist[n as usize] = 1.0;
        return dist;
    }
    let (ln_p, ln_q) = (p.ln(), (1.0 - p).ln());
    for (k, slot) in dist.iter_mut().enumerate() {
        let k = k as u64;
        *slot = (ln_choose(n, k) + k as f64 * ln_p + (n - k) as f64 * ln_q).exp();
    }
    dist
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_game_one_exact_odds() {
        // 1 - [C(19,5) + 6·C(19,4)] / C(25,5)
        let config = ExperimentConfig::no_replacement();
        let expected = 1.0 - (11_628.0 + 6.0 * 3_876.0) / 53_130.0;
        assert_abs_diff_eq!(win_probability(&config), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_game_two_exact_odds() {
        let config = ExperimentConfig::with_replacement();
        let (p, q) = (0.4f64, 0.6f64);
        let losing = q.powi(10)
            + 10.0 * p * q.powi(9)
            + 45.0 * p.powi(2) * q.powi(8)
            + 10.0 * p.powi(9) * q
            + p.powi(10);
        assert_abs_diff_eq!(win_probability(&config), 1.0 - losing, epsilon = 1e-9);
    }

    #[test]
    fn test_distributions_sum_to_one() {
        for config in [
            ExperimentConfig::no_replacement(),
            ExperimentConfig::with_replacement(),
        ] {
            let total: f64 = red_count_distribution(&config).iter().sum();
            assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_drained_bag_is_certain() {
        // 4 marbles, 5-draw budget: the whole bag is always drawn.
        let config = ExperimentConfig {
            total_red: 1,
            total_blue: 3,
            with_replacement: false,
            max_draws: 5,
            min_red_to_win: 1,
            max_red_to_win: 4,
        };
        assert_eq!(draws_per_game(&config), 4);
        let dist = red_count_distribution(&config);
        assert_abs_diff_eq!(dist[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(win_probability(&config), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_all_red_with_replacement() {
        let config = ExperimentConfig {
            total_red: 5,
            total_blue: 0,
            with_replacement: true,
            max_draws: 3,
            min_red_to_win: 0,
            max_red_to_win: 2,
        };
        assert_eq!(red_count_distribution(&config), vec![0.0, 0.0, 0.0, 1.0]);
        assert_eq!(win_probability(&config), 0.0);
    }

    #[test]
    fn test_expected_red_game_one() {
        // Hypergeometric mean n·R/N = 5·6/25
        let config = ExperimentConfig::no_replacement();
        assert_abs_diff_eq!(expected_red(&config), 1.2, epsilon = 1e-9);
    }
}
