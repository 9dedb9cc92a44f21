//! GitHub profile score.
//!
//! Two independent formulas exist and are not reconciled:
//! - [`compute_github_score`] is the persisted score (six clamped terms).
//! - [`compute_github_display_score`] is the instant-display score shown before
//!   repositories are aggregated. It reads only user fields, so stars never
//!   count toward it (no star or diversity term, different activity term).

use super::finalize_score;

/// Raw inputs for both GitHub formulas. Absent values are zero / false.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GithubScoreInput {
    pub public_repos: u32,
    pub followers: u32,
    /// Σ stargazers_count over the fetched repositories.
    pub total_stars: u32,
    pub has_bio: bool,
    pub has_company: bool,
    pub has_location: bool,
    pub has_blog: bool,
    pub has_twitter: bool,
    /// Number of distinct languages among the top 5 (0 – 5).
    pub top_language_count: usize,
}

/// Persisted score.
///
/// | term | formula | cap |
/// |---|---|---|
/// | repos | repos/20 × 25 | 25 |
/// | followers | followers/100 × 20 | 20 |
/// | stars | stars/50 × 15 | 15 |
/// | completeness | bio 5, company 3, location 3, blog 2, twitter 2 | 15 |
/// | activity | (stars/repos)/2 × 15 | 15 |
/// | diversity | languages/5 × 10 | 10 |
pub fn compute_github_score(input: &GithubScoreInput) -> u32 {
    let repos = input.public_repos as f64;
    let stars = input.total_stars as f64;

    let avg_stars_per_repo = if input.public_repos > 0 {
        stars / repos
    } else {
        0.0
    };

    let score = repo_term(input)
        + follower_term(input)
        + star_term(input)
        + completeness_term(input)
        + (avg_stars_per_repo / 2.0 * 15.0).min(15.0)
        + (input.top_language_count as f64 / 5.0 * 10.0).min(10.0);

    finalize_score(score)
}

/// Instant-display score: activity = (repos×0.5 + followers×0.1)/10 × 25, capped at 25.
///
/// `total_stars` and `top_language_count` are ignored; the score is computed
/// from the user document alone.
pub fn compute_github_display_score(input: &GithubScoreInput) -> u32 {
    let activity = (input.public_repos as f64 * 0.5 + input.followers as f64 * 0.1) / 10.0 * 25.0;

    let score =
        repo_term(input) + follower_term(input) + completeness_term(input) + activity.min(25.0);

    finalize_score(score)
}

fn repo_term(input: &GithubScoreInput) -> f64 {
    (input.public_repos as f64 / 20.0 * 25.0).min(25.0)
}

fn follower_term(input: &GithubScoreInput) -> f64 {
    (input.followers as f64 / 100.0 * 20.0).min(20.0)
}

fn star_term(input: &GithubScoreInput) -> f64 {
    (input.total_stars as f64 / 50.0 * 15.0).min(15.0)
}

fn completeness_term(input: &GithubScoreInput) -> f64 {
    [
        (input.has_bio, 5.0),
        (input.has_company, 3.0),
        (input.has_location, 3.0),
        (input.has_blog, 2.0),
        (input.has_twitter, 2.0),
    ]
    .iter()
    .filter(|(present, _)| *present)
    .map(|(_, points)| points)
    .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn saturated() -> GithubScoreInput {
        GithubScoreInput {
            public_repos: 20,
            followers: 100,
            total_stars: 50,
            has_bio: true,
            has_company: true,
            has_location: true,
            has_blog: true,
            has_twitter: true,
            top_language_count: 5,
        }
    }

    #[test]
    fn test_all_terms_saturated_scores_100() {
        assert_eq!(compute_github_score(&saturated()), 100);
    }

    #[test]
    fn test_all_zero_scores_0() {
        assert_eq!(compute_github_score(&GithubScoreInput::default()), 0);
        assert_eq!(compute_github_display_score(&GithubScoreInput::default()), 0);
    }

    #[test]
    fn test_terms_are_capped_individually() {
        let input = GithubScoreInput {
            public_repos: 10_000,
            followers: 0,
            ..GithubScoreInput::default()
        };
        // repo term caps at 25, activity is 0 stars / 10_000 repos = 0
        assert_eq!(compute_github_score(&input), 25);
    }

    #[test]
    fn test_completeness_points() {
        let input = GithubScoreInput {
            has_bio: true,
            has_blog: true,
            ..GithubScoreInput::default()
        };
        assert_eq!(compute_github_score(&input), 7);
    }

    #[test]
    fn test_activity_uses_average_stars_per_repo() {
        // 2 repos, 2 stars: star term 0.6, activity (1/2)*15 = 7.5, repo term 2.5 → 10.6
        let input = GithubScoreInput {
            public_repos: 2,
            total_stars: 2,
            ..GithubScoreInput::default()
        };
        assert_eq!(compute_github_score(&input), 11);
    }

    #[test]
    fn test_stars_without_repos_do_not_divide_by_zero() {
        let input = GithubScoreInput {
            public_repos: 0,
            total_stars: 500,
            ..GithubScoreInput::default()
        };
        assert_eq!(compute_github_score(&input), 15);
    }

    #[test]
    fn test_display_score_differs_from_persisted() {
        let input = GithubScoreInput {
            public_repos: 10,
            followers: 50,
            top_language_count: 3,
            ..GithubScoreInput::default()
        };
        // persisted: 12.5 + 10 + 0 + 0 + 0 + 6 = 28.5 → 29
        assert_eq!(compute_github_score(&input), 29);
        // display: 12.5 + 10 + activity (10*0.5 + 50*0.1)/10*25 = 25 → 47.5 → 48
        assert_eq!(compute_github_display_score(&input), 48);
    }

    #[test]
    fn test_score_stays_in_range_for_extreme_inputs() {
        // about 2 stars per repo so the activity term saturates too
        let input = GithubScoreInput {
            public_repos: u32::MAX / 2,
            followers: u32::MAX,
            total_stars: u32::MAX,
            top_language_count: 50,
            ..saturated()
        };
        assert_eq!(compute_github_score(&input), 100);
        // 25 + 20 + 15 + 25, no star term
        assert_eq!(compute_github_display_score(&input), 85);
    }

    #[test]
    fn test_repos_equal_to_stars_halves_activity() {
        let input = GithubScoreInput {
            public_repos: u32::MAX,
            total_stars: u32::MAX,
            ..saturated()
        };
        // 25 + 20 + 15 + 15 + 7.5 + 10 = 92.5
        assert_eq!(compute_github_score(&input), 93);
    }

    #[test]
    fn test_display_score_ignores_stars() {
        let starless = GithubScoreInput {
            public_repos: 4,
            followers: 10,
            has_bio: true,
            ..GithubScoreInput::default()
        };
        let starred = GithubScoreInput {
            total_stars: 500,
            top_language_count: 5,
            ..starless.clone()
        };
        assert_eq!(
            compute_github_display_score(&starred),
            compute_github_display_score(&starless)
        );
        // repos 5 + followers 2 + bio 5 + activity 7.5 = 19.5
        assert_eq!(compute_github_display_score(&starless), 20);
        assert!(compute_github_score(&starred) > compute_github_score(&starless));
    }
}
