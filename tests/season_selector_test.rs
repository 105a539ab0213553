//! Season selection tests
//!
//! Date-anchored selection against realistic TMDB season listings.

mod utils;

use seasonmap::modules::matching::{
    day_difference, select_best_season, SeasonCandidate, SeasonSelector, Selection, ToleranceDays,
};
use seasonmap::shared::AppError;
use utils::factories::{date, SeasonListFactory};

fn tolerance(days: i64) -> ToleranceDays {
    ToleranceDays::new(days).unwrap()
}

#[test]
fn single_candidate_within_tolerance_is_selected() {
    let seasons = SeasonListFactory::new()
        .season_with_id(1, 3628, Some("2013-04-07"))
        .season_with_id(2, 85987, Some("2017-04-02"))
        .build();

    let result = select_best_season(Some(date("2017-04-01")), &seasons, tolerance(7));

    assert_eq!(result.season_id(), Some(85987));
    assert_eq!(result.season_number(), Some(2));
    assert_eq!(result.matched_date(), Some(date("2017-04-02")));
    assert_eq!(result.day_difference(), Some(1));
}

#[test]
fn candidate_outside_tolerance_gives_absent_result() {
    let seasons = SeasonListFactory::new()
        .season(1, Some("2005-01-01"))
        .build();

    let result = select_best_season(Some(date("2017-04-01")), &seasons, tolerance(7));
    assert!(result.is_absent());
}

#[test]
fn empty_listing_gives_absent_result() {
    let result = select_best_season(Some(date("2017-04-01")), &[], ToleranceDays::DEFAULT);
    assert!(result.is_absent());
}

#[test]
fn absent_anchor_gives_absent_result() {
    let seasons = SeasonListFactory::attack_on_titan().build();
    let result = select_best_season(None, &seasons, ToleranceDays::DEFAULT);
    assert!(result.is_absent());
}

#[test]
fn equal_distances_go_to_first_listed() {
    let seasons = SeasonListFactory::new()
        .season_with_id(1, 11, Some("2020-01-07"))
        .season_with_id(2, 22, Some("2020-01-01"))
        .build();
    let anchor = Some(date("2020-01-04"));

    let first = select_best_season(anchor, &seasons, ToleranceDays::DEFAULT);
    let again = select_best_season(anchor, &seasons, ToleranceDays::DEFAULT);

    assert_eq!(first.season_id(), Some(11));
    assert_eq!(first.day_difference(), Some(3));
    assert_eq!(first, again);

    let reversed: Vec<SeasonCandidate> = seasons.into_iter().rev().collect();
    let flipped = select_best_season(anchor, &reversed, ToleranceDays::DEFAULT);
    assert_eq!(flipped.season_id(), Some(22));
}

#[test]
fn closer_candidate_wins_regardless_of_order() {
    let seasons = SeasonListFactory::attack_on_titan().build();
    let result = select_best_season(Some(date("2018-07-22")), &seasons, ToleranceDays::DEFAULT);
    assert_eq!(result.season_number(), Some(3));
    assert_eq!(result.day_difference(), Some(1));
}

#[test]
fn undated_seasons_are_ignored() {
    let seasons = SeasonListFactory::new()
        .season(1, None)
        .season_with_id(2, 42, Some("2021-10-03"))
        .season(3, None)
        .build();

    let result = select_best_season(Some(date("2021-10-01")), &seasons, ToleranceDays::DEFAULT);
    assert_eq!(result.season_id(), Some(42));
}

#[test]
fn specials_participate_like_any_season() {
    let seasons = SeasonListFactory::attack_on_titan().build();
    let result = select_best_season(Some(date("2013-07-08")), &seasons, ToleranceDays::DEFAULT);
    assert_eq!(result.season_number(), Some(0));
}

#[test]
fn tolerance_is_inclusive() {
    let seasons = SeasonListFactory::new()
        .season(1, Some("2017-04-08"))
        .build();
    let anchor = Some(date("2017-04-01"));

    assert!(!select_best_season(anchor, &seasons, tolerance(7)).is_absent());
    assert!(select_best_season(anchor, &seasons, tolerance(6)).is_absent());
}

#[test]
fn zero_tolerance_needs_exact_date() {
    let seasons = SeasonListFactory::new()
        .season(1, Some("2017-04-01"))
        .season(2, Some("2017-04-02"))
        .build();

    let result = select_best_season(Some(date("2017-04-01")), &seasons, tolerance(0));
    assert_eq!(result.season_number(), Some(1));
    assert_eq!(result.day_difference(), Some(0));
}

#[test]
fn evaluate_names_why_nothing_matched() {
    let selector = SeasonSelector::new(ToleranceDays::DEFAULT);
    let anchor = Some(date("2017-04-01"));

    assert_eq!(
        selector.evaluate(None, &SeasonListFactory::attack_on_titan().build()),
        Selection::NoAnchor
    );
    assert_eq!(selector.evaluate(anchor, &[]), Selection::NoCandidates);
    assert_eq!(
        selector.evaluate(anchor, &SeasonListFactory::new().season(1, None).build()),
        Selection::NoDatedCandidates
    );
    assert_eq!(
        selector.evaluate(
            anchor,
            &SeasonListFactory::new().season(1, Some("2005-01-01")).build()
        ),
        Selection::ToleranceMiss {
            closest_days: day_difference(date("2017-04-01"), date("2005-01-01"))
        }
    );
}

#[test]
fn day_difference_is_symmetric() {
    let a = date("2013-04-07");
    let b = date("2017-04-01");
    assert_eq!(day_difference(a, a), 0);
    assert_eq!(day_difference(a, b), day_difference(b, a));
    assert_eq!(day_difference(date("2020-02-28"), date("2020-03-01")), 2);
}

#[test]
fn negative_tolerance_is_rejected() {
    assert!(matches!(
        ToleranceDays::new(-1),
        Err(AppError::InvalidInput(_))
    ));
}

#[test]
fn malformed_dates_never_reach_the_selector() {
    assert!(matches!(
        "2017-13-01".parse::<seasonmap::modules::matching::AnchorDate>(),
        Err(AppError::InvalidInput(_))
    ));
}
