// Unit tests for HH:MM parsing and grid positions
// Exercises the public time helpers the grid and drag controller build on

use pretty_assertions::assert_eq;
use schedulr::models::settings::GridSettings;
use schedulr::utils::time::{
    duration_hours, duration_minutes, hour_position, minutes_to_time, time_to_minutes, TimeError,
};
use test_case::test_case;

#[test_case("00:00", 0 ; "midnight")]
#[test_case("08:00", 480 ; "grid start")]
#[test_case("09:30", 570 ; "half past nine")]
#[test_case("9:05", 545 ; "single digit hour")]
#[test_case("21:00", 1260 ; "grid end")]
#[test_case("23:59", 1439 ; "last minute")]
#[test_case("25:00", 1500 ; "hours are not capped")]
fn test_time_to_minutes(input: &str, expected: i32) {
    assert_eq!(time_to_minutes(input), Ok(expected));
}

#[test_case("" ; "empty")]
#[test_case("0900" ; "missing colon")]
#[test_case("09:60" ; "minute overflow")]
#[test_case("-1:00" ; "negative hour")]
#[test_case("09:3a" ; "letter in minutes")]
#[test_case(" 9:00" ; "leading space")]
#[test_case("09:" ; "missing minutes")]
#[test_case("09:00:00" ; "seconds")]
fn test_time_to_minutes_rejects(input: &str) {
    assert_eq!(
        time_to_minutes(input),
        Err(TimeError::InvalidFormat(input.to_string()))
    );
}

#[test_case(0, "00:00")]
#[test_case(5, "00:05")]
#[test_case(845, "14:05")]
#[test_case(1260, "21:00")]
#[test_case(-30, "00:00" ; "negative clamps")]
#[test_case(1500, "25:00" ; "no wraparound")]
fn test_minutes_to_time(minutes: i32, expected: &str) {
    assert_eq!(minutes_to_time(minutes), expected);
}

#[test]
fn test_every_minute_of_the_day_round_trips() {
    for minutes in 0..24 * 60 {
        assert_eq!(time_to_minutes(&minutes_to_time(minutes)), Ok(minutes));
    }
}

#[test_case("08:00", 0.0)]
#[test_case("09:30", 1.5)]
#[test_case("14:05", 6.083_333)]
#[test_case("07:00", -1.0 ; "before the grid")]
fn test_hour_position_default_grid(time: &str, expected: f32) {
    let position = hour_position(time, &GridSettings::default()).unwrap();
    assert!((position - expected).abs() < 1e-4, "{position} != {expected}");
}

#[test]
fn test_hour_position_custom_grid() {
    let grid = GridSettings {
        start_hour: 7,
        end_hour: 19,
    };
    assert_eq!(hour_position("07:45", &grid), Ok(0.75));
}

#[test]
fn test_durations() {
    assert_eq!(duration_minutes("09:00", "10:30"), Ok(90));
    assert_eq!(duration_hours("09:00", "10:30"), Ok(1.5));
    assert_eq!(duration_minutes("10:30", "09:00"), Ok(-90));
    assert!(duration_hours("09:00", "bad").is_err());
}
