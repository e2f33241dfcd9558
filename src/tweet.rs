use chrono::NaiveDate;

use crate::calendar::reference;

/// English ordinal suffix for a dom. Decided on `|n| % 100` so 111 gets
/// "th" while 101 gets "st", matching 11/12/13.
pub fn ordinal_suffix(n: i64) -> &'static str {
    let tail = (n.abs() % 100) as u8;
    if (11..=13).contains(&tail) {
        return "th";
    }
    match tail % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// The line that goes with the image, e.g.
/// "Today is Tuesday the 276th of March, 2020."
pub fn build_tweet(day: NaiveDate) -> String {
    let dom = reference(day);
    let weekday = day.format("%A");
    format!(
        "Today is {weekday} the {dom}{} of March, 2020.",
        ordinal_suffix(dom)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn suffixes_cover_the_awkward_teens() {
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(2), "nd");
        assert_eq!(ordinal_suffix(3), "rd");
        assert_eq!(ordinal_suffix(4), "th");
        assert_eq!(ordinal_suffix(11), "th");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(13), "th");
        assert_eq!(ordinal_suffix(21), "st");
        assert_eq!(ordinal_suffix(101), "st");
        assert_eq!(ordinal_suffix(111), "th");
        assert_eq!(ordinal_suffix(276), "th");
        assert_eq!(ordinal_suffix(365), "th");
        assert_eq!(ordinal_suffix(-2), "nd");
    }

    #[test]
    fn tweet_for_december_first() {
        assert_eq!(
            build_tweet(ymd(2020, 12, 1)),
            "Today is Tuesday the 276th of March, 2020."
        );
    }

    #[test]
    fn tweet_for_the_anniversary() {
        assert_eq!(
            build_tweet(ymd(2021, 2, 28)),
            "Today is Sunday the 365th of March, 2020."
        );
    }

    #[test]
    fn tweet_for_the_real_first_of_march() {
        assert_eq!(
            build_tweet(ymd(2020, 3, 1)),
            "Today is Sunday the 1st of March, 2020."
        );
    }
}
