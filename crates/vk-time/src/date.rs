//! `Date` type.
//!
//! Dates are stored as a serial number of days.  Serial 1 is
//! January 1, 1900; serial 0 is the null-date sentinel.  The valid range is
//! 1900-01-01 to 2199-12-31, which also defines [`Date::MAX`], the maximum
//! date reported by curves with an unbounded domain.

use vk_core::errors::{Error, Result};

/// A calendar date represented as a serial number.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Date(i32);

/// Days from 0000-03-01 to 1899-12-31 in the proleptic Gregorian calendar.
const EPOCH_OFFSET: i32 = 693_900;

const MIN_YEAR: u16 = 1900;
const MAX_YEAR: u16 = 2199;

impl Date {
    /// The null date sentinel (serial 0).
    pub const NULL: Date = Date(0);

    /// Minimum valid date: January 1, 1900.
    pub const MIN: Date = Date(1);

    /// Maximum valid date: December 31, 2199.
    pub const MAX: Date = Date(109_573);

    /// Create a date from a serial number.
    ///
    /// # Errors
    /// [`Error::Date`] if `serial` is not positive or exceeds [`Date::MAX`].
    pub fn from_serial(serial: i32) -> Result<Self> {
        if serial <= 0 || serial > Self::MAX.0 {
            return Err(Error::Date(format!("serial {serial} out of range")));
        }
        Ok(Date(serial))
    }

    /// Create a date from year, month (1–12) and day-of-month.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::Date(format!(
                "year {year} out of range [{MIN_YEAR}, {MAX_YEAR}]"
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::Date(format!("month {month} out of range [1, 12]")));
        }
        let last = days_in_month(year, month);
        if day == 0 || day > last {
            return Err(Error::Date(format!(
                "day {day} out of range [1, {last}] for {year}-{month:02}"
            )));
        }
        Ok(Date(civil_to_days(year, month, day) - EPOCH_OFFSET))
    }

    /// The serial number.
    pub fn serial(&self) -> i32 {
        self.0
    }

    /// `true` for the null date sentinel.
    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    /// Year, month and day-of-month.
    pub fn ymd(&self) -> (u16, u8, u8) {
        days_to_civil(self.0 + EPOCH_OFFSET)
    }

    /// The year (1900–2199).
    pub fn year(&self) -> u16 {
        self.ymd().0
    }

    /// The month (1–12).
    pub fn month(&self) -> u8 {
        self.ymd().1
    }

    /// The day of the month (1–31).
    pub fn day_of_month(&self) -> u8 {
        self.ymd().2
    }

    /// Advance by `n` calendar days.
    ///
    /// # Errors
    /// [`Error::Date`] if the result leaves the valid range.
    pub fn add_days(self, n: i32) -> Result<Self> {
        Self::from_serial(self.0 + n)
            .map_err(|_| Error::Date(format!("{self:?} + {n} days is out of range")))
    }

    /// Advance by `n` calendar months, clamping the day to the end of the
    /// target month.
    pub fn add_months(self, n: i32) -> Result<Self> {
        let (y, m, d) = self.ymd();
        let total = y as i32 * 12 + (m as i32 - 1) + n;
        let year = total.div_euclid(12);
        let month = (total.rem_euclid(12) + 1) as u8;
        let year = u16::try_from(year)
            .map_err(|_| Error::Date(format!("year {year} out of range")))?;
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::Date(format!("year {year} out of range")));
        }
        Self::from_ymd(year, month, d.min(days_in_month(year, month)))
    }

    /// Advance by `n` years.
    pub fn add_years(self, n: i32) -> Result<Self> {
        self.add_months(12 * n)
    }

    /// Number of calendar days from `self` to `other` (positive if
    /// `other > self`).
    pub fn days_between(self, other: Date) -> i32 {
        other.0 - self.0
    }
}

impl std::ops::Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> i32 {
        self.0 - rhs.0
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return write!(f, "null date");
        }
        let (y, m, d) = self.ymd();
        const MONTHS: [&str; 12] = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ];
        write!(f, "{} {} {y}", d, MONTHS[m as usize - 1])
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            return write!(f, "Date(null)");
        }
        let (y, m, d) = self.ymd();
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

/// Whether `year` is a leap year.
pub fn is_leap_year(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

// Days since 0000-03-01 (shifted year starting in March).
fn civil_to_days(year: u16, month: u8, day: u8) -> i32 {
    let m = month as i32;
    let y = year as i32 - i32::from(m <= 2);
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (m + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day as i32 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe
}

fn days_to_civil(days: i32) -> (u16, u8, u8) {
    let era = days.div_euclid(146_097);
    let doe = days - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let y = yoe + era * 400 + i32::from(m <= 2);
    (y as u16, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_and_bounds() {
        assert_eq!(Date::from_ymd(1900, 1, 1).unwrap().serial(), 1);
        assert_eq!(Date::from_ymd(2199, 12, 31).unwrap(), Date::MAX);
        assert_eq!(Date::MAX.ymd(), (2199, 12, 31));
    }

    #[test]
    fn known_serial() {
        // 1 January 2000 has serial 36525.
        assert_eq!(Date::from_ymd(2000, 1, 1).unwrap().serial(), 36_525);
    }

    #[test]
    fn roundtrip_edge_dates() {
        for (y, m, d) in [(1900, 2, 28), (1900, 3, 1), (2000, 2, 29), (2100, 2, 28)] {
            assert_eq!(Date::from_ymd(y, m, d).unwrap().ymd(), (y, m, d));
        }
    }

    #[test]
    fn rejects_invalid_components() {
        assert!(Date::from_ymd(1900, 2, 29).is_err());
        assert!(Date::from_ymd(2023, 13, 1).is_err());
        assert!(Date::from_ymd(2200, 1, 1).is_err());
        assert!(Date::from_serial(0).is_err());
    }

    #[test]
    fn month_arithmetic_clamps() {
        let d = Date::from_ymd(2023, 1, 31).unwrap();
        assert_eq!(d.add_months(1).unwrap().ymd(), (2023, 2, 28));
        assert_eq!(d.add_months(-2).unwrap().ymd(), (2022, 11, 30));
        assert_eq!(d.add_years(1).unwrap().ymd(), (2024, 1, 31));
    }

    #[test]
    fn day_arithmetic() {
        let d = Date::from_ymd(2023, 1, 1).unwrap();
        let next = d.add_days(31).unwrap();
        assert_eq!(next.ymd(), (2023, 2, 1));
        assert_eq!(next - d, 31);
        assert!(Date::MAX.add_days(1).is_err());
    }

    #[test]
    fn display() {
        let d = Date::from_ymd(2024, 3, 20).unwrap();
        assert_eq!(d.to_string(), "20 March 2024");
        assert_eq!(format!("{d:?}"), "Date(2024-03-20)");
    }
}
