use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

pub fn long_date(date: NaiveDate) -> String {
    format!(
        "{} de {} de {}",
        date.day(),
        MONTHS_PT_BR[date.month0() as usize],
        date.year()
    )
}

pub fn short_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn local_date(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn long_date_spells_month_in_portuguese() {
        assert_eq!(long_date(date(2026, 10, 19)), "19 de outubro de 2026");
        assert_eq!(long_date(date(2025, 3, 1)), "1 de março de 2025");
    }

    #[test]
    fn short_date_is_day_month_year() {
        assert_eq!(short_date(date(2026, 1, 5)), "05/01/2026");
    }
}
