use chrono::{Duration, NaiveDateTime, NaiveTime};

/// Inclusive time window for history queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Period {
    /// Read a period argument such as `неделя`, `за 3`, `вчера` or `2-5`.
    ///
    /// A bare number is "the last N days". A range `A-B` covers the days from
    /// B days ago up to A-1 days ago. Returns `None` for anything unrecognised.
    pub fn parse(arg: &str, now: NaiveDateTime) -> Option<Period> {
        let lower = arg.trim().to_lowercase();
        let arg = lower.strip_prefix("за ").map(str::trim).unwrap_or(lower.as_str());
        if arg.is_empty() {
            return None;
        }

        if let Ok(days) = arg.parse::<i64>() {
            if days <= 0 {
                return None;
            }
            return Some(Period {
                start: days_before(now, days)?,
                end: now,
            });
        }

        let today = now.date().and_time(NaiveTime::MIN);
        let second = Duration::seconds(1);
        match arg {
            "сегодня" | "день" => {
                return Some(Period { start: today, end: now });
            }
            "вчера" => {
                return Some(Period {
                    start: days_before(today, 1)?,
                    end: today - second,
                });
            }
            "позавчера" => {
                let yesterday = days_before(today, 1)?;
                return Some(Period {
                    start: days_before(today, 2)?,
                    end: yesterday - second,
                });
            }
            "неделя" | "неделю" => {
                return Some(Period { start: days_before(now, 7)?, end: now });
            }
            "месяц" => {
                return Some(Period { start: days_before(now, 30)?, end: now });
            }
            "год" => {
                return Some(Period { start: days_before(now, 365)?, end: now });
            }
            _ => {}
        }

        let (from, to) = arg.split_once('-')?;
        let mut from: i64 = from.trim().parse().ok()?;
        let mut to: i64 = to.trim().parse().ok()?;
        if from <= 0 || to <= 0 {
            return None;
        }
        if from > to {
            std::mem::swap(&mut from, &mut to);
        }
        Some(Period {
            start: days_before(now, to)?,
            end: days_before(now, from - 1)?,
        })
    }
}

fn days_before(at: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    at.checked_sub_signed(Duration::try_days(days)?)
}
