use chrono::{Local, NaiveDate};

/// Источник "сегодняшней" даты для проверки бронирований.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Локальная календарная дата процесса.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Фиксированная дата, для тестов и воспроизводимых прогонов.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
