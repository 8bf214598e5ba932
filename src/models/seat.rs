use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Максимум рядов: каждый ряд адресуется одной буквой A..Z.
pub const MAX_ROWS: u32 = 26;

/// Максимум мест в ряду.
pub const MAX_COLUMNS: u32 = 200;

/// Код места из индексов: ряд 0, колонка 0 -> "A1".
/// Ряд должен быть меньше `MAX_ROWS`.
pub fn seat_code(row: u32, column: u32) -> String {
    debug_assert!(row < MAX_ROWS, "row {} has no letter", row);
    let letter = char::from(b'A' + row as u8);
    format!("{}{}", letter, column + 1)
}

/// Разбирает код места обратно в (ряд, колонка), индексы с нуля.
pub fn parse_seat_code(code: &str) -> Option<(u32, u32)> {
    let mut chars = code.chars();
    let letter = chars.next()?;
    if !letter.is_ascii_uppercase() {
        return None;
    }
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) || digits.starts_with('0') {
        return None;
    }
    let number: u32 = digits.parse().ok()?;
    Some((u32::from(letter as u8 - b'A'), number - 1))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatLayout {
    pub rows: u32,
    pub columns: u32,
    #[serde(default)]
    pub unavailable_seats: BTreeSet<String>,
}

impl SeatLayout {
    pub fn new<I, S>(rows: u32, columns: u32, unavailable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows,
            columns,
            unavailable_seats: unavailable.into_iter().map(Into::into).collect(),
        }
    }

    /// Место закрыто для продажи, только если оно в списке недоступных.
    /// Границы зала здесь не проверяются, для этого есть `contains`.
    pub fn is_seat_available(&self, seat: &str) -> bool {
        !self.unavailable_seats.contains(seat)
    }

    pub fn contains(&self, seat: &str) -> bool {
        match parse_seat_code(seat) {
            Some((row, column)) => row < self.rows && column < self.columns,
            None => false,
        }
    }

    /// Все коды мест построчно: A1, A2, ..., B1, ...
    pub fn seat_codes(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.columns).map(move |col| seat_code(row, col)))
    }
}
