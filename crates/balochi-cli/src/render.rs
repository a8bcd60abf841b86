//! Text rendering of rounds.

use std::fmt::Write as _;

use balochi_core::{Card, Item};
use owo_colors::OwoColorize;

const KEYS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Key that selects `position`.
pub fn key_for(position: usize) -> char {
    KEYS.get(position).map(|&k| k as char).unwrap_or('?')
}

/// Position selected by `key`.
pub fn position_for(key: char) -> Option<usize> {
    KEYS.iter().position(|&k| k as char == key.to_ascii_lowercase())
}

/// Memory cards as a grid, `columns` cards per row.
pub fn cards(cards: &[Card], columns: usize) -> String {
    let mut out = String::new();
    for (row, chunk) in cards.chunks(columns.max(1)).enumerate() {
        for (col, card) in chunk.iter().enumerate() {
            let position = row * columns + col;
            let cell = match card.visible_image() {
                None => format!("[{}] {:<22}", key_for(position), "????"),
                Some(image) if card.is_paired() => {
                    format!("[{}] {:<22}", key_for(position), image.as_str().green())
                }
                Some(image) => format!("[{}] {:<22}", key_for(position), image.as_str().yellow()),
            };
            let _ = write!(out, "{}", cell);
        }
        out.push_str("\r\n");
    }
    out
}

/// Round items, one per line. Consumed items are dimmed.
pub fn items(items: &[Item]) -> String {
    let mut out = String::new();
    for (position, item) in items.iter().enumerate() {
        if item.is_consumed() {
            let _ = write!(out, "[{}] {}", key_for(position), item.image().as_str().dimmed());
        } else {
            let _ = write!(out, "[{}] {}", key_for(position), item.image().as_str().bold());
        }
        out.push_str("\r\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_for(0), 'a');
        assert_eq!(key_for(13), 'n');
        assert_eq!(key_for(40), '?');
        assert_eq!(position_for('c'), Some(2));
        assert_eq!(position_for('C'), Some(2));
        assert_eq!(position_for('1'), None);
    }
}
