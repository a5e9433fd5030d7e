//! Adapter layer: Convert InnerTube search DTOs to domain models

use super::dto;
use crate::resolver::domain::VideoCandidate;

/// First video result in the response, in ranking order.
pub fn first_video(response: dto::SearchResponse) -> Option<VideoCandidate> {
    response
        .contents?
        .two_column_search_results_renderer?
        .primary_contents?
        .section_list_renderer?
        .contents
        .into_iter()
        .filter_map(|section| section.item_section_renderer)
        .flat_map(|section| section.contents)
        .find_map(|item| item.video_renderer)
        .map(to_candidate)
}

fn to_candidate(video: dto::VideoRenderer) -> VideoCandidate {
    let views = video
        .view_count_text
        .as_ref()
        .map(|t| parse_view_count(&t.text()))
        .unwrap_or(0);
    let duration_ms = video
        .length_text
        .as_ref()
        .and_then(|t| parse_duration_ms(&t.text()));

    VideoCandidate {
        url: format!("https://www.youtube.com/watch?v={}", video.video_id),
        id: video.video_id,
        title: video.title.map(|t| t.text()).unwrap_or_default(),
        channel: video.owner_text.map(|t| t.text()),
        views,
        duration_ms,
    }
}

/// "1,234 views" -> 1234, "1.2K watching" -> 1200, "No views" -> 0
///
/// Abbreviated counts ("1.2K") are only understood in English; plain counts
/// accept any digit grouping ("1.234 Aufrufe" -> 1234).
fn parse_view_count(text: &str) -> u64 {
    let Some(token) = text.split_whitespace().next() else {
        return 0;
    };
    let token = token.replace(',', "");

    let (number, multiplier) = match token.chars().last() {
        Some('K' | 'k') => (&token[..token.len() - 1], 1_000.0),
        Some('M' | 'm') => (&token[..token.len() - 1], 1_000_000.0),
        Some('B' | 'b') => (&token[..token.len() - 1], 1_000_000_000.0),
        _ => (token.as_str(), 1.0),
    };

    if multiplier == 1.0 {
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        return digits.parse().unwrap_or(0);
    }
    number
        .parse::<f64>()
        .map(|n| (n * multiplier).round() as u64)
        .unwrap_or(0)
}

/// "3:33" -> 213000, "1:02:03" -> 3723000. `None` if malformed or too large.
fn parse_duration_ms(text: &str) -> Option<u64> {
    let mut seconds: u64 = 0;
    for part in text.trim().split(':') {
        let value: u64 = part.parse().ok()?;
        seconds = seconds.checked_mul(60)?.checked_add(value)?;
    }
    seconds.checked_mul(1000)
}
