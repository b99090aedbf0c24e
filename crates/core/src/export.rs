//! CSV export of raw responses.
//!
//! One header row (`Response ID`, `Submitted At`, one column per
//! question), one row per response. Every cell is double-quote-wrapped;
//! sequence answers are joined with `"; "`; missing answers render as
//! empty cells.

use chrono::Local;
use formpulse_store::models::{AnswerValue, Survey, SurveyResponse};

/// The suggested download filename for a survey's export.
///
/// The filename ends up inside a `Content-Disposition` header, where
/// control characters are rejected outright and an embedded quote would
/// terminate the filename parameter early. Both are replaced with `_`.
#[must_use]
pub fn export_filename(title: &str) -> String {
    let safe: String = title
        .chars()
        .map(|c| if c.is_control() || c == '"' { '_' } else { c })
        .collect();
    format!("{safe}_responses.csv")
}

/// Render the full CSV document.
#[must_use]
pub fn export_csv(survey: &Survey, responses: &[SurveyResponse]) -> String {
    let mut header: Vec<String> = vec!["Response ID".to_string(), "Submitted At".to_string()];
    header.extend(
        survey
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| format!("Q{}: {}", i + 1, q.label)),
    );

    let mut rows = vec![render_row(&header)];
    for response in responses {
        let mut row: Vec<String> = vec![
            response.id.clone(),
            response
                .created_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        ];
        row.extend(survey.questions.iter().map(|question| {
            match response.answers.get(&question.id) {
                Some(AnswerValue::One(value)) => value.clone(),
                Some(AnswerValue::Many(values)) => values.join("; "),
                None => String::new(),
            }
        }));
        rows.push(render_row(&row));
    }

    rows.join("\n")
}

/// Quote-wrap every cell; embedded quotes are doubled.
fn render_row(cells: &[String]) -> String {
    cells
        .iter()
        .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(",")
}
