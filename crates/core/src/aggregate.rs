//! Aggregation engine.
//!
//! Turns a survey and its fetched responses into chart-ready shapes:
//! per-question histograms or raw answer lists, plus a
//! response-count-by-day series.

use chrono::{Local, NaiveDate};
use formpulse_store::models::{AnswerValue, QuestionType, Survey, SurveyResponse};
use serde::Serialize;

/// Number of distinct dates kept in the daily series.
const DAILY_WINDOW: usize = 7;

/// Count for one declared option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionCount {
    /// The declared option label.
    pub option: String,
    /// Number of selections.
    pub count: u64,
}

/// Per-question aggregate shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum QuestionBreakdown {
    /// Choice questions: option → count histogram over the declared
    /// options, zero-count options included.
    Histogram {
        /// Buckets in declared-option order.
        buckets: Vec<OptionCount>,
    },
    /// Text questions: the raw non-empty answers, in response order.
    Texts {
        /// Verbatim answers.
        answers: Vec<String>,
    },
}

/// Aggregate for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    /// Question identifier.
    pub question_id: String,
    /// Question label.
    pub label: String,
    /// Question type.
    pub kind: QuestionType,
    /// Responses counted into this question's aggregate.
    pub answered: u64,
    /// Histogram or raw answer list.
    #[serde(flatten)]
    pub breakdown: QuestionBreakdown,
}

/// Responses submitted on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    /// Calendar date in the producing runtime's time zone.
    pub date: NaiveDate,
    /// Responses submitted on that date.
    pub count: u64,
}

/// Full analytics report for a survey.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    /// Total number of responses.
    pub total_responses: u64,
    /// Per-question aggregates, in survey question order.
    pub questions: Vec<QuestionSummary>,
    /// Response counts for the most recent distinct dates,
    /// chronological, at most seven entries.
    pub responses_by_day: Vec<DailyCount>,
    /// Mean responses per day over the daily window, rounded.
    pub average_daily: u64,
}

/// Aggregate a response set against its survey.
///
/// Unanswered or missing fields are excluded from both the per-question
/// totals and the histograms; answer values not found among the declared
/// options are silently ignored.
#[must_use]
pub fn aggregate(survey: &Survey, responses: &[SurveyResponse]) -> AnalyticsReport {
    let questions = survey
        .questions
        .iter()
        .map(|question| {
            let mut answered: u64 = 0;
            let breakdown = if question.kind.is_choice() {
                let mut buckets: Vec<OptionCount> = question
                    .options
                    .iter()
                    .map(|option| OptionCount {
                        option: option.clone(),
                        count: 0,
                    })
                    .collect();

                for response in responses {
                    match (question.kind, response.answers.get(&question.id)) {
                        (QuestionType::SingleChoice, Some(AnswerValue::One(value))) => {
                            if let Some(bucket) =
                                buckets.iter_mut().find(|b| b.option == *value)
                            {
                                bucket.count += 1;
                                answered += 1;
                            }
                        }
                        (QuestionType::MultiChoice, Some(AnswerValue::Many(selected))) => {
                            let mut counted = false;
                            for value in selected {
                                if let Some(bucket) =
                                    buckets.iter_mut().find(|b| b.option == *value)
                                {
                                    bucket.count += 1;
                                    counted = true;
                                }
                            }
                            if counted {
                                answered += 1;
                            }
                        }
                        _ => {}
                    }
                }

                QuestionBreakdown::Histogram { buckets }
            } else {
                let mut answers = Vec::new();
                for response in responses {
                    if let Some(AnswerValue::One(text)) = response.answers.get(&question.id)
                        && !text.is_empty()
                    {
                        answers.push(text.clone());
                        answered += 1;
                    }
                }
                QuestionBreakdown::Texts { answers }
            };

            QuestionSummary {
                question_id: question.id.clone(),
                label: question.label.clone(),
                kind: question.kind,
                answered,
                breakdown,
            }
        })
        .collect();

    let responses_by_day = daily_series(responses);
    let average_daily = if responses_by_day.is_empty() {
        0
    } else {
        let sum: u64 = responses_by_day.iter().map(|d| d.count).sum();
        (sum as f64 / responses_by_day.len() as f64).round() as u64
    };

    AnalyticsReport {
        total_responses: responses.len() as u64,
        questions,
        responses_by_day,
        average_daily,
    }
}

/// Group responses by calendar date, chronological, keeping at most the
/// most recent [`DAILY_WINDOW`] distinct dates.
///
/// Dates are taken in the producing runtime's time zone; no per-response
/// timezone normalization happens.
fn daily_series(responses: &[SurveyResponse]) -> Vec<DailyCount> {
    let mut by_day = std::collections::BTreeMap::<NaiveDate, u64>::new();
    for response in responses {
        let date = response.created_at.with_timezone(&Local).date_naive();
        *by_day.entry(date).or_insert(0) += 1;
    }

    let mut series: Vec<DailyCount> = by_day
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect();
    if series.len() > DAILY_WINDOW {
        series.drain(..series.len() - DAILY_WINDOW);
    }
    series
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use formpulse_store::models::{AnswerMap, Question, Theme};

    fn survey(questions: Vec<Question>) -> Survey {
        Survey {
            id: "s1".to_string(),
            title: "Test".to_string(),
            description: String::new(),
            questions,
            theme: Theme::default(),
            owner_id: String::new(),
            created_at: Utc::now(),
        }
    }

    fn question(id: &str, kind: QuestionType, options: &[&str]) -> Question {
        Question {
            id: id.to_string(),
            kind,
            label: format!("Question {id}"),
            options: options.iter().map(ToString::to_string).collect(),
            required: false,
        }
    }

    fn response(id: &str, day: u32, answers: &[(&str, AnswerValue)]) -> SurveyResponse {
        let mut map = AnswerMap::new();
        for (question_id, value) in answers {
            map.insert((*question_id).to_string(), value.clone());
        }
        SurveyResponse {
            id: id.to_string(),
            survey_id: "s1".to_string(),
            answers: map,
            created_at: Local
                .with_ymd_and_hms(2025, 8, day, 12, 0, 0)
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    fn one(value: &str) -> AnswerValue {
        AnswerValue::One(value.to_string())
    }

    fn many(values: &[&str]) -> AnswerValue {
        AnswerValue::Many(values.iter().map(ToString::to_string).collect())
    }

    #[test]
    fn test_empty_response_set_yields_zero_buckets() {
        let survey = survey(vec![
            question("q1", QuestionType::SingleChoice, &["A", "B"]),
            question("q2", QuestionType::Text, &[]),
        ]);

        let report = aggregate(&survey, &[]);
        assert_eq!(report.total_responses, 0);
        assert_eq!(
            report.questions[0].breakdown,
            QuestionBreakdown::Histogram {
                buckets: vec![
                    OptionCount { option: "A".to_string(), count: 0 },
                    OptionCount { option: "B".to_string(), count: 0 },
                ]
            }
        );
        assert_eq!(
            report.questions[1].breakdown,
            QuestionBreakdown::Texts { answers: vec![] }
        );
        assert!(report.responses_by_day.is_empty());
        assert_eq!(report.average_daily, 0);
    }

    #[test]
    fn test_single_choice_ignores_undeclared_values() {
        // Scenario: options [A, B]; answers A, B, A, C (C undeclared).
        let survey = survey(vec![question("q1", QuestionType::SingleChoice, &["A", "B"])]);
        let responses = vec![
            response("r1", 1, &[("q1", one("A"))]),
            response("r2", 1, &[("q1", one("B"))]),
            response("r3", 2, &[("q1", one("A"))]),
            response("r4", 2, &[("q1", one("C"))]),
        ];

        let report = aggregate(&survey, &responses);
        let QuestionBreakdown::Histogram { buckets } = &report.questions[0].breakdown else {
            panic!("expected histogram");
        };
        assert_eq!(buckets[0], OptionCount { option: "A".to_string(), count: 2 });
        assert_eq!(buckets[1], OptionCount { option: "B".to_string(), count: 1 });
        // Only in-domain answers are counted.
        assert_eq!(report.questions[0].answered, 3);
        assert_eq!(report.total_responses, 4);
    }

    #[test]
    fn test_multi_choice_increments_every_selected_option() {
        let survey = survey(vec![question(
            "q1",
            QuestionType::MultiChoice,
            &["X", "Y", "Z"],
        )]);
        let responses = vec![
            response("r1", 1, &[("q1", many(&["X", "Y"]))]),
            response("r2", 1, &[("q1", many(&["Y", "nope"]))]),
            response("r3", 1, &[("q1", many(&["nope"]))]),
            response("r4", 1, &[]),
        ];

        let report = aggregate(&survey, &responses);
        let QuestionBreakdown::Histogram { buckets } = &report.questions[0].breakdown else {
            panic!("expected histogram");
        };
        assert_eq!(buckets[0].count, 1); // X
        assert_eq!(buckets[1].count, 2); // Y
        assert_eq!(buckets[2].count, 0); // Z
        assert_eq!(report.questions[0].answered, 2);
    }

    #[test]
    fn test_text_answers_preserve_response_order() {
        let survey = survey(vec![question("q1", QuestionType::LongText, &[])]);
        let responses = vec![
            response("r1", 1, &[("q1", one("first"))]),
            response("r2", 1, &[("q1", one(""))]),
            response("r3", 2, &[("q1", one("second"))]),
            response("r4", 2, &[]),
        ];

        let report = aggregate(&survey, &responses);
        assert_eq!(
            report.questions[0].breakdown,
            QuestionBreakdown::Texts {
                answers: vec!["first".to_string(), "second".to_string()]
            }
        );
        assert_eq!(report.questions[0].answered, 2);
    }

    #[test]
    fn test_daily_series_is_chronological_and_capped_at_seven() {
        let survey = survey(vec![question("q1", QuestionType::Text, &[])]);
        let mut responses = Vec::new();
        for day in 1..=9 {
            responses.push(response(&format!("r{day}a"), day, &[]));
            responses.push(response(&format!("r{day}b"), day, &[]));
        }

        let report = aggregate(&survey, &responses);
        assert_eq!(report.responses_by_day.len(), 7);
        // The two oldest dates fell out of the window.
        assert_eq!(
            report.responses_by_day[0].date,
            NaiveDate::from_ymd_opt(2025, 8, 3).unwrap()
        );
        assert_eq!(
            report.responses_by_day[6].date,
            NaiveDate::from_ymd_opt(2025, 8, 9).unwrap()
        );
        assert!(report.responses_by_day.iter().all(|d| d.count == 2));
        assert_eq!(report.average_daily, 2);
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let survey = survey(vec![
            question("q1", QuestionType::SingleChoice, &["A", "B"]),
            question("q2", QuestionType::Text, &[]),
        ]);
        let responses = vec![
            response("r1", 1, &[("q1", one("A")), ("q2", one("hello"))]),
            response("r2", 2, &[("q1", one("B"))]),
        ];

        let first = aggregate(&survey, &responses);
        let second = aggregate(&survey, &responses);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_option_label_is_a_valid_bucket() {
        let survey = survey(vec![question("q1", QuestionType::SingleChoice, &["A", ""])]);
        let responses = vec![response("r1", 1, &[("q1", one(""))])];

        let report = aggregate(&survey, &responses);
        let QuestionBreakdown::Histogram { buckets } = &report.questions[0].breakdown else {
            panic!("expected histogram");
        };
        assert_eq!(buckets[1], OptionCount { option: String::new(), count: 1 });
    }
}
