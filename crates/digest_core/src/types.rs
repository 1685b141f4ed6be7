use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Error, Result};

/// Reads an explicit `null` the same way as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A source used while producing a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

/// One summarized-article entry as delivered by the backend.
///
/// Every field tolerates being absent or `null` on the wire; missing text renders as
/// empty rather than failing the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        rename = "sourcesUsed",
        alias = "sources_used"
    )]
    pub sources_used: Vec<Citation>,
}

impl ArticleRecord {
    /// Returns the summary only when it carries visible text.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Lookback window offered by the timeframe selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Daily,
    Weekly,
    Fortnightly,
    Monthly,
    Quarterly,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::Daily,
        Timeframe::Weekly,
        Timeframe::Fortnightly,
        Timeframe::Monthly,
        Timeframe::Quarterly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Daily => "daily",
            Timeframe::Weekly => "weekly",
            Timeframe::Fortnightly => "fortnightly",
            Timeframe::Monthly => "monthly",
            Timeframe::Quarterly => "quarterly",
        }
    }

    /// Human label used by the selector options.
    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Daily => "Past day",
            Timeframe::Weekly => "Past week",
            Timeframe::Fortnightly => "Past two weeks",
            Timeframe::Monthly => "Past month",
            Timeframe::Quarterly => "Past three months",
        }
    }

    /// First day covered by this window when counting back from `today`.
    pub fn start_date(&self, today: NaiveDate) -> NaiveDate {
        let start = match self {
            Timeframe::Daily => today.checked_sub_days(Days::new(1)),
            Timeframe::Weekly => today.checked_sub_days(Days::new(7)),
            Timeframe::Fortnightly => today.checked_sub_days(Days::new(14)),
            Timeframe::Monthly => today.checked_sub_months(Months::new(1)),
            Timeframe::Quarterly => today.checked_sub_months(Months::new(3)),
        };
        start.unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Timeframe::Daily),
            "weekly" => Ok(Timeframe::Weekly),
            "fortnightly" => Ok(Timeframe::Fortnightly),
            "monthly" => Ok(Timeframe::Monthly),
            "quarterly" => Ok(Timeframe::Quarterly),
            other => Err(Error::Validation(format!("Invalid timeframe: {}", other))),
        }
    }
}

/// Envelope returned by the timeframe endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeframeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles: Option<Vec<ArticleRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TimeframeResponse {
    pub fn ok(articles: Vec<ArticleRecord>) -> Self {
        Self {
            success: true,
            articles: Some(articles),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            articles: None,
            error: Some(message.into()),
        }
    }

    /// Collapses the envelope into the article list or the matching failure.
    pub fn into_articles(self) -> Result<Vec<ArticleRecord>> {
        if !self.success {
            let message = self.error.unwrap_or_else(|| "Unknown error".to_string());
            return Err(Error::Application(message));
        }
        self.articles
            .ok_or_else(|| Error::MalformedResponse("success response without articles".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_timeframe_parse_and_display() {
        for tf in Timeframe::ALL {
            assert_eq!(tf.to_string().parse::<Timeframe>().unwrap(), tf);
        }
        assert_eq!(" Weekly ".parse::<Timeframe>().unwrap(), Timeframe::Weekly);
        let err = "yearly".parse::<Timeframe>().unwrap_err();
        assert_eq!(err.to_string(), "Validation error: Invalid timeframe: yearly");
    }

    #[test]
    fn test_timeframe_start_dates() {
        let today = date(2024, 3, 31);
        assert_eq!(Timeframe::Daily.start_date(today), date(2024, 3, 30));
        assert_eq!(Timeframe::Weekly.start_date(today), date(2024, 3, 24));
        assert_eq!(Timeframe::Fortnightly.start_date(today), date(2024, 3, 17));
        // Month arithmetic clamps to the end of a shorter month
        assert_eq!(Timeframe::Monthly.start_date(today), date(2024, 2, 29));
        assert_eq!(Timeframe::Quarterly.start_date(today), date(2023, 12, 31));
    }

    #[test]
    fn test_article_record_accepts_both_citation_keys() {
        let camel: ArticleRecord = serde_json::from_str(
            r#"{"title":"A","sourcesUsed":[{"title":"x","url":"http://x"}]}"#,
        )
        .unwrap();
        let snake: ArticleRecord = serde_json::from_str(
            r#"{"title":"A","sources_used":[{"title":"x","url":"http://x"}]}"#,
        )
        .unwrap();
        assert_eq!(camel, snake);
        assert_eq!(camel.sources_used.len(), 1);
        assert!(camel.summary.is_none());
        assert_eq!(camel.date, "");
    }

    #[test]
    fn test_null_fields_read_as_empty() {
        let response: TimeframeResponse = serde_json::from_str(
            r##"{"success":true,"articles":[{"title":null,"date":null,"url":"#","source":null,"summary":null,"sourcesUsed":null},{"title":"B","sources_used":[{"title":null,"url":"https://b.test"}]}]}"##,
        )
        .unwrap();
        let articles = response.into_articles().unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "");
        assert_eq!(articles[0].source, "");
        assert!(articles[0].summary.is_none());
        assert!(articles[0].sources_used.is_empty());
        assert_eq!(articles[1].sources_used[0].title, "");
        assert_eq!(articles[1].sources_used[0].url, "https://b.test");
    }

    #[test]
    fn test_summary_text_treats_blank_as_missing() {
        let mut record = ArticleRecord::default();
        assert!(record.summary_text().is_none());
        record.summary = Some("  \n ".to_string());
        assert!(record.summary_text().is_none());
        record.summary = Some("• one".to_string());
        assert_eq!(record.summary_text(), Some("• one"));
    }

    #[test]
    fn test_response_into_articles() {
        let ok: TimeframeResponse = serde_json::from_str(r#"{"success":true,"articles":[]}"#).unwrap();
        assert!(ok.into_articles().unwrap().is_empty());

        let failed: TimeframeResponse =
            serde_json::from_str(r#"{"success":false,"error":"bad range"}"#).unwrap();
        match failed.into_articles() {
            Err(Error::Application(msg)) => assert_eq!(msg, "bad range"),
            other => panic!("unexpected result: {:?}", other),
        }

        let missing: TimeframeResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(matches!(missing.into_articles(), Err(Error::MalformedResponse(_))));

        let anonymous: TimeframeResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(anonymous.into_articles().unwrap_err().to_string(), "Unknown error");
    }
}
