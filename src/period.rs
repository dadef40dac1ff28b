//! Time period vocabularies and the mappings between them.
//!
//! The bot talks about the same six periods (week, month, quarter, half
//! year, year, all time) in several ways:
//!
//! - [`ChartTimePeriod`]: what users type and what chart commands work with
//! - [`StatsTimeSpan`]: what the typed client's top lists take
//! - [`CallTimePeriod`]: the raw `period` value sent with dispatcher calls
//! - a URL segment for linking to the Last.fm website's library pages
//!
//! Every mapping is total, and anything unrecognised falls back to weekly.

use serde::{Deserialize, Serialize};

/// URL segment for the default (weekly) period on the Last.fm website.
pub const DEFAULT_URL_PARAMETER: &str = "LAST_7_DAYS";

/// A chart period as chosen by a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartTimePeriod {
    #[default]
    Weekly,
    Monthly,
    Quarterly,
    Half,
    Yearly,
    AllTime,
}

impl ChartTimePeriod {
    pub const ALL: [ChartTimePeriod; 6] = [
        ChartTimePeriod::Weekly,
        ChartTimePeriod::Monthly,
        ChartTimePeriod::Quarterly,
        ChartTimePeriod::Half,
        ChartTimePeriod::Yearly,
        ChartTimePeriod::AllTime,
    ];

    /// Parse a period typed by a user.
    ///
    /// Accepts the variant names in any case and the abbreviations `w`, `m`,
    /// `q`, `h`, `y`, `a` as well as `overall`. Numeric values such as `"2"`
    /// are not accepted. Anything else is weekly.
    ///
    /// ```rust
    /// use fmbot_lastfm::ChartTimePeriod;
    ///
    /// assert_eq!(ChartTimePeriod::from_time_string("Monthly"), ChartTimePeriod::Monthly);
    /// assert_eq!(ChartTimePeriod::from_time_string("q"), ChartTimePeriod::Quarterly);
    /// assert_eq!(ChartTimePeriod::from_time_string("overall"), ChartTimePeriod::AllTime);
    /// assert_eq!(ChartTimePeriod::from_time_string("fortnight"), ChartTimePeriod::Weekly);
    /// assert_eq!(ChartTimePeriod::from_time_string("2"), ChartTimePeriod::Weekly);
    /// ```
    pub fn from_time_string(time_string: &str) -> Self {
        let trimmed = time_string.trim();
        if let Some(period) = Self::ALL
            .into_iter()
            .find(|period| period.name().eq_ignore_ascii_case(trimmed))
        {
            return period;
        }

        match time_string {
            "w" => ChartTimePeriod::Weekly,
            "m" => ChartTimePeriod::Monthly,
            "q" => ChartTimePeriod::Quarterly,
            "h" => ChartTimePeriod::Half,
            "y" => ChartTimePeriod::Yearly,
            "a" | "overall" => ChartTimePeriod::AllTime,
            _ => ChartTimePeriod::Weekly,
        }
    }

    /// The variant name.
    pub fn name(&self) -> &'static str {
        match self {
            ChartTimePeriod::Weekly => "Weekly",
            ChartTimePeriod::Monthly => "Monthly",
            ChartTimePeriod::Quarterly => "Quarterly",
            ChartTimePeriod::Half => "Half",
            ChartTimePeriod::Yearly => "Yearly",
            ChartTimePeriod::AllTime => "AllTime",
        }
    }

    pub fn stats_time_span(&self) -> StatsTimeSpan {
        match self {
            ChartTimePeriod::Weekly => StatsTimeSpan::Week,
            ChartTimePeriod::Monthly => StatsTimeSpan::Month,
            ChartTimePeriod::Quarterly => StatsTimeSpan::Quarter,
            ChartTimePeriod::Half => StatsTimeSpan::Half,
            ChartTimePeriod::Yearly => StatsTimeSpan::Year,
            ChartTimePeriod::AllTime => StatsTimeSpan::Overall,
        }
    }

    /// The `date_preset` segment used by library links on the Last.fm website.
    pub fn site_url_parameter(&self) -> &'static str {
        match self {
            ChartTimePeriod::Weekly => "LAST_7_DAYS",
            ChartTimePeriod::Monthly => "LAST_30_DAYS",
            ChartTimePeriod::Quarterly => "LAST_90_DAYS",
            ChartTimePeriod::Half => "LAST_180_DAYS",
            ChartTimePeriod::Yearly => "LAST_365_DAYS",
            ChartTimePeriod::AllTime => "ALL",
        }
    }

    pub fn call_time_period(&self) -> CallTimePeriod {
        match self {
            ChartTimePeriod::Weekly => CallTimePeriod::Week,
            ChartTimePeriod::Monthly => CallTimePeriod::Month,
            ChartTimePeriod::Quarterly => CallTimePeriod::Quarter,
            ChartTimePeriod::Half => CallTimePeriod::Half,
            ChartTimePeriod::Yearly => CallTimePeriod::Year,
            ChartTimePeriod::AllTime => CallTimePeriod::Overall,
        }
    }
}

impl From<ChartTimePeriod> for StatsTimeSpan {
    fn from(period: ChartTimePeriod) -> Self {
        period.stats_time_span()
    }
}

impl From<ChartTimePeriod> for CallTimePeriod {
    fn from(period: ChartTimePeriod) -> Self {
        period.call_time_period()
    }
}

/// Time span accepted by the typed client's top lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatsTimeSpan {
    Overall,
    #[default]
    Week,
    Month,
    Quarter,
    Half,
    Year,
}

impl StatsTimeSpan {
    /// The API `period` value.
    pub fn api_value(&self) -> &'static str {
        match self {
            StatsTimeSpan::Overall => "overall",
            StatsTimeSpan::Week => "7day",
            StatsTimeSpan::Month => "1month",
            StatsTimeSpan::Quarter => "3month",
            StatsTimeSpan::Half => "6month",
            StatsTimeSpan::Year => "12month",
        }
    }
}

/// Period value used with the low-level dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallTimePeriod {
    #[default]
    Week,
    Month,
    Quarter,
    Half,
    Year,
    Overall,
}

impl CallTimePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallTimePeriod::Week => "7day",
            CallTimePeriod::Month => "1month",
            CallTimePeriod::Quarter => "3month",
            CallTimePeriod::Half => "6month",
            CallTimePeriod::Year => "12month",
            CallTimePeriod::Overall => "overall",
        }
    }
}

impl std::fmt::Display for CallTimePeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ================================================================================================
// OPTION PARSING
// ================================================================================================

/// A period expressed in every vocabulary at once.
///
/// Only built by [`TimeModel::from_options`], so the fields always agree.
///
/// ```compile_fail
/// use fmbot_lastfm::{ChartTimePeriod, StatsTimeSpan, TimeModel};
///
/// let model = TimeModel {
///     stats_time_span: StatsTimeSpan::Overall,
///     chart_time_period: ChartTimePeriod::Weekly,
///     description: String::new(),
///     url_parameter: "ALL".to_string(),
/// };
/// ```
///
/// ```compile_fail
/// use fmbot_lastfm::TimeModel;
///
/// let model: TimeModel = serde_json::from_str(
///     r#"{"stats_time_span":"Overall","chart_time_period":"Weekly","description":"","url_parameter":"ALL"}"#,
/// ).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeModel {
    stats_time_span: StatsTimeSpan,
    chart_time_period: ChartTimePeriod,
    description: String,
    url_parameter: String,
}

/// What [`TimeModel::from_options`] falls back to when no option names a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeModelDefaults {
    pub stats_time_span: StatsTimeSpan,
    pub chart_time_period: ChartTimePeriod,
    pub url_parameter: String,
}

impl Default for TimeModelDefaults {
    fn default() -> Self {
        Self {
            stats_time_span: StatsTimeSpan::Week,
            chart_time_period: ChartTimePeriod::Weekly,
            url_parameter: DEFAULT_URL_PARAMETER.to_string(),
        }
    }
}

/// Synonyms per period, in the order they are checked.
const PERIOD_OPTIONS: [(ChartTimePeriod, &[&str], &str); 6] = [
    (ChartTimePeriod::Weekly, &["weekly", "week", "w"], "Weekly"),
    (ChartTimePeriod::Monthly, &["monthly", "month", "m"], "Monthly"),
    (
        ChartTimePeriod::Quarterly,
        &["quarterly", "quarter", "q"],
        "Quarterly",
    ),
    (ChartTimePeriod::Half, &["halfyearly", "half", "h"], "Half-yearly"),
    (ChartTimePeriod::Yearly, &["yearly", "year", "y"], "Yearly"),
    (
        ChartTimePeriod::AllTime,
        &["overall", "alltime", "o", "at", "a"],
        "Overall",
    ),
];

impl TimeModel {
    /// Pick the period named in a command's extra options.
    ///
    /// Periods are checked weekly first and overall last; the first period
    /// with any synonym among the options wins, wherever it appears in the
    /// list.
    ///
    /// ```rust
    /// use fmbot_lastfm::{ChartTimePeriod, StatsTimeSpan, TimeModel, TimeModelDefaults};
    ///
    /// let model = TimeModel::from_options(&["month"], &TimeModelDefaults::default());
    /// assert_eq!(model.stats_time_span(), StatsTimeSpan::Month);
    /// assert_eq!(model.chart_time_period(), ChartTimePeriod::Monthly);
    /// assert_eq!(model.description(), "Monthly");
    /// assert_eq!(model.url_parameter(), "LAST_30_DAYS");
    /// ```
    pub fn from_options<S: AsRef<str>>(options: &[S], defaults: &TimeModelDefaults) -> Self {
        let has = |synonym: &str| options.iter().any(|option| option.as_ref() == synonym);

        for (period, synonyms, label) in PERIOD_OPTIONS {
            if synonyms.iter().any(|synonym| has(*synonym)) {
                return Self::for_period(period, label);
            }
        }

        TimeModel {
            stats_time_span: defaults.stats_time_span,
            chart_time_period: defaults.chart_time_period,
            description: String::new(),
            url_parameter: defaults.url_parameter.clone(),
        }
    }

    pub fn stats_time_span(&self) -> StatsTimeSpan {
        self.stats_time_span
    }

    pub fn chart_time_period(&self) -> ChartTimePeriod {
        self.chart_time_period
    }

    /// Label shown to users; empty when the defaults were used.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The `date_preset` segment for links to the Last.fm website.
    pub fn url_parameter(&self) -> &str {
        &self.url_parameter
    }

    fn for_period(period: ChartTimePeriod, label: &str) -> Self {
        TimeModel {
            stats_time_span: period.stats_time_span(),
            chart_time_period: period,
            description: label.to_string(),
            url_parameter: period.site_url_parameter().to_string(),
        }
    }
}
