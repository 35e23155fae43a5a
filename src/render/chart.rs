//! Chart hand-off
//!
//! Views build a [`ChartData`] (categories plus one or more value series) and
//! pass it to a [`ChartRenderer`]. [`TextBarChart`] draws horizontal bars for
//! the terminal.

use std::fmt::{self, Write};

use crate::filters::SeverityBreakdown;
use crate::models::{Hospital, ShortageTrend};

/// One named value series, aligned with `ChartData::categories`
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// Category/series structure consumed by chart renderers
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

impl ChartData {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            categories: Vec::new(),
            series: Vec::new(),
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_series(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.series.push(Series {
            name: name.into(),
            values,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() || self.series.iter().all(|s| s.values.is_empty())
    }

    /// Shortage counts per month
    pub fn shortage_trend(trend: &ShortageTrend) -> Self {
        let (labels, values): (Vec<&str>, Vec<f64>) = trend.points().unzip();
        Self::new("Medicine shortages")
            .with_categories(labels)
            .with_series("Shortages", values)
    }

    /// Critical vs. other alerts
    pub fn severity_split(breakdown: &SeverityBreakdown) -> Self {
        Self::new("Alert severity")
            .with_categories(["Critical", "Other"])
            .with_series(
                "Alerts",
                vec![breakdown.critical as f64, breakdown.other as f64],
            )
    }

    /// Available vs. total beds per hospital
    pub fn bed_availability(hospitals: &[Hospital]) -> Self {
        Self::new("Bed availability")
            .with_categories(hospitals.iter().map(|h| h.name.clone()))
            .with_series(
                "Available",
                hospitals.iter().map(|h| f64::from(h.available_beds)).collect(),
            )
            .with_series(
                "Total",
                hospitals.iter().map(|h| f64::from(h.total_beds)).collect(),
            )
    }
}

/// Draws a [`ChartData`] to text
pub trait ChartRenderer: Send + Sync {
    fn draw(&self, chart: &ChartData, out: &mut dyn Write) -> fmt::Result;

    fn render(&self, chart: &ChartData) -> String {
        let mut out = String::new();
        // Writing to a String is infallible
        let _ = self.draw(chart, &mut out);
        out
    }
}

/// Horizontal bar chart scaled to the largest value
#[derive(Debug, Clone)]
pub struct TextBarChart {
    pub width: usize,
    pub label_width: usize,
}

impl Default for TextBarChart {
    fn default() -> Self {
        Self {
            width: 40,
            label_width: 24,
        }
    }
}

impl TextBarChart {
    fn bar(&self, value: f64, max: f64) -> String {
        if max <= 0.0 || value <= 0.0 {
            return String::new();
        }
        let len = ((value / max) * self.width as f64).round() as usize;
        "#".repeat(len.clamp(1, self.width))
    }
}

impl ChartRenderer for TextBarChart {
    fn draw(&self, chart: &ChartData, out: &mut dyn Write) -> fmt::Result {
        writeln!(out, "{}", chart.title)?;
        writeln!(out, "{}", "-".repeat(self.label_width + self.width + 10))?;

        if chart.is_empty() {
            return writeln!(out, "No data");
        }

        let max = chart
            .series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0_f64, f64::max);
        let multi = chart.series.len() > 1;

        for (i, category) in chart.categories.iter().enumerate() {
            for (j, series) in chart.series.iter().enumerate() {
                let Some(value) = series.values.get(i).copied() else {
                    continue;
                };
                let label = match (multi, j) {
                    (true, 0) | (false, _) => truncate(category, self.label_width),
                    (true, _) => String::new(),
                };
                let name = if multi {
                    format!("{:<10} ", series.name)
                } else {
                    String::new()
                };
                writeln!(
                    out,
                    "{:<width$} {}{} {}",
                    label,
                    name,
                    self.bar(value, max),
                    format_value(value),
                    width = self.label_width
                )?;
            }
        }

        Ok(())
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut cut: String = s.chars().take(max.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_chart_data() {
        let trend = ShortageTrend {
            labels: vec!["Jun".into(), "Jul".into()],
            data: vec![12.0, 19.0],
        };
        let chart = ChartData::shortage_trend(&trend);
        assert_eq!(chart.categories, vec!["Jun", "Jul"]);
        assert_eq!(chart.series[0].values, vec![12.0, 19.0]);
    }

    #[test]
    fn test_bars_scale_to_max() {
        let chart = ChartData::severity_split(&SeverityBreakdown {
            critical: 2,
            other: 4,
        });
        let renderer = TextBarChart {
            width: 10,
            label_width: 8,
        };
        let out = renderer.render(&chart);
        assert!(out.contains("Critical ##### 2"));
        assert!(out.contains("Other    ########## 4"));
    }

    #[test]
    fn test_zero_values_have_no_bar() {
        let chart = ChartData::severity_split(&SeverityBreakdown::default());
        let out = TextBarChart::default().render(&chart);
        assert!(!out.contains('#'));
        assert!(out.contains("Critical"));
    }

    #[test]
    fn test_empty_chart() {
        let out = TextBarChart::default().render(&ChartData::new("Nothing"));
        assert!(out.contains("No data"));
    }

    #[test]
    fn test_truncate_long_labels() {
        assert_eq!(truncate("Regional Medical Center", 10), "Regional …");
        assert_eq!(truncate("Short", 10), "Short");
    }
}
