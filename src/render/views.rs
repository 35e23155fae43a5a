//! Text rendering of the three dashboard views

use chrono::{DateTime, Utc};
use std::fmt::{self, Write};

use super::badge::{bed_badge, recall_badge, severity_badge, stock_badge};
use super::chart::{ChartData, ChartRenderer};
use crate::filters::{derive_alerts, derive_hospitals, derive_medicines, format_time_ago};
use crate::models::{Alert, AlertFeed, AlertFilter, Hospital, Medicine, ShortageTrend};
use crate::sync::ViewState;

const RULE_WIDTH: usize = 78;

/// Run a section writer into a fresh String
fn collect<F>(write: F) -> String
where
    F: FnOnce(&mut String) -> fmt::Result,
{
    let mut out = String::new();
    // Writing to a String is infallible
    let _ = write(&mut out);
    out
}

fn heading(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

fn rule(out: &mut String) -> fmt::Result {
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

fn synced_line<T>(out: &mut String, state: &ViewState<T>) -> fmt::Result {
    match state.last_synced() {
        Some(at) => {
            let refreshing = if state.is_loading() { " (refreshing)" } else { "" };
            writeln!(out, "Last synced {}{}", at.format("%H:%M:%S UTC"), refreshing)
        }
        None => Ok(()),
    }
}

fn percent(value: Option<f64>) -> String {
    value
        .map(|p| format!("{:.1}%", p))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Hospitals view.
///
/// A failure before the first successful load replaces the whole view with
/// the error. Later failures keep the last known data under a warning.
pub fn hospitals(
    state: &ViewState<Vec<Hospital>>,
    term: &str,
    chart: &dyn ChartRenderer,
) -> String {
    collect(|out| write_hospitals(out, state, term, chart))
}

fn write_hospitals(
    out: &mut String,
    state: &ViewState<Vec<Hospital>>,
    term: &str,
    chart: &dyn ChartRenderer,
) -> fmt::Result {
    heading(out, "Hospital Bed Availability")?;

    if !state.has_loaded() {
        if let Some(error) = state.error() {
            return writeln!(out, "Error: {}", error);
        }
        if state.is_loading() {
            return writeln!(out, "Loading hospitals...");
        }
    }

    if let Some(error) = state.error() {
        writeln!(out, "Warning: {} (showing last known data)", error)?;
    }
    synced_line(out, state)?;

    let listing = derive_hospitals(state.data(), term);
    if !term.is_empty() {
        writeln!(
            out,
            "Search: \"{}\" ({} of {} hospitals)",
            term,
            listing.hospitals.len(),
            state.data().len()
        )?;
    }

    let summary = &listing.summary;
    writeln!(
        out,
        "Beds: {}/{} available ({})   ICU: {}/{} ({})   Good: {}  Moderate: {}  Critical: {}",
        summary.available_beds,
        summary.total_beds,
        percent(summary.bed_percent()),
        summary.available_icu,
        summary.icu_beds,
        percent(summary.icu_percent()),
        summary.good,
        summary.moderate,
        summary.critical
    )?;
    writeln!(out)?;

    if listing.hospitals.is_empty() {
        return if term.is_empty() {
            writeln!(out, "No hospitals found.")
        } else {
            writeln!(out, "No hospitals match \"{}\".", term)
        };
    }

    for hospital in &listing.hospitals {
        hospital_card(out, hospital)?;
    }

    writeln!(out)?;
    chart.draw(&ChartData::bed_availability(&listing.hospitals), out)
}

fn hospital_card(out: &mut String, hospital: &Hospital) -> fmt::Result {
    let location = match &hospital.state {
        Some(state) => format!("{}, {}", hospital.district, state),
        None => hospital.district.clone(),
    };
    writeln!(
        out,
        "{:<40} {:<24} {}",
        hospital.name,
        location,
        bed_badge(hospital.bed_status())
    )?;
    writeln!(
        out,
        "  Beds: {:>4}/{:<4} {:>7}   ICU: {:>3}/{:<3} {:>7} {}",
        hospital.available_beds,
        hospital.total_beds,
        percent(hospital.bed_percent()),
        hospital.available_icu,
        hospital.icu_beds,
        percent(hospital.icu_percent()),
        bed_badge(hospital.icu_status())
    )?;
    writeln!(out, "  Contact: {}   {}", hospital.contact, hospital.address)
}

/// Medicines view at `page` (1-based, clamped)
pub fn medicines(state: &ViewState<Vec<Medicine>>, term: &str, page: usize) -> String {
    collect(|out| write_medicines(out, state, term, page))
}

fn write_medicines(
    out: &mut String,
    state: &ViewState<Vec<Medicine>>,
    term: &str,
    page: usize,
) -> fmt::Result {
    heading(out, "Medicine Availability")?;

    if !term.is_empty() {
        writeln!(out, "Search: \"{}\"", term)?;
    }
    if state.is_loading() {
        return writeln!(out, "Loading medicines...");
    }
    if let Some(error) = state.error() {
        writeln!(out, "Error: {}", error)?;
    }
    synced_line(out, state)?;

    let listing = derive_medicines(state.data(), page);
    if listing.page.items.is_empty() {
        return writeln!(out, "No medicines found.");
    }

    let summary = &listing.summary;
    writeln!(
        out,
        "{} medicines   High: {}  Moderate: {}  Low: {}   Recalls: {}",
        summary.medicines, summary.high, summary.moderate, summary.low, summary.recalls
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "{:<32} {:<22} {:<16} {}",
        "Name", "Manufacturer", "Category", "Stock"
    )?;
    rule(out)?;

    for medicine in &listing.page.items {
        medicine_row(out, medicine)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Page {} of {}{}{}",
        listing.page.number,
        listing.page.total_pages,
        if listing.page.has_prev() { "  [p] prev" } else { "" },
        if listing.page.has_next() { "  [n] next" } else { "" }
    )
}

fn medicine_row(out: &mut String, medicine: &Medicine) -> fmt::Result {
    let recall = if medicine.recall {
        format!(" {}", recall_badge())
    } else {
        String::new()
    };
    writeln!(
        out,
        "{:<32} {:<22} {:<16} {}{}",
        medicine.name,
        medicine.manufacturer,
        medicine.category,
        stock_badge(medicine.availability),
        recall
    )?;
    if let Some(warning) = &medicine.warning {
        writeln!(out, "  Warning: {}", warning)?;
    }
    if let Some(class) = &medicine.classification {
        let status = medicine.recall_status.as_deref().unwrap_or("unknown");
        writeln!(out, "  Recall {} ({})", class, status)?;
    }
    Ok(())
}

/// Alerts view with its severity and shortage-trend charts
pub fn alerts(
    state: &ViewState<AlertFeed>,
    trends: &ViewState<ShortageTrend>,
    filter: AlertFilter,
    now: DateTime<Utc>,
    chart: &dyn ChartRenderer,
) -> String {
    collect(|out| write_alerts(out, state, trends, filter, now, chart))
}

fn write_alerts(
    out: &mut String,
    state: &ViewState<AlertFeed>,
    trends: &ViewState<ShortageTrend>,
    filter: AlertFilter,
    now: DateTime<Utc>,
    chart: &dyn ChartRenderer,
) -> fmt::Result {
    heading(out, "Alerts")?;
    writeln!(out, "Filter: {}", filter)?;

    if state.is_loading() && !state.has_loaded() {
        return writeln!(out, "Loading alerts...");
    }
    synced_line(out, state)?;

    let digest = derive_alerts(state.data(), filter);
    let summary = &digest.summary;
    writeln!(
        out,
        "{} alerts   Critical: {}  Other: {}   Bed: {}  Medicine: {}",
        summary.total,
        summary.severity.critical,
        summary.severity.other,
        summary.types.bed,
        summary.types.medicine
    )?;
    writeln!(out)?;

    if digest.alerts.is_empty() {
        writeln!(out, "No active alerts.")?;
    } else {
        for alert in &digest.alerts {
            alert_row(out, alert, now)?;
        }
    }

    if !digest.recent.is_empty() {
        writeln!(out)?;
        writeln!(out, "Recent")?;
        rule(out)?;
        for alert in &digest.recent {
            writeln!(
                out,
                "{:<16} {:<40} {}",
                format_time_ago(alert.timestamp, now),
                alert.subject(),
                severity_badge(alert.severity)
            )?;
        }
    }

    writeln!(out)?;
    chart.draw(&ChartData::severity_split(&summary.severity), out)?;

    if trends.has_loaded() && !trends.data().is_empty() {
        writeln!(out)?;
        chart.draw(&ChartData::shortage_trend(trends.data()), out)?;
    }
    Ok(())
}

fn alert_row(out: &mut String, alert: &Alert, now: DateTime<Utc>) -> fmt::Result {
    let place = alert.district.as_deref().unwrap_or("");
    writeln!(
        out,
        "{} {:<8} {:<32} {:<12} {}",
        severity_badge(alert.severity),
        alert.kind,
        alert.subject(),
        place,
        format_time_ago(alert.timestamp, now)
    )?;
    writeln!(out, "  {}", alert.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertType, Severity, StockLevel};
    use crate::render::TextBarChart;
    use crate::sync::{ErrorPolicy, LoadingPolicy};
    use chrono::{Duration, TimeZone};

    fn hospital(name: &str, district: &str, total: u32, available: u32) -> Hospital {
        Hospital {
            id: 1,
            name: name.to_string(),
            district: district.to_string(),
            state: None,
            contact: "+91-22-1234-5678".to_string(),
            address: "123 Medical Street".to_string(),
            total_beds: total,
            available_beds: available,
            icu_beds: 20,
            available_icu: 3,
            last_updated: None,
        }
    }

    fn loaded<T: Default>(data: T) -> ViewState<T> {
        let mut state = ViewState::new();
        state.begin_request(LoadingPolicy::KeepData);
        state.set_data(data, Utc::now());
        state
    }

    #[test]
    fn test_hospital_initial_error_blocks_view() {
        let mut state: ViewState<Vec<Hospital>> = ViewState::new();
        state.set_error("Request timeout".into(), ErrorPolicy::KeepData);
        let out = hospitals(&state, "", &TextBarChart::default());
        assert!(out.contains("Error: Request timeout"));
        assert!(!out.contains("Beds:"));
    }

    #[test]
    fn test_hospital_later_error_keeps_data() {
        let mut state = loaded(vec![hospital("City General Hospital", "Mumbai", 150, 45)]);
        state.set_error("Request timeout".into(), ErrorPolicy::KeepData);
        let out = hospitals(&state, "", &TextBarChart::default());
        assert!(out.contains("Warning: Request timeout"));
        assert!(out.contains("City General Hospital"));
        assert!(out.contains("[+ GOOD]"));
    }

    #[test]
    fn test_hospital_loading_and_empty_search() {
        let state: ViewState<Vec<Hospital>> = ViewState::new();
        assert!(hospitals(&state, "", &TextBarChart::default()).contains("Loading hospitals"));

        let state = loaded(vec![hospital("Metro Hospital", "Bangalore", 100, 10)]);
        let out = hospitals(&state, "chennai", &TextBarChart::default());
        assert!(out.contains("No hospitals match \"chennai\""));
    }

    #[test]
    fn test_medicines_page_footer() {
        let items: Vec<Medicine> = (1..=8)
            .map(|id| Medicine {
                id,
                name: format!("Medicine {}", id),
                manufacturer: "Maker".into(),
                category: "Category".into(),
                availability: StockLevel::Low,
                warning: Some("Limited stock".into()),
                recall: id == 8,
                classification: None,
                recall_status: None,
                recall_date: None,
                source: None,
            })
            .collect();
        let state = loaded(items);

        let first = medicines(&state, "", 1);
        assert!(first.contains("Page 1 of 2  [n] next"));
        assert!(!first.contains("Medicine 7"));

        let second = medicines(&state, "", 5);
        assert!(second.contains("Page 2 of 2  [p] prev"));
        assert!(second.contains("[! RECALL]"));
    }

    #[test]
    fn test_medicines_loading_hides_rows() {
        let state: ViewState<Vec<Medicine>> = ViewState::new();
        let out = medicines(&state, "insulin", 1);
        assert!(out.contains("Search: \"insulin\""));
        assert!(out.contains("Loading medicines"));
    }

    #[test]
    fn test_alerts_view() {
        let now = Utc.with_ymd_and_hms(2024, 11, 2, 12, 0, 0).unwrap();
        let state = loaded(AlertFeed::unfiltered(vec![Alert {
            id: 1,
            kind: AlertType::Bed,
            district: Some("Delhi".into()),
            hospital: Some("Regional Medical Center".into()),
            hospital_id: Some(2),
            medicine: None,
            medicine_id: None,
            severity: Severity::Critical,
            message: "Only 12 beds available (6.0%)".into(),
            timestamp: now - Duration::minutes(45),
        }]));
        let trends = loaded(ShortageTrend {
            labels: vec!["Oct".into(), "Nov".into()],
            data: vec![25.0, 30.0],
        });

        let out = alerts(&state, &trends, AlertFilter::All, now, &TextBarChart::default());
        assert!(out.contains("45 minutes ago"));
        assert!(out.contains("Critical: 1"));
        assert!(out.contains("Medicine shortages"));
        assert!(out.contains("Alert severity"));
    }

    #[test]
    fn test_alerts_empty_state() {
        let now = Utc::now();
        let state: ViewState<AlertFeed> = loaded(AlertFeed::default());
        let trends: ViewState<ShortageTrend> = ViewState::new();
        let out = alerts(&state, &trends, AlertFilter::All, now, &TextBarChart::default());
        assert!(out.contains("No active alerts."));
        assert!(!out.contains("Medicine shortages"));
    }

    #[test]
    fn test_alerts_recent_lists_whole_feed() {
        let now = Utc.with_ymd_and_hms(2024, 11, 2, 12, 0, 0).unwrap();
        let bed = Alert {
            id: 1,
            kind: AlertType::Bed,
            district: Some("Chennai".into()),
            hospital: Some("Central Hospital".into()),
            hospital_id: Some(4),
            medicine: None,
            medicine_id: None,
            severity: Severity::Critical,
            message: "Only 25 beds available (14.0%)".into(),
            timestamp: now - Duration::minutes(30),
        };
        let medicine = Alert {
            id: 2,
            kind: AlertType::Medicine,
            district: None,
            hospital: None,
            hospital_id: None,
            medicine: Some("Insulin Glargine".into()),
            medicine_id: Some(3),
            severity: Severity::Moderate,
            message: "Insulin Glargine - Low availability".into(),
            timestamp: now - Duration::minutes(5),
        };
        let state = loaded(AlertFeed {
            selected: vec![bed.clone()],
            all: vec![bed, medicine],
        });

        let out = alerts(
            &state,
            &ViewState::new(),
            AlertFilter::Only(AlertType::Bed),
            now,
            &TextBarChart::default(),
        );
        assert!(out.contains("1 alerts"));
        assert!(!out.contains("Low availability"));
        assert!(out.contains("5 minutes ago"));
        assert!(out.contains("Insulin Glargine"));
    }
}
