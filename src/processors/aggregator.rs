use crate::models::{JoinedRecord, TransportMode, ValidationRecord};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// One point of a station's hourly profile curve
#[derive(Debug, Clone, Serialize)]
pub struct ProfilePoint {
    pub hour: u8,
    pub day_type: String,
    pub validation_pct: f64,
}

/// Hourly profile of one station, points ordered by hour
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSeries {
    pub station_key: String,
    pub points: Vec<ProfilePoint>,
}

/// Dataset behind the profile curves: one series per station, series
/// ordered by station key
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub series: Vec<ProfileSeries>,
}

impl ProfileView {
    pub fn build(records: &[ValidationRecord]) -> Self {
        let mut sorted: Vec<&ValidationRecord> = records.iter().collect();
        sorted.sort_by(|a, b| {
            a.station_key
                .cmp(&b.station_key)
                .then(a.hour.cmp(&b.hour))
        });

        let mut series: Vec<ProfileSeries> = Vec::new();
        for record in sorted {
            let point = ProfilePoint {
                hour: record.hour,
                day_type: record.day_type.clone(),
                validation_pct: record.validation_pct,
            };
            match series.last_mut() {
                Some(current) if current.station_key == record.station_key => {
                    current.points.push(point)
                }
                _ => series.push(ProfileSeries {
                    station_key: record.station_key.clone(),
                    points: vec![point],
                }),
            }
        }

        Self { series }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// Five-number summary of one transport mode, with the raw sample kept for
/// all-points rendering
#[derive(Debug, Clone, Serialize)]
pub struct ModeSummary {
    pub mode: TransportMode,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub q1: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub values: Vec<f64>,
}

impl ModeSummary {
    fn from_values(mode: TransportMode, mut values: Vec<f64>) -> Self {
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let q1 = percentile(&values, 25.0);
        let median = percentile(&values, 50.0);
        let q3 = percentile(&values, 75.0);

        // Whiskers reach the outermost samples within 1.5 IQR of the box
        let iqr = q3 - q1;
        let whisker_low = values
            .iter()
            .copied()
            .find(|&v| v >= q1 - 1.5 * iqr)
            .unwrap_or(q1);
        let whisker_high = values
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + 1.5 * iqr)
            .unwrap_or(q3);

        Self {
            mode,
            count,
            mean,
            median,
            q1,
            q3,
            whisker_low,
            whisker_high,
            values,
        }
    }
}

/// Dataset behind the per-mode distribution plot
///
/// Rows without a known transport mode are excluded; groups are ordered by
/// descending median like the original category axis.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionView {
    pub groups: Vec<ModeSummary>,
}

impl DistributionView {
    pub fn build(records: &[JoinedRecord]) -> Self {
        let mut by_mode: HashMap<TransportMode, Vec<f64>> = HashMap::new();
        for record in records {
            if let Some(mode) = record.mode {
                by_mode.entry(mode).or_default().push(record.validation_pct);
            }
        }

        let mut groups: Vec<ModeSummary> = by_mode
            .into_iter()
            .map(|(mode, values)| ModeSummary::from_values(mode, values))
            .collect();

        groups.sort_by(|a, b| {
            b.median
                .partial_cmp(&a.median)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.mode.to_string().cmp(&b.mode.to_string()))
        });

        Self { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Dense day-type by hour grid of mean validation shares
///
/// Rows follow `day_types`, columns follow `hours`; a combination with no
/// observations is `None`, never zero.
#[derive(Debug, Clone, Serialize)]
pub struct HeatmapView {
    pub day_types: Vec<String>,
    pub hours: Vec<u8>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl HeatmapView {
    pub fn build(records: &[ValidationRecord]) -> Self {
        let mut sums: HashMap<(&str, u8), (f64, usize)> = HashMap::new();
        for record in records {
            let entry = sums
                .entry((record.day_type.as_str(), record.hour))
                .or_insert((0.0, 0));
            entry.0 += record.validation_pct;
            entry.1 += 1;
        }

        let mut day_types: Vec<String> = sums
            .keys()
            .map(|(day_type, _)| day_type.to_string())
            .collect();
        day_types.sort();
        day_types.dedup();

        let mut hours: Vec<u8> = sums.keys().map(|(_, hour)| *hour).collect();
        hours.sort_unstable();
        hours.dedup();

        let cells = day_types
            .iter()
            .map(|day_type| {
                hours
                    .iter()
                    .map(|hour| {
                        sums.get(&(day_type.as_str(), *hour))
                            .map(|(sum, count)| sum / *count as f64)
                    })
                    .collect()
            })
            .collect();

        Self {
            day_types,
            hours,
            cells,
        }
    }

    /// Mean share at one grid position, if observed
    pub fn cell(&self, day_type: &str, hour: u8) -> Option<f64> {
        let row = self.day_types.iter().position(|d| d == day_type)?;
        let col = self.hours.iter().position(|h| *h == hour)?;
        self.cells[row][col]
    }

    /// Grid position holding the highest mean share
    pub fn peak(&self) -> Option<(&str, u8, f64)> {
        let mut best: Option<(&str, u8, f64)> = None;
        for (row, day_type) in self.day_types.iter().enumerate() {
            for (col, hour) in self.hours.iter().enumerate() {
                if let Some(value) = self.cells[row][col] {
                    if best.map_or(true, |(_, _, top)| value > top) {
                        best = Some((day_type.as_str(), *hour, value));
                    }
                }
            }
        }
        best
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// One map marker: a station with its total validation share
#[derive(Debug, Clone, Serialize)]
pub struct StationMarker {
    pub station_key: String,
    pub latitude: f64,
    pub longitude: f64,
    pub mode: TransportMode,
    pub operator: Option<String>,
    pub total_pct: f64,
}

/// Dataset behind the station map, markers ordered by station key
///
/// Rows without coordinates have nowhere to render and produce no marker.
#[derive(Debug, Clone, Serialize)]
pub struct MapView {
    pub markers: Vec<StationMarker>,
}

impl MapView {
    pub fn build(records: &[JoinedRecord]) -> Self {
        let mut by_station: BTreeMap<String, StationMarker> = BTreeMap::new();

        for record in records {
            let (latitude, longitude) = match (record.latitude, record.longitude) {
                (Some(lat), Some(lon)) => (lat, lon),
                _ => continue,
            };

            by_station
                .entry(record.station_key.clone())
                .and_modify(|marker| marker.total_pct += record.validation_pct)
                .or_insert_with(|| StationMarker {
                    station_key: record.station_key.clone(),
                    latitude,
                    longitude,
                    mode: record.mode.unwrap_or(TransportMode::Other),
                    operator: record.operator.clone(),
                    total_pct: record.validation_pct,
                });
        }

        Self {
            markers: by_station.into_values().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Percentile of a sorted sample, linearly interpolated
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted[lower]
    } else {
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}
