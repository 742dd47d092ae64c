use crate::analyzers::{OverviewAnalyzer, QualityAnalyzer};
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::models::{DashboardSnapshot, ValidationRecord};
use crate::processors::{
    DayTypeFilter, DistributionView, HeatmapView, HourRange, MapView, ProfileFilter, ProfileView,
    StationJoiner, StationMarker,
};
use crate::readers::DatasetLoader;
use crate::settings::Settings;
use crate::utils::progress::ProgressReporter;
use crate::writers::ChartWriter;
use std::cmp::Ordering;

pub fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        settings = settings.with_data_dir(data_dir);
    }

    match cli.command {
        Commands::Report {
            day_type,
            stations,
            from_hour,
            to_hour,
        } => {
            println!("Reading the rail validation datasets...");
            println!("Data directory: {}", settings.data_dir.display());

            let snapshot = match load_snapshot(&settings)? {
                Some(snapshot) => snapshot,
                None => return Ok(()),
            };

            let filter = build_filter(day_type, &stations, from_hour, to_hour);
            let filtered = filter.filter_validations(&snapshot.validations.records);
            let joined_filtered = filter.filter_joined(&snapshot.joined);

            let analyzer = OverviewAnalyzer::new();
            let overview = analyzer.analyze(&snapshot, &filter, &filtered);
            println!("\n{}", overview.summary());

            if filtered.is_empty() {
                println!("\nNo rows match the current filters");
                return Ok(());
            }

            let profile = ProfileView::build(&filtered);
            println!(
                "\nHourly profile: {} stations, {} points",
                profile.series.len(),
                profile.point_count()
            );

            let distribution = DistributionView::build(&joined_filtered);
            println!("Validation share by mode:");
            for group in &distribution.groups {
                println!(
                    "  {}: median {:.2}%, mean {:.2}% over {} rows",
                    group.mode, group.median, group.mean, group.count
                );
            }

            let heatmap = build_heatmap(&snapshot, &filter, &filtered);
            if let DayTypeFilter::Only(_) = filter.day_type {
                println!("Heatmap keeps every day type and hour for the selected stations");
            }
            if let Some((day_type, hour, value)) = heatmap.peak() {
                println!(
                    "Heatmap: {} day types x {} hours, peak {:.2}% ({} at {}h)",
                    heatmap.day_types.len(),
                    heatmap.hours.len(),
                    value,
                    day_type,
                    hour
                );
            }

            let map = MapView::build(&joined_filtered);
            println!("Map: {} stations located", map.markers.len());
            let mut busiest: Vec<&StationMarker> = map.markers.iter().collect();
            busiest.sort_by(|a, b| {
                b.total_pct
                    .partial_cmp(&a.total_pct)
                    .unwrap_or(Ordering::Equal)
            });
            for (i, marker) in busiest.iter().take(3).enumerate() {
                println!(
                    "  {}. {} ({}): {:.1}",
                    i + 1,
                    marker.station_key,
                    marker.mode,
                    marker.total_pct
                );
            }
        }

        Commands::Export {
            day_type,
            stations,
            from_hour,
            to_hour,
            output_dir,
            compact,
        } => {
            if let Some(dir) = output_dir {
                settings = settings.with_export_dir(dir);
            }

            println!("Exporting chart datasets...");
            println!("Export directory: {}", settings.export_dir.display());

            let snapshot = match load_snapshot(&settings)? {
                Some(snapshot) => snapshot,
                None => return Ok(()),
            };

            let filter = build_filter(day_type, &stations, from_hour, to_hour);
            let filtered = filter.filter_validations(&snapshot.validations.records);
            let joined_filtered = filter.filter_joined(&snapshot.joined);

            if filtered.is_empty() {
                println!("No rows match the current filters - nothing to export");
                return Ok(());
            }

            let profile = ProfileView::build(&filtered);
            let distribution = DistributionView::build(&joined_filtered);
            let heatmap = build_heatmap(&snapshot, &filter, &filtered);
            let map = MapView::build(&joined_filtered);

            let writer = ChartWriter::new(&settings.export_dir).with_pretty(!compact);
            let written = [
                writer.write_profile(&profile)?,
                writer.write_distribution(&distribution)?,
                writer.write_heatmap(&heatmap)?,
                writer.write_map(&map)?,
                writer.write_filtered_table(&filtered)?,
            ];

            println!("\nWrote {} files:", written.len());
            for path in &written {
                println!("  {}", path.display());
            }

            println!("Export complete!");
        }

        Commands::Check => {
            println!("Checking data quality...");
            println!("Data directory: {}", settings.data_dir.display());

            let snapshot = match load_snapshot(&settings)? {
                Some(snapshot) => snapshot,
                None => return Ok(()),
            };

            let checker = QualityAnalyzer::new();
            let report = checker.analyze(&snapshot);
            println!("\n{}", report.summary());

            if report.is_clean() {
                println!("✅ Both datasets loaded and joined cleanly");
            } else {
                println!("⚠️  Findings above affect what the charts can show");
            }
        }
    }

    Ok(())
}

/// Load both tables and join them, or print one diagnostic per missing
/// file and return `None`
fn load_snapshot(settings: &Settings) -> Result<Option<DashboardSnapshot>> {
    let missing = settings.missing_sources();
    if !missing.is_empty() {
        for diagnostic in &missing {
            println!("{}", diagnostic);
        }
        println!("Download the missing files and drop them into the data directory");
        return Ok(None);
    }

    let progress = ProgressReporter::spinner("Loading datasets...");

    let mut loader = DatasetLoader::new();
    let validations = loader.load_validations(&settings.validations_path())?;
    let stations = loader.load_stations(&settings.stations_path())?;

    progress.set_message("Joining stations onto hourly profiles...");
    let (joined, join_stats) = StationJoiner::new().join(&validations.records, &stations.records);

    progress.finish_with_message(&format!(
        "Loaded {} hourly rows and {} stations, {} rows matched",
        validations.records.len(),
        stations.records.len(),
        join_stats.matched_rows
    ));

    Ok(Some(DashboardSnapshot {
        validations,
        stations,
        joined,
        join_stats,
    }))
}

fn build_filter(
    day_type: Option<String>,
    stations: &[String],
    from_hour: u8,
    to_hour: u8,
) -> ProfileFilter {
    // "Tous" is the day-type selector's catch-all label; "all" works too
    let day_type = match day_type {
        Some(label)
            if !label.eq_ignore_ascii_case("tous") && !label.eq_ignore_ascii_case("all") =>
        {
            DayTypeFilter::Only(label)
        }
        _ => DayTypeFilter::All,
    };

    ProfileFilter::new()
        .with_day_type(day_type)
        .with_stations(stations)
        .with_hours(HourRange::new(from_hour, to_hour))
}

/// With one day type selected the heatmap falls back to every day type and
/// hour for the selected stations, so the grid stays comparative
fn build_heatmap(
    snapshot: &DashboardSnapshot,
    filter: &ProfileFilter,
    filtered: &[ValidationRecord],
) -> HeatmapView {
    match filter.day_type {
        DayTypeFilter::All => HeatmapView::build(filtered),
        DayTypeFilter::Only(_) => {
            let scoped = filter
                .station_scope()
                .filter_validations(&snapshot.validations.records);
            HeatmapView::build(&scoped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_type_catch_all_labels() {
        for label in ["tous", "Tous", "TOUS", "all", "All"] {
            let filter = build_filter(Some(label.to_string()), &[], 0, 23);
            assert_eq!(filter.day_type, DayTypeFilter::All, "label {label:?}");
        }

        let filter = build_filter(None, &[], 0, 23);
        assert_eq!(filter.day_type, DayTypeFilter::All);

        let filter = build_filter(Some("JOHV".to_string()), &[], 0, 23);
        assert_eq!(filter.day_type, DayTypeFilter::Only("JOHV".to_string()));
    }
}
